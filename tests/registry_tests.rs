//! Integration tests for the asset collection services.
//!
//! Each test runs against its own in-memory database with the full schema
//! applied, so they are hermetic and need no external setup:
//!
//! ```sh
//! cargo test --test registry_tests
//! ```

mod common;

use std::collections::BTreeSet;

use common::fixtures;
use common::TestContext;

use asset_registry::services::camera_service::CameraService;
use asset_registry::services::component_service::ComponentService;
use asset_registry::services::misc_asset_service::MiscAssetService;
use asset_registry::services::printer_service::PrinterService;
use asset_registry::services::workstation_service::WorkstationService;

fn name_set(rows: &[asset_registry::models::workstation::Workstation]) -> BTreeSet<String> {
    rows.iter().map(|w| w.name.clone()).collect()
}

#[tokio::test]
async fn test_create_then_get_round_trips_every_field() {
    let ctx = TestContext::new().await;
    let service = WorkstationService::new(ctx.pool.clone());

    let fields = fixtures::workstation("WS-DEV-01");
    let id = service.create(&fields).await.unwrap();
    let stored = service.get_by_id(id).await.unwrap().unwrap();

    assert_eq!(stored.name, fields.name);
    assert_eq!(stored.invoice_number, fields.invoice_number);
    assert_eq!(stored.mac, fields.mac);
    assert_eq!(stored.ip, fields.ip);
    assert_eq!(stored.brand, fields.brand);
    assert_eq!(stored.model, fields.model);
    assert_eq!(stored.serial, fields.serial);
    assert_eq!(stored.purchase_date, fields.purchase_date);
    assert_eq!(stored.assigned_user, fields.assigned_user);
    assert_eq!(stored.domain_user, fields.domain_user);
    assert_eq!(stored.in_domain, fields.in_domain);
    assert_eq!(stored.has_antivirus, fields.has_antivirus);
    assert_eq!(stored.disk_encrypted, fields.disk_encrypted);
    assert_eq!(stored.internet_access, fields.internet_access);
    assert_eq!(stored.company, fields.company);
    // Server-managed columns start at their defaults.
    assert!(stored.active);
    assert_eq!(stored.attachment, "");
    assert_eq!(stored.registered_at.len(), 10);
}

#[tokio::test]
async fn test_update_missing_id_is_silent_and_creates_nothing() {
    let ctx = TestContext::new().await;
    let service = WorkstationService::new(ctx.pool.clone());

    let fields = fixtures::workstation("WS-GHOST");
    service.update(9999, &fields).await.unwrap();

    assert!(service.get_by_id(9999).await.unwrap().is_none());
    assert!(service.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_twice_is_a_no_op_the_second_time() {
    let ctx = TestContext::new().await;
    let service = WorkstationService::new(ctx.pool.clone());

    let id = service
        .create(&fixtures::workstation("WS-TEMP"))
        .await
        .unwrap();

    service.delete(id).await.unwrap();
    assert!(service.get_by_id(id).await.unwrap().is_none());

    // Second delete of the same id must not fail.
    service.delete(id).await.unwrap();
}

#[tokio::test]
async fn test_empty_search_equals_active_only_listing() {
    let ctx = TestContext::new().await;
    let service = WorkstationService::new(ctx.pool.clone());

    let a = service
        .create(&fixtures::workstation("WS-ALPHA"))
        .await
        .unwrap();
    service
        .create(&fixtures::workstation("WS-BRAVO"))
        .await
        .unwrap();
    let c = service
        .create(&fixtures::workstation("WS-CHARLIE"))
        .await
        .unwrap();
    service.set_active(a, false).await.unwrap();
    service.set_active(c, false).await.unwrap();

    let searched = service.search("", None, true).await.unwrap();
    let listed: Vec<_> = service
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .filter(|w| w.active)
        .collect();

    assert_eq!(name_set(&searched), name_set(&listed));
    assert_eq!(searched.len(), 1);
}

#[tokio::test]
async fn test_search_combines_fragment_and_exact_company() {
    let ctx = TestContext::new().await;
    let service = WorkstationService::new(ctx.pool.clone());

    // Matches: company Acme and "10" in the IP.
    let mut hit = fixtures::workstation_of("WS-SALES", "Acme");
    hit.ip = "192.168.3.10".to_string();
    service.create(&hit).await.unwrap();

    // Wrong company, even though "10" matches.
    let mut other_company = fixtures::workstation_of("WS-EXT", "Globex");
    other_company.ip = "192.168.3.10".to_string();
    service.create(&other_company).await.unwrap();

    // Right company, no "10" anywhere.
    let mut no_fragment = fixtures::workstation_of("WS-HR", "Acme");
    no_fragment.ip = "192.168.3.77".to_string();
    no_fragment.assigned_user = "Pedro Diaz".to_string();
    service.create(&no_fragment).await.unwrap();

    // Company prefix must not match: the filter is exact equality.
    let mut prefix_company = fixtures::workstation_of("WS-LAB-10", "Acme Foods");
    prefix_company.ip = "192.168.3.10".to_string();
    service.create(&prefix_company).await.unwrap();

    let results = service.search("10", Some("Acme"), false).await.unwrap();
    let names = name_set(&results);

    assert_eq!(names, BTreeSet::from(["WS-SALES".to_string()]));
}

#[tokio::test]
async fn test_search_matches_assigned_user_fragment() {
    let ctx = TestContext::new().await;
    let service = WorkstationService::new(ctx.pool.clone());

    let mut fields = fixtures::workstation("WS-FRONT");
    fields.assigned_user = "Marta Ruiz".to_string();
    service.create(&fields).await.unwrap();
    service
        .create(&fixtures::workstation("WS-BACK"))
        .await
        .unwrap();

    let results = service.search("Ruiz", None, false).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "WS-FRONT");
}

#[tokio::test]
async fn test_deactivated_rows_stay_listed_but_drop_from_active_search() {
    let ctx = TestContext::new().await;
    let service = WorkstationService::new(ctx.pool.clone());

    let id = service
        .create(&fixtures::workstation("WS-RETIRED"))
        .await
        .unwrap();
    service.set_active(id, false).await.unwrap();

    // Still present for historical listings.
    let all = service.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(!all[0].active);

    // Gone from the active-only view.
    assert!(service.search("", None, true).await.unwrap().is_empty());

    // Reactivation brings it back.
    service.set_active(id, true).await.unwrap();
    assert_eq!(service.search("", None, true).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_active_counts_track_flag_changes() {
    let ctx = TestContext::new().await;
    let service = WorkstationService::new(ctx.pool.clone());

    let a = service
        .create(&fixtures::workstation("WS-A"))
        .await
        .unwrap();
    service.create(&fixtures::workstation("WS-B")).await.unwrap();
    service.create(&fixtures::workstation("WS-C")).await.unwrap();

    assert_eq!(service.count_by_active(true).await.unwrap(), 3);
    assert_eq!(service.count_by_active(false).await.unwrap(), 0);

    service.set_active(a, false).await.unwrap();

    assert_eq!(service.count_by_active(true).await.unwrap(), 2);
    assert_eq!(service.count_by_active(false).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_rewrites_fields_but_not_managed_columns() {
    let ctx = TestContext::new().await;
    let service = WorkstationService::new(ctx.pool.clone());

    let id = service
        .create(&fixtures::workstation("WS-OLD"))
        .await
        .unwrap();
    service.replace_attachment(id, "uploads/ws-old.pdf").await.unwrap();
    let before = service.get_by_id(id).await.unwrap().unwrap();

    let mut fields = fixtures::workstation("WS-NEW");
    fields.ip = "192.168.3.99".to_string();
    service.update(id, &fields).await.unwrap();

    let after = service.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(after.name, "WS-NEW");
    assert_eq!(after.ip, "192.168.3.99");
    // The pointer and registration date survive a field update.
    assert_eq!(after.attachment, "uploads/ws-old.pdf");
    assert_eq!(after.registered_at, before.registered_at);
    assert!(after.active);
}

#[tokio::test]
async fn test_attachment_pointer_replace_and_clear() {
    let ctx = TestContext::new().await;
    let service = WorkstationService::new(ctx.pool.clone());

    let id = service
        .create(&fixtures::workstation("WS-DOCS"))
        .await
        .unwrap();

    service
        .replace_attachment(id, "uploads/invoice-1.pdf")
        .await
        .unwrap();
    let row = service.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(row.attachment, "uploads/invoice-1.pdf");

    service
        .replace_attachment(id, "uploads/invoice-2.pdf")
        .await
        .unwrap();
    let row = service.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(row.attachment, "uploads/invoice-2.pdf");

    service.replace_attachment(id, "").await.unwrap();
    let row = service.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(row.attachment, "");
}

#[tokio::test]
async fn test_components_belong_to_their_workstation() {
    let ctx = TestContext::new().await;
    let workstations = WorkstationService::new(ctx.pool.clone());
    let components = ComponentService::new(ctx.pool.clone());

    let first = workstations
        .create(&fixtures::workstation("WS-ONE"))
        .await
        .unwrap();
    let second = workstations
        .create(&fixtures::workstation("WS-TWO"))
        .await
        .unwrap();

    components
        .create(first, &fixtures::component("Office"))
        .await
        .unwrap();
    components
        .create(first, &fixtures::component("AutoCAD"))
        .await
        .unwrap();
    components
        .create(second, &fixtures::component("Photoshop"))
        .await
        .unwrap();

    let of_first = components.list_by_workstation(first).await.unwrap();
    let of_second = components.list_by_workstation(second).await.unwrap();

    assert_eq!(of_first.len(), 2);
    assert_eq!(of_second.len(), 1);
    assert!(of_first.iter().all(|c| c.workstation_id == first));
    assert_eq!(of_second[0].name, "Photoshop");
}

#[tokio::test]
async fn test_workstation_delete_does_not_cascade_to_components() {
    let ctx = TestContext::new().await;
    let workstations = WorkstationService::new(ctx.pool.clone());
    let components = ComponentService::new(ctx.pool.clone());

    let ws = workstations
        .create(&fixtures::workstation("WS-HOST"))
        .await
        .unwrap();
    let comp = components
        .create(ws, &fixtures::component("Office"))
        .await
        .unwrap();

    workstations.delete(ws).await.unwrap();

    // Components are deleted only through their own explicit action.
    let survivor = components.get_by_id(comp).await.unwrap().unwrap();
    assert_eq!(survivor.workstation_id, ws);

    components.delete(comp).await.unwrap();
    assert!(components.get_by_id(comp).await.unwrap().is_none());
}

#[tokio::test]
async fn test_component_crud_matches_collection_contract() {
    let ctx = TestContext::new().await;
    let workstations = WorkstationService::new(ctx.pool.clone());
    let components = ComponentService::new(ctx.pool.clone());

    let ws = workstations
        .create(&fixtures::workstation("WS-SOFT"))
        .await
        .unwrap();
    let id = components
        .create(ws, &fixtures::component("Office"))
        .await
        .unwrap();

    let stored = components.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Office");
    assert_eq!(stored.vendor, "Microsoft");
    assert!(stored.vendor_applies);
    assert!(stored.active);

    let mut fields = fixtures::component("Office LTSC");
    fields.vendor_applies = false;
    components.update(id, &fields).await.unwrap();
    let stored = components.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Office LTSC");
    assert!(!stored.vendor_applies);

    components.set_active(id, false).await.unwrap();
    assert!(!components.get_by_id(id).await.unwrap().unwrap().active);

    // Silent no-op contract on a missing id.
    components.update(777, &fields).await.unwrap();
    assert!(components.get_by_id(777).await.unwrap().is_none());

    components.delete(id).await.unwrap();
    components.delete(id).await.unwrap();
}

#[tokio::test]
async fn test_printer_camera_and_misc_hard_delete_only() {
    let ctx = TestContext::new().await;
    let printers = PrinterService::new(ctx.pool.clone());
    let cameras = CameraService::new(ctx.pool.clone());
    let misc = MiscAssetService::new(ctx.pool.clone());

    let p = printers.create(&fixtures::printer("PRN-001")).await.unwrap();
    let c = cameras.create(&fixtures::camera("CAM-001")).await.unwrap();
    let m = misc.create(&fixtures::misc_asset("Switch 24p")).await.unwrap();

    assert_eq!(printers.list_all().await.unwrap().len(), 1);
    assert_eq!(cameras.list_all().await.unwrap().len(), 1);
    assert_eq!(misc.list_all().await.unwrap().len(), 1);

    printers.delete(p).await.unwrap();
    cameras.delete(c).await.unwrap();
    misc.delete(m).await.unwrap();

    assert!(printers.get_by_id(p).await.unwrap().is_none());
    assert!(cameras.get_by_id(c).await.unwrap().is_none());
    assert!(misc.get_by_id(m).await.unwrap().is_none());

    // Idempotent deletes across all three collections.
    printers.delete(p).await.unwrap();
    cameras.delete(c).await.unwrap();
    misc.delete(m).await.unwrap();
}

#[tokio::test]
async fn test_printer_update_and_attachment_pointer() {
    let ctx = TestContext::new().await;
    let printers = PrinterService::new(ctx.pool.clone());

    let id = printers.create(&fixtures::printer("PRN-010")).await.unwrap();

    let mut fields = fixtures::printer("PRN-010");
    fields.area = "Reception".to_string();
    printers.update(id, &fields).await.unwrap();
    let stored = printers.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.area, "Reception");

    printers
        .replace_attachment(id, "uploads/printer-manual.pdf")
        .await
        .unwrap();
    let stored = printers.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.attachment, "uploads/printer-manual.pdf");

    // Missing-id update remains silent.
    printers.update(4242, &fields).await.unwrap();
    assert!(printers.get_by_id(4242).await.unwrap().is_none());
}

#[tokio::test]
async fn test_camera_status_and_misc_description_round_trip() {
    let ctx = TestContext::new().await;
    let cameras = CameraService::new(ctx.pool.clone());
    let misc = MiscAssetService::new(ctx.pool.clone());

    let cam = cameras.create(&fixtures::camera("CAM-077")).await.unwrap();
    let stored = cameras.get_by_id(cam).await.unwrap().unwrap();
    assert_eq!(stored.status, "Online");

    let mut fields = fixtures::camera("CAM-077");
    fields.status = "Offline".to_string();
    cameras.update(cam, &fields).await.unwrap();
    assert_eq!(
        cameras.get_by_id(cam).await.unwrap().unwrap().status,
        "Offline"
    );

    let m = misc.create(&fixtures::misc_asset("UPS basement")).await.unwrap();
    let stored = misc.get_by_id(m).await.unwrap().unwrap();
    assert_eq!(stored.description, "Rack switch for the second floor");
    assert_eq!(stored.name, "UPS basement");
}

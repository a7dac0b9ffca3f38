//! Test fixtures and data factories for integration tests
//!
//! Provides reusable records for:
//! - Workstations and their components
//! - Printers, cameras and miscellaneous assets

#![allow(dead_code)]

use asset_registry::models::camera::CameraFields;
use asset_registry::models::component::ComponentFields;
use asset_registry::models::misc_asset::MiscAssetFields;
use asset_registry::models::printer::PrinterFields;
use asset_registry::models::workstation::WorkstationFields;

/// A fully populated workstation record
pub fn workstation(name: &str) -> WorkstationFields {
    WorkstationFields {
        name: name.to_string(),
        invoice_number: "F-2024-0371".to_string(),
        mac: "AA:BB:CC:DD:EE:01".to_string(),
        ip: "192.168.3.50".to_string(),
        brand: "Dell".to_string(),
        model: "OptiPlex 7090".to_string(),
        serial: "5CG1234XYZ".to_string(),
        purchase_date: "2024-03-11".to_string(),
        assigned_user: "Laura Gomez".to_string(),
        domain_user: "CORP\\lgomez".to_string(),
        in_domain: true,
        has_antivirus: true,
        disk_encrypted: false,
        internet_access: true,
        company: "Acme Foods".to_string(),
    }
}

/// Workstation with a specific address, for network scan tests
pub fn workstation_at(name: &str, ip: &str) -> WorkstationFields {
    let mut fields = workstation(name);
    fields.ip = ip.to_string();
    fields
}

/// Workstation owned by a specific company, for search tests
pub fn workstation_of(name: &str, company: &str) -> WorkstationFields {
    let mut fields = workstation(name);
    fields.company = company.to_string();
    fields
}

/// A fully populated software component record
pub fn component(name: &str) -> ComponentFields {
    ComponentFields {
        name: name.to_string(),
        version: "16.4".to_string(),
        serial: "OFF-2291-K".to_string(),
        product_id: "PRD-88012".to_string(),
        license_key: "7Q2VN-4TJ8K-DXM3R-PW6BH".to_string(),
        vendor: "Microsoft".to_string(),
        vendor_applies: true,
        purchase_date: "2024-01-09".to_string(),
        expiry_date: "2026-01-09".to_string(),
    }
}

/// A fully populated printer record
pub fn printer(serial: &str) -> PrinterFields {
    PrinterFields {
        brand: "Brother".to_string(),
        model: "HL-L2370DW".to_string(),
        mac: "AA:BB:CC:DD:EE:20".to_string(),
        ip: "192.168.3.120".to_string(),
        serial: serial.to_string(),
        area: "Accounting".to_string(),
    }
}

/// A fully populated camera record
pub fn camera(serial: &str) -> CameraFields {
    CameraFields {
        brand: "Hikvision".to_string(),
        model: "DS-2CD2143G2".to_string(),
        mac: "AA:BB:CC:DD:EE:30".to_string(),
        ip: "192.168.3.200".to_string(),
        serial: serial.to_string(),
        area: "Warehouse entrance".to_string(),
        status: "Online".to_string(),
    }
}

/// A fully populated miscellaneous asset record
pub fn misc_asset(name: &str) -> MiscAssetFields {
    MiscAssetFields {
        name: name.to_string(),
        brand: "Ubiquiti".to_string(),
        model: "USW-24-POE".to_string(),
        mac: "AA:BB:CC:DD:EE:40".to_string(),
        ip: "192.168.3.240".to_string(),
        serial: "SW24-00917".to_string(),
        area: "Server room".to_string(),
        description: "Rack switch for the second floor".to_string(),
    }
}

//! Address space analyzer.
//!
//! Computes the set of IP addresses already recorded across the four asset
//! collections and derives the free addresses within a numeric subnet range.
//! All IP values are free text; the scan treats them as opaque strings.

use std::collections::BTreeSet;

use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::error::Result;
use crate::models::camera::Camera;
use crate::models::misc_asset::MiscAsset;
use crate::models::printer::Printer;
use crate::models::workstation::Workstation;

/// Hard ceiling on the scanned span, guarding against pathological ranges.
const MAX_RANGE_SPAN: i64 = 2000;

/// Fallback bounds when the requested ones fail integer coercion.
const DEFAULT_RANGE: (i64, i64) = (1, 254);

/// How a multi-collection scan reacts to a single collection failing to read.
///
/// `BestEffort` keeps the partial result (the unreadable collection simply
/// contributes no addresses); `Strict` propagates the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPolicy {
    BestEffort,
    Strict,
}

/// Per-collection rows whose IP field contains a searched fragment.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct IpMatches {
    pub workstations: Vec<Workstation>,
    pub printers: Vec<Printer>,
    pub cameras: Vec<Camera>,
    pub misc: Vec<MiscAsset>,
}

/// Strip surrounding whitespace and a single trailing dot from a prefix.
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => trimmed.to_string(),
    }
}

/// Coerce raw range bounds to integers, each bound falling back to its own
/// default (1 or 254) when it fails to parse.
pub fn coerce_bounds(start_raw: &str, end_raw: &str) -> (i64, i64) {
    let start = start_raw.trim().parse::<i64>().unwrap_or(DEFAULT_RANGE.0);
    let end = end_raw.trim().parse::<i64>().unwrap_or(DEFAULT_RANGE.1);
    (start, end)
}

/// Clamp a requested range: negative starts reset to 1 (zero is kept),
/// an inverted range collapses to a single host, and the span is capped.
pub fn clamp_range(mut start: i64, mut end: i64) -> (i64, i64) {
    if start < 0 {
        start = 1;
    }
    if end < start {
        end = start;
    }
    if end - start > MAX_RANGE_SPAN {
        end = start + MAX_RANGE_SPAN;
    }
    (start, end)
}

/// Enumerate the free addresses `"{prefix}.{i}"` for `i` in the clamped
/// range, ascending, stopping once `max_results` have been emitted.
///
/// An empty prefix (after normalization) yields an empty result.
pub fn enumerate_available(
    prefix: &str,
    start: i64,
    end: i64,
    max_results: usize,
    used: &BTreeSet<String>,
) -> Vec<String> {
    let prefix = normalize_prefix(prefix);
    if prefix.is_empty() {
        return Vec::new();
    }

    let (start, end) = clamp_range(start, end);

    let mut available = Vec::new();
    for i in start..=end {
        if available.len() >= max_results {
            break;
        }
        let candidate = format!("{prefix}.{i}");
        if !used.contains(&candidate) {
            available.push(candidate);
        }
    }
    available
}

/// Network service
pub struct NetworkService {
    db: SqlitePool,
}

impl NetworkService {
    /// Create a new network service
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Collect the distinct, non-empty, trimmed IP values across all four
    /// asset collections.
    pub async fn used_addresses(&self, policy: ScanPolicy) -> Result<BTreeSet<String>> {
        let mut used = BTreeSet::new();

        for table in ["equipos", "impresoras", "camaras", "otros"] {
            let result = sqlx::query_scalar::<_, String>(&format!(
                "SELECT ip FROM {table} WHERE ip IS NOT NULL AND ip != ''"
            ))
            .fetch_all(&self.db)
            .await;

            match result {
                Ok(ips) => {
                    for ip in ips {
                        let trimmed = ip.trim();
                        if !trimmed.is_empty() {
                            used.insert(trimmed.to_string());
                        }
                    }
                }
                Err(e) => match policy {
                    ScanPolicy::Strict => return Err(e.into()),
                    ScanPolicy::BestEffort => {
                        tracing::warn!(table, error = %e, "skipping unreadable collection in IP scan");
                    }
                },
            }
        }

        Ok(used)
    }

    /// Scan the collections once and derive the free addresses in the
    /// requested range. See [`enumerate_available`] for the range rules.
    pub async fn available_addresses(
        &self,
        prefix: &str,
        start: i64,
        end: i64,
        max_results: usize,
        policy: ScanPolicy,
    ) -> Result<Vec<String>> {
        let used = self.used_addresses(policy).await?;
        Ok(enumerate_available(prefix, start, end, max_results, &used))
    }

    /// Find, per collection, the rows whose IP contains `fragment` as a
    /// case-sensitive substring. An empty fragment short-circuits to empty
    /// result sets, not to match-everything.
    pub async fn match_by_ip(&self, fragment: &str) -> Result<IpMatches> {
        if fragment.is_empty() {
            return Ok(IpMatches::default());
        }

        let workstations = sqlx::query_as::<_, Workstation>(
            "SELECT id, name, invoice_number, mac, ip, brand, model, serial, purchase_date, \
             assigned_user, domain_user, in_domain, has_antivirus, disk_encrypted, \
             internet_access, attachment, registered_at, company, active \
             FROM equipos WHERE instr(ip, ?) > 0",
        )
        .bind(fragment)
        .fetch_all(&self.db)
        .await?;

        let printers = sqlx::query_as::<_, Printer>(
            "SELECT id, brand, model, mac, ip, serial, area, attachment \
             FROM impresoras WHERE instr(ip, ?) > 0",
        )
        .bind(fragment)
        .fetch_all(&self.db)
        .await?;

        let cameras = sqlx::query_as::<_, Camera>(
            "SELECT id, brand, model, mac, ip, serial, area, status, attachment \
             FROM camaras WHERE instr(ip, ?) > 0",
        )
        .bind(fragment)
        .fetch_all(&self.db)
        .await?;

        let misc = sqlx::query_as::<_, MiscAsset>(
            "SELECT id, name, brand, model, mac, ip, serial, area, description, attachment \
             FROM otros WHERE instr(ip, ?) > 0",
        )
        .bind(fragment)
        .fetch_all(&self.db)
        .await?;

        Ok(IpMatches {
            workstations,
            printers,
            cameras,
            misc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix_strips_one_trailing_dot() {
        assert_eq!(normalize_prefix("192.168.3."), "192.168.3");
        assert_eq!(normalize_prefix("192.168.3.."), "192.168.3.");
        assert_eq!(normalize_prefix("  10.0.0 "), "10.0.0");
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("   "), "");
    }

    #[test]
    fn test_coerce_bounds_parses_both() {
        assert_eq!(coerce_bounds("5", "20"), (5, 20));
        assert_eq!(coerce_bounds(" 7 ", "9"), (7, 9));
    }

    #[test]
    fn test_coerce_bounds_falls_back_per_bound() {
        // A bad bound defaults alone; the other survives as typed
        assert_eq!(coerce_bounds("abc", "20"), (1, 20));
        assert_eq!(coerce_bounds("5", ""), (5, 254));
        assert_eq!(coerce_bounds("", ""), (1, 254));
    }

    #[test]
    fn test_clamp_range_negative_start() {
        assert_eq!(clamp_range(-3, 10), (1, 10));
        // Zero is a valid start and stays
        assert_eq!(clamp_range(0, 10), (0, 10));
    }

    #[test]
    fn test_clamp_range_inverted() {
        assert_eq!(clamp_range(10, 4), (10, 10));
    }

    #[test]
    fn test_clamp_range_caps_span() {
        assert_eq!(clamp_range(5, 5000), (5, 2005));
        assert_eq!(clamp_range(1, 2001), (1, 2001));
    }

    #[test]
    fn test_enumerate_available_skips_used_and_respects_limit() {
        let used: BTreeSet<String> = ["192.168.3.2".to_string()].into();

        let free = enumerate_available("192.168.3.", 1, 4, 10, &used);
        assert_eq!(free, vec!["192.168.3.1", "192.168.3.3", "192.168.3.4"]);

        let capped = enumerate_available("192.168.3", 1, 254, 2, &used);
        assert_eq!(capped, vec!["192.168.3.1", "192.168.3.3"]);

        assert!(enumerate_available("", 1, 10, 10, &used).is_empty());
    }

    #[tokio::test]
    async fn test_used_addresses_trims_and_dedupes() {
        let pool = crate::db::test_pool().await;
        sqlx::query("INSERT INTO impresoras (brand, ip) VALUES ('HP', ' 192.168.3.7 ')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO camaras (brand, ip) VALUES ('Axis', '192.168.3.7')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO otros (name, ip) VALUES ('AP', '')")
            .execute(&pool)
            .await
            .unwrap();

        let service = NetworkService::new(pool);
        let used = service.used_addresses(ScanPolicy::Strict).await.unwrap();
        assert_eq!(used.len(), 1);
        assert!(used.contains("192.168.3.7"));
    }

    #[tokio::test]
    async fn test_match_by_ip_empty_fragment_short_circuits() {
        let pool = crate::db::test_pool().await;
        sqlx::query("INSERT INTO impresoras (brand, ip) VALUES ('HP', '10.0.0.1')")
            .execute(&pool)
            .await
            .unwrap();

        let service = NetworkService::new(pool);
        let matches = service.match_by_ip("").await.unwrap();
        assert!(matches.workstations.is_empty());
        assert!(matches.printers.is_empty());
        assert!(matches.cameras.is_empty());
        assert!(matches.misc.is_empty());
    }
}

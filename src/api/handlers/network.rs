//! Network analysis handlers: free-address scan and IP lookup.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::api::SharedState;
use crate::error::Result;
use crate::services::network_service::{self, IpMatches, NetworkService, ScanPolicy};

/// Create network routes
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/available-ips", get(available_ips))
        .route("/ip-search", get(ip_search))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AvailableIpsQuery {
    /// Subnet prefix, e.g. `192.168.3`; one trailing dot is tolerated
    pub prefix: Option<String>,
    /// First host number, taken as typed
    pub start: Option<String>,
    /// Last host number, taken as typed
    pub end: Option<String>,
    /// Cap on the number of returned addresses
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableIpsResponse {
    /// Normalized prefix the scan ran against
    pub prefix: String,
    /// Effective (clamped) range start
    pub start: i64,
    /// Effective (clamped) range end
    pub end: i64,
    /// Distinct addresses already assigned across all collections
    pub used_count: usize,
    pub available: Vec<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct IpSearchQuery {
    /// IP fragment to look for; empty matches nothing
    pub q: Option<String>,
}

/// Free addresses within a subnet range
///
/// Bounds arrive as raw strings; a bound that fails to parse falls back to
/// its own default (1 or 254), matching how the scan page has always behaved.
#[utoipa::path(
    get,
    path = "/available-ips",
    context_path = "/api/v1/network",
    tag = "network",
    params(AvailableIpsQuery),
    responses(
        (status = 200, description = "Free addresses in the range", body = AvailableIpsResponse),
    )
)]
pub async fn available_ips(
    State(state): State<SharedState>,
    Query(query): Query<AvailableIpsQuery>,
) -> Result<Json<AvailableIpsResponse>> {
    let prefix_raw = query
        .prefix
        .unwrap_or_else(|| state.config.subnet_prefix.clone());
    let (start, end) = match (&query.start, &query.end) {
        (None, None) => (state.config.ip_range_start, state.config.ip_range_end),
        (start, end) => network_service::coerce_bounds(
            start.as_deref().unwrap_or(""),
            end.as_deref().unwrap_or(""),
        ),
    };
    let limit = query.limit.unwrap_or(state.config.ip_scan_limit);

    let service = NetworkService::new(state.db.clone());
    let used = service.used_addresses(ScanPolicy::BestEffort).await?;
    let available = network_service::enumerate_available(&prefix_raw, start, end, limit, &used);

    let (start, end) = network_service::clamp_range(start, end);

    Ok(Json(AvailableIpsResponse {
        prefix: network_service::normalize_prefix(&prefix_raw),
        start,
        end,
        used_count: used.len(),
        available,
    }))
}

/// Find records by IP fragment
#[utoipa::path(
    get,
    path = "/ip-search",
    context_path = "/api/v1/network",
    tag = "network",
    params(IpSearchQuery),
    responses(
        (status = 200, description = "Per-collection matches", body = IpMatches),
    )
)]
pub async fn ip_search(
    State(state): State<SharedState>,
    Query(query): Query<IpSearchQuery>,
) -> Result<Json<IpMatches>> {
    let service = NetworkService::new(state.db.clone());
    let matches = service.match_by_ip(query.q.as_deref().unwrap_or("")).await?;
    Ok(Json(matches))
}

#[derive(OpenApi)]
#[openapi(
    paths(available_ips, ip_search),
    components(schemas(AvailableIpsResponse, IpMatches))
)]
pub struct NetworkApiDoc;

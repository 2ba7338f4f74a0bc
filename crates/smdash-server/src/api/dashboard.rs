use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smdash_core::{DateRange, Metric, MetricRecord, NetworkConfig, RecordFilter};
use smdash_engine::{
    aggregate, cumulative_series, daily_series, detail_rows, export_delimited, filter_records,
    kpi_overview, monthly_rollup, network_share, top_by, DetailRow, KpiOverview, NetworkSeries,
    NetworkShare, RankedRecord, RollupRow,
};

use crate::middleware::RequestId;

use super::{map_source_error, normalize_top_n, ApiError, ApiResponse, AppState, ResponseMeta};

/// Parse the selected networks out of a comma-separated query value,
/// defaulting to every configured network.
pub(super) fn selected_networks(raw: Option<&String>, configured: &[NetworkConfig]) -> Vec<String> {
    match raw {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        None => configured.iter().map(|n| n.name.clone()).collect(),
    }
}

async fn load_table(state: &AppState, req_id: &str) -> Result<Vec<MetricRecord>, ApiError> {
    state
        .cache
        .get()
        .await
        .map_err(|e| map_source_error(req_id.to_string(), &e))
}

/// Load the table and filter it to the requested period and networks.
async fn load_slice(
    state: &AppState,
    req_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    networks: Option<&String>,
) -> Result<Vec<MetricRecord>, ApiError> {
    let table = load_table(state, req_id).await?;
    let filter = RecordFilter::new(
        DateRange::new(start, end),
        selected_networks(networks, &state.networks),
    );
    Ok(filter_records(&table, &filter))
}

#[derive(Debug, Deserialize)]
pub(super) struct KpisQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub networks: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct KpiData {
    pub period: DateRange,
    pub comparison: DateRange,
    #[serde(flatten)]
    pub overview: KpiOverview,
}

pub(super) async fn get_kpis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<KpisQuery>,
) -> Result<Json<ApiResponse<KpiData>>, ApiError> {
    let table = load_table(&state, &req_id.0).await?;
    let networks = selected_networks(query.networks.as_ref(), &state.networks);

    let period = DateRange::new(query.start, query.end);
    let comparison = period.previous();

    let current_filter = RecordFilter::new(period, networks.clone());
    let previous_filter = RecordFilter::new(comparison, networks);

    let current = aggregate(&filter_records(&table, &current_filter));
    let previous = aggregate(&filter_records(&table, &previous_filter));

    Ok(Json(ApiResponse {
        data: KpiData {
            period,
            comparison,
            overview: kpi_overview(current, previous),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct SeriesQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub networks: Option<String>,
    pub metric: Option<Metric>,
}

#[derive(Debug, Serialize)]
pub(super) struct SeriesData {
    pub metric: Metric,
    pub daily: Vec<NetworkSeries>,
    pub cumulative: Vec<NetworkSeries>,
}

pub(super) async fn get_series(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<ApiResponse<SeriesData>>, ApiError> {
    let slice = load_slice(
        &state,
        &req_id.0,
        query.start,
        query.end,
        query.networks.as_ref(),
    )
    .await?;
    let metric = query.metric.unwrap_or(Metric::Impressions);

    Ok(Json(ApiResponse {
        data: SeriesData {
            metric,
            daily: daily_series(&slice, metric),
            cumulative: cumulative_series(&slice, metric),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct SharesQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub networks: Option<String>,
    pub metric: Option<Metric>,
}

pub(super) async fn get_shares(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SharesQuery>,
) -> Result<Json<ApiResponse<Vec<NetworkShare>>>, ApiError> {
    let slice = load_slice(
        &state,
        &req_id.0,
        query.start,
        query.end,
        query.networks.as_ref(),
    )
    .await?;
    let metric = query.metric.unwrap_or(Metric::Impressions);

    Ok(Json(ApiResponse {
        data: network_share(&slice, metric),
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct TopQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub networks: Option<String>,
    pub metric: Option<Metric>,
    pub n: Option<usize>,
}

pub(super) async fn get_top(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TopQuery>,
) -> Result<Json<ApiResponse<Vec<RankedRecord>>>, ApiError> {
    let slice = load_slice(
        &state,
        &req_id.0,
        query.start,
        query.end,
        query.networks.as_ref(),
    )
    .await?;
    let metric = query.metric.unwrap_or(Metric::Engagements);

    Ok(Json(ApiResponse {
        data: top_by(&slice, metric, normalize_top_n(query.n)),
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct PeriodQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub networks: Option<String>,
}

pub(super) async fn get_rollup(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiResponse<Vec<RollupRow>>>, ApiError> {
    let slice = load_slice(
        &state,
        &req_id.0,
        query.start,
        query.end,
        query.networks.as_ref(),
    )
    .await?;

    Ok(Json(ApiResponse {
        data: monthly_rollup(&slice),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_records(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiResponse<Vec<DetailRow>>>, ApiError> {
    let slice = load_slice(
        &state,
        &req_id.0,
        query.start,
        query.end,
        query.networks.as_ref(),
    )
    .await?;

    Ok(Json(ApiResponse {
        data: detail_rows(&slice),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_export(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let slice = load_slice(
        &state,
        &req_id.0,
        query.start,
        query.end,
        query.networks.as_ref(),
    )
    .await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        export_delimited(&slice),
    ))
}

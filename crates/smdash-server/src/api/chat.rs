use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smdash_core::{DateRange, RecordFilter};
use smdash_engine::{answer, filter_records};

use crate::middleware::RequestId;

use super::dashboard::selected_networks;
use super::{map_source_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// The chat endpoint answers only over what the dashboard currently shows,
/// so the client re-supplies its filter with every question. Conversation
/// history stays on the client; nothing is stored here.
#[derive(Debug, Deserialize)]
pub(super) struct ChatQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub networks: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatReply {
    pub answer: String,
}

pub(super) async fn post_chat(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ChatQuery>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatReply>>, ApiError> {
    let table = state
        .cache
        .get()
        .await
        .map_err(|e| map_source_error(req_id.0.clone(), &e))?;

    let networks = selected_networks(query.networks.as_ref(), &state.networks);
    let filter = RecordFilter::new(DateRange::new(query.start, query.end), networks);
    let slice = filter_records(&table, &filter);

    Ok(Json(ApiResponse {
        data: ChatReply {
            answer: answer(&body.question, &slice, &state.networks),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use server_api::{agenda_options, agenda_view, talk_detail};
use shared::{
    domain::TalkId,
    error::{ApiError, ErrorCode},
    protocol::{AgendaOptions, AgendaView, TalkDetail, ViewQuery},
};
use tracing::debug;

use crate::app_state::AppState;

pub(crate) type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn http_view(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<AgendaView> {
    agenda_view(&state.api, query)
        .map(Json)
        .map_err(error_response)
}

pub(crate) async fn http_options(State(state): State<Arc<AppState>>) -> Json<AgendaOptions> {
    Json(agenda_options(&state.api))
}

pub(crate) async fn http_talk(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
) -> ApiResult<TalkDetail> {
    talk_detail(&state.api, TalkId(id))
        .map(Json)
        .map_err(error_response)
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
    }
}

fn error_response(error: ApiError) -> (StatusCode, Json<ApiError>) {
    debug!(code = ?error.code, message = %error.message, "request rejected");
    (status_for(error.code), Json(error))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;

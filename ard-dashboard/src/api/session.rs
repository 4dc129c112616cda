//! Session workflow API handlers
//!
//! POST /api/upload, POST|DELETE /api/model, POST /api/run,
//! GET /api/session, GET /api/results

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ard_common::events::SessionState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{SessionSnapshot, UploadedFile},
    presentation::{self, RenderedResult, ResultsView},
    services::ModelDescriptor,
    AppState,
};

/// Multipart field carrying the file
pub const UPLOAD_FIELD: &str = "file";

const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// GET /api/session response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    /// Status panel heading
    pub status_message: &'static str,
    /// Progress bar value; absent when the bar is hidden
    pub displayed_progress: Option<f64>,
    /// Run trigger enabled
    pub can_run: bool,
    /// Catalog entry of the selected model, when known
    pub selected_model_detail: Option<ModelDescriptor>,
}

impl SessionResponse {
    fn build(state: &AppState, snapshot: SessionSnapshot) -> Self {
        let selected_model_detail = snapshot
            .selected_model
            .as_deref()
            .and_then(|id| state.controller.catalog().find(id))
            .cloned();

        Self {
            status_message: presentation::status_message(snapshot.state),
            displayed_progress: presentation::displayed_progress(snapshot.state, snapshot.progress),
            can_run: snapshot.can_run(),
            selected_model_detail,
            snapshot,
        }
    }
}

/// POST /api/model request
#[derive(Debug, Deserialize)]
pub struct SelectModelRequest {
    pub model_id: String,
}

/// POST /api/run response
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub run_id: Uuid,
    pub state: SessionState,
}

/// GET /api/results response
#[derive(Debug, Serialize)]
pub struct ResultsResponse<'a> {
    pub state: SessionState,
    pub run_id: Option<Uuid>,
    /// Chart-bearing results
    pub visual: Vec<RenderedResult<'a>>,
    /// Every result
    pub detailed: Vec<RenderedResult<'a>>,
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let snapshot = state.controller.snapshot();
    Json(SessionResponse::build(&state, snapshot))
}

/// POST /api/upload
///
/// Reads the `file` part without buffering it: name and declared type come
/// from the part headers, size is the streamed byte count. Reading stops as
/// soon as the count passes the intake limit.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let limit = state.controller.intake().max_file_size_bytes();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ApiError::BadRequest("File part has no file name".to_string()))?;
        let media_type = field
            .content_type()
            .unwrap_or(DEFAULT_MEDIA_TYPE)
            .to_string();

        let mut size_bytes: u64 = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Upload interrupted: {}", e)))?
        {
            size_bytes += chunk.len() as u64;
            if size_bytes > limit {
                break;
            }
        }

        tracing::debug!(file = %name, size_bytes, media_type = %media_type, "Upload received");

        state
            .controller
            .submit_file(UploadedFile::new(name, size_bytes, media_type))
            .await?;

        let response = SessionResponse::build(&state, state.controller.snapshot());
        return Ok((StatusCode::ACCEPTED, Json(response)).into_response());
    }

    Err(ApiError::BadRequest(format!(
        "Multipart body has no '{}' field",
        UPLOAD_FIELD
    )))
}

/// POST /api/model
pub async fn select_model(
    State(state): State<AppState>,
    Json(request): Json<SelectModelRequest>,
) -> ApiResult<Json<SessionResponse>> {
    state.controller.select_model(&request.model_id).await?;
    Ok(Json(SessionResponse::build(&state, state.controller.snapshot())))
}

/// DELETE /api/model
pub async fn clear_model(State(state): State<AppState>) -> ApiResult<Json<SessionResponse>> {
    state.controller.clear_model().await?;
    Ok(Json(SessionResponse::build(&state, state.controller.snapshot())))
}

/// POST /api/run
///
/// Returns 202 Accepted; the outcome arrives over SSE and `/api/session`.
pub async fn run_analysis(State(state): State<AppState>) -> ApiResult<Response> {
    let run_id = state.controller.run_analysis().await?;

    tracing::info!(run_id = %run_id, "Analysis run accepted");

    let response = RunResponse {
        run_id,
        state: state.controller.snapshot().state,
    };
    Ok((StatusCode::ACCEPTED, Json(response)).into_response())
}

/// GET /api/results
pub async fn get_results(State(state): State<AppState>) -> Response {
    let snapshot = state.controller.snapshot();
    let view = ResultsView::new(&snapshot.results);

    let response = ResultsResponse {
        state: snapshot.state,
        run_id: snapshot.run_id,
        visual: view.visual(),
        detailed: view.detailed(),
    };
    Json(&response).into_response()
}

/// Build session workflow routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(get_session))
        .route(
            "/api/upload",
            // Size is enforced by intake, not by the body limit
            post(upload_file).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/model", post(select_model).delete(clear_model))
        .route("/api/run", post(run_analysis))
        .route("/api/results", get(get_results))
}

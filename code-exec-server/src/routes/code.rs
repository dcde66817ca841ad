use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use code_exec::ExecutionRequest;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::snippet_id;
use crate::{
    error::ServerError,
    models::{
        AuthUser, CreateSnippetRequest, ListQuery, LoadedSnippet, RunRequest, RunResponse,
        Snippet, SnippetSummary, StatsResponse, UpdateSnippetRequest,
    },
    AppState,
};

pub async fn run(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<RunRequest>,
) -> Result<Json<RunResponse>, ServerError> {
    // Shutdown cancels in-flight polling
    let cancel = state.shutdown.child_token();
    let request = ExecutionRequest::new(payload.code, payload.language);
    let result = state.execution.execute_with_cancel(request, &cancel).await?;

    if let Some(id) = payload.snippet_id {
        match state.snippets.record_run(user.id, id).await {
            Some(count) => debug!("Snippet {} has run {} times", id, count),
            None => debug!("Run referenced unknown snippet {}", id),
        }
    }

    Ok(Json(RunResponse::from(&result)))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateSnippetRequest>,
) -> Result<(StatusCode, Json<Snippet>), ServerError> {
    if payload.title.trim().is_empty() || payload.code.is_empty() || payload.language.is_empty() {
        return Err(ServerError::BadRequest(
            "Please provide all required fields".to_string(),
        ));
    }

    let snippet = state.snippets.create(user.id, payload).await;
    info!("User {} saved snippet {}", user.id, snippet.id);
    Ok((StatusCode::CREATED, Json(snippet)))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Snippet>> {
    Json(state.snippets.list(user.id, query.search.as_deref()).await)
}

pub async fn stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Json<StatsResponse> {
    let total_codes = state.snippets.count(user.id).await;
    let recent_codes = state
        .snippets
        .recent(user.id)
        .await
        .iter()
        .map(SnippetSummary::from)
        .collect();

    Json(StatsResponse {
        total_codes,
        recent_codes,
    })
}

pub async fn get_one(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Snippet>, ServerError> {
    let id = snippet_id(&id)?;
    state
        .snippets
        .get(user.id, id)
        .await
        .map(Json)
        .ok_or_else(ServerError::code_not_found)
}

pub async fn load(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<LoadedSnippet>, ServerError> {
    let id = snippet_id(&id)?;
    state
        .snippets
        .get(user.id, id)
        .await
        .map(|s| Json(LoadedSnippet::from(s)))
        .ok_or_else(ServerError::code_not_found)
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSnippetRequest>,
) -> Result<Json<Snippet>, ServerError> {
    let id = snippet_id(&id)?;
    state
        .snippets
        .update(user.id, id, payload)
        .await
        .map(Json)
        .ok_or_else(ServerError::code_not_found)
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let id = snippet_id(&id)?;
    if !state.snippets.delete(user.id, id).await {
        return Err(ServerError::code_not_found());
    }
    info!("User {} deleted snippet {}", user.id, id);
    Ok(Json(json!({ "message": "Code deleted successfully" })))
}

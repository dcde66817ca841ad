use axum::{extract::State, Json};

use crate::{
    error::ServerError,
    models::{
        AnswerQuestionRequest, AnswerResponse, ExplainErrorRequest, ExplanationResponse,
        ImproveCodeRequest, SuggestionResponse,
    },
    AppState,
};

pub async fn explain_error(
    State(state): State<AppState>,
    Json(payload): Json<ExplainErrorRequest>,
) -> Result<Json<ExplanationResponse>, ServerError> {
    let explanation = state
        .assistant
        .explain_error(&payload.error_message, &payload.code)
        .await?;
    Ok(Json(ExplanationResponse { explanation }))
}

pub async fn answer_question(
    State(state): State<AppState>,
    Json(payload): Json<AnswerQuestionRequest>,
) -> Result<Json<AnswerResponse>, ServerError> {
    let answer = state
        .assistant
        .answer_question(&payload.question, payload.code.as_deref())
        .await?;
    Ok(Json(AnswerResponse { answer }))
}

pub async fn improve_code(
    State(state): State<AppState>,
    Json(payload): Json<ImproveCodeRequest>,
) -> Result<Json<SuggestionResponse>, ServerError> {
    let suggestion = state
        .assistant
        .improve_code(&payload.code, &payload.language)
        .await?;
    Ok(Json(SuggestionResponse { suggestion }))
}

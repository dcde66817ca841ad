use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::{auth::require_auth, error::ServerError, AppState};

pub mod ai;
pub mod auth;
pub mod code;

/// Everything served under `/api`
pub fn api_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/code", get(code::list).post(code::create))
        .route("/code/stats", get(code::stats))
        .route("/code/run", post(code::run))
        .route("/code/load/:id", get(code::load))
        .route(
            "/code/:id",
            get(code::get_one).put(code::update).delete(code::delete),
        )
        .route("/ai/explain-error", post(ai::explain_error))
        .route("/ai/answer-question", post(ai::answer_question))
        .route("/ai/improve-code", post(ai::improve_code))
        .route_layer(from_fn_with_state(state, require_auth));

    public.merge(protected)
}

/// Ids that do not parse can never name a snippet
pub(crate) fn snippet_id(raw: &str) -> Result<Uuid, ServerError> {
    raw.parse().map_err(|_| ServerError::code_not_found())
}

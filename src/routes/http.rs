//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{rejection::{JsonRejection, QueryRejection}, State, Query},
  Json, response::IntoResponse,
};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info")]
pub async fn http_languages() -> impl IntoResponse { Json(LanguagesOut::default()) }

#[instrument(level = "info", skip_all)]
pub async fn http_get_problem(
  State(state): State<Arc<AppState>>,
  query: Result<Query<ProblemQuery>, QueryRejection>,
) -> Result<Json<ProblemOut>, AppError> {
  let Query(q) = query?;
  let problem = lookup_problem(&state, q.id).await?;
  info!(target: "catalog", id = q.id, title = %problem.title, "HTTP problem served");
  Ok(Json(problem))
}

#[instrument(level = "info", skip_all)]
pub async fn http_post_advice(
  State(state): State<Arc<AppState>>,
  body: Result<Json<AdviceIn>, JsonRejection>,
) -> Result<Json<AdviceOut>, AppError> {
  let Json(body) = body?;
  let advice = request_advice(&state, body.id, body.mode, body.language.as_deref()).await?;
  info!(target: "advice", id = body.id, mode = ?body.mode, fallback = advice.fallback, "HTTP advice served");
  Ok(Json(advice))
}

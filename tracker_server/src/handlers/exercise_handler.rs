//! Exercise and log handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracker_core::{ExerciseInput, ExerciseLog, LogQuery, LoggedExercise};

use super::with_tracker;
use crate::error::ApiResult;
use crate::extractors::JsonOrForm;
use crate::state::AppState;

/// Duration as sent by clients: a JSON number or any string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Whole(i64),
    Fractional(f64),
    Text(String),
}

impl DurationField {
    fn into_raw(self) -> String {
        match self {
            DurationField::Whole(n) => n.to_string(),
            DurationField::Fractional(n) => n.to_string(),
            DurationField::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    pub description: Option<String>,
    pub duration: Option<DurationField>,
    pub date: Option<String>,
}

impl From<AddExerciseRequest> for ExerciseInput {
    fn from(request: AddExerciseRequest) -> Self {
        ExerciseInput {
            description: request.description,
            duration: request.duration.map(DurationField::into_raw),
            date: request.date,
        }
    }
}

/// Raw `from`, `to` and `limit` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct LogParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/exercises", post(add_exercise))
        .route("/:id/logs", get(get_log))
}

/// Log an exercise for a user
pub async fn add_exercise(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    JsonOrForm(request): JsonOrForm<AddExerciseRequest>,
) -> ApiResult<Json<LoggedExercise>> {
    let input = ExerciseInput::from(request);
    let logged =
        with_tracker(&state, move |tracker| tracker.add_exercise(&user_id, &input)).await?;
    Ok(Json(logged))
}

/// A user's exercise log, optionally filtered by `from`/`to` and capped by `limit`
pub async fn get_log(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<LogParams>,
) -> ApiResult<Json<ExerciseLog>> {
    let query = LogQuery::parse(
        params.from.as_deref(),
        params.to.as_deref(),
        params.limit.as_deref(),
    )?;
    let log = with_tracker(&state, move |tracker| tracker.query_log(&user_id, &query)).await?;
    Ok(Json(log))
}

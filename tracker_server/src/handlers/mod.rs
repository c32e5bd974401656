//! Request handlers.

mod exercise_handler;
mod user_handler;

pub use exercise_handler::{exercise_routes, AddExerciseRequest, DurationField, LogParams};
pub use user_handler::{user_routes, CreateUserRequest};

use tracker_core::Tracker;

use crate::error::ApiResult;
use crate::state::AppState;

/// Run a tracker call on the blocking pool; the record store does file I/O.
async fn with_tracker<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&Tracker) -> tracker_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let tracker = state.tracker.clone();
    let result = tokio::task::spawn_blocking(move || f(&tracker)).await?;
    Ok(result?)
}

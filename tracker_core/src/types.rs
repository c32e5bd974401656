//! Core domain types for the exercise tracker.
//!
//! This module defines:
//! - Stored records (users and exercises)
//! - Raw exercise input as received from callers
//! - Response shapes built from stored records

use crate::CalendarDay;
use serde::{Deserialize, Serialize};

// ============================================================================
// Stored records
// ============================================================================

/// A registered user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// A logged exercise, owned by a user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub description: String,
    /// Minutes
    pub duration: u32,
    pub date: CalendarDay,
}

// ============================================================================
// Input
// ============================================================================

/// Unvalidated exercise fields as supplied by a caller.
///
/// Every field is optional here so that missing input surfaces as a
/// validation error from the repository rather than a parse failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExerciseInput {
    pub description: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// An exercise just added, enriched with the owner's username
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggedExercise {
    pub id: String,
    pub username: String,
    pub description: String,
    pub duration: u32,
    pub date: CalendarDay,
}

impl LoggedExercise {
    pub fn new(user: &User, exercise: &Exercise) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: exercise.date,
        }
    }
}

/// One line of an exercise log; the owner is implied by the enclosing log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub description: String,
    pub duration: u32,
    pub date: CalendarDay,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: exercise.date,
        }
    }
}

/// A user's filtered exercise log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseLog {
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

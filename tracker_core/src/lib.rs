#![forbid(unsafe_code)]

//! Core domain model and data access for the exercise tracker.
//!
//! This crate provides:
//! - Domain types (users, exercises, logs) and calendar days
//! - The record store and its storage backends
//! - User and exercise repositories
//! - The log query engine
//! - CSV export of exercise logs

pub mod types;
pub mod date;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod users;
pub mod exercises;
pub mod log_query;
pub mod tracker;
pub mod export;

// Re-export commonly used types
pub use error::{Error, ErrorKind, Result};
pub use types::*;
pub use date::CalendarDay;
pub use config::Config;
pub use store::{Collection, JsonFileBackend, MemoryBackend, RecordStore, StorageBackend};
pub use users::UserRepository;
pub use exercises::ExerciseRepository;
pub use log_query::{query_log, LogQuery};
pub use tracker::Tracker;

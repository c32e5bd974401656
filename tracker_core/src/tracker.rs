//! Single entry point over the store, repositories and log queries.

use crate::exercises::ExerciseRepository;
use crate::log_query::{self, LogQuery};
use crate::store::{RecordStore, StorageBackend};
use crate::users::UserRepository;
use crate::{ExerciseInput, ExerciseLog, LoggedExercise, Result, User};
use std::path::PathBuf;
use std::sync::Arc;

/// Cloneable handle shared by every caller of one store
#[derive(Clone)]
pub struct Tracker {
    users: UserRepository,
    exercises: ExerciseRepository,
}

impl Tracker {
    pub fn new(store: RecordStore) -> Self {
        let store = Arc::new(store);
        let users = UserRepository::new(Arc::clone(&store));
        let exercises = ExerciseRepository::new(store, users.clone());
        Self { users, exercises }
    }

    pub fn with_backend(backend: impl StorageBackend + 'static) -> Self {
        Self::new(RecordStore::new(backend))
    }

    /// Tracker persisting to JSON files under `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        tracing::info!("Using data directory {:?}", data_dir);
        Self::new(RecordStore::open(data_dir))
    }

    pub fn in_memory() -> Self {
        Self::new(RecordStore::in_memory())
    }

    pub fn create_user(&self, username: &str) -> Result<User> {
        self.users.create_user(username)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        self.users.list_users()
    }

    pub fn add_exercise(&self, user_id: &str, input: &ExerciseInput) -> Result<LoggedExercise> {
        self.exercises.add_exercise(user_id, input)
    }

    pub fn query_log(&self, user_id: &str, query: &LogQuery) -> Result<ExerciseLog> {
        log_query::query_log(&self.users, &self.exercises, user_id, query)
    }
}

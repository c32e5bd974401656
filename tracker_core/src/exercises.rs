//! Exercise repository.

use crate::store::{Collection, RecordStore};
use crate::users::UserRepository;
use crate::{CalendarDay, Error, Exercise, ExerciseInput, LoggedExercise, Result};
use std::sync::Arc;

/// Append exercises for existing users
#[derive(Clone)]
pub struct ExerciseRepository {
    store: Arc<RecordStore>,
    users: UserRepository,
}

/// Exercise fields after validation
struct ValidExercise {
    description: String,
    duration: u32,
    date: Option<CalendarDay>,
}

impl ValidExercise {
    fn parse(input: &ExerciseInput) -> Result<Self> {
        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        let duration = input.duration.as_deref().map(str::trim).unwrap_or_default();

        if description.is_empty() || duration.is_empty() {
            return Err(Error::validation("Description and duration are required"));
        }

        let duration = match duration.parse::<u32>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => {
                return Err(Error::validation(format!(
                    "Duration must be a positive whole number of minutes, got {:?}",
                    duration
                )))
            }
        };

        let date = match input.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(CalendarDay::parse(raw)?),
        };

        Ok(Self {
            description: description.to_string(),
            duration,
            date,
        })
    }
}

impl ExerciseRepository {
    pub fn new(store: Arc<RecordStore>, users: UserRepository) -> Self {
        Self { store, users }
    }

    /// Log an exercise for `user_id`
    ///
    /// Input is validated before the user is looked up. A missing date means
    /// today.
    pub fn add_exercise(&self, user_id: &str, input: &ExerciseInput) -> Result<LoggedExercise> {
        let valid = ValidExercise::parse(input)?;
        let user = self.users.require_user(user_id)?;

        let exercise = Exercise {
            user_id: user.id.clone(),
            description: valid.description,
            duration: valid.duration,
            date: valid.date.unwrap_or_else(CalendarDay::today),
        };

        self.store
            .update(Collection::Exercises, |exercises: &mut Vec<Exercise>| {
                exercises.push(exercise.clone());
                Ok(())
            })?;

        tracing::info!(
            "Logged {:?} ({} min, {}) for user {}",
            exercise.description,
            exercise.duration,
            exercise.date,
            user.id
        );
        Ok(LoggedExercise::new(&user, &exercise))
    }

    /// A user's exercises in insertion order
    pub fn exercises_for(&self, user_id: &str) -> Result<Vec<Exercise>> {
        let exercises: Vec<Exercise> = self.store.load(Collection::Exercises)?;
        Ok(exercises
            .into_iter()
            .filter(|exercise| exercise.user_id == user_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn setup() -> (UserRepository, ExerciseRepository) {
        let store = Arc::new(RecordStore::in_memory());
        let users = UserRepository::new(Arc::clone(&store));
        let exercises = ExerciseRepository::new(store, users.clone());
        (users, exercises)
    }

    fn input(description: &str, duration: &str, date: Option<&str>) -> ExerciseInput {
        ExerciseInput {
            description: Some(description.into()),
            duration: Some(duration.into()),
            date: date.map(Into::into),
        }
    }

    #[test]
    fn test_add_exercise_enriches_with_username() {
        let (users, exercises) = setup();
        let alice = users.create_user("alice").unwrap();

        let logged = exercises
            .add_exercise(&alice.id, &input("run", "30", Some("2024-01-01")))
            .unwrap();

        assert_eq!(logged.id, alice.id);
        assert_eq!(logged.username, "alice");
        assert_eq!(logged.description, "run");
        assert_eq!(logged.duration, 30);
        assert_eq!(logged.date.to_string(), "Mon Jan 01 2024");
    }

    #[test]
    fn test_missing_date_defaults_to_today() {
        let (users, exercises) = setup();
        let alice = users.create_user("alice").unwrap();

        let logged = exercises.add_exercise(&alice.id, &input("run", "30", None)).unwrap();
        assert_eq!(logged.date, CalendarDay::today());

        let blank = exercises.add_exercise(&alice.id, &input("swim", "10", Some(" "))).unwrap();
        assert_eq!(blank.date, CalendarDay::today());
    }

    #[test]
    fn test_unknown_user_is_not_found_and_writes_nothing() {
        let (users, exercises) = setup();
        let alice = users.create_user("alice").unwrap();

        let err = exercises
            .add_exercise("no-such-user", &input("run", "30", None))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        assert!(exercises.exercises_for("no-such-user").unwrap().is_empty());
        assert!(exercises.exercises_for(&alice.id).unwrap().is_empty());
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let (users, exercises) = setup();
        let alice = users.create_user("alice").unwrap();

        let cases = [
            ExerciseInput::default(),
            ExerciseInput {
                description: Some("run".into()),
                ..Default::default()
            },
            ExerciseInput {
                duration: Some("30".into()),
                ..Default::default()
            },
            input("   ", "30", None),
        ];

        for case in &cases {
            let err = exercises.add_exercise(&alice.id, case).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "input {:?}", case);
        }
        assert!(exercises.exercises_for(&alice.id).unwrap().is_empty());
    }

    #[test]
    fn test_bad_duration_is_rejected() {
        let (users, exercises) = setup();
        let alice = users.create_user("alice").unwrap();

        for bad in ["abc", "0", "-5", "12.5", "30min"] {
            let err = exercises
                .add_exercise(&alice.id, &input("run", bad, None))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "duration {:?}", bad);
        }
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let (users, exercises) = setup();
        let alice = users.create_user("alice").unwrap();

        let err = exercises
            .add_exercise(&alice.id, &input("run", "30", Some("yesterday-ish")))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_validation_precedes_user_lookup() {
        let (_users, exercises) = setup();

        let err = exercises
            .add_exercise("no-such-user", &ExerciseInput::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_exercises_for_keeps_insertion_order_per_user() {
        let (users, exercises) = setup();
        let alice = users.create_user("alice").unwrap();
        let bob = users.create_user("bob").unwrap();

        exercises.add_exercise(&alice.id, &input("b", "1", Some("2024-05-01"))).unwrap();
        exercises.add_exercise(&bob.id, &input("x", "1", None)).unwrap();
        exercises.add_exercise(&alice.id, &input("a", "2", Some("2024-01-01"))).unwrap();

        let alice_log: Vec<_> = exercises
            .exercises_for(&alice.id)
            .unwrap()
            .into_iter()
            .map(|e| e.description)
            .collect();
        assert_eq!(alice_log, vec!["b", "a"]);
        assert_eq!(exercises.exercises_for(&bob.id).unwrap().len(), 1);
    }
}

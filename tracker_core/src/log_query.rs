//! Exercise log queries.
//!
//! A log is a user's exercises in insertion order, optionally narrowed to an
//! inclusive day range and capped to the first `limit` entries.

use crate::exercises::ExerciseRepository;
use crate::users::UserRepository;
use crate::{CalendarDay, Error, Exercise, ExerciseLog, LogEntry, Result};
use std::num::IntErrorKind;

/// Parsed log filters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub from: Option<CalendarDay>,
    pub to: Option<CalendarDay>,
    pub limit: Option<usize>,
}

impl LogQuery {
    /// Parse raw query parameters. Empty strings count as absent.
    pub fn parse(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> Result<Self> {
        let from = non_empty(from).map(CalendarDay::parse).transpose()?;
        let to = non_empty(to).map(CalendarDay::parse).transpose()?;
        let limit = non_empty(limit).map(parse_limit).transpose()?;

        Ok(Self { from, to, limit })
    }

    /// Whether an exercise falls inside the day range
    pub fn includes(&self, exercise: &Exercise) -> bool {
        self.from.map_or(true, |from| exercise.date >= from)
            && self.to.map_or(true, |to| exercise.date <= to)
    }

    /// Narrow a user's exercises, keeping their order
    pub fn apply(&self, exercises: Vec<Exercise>) -> Vec<LogEntry> {
        let limit = self.limit.unwrap_or(usize::MAX);
        exercises
            .into_iter()
            .filter(|exercise| self.includes(exercise))
            .take(limit)
            .map(LogEntry::from)
            .collect()
    }
}

/// Counts too large for `usize` still cap nothing, so they saturate
fn parse_limit(raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(limit) => Ok(limit),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(usize::MAX),
        Err(_) => Err(Error::validation(format!(
            "Limit must be a non-negative whole number, got {:?}",
            raw
        ))),
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Build the filtered log for `user_id`
pub fn query_log(
    users: &UserRepository,
    exercises: &ExerciseRepository,
    user_id: &str,
    query: &LogQuery,
) -> Result<ExerciseLog> {
    let user = users.require_user(user_id)?;
    let log = query.apply(exercises.exercises_for(&user.id)?);

    tracing::debug!("Log for user {} has {} entries", user.id, log.len());
    Ok(ExerciseLog {
        id: user.id,
        username: user.username,
        count: log.len(),
        log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;
    use crate::{ErrorKind, ExerciseInput};
    use std::sync::Arc;

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        CalendarDay::from_ymd(y, m, d).unwrap()
    }

    fn exercise(description: &str, date: CalendarDay) -> Exercise {
        Exercise {
            user_id: "u1".into(),
            description: description.into(),
            duration: 10,
            date,
        }
    }

    fn descriptions(entries: &[LogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.description.as_str()).collect()
    }

    fn sample() -> Vec<Exercise> {
        vec![
            exercise("a", day(2024, 3, 1)),
            exercise("b", day(2024, 1, 1)),
            exercise("c", day(2024, 2, 1)),
            exercise("d", day(2024, 1, 15)),
        ]
    }

    #[test]
    fn test_no_filters_keeps_insertion_order() {
        let entries = LogQuery::default().apply(sample());
        assert_eq!(descriptions(&entries), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_from_is_inclusive() {
        let query = LogQuery {
            from: Some(day(2024, 1, 15)),
            ..Default::default()
        };
        assert_eq!(descriptions(&query.apply(sample())), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_to_is_inclusive() {
        let query = LogQuery {
            to: Some(day(2024, 2, 1)),
            ..Default::default()
        };
        assert_eq!(descriptions(&query.apply(sample())), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_range_and_limit_take_from_front() {
        let query = LogQuery {
            from: Some(day(2024, 1, 10)),
            to: Some(day(2024, 12, 31)),
            limit: Some(2),
        };
        assert_eq!(descriptions(&query.apply(sample())), vec!["a", "c"]);
    }

    #[test]
    fn test_zero_limit_is_empty() {
        let query = LogQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert!(query.apply(sample()).is_empty());
    }

    #[test]
    fn test_limit_larger_than_log() {
        let query = LogQuery {
            limit: Some(50),
            ..Default::default()
        };
        assert_eq!(query.apply(sample()).len(), 4);
    }

    #[test]
    fn test_parse_params() {
        let query = LogQuery::parse(Some("2024-01-15"), Some(""), Some("3")).unwrap();
        assert_eq!(query.from, Some(day(2024, 1, 15)));
        assert_eq!(query.to, None);
        assert_eq!(query.limit, Some(3));

        assert_eq!(LogQuery::parse(None, None, None).unwrap(), LogQuery::default());

        // Larger than any log can be; keeps everything
        let huge = LogQuery::parse(None, None, Some("99999999999999999999")).unwrap();
        assert_eq!(huge.limit, Some(usize::MAX));
        assert_eq!(huge.apply(sample()).len(), 4);
    }

    #[test]
    fn test_parse_rejects_bad_params() {
        for (from, to, limit) in [
            (Some("soon"), None, None),
            (None, Some("2024-13-01"), None),
            (None, None, Some("-1")),
            (None, None, Some("ten")),
            (None, None, Some("-99999999999999999999")),
        ] {
            let err = LogQuery::parse(from, to, limit).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn test_query_log_for_user() {
        let store = Arc::new(RecordStore::in_memory());
        let users = UserRepository::new(Arc::clone(&store));
        let exercises = ExerciseRepository::new(store, users.clone());
        let alice = users.create_user("alice").unwrap();
        let bob = users.create_user("bob").unwrap();

        for (who, date) in [(&alice, "2024-01-01"), (&bob, "2024-01-05"), (&alice, "2024-02-01")] {
            exercises
                .add_exercise(
                    &who.id,
                    &ExerciseInput {
                        description: Some(format!("walk {}", date)),
                        duration: Some("20".into()),
                        date: Some(date.into()),
                    },
                )
                .unwrap();
        }

        let query = LogQuery::parse(Some("2024-01-15"), None, None).unwrap();
        let log = query_log(&users, &exercises, &alice.id, &query).unwrap();

        assert_eq!(log.id, alice.id);
        assert_eq!(log.username, "alice");
        assert_eq!(log.count, 1);
        assert_eq!(log.log[0].date, day(2024, 2, 1));
    }

    #[test]
    fn test_query_log_unknown_user() {
        let store = Arc::new(RecordStore::in_memory());
        let users = UserRepository::new(Arc::clone(&store));
        let exercises = ExerciseRepository::new(store, users.clone());

        let err = query_log(&users, &exercises, "ghost", &LogQuery::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

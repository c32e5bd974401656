//! CSV export of exercise logs.

use crate::{ExerciseLog, LogEntry, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    description: &'a str,
    duration: u32,
    date: String,
}

impl<'a> From<&'a LogEntry> for CsvRow<'a> {
    fn from(entry: &'a LogEntry) -> Self {
        CsvRow {
            description: &entry.description,
            duration: entry.duration,
            date: entry.date.to_string(),
        }
    }
}

/// Write a log as CSV with a header row, returning the number of rows
///
/// The header is written even when the log is empty.
pub fn write_log_csv<W: Write>(log: &ExerciseLog, writer: W) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(["description", "duration", "date"])?;
    for entry in &log.log {
        writer.serialize(CsvRow::from(entry))?;
    }
    writer.flush()?;

    Ok(log.log.len())
}

/// Export a log to a CSV file, replacing any existing file
pub fn export_log_to_path(log: &ExerciseLog, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let count = write_log_csv(log, &file)?;
    file.sync_all()?;

    tracing::info!("Exported {} entries for user {} to {:?}", count, log.id, path);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CalendarDay;

    fn sample_log() -> ExerciseLog {
        let log = vec![
            LogEntry {
                description: "run, easy".into(),
                duration: 30,
                date: CalendarDay::from_ymd(2024, 1, 1).unwrap(),
            },
            LogEntry {
                description: "swim".into(),
                duration: 45,
                date: CalendarDay::from_ymd(2024, 2, 1).unwrap(),
            },
        ];
        ExerciseLog {
            id: "u1".into(),
            username: "alice".into(),
            count: log.len(),
            log,
        }
    }

    #[test]
    fn test_write_log_csv() {
        let mut out = Vec::new();
        let count = write_log_csv(&sample_log(), &mut out).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "description,duration,date");
        assert_eq!(lines[1], "\"run, easy\",30,Mon Jan 01 2024");
        assert_eq!(lines[2], "swim,45,Thu Feb 01 2024");
    }

    #[test]
    fn test_empty_log_has_header_only() {
        let log = ExerciseLog {
            id: "u1".into(),
            username: "alice".into(),
            count: 0,
            log: vec![],
        };
        let mut out = Vec::new();
        assert_eq!(write_log_csv(&log, &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "description,duration,date\n");
    }

    #[test]
    fn test_export_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("exports").join("alice.csv");

        export_log_to_path(&sample_log(), &path).unwrap();

        let reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.into_records().count(), 2);
    }
}

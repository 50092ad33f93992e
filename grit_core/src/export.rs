//! CSV export of the workout history.
//!
//! Flattens the nested history into one row per logged set so the
//! output loads cleanly into a spreadsheet.

use std::path::Path;

use crate::error::Result;
use crate::types::WorkoutLog;

/// A row in the CSV output: one set of one exercise.
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    workout_id: String,
    date: String,
    workout: &'a str,
    location: &'a str,
    exercise: &'a str,
    set: usize,
    reps: &'a str,
    weight: &'a str,
    completed: bool,
}

/// Write the full workout history to `csv_path`, newest workout first,
/// exercises in session order. Returns the number of rows written.
pub fn export_history(history: &[WorkoutLog], csv_path: &Path) -> Result<usize> {
    if let Some(parent) = csv_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(csv_path)?;
    let mut rows = 0;

    for workout in history {
        let location = workout.location.as_deref().unwrap_or("");
        for exercise in &workout.exercises {
            let Some(sets) = workout.detailed_log.get(exercise) else {
                continue;
            };
            for (i, set) in sets.iter().enumerate() {
                writer.serialize(CsvRow {
                    workout_id: workout.id.to_string(),
                    date: workout.date.to_string(),
                    workout: &workout.name,
                    location,
                    exercise,
                    set: i + 1,
                    reps: &set.reps,
                    weight: &set.weight,
                    completed: set.completed,
                })?;
                rows += 1;
            }
        }
    }

    writer.flush()?;
    tracing::info!(rows, path = %csv_path.display(), "exported workout history");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::types::SetEntry;

    fn sample_log() -> WorkoutLog {
        let mut detailed_log = BTreeMap::new();
        detailed_log.insert(
            "Deadlifts".to_string(),
            vec![
                SetEntry::new("5", "225", true),
                SetEntry::new("5", "245", false),
            ],
        );
        detailed_log.insert(
            "Pull-ups".to_string(),
            vec![SetEntry::new("10", "0", true)],
        );
        WorkoutLog {
            id: Uuid::new_v4(),
            name: "Pull Strength (Back Width)".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 2).unwrap(),
            location: Some("Home Gym".to_string()),
            exercises: vec!["Deadlifts".to_string(), "Pull-ups".to_string()],
            detailed_log,
            total_volume: 1125.0,
        }
    }

    #[test]
    fn one_row_per_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        let rows = export_history(&[sample_log()], &path).unwrap();
        assert_eq!(rows, 3);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("workout_id,date,workout,location,exercise,set"));
        assert_eq!(lines.count(), 3);
        assert!(contents.contains("Deadlifts,2,5,245,false"));
    }

    #[test]
    fn empty_history_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let rows = export_history(&[], &path).unwrap();
        assert_eq!(rows, 0);
        assert!(path.exists());
    }
}

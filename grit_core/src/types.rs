//! Core domain types shared across the engine, store, and CLI.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Format a date as the canonical `YYYY-MM-DD` day key used throughout
/// persisted state. Local calendar date, no timezone conversion.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// One logged set of an exercise.
///
/// Reps and weight are kept exactly as the user entered them. Display
/// always shows the raw strings; arithmetic goes through the lenient
/// accessors, which treat unparsable or empty input as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub completed: bool,
}

impl SetEntry {
    pub fn new(reps: impl Into<String>, weight: impl Into<String>, completed: bool) -> Self {
        Self {
            reps: reps.into(),
            weight: weight.into(),
            completed,
        }
    }

    /// Parsed rep count; zero when the field is empty or unparsable.
    pub fn reps_count(&self) -> i64 {
        self.reps.trim().parse().unwrap_or(0)
    }

    /// Parsed weight in pounds; zero when the field is empty or unparsable.
    pub fn weight_lbs(&self) -> f64 {
        self.weight.trim().parse().unwrap_or(0.0)
    }
}

/// A finalized workout session. Created once when the user finishes a
/// workout and only ever removed wholesale, never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub location: Option<String>,
    /// Exercise names in the order they appeared in the session.
    pub exercises: Vec<String>,
    /// Exercise name -> the sets performed for it.
    pub detailed_log: BTreeMap<String, Vec<SetEntry>>,
    pub total_volume: f64,
}

/// One item of a workout routine.
///
/// Serialized with an explicit `type` tag so custom templates written
/// by older versions keep round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoutineItem {
    Single { exercise: String },
    Superset { exercises: Vec<String> },
    Cardio { exercise: String },
    Hiit { exercise: String },
}

impl RoutineItem {
    pub fn single(exercise: &str) -> Self {
        RoutineItem::Single {
            exercise: exercise.to_string(),
        }
    }

    pub fn superset(exercises: &[&str]) -> Self {
        RoutineItem::Superset {
            exercises: exercises.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn cardio(exercise: &str) -> Self {
        RoutineItem::Cardio {
            exercise: exercise.to_string(),
        }
    }

    pub fn hiit(exercise: &str) -> Self {
        RoutineItem::Hiit {
            exercise: exercise.to_string(),
        }
    }

    /// Names of every exercise this item covers, in listed order.
    pub fn exercise_names(&self) -> Vec<&str> {
        match self {
            RoutineItem::Single { exercise }
            | RoutineItem::Cardio { exercise }
            | RoutineItem::Hiit { exercise } => vec![exercise.as_str()],
            RoutineItem::Superset { exercises } => {
                exercises.iter().map(|e| e.as_str()).collect()
            }
        }
    }
}

/// Progress toward a numeric daily goal (steps, water).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub goal: f64,
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub done: bool,
}

impl TaskProgress {
    pub fn with_goal(goal: f64) -> Self {
        Self {
            goal,
            current: 0.0,
            done: false,
        }
    }
}

/// Everything tracked for one calendar day of the daily checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTaskRecord {
    pub steps: TaskProgress,
    pub water: TaskProgress,
    /// IDs of medications taken this day.
    #[serde(default)]
    pub meds_taken: BTreeSet<String>,
    #[serde(default)]
    pub workout_done: bool,
}

/// A medication with a weekly schedule. `days[0]` is Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub days: [bool; 7],
}

/// Per-day progress within a challenge window. The day's score is never
/// stored; it is derived from the flags against the challenge's task
/// definitions, so flags and score cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayProgress {
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
}

impl DayProgress {
    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.flags.insert(key.to_string(), value);
    }
}

/// Shared state shape for the 30-day challenge and the 40-day surge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChallengeState {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Username of the friend being compared against (30-day only).
    #[serde(default)]
    pub friend: Option<String>,
    /// Day key -> recorded progress. Days with no activity have no entry.
    #[serde(default)]
    pub days: BTreeMap<String, DayProgress>,
}

/// One body-weight measurement. The list is append-only; the latest
/// entry is the dashboard weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyWeightEntry {
    pub date: NaiveDate,
    pub weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_entry_lenient_parsing() {
        let set = SetEntry::new("8", "135.5", true);
        assert_eq!(set.reps_count(), 8);
        assert_eq!(set.weight_lbs(), 135.5);

        let garbage = SetEntry::new("abc", "", true);
        assert_eq!(garbage.reps_count(), 0);
        assert_eq!(garbage.weight_lbs(), 0.0);

        let padded = SetEntry::new(" 12 ", " 45 ", false);
        assert_eq!(padded.reps_count(), 12);
        assert_eq!(padded.weight_lbs(), 45.0);
    }

    #[test]
    fn set_entry_default_is_zero_sentinel() {
        let sentinel = SetEntry::default();
        assert_eq!(sentinel.reps_count(), 0);
        assert_eq!(sentinel.weight_lbs(), 0.0);
        assert!(!sentinel.completed);
    }

    #[test]
    fn routine_item_exercise_names() {
        assert_eq!(
            RoutineItem::single("Bench Press (Barbell)").exercise_names(),
            vec!["Bench Press (Barbell)"]
        );
        assert_eq!(
            RoutineItem::superset(&["Face Pulls", "Barbell Curls"]).exercise_names(),
            vec!["Face Pulls", "Barbell Curls"]
        );
        assert_eq!(
            RoutineItem::cardio("Rowing Machine").exercise_names(),
            vec!["Rowing Machine"]
        );
        assert_eq!(
            RoutineItem::hiit("Burpees").exercise_names(),
            vec!["Burpees"]
        );
    }

    #[test]
    fn routine_item_serializes_with_type_tag() {
        let item = RoutineItem::superset(&["Skull Crushers", "Front Raises (Dumbbell)"]);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"superset\""));
        let back: RoutineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn day_key_format() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert_eq!(day_key(date), "2025-07-04");
    }

    #[test]
    fn day_progress_missing_flag_is_false() {
        let mut day = DayProgress::default();
        assert!(!day.flag("workout"));
        day.set_flag("workout", true);
        assert!(day.flag("workout"));
        day.set_flag("workout", false);
        assert!(!day.flag("workout"));
    }
}

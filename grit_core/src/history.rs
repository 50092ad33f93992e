//! Workout history, body-weight log, and gym-location bookkeeping.

use chrono::{Days, NaiveDate};
use uuid::Uuid;

use crate::types::{BodyWeightEntry, WorkoutLog};

/// Add a freshly finalized workout to the front of the history.
/// History order is newest first and record detection depends on it.
pub fn prepend_log(history: &mut Vec<WorkoutLog>, log: WorkoutLog) {
    history.insert(0, log);
}

/// Remove a workout by id. Returns false when no entry matched.
pub fn remove_log(history: &mut Vec<WorkoutLog>, id: Uuid) -> bool {
    let before = history.len();
    history.retain(|w| w.id != id);
    history.len() != before
}

/// Workouts dated within the trailing seven days, today inclusive.
pub fn workouts_this_week(history: &[WorkoutLog], today: NaiveDate) -> usize {
    let week_ago = today.checked_sub_days(Days::new(7)).unwrap_or(today);
    history
        .iter()
        .filter(|w| w.date >= week_ago && w.date <= today)
        .count()
}

/// Append a body-weight measurement. The list stays append-only; the
/// newest entry is whatever was logged last.
pub fn add_weight_entry(entries: &mut Vec<BodyWeightEntry>, date: NaiveDate, weight: f64) {
    entries.push(BodyWeightEntry { date, weight });
}

/// The most recently logged body weight, if any.
pub fn latest_weight(entries: &[BodyWeightEntry]) -> Option<f64> {
    entries.last().map(|e| e.weight)
}

/// Remember a gym location the first time a workout is logged there.
/// Returns true when the list changed.
pub fn learn_location(locations: &mut Vec<String>, location: Option<&str>) -> bool {
    match location {
        Some(loc) if !loc.is_empty() && !locations.iter().any(|l| l == loc) => {
            locations.push(loc.to_string());
            true
        }
        _ => false,
    }
}

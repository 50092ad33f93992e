//! Daily habit checklist: per-day task records, water glasses,
//! medication schedules, and the consecutive-day streak.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use uuid::Uuid;

use crate::config::GoalsConfig;
use crate::error::{Error, Result};
use crate::types::{day_key, DailyTaskRecord, Medication, TaskProgress};

/// A directly toggleable daily task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyTask {
    Steps,
    Workout,
}

/// Weekday index into a medication schedule. Sunday is 0.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// A fresh record for a day with no activity yet.
pub fn default_record(goals: &GoalsConfig) -> DailyTaskRecord {
    DailyTaskRecord {
        steps: TaskProgress::with_goal(goals.steps_goal),
        water: TaskProgress::with_goal(goals.water_goal_oz),
        meds_taken: Default::default(),
        workout_done: false,
    }
}

/// The record for `date`, materializing the lazy default when the day
/// has no entry yet.
pub fn day_record(
    tasks: &BTreeMap<String, DailyTaskRecord>,
    date: NaiveDate,
    goals: &GoalsConfig,
) -> DailyTaskRecord {
    tasks
        .get(&day_key(date))
        .cloned()
        .unwrap_or_else(|| default_record(goals))
}

/// Add one glass of water. The done flag latches once current reaches
/// the goal and is never cleared by later goal changes.
pub fn add_water(record: &mut DailyTaskRecord, glass_oz: f64) {
    record.water.current += glass_oz;
    if record.water.current >= record.water.goal {
        record.water.done = true;
    }
}

/// Flip a task's done flag.
pub fn toggle_task(record: &mut DailyTaskRecord, task: DailyTask) {
    match task {
        DailyTask::Steps => record.steps.done = !record.steps.done,
        DailyTask::Workout => record.workout_done = !record.workout_done,
    }
}

/// Mark the workout done. Returns false when it already was, so
/// callers can avoid double-crediting challenges.
pub fn mark_workout_done(record: &mut DailyTaskRecord) -> bool {
    if record.workout_done {
        return false;
    }
    record.workout_done = true;
    true
}

/// Medications scheduled for the given date's weekday.
pub fn meds_scheduled_for(meds: &[Medication], date: NaiveDate) -> Vec<&Medication> {
    let idx = weekday_index(date);
    meds.iter().filter(|m| m.days[idx]).collect()
}

/// True when every medication scheduled for the date has been taken.
/// Vacuously true with nothing scheduled. Always evaluated against the
/// current medication list, so deleting a medication retroactively
/// changes past-day completeness.
pub fn meds_complete(record: &DailyTaskRecord, meds: &[Medication], date: NaiveDate) -> bool {
    meds_scheduled_for(meds, date)
        .iter()
        .all(|m| record.meds_taken.contains(&m.id))
}

/// Whether every part of the daily checklist is done for the date.
pub fn day_fully_complete(
    record: &DailyTaskRecord,
    meds: &[Medication],
    date: NaiveDate,
) -> bool {
    record.steps.done
        && record.water.done
        && meds_complete(record, meds, date)
        && record.workout_done
}

/// How many of the four checklist slots (steps, water, meds, workout)
/// are complete. Drives the completion ring on the dashboard.
pub fn completed_task_count(
    record: &DailyTaskRecord,
    meds: &[Medication],
    date: NaiveDate,
) -> usize {
    let mut count = 0;
    if record.steps.done {
        count += 1;
    }
    if record.water.done {
        count += 1;
    }
    if record.workout_done {
        count += 1;
    }
    if meds_complete(record, meds, date) {
        count += 1;
    }
    count
}

/// Consecutive fully-complete days ending today, walking backward one
/// day at a time. The first missing or incomplete day stops the walk.
pub fn current_streak(
    tasks: &BTreeMap<String, DailyTaskRecord>,
    meds: &[Medication],
    today: NaiveDate,
) -> u32 {
    let mut streak = 0;
    let mut date = today;
    loop {
        let Some(record) = tasks.get(&day_key(date)) else {
            break;
        };
        if !day_fully_complete(record, meds, date) {
            break;
        }
        streak += 1;
        match date.checked_sub_days(Days::new(1)) {
            Some(prev) => date = prev,
            None => break,
        }
    }
    streak
}

/// Add a medication with a fresh id. The name must be non-empty and
/// at least one weekday must be scheduled.
pub fn add_medication(meds: &mut Vec<Medication>, name: &str, days: [bool; 7]) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput(
            "medication name cannot be empty".to_string(),
        ));
    }
    if !days.iter().any(|d| *d) {
        return Err(Error::InvalidInput(
            "medication must be scheduled on at least one day".to_string(),
        ));
    }
    let id = Uuid::new_v4().to_string();
    meds.push(Medication {
        id: id.clone(),
        name: name.to_string(),
        days,
    });
    Ok(id)
}

/// Remove a medication by name (case-insensitive) or id. Returns false
/// when nothing matched.
pub fn remove_medication(meds: &mut Vec<Medication>, name_or_id: &str) -> bool {
    let before = meds.len();
    meds.retain(|m| m.id != name_or_id && !m.name.eq_ignore_ascii_case(name_or_id));
    meds.len() != before
}

/// Look up a medication by name (case-insensitive) or id.
pub fn find_medication<'a>(meds: &'a [Medication], name_or_id: &str) -> Option<&'a Medication> {
    meds.iter()
        .find(|m| m.id == name_or_id || m.name.eq_ignore_ascii_case(name_or_id))
}

/// Record that a medication was taken today.
pub fn take_medication(record: &mut DailyTaskRecord, med_id: &str) {
    record.meds_taken.insert(med_id.to_string());
}

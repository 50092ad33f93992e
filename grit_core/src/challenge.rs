//! Multi-day challenges: the scored 30-day challenge and the binary
//! 40-day surge. Both share one state shape; they differ only in task
//! definitions, window length, and whether days are scored.

use chrono::{Days, NaiveDate};

use crate::error::{Error, Result};
use crate::types::{day_key, ChallengeState, DayProgress};

/// One task inside a challenge. Surge tasks carry zero points since
/// surge days are pass/fail.
#[derive(Debug, Clone, Copy)]
pub struct TaskDef {
    pub key: &'static str,
    pub label: &'static str,
    pub points: u32,
}

pub const THIRTY_DAY_LEN: usize = 30;
pub const FORTY_DAY_LEN: usize = 40;

/// Tasks of the 30-day challenge. The workout flag is earned by
/// logging a workout, not toggled directly.
pub static THIRTY_DAY_TASKS: &[TaskDef] = &[
    TaskDef { key: "workout", label: "Complete a Workout", points: 25 },
    TaskDef { key: "hydration", label: "8 Glasses of Water", points: 10 },
    TaskDef { key: "steps", label: "10,000 Steps", points: 10 },
];

/// Tasks of the 40-day surge. A day counts only when all five are done.
pub static FORTY_DAY_TASKS: &[TaskDef] = &[
    TaskDef { key: "pushups", label: "50 Pushups", points: 0 },
    TaskDef { key: "walk", label: "2 Miles Walked/Ran", points: 0 },
    TaskDef { key: "no_alcohol", label: "Alcohol-Free", points: 0 },
    TaskDef { key: "diet", label: "Dietary Eating", points: 0 },
    TaskDef { key: "workout", label: "90-Minute Workout", points: 0 },
];

/// Completion status of one challenge day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    /// Every task done.
    Perfect,
    /// At least one scored task done.
    Partial,
    /// Nothing done, or no entry at all.
    None,
}

/// One slot in a rendered challenge window.
#[derive(Debug, Clone)]
pub struct WindowDay {
    /// 1-based day number within the challenge.
    pub number: usize,
    pub date: NaiveDate,
    pub status: DayStatus,
}

/// A day's score, derived from its flags. Never stored, so flags and
/// score cannot disagree.
pub fn day_score(day: &DayProgress, tasks: &[TaskDef]) -> u32 {
    tasks
        .iter()
        .filter(|t| day.flag(t.key))
        .map(|t| t.points)
        .sum()
}

/// Whether every task flag is set for the day.
pub fn day_complete(day: &DayProgress, tasks: &[TaskDef]) -> bool {
    tasks.iter().all(|t| day.flag(t.key))
}

fn status_of(day: Option<&DayProgress>, tasks: &[TaskDef]) -> DayStatus {
    match day {
        Some(day) if day_complete(day, tasks) => DayStatus::Perfect,
        Some(day) if day_score(day, tasks) > 0 => DayStatus::Partial,
        _ => DayStatus::None,
    }
}

/// The consecutive dates of a challenge window starting at `start`.
fn window_dates(start: NaiveDate, len: usize) -> Vec<NaiveDate> {
    (0..len)
        .filter_map(|i| start.checked_add_days(Days::new(i as u64)))
        .collect()
}

/// Render the day-by-day window of a challenge. Empty when the
/// challenge has not been started.
pub fn build_window(state: &ChallengeState, len: usize, tasks: &[TaskDef]) -> Vec<WindowDay> {
    let Some(start) = state.start_date else {
        return Vec::new();
    };
    window_dates(start, len)
        .into_iter()
        .enumerate()
        .map(|(i, date)| WindowDay {
            number: i + 1,
            date,
            status: status_of(state.days.get(&day_key(date)), tasks),
        })
        .collect()
}

/// Cumulative score of a participant's recorded days over a window.
/// The window dates come from the caller, so a friend's score is
/// always summed over the *user's* challenge dates.
pub fn window_score(
    state: &ChallengeState,
    start: NaiveDate,
    len: usize,
    tasks: &[TaskDef],
) -> u32 {
    window_dates(start, len)
        .into_iter()
        .filter_map(|date| state.days.get(&day_key(date)))
        .map(|day| day_score(day, tasks))
        .sum()
}

/// Begin a challenge with today as day 1, discarding any previous run.
pub fn start(state: &mut ChallengeState, today: NaiveDate) {
    *state = ChallengeState {
        start_date: Some(today),
        friend: None,
        days: Default::default(),
    };
}

/// Flip a task flag on today's entry. Rejects unknown task keys and
/// challenges that have not started. Returns the new flag value.
pub fn toggle_task(
    state: &mut ChallengeState,
    today: NaiveDate,
    task_key: &str,
    tasks: &[TaskDef],
) -> Result<bool> {
    if state.start_date.is_none() {
        return Err(Error::InvalidInput(
            "challenge has not been started".to_string(),
        ));
    }
    if !tasks.iter().any(|t| t.key == task_key) {
        return Err(Error::InvalidInput(format!("unknown task '{task_key}'")));
    }
    let key = day_key(today);
    let day = state.days.entry(key).or_default();
    let new_value = !day.flag(task_key);
    day.set_flag(task_key, new_value);
    Ok(new_value)
}

/// Credit today's workout flag when a workout is logged. No effect on
/// an unstarted challenge or when already credited; returns whether
/// the flag changed.
pub fn mark_workout_completed(state: &mut ChallengeState, today: NaiveDate) -> bool {
    if state.start_date.is_none() {
        return false;
    }
    let day = state.days.entry(day_key(today)).or_default();
    if day.flag("workout") {
        return false;
    }
    day.set_flag("workout", true);
    true
}

/// Pick the friend to compare against.
pub fn set_friend(state: &mut ChallengeState, username: &str) -> Result<()> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::InvalidInput("friend name cannot be empty".to_string()));
    }
    state.friend = Some(username.to_lowercase());
    Ok(())
}

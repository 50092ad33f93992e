//! Progress computation: best-set selection, personal-record
//! detection, lifted-volume totals, and workout finalization.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::catalog::WEIGHT_COMPARISONS;
use crate::error::{Error, Result};
use crate::types::{SetEntry, WorkoutLog};

/// The heaviest set in `sets`: higher weight wins, reps break weight
/// ties, exact ties keep the earlier set. Returns the zero sentinel
/// for an empty slice, so a "no prior data" baseline loses to any
/// set with weight or reps.
pub fn best_set(sets: &[SetEntry]) -> SetEntry {
    sets.iter().fold(SetEntry::default(), |best, current| {
        if current.weight_lbs() > best.weight_lbs()
            || (current.weight_lbs() == best.weight_lbs()
                && current.reps_count() > best.reps_count())
        {
            current.clone()
        } else {
            best
        }
    })
}

/// Volume contributed by one set: reps x weight, zero when either
/// field fails to parse.
pub fn set_volume(set: &SetEntry) -> f64 {
    set.reps_count() as f64 * set.weight_lbs()
}

/// Total pounds moved across all completed sets of a session.
pub fn total_volume(detailed_log: &BTreeMap<String, Vec<SetEntry>>) -> f64 {
    detailed_log
        .values()
        .flatten()
        .filter(|s| s.completed)
        .map(set_volume)
        .sum()
}

/// Render a lifted volume as a comparison against a familiar object:
/// the heaviest reference not exceeding the volume, or the lightest
/// reference when even that is too heavy. Empty for zero or negative
/// volume.
pub fn weight_comparison(volume: f64) -> Option<String> {
    if volume <= 0.0 {
        return None;
    }
    let comparison = WEIGHT_COMPARISONS
        .iter()
        .fold(&WEIGHT_COMPARISONS[0], |prev, curr| {
            if curr.weight <= volume && curr.weight > prev.weight {
                curr
            } else {
                prev
            }
        });
    Some(format!("That's like lifting {}!", comparison.name))
}

/// Print a parsed weight the way the entry screens show it: no
/// trailing ".0" on whole numbers.
fn fmt_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{}", weight as i64)
    } else {
        format!("{weight}")
    }
}

/// Result of finalizing a workout session.
#[derive(Debug, Clone)]
pub struct WorkoutSummary {
    pub log: WorkoutLog,
    /// Personal-record lines, in exercise order.
    pub new_records: Vec<String>,
    pub comparison: Option<String>,
}

/// Finalize a workout session into an immutable log entry.
///
/// For each exercise with at least one completed set, the best
/// completed set is compared against the best set of the first entry
/// in `prior` (current list order, newest first) that logged the same
/// exercise; a strict improvement under the best-set ordering is a new
/// personal record. Exercises with no completed sets carry their sets
/// into the log but take no part in records or volume.
pub fn finalize_workout(
    name: &str,
    date: NaiveDate,
    location: Option<String>,
    exercises: Vec<String>,
    sets: BTreeMap<String, Vec<SetEntry>>,
    prior: &[WorkoutLog],
) -> Result<WorkoutSummary> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput(
            "workout name cannot be empty".to_string(),
        ));
    }

    let mut total = 0.0;
    let mut detailed_log = BTreeMap::new();
    let mut new_records = Vec::new();

    for exercise in &exercises {
        let current_sets = sets.get(exercise).cloned().unwrap_or_default();
        detailed_log.insert(exercise.clone(), current_sets.clone());

        let completed: Vec<SetEntry> =
            current_sets.into_iter().filter(|s| s.completed).collect();
        if completed.is_empty() {
            continue;
        }

        let prior_best = prior
            .iter()
            .find(|w| w.detailed_log.contains_key(exercise))
            .map(|w| best_set(&w.detailed_log[exercise]))
            .unwrap_or_default();
        let current_best = best_set(&completed);

        let beats_prior = current_best.weight_lbs() > prior_best.weight_lbs()
            || (current_best.weight_lbs() == prior_best.weight_lbs()
                && current_best.reps_count() > prior_best.reps_count());
        if beats_prior {
            new_records.push(format!(
                "{}: {} reps at {} lbs",
                exercise,
                current_best.reps_count(),
                fmt_weight(current_best.weight_lbs())
            ));
        }

        total += completed.iter().map(set_volume).sum::<f64>();
    }

    let log = WorkoutLog {
        id: Uuid::new_v4(),
        name: name.to_string(),
        date,
        location,
        exercises,
        detailed_log,
        total_volume: total,
    };
    let comparison = weight_comparison(total);

    Ok(WorkoutSummary {
        log,
        new_records,
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log_with(exercise: &str, sets: Vec<SetEntry>) -> WorkoutLog {
        let mut detailed_log = BTreeMap::new();
        detailed_log.insert(exercise.to_string(), sets);
        WorkoutLog {
            id: Uuid::new_v4(),
            name: "Session".to_string(),
            date: date(2025, 7, 1),
            location: None,
            exercises: vec![exercise.to_string()],
            detailed_log,
            total_volume: 0.0,
        }
    }

    #[test]
    fn best_set_weight_dominates_reps() {
        let sets = vec![
            SetEntry::new("12", "100", true),
            SetEntry::new("5", "135", true),
        ];
        assert_eq!(best_set(&sets).weight, "135");
    }

    #[test]
    fn best_set_reps_break_weight_ties() {
        let sets = vec![
            SetEntry::new("8", "135", true),
            SetEntry::new("10", "135", true),
        ];
        assert_eq!(best_set(&sets).reps, "10");
    }

    #[test]
    fn best_set_exact_tie_keeps_first() {
        let first = SetEntry::new("8", "135", true);
        let second = SetEntry::new("8", "135", false);
        let winner = best_set(&[first.clone(), second]);
        assert_eq!(winner, first);
    }

    #[test]
    fn best_set_empty_is_sentinel() {
        let winner = best_set(&[]);
        assert_eq!(winner.reps_count(), 0);
        assert_eq!(winner.weight_lbs(), 0.0);
    }

    #[test]
    fn best_set_unparsable_treated_as_zero() {
        let sets = vec![
            SetEntry::new("??", "heavy", true),
            SetEntry::new("1", "5", true),
        ];
        assert_eq!(best_set(&sets).weight, "5");
    }

    #[test]
    fn total_volume_counts_only_completed_parseable_sets() {
        let mut log = BTreeMap::new();
        log.insert(
            "Bench Press (Barbell)".to_string(),
            vec![
                SetEntry::new("10", "100", true),
                SetEntry::new("10", "100", false),
                SetEntry::new("x", "100", true),
            ],
        );
        assert_eq!(total_volume(&log), 1000.0);
    }

    #[test]
    fn comparison_zero_and_negative_are_empty() {
        assert_eq!(weight_comparison(0.0), None);
        assert_eq!(weight_comparison(-5.0), None);
    }

    #[test]
    fn comparison_below_table_falls_back_to_smallest() {
        assert_eq!(
            weight_comparison(10.0).unwrap(),
            "That's like lifting a Large Cat!"
        );
    }

    #[test]
    fn comparison_picks_largest_not_exceeding() {
        assert_eq!(
            weight_comparison(1500.0).unwrap(),
            "That's like lifting a Grand Piano!"
        );
        assert_eq!(
            weight_comparison(1200.0).unwrap(),
            "That's like lifting a Grand Piano!"
        );
        assert_eq!(
            weight_comparison(1199.0).unwrap(),
            "That's like lifting a Vending Machine!"
        );
        assert_eq!(
            weight_comparison(100_000.0).unwrap(),
            "That's like lifting a School Bus!"
        );
    }

    #[test]
    fn first_log_of_exercise_is_always_a_record() {
        let mut sets = BTreeMap::new();
        sets.insert(
            "Deadlifts".to_string(),
            vec![SetEntry::new("5", "225", true)],
        );
        let summary = finalize_workout(
            "Pull Strength (Back Width)",
            date(2025, 7, 2),
            None,
            vec!["Deadlifts".to_string()],
            sets,
            &[],
        )
        .unwrap();
        assert_eq!(summary.new_records, vec!["Deadlifts: 5 reps at 225 lbs"]);
        assert_eq!(summary.log.total_volume, 1125.0);
    }

    #[test]
    fn record_requires_beating_first_prior_log_in_list_order() {
        // Newest-first history: the first list entry carrying the
        // exercise supplies the baseline, not the heaviest ever.
        let prior = vec![
            log_with("Squats (Barbell)", vec![SetEntry::new("5", "185", true)]),
            log_with("Squats (Barbell)", vec![SetEntry::new("5", "315", true)]),
        ];

        let mut sets = BTreeMap::new();
        sets.insert(
            "Squats (Barbell)".to_string(),
            vec![SetEntry::new("5", "205", true)],
        );
        let summary = finalize_workout(
            "Leg Foundation (Squat Day)",
            date(2025, 7, 3),
            None,
            vec!["Squats (Barbell)".to_string()],
            sets,
            &prior,
        )
        .unwrap();
        assert_eq!(
            summary.new_records,
            vec!["Squats (Barbell): 5 reps at 205 lbs"]
        );
    }

    #[test]
    fn equal_weight_equal_reps_is_not_a_record() {
        let prior = vec![log_with(
            "Bench Press (Barbell)",
            vec![SetEntry::new("8", "135", true)],
        )];
        let mut sets = BTreeMap::new();
        sets.insert(
            "Bench Press (Barbell)".to_string(),
            vec![SetEntry::new("8", "135", true)],
        );
        let summary = finalize_workout(
            "Upper Body Strength",
            date(2025, 7, 4),
            None,
            vec!["Bench Press (Barbell)".to_string()],
            sets,
            &prior,
        )
        .unwrap();
        assert!(summary.new_records.is_empty());
    }

    #[test]
    fn no_completed_sets_means_no_record_and_no_volume() {
        let mut sets = BTreeMap::new();
        sets.insert(
            "Pull-ups".to_string(),
            vec![SetEntry::new("10", "0", false)],
        );
        let summary = finalize_workout(
            "Back Dominance",
            date(2025, 7, 4),
            None,
            vec!["Pull-ups".to_string()],
            sets,
            &[],
        )
        .unwrap();
        assert!(summary.new_records.is_empty());
        assert_eq!(summary.log.total_volume, 0.0);
        assert_eq!(summary.comparison, None);
        // The unfinished sets still land in the log.
        assert_eq!(summary.log.detailed_log["Pull-ups"].len(), 1);
    }

    #[test]
    fn empty_workout_name_is_rejected() {
        let err = finalize_workout(
            "   ",
            date(2025, 7, 4),
            None,
            vec![],
            BTreeMap::new(),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn records_preserve_exercise_order() {
        let mut sets = BTreeMap::new();
        sets.insert("Pull-ups".to_string(), vec![SetEntry::new("10", "25", true)]);
        sets.insert(
            "Deadlifts".to_string(),
            vec![SetEntry::new("3", "315", true)],
        );
        let summary = finalize_workout(
            "Pull Strength (Back Width)",
            date(2025, 7, 5),
            None,
            vec!["Deadlifts".to_string(), "Pull-ups".to_string()],
            sets,
            &[],
        )
        .unwrap();
        assert_eq!(
            summary.new_records,
            vec![
                "Deadlifts: 3 reps at 315 lbs",
                "Pull-ups: 10 reps at 25 lbs"
            ]
        );
    }
}

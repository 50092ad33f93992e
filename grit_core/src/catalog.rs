//! Built-in workout catalog: multi-week plans, named routines, the
//! weight-comparison reference table, and the derived master exercise
//! list.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::types::RoutineItem;

/// One scheduled day inside a workout plan. `routine` is either the
/// name of an entry in the routine catalog or "Rest".
#[derive(Debug, Clone)]
pub struct PlanDay {
    pub day: &'static str,
    pub routine: &'static str,
}

/// A multi-week training plan grouping routines into a weekly schedule.
#[derive(Debug, Clone)]
pub struct WorkoutPlan {
    pub name: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
    pub schedule: Vec<PlanDay>,
}

fn plan_day(day: &'static str, routine: &'static str) -> PlanDay {
    PlanDay { day, routine }
}

/// The built-in training plans, in display order.
pub static WORKOUT_PLANS: Lazy<Vec<WorkoutPlan>> = Lazy::new(|| {
    vec![
        WorkoutPlan {
            name: "The Foundation PPL Split",
            duration: "6 Weeks",
            description: "A classic Push/Pull/Legs split to build strength and muscle.",
            schedule: vec![
                plan_day("Day 1", "Push Power (Chest Focus)"),
                plan_day("Day 2", "Pull Strength (Back Width)"),
                plan_day("Day 3", "Leg Foundation (Squat Day)"),
                plan_day("Day 4", "Rest"),
                plan_day("Day 5", "Push Hypertrophy (Shoulder Focus)"),
                plan_day("Day 6", "Pull Density (Back Thickness)"),
                plan_day("Day 7", "Leg Power (Hinge Day)"),
            ],
        },
        WorkoutPlan {
            name: "The Body Sculptor Split",
            duration: "Ongoing",
            description: "Classic bodybuilding split focusing on one major muscle group per day.",
            schedule: vec![
                plan_day("Day 1", "Chest Builder"),
                plan_day("Day 2", "Back Dominance"),
                plan_day("Day 3", "Shoulder Builder"),
                plan_day("Day 4", "The Engine Builder (Legs)"),
                plan_day("Day 5", "Arms & Abs Finisher"),
                plan_day("Day 6", "Rest"),
                plan_day("Day 7", "Rest"),
            ],
        },
        WorkoutPlan {
            name: "The Power Block Upper/Lower",
            duration: "4 Days/Week",
            description:
                "A strength-focused split dividing training between upper and lower body days.",
            schedule: vec![
                plan_day("Day 1", "Upper Body Strength"),
                plan_day("Day 2", "Lower Body Power"),
                plan_day("Day 3", "Rest"),
                plan_day("Day 4", "Upper Body Hypertrophy"),
                plan_day("Day 5", "Lower Body Strength"),
                plan_day("Day 6", "Rest"),
                plan_day("Day 7", "Rest"),
            ],
        },
        WorkoutPlan {
            name: "Cardio Foundation",
            duration: "3 Days/Week",
            description: "A plan to build cardiovascular endurance and core strength.",
            schedule: vec![
                plan_day("Day 1", "Steady-State & Core"),
                plan_day("Day 2", "Rest"),
                plan_day("Day 3", "Active Recovery & Abs"),
                plan_day("Day 4", "Rest"),
                plan_day("Day 5", "Endurance & Core"),
                plan_day("Day 6", "Rest"),
                plan_day("Day 7", "Rest"),
            ],
        },
        WorkoutPlan {
            name: "Metabolic Shock HIIT",
            duration: "3 Days/Week",
            description:
                "High-Intensity Interval Training for maximum efficiency and calorie burn.",
            schedule: vec![
                plan_day("Day 1", "Full Body Blast"),
                plan_day("Day 2", "Rest"),
                plan_day("Day 3", "Athletic Surge"),
                plan_day("Day 4", "Rest"),
                plan_day("Day 5", "Metabolic Finisher"),
                plan_day("Day 6", "Rest"),
                plan_day("Day 7", "Rest"),
            ],
        },
    ]
});

/// Built-in named routines, keyed by routine name.
pub static WORKOUT_ROUTINES: Lazy<BTreeMap<&'static str, Vec<RoutineItem>>> = Lazy::new(|| {
    use RoutineItem as R;
    let mut routines = BTreeMap::new();

    // Foundation PPL
    routines.insert(
        "Push Power (Chest Focus)",
        vec![
            R::single("Bench Press (Barbell)"),
            R::single("Overhead Press (Dumbbell)"),
            R::single("Incline Dumbbell Press"),
            R::superset(&["Tricep Pushdowns (Rope)", "Lateral Raises (Dumbbell)"]),
        ],
    );
    routines.insert(
        "Pull Strength (Back Width)",
        vec![
            R::single("Deadlifts"),
            R::single("Pull-ups"),
            R::single("Bent Over Rows (Barbell)"),
            R::superset(&["Face Pulls", "Barbell Curls"]),
        ],
    );
    routines.insert(
        "Leg Foundation (Squat Day)",
        vec![
            R::single("Squats (Barbell)"),
            R::single("Romanian Deadlifts"),
            R::single("Leg Press"),
            R::superset(&["Leg Curls (Machine)", "Calf Raises"]),
        ],
    );
    routines.insert(
        "Push Hypertrophy (Shoulder Focus)",
        vec![
            R::single("Incline Bench Press (Barbell)"),
            R::single("Seated Dumbbell Shoulder Press"),
            R::single("Dips (Weighted)"),
            R::superset(&["Skull Crushers", "Front Raises (Dumbbell)"]),
        ],
    );
    routines.insert(
        "Pull Density (Back Thickness)",
        vec![
            R::single("T-Bar Rows"),
            R::single("Chin-ups"),
            R::single("Dumbbell Rows"),
            R::superset(&["Preacher Curls", "Reverse Pec-Deck"]),
        ],
    );
    routines.insert(
        "Leg Power (Hinge Day)",
        vec![
            R::single("Front Squats"),
            R::single("Glute Ham Raise"),
            R::single("Bulgarian Split Squats"),
            R::superset(&["Leg Extensions (Machine)", "Seated Calf Raises"]),
        ],
    );

    // Body Sculptor
    routines.insert(
        "Chest Builder",
        vec![
            R::single("Incline Dumbbell Press"),
            R::single("Bench Press (Barbell)"),
            R::single("Dumbbell Flyes"),
            R::single("Push-ups"),
        ],
    );
    routines.insert(
        "Back Dominance",
        vec![
            R::single("Pull-ups"),
            R::single("Bent Over Rows (Barbell)"),
            R::single("Lat Pulldowns"),
            R::single("T-Bar Rows"),
        ],
    );
    routines.insert(
        "Shoulder Builder",
        vec![
            R::single("Overhead Press (Dumbbell)"),
            R::single("Arnold Press"),
            R::superset(&["Lateral Raises (Dumbbell)", "Front Raises (Dumbbell)"]),
            R::single("Face Pulls"),
        ],
    );
    routines.insert(
        "The Engine Builder (Legs)",
        vec![
            R::single("Squats (Barbell)"),
            R::single("Leg Press"),
            R::single("Romanian Deadlifts"),
            R::superset(&["Leg Extensions (Machine)", "Leg Curls (Machine)"]),
            R::single("Calf Raises"),
        ],
    );
    routines.insert(
        "Arms & Abs Finisher",
        vec![
            R::superset(&["Barbell Curls", "Skull Crushers"]),
            R::superset(&["Hammer Curls", "Tricep Pushdowns (Rope)"]),
            R::single("Plank"),
            R::single("Leg Raises"),
        ],
    );

    // Power Block Upper/Lower
    routines.insert(
        "Upper Body Strength",
        vec![
            R::single("Bench Press (Barbell)"),
            R::single("Dumbbell Rows"),
            R::single("Seated Dumbbell Shoulder Press"),
            R::superset(&["Lat Pulldowns", "Lateral Raises (Dumbbell)"]),
            R::single("Bicep Curls (Dumbbell)"),
        ],
    );
    routines.insert(
        "Lower Body Power",
        vec![
            R::single("Squats (Barbell)"),
            R::single("Romanian Deadlifts"),
            R::single("Goblet Squat"),
            R::superset(&["Leg Curls (Machine)", "Calf Raises"]),
        ],
    );
    routines.insert(
        "Upper Body Hypertrophy",
        vec![
            R::single("Pull-ups"),
            R::single("Incline Dumbbell Press"),
            R::single("Seated Cable Rows"),
            R::superset(&["Overhead Press (Dumbbell)", "Face Pulls"]),
            R::single("Tricep Pushdowns (Rope)"),
        ],
    );
    routines.insert(
        "Lower Body Strength",
        vec![
            R::single("Deadlifts"),
            R::single("Leg Press"),
            R::single("Lunges (Dumbbell)"),
            R::superset(&["Leg Extensions (Machine)", "Hip Thrusts"]),
        ],
    );

    // Cardio Foundation
    routines.insert(
        "Steady-State & Core",
        vec![
            R::cardio("Treadmill Incline Walk"),
            R::cardio("Elliptical Trainer"),
            R::single("Plank"),
            R::single("Crunches"),
        ],
    );
    routines.insert(
        "Active Recovery & Abs",
        vec![
            R::cardio("Stationary Bike"),
            R::cardio("Rowing Machine"),
            R::single("Leg Raises"),
            R::single("Russian Twists"),
        ],
    );
    routines.insert(
        "Endurance & Core",
        vec![
            R::cardio("Stair Master"),
            R::cardio("Treadmill Jog"),
            R::single("Side Plank (Left)"),
            R::single("Side Plank (Right)"),
        ],
    );

    // Metabolic Shock HIIT
    routines.insert(
        "Full Body Blast",
        vec![
            R::hiit("Treadmill Sprints"),
            R::hiit("Burpees"),
            R::hiit("Kettlebell Swings"),
            R::hiit("Mountain Climbers"),
        ],
    );
    routines.insert(
        "Athletic Surge",
        vec![
            R::hiit("Assault Bike Sprints"),
            R::hiit("Box Jumps"),
            R::hiit("Battle Ropes"),
            R::hiit("Jumping Jacks"),
        ],
    );
    routines.insert(
        "Metabolic Finisher",
        vec![
            R::hiit("Rowing Sprints"),
            R::hiit("Squat Jumps"),
            R::hiit("High Knees"),
            R::hiit("Burpees"),
        ],
    );

    routines
});

/// A reference object used to make total lifted volume tangible.
#[derive(Debug, Clone, Copy)]
pub struct WeightComparison {
    pub name: &'static str,
    pub weight: f64,
}

/// Reference weights in ascending order.
pub static WEIGHT_COMPARISONS: &[WeightComparison] = &[
    WeightComparison { name: "a Large Cat", weight: 15.0 },
    WeightComparison { name: "a Car Tire", weight: 25.0 },
    WeightComparison { name: "a 5-gallon Water Jug", weight: 40.0 },
    WeightComparison { name: "an Irish Setter", weight: 70.0 },
    WeightComparison { name: "a Baby Elephant", weight: 200.0 },
    WeightComparison { name: "a Refrigerator", weight: 300.0 },
    WeightComparison { name: "a Vending Machine", weight: 650.0 },
    WeightComparison { name: "a Grand Piano", weight: 1200.0 },
    WeightComparison { name: "a Small Car", weight: 2800.0 },
    WeightComparison { name: "a Giraffe", weight: 4200.0 },
    WeightComparison { name: "a School Bus", weight: 25000.0 },
];

/// Sorted, deduplicated list of every exercise named by a built-in
/// routine. Used for template building and exercise pickers.
pub fn all_exercises() -> Vec<String> {
    let mut names: Vec<String> = WORKOUT_ROUTINES
        .values()
        .flatten()
        .flat_map(|item| item.exercise_names())
        .map(|name| name.to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Look up a routine by name, preferring a user-saved custom template
/// over the built-in catalog.
pub fn find_routine(
    name: &str,
    custom: &BTreeMap<String, Vec<RoutineItem>>,
) -> Option<Vec<RoutineItem>> {
    if let Some(items) = custom.get(name) {
        return Some(items.clone());
    }
    WORKOUT_ROUTINES.get(name).cloned()
}

/// Sanity-check the built-in catalog: every non-rest plan day must
/// name a known routine, every routine item a non-empty exercise, and
/// the comparison table must be strictly ascending.
pub fn validate() -> Result<()> {
    for plan in WORKOUT_PLANS.iter() {
        for day in &plan.schedule {
            if day.routine != "Rest" && !WORKOUT_ROUTINES.contains_key(day.routine) {
                return Err(Error::CatalogValidation(format!(
                    "plan '{}' references unknown routine '{}'",
                    plan.name, day.routine
                )));
            }
        }
    }
    for (name, items) in WORKOUT_ROUTINES.iter() {
        if items.is_empty() {
            return Err(Error::CatalogValidation(format!(
                "routine '{name}' has no items"
            )));
        }
        for item in items {
            if item.exercise_names().iter().any(|e| e.trim().is_empty()) {
                return Err(Error::CatalogValidation(format!(
                    "routine '{name}' contains an empty exercise name"
                )));
            }
        }
    }
    for pair in WEIGHT_COMPARISONS.windows(2) {
        if pair[1].weight <= pair[0].weight {
            return Err(Error::CatalogValidation(format!(
                "comparison table not ascending at '{}'",
                pair[1].name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoutineItem;

    #[test]
    fn catalog_validates() {
        validate().unwrap();
    }

    #[test]
    fn all_exercises_sorted_and_deduplicated() {
        let names = all_exercises();
        assert!(!names.is_empty());
        for pair in names.windows(2) {
            assert!(pair[0] < pair[1], "{:?} not strictly before {:?}", pair[0], pair[1]);
        }
        // Burpees appears in two HIIT routines but only once here.
        assert_eq!(names.iter().filter(|n| *n == "Burpees").count(), 1);
    }

    #[test]
    fn find_routine_prefers_custom_template() {
        let mut custom = BTreeMap::new();
        custom.insert(
            "Chest Builder".to_string(),
            vec![RoutineItem::single("Push-ups")],
        );
        let routine = find_routine("Chest Builder", &custom).unwrap();
        assert_eq!(routine, vec![RoutineItem::single("Push-ups")]);

        let builtin = find_routine("Back Dominance", &custom).unwrap();
        assert_eq!(builtin.len(), 4);

        assert!(find_routine("No Such Routine", &custom).is_none());
    }

    #[test]
    fn every_plan_week_has_seven_days() {
        for plan in WORKOUT_PLANS.iter() {
            assert_eq!(plan.schedule.len(), 7, "plan {}", plan.name);
        }
    }
}

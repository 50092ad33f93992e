//! Integration tests for the grit binary.
//!
//! These tests verify end-to-end behavior including:
//! - Workout logging, records, and volume comparison output
//! - Daily checklist mutations and persistence
//! - Challenge start/toggle/status
//! - CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn cli(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("grit"));
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("grit"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personal fitness and habit tracker",
        ));
}

#[test]
fn test_default_command_shows_checklist() {
    let dir = setup_test_dir();
    cli(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Steps"))
        .stdout(predicate::str::contains("Water"))
        .stdout(predicate::str::contains("Streak: 0 days"))
        .stdout(predicate::str::contains("Current weight: N/A"));
}

#[test]
fn test_water_accumulates_across_runs() {
    let dir = setup_test_dir();
    cli(&dir)
        .arg("water")
        .assert()
        .success()
        .stdout(predicate::str::contains("Water: 8 / 128 oz"));
    cli(&dir)
        .arg("water")
        .assert()
        .success()
        .stdout(predicate::str::contains("Water: 16 / 128 oz"));

    assert!(dir.path().join("daily_tasks.json").exists());
}

#[test]
fn test_sixteen_glasses_reach_hydration_goal() {
    let dir = setup_test_dir();
    for _ in 0..15 {
        cli(&dir).arg("water").assert().success();
    }
    cli(&dir)
        .arg("water")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hydration goal reached!"));
}

#[test]
fn test_task_toggle_roundtrip() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["task", "steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] Steps"));
    cli(&dir)
        .args(["task", "steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Steps"));
    cli(&dir)
        .args(["task", "situps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown task"));
}

#[test]
fn test_first_workout_is_a_personal_record() {
    let dir = setup_test_dir();
    cli(&dir)
        .args([
            "workout",
            "log",
            "Pull Strength (Back Width)",
            "--set",
            "Deadlifts=5x225",
            "--set",
            "Deadlifts=5x245",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("You lifted a total of 2350 lbs."))
        .stdout(predicate::str::contains(
            "That's like lifting a Grand Piano!",
        ))
        .stdout(predicate::str::contains("New Personal Records:"))
        .stdout(predicate::str::contains("Deadlifts: 5 reps at 245 lbs"));
}

#[test]
fn test_matching_prior_best_is_not_a_record() {
    let dir = setup_test_dir();
    let log = |dir: &TempDir| {
        cli(dir)
            .args([
                "workout",
                "log",
                "Back Dominance",
                "--set",
                "Pull-ups=10x25",
            ])
            .assert()
            .success()
    };
    log(&dir).stdout(predicate::str::contains("New Personal Records:"));
    log(&dir).stdout(predicate::str::contains("New Personal Records:").not());
}

#[test]
fn test_unknown_routine_rejected() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["workout", "log", "Leg Dominator 9000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown routine"));
}

#[test]
fn test_workout_history_and_location_learning() {
    let dir = setup_test_dir();
    cli(&dir)
        .args([
            "workout",
            "log",
            "Chest Builder",
            "--location",
            "Downtown YMCA",
            "--set",
            "Push-ups=20x0",
        ])
        .assert()
        .success();

    cli(&dir)
        .args(["workout", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chest Builder"))
        .stdout(predicate::str::contains("@ Downtown YMCA"));

    let locations = fs::read_to_string(dir.path().join("gym_locations.json")).unwrap();
    assert!(locations.contains("Downtown YMCA"));
}

#[test]
fn test_custom_template_logs_like_a_routine() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["template", "save", "Quick Arms", "Barbell Curls", "Skull Crushers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved template 'Quick Arms'"));

    cli(&dir)
        .args([
            "workout",
            "log",
            "Quick Arms",
            "--set",
            "Barbell Curls=10x45",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("You lifted a total of 450 lbs."));
}

#[test]
fn test_logging_workout_marks_checklist_and_challenge() {
    let dir = setup_test_dir();
    cli(&dir).args(["challenge", "start"]).assert().success();
    cli(&dir)
        .args(["workout", "log", "Full Body Blast", "--set", "Burpees=20x0"])
        .assert()
        .success();

    cli(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] Workout"));
    cli(&dir)
        .args(["challenge", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your score:     25"));
}

#[test]
fn test_challenge_toggle_and_score() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["challenge", "toggle", "steps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not been started"));

    cli(&dir).args(["challenge", "start"]).assert().success();
    cli(&dir)
        .args(["challenge", "toggle", "steps"])
        .assert()
        .success();
    cli(&dir)
        .args(["challenge", "toggle", "hydration"])
        .assert()
        .success();
    cli(&dir)
        .args(["challenge", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your score:     20"));

    // Toggling back off removes the points.
    cli(&dir)
        .args(["challenge", "toggle", "hydration"])
        .assert()
        .success();
    cli(&dir)
        .args(["challenge", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your score:     10"));
}

#[test]
fn test_challenge_workout_not_directly_toggleable() {
    let dir = setup_test_dir();
    cli(&dir).args(["challenge", "start"]).assert().success();
    cli(&dir)
        .args(["challenge", "toggle", "workout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("logging a workout"));
}

#[test]
fn test_challenge_friend_comparison() {
    let dir = setup_test_dir();
    cli(&dir).args(["challenge", "start"]).assert().success();
    cli(&dir)
        .args(["challenge", "friend", "Chris"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now competing against chris"));
    // Chris's 2025 run is outside a window starting today.
    cli(&dir)
        .args(["challenge", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You vs. chris"))
        .stdout(predicate::str::contains("Friend's score: 0"));

    cli(&dir)
        .args(["challenge", "friend", "nobody"])
        .assert()
        .success()
        .stdout(predicate::str::contains("they score 0"));
}

#[test]
fn test_surge_binary_days() {
    let dir = setup_test_dir();
    cli(&dir).args(["surge", "start"]).assert().success();
    for task in ["pushups", "walk", "no_alcohol", "diet", "workout"] {
        cli(&dir).args(["surge", "toggle", task]).assert().success();
    }
    cli(&dir)
        .args(["surge", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 40 days complete"));

    cli(&dir)
        .args(["surge", "toggle", "diet"])
        .assert()
        .success();
    cli(&dir)
        .args(["surge", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 40 days complete"));
}

#[test]
fn test_medication_schedule_flow() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["med", "add", "Creatine", "--days", "daily"])
        .assert()
        .success();
    cli(&dir)
        .args(["med", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Creatine (Sun, Mon, Tue, Wed, Thu, Fri, Sat)",
        ));
    cli(&dir)
        .args(["med", "take", "creatine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All medications taken"));
    cli(&dir)
        .args(["med", "rm", "Creatine"])
        .assert()
        .success();
    cli(&dir)
        .args(["med", "take", "Creatine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no medication named"));
}

#[test]
fn test_weight_log_shows_on_dashboard() {
    let dir = setup_test_dir();
    cli(&dir).args(["weight", "log", "182.4"]).assert().success();
    cli(&dir).args(["weight", "log", "181"]).assert().success();
    cli(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current weight: 181 lbs"));
    cli(&dir)
        .args(["weight", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("182.4 lbs"));
}

#[test]
fn test_csv_export() {
    let dir = setup_test_dir();
    cli(&dir)
        .args([
            "workout",
            "log",
            "Back Dominance",
            "--set",
            "Pull-ups=10x0",
            "--set",
            "Lat Pulldowns=12x120",
        ])
        .assert()
        .success();

    let csv_path = dir.path().join("export.csv");
    cli(&dir)
        .args(["workout", "export"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 rows"));

    let contents = fs::read_to_string(&csv_path).unwrap();
    assert!(contents.contains("Back Dominance"));
    assert!(contents.contains("Lat Pulldowns"));
}

#[test]
fn test_workout_rm() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["workout", "log", "Chest Builder", "--set", "Push-ups=15x0"])
        .assert()
        .success();

    let workouts = fs::read_to_string(dir.path().join("workouts.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&workouts).unwrap();
    let id = parsed[0]["id"].as_str().unwrap().to_string();

    cli(&dir)
        .args(["workout", "rm", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed workout"));
    cli(&dir)
        .args(["workout", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged yet."));
}

#[test]
fn test_corrupt_state_degrades_to_defaults() {
    let dir = setup_test_dir();
    fs::write(dir.path().join("daily_tasks.json"), "{ not json").unwrap();
    cli(&dir)
        .arg("water")
        .assert()
        .success()
        .stdout(predicate::str::contains("Water: 8 / 128 oz"));
}

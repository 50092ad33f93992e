use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use grit_core::challenge::{
    self, DayStatus, TaskDef, FORTY_DAY_LEN, FORTY_DAY_TASKS, THIRTY_DAY_LEN, THIRTY_DAY_TASKS,
};
use grit_core::habits::{self, DailyTask};
use grit_core::store::keys;
use grit_core::*;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "grit")]
#[command(about = "Personal fitness and habit tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's checklist and progress snapshot (default)
    Today,

    /// Log one glass of water
    Water,

    /// Toggle a daily task (steps, workout)
    Task { task: String },

    /// Manage medications
    Med {
        #[command(subcommand)]
        action: MedCommands,
    },

    /// Log and inspect workouts
    Workout {
        #[command(subcommand)]
        action: WorkoutCommands,
    },

    /// Manage custom workout templates
    Template {
        #[command(subcommand)]
        action: TemplateCommands,
    },

    /// Track body weight
    Weight {
        #[command(subcommand)]
        action: WeightCommands,
    },

    /// 30-day challenge
    Challenge {
        #[command(subcommand)]
        action: ChallengeCommands,
    },

    /// 40-day surge
    Surge {
        #[command(subcommand)]
        action: SurgeCommands,
    },
}

#[derive(Subcommand)]
enum MedCommands {
    /// Add a medication with a weekly schedule
    Add {
        name: String,
        /// Scheduled days, comma separated (e.g. sun,mon,wed or "daily")
        #[arg(long)]
        days: String,
    },
    /// Mark a medication as taken today
    Take { name: String },
    /// Remove a medication
    Rm { name: String },
    /// List medications and their schedules
    List,
}

#[derive(Subcommand)]
enum WorkoutCommands {
    /// Finalize and log a workout session
    Log {
        /// Routine name (built-in or custom template)
        routine: String,
        /// Gym location
        #[arg(long)]
        location: Option<String>,
        /// Completed set, repeatable: "Exercise=REPSxWEIGHT"
        #[arg(long = "set")]
        sets: Vec<String>,
    },
    /// Show the workout history, newest first
    History,
    /// Remove a logged workout by id
    Rm { id: Uuid },
    /// Export the full history as CSV
    Export { path: PathBuf },
}

#[derive(Subcommand)]
enum TemplateCommands {
    /// Save a custom workout template
    Save {
        name: String,
        /// Exercises, in order
        #[arg(required = true)]
        exercises: Vec<String>,
    },
}

#[derive(Subcommand)]
enum WeightCommands {
    /// Log today's body weight in pounds
    Log { lbs: f64 },
    /// List all weight entries
    List,
}

#[derive(Subcommand)]
enum ChallengeCommands {
    /// Start the 30-day challenge with today as day 1
    Start,
    /// Show scores and the day-by-day window
    Status,
    /// Toggle a task for today (hydration, steps)
    Toggle { task: String },
    /// Compare against a friend from the directory
    Friend { username: String },
}

#[derive(Subcommand)]
enum SurgeCommands {
    /// Start the 40-day surge with today as day 1
    Start,
    /// Show the day-by-day window
    Status,
    /// Toggle a task for today (pushups, walk, no_alcohol, diet, workout)
    Toggle { task: String },
}

fn main() -> Result<()> {
    grit_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = Store::new(data_dir);

    match cli.command {
        Some(Commands::Today) | None => cmd_today(&store, &config),
        Some(Commands::Water) => cmd_water(&store, &config),
        Some(Commands::Task { task }) => cmd_task(&store, &config, &task),
        Some(Commands::Med { action }) => match action {
            MedCommands::Add { name, days } => cmd_med_add(&store, &name, &days),
            MedCommands::Take { name } => cmd_med_take(&store, &config, &name),
            MedCommands::Rm { name } => cmd_med_rm(&store, &name),
            MedCommands::List => cmd_med_list(&store),
        },
        Some(Commands::Workout { action }) => match action {
            WorkoutCommands::Log {
                routine,
                location,
                sets,
            } => cmd_workout_log(&store, &config, &routine, location, &sets),
            WorkoutCommands::History => cmd_workout_history(&store),
            WorkoutCommands::Rm { id } => cmd_workout_rm(&store, id),
            WorkoutCommands::Export { path } => cmd_workout_export(&store, &path),
        },
        Some(Commands::Template { action }) => match action {
            TemplateCommands::Save { name, exercises } => {
                cmd_template_save(&store, &name, &exercises)
            }
        },
        Some(Commands::Weight { action }) => match action {
            WeightCommands::Log { lbs } => cmd_weight_log(&store, lbs),
            WeightCommands::List => cmd_weight_list(&store),
        },
        Some(Commands::Challenge { action }) => match action {
            ChallengeCommands::Start => cmd_challenge_start(&store),
            ChallengeCommands::Status => cmd_challenge_status(&store),
            ChallengeCommands::Toggle { task } => cmd_challenge_toggle(&store, &task),
            ChallengeCommands::Friend { username } => cmd_challenge_friend(&store, &username),
        },
        Some(Commands::Surge { action }) => match action {
            SurgeCommands::Start => cmd_surge_start(&store),
            SurgeCommands::Status => cmd_surge_status(&store),
            SurgeCommands::Toggle { task } => cmd_surge_toggle(&store, &task),
        },
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Persistence failures are warnings, not faults: the command already
/// reported its in-memory result and must not pretend it failed.
fn persist<T: serde::Serialize>(store: &Store, key: &str, value: &T) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!(key, "failed to persist: {e}");
        eprintln!("Warning: could not save {key}: {e}");
    }
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

fn checkbox(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

fn cmd_today(store: &Store, config: &Config) -> Result<()> {
    let date = today();
    let tasks: BTreeMap<String, DailyTaskRecord> = store.get(keys::DAILY_TASKS);
    let meds: Vec<Medication> = store.get(keys::MEDICATIONS);
    let workouts: Vec<WorkoutLog> = store.get(keys::WORKOUTS);
    let weights: Vec<BodyWeightEntry> = store.get(keys::WEIGHT_DATA);

    let record = habits::day_record(&tasks, date, &config.goals);
    let scheduled = habits::meds_scheduled_for(&meds, date);
    let meds_done = habits::meds_complete(&record, &meds, date);

    println!("╭─────────────────────────────────╮");
    println!("│  GRIT · {date}             │");
    println!("╰─────────────────────────────────╯");
    println!();
    println!(
        "  {} Steps    {} / {}",
        checkbox(record.steps.done),
        fmt_num(record.steps.current),
        fmt_num(record.steps.goal)
    );
    println!(
        "  {} Water    {} / {} oz",
        checkbox(record.water.done),
        fmt_num(record.water.current),
        fmt_num(record.water.goal)
    );
    if scheduled.is_empty() {
        println!("  {} Meds     none scheduled", checkbox(true));
    } else {
        let taken = scheduled
            .iter()
            .filter(|m| record.meds_taken.contains(&m.id))
            .count();
        println!(
            "  {} Meds     {} / {} taken",
            checkbox(meds_done),
            taken,
            scheduled.len()
        );
    }
    println!("  {} Workout", checkbox(record.workout_done));
    println!();
    println!(
        "  Completed {}/4 tasks",
        habits::completed_task_count(&record, &meds, date)
    );
    println!(
        "  Streak: {} days",
        habits::current_streak(&tasks, &meds, date)
    );
    println!(
        "  Workouts this week: {}",
        history::workouts_this_week(&workouts, date)
    );
    match history::latest_weight(&weights) {
        Some(weight) => println!("  Current weight: {} lbs", fmt_num(weight)),
        None => println!("  Current weight: N/A"),
    }

    Ok(())
}

fn cmd_water(store: &Store, config: &Config) -> Result<()> {
    let date = today();
    let mut tasks: BTreeMap<String, DailyTaskRecord> = store.get(keys::DAILY_TASKS);
    let mut record = habits::day_record(&tasks, date, &config.goals);
    let was_done = record.water.done;
    habits::add_water(&mut record, config.goals.water_glass_oz);
    let done = record.water.done;
    let current = record.water.current;
    let goal = record.water.goal;
    tasks.insert(day_key(date), record);
    persist(store, keys::DAILY_TASKS, &tasks);

    println!("Water: {} / {} oz", fmt_num(current), fmt_num(goal));
    if done && !was_done {
        println!("Hydration goal reached!");
    }
    Ok(())
}

fn cmd_task(store: &Store, config: &Config, task: &str) -> Result<()> {
    let which = match task.to_lowercase().as_str() {
        "steps" => DailyTask::Steps,
        "workout" => DailyTask::Workout,
        other => {
            return Err(Error::InvalidInput(format!(
                "unknown task '{other}' (expected steps or workout)"
            )))
        }
    };

    let date = today();
    let mut tasks: BTreeMap<String, DailyTaskRecord> = store.get(keys::DAILY_TASKS);
    let mut record = habits::day_record(&tasks, date, &config.goals);
    habits::toggle_task(&mut record, which);
    let done = match which {
        DailyTask::Steps => record.steps.done,
        DailyTask::Workout => record.workout_done,
    };
    tasks.insert(day_key(date), record);
    persist(store, keys::DAILY_TASKS, &tasks);

    println!(
        "{} {}",
        checkbox(done),
        match which {
            DailyTask::Steps => "Steps",
            DailyTask::Workout => "Workout",
        }
    );
    Ok(())
}

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn parse_days(spec: &str) -> Result<[bool; 7]> {
    if spec.eq_ignore_ascii_case("daily") {
        return Ok([true; 7]);
    }
    let mut days = [false; 7];
    for part in spec.split(',') {
        let part = part.trim().to_lowercase();
        let idx = DAY_NAMES
            .iter()
            .position(|d| d.eq_ignore_ascii_case(&part))
            .ok_or_else(|| Error::InvalidInput(format!("unknown day '{part}'")))?;
        days[idx] = true;
    }
    Ok(days)
}

fn cmd_med_add(store: &Store, name: &str, days_spec: &str) -> Result<()> {
    let days = parse_days(days_spec)?;
    let mut meds: Vec<Medication> = store.get(keys::MEDICATIONS);
    habits::add_medication(&mut meds, name, days)?;
    persist(store, keys::MEDICATIONS, &meds);
    println!("Added medication '{}'", name.trim());
    Ok(())
}

fn cmd_med_take(store: &Store, config: &Config, name: &str) -> Result<()> {
    let meds: Vec<Medication> = store.get(keys::MEDICATIONS);
    let med = habits::find_medication(&meds, name)
        .ok_or_else(|| Error::InvalidInput(format!("no medication named '{name}'")))?;

    let date = today();
    let mut tasks: BTreeMap<String, DailyTaskRecord> = store.get(keys::DAILY_TASKS);
    let mut record = habits::day_record(&tasks, date, &config.goals);
    habits::take_medication(&mut record, &med.id);
    let all_done = habits::meds_complete(&record, &meds, date);
    tasks.insert(day_key(date), record);
    persist(store, keys::DAILY_TASKS, &tasks);

    println!("Took {}", med.name);
    if all_done {
        println!("All medications taken for today.");
    }
    Ok(())
}

fn cmd_med_rm(store: &Store, name: &str) -> Result<()> {
    let mut meds: Vec<Medication> = store.get(keys::MEDICATIONS);
    if !habits::remove_medication(&mut meds, name) {
        return Err(Error::InvalidInput(format!("no medication named '{name}'")));
    }
    persist(store, keys::MEDICATIONS, &meds);
    println!("Removed '{name}'");
    Ok(())
}

fn cmd_med_list(store: &Store) -> Result<()> {
    let meds: Vec<Medication> = store.get(keys::MEDICATIONS);
    if meds.is_empty() {
        println!("No medications.");
        return Ok(());
    }
    for med in &meds {
        let schedule: Vec<&str> = med
            .days
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| DAY_NAMES[i])
            .collect();
        println!("  {} ({})", med.name, schedule.join(", "));
    }
    Ok(())
}

/// Parse one "--set" value: "Exercise=REPSxWEIGHT".
fn parse_set(spec: &str) -> Result<(String, SetEntry)> {
    let (exercise, rest) = spec
        .split_once('=')
        .ok_or_else(|| Error::InvalidInput(format!("bad set '{spec}' (want Exercise=REPSxWEIGHT)")))?;
    let (reps, weight) = rest
        .split_once(['x', 'X'])
        .ok_or_else(|| Error::InvalidInput(format!("bad set '{spec}' (want Exercise=REPSxWEIGHT)")))?;
    let exercise = exercise.trim();
    if exercise.is_empty() {
        return Err(Error::InvalidInput(format!("bad set '{spec}': empty exercise")));
    }
    Ok((
        exercise.to_string(),
        SetEntry::new(reps.trim(), weight.trim(), true),
    ))
}

fn cmd_workout_log(
    store: &Store,
    config: &Config,
    routine: &str,
    location: Option<String>,
    set_specs: &[String],
) -> Result<()> {
    let custom: BTreeMap<String, Vec<RoutineItem>> = store.get(keys::CUSTOM_WORKOUTS);
    let items = catalog::find_routine(routine, &custom)
        .ok_or_else(|| Error::InvalidInput(format!("unknown routine '{routine}'")))?;
    let exercises: Vec<String> = items
        .iter()
        .flat_map(|item| item.exercise_names())
        .map(|name| name.to_string())
        .collect();

    let mut sets: BTreeMap<String, Vec<SetEntry>> = BTreeMap::new();
    for spec in set_specs {
        let (exercise, set) = parse_set(spec)?;
        if !exercises.contains(&exercise) {
            return Err(Error::InvalidInput(format!(
                "'{exercise}' is not part of '{routine}'"
            )));
        }
        sets.entry(exercise).or_default().push(set);
    }

    let date = today();
    let mut workouts: Vec<WorkoutLog> = store.get(keys::WORKOUTS);
    let summary = finalize_workout(routine, date, location.clone(), exercises, sets, &workouts)?;

    let volume = summary.log.total_volume;
    history::prepend_log(&mut workouts, summary.log);
    persist(store, keys::WORKOUTS, &workouts);

    let mut locations: Vec<String> = store.get(keys::GYM_LOCATIONS);
    if history::learn_location(&mut locations, location.as_deref()) {
        persist(store, keys::GYM_LOCATIONS, &locations);
    }

    // Daily checklist credit.
    let mut tasks: BTreeMap<String, DailyTaskRecord> = store.get(keys::DAILY_TASKS);
    let mut record = habits::day_record(&tasks, date, &config.goals);
    if habits::mark_workout_done(&mut record) {
        tasks.insert(day_key(date), record);
        persist(store, keys::DAILY_TASKS, &tasks);
    }

    // 30-day challenge credit, once per day.
    let mut challenge_state: ChallengeState = store.get(keys::THIRTY_DAY_CHALLENGE);
    if challenge::mark_workout_completed(&mut challenge_state, date) {
        persist(store, keys::THIRTY_DAY_CHALLENGE, &challenge_state);
    }

    println!("Workout Logged!");
    print!("You lifted a total of {} lbs.", fmt_num(volume));
    match summary.comparison {
        Some(comparison) => println!(" {comparison}"),
        None => println!(),
    }
    if !summary.new_records.is_empty() {
        println!();
        println!("New Personal Records:");
        for record in &summary.new_records {
            println!("- {record}");
        }
    }
    Ok(())
}

fn cmd_workout_history(store: &Store) -> Result<()> {
    let workouts: Vec<WorkoutLog> = store.get(keys::WORKOUTS);
    if workouts.is_empty() {
        println!("No workouts logged yet.");
        return Ok(());
    }
    for workout in &workouts {
        let location = workout
            .location
            .as_deref()
            .map(|l| format!(" @ {l}"))
            .unwrap_or_default();
        println!(
            "  {}  {}{}  {} lbs  [{}]",
            workout.date,
            workout.name,
            location,
            fmt_num(workout.total_volume),
            workout.id
        );
    }
    Ok(())
}

fn cmd_workout_rm(store: &Store, id: Uuid) -> Result<()> {
    let mut workouts: Vec<WorkoutLog> = store.get(keys::WORKOUTS);
    if !history::remove_log(&mut workouts, id) {
        return Err(Error::InvalidInput(format!("no workout with id {id}")));
    }
    persist(store, keys::WORKOUTS, &workouts);
    println!("Removed workout {id}");
    Ok(())
}

fn cmd_workout_export(store: &Store, path: &std::path::Path) -> Result<()> {
    let workouts: Vec<WorkoutLog> = store.get(keys::WORKOUTS);
    let rows = export::export_history(&workouts, path)?;
    println!("Exported {} rows to {}", rows, path.display());
    Ok(())
}

fn cmd_template_save(store: &Store, name: &str, exercises: &[String]) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput(
            "template name cannot be empty".to_string(),
        ));
    }
    let items: Vec<RoutineItem> = exercises
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(RoutineItem::single)
        .collect();
    if items.is_empty() {
        return Err(Error::InvalidInput(
            "template needs at least one exercise".to_string(),
        ));
    }

    let mut custom: BTreeMap<String, Vec<RoutineItem>> = store.get(keys::CUSTOM_WORKOUTS);
    custom.insert(name.to_string(), items);
    persist(store, keys::CUSTOM_WORKOUTS, &custom);
    println!("Saved template '{name}'");
    Ok(())
}

fn cmd_weight_log(store: &Store, lbs: f64) -> Result<()> {
    if lbs <= 0.0 {
        return Err(Error::InvalidInput("weight must be positive".to_string()));
    }
    let mut weights: Vec<BodyWeightEntry> = store.get(keys::WEIGHT_DATA);
    history::add_weight_entry(&mut weights, today(), lbs);
    persist(store, keys::WEIGHT_DATA, &weights);
    println!("Logged {} lbs", fmt_num(lbs));
    Ok(())
}

fn cmd_weight_list(store: &Store) -> Result<()> {
    let weights: Vec<BodyWeightEntry> = store.get(keys::WEIGHT_DATA);
    if weights.is_empty() {
        println!("No weight entries.");
        return Ok(());
    }
    for entry in &weights {
        println!("  {}  {} lbs", entry.date, fmt_num(entry.weight));
    }
    Ok(())
}

fn status_mark(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Perfect => "■",
        DayStatus::Partial => "◧",
        DayStatus::None => "·",
    }
}

fn print_window(state: &ChallengeState, len: usize, tasks: &[TaskDef]) {
    let window = challenge::build_window(state, len, tasks);
    for chunk in window.chunks(10) {
        let row: Vec<&str> = chunk.iter().map(|d| status_mark(d.status)).collect();
        println!("  {}", row.join(" "));
    }
}

fn cmd_challenge_start(store: &Store) -> Result<()> {
    let mut state: ChallengeState = store.get(keys::THIRTY_DAY_CHALLENGE);
    challenge::start(&mut state, today());
    persist(store, keys::THIRTY_DAY_CHALLENGE, &state);
    println!("30-Day Challenge started. Today is Day 1.");
    Ok(())
}

fn cmd_challenge_status(store: &Store) -> Result<()> {
    let state: ChallengeState = store.get(keys::THIRTY_DAY_CHALLENGE);
    let Some(start) = state.start_date else {
        println!("Challenge not started. Run 'grit challenge start'.");
        return Ok(());
    };

    let user_score = challenge::window_score(&state, start, THIRTY_DAY_LEN, THIRTY_DAY_TASKS);
    let friend_name = state.friend.as_deref().unwrap_or("???");
    let friend_score = state
        .friend
        .as_deref()
        .and_then(directory::lookup)
        .map(|f| challenge::window_score(&f.challenge, start, THIRTY_DAY_LEN, THIRTY_DAY_TASKS))
        .unwrap_or(0);

    println!("30-Day Challenge · started {start}");
    println!("  You vs. {friend_name}");
    println!("  Your score:     {user_score}");
    println!("  Friend's score: {friend_score}");
    println!();
    let date = today();
    let day = state.days.get(&day_key(date)).cloned().unwrap_or_default();
    println!("Today's Tasks");
    for task in THIRTY_DAY_TASKS {
        println!(
            "  {} {} ({}pts)",
            checkbox(day.flag(task.key)),
            task.label,
            task.points
        );
    }
    println!();
    print_window(&state, THIRTY_DAY_LEN, THIRTY_DAY_TASKS);
    Ok(())
}

fn cmd_challenge_toggle(store: &Store, task: &str) -> Result<()> {
    let task = task.to_lowercase();
    if task == "workout" {
        return Err(Error::InvalidInput(
            "workout credit comes from logging a workout".to_string(),
        ));
    }
    let mut state: ChallengeState = store.get(keys::THIRTY_DAY_CHALLENGE);
    let now_on = challenge::toggle_task(&mut state, today(), &task, THIRTY_DAY_TASKS)?;
    persist(store, keys::THIRTY_DAY_CHALLENGE, &state);
    println!("{} {task}", checkbox(now_on));
    Ok(())
}

fn cmd_challenge_friend(store: &Store, username: &str) -> Result<()> {
    let mut state: ChallengeState = store.get(keys::THIRTY_DAY_CHALLENGE);
    if state.start_date.is_none() {
        return Err(Error::InvalidInput(
            "challenge has not been started".to_string(),
        ));
    }
    challenge::set_friend(&mut state, username)?;
    persist(store, keys::THIRTY_DAY_CHALLENGE, &state);
    match directory::lookup(username) {
        Some(friend) => println!("Now competing against {}.", friend.username),
        None => println!("No user '{username}' in the directory; they score 0."),
    }
    Ok(())
}

fn cmd_surge_start(store: &Store) -> Result<()> {
    let mut state: ChallengeState = store.get(keys::FORTY_DAY_SURGE);
    challenge::start(&mut state, today());
    persist(store, keys::FORTY_DAY_SURGE, &state);
    println!("40 Day Surge started. Today is Day 1.");
    Ok(())
}

fn cmd_surge_status(store: &Store) -> Result<()> {
    let state: ChallengeState = store.get(keys::FORTY_DAY_SURGE);
    let Some(start) = state.start_date else {
        println!("Surge not started. Run 'grit surge start'.");
        return Ok(());
    };

    let window = challenge::build_window(&state, FORTY_DAY_LEN, FORTY_DAY_TASKS);
    let complete = window
        .iter()
        .filter(|d| d.status == DayStatus::Perfect)
        .count();

    println!("40 Day Surge · started {start}");
    println!("  {complete} of {FORTY_DAY_LEN} days complete");
    println!();
    let date = today();
    let day = state.days.get(&day_key(date)).cloned().unwrap_or_default();
    println!("Today's Tasks");
    for task in FORTY_DAY_TASKS {
        println!("  {} {}", checkbox(day.flag(task.key)), task.label);
    }
    println!();
    print_window(&state, FORTY_DAY_LEN, FORTY_DAY_TASKS);
    Ok(())
}

fn cmd_surge_toggle(store: &Store, task: &str) -> Result<()> {
    let mut state: ChallengeState = store.get(keys::FORTY_DAY_SURGE);
    let now_on = challenge::toggle_task(&mut state, today(), &task.to_lowercase(), FORTY_DAY_TASKS)?;
    persist(store, keys::FORTY_DAY_SURGE, &state);
    println!("{} {task}", checkbox(now_on));
    Ok(())
}

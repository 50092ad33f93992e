//! Static friend directory for 30-day challenge comparisons.
//!
//! There is no backend; friends and their challenge data are a fixed
//! local roster. Lookups are read-only.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use crate::types::{ChallengeState, DayProgress};

/// A directory member and their recorded 30-day challenge run.
#[derive(Debug, Clone)]
pub struct DirectoryUser {
    pub username: &'static str,
    pub role: Option<&'static str>,
    pub specialty: Option<&'static str>,
    pub challenge: ChallengeState,
}

fn day(flags: &[&str]) -> DayProgress {
    let mut progress = DayProgress::default();
    for flag in flags {
        progress.set_flag(flag, true);
    }
    progress
}

fn challenge(start: (i32, u32, u32), days: Vec<(&str, DayProgress)>) -> ChallengeState {
    ChallengeState {
        start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2),
        friend: None,
        days: days
            .into_iter()
            .map(|(key, progress)| (key.to_string(), progress))
            .collect(),
    }
}

static USERS: Lazy<BTreeMap<&'static str, DirectoryUser>> = Lazy::new(|| {
    let mut users = BTreeMap::new();
    users.insert(
        "chris",
        DirectoryUser {
            username: "chris",
            role: None,
            specialty: None,
            challenge: challenge(
                (2025, 7, 10),
                vec![("2025-07-11", day(&["workout", "hydration", "steps"]))],
            ),
        },
    );
    users.insert(
        "alex",
        DirectoryUser {
            username: "alex",
            role: Some("coach"),
            specialty: Some("Strength & Conditioning"),
            challenge: challenge(
                (2025, 7, 9),
                vec![
                    ("2025-07-10", day(&["workout", "hydration"])),
                    ("2025-07-11", day(&["steps"])),
                ],
            ),
        },
    );
    users.insert(
        "sam",
        DirectoryUser {
            username: "sam",
            role: Some("coach"),
            specialty: Some("Nutrition & HIIT"),
            challenge: challenge((2025, 7, 11), vec![("2025-07-11", day(&["workout"]))]),
        },
    );
    users.insert(
        "jordan",
        DirectoryUser {
            username: "jordan",
            role: Some("client"),
            specialty: None,
            challenge: challenge((2025, 7, 8), vec![]),
        },
    );
    users
});

/// Case-insensitive lookup. An unknown username is simply absent and
/// compares as a zero-score opponent.
pub fn lookup(username: &str) -> Option<&'static DirectoryUser> {
    USERS.get(username.to_lowercase().as_str())
}

/// Usernames containing the query, case-insensitively.
pub fn search(query: &str) -> Vec<&'static str> {
    let query = query.to_lowercase();
    USERS
        .keys()
        .filter(|name| name.contains(&query))
        .copied()
        .collect()
}

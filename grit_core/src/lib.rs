#![forbid(unsafe_code)]

//! Core domain model and business logic for Grit, a personal fitness
//! and habit tracker.
//!
//! This crate provides:
//! - Domain types (workouts, sets, daily tasks, challenges)
//! - The built-in workout catalog
//! - Progress computation (best sets, personal records, volume)
//! - Daily habit state and streaks
//! - 30-day challenge and 40-day surge logic
//! - Keyed JSON persistence and CSV export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod engine;
pub mod history;
pub mod habits;
pub mod challenge;
pub mod directory;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{best_set, finalize_workout, total_volume, weight_comparison, WorkoutSummary};
pub use store::Store;

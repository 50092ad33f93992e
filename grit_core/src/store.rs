//! Keyed JSON persistence with file locking.
//!
//! Each key maps to one JSON file in the data directory. Reads degrade
//! to the type's default on missing or corrupt files; writes are
//! atomic via a temp file and rename.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// The persistence keys. One file per key.
pub mod keys {
    pub const WORKOUTS: &str = "workouts";
    pub const WEIGHT_DATA: &str = "weight_data";
    pub const CUSTOM_WORKOUTS: &str = "custom_workouts";
    pub const DAILY_TASKS: &str = "daily_tasks";
    pub const MEDICATIONS: &str = "medications";
    pub const GYM_LOCATIONS: &str = "gym_locations";
    pub const PROGRESS_PICS: &str = "progress_pics";
    pub const THIRTY_DAY_CHALLENGE: &str = "thirty_day_challenge";
    pub const FORTY_DAY_SURGE: &str = "forty_day_surge";
}

/// Handle on the data directory.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    /// Load the value stored under `key` with a shared lock.
    ///
    /// A missing, unreadable, or corrupt file yields the default with
    /// a warning; stored history must never brick the app.
    pub fn get<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.path_for(key);
        if !path.exists() {
            tracing::debug!(key, "no data file, using default");
            return T::default();
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(key, "unable to open {:?}: {}. Using default.", path, e);
                return T::default();
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(key, "unable to lock {:?}: {}. Using default.", path, e);
            return T::default();
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        let _ = file.unlock();
        if let Err(e) = read {
            tracing::warn!(key, "failed to read {:?}: {}. Using default.", path, e);
            return T::default();
        }

        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, "failed to parse {:?}: {}. Using default.", path, e);
                T::default()
            }
        }
    }

    /// Atomically replace the value stored under `key`:
    /// write to a temp file in the data directory, sync, then rename
    /// over the old file. Concurrent writers serialize on an exclusive
    /// lock.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        let temp = NamedTempFile::new_in(&self.data_dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(value)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(self.path_for(key)).map_err(|e| Error::Io(e.error))?;

        tracing::debug!(key, "saved");
        Ok(())
    }

    /// Load, modify, save. The usual pattern for every mutation.
    pub fn update<T, F>(&self, key: &str, f: F) -> Result<T>
    where
        T: DeserializeOwned + Default + Serialize,
        F: FnOnce(&mut T) -> Result<()>,
    {
        let mut value: T = self.get(key);
        f(&mut value)?;
        self.set(key, &value)?;
        Ok(value)
    }
}

use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::models::{Chore, TeamMember};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CHORUST_DATA_DIR";

const CHORES_FILE: &str = "chores.json";
const TEAM_FILE: &str = "team.json";

/// Whole-document JSON store for chores and team members.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Store { dir: dir.into() }
    }

    /// Opens the store in the configured data directory.
    ///
    /// The directory is determined in the following order:
    /// 1. `override_dir` (the `--data-dir` flag).
    /// 2. `CHORUST_DATA_DIR` environment variable.
    /// 3. `~/.local/share/chorust` (on Linux).
    /// 4. `./` (fallback).
    pub fn open(override_dir: Option<PathBuf>) -> Self {
        let dir = override_dir
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| {
                dirs::data_local_dir()
                    .map(|p| p.join("chorust"))
                    .unwrap_or_else(|| PathBuf::from("."))
            });
        debug!(dir = %dir.display(), "using data directory");
        Store::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn chores_path(&self) -> PathBuf {
        self.dir.join(CHORES_FILE)
    }

    fn team_path(&self) -> PathBuf {
        self.dir.join(TEAM_FILE)
    }

    /// Loads all chores. Missing or malformed data yields an empty list.
    pub fn load_chores(&self) -> Vec<Chore> {
        load_list(&self.chores_path())
    }

    /// Overwrites the chores document.
    pub fn save_chores(&self, chores: &[Chore]) -> Result<(), StorageError> {
        save_list(&self.chores_path(), chores)
    }

    /// Loads all team members. Missing or malformed data yields an empty list.
    pub fn load_members(&self) -> Vec<TeamMember> {
        load_list(&self.team_path())
    }

    pub fn save_members(&self, members: &[TeamMember]) -> Result<(), StorageError> {
        save_list(&self.team_path(), members)
    }

    /// Deletes the chores and team documents.
    pub fn reset(&self) -> Result<(), StorageError> {
        for path in [self.chores_path(), self.team_path()] {
            if path.exists() {
                fs::remove_file(&path).map_err(|source| StorageError::Io { path, source })?;
            }
        }
        Ok(())
    }
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot open document, treating as empty");
            return Vec::new();
        }
    };
    let mut s = String::new();
    if let Err(e) = f.read_to_string(&mut s) {
        warn!(path = %path.display(), error = %e, "cannot read document, treating as empty");
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "malformed document, treating as empty");
        Vec::new()
    })
}

fn save_list<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StorageError> {
    let io_err = |source: std::io::Error| StorageError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let s = serde_json::to_string_pretty(items)?;
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(io_err)?;
    f.write_all(s.as_bytes()).map_err(io_err)?;
    debug!(path = %path.display(), records = items.len(), "saved document");
    Ok(())
}

//! Session configuration
//!
//! Controls where `.db` files live and how an interactive session talks to
//! its user. Loaded from JSON or built from presets.

use crate::error::{DbError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of persisted tables.
pub const TABLE_FILE_EXTENSION: &str = "db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory that `load` reads from and `store` writes to.
    pub data_dir: PathBuf,

    /// Write `> ` / `...` prompts while reading statements.
    pub prompt: bool,

    /// Print the startup banner before the first prompt.
    pub echo_banner: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            prompt: true,
            echo_banner: true,
        }
    }
}

impl SessionConfig {
    /// Non-interactive preset: no prompts, no banner.
    pub fn batch() -> Self {
        Self {
            prompt: false,
            echo_banner: false,
            ..Default::default()
        }
    }

    /// Batch preset rooted at `dir`, used by tests.
    pub fn for_testing<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
            ..Self::batch()
        }
    }

    pub fn with_data_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            DbError::MalformedData(format!("config {}: {}", path.display(), e))
        })
    }

    /// Path of the file backing table `name`.
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", name, TABLE_FILE_EXTENSION))
    }
}

//! Core configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | TALLY_WORK_DIR | ./data | Directory holding the database and logs |
//! | TALLY_LOG_LEVEL | info | tracing filter (e.g. `debug`, `tally_core=debug`) |

use std::path::{Path, PathBuf};

/// Runtime configuration for an embedding shell
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the database file and log output
    pub work_dir: String,
    /// tracing filter directive
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("TALLY_WORK_DIR").unwrap_or_else(|_| "./data".into()),
            log_level: std::env::var("TALLY_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Path of the billing database inside the work directory
    pub fn db_path(&self) -> PathBuf {
        Path::new(&self.work_dir).join("billing.redb")
    }

    /// Path of the log directory inside the work directory
    pub fn log_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("logs")
    }
}

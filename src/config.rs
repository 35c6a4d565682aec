// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

use crate::sanitizer::Strategy;

pub const DEFAULT_EXTENSION: &str = "html";

#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    /// Directory for rolling log files. File logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub strategy: Strategy,
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rust_log: "info".to_string(),
            log_dir: None,
            strategy: Strategy::default(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("ANCHOR_SCRUB_LOG_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        // The subscriber is not up yet, so a bad value is reported after init.
        let strategy = env::var("ANCHOR_SCRUB_STRATEGY")
            .ok()
            .and_then(|value| value.parse::<Strategy>().ok())
            .unwrap_or_default();

        let extensions = env::var("ANCHOR_SCRUB_EXTENSIONS")
            .map(|raw| parse_extensions(&raw))
            .ok()
            .filter(|exts| !exts.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_EXTENSION.to_string()]);

        Self {
            rust_log,
            log_dir,
            strategy,
            extensions,
        }
    }

    /// Returns the raw strategy value from the environment if it does not name
    /// a known strategy.
    pub fn rejected_strategy() -> Option<String> {
        env::var("ANCHOR_SCRUB_STRATEGY")
            .ok()
            .filter(|value| value.parse::<Strategy>().is_err())
    }
}

/// Splits a comma-separated extension list, dropping leading dots and blanks.
pub fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

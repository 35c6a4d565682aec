// src/batch.rs

//! File-batch driver: finds HTML files, cleans each one independently and
//! accumulates a [`Summary`].
//!
//! A failure on one file is logged and counted; the batch moves on.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::config::DEFAULT_EXTENSION;
use crate::error::ScrubError;
use crate::models::report::{FileOutcome, Summary};
use crate::sanitizer::{Strategy, script};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub strategy: Strategy,
    /// Compute outcomes without writing anything back.
    pub dry_run: bool,
    /// Also sanitize script content. When off, only empty anchors are removed.
    pub sanitize_scripts: bool,
    /// Lowercase extensions (no dot) of files picked up in directories.
    pub extensions: Vec<String>,
    /// Log every processed file at `info` instead of `debug`.
    pub verbose: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            dry_run: false,
            sanitize_scripts: true,
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            verbose: false,
        }
    }
}

/// Cleans `target`, a single file or a directory searched recursively.
///
/// Returns `ScrubError::InvalidPath` if `target` is neither. Per-file errors
/// never abort the run; they show up in `Summary::errors`.
pub fn run(target: &Path, options: &BatchOptions) -> Result<Summary, ScrubError> {
    let mut summary = Summary::new(options.strategy, options.dry_run);

    if target.is_file() {
        process_into(&mut summary, target, options);
    } else if target.is_dir() {
        debug!("Searching for HTML files in {}", target.display());
        let files = collect_files(target, &options.extensions, &mut summary);
        debug!("Found {} HTML files", files.len());

        for file in &files {
            process_into(&mut summary, file, options);
        }
    } else {
        return Err(ScrubError::InvalidPath(target.to_path_buf()));
    }

    Ok(summary)
}

/// Lists regular files under `root` whose extension is in `extensions`,
/// sorted by path. Symbolic links are followed, so a linked file or
/// directory is picked up like a real one. Unreadable entries and link
/// loops are logged and counted as errors.
pub fn collect_files(root: &Path, extensions: &[String], summary: &mut Summary) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("{}", ScrubError::from(e));
                summary.record_walk_error();
                continue;
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    files
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

fn process_into(summary: &mut Summary, path: &Path, options: &BatchOptions) {
    match process_file(path, options) {
        Ok(outcome) => summary.record(outcome),
        Err(e) => {
            error!("Error cleaning {}: {}", path.display(), e);
            summary.record_error();
        }
    }
}

/// Reads, cleans and (unless dry-running) rewrites a single file.
///
/// The file is only written when the cleaned text differs from the original.
pub fn process_file(path: &Path, options: &BatchOptions) -> Result<FileOutcome, ScrubError> {
    if options.verbose {
        info!("Processing file: {}", path.display());
    } else {
        debug!("Processing file: {}", path.display());
    }

    let content = fs::read_to_string(path).map_err(|e| ScrubError::io(path, e))?;

    let sanitizer = options.strategy.sanitizer();
    let (cleaned, removed, scripts) = if options.sanitize_scripts {
        let cleaned = sanitizer.clean(&content);
        let scripts = script::count_script_blocks(&cleaned.text);
        (cleaned.text, cleaned.removed, scripts)
    } else {
        let (text, removed) = sanitizer.remove_empty_anchors(&content);
        (text, removed, 0)
    };

    let modified = cleaned != content;
    if modified {
        if options.dry_run {
            info!("[DRY RUN] Would fix {}: {} empty anchor tags", path.display(), removed);
        } else {
            fs::write(path, &cleaned).map_err(|e| ScrubError::io(path, e))?;
            info!("Fixed {}: removed {} empty anchor tags", path.display(), removed);
        }
    } else {
        debug!("No changes needed for {}", path.display());
    }

    Ok(FileOutcome {
        path: path.to_path_buf(),
        removed,
        scripts,
        modified,
    })
}

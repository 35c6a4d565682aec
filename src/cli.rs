// src/cli.rs

use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser};

use crate::batch::BatchOptions;
use crate::config::{Config, parse_extensions};
use crate::sanitizer::Strategy;

/// Remove empty anchor tags (e.g. `<a id="" href="#"></a>`) from generated
/// HTML and sanitize the content of script blocks.
#[derive(Debug, Parser)]
#[command(name = "anchor-scrub", version)]
#[command(group(ArgGroup::new("target").required(true).args(["path", "dir"])))]
pub struct Args {
    /// Path to an HTML file or a directory containing HTML files
    pub path: Option<PathBuf>,

    /// Directory containing HTML files to clean
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Show what would be fixed without making changes
    #[arg(short, long)]
    pub dry_run: bool,

    /// Anchor removal strategy [default: structural, or ANCHOR_SCRUB_STRATEGY]
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Only remove empty anchors; leave script content untouched
    #[arg(long)]
    pub anchors_only: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// File extension to pick up in directories (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,
}

impl Args {
    /// The file or directory to clean, whichever form was given.
    pub fn target(&self) -> Option<&Path> {
        self.path.as_deref().or(self.dir.as_deref())
    }

    /// Merges flags over environment configuration.
    pub fn batch_options(&self, config: &Config) -> BatchOptions {
        let extensions = parse_extensions(&self.extensions.join(","));

        BatchOptions {
            strategy: self.strategy.unwrap_or(config.strategy),
            dry_run: self.dry_run,
            sanitize_scripts: !self.anchors_only,
            verbose: self.verbose,
            extensions: if extensions.is_empty() {
                config.extensions.clone()
            } else {
                extensions
            },
        }
    }
}

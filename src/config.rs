/*!
 * Configuration handling for digestfs
 */

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::error::{DigestError, Result};
use crate::ignore::{IgnoreRules, DEFAULT_IGNORE};

/// Command-line arguments for digestfs
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "digestfs",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a plain-text digest of directory contents for LLM context",
    long_about = "Walks a directory tree and writes a single text file containing a summary, a visual tree and the redacted contents of every included file, designed for providing context to Large Language Models (LLMs)."
)]
pub struct Args {
    /// Target directory to process
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output file name, written inside the target directory
    #[clap(long, default_value = "context.txt")]
    pub output_file: String,

    /// Comma-separated list of extra patterns to ignore
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Number of extensions listed individually in the summary (0 = no limit)
    #[clap(long, default_value = "10")]
    pub top_extensions: usize,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Target directory to process (canonicalized when it exists)
    pub target_dir: PathBuf,

    /// Output file name
    pub output_file: PathBuf,

    /// Extra ignore patterns appended to the default battery
    pub ignore_patterns: Vec<String>,

    /// Extension breakdown cutoff (0 = no limit)
    pub top_extensions: usize,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let raw = PathBuf::from(args.directory_path);
        Self {
            target_dir: fs::canonicalize(&raw).unwrap_or(raw),
            output_file: PathBuf::from(args.output_file),
            ignore_patterns: args.ignore_patterns,
            top_extensions: args.top_extensions,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.is_dir() {
            return Err(DigestError::NotADirectory(self.target_dir.clone()));
        }
        Ok(())
    }

    /// Absolute path of the digest artifact
    pub fn output_path(&self) -> PathBuf {
        self.target_dir.join(&self.output_file)
    }

    /// Build the effective exclusion rule set for this run
    ///
    /// Defaults plus user patterns plus the output file name, so a previous
    /// artifact is never ingested into a new one. The running executable is
    /// excluded by resolved identity in case it lives inside the target.
    pub fn ignore_rules(&self) -> IgnoreRules {
        let mut rules: Vec<String> = DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect();
        rules.extend(self.ignore_patterns.iter().cloned());
        if let Some(name) = self.output_file.file_name() {
            rules.push(name.to_string_lossy().into_owned());
        }
        let self_path = env::current_exe()
            .ok()
            .and_then(|exe| fs::canonicalize(exe).ok());
        IgnoreRules::new(rules, self_path)
    }
}

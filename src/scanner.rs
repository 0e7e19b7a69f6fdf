/*!
 * Directory traversal and tree construction
 */

use std::fs;
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::config::Config;
use crate::error::Result;
use crate::ignore::IgnoreRules;
use crate::types::{FileSystemNode, NodeKind, ScanStats};

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Exclusion rules for this run
    rules: IgnoreRules,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        let rules = config.ignore_rules();
        Self {
            config,
            rules,
            progress,
        }
    }

    /// Scan the target directory and return the tree with aggregate counts
    ///
    /// The root node is always kept, even when every entry below it was
    /// excluded.
    pub fn scan(&self) -> Result<(FileSystemNode, ScanStats)> {
        let abs_path = fs::canonicalize(&self.config.target_dir)?;
        let dir_name = abs_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let mut stats = ScanStats::default();
        let mut root = FileSystemNode::new(
            abs_path.clone(),
            format!("{dir_name}/"),
            NodeKind::Directory,
            0,
        );
        root.children = self.scan_directory(&abs_path, 1, &mut stats);
        Ok((root, stats))
    }

    /// Build the child nodes of one directory, bottom-up
    ///
    /// Entries are visited sorted case-insensitively by name. A subdirectory
    /// is attached only if at least one of its own children survived the
    /// exclusion rules; a directory whose listing fails is treated as empty.
    fn scan_directory(
        &self,
        dir: &Path,
        depth: usize,
        stats: &mut ScanStats,
    ) -> Vec<FileSystemNode> {
        let mut entries: Vec<fs::DirEntry> = match fs::read_dir(dir) {
            Ok(entries) => entries.filter_map(|entry| entry.ok()).collect(),
            Err(_) => return Vec::new(),
        };
        entries.sort_by_key(|entry| entry.file_name().to_string_lossy().to_lowercase());

        let mut children = Vec::new();
        for entry in entries {
            let path = entry.path();
            if self.rules.should_ignore(&path) {
                continue;
            }
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(_) => continue,
            };
            let name = entry.file_name().to_string_lossy().into_owned();

            if file_type.is_symlink() {
                self.advance(&name);
                let display = match fs::read_link(&path) {
                    Ok(target) => format!("{name} -> {}", target.display()),
                    Err(_) => name,
                };
                children.push(FileSystemNode::new(path, display, NodeKind::Symlink, depth));
                stats.files += 1;
            } else if file_type.is_dir() {
                let grandchildren = self.scan_directory(&path, depth + 1, stats);
                if !grandchildren.is_empty() {
                    let mut node =
                        FileSystemNode::new(path, format!("{name}/"), NodeKind::Directory, depth);
                    node.children = grandchildren;
                    children.push(node);
                }
            } else if file_type.is_file() {
                self.advance(&name);
                if let Ok(metadata) = entry.metadata() {
                    stats.total_size += metadata.len();
                }
                stats.files += 1;
                children.push(FileSystemNode::new(path, name, NodeKind::File, depth));
            }
        }
        children
    }

    /// Advance the progress bar, showing the entry being recorded
    fn advance(&self, file_name: &str) {
        self.progress.inc(1);
        // Truncate long names to keep the bar on one line
        let display_name = if file_name.len() > 40 {
            let cut = file_name
                .char_indices()
                .rev()
                .nth(36)
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            format!("...{}", &file_name[cut..])
        } else {
            file_name.to_string()
        };
        self.progress
            .set_message(format!("Current file: {display_name}"));
    }
}

/*!
 * Core types and data structures for the digestfs application
 */

use std::path::PathBuf;

/// Represents different types of filesystem entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular file
    File,
    /// Directory containing other entries
    Directory,
    /// Symbolic link (never followed)
    Symlink,
}

/// One filesystem entry discovered during traversal
///
/// Directory names carry a trailing `/` and symlink names are annotated with
/// their resolved target, so the display name is ready for tree rendering.
#[derive(Debug, Clone)]
pub struct FileSystemNode {
    /// Absolute path of the entry
    pub path: PathBuf,
    /// Display name
    pub name: String,
    /// Entry kind
    pub kind: NodeKind,
    /// Depth from the scan root (root is 0)
    pub depth: usize,
    /// Ordered children (non-empty only for directories)
    pub children: Vec<FileSystemNode>,
}

impl FileSystemNode {
    pub fn new(path: PathBuf, name: String, kind: NodeKind, depth: usize) -> Self {
        Self {
            path,
            name,
            kind,
            depth,
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }
}

/// Aggregate counts accumulated while building the tree
///
/// Symlinks count as files but contribute no size; directories contribute
/// neither.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanStats {
    /// Number of file and symlink nodes kept in the tree
    pub files: usize,
    /// Total size in bytes of the kept files
    pub total_size: u64,
}

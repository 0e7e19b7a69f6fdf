/*!
 * Digest rendering: display ordering, tree drawing, content gathering,
 * extension breakdown and summary assembly
 */

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::config::Config;
use crate::content::{self, FileContent};
use crate::redact::SecretRedactor;
use crate::types::{FileSystemNode, NodeKind, ScanStats};
use crate::utils::format_count;

/// 48-column rule bounding headers in the artifact
pub const SEPARATOR: &str = "================================================";

/// The three text sections of a digest artifact, plus statistics derived
/// while rendering them
#[derive(Debug, Clone)]
pub struct Digest {
    /// Summary block: counts and extension breakdown
    pub summary: String,
    /// Rendered ASCII tree block
    pub tree: String,
    /// Concatenated per-file content blocks
    pub contents: String,
    /// Token estimate for the content section
    pub estimated_tokens: usize,
    /// Extension breakdown in artifact order
    pub extensions: Vec<(String, ExtensionStats)>,
}

/// Per-extension aggregate used by the breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtensionStats {
    /// Number of files with this extension
    pub files: usize,
    /// Sum of their line counts
    pub lines: usize,
}

/// Renders a scanned tree into the digest sections
pub struct DigestRenderer {
    config: Config,
    redactor: SecretRedactor,
}

impl DigestRenderer {
    /// Create a renderer with the built-in secret battery
    pub fn new(config: Config) -> Self {
        Self {
            config,
            redactor: SecretRedactor::new(),
        }
    }

    /// Create a renderer with a custom redactor
    pub fn with_redactor(config: Config, redactor: SecretRedactor) -> Self {
        Self { config, redactor }
    }

    /// Render the digest for a scanned tree
    ///
    /// Applies the display sort pass to the tree first; the token estimate is
    /// derived from the content section only.
    pub fn render(&self, root: &mut FileSystemNode, stats: &ScanStats) -> Digest {
        sort_children(root);
        let tree_body = render_tree(root);
        let contents = self.gather_contents(root);
        let breakdown = extension_breakdown(root);
        let extensions = sorted_extension_breakdown(&breakdown, self.config.top_extensions);
        let breakdown_lines = format_extension_breakdown(&extensions);
        let estimated_tokens = contents.chars().count() / 4;
        let summary = build_summary(root, stats, estimated_tokens, &breakdown_lines);
        let tree = format!("Tree\n{}\n", tree_body.trim_end());
        Digest {
            summary,
            tree,
            contents,
            estimated_tokens,
            extensions,
        }
    }

    /// Concatenate the per-file content blocks, depth-first
    ///
    /// Symlink nodes contribute nothing; their targets are never read.
    fn gather_contents(&self, node: &FileSystemNode) -> String {
        match node.kind {
            NodeKind::File => {
                let header = format!("{SEPARATOR}\nFILE: {}\n{SEPARATOR}\n", node.path.display());
                let body = match content::extract(&node.path, &self.redactor) {
                    FileContent::Text(text) | FileContent::Notebook(text) => text,
                    FileContent::Binary => "[Binary file]".to_string(),
                    FileContent::Unreadable => "[Error reading file]".to_string(),
                };
                format!("{header}{body}\n\n")
            }
            NodeKind::Directory => node
                .children
                .iter()
                .map(|child| self.gather_contents(child))
                .collect(),
            NodeKind::Symlink => String::new(),
        }
    }
}

/// Order children for display, recursively
///
/// Within each directory: readme files first, then other files, then
/// subdirectories, then symlinks, each group alphabetically by lower-cased
/// display name.
pub fn sort_children(node: &mut FileSystemNode) {
    if node.kind != NodeKind::Directory {
        return;
    }
    node.children.sort_by_cached_key(|child| {
        let name = child.name.to_lowercase();
        let group = match child.kind {
            NodeKind::File if name.starts_with("readme") => 0u8,
            NodeKind::File => 1,
            NodeKind::Directory => 2,
            NodeKind::Symlink => 3,
        };
        (group, name)
    });
    for child in &mut node.children {
        sort_children(child);
    }
}

/// Render the connector-prefixed ASCII tree for a node
pub fn render_tree(node: &FileSystemNode) -> String {
    let mut out = String::new();
    render_node(node, "", true, &mut out);
    out
}

fn render_node(node: &FileSystemNode, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└── " } else { "├── " };
    out.push_str(prefix);
    out.push_str(connector);
    out.push_str(&node.name);
    out.push('\n');
    if node.kind == NodeKind::Directory && !node.children.is_empty() {
        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let last = node.children.len() - 1;
        for (index, child) in node.children.iter().enumerate() {
            render_node(child, &child_prefix, index == last, out);
        }
    }
}

/// Count files and lines per normalized extension across the whole tree
pub fn extension_breakdown(node: &FileSystemNode) -> HashMap<String, ExtensionStats> {
    let mut breakdown = HashMap::new();
    collect_extensions(node, &mut breakdown);
    breakdown
}

fn collect_extensions(node: &FileSystemNode, breakdown: &mut HashMap<String, ExtensionStats>) {
    match node.kind {
        NodeKind::File => {
            let entry = breakdown.entry(extension_key(&node.path)).or_default();
            entry.files += 1;
            if let Ok(lines) = count_lines(&node.path) {
                entry.lines += lines;
            }
        }
        NodeKind::Directory => {
            for child in &node.children {
                collect_extensions(child, breakdown);
            }
        }
        NodeKind::Symlink => {}
    }
}

/// Normalized extension key: lower-cased suffix with leading dot, or a
/// sentinel for extensionless names
fn extension_key(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy().to_lowercase()),
        _ => "[no ext]".to_string(),
    }
}

/// Number of newline-delimited lines in a file
///
/// A trailing fragment without a newline counts as one line.
fn count_lines(path: &Path) -> io::Result<usize> {
    let bytes = fs::read(path)?;
    let mut lines = bytes.iter().filter(|&&byte| byte == b'\n').count();
    if bytes.last().map_or(false, |&byte| byte != b'\n') {
        lines += 1;
    }
    Ok(lines)
}

/// Order breakdown entries by line count descending
///
/// Ties break ascending by extension name so the cutoff is deterministic.
/// With more than `top` distinct extensions the remainder collapses into one
/// `Other` bucket; `top == 0` disables the cutoff.
pub fn sorted_extension_breakdown(
    breakdown: &HashMap<String, ExtensionStats>,
    top: usize,
) -> Vec<(String, ExtensionStats)> {
    let mut items: Vec<(String, ExtensionStats)> = breakdown
        .iter()
        .map(|(ext, stats)| (ext.clone(), *stats))
        .collect();
    items.sort_by(|a, b| b.1.lines.cmp(&a.1.lines).then_with(|| a.0.cmp(&b.0)));

    if top > 0 && items.len() > top {
        let rest = items.split_off(top);
        let other = rest
            .iter()
            .fold(ExtensionStats::default(), |mut acc, (_, stats)| {
                acc.files += stats.files;
                acc.lines += stats.lines;
                acc
            });
        if other.files > 0 {
            items.push(("Other".to_string(), other));
        }
    }

    items
}

/// Format ordered breakdown entries as summary lines
pub fn format_extension_breakdown(items: &[(String, ExtensionStats)]) -> Vec<String> {
    items
        .iter()
        .map(|(ext, stats)| {
            let files = pluralize(stats.files, "file");
            let lines = pluralize(stats.lines, "line");
            format!("  {ext}: {files} ({lines})")
        })
        .collect()
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {noun}", format_count(count))
    } else {
        format!("{} {noun}s", format_count(count))
    }
}

fn build_summary(
    root: &FileSystemNode,
    stats: &ScanStats,
    estimated_tokens: usize,
    breakdown_lines: &[String],
) -> String {
    let dir_name = root
        .path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let mut lines: Vec<String> = vec![
        SEPARATOR.to_string(),
        "Summary".to_string(),
        SEPARATOR.to_string(),
        format!("Directory : {dir_name}"),
        format!("Files analyzed : {}", stats.files),
        format!("Estimated tokens : {}", format_count(estimated_tokens)),
        String::new(),
        "Files".to_string(),
    ];
    lines.extend(breakdown_lines.iter().cloned());
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn file(name: &str) -> FileSystemNode {
        FileSystemNode::new(
            PathBuf::from(format!("/tmp/project/{name}")),
            name.to_string(),
            NodeKind::File,
            1,
        )
    }

    fn dir(name: &str, children: Vec<FileSystemNode>) -> FileSystemNode {
        let mut node = FileSystemNode::new(
            PathBuf::from(format!("/tmp/project/{name}")),
            format!("{name}/"),
            NodeKind::Directory,
            1,
        );
        node.children = children;
        node
    }

    #[test]
    fn test_sort_pass_orders_readme_files_dirs() {
        let mut root = FileSystemNode::new(
            PathBuf::from("/tmp/project"),
            "project/".to_string(),
            NodeKind::Directory,
            0,
        );
        root.children = vec![
            file("zeta.py"),
            dir("sub", vec![file("inner.rs")]),
            file("alpha.py"),
            file("readme.md"),
        ];
        sort_children(&mut root);

        let order: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["readme.md", "alpha.py", "zeta.py", "sub/"]);
    }

    #[test]
    fn test_sort_pass_is_case_insensitive() {
        let mut root = dir("project", vec![file("Beta.py"), file("alpha.py")]);
        sort_children(&mut root);
        let order: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["alpha.py", "Beta.py"]);
    }

    #[test]
    fn test_tree_rendering_connectors() {
        let root = dir(
            "project",
            vec![
                file("readme.md"),
                dir("src", vec![file("lib.rs"), file("main.rs")]),
            ],
        );
        let rendered = render_tree(&root);
        assert_eq!(
            rendered,
            "└── project/\n\
             \u{20}   ├── readme.md\n\
             \u{20}   └── src/\n\
             \u{20}       ├── lib.rs\n\
             \u{20}       └── main.rs\n"
        );
    }

    #[test]
    fn test_tree_rendering_continuation_bars() {
        let root = dir(
            "project",
            vec![dir("a", vec![file("one.txt")]), dir("b", vec![file("two.txt")])],
        );
        let rendered = render_tree(&root);
        assert!(rendered.contains("    ├── a/"));
        assert!(rendered.contains("    │   └── one.txt"));
        assert!(rendered.contains("    └── b/"));
        assert!(rendered.contains("        └── two.txt"));
    }

    #[test]
    fn test_extension_key_normalization() {
        assert_eq!(extension_key(Path::new("/p/Main.PY")), ".py");
        assert_eq!(extension_key(Path::new("/p/archive.tar.gz")), ".gz");
        assert_eq!(extension_key(Path::new("/p/Makefile")), "[no ext]");
        assert_eq!(extension_key(Path::new("/p/.bashrc")), "[no ext]");
    }

    #[test]
    fn test_count_lines_trailing_fragment() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sample.txt");

        fs::write(&path, "one\ntwo\nthree")?;
        assert_eq!(count_lines(&path)?, 3);

        fs::write(&path, "one\ntwo\n")?;
        assert_eq!(count_lines(&path)?, 2);

        fs::write(&path, "")?;
        assert_eq!(count_lines(&path)?, 0);
        Ok(())
    }

    #[test]
    fn test_breakdown_formatting_and_other_bucket() {
        let mut breakdown = HashMap::new();
        breakdown.insert(".py".to_string(), ExtensionStats { files: 2, lines: 1200 });
        breakdown.insert(".rs".to_string(), ExtensionStats { files: 1, lines: 300 });
        breakdown.insert(".md".to_string(), ExtensionStats { files: 1, lines: 80 });
        breakdown.insert("[no ext]".to_string(), ExtensionStats { files: 3, lines: 10 });

        let lines = format_extension_breakdown(&sorted_extension_breakdown(&breakdown, 2));
        assert_eq!(
            lines,
            vec![
                "  .py: 2 files (1,200 lines)",
                "  .rs: 1 file (300 lines)",
                "  Other: 4 files (90 lines)",
            ]
        );
    }

    #[test]
    fn test_breakdown_ties_break_by_extension_name() {
        let mut breakdown = HashMap::new();
        breakdown.insert(".toml".to_string(), ExtensionStats { files: 1, lines: 50 });
        breakdown.insert(".json".to_string(), ExtensionStats { files: 1, lines: 50 });
        breakdown.insert(".yaml".to_string(), ExtensionStats { files: 1, lines: 50 });

        let lines = format_extension_breakdown(&sorted_extension_breakdown(&breakdown, 0));
        assert_eq!(
            lines,
            vec![
                "  .json: 1 file (50 lines)",
                "  .toml: 1 file (50 lines)",
                "  .yaml: 1 file (50 lines)",
            ]
        );
    }

    #[test]
    fn test_empty_breakdown_formats_to_nothing() {
        assert!(sorted_extension_breakdown(&HashMap::new(), 10).is_empty());
    }
}

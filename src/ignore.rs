/*!
 * Name-based exclusion rules for directory traversal
 */

use std::fs;
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use once_cell::sync::Lazy;

/// Default patterns to ignore
pub static DEFAULT_IGNORE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Python
        "*.pyc",
        "*.pyo",
        "*.pyd",
        "__pycache__",
        ".pytest_cache",
        ".ipynb_checkpoints",
        ".coverage",
        ".mypy_cache",
        ".ruff_cache",
        ".tox",
        ".nox",
        "poetry.lock",
        "Pipfile.lock",
        "*.egg-info",
        "*.egg",
        "*.whl",
        "venv",
        ".venv",
        "env",
        "virtualenv",
        "site-packages",
        // JavaScript/TypeScript
        "node_modules",
        "bower_components",
        "package-lock.json",
        "yarn.lock",
        ".npm",
        ".yarn",
        ".pnpm-store",
        "bun.lock",
        "bun.lockb",
        ".docusaurus",
        ".next",
        ".nuxt",
        "*.min.js",
        "*.min.css",
        "*.map",
        // JVM
        "*.class",
        "*.jar",
        "*.war",
        "*.ear",
        "*.nar",
        // Native & .NET
        "*.o",
        "*.obj",
        "*.dll",
        "*.dylib",
        "*.exe",
        "*.lib",
        "*.out",
        "*.a",
        "*.pdb",
        "*.so",
        "obj",
        "*.suo",
        "*.user",
        "*.userosscache",
        "*.sln.docstates",
        "*.nupkg",
        // Go
        "pkg",
        // Rust
        "Cargo.lock",
        "*.rs.bk",
        // Ruby
        "*.gem",
        ".bundle",
        // Swift & Xcode
        ".build",
        "*.xcodeproj",
        "*.xcworkspace",
        "*.pbxuser",
        "*.mode1v3",
        "*.mode2v3",
        "*.perspectivev3",
        "*.xcuserstate",
        "xcuserdata",
        ".swiftpm",
        // Build & Dist
        "build",
        "dist",
        "out",
        "target",
        "vendor",
        "bin",
        // Version Control
        ".git",
        ".svn",
        ".hg",
        ".gitignore",
        ".gitattributes",
        ".gitmodules",
        // IDEs & Editors
        ".idea",
        ".vscode",
        ".vs",
        ".project",
        "*.swo",
        "*.swn",
        "*.sublime-*",
        // Environment & Credentials
        ".env",
        ".env.*",
        "credentials.json",
        "aws_credentials",
        "id_rsa",
        "*.pem",
        "*.key",
        // Media & Docs
        "*.svg",
        "*.png",
        "*.jpg",
        "*.jpeg",
        "*.gif",
        "*.ico",
        "*.pdf",
        "*.mov",
        "*.mp4",
        "*.mp3",
        "*.wav",
        "*.csv",
        "*.xlsx",
        "*.xlsm",
        "*.xlsb",
        "*.xltx",
        "*.xltm",
        "*.xlam",
        // Caches & Temp
        "*.log",
        "*.bak",
        "*.swp",
        "*.tmp",
        "*.temp",
        ".cache",
        ".sass-cache",
        ".eslintcache",
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        // Databases & State
        "*.db",
        "*.sqlite",
        "*.sqlite3",
        "*.tfstate*",
        // Archives & Prior Artifacts
        "*.zip",
        "digest.txt",
        "context.txt",
    ]
});

/// Name-based exclusion rules applied to every entry during traversal
///
/// Rules match the basename only. A rule containing any of the wildcard
/// metacharacters `*?[]` is evaluated as a glob; anything else requires exact
/// equality. Ancestors never influence the decision.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    rules: Vec<String>,
    self_path: Option<PathBuf>,
}

impl IgnoreRules {
    /// Build a rule set from a list of patterns
    ///
    /// Trailing `/` on directory-style rules is stripped; empty rules are
    /// dropped. `self_path` is the resolved path of the running executable,
    /// excluded by identity rather than by name.
    pub fn new(rules: Vec<String>, self_path: Option<PathBuf>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| rule.trim_end_matches('/').to_string())
            .filter(|rule| !rule.is_empty())
            .collect();
        Self { rules, self_path }
    }

    /// Check if a path should be excluded from traversal
    pub fn should_ignore(&self, path: &Path) -> bool {
        if let Some(own) = &self.self_path {
            if fs::canonicalize(path).map_or(false, |resolved| resolved == *own) {
                return true;
            }
        }

        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };

        self.rules.iter().any(|rule| {
            if rule.contains(['*', '?', '[', ']']) {
                glob_match(rule, &name)
            } else {
                name == rule.as_str()
            }
        })
    }
}

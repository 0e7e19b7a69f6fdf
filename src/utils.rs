/*!
 * Utility functions for digestfs
 */

use std::path::Path;

use walkdir::WalkDir;

use crate::ignore::IgnoreRules;

/// Count ingestible files for progress tracking
///
/// Walks with the same exclusion rules as the scanner, pruning ignored
/// directories, so the count matches the number of file and symlink nodes
/// the scan will record.
pub fn count_files(dir: &Path, rules: &IgnoreRules) -> u64 {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !rules.should_ignore(entry.path()))
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let file_type = entry.file_type();
            file_type.is_file() || file_type.is_symlink()
        })
        .count() as u64
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Format a count with thousands separators
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::ignore::DEFAULT_IGNORE;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_count_files_honors_rules_and_prunes() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.py"), "print(1)\n")?;
        fs::write(dir.path().join("b.pyc"), "ignored")?;
        fs::create_dir(dir.path().join("node_modules"))?;
        fs::write(dir.path().join("node_modules").join("index.js"), "x")?;

        let rules = IgnoreRules::new(
            DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect(),
            None,
        );
        assert_eq!(count_files(dir.path(), &rules), 1);
        Ok(())
    }
}

/*!
 * digestfs - Generate a plain-text digest of directory contents for LLM context
 *
 * This library turns a directory tree into one text artifact: a summary,
 * an ASCII tree and the redacted contents of every analyzed file.
 */

pub mod config;
pub mod content;
pub mod error;
pub mod ignore;
pub mod redact;
pub mod render;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::{Args, Config};
pub use content::FileContent;
pub use error::{DigestError, Result};
pub use ignore::IgnoreRules;
pub use redact::SecretRedactor;
pub use render::{Digest, DigestRenderer, ExtensionStats};
pub use report::{ReportFormat, Reporter, ScanReport};
pub use scanner::Scanner;
pub use types::{FileSystemNode, NodeKind, ScanStats};
pub use utils::{count_files, format_count, format_file_size};
pub use writer::DigestWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/*!
 * Artifact writer for digestfs
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::{DigestError, Result};
use crate::render::Digest;

/// Writes the assembled digest into the target directory
pub struct DigestWriter {
    /// Writer configuration
    config: Config,
}

impl DigestWriter {
    /// Create a new digest writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Write the digest artifact
    ///
    /// A failed write is fatal for the run; the error carries the artifact
    /// path for reporting.
    pub fn write(&self, digest: &Digest) -> Result<()> {
        let path = self.config.output_path();
        self.write_to(&path, digest)
            .map_err(|source| DigestError::Write { path, source })
    }

    /// Artifact layout: summary, blank line, tree block, blank line,
    /// content blocks
    fn write_to(&self, path: &Path, digest: &Digest) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(digest.summary.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(digest.tree.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(digest.contents.as_bytes())?;
        writer.flush()
    }
}

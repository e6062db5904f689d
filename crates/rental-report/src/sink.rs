//! Delivery of finished exports
//!
//! The engine itself never touches the filesystem. Callers hand an
//! [`ExportResult`] to a [`FileSink`] of their choice.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::export::ExportResult;

/// Somewhere finished exports can be written
pub trait FileSink {
    /// Store the bytes of `result` under its file name
    fn deliver(&mut self, result: &ExportResult) -> io::Result<()>;
}

/// Writes exports as files into one directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `dir`, created on first delivery
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where a file name ends up. Only the final path component is used,
    /// so a name cannot escape the directory.
    pub fn path_for(&self, filename: &str) -> io::Result<PathBuf> {
        let name = Path::new(filename).file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file name: '{}'", filename),
            )
        })?;
        Ok(self.dir.join(name))
    }
}

impl FileSink for DirectorySink {
    fn deliver(&mut self, result: &ExportResult) -> io::Result<()> {
        let path = self.path_for(&result.filename)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, &result.bytes)?;
        log::debug!("delivered {} ({} bytes)", path.display(), result.bytes.len());
        Ok(())
    }
}

//! Markdown document storage
//!
//! Status documents are plain UTF-8 files addressed relative to a root
//! directory. A missing file is not an error: [`DocumentStore::read`] returns
//! `None` and the caller decides how loud to be about it.
//!
//! Writes go to a temp file under an exclusive lock and are renamed over the
//! original, so a failed write never leaves a half-written document.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read document {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write document {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A document taking part in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPath {
    /// Path as configured or given on the command line
    pub name: String,
    /// Resolved location on disk
    pub path: PathBuf,
    /// False for merge-only sources
    pub writable: bool,
}

/// Store for markdown documents under a root directory
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Creates a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves a configured path against the root
    pub fn resolve(&self, name: &str, writable: bool) -> DocumentPath {
        DocumentPath {
            name: name.to_string(),
            path: self.root.join(name),
            writable,
        }
    }

    /// Reads a document, returning `None` if it does not exist
    pub fn read(&self, path: &Path) -> Result<Option<String>, DocumentError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(DocumentError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes a document atomically (temp file + rename)
    pub fn write(&self, path: &Path, content: &str) -> Result<(), DocumentError> {
        let write_err = |source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        };

        let temp_path = temp_path_for(path);

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_err)?;

            file.lock_exclusive().map_err(write_err)?;

            let mut writer = BufWriter::new(&file);
            writer.write_all(content.as_bytes()).map_err(write_err)?;
            writer.flush().map_err(write_err)?;
            // Lock is released when file is dropped
        }

        fs::rename(&temp_path, path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            write_err(source)
        })
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

//! Persisting output documents.

use resource_schema_convert::OutputDocument;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("invalid file name {0:?}")]
    InvalidName(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize: {0}")]
    Json(#[from] serde_json::Error),
}

/// A destination for finished documents.
///
/// Writers are shared across conversion workers.
pub trait SchemaWriter: Sync {
    /// Persist `document`, returning where it went.
    fn write(&self, document: &OutputDocument) -> Result<PathBuf, WriteError>;
}

/// Writes `<dir>/<title>.json`, replacing any previous file.
#[derive(Debug, Clone)]
pub struct FsWriter {
    dir: PathBuf,
    pretty: bool,
}

impl FsWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pretty: false,
        }
    }

    /// Indent output instead of writing compact JSON.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a document with this title is written to.
    pub fn path_for(&self, title: &str) -> Result<PathBuf, WriteError> {
        let invalid = title.is_empty()
            || title == "."
            || title == ".."
            || title.contains(['/', '\\']);
        if invalid {
            return Err(WriteError::InvalidName(title.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", title)))
    }
}

impl SchemaWriter for FsWriter {
    fn write(&self, document: &OutputDocument) -> Result<PathBuf, WriteError> {
        let path = self.path_for(&document.title)?;
        let io_err = |source| WriteError::Io {
            path: path.clone(),
            source,
        };

        let mut out = BufWriter::new(File::create(&path).map_err(io_err)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut out, document)?;
        } else {
            serde_json::to_writer(&mut out, document)?;
        }
        out.write_all(b"\n").map_err(io_err)?;
        out.flush().map_err(io_err)?;

        tracing::trace!(path = %path.display(), "wrote schema");
        Ok(path)
    }
}

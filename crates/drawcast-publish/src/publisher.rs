//! Static-file publisher for the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::WriteError;
use crate::documents::{DocumentKind, ErrorDocument, RenderedDocument};

/// Writes documents into one output directory, replacing whatever was there.
pub struct Publisher {
    out_dir: PathBuf,
}

/// Outcome of a best-effort error publication.
#[derive(Debug, Default)]
pub struct ErrorPublishReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<WriteError>,
}

impl ErrorPublishReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Publisher {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn path_for(&self, kind: DocumentKind) -> PathBuf {
        self.out_dir.join(kind.file_name())
    }

    /// Create the output directory if missing. Succeeds if it already exists.
    pub fn ensure_dir(&self) -> Result<(), WriteError> {
        if !self.out_dir.is_dir() {
            info!(dir = %self.out_dir.display(), "creating output directory");
        }
        fs::create_dir_all(&self.out_dir).map_err(|source| WriteError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })
    }

    /// Write every rendered document, stopping at the first failure.
    pub fn publish(&self, docs: &[RenderedDocument]) -> Result<Vec<PathBuf>, WriteError> {
        self.ensure_dir()?;
        let mut written = Vec::with_capacity(docs.len());
        for doc in docs {
            let path = self.path_for(doc.kind);
            write_file(&path, &doc.contents)?;
            info!(path = %path.display(), bytes = doc.contents.len(), "published");
            written.push(path);
        }
        Ok(written)
    }

    /// Write `doc` to every JSON path.
    ///
    /// Each write is attempted independently; failures are logged and
    /// collected, never returned early.
    pub fn publish_error(&self, doc: &ErrorDocument) -> ErrorPublishReport {
        let mut report = ErrorPublishReport::default();

        let contents = match doc.to_json() {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, "could not serialise error document");
                report.failed.push(WriteError::Json(e));
                return report;
            }
        };

        if let Err(e) = self.ensure_dir() {
            error!(error = %e, "could not create output directory for error documents");
        }

        for kind in DocumentKind::JSON {
            let path = self.path_for(kind);
            match write_file(&path, &contents) {
                Ok(()) => {
                    info!(path = %path.display(), "published error document");
                    report.written.push(path);
                }
                Err(e) => {
                    error!(error = %e, "failed to write error document");
                    report.failed.push(e);
                }
            }
        }
        report
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    fs::write(path, contents).map_err(|source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    })
}

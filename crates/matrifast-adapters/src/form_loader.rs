//! Filesystem-based form loader.
//!
//! Reads registration submissions saved as `.json` or `.toml` files, either a
//! single file or every such file in a directory tree.
//!
//! # Submission format
//!
//! ```toml
//! email = "ana@x.com"
//! kind  = "docente"          # docente | representante
//!
//! [form]
//! nombres         = "Ana"
//! aPaterno        = "Ruiz"
//! fechaNacimiento = "1990-01-01"
//! sexo            = "F"
//! tipoDocumento   = "DNI"
//! numeroDocumento = "12345678"
//! ```
//!
//! The JSON form is the same document: `{"email": ..., "kind": ..., "form": {...}}`.
//! `email` and `kind` may be omitted and supplied by the caller instead.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use matrifast_core::domain::FormData;

/// Which user variant a submission registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Docente,
    #[serde(alias = "representante_legal")]
    Representante,
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Docente => "docente",
            Self::Representante => "representante",
        })
    }
}

/// One submitted registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub kind: Option<SubmissionKind>,
    pub form: FormData,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("unsupported file type '{}' (expected .json or .toml)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Outcome of loading a directory: good submissions plus per-file failures.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<(PathBuf, FormSubmission)>,
    pub failed: Vec<(PathBuf, LoadError)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Option<Format> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => Some(Format::Json),
        Some("toml") => Some(Format::Toml),
        _ => None,
    }
}

/// Loads [`FormSubmission`]s from a file or directory.
pub struct FormLoader {
    root: PathBuf,
}

impl FormLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every submission under the root.
    ///
    /// A file root must load or the call fails. For a directory root, files
    /// are visited in name order and each unreadable or malformed file is
    /// recorded in [`LoadReport::failed`] without stopping the batch. Files
    /// with other extensions are ignored.
    ///
    /// # Errors
    ///
    /// [`LoadError::NotFound`] if the root does not exist; for a file root,
    /// any error from [`FormLoader::load_file`].
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load(&self) -> Result<LoadReport, LoadError> {
        if !self.root.exists() {
            return Err(LoadError::NotFound {
                path: self.root.clone(),
            });
        }

        if self.root.is_file() {
            let submission = Self::load_file(&self.root)?;
            return Ok(LoadReport {
                loaded: vec![(self.root.clone(), submission)],
                failed: Vec::new(),
            });
        }

        let mut report = LoadReport::default();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
                    warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("filesystem loop"));
                    report.failed.push((path.clone(), LoadError::Io { path, source }));
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || format_of(path).is_none() {
                continue;
            }

            match Self::load_file(path) {
                Ok(submission) => {
                    debug!(path = %path.display(), "loaded submission");
                    report.loaded.push((path.to_path_buf(), submission));
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping invalid submission");
                    report.failed.push((path.to_path_buf(), e));
                }
            }
        }

        debug!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "finished loading submissions"
        );
        Ok(report)
    }

    /// Load a single `.json` or `.toml` submission.
    pub fn load_file(path: &Path) -> Result<FormSubmission, LoadError> {
        let format = format_of(path).ok_or_else(|| LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed: Result<FormSubmission, String> = match format {
            Format::Json => serde_json::from_str(&raw).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(&raw).map_err(|e| e.to_string()),
        };

        parsed.map_err(|reason| LoadError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }
}

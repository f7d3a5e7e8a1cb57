use std::fmt::Debug;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::requests::DocumentUpload;

const DEFAULT_EXTENSION: &str = "pdf";
const MAX_NAME_ATTEMPTS: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to write document '{name}': {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove document '{path}': {source}")]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Content store for job posting documents.
pub trait DocumentStore: Debug + Send + Sync {
    /// Writes `bytes` under `name` and returns the stored path. Existing files are never
    /// overwritten; a taken name is stored as `{stem}-{n}.{ext}` instead.
    fn store(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError>;
    fn remove(&self, path: &str) -> Result<(), StorageError>;
}

/// `{yyyyMMddHHmmss}_{company}.{ext}`, with the company name reduced to file-safe characters.
pub fn document_name(company_name: &str, upload: &DocumentUpload, at: DateTime<Local>) -> String {
    let company: String = company_name
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect();
    let company = if company.is_empty() {
        "company".to_string()
    } else {
        company
    };

    let extension = Path::new(&upload.file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|ch| ch.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    format!("{}_{}.{}", at.format("%Y%m%d%H%M%S"), company, extension)
}

/// Name tried on the `attempt`-th write of `name`: the name itself first, then `-1`, `-2`, ...
pub fn candidate_name(name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => format!("{stem}-{attempt}.{extension}"),
        _ => format!("{name}-{attempt}"),
    }
}

/// Local filesystem store rooted at the configured document directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentStore for FsDocumentStore {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let write_error = |source: std::io::Error| StorageError::Write {
            name: name.to_string(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(write_error)?;
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.root.join(candidate_name(name, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(bytes).map_err(write_error)?;
                    return Ok(path.to_string_lossy().into_owned());
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(write_error(err)),
            }
        }

        Err(write_error(std::io::Error::new(
            ErrorKind::AlreadyExists,
            "no free document name",
        )))
    }

    fn remove(&self, path: &str) -> Result<(), StorageError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove {
                path: path.to_string(),
                source,
            }),
        }
    }
}

//! JSON persistence for trick definitions.

use crate::model::book::TrickBook;
use crate::model::trick::Trick;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_STORE_FILE: &str = "saved_tricks.json";

/// On-disk document: `{ "tricks": [...], "next_id": n }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StoredTricks {
    #[serde(default)]
    pub tricks: Vec<Trick>,
    #[serde(default)]
    pub next_id: u32,
}

impl StoredTricks {
    pub fn capture(book: &TrickBook) -> Self {
        Self {
            tricks: book.tricks().to_vec(),
            next_id: book.next_id(),
        }
    }

    pub fn restore(self) -> TrickBook {
        TrickBook::from_parts(self.tricks, self.next_id)
    }

    pub fn to_json(book: &TrickBook) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(book))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read tricks from {path:?}: {source}")]
    Read {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to parse tricks in {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("failed to serialize tricks for {path:?}: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("failed to write tricks to {path:?}: {source}")]
    Write {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
}

impl StoreError {
    pub fn path(&self) -> &Path {
        match self {
            StoreError::Read { path, .. }
            | StoreError::Parse { path, .. }
            | StoreError::Serialize { path, .. }
            | StoreError::Write { path, .. } => path.as_path(),
        }
    }
}

/// A trick file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickStore {
    path: PathBuf,
}

impl TrickStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty book.
    pub fn load(&self) -> Result<TrickBook, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(TrickBook::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    source,
                    path: self.path.clone(),
                });
            }
        };
        let stored = StoredTricks::from_json(&json).map_err(|source| StoreError::Parse {
            source,
            path: self.path.clone(),
        })?;
        Ok(stored.restore())
    }

    /// Like [`load`](Self::load), but an unreadable file starts a fresh book.
    pub fn load_or_default(&self) -> TrickBook {
        match self.load() {
            Ok(book) => book,
            Err(err) => {
                tracing::warn!(
                    target: "trickset_core::store",
                    path = %self.path.display(),
                    error = %err,
                    "discarding unreadable trick file"
                );
                TrickBook::new()
            }
        }
    }

    pub fn save(&self, book: &TrickBook) -> Result<(), StoreError> {
        let json = StoredTricks::to_json(book).map_err(|source| StoreError::Serialize {
            source,
            path: self.path.clone(),
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                source,
                path: self.path.clone(),
            })?;
        }
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            source,
            path: self.path.clone(),
        })
    }
}

impl Default for TrickStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }
}

//! Storage Layer
//!
//! Persists one record per captured photo: the file written, the theme in
//! use and the full per-face analysis. Backed either by an in-memory
//! repository or by an append-only JSON-lines file.

mod file;
mod record;
mod repository;

pub use file::FileRepository;
pub use record::{capture_timestamp, CaptureRecord, FaceRecord, LandmarkRecord, PointRecord, RectRecord, ANALYSIS_TYPE};
pub use repository::Repository;
pub use uuid::Uuid;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Record not found")]
    NotFound,
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document store for capture records
pub trait CaptureStore {
    /// Persist a record, returning its id
    fn save(&self, record: CaptureRecord) -> Result<Uuid, StorageError>;

    /// All stored records, oldest first
    fn records(&self) -> Result<Vec<CaptureRecord>, StorageError>;

    /// (total captures, total faces)
    fn statistics(&self) -> Result<(usize, usize), StorageError> {
        let records = self.records()?;
        let faces = records.iter().map(|r| r.faces_detected).sum();
        Ok((records.len(), faces))
    }

    /// Human-readable backend description
    fn describe(&self) -> String;
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON-lines file; in-memory only when absent
    pub path: Option<PathBuf>,

    /// Retention limit for the in-memory repository
    pub max_records: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_records: 10_000,
        }
    }
}

/// Open the store described by `config`
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn CaptureStore>, StorageError> {
    match &config.path {
        Some(path) => Ok(Box::new(FileRepository::open(path)?)),
        None => Ok(Box::new(Repository::with_capacity(config.max_records))),
    }
}

//! In-memory repository

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::{debug, info};
use uuid::Uuid;

use crate::{CaptureRecord, CaptureStore, StorageError};

/// Repository for capture records (process lifetime)
pub struct Repository {
    records: Mutex<VecDeque<CaptureRecord>>,
    /// Oldest records are dropped beyond this
    max_records: usize,
}

impl Repository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    pub fn with_capacity(max_records: usize) -> Self {
        info!("Creating in-memory repository (max {} records)", max_records);
        Self {
            records: Mutex::new(VecDeque::new()),
            max_records: max_records.max(1),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a record by id
    pub fn get(&self, id: Uuid) -> Result<CaptureRecord, StorageError> {
        let records = self.lock()?;
        records.iter().find(|r| r.id == id).cloned().ok_or(StorageError::NotFound)
    }

    /// Clear all data
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, VecDeque<CaptureRecord>>, StorageError> {
        self.records
            .lock()
            .map_err(|e| StorageError::DatabaseError(format!("Lock error: {}", e)))
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureStore for Repository {
    fn save(&self, record: CaptureRecord) -> Result<Uuid, StorageError> {
        let mut records = self.lock()?;

        // Enforce retention
        while records.len() >= self.max_records {
            records.pop_front();
        }

        let id = record.id;
        records.push_back(record);
        debug!("Stored capture {}", id);
        Ok(id)
    }

    fn records(&self) -> Result<Vec<CaptureRecord>, StorageError> {
        Ok(self.lock()?.iter().cloned().collect())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

//! Append-only JSON-lines repository

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::{CaptureRecord, CaptureStore, StorageError};

/// One JSON document per line; survives restarts
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    /// Open (and create if needed) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        info!("Opened capture store {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CaptureStore for FileRepository {
    fn save(&self, record: CaptureRecord) -> Result<Uuid, StorageError> {
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(record.id)
    }

    fn records(&self) -> Result<Vec<CaptureRecord>, StorageError> {
        let file = fs::File::open(&self.path)?;
        let mut records = Vec::new();

        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CaptureRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping malformed record at {}:{}: {}", self.path.display(), number + 1, e),
            }
        }

        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("storage-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("captures.jsonl")
    }

    #[test]
    fn test_records_survive_reopen() {
        let path = scratch_file("reopen");
        {
            let repo = FileRepository::open(&path).unwrap();
            repo.save(CaptureRecord::new("x.jpg", "Sylveon", "sylveon_mask.png", Utc::now(), &[]))
                .unwrap();
        }

        let repo = FileRepository::open(&path).unwrap();
        repo.save(CaptureRecord::new("y.jpg", "Sylveon", "sylveon_mask.png", Utc::now(), &[]))
            .unwrap();
        let names: Vec<String> = repo.records().unwrap().into_iter().map(|r| r.filename).collect();
        assert_eq!(names, vec!["x.jpg", "y.jpg"]);
        assert_eq!(repo.statistics().unwrap(), (2, 0));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let path = scratch_file("malformed");
        let repo = FileRepository::open(&path).unwrap();
        repo.save(CaptureRecord::new("ok.jpg", "Meowth", "meowth_mask.png", Utc::now(), &[]))
            .unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{not json").unwrap();
        writeln!(file).unwrap();

        let records = repo.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filename, "ok.jpg");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}

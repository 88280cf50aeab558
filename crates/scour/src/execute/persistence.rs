//! Persistence for execution records - save/load JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{Result, ScourError};

use super::record::ExecutionRecord;

impl ExecutionRecord {
    /// Save the execution record to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    ScourError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            ScourError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            ScourError::Persistence(format!("Failed to serialize execution record: {}", e))
        })?;

        Ok(())
    }

    /// Load an execution record from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            ScourError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        let record: ExecutionRecord = serde_json::from_reader(reader).map_err(|e| {
            ScourError::Persistence(format!(
                "Failed to parse execution record '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(record)
    }
}

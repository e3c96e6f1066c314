//! Delimited record reader.
//!
//! One record per line, fields separated by a single comma, no escaping.
//! The reader validates field counts and decodes permission text, so the
//! matrix engine only ever sees well-formed records. A malformed line
//! fails the whole batch before the engine is invoked.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use permgrid_core::{AccessRecord, AccessRequest, PermissionSet, UpdateAction, UpdateRecord};

/// Errors that can occur while reading a record file.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The file could not be opened or read.
    #[error("failed to read records: {0}")]
    Io(#[from] std::io::Error),

    /// A line has the wrong number of comma-separated fields.
    #[error("line {line}: expected {expected} comma-separated fields, found {found}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Fields the format requires.
        expected: usize,
        /// Fields actually present.
        found: usize,
    },
}

/// Result type for reader operations.
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Read load-format records: `user,file,permissions`.
pub fn read_access_records(path: impl AsRef<Path>) -> Result<Vec<AccessRecord>> {
    let rows = read_rows(path.as_ref(), 3)?;
    Ok(rows
        .into_iter()
        .map(|fields| {
            let permissions = PermissionSet::decode(&fields[2]);
            AccessRecord::new(fields[0].as_str(), fields[1].as_str(), permissions)
        })
        .collect())
}

/// Read update-format records: `action,user,file,permissions`.
///
/// The action token `add` grants; any other token revokes.
pub fn read_update_records(path: impl AsRef<Path>) -> Result<Vec<UpdateRecord>> {
    let rows = read_rows(path.as_ref(), 4)?;
    Ok(rows
        .into_iter()
        .map(|fields| {
            let action = UpdateAction::from_token(&fields[0]);
            let permissions = PermissionSet::decode(&fields[3]);
            UpdateRecord::new(action, fields[1].as_str(), fields[2].as_str(), permissions)
        })
        .collect())
}

/// Read request-format records: `user,file,permissions`.
pub fn read_requests(path: impl AsRef<Path>) -> Result<Vec<AccessRequest>> {
    let rows = read_rows(path.as_ref(), 3)?;
    Ok(rows
        .into_iter()
        .map(|fields| {
            let permissions = PermissionSet::decode(&fields[2]);
            AccessRequest::new(fields[0].as_str(), fields[1].as_str(), permissions)
        })
        .collect())
}

/// Split a file into per-line field vectors, enforcing the field count.
/// Blank lines are skipped.
fn read_rows(path: &Path, expected: usize) -> Result<Vec<Vec<String>>> {
    let file = File::open(path)?;
    let mut rows = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let fields: Vec<String> = trimmed.split(',').map(str::to_string).collect();
        if fields.len() != expected {
            return Err(ReaderError::Malformed {
                line: index + 1,
                expected,
                found: fields.len(),
            });
        }
        rows.push(fields);
    }
    Ok(rows)
}

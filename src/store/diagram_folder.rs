// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flat folder of diagram records, one JSON file per diagram.
//!
//! Records are written atomically: the payload goes to a hidden temp file in
//! the same folder and is renamed over the target, so readers never observe a
//! half-written record. Saving without an id allocates the next numeric id,
//! mirroring what an autoincrementing row id would do.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Diagram, DiagramId};

/// How hard a write tries to survive a crash or power loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDurability {
    /// Write and rename without forcing data to stable storage. Fast, and
    /// fine for interactive editing where the last save can be redone.
    #[default]
    BestEffort,
    /// fsync the record (and, on Unix, the folder) before reporting success.
    Durable,
}

/// Listing entry: everything about a record except its diagram payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramSummary {
    pub id: DiagramId,
    pub name: String,
    #[serde(rename = "updatedAt")]
    pub updated_at_millis: u64,
}

/// A stored diagram with its folder metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramRecord {
    pub id: DiagramId,
    pub name: String,
    pub updated_at_millis: u64,
    pub diagram: Diagram,
}

/// Input to [`DiagramFolder::save_diagram`]. A missing id means "create".
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavePayload {
    #[serde(default)]
    pub id: Option<DiagramId>,
    pub name: String,
    #[serde(rename = "data")]
    pub diagram: Diagram,
}

/// On-disk shape of one record. The diagram payload stays a raw JSON value
/// here so a corrupt payload does not take the record's metadata down with it.
#[derive(Debug, Serialize, Deserialize)]
struct RecordFile {
    id: DiagramId,
    name: String,
    #[serde(rename = "updatedAt")]
    updated_at_millis: u64,
    data: Value,
}

#[derive(Debug)]
pub struct DiagramFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl DiagramFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    /// All records in the folder, most recently updated first. Records that
    /// tie on timestamp order by id so the listing is stable. A record that
    /// no longer reads or parses is skipped rather than failing the whole
    /// listing; one corrupt file must not hide the healthy ones.
    pub fn list_diagrams(&self) -> Result<Vec<DiagramSummary>, StoreError> {
        let mut summaries = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(summaries),
            Err(err) => return Err(StoreError::io(&self.root, err)),
        };
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io(&self.root, err))?;
            let path = entry.path();
            if !is_record_path(&path) {
                continue;
            }
            let Ok(record) = read_record_file(&path) else {
                continue;
            };
            summaries.push(DiagramSummary {
                id: record.id,
                name: record.name,
                updated_at_millis: record.updated_at_millis,
            });
        }
        summaries.sort_by(|a, b| {
            b.updated_at_millis
                .cmp(&a.updated_at_millis)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(summaries)
    }

    /// Loads one record, or `None` when no record has that id. A record whose
    /// diagram payload no longer parses degrades to an empty diagram carrying
    /// the record's name, so one bad save never locks the user out.
    pub fn load_diagram(&self, id: &DiagramId) -> Result<Option<DiagramRecord>, StoreError> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let record = read_record_file(&path)?;
        let diagram = match serde_json::from_value::<Diagram>(record.data) {
            Ok(diagram) => diagram,
            Err(_) => Diagram::new(record.name.clone()),
        };
        Ok(Some(DiagramRecord {
            id: record.id,
            name: record.name,
            updated_at_millis: record.updated_at_millis,
            diagram,
        }))
    }

    /// Inserts or updates a record and returns its id. Without a payload id
    /// the next free numeric id is allocated; with one, the matching record
    /// is replaced (or created under that id). The update timestamp is always
    /// refreshed.
    pub fn save_diagram(&self, payload: &SavePayload) -> Result<DiagramId, StoreError> {
        let id = match &payload.id {
            Some(id) => id.clone(),
            None => self.allocate_id()?,
        };
        let record = RecordFile {
            id: id.clone(),
            name: payload.name.clone(),
            updated_at_millis: now_millis(),
            data: serde_json::to_value(&payload.diagram)
                .map_err(|err| StoreError::json(self.record_path(&id), err))?,
        };
        let path = self.record_path(&id);
        let bytes =
            serde_json::to_vec_pretty(&record).map_err(|err| StoreError::json(&path, err))?;
        self.write_atomic(&path, &bytes)?;
        Ok(id)
    }

    /// Removes a record. Deleting an id that does not exist is a no-op.
    pub fn delete_diagram(&self, id: &DiagramId) -> Result<(), StoreError> {
        let path = self.record_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::io(path, err)),
        }
    }

    fn record_path(&self, id: &DiagramId) -> PathBuf {
        // Ids cannot contain '/', so the join stays inside the folder.
        self.root.join(format!("{}.json", id.as_str()))
    }

    /// One past the highest purely numeric file stem. Non-numeric ids chosen
    /// by callers never collide with allocated ones and are simply skipped.
    fn allocate_id(&self) -> Result<DiagramId, StoreError> {
        let mut highest = 0u64;
        if let Ok(entries) = fs::read_dir(&self.root) {
            for entry in entries.flatten() {
                let path = entry.path();
                if !is_record_path(&path) {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    if let Ok(n) = stem.parse::<u64>() {
                        highest = highest.max(n);
                    }
                }
            }
        }
        DiagramId::new((highest + 1).to_string())
            .map_err(|err| StoreError::InvalidId { source: err })
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|err| StoreError::io(&self.root, err))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("record.json");
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let temp_path = self.root.join(format!(".naiad.tmp.{file_name}.{nanos}"));

        let result = (|| {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&temp_path)
                .map_err(|err| StoreError::io(&temp_path, err))?;
            file.write_all(bytes)
                .map_err(|err| StoreError::io(&temp_path, err))?;
            if self.durability == WriteDurability::Durable {
                file.sync_all()
                    .map_err(|err| StoreError::io(&temp_path, err))?;
            }
            drop(file);
            rename_overwrite(&temp_path, path).map_err(|err| StoreError::io(path, err))
        })();
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
            return result;
        }

        #[cfg(unix)]
        if self.durability == WriteDurability::Durable {
            if let Ok(dir) = fs::File::open(&self.root) {
                let _ = dir.sync_all();
            }
        }
        Ok(())
    }
}

/// Rename that overwrites the destination. On Unix `rename` already replaces;
/// elsewhere a stale destination is removed first and the rename retried.
fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) if to.exists() => {
            fs::remove_file(to)?;
            fs::rename(from, to)
        }
        Err(err) => Err(err),
    }
}

fn is_record_path(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(true);
    !hidden && path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

fn read_record_file(path: &Path) -> Result<RecordFile, StoreError> {
    let bytes = fs::read(path).map_err(|err| StoreError::io(path, err))?;
    serde_json::from_slice(&bytes).map_err(|err| StoreError::json(path, err))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidId {
        source: crate::model::IdError,
    },
}

impl StoreError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "i/o error at {}: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "invalid record at {}: {source}", path.display())
            }
            Self::InvalidId { source } => write!(f, "allocated id was invalid: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source } => Some(source),
        }
    }
}

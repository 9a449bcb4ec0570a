//! Shortcut collection management over `shortcuts.vdf`.
//!
//! The collection is a map keyed by contiguous indices `"0"`, `"1"`, ...
//! New shortcuts go into the first missing index. Gaps left by external
//! edits are filled, not compacted.

use super::record::ShortcutRecord;
use crate::config::ShortcutConfig;
use crate::error::{ConductorError, Result};
use crate::identity::AppId;
use crate::platform::{Persisted, WriteMode};
use crate::vdf::{Framing, VdfFile, VdfMap};
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of scanning the shortcut collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionScan {
    /// First index with no entry.
    pub next_index: usize,
    /// App ids found in the contiguous prefix, as strings, alias order kept.
    pub app_ids: Vec<String>,
}

impl CollectionScan {
    /// Whether `app_id` was found. Numeric ids compare by value, so `-0`,
    /// `0` and an int32 zero are the same id.
    pub fn contains(&self, app_id: &str) -> bool {
        self.app_ids.iter().any(|id| same_app_id(id, app_id))
    }
}

fn same_app_id(a: &str, b: &str) -> bool {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Scan indices `"0"`, `"1"`, ... until the first missing one, collecting
/// app ids from every alias key present on each entry.
pub fn scan_collection(collection: Option<&VdfMap>) -> CollectionScan {
    let mut scan = CollectionScan {
        next_index: 0,
        app_ids: Vec::new(),
    };
    let Some(collection) = collection else {
        return scan;
    };

    while let Some(entry) = collection.get(&scan.next_index.to_string()) {
        if let Some(entry) = entry.as_map() {
            for alias in ShortcutConfig::APP_ID_ALIASES {
                if let Some(id) = entry.get(alias) {
                    scan.app_ids.push(id.to_string());
                }
            }
        }
        scan.next_index += 1;
    }
    scan
}

/// The shortcut collection of one Steam profile.
pub struct ShortcutRegistry {
    file: VdfFile,
}

impl ShortcutRegistry {
    /// Load `shortcuts.vdf`, starting empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = VdfFile::open(path, Framing::Binary, true)?;
        Ok(Self { file })
    }

    pub fn from_file(file: VdfFile) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &VdfFile {
        &self.file
    }

    pub fn into_file(self) -> VdfFile {
        self.file
    }

    /// The `shortcuts` collection, if present.
    pub fn shortcuts(&self) -> Option<&VdfMap> {
        self.file.data.get_map(ShortcutConfig::COLLECTION_KEY)
    }

    pub fn scan(&self) -> CollectionScan {
        scan_collection(self.shortcuts())
    }

    /// Insert a record at the next free index.
    ///
    /// Fails with `AppIdAlreadyExists` without touching the document if the
    /// record's app id is already in the collection. Returns the index used.
    pub fn insert(&mut self, record: &ShortcutRecord) -> Result<String> {
        let app_id = AppId::from_signed(record.app_id).signed_key();
        let scan = self.scan();
        debug!(
            "Scanned {} shortcuts, found app ids {:?}",
            scan.next_index, scan.app_ids
        );

        if scan.contains(&app_id) {
            return Err(ConductorError::AppIdAlreadyExists { app_id });
        }

        let index = scan.next_index.to_string();
        self.file
            .data
            .entry_map(ShortcutConfig::COLLECTION_KEY)
            .insert(index.clone(), record.to_vdf());

        info!("Added shortcut {} ({}) at index {}", record.app_name, app_id, index);
        Ok(index)
    }

    /// Flush the document through the write mode.
    pub fn persist(&self, mode: WriteMode) -> Result<Persisted> {
        mode.save(&self.file)
    }
}

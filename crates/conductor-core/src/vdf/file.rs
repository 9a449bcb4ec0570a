//! File-backed VDF documents.
//!
//! Saving uses the same write protocol as the rest of the crate:
//! 1. Serialize to a temp file with a PID suffix next to the target
//! 2. Sync the temp file to disk
//! 3. Atomically rename it over the target

use super::value::VdfMap;
use super::{binary, text};
use crate::error::{ConductorError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

/// Serialization variant of a VDF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    Binary,
    Text,
}

/// A VDF document loaded from (and saved back to) a path.
#[derive(Debug, Clone)]
pub struct VdfFile {
    path: PathBuf,
    framing: Framing,
    /// Root of the document.
    pub data: VdfMap,
}

impl VdfFile {
    /// Load a VDF file.
    ///
    /// When the file is missing and `create_if_missing` is set, the document
    /// starts empty and nothing is written until [`VdfFile::save`].
    pub fn open(path: impl Into<PathBuf>, framing: Framing, create_if_missing: bool) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            if !create_if_missing {
                return Err(ConductorError::FileNotFound(path));
            }
            debug!("{} does not exist, starting empty", path.display());
            return Ok(Self {
                path,
                framing,
                data: VdfMap::new(),
            });
        }

        let data = match framing {
            Framing::Binary => {
                let bytes = fs::read(&path).map_err(|e| ConductorError::io_with_path(e, &path))?;
                binary::decode(&bytes)
            }
            Framing::Text => {
                let contents =
                    fs::read_to_string(&path).map_err(|e| ConductorError::io_with_path(e, &path))?;
                text::decode(&contents)
            }
        }
        .map_err(|e| with_path(e, &path))?;

        debug!("Loaded {} ({:?}, {} root entries)", path.display(), framing, data.len());
        Ok(Self {
            path,
            framing,
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Serialize `data` in the file's framing.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self.framing {
            Framing::Binary => binary::encode(&self.data),
            Framing::Text => Ok(text::encode(&self.data).into_bytes()),
        }
    }

    /// Write `data` back to the path it was opened from.
    pub fn save(&self) -> Result<()> {
        let bytes = self.to_bytes()?;
        atomic_write_bytes(&self.path, &bytes)
    }

    /// Human-readable dump of the document in text framing.
    pub fn pretty_print(&self) -> String {
        text::encode(&self.data)
    }
}

fn with_path(err: ConductorError, path: &Path) -> ConductorError {
    match err {
        ConductorError::VdfParse {
            path: None,
            offset,
            message,
        } => ConductorError::VdfParse {
            path: Some(path.to_path_buf()),
            offset,
            message,
        },
        other => other,
    }
}

/// Write bytes to `path` atomically, creating parent directories.
fn atomic_write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| ConductorError::Io {
                message: format!("Failed to create directory {}", parent.display()),
                path: Some(parent.to_path_buf()),
                source: Some(e),
            })?;
        }
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ConductorError::Config {
            message: format!("Not a file path: {}", path.display()),
        })?;
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, process::id()));

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| ConductorError::Io {
                message: format!("Failed to create temp file {}", temp_path.display()),
                path: Some(temp_path.clone()),
                source: Some(e),
            })?;

        file.write_all(bytes).map_err(|e| ConductorError::Io {
            message: format!("Failed to write temp file {}", temp_path.display()),
            path: Some(temp_path.clone()),
            source: Some(e),
        })?;

        file.sync_all().map_err(|e| ConductorError::Io {
            message: format!("Failed to sync temp file {}", temp_path.display()),
            path: Some(temp_path.clone()),
            source: Some(e),
        })?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ConductorError::Io {
            message: format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            ),
            path: Some(path.to_path_buf()),
            source: Some(e),
        }
    })?;

    debug!("Atomically wrote {}", path.display());
    Ok(())
}

//! Commit or dry-run persistence.
//!
//! Every side effect conductor has on disk goes through [`WriteMode`]. In
//! dry-run mode the call logs what it would have done and reports
//! [`Persisted::Skipped`]; callers treat that as success.

use crate::error::{ConductorError, Result};
use crate::vdf::VdfFile;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Whether persistence calls touch the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    #[default]
    Commit,
    DryRun,
}

/// Outcome of a single persistence call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Persisted {
    Written,
    Skipped,
}

impl WriteMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            WriteMode::DryRun
        } else {
            WriteMode::Commit
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == WriteMode::DryRun
    }

    /// Flush a VDF file to its path.
    pub fn save(self, file: &VdfFile) -> Result<Persisted> {
        if self.is_dry_run() {
            info!("dry run, not modifying {}", file.path().display());
            return Ok(Persisted::Skipped);
        }
        file.save()?;
        info!("Saved {}", file.path().display());
        Ok(Persisted::Written)
    }

    /// Copy a file's bytes to `dest`, overwriting it.
    pub fn copy_file(self, src: &Path, dest: &Path) -> Result<Persisted> {
        if self.is_dry_run() {
            info!(
                "dry run, not copying {} to {}",
                src.display(),
                dest.display()
            );
            return Ok(Persisted::Skipped);
        }
        fs::copy(src, dest).map_err(|e| ConductorError::Io {
            message: format!("Failed to copy {} to {}", src.display(), dest.display()),
            path: Some(dest.to_path_buf()),
            source: Some(e),
        })?;
        debug!("Copied {} to {}", src.display(), dest.display());
        Ok(Persisted::Written)
    }

    /// Create a directory and its parents.
    pub fn create_dir_all(self, dir: &Path) -> Result<Persisted> {
        if dir.is_dir() {
            return Ok(Persisted::Skipped);
        }
        if self.is_dry_run() {
            info!("dry run, not creating {}", dir.display());
            return Ok(Persisted::Skipped);
        }
        fs::create_dir_all(dir).map_err(|e| ConductorError::io_with_path(e, dir))?;
        Ok(Persisted::Written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vdf::Framing;
    use tempfile::TempDir;

    #[test]
    fn test_from_dry_run() {
        assert_eq!(WriteMode::from_dry_run(true), WriteMode::DryRun);
        assert_eq!(WriteMode::from_dry_run(false), WriteMode::Commit);
        assert_eq!(WriteMode::default(), WriteMode::Commit);
    }

    #[test]
    fn test_dry_run_save_does_not_create_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shortcuts.vdf");
        let file = VdfFile::open(&path, Framing::Binary, true).unwrap();

        assert_eq!(WriteMode::DryRun.save(&file).unwrap(), Persisted::Skipped);
        assert!(!path.exists());

        assert_eq!(WriteMode::Commit.save(&file).unwrap(), Persisted::Written);
        assert!(path.exists());
    }

    #[test]
    fn test_copy_file_modes() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("hero.png");
        let dest = temp_dir.path().join("copy.png");
        fs::write(&src, b"png").unwrap();

        assert_eq!(
            WriteMode::DryRun.copy_file(&src, &dest).unwrap(),
            Persisted::Skipped
        );
        assert!(!dest.exists());

        assert_eq!(
            WriteMode::Commit.copy_file(&src, &dest).unwrap(),
            Persisted::Written
        );
        assert_eq!(fs::read(&dest).unwrap(), b"png");
    }

    #[test]
    fn test_create_dir_all_modes() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a").join("grid");

        assert_eq!(
            WriteMode::DryRun.create_dir_all(&dir).unwrap(),
            Persisted::Skipped
        );
        assert!(!dir.exists());

        assert_eq!(
            WriteMode::Commit.create_dir_all(&dir).unwrap(),
            Persisted::Written
        );
        assert!(dir.is_dir());
        assert_eq!(
            WriteMode::Commit.create_dir_all(&dir).unwrap(),
            Persisted::Skipped
        );
    }
}

//! Grid artwork placement.
//!
//! Steam picks up custom artwork for a shortcut from the profile's
//! `config/grid` directory, using the unsigned app id plus a per-slot suffix
//! as the file stem. The source file's extension is kept.

use crate::config::ArtworkConfig;
use crate::error::{ConductorError, Result};
use crate::identity::AppId;
use crate::platform::{Persisted, WriteMode};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Artwork slots Steam reads from the grid directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkKind {
    Hero,
    Logo,
    /// Wide capsule shown in Big Picture.
    Tenfoot,
    /// Portrait library capsule.
    Boxart,
}

impl ArtworkKind {
    pub const ALL: [ArtworkKind; 4] = [
        ArtworkKind::Hero,
        ArtworkKind::Logo,
        ArtworkKind::Tenfoot,
        ArtworkKind::Boxart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtworkKind::Hero => "hero",
            ArtworkKind::Logo => "logo",
            ArtworkKind::Tenfoot => "tenfoot",
            ArtworkKind::Boxart => "boxart",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            ArtworkKind::Hero => ArtworkConfig::HERO_SUFFIX,
            ArtworkKind::Logo => ArtworkConfig::LOGO_SUFFIX,
            ArtworkKind::Tenfoot => ArtworkConfig::TENFOOT_SUFFIX,
            ArtworkKind::Boxart => ArtworkConfig::BOXART_SUFFIX,
        }
    }

    /// Destination file name for this slot, e.g. `4171510507_hero.png`.
    pub fn file_name(&self, app_id: &str, src: &Path) -> String {
        let extension = src
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        format!("{}{}{}", app_id, self.suffix(), extension)
    }
}

impl std::fmt::Display for ArtworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source images for a shortcut; every slot is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkSet {
    pub hero: Option<PathBuf>,
    pub logo: Option<PathBuf>,
    pub tenfoot: Option<PathBuf>,
    pub boxart: Option<PathBuf>,
}

impl ArtworkSet {
    pub fn get(&self, kind: ArtworkKind) -> Option<&Path> {
        match kind {
            ArtworkKind::Hero => self.hero.as_deref(),
            ArtworkKind::Logo => self.logo.as_deref(),
            ArtworkKind::Tenfoot => self.tenfoot.as_deref(),
            ArtworkKind::Boxart => self.boxart.as_deref(),
        }
    }

    /// Supplied slots, in slot order.
    pub fn entries(&self) -> impl Iterator<Item = (ArtworkKind, &Path)> {
        ArtworkKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|path| (kind, path)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// Check that every supplied source exists.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<PathBuf> = self
            .entries()
            .filter(|(kind, path)| {
                let exists = path.exists();
                if !exists {
                    warn!("{} image {} does not exist", kind, path.display());
                }
                !exists
            })
            .map(|(_, path)| path.to_path_buf())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConductorError::ArtNotProperlySet { missing })
        }
    }
}

/// One artwork file placed (or, in a dry run, planned) in the grid directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtworkPlacement {
    pub kind: ArtworkKind,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub persisted: Persisted,
}

/// Copies artwork into a profile's grid directory.
pub struct ArtworkResolver {
    grid_dir: PathBuf,
}

impl ArtworkResolver {
    pub fn new(grid_dir: impl Into<PathBuf>) -> Self {
        Self {
            grid_dir: grid_dir.into(),
        }
    }

    pub fn grid_dir(&self) -> &Path {
        &self.grid_dir
    }

    /// Validate every source, then copy each supplied one.
    ///
    /// Nothing is copied if any source is missing. Absent slots are skipped.
    pub fn apply(
        &self,
        app_id: AppId,
        artwork: &ArtworkSet,
        mode: WriteMode,
    ) -> Result<Vec<ArtworkPlacement>> {
        artwork.validate()?;

        for kind in ArtworkKind::ALL {
            if artwork.get(kind).is_none() {
                debug!("no image specified for {}, skipping", kind);
            }
        }
        if artwork.is_empty() {
            return Ok(Vec::new());
        }

        mode.create_dir_all(&self.grid_dir)?;

        let id = app_id.unsigned().to_string();
        artwork
            .entries()
            .map(|(kind, source)| {
                let destination = self.grid_dir.join(kind.file_name(&id, source));
                info!("copying {} to {}", source.display(), destination.display());
                let persisted = mode.copy_file(source, &destination)?;
                Ok(ArtworkPlacement {
                    kind,
                    source: source.to_path_buf(),
                    destination,
                    persisted,
                })
            })
            .collect()
    }
}

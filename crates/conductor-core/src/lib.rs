//! Conductor Core - Headless library for registering non-Steam shortcuts.
//!
//! This crate edits a local Steam installation's profile data: it adds
//! shortcut records to `shortcuts.vdf`, binds compatibility tools in the
//! client `config.vdf`, and places grid artwork. It can be used
//! programmatically without the CLI.
//!
//! # Example
//!
//! ```rust,ignore
//! use conductor_core::{AddShortcutRequest, Conductor, WriteMode};
//!
//! fn main() -> conductor_core::Result<()> {
//!     let conductor = Conductor::builder().steam_root("/home/deck/.steam/steam").build()?;
//!
//!     let request = AddShortcutRequest::new("Foo", "/home/deck/games/foo");
//!     let report = conductor.add_shortcut(&request, WriteMode::DryRun)?;
//!     println!("Would add {} at index {}", report.app_id, report.index);
//!
//!     Ok(())
//! }
//! ```

pub mod artwork;
pub mod compat;
pub mod config;
pub mod error;
pub mod identity;
pub mod platform;
pub mod shortcut;
pub mod vdf;

mod api;

// Re-export commonly used types
pub use artwork::{ArtworkKind, ArtworkPlacement, ArtworkResolver, ArtworkSet};
pub use compat::CompatToolMapper;
pub use config::ShortcutFlags;
pub use error::{ConductorError, Result};
pub use identity::AppId;
pub use platform::{Persisted, SteamPaths, WriteMode};
pub use shortcut::{ShortcutRecord, ShortcutRegistry};
pub use vdf::{Framing, VdfFile, VdfMap, VdfValue};

// Re-export builder and request types from api module
pub use api::{AddShortcutReport, AddShortcutRequest, ConductorBuilder, ShortcutRegistered};

/// Entry point for operating on one Steam installation.
///
/// Holds only resolved paths; every operation loads the stores it needs
/// from disk and releases them when done.
#[derive(Debug, Clone)]
pub struct Conductor {
    paths: SteamPaths,
    steam_user: Option<String>,
}

impl Conductor {
    /// Create a builder for configuring the Conductor instance.
    pub fn builder() -> ConductorBuilder {
        ConductorBuilder::new()
    }

    /// Build with the default Steam root discovery.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn paths(&self) -> &SteamPaths {
        &self.paths
    }

    /// The profile pinned at build time, if any.
    pub fn steam_user(&self) -> Option<&str> {
        self.steam_user.as_deref()
    }

    /// Resolve the profile to operate on.
    pub fn resolve_user(&self) -> Result<String> {
        match &self.steam_user {
            Some(user) => self.paths.verify_user_id(user),
            None => self.paths.find_user_id(),
        }
    }
}

//! Builder for configuring Conductor initialization.

use std::path::PathBuf;

use crate::error::Result;
use crate::platform::SteamPaths;
use crate::Conductor;

/// Builder for configuring Conductor initialization.
///
/// # Example
///
/// ```rust,ignore
/// use conductor_core::Conductor;
///
/// let conductor = Conductor::builder()
///     .steam_root("/home/deck/.steam/steam")
///     .steam_user(Some("12345678".to_string()))
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct ConductorBuilder {
    steam_root: Option<PathBuf>,
    steam_user: Option<String>,
}

impl ConductorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit Steam root instead of `CONDUCTOR_STEAM_ROOT` or
    /// `~/.steam/steam`.
    pub fn steam_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.steam_root = Some(root.into());
        self
    }

    /// Pin the Steam profile to modify.
    ///
    /// Default: `None` (first profile under `userdata/`)
    pub fn steam_user(mut self, user: Option<String>) -> Self {
        self.steam_user = user;
        self
    }

    /// Resolve paths and build the Conductor instance.
    ///
    /// Only the Steam root is resolved here; the profile is looked up per
    /// command so that a missing profile surfaces as `SteamUserNotFound`.
    pub fn build(self) -> Result<Conductor> {
        let paths = match self.steam_root {
            Some(root) => SteamPaths::new(root),
            None => SteamPaths::discover()?,
        };
        tracing::debug!("Steam root: {}", paths.root().display());

        Ok(Conductor {
            paths,
            steam_user: self.steam_user,
        })
    }
}

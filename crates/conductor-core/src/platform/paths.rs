//! Steam directory resolution.
//!
//! This module provides functions to get the paths conductor reads and writes:
//! - The Steam root (override, `CONDUCTOR_STEAM_ROOT`, `steamlocate`, or `~/.steam/steam`)
//! - Per-user profile directories under `userdata/`
//! - The compatibility tools root and the client `config.vdf`

use crate::config::SteamConfig;
use crate::error::{ConductorError, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Expand a leading `~` to the home directory.
///
/// Paths without a leading `~` (and `~user` forms) are returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Get the default Steam root directory.
///
/// # Resolution order
/// 1. `CONDUCTOR_STEAM_ROOT` environment variable
/// 2. The installation found by `steamlocate` (native, Flatpak and Snap
///    installs, the Windows registry, the macOS application support dir)
/// 3. `~/.steam/steam`, so a machine without Steam reports a missing profile
pub fn default_steam_root() -> Result<PathBuf> {
    resolve_steam_root(
        std::env::var_os(SteamConfig::ROOT_ENV_VAR),
        locate_steam_dir,
        dirs::home_dir,
    )
}

fn locate_steam_dir() -> Option<PathBuf> {
    match steamlocate::SteamDir::locate() {
        Ok(steam_dir) => Some(steam_dir.path().to_path_buf()),
        Err(e) => {
            debug!("steamlocate did not find an installation: {}", e);
            None
        }
    }
}

fn resolve_steam_root(
    env_root: Option<OsString>,
    locate: impl FnOnce() -> Option<PathBuf>,
    home_dir: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(root) = env_root.filter(|root| !root.is_empty()) {
        return Ok(expand_tilde(&root.to_string_lossy()));
    }

    if let Some(root) = locate() {
        debug!("Located Steam installation at {}", root.display());
        return Ok(root);
    }

    let home = home_dir().ok_or_else(|| ConductorError::Config {
        message: "Could not determine home directory".to_string(),
    })?;
    Ok(SteamConfig::DEFAULT_ROOT
        .iter()
        .fold(home, |path, part| path.join(part)))
}

/// Well-known locations inside a Steam installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamPaths {
    root: PathBuf,
}

impl SteamPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the Steam root, see [`default_steam_root`].
    pub fn discover() -> Result<Self> {
        default_steam_root().map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{root}/userdata`
    pub fn userdata_dir(&self) -> PathBuf {
        self.root.join(SteamConfig::USERDATA_DIR_NAME)
    }

    /// `{root}/compatibilitytools.d`
    pub fn compat_tools_dir(&self) -> PathBuf {
        self.root.join(SteamConfig::COMPAT_TOOLS_DIR_NAME)
    }

    /// `{root}/config/config.vdf`
    pub fn config_vdf(&self) -> PathBuf {
        self.root
            .join(SteamConfig::CONFIG_DIR_NAME)
            .join(SteamConfig::CONFIG_VDF_FILENAME)
    }

    /// `{root}/userdata/{user}/config`
    pub fn user_config_dir(&self, user_id: &str) -> PathBuf {
        self.userdata_dir()
            .join(user_id)
            .join(SteamConfig::CONFIG_DIR_NAME)
    }

    /// `{root}/userdata/{user}/config/shortcuts.vdf`
    pub fn shortcuts_vdf(&self, user_id: &str) -> PathBuf {
        self.user_config_dir(user_id)
            .join(SteamConfig::SHORTCUTS_VDF_FILENAME)
    }

    /// `{root}/userdata/{user}/config/grid`
    pub fn grid_dir(&self, user_id: &str) -> PathBuf {
        self.user_config_dir(user_id).join(SteamConfig::GRID_DIR_NAME)
    }

    /// Find the Steam user whose profile should be modified.
    ///
    /// Profiles are the directories under `userdata/`; the first one in
    /// lexicographic order is used.
    pub fn find_user_id(&self) -> Result<String> {
        let userdata = self.userdata_dir();
        let not_found = || ConductorError::SteamUserNotFound {
            userdata: userdata.clone(),
        };

        if !userdata.is_dir() {
            debug!("userdata directory does not exist at {}", userdata.display());
            return Err(not_found());
        }

        let entries = fs::read_dir(&userdata).map_err(|e| ConductorError::io_with_path(e, &userdata))?;
        let mut users: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        users.sort();

        match users.into_iter().next() {
            Some(user) => Ok(user),
            None => {
                debug!("userdata directory {} does not contain any accounts", userdata.display());
                Err(not_found())
            }
        }
    }

    /// Check that an explicitly chosen user has a profile directory.
    pub fn verify_user_id(&self, user_id: &str) -> Result<String> {
        if self.userdata_dir().join(user_id).is_dir() {
            Ok(user_id.to_string())
        } else {
            Err(ConductorError::SteamUserNotFound {
                userdata: self.userdata_dir(),
            })
        }
    }
}

//! Shortcut registration methods.

use serde::Serialize;
use tracing::{debug, info};

use crate::artwork::{ArtworkPlacement, ArtworkResolver, ArtworkSet};
use crate::compat::{resolve_compat_tool, CompatToolMapper};
use crate::error::{ConductorError, Result};
use crate::identity::AppId;
use crate::platform::{expand_tilde, WriteMode};
use crate::shortcut::{ShortcutRecord, ShortcutRegistry};
use crate::vdf::{Framing, VdfFile};
use crate::Conductor;

/// Everything needed to register one shortcut.
#[derive(Debug, Clone, Default)]
pub struct AddShortcutRequest {
    pub app_name: String,
    /// Executable path; `~` is expanded before the absoluteness check.
    pub exe_path: String,
    pub compat_tool: Option<String>,
    pub artwork: ArtworkSet,
    pub icon: Option<String>,
    pub launch_options: Option<String>,
}

impl AddShortcutRequest {
    pub fn new(app_name: impl Into<String>, exe_path: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            exe_path: exe_path.into(),
            ..Default::default()
        }
    }
}

/// The shortcut stage's outcome, known as soon as the shortcut is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutRegistered {
    pub app_id: AppId,
    pub user_id: String,
    /// Collection index the shortcut was written to.
    pub index: String,
    pub dry_run: bool,
}

/// Outcome of a registration run.
#[derive(Debug, Clone, Serialize)]
pub struct AddShortcutReport {
    pub app_id: AppId,
    pub user_id: String,
    pub shortcut: ShortcutRecord,
    /// Collection index the shortcut was written to.
    pub index: String,
    pub compat_tool: Option<String>,
    pub artwork: Vec<ArtworkPlacement>,
    pub dry_run: bool,
}

impl Conductor {
    /// Register a shortcut, bind its compat tool and place its artwork.
    ///
    /// Stages run in order and each one is fully validated before it mutates
    /// anything. A failing stage does not undo the stages already persisted.
    pub fn add_shortcut(
        &self,
        request: &AddShortcutRequest,
        mode: WriteMode,
    ) -> Result<AddShortcutReport> {
        self.add_shortcut_with(request, mode, |_| {})
    }

    /// Like [`Conductor::add_shortcut`], calling `on_registered` once the
    /// shortcut stage has succeeded.
    ///
    /// The callback runs before the compat tool and artwork stages, so the
    /// assigned id is available even when one of them fails afterwards.
    pub fn add_shortcut_with(
        &self,
        request: &AddShortcutRequest,
        mode: WriteMode,
        on_registered: impl FnOnce(&ShortcutRegistered),
    ) -> Result<AddShortcutReport> {
        if mode.is_dry_run() {
            info!("dry run, no files will be modified");
        }

        let exe = expand_tilde(&request.exe_path);
        if !exe.is_absolute() {
            return Err(ConductorError::PathNotAbsolute(exe));
        }
        let exe = exe.to_string_lossy().into_owned();

        let user_id = self.resolve_user()?;
        info!("Using steam user {}", user_id);

        let app_id = AppId::generate(&request.app_name, &exe);
        debug!("Generated app id {} (signed {})", app_id, app_id.signed_key());

        let icon = request
            .icon
            .as_deref()
            .map(|icon| expand_tilde(icon).to_string_lossy().into_owned());
        let shortcut = ShortcutRecord::new(app_id, request.app_name.as_str(), exe)
            .icon(icon)
            .launch_options(request.launch_options.clone());

        let index = self.register_shortcut(&user_id, &shortcut, mode)?;
        info!("Registered app id {} at index {}", app_id, index);
        on_registered(&ShortcutRegistered {
            app_id,
            user_id: user_id.clone(),
            index: index.clone(),
            dry_run: mode.is_dry_run(),
        });

        if let Some(tool) = request.compat_tool.as_deref() {
            self.assign_compat_tool(app_id, tool, mode)?;
        } else {
            debug!("no compat tool specified, skipping");
        }

        let resolver = ArtworkResolver::new(self.paths.grid_dir(&user_id));
        let artwork = resolver.apply(app_id, &request.artwork, mode)?;

        Ok(AddShortcutReport {
            app_id,
            user_id,
            shortcut,
            index,
            compat_tool: request.compat_tool.clone(),
            artwork,
            dry_run: mode.is_dry_run(),
        })
    }

    /// Load the resolved profile's shortcut collection. Nothing is written.
    pub fn list_shortcuts(&self) -> Result<VdfFile> {
        let user_id = self.resolve_user()?;
        VdfFile::open(self.paths.shortcuts_vdf(&user_id), Framing::Binary, true)
    }

    fn register_shortcut(
        &self,
        user_id: &str,
        shortcut: &ShortcutRecord,
        mode: WriteMode,
    ) -> Result<String> {
        let mut registry = ShortcutRegistry::open(self.paths.shortcuts_vdf(user_id))?;
        let index = registry.insert(shortcut)?;
        registry.persist(mode)?;
        Ok(index)
    }

    fn assign_compat_tool(&self, app_id: AppId, tool: &str, mode: WriteMode) -> Result<()> {
        let tools_dir = self.paths.compat_tools_dir();
        // Check the tool before touching the client config.
        resolve_compat_tool(&tools_dir, tool)?;

        let mut mapper = CompatToolMapper::open(&tools_dir, self.paths.config_vdf())?;
        mapper.assign(app_id, tool)?;
        mapper.persist(mode)?;
        Ok(())
    }
}

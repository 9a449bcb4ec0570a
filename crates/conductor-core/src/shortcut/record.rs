//! Shortcut record layout.

use crate::config::ShortcutFlags;
use crate::identity::AppId;
use crate::vdf::{VdfMap, VdfValue};
use serde::Serialize;
use std::path::Path;

/// A non-Steam shortcut as written into `shortcuts.vdf`.
#[derive(Debug, Clone, Serialize)]
pub struct ShortcutRecord {
    /// Signed app id.
    pub app_id: i32,
    pub app_name: String,
    /// Absolute executable path.
    pub exe: String,
    pub icon: Option<String>,
    pub launch_options: Option<String>,
    #[serde(skip)]
    pub flags: ShortcutFlags,
}

impl ShortcutRecord {
    pub fn new(app_id: AppId, app_name: impl Into<String>, exe: impl Into<String>) -> Self {
        Self {
            app_id: app_id.signed(),
            app_name: app_name.into(),
            exe: exe.into(),
            icon: None,
            launch_options: None,
            flags: ShortcutFlags::DEFAULT,
        }
    }

    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }

    pub fn launch_options(mut self, launch_options: Option<String>) -> Self {
        self.launch_options = launch_options;
        self
    }

    /// Parent directory of the executable, wrapped in quotes the way Steam
    /// writes it.
    pub fn start_dir(&self) -> String {
        let parent = Path::new(&self.exe)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("\"{}\"", parent)
    }

    /// Build the VDF map for this record, in Steam's field order.
    pub fn to_vdf(&self) -> VdfMap {
        let flags = &self.flags;
        let mut map = VdfMap::new();
        map.push("appid", VdfValue::Int32(self.app_id));
        map.push("AppName", self.app_name.as_str());
        map.push("Exe", self.exe.as_str());
        map.push("StartDir", self.start_dir());
        map.push("icon", self.icon.clone().unwrap_or_default());
        map.push("ShortcutPath", "");
        map.push("LaunchOptions", self.launch_options.clone().unwrap_or_default());
        map.push("IsHidden", flags.is_hidden);
        map.push("AllowDesktopConfig", flags.allow_desktop_config);
        map.push("AllowOverlay", flags.allow_overlay);
        map.push("OpenVR", flags.open_vr);
        map.push("Devkit", flags.devkit);
        map.push("DevkitGameID", "");
        map.push("DevKitOverrideAppID", "");
        map.push("LastPlayTime", flags.last_play_time);
        map.push("FlatpakAppId", "");
        map.push("tags", VdfMap::new());
        map
    }
}

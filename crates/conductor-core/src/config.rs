//! Centralized configuration for conductor.
//!
//! Steam directory layout, artwork naming and shortcut record defaults.

/// Steam installation layout, relative to the Steam root.
pub struct SteamConfig;

impl SteamConfig {
    /// Environment variable that overrides the Steam root directory.
    pub const ROOT_ENV_VAR: &'static str = "CONDUCTOR_STEAM_ROOT";
    /// Default Steam root, relative to the home directory.
    pub const DEFAULT_ROOT: [&'static str; 2] = [".steam", "steam"];
    pub const USERDATA_DIR_NAME: &'static str = "userdata";
    pub const COMPAT_TOOLS_DIR_NAME: &'static str = "compatibilitytools.d";
    pub const CONFIG_DIR_NAME: &'static str = "config";
    pub const CONFIG_VDF_FILENAME: &'static str = "config.vdf";
    pub const SHORTCUTS_VDF_FILENAME: &'static str = "shortcuts.vdf";
    pub const GRID_DIR_NAME: &'static str = "grid";
    /// Key path of the compat tool table inside `config.vdf`.
    pub const COMPAT_TOOL_MAPPING_PATH: [&'static str; 5] = [
        "InstallConfigStore",
        "Software",
        "Valve",
        "Steam",
        "CompatToolMapping",
    ];
}

/// Shortcut collection layout inside `shortcuts.vdf`.
pub struct ShortcutConfig;

impl ShortcutConfig {
    pub const COLLECTION_KEY: &'static str = "shortcuts";
    /// Keys that may hold a shortcut's app id, consulted in order.
    /// `AppId` is the legacy casing written by older tools.
    pub const APP_ID_ALIASES: [&'static str; 2] = ["appid", "AppId"];
}

/// Integer flags written into every new shortcut record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutFlags {
    pub is_hidden: i32,
    pub allow_desktop_config: i32,
    pub allow_overlay: i32,
    pub open_vr: i32,
    pub devkit: i32,
    pub last_play_time: i32,
}

impl ShortcutFlags {
    pub const DEFAULT: ShortcutFlags = ShortcutFlags {
        is_hidden: 0,
        allow_desktop_config: 1,
        allow_overlay: 1,
        open_vr: 0,
        devkit: 0,
        last_play_time: 0,
    };
}

impl Default for ShortcutFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Grid artwork naming.
pub struct ArtworkConfig;

impl ArtworkConfig {
    pub const HERO_SUFFIX: &'static str = "_hero";
    pub const LOGO_SUFFIX: &'static str = "_logo";
    pub const TENFOOT_SUFFIX: &'static str = "";
    pub const BOXART_SUFFIX: &'static str = "p";
}

/// App identifier derivation.
pub struct IdentityConfig;

impl IdentityConfig {
    /// Number of leading hex digits of the digest used for the id.
    pub const DIGEST_PREFIX_LEN: usize = 8;
    pub const MODULUS: u32 = 1_000_000_000;
    /// Offset that turns a signed id into its unsigned display form.
    pub const UNSIGNED_OFFSET: i64 = 1 << 32;
}

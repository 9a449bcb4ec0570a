//! Compatibility tool assignment.
//!
//! Steam keeps the tool chosen for each app in the `CompatToolMapping`
//! section of the client `config.vdf`, keyed by the signed app id. Each app
//! must have exactly one mapping, so assigning a tool first removes every
//! existing entry for the app id and then inserts the new one.

use crate::config::SteamConfig;
use crate::error::{ConductorError, Result};
use crate::identity::AppId;
use crate::platform::{Persisted, WriteMode};
use crate::vdf::{Framing, VdfFile, VdfMap, VdfValue};
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Resolve a compat tool name to its directory, checking that it exists.
///
/// The name must be a single directory name under `tools_dir`.
pub fn resolve_compat_tool(tools_dir: &Path, name: &str) -> Result<PathBuf> {
    let path = tools_dir.join(name);
    if !is_plain_name(name) || !path.is_dir() {
        return Err(ConductorError::CompatToolDoesNotExist {
            name: name.to_string(),
            path,
        });
    }
    Ok(path)
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Replace any mapping for `key` with `{ name: tool }`.
///
/// Returns the number of previous entries removed.
pub fn set_mapping(mapping: &mut VdfMap, key: &str, tool: &str) -> usize {
    let removed = mapping.remove_all(key);
    let mut entry = VdfMap::new();
    entry.insert("name", tool);
    mapping.push(key, entry);
    removed
}

/// The client configuration store holding compat tool assignments.
pub struct CompatToolMapper {
    tools_dir: PathBuf,
    config: VdfFile,
}

impl CompatToolMapper {
    /// Load the client `config.vdf`. The file must exist.
    pub fn open(tools_dir: impl Into<PathBuf>, config_vdf: impl Into<PathBuf>) -> Result<Self> {
        let config = VdfFile::open(config_vdf, Framing::Text, false)?;
        Ok(Self::from_file(tools_dir, config))
    }

    pub fn from_file(tools_dir: impl Into<PathBuf>, config: VdfFile) -> Self {
        Self {
            tools_dir: tools_dir.into(),
            config,
        }
    }

    pub fn file(&self) -> &VdfFile {
        &self.config
    }

    /// The `CompatToolMapping` section, if present.
    pub fn mapping(&self) -> Option<&VdfMap> {
        SteamConfig::COMPAT_TOOL_MAPPING_PATH
            .iter()
            .try_fold(&self.config.data, |map, key| map.get_map(key))
    }

    /// Tool names currently mapped to `app_id`, in file order.
    pub fn tools_for(&self, app_id: AppId) -> Vec<String> {
        let key = app_id.signed_key();
        self.mapping()
            .map(|mapping| {
                mapping
                    .iter()
                    .filter(|(k, _)| *k == key)
                    .filter_map(|(_, v)| v.as_map()?.get("name").and_then(VdfValue::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Map `app_id` to the named tool in memory.
    ///
    /// Fails with `CompatToolDoesNotExist` before touching the document if
    /// the tool is not installed.
    pub fn assign(&mut self, app_id: AppId, tool: &str) -> Result<()> {
        let tool_path = resolve_compat_tool(&self.tools_dir, tool)?;
        info!("Setting compat tool to {} ({})", tool, tool_path.display());

        let mapping = self
            .config
            .data
            .entry_path(&SteamConfig::COMPAT_TOOL_MAPPING_PATH);
        let removed = set_mapping(mapping, &app_id.signed_key(), tool);
        if removed > 0 {
            info!("Replaced {} existing mapping(s) for {}", removed, app_id.signed_key());
        }
        Ok(())
    }

    pub fn persist(&self, mode: WriteMode) -> Result<Persisted> {
        mode.save(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let tools_dir = temp_dir.path().join("compatibilitytools.d");
        fs::create_dir_all(tools_dir.join("GE-Proton9-1")).unwrap();
        fs::create_dir_all(tools_dir.join("GE-Proton9-2")).unwrap();
        let config = temp_dir.path().join("config.vdf");
        fs::write(&config, "\"InstallConfigStore\"\n{\n}\n").unwrap();
        (temp_dir, tools_dir, config)
    }

    #[test]
    fn test_set_mapping_removes_duplicates() {
        let mut mapping = VdfMap::new();
        let mut stale = VdfMap::new();
        stale.insert("name", "old");
        mapping.push("-1", stale.clone());
        mapping.push("-2", stale.clone());
        mapping.push("-1", stale);

        assert_eq!(set_mapping(&mut mapping, "-1", "new"), 2);
        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.get_map("-1").and_then(|m| m.get("name")).map(|v| v.to_string()),
            Some("new".to_string())
        );
    }

    #[test]
    fn test_resolve_missing_tool() {
        let (_temp_dir, tools_dir, _) = setup();
        assert!(resolve_compat_tool(&tools_dir, "GE-Proton9-1").is_ok());
        assert!(matches!(
            resolve_compat_tool(&tools_dir, "nope"),
            Err(ConductorError::CompatToolDoesNotExist { .. })
        ));
        assert!(resolve_compat_tool(&tools_dir, "").is_err());
    }

    #[test]
    fn test_resolve_rejects_paths_outside_tools_dir() {
        let (temp_dir, tools_dir, _) = setup();
        let outside = temp_dir.path().to_string_lossy().into_owned();
        for name in ["/", "..", ".", "../compatibilitytools.d", "GE-Proton9-1/..", outside.as_str()] {
            assert!(
                matches!(
                    resolve_compat_tool(&tools_dir, name),
                    Err(ConductorError::CompatToolDoesNotExist { .. })
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_assign_twice_keeps_one_mapping() {
        let (_temp_dir, tools_dir, config) = setup();
        let app_id = AppId::from_signed(-123);
        let mut mapper = CompatToolMapper::open(&tools_dir, &config).unwrap();

        mapper.assign(app_id, "GE-Proton9-1").unwrap();
        mapper.assign(app_id, "GE-Proton9-2").unwrap();

        assert_eq!(mapper.tools_for(app_id), vec!["GE-Proton9-2"]);
        assert_eq!(mapper.mapping().map(VdfMap::len), Some(1));
    }

    #[test]
    fn test_assign_missing_tool_leaves_config_untouched() {
        let (_temp_dir, tools_dir, config) = setup();
        let mut mapper = CompatToolMapper::open(&tools_dir, &config).unwrap();
        let before = mapper.file().data.clone();

        let err = mapper.assign(AppId::from_signed(-1), "missing").unwrap_err();
        assert!(matches!(err, ConductorError::CompatToolDoesNotExist { .. }));
        assert_eq!(mapper.file().data, before);
        assert!(mapper.mapping().is_none());
    }

    #[test]
    fn test_assign_persists_under_steam_section() {
        let (_temp_dir, tools_dir, config) = setup();
        let app_id = AppId::from_signed(-77);
        let mut mapper = CompatToolMapper::open(&tools_dir, &config).unwrap();
        mapper.assign(app_id, "GE-Proton9-1").unwrap();

        let before = fs::read(&config).unwrap();
        assert_eq!(mapper.persist(WriteMode::DryRun).unwrap(), Persisted::Skipped);
        assert_eq!(fs::read(&config).unwrap(), before);

        assert_eq!(mapper.persist(WriteMode::Commit).unwrap(), Persisted::Written);
        let reloaded = CompatToolMapper::open(&tools_dir, &config).unwrap();
        assert_eq!(reloaded.tools_for(app_id), vec!["GE-Proton9-1"]);
        let contents = fs::read_to_string(&config).unwrap();
        assert!(contents.contains("\"CompatToolMapping\""));
        assert!(contents.contains("\"-77\""));
    }

    #[test]
    fn test_open_requires_existing_config() {
        let temp_dir = TempDir::new().unwrap();
        let result = CompatToolMapper::open(temp_dir.path(), temp_dir.path().join("config.vdf"));
        assert!(matches!(result, Err(ConductorError::FileNotFound(_))));
    }
}

//! Integration tests for the Conductor public interface.
//!
//! These tests run the full registration pipeline against a temporary
//! Steam root laid out the way the client lays out a real one.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use conductor_core::{
    AddShortcutRequest, AppId, ArtworkSet, CompatToolMapper, Conductor, ConductorError,
    Persisted, ShortcutRegistry, WriteMode,
};
use tempfile::TempDir;

const USER: &str = "1001";
const TOOL: &str = "GE-Proton9-1";

/// Create a Steam root with one profile, one compat tool and a client config.
fn create_test_env() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    fs::create_dir_all(root.join("userdata").join(USER).join("config")).unwrap();
    fs::create_dir_all(root.join("compatibilitytools.d").join(TOOL)).unwrap();
    fs::create_dir_all(root.join("compatibilitytools.d/GE-Proton9-2")).unwrap();
    fs::create_dir_all(root.join("config")).unwrap();
    fs::write(
        root.join("config/config.vdf"),
        "\"InstallConfigStore\"\n{\n\t\"Software\"\n\t{\n\t\t\"Valve\"\n\t\t{\n\t\t\t\"Steam\"\n\t\t\t{\n\t\t\t\t\"AutoUpdateWindowEnabled\"\t\t\"0\"\n\t\t\t}\n\t\t}\n\t}\n}\n",
    )
    .unwrap();
    fs::create_dir_all(root.join("art")).unwrap();
    fs::write(root.join("art/hero.png"), b"hero").unwrap();
    fs::write(root.join("art/logo.png"), b"logo").unwrap();
    fs::write(root.join("art/wide.jpg"), b"wide").unwrap();
    fs::write(root.join("art/cover.png"), b"cover").unwrap();

    temp_dir
}

fn conductor_for(temp_dir: &TempDir) -> Conductor {
    Conductor::builder()
        .steam_root(temp_dir.path())
        .build()
        .unwrap()
}

fn shortcuts_vdf(temp_dir: &TempDir) -> PathBuf {
    temp_dir
        .path()
        .join("userdata")
        .join(USER)
        .join("config/shortcuts.vdf")
}

fn grid_dir(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("userdata").join(USER).join("config/grid")
}

fn full_artwork(temp_dir: &TempDir) -> ArtworkSet {
    let art = temp_dir.path().join("art");
    ArtworkSet {
        hero: Some(art.join("hero.png")),
        logo: Some(art.join("logo.png")),
        tenfoot: Some(art.join("wide.jpg")),
        boxart: Some(art.join("cover.png")),
    }
}

/// Every file under `dir` with its bytes.
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let bytes = fs::read(&path).unwrap();
                files.insert(path, bytes);
            }
        }
    }
    files
}

#[test]
fn test_first_registration_uses_index_zero() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);

    let report = conductor
        .add_shortcut(&AddShortcutRequest::new("Foo", "/home/u/foo"), WriteMode::Commit)
        .unwrap();

    assert_eq!(report.index, "0");
    assert_eq!(report.user_id, USER);
    assert_eq!(report.app_id, AppId::generate("Foo", "/home/u/foo"));
    assert!(!report.dry_run);
    assert!(shortcuts_vdf(&temp_dir).exists());

    let registry = ShortcutRegistry::open(shortcuts_vdf(&temp_dir)).unwrap();
    assert_eq!(registry.scan().app_ids, vec![report.app_id.signed_key()]);
}

#[test]
fn test_same_name_and_path_twice_collides() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);
    let request = AddShortcutRequest::new("Foo", "/home/u/foo");

    conductor.add_shortcut(&request, WriteMode::Commit).unwrap();
    let before = fs::read(shortcuts_vdf(&temp_dir)).unwrap();

    let err = conductor.add_shortcut(&request, WriteMode::Commit).unwrap_err();
    assert!(matches!(err, ConductorError::AppIdAlreadyExists { .. }));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(fs::read(shortcuts_vdf(&temp_dir)).unwrap(), before);
}

#[test]
fn test_second_registration_appends() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);

    conductor
        .add_shortcut(&AddShortcutRequest::new("Foo", "/home/u/foo"), WriteMode::Commit)
        .unwrap();
    let report = conductor
        .add_shortcut(&AddShortcutRequest::new("Bar", "/home/u/bar"), WriteMode::Commit)
        .unwrap();

    assert_eq!(report.index, "1");
    let listed = conductor.list_shortcuts().unwrap();
    assert_eq!(listed.data.get_map("shortcuts").map(|s| s.len()), Some(2));
}

#[test]
fn test_full_run_places_everything() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);
    let request = AddShortcutRequest {
        compat_tool: Some(TOOL.to_string()),
        artwork: full_artwork(&temp_dir),
        ..AddShortcutRequest::new("Foo", "/home/u/foo")
    };

    let report = conductor.add_shortcut(&request, WriteMode::Commit).unwrap();

    assert_eq!(report.compat_tool.as_deref(), Some(TOOL));
    assert_eq!(report.artwork.len(), 4);
    assert!(report.artwork.iter().all(|p| p.persisted == Persisted::Written));

    let id = report.app_id.unsigned();
    let grid = grid_dir(&temp_dir);
    assert_eq!(fs::read(grid.join(format!("{id}_hero.png"))).unwrap(), b"hero");
    assert_eq!(fs::read(grid.join(format!("{id}_logo.png"))).unwrap(), b"logo");
    assert_eq!(fs::read(grid.join(format!("{id}.jpg"))).unwrap(), b"wide");
    assert_eq!(fs::read(grid.join(format!("{id}p.png"))).unwrap(), b"cover");

    let mapper = CompatToolMapper::open(
        temp_dir.path().join("compatibilitytools.d"),
        temp_dir.path().join("config/config.vdf"),
    )
    .unwrap();
    assert_eq!(mapper.tools_for(report.app_id), vec![TOOL]);

    // Unrelated settings survive the rewrite.
    let config = fs::read_to_string(temp_dir.path().join("config/config.vdf")).unwrap();
    assert!(config.contains("\"AutoUpdateWindowEnabled\""));
}

#[test]
fn test_dry_run_leaves_disk_untouched() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);
    conductor
        .add_shortcut(&AddShortcutRequest::new("Existing", "/opt/existing"), WriteMode::Commit)
        .unwrap();
    let before = snapshot(temp_dir.path());

    let request = AddShortcutRequest {
        compat_tool: Some(TOOL.to_string()),
        artwork: full_artwork(&temp_dir),
        ..AddShortcutRequest::new("Foo", "/home/u/foo")
    };
    let report = conductor.add_shortcut(&request, WriteMode::DryRun).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.index, "1");
    assert_eq!(report.app_id, AppId::generate("Foo", "/home/u/foo"));
    assert_eq!(report.artwork.len(), 4);
    assert!(report.artwork.iter().all(|p| p.persisted == Persisted::Skipped));
    assert!(!grid_dir(&temp_dir).exists());
    assert_eq!(snapshot(temp_dir.path()), before);
}

#[test]
fn test_dry_run_still_detects_collisions() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);
    let request = AddShortcutRequest::new("Foo", "/home/u/foo");
    conductor.add_shortcut(&request, WriteMode::Commit).unwrap();

    let err = conductor.add_shortcut(&request, WriteMode::DryRun).unwrap_err();
    assert!(matches!(err, ConductorError::AppIdAlreadyExists { .. }));
}

#[test]
fn test_compat_tool_assigned_twice_keeps_latest() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);

    let first = AddShortcutRequest {
        compat_tool: Some(TOOL.to_string()),
        ..AddShortcutRequest::new("Foo", "/home/u/foo")
    };
    let report = conductor.add_shortcut(&first, WriteMode::Commit).unwrap();

    // Re-binding an already registered id goes through the mapper directly.
    let mut mapper = CompatToolMapper::open(
        temp_dir.path().join("compatibilitytools.d"),
        temp_dir.path().join("config/config.vdf"),
    )
    .unwrap();
    mapper.assign(report.app_id, "GE-Proton9-2").unwrap();
    mapper.persist(WriteMode::Commit).unwrap();

    let reloaded = CompatToolMapper::open(
        temp_dir.path().join("compatibilitytools.d"),
        temp_dir.path().join("config/config.vdf"),
    )
    .unwrap();
    assert_eq!(reloaded.tools_for(report.app_id), vec!["GE-Proton9-2"]);
}

#[test]
fn test_missing_compat_tool_keeps_registered_shortcut() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);
    let config_before = fs::read(temp_dir.path().join("config/config.vdf")).unwrap();
    let request = AddShortcutRequest {
        compat_tool: Some("NotInstalled".to_string()),
        ..AddShortcutRequest::new("Foo", "/home/u/foo")
    };

    let mut registered = None;
    let err = conductor
        .add_shortcut_with(&request, WriteMode::Commit, |r| registered = Some(r.clone()))
        .unwrap_err();
    assert!(matches!(err, ConductorError::CompatToolDoesNotExist { .. }));
    assert_eq!(err.exit_code(), 5);

    // The id of the shortcut that stays behind is still reported.
    let expected = AppId::generate("Foo", "/home/u/foo");
    let registered = registered.expect("shortcut stage should report its id");
    assert_eq!(registered.app_id, expected);
    assert_eq!(registered.index, "0");
    assert!(!registered.dry_run);

    // The shortcut stage already persisted and is not rolled back.
    let registry = ShortcutRegistry::open(shortcuts_vdf(&temp_dir)).unwrap();
    assert_eq!(registry.scan().app_ids, vec![expected.signed_key()]);
    assert_eq!(
        fs::read(temp_dir.path().join("config/config.vdf")).unwrap(),
        config_before
    );
}

#[test]
fn test_one_missing_artwork_copies_nothing() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);
    let mut artwork = full_artwork(&temp_dir);
    artwork.logo = Some(temp_dir.path().join("art/missing.png"));
    let request = AddShortcutRequest {
        artwork,
        ..AddShortcutRequest::new("Foo", "/home/u/foo")
    };

    let mut registered = None;
    let err = conductor
        .add_shortcut_with(&request, WriteMode::Commit, |r| registered = Some(r.app_id))
        .unwrap_err();
    assert_eq!(registered, Some(AppId::generate("Foo", "/home/u/foo")));
    match &err {
        ConductorError::ArtNotProperlySet { missing } => {
            assert_eq!(missing, &vec![temp_dir.path().join("art/missing.png")]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.exit_code(), 6);
    assert!(!grid_dir(&temp_dir).exists());
    assert!(shortcuts_vdf(&temp_dir).exists());
}

#[test]
fn test_relative_exe_path_is_rejected() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);

    let mut called = false;
    let err = conductor
        .add_shortcut_with(
            &AddShortcutRequest::new("Foo", "foo/bar"),
            WriteMode::Commit,
            |_| called = true,
        )
        .unwrap_err();
    assert!(!called);
    assert!(matches!(err, ConductorError::PathNotAbsolute(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(!shortcuts_vdf(&temp_dir).exists());
}

#[test]
fn test_missing_profile_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let conductor = conductor_for(&temp_dir);

    let err = conductor
        .add_shortcut(&AddShortcutRequest::new("Foo", "/home/u/foo"), WriteMode::Commit)
        .unwrap_err();
    assert!(matches!(err, ConductorError::SteamUserNotFound { .. }));
    assert_eq!(err.exit_code(), 3);

    assert!(matches!(
        conductor.list_shortcuts(),
        Err(ConductorError::SteamUserNotFound { .. })
    ));
}

#[test]
fn test_explicit_user_must_exist() {
    let temp_dir = create_test_env();
    let conductor = Conductor::builder()
        .steam_root(temp_dir.path())
        .steam_user(Some("9999".to_string()))
        .build()
        .unwrap();

    assert!(matches!(
        conductor.list_shortcuts(),
        Err(ConductorError::SteamUserNotFound { .. })
    ));
}

#[test]
fn test_list_shortcuts_does_not_create_store() {
    let temp_dir = create_test_env();
    let conductor = conductor_for(&temp_dir);

    let listed = conductor.list_shortcuts().unwrap();
    assert!(listed.data.is_empty());
    assert!(!shortcuts_vdf(&temp_dir).exists());
}

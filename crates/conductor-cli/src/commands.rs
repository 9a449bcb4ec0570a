//! Subcommand implementations.

use anyhow::Result;
use conductor_core::platform::expand_tilde;
use conductor_core::{
    AddShortcutReport, AddShortcutRequest, ArtworkSet, Conductor, Persisted, ShortcutRegistered,
    WriteMode,
};

use crate::AddShortcutArgs;

/// `conductor info`
pub(crate) fn info(conductor: &Conductor, json: bool) -> Result<()> {
    let shortcuts = conductor.list_shortcuts()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&shortcuts.data)?);
    } else {
        println!("Shortcuts added to steam:");
        println!("{}", shortcuts.pretty_print());
    }
    Ok(())
}

/// `conductor add_shortcut`
pub(crate) fn add_shortcut(conductor: &Conductor, args: AddShortcutArgs) -> Result<()> {
    let mode = WriteMode::from_dry_run(args.dry_run);
    if mode.is_dry_run() {
        println!("dry run, not actually modifying steam");
    }

    let request = build_request(args);
    let report = conductor.add_shortcut_with(&request, mode, |registered| {
        print!("{}", render_registered(registered));
    })?;
    print!("{}", render_report(&report));
    Ok(())
}

fn build_request(args: AddShortcutArgs) -> AddShortcutRequest {
    let expand = |path: Option<String>| path.map(|p| expand_tilde(&p));
    AddShortcutRequest {
        app_name: args.app_name,
        exe_path: args.exe_path,
        compat_tool: args.compat_tool,
        artwork: ArtworkSet {
            hero: expand(args.hero),
            logo: expand(args.logo),
            tenfoot: expand(args.tenfoot),
            boxart: expand(args.boxart),
        },
        icon: args.icon,
        launch_options: args.launch_options,
    }
}

/// Printed right after the shortcut stage, before any later stage can fail.
fn render_registered(registered: &ShortcutRegistered) -> String {
    let verb = if registered.dry_run {
        "would add"
    } else {
        "added"
    };
    format!(
        "{} shortcut with app id {} at index {} for steam user {}\n",
        verb, registered.app_id, registered.index, registered.user_id
    )
}

fn render_report(report: &AddShortcutReport) -> String {
    let shortcut = &report.shortcut;
    let mut out = String::new();
    out.push_str("summary of shortcut added:\n");
    out.push_str(&format!("app id: {}\n", report.app_id));
    out.push_str(&format!("app name: {}\n", shortcut.app_name));
    out.push_str(&format!("exe path: {}\n", shortcut.exe));
    out.push_str(&format!("icon: {}\n", shortcut.icon.as_deref().unwrap_or("")));
    out.push_str(&format!(
        "launch options: {}\n",
        shortcut.launch_options.as_deref().unwrap_or("")
    ));
    out.push_str(&format!("steam user: {}\n", report.user_id));
    out.push_str(&format!("shortcut index: {}\n", report.index));

    match &report.compat_tool {
        Some(tool) => out.push_str(&format!("compat tool: {}\n", tool)),
        None => out.push_str("compat tool: none\n"),
    }

    for placement in &report.artwork {
        let verb = match placement.persisted {
            Persisted::Written => "copied",
            Persisted::Skipped => "would copy",
        };
        out.push_str(&format!(
            "{} {}: {} -> {}\n",
            verb,
            placement.kind,
            placement.source.display(),
            placement.destination.display()
        ));
    }
    out
}

//! Non-Steam shortcut management.
//!
//! Provides functionality for:
//! - Building shortcut records with Steam's default flags
//! - Scanning a profile's `shortcuts.vdf` for used app ids and free slots
//! - Inserting new shortcuts without overwriting existing ones
//!
//! # Example
//!
//! ```rust,ignore
//! use conductor_core::shortcut::{ShortcutRecord, ShortcutRegistry};
//! use conductor_core::{AppId, WriteMode};
//!
//! let mut registry = ShortcutRegistry::open("/path/to/userdata/123/config/shortcuts.vdf")?;
//! let app_id = AppId::generate("Foo", "/home/u/foo");
//! let index = registry.insert(&ShortcutRecord::new(app_id, "Foo", "/home/u/foo"))?;
//! registry.persist(WriteMode::Commit)?;
//! println!("Added {} at index {}", app_id, index);
//! ```

mod record;
mod registry;

pub use record::ShortcutRecord;
pub use registry::{scan_collection, CollectionScan, ShortcutRegistry};

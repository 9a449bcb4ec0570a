//! API implementation submodules.
//!
//! Each submodule contains `impl Conductor` blocks that extend the public API
//! with domain-specific methods. The struct definition remains in `lib.rs`.

mod builder;
mod shortcuts;

pub use builder::ConductorBuilder;
pub use shortcuts::{AddShortcutReport, AddShortcutRequest, ShortcutRegistered};

//! Platform and filesystem layout helpers.
//!
//! - `paths` - Steam root discovery, profile lookup and `~` expansion
//! - `persist` - The commit/dry-run write capability

pub mod paths;
pub mod persist;

pub use paths::{default_steam_root, expand_tilde, SteamPaths};
pub use persist::{Persisted, WriteMode};

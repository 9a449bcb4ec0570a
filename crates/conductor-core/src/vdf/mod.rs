//! Valve KeyValues (VDF) store.
//!
//! Provides an ordered, nested key/value tree with two framings:
//! - `binary` - the compact form Steam uses for `shortcuts.vdf`
//! - `text` - the brace-delimited form used by `config.vdf`
//!
//! [`VdfFile`] ties a tree to a path and framing with load/save/pretty-print.

pub mod binary;
mod file;
pub mod text;
mod value;

pub use file::{Framing, VdfFile};
pub use value::{VdfMap, VdfValue};

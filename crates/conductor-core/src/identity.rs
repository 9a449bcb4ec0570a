//! Deterministic app ids for non-Steam shortcuts.
//!
//! The id is derived from `name ++ exe_path`: the first 8 hex digits of the
//! MD5 digest, reduced modulo 10^9 and negated. This does not reproduce the
//! Steam client's own shortcut id scheme; it only has to be stable and fit a
//! signed 32-bit field.

use crate::config::IdentityConfig;
use md5::{Digest, Md5};
use serde::{Serialize, Serializer};
use std::fmt;

/// A shortcut app id.
///
/// The signed form is what gets stored in `shortcuts.vdf` and used as the
/// `CompatToolMapping` key. The unsigned form is the two's-complement view
/// Steam shows to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId {
    signed: i32,
}

impl AppId {
    /// Derive the id for a shortcut name and executable path.
    pub fn generate(app_name: &str, exe_path: &str) -> Self {
        Self::from_seed(&format!("{}{}", app_name, exe_path))
    }

    /// Derive the id for a raw seed string.
    pub fn from_seed(seed: &str) -> Self {
        let digest = hex::encode(Md5::digest(seed.as_bytes()));
        let prefix = &digest[..IdentityConfig::DIGEST_PREFIX_LEN];
        // 8 hex digits always fit a u32.
        let value = u32::from_str_radix(prefix, 16).unwrap_or_default();
        let reduced = value % IdentityConfig::MODULUS;
        Self {
            signed: -(reduced as i32),
        }
    }

    pub fn from_signed(signed: i32) -> Self {
        Self { signed }
    }

    pub fn signed(&self) -> i32 {
        self.signed
    }

    /// Storage key form, e.g. `-123456789`.
    ///
    /// Generated ids are never positive and always carry the `-` prefix, so
    /// a digest that reduces to zero is keyed as `-0`.
    pub fn signed_key(&self) -> String {
        if self.signed <= 0 {
            format!("-{}", self.signed.unsigned_abs())
        } else {
            self.signed.to_string()
        }
    }

    /// Display form: `signed + 2^32`.
    pub fn unsigned(&self) -> u64 {
        (i64::from(self.signed) + IdentityConfig::UNSIGNED_OFFSET) as u64
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unsigned())
    }
}

/// Serializes as the unsigned display form.
impl Serialize for AppId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.unsigned())
    }
}

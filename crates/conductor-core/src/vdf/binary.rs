//! Binary VDF framing, as used by `shortcuts.vdf`.
//!
//! Each entry is a type byte, a NUL-terminated key and a payload. Maps hold
//! nested entries up to an `END` byte; the root is an implicit map.

use super::value::{VdfMap, VdfValue};
use crate::error::{ConductorError, Result};

const TYPE_MAP: u8 = 0x00;
const TYPE_STRING: u8 = 0x01;
const TYPE_INT32: u8 = 0x02;
const TYPE_FLOAT32: u8 = 0x03;
const TYPE_UINT64: u8 = 0x07;
const TYPE_END: u8 = 0x08;
const TYPE_INT64: u8 = 0x0A;

/// Decode a binary VDF document.
///
/// An empty input decodes to an empty root.
pub fn decode(bytes: &[u8]) -> Result<VdfMap> {
    if bytes.is_empty() {
        return Ok(VdfMap::new());
    }

    let mut reader = Reader { bytes, pos: 0 };
    let root = reader.read_map()?;
    if reader.pos != bytes.len() {
        return Err(reader.error("trailing bytes after root map"));
    }
    Ok(root)
}

/// Encode a map as a binary VDF document.
pub fn encode(root: &VdfMap) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_map(&mut out, root)?;
    Ok(out)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn error(&self, message: impl Into<String>) -> ConductorError {
        ConductorError::VdfParse {
            path: None,
            offset: self.pos,
            message: message.into(),
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| self.error("unexpected end of data"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.pos + N;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| self.error(format!("expected {} bytes", N)))?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(slice);
        self.pos = end;
        Ok(buf)
    }

    fn read_cstring(&mut self) -> Result<String> {
        let rest = &self.bytes[self.pos..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| self.error("unterminated string"))?;
        let s = std::str::from_utf8(&rest[..len])
            .map_err(|e| self.error(format!("invalid UTF-8: {}", e)))?
            .to_string();
        self.pos += len + 1;
        Ok(s)
    }

    fn read_map(&mut self) -> Result<VdfMap> {
        let mut map = VdfMap::new();
        loop {
            let type_offset = self.pos;
            let kind = self.read_u8()?;
            if kind == TYPE_END {
                return Ok(map);
            }
            let key = self.read_cstring()?;
            let value = match kind {
                TYPE_MAP => VdfValue::Map(self.read_map()?),
                TYPE_STRING => VdfValue::String(self.read_cstring()?),
                TYPE_INT32 => VdfValue::Int32(i32::from_le_bytes(self.read_array()?)),
                TYPE_FLOAT32 => VdfValue::Float32(f32::from_le_bytes(self.read_array()?)),
                TYPE_UINT64 => VdfValue::UInt64(u64::from_le_bytes(self.read_array()?)),
                TYPE_INT64 => VdfValue::Int64(i64::from_le_bytes(self.read_array()?)),
                other => {
                    return Err(ConductorError::VdfParse {
                        path: None,
                        offset: type_offset,
                        message: format!("unsupported value type 0x{:02x} for key {:?}", other, key),
                    });
                }
            };
            map.push(key, value);
        }
    }
}

fn write_cstring(out: &mut Vec<u8>, s: &str) -> Result<()> {
    if s.as_bytes().contains(&0) {
        return Err(ConductorError::VdfEncode {
            message: format!("string contains NUL byte: {:?}", s),
        });
    }
    out.extend_from_slice(s.as_bytes());
    out.push(0);
    Ok(())
}

fn write_map(out: &mut Vec<u8>, map: &VdfMap) -> Result<()> {
    for (key, value) in map.iter() {
        let kind = match value {
            VdfValue::Map(_) => TYPE_MAP,
            VdfValue::String(_) => TYPE_STRING,
            VdfValue::Int32(_) => TYPE_INT32,
            VdfValue::Float32(_) => TYPE_FLOAT32,
            VdfValue::UInt64(_) => TYPE_UINT64,
            VdfValue::Int64(_) => TYPE_INT64,
        };
        out.push(kind);
        write_cstring(out, key)?;
        match value {
            VdfValue::Map(nested) => write_map(out, nested)?,
            VdfValue::String(s) => write_cstring(out, s)?,
            VdfValue::Int32(v) => out.extend_from_slice(&v.to_le_bytes()),
            VdfValue::Float32(v) => out.extend_from_slice(&v.to_le_bytes()),
            VdfValue::UInt64(v) => out.extend_from_slice(&v.to_le_bytes()),
            VdfValue::Int64(v) => out.extend_from_slice(&v.to_le_bytes()),
        }
    }
    out.push(TYPE_END);
    Ok(())
}

//! GLB binary container framing.
//!
//! Layout (little endian):
//!
//! ```text
//! header : magic u32 | version u32 | total length u32
//! chunk  : length u32 | type u32 | data[length]
//! ```
//!
//! Chunk 0 is JSON, chunk 1 (optional) is BIN and backs buffer 0.

use crate::errors::{LoadError, Result};

/// `"glTF"` read as a little-endian u32.
pub const GLB_MAGIC: u32 = 0x4654_6C67;
/// `"JSON"` chunk type.
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
/// `"BIN\0"` chunk type.
pub const CHUNK_BIN: u32 = 0x004E_4942;
/// Supported container major version.
pub const GLB_VERSION: u32 = 2;

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// The JSON text and optional binary payload of a glTF asset.
#[derive(Debug, Clone, Copy)]
pub struct Container<'a> {
    pub json: &'a [u8],
    pub bin: Option<&'a [u8]>,
}

impl<'a> Container<'a> {
    /// Splits `bytes` as GLB when it starts with the magic, otherwise treats
    /// the whole input as JSON.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        if is_glb(bytes) {
            parse_glb(bytes)
        } else {
            Ok(Self {
                json: bytes,
                bin: None,
            })
        }
    }
}

/// `true` if `bytes` starts with the GLB magic.
#[must_use]
pub fn is_glb(bytes: &[u8]) -> bool {
    read_u32(bytes, 0) == Some(GLB_MAGIC)
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let raw = bytes.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// Parses the GLB header and its JSON / BIN chunks.
pub fn parse_glb(bytes: &[u8]) -> Result<Container<'_>> {
    if bytes.len() < HEADER_LEN {
        return Err(LoadError::format(format!(
            "GLB input is {} bytes, shorter than the 12 byte header",
            bytes.len()
        )));
    }
    let magic = read_u32(bytes, 0).unwrap_or_default();
    if magic != GLB_MAGIC {
        return Err(LoadError::format(format!("bad GLB magic 0x{magic:08X}")));
    }
    let version = read_u32(bytes, 4).unwrap_or_default();
    if version != GLB_VERSION {
        return Err(LoadError::format(format!(
            "unsupported GLB container version {version} (expected {GLB_VERSION})"
        )));
    }
    let total = read_u32(bytes, 8).unwrap_or_default() as usize;
    if total > bytes.len() {
        return Err(LoadError::format(format!(
            "GLB header declares {total} bytes but only {} are available",
            bytes.len()
        )));
    }
    let body = &bytes[..total];

    let (json_type, json, next) = read_chunk(body, HEADER_LEN)?
        .ok_or_else(|| LoadError::format("GLB contains no JSON chunk"))?;
    if json_type != CHUNK_JSON {
        return Err(LoadError::format(format!(
            "first GLB chunk has type 0x{json_type:08X}, expected JSON"
        )));
    }

    let bin = match read_chunk(body, next)? {
        Some((CHUNK_BIN, data, _)) => Some(data),
        Some((other, _, _)) => {
            return Err(LoadError::format(format!(
                "second GLB chunk has type 0x{other:08X}, expected BIN"
            )));
        }
        None => None,
    };

    Ok(Container { json, bin })
}

/// Reads the chunk starting at `offset`; `None` at the end of the container.
fn read_chunk(body: &[u8], offset: usize) -> Result<Option<(u32, &[u8], usize)>> {
    if offset >= body.len() {
        return Ok(None);
    }
    let (Some(len), Some(kind)) = (read_u32(body, offset), read_u32(body, offset + 4)) else {
        return Err(LoadError::format(format!(
            "truncated GLB chunk header at byte {offset}"
        )));
    };
    let start = offset + CHUNK_HEADER_LEN;
    let end = start.saturating_add(len as usize);
    if end > body.len() {
        return Err(LoadError::format(format!(
            "GLB chunk at byte {offset} declares {len} bytes, overrunning the container"
        )));
    }
    Ok(Some((kind, &body[start..end], end)))
}

//! # Identity Codec
//!
//! Two string encodings name scene objects:
//!
//! - **Compact** `regionUUID` or `regionUUID/primitiveUUID`. Short and exact,
//!   but only valid for the lifetime of one loaded scene.
//! - **Path** `__r<regionPath>` for a region, `<regionPath>/<groupName>` for
//!   the primitives of a group. Survives reloads as long as names do, but a
//!   group path may match several primitives.
//!
//! Nothing here validates UUID syntax. A malformed identity decodes fine and
//! simply fails to resolve later.

use std::fmt;

/// Prefix marking a path identity that names a region
pub const REGION_PREFIX: &str = "__r";

/// Decoded compact identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompactIdentity {
    pub region_uuid: String,
    pub primitive_uuid: Option<String>,
}

impl fmt::Display for CompactIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.primitive_uuid {
            Some(primitive) => write!(f, "{}/{}", self.region_uuid, primitive),
            None => write!(f, "{}", self.region_uuid),
        }
    }
}

/// Decoded path identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathIdentity {
    Region(String),
    Group { region_path: String, group: String },
}

impl fmt::Display for PathIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathIdentity::Region(path) => f.write_str(&encode_path(path, None)),
            PathIdentity::Group { region_path, group } => {
                f.write_str(&encode_path(region_path, Some(group)))
            }
        }
    }
}

pub fn encode_compact(region_uuid: &str, primitive_uuid: Option<&str>) -> String {
    match primitive_uuid {
        Some(primitive) => format!("{}/{}", region_uuid, primitive),
        None => region_uuid.to_string(),
    }
}

/// Encode a path identity
///
/// A region path that already ends with `/` is not given a second separator
/// before the group name.
pub fn encode_path(region_path: &str, group: Option<&str>) -> String {
    match group {
        Some(group) if region_path.ends_with('/') => format!("{}{}", region_path, group),
        Some(group) => format!("{}/{}", region_path, group),
        None => format!("{}{}", REGION_PREFIX, region_path),
    }
}

/// Split a compact identity on its first `/`
pub fn decode_compact(s: &str) -> CompactIdentity {
    match s.split_once('/') {
        Some((region, primitive)) => CompactIdentity {
            region_uuid: region.to_string(),
            primitive_uuid: Some(primitive.to_string()),
        },
        None => CompactIdentity {
            region_uuid: s.to_string(),
            primitive_uuid: None,
        },
    }
}

/// Parse a path identity
///
/// Group identities are split at the last `/`, so group names must not contain
/// a slash. An identity without any slash is a group in the root region.
pub fn decode_path(s: &str) -> PathIdentity {
    if let Some(path) = s.strip_prefix(REGION_PREFIX) {
        return PathIdentity::Region(path.to_string());
    }
    let (region_path, group) = split_last(s);
    PathIdentity::Group {
        region_path: region_path.to_string(),
        group: group.to_string(),
    }
}

/// Decode a stored feature id into `(region path, group name)`
///
/// Ids arrive percent-encoded from the annotation service. They are decoded
/// first and then split at the last `/`.
pub fn decode_feature_id(id: &str) -> (String, String) {
    let decoded = percent_decode(id);
    let (region, group) = split_last(&decoded);
    (region.to_string(), group.to_string())
}

fn split_last(s: &str) -> (&str, &str) {
    match s.rfind('/') {
        Some(last) => (&s[..last], &s[last + 1..]),
        None => ("", s),
    }
}

/// Decode `%XX` escapes. Escapes that are malformed, or that would produce
/// invalid UTF-8, are left as written.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| s.to_string())
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

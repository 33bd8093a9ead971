//! Canonical mod records and the normalizer that builds them from raw manifest entries

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Fallback for a missing name or author
pub const UNKNOWN: &str = "Unknown";

/// One mod entry, normalized and defaulted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRecord {
    /// Display name, falling back to the internal name
    pub name: String,
    /// Author (Thunderstore team) name
    pub author: String,
    /// `major.minor.patch`
    pub version: String,
    /// Free-form description, possibly empty
    pub description: String,
    /// Whether the mod is active in the profile
    pub enabled: bool,
    /// Usually a Thunderstore link, possibly empty
    pub website: String,
}

impl ModRecord {
    /// Build a record from a raw mods.yml entry.
    ///
    /// Every field has a default, so this never fails: a non-mapping value
    /// simply yields a record of defaults.
    pub fn from_raw(raw: &Value) -> Self {
        let name = raw
            .get("displayName")
            .and_then(scalar_text)
            .or_else(|| raw.get("name").and_then(scalar_text))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let author = raw
            .get("authorName")
            .and_then(scalar_text)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let version = raw
            .get("versionNumber")
            .map(|v| Version {
                major: component(v, "major"),
                minor: component(v, "minor"),
                patch: component(v, "patch"),
            })
            .unwrap_or_default();

        Self {
            name,
            author,
            version: version.to_string(),
            description: raw
                .get("description")
                .and_then(scalar_text)
                .unwrap_or_default(),
            enabled: raw.get("enabled").is_some_and(flag),
            website: raw
                .get("websiteUrl")
                .and_then(scalar_text)
                .unwrap_or_default(),
        }
    }

    /// Identity key used to match the same mod across two exports
    pub fn key(&self) -> String {
        identity_key(&self.author, &self.name)
    }

    /// Parsed version, `0.0.0` when the string is malformed
    pub fn parsed_version(&self) -> Version {
        Version::parse_lenient(&self.version)
    }

    /// `Yes`/`No` as written to exports
    pub fn enabled_text(&self) -> &'static str {
        if self.enabled {
            ENABLED_YES
        } else {
            ENABLED_NO
        }
    }
}

/// Wire text for an enabled mod
pub const ENABLED_YES: &str = "Yes";
/// Wire text for a disabled mod
pub const ENABLED_NO: &str = "No";

/// Join author and name into an identity key.
///
/// No escaping: a ':' inside the author makes the key ambiguous.
pub fn identity_key(author: &str, name: &str) -> String {
    format!("{}:{}", author, name)
}

/// Split an identity key back into (author, name) at the first ':'
pub fn split_key(key: &str) -> (&str, &str) {
    key.split_once(':').unwrap_or((key, ""))
}

/// Sort by (author, name), case-insensitively. Ties keep their input order.
pub fn sort_records(records: &mut [ModRecord]) {
    records.sort_by_cached_key(|r| (r.author.to_lowercase(), r.name.to_lowercase()));
}

/// A three-part version compared numerically
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `major.minor.patch`, substituting `0.0.0` on any failure
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Error for a version string that is not three dot-separated integers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVersionError;

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected a version of the form major.minor.patch")
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.').map(|p| p.parse::<u64>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch)), None) => {
                Ok(Version::new(major, minor, patch))
            }
            _ => Err(ParseVersionError),
        }
    }
}

/// Render a scalar YAML value as text; null and collections yield None
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a loosely-typed enabled flag: booleans, non-zero numbers and
/// `true`/`yes`/`on`/`1` strings count as set
fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "on" | "1"
        ),
        _ => false,
    }
}

/// Read an integer-like version component, 0 when absent or unusable
fn component(version: &Value, field: &str) -> u64 {
    match version.get(field) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

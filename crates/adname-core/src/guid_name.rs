use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::ValidationError;

/// A GUID-based directory object name, rendered as `<GUID=...>`.
///
/// Equality and hashing are based on the wrapped GUID, not the rendering.
#[derive(Debug, Clone)]
pub struct GuidName {
    value: Uuid,
    rendered: String,
}

impl GuidName {
    pub fn new(value: Uuid) -> Self {
        let rendered = format!("<GUID={value}>");
        Self { value, rendered }
    }

    /// Parse a GUID name. Accepts the delimited `<GUID=...>` form as well as
    /// a bare GUID string.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::BlankValue("GuidName"));
        }

        let candidate = value.trim_matches(|c| c == '<' || c == '>');
        let candidate = candidate.strip_prefix("GUID=").unwrap_or(candidate);

        let guid = Uuid::parse_str(candidate)
            .map_err(|_| ValidationError::InvalidGuidName(value.to_owned()))?;

        Ok(Self::new(guid))
    }

    /// Parse variant that maps any failure to `None`.
    pub fn try_parse(value: &str) -> Option<Self> {
        Self::parse(value).ok()
    }

    pub fn value(&self) -> Uuid {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for GuidName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl PartialEq for GuidName {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for GuidName {}

impl Hash for GuidName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl From<Uuid> for GuidName {
    fn from(value: Uuid) -> Self {
        Self::new(value)
    }
}

impl FromStr for GuidName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for GuidName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GuidName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

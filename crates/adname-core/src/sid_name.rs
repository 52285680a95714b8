use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::sid::Sid;

/// A SID-based directory object name, rendered as `<SID=...>`.
///
/// Equality and hashing are based on the wrapped security identifier.
#[derive(Debug, Clone)]
pub struct SidName {
    value: Sid,
    rendered: String,
}

impl SidName {
    pub fn new(value: Sid) -> Self {
        let rendered = format!("<SID={value}>");
        Self { value, rendered }
    }

    /// Parse a SID name. Accepts the delimited `<SID=...>` form as well as a
    /// bare SDDL string.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::BlankValue("SidName"));
        }

        let candidate = value.trim_matches(|c| c == '<' || c == '>');
        let candidate = candidate.strip_prefix("SID=").unwrap_or(candidate);

        let sid = Sid::from_str(candidate)
            .map_err(|_| ValidationError::InvalidSidName(value.to_owned()))?;

        Ok(Self::new(sid))
    }

    /// Parse variant that maps any failure to `None`.
    pub fn try_parse(value: &str) -> Option<Self> {
        Self::parse(value).ok()
    }

    pub fn value(&self) -> &Sid {
        &self.value
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for SidName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl PartialEq for SidName {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for SidName {}

impl Hash for SidName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl From<Sid> for SidName {
    fn from(value: Sid) -> Self {
        Self::new(value)
    }
}

impl FromStr for SidName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SidName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SidName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_renders_delimited_form() {
        let name = SidName::new("S-1-5-32-544".parse().unwrap());
        assert_eq!(name.to_string(), "<SID=S-1-5-32-544>");
    }

    #[test]
    fn test_parse_delimited_form() {
        let name = SidName::parse("<SID=S-1-5-32-544>").unwrap();
        assert_eq!(name.value().sub_authorities(), &[32, 544]);
    }

    #[test]
    fn test_parse_bare_sid() {
        let name = SidName::parse("S-1-5-32-544").unwrap();
        assert_eq!(name.to_string(), "<SID=S-1-5-32-544>");
    }

    #[test]
    fn test_parse_rejects_blank_input() {
        assert_eq!(
            SidName::parse("").unwrap_err(),
            ValidationError::BlankValue("SidName")
        );
    }

    #[test]
    fn test_parse_rejects_malformed_sid() {
        assert_eq!(
            SidName::parse("<SID=S-1-bogus>").unwrap_err(),
            ValidationError::InvalidSidName("<SID=S-1-bogus>".into())
        );
    }

    #[test]
    fn test_equality_by_value() {
        let left = SidName::parse("S-1-5-32-544").unwrap();
        let right = SidName::parse("<SID=S-1-5-32-544>").unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_serde_round_trip() {
        let name = SidName::parse("S-1-5-32-544").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"<SID=S-1-5-32-544>\"");
        let back: SidName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }
}

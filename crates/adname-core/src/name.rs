use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Characters that must be backslash-escaped inside an RDN value.
const SPECIAL_CHARACTERS: &[char] = &[',', '\\', '#', '+', '<', '>', ';', '"', '='];

/// A single RDN value with LDAP-safe escaping.
///
/// The raw value is kept as given; the escaped rendering is computed once on
/// first use. Equality and hashing are based on the raw value, so two names
/// compare equal exactly when they were built from the same input, regardless
/// of whether either has been rendered yet.
#[derive(Debug)]
pub struct LdapName {
    raw: String,
    display: OnceLock<String>,
}

impl LdapName {
    /// Create a name from a raw attribute value.
    ///
    /// Fails when the value is empty or all-whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::BlankValue("LdapName"));
        }
        Ok(Self {
            raw,
            display: OnceLock::new(),
        })
    }

    /// The value exactly as supplied, unescaped.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The LDAP-safe rendering of the value.
    pub fn display(&self) -> &str {
        self.display.get_or_init(|| escape(&self.raw))
    }
}

/// Escape an attribute value for use inside an RDN.
///
/// Three passes compose: special characters first, then a leading space, then
/// a trailing space. A character that is already part of a two-character
/// escape sequence is left alone, so escaping never doubles up.
fn escape(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let chars = escape_special_characters(chars);
    let chars = escape_leading_space(chars);
    let chars = escape_trailing_space(chars);
    chars.into_iter().collect()
}

fn escape_special_characters(chars: Vec<char>) -> Vec<char> {
    if !chars.iter().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return chars;
    }

    let mut escaped = Vec::with_capacity(chars.len() + 4);

    for (i, &character) in chars.iter().enumerate() {
        let is_special = SPECIAL_CHARACTERS.contains(&character);
        let has_no_preceding_slash = i == 0 || chars[i - 1] != '\\';
        let is_escape_sequence = character == '\\'
            && i + 1 < chars.len()
            && SPECIAL_CHARACTERS.contains(&chars[i + 1]);

        if is_special && has_no_preceding_slash && !is_escape_sequence {
            escaped.push('\\');
        }

        escaped.push(character);
    }

    escaped
}

fn escape_leading_space(mut chars: Vec<char>) -> Vec<char> {
    if chars.first() == Some(&' ') {
        chars.insert(0, '\\');
    }
    chars
}

fn escape_trailing_space(mut chars: Vec<char>) -> Vec<char> {
    if chars.last() == Some(&' ') {
        chars.insert(chars.len() - 1, '\\');
    }
    chars
}

impl fmt::Display for LdapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

impl Clone for LdapName {
    fn clone(&self) -> Self {
        let display = OnceLock::new();
        if let Some(rendered) = self.display.get() {
            let _ = display.set(rendered.clone());
        }
        Self {
            raw: self.raw.clone(),
            display,
        }
    }
}

impl PartialEq for LdapName {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for LdapName {}

impl Hash for LdapName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl FromStr for LdapName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for LdapName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.raw())
    }
}

impl<'de> Deserialize<'de> for LdapName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::name::LdapName;
use crate::naming_attribute::NamingAttribute;

/// A relative distinguished name: one `ATTR=value` segment of a DN.
///
/// The canonical string form pairs the attribute with the escaped rendering
/// of the name. Equality and hashing are based on that canonical form,
/// case-sensitive and exact.
#[derive(Debug, Clone)]
pub struct Rdn {
    attribute: NamingAttribute,
    name: LdapName,
    rendered: String,
}

impl Rdn {
    pub fn new(attribute: NamingAttribute, name: LdapName) -> Self {
        let rendered = format!("{attribute}={}", name.display());
        Self {
            attribute,
            name,
            rendered,
        }
    }

    /// Parse an `ATTR=value` segment.
    ///
    /// The input must contain exactly one `=`, the attribute token must be
    /// one of CN/OU/DC in canonical form, and the value must be non-blank.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::BlankValue("RDN"));
        }

        let (attribute, name) = value
            .split_once('=')
            .ok_or_else(|| ValidationError::InvalidRdn(value.to_owned()))?;

        if name.contains('=') {
            return Err(ValidationError::InvalidRdn(value.to_owned()));
        }

        let attribute = NamingAttribute::from_str(attribute)
            .map_err(|_| ValidationError::UnknownNamingAttribute(attribute.to_owned()))?;
        let name = LdapName::new(name)?;

        Ok(Self::new(attribute, name))
    }

    /// Parse variant that maps any failure to `None`.
    pub fn try_parse(value: &str) -> Option<Self> {
        Self::parse(value).ok()
    }

    pub fn attribute(&self) -> NamingAttribute {
        self.attribute
    }

    pub fn name(&self) -> &LdapName {
        &self.name
    }

    /// Canonical `ATTR=value` form.
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for Rdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl PartialEq for Rdn {
    fn eq(&self, other: &Self) -> bool {
        self.rendered == other.rendered
    }
}

impl Eq for Rdn {}

impl Hash for Rdn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rendered.hash(state);
    }
}

impl FromStr for Rdn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Rdn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rdn {
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
    fn test_new_renders_canonical_form() {
        let rdn = Rdn::new(NamingAttribute::Cn, LdapName::new("John Doe").unwrap());
        assert_eq!(rdn.to_string(), "CN=John Doe");
    }

    #[test]
    fn test_rendered_name_is_escaped() {
        let rdn = Rdn::new(NamingAttribute::Cn, LdapName::new("Doe, John").unwrap());
        assert_eq!(rdn.to_string(), r"CN=Doe\, John");
    }

    #[test]
    fn test_parse_valid_segment() {
        let rdn = Rdn::parse("OU=Users").unwrap();
        assert_eq!(rdn.attribute(), NamingAttribute::Ou);
        assert_eq!(rdn.name().raw(), "Users");
    }

    #[test]
    fn test_parse_rejects_blank_input() {
        assert_eq!(
            Rdn::parse(" ").unwrap_err(),
            ValidationError::BlankValue("RDN")
        );
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert_eq!(
            Rdn::parse("CNJohn").unwrap_err(),
            ValidationError::InvalidRdn("CNJohn".into())
        );
    }

    #[test]
    fn test_parse_rejects_multiple_separators() {
        assert_eq!(
            Rdn::parse("CN=a=b").unwrap_err(),
            ValidationError::InvalidRdn("CN=a=b".into())
        );
    }

    #[test]
    fn test_parse_rejects_unknown_attribute() {
        assert_eq!(
            Rdn::parse("DN=John").unwrap_err(),
            ValidationError::UnknownNamingAttribute("DN".into())
        );
        assert_eq!(
            Rdn::parse("cn=John").unwrap_err(),
            ValidationError::UnknownNamingAttribute("cn".into())
        );
    }

    #[test]
    fn test_parse_rejects_blank_name() {
        assert_eq!(
            Rdn::parse("CN= ").unwrap_err(),
            ValidationError::BlankValue("LdapName")
        );
    }

    #[test]
    fn test_try_parse() {
        assert!(Rdn::try_parse("CN=John").is_some());
        assert!(Rdn::try_parse("bogus").is_none());
    }

    #[test]
    fn test_equality_on_canonical_form() {
        let left = Rdn::parse("CN=John").unwrap();
        let right = Rdn::new(NamingAttribute::Cn, LdapName::new("John").unwrap());
        assert_eq!(left, right);
        assert_ne!(left, Rdn::parse("CN=Jane").unwrap());
    }

    #[test]
    fn test_serde_round_trip() {
        let rdn = Rdn::parse("CN=John").unwrap();
        let json = serde_json::to_string(&rdn).unwrap();
        assert_eq!(json, "\"CN=John\"");
        let back: Rdn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rdn);
    }
}

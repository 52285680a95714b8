use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};
use tracing::trace;

use crate::dn::Dn;
use crate::error::ValidationError;
use crate::guid_name::GuidName;
use crate::sid_name::SidName;

/// Directory service provider a path binds through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum AdsProvider {
    #[strum(serialize = "LDAP")]
    Ldap,
    #[strum(serialize = "GC")]
    Gc,
}

/// Any of the forms a directory object can be addressed by: a distinguished
/// name, a GUID name, a SID name, or the unnamed RootDSE entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AdsObjectName {
    Dn(Dn),
    Guid(GuidName),
    Sid(SidName),
    RootDse,
}

impl AdsObjectName {
    /// Parse whichever name form matches first: DN, then GUID name, then SID
    /// name.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if let Some(dn) = Dn::try_parse(value) {
            return Ok(Self::Dn(dn));
        }
        if let Some(guid) = GuidName::try_parse(value) {
            return Ok(Self::Guid(guid));
        }
        if let Some(sid) = SidName::try_parse(value) {
            return Ok(Self::Sid(sid));
        }
        Err(ValidationError::InvalidObjectName(value.to_owned()))
    }
}

impl fmt::Display for AdsObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dn(dn) => dn.fmt(f),
            Self::Guid(guid) => guid.fmt(f),
            Self::Sid(sid) => sid.fmt(f),
            Self::RootDse => f.write_str("RootDSE"),
        }
    }
}

impl From<Dn> for AdsObjectName {
    fn from(value: Dn) -> Self {
        Self::Dn(value)
    }
}

impl From<GuidName> for AdsObjectName {
    fn from(value: GuidName) -> Self {
        Self::Guid(value)
    }
}

impl From<SidName> for AdsObjectName {
    fn from(value: SidName) -> Self {
        Self::Sid(value)
    }
}

/// A provider-qualified, optionally server-qualified locator for a directory
/// object: `{provider}://{server/}{objectName}`.
///
/// The provider defaults to LDAP when not set; the server segment and its
/// trailing slash are omitted when no server is set.
#[derive(Debug, Clone)]
pub struct AdsPath {
    provider: Option<AdsProvider>,
    server: Option<String>,
    object_name: AdsObjectName,
    rendered: String,
}

impl AdsPath {
    /// Server-less path through the default LDAP provider.
    pub fn new(object_name: impl Into<AdsObjectName>) -> Self {
        Self::build(None, None, object_name.into())
    }

    pub fn with_provider(provider: AdsProvider, object_name: impl Into<AdsObjectName>) -> Self {
        Self::build(Some(provider), None, object_name.into())
    }

    pub fn with_server(server: impl Into<String>, object_name: impl Into<AdsObjectName>) -> Self {
        Self::build(None, Some(server.into()), object_name.into())
    }

    pub fn with_provider_and_server(
        provider: AdsProvider,
        server: impl Into<String>,
        object_name: impl Into<AdsObjectName>,
    ) -> Self {
        Self::build(Some(provider), Some(server.into()), object_name.into())
    }

    /// The special unnamed root path, rendering as `LDAP://RootDSE`.
    pub fn root_dse() -> Self {
        Self::new(AdsObjectName::RootDse)
    }

    fn build(
        provider: Option<AdsProvider>,
        server: Option<String>,
        object_name: AdsObjectName,
    ) -> Self {
        let mut rendered = format!("{}://", provider.unwrap_or(AdsProvider::Ldap));
        if let Some(server) = &server {
            rendered.push_str(server);
            rendered.push('/');
        }
        rendered.push_str(&object_name.to_string());

        Self {
            provider,
            server,
            object_name,
            rendered,
        }
    }

    /// Parse a path trying three forms in order: URI form with a server,
    /// provider-prefixed form without a server, and a bare object name. The
    /// first form that matches wins.
    pub fn parse(path: &str) -> Result<Self, ValidationError> {
        if let Some(parsed) = Self::parse_with_server(path) {
            return Ok(parsed);
        }
        trace!(path, "not a server-qualified path, trying provider prefix");

        if let Some(parsed) = Self::parse_without_server(path) {
            return Ok(parsed);
        }
        trace!(path, "no provider prefix, trying bare object name");

        if let Some(parsed) = Self::parse_bare_name(path) {
            return Ok(parsed);
        }

        Err(ValidationError::InvalidAdsPath(path.to_owned()))
    }

    /// Parse variant that maps any failure to `None`.
    pub fn try_parse(path: &str) -> Option<Self> {
        Self::parse(path).ok()
    }

    /// `scheme://host/dn` — the scheme is matched case-insensitively against
    /// the known providers and everything after the first slash must be a DN.
    fn parse_with_server(path: &str) -> Option<Self> {
        let (scheme, rest) = path.split_once("://")?;
        let provider = AdsProvider::from_str(scheme).ok()?;
        let (server, name) = rest.split_once('/')?;

        // a segment with name characters in the host slot is not a server
        if server.is_empty() || server.contains('=') || server.contains('<') {
            return None;
        }

        let dn = Dn::try_parse(name)?;
        Some(Self::with_provider_and_server(provider, server, dn))
    }

    /// `PROVIDER://name` with the provider prefix matched exactly.
    fn parse_without_server(path: &str) -> Option<Self> {
        let (provider, name) = if let Some(rest) = path.strip_prefix("LDAP://") {
            (AdsProvider::Ldap, rest)
        } else if let Some(rest) = path.strip_prefix("GC://") {
            (AdsProvider::Gc, rest)
        } else {
            return None;
        };

        let object_name = AdsObjectName::parse(name).ok()?;
        Some(Self::with_provider(provider, object_name))
    }

    fn parse_bare_name(path: &str) -> Option<Self> {
        let object_name = AdsObjectName::parse(path).ok()?;
        Some(Self::new(object_name))
    }

    /// The provider, defaulted to LDAP when none was set.
    pub fn provider(&self) -> AdsProvider {
        self.provider.unwrap_or(AdsProvider::Ldap)
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn object_name(&self) -> &AdsObjectName {
        &self.object_name
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for AdsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl PartialEq for AdsPath {
    fn eq(&self, other: &Self) -> bool {
        self.rendered == other.rendered
    }
}

impl Eq for AdsPath {}

impl Hash for AdsPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rendered.hash(state);
    }
}

impl FromStr for AdsPath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for AdsPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AdsPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn object_name() -> Dn {
        Dn::parse("CN=John Doe,OU=Users,DC=domain,DC=com").unwrap()
    }

    #[test]
    fn test_provider_parse_is_case_insensitive() {
        assert_eq!(AdsProvider::from_str("ldap"), Ok(AdsProvider::Ldap));
        assert_eq!(AdsProvider::from_str("GC"), Ok(AdsProvider::Gc));
        assert!(AdsProvider::from_str("WINNT").is_err());
    }

    #[test]
    fn test_object_name_only_renders_server_less_ldap_binding() {
        let path = AdsPath::new(object_name());
        assert_eq!(
            path.to_string(),
            "LDAP://CN=John Doe,OU=Users,DC=domain,DC=com"
        );
    }

    #[test]
    fn test_server_renders_full_binding() {
        let path = AdsPath::with_server("dc1.domain.com", object_name());
        assert_eq!(
            path.to_string(),
            "LDAP://dc1.domain.com/CN=John Doe,OU=Users,DC=domain,DC=com"
        );
    }

    #[test]
    fn test_all_parts_render() {
        let path = AdsPath::with_provider_and_server(AdsProvider::Gc, "dc1.domain.com", object_name());
        assert_eq!(
            path.to_string(),
            "GC://dc1.domain.com/CN=John Doe,OU=Users,DC=domain,DC=com"
        );
    }

    #[test]
    fn test_root_dse() {
        assert_eq!(AdsPath::root_dse().to_string(), "LDAP://RootDSE");
    }

    #[test]
    fn test_parse_path_with_server() {
        let path = AdsPath::parse("LDAP://dc1.domain.com/CN=John Doe,OU=Users,DC=domain,DC=com")
            .unwrap();
        assert_eq!(path.provider(), AdsProvider::Ldap);
        assert_eq!(path.server(), Some("dc1.domain.com"));
        assert_eq!(
            path.object_name().to_string(),
            "CN=John Doe,OU=Users,DC=domain,DC=com"
        );
    }

    #[test]
    fn test_parse_path_with_guid_name() {
        let path = AdsPath::parse("LDAP://<GUID=da1432ec-c560-40cf-9a75-bc8b77336082>").unwrap();
        assert_eq!(path.provider(), AdsProvider::Ldap);
        assert_eq!(
            path.object_name().to_string(),
            "<GUID=da1432ec-c560-40cf-9a75-bc8b77336082>"
        );
    }

    #[test]
    fn test_parse_path_with_sid_name() {
        let path = AdsPath::parse("LDAP://<SID=S-1-5-32-544>").unwrap();
        assert_eq!(path.object_name().to_string(), "<SID=S-1-5-32-544>");
    }

    #[test]
    fn test_parse_path_without_server() {
        let path = AdsPath::parse("LDAP://CN=John Doe,OU=Users,DC=domain,DC=com").unwrap();
        assert_eq!(path.server(), None);
        assert_eq!(
            path.to_string(),
            "LDAP://CN=John Doe,OU=Users,DC=domain,DC=com"
        );
    }

    #[test]
    fn test_parse_gc_path() {
        let path = AdsPath::parse("GC://DC=domain,DC=com").unwrap();
        assert_eq!(path.provider(), AdsProvider::Gc);
    }

    #[test]
    fn test_parse_bare_name() {
        let path = AdsPath::parse("CN=John Doe,OU=Users,DC=domain,DC=com").unwrap();
        assert_eq!(
            path.to_string(),
            "LDAP://CN=John Doe,OU=Users,DC=domain,DC=com"
        );
    }

    #[test]
    fn test_parse_bare_sid_name() {
        let path = AdsPath::parse("<SID=S-1-5-32-544>").unwrap();
        assert_eq!(path.to_string(), "LDAP://<SID=S-1-5-32-544>");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            AdsPath::parse("Hello").unwrap_err(),
            ValidationError::InvalidAdsPath("Hello".into())
        );
    }

    #[test]
    fn test_parse_rejects_blank_input() {
        for path in ["", " "] {
            assert_eq!(
                AdsPath::parse(path).unwrap_err(),
                ValidationError::InvalidAdsPath(path.into()),
                "{path:?}"
            );
        }
    }

    #[test]
    fn test_try_parse() {
        assert!(AdsPath::try_parse("LDAP://CN=John").is_some());
        assert!(AdsPath::try_parse("Hello").is_none());
    }

    #[test]
    fn test_parsed_path_round_trips() {
        let value = "GC://dc1.domain.com/CN=John Doe,OU=Users,DC=domain,DC=com";
        assert_eq!(AdsPath::parse(value).unwrap().to_string(), value);
    }

    #[test]
    fn test_equality_by_rendered_form() {
        let left = AdsPath::parse("LDAP://CN=John").unwrap();
        let right = AdsPath::new(Dn::parse("CN=John").unwrap());
        assert_eq!(left, right);
    }

    #[test]
    fn test_serde_round_trip() {
        let path = AdsPath::with_server("dc1", Dn::parse("CN=John").unwrap());
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"LDAP://dc1/CN=John\"");
        let back: AdsPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::name::LdapName;
use crate::naming_attribute::NamingAttribute;
use crate::rdn::Rdn;

/// RDNs exempted from the CN-must-be-followed-by-OU rule. These are the
/// generic containers a default Active Directory domain ships with.
const WELL_KNOWN_GENERIC_CONTAINERS: &[&str] = &[
    "CN=Users",
    "CN=Builtin",
    "CN=Computers",
    "CN=ForeignSecurityPrincipals",
    "CN=LostAndFound",
    "CN=Managed Service Accounts",
    "CN=Program Data",
    "CN=System",
    "CN=NTDS Quotas",
    "CN=TPM Devices",
    "CN=Infrastructure",
];

/// A distinguished name: a non-empty ordered sequence of RDNs, most specific
/// first.
///
/// Construction validates the naming-attribute sequence, so a value of this
/// type always names a structurally plausible directory object. The string
/// form is rendered once at construction; the derived views (parent, domain,
/// FQDN) are computed on first access and cached.
#[derive(Debug)]
pub struct Dn {
    rdns: Vec<Rdn>,
    rendered: String,
    parent: OnceLock<Option<Box<Dn>>>,
    domain: OnceLock<Option<Box<Dn>>>,
    fqdn: OnceLock<Option<String>>,
}

impl Dn {
    /// Build a DN from an ordered RDN list, most specific first.
    pub fn new(rdns: Vec<Rdn>) -> Result<Self, ValidationError> {
        if rdns.is_empty() {
            return Err(ValidationError::EmptyRdnList);
        }
        check_rdn_sequence(&rdns)?;
        Ok(Self::from_validated(rdns))
    }

    /// Build without re-running the sequence check. Callers must pass a
    /// non-empty list that is a valid sequence (e.g. a suffix of an already
    /// validated one).
    fn from_validated(rdns: Vec<Rdn>) -> Self {
        let rendered = join_rdns(&rdns);
        Self {
            rdns,
            rendered,
            parent: OnceLock::new(),
            domain: OnceLock::new(),
            fqdn: OnceLock::new(),
        }
    }

    /// Parse a comma-separated DN string.
    ///
    /// The input is split on commas not preceded by an unescaped backslash;
    /// segments are trimmed before being parsed as RDNs. A failure inside any
    /// segment is reported as one error citing the whole input; a sequence
    /// violation keeps its own error.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::BlankValue("DN"));
        }

        let rdns = split_unescaped_commas(value)
            .into_iter()
            .map(|segment| Rdn::parse(segment.trim()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ValidationError::InvalidDn(value.to_owned()))?;

        Self::new(rdns)
    }

    /// Parse variant that maps any failure to `None`.
    pub fn try_parse(value: &str) -> Option<Self> {
        Self::parse(value).ok()
    }

    /// Build a pure-DC DN from a dotted domain name, e.g. `domain.com`
    /// becomes `DC=domain,DC=com`.
    pub fn from_fqdn(fqdn: &str) -> Result<Self, ValidationError> {
        if fqdn.trim().is_empty() {
            return Err(ValidationError::BlankValue("FQDN"));
        }

        let rdns = fqdn
            .split('.')
            .map(|label| Ok(Rdn::new(NamingAttribute::Dc, LdapName::new(label)?)))
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Self::new(rdns)
    }

    pub fn rdns(&self) -> &[Rdn] {
        &self.rdns
    }

    /// The leaf RDN naming the object itself.
    pub fn addressable_object_name(&self) -> &Rdn {
        &self.rdns[0]
    }

    /// All RDNs except the leaf, or `None` for a single-segment DN.
    pub fn parent(&self) -> Option<&Dn> {
        self.parent
            .get_or_init(|| {
                if self.rdns.len() == 1 {
                    None
                } else {
                    Some(Box::new(Self::from_validated(self.rdns[1..].to_vec())))
                }
            })
            .as_deref()
    }

    /// The DC-only portion of this DN, or `None` when no DC RDNs exist.
    pub fn domain(&self) -> Option<&Dn> {
        self.domain
            .get_or_init(|| {
                let dc_rdns: Vec<Rdn> = self
                    .rdns
                    .iter()
                    .filter(|rdn| rdn.attribute() == NamingAttribute::Dc)
                    .cloned()
                    .collect();
                if dc_rdns.is_empty() {
                    None
                } else {
                    Some(Box::new(Self::from_validated(dc_rdns)))
                }
            })
            .as_deref()
    }

    /// Dot-joined domain labels, or `None` when this DN has no domain part.
    pub fn fqdn(&self) -> Option<&str> {
        self.fqdn
            .get_or_init(|| {
                self.domain().map(|domain| {
                    domain
                        .rdns()
                        .iter()
                        .map(|rdn| rdn.name().display())
                        .collect::<Vec<_>>()
                        .join(".")
                })
            })
            .as_deref()
    }

    /// A new DN with the given RDNs appended after this DN's sequence.
    pub fn append(&self, rdns: impl IntoIterator<Item = Rdn>) -> Result<Dn, ValidationError> {
        Self::new(self.rdns.iter().cloned().chain(rdns).collect())
    }

    /// A new DN with another DN's sequence appended after this one.
    pub fn append_dn(&self, other: &Dn) -> Result<Dn, ValidationError> {
        self.append(other.rdns.iter().cloned())
    }

    /// A new DN with the given RDNs placed before this DN's sequence.
    pub fn prepend(&self, rdns: impl IntoIterator<Item = Rdn>) -> Result<Dn, ValidationError> {
        Self::new(rdns.into_iter().chain(self.rdns.iter().cloned()).collect())
    }

    /// A new DN with another DN's sequence placed before this one.
    pub fn prepend_dn(&self, other: &Dn) -> Result<Dn, ValidationError> {
        self.prepend(other.rdns.iter().cloned())
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

fn join_rdns(rdns: &[Rdn]) -> String {
    rdns.iter()
        .map(Rdn::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn is_well_known_container(rdn: &Rdn) -> bool {
    WELL_KNOWN_GENERIC_CONTAINERS.contains(&rdn.as_str())
}

/// Check adjacent RDN pairs left to right:
/// - CN must be followed by OU, unless either side is a well-known container;
/// - OU must be followed by OU or DC;
/// - DC must be followed by DC.
fn check_rdn_sequence(rdns: &[Rdn]) -> Result<(), ValidationError> {
    for pair in rdns.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        let consistent = match current.attribute() {
            NamingAttribute::Cn => {
                next.attribute() == NamingAttribute::Ou
                    || is_well_known_container(current)
                    || is_well_known_container(next)
            }
            NamingAttribute::Ou => matches!(
                next.attribute(),
                NamingAttribute::Ou | NamingAttribute::Dc
            ),
            NamingAttribute::Dc => next.attribute() == NamingAttribute::Dc,
        };

        if !consistent {
            return Err(ValidationError::InvalidRdnSequence(join_rdns(rdns)));
        }
    }

    Ok(())
}

/// Split on commas that are not escaped. A comma is a separator unless the
/// character before it is a backslash that is not itself escaped.
fn split_unescaped_commas(value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in value.char_indices() {
        if c == ',' && !escaped {
            segments.push(&value[start..i]);
            start = i + 1;
        }
        escaped = c == '\\' && !escaped;
    }

    segments.push(&value[start..]);
    segments
}

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl Clone for Dn {
    fn clone(&self) -> Self {
        // Derived views are pure; the clone recomputes them on demand.
        Self {
            rdns: self.rdns.clone(),
            rendered: self.rendered.clone(),
            parent: OnceLock::new(),
            domain: OnceLock::new(),
            fqdn: OnceLock::new(),
        }
    }
}

impl PartialEq for Dn {
    fn eq(&self, other: &Self) -> bool {
        self.rendered == other.rendered
    }
}

impl Eq for Dn {}

impl Hash for Dn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rendered.hash(state);
    }
}

impl FromStr for Dn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Dn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Dn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

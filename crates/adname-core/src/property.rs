use std::fmt;
use std::str::FromStr;

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::ValidationError;

/// Attribute syntaxes the Active Directory schema defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum DirectoryPropertySyntax {
    #[strum(serialize = "DNString")]
    DnString,
    #[strum(serialize = "ObjectIdentifierString")]
    ObjectIdentifierString,
    #[strum(serialize = "TeletextString")]
    TeletextString,
    #[strum(serialize = "PrintableString")]
    PrintableString,
    #[strum(serialize = "IA5String")]
    Ia5String,
    #[strum(serialize = "NumericString")]
    NumericString,
    #[strum(serialize = "ObjectDNBinary")]
    ObjectDnBinary,
    #[strum(serialize = "Boolean")]
    Boolean,
    #[strum(serialize = "Integer")]
    Integer,
    #[strum(serialize = "Enumeration")]
    Enumeration,
    #[strum(serialize = "OctetString")]
    OctetString,
    #[strum(serialize = "ObjectReplicaLink")]
    ObjectReplicaLink,
    #[strum(serialize = "UtcTimeString")]
    UtcTimeString,
    #[strum(serialize = "GeneralizedTimeString")]
    GeneralizedTimeString,
    #[strum(serialize = "UnicodeString")]
    UnicodeString,
    #[strum(serialize = "ObjectPresentationAddress")]
    ObjectPresentationAddress,
    #[strum(serialize = "ObjectDNString")]
    ObjectDnString,
    #[strum(serialize = "NTSecurityDescriptorString")]
    NtSecurityDescriptorString,
    #[strum(serialize = "LargeInteger")]
    LargeInteger,
    #[strum(serialize = "Interval")]
    Interval,
    #[strum(serialize = "SidString")]
    SidString,
}

impl DirectoryPropertySyntax {
    /// Short usage notes, matching the schema documentation.
    pub fn notes(&self) -> &'static str {
        match self {
            Self::DnString => "Standard distinguished name (DN) syntax",
            Self::ObjectIdentifierString => "Contains only digits and \".\"",
            Self::TeletextString => "Case insensitive for searching; Teletex characters only",
            Self::PrintableString => "Case sensitive for searching; printable characters only",
            Self::Ia5String => "Case sensitive for searching; IA5 string",
            Self::NumericString => "Contains only digits; rarely used in Active Directory",
            Self::ObjectDnBinary => "Also Object(OR-Name); used for associating a GUID with DN",
            Self::Boolean => "Used for standard Boolean values",
            Self::Integer => "Used for standard signed integers",
            Self::Enumeration => "Used for enumerated values",
            Self::OctetString => "Used for arbitrary binary data",
            Self::ObjectReplicaLink => "Used by the system only for replication",
            Self::UtcTimeString => "Used for date values; stored relative to UTC",
            Self::GeneralizedTimeString => {
                "Used for date values; time zone information is included"
            }
            Self::UnicodeString => {
                "Case insensitive for searching; contains any Unicode character"
            }
            Self::ObjectPresentationAddress => "Not really used in Active Directory either",
            Self::ObjectDnString => {
                "Not used in Active Directory schema; also defined as Object (Access-Point) \
                 which is not used and has no marshaling defined"
            }
            Self::NtSecurityDescriptorString => "Contains Windows security descriptors",
            Self::LargeInteger => "Represents a 64-bit signed integer value",
            Self::Interval => "Same as LargeInteger but Interval is treated as unsigned",
            Self::SidString => "Contains Windows security identifiers",
        }
    }
}

/// Semantic type a property's values carry in the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotionalType {
    String,
    Integer,
    Boolean,
    Binary,
    Guid,
    Dn,
    UserAccountControl,
    DateTime,
    Int64,
}

/// Wire shape the directory stores a property's values in.
///
/// `Boolean` mirrors the schema's `Boolean` syntax; the current catalogue has
/// no attribute of that syntax, same as the syntax table itself carries
/// entries no catalogued attribute uses yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryType {
    String,
    Integer,
    Boolean,
    Binary,
    LargeInteger,
}

/// The closed catalogue of attribute descriptors driving the conversion
/// layer: wire name, syntax, multivalued flag, semantic type and wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum DirectoryProperty {
    Member,
    MemberOf,
    ObjectClass,
    DistinguishedName,
    SamAccountName,
    DisplayName,
    GroupType,
    ObjectGuid,
    Department,
    Description,
    Division,
    Mail,
    EmployeeId,
    FacsimileTelephoneNumber,
    GivenName,
    HomeDirectory,
    WwwHomePage,
    UserAccountControl,
    AccountExpires,
    BadPasswordTime,
    LastLogon,
    LockoutTime,
    PwdLastSet,
    UsnChanged,
}

impl DirectoryProperty {
    /// The attribute name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::MemberOf => "memberOf",
            Self::ObjectClass => "objectClass",
            Self::DistinguishedName => "distinguishedName",
            Self::SamAccountName => "samAccountName",
            Self::DisplayName => "displayName",
            Self::GroupType => "groupType",
            Self::ObjectGuid => "objectGUID",
            Self::Department => "department",
            Self::Description => "description",
            Self::Division => "division",
            Self::Mail => "mail",
            Self::EmployeeId => "employeeId",
            Self::FacsimileTelephoneNumber => "facsimileTelephoneNumber",
            Self::GivenName => "givenName",
            Self::HomeDirectory => "homeDirectory",
            Self::WwwHomePage => "wWWHomePage",
            Self::UserAccountControl => "userAccountControl",
            Self::AccountExpires => "accountExpires",
            Self::BadPasswordTime => "badPasswordTime",
            Self::LastLogon => "lastLogon",
            Self::LockoutTime => "lockoutTime",
            Self::PwdLastSet => "pwdLastSet",
            Self::UsnChanged => "uSNChanged",
        }
    }

    pub fn syntax(&self) -> DirectoryPropertySyntax {
        match self {
            Self::Member | Self::MemberOf | Self::DistinguishedName => {
                DirectoryPropertySyntax::DnString
            }
            Self::ObjectClass => DirectoryPropertySyntax::ObjectIdentifierString,
            Self::GroupType | Self::UserAccountControl => DirectoryPropertySyntax::Enumeration,
            Self::ObjectGuid => DirectoryPropertySyntax::OctetString,
            Self::AccountExpires
            | Self::BadPasswordTime
            | Self::LastLogon
            | Self::LockoutTime
            | Self::PwdLastSet => DirectoryPropertySyntax::Interval,
            Self::UsnChanged => DirectoryPropertySyntax::LargeInteger,
            _ => DirectoryPropertySyntax::UnicodeString,
        }
    }

    pub fn multivalued(&self) -> bool {
        matches!(self, Self::Member | Self::MemberOf | Self::ObjectClass)
    }

    pub fn notional_type(&self) -> NotionalType {
        match self {
            Self::Member | Self::MemberOf | Self::DistinguishedName => NotionalType::Dn,
            Self::ObjectGuid => NotionalType::Guid,
            Self::UserAccountControl => NotionalType::UserAccountControl,
            Self::AccountExpires
            | Self::BadPasswordTime
            | Self::LastLogon
            | Self::LockoutTime
            | Self::PwdLastSet => NotionalType::DateTime,
            Self::UsnChanged => NotionalType::Int64,
            _ => NotionalType::String,
        }
    }

    pub fn directory_type(&self) -> DirectoryType {
        match self {
            Self::GroupType | Self::UserAccountControl => DirectoryType::Integer,
            Self::ObjectGuid => DirectoryType::Binary,
            Self::AccountExpires
            | Self::BadPasswordTime
            | Self::LastLogon
            | Self::LockoutTime
            | Self::PwdLastSet
            | Self::UsnChanged => DirectoryType::LargeInteger,
            _ => DirectoryType::String,
        }
    }

    /// Look up a descriptor by wire attribute name. Attribute names are
    /// case-insensitive in LDAP.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|property| property.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DirectoryProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DirectoryProperty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ValidationError::UnknownDirectoryProperty(s.to_owned()))
    }
}

//! Active Directory name and filter algebra.
//!
//! Everything here is pure string and value manipulation; no directory
//! connection is ever opened. The building blocks are:
//!
//! - [`LdapName`]: an attribute value with LDAP special-character escaping
//! - [`Rdn`] and [`Dn`]: relative and full distinguished names, with
//!   sequence validation and derived parent/domain/FQDN views
//! - [`GuidName`], [`SidName`] and [`Sid`]: the binding forms
//!   `<GUID=...>` and `<SID=...>`
//! - [`AdsPath`]: full ADSI paths such as `LDAP://server/CN=x,DC=y`
//! - [`SearchFilter`]: composable LDAP filter expressions
//! - [`DirectoryProperty`] and the conversion layer in [`convert`]:
//!   a closed catalogue of attributes and the mapping between semantic
//!   values and their wire shapes

pub mod ads_path;
pub mod convert;
pub mod dn;
pub mod error;
pub mod filter;
pub mod flags;
pub mod guid_name;
pub mod name;
pub mod naming_attribute;
pub mod property;
pub mod rdn;
pub mod sid;
pub mod sid_name;

pub use ads_path::{AdsObjectName, AdsPath, AdsProvider};
pub use convert::{DirectoryValue, LargeInteger, PropertyValue};
pub use dn::Dn;
pub use error::{ConversionError, ValidationError};
pub use filter::SearchFilter;
pub use flags::UserAccountControl;
pub use guid_name::GuidName;
pub use name::LdapName;
pub use naming_attribute::NamingAttribute;
pub use property::{DirectoryProperty, DirectoryPropertySyntax, DirectoryType, NotionalType};
pub use rdn::Rdn;
pub use sid::Sid;
pub use sid_name::SidName;

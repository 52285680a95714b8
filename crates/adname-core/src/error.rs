use thiserror::Error;

use crate::property::DirectoryPropertySyntax;

/// Synchronous validation failure raised at parse or construction time.
///
/// Every variant carries the offending input (or a joined representation of
/// it). Callers either handle the error or use the `try_parse` companions,
/// which map it to `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} string can not be empty or white space")]
    BlankValue(&'static str),

    #[error("string '{0}' can not be converted to a valid RDN")]
    InvalidRdn(String),

    #[error("'{0}' is not a valid naming attribute")]
    UnknownNamingAttribute(String),

    #[error("supplied RDN list can not be empty")]
    EmptyRdnList,

    #[error("RDN sequence '{0}' is invalid")]
    InvalidRdnSequence(String),

    #[error("string '{0}' can not be converted to a valid DN")]
    InvalidDn(String),

    #[error("string '{0}' can not be converted to a valid GUID name")]
    InvalidGuidName(String),

    #[error("string '{0}' can not be converted to a valid SID name")]
    InvalidSidName(String),

    #[error("string '{0}' can not be converted to a valid security identifier")]
    InvalidSid(String),

    #[error("string '{0}' can not be converted to a directory object name")]
    InvalidObjectName(String),

    #[error("string '{0}' can not be converted to a valid ADs path")]
    InvalidAdsPath(String),

    #[error("'{0}' is not a known directory property")]
    UnknownDirectoryProperty(String),
}

/// A directory value whose runtime shape does not match the declared syntax
/// of the property it is being converted for.
///
/// This signals a schema/programming mismatch, never a transient condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("value '{value}' of type '{value_type}' not suitable to syntax '{syntax}' of directory property '{property}'")]
pub struct ConversionError {
    pub value: String,
    pub value_type: &'static str,
    pub syntax: DirectoryPropertySyntax,
    pub property: &'static str,
}

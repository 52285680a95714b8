use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dn::Dn;
use crate::error::ConversionError;
use crate::flags::UserAccountControl;
use crate::property::{DirectoryProperty, NotionalType};

/// Number of 100ns ticks in one second.
const TICKS_PER_SECOND: i64 = 10_000_000;

/// Seconds between the file-time epoch (1601-01-01) and the Unix epoch.
const FILETIME_UNIX_EPOCH_SECS: i64 = 11_644_473_600;

/// Tick count of the last representable file time, 9999-12-31T23:59:59.9999999.
/// Anything above it is a sentinel, e.g. `accountExpires` uses `i64::MAX` for
/// accounts that never expire.
const MAX_FILETIME_TICKS: i64 = 2_650_467_743_999_999_999;

/// A 64-bit signed integer as the directory wires it: a pair of signed
/// 32-bit halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LargeInteger {
    pub high_part: i32,
    pub low_part: i32,
}

impl LargeInteger {
    pub const ZERO: Self = Self {
        high_part: 0,
        low_part: 0,
    };

    pub fn from_i64(value: i64) -> Self {
        Self {
            high_part: (value >> 32) as i32,
            low_part: value as i32,
        }
    }

    pub fn to_i64(self) -> i64 {
        (i64::from(self.high_part) << 32) | i64::from(self.low_part as u32)
    }
}

impl fmt::Display for LargeInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_i64().fmt(f)
    }
}

/// A value shaped the way the directory stores it.
///
/// The boolean shape belongs to the schema's `Boolean` syntax; no attribute
/// in the current catalogue declares it, so that arm only fires once such an
/// attribute is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryValue {
    String(String),
    Integer(i32),
    Boolean(bool),
    Binary(Vec<u8>),
    LargeInteger(LargeInteger),
}

impl DirectoryValue {
    /// Runtime shape name, used in conversion error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::Binary(_) => "binary",
            Self::LargeInteger(_) => "large integer",
        }
    }
}

impl fmt::Display for DirectoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Integer(value) => value.fmt(f),
            Self::Boolean(value) => value.fmt(f),
            Self::Binary(value) => f.write_str(&hex::encode(value)),
            Self::LargeInteger(value) => value.fmt(f),
        }
    }
}

/// A value in its semantic form, as callers set and get it.
///
/// As with [`DirectoryValue`], the boolean variant waits on a catalogued
/// attribute of the `Boolean` syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    String(String),
    Integer(i32),
    Boolean(bool),
    Binary(Vec<u8>),
    Guid(Uuid),
    Dn(Dn),
    UserAccountControl(UserAccountControl),
    DateTime(DateTime<Utc>),
    Int64(i64),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Integer(value) => value.fmt(f),
            Self::Boolean(value) => value.fmt(f),
            Self::Binary(value) => f.write_str(&hex::encode(value)),
            Self::Guid(value) => value.fmt(f),
            Self::Dn(value) => value.fmt(f),
            Self::UserAccountControl(value) => value.to_directory().fmt(f),
            Self::DateTime(value) => f.write_str(&value.to_rfc3339()),
            Self::Int64(value) => value.fmt(f),
        }
    }
}

/// Convert a date/time to the wire large-integer form: the file-time tick
/// count split into signed 32-bit halves. Dates before the file-time epoch
/// clamp to a zero large integer.
pub fn date_time_to_large_integer(value: DateTime<Utc>) -> LargeInteger {
    let ticks = value
        .timestamp()
        .checked_add(FILETIME_UNIX_EPOCH_SECS)
        .and_then(|secs| secs.checked_mul(TICKS_PER_SECOND))
        .and_then(|ticks| ticks.checked_add(i64::from(value.timestamp_subsec_nanos() / 100)));

    match ticks {
        Some(ticks) if ticks >= 0 => LargeInteger::from_i64(ticks),
        _ => LargeInteger::ZERO,
    }
}

/// Recover a date/time from a wire large integer. A non-positive tick count
/// or one past [`MAX_FILETIME_TICKS`] yields `None` rather than failing.
pub fn date_time_from_large_integer(value: LargeInteger) -> Option<DateTime<Utc>> {
    let ticks = value.to_i64();
    if ticks <= 0 || ticks > MAX_FILETIME_TICKS {
        return None;
    }

    let secs = ticks / TICKS_PER_SECOND - FILETIME_UNIX_EPOCH_SECS;
    let nanos = (ticks % TICKS_PER_SECOND) * 100;
    DateTime::from_timestamp(secs, nanos as u32)
}

impl DirectoryProperty {
    /// Encode a value for embedding in a search filter string. GUIDs render
    /// as backslash-prefixed lowercase hex byte pairs in wire byte order;
    /// everything else uses its default string form.
    pub fn create_search_filter_string(&self, value: &PropertyValue) -> String {
        match value {
            PropertyValue::Guid(guid) => guid
                .to_bytes_le()
                .iter()
                .map(|byte| format!("\\{byte:02x}"))
                .collect(),
            other => other.to_string(),
        }
    }

    /// Map a semantic value to its wire representation.
    pub fn convert_to_directory_value(&self, value: &PropertyValue) -> DirectoryValue {
        match value {
            PropertyValue::Guid(guid) => DirectoryValue::Binary(guid.to_bytes_le().to_vec()),
            PropertyValue::Dn(dn) => DirectoryValue::String(dn.to_string()),
            PropertyValue::UserAccountControl(flags) => {
                DirectoryValue::Integer(flags.to_directory())
            }
            PropertyValue::DateTime(value) => {
                DirectoryValue::LargeInteger(date_time_to_large_integer(*value))
            }
            PropertyValue::Int64(value) => {
                DirectoryValue::LargeInteger(LargeInteger::from_i64(*value))
            }
            PropertyValue::String(value) => DirectoryValue::String(value.clone()),
            PropertyValue::Integer(value) => DirectoryValue::Integer(*value),
            PropertyValue::Boolean(value) => DirectoryValue::Boolean(*value),
            PropertyValue::Binary(value) => DirectoryValue::Binary(value.clone()),
        }
    }

    /// Map a wire value back to its semantic form, dispatched on this
    /// property's declared notional type. `None` in always yields `None`
    /// out; a wire value whose shape does not fit the declaration is a
    /// [`ConversionError`].
    pub fn convert_from_directory_value(
        &self,
        value: Option<&DirectoryValue>,
    ) -> Result<Option<PropertyValue>, ConversionError> {
        let Some(value) = value else {
            return Ok(None);
        };

        let mismatch = || ConversionError {
            value: value.to_string(),
            value_type: value.type_name(),
            syntax: self.syntax(),
            property: self.name(),
        };

        let converted = match (value, self.notional_type()) {
            (DirectoryValue::Binary(bytes), NotionalType::Guid) => {
                let bytes: [u8; 16] =
                    bytes.as_slice().try_into().map_err(|_| mismatch())?;
                PropertyValue::Guid(Uuid::from_bytes_le(bytes))
            }
            (DirectoryValue::String(value), NotionalType::Dn) => {
                PropertyValue::Dn(Dn::parse(value).map_err(|_| mismatch())?)
            }
            (DirectoryValue::Integer(value), NotionalType::UserAccountControl) => {
                PropertyValue::UserAccountControl(UserAccountControl::from_directory(*value))
            }
            (DirectoryValue::LargeInteger(value), NotionalType::DateTime) => {
                return Ok(date_time_from_large_integer(*value).map(PropertyValue::DateTime));
            }
            (DirectoryValue::LargeInteger(value), NotionalType::Int64) => {
                PropertyValue::Int64(value.to_i64())
            }
            (DirectoryValue::String(value), _) => PropertyValue::String(value.clone()),
            (DirectoryValue::Integer(value), _) => PropertyValue::Integer(*value),
            (DirectoryValue::Boolean(value), _) => PropertyValue::Boolean(*value),
            (DirectoryValue::Binary(value), _) => PropertyValue::Binary(value.clone()),
            (DirectoryValue::LargeInteger(value), _) => PropertyValue::Int64(value.to_i64()),
        };

        Ok(Some(converted))
    }
}

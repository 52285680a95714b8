use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Maximum number of sub-authorities a SID may carry.
const MAX_SUB_AUTHORITIES: usize = 15;

/// A Windows security identifier in SDDL form, e.g. `S-1-5-32-544`.
///
/// The identifier authority is a 48-bit value; authorities that do not fit in
/// 32 bits render in the hexadecimal form Windows uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sid {
    revision: u8,
    identifier_authority: u64,
    sub_authorities: Vec<u32>,
}

impl Sid {
    pub fn new(
        revision: u8,
        identifier_authority: u64,
        sub_authorities: Vec<u32>,
    ) -> Result<Self, ValidationError> {
        if identifier_authority >= 1 << 48 || sub_authorities.len() > MAX_SUB_AUTHORITIES {
            return Err(ValidationError::InvalidSid(format!(
                "S-{revision}-{identifier_authority}"
            )));
        }
        Ok(Self {
            revision,
            identifier_authority,
            sub_authorities,
        })
    }

    pub fn revision(&self) -> u8 {
        self.revision
    }

    pub fn identifier_authority(&self) -> u64 {
        self.identifier_authority
    }

    pub fn sub_authorities(&self) -> &[u32] {
        &self.sub_authorities
    }
}

impl FromStr for Sid {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidSid(s.to_owned());

        let mut parts = s.split('-');
        let tag = parts.next().ok_or_else(invalid)?;
        if !tag.eq_ignore_ascii_case("S") {
            return Err(invalid());
        }

        let revision = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(invalid)?;

        let authority_part = parts.next().ok_or_else(invalid)?;
        let identifier_authority = if let Some(hex) = authority_part
            .strip_prefix("0x")
            .or_else(|| authority_part.strip_prefix("0X"))
        {
            u64::from_str_radix(hex, 16).map_err(|_| invalid())?
        } else {
            authority_part.parse::<u64>().map_err(|_| invalid())?
        };

        let sub_authorities = parts
            .map(|p| p.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(revision, identifier_authority, sub_authorities).map_err(|_| invalid())
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.revision)?;
        if self.identifier_authority < 1 << 32 {
            write!(f, "-{}", self.identifier_authority)?;
        } else {
            write!(f, "-0x{:012X}", self.identifier_authority)?;
        }
        for sub in &self.sub_authorities {
            write!(f, "-{sub}")?;
        }
        Ok(())
    }
}

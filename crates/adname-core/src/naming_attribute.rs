use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The closed set of naming attributes a DN segment may use.
///
/// Matching is exact and case-sensitive: `cn=John` is not a valid RDN here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum NamingAttribute {
    #[strum(serialize = "CN")]
    Cn,
    #[strum(serialize = "OU")]
    Ou,
    #[strum(serialize = "DC")]
    Dc,
}

impl NamingAttribute {
    /// Canonical string form of the attribute.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

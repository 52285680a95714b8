use bitflags::bitflags;

bitflags! {
    /// `userAccountControl` bit flags.
    ///
    /// Values follow the ADS_USER_FLAG_ENUM constants; the directory stores
    /// the combined value as a 32-bit integer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UserAccountControl: u32 {
        const SCRIPT = 0x0000_0001;
        const ACCOUNT_DISABLE = 0x0000_0002;
        const HOMEDIR_REQUIRED = 0x0000_0008;
        const LOCKOUT = 0x0000_0010;
        const PASSWD_NOTREQD = 0x0000_0020;
        const PASSWD_CANT_CHANGE = 0x0000_0040;
        const ENCRYPTED_TEXT_PASSWORD_ALLOWED = 0x0000_0080;
        const TEMP_DUPLICATE_ACCOUNT = 0x0000_0100;
        const NORMAL_ACCOUNT = 0x0000_0200;
        const INTERDOMAIN_TRUST_ACCOUNT = 0x0000_0800;
        const WORKSTATION_TRUST_ACCOUNT = 0x0000_1000;
        const SERVER_TRUST_ACCOUNT = 0x0000_2000;
        const DONT_EXPIRE_PASSWD = 0x0001_0000;
        const MNS_LOGON_ACCOUNT = 0x0002_0000;
        const SMARTCARD_REQUIRED = 0x0004_0000;
        const TRUSTED_FOR_DELEGATION = 0x0008_0000;
        const NOT_DELEGATED = 0x0010_0000;
        const USE_DES_KEY_ONLY = 0x0020_0000;
        const DONT_REQUIRE_PREAUTH = 0x0040_0000;
        const PASSWORD_EXPIRED = 0x0080_0000;
        const TRUSTED_TO_AUTHENTICATE_FOR_DELEGATION = 0x0100_0000;
    }
}

impl UserAccountControl {
    /// Reinterpret a directory integer, keeping unknown bits.
    pub fn from_directory(value: i32) -> Self {
        Self::from_bits_retain(value as u32)
    }

    /// The combined value as the directory stores it.
    pub fn to_directory(self) -> i32 {
        self.bits() as i32
    }
}

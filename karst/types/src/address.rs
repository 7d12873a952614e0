use {
    crate::{StdError, StdResult},
    bech32::{FromBase32, ToBase32, Variant},
    borsh::{BorshDeserialize, BorshSerialize},
    data_encoding::HEXLOWER_PERMISSIVE,
    serde::{de, ser},
    std::{
        fmt::{self, Debug, Display},
        str::FromStr,
    },
};

/// An account or contract address in the EVM environment.
///
/// 20 raw bytes, displayed as lowercase hex with the `0x` prefix. Unlike in
/// vanilla CosmWasm, where address strings pass through deserialization
/// unchecked and must be validated by hand afterwards, here validation
/// happens during deserialization: if deserialization doesn't throw an
/// error, the address is valid.
#[derive(
    BorshSerialize, BorshDeserialize, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Addr([u8; 20]);

impl Addr {
    pub const LENGTH: usize = 20;
    /// String prefix of the hex encoding.
    pub const PREFIX: &'static str = "0x";

    pub const fn from_array(array: [u8; Self::LENGTH]) -> Self {
        Self(array)
    }

    pub const fn into_array(self) -> [u8; Self::LENGTH] {
        self.0
    }

    /// Generate a mock address for use in testing.
    pub const fn mock(index: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[Self::LENGTH - 1] = index;
        Self(bytes)
    }
}

impl AsRef<[u8]> for Addr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Addr {
    type Error = StdError;

    fn try_from(bytes: &[u8]) -> StdResult<Self> {
        bytes.try_into().map(Self).map_err(Into::into)
    }
}

impl FromStr for Addr {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let Some(hex) = s.strip_prefix(Self::PREFIX) else {
            return Err(StdError::deserialize::<Self, _>(
                "hex",
                "missing `0x` prefix",
            ));
        };

        let bytes = HEXLOWER_PERMISSIVE
            .decode(hex.as_bytes())
            .map_err(|err| StdError::deserialize::<Self, _>("hex", err))?;

        bytes.as_slice().try_into()
    }
}

impl Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, HEXLOWER_PERMISSIVE.encode(&self.0))
    }
}

impl Debug for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addr({self})")
    }
}

impl ser::Serialize for Addr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Addr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = <String as de::Deserialize>::deserialize(deserializer)?;
        Addr::from_str(&s).map_err(de::Error::custom)
    }
}

/// An account or contract address in the native environment.
///
/// 20 raw bytes, displayed in bech32 with the `karst` human-readable prefix.
/// As with [`Addr`], validation happens at parse/deserialization time.
#[derive(
    BorshSerialize, BorshDeserialize, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct NativeAddr([u8; 20]);

impl NativeAddr {
    pub const LENGTH: usize = 20;
    /// Human-readable prefix of the bech32 encoding.
    pub const PREFIX: &'static str = "karst";

    pub const fn from_array(array: [u8; Self::LENGTH]) -> Self {
        Self(array)
    }

    pub const fn into_array(self) -> [u8; Self::LENGTH] {
        self.0
    }

    /// Generate a mock address for use in testing.
    pub const fn mock(index: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[Self::LENGTH - 1] = index;
        Self(bytes)
    }
}

impl AsRef<[u8]> for NativeAddr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for NativeAddr {
    type Error = StdError;

    fn try_from(bytes: &[u8]) -> StdResult<Self> {
        bytes.try_into().map(Self).map_err(Into::into)
    }
}

impl FromStr for NativeAddr {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let (hrp, data, variant) =
            bech32::decode(s).map_err(|err| StdError::deserialize::<Self, _>("bech32", err))?;

        if hrp != Self::PREFIX {
            return Err(StdError::deserialize::<Self, _>(
                "bech32",
                format!("incorrect prefix: expecting `{}`, got `{hrp}`", Self::PREFIX),
            ));
        }

        if variant != Variant::Bech32 {
            return Err(StdError::deserialize::<Self, _>(
                "bech32",
                "expecting the bech32 variant, got bech32m",
            ));
        }

        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|err| StdError::deserialize::<Self, _>("bech32", err))?;

        bytes.as_slice().try_into()
    }
}

impl Display for NativeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Encoding only fails on an invalid human-readable prefix, and ours
        // is a valid constant.
        let s = bech32::encode(Self::PREFIX, self.0.to_base32(), Variant::Bech32)
            .unwrap_or_else(|err| panic!("invalid bech32 prefix: {err}"));
        f.write_str(&s)
    }
}

impl Debug for NativeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeAddr({self})")
    }
}

impl ser::Serialize for NativeAddr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for NativeAddr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = <String as de::Deserialize>::deserialize(deserializer)?;
        NativeAddr::from_str(&s).map_err(de::Error::custom)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex, test_case::test_case};

    #[test_case(
        hex!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
        "all lowercase"
    )]
    #[test_case(
        hex!("0000000000000000000000000000000000000001"),
        "0x0000000000000000000000000000000000000001";
        "low index"
    )]
    fn stringify_evm_address(raw: [u8; 20], expect: &str) {
        let addr = Addr::from_array(raw);
        assert_eq!(addr.to_string(), expect);
        assert_eq!(Addr::from_str(expect).unwrap(), addr);
    }

    #[test]
    fn evm_address_accepts_mixed_case() {
        let addr = Addr::from_str("0xF39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap();
        // Display form is always lowercase.
        assert_eq!(
            addr.to_string(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test_case("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"; "missing prefix")]
    #[test_case("0xf39fd6e51aad88f6f4ce6ab8827279cfffb922"; "too short")]
    #[test_case("0xf39fd6e51aad88f6f4ce6ab8827279cfffb9226600"; "too long")]
    #[test_case("0xf39fd6e51aad88f6f4ce6ab8827279cfffb922zz"; "not hex")]
    fn malformed_evm_address(s: &str) {
        assert!(Addr::from_str(s).is_err());
    }

    #[test]
    fn native_address_round_trip() {
        let addr = NativeAddr::mock(7);
        let s = addr.to_string();
        assert!(s.starts_with("karst1"));
        assert_eq!(NativeAddr::from_str(&s).unwrap(), addr);
    }

    #[test]
    fn native_address_rejects_foreign_prefix() {
        // A valid bech32 string, but with the wrong human-readable prefix.
        let foreign = bech32::encode(
            "terra",
            NativeAddr::mock(7).as_ref().to_base32(),
            Variant::Bech32,
        )
        .unwrap();
        assert!(NativeAddr::from_str(&foreign).is_err());
    }

    #[test]
    fn native_address_rejects_mangled_checksum() {
        let mut s = NativeAddr::mock(7).to_string();
        // Flip the last character to break the checksum.
        let last = if s.ends_with('q') { 'p' } else { 'q' };
        s.pop();
        s.push(last);
        assert!(NativeAddr::from_str(&s).is_err());
    }

    #[test]
    fn addresses_serde_as_strings() {
        let addr = Addr::mock(3);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000003\"");
        assert_eq!(serde_json::from_str::<Addr>(&json).unwrap(), addr);

        let native = NativeAddr::mock(3);
        let json = serde_json::to_string(&native).unwrap();
        assert_eq!(serde_json::from_str::<NativeAddr>(&json).unwrap(), native);
    }
}

use {
    borsh::{BorshDeserialize, BorshSerialize},
    karst_storage::PrimaryKey,
    karst_types::{StdError, StdResult},
    serde::{Deserialize, Serialize},
    std::borrow::Cow,
    strum_macros::{Display, EnumIter, FromRepr},
};

/// The asset representation standards whose assets can be mirrored across
/// the two execution environments.
///
/// The tag values are wire format: they appear in query requests and as
/// storage keys, so they must never be reordered or reused.
#[derive(
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
    Display,
    EnumIter,
    FromRepr,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum AssetStandard {
    /// A native bank token, identified by its denom.
    Native = 0,
    /// A fungible token contract in the native environment.
    Cw20 = 1,
    /// An NFT contract in the native environment.
    Cw721 = 2,
    /// A multi-token contract in the native environment.
    Cw1155 = 3,
    /// A fungible token contract in the EVM environment.
    Erc20 = 4,
    /// An NFT contract in the EVM environment.
    Erc721 = 5,
    /// A multi-token contract in the EVM environment.
    Erc1155 = 6,
}

impl AssetStandard {
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Decode a raw wire tag. `None` if the tag is not one of the seven
    /// known standards.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::from_repr(tag)
    }

    /// Whether this standard's pointer contracts live in the native
    /// environment and are instantiated from a stored code template.
    ///
    /// These are the standards whose original assets live in the EVM
    /// environment; their native-side pointers carry a code id in version
    /// queries.
    pub const fn uses_code_template(self) -> bool {
        matches!(self, Self::Erc20 | Self::Erc721 | Self::Erc1155)
    }
}

impl PrimaryKey for AssetStandard {
    type Output = AssetStandard;

    fn raw_keys(&self) -> Vec<Cow<'_, [u8]>> {
        vec![Cow::Owned(vec![self.tag()])]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        let [tag] = bytes else {
            return Err(StdError::deserialize::<Self::Output, _>(
                "key",
                "expecting exactly one byte",
            ));
        };

        Self::from_tag(*tag).ok_or_else(|| {
            StdError::deserialize::<Self::Output, _>("key", format!("unknown tag: {tag}"))
        })
    }
}

// ----------------------------------- tests -----------------------------------

use {
    borsh::{BorshDeserialize, BorshSerialize},
    data_encoding::BASE64,
    serde::{de, ser},
    std::{
        fmt::{self, Debug, Display},
        ops::Deref,
    },
};

/// An owned, arbitrary-length byte blob.
///
/// Serializes to a base64 string in JSON, and to raw bytes in Borsh. Used
/// for call data and call outputs, which have no further structure at this
/// layer.
#[derive(BorshSerialize, BorshDeserialize, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Binary(Vec<u8>);

impl Binary {
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Binary {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Binary {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<u8>> for Binary {
    fn from(vec: Vec<u8>) -> Self {
        Self(vec)
    }
}

impl From<&[u8]> for Binary {
    fn from(slice: &[u8]) -> Self {
        Self(slice.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Binary {
    fn from(array: [u8; N]) -> Self {
        Self(array.to_vec())
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&BASE64.encode(&self.0))
    }
}

impl Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binary({self})")
    }
}

impl ser::Serialize for Binary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&BASE64.encode(&self.0))
    }
}

impl<'de> de::Deserialize<'de> for Binary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = <String as de::Deserialize>::deserialize(deserializer)?;
        BASE64
            .decode(s.as_bytes())
            .map(Self)
            .map_err(de::Error::custom)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_round_trip() {
        let bin = Binary::from(b"karst".as_slice());
        let json = serde_json::to_string(&bin).unwrap();
        assert_eq!(json, "\"a2Fyc3Q=\"");
        assert_eq!(serde_json::from_str::<Binary>(&json).unwrap(), bin);
    }

    #[test]
    fn empty_is_distinguishable() {
        let bin = Binary::empty();
        assert!(bin.is_empty());
        assert_eq!(serde_json::to_string(&bin).unwrap(), "\"\"");
    }
}

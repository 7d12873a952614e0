use {
    karst_types::{Addr, NativeAddr, StdError, StdResult, nested_namespaces_with_key},
    std::borrow::Cow,
};

/// Describes a key used in mapping data structures, i.e. [`Map`](crate::Map).
///
/// The key needs to be serialized to or deserialized from raw bytes. We
/// don't use `serde` here because it's slow, not compact, and faillable.
pub trait PrimaryKey {
    /// The type that raw keys deserialize into, which may be different from
    /// the key itself.
    ///
    /// E.g. when `&str` is used as the key, it deserializes into `String`.
    type Output;

    /// Convert the key into one or more _raw keys_. Each raw key is a byte
    /// slice, either owned or a reference, represented as a `Cow<[u8]>`.
    fn raw_keys(&self) -> Vec<Cow<'_, [u8]>>;

    /// Serialize the raw keys into bytes.
    ///
    /// Each raw key, other than the last one, is prefixed by its length, so
    /// that when deserializing we can tell where a raw key ends and where
    /// the next one starts.
    fn joined_key(&self) -> Vec<u8> {
        let mut raw_keys = self.raw_keys();
        let last_raw_key = raw_keys.pop();
        nested_namespaces_with_key(None, &raw_keys, last_raw_key.as_ref())
    }

    /// Deserialize the raw bytes into the output.
    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output>;
}

impl PrimaryKey for () {
    type Output = ();

    fn raw_keys(&self) -> Vec<Cow<'_, [u8]>> {
        vec![]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        if !bytes.is_empty() {
            return Err(StdError::deserialize::<Self::Output, _>(
                "key",
                "expecting empty bytes",
            ));
        }

        Ok(())
    }
}

impl PrimaryKey for &[u8] {
    type Output = Vec<u8>;

    fn raw_keys(&self) -> Vec<Cow<'_, [u8]>> {
        vec![Cow::Borrowed(self)]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        Ok(bytes.to_vec())
    }
}

impl PrimaryKey for Vec<u8> {
    type Output = Vec<u8>;

    fn raw_keys(&self) -> Vec<Cow<'_, [u8]>> {
        vec![Cow::Borrowed(self)]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        Ok(bytes.to_vec())
    }
}

impl PrimaryKey for &str {
    type Output = String;

    fn raw_keys(&self) -> Vec<Cow<'_, [u8]>> {
        vec![Cow::Borrowed(self.as_bytes())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        String::from_utf8(bytes.to_vec())
            .map_err(|err| StdError::deserialize::<Self::Output, _>("key", err))
    }
}

impl PrimaryKey for String {
    type Output = String;

    fn raw_keys(&self) -> Vec<Cow<'_, [u8]>> {
        vec![Cow::Borrowed(self.as_bytes())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        <&str as PrimaryKey>::from_slice(bytes)
    }
}

impl PrimaryKey for Addr {
    type Output = Addr;

    fn raw_keys(&self) -> Vec<Cow<'_, [u8]>> {
        vec![Cow::Borrowed(self.as_ref())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        bytes.try_into()
    }
}

impl PrimaryKey for NativeAddr {
    type Output = NativeAddr;

    fn raw_keys(&self) -> Vec<Cow<'_, [u8]>> {
        vec![Cow::Borrowed(self.as_ref())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        bytes.try_into()
    }
}

macro_rules! impl_unsigned_integer_key {
    ($($t:ty),+ $(,)?) => {
        $(impl PrimaryKey for $t {
            type Output = $t;

            fn raw_keys(&self) -> Vec<Cow<'_, [u8]>> {
                // Big endian, so that byte order matches numeric order.
                vec![Cow::Owned(self.to_be_bytes().to_vec())]
            }

            fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
                let array = bytes.try_into()?;
                Ok(<$t>::from_be_bytes(array))
            }
        })+
    };
}

impl_unsigned_integer_key!(u8, u32, u64);

// ----------------------------------- tests -----------------------------------

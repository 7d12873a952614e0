use {
    borsh::{BorshDeserialize, BorshSerialize},
    karst_types::{BorshDeExt, BorshSerExt, StdResult},
};

/// A marker that designates encoding/decoding schemes for stored values.
pub trait Codec<T> {
    fn encode(data: &T) -> StdResult<Vec<u8>>;

    fn decode(data: &[u8]) -> StdResult<T>;
}

/// Represents the Borsh encoding scheme.
#[derive(Clone)]
pub struct Borsh;

impl<T> Codec<T> for Borsh
where
    T: BorshSerialize + BorshDeserialize,
{
    fn encode(data: &T) -> StdResult<Vec<u8>> {
        data.to_borsh_vec()
    }

    fn decode(data: &[u8]) -> StdResult<T> {
        data.deserialize_borsh()
    }
}

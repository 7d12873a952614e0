use {
    data_encoding::BASE64,
    std::{any::type_name, array::TryFromSliceError},
    thiserror::Error,
};

#[derive(Debug, Clone, Error)]
pub enum StdError {
    #[error(transparent)]
    TryFromSlice(#[from] TryFromSliceError),

    #[error("data not found! type: {ty}, storage key: {key}")]
    DataNotFound { ty: &'static str, key: String },

    #[error("duplicate data found! type: {ty}, storage key: {key}")]
    DuplicateData { ty: &'static str, key: String },

    #[error("out of gas! limit: {limit}, used: {used}, comment: {comment}")]
    OutOfGas {
        limit: u64,
        used: u64,
        comment: &'static str,
    },

    #[error("failed to serialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Serialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },

    #[error("failed to deserialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Deserialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },
}

impl StdError {
    pub fn data_not_found<T>(key: &[u8]) -> Self {
        Self::DataNotFound {
            ty: type_name::<T>(),
            key: BASE64.encode(key),
        }
    }

    pub fn duplicate_data<T>(key: &[u8]) -> Self {
        Self::DuplicateData {
            ty: type_name::<T>(),
            key: BASE64.encode(key),
        }
    }

    pub fn serialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: ToString,
    {
        Self::Serialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    pub fn deserialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: ToString,
    {
        Self::Deserialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }
}

pub type StdResult<T> = core::result::Result<T, StdError>;

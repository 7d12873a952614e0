use {
    crate::EvmError,
    karst_types::{Binary, StdError},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum InteropError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("unsupported asset standard: {tag}")]
    UnsupportedStandard { tag: u8 },

    /// The called contract reverted. Kept distinct from a successful call
    /// with empty output, so callers can tell the two apart.
    #[error("execution reverted: {output}")]
    ExecutionReverted { output: Binary },

    #[error("engine error: {0}")]
    Engine(String),
}

impl InteropError {
    pub fn invalid_argument<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::InvalidArgument {
            reason: reason.to_string(),
        }
    }

    pub const fn unsupported_standard(tag: u8) -> Self {
        Self::UnsupportedStandard { tag }
    }
}

impl From<EvmError> for InteropError {
    fn from(err: EvmError) -> Self {
        match err {
            EvmError::Std(err) => Self::Std(err),
            EvmError::Revert { output } => Self::ExecutionReverted { output },
            EvmError::Internal(msg) => Self::Engine(msg),
        }
    }
}

pub type InteropResult<T> = core::result::Result<T, InteropError>;

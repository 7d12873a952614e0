use {
    crate::GasTracker,
    karst_types::{Addr, Binary, BlockInfo, StdError, Storage},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum EvmError {
    /// Low-level failure, including gas exhaustion
    /// ([`StdError::OutOfGas`]).
    #[error(transparent)]
    Std(#[from] StdError),

    /// The called contract reverted, with whatever output it reverted with.
    #[error("execution reverted: {output}")]
    Revert { output: Binary },

    /// Engine-internal failure.
    #[error("engine failure: {0}")]
    Internal(String),
}

impl EvmError {
    pub fn revert<B>(output: B) -> Self
    where
        B: Into<Binary>,
    {
        Self::Revert {
            output: output.into(),
        }
    }

    pub fn internal<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::Internal(reason.to_string())
    }
}

pub type EvmResult<T> = core::result::Result<T, EvmError>;

/// The EVM-compatible execution engine, as seen from the query path.
///
/// This layer consumes exactly one entry point: a read-only message call.
/// Implementations must
///
/// - perform all state access through the given storage, which the bridge
///   sandboxes and discards;
/// - charge all gas through the given tracker, aborting with its
///   out-of-gas error rather than returning partial output;
/// - surface a contract revert as [`EvmError::Revert`], never as a
///   successful empty response.
pub trait Evm {
    fn static_call(
        &self,
        block: BlockInfo,
        storage: &mut dyn Storage,
        gas_tracker: GasTracker,
        sender: Addr,
        target: Addr,
        data: &[u8],
    ) -> EvmResult<Vec<u8>>;
}

use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// Identifies the block whose post-state the current query runs against.
///
/// Every query executes over the immutable state snapshot of one finalized
/// block; height-dependent reads (the CW20 pointer version schedule) key off
/// this. The timestamp is carried for the execution engine, which exposes it
/// to guest code.
#[derive(
    Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct BlockInfo {
    pub height: u64,
    /// Unix epoch nanoseconds.
    pub timestamp: u64,
}

impl BlockInfo {
    /// A block info for use in testing, with an arbitrary timestamp.
    pub const fn mock(height: u64) -> Self {
        Self {
            height,
            timestamp: 1_730_000_000_000_000_000,
        }
    }
}

use {
    crate::GasTracker,
    karst_types::{BlockInfo, Storage},
};

/// The context one query runs in: the immutable state snapshot it reads,
/// the block whose post-state that snapshot is, and the query's ambient gas
/// budget.
///
/// The storage is a borrow: the snapshot is owned and lifetime-managed by
/// the state store, never by this layer. Holding only `&dyn Storage` also
/// makes every operation here trivially safe under concurrent reads of the
/// same snapshot.
pub struct QueryCtx<'a> {
    pub storage: &'a dyn Storage,
    pub block: BlockInfo,
    pub gas_tracker: GasTracker,
}

impl<'a> QueryCtx<'a> {
    pub fn new(storage: &'a dyn Storage, block: BlockInfo, gas_tracker: GasTracker) -> Self {
        Self {
            storage,
            block,
            gas_tracker,
        }
    }
}

use {
    crate::{Batch, Op, Order, Record, Storage},
    std::{collections::BTreeMap, iter, mem},
};

/// A key-value storage with an in-memory write buffer.
///
/// Reads see the buffered ops layered over the base store; nothing touches
/// the base until [`commit`](Self::commit) or [`consume`](Self::consume) is
/// called. Dropping the buffer discards all pending ops, which is how the
/// static-call bridge guarantees its sandboxed execution leaves no trace.
///
/// Adapted from cw-multi-test:
/// <https://github.com/CosmWasm/cw-multi-test/blob/v0.19.0/src/transactions.rs#L170-L253>
#[derive(Clone)]
pub struct Buffer<S> {
    base: S,
    pending: Batch,
}

impl<S> Buffer<S> {
    pub fn new(base: S, pending: Option<Batch>) -> Self {
        Self {
            base,
            pending: pending.unwrap_or_default(),
        }
    }

    /// Consume self, do not flush, just return the underlying store and the
    /// pending ops.
    pub fn disassemble(self) -> (S, Batch) {
        (self.base, self.pending)
    }
}

impl<S> Buffer<S>
where
    S: Storage,
{
    /// Flush pending ops to the underlying store.
    pub fn commit(&mut self) {
        let pending = mem::take(&mut self.pending);
        self.base.flush(pending);
    }

    /// Consume self, flush pending ops to the underlying store, return the
    /// underlying store.
    pub fn consume(mut self) -> S {
        self.base.flush(self.pending);
        self.base
    }
}

impl<S> Storage for Buffer<S>
where
    S: Storage + Clone,
{
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(Op::Insert(value)) => Some(value.clone()),
            Some(Op::Delete) => None,
            None => self.base.read(key),
        }
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Box::new(iter::empty());
            }
        }

        // Lay the pending ops over the base records. The overlay is collected
        // eagerly: buffered batches in this layer are small (a single
        // sandboxed call's writes), while the base iterator stays lazy.
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.base.scan(min, max, Order::Ascending).collect();

        let in_bounds = |key: &[u8]| {
            min.map_or(true, |min| key >= min) && max.map_or(true, |max| key < max)
        };

        for (key, op) in &self.pending {
            if !in_bounds(key) {
                continue;
            }
            match op {
                Op::Insert(value) => {
                    merged.insert(key.clone(), value.clone());
                },
                Op::Delete => {
                    merged.remove(key);
                },
            }
        }

        match order {
            Order::Ascending => Box::new(merged.into_iter()),
            Order::Descending => Box::new(merged.into_iter().rev()),
        }
    }

    fn scan_keys<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        Box::new(self.scan(min, max, order).map(|(k, _)| k))
    }

    fn scan_values<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        Box::new(self.scan(min, max, order).map(|(_, v)| v))
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        self.pending
            .insert(key.to_vec(), Op::Insert(value.to_vec()));
    }

    fn remove(&mut self, key: &[u8]) {
        self.pending.insert(key.to_vec(), Op::Delete);
    }

    fn flush(&mut self, batch: Batch) {
        // When we do `a.extend(b)`, while `a` and `b` have common keys, the
        // values in `b` are chosen. This is exactly what we want.
        self.pending.extend(batch);
    }
}

// ----------------------------------- tests -----------------------------------

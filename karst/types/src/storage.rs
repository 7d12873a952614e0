use {dyn_clone::DynClone, std::collections::BTreeMap};

/// A shorthand for an owned key-value pair.
pub type Record = (Vec<u8>, Vec<u8>);

/// A batch of writes and removes, keyed by the raw storage key.
///
/// A `BTreeMap` is used so the operations are applied in key order, and a
/// later operation on the same key overwrites an earlier one.
pub type Batch = BTreeMap<Vec<u8>, Op>;

/// A single write or remove operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Insert(Vec<u8>),
    Delete,
}

/// The order in which to iterate records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Describing a KV store that supports read, write, and iteration.
///
/// The store must be clone-able, which is required by execution engine
/// runtimes. The std library Clone trait is not object-safe, so we use
/// [DynClone](https://crates.io/crates/dyn-clone) instead, and derive the std
/// Clone trait for any type that implements Storage with the
/// `clone_trait_object!` macro below.
pub trait Storage: DynClone + Send + Sync {
    /// Read a single key-value pair from the storage.
    ///
    /// Return `None` if the key doesn't exist.
    fn read(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Iterate over data in the KV store under the given bounds and order.
    ///
    /// Minimum bound is inclusive, maximum bound is exclusive.
    /// If `min` > `max`, an empty iterator is to be returned.
    ///
    /// Note: This is different from the behavior of Rust's `BTreeMap`, which
    /// panics if `min` > `max`.
    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a>;

    /// Similar to `scan`, but only return the keys.
    fn scan_keys<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a>;

    /// Similar to `scan`, but only return the values.
    fn scan_values<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a>;

    /// Write a single key-value pair to the storage.
    fn write(&mut self, key: &[u8], value: &[u8]);

    /// Delete a single key-value pair from the storage.
    ///
    /// No-op if the key doesn't exist.
    fn remove(&mut self, key: &[u8]);

    /// Perform a batch of writes and removes altogether, ideally atomically.
    ///
    /// The default implementation loops through the ops and applies them one
    /// by one, which is inefficient and not atomic. Overwrite this if there
    /// is a more efficient approach.
    fn flush(&mut self, batch: Batch) {
        for (key, op) in batch {
            if let Op::Insert(value) = op {
                self.write(&key, &value);
            } else {
                self.remove(&key);
            }
        }
    }
}

// A boxed `Storage` is also a `Storage`.
impl Storage for Box<dyn Storage> {
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.as_ref().read(key)
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        self.as_ref().scan(min, max, order)
    }

    fn scan_keys<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        self.as_ref().scan_keys(min, max, order)
    }

    fn scan_values<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        self.as_ref().scan_values(min, max, order)
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        self.as_mut().write(key, value)
    }

    fn remove(&mut self, key: &[u8]) {
        self.as_mut().remove(key)
    }

    fn flush(&mut self, batch: Batch) {
        self.as_mut().flush(batch)
    }
}

/// A read-only adapter over a borrowed storage.
///
/// Query handlers hold a `&dyn Storage` snapshot; components that demand an
/// owned `impl Storage` (such as the sandbox buffer of the static-call
/// bridge) wrap the borrow in this. Any attempt to write through the wrapper
/// is a programming error.
#[derive(Clone)]
pub struct StorageWrapper<'a> {
    storage: &'a dyn Storage,
}

impl<'a> StorageWrapper<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }
}

impl Storage for StorageWrapper<'_> {
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.storage.read(key)
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        self.storage.scan(min, max, order)
    }

    fn scan_keys<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        self.storage.scan_keys(min, max, order)
    }

    fn scan_values<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        self.storage.scan_values(min, max, order)
    }

    fn write(&mut self, _key: &[u8], _value: &[u8]) {
        unimplemented!("StorageWrapper is read-only");
    }

    fn remove(&mut self, _key: &[u8]) {
        unimplemented!("StorageWrapper is read-only");
    }
}

// derive std Clone trait for any type that implements Storage
dyn_clone::clone_trait_object!(Storage);

use {
    crate::{Order, Record, Storage},
    std::{collections::BTreeMap, iter, ops::Bound},
};

/// An in-memory KV store for use in tests.
#[derive(Default, Debug, Clone)]
pub struct MockStorage {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MockStorage {
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.get(key).cloned()
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        // `BTreeMap::range` panics if min > max; our Storage contract demands
        // an empty iterator instead.
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Box::new(iter::empty());
            }
        }

        let min = min.map_or(Bound::Unbounded, |bytes| Bound::Included(bytes.to_vec()));
        let max = max.map_or(Bound::Unbounded, |bytes| Bound::Excluded(bytes.to_vec()));
        let iter = self.data.range((min, max)).map(|(k, v)| (k.clone(), v.clone()));

        match order {
            Order::Ascending => Box::new(iter),
            Order::Descending => Box::new(iter.rev()),
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
        self.data.insert(key.to_vec(), value.to_vec());
    }

    fn remove(&mut self, key: &[u8]) {
        self.data.remove(key);
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_respects_bounds_and_order() {
        let mut storage = MockStorage::new();
        for i in 1..=5_u32 {
            storage.write(&i.to_be_bytes(), &i.to_be_bytes());
        }

        let records = storage
            .scan(
                Some(&2_u32.to_be_bytes()),
                Some(&5_u32.to_be_bytes()),
                Order::Ascending,
            )
            .collect::<Vec<_>>();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].0, 2_u32.to_be_bytes());
        assert_eq!(records[2].0, 4_u32.to_be_bytes());

        let keys = storage
            .scan_keys(None, None, Order::Descending)
            .collect::<Vec<_>>();
        assert_eq!(keys[0], 5_u32.to_be_bytes());
    }

    #[test]
    fn inverted_bounds_yield_empty() {
        let mut storage = MockStorage::new();
        storage.write(b"a", b"1");

        assert_eq!(storage.scan(Some(b"z"), Some(b"a"), Order::Ascending).count(), 0);
    }
}

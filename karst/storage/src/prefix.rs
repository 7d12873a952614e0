use {
    crate::{Codec, PrimaryKey},
    karst_types::{
        Order, Record, StdResult, Storage, concat, extend_one_byte, increment_last_byte,
        nested_namespaces_with_key, trim,
    },
    std::marker::PhantomData,
};

/// An iteration bound over typed keys.
///
/// Minimum bounds default to inclusive and maximum bounds to exclusive when
/// the raw bound is computed, matching the `Storage::scan` contract.
pub enum Bound<K> {
    Inclusive(K),
    Exclusive(K),
}

/// All records under one namespace, iterable under typed bounds.
pub struct Prefix<K, T, C> {
    prefix: Vec<u8>,
    suffix: PhantomData<K>,
    data: PhantomData<T>,
    codec: PhantomData<C>,
}

impl<K, T, C> Prefix<K, T, C>
where
    K: PrimaryKey,
    C: Codec<T>,
{
    pub fn new(namespace: &[u8]) -> Self {
        Self {
            prefix: nested_namespaces_with_key(Some(namespace), &[], None),
            suffix: PhantomData,
            data: PhantomData,
            codec: PhantomData,
        }
    }

    /// Compute the absolute raw bounds of the iteration: the namespace
    /// prefix joined with the typed bounds, or the namespace's own span
    /// where a bound is absent.
    fn raw_bounds(&self, min: Option<Bound<K>>, max: Option<Bound<K>>) -> (Vec<u8>, Vec<u8>) {
        let min = match min {
            None => self.prefix.clone(),
            Some(Bound::Inclusive(key)) => concat(&self.prefix, &key.joined_key()),
            Some(Bound::Exclusive(key)) => {
                extend_one_byte(concat(&self.prefix, &key.joined_key()))
            },
        };
        let max = match max {
            None => increment_last_byte(self.prefix.clone()),
            Some(Bound::Inclusive(key)) => {
                extend_one_byte(concat(&self.prefix, &key.joined_key()))
            },
            Some(Bound::Exclusive(key)) => concat(&self.prefix, &key.joined_key()),
        };
        (min, max)
    }

    pub fn range_raw<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'b> {
        let (min, max) = self.raw_bounds(min, max);
        let prefix = self.prefix.clone();

        Box::new(
            storage
                .scan(Some(&min), Some(&max), order)
                .map(move |(k, v)| (trim(&prefix, &k), v)),
        )
    }

    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<(K::Output, T)>> + 'b> {
        Box::new(self.range_raw(storage, min, max, order).map(|(k, v)| {
            let key = K::from_slice(&k)?;
            let data = C::decode(&v)?;
            Ok((key, data))
        }))
    }

    pub fn keys<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<K::Output>> + 'b> {
        let (min, max) = self.raw_bounds(min, max);
        let prefix = self.prefix.clone();

        Box::new(
            storage
                .scan_keys(Some(&min), Some(&max), order)
                .map(move |k| K::from_slice(&trim(&prefix, &k))),
        )
    }

    pub fn values<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<T>> + 'b> {
        let (min, max) = self.raw_bounds(min, max);

        Box::new(
            storage
                .scan_values(Some(&min), Some(&max), order)
                .map(|v| C::decode(&v)),
        )
    }
}

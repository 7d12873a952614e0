use {
    crate::{Borsh, Bound, Codec, Path, Prefix, PrimaryKey},
    karst_types::{Order, Record, StdResult, Storage},
    std::{borrow::Cow, marker::PhantomData},
};

/// A typed key-value mapping under one storage namespace.
pub struct Map<'a, K, T, C = Borsh>
where
    C: Codec<T>,
{
    namespace: &'a [u8],
    key: PhantomData<K>,
    data: PhantomData<T>,
    codec: PhantomData<C>,
}

impl<'a, K, T, C> Map<'a, K, T, C>
where
    C: Codec<T>,
{
    pub const fn new(namespace: &'a str) -> Self {
        Self {
            namespace: namespace.as_bytes(),
            key: PhantomData,
            data: PhantomData,
            codec: PhantomData,
        }
    }
}

impl<'a, K, T, C> Map<'a, K, T, C>
where
    K: PrimaryKey,
    C: Codec<T>,
{
    fn path(&self, key: K) -> Path<'static, T, C> {
        Path::new(self.namespace, Some(&Cow::Owned(key.joined_key())))
    }

    fn no_prefix(&self) -> Prefix<K, T, C> {
        Prefix::new(self.namespace)
    }

    // ---------------------- methods for single entries -----------------------

    pub fn has(&self, storage: &dyn Storage, key: K) -> bool {
        self.path(key).exists(storage)
    }

    pub fn may_load(&self, storage: &dyn Storage, key: K) -> StdResult<Option<T>> {
        self.path(key).may_load(storage)
    }

    pub fn load(&self, storage: &dyn Storage, key: K) -> StdResult<T> {
        self.path(key).load(storage)
    }

    pub fn save(&self, storage: &mut dyn Storage, key: K, data: &T) -> StdResult<()> {
        self.path(key).save(storage, data)
    }

    pub fn remove(&self, storage: &mut dyn Storage, key: K) {
        self.path(key).remove(storage)
    }

    // -------------------------- iteration methods ----------------------------

    pub fn range_raw<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'b> {
        self.no_prefix().range_raw(storage, min, max, order)
    }

    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<(K::Output, T)>> + 'b> {
        self.no_prefix().range(storage, min, max, order)
    }

    pub fn keys<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<K::Output>> + 'b> {
        self.no_prefix().keys(storage, min, max, order)
    }

    pub fn values<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<T>> + 'b> {
        self.no_prefix().values(storage, min, max, order)
    }
}

// ----------------------------------- tests -----------------------------------

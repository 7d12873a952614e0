use {
    crate::Codec,
    karst_types::{StdError, StdResult, Storage, nested_namespaces_with_key},
    std::{borrow::Cow, marker::PhantomData},
};

/// The fully-resolved storage key of one value, with the codec and value
/// type attached at the type level.
pub struct Path<'a, T, C> {
    storage_key: Cow<'a, [u8]>,
    data: PhantomData<T>,
    codec: PhantomData<C>,
}

impl<T, C> Clone for Path<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            storage_key: self.storage_key.clone(),
            data: PhantomData,
            codec: PhantomData,
        }
    }
}

impl<'a, T, C> Path<'a, T, C>
where
    C: Codec<T>,
{
    pub fn new(namespace: &[u8], maybe_key: Option<&Cow<[u8]>>) -> Self {
        Self {
            storage_key: Cow::Owned(nested_namespaces_with_key(
                Some(namespace),
                &[],
                maybe_key,
            )),
            data: PhantomData,
            codec: PhantomData,
        }
    }

    pub const fn from_raw(storage_key: &'a [u8]) -> Self {
        Self {
            storage_key: Cow::Borrowed(storage_key),
            data: PhantomData,
            codec: PhantomData,
        }
    }

    #[inline]
    pub fn storage_key(&self) -> &[u8] {
        self.storage_key.as_ref()
    }

    pub fn exists(&self, storage: &dyn Storage) -> bool {
        storage.read(self.storage_key()).is_some()
    }

    pub fn may_load_raw(&self, storage: &dyn Storage) -> Option<Vec<u8>> {
        storage.read(self.storage_key())
    }

    pub fn may_load(&self, storage: &dyn Storage) -> StdResult<Option<T>> {
        storage
            .read(self.storage_key())
            .map(|val| C::decode(&val))
            .transpose()
    }

    pub fn load_raw(&self, storage: &dyn Storage) -> StdResult<Vec<u8>> {
        storage
            .read(self.storage_key())
            .ok_or_else(|| StdError::data_not_found::<T>(self.storage_key()))
    }

    pub fn load(&self, storage: &dyn Storage) -> StdResult<T> {
        storage
            .read(self.storage_key())
            .ok_or_else(|| StdError::data_not_found::<T>(self.storage_key()))
            .and_then(|val| C::decode(&val))
    }

    pub fn save(&self, storage: &mut dyn Storage, data: &T) -> StdResult<()> {
        let data_raw = C::encode(data)?;
        storage.write(self.storage_key(), &data_raw);
        Ok(())
    }

    pub fn remove(&self, storage: &mut dyn Storage) {
        storage.remove(self.storage_key());
    }
}

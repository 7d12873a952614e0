use {
    crate::{Borsh, Codec, Path},
    std::ops::Deref,
};

/// A single typed value at a fixed storage key.
pub struct Item<'a, T, C = Borsh>
where
    C: Codec<T>,
{
    path: Path<'a, T, C>,
}

impl<'a, T, C> Item<'a, T, C>
where
    C: Codec<T>,
{
    pub const fn new(storage_key: &'a str) -> Self {
        Self {
            path: Path::from_raw(storage_key.as_bytes()),
        }
    }
}

// `Item` is effectively a wrapper over a `Path`, so instead of implementing
// methods (`load`, `save`, ...) manually, we simply implement
// `Deref<Target = Path>` so that users can access those methods on `Path`.
impl<'a, T, C: Codec<T>> Deref for Item<'a, T, C> {
    type Target = Path<'a, T, C>;

    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::Item,
        borsh::{BorshDeserialize, BorshSerialize},
        karst_types::MockStorage,
    };

    #[derive(BorshDeserialize, BorshSerialize, PartialEq, Debug)]
    struct Config {
        pub admin: String,
        pub max_depth: u32,
    }

    const CONFIG: Item<Config> = Item::new("config");

    #[test]
    fn save_and_load_works() {
        let mut storage = MockStorage::new();

        // Attempt to read before the data is saved.
        {
            assert!(CONFIG.load(&storage).is_err());
            assert_eq!(CONFIG.may_load(&storage).unwrap(), None);
        }

        // Attempt to read after saving the data.
        {
            let cfg = Config {
                admin: "admin".to_string(),
                max_depth: 1234,
            };

            CONFIG.save(&mut storage, &cfg).unwrap();

            assert_eq!(CONFIG.load(&storage).unwrap(), cfg);
            assert_eq!(CONFIG.may_load(&storage).unwrap(), Some(cfg));
        }
    }

    #[test]
    fn exists_works() {
        let mut storage = MockStorage::new();

        assert!(!CONFIG.exists(&storage));

        let cfg = Config {
            admin: "admin".to_string(),
            max_depth: 1234,
        };

        CONFIG.save(&mut storage, &cfg).unwrap();

        assert!(CONFIG.exists(&storage));
    }

    #[test]
    fn remove_works() {
        let mut storage = MockStorage::new();

        let cfg = Config {
            admin: "admin".to_string(),
            max_depth: 1234,
        };

        CONFIG.save(&mut storage, &cfg).unwrap();
        assert!(CONFIG.exists(&storage));

        CONFIG.remove(&mut storage);
        assert!(!CONFIG.exists(&storage));

        // Safe to remove it twice.
        CONFIG.remove(&mut storage);
        assert!(!CONFIG.exists(&storage));
    }
}

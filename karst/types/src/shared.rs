use std::{
    mem::replace,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A wrapper over the `Arc<RwLock<T>>` smart pointer, providing some
/// convenience methods.
#[derive(Debug, Default)]
pub struct Shared<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Shared<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    pub fn read_access(&self) -> RwLockReadGuard<'_, S> {
        self.inner
            .read()
            .unwrap_or_else(|err| panic!("poisoned lock: {err:?}"))
    }

    pub fn write_access(&self) -> RwLockWriteGuard<'_, S> {
        self.inner
            .write()
            .unwrap_or_else(|err| panic!("poisoned lock: {err:?}"))
    }

    pub fn read_with<F, T>(&self, action: F) -> T
    where
        F: FnOnce(RwLockReadGuard<S>) -> T,
    {
        action(self.read_access())
    }

    pub fn write_with<F, T>(&self, action: F) -> T
    where
        F: FnOnce(RwLockWriteGuard<S>) -> T,
    {
        action(self.write_access())
    }

    /// Return the value inside and replace it with a new one.
    pub fn replace(&self, new_value: S) -> S {
        let mut write = self.write_access();
        replace(&mut write, new_value)
    }

    /// Disassemble the smart pointer and return the inner value.
    ///
    /// Panics if reference count is greater than 1, or if the lock is
    /// poisoned.
    pub fn disassemble(self) -> S {
        Arc::try_unwrap(self.inner)
            .unwrap_or_else(|_| panic!("unwrapping Arc when ref count > 1"))
            .into_inner()
            .unwrap_or_else(|err| panic!("poisoned lock: {err:?}"))
    }
}

impl<S> Clone for Shared<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_write() {
        let old_value = vec![1, 2, 3, 4, 5];
        let shared = Shared::new(old_value.clone());

        assert!(shared.read_with(|inner| *inner == old_value));

        let new_value = vec![6, 7, 8, 9, 10];
        let return_value = shared.replace(new_value.clone());

        assert!(shared.read_with(|inner| *inner == new_value));
        assert_eq!(return_value, old_value);
    }

    #[test]
    fn clones_share_state() {
        let shared = Shared::new(0_u64);
        let clone = shared.clone();

        clone.write_with(|mut inner| *inner += 42);

        assert!(shared.read_with(|inner| *inner == 42));
    }
}

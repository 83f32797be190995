use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{CResult, Error};
use crate::object_store::ObjectStore;

/// An in-process object store, backed by a `BTreeMap` behind a single
/// `Mutex`.
///
/// Every method takes `&self` and holds the lock only for the duration of
/// the call, so a store can be shared behind an `Arc` across clients
/// without any of them needing `&mut self`.
#[derive(Default)]
pub struct MemoryObjectStore {
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    /// Creates an empty in-memory object store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for MemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "memory")
    }
}

impl ObjectStore for MemoryObjectStore {
    fn put_if_absent(&self, name: &str, bytes: Vec<u8>) -> CResult<()> {
        let mut blobs = self.blobs.lock().unwrap();
        if blobs.contains_key(name) {
            return Err(Error::AlreadyExists(name.to_string()));
        }
        blobs.insert(name.to_string(), bytes);
        Ok(())
    }

    fn list_prefix(&self, prefix: &str) -> CResult<Vec<String>> {
        let blobs = self.blobs.lock().unwrap();
        Ok(blobs.keys().filter(|name| name.starts_with(prefix)).cloned().collect())
    }

    fn read(&self, name: &str) -> CResult<Vec<u8>> {
        let blobs = self.blobs.lock().unwrap();
        blobs.get(name).cloned().ok_or_else(|| Error::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_if_absent_rejects_collisions() {
        let store = MemoryObjectStore::new();
        store.put_if_absent("a", vec![1]).unwrap();
        let err = store.put_if_absent("a", vec![2]).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
        assert_eq!(store.read("a").unwrap(), vec![1]);
    }

    #[test]
    fn read_missing_is_not_found() {
        let store = MemoryObjectStore::new();
        let err = store.read("missing").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn list_prefix_filters_and_is_order_agnostic() {
        let store = MemoryObjectStore::new();
        store.put_if_absent("_log_00000000000000000002", vec![]).unwrap();
        store.put_if_absent("_log_00000000000000000001", vec![]).unwrap();
        store.put_if_absent("_table_x_abc", vec![]).unwrap();

        let mut names = store.list_prefix("_log_").unwrap();
        names.sort();
        assert_eq!(names, vec!["_log_00000000000000000001", "_log_00000000000000000002"]);
    }
}

use std::path::PathBuf;
use std::sync::Mutex;

use crate::encoding::uuid_v4;
use crate::error::{CResult, Error};
use crate::object_store::ObjectStore;

/// A directory-backed object store.
///
/// `put_if_absent` writes the blob to a uniquely named temp file in the
/// same directory, then `std::fs::hard_link`s it into its final name,
/// removing the temp file on both the success and the collision path.
/// This is the classic atomic-create-exclusive substitute: write to a
/// temporary name, then perform an atomic link/rename that fails on
/// collision.
///
/// Keeps a `Mutex<()>` to serialize its own bookkeeping. The mutex only
/// protects the temp-file-then-link dance in this process; it plays no
/// role in cross-process correctness, which rests entirely on the
/// filesystem's hardlink semantics.
pub struct FileObjectStore {
    basedir: PathBuf,
    bookkeeping: Mutex<()>,
}

impl FileObjectStore {
    /// Opens (creating if necessary) a file-backed object store rooted at
    /// `basedir`.
    pub fn new(basedir: impl Into<PathBuf>) -> CResult<Self> {
        let basedir = basedir.into();
        std::fs::create_dir_all(&basedir)?;
        Ok(Self { basedir, bookkeeping: Mutex::new(()) })
    }
}

impl std::fmt::Display for FileObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file({})", self.basedir.display())
    }
}

impl ObjectStore for FileObjectStore {
    fn put_if_absent(&self, name: &str, bytes: Vec<u8>) -> CResult<()> {
        let _guard = self.bookkeeping.lock().unwrap();

        let tmp_path = self.basedir.join(format!(".tmp-{}", uuid_v4()));
        std::fs::write(&tmp_path, &bytes)?;

        let final_path = self.basedir.join(name);
        let result = std::fs::hard_link(&tmp_path, &final_path);
        let _ = std::fs::remove_file(&tmp_path);

        match result {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(Error::AlreadyExists(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list_prefix(&self, prefix: &str) -> CResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.basedir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(prefix) {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> CResult<Vec<u8>> {
        let path = self.basedir.join(name);
        std::fs::read(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(name.to_string())
            } else {
                Error::Io(err)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_if_absent_rejects_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileObjectStore::new(dir.path()).unwrap();

        store.put_if_absent("a", vec![1, 2, 3]).unwrap();
        let err = store.put_if_absent("a", vec![9]).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
        assert_eq!(store.read("a").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn collision_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileObjectStore::new(dir.path()).unwrap();

        store.put_if_absent("a", vec![1]).unwrap();
        let _ = store.put_if_absent("a", vec![2]);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".tmp-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileObjectStore::new(dir.path()).unwrap();
        let err = store.read("missing").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn list_prefix_filters_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileObjectStore::new(dir.path()).unwrap();
        store.put_if_absent("_log_00000000000000000001", vec![]).unwrap();
        store.put_if_absent("_table_x_abc", vec![]).unwrap();

        let names = store.list_prefix("_log_").unwrap();
        assert_eq!(names, vec!["_log_00000000000000000001"]);
    }
}

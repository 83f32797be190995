use std::sync::Arc;

use crate::catalog::{dataobject_name, DataObject, Row};
use crate::encoding::decode;
use crate::error::CResult;
use crate::object_store::ObjectStore;

/// A lazy, forward-only cursor over a table's rows, merging a
/// transaction's unflushed buffer with the data objects its snapshot and
/// local actions reference.
///
/// Yield order: unflushed rows first (in insertion order), then each
/// referenced data object in action-list order, each object's own rows in
/// stored order. Data objects are read one at a time, on demand, so a
/// scan over a table with many large data objects never materializes
/// more than one of them at a time.
///
/// This snapshots the unflushed buffer at construction time rather than
/// aliasing the live transaction buffer, so rows written after a cursor
/// is constructed are not visible to that cursor.
pub struct ScanIterator<S: ObjectStore + ?Sized> {
    store: Arc<S>,
    table: String,
    unflushed: std::vec::IntoIter<Row>,
    dataobject_names: std::vec::IntoIter<String>,
    current: Option<std::vec::IntoIter<Row>>,
}

impl<S: ObjectStore + ?Sized> ScanIterator<S> {
    pub(crate) fn new(
        store: Arc<S>,
        table: String,
        unflushed: Vec<Row>,
        dataobject_names: Vec<String>,
    ) -> Self {
        Self {
            store,
            table,
            unflushed: unflushed.into_iter(),
            dataobject_names: dataobject_names.into_iter(),
            current: None,
        }
    }
}

impl<S: ObjectStore + ?Sized> Iterator for ScanIterator<S> {
    type Item = CResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(row) = self.unflushed.next() {
            return Some(Ok(row));
        }

        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(row) = current.next() {
                    return Some(Ok(row));
                }
            }

            let name = self.dataobject_names.next()?;
            let blob_name = dataobject_name(&self.table, &name);
            let bytes = match self.store.read(&blob_name) {
                Ok(bytes) => bytes,
                Err(err) => return Some(Err(err)),
            };
            let object: DataObject = match decode(&bytes) {
                Ok(object) => object,
                Err(err) => return Some(Err(err)),
            };
            self.current = Some(object.data.into_iter());
        }
    }
}

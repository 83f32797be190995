//! `tablestore` is a minimal transactional table store layered over an
//! object-storage abstraction.
//!
//! Multiple independent clients, potentially on different hosts, read and
//! write tabular data through optimistic, snapshot-isolated transactions
//! whose durability and conflict detection rely solely on a single atomic
//! primitive provided by the storage layer: put-if-absent (create-exclusive).
//! There is no coordinator process; consistency emerges from the log
//! naming discipline and the atomic create.
//!
//! ## Getting started
//!
//! ```rust
//! use std::sync::Arc;
//! use tablestore::object_store::MemoryObjectStore;
//! use tablestore::txn::Client;
//!
//! fn main() {
//!     run().unwrap();
//! }
//!
//! fn run() -> tablestore::error::CResult<()> {
//!     let store = Arc::new(MemoryObjectStore::new());
//!     let mut client = Client::new(store);
//!
//!     client.new_tx()?;
//!     client.create_table("x", vec!["a".to_string(), "b".to_string()])?;
//!     client.write_row("x", vec!["Joey".into(), 1.into()])?;
//!     client.write_row("x", vec!["Yue".into(), 2.into()])?;
//!     client.commit_tx()?;
//!
//!     client.new_tx()?;
//!     let rows: Vec<_> = client.scan("x")?.collect::<tablestore::error::CResult<_>>()?;
//!     assert_eq!(rows.len(), 2);
//!     client.commit_tx()?;
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod encoding;
pub mod error;
pub mod object_store;
pub mod txn;

pub use catalog::{Action, Columns, DataObject, LogEntry, Row};
pub use config::Config;
pub use error::{CResult, Error};
pub use object_store::{FileObjectStore, MemoryObjectStore, ObjectStore};
pub use txn::{Client, ScanIterator, Transaction};

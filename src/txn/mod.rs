//! The client / transaction core: opening a snapshot, staging writes,
//! scanning the merge of snapshot and local state, and committing through
//! an atomic name collision on the log.

pub mod client;
pub mod scan;
pub mod transaction;

pub use client::Client;
pub use scan::ScanIterator;
pub use transaction::Transaction;

use std::sync::Arc;

use crate::catalog::{dataobject_name, log_name, Action, Columns, DataObject, LogEntry, Row, LOG_PREFIX};
use crate::config::Config;
use crate::encoding::{decode, encode, uuid_v4};
use crate::error::{CResult, Error};
use crate::object_store::ObjectStore;
use crate::txn::scan::ScanIterator;
use crate::txn::transaction::Transaction;

/// A per-client handle holding at most one open transaction against a
/// shared object store.
///
/// Opening a transaction replays the committed log into a snapshot;
/// writes are staged locally until `commit_tx` publishes one log entry
/// with an atomic name collision as the only serialization point.
///
/// Not safe for concurrent use from multiple threads: a `Client` holds at
/// most one `Transaction`, and callers that share a `Client` must
/// serialize externally. Distinct `Client`s (even sharing the same
/// store) are fully independent.
pub struct Client<S: ObjectStore + ?Sized> {
    store: Arc<S>,
    config: Config,
    tx: Option<Transaction>,
}

impl<S: ObjectStore + ?Sized> Client<S> {
    /// Creates a client with default configuration.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, Config::default())
    }

    /// Creates a client with explicit configuration.
    pub fn with_config(store: Arc<S>, config: Config) -> Self {
        Client { store, config, tx: None }
    }

    /// Returns the id of the currently open transaction, if any.
    pub fn current_tx_id(&self) -> Option<u64> {
        self.tx.as_ref().map(|tx| tx.id)
    }

    /// Opens a new transaction against a consistent snapshot of committed
    /// history.
    ///
    /// Fails with [`Error::ExistingTransaction`] if one is already open.
    /// Replays every committed log entry in id order, folding each
    /// action into the new transaction's `previous_actions` and, for
    /// `ChangeMetadata`, into `tables` (last writer wins on column list).
    /// The new transaction's id is one past the highest id observed (1 if
    /// the log is empty).
    pub fn new_tx(&mut self) -> CResult<()> {
        if self.tx.is_some() {
            return Err(Error::ExistingTransaction);
        }

        let mut names = self.store.list_prefix(LOG_PREFIX)?;
        names.sort();

        let mut tx = Transaction::new(0);
        let mut max_id = 0u64;

        for name in names {
            let bytes = self.store.read(&name)?;
            let entry: LogEntry = decode(&bytes)?;
            max_id = max_id.max(entry.id);

            for (table, actions) in entry.actions {
                for action in actions {
                    if let Action::ChangeMetadata { ref columns, .. } = action {
                        tx.tables.insert(table.clone(), columns.clone());
                    }
                    tx.previous_actions.entry(table.clone()).or_default().push(action);
                }
            }
        }

        tx.id = max_id + 1;
        self.tx = Some(tx);
        Ok(())
    }

    /// Registers a new table with the given column list.
    ///
    /// Fails with [`Error::NoTransaction`] if none is open, or
    /// [`Error::TableExists`] if the name is already known (whether from
    /// the snapshot or an earlier `create_table` in this transaction).
    /// Re-definition of an existing table's columns is intentionally not
    /// exposed here even though the log format could represent it.
    pub fn create_table(&mut self, table: &str, columns: Columns) -> CResult<()> {
        let tx = self.tx.as_mut().ok_or(Error::NoTransaction)?;
        if tx.tables.contains_key(table) {
            return Err(Error::TableExists(table.to_string()));
        }

        tx.tables.insert(table.to_string(), columns.clone());
        tx.actions
            .entry(table.to_string())
            .or_default()
            .push(Action::ChangeMetadata { table: table.to_string(), columns });
        Ok(())
    }

    /// Buffers a row write to `table`.
    ///
    /// Fails with [`Error::NoTransaction`] if none is open, or
    /// [`Error::NoSuchTable`] if the table isn't known to this
    /// transaction. Triggers an automatic `flush_rows` once the buffer
    /// reaches `Config::dataobject_size`. Row arity is only checked
    /// against the table's column list when `Config::strict_row_arity` is
    /// set; by default the core accepts heterogeneous tuples.
    pub fn write_row(&mut self, table: &str, row: Row) -> CResult<()> {
        let threshold = self.config.dataobject_size;
        let strict_arity = self.config.strict_row_arity;

        let tx = self.tx.as_mut().ok_or(Error::NoTransaction)?;
        let columns = tx.tables.get(table).ok_or_else(|| Error::NoSuchTable(table.to_string()))?;

        if strict_arity && row.len() != columns.len() {
            return Err(Error::Internal(format!(
                "row arity {} does not match table {table}'s {} columns",
                row.len(),
                columns.len(),
            )));
        }

        let buffer = tx.unflushed_data.entry(table.to_string()).or_default();
        buffer.push(row);
        let len = buffer.len();

        if len >= threshold {
            self.flush_rows(table)?;
        }
        Ok(())
    }

    /// Flushes `table`'s unflushed row buffer into a new data object,
    /// if non-empty. Idempotent on an empty buffer.
    pub fn flush_rows(&mut self, table: &str) -> CResult<()> {
        let store = self.store.clone();

        let data = {
            let tx = self.tx.as_mut().ok_or(Error::NoTransaction)?;
            match tx.unflushed_data.get(table) {
                Some(rows) if !rows.is_empty() => rows.clone(),
                _ => return Ok(()),
            }
        };

        let name = uuid_v4();
        let object =
            DataObject { table: table.to_string(), name: name.clone(), length: data.len(), data };
        let bytes = encode(&object)?;
        let blob_name = dataobject_name(table, &name);
        store.put_if_absent(&blob_name, bytes)?;

        let tx = self.tx.as_mut().ok_or(Error::NoTransaction)?;
        tx.actions
            .entry(table.to_string())
            .or_default()
            .push(Action::AddDataobject { name, table: table.to_string() });
        tx.unflushed_data.insert(table.to_string(), Vec::new());
        Ok(())
    }

    /// Returns a lazy cursor over `table`'s rows: unflushed rows first, in
    /// insertion order, then each data object referenced by the
    /// transaction's snapshot and local actions, in that order.
    ///
    /// Never fails on an unknown table (only `create_table`/`write_row`
    /// do); an unknown table simply yields no rows.
    pub fn scan(&self, table: &str) -> CResult<ScanIterator<S>> {
        let tx = self.tx.as_ref().ok_or(Error::NoTransaction)?;

        let mut dataobject_names = Vec::new();
        for action in tx.previous_actions.get(table).into_iter().flatten() {
            if let Action::AddDataobject { name, .. } = action {
                dataobject_names.push(name.clone());
            }
        }
        for action in tx.actions.get(table).into_iter().flatten() {
            if let Action::AddDataobject { name, .. } = action {
                dataobject_names.push(name.clone());
            }
        }

        let unflushed = tx.unflushed_data.get(table).cloned().unwrap_or_default();
        Ok(ScanIterator::new(self.store.clone(), table.to_string(), unflushed, dataobject_names))
    }

    /// Commits the open transaction.
    ///
    /// Flushes every known table's unflushed rows first, so every
    /// `AddDataobject` action the log entry names refers to a blob that
    /// already exists. A transaction with no actions at all is a
    /// read-only no-op: the handle is cleared and no blob is written.
    /// Otherwise the log entry is written via `put_if_absent` on
    /// `_log_<id>`; a name collision means some other transaction
    /// committed at the same id first, and this commit fails with
    /// [`Error::ConcurrentCommit`] (the handle is cleared either way,
    /// since the transaction is dead, and its data-object blobs, if any,
    /// are orphaned). Any other store error is surfaced with the transaction
    /// left open, so the caller may retry the commit.
    pub fn commit_tx(&mut self) -> CResult<()> {
        let tables: Vec<String> = {
            let tx = self.tx.as_ref().ok_or(Error::NoTransaction)?;
            tx.tables.keys().cloned().collect()
        };
        for table in &tables {
            self.flush_rows(table)?;
        }

        let tx = self.tx.as_ref().ok_or(Error::NoTransaction)?;
        let wrote_anything = tx.actions.values().any(|actions| !actions.is_empty());
        if !wrote_anything {
            self.tx = None;
            return Ok(());
        }

        let entry = LogEntry { id: tx.id, actions: tx.actions.clone() };
        let id = tx.id;
        let bytes = encode(&entry)?;
        let name = log_name(id);

        match self.store.put_if_absent(&name, bytes) {
            Ok(()) => {
                log::info!("committed transaction {id} as {name}");
                self.tx = None;
                Ok(())
            }
            Err(Error::AlreadyExists(_)) => {
                log::warn!("transaction {id} lost the race for {name}, aborting");
                self.tx = None;
                Err(Error::ConcurrentCommit)
            }
            Err(err) => Err(err),
        }
    }
}

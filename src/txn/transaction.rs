use std::collections::BTreeMap;

use crate::catalog::{Action, Columns, Row};

/// The state of one open, one-shot transaction.
///
/// A plain data holder. Every map is keyed by table name and
/// `BTreeMap`-backed for deterministic iteration order.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Strictly greater than every log id this transaction observed at
    /// `new_tx` time.
    pub id: u64,

    /// Actions folded in from replaying the committed log at `new_tx`
    /// time. Fixed for the lifetime of the transaction: other clients'
    /// concurrent commits never touch this map.
    pub previous_actions: BTreeMap<String, Vec<Action>>,

    /// Actions this transaction has produced locally (not yet committed).
    pub actions: BTreeMap<String, Vec<Action>>,

    /// The union of snapshot tables and locally created tables, each
    /// mapped to its current column list.
    pub tables: BTreeMap<String, Columns>,

    /// Rows written but not yet flushed to a data object, per table.
    pub unflushed_data: BTreeMap<String, Vec<Row>>,
}

impl Transaction {
    /// Creates a fresh, empty transaction at the given id.
    pub fn new(id: u64) -> Self {
        Transaction {
            id,
            previous_actions: BTreeMap::new(),
            actions: BTreeMap::new(),
            tables: BTreeMap::new(),
            unflushed_data: BTreeMap::new(),
        }
    }
}

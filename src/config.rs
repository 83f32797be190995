use serde_derive::{Deserialize, Serialize};

/// Default number of rows buffered per table before an automatic flush.
pub const DEFAULT_DATAOBJECT_SIZE: usize = 65536;

/// Tunables for a [`crate::txn::Client`].
///
/// A plain serde-derived struct with an explicit [`Default`] impl, rather
/// than a builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Rows buffered per table before `write_row` triggers an automatic
    /// `flush_rows`.
    pub dataobject_size: usize,

    /// When set, `write_row` checks the row's arity against the table's
    /// column list and fails with [`crate::error::Error::Internal`] on
    /// mismatch. Off by default: the core does not validate row arity
    /// unless this is enabled.
    pub strict_row_arity: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config { dataobject_size: DEFAULT_DATAOBJECT_SIZE, strict_row_arity: false }
    }
}

use std::fmt;

/// All errors the table store can return.
///
/// No `thiserror`/`anyhow` here: this crate is small enough that a manual
/// `Display` impl is no burden, and callers get an enum they can match on
/// without pulling in an error-derive dependency.
#[derive(Debug)]
pub enum Error {
    /// `new_tx` called while the client already has an open transaction.
    ExistingTransaction,
    /// A transaction-scoped operation was called with no transaction open.
    NoTransaction,
    /// `create_table` named a table that's already in the transaction's
    /// known-tables set.
    TableExists(String),
    /// `write_row` or an arity check named a table the transaction doesn't
    /// know about.
    NoSuchTable(String),
    /// The transaction's commit lost a name collision on `_log_<id>`.
    ConcurrentCommit,
    /// `put_if_absent` found a blob already at that name.
    AlreadyExists(String),
    /// `read` found no blob at that name.
    NotFound(String),
    /// The object store's underlying I/O failed.
    Io(std::io::Error),
    /// A blob failed to encode or decode as the expected envelope.
    Serialization(String),
    /// An invariant the core relies on was violated.
    Internal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ExistingTransaction => write!(f, "a transaction is already open"),
            Error::NoTransaction => write!(f, "no transaction is open"),
            Error::TableExists(table) => write!(f, "table already exists: {table}"),
            Error::NoSuchTable(table) => write!(f, "no such table: {table}"),
            Error::ConcurrentCommit => write!(f, "concurrent commit: lost the race on the log id"),
            Error::AlreadyExists(name) => write!(f, "already exists: {name}"),
            Error::NotFound(name) => write!(f, "not found: {name}"),
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::Serialization(msg) => write!(f, "serialization error: {msg}"),
            Error::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::AlreadyExists {
            Error::AlreadyExists(err.to_string())
        } else if err.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(err.to_string())
        } else {
            Error::Io(err)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Shorthand used throughout the crate for a `Result` with this crate's
/// `Error` type.
pub type CResult<T> = Result<T, Error>;

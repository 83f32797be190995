//! The catalog's wire types: the two blob families that live in the object
//! store (log entries and data objects) and the action log they're built
//! from.

use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};

/// An ordered column list for a table.
pub type Columns = Vec<String>;

/// A single row: an ordered sequence of opaque scalar values.
///
/// The core never inspects a row's contents beyond counting it, rows are
/// opaque tuples, and `serde_json::Value` is the natural JSON-compatible
/// stand-in for "string, integer, boolean, or null."
pub type Row = Vec<serde_json::Value>;

/// A single logical change recorded by a transaction: either the
/// registration of a data object, or the (re)declaration of a table's
/// columns.
///
/// Serialized with `serde`'s default externally tagged representation,
/// which produces exactly `{"AddDataobject": {"Name": ..., "Table": ...}}`
/// or `{"ChangeMetadata": {"Table": ..., "Columns": [...]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    AddDataobject {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Table")]
        table: String,
    },
    ChangeMetadata {
        #[serde(rename = "Table")]
        table: String,
        #[serde(rename = "Columns")]
        columns: Columns,
    },
}

/// One blob per committed transaction, recording the ordered actions that
/// transaction performed, grouped by table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "Id")]
    pub id: u64,
    #[serde(rename = "Actions")]
    pub actions: BTreeMap<String, Vec<Action>>,
}

/// An immutable, content-batched blob holding a contiguous run of rows for
/// one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataObject {
    #[serde(rename = "Table")]
    pub table: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Data")]
    pub data: Vec<Row>,
    #[serde(rename = "Len")]
    pub length: usize,
}

/// Blob-name prefix for committed log entries.
pub const LOG_PREFIX: &str = "_log_";

/// Formats a log entry's id into its blob name, zero-padded to 20 digits so
/// that lexicographic sort of the name list equals numeric order of ids
/// (for ids up to 10^20 - 1).
pub fn log_name(id: u64) -> String {
    format!("{LOG_PREFIX}{id:020}")
}

/// Formats a data object's blob name.
pub fn dataobject_name(table: &str, uuid: &str) -> String {
    format!("_table_{table}_{uuid}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{decode, encode};

    #[test]
    fn action_envelope_matches_spec_schema() {
        let action = Action::AddDataobject { name: "abc".to_string(), table: "x".to_string() };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json, serde_json::json!({"AddDataobject": {"Name": "abc", "Table": "x"}}));

        let action = Action::ChangeMetadata {
            table: "x".to_string(),
            columns: vec!["a".to_string(), "b".to_string()],
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ChangeMetadata": {"Table": "x", "Columns": ["a", "b"]}})
        );
    }

    #[test]
    fn unknown_action_tag_is_fatal() {
        let bytes = br#"{"SomeUnknownAction": {}}"#;
        let result: Result<Action, _> = serde_json::from_slice(bytes);
        assert!(result.is_err());
    }

    #[test]
    fn log_entry_round_trips() {
        let mut actions = BTreeMap::new();
        actions.insert(
            "x".to_string(),
            vec![Action::ChangeMetadata {
                table: "x".to_string(),
                columns: vec!["a".to_string()],
            }],
        );
        let entry = LogEntry { id: 1, actions };
        let bytes = encode(&entry).unwrap();
        let decoded: LogEntry = decode(&bytes).unwrap();
        assert_eq!(decoded.id, entry.id);
        assert_eq!(decoded.actions, entry.actions);
    }

    #[test]
    fn log_name_is_zero_padded_to_20_digits() {
        assert_eq!(log_name(1), "_log_00000000000000000001");
    }

    #[test]
    fn dataobject_round_trips() {
        let obj = DataObject {
            table: "x".to_string(),
            name: "abc".to_string(),
            data: vec![vec!["Joey".into(), 1.into()]],
            length: 1,
        };
        let bytes = encode(&obj).unwrap();
        let decoded: DataObject = decode(&bytes).unwrap();
        assert_eq!(decoded.table, obj.table);
        assert_eq!(decoded.data, obj.data);
        assert_eq!(decoded.length, obj.length);
    }
}

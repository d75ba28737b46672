//! Record conversion helpers.
//!
//! Records cross the remote boundary as JSON object maps. These helpers move
//! them between typed entities, JSON and libSQL values, and reject keys a
//! collection does not define before they can reach a statement.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempo_core::enums::Collection;

use crate::Record;
use crate::error::RemoteError;

/// Serialize a typed value into a record.
///
/// # Errors
///
/// Returns `RemoteError::InvalidRecord` if the value does not serialize to a
/// JSON object.
pub fn to_record<T: Serialize>(value: &T) -> Result<Record, RemoteError> {
    match serde_json::to_value(value)
        .map_err(|e| RemoteError::InvalidRecord(format!("serialize: {e}")))?
    {
        Value::Object(map) => Ok(map),
        other => Err(RemoteError::InvalidRecord(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Deserialize a record into a typed value.
///
/// # Errors
///
/// Returns `RemoteError::InvalidRecord` if fields are missing or mistyped.
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, RemoteError> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| RemoteError::InvalidRecord(format!("decode: {e}")))
}

/// Reject any key the collection does not define.
///
/// # Errors
///
/// Returns `RemoteError::InvalidRecord` naming the first unknown key.
pub fn check_columns(collection: Collection, record: &Record) -> Result<(), RemoteError> {
    match record.keys().find(|key| !collection.has_column(key)) {
        Some(key) => Err(RemoteError::InvalidRecord(format!(
            "unknown column '{key}' for {collection}"
        ))),
        None => Ok(()),
    }
}

/// Reject any key that may not change after creation.
///
/// # Errors
///
/// Returns `RemoteError::InvalidRecord` naming the first read-only key.
pub fn check_mutable(collection: Collection, record: &Record) -> Result<(), RemoteError> {
    match record
        .keys()
        .find(|key| !collection.mutable_columns().contains(&key.as_str()))
    {
        Some(key) => Err(RemoteError::InvalidRecord(format!(
            "column '{key}' of {collection} cannot be updated"
        ))),
        None => Ok(()),
    }
}

/// Format a server timestamp. Fixed-width so that text ordering matches time
/// ordering.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Convert a JSON field into a libSQL parameter.
#[must_use]
pub fn json_to_sql(value: &Value) -> libsql::Value {
    match value {
        Value::Null => libsql::Value::Null,
        Value::Bool(b) => libsql::Value::Integer(i64::from(*b)),
        Value::Number(n) => n.as_i64().map_or_else(
            || libsql::Value::Real(n.as_f64().unwrap_or_default()),
            libsql::Value::Integer,
        ),
        Value::String(s) => libsql::Value::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => libsql::Value::Text(value.to_string()),
    }
}

/// Convert a libSQL column value into a JSON field.
///
/// # Errors
///
/// Returns `RemoteError::InvalidRecord` for BLOB columns and non-finite reals,
/// neither of which the schema produces.
pub fn sql_to_json(value: libsql::Value) -> Result<Value, RemoteError> {
    match value {
        libsql::Value::Null => Ok(Value::Null),
        libsql::Value::Integer(i) => Ok(Value::from(i)),
        libsql::Value::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| RemoteError::InvalidRecord(format!("non-finite real {f}"))),
        libsql::Value::Text(s) => Ok(Value::String(s)),
        libsql::Value::Blob(_) => Err(RemoteError::InvalidRecord(
            "unexpected BLOB column".into(),
        )),
    }
}

/// Read a row into a record, using `columns` as the key for each index.
///
/// # Errors
///
/// Returns `RemoteError` if a column cannot be read or converted.
pub fn row_to_record(row: &libsql::Row, columns: &[&str]) -> Result<Record, RemoteError> {
    let mut record = Record::new();
    for (idx, column) in (0_i32..).zip(columns) {
        record.insert((*column).to_string(), sql_to_json(row.get_value(idx)?)?);
    }
    Ok(record)
}

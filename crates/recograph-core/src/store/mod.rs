//! Graph data store collaborator
//!
//! The core consumes exactly one store operation: a synchronous, fallible
//! `query(statement, params) -> rows`. Failures (connectivity, busy/locked,
//! malformed statements) surface unchanged as [`RecoError::Store`]; nothing
//! here retries or masks them.

pub mod queries;
mod sqlite;

use std::sync::Arc;

use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};

use crate::error::{RecoError, Result};

pub use sqlite::SqliteStore;

/// A read-only source of rows for graph construction
pub trait GraphStore {
    /// Run one parameterised read. Parameter names carry their `:` prefix.
    fn query(&self, statement: &str, params: &[(&str, Value)]) -> Result<Vec<Row>>;
}

/// A scalar parameter or column value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Optional text, with `None` bound as SQL NULL
    pub fn opt_text(value: Option<&str>) -> Self {
        value.map_or(Value::Null, Value::text)
    }

    /// Encode a list of strings as a JSON array, read store-side with `json_each`
    pub fn list(items: &[String]) -> Self {
        Value::Text(serde_json::Value::from(items.to_vec()).to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(t) | ValueRef::Blob(t) => {
                Value::Text(String::from_utf8_lossy(t).into_owned())
            }
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Integer(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            Value::Real(r) => ToSqlOutput::Borrowed(ValueRef::Real(*r)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

/// One result row with named columns
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Raw access to a column; `None` if the statement did not return it
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    fn require(&self, column: &str) -> Result<&Value> {
        self.get(column)
            .ok_or_else(|| RecoError::invalid_value("column", column))
    }

    /// Text column; integer ids are rendered as text
    pub fn text(&self, column: &str) -> Result<String> {
        self.opt_text(column)?
            .ok_or_else(|| RecoError::invalid_value(&format!("{} (null)", column), "NULL"))
    }

    pub fn opt_text(&self, column: &str) -> Result<Option<String>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            Value::Integer(i) => Ok(Some(i.to_string())),
            other => Err(RecoError::invalid_value(column, format!("{:?}", other))),
        }
    }

    pub fn real(&self, column: &str) -> Result<f64> {
        self.opt_real(column)?
            .ok_or_else(|| RecoError::invalid_value(&format!("{} (null)", column), "NULL"))
    }

    pub fn opt_real(&self, column: &str) -> Result<Option<f64>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Real(r) => Ok(Some(*r)),
            Value::Integer(i) => Ok(Some(*i as f64)),
            other => Err(RecoError::invalid_value(column, format!("{:?}", other))),
        }
    }

    pub fn integer(&self, column: &str) -> Result<i64> {
        self.opt_integer(column)?
            .ok_or_else(|| RecoError::invalid_value(&format!("{} (null)", column), "NULL"))
    }

    pub fn opt_integer(&self, column: &str) -> Result<Option<i64>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Integer(i) => Ok(Some(*i)),
            Value::Real(r) if r.fract() == 0.0 => Ok(Some(*r as i64)),
            other => Err(RecoError::invalid_value(column, format!("{:?}", other))),
        }
    }
}

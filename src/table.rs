//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Humind.
//! The Humind project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Humind Table Module
//!
//! [`HmTable`] is the survey table every operator mutates: an ordered list of
//! column names and an ordered list of [`HmRecord`] rows. Operators only ever
//! add or replace whole columns; they never add, drop or reorder rows.
//!
//! Columns are addressed through [`HmTable::column`], which resolves a name to
//! an [`HmColumn`] handle carrying the inferred [`HmColumnKind`]. A missing
//! column is always reported as [`HmError::ColumnNotFound`].
//!
//! ```rust
//! use humind::table::{HmTable, HmColumnKind};
//! use serde_json::json;
//!
//! let table = HmTable::from_rows(vec![
//!     json!({"hh_size": 4, "region": "north"}),
//!     json!({"hh_size": null, "region": "south"}),
//! ])?;
//! assert_eq!(table.column("hh_size")?.kind(), HmColumnKind::Numeric);
//! assert_eq!(table.numeric_values(&table.column("hh_size")?), vec![Some(4.0), None]);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{HmError, Result};
use crate::record::{HmRecord, HmValues};

/// Kind of values held by a column, inferred from its non-missing cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HmColumnKind {
    Numeric,
    Text,
    Boolean,
    /// Every cell is missing.
    Empty,
    /// Non-missing cells of more than one kind, or nested values.
    Mixed,
}

impl HmColumnKind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Number(_) => HmColumnKind::Numeric,
            Value::String(_) => HmColumnKind::Text,
            Value::Bool(_) => HmColumnKind::Boolean,
            Value::Null => HmColumnKind::Empty,
            Value::Array(_) | Value::Object(_) => HmColumnKind::Mixed,
        }
    }

    /// True for numeric columns and for columns with no values at all.
    pub fn is_numeric(self) -> bool {
        matches!(self, HmColumnKind::Numeric | HmColumnKind::Empty)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HmColumnKind::Numeric => "numeric",
            HmColumnKind::Text => "text",
            HmColumnKind::Boolean => "boolean",
            HmColumnKind::Empty => "empty",
            HmColumnKind::Mixed => "mixed",
        }
    }
}

/// Resolved handle to a column of an [`HmTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HmColumn {
    name: String,
    kind: HmColumnKind,
}

impl HmColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> HmColumnKind {
        self.kind
    }
}

/// Rows × named columns survey table.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HmTable {
    columns: Vec<String>,
    rows: Vec<HmRecord>,
}

impl HmTable {
    /// Creates a table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from records; columns are ordered by first appearance.
    pub fn from_records(rows: Vec<HmRecord>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.values.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        HmTable { columns, rows }
    }

    /// Builds a table from JSON objects, one per row.
    pub fn from_rows(rows: Vec<Value>) -> Result<Self> {
        let records = rows
            .into_iter()
            .map(|row| HmRecord::from_value(None, row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_records(records))
    }

    /// Builds a table from named columns of equal length.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Value>)>) -> Result<Self> {
        let mut table = HmTable::new();
        let mut expected: Option<usize> = None;
        for (name, values) in columns {
            let name = name.into();
            match expected {
                None => {
                    expected = Some(values.len());
                    table.rows = (0..values.len()).map(|_| HmRecord::default()).collect();
                }
                Some(len) if len != values.len() => {
                    return Err(HmError::schema(format!(
                        "column '{name}' has {} values, expected {len}",
                        values.len()
                    )));
                }
                Some(_) => {}
            }
            table.set_column(name, values)?;
        }
        Ok(table)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn rows(&self) -> &[HmRecord] {
        &self.rows
    }

    /// Resolves `name` to a column handle with its inferred kind.
    pub fn column(&self, name: &str) -> Result<HmColumn> {
        if !self.has_column(name) {
            return Err(HmError::column_not_found(name));
        }

        let mut kind = HmColumnKind::Empty;
        for value in self.rows.iter().filter_map(|row| row.get(name)) {
            let cell = HmColumnKind::of(value);
            kind = match (kind, cell) {
                (HmColumnKind::Empty, cell) => cell,
                (current, cell) if current == cell => current,
                _ => HmColumnKind::Mixed,
            };
            if kind == HmColumnKind::Mixed {
                break;
            }
        }

        Ok(HmColumn {
            name: name.to_string(),
            kind,
        })
    }

    /// Cells of `column` in row order; `None` marks a missing cell.
    pub fn values<'a>(&'a self, column: &'a HmColumn) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.rows.iter().map(move |row| row.get(column.name()))
    }

    /// Numeric cells of `column` in row order; non-numeric cells read as missing.
    pub fn numeric_values(&self, column: &HmColumn) -> Vec<Option<f64>> {
        self.values(column)
            .map(|value| value.and_then(Value::as_f64))
            .collect()
    }

    /// Writes a whole column, appending it or replacing an existing one.
    ///
    /// Returns `true` when a column with the same name was replaced.
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<bool> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(HmError::internal(format!(
                "column '{name}' has {} values for {} rows",
                values.len(),
                self.rows.len()
            )));
        }

        let existed = self.has_column(&name);
        if !existed {
            self.columns.push(name.clone());
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.set(name.clone(), value);
        }
        Ok(existed)
    }

    /// Appends a row; new keys become new columns.
    pub fn push_row(&mut self, values: HmValues) {
        for key in values.keys() {
            if !self.has_column(key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(HmRecord::new(None, values));
    }
}

/// Converts a computed number to a cell, mapping non-finite values to missing.
pub fn number_cell(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Converts an optional number to a cell.
pub fn optional_number_cell(value: Option<f64>) -> Value {
    value.map(number_cell).unwrap_or(Value::Null)
}

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

//! # Humind Record Module
//!
//! A [`HmRecord`] is one survey respondent: an optional stable identifier and
//! the respondent's answers keyed by column name.
//!
//! ## Missing Values
//!
//! A cell is missing when its key is absent or its value is JSON `null`.
//! Operators never distinguish the two.
//!
//! ```rust
//! use humind::record::HmRecord;
//! use serde_json::json;
//!
//! let record = HmRecord::from_value(Some("hh-001".into()), json!({"fsl_fcs_cereal": 7}))?;
//! assert_eq!(record.get("fsl_fcs_cereal"), Some(&json!(7)));
//! assert_eq!(record.get("fsl_fcs_meat"), None);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{HmError, Result};

/// Answers of a single respondent keyed by column name.
pub type HmValues = Map<String, Value>;

/// One row of an [`crate::table::HmTable`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HmRecord {
    /// Optional stable identifier for the respondent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Cell values keyed by column name.
    #[serde(default)]
    pub values: HmValues,
}

impl HmRecord {
    /// Constructs a record from an identifier and a value map.
    pub fn new(id: impl Into<Option<String>>, values: HmValues) -> Self {
        HmRecord {
            id: id.into(),
            values,
        }
    }

    /// Constructs a record from a JSON object.
    pub fn from_value(id: impl Into<Option<String>>, value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(HmRecord::new(id, values)),
            other => Err(HmError::schema(format!(
                "record payload must be a JSON object, got {other}"
            ))),
        }
    }

    /// Returns the non-missing value stored under `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        match self.values.get(column) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    /// Stores `value` under `column`, replacing any previous value.
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }
}

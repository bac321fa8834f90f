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

//! # Humind Config Module
//!
//! Shared configuration pieces for operator factories: the destination
//! [`HmOverwritePolicy`] and [`HmConfigObject`], a thin reader over a JSON
//! config object that enforces argument types with uniform error messages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::{HmError, Result};

/// What an operator does when a destination column already exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HmOverwritePolicy {
    /// Replace the column and record an overwrite warning.
    #[default]
    Warn,
    /// Refuse to run.
    Error,
    /// Replace the column without a warning.
    Silent,
}

/// Typed accessor over an operator's JSON configuration object.
pub struct HmConfigObject<'a> {
    operator: &'static str,
    obj: &'a Map<String, Value>,
}

impl<'a> HmConfigObject<'a> {
    /// Wraps `config`; `null` reads as an empty object.
    pub fn parse(operator: &'static str, config: &'a Value) -> Result<Self> {
        static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
        let obj = match config {
            Value::Object(obj) => obj,
            Value::Null => EMPTY.get_or_init(Map::new),
            _ => {
                return Err(HmError::validation(format!(
                    "{operator} config must be object"
                )))
            }
        };
        Ok(Self { operator, obj })
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key)
    }

    /// Required string entry.
    pub fn string(&self, key: &str) -> Result<String> {
        self.optional_string(key)?.ok_or_else(|| {
            HmError::validation(format!("{} requires string '{key}'", self.operator))
        })
    }

    /// Optional string entry; an explicit `null` reads as absent.
    pub fn optional_string(&self, key: &str) -> Result<Option<String>> {
        match self.present(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(HmError::validation(format!(
                "{} '{key}' must be a string",
                self.operator
            ))),
        }
    }

    /// Boolean entry; absent reads as `default`, `null` is rejected.
    pub fn boolean(&self, key: &str, default: bool) -> Result<bool> {
        match self.present(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(HmError::validation(format!(
                "{} '{key}' must be a boolean and not null",
                self.operator
            ))),
        }
    }

    /// Optional number entry, kept as written; an explicit `null` reads as absent.
    pub fn optional_number(&self, key: &str) -> Result<Option<Number>> {
        match self.present(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(Some(n.clone())),
            Some(_) => Err(HmError::validation(format!(
                "{} '{key}' must be a number",
                self.operator
            ))),
        }
    }

    /// Optional array of strings.
    pub fn optional_strings(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.present(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| {
                    v.as_str().map(str::to_string).ok_or_else(|| {
                        HmError::validation(format!(
                            "{} '{key}' must be a list of strings",
                            self.operator
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(_) => Err(HmError::validation(format!(
                "{} '{key}' must be a list of strings",
                self.operator
            ))),
        }
    }

    /// Required array of numbers.
    pub fn numbers(&self, key: &str) -> Result<Vec<f64>> {
        let items = self
            .present(key)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                HmError::validation(format!(
                    "{} requires array '{key}' of numeric values",
                    self.operator
                ))
            })?;
        items
            .iter()
            .map(|v| {
                v.as_f64().ok_or_else(|| {
                    HmError::validation(format!(
                        "{} '{key}' must be a list of numeric values",
                        self.operator
                    ))
                })
            })
            .collect()
    }

    /// Optional array of integers.
    pub fn optional_integers(&self, key: &str) -> Result<Option<Vec<i64>>> {
        match self.present(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| {
                    v.as_i64().ok_or_else(|| {
                        HmError::validation(format!(
                            "{} '{key}' must be a list of integers",
                            self.operator
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(_) => Err(HmError::validation(format!(
                "{} '{key}' must be a list of integers",
                self.operator
            ))),
        }
    }

    /// Optional array of arbitrary values.
    pub fn optional_values(&self, key: &str) -> Result<Option<Vec<Value>>> {
        match self.present(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.clone())),
            Some(_) => Err(HmError::validation(format!(
                "{} '{key}' must be a list",
                self.operator
            ))),
        }
    }

    /// The `overwrite` entry, defaulting to [`HmOverwritePolicy::Warn`].
    pub fn overwrite(&self) -> Result<HmOverwritePolicy> {
        match self.present("overwrite") {
            None | Some(Value::Null) => Ok(HmOverwritePolicy::default()),
            Some(policy) => Ok(HmOverwritePolicy::deserialize(policy)?),
        }
    }
}

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

//! # Humind Validation Module
//!
//! Every operator gates its work through one [`HmPreconditions`] value: an
//! ordered list of [`HmRule`]s plus the destination columns it is about to
//! write. [`HmPreconditions::check`] runs before any mutation and either
//! fails with the first violated rule or returns the overwrite warnings the
//! operator should report.
//!
//! ```rust
//! use humind::validate::{HmPreconditions, HmRule};
//! use humind::config::HmOverwritePolicy;
//!
//! let warnings = HmPreconditions::new()
//!     .rule(HmRule::NonEmpty)
//!     .rule(HmRule::Numeric("hh_size"))
//!     .destinations(["hh_size_cat".to_string()], HmOverwritePolicy::Warn)
//!     .check(&table)?;
//! ```

use serde_json::Value;

use crate::config::HmOverwritePolicy;
use crate::errors::{HmError, Result};
use crate::report::HmWarning;
use crate::table::{HmColumnKind, HmTable};

/// A single precondition on a table or on operator parameters.
#[derive(Clone, Debug)]
pub enum HmRule<'a> {
    /// The table has at least one row.
    NonEmpty,
    /// The column exists and every non-missing cell is a number.
    Numeric(&'a str),
    /// The column exists and every non-missing cell is text.
    Text(&'a str),
    /// The column exists and every non-missing cell is an integer in `min..=max`.
    IntegerRange {
        column: &'a str,
        min: i64,
        max: i64,
    },
    /// At least two finite, strictly ascending values.
    Breakpoints(&'a [f64]),
    /// A named text parameter is exactly one character long.
    SingleChar { name: &'static str, value: &'a str },
}

impl HmRule<'_> {
    fn check(&self, table: &HmTable) -> Result<()> {
        match self {
            HmRule::NonEmpty => {
                if table.is_empty() {
                    return Err(HmError::EmptyTable);
                }
            }
            HmRule::Numeric(name) => {
                let column = table.column(name)?;
                if !column.kind().is_numeric() {
                    return Err(HmError::schema(format!(
                        "{name} must be numeric, found {} values",
                        column.kind().as_str()
                    )));
                }
            }
            HmRule::Text(name) => {
                let column = table.column(name)?;
                if column.kind() != HmColumnKind::Text {
                    return Err(HmError::schema(format!(
                        "{name} must be a text column, found {} values",
                        column.kind().as_str()
                    )));
                }
            }
            HmRule::IntegerRange { column, min, max } => {
                let handle = table.column(column)?;
                for (row, value) in table.values(&handle).enumerate() {
                    let Some(value) = value else { continue };
                    if !is_integer_in(value, *min, *max) {
                        return Err(HmError::domain(
                            *column,
                            format!(
                                "all values must be integers between {min} and {max} or missing, found {value} at row {row}"
                            ),
                        ));
                    }
                }
            }
            HmRule::Breakpoints(breaks) => check_breakpoints(breaks)?,
            HmRule::SingleChar { name, value } => check_single_char(name, value)?,
        }
        Ok(())
    }
}

fn is_integer_in(value: &Value, min: i64, max: i64) -> bool {
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => (min..=max).contains(&i),
            (None, Some(f)) => f.fract() == 0.0 && f >= min as f64 && f <= max as f64,
            _ => false,
        },
        _ => false,
    }
}

/// Rejects text parameters that are not exactly one character.
pub fn check_single_char(name: &str, value: &str) -> Result<()> {
    if value.chars().count() != 1 {
        return Err(HmError::validation(format!(
            "{name} must be exactly one character, got '{value}'"
        )));
    }
    Ok(())
}

fn check_breakpoints(breaks: &[f64]) -> Result<()> {
    if breaks.len() < 2 {
        return Err(HmError::validation("breaks must have at least two values"));
    }
    if breaks.iter().any(|b| !b.is_finite()) {
        return Err(HmError::validation("breaks must be finite numeric values"));
    }
    if breaks.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(HmError::validation("breaks must be strictly ascending"));
    }
    Ok(())
}

/// Ordered rule set plus destination columns, checked before any mutation.
#[derive(Clone, Debug, Default)]
pub struct HmPreconditions<'a> {
    rules: Vec<HmRule<'a>>,
    destinations: Vec<String>,
    policy: HmOverwritePolicy,
}

impl<'a> HmPreconditions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: HmRule<'a>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = HmRule<'a>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Declares the columns the operator will write and how to treat existing ones.
    pub fn destinations(
        mut self,
        columns: impl IntoIterator<Item = String>,
        policy: HmOverwritePolicy,
    ) -> Self {
        self.destinations.extend(columns);
        self.policy = policy;
        self
    }

    /// Runs every rule in order, then resolves destination collisions.
    pub fn check(&self, table: &HmTable) -> Result<Vec<HmWarning>> {
        for rule in &self.rules {
            rule.check(table)?;
        }

        let mut warnings = Vec::new();
        for column in &self.destinations {
            if !table.has_column(column) {
                continue;
            }
            match self.policy {
                HmOverwritePolicy::Warn => warnings.push(HmWarning::Overwrite {
                    column: column.clone(),
                }),
                HmOverwritePolicy::Error => {
                    return Err(HmError::Overwrite {
                        column: column.clone(),
                    })
                }
                HmOverwritePolicy::Silent => {}
            }
        }
        Ok(warnings)
    }
}

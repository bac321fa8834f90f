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

//! # Numeric Categorization
//!
//! [`HmNumCat`] bins one numeric column into ordered categories.
//!
//! Bins are `[edge_i, edge_i+1)` with the last finite bin also closed on the
//! right. With `above_last` an extra bin `[last edge, +inf)` is appended.
//! Rows holding one of the integer sentinels get the one-character
//! `char_undefined` label, or `Unknown` when none is given;
//! rows below the first edge, above the last one, or missing stay missing.
//!
//! Generated labels assume integer-spaced data: `0-4` for `[0, 5)`. The last
//! bin reads `5+` with `plus_last`, otherwise `5-<largest observed value>`.

use serde_json::Value;

use crate::config::{HmConfigObject, HmOverwritePolicy};
use crate::errors::{HmError, Result};
use crate::operator::HmOperator;
use crate::report::{HmReport, HmWarning};
use crate::table::HmTable;
use crate::validate::{check_single_char, HmPreconditions, HmRule};

pub const DEFAULT_INT_UNDEFINED: [i64; 2] = [-999, 999];
pub const DEFAULT_CHAR_UNDEFINED: &str = "Unknown";

/// Renders a bin edge, dropping the fraction of integral values.
pub fn format_edge(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Generates one label per bin delimited by consecutive `edges`.
pub fn range_labels(edges: &[f64], plus_last: bool, max_observed: Option<f64>) -> Vec<String> {
    let bins = edges.len().saturating_sub(1);
    (0..bins)
        .map(|i| {
            let lower = format_edge(edges[i]);
            if i + 1 < bins {
                format!("{lower}-{}", format_edge(edges[i + 1] - 1.0))
            } else {
                match (plus_last, max_observed) {
                    (false, Some(max)) => format!("{lower}-{}", format_edge(max)),
                    _ => format!("{lower}+"),
                }
            }
        })
        .collect()
}

pub fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
    let last = edges.len().checked_sub(1)?;
    if last == 0 || value < edges[0] || value > edges[last] {
        return None;
    }
    if value == edges[last] {
        return edges[last].is_finite().then(|| last - 1);
    }
    edges.windows(2).position(|pair| value >= pair[0] && value < pair[1])
}

/// Adds a categorical column derived from a numeric one.
#[derive(Clone, Debug)]
pub struct HmNumCat {
    column: String,
    breaks: Vec<f64>,
    labels: Option<Vec<String>>,
    int_undefined: Vec<i64>,
    char_undefined: Option<String>,
    new_column: Option<String>,
    plus_last: bool,
    above_last: bool,
    overwrite: HmOverwritePolicy,
}

impl HmNumCat {
    pub fn new(column: impl Into<String>, breaks: Vec<f64>) -> Self {
        Self {
            column: column.into(),
            breaks,
            labels: None,
            int_undefined: DEFAULT_INT_UNDEFINED.to_vec(),
            char_undefined: None,
            new_column: None,
            plus_last: false,
            above_last: false,
            overwrite: HmOverwritePolicy::default(),
        }
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn int_undefined(mut self, sentinels: Vec<i64>) -> Self {
        self.int_undefined = sentinels;
        self
    }

    pub fn char_undefined(mut self, label: impl Into<String>) -> Self {
        self.char_undefined = Some(label.into());
        self
    }

    pub fn new_column(mut self, name: impl Into<String>) -> Self {
        self.new_column = Some(name.into());
        self
    }

    pub fn plus_last(mut self, enabled: bool) -> Self {
        self.plus_last = enabled;
        self
    }

    pub fn above_last(mut self, enabled: bool) -> Self {
        self.above_last = enabled;
        self
    }

    pub fn overwrite(mut self, policy: HmOverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    pub fn output_column(&self) -> String {
        self.new_column
            .clone()
            .unwrap_or_else(|| format!("{}_cat", self.column))
    }

    /// Number of labels expected under the current `above_last` setting.
    pub fn expected_labels(&self) -> usize {
        self.breaks.len().saturating_sub(1) + usize::from(self.above_last)
    }

    pub fn undefined_label(&self) -> &str {
        self.char_undefined
            .as_deref()
            .unwrap_or(DEFAULT_CHAR_UNDEFINED)
    }

    fn is_sentinel(&self, value: f64) -> bool {
        self.int_undefined.iter().any(|s| *s as f64 == value)
    }

    fn edges(&self) -> Vec<f64> {
        let mut edges = self.breaks.clone();
        if self.above_last {
            edges.push(f64::INFINITY);
        }
        edges
    }
}

impl HmOperator for HmNumCat {
    fn name(&self) -> &'static str {
        "indicator.num_cat"
    }

    fn apply(&self, table: &mut HmTable) -> Result<HmReport> {
        let output = self.output_column();
        let warnings = HmPreconditions::new()
            .rule(HmRule::Numeric(&self.column))
            .rules(
                self.char_undefined
                    .as_deref()
                    .map(|value| HmRule::SingleChar {
                        name: "char_undefined",
                        value,
                    }),
            )
            .rule(HmRule::Breakpoints(&self.breaks))
            .destinations([output.clone()], self.overwrite)
            .check(table)?;

        let mut report = HmReport::new(self.name(), table.len());
        for warning in warnings {
            report.warn(warning);
        }

        let column = table.column(&self.column)?;
        let values = table.numeric_values(&column);
        let max_observed = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| !self.is_sentinel(*v))
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

        let edges = self.edges();
        let labels = match &self.labels {
            Some(labels) if labels.len() == self.expected_labels() => labels.clone(),
            Some(labels) => {
                report.warn(HmWarning::LabelCountMismatch {
                    expected: self.expected_labels(),
                    found: labels.len(),
                });
                range_labels(&edges, self.plus_last, max_observed)
            }
            None => range_labels(&edges, self.plus_last, max_observed),
        };

        let cells = values
            .into_iter()
            .map(|value| match value {
                None => Value::Null,
                Some(v) if self.is_sentinel(v) => Value::String(self.undefined_label().to_string()),
                Some(v) => bin_index(&edges, v)
                    .and_then(|i| labels.get(i))
                    .map(|label| Value::String(label.clone()))
                    .unwrap_or(Value::Null),
            })
            .collect();

        table.set_column(output.clone(), cells)?;
        report.wrote(output);
        Ok(report)
    }
}

/// Factory that constructs [`HmNumCat`] from JSON configuration.
pub fn num_cat_factory(config: &Value) -> Result<Box<dyn HmOperator + Send + Sync>> {
    let obj = HmConfigObject::parse("indicator.num_cat", config)?;

    let column = obj.string("num_col")?;
    let breaks = obj.numbers("breaks")?;
    let mut operator = HmNumCat::new(column, breaks)
        .plus_last(obj.boolean("plus_last", false)?)
        .above_last(obj.boolean("above_last", false)?)
        .overwrite(obj.overwrite()?);

    if let Some(labels) = obj.optional_strings("labels")? {
        operator = operator.labels(labels);
    }
    if let Some(sentinels) = obj.optional_integers("int_undefined")? {
        operator = operator.int_undefined(sentinels);
    }
    if let Some(label) = obj.optional_string("char_undefined")? {
        check_single_char("char_undefined", &label)?;
        operator = operator.char_undefined(label);
    }
    if let Some(name) = obj.optional_string("new_colname")? {
        if name.is_empty() {
            return Err(HmError::validation("new_colname must not be empty"));
        }
        operator = operator.new_column(name);
    }

    Ok(Box::new(operator))
}

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

//! # Skip Logic Fill
//!
//! Survey questions skipped by design leave missing answers that really mean
//! a known value. [`HmSkipLogicFill`] writes `target + suffix` for each target
//! column: missing cells become the fill value unless the governing column's
//! value is in the undefined set, in which case they stay missing.

use serde_json::{Number, Value};

use crate::config::{HmConfigObject, HmOverwritePolicy};
use crate::errors::Result;
use crate::operator::HmOperator;
use crate::report::HmReport;
use crate::table::HmTable;
use crate::validate::{HmPreconditions, HmRule};

/// Fills missing values of target columns based on a governing column.
#[derive(Clone, Debug)]
pub struct HmSkipLogicFill {
    var: String,
    undefined: Vec<Value>,
    sl_vars: Vec<String>,
    sl_value: Option<Number>,
    suffix: String,
    overwrite: HmOverwritePolicy,
}

impl HmSkipLogicFill {
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            undefined: Vec::new(),
            sl_vars: Vec::new(),
            sl_value: None,
            suffix: String::new(),
            overwrite: HmOverwritePolicy::default(),
        }
    }

    /// Governing values for which missing targets are left alone.
    pub fn undefined(mut self, values: Vec<Value>) -> Self {
        self.undefined = values;
        self
    }

    pub fn targets(mut self, columns: Vec<String>) -> Self {
        self.sl_vars = columns;
        self
    }

    pub fn value(mut self, value: Number) -> Self {
        self.sl_value = Some(value);
        self
    }

    /// Suffix appended to each target name; empty updates targets in place.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn overwrite(mut self, policy: HmOverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    fn output_column(&self, target: &str) -> String {
        format!("{target}{}", self.suffix)
    }

    fn is_undefined(&self, governing: Option<&Value>) -> bool {
        let governing = governing.unwrap_or(&Value::Null);
        self.undefined.iter().any(|u| u == governing)
    }
}

impl HmOperator for HmSkipLogicFill {
    fn name(&self) -> &'static str {
        "indicator.skip_logic"
    }

    fn apply(&self, table: &mut HmTable) -> Result<HmReport> {
        // An empty suffix rewrites the targets themselves, which is not a collision.
        let destinations: Vec<String> = if self.suffix.is_empty() {
            Vec::new()
        } else {
            self.sl_vars.iter().map(|t| self.output_column(t)).collect()
        };

        let warnings = HmPreconditions::new()
            .rule(HmRule::Text(&self.var))
            .rules(self.sl_vars.iter().map(|t| HmRule::Numeric(t.as_str())))
            .destinations(destinations, self.overwrite)
            .check(table)?;

        let mut report = HmReport::new(self.name(), table.len());
        let Some(fill) = &self.sl_value else {
            log::debug!("[{}] no fill value, table unchanged", self.name());
            return Ok(report);
        };
        if self.sl_vars.is_empty() {
            log::debug!("[{}] no target columns, table unchanged", self.name());
            return Ok(report);
        }
        for warning in warnings {
            report.warn(warning);
        }

        let governing = table.column(&self.var)?;
        let exempt: Vec<bool> = table
            .values(&governing)
            .map(|value| self.is_undefined(value))
            .collect();

        let mut outputs = Vec::with_capacity(self.sl_vars.len());
        for target in &self.sl_vars {
            let column = table.column(target)?;
            let cells: Vec<Value> = table
                .values(&column)
                .zip(&exempt)
                .map(|(value, exempt)| match value {
                    None if !exempt => Value::Number(fill.clone()),
                    None => Value::Null,
                    Some(value) => value.clone(),
                })
                .collect();
            outputs.push((self.output_column(target), cells));
        }

        for (name, cells) in outputs {
            table.set_column(name.clone(), cells)?;
            report.wrote(name);
        }
        Ok(report)
    }
}

/// Factory that constructs [`HmSkipLogicFill`] from JSON configuration.
pub fn skip_logic_factory(config: &Value) -> Result<Box<dyn HmOperator + Send + Sync>> {
    let obj = HmConfigObject::parse("indicator.skip_logic", config)?;

    let mut operator = HmSkipLogicFill::new(obj.string("var")?)
        .undefined(obj.optional_values("undefined")?.unwrap_or_default())
        .targets(obj.optional_strings("sl_vars")?.unwrap_or_default())
        .suffix(obj.optional_string("suffix")?.unwrap_or_default())
        .overwrite(obj.overwrite()?);
    if let Some(value) = obj.optional_number("sl_value")? {
        operator = operator.value(value);
    }

    Ok(Box::new(operator))
}

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

//! # Humind Pipeline Module
//!
//! Composes indicator operators into an ordered sequence built from JSON steps
//! of the form `{"operator": "<name>", "config": {...}}`.
//!
//! Each stage is atomic on its own: a failing stage leaves the table as the
//! previous stages left it, and the run stops there.

use std::collections::HashMap;

use serde_json::Value;

use crate::errors::{HmError, Result};
use crate::operator::{execute_operator, HmOperator};
use crate::report::HmReport;
use crate::table::HmTable;

type OperatorFactory = fn(&Value) -> Result<Box<dyn HmOperator + Send + Sync>>;

/// Linear pipeline of operators applied to one table.
pub struct HmPipeline {
    stages: Vec<Box<dyn HmOperator + Send + Sync>>,
}

impl HmPipeline {
    /// Constructs a pipeline from a list of operators.
    pub fn new(stages: Vec<Box<dyn HmOperator + Send + Sync>>) -> Self {
        HmPipeline { stages }
    }

    /// Names of the stages in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Applies every stage in order and collects their reports.
    pub fn run(&self, table: &mut HmTable) -> Result<Vec<HmReport>> {
        let mut reports = Vec::with_capacity(self.stages.len());
        for (index, stage) in self.stages.iter().enumerate() {
            log::info!("pipeline stage #{index}: {}", stage.name());
            reports.push(execute_operator(stage.as_ref(), table)?);
        }
        Ok(reports)
    }

    /// Ensures the pipeline contains at least one stage.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(HmError::pipeline("pipeline", "no stages configured"));
        }
        Ok(())
    }
}

/// Builder that knows how to instantiate operators from configuration.
pub struct HmPipelineBuilder {
    factories: HashMap<String, OperatorFactory>,
}

impl Default for HmPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HmPipelineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        HmPipelineBuilder {
            factories: HashMap::new(),
        }
    }

    /// Creates a builder pre-loaded with the bundled indicator operators.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        builder.register_defaults();
        builder
    }

    /// Registers a factory for the given operator name.
    pub fn register(&mut self, name: impl Into<String>, factory: OperatorFactory) {
        self.factories.insert(name.into(), factory);
    }

    fn register_defaults(&mut self) {
        self.register(
            "indicator.fcs",
            crate::operators::fcs::fcs_score_factory as OperatorFactory,
        );
        self.register(
            "indicator.num_cat",
            crate::operators::num_cat::num_cat_factory as OperatorFactory,
        );
        self.register(
            "indicator.skip_logic",
            crate::operators::skip_logic::skip_logic_factory as OperatorFactory,
        );
    }

    /// Builds a pipeline from a sequence of configuration steps.
    pub fn build_from_config(&self, steps: &[Value]) -> Result<HmPipeline> {
        let mut stages = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let object = step.as_object().ok_or_else(|| {
                HmError::validation(format!("pipeline step #{index} must be an object"))
            })?;

            let operator_name =
                object
                    .get("operator")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        HmError::validation(format!(
                            "pipeline step #{index} missing string 'operator'"
                        ))
                    })?;

            let factory = self.factories.get(operator_name).ok_or_else(|| {
                HmError::validation(format!("unknown operator '{operator_name}'"))
            })?;

            let config_value = object.get("config").cloned().unwrap_or(Value::Null);
            let operator =
                factory(&config_value).map_err(|err| HmError::operator(operator_name, err))?;
            stages.push(operator);
        }

        let pipeline = HmPipeline::new(stages);
        pipeline.validate()?;
        Ok(pipeline)
    }
}

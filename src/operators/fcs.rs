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

//! # Food Consumption Score
//!
//! [`HmFcsScore`] derives the food consumption score (FCS) from eight
//! food-group columns holding the number of days (0 to 7) each group was
//! eaten over the last week.
//!
//! | group   | weight | weight column             |
//! |---------|--------|---------------------------|
//! | cereal  | 2      | `fsl_fcs_weight_cereal`   |
//! | legumes | 3      | `fsl_fcs_weight_legume`   |
//! | dairy   | 4      | `fsl_fcs_weight_dairy`    |
//! | meat    | 4      | `fsl_fcs_weight_meat`     |
//! | veg     | 1      | `fsl_fcs_weight_veg`      |
//! | fruit   | 1      | `fsl_fcs_weight_fruit`    |
//! | oil     | 0.5    | `fsl_fcs_weight_oil`      |
//! | sugar   | 0.5    | `fsl_fcs_weight_sugar`    |
//!
//! The score is the sum of the weights present in a row; missing weights are
//! skipped and the score is missing only when all eight are. The category
//! follows one of two cutoff schemes:
//!
//! | scheme      | Poor         | Borderline          | Acceptable   |
//! |-------------|--------------|---------------------|--------------|
//! | normal      | score < 21.5 | 21.5 <= score <= 35 | score > 35   |
//! | alternative | score <= 28  | 28 < score <= 42    | score > 42   |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{HmConfigObject, HmOverwritePolicy};
use crate::errors::{HmError, Result};
use crate::operator::HmOperator;
use crate::report::HmReport;
use crate::table::{optional_number_cell, HmTable};
use crate::validate::{HmPreconditions, HmRule};

/// One of the eight FCS food groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HmFoodGroup {
    Cereal,
    Legumes,
    Dairy,
    Meat,
    Veg,
    Fruit,
    Oil,
    Sugar,
}

pub const FOOD_GROUPS: [HmFoodGroup; 8] = [
    HmFoodGroup::Cereal,
    HmFoodGroup::Legumes,
    HmFoodGroup::Dairy,
    HmFoodGroup::Meat,
    HmFoodGroup::Veg,
    HmFoodGroup::Fruit,
    HmFoodGroup::Oil,
    HmFoodGroup::Sugar,
];

impl HmFoodGroup {
    pub fn weight(self) -> f64 {
        match self {
            HmFoodGroup::Cereal => 2.0,
            HmFoodGroup::Legumes => 3.0,
            HmFoodGroup::Dairy | HmFoodGroup::Meat => 4.0,
            HmFoodGroup::Veg | HmFoodGroup::Fruit => 1.0,
            HmFoodGroup::Oil | HmFoodGroup::Sugar => 0.5,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            HmFoodGroup::Cereal => "cereal",
            HmFoodGroup::Legumes => "legumes",
            HmFoodGroup::Dairy => "dairy",
            HmFoodGroup::Meat => "meat",
            HmFoodGroup::Veg => "veg",
            HmFoodGroup::Fruit => "fruit",
            HmFoodGroup::Oil => "oil",
            HmFoodGroup::Sugar => "sugar",
        }
    }

    pub fn default_column(self) -> String {
        format!("fsl_fcs_{}", self.key())
    }

    pub fn weight_column(self) -> &'static str {
        match self {
            HmFoodGroup::Cereal => "fsl_fcs_weight_cereal",
            HmFoodGroup::Legumes => "fsl_fcs_weight_legume",
            HmFoodGroup::Dairy => "fsl_fcs_weight_dairy",
            HmFoodGroup::Meat => "fsl_fcs_weight_meat",
            HmFoodGroup::Veg => "fsl_fcs_weight_veg",
            HmFoodGroup::Fruit => "fsl_fcs_weight_fruit",
            HmFoodGroup::Oil => "fsl_fcs_weight_oil",
            HmFoodGroup::Sugar => "fsl_fcs_weight_sugar",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// FCS category, ordered from worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HmFcsCategory {
    Poor,
    Borderline,
    Acceptable,
}

impl HmFcsCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            HmFcsCategory::Poor => "Poor",
            HmFcsCategory::Borderline => "Borderline",
            HmFcsCategory::Acceptable => "Acceptable",
        }
    }
}

impl fmt::Display for HmFcsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold scheme mapping a score to an [`HmFcsCategory`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HmFcsCutoffs {
    #[default]
    Normal,
    Alternative,
}

impl FromStr for HmFcsCutoffs {
    type Err = HmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(HmFcsCutoffs::Normal),
            "alternative" => Ok(HmFcsCutoffs::Alternative),
            other => Err(HmError::validation(format!(
                "cutoffs must be either 'normal' or 'alternative', got '{other}'"
            ))),
        }
    }
}

impl HmFcsCutoffs {
    pub fn as_str(self) -> &'static str {
        match self {
            HmFcsCutoffs::Normal => "normal",
            HmFcsCutoffs::Alternative => "alternative",
        }
    }

    /// Categorizes a score; a score matching no threshold has no category.
    pub fn categorize(self, score: f64) -> Option<HmFcsCategory> {
        let (poor, borderline, acceptable) = match self {
            HmFcsCutoffs::Normal => (score < 21.5, (21.5..=35.0).contains(&score), score > 35.0),
            HmFcsCutoffs::Alternative => (score <= 28.0, score > 28.0 && score <= 42.0, score > 42.0),
        };
        if poor {
            Some(HmFcsCategory::Poor)
        } else if borderline {
            Some(HmFcsCategory::Borderline)
        } else if acceptable {
            Some(HmFcsCategory::Acceptable)
        } else {
            None
        }
    }
}

/// Sums the weights present in a row; `None` when every weight is missing.
pub fn fcs_row_score(weights: &[Option<f64>]) -> Option<f64> {
    weights
        .iter()
        .flatten()
        .fold(None, |acc, w| Some(acc.unwrap_or(0.0) + w))
}

/// Adds the FCS weight, score and category columns to a table.
#[derive(Clone, Debug)]
pub struct HmFcsScore {
    columns: [String; 8],
    cutoffs: HmFcsCutoffs,
    score_column: String,
    category_column: String,
    overwrite: HmOverwritePolicy,
}

impl Default for HmFcsScore {
    fn default() -> Self {
        Self {
            columns: FOOD_GROUPS.map(HmFoodGroup::default_column),
            cutoffs: HmFcsCutoffs::default(),
            score_column: "fsl_fcs_score".to_string(),
            category_column: "fsl_fcs_cat".to_string(),
            overwrite: HmOverwritePolicy::default(),
        }
    }
}

impl HmFcsScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoffs(mut self, cutoffs: HmFcsCutoffs) -> Self {
        self.cutoffs = cutoffs;
        self
    }

    /// Reads `group` from `column` instead of its conventional name.
    pub fn column(mut self, group: HmFoodGroup, column: impl Into<String>) -> Self {
        self.columns[group.index()] = column.into();
        self
    }

    pub fn score_column(mut self, name: impl Into<String>) -> Self {
        self.score_column = name.into();
        self
    }

    pub fn category_column(mut self, name: impl Into<String>) -> Self {
        self.category_column = name.into();
        self
    }

    pub fn overwrite(mut self, policy: HmOverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    pub fn source_column(&self, group: HmFoodGroup) -> &str {
        &self.columns[group.index()]
    }

    fn destinations(&self) -> Vec<String> {
        FOOD_GROUPS
            .iter()
            .map(|g| g.weight_column().to_string())
            .chain([self.score_column.clone(), self.category_column.clone()])
            .collect()
    }
}

impl HmOperator for HmFcsScore {
    fn name(&self) -> &'static str {
        "indicator.fcs"
    }

    fn apply(&self, table: &mut HmTable) -> Result<HmReport> {
        let warnings = HmPreconditions::new()
            .rule(HmRule::NonEmpty)
            .rules(self.columns.iter().map(|column| HmRule::IntegerRange {
                column: column.as_str(),
                min: 0,
                max: 7,
            }))
            .destinations(self.destinations(), self.overwrite)
            .check(table)?;

        let mut weights: Vec<Vec<Option<f64>>> = Vec::with_capacity(FOOD_GROUPS.len());
        for group in FOOD_GROUPS {
            let column = table.column(self.source_column(group))?;
            weights.push(
                table
                    .numeric_values(&column)
                    .into_iter()
                    .map(|days| days.map(|d| d * group.weight()))
                    .collect(),
            );
        }

        let scores: Vec<Option<f64>> = (0..table.len())
            .map(|row| {
                let row_weights: Vec<Option<f64>> = weights.iter().map(|w| w[row]).collect();
                fcs_row_score(&row_weights)
            })
            .collect();

        let categories: Vec<Value> = scores
            .iter()
            .map(|score| {
                score
                    .and_then(|s| self.cutoffs.categorize(s))
                    .map(|c| Value::String(c.as_str().to_string()))
                    .unwrap_or(Value::Null)
            })
            .collect();

        let mut report = HmReport::new(self.name(), table.len());
        for warning in warnings {
            report.warn(warning);
        }

        for (group, column) in FOOD_GROUPS.iter().zip(weights) {
            let cells = column.into_iter().map(optional_number_cell).collect();
            table.set_column(group.weight_column(), cells)?;
            report.wrote(group.weight_column());
        }
        table.set_column(
            self.score_column.clone(),
            scores.into_iter().map(optional_number_cell).collect(),
        )?;
        report.wrote(self.score_column.clone());
        table.set_column(self.category_column.clone(), categories)?;
        report.wrote(self.category_column.clone());

        Ok(report)
    }
}

/// Factory that constructs [`HmFcsScore`] from JSON configuration.
///
/// Recognized keys: `cutoffs`, one key per food group (`cereal`, `legumes`,
/// `dairy`, `meat`, `veg`, `fruit`, `oil`, `sugar`) naming its column,
/// `score_column`, `category_column` and `overwrite`.
pub fn fcs_score_factory(config: &Value) -> Result<Box<dyn HmOperator + Send + Sync>> {
    let obj = HmConfigObject::parse("indicator.fcs", config)?;

    let mut operator = HmFcsScore::new().overwrite(obj.overwrite()?);
    if let Some(cutoffs) = obj.optional_string("cutoffs")? {
        operator = operator.cutoffs(cutoffs.parse()?);
    }
    for group in FOOD_GROUPS {
        if let Some(column) = obj.optional_string(group.key())? {
            operator = operator.column(group, column);
        }
    }
    if let Some(name) = obj.optional_string("score_column")? {
        operator = operator.score_column(name);
    }
    if let Some(name) = obj.optional_string("category_column")? {
        operator = operator.category_column(name);
    }

    Ok(Box::new(operator))
}

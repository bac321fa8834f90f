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

//! # Humind Report Module
//!
//! Every successful operator call returns an [`HmReport`]: which columns were
//! written and which recoverable conditions were met on the way. Warnings are
//! also emitted through `log::warn!` when they are recorded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Recoverable condition met by an operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HmWarning {
    /// A destination column already existed and was replaced.
    Overwrite { column: String },
    /// Caller labels did not match the bin count and were regenerated.
    LabelCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for HmWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HmWarning::Overwrite { column } => write!(f, "{column} will be overwritten"),
            HmWarning::LabelCountMismatch { expected, found } => write!(
                f,
                "labels must be of length {expected}, got {found}; reverting to generated labels"
            ),
        }
    }
}

/// Outcome of a successful operator call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HmReport {
    pub operator: String,
    pub rows: usize,
    pub columns_written: Vec<String>,
    pub warnings: Vec<HmWarning>,
}

impl HmReport {
    pub fn new(operator: impl Into<String>, rows: usize) -> Self {
        HmReport {
            operator: operator.into(),
            rows,
            ..Default::default()
        }
    }

    /// Records a warning and logs it under the operator name.
    pub fn warn(&mut self, warning: HmWarning) {
        log::warn!("[{}] {}", self.operator, warning);
        self.warnings.push(warning);
    }

    pub fn wrote(&mut self, column: impl Into<String>) {
        self.columns_written.push(column.into());
    }

    /// True when the call completed without any warning.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Columns reported as overwritten.
    pub fn overwritten(&self) -> Vec<&str> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                HmWarning::Overwrite { column } => Some(column.as_str()),
                _ => None,
            })
            .collect()
    }
}

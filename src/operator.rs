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

//! # Humind Operator Module
//!
//! This module defines the operator trait shared by every indicator.
//!
//! ## Operator Design
//!
//! An operator borrows the caller's [`HmTable`] mutably for the duration of one
//! call and never keeps it. A call either:
//!
//! - fails before touching the table, returning an [`crate::errors::HmError`], or
//! - writes all of its columns and returns an [`HmReport`].
//!
//! ## Implementing Custom Operators
//!
//! ```rust
//! use humind::operator::HmOperator;
//! use humind::report::HmReport;
//! use humind::table::HmTable;
//! use humind::errors::Result;
//!
//! #[derive(Debug)]
//! struct RowCount;
//!
//! impl HmOperator for RowCount {
//!     fn name(&self) -> &'static str {
//!         "indicator.row_count"
//!     }
//!
//!     fn apply(&self, table: &mut HmTable) -> Result<HmReport> {
//!         let n = table.len();
//!         table.set_column("row_count", vec![serde_json::json!(n); n])?;
//!         let mut report = HmReport::new(self.name(), n);
//!         report.wrote("row_count");
//!         Ok(report)
//!     }
//! }
//! ```

use crate::errors::{HmError, Result};
use crate::report::HmReport;
use crate::table::HmTable;

/// Contract every Humind operator fulfills.
pub trait HmOperator: std::fmt::Debug {
    /// Unique name used in logs, errors and the pipeline registry.
    fn name(&self) -> &'static str;

    /// Validates the table, then adds or replaces the operator's columns.
    fn apply(&self, table: &mut HmTable) -> Result<HmReport>;
}

/// Executes an operator, tagging any error with the operator name.
pub fn execute_operator(operator: &dyn HmOperator, table: &mut HmTable) -> Result<HmReport> {
    log::debug!("[{}] applying to {} rows", operator.name(), table.len());
    let report = operator
        .apply(table)
        .map_err(|err| HmError::operator(operator.name(), err))?;
    log::debug!(
        "[{}] wrote {} columns with {} warnings",
        operator.name(),
        report.columns_written.len(),
        report.warnings.len()
    );
    Ok(report)
}

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

//! # Humind Core Library
//!
//! Humind derives standardized food-security indicators from household
//! survey tables. Every indicator is an operator that validates its inputs,
//! then adds derived columns to the caller's table in place.
//!
//! ## Module Overview
//!
//! - **table**: HmTable, typed column handles and column writes
//! - **record**: HmRecord, one respondent's answers
//! - **validate**: rule-based preconditions shared by all operators
//! - **operator**: the HmOperator trait and execution helper
//! - **operators**: food consumption score, numeric categorization, skip logic fill
//! - **pipeline**: building operator sequences from JSON configuration
//! - **config**: overwrite policy and factory argument parsing
//! - **report**: per-call reports and recoverable warnings
//!
//! ## Quick Start
//!
//! ```rust
//! use humind::{HmTable, HmOperator};
//! use humind::operators::fcs::{HmFcsScore, HmFcsCutoffs};
//! use serde_json::json;
//!
//! let mut table = HmTable::from_rows(vec![json!({
//!     "fsl_fcs_cereal": 7, "fsl_fcs_legumes": 7, "fsl_fcs_dairy": 7, "fsl_fcs_meat": 7,
//!     "fsl_fcs_veg": 7, "fsl_fcs_fruit": 7, "fsl_fcs_oil": 7, "fsl_fcs_sugar": 7,
//! })])?;
//!
//! let report = HmFcsScore::new().cutoffs(HmFcsCutoffs::Alternative).apply(&mut table)?;
//! assert!(report.is_clean());
//! assert_eq!(table.rows()[0].get("fsl_fcs_cat"), Some(&json!("Acceptable")));
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, HmError>`. Operators detect every fatal
//! condition before writing, so an error leaves the table untouched.
//! Recoverable conditions come back as warnings in the [`HmReport`].

pub mod config;
pub mod errors;
pub mod operator;
pub mod operators;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod table;
pub mod validate;

pub use config::HmOverwritePolicy;
pub use errors::{HmError, Result};
pub use operator::{execute_operator, HmOperator};
pub use pipeline::{HmPipeline, HmPipelineBuilder};
pub use record::{HmRecord, HmValues};
pub use report::{HmReport, HmWarning};
pub use table::{HmColumn, HmColumnKind, HmTable};

pub use operators::fcs::{HmFcsCategory, HmFcsCutoffs, HmFcsScore, HmFoodGroup};
pub use operators::num_cat::HmNumCat;
pub use operators::skip_logic::HmSkipLogicFill;

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

//! # Humind Error Module
//!
//! This module defines the error types used by every Humind operator.
//!
//! ## Two Tiers
//!
//! - **Fatal**: returned as [`HmError`]. Operators detect every fatal condition
//!   before the first column is written, so a failed call leaves the table
//!   exactly as it was.
//! - **Recoverable**: existing destination columns and mismatched label lists
//!   are not errors. They are reported as [`crate::report::HmWarning`] values
//!   and logged through the `log` facade.
//!
//! ## Error Categories
//!
//! - **Validation**: invalid parameters (types, literals, breakpoints)
//! - **Schema**: a column exists but holds the wrong kind of values
//! - **ColumnNotFound**: a named column is absent from the table
//! - **Domain**: cell values outside the allowed domain
//! - **EmptyTable**: the table has no rows
//! - **Overwrite**: a destination exists and the overwrite policy is `error`
//! - **Operator**: any of the above, tagged with the operator name
//! - **Pipeline**: failures while assembling a pipeline
//! - **Serde**: configuration decoding errors
//! - **Internal**: unexpected situations

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Humind.
pub type Result<T> = std::result::Result<T, HmError>;

/// Canonical error enumeration for Humind.
#[derive(Debug, Error, Serialize, Deserialize, PartialEq)]
pub enum HmError {
    /// Invalid parameters passed to an operator or factory.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A column holds values of the wrong kind.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// A referenced column does not exist in the table.
    #[error("column '{column}' not found in table")]
    ColumnNotFound { column: String },

    /// Cell values fall outside the domain allowed for a column.
    #[error("column '{column}': {message}")]
    Domain { column: String, message: String },

    /// The table has no rows.
    #[error("table is empty")]
    EmptyTable,

    /// A destination column already exists under the `error` overwrite policy.
    #[error("column '{column}' already exists and would be overwritten")]
    Overwrite { column: String },

    /// Failure raised by an operator, with the operator name attached.
    #[error("operator '{operator}' failed: {source}")]
    Operator {
        operator: String,
        #[source]
        source: Box<HmError>,
    },

    /// Failures that occur while assembling or running a pipeline.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for HmError {
    fn from(err: serde_json::Error) -> Self {
        HmError::Serde(err.to_string())
    }
}

impl HmError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        HmError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct schema errors.
    pub fn schema<T: Into<String>>(message: T) -> Self {
        HmError::Schema {
            message: message.into(),
        }
    }

    pub fn column_not_found(column: impl Into<String>) -> Self {
        HmError::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Helper to construct domain errors naming the offending column.
    pub fn domain(column: impl Into<String>, message: impl Into<String>) -> Self {
        HmError::Domain {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Wraps an error with the name of the operator that raised it.
    pub fn operator(name: impl Into<String>, source: HmError) -> Self {
        HmError::Operator {
            operator: name.into(),
            source: Box::new(source),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        HmError::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        HmError::Internal(message.into())
    }

    /// Returns the innermost error, looking through operator wrappers.
    pub fn root(&self) -> &HmError {
        match self {
            HmError::Operator { source, .. } => source.root(),
            other => other,
        }
    }
}

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

//! # Operators Module
//!
//! Indicator operators bundled with Humind. Each one validates the table,
//! then adds or replaces its derived columns in a single pass.
//!
//! - **fcs**: food consumption score, weights and category (`indicator.fcs`)
//! - **num_cat**: numeric column to ordered categories (`indicator.num_cat`)
//! - **skip_logic**: fill skipped answers from a governing column (`indicator.skip_logic`)
//!
//! Operators are built either directly or through their JSON factories and
//! applied through the [`crate::operator::HmOperator`] trait.

pub mod fcs;
pub mod num_cat;
pub mod skip_logic;

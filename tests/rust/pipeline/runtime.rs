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

use humind::{HmError, HmPipelineBuilder, HmTable};
use serde_json::{json, Value};

fn survey() -> HmTable {
    HmTable::from_rows(vec![
        json!({
            "fsl_fcs_cereal": 7, "fsl_fcs_legumes": 3, "fsl_fcs_dairy": 1, "fsl_fcs_meat": 2,
            "fsl_fcs_veg": 5, "fsl_fcs_fruit": 0, "fsl_fcs_oil": 7, "fsl_fcs_sugar": 4,
            "hh_size": 6, "cm_income_source": "salaried", "income_remittances": null
        }),
        json!({
            "fsl_fcs_cereal": 2, "fsl_fcs_legumes": 0, "fsl_fcs_dairy": 0, "fsl_fcs_meat": 0,
            "fsl_fcs_veg": 3, "fsl_fcs_fruit": 1, "fsl_fcs_oil": null, "fsl_fcs_sugar": 2,
            "hh_size": -999, "cm_income_source": "dnk", "income_remittances": null
        }),
    ])
    .unwrap()
}

#[test]
fn pipeline_runs_all_indicators() {
    let steps = json!([
        {"operator": "indicator.fcs", "config": {"cutoffs": "normal"}},
        {"operator": "indicator.num_cat", "config": {"num_col": "hh_size", "breaks": [1, 4, 7], "above_last": true, "plus_last": true}},
        {"operator": "indicator.skip_logic", "config": {
            "var": "cm_income_source", "undefined": ["dnk", "pnta"],
            "sl_vars": ["income_remittances"], "sl_value": 0, "suffix": "_d"
        }}
    ]);
    let pipeline = HmPipelineBuilder::with_defaults()
        .build_from_config(steps.as_array().unwrap())
        .unwrap();
    assert_eq!(
        pipeline.stage_names(),
        vec!["indicator.fcs", "indicator.num_cat", "indicator.skip_logic"]
    );

    let mut table = survey();
    let reports = pipeline.run(&mut table).unwrap();
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.is_clean()));

    let first = &table.rows()[0];
    // 14 + 9 + 4 + 8 + 5 + 0 + 3.5 + 2
    assert_eq!(first.get("fsl_fcs_score").and_then(Value::as_f64), Some(45.5));
    assert_eq!(first.get("fsl_fcs_cat"), Some(&json!("Acceptable")));
    assert_eq!(first.get("hh_size_cat"), Some(&json!("4-6")));
    assert_eq!(first.get("income_remittances_d").and_then(Value::as_f64), Some(0.0));

    let second = &table.rows()[1];
    // 4 + 3 + 1 + 1
    assert_eq!(second.get("fsl_fcs_score").and_then(Value::as_f64), Some(9.0));
    assert_eq!(second.get("fsl_fcs_cat"), Some(&json!("Poor")));
    assert_eq!(second.get("hh_size_cat"), Some(&json!("Unknown")));
    assert_eq!(second.get("income_remittances_d"), None);
}

#[test]
fn pipeline_stops_at_failing_stage() {
    let steps = json!([
        {"operator": "indicator.num_cat", "config": {"num_col": "hh_size", "breaks": [1, 4]}},
        {"operator": "indicator.skip_logic", "config": {"var": "missing_column", "sl_vars": ["hh_size"], "sl_value": 0}}
    ]);
    let pipeline = HmPipelineBuilder::with_defaults()
        .build_from_config(steps.as_array().unwrap())
        .unwrap();

    let mut table = survey();
    let err = pipeline.run(&mut table).unwrap_err();
    match &err {
        HmError::Operator { operator, .. } => assert_eq!(operator, "indicator.skip_logic"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.root(), &HmError::column_not_found("missing_column"));
    assert!(table.has_column("hh_size_cat"));
}

#[test]
fn pipeline_config_errors_name_the_stage() {
    let builder = HmPipelineBuilder::with_defaults();
    let err = builder
        .build_from_config(&[json!({"operator": "indicator.fcs", "config": {"cutoffs": "strict"}})])
        .err()
        .unwrap();
    assert!(matches!(err, HmError::Operator { ref operator, .. } if operator == "indicator.fcs"));
    assert!(matches!(err.root(), HmError::Validation { .. }));

    let err = builder
        .build_from_config(&[json!({"operator": "indicator.num_cat", "config": {"num_col": "x"}})])
        .err()
        .unwrap();
    assert!(matches!(err.root(), HmError::Validation { message } if message.contains("breaks")));

    let err = builder.build_from_config(&[]).err().unwrap();
    assert_eq!(err, HmError::pipeline("pipeline", "no stages configured"));

    let err = builder.build_from_config(&[json!("indicator.fcs")]).err().unwrap();
    assert!(matches!(err, HmError::Validation { .. }));
}

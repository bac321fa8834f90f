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

use humind::operators::skip_logic::skip_logic_factory;
use humind::{HmError, HmOperator, HmOverwritePolicy, HmSkipLogicFill, HmTable};
use serde_json::{json, Value};

fn livelihood_table() -> HmTable {
    HmTable::from_rows(vec![
        json!({"lcsi_stress": "yes", "income": 120, "debt": null}),
        json!({"lcsi_stress": "no_had_no_need", "income": null, "debt": null}),
        json!({"lcsi_stress": "dnk", "income": null, "debt": 40}),
        json!({"lcsi_stress": null, "income": null, "debt": 5.5}),
    ])
    .unwrap()
}

fn column(table: &HmTable, name: &str) -> Vec<Option<f64>> {
    let handle = table.column(name).unwrap();
    table.numeric_values(&handle)
}

fn operator() -> HmSkipLogicFill {
    HmSkipLogicFill::new("lcsi_stress")
        .undefined(vec![json!("dnk"), json!("pnta")])
        .targets(vec!["income".into(), "debt".into()])
        .value(0i64.into())
}

#[test]
fn skip_logic_fills_outside_undefined_set() {
    let mut table = livelihood_table();
    let report = operator().suffix("_sl").apply(&mut table).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.columns_written, vec!["income_sl", "debt_sl"]);
    assert_eq!(
        column(&table, "income_sl"),
        vec![Some(120.0), Some(0.0), None, Some(0.0)]
    );
    assert_eq!(
        column(&table, "debt_sl"),
        vec![Some(0.0), Some(0.0), Some(40.0), Some(5.5)]
    );
    assert_eq!(column(&table, "income"), vec![Some(120.0), None, None, None]);
}

#[test]
fn skip_logic_keeps_original_cells() {
    let mut table = livelihood_table();
    operator().suffix("_sl").apply(&mut table).unwrap();
    assert_eq!(table.rows()[0].get("income_sl"), Some(&json!(120)));
}

#[test]
fn skip_logic_fill_keeps_number_representation() {
    let mut table = livelihood_table();
    operator().suffix("_sl").apply(&mut table).unwrap();
    assert_eq!(table.rows()[1].get("income_sl"), Some(&json!(0)));
    assert!(table.rows()[1].get("income_sl").is_some_and(Value::is_i64));

    let mut table = livelihood_table();
    let operator = skip_logic_factory(&json!({
        "var": "lcsi_stress",
        "sl_vars": ["debt"],
        "sl_value": 0.5,
        "suffix": "_sl"
    }))
    .unwrap();
    operator.apply(&mut table).unwrap();
    assert_eq!(table.rows()[0].get("debt_sl"), Some(&json!(0.5)));
}

#[test]
fn skip_logic_empty_suffix_updates_in_place_without_warning() {
    let mut table = livelihood_table();
    let report = operator().apply(&mut table).unwrap();

    assert!(report.is_clean());
    assert_eq!(column(&table, "income"), vec![Some(120.0), Some(0.0), None, Some(0.0)]);
}

#[test]
fn skip_logic_noop_without_value_or_targets() {
    let mut table = livelihood_table();
    let before = table.clone();

    let report = HmSkipLogicFill::new("lcsi_stress")
        .targets(vec!["income".into()])
        .apply(&mut table)
        .unwrap();
    assert!(report.columns_written.is_empty());

    let report = HmSkipLogicFill::new("lcsi_stress")
        .value(0i64.into())
        .suffix("_sl")
        .apply(&mut table)
        .unwrap();
    assert!(report.columns_written.is_empty());
    assert_eq!(table, before);
}

#[test]
fn skip_logic_validation_failures() {
    let mut table = livelihood_table();
    let before = table.clone();

    let err = HmSkipLogicFill::new("income")
        .targets(vec!["debt".into()])
        .value(0i64.into())
        .apply(&mut table)
        .unwrap_err();
    assert!(matches!(err, HmError::Schema { .. }));

    let err = HmSkipLogicFill::new("lcsi_stress")
        .targets(vec!["lcsi_stress".into()])
        .value(0i64.into())
        .apply(&mut table)
        .unwrap_err();
    assert!(matches!(err, HmError::Schema { .. }));

    let err = HmSkipLogicFill::new("status")
        .targets(vec!["debt".into()])
        .value(0i64.into())
        .apply(&mut table)
        .unwrap_err();
    assert_eq!(err, HmError::column_not_found("status"));

    let err = operator()
        .targets(vec!["income".into(), "savings".into()])
        .apply(&mut table)
        .unwrap_err();
    assert_eq!(err, HmError::column_not_found("savings"));

    assert_eq!(table, before);
}

#[test]
fn skip_logic_rerun_warns_and_reproduces() {
    let mut table = livelihood_table();
    operator().suffix("_sl").apply(&mut table).unwrap();
    let first = table.clone();

    let report = operator().suffix("_sl").apply(&mut table).unwrap();
    assert_eq!(table, first);
    assert_eq!(report.overwritten(), vec!["income_sl", "debt_sl"]);

    let err = operator()
        .suffix("_sl")
        .overwrite(HmOverwritePolicy::Error)
        .apply(&mut table)
        .unwrap_err();
    assert!(matches!(err, HmError::Overwrite { .. }));
}

#[test]
fn skip_logic_factory_builds_operator() {
    let mut table = livelihood_table();
    let operator = skip_logic_factory(&json!({
        "var": "lcsi_stress",
        "undefined": ["dnk"],
        "sl_vars": ["income"],
        "sl_value": 0,
        "suffix": "_sl"
    }))
    .unwrap();
    operator.apply(&mut table).unwrap();
    assert_eq!(
        column(&table, "income_sl"),
        vec![Some(120.0), Some(0.0), None, Some(0.0)]
    );
}

#[test]
fn skip_logic_factory_rejects_bad_arguments() {
    assert!(skip_logic_factory(&json!({"sl_vars": ["income"]})).is_err());
    assert!(skip_logic_factory(&json!({"var": "x", "sl_value": "zero"})).is_err());
    assert!(skip_logic_factory(&json!({"var": "x", "sl_vars": "income"})).is_err());
    assert!(skip_logic_factory(&json!({"var": "x", "suffix": 1})).is_err());
    assert!(skip_logic_factory(&Value::Null).is_err());
}

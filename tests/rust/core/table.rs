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

use humind::{HmColumnKind, HmError, HmRecord, HmTable};
use serde_json::{json, Map};

#[test]
fn table_from_rows_keeps_column_order() {
    let table = HmTable::from_rows(vec![
        json!({"b": 1, "a": "x"}),
        json!({"c": true}),
    ])
    .unwrap();

    let mut names = table.column_names().to_vec();
    names.sort();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.column("c").unwrap().kind(), HmColumnKind::Boolean);
}

#[test]
fn table_from_columns_requires_equal_lengths() {
    let err = HmTable::from_columns(vec![
        ("a", vec![json!(1), json!(2)]),
        ("b", vec![json!(1)]),
    ])
    .unwrap_err();
    assert!(matches!(err, HmError::Schema { .. }));
}

#[test]
fn table_rejects_non_object_rows() {
    assert!(HmTable::from_rows(vec![json!(3)]).is_err());
}

#[test]
fn table_all_missing_column_is_empty_kind() {
    let table = HmTable::from_rows(vec![json!({"a": null}), json!({"a": null})]).unwrap();
    let column = table.column("a").unwrap();
    assert_eq!(column.kind(), HmColumnKind::Empty);
    assert!(column.kind().is_numeric());
}

#[test]
fn table_set_column_reports_replacement() {
    let mut table = HmTable::from_records(vec![
        HmRecord::new(Some("hh-1".to_string()), Map::new()),
        HmRecord::new(Some("hh-2".to_string()), Map::new()),
    ]);
    assert!(!table.set_column("x", vec![json!(1), json!(2)]).unwrap());
    assert!(table.set_column("x", vec![json!(3), json!(4)]).unwrap());
    assert_eq!(table.column_names(), &["x".to_string()]);
    assert_eq!(table.rows()[1].get("x"), Some(&json!(4)));
    assert_eq!(table.rows()[1].id.as_deref(), Some("hh-2"));
}

#[test]
fn table_unknown_column_is_typed_error() {
    let table = HmTable::from_rows(vec![json!({"a": 1})]).unwrap();
    assert_eq!(table.column("z").unwrap_err(), HmError::column_not_found("z"));
}

#[test]
fn table_push_row_extends_columns() {
    let mut table = HmTable::new();
    let mut row = Map::new();
    row.insert("a".into(), json!(1));
    table.push_row(row);
    assert!(table.has_column("a"));
    assert!(!table.is_empty());
}

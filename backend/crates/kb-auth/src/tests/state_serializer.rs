use crate::claim_reader::ClaimMap;
use crate::tests::{in_one_hour, test_codec};
use crate::{AuthError, decode_state, encode_state};

use kb_core::{BoardState, ColumnState, TaskRef, WorkspaceState};

use googletest::prelude::*;
use serde_json::{Value, json};

fn claims_from(value: Value) -> ClaimMap {
    value.as_object().unwrap().clone()
}

fn mixed_state() -> WorkspaceState {
    WorkspaceState::new(vec![
        BoardState {
            id: "b1".into(),
            columns: vec![ColumnState::Count(1), ColumnState::Count(0)],
        },
        BoardState {
            id: "b2".into(),
            columns: vec![
                ColumnState::Tasks(vec![TaskRef::new("t2", 7), TaskRef::new("t1", 3)]),
                ColumnState::empty(),
            ],
        },
    ])
}

#[test]
fn given_state_when_encoded_then_wire_shape_matches() {
    let claims = encode_state(&mixed_state());

    assert_eq!(
        Value::Object(claims),
        json!({
            "boards": [
                {"id": "b1", "columns": [{"task_count": 1}, {"task_count": 0}]},
                {"id": "b2", "columns": [
                    {"tasks": [{"id": "t2", "order": 7}, {"id": "t1", "order": 3}]},
                    {"tasks": []}
                ]}
            ]
        })
    );
}

#[test]
fn given_mixed_state_when_round_tripped_through_token_then_equal_including_order() {
    let codec = test_codec();
    let state = mixed_state();

    let token = codec.issue(&state, in_one_hour()).unwrap();
    let verified = codec.verify::<WorkspaceState>(&token).unwrap();

    assert_that!(verified.payload, eq(&state));
}

#[test]
fn given_empty_state_when_round_tripped_then_empty() {
    let state = WorkspaceState::default();

    let decoded = decode_state(&encode_state(&state)).unwrap();

    assert!(decoded.boards.is_empty());
}

#[test]
fn given_columns_as_string_when_decoded_then_malformed_and_nothing_returned() {
    let claims = claims_from(json!({
        "boards": [
            {"id": "b1", "columns": "oops"},
            {"id": "b2", "columns": []}
        ]
    }));

    let result = decode_state(&claims);

    assert!(matches!(result, Err(AuthError::Malformed { .. })));
}

#[test]
fn given_later_board_broken_when_decoded_then_whole_decode_fails() {
    let claims = claims_from(json!({
        "boards": [
            {"id": "b1", "columns": []},
            {"id": 7, "columns": []}
        ]
    }));

    assert!(matches!(decode_state(&claims), Err(AuthError::Malformed { .. })));
}

#[test]
fn given_structural_violations_when_decoded_then_each_is_malformed() {
    let cases = [
        json!({}),
        json!({"boards": {}}),
        json!({"boards": ["b1"]}),
        json!({"boards": [{"columns": []}]}),
        json!({"boards": [{"id": "b1"}]}),
        json!({"boards": [{"id": "b1", "columns": [[]]}]}),
        json!({"boards": [{"id": "b1", "columns": [{}]}]}),
        json!({"boards": [{"id": "b1", "columns": [{"tasks": [], "task_count": 0}]}]}),
        json!({"boards": [{"id": "b1", "columns": [{"tasks": {}}]}]}),
        json!({"boards": [{"id": "b1", "columns": [{"tasks": [{"order": 1}]}]}]}),
        json!({"boards": [{"id": "b1", "columns": [{"tasks": [{"id": "t1"}]}]}]}),
        json!({"boards": [{"id": "b1", "columns": [{"tasks": [{"id": "t1", "order": "1"}]}]}]}),
        json!({"boards": [{"id": "b1", "columns": [{"task_count": -1}]}]}),
        json!({"boards": [{"id": "b1", "columns": [{"task_count": true}]}]}),
    ];

    for case in cases {
        let result = decode_state(&claims_from(case.clone()));
        assert!(
            matches!(result, Err(AuthError::Malformed { .. })),
            "{case} decoded to {result:?}"
        );
    }
}

#[test]
fn given_integral_float_numbers_when_decoded_then_converted_exactly() {
    let claims = claims_from(json!({
        "boards": [{"id": "b1", "columns": [
            {"tasks": [{"id": "t1", "order": 4.0}]},
            {"task_count": 2.0}
        ]}]
    }));

    let state = decode_state(&claims).unwrap();

    let board = &state.boards[0];
    assert_that!(board.columns[0], eq(&ColumnState::Tasks(vec![TaskRef::new("t1", 4)])));
    assert_that!(board.columns[1], eq(&ColumnState::Count(2)));
}

#[test]
fn given_fractional_order_when_decoded_then_malformed_not_floored() {
    let claims = claims_from(json!({
        "boards": [{"id": "b1", "columns": [{"tasks": [{"id": "t1", "order": 2.5}]}]}]
    }));

    assert!(matches!(decode_state(&claims), Err(AuthError::Malformed { .. })));
}

#[test]
fn given_fractional_task_count_when_decoded_then_malformed() {
    let claims = claims_from(json!({
        "boards": [{"id": "b1", "columns": [{"task_count": 1.25}]}]
    }));

    assert!(matches!(decode_state(&claims), Err(AuthError::Malformed { .. })));
}

#[test]
fn given_duplicate_orders_when_round_tripped_then_preserved_as_given() {
    let state = WorkspaceState::new(vec![BoardState {
        id: "b1".into(),
        columns: vec![ColumnState::Tasks(vec![
            TaskRef::new("t1", 9),
            TaskRef::new("t2", 9),
            TaskRef::new("t3", -4),
        ])],
    }]);

    let decoded = decode_state(&encode_state(&state)).unwrap();

    assert_that!(decoded, eq(&state));
}

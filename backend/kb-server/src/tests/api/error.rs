use crate::ApiError;

use kb_auth::AuthError;
use kb_core::{CoreError, IntValidator, OrderValidator};
use kb_db::DbError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::prelude::*;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_unauthenticated_when_rendered_then_401_with_code() {
    let (status, json) = body_json(ApiError::unauthenticated("Missing identity token")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHENTICATED");
    assert_eq!(json["error"]["message"], "Missing identity token");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn given_forbidden_when_rendered_then_403() {
    let (status, json) = body_json(ApiError::forbidden("Board is not in your workspace")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_with_field() {
    let error = ApiError::Validation {
        message: "title is too long".into(),
        field: Some("title".into()),
        location: ErrorLocation::from(Location::caller()),
    };
    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "title");
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404() {
    let (status, json) = body_json(ApiError::not_found("board 1 not found")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn given_conflict_when_rendered_then_409() {
    let (status, json) = body_json(ApiError::conflict("username taken")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn given_internal_when_rendered_then_500() {
    let (status, json) = body_json(ApiError::internal("Database operation failed")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn given_db_failure_when_converted_then_cause_kept_for_log_but_not_rendered() {
    let error = ApiError::from(DbError::Initialization {
        message: "column out of range".into(),
        location: ErrorLocation::from(Location::caller()),
    });

    assert!(error.to_string().contains("column out of range"));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["message"], "Database operation failed");
}

#[test]
fn given_db_not_found_when_converted_then_not_found() {
    let error = ApiError::from(DbError::not_found("task", "abc"));

    assert_that!(error.status(), eq(StatusCode::NOT_FOUND));
}

#[test]
fn given_db_conflict_when_converted_then_conflict() {
    let error = ApiError::from(DbError::Conflict {
        message: "username alice is taken".into(),
        location: ErrorLocation::from(Location::caller()),
    });

    assert_that!(error.status(), eq(StatusCode::CONFLICT));
}

#[test]
fn given_core_validation_when_converted_then_validation_with_field() {
    let core: CoreError = OrderValidator.validate(-1).unwrap_err();
    let error = ApiError::from(core);

    match error {
        ApiError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("order")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn given_auth_client_error_when_converted_then_unauthenticated() {
    let error = ApiError::from(AuthError::Expired {
        location: ErrorLocation::from(Location::caller()),
    });

    assert_that!(error.status(), eq(StatusCode::UNAUTHORIZED));
}

#[test]
fn given_uuid_error_when_converted_then_validation() {
    let uuid_err = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
    let error = ApiError::from(uuid_err);

    assert_that!(error.status(), eq(StatusCode::BAD_REQUEST));
    assert!(matches!(error, ApiError::Validation { .. }));
}

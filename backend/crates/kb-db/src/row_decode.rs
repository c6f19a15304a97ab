//! Column decoding shared by the repositories

use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

#[track_caller]
fn corrupt(message: String) -> DbError {
    DbError::Initialization {
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}

pub(crate) fn uuid(row: &SqliteRow, column: &str) -> DbErrorResult<Uuid> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw).map_err(|e| corrupt(format!("Invalid UUID in {column}: {e}")))
}

pub(crate) fn timestamp(row: &SqliteRow, column: &str) -> DbErrorResult<DateTime<Utc>> {
    let raw: i64 = row.try_get(column)?;
    DateTime::from_timestamp(raw, 0)
        .ok_or_else(|| corrupt(format!("Invalid timestamp in {column}: {raw}")))
}

pub(crate) fn parsed<T>(row: &SqliteRow, column: &str) -> DbErrorResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = row.try_get(column)?;
    raw.parse()
        .map_err(|e| corrupt(format!("Invalid value in {column}: {e}")))
}

pub(crate) fn column_index(row: &SqliteRow, column: &str) -> DbErrorResult<usize> {
    let raw: i64 = row.try_get(column)?;
    usize::try_from(raw)
        .ok()
        .filter(|c| *c < kb_core::COLUMN_COUNT)
        .ok_or_else(|| corrupt(format!("Invalid column index in {column}: {raw}")))
}

pub(crate) fn json<T: serde::de::DeserializeOwned>(
    row: &SqliteRow,
    column: &str,
) -> DbErrorResult<T> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw).map_err(|e| corrupt(format!("Invalid JSON in {column}: {e}")))
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> DbErrorResult<String> {
    serde_json::to_string(value).map_err(|e| corrupt(format!("Cannot serialize value: {e}")))
}

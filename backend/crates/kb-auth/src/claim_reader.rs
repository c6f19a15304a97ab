//! Typed accessors over the untyped claim tree.
//!
//! Claims arrive as plain JSON with no schema, so every read asserts the
//! expected shape and reports the path of the first violation.

use crate::{AuthError, Result as AuthErrorResult};

use serde_json::{Map, Number, Value};

pub type ClaimMap = Map<String, Value>;

#[track_caller]
pub fn field<'a>(map: &'a ClaimMap, key: &str, path: &str) -> AuthErrorResult<&'a Value> {
    map.get(key)
        .ok_or_else(|| AuthError::malformed(format!("{path}.{key} is missing")))
}

#[track_caller]
pub fn as_str<'a>(value: &'a Value, path: &str) -> AuthErrorResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| AuthError::malformed(format!("{path} must be a string")))
}

#[track_caller]
pub fn as_array<'a>(value: &'a Value, path: &str) -> AuthErrorResult<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| AuthError::malformed(format!("{path} must be a list")))
}

#[track_caller]
pub fn as_object<'a>(value: &'a Value, path: &str) -> AuthErrorResult<&'a ClaimMap> {
    value
        .as_object()
        .ok_or_else(|| AuthError::malformed(format!("{path} must be a map")))
}

/// Reads an integer claim.
///
/// Numbers that came through a float representation are accepted only when
/// they are integral and in range; `2.0` becomes `2`, `2.5` is rejected.
#[track_caller]
pub fn as_i64(value: &Value, path: &str) -> AuthErrorResult<i64> {
    let Value::Number(number) = value else {
        return Err(AuthError::malformed(format!("{path} must be a number")));
    };
    integral(number)
        .ok_or_else(|| AuthError::malformed(format!("{path} must be an integer, got {number}")))
}

#[track_caller]
pub fn as_u32(value: &Value, path: &str) -> AuthErrorResult<u32> {
    let n = as_i64(value, path)?;
    u32::try_from(n)
        .map_err(|_| AuthError::malformed(format!("{path} is out of range, got {n}")))
}

#[track_caller]
pub fn str_field<'a>(map: &'a ClaimMap, key: &str, path: &str) -> AuthErrorResult<&'a str> {
    as_str(field(map, key, path)?, &format!("{path}.{key}"))
}

#[track_caller]
pub fn i64_field(map: &ClaimMap, key: &str, path: &str) -> AuthErrorResult<i64> {
    as_i64(field(map, key, path)?, &format!("{path}.{key}"))
}

// 2^63 is exactly representable, so anything below it converts losslessly.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn integral(number: &Number) -> Option<i64> {
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    if number.is_u64() {
        return None;
    }
    let f = number.as_f64()?;
    if !f.is_finite() || f.fract() != 0.0 || f < -I64_UPPER_BOUND || f >= I64_UPPER_BOUND {
        return None;
    }
    Some(f as i64)
}

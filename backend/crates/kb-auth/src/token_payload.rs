use crate::Result as AuthErrorResult;
use crate::claim_reader::ClaimMap;

use chrono::{DateTime, Utc};

/// A payload shape carried by a signed token.
pub trait TokenPayload: Sized {
    fn to_claims(&self) -> ClaimMap;

    /// Rebuild the payload from verified claims. Missing fields and wrong
    /// types fail with `AuthError::Malformed`.
    fn from_claims(claims: &ClaimMap) -> AuthErrorResult<Self>;
}

/// A payload recovered from a token that passed signature and expiry checks
#[derive(Debug, Clone, PartialEq)]
pub struct Verified<T> {
    pub payload: T,
    pub expires_at: DateTime<Utc>,
}

use crate::claim_reader::{self, ClaimMap};
use crate::{AuthError, Result as AuthErrorResult, TokenPayload, Verified};

use std::panic::Location;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value;

/// Name of the expiry claim, seconds since the Unix epoch
pub const EXPIRY_CLAIM: &str = "exp";

/// Claims of a token whose signature and expiry have been checked
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedClaims {
    /// Payload claims, with the expiry claim removed
    pub claims: ClaimMap,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies compact HS256 tokens (`header.claims.signature`).
///
/// The key is injected once at startup and never changes for the life of the
/// process. Encoding and decoding are pure, so one codec can be shared by
/// every request.
pub struct ClaimsCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl ClaimsCodec {
    /// Create a codec with HS256 (symmetric secret)
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked here after the signature, so that integral
        // floating point timestamps are accepted like any other number.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign `claims` with `expires_at` embedded as the expiry claim.
    #[track_caller]
    pub fn encode(&self, mut claims: ClaimMap, expires_at: DateTime<Utc>) -> AuthErrorResult<String> {
        claims.insert(
            EXPIRY_CLAIM.to_string(),
            Value::from(expires_at.timestamp()),
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::Signing {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Verify `token` and return its claims.
    ///
    /// Fails with `Empty` for the empty string, `Malformed` when the token is
    /// not three base64url segments with JSON header and claims,
    /// `BadSignature` when the signature does not match, and `Expired` when
    /// the signature is fine but the expiry has passed.
    #[track_caller]
    pub fn decode(&self, token: &str) -> AuthErrorResult<DecodedClaims> {
        let caller = Location::caller();

        if token.is_empty() {
            return Err(AuthError::Empty {
                location: ErrorLocation::from(caller),
            });
        }

        check_framing(token)?;

        let data = decode::<ClaimMap>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                // Framing was checked above, so a base64 failure here can only
                // come from the signature segment.
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::Base64(_) => AuthError::BadSignature {
                    location: ErrorLocation::from(caller),
                },
                ErrorKind::ExpiredSignature => AuthError::Expired {
                    location: ErrorLocation::from(caller),
                },
                _ => AuthError::malformed(e.to_string()),
            },
        )?;

        let mut claims = data.claims;
        let exp_value = claims
            .remove(EXPIRY_CLAIM)
            .ok_or_else(|| AuthError::malformed("claims.exp is missing"))?;
        let exp = claim_reader::as_i64(&exp_value, "claims.exp")?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::malformed(format!("claims.exp is out of range: {exp}")))?;

        if expires_at < Utc::now() {
            return Err(AuthError::Expired {
                location: ErrorLocation::from(caller),
            });
        }

        Ok(DecodedClaims { claims, expires_at })
    }

    /// Encode a typed payload
    #[track_caller]
    pub fn issue<T: TokenPayload>(
        &self,
        payload: &T,
        expires_at: DateTime<Utc>,
    ) -> AuthErrorResult<String> {
        self.encode(payload.to_claims(), expires_at)
    }

    /// Decode a token and convert its claims into a typed payload.
    /// Any structural problem in the payload is reported as `Malformed`.
    #[track_caller]
    pub fn verify<T: TokenPayload>(&self, token: &str) -> AuthErrorResult<Verified<T>> {
        let decoded = self.decode(token)?;
        let payload = T::from_claims(&decoded.claims)?;

        Ok(Verified {
            payload,
            expires_at: decoded.expires_at,
        })
    }
}

/// Header and claims must be base64url JSON objects; the signature segment
/// is left to the verifier so tampering there reads as a bad signature.
#[track_caller]
fn check_framing(token: &str) -> AuthErrorResult<()> {
    let caller = Location::caller();
    let segments: Vec<&str> = token.splitn(3, '.').collect();
    let [header, claims, signature] = segments[..] else {
        return Err(AuthError::malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    for (name, segment) in [("header", header), ("claims", claims)] {
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|e| AuthError::malformed(format!("{name} is not base64url: {e}")))?;
        serde_json::from_slice::<ClaimMap>(&bytes)
            .map_err(|e| AuthError::malformed(format!("{name} is not a JSON object: {e}")))?;
    }

    // A dot is not base64url, so a signature holding one can never verify.
    if signature.contains('.') {
        return Err(AuthError::BadSignature {
            location: ErrorLocation::from(caller),
        });
    }

    Ok(())
}

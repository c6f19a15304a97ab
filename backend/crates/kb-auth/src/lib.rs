pub mod claim_reader;
pub mod claims_codec;
pub mod error;
pub mod identity;
pub mod invite;
pub mod state_serializer;
pub mod token_payload;

pub use claims_codec::{ClaimsCodec, DecodedClaims, EXPIRY_CLAIM};
pub use error::{AuthError, Result};
pub use identity::Identity;
pub use invite::Invite;
pub use state_serializer::{decode_state, encode_state};
pub use token_payload::{TokenPayload, Verified};

#[cfg(test)]
mod tests;

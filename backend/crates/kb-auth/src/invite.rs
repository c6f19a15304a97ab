use crate::claim_reader::{self, ClaimMap};
use crate::{AuthError, Result as AuthErrorResult, TokenPayload};

use serde_json::Value;
use uuid::Uuid;

const TENANT_CLAIM: &str = "tenant_id";

/// Join link for a team, redeemed at registration.
///
/// Only expiry bounds an invite: the same link may be used by several people
/// until it runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    pub tenant_id: Uuid,
}

impl Invite {
    pub fn new(tenant_id: Uuid) -> Self {
        Self { tenant_id }
    }
}

impl TokenPayload for Invite {
    fn to_claims(&self) -> ClaimMap {
        let mut claims = ClaimMap::new();
        claims.insert(TENANT_CLAIM.into(), Value::from(self.tenant_id.to_string()));
        claims
    }

    #[track_caller]
    fn from_claims(claims: &ClaimMap) -> AuthErrorResult<Self> {
        let tenant_id = claim_reader::str_field(claims, TENANT_CLAIM, "claims")?;
        let tenant_id = Uuid::parse_str(tenant_id).map_err(|e| {
            AuthError::malformed(format!("claims.tenant_id is not a UUID: {e}"))
        })?;

        Ok(Self { tenant_id })
    }
}

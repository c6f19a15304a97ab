use crate::claim_reader::{self, ClaimMap};
use crate::{AuthError, Result as AuthErrorResult, TokenPayload};

use kb_core::Role;

use std::str::FromStr;

use serde_json::Value;
use uuid::Uuid;

const SUBJECT_CLAIM: &str = "sub";
const ROLE_CLAIM: &str = "role";
const TENANT_CLAIM: &str = "tenant_id";

/// Who the caller is, issued at login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Username of the caller
    pub subject: String,
    pub role: Role,
    /// Team the caller belongs to
    pub tenant_id: Uuid,
}

impl Identity {
    pub fn new(subject: impl Into<String>, role: Role, tenant_id: Uuid) -> Self {
        Self {
            subject: subject.into(),
            role,
            tenant_id,
        }
    }
}

impl TokenPayload for Identity {
    fn to_claims(&self) -> ClaimMap {
        let mut claims = ClaimMap::new();
        claims.insert(SUBJECT_CLAIM.into(), Value::from(self.subject.as_str()));
        claims.insert(ROLE_CLAIM.into(), Value::from(self.role.as_str()));
        claims.insert(TENANT_CLAIM.into(), Value::from(self.tenant_id.to_string()));
        claims
    }

    #[track_caller]
    fn from_claims(claims: &ClaimMap) -> AuthErrorResult<Self> {
        let subject = claim_reader::str_field(claims, SUBJECT_CLAIM, "claims")?;
        if subject.is_empty() {
            return Err(AuthError::malformed("claims.sub cannot be empty"));
        }

        let role = claim_reader::str_field(claims, ROLE_CLAIM, "claims")?;
        let role = Role::from_str(role)
            .map_err(|_| AuthError::malformed(format!("claims.role is not a role: {role}")))?;

        let tenant_id = claim_reader::str_field(claims, TENANT_CLAIM, "claims")?;
        let tenant_id = Uuid::parse_str(tenant_id).map_err(|e| {
            AuthError::malformed(format!("claims.tenant_id is not a UUID: {e}"))
        })?;

        Ok(Self {
            subject: subject.to_string(),
            role,
            tenant_id,
        })
    }
}

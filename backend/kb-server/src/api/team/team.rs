use crate::api::extractors::token_cookies::TokenCookies;
use crate::api::protocol::{Access, Guard, MissingState, expiry};
use crate::app_state::AppState;
use crate::{ApiResult, InviteResponse};

use kb_auth::Invite;

use axum::{Json, extract::State};

const INVITE_GUARD: Guard = Guard::new(Access::Admin, MissingState::Forbidden);

/// GET /api/v1/team/invite
///
/// Join link token for the caller's team, reusable until it expires.
pub async fn create_invite(
    State(app): State<AppState>,
    cookies: TokenCookies,
) -> ApiResult<Json<InviteResponse>> {
    let identity = INVITE_GUARD.identify(&app, &cookies)?;

    let expires_at = expiry(app.tokens.invite_ttl)?;
    let invite_token = app
        .codec
        .issue(&Invite::new(identity.tenant_id), expires_at)?;

    log::debug!(
        "{} created an invite for team {}",
        identity.subject,
        identity.tenant_id
    );

    Ok(Json(InviteResponse {
        invite_token,
        expires_at,
    }))
}

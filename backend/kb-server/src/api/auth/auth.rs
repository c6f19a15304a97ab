//! Registration and login
//!
//! Both end with the caller holding a fresh identity cookie and a state
//! cookie derived from storage.

use crate::api::protocol::{identity_cookie, state_cookie};
use crate::app_state::AppState;
use crate::{ApiError, ApiResult, CredentialsRequest, InviteQuery, SessionResponse};

use kb_auth::{Identity, Invite};
use kb_core::{PasswordValidator, Role, StringValidator, Team, User, UsernameValidator};
use kb_db::{TeamRepository, UserRepository, WorkspaceRepository};

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Response},
};
use log::info;
use uuid::Uuid;

/// POST /api/v1/register[?invite=<token>]
///
/// Without an invite the caller founds a new team and becomes its admin.
/// With one, they join the inviting team as a member.
pub async fn register(
    State(app): State<AppState>,
    query: Result<Query<InviteQuery>, QueryRejection>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let Json(request) = body?;

    UsernameValidator.validate(&request.username)?;
    PasswordValidator.validate(&request.password)?;

    let joining = match query.invite.as_deref().filter(|token| !token.is_empty()) {
        Some(token) => Some(redeem_invite(&app, token).await?),
        None => None,
    };

    let users = UserRepository::new(app.pool.clone());
    if users.find_by_username(&request.username).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "username {} is taken",
            request.username
        )));
    }

    let password_hash = hash_password(request.password).await?;

    let (team_id, role) = match joining {
        Some(team_id) => (team_id, Role::Member),
        None => {
            let team = Team::new();
            TeamRepository::new(app.pool.clone()).create(&team).await?;
            (team.id, Role::Admin)
        }
    };

    let user = User::new(request.username, password_hash, team_id, role);
    users.create(&user).await?;

    info!(
        "Registered {} as {} of team {}",
        user.username, user.role, user.team_id
    );

    start_session(&app, &user).await
}

/// POST /api/v1/login
pub async fn login(
    State(app): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = body?;

    let user = UserRepository::new(app.pool.clone())
        .find_by_username(&request.username)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("Invalid username or password"))?;

    if !password_matches(request.password, user.password_hash.clone()).await? {
        return Err(ApiError::unauthenticated("Invalid username or password"));
    }

    info!("{} logged in", user.username);
    start_session(&app, &user).await
}

/// Team the invite token points at. Any token problem is a bad request.
async fn redeem_invite(app: &AppState, token: &str) -> ApiResult<Uuid> {
    let invite = app
        .codec
        .verify::<Invite>(token)
        .map_err(|e| ApiError::bad_request(format!("Invalid invite ({})", e.code())))?
        .payload;

    if !TeamRepository::new(app.pool.clone())
        .exists(invite.tenant_id)
        .await?
    {
        return Err(ApiError::bad_request("Invite refers to an unknown team"));
    }

    Ok(invite.tenant_id)
}

async fn start_session(app: &AppState, user: &User) -> ApiResult<Response> {
    let identity = Identity::new(user.username.clone(), user.role, user.team_id);
    let state = WorkspaceRepository::new(app.pool.clone())
        .load_state(user.team_id)
        .await?;

    let cookies = AppendHeaders([
        (SET_COOKIE, identity_cookie(app, &identity)?),
        (SET_COOKIE, state_cookie(app, &state)?),
    ]);

    Ok((cookies, Json(SessionResponse::from(user))).into_response())
}

// Argon2 is CPU bound; run it on the blocking pool.
async fn hash_password(password: String) -> ApiResult<String> {
    tokio::task::spawn_blocking(move || password_auth::generate_hash(password))
        .await
        .map_err(|e| ApiError::internal(format!("Password hashing failed: {e}")))
}

async fn password_matches(password: String, hash: String) -> ApiResult<bool> {
    tokio::task::spawn_blocking(move || password_auth::verify_password(password, &hash).is_ok())
        .await
        .map_err(|e| ApiError::internal(format!("Password check failed: {e}")))
}

use auth::TokenClaims;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::inbound::http::cookies::AUTH_COOKIE;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::SignupInput;
use crate::user::errors::UserError;

/// Register a user, then hand back a signed token in the `token` cookie.
///
/// The body is taken as raw JSON so the validator can report every
/// violated field instead of stopping at the first deserialization error.
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<SignUpResponseData>), ApiError> {
    let Json(body) = body?;
    let input = SignupInput::validate(&body)?;

    let user = state
        .user_service
        .create_user(input.into_command())
        .await
        .map_err(|e| {
            if let UserError::EmailAlreadyExists(ref email) = e {
                tracing::warn!(email = %email, "Signup rejected, email already registered");
            }
            ApiError::from(e)
        })?;

    let claims = TokenClaims::new(user.id, user.email.as_str(), user.role.as_str());
    let token = state.token_issuer.sign(&claims)?;
    let jar = state.cookie_writer.set(jar, AUTH_COOKIE, token);

    tracing::info!(email = %user.email, "User registered successfully");

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::CREATED,
            SignUpResponseData {
                message: "User registered successfully!".to_string(),
                user: (&user).into(),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpResponseData {
    pub message: String,
    pub user: UserData,
}

/// Public view of a user. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
        }
    }
}

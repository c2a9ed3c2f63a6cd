use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::{Span, warn};

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::ids::UserId;
use crate::infrastructure::auth::{parse_bearer_token, validate_access_token};

/// The user a request acts as, recovered from its bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parse_bearer_token(&parts.headers).map_err(|err| {
            warn!(error = %err, "bearer token missing");
            AppError::unauthenticated("couldn't find JWT")
        })?;

        let user_id = validate_access_token(token, &state.jwt_secret).map_err(|err| {
            warn!(error = %err, "bearer token rejected");
            AppError::unauthenticated("couldn't validate JWT")
        })?;

        Span::current().record("user.id", tracing::field::display(&user_id));
        Ok(Self { user_id })
    }
}

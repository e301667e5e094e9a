//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Routes reachable without a token
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login"];

/// Authentication middleware - requires a logged-in user
///
/// Validates `Authorization: Bearer <token>` and inserts [`CurrentUser`]
/// into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non `/api/` paths (`/health`, unknown paths fall through to 404)
/// - `/api/auth/login`
///
/// # Errors
///
/// | Case | Status |
/// |------|--------|
/// | no Authorization header | 401 |
/// | expired token | 401 TokenExpired |
/// | malformed or invalid token | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS
        || !path.starts_with("/api/")
        || PUBLIC_API_ROUTES.contains(&path)
    {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = format!("{}", e),
            uri = format!("{:?}", req.uri())
        );
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    let user = CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed token claims: {e}")))?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

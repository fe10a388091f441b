use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::cookie::{extract_cookie, TOKEN_COOKIE};
use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Guard for mutating blog routes. Reads the session token from the
/// `token` cookie and hands the decoded email to the handler.
pub struct AuthUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_cookie(&parts.headers, TOKEN_COOKIE).ok_or(ApiError::NoToken)?;

        let keys = JwtKeys::from_ref(state);
        let claims = match keys.verify(&token) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "token rejected");
                return Err(ApiError::InvalidToken);
            }
        };

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue, Request, StatusCode};

    async fn run_extractor(cookie: Option<&str>) -> Result<AuthUser, ApiError> {
        let state = crate::state::AppState::fake();
        let mut builder = Request::builder().uri("/personalBlog");
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, HeaderValue::from_str(c).unwrap());
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, &state).await
    }

    #[tokio::test]
    async fn missing_cookie_is_unauthorized() {
        let err = run_extractor(None).await.err().expect("rejection");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Access Denied: No Token Provided!");
    }

    #[tokio::test]
    async fn invalid_token_is_forbidden() {
        let err = run_extractor(Some("token=not.a.token"))
            .await
            .err()
            .expect("rejection");
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Invalid Token");
    }

    #[tokio::test]
    async fn valid_token_yields_claimed_email() {
        let state = crate::state::AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys.sign("dipak@123gmail.com").expect("sign");
        let AuthUser(email) = run_extractor(Some(&format!("token={}", token)))
            .await
            .expect("accepted");
        assert_eq!(email, "dipak@123gmail.com");
    }
}

use axum::http::{header, HeaderMap};

use super::jwt::TOKEN_TTL;

/// Name of the session cookie carrying the signed token.
pub const TOKEN_COOKIE: &str = "token";

/// Build the `Set-Cookie` value issued on register and login.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        TOKEN_COOKIE,
        token,
        TOKEN_TTL.as_secs()
    )
}

/// Pull a named cookie out of the request headers.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

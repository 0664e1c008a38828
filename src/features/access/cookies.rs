use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::shared::constants::SESSION_COOKIE;

/// Session cookie carrying a signed token
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Cookie matching the session cookie's path, for removal
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

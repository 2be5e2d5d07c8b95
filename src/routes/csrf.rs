//! CSRF protection: double-submit cookie.
//!
//! `GET /api/csrf` makes sure the browser holds a random token cookie that page
//! scripts can read. Mutating annotation routes take [`CsrfVerified`], which
//! requires the same token echoed in the `X-CSRFToken` header. A cross-site
//! page can make the browser send the cookie but cannot read it to forge the
//! header.

#[cfg(test)]
#[path = "csrf_test.rs"]
mod csrf_test;

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

use crate::services::token;
use crate::state::AppState;

pub const CSRF_HEADER: &str = "x-csrftoken";

/// Marker extractor: the request carried a matching CSRF header and cookie.
pub struct CsrfVerified;

fn tokens_match(cookie: &str, header: &str) -> bool {
    !cookie.is_empty() && cookie == header
}

impl<S> FromRequestParts<S> for CsrfVerified
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(&app_state.csrf_cookie).map(Cookie::value).unwrap_or_default();
        let header = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if tokens_match(cookie, header) {
            Ok(Self)
        } else {
            tracing::warn!(path = %parts.uri.path(), "rejected request without valid CSRF token");
            Err((StatusCode::FORBIDDEN, Json(json!({ "error": "CSRF token missing or incorrect" }))).into_response())
        }
    }
}

/// `GET /api/csrf`: return the CSRF token, issuing the cookie if needed.
pub async fn issue(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(existing) = jar.get(&state.csrf_cookie).map(Cookie::value).filter(|v| !v.is_empty()) {
        let token = existing.to_owned();
        return Json(json!({ "csrf_token": token })).into_response();
    }

    let token = token::generate_token();
    let cookie = Cookie::build((state.csrf_cookie.to_string(), token.clone()))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax);
    (jar.add(cookie), Json(json!({ "csrf_token": token }))).into_response()
}

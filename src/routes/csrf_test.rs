use super::*;
use axum::http::Request;
use axum::http::header::{COOKIE, SET_COOKIE};

fn parts(cookie: Option<&str>, header: Option<&str>) -> Parts {
    let mut builder = Request::builder().method("POST").uri("/api/documents/1/annotations");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, format!("csrftoken={cookie}"));
    }
    if let Some(header) = header {
        builder = builder.header(CSRF_HEADER, header);
    }
    builder.body(()).unwrap().into_parts().0
}

async fn verify(cookie: Option<&str>, header: Option<&str>) -> Option<StatusCode> {
    let state = AppState::new("csrftoken");
    let mut parts = parts(cookie, header);
    CsrfVerified::from_request_parts(&mut parts, &state)
        .await
        .err()
        .map(|resp| resp.status())
}

#[test]
fn tokens_match_requires_equal_non_empty() {
    assert!(tokens_match("abc", "abc"));
    assert!(!tokens_match("abc", "abd"));
    assert!(!tokens_match("", ""));
    assert!(!tokens_match("abc", ""));
}

#[tokio::test]
async fn matching_cookie_and_header_pass() {
    assert_eq!(verify(Some("abc123"), Some("abc123")).await, None);
}

#[tokio::test]
async fn missing_header_is_forbidden() {
    assert_eq!(verify(Some("abc123"), None).await, Some(StatusCode::FORBIDDEN));
}

#[tokio::test]
async fn missing_cookie_is_forbidden() {
    assert_eq!(verify(None, Some("abc123")).await, Some(StatusCode::FORBIDDEN));
}

#[tokio::test]
async fn mismatched_token_is_forbidden() {
    assert_eq!(verify(Some("abc123"), Some("zzz")).await, Some(StatusCode::FORBIDDEN));
}

#[tokio::test]
async fn issue_sets_a_new_cookie() {
    let state = AppState::new("csrftoken");
    let resp = issue(State(state), CookieJar::new()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_owned();
    assert!(set_cookie.starts_with("csrftoken="));
    assert!(!set_cookie.contains("HttpOnly"));

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let token = body["csrf_token"].as_str().unwrap();
    assert_eq!(token.len(), 64);
    assert!(set_cookie.contains(token));
}

#[tokio::test]
async fn issue_reuses_existing_cookie() {
    let state = AppState::new("csrftoken");
    let jar = CookieJar::new().add(Cookie::new("csrftoken", "kept"));
    let resp = issue(State(state), jar).await;
    assert!(resp.headers().get(SET_COOKIE).is_none());

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["csrf_token"], "kept");
}

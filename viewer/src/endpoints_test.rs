use super::*;

#[test]
fn detail_url_appends_id_segment() {
    let id = AnnotationId::from(42);
    assert_eq!(detail_url("/api/documents/7/annotations/", &id), "/api/documents/7/annotations/42/");
    assert_eq!(detail_url("/api/documents/7/annotations", &id), "/api/documents/7/annotations/42/");
}

#[test]
fn detail_url_keeps_string_ids() {
    let id = AnnotationId::from("a1b2");
    assert_eq!(detail_url("https://host/annotations//", &id), "https://host/annotations/a1b2/");
}

#[test]
fn csrf_token_found_among_other_cookies() {
    let cookies = "sessionid=abc; csrftoken=T0k3n; theme=dark";
    assert_eq!(csrf_token(cookies, "csrftoken").as_deref(), Some("T0k3n"));
    assert_eq!(csrf_token(cookies, "theme").as_deref(), Some("dark"));
}

#[test]
fn csrf_token_needs_exact_name() {
    assert_eq!(csrf_token("xcsrftoken=nope", "csrftoken"), None);
    assert_eq!(csrf_token("", "csrftoken"), None);
    assert_eq!(csrf_token("csrftoken=", "csrftoken"), None);
}

#[test]
fn csrf_token_value_may_contain_equals() {
    assert_eq!(csrf_token("csrftoken=a=b", "csrftoken").as_deref(), Some("a=b"));
}

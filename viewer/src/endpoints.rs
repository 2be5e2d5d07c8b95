//! URL and cookie helpers for the annotation endpoints.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

use annotations::model::AnnotationId;

/// Detail endpoint of one annotation: the collection URL with the id as a
/// trailing segment, slash-terminated.
#[must_use]
pub fn detail_url(collection_url: &str, id: &AnnotationId) -> String {
    format!("{}/{id}/", collection_url.trim_end_matches('/'))
}

/// Value of cookie `name` in a `document.cookie` string.
#[must_use]
pub fn csrf_token(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

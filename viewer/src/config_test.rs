use super::*;

#[test]
fn minimal_config_gets_defaults() {
    let config = ViewerConfig::from_json(r#"{"pdf_url": "/media/paper.pdf"}"#).unwrap();
    assert_eq!(config.pdf_url, "/media/paper.pdf");
    assert_eq!(config.worker_src, None);
    assert!(!config.annotations_enabled());
    assert_eq!(config.csrf_cookie, "csrftoken");
    assert_eq!(config.csrf_header, "X-CSRFToken");
    assert_eq!(config.default_color, "#ffeb3b");
    assert_eq!(config.ids, ElementIds::default());
    assert_eq!(config.ids.canvas, "pdf-canvas");
    assert_eq!(config.ids.list, "annotation-list");
}

#[test]
fn camel_case_keys_are_accepted() {
    let config = ViewerConfig::from_json(
        r#"{"pdfUrl": "/a.pdf", "workerSrc": "/static/pdf.worker.js", "annotationsUrl": "/api/documents/3/annotations/"}"#,
    )
    .unwrap();
    assert_eq!(config.worker_src.as_deref(), Some("/static/pdf.worker.js"));
    assert_eq!(config.annotations_url.as_deref(), Some("/api/documents/3/annotations/"));
    assert!(config.annotations_enabled());
}

#[test]
fn partial_ids_keep_other_defaults() {
    let config = ViewerConfig::from_json(r#"{"pdf_url": "/a.pdf", "ids": {"canvas": "viewer-canvas"}}"#).unwrap();
    assert_eq!(config.ids.canvas, "viewer-canvas");
    assert_eq!(config.ids.prev, "pdf-prev");
}

#[test]
fn blank_optionals_are_dropped() {
    let config =
        ViewerConfig::from_json(r#"{"pdf_url": "/a.pdf", "annotations_url": " ", "worker_src": "", "default_color": ""}"#)
            .unwrap();
    assert!(!config.annotations_enabled());
    assert_eq!(config.worker_src, None);
    assert_eq!(config.default_color, "#ffeb3b");
}

#[test]
fn blank_pdf_url_is_rejected() {
    let err = ViewerConfig::from_json(r#"{"pdf_url": "  "}"#).unwrap_err();
    assert!(matches!(err, ConfigError::MissingPdfUrl));
}

#[test]
fn missing_pdf_url_is_a_parse_error() {
    let err = ViewerConfig::from_json(r#"{"worker_src": "/w.js"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("invalid viewer config"));
}

//! Viewer configuration passed in by the host page.
//!
//! The host renders a JSON object into the page and hands it to
//! `mountPdfViewer`. Only `pdf_url` is required; the element ids default to
//! the markup of the publication detail template.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use annotations::model::DEFAULT_COLOR;
use serde::Deserialize;

/// Why a configuration object was refused.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid viewer config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pdf_url must not be empty")]
    MissingPdfUrl,
}

/// Everything `mount` needs to know about the host page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ViewerConfig {
    #[serde(alias = "pdfUrl")]
    pub pdf_url: String,
    /// Script URL for `pdfjsLib.GlobalWorkerOptions.workerSrc`.
    #[serde(default, alias = "workerSrc")]
    pub worker_src: Option<String>,
    /// Collection endpoint of the document's annotations. Without it the
    /// plain viewer runs.
    #[serde(default, alias = "annotationsUrl")]
    pub annotations_url: Option<String>,
    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,
    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,
    /// Preset for the color picker when the markup leaves it blank.
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default)]
    pub ids: ElementIds,
}

fn default_csrf_cookie() -> String {
    "csrftoken".to_owned()
}

fn default_csrf_header() -> String {
    "X-CSRFToken".to_owned()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_owned()
}

impl ViewerConfig {
    /// Parse and normalize the host's JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON or a blank `pdf_url`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        if config.pdf_url.trim().is_empty() {
            return Err(ConfigError::MissingPdfUrl);
        }
        config.worker_src = config.worker_src.filter(|s| !s.trim().is_empty());
        config.annotations_url = config.annotations_url.filter(|s| !s.trim().is_empty());
        if config.default_color.trim().is_empty() {
            config.default_color = default_color();
        }
        Ok(config)
    }

    #[must_use]
    pub fn annotations_enabled(&self) -> bool {
        self.annotations_url.is_some()
    }
}

/// DOM ids of the elements the viewer attaches to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub canvas: String,
    pub page_info: String,
    pub prev: String,
    pub next: String,
    pub error: String,
    pub panel: String,
    pub comment: String,
    pub color: String,
    pub save: String,
    pub hint: String,
    pub list: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "pdf-canvas".to_owned(),
            page_info: "pdf-page-info".to_owned(),
            prev: "pdf-prev".to_owned(),
            next: "pdf-next".to_owned(),
            error: "pdf-error".to_owned(),
            panel: "annotation-panel".to_owned(),
            comment: "annotation-comment".to_owned(),
            color: "annotation-color".to_owned(),
            save: "annotation-save".to_owned(),
            hint: "annotation-hint".to_owned(),
            list: "annotation-list".to_owned(),
        }
    }
}

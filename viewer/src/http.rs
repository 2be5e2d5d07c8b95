//! Annotation gateway over `fetch`, via `gloo-net`.
//!
//! Mutating requests carry the CSRF token from the page's cookie jar in the
//! configured header. A missing cookie sends the request without a token and
//! leaves the rejection to the backend.

use annotations::gateway::{AnnotationGateway, GatewayError};
use annotations::model::{Annotation, AnnotationDraft, AnnotationId, AnnotationPatch};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;

use crate::endpoints::{csrf_token, detail_url};

/// Talks to one document's annotation collection.
pub struct HttpGateway {
    collection_url: String,
    csrf_cookie: String,
    csrf_header: String,
}

impl HttpGateway {
    #[must_use]
    pub fn new(collection_url: &str, csrf_cookie: &str, csrf_header: &str) -> Self {
        Self {
            collection_url: collection_url.to_owned(),
            csrf_cookie: csrf_cookie.to_owned(),
            csrf_header: csrf_header.to_owned(),
        }
    }

    fn csrf(&self) -> Option<String> {
        let document = web_sys::window()?.document()?;
        let cookies = document.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()?;
        csrf_token(&cookies, &self.csrf_cookie)
    }

    fn with_csrf(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.csrf() {
            Some(token) => builder.header(&self.csrf_header, &token),
            None => {
                log::debug!("no {} cookie; sending without CSRF token", self.csrf_cookie);
                builder
            }
        }
    }
}

fn network(e: gloo_net::Error) -> GatewayError {
    GatewayError::Network(e.to_string())
}

fn check(resp: &Response) -> Result<(), GatewayError> {
    if resp.ok() { Ok(()) } else { Err(GatewayError::Status(resp.status())) }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, GatewayError> {
    check(&resp)?;
    resp.json::<T>().await.map_err(|e| GatewayError::Decode(e.to_string()))
}

impl AnnotationGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<Annotation>, GatewayError> {
        let resp = Request::get(&self.collection_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(network)?;
        decode(resp).await
    }

    async fn create(&self, draft: &AnnotationDraft) -> Result<Annotation, GatewayError> {
        let resp = self
            .with_csrf(Request::post(&self.collection_url))
            .json(draft)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        decode(resp).await
    }

    async fn update(&self, id: &AnnotationId, patch: &AnnotationPatch) -> Result<Annotation, GatewayError> {
        let url = detail_url(&self.collection_url, id);
        let resp = self
            .with_csrf(Request::patch(&url))
            .json(patch)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        decode(resp).await
    }

    async fn delete(&self, id: &AnnotationId) -> Result<(), GatewayError> {
        let url = detail_url(&self.collection_url, id);
        let resp = self.with_csrf(Request::delete(&url)).send().await.map_err(network)?;
        check(&resp)
    }
}

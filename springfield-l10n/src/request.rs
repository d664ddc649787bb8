//! Request data the locale decision depends on

use http::header::ACCEPT_LANGUAGE;
use http::{Method, Request};

/// The parts of a request that influence locale resolution.
///
/// `method` is carried for logging only; it never changes a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFingerprint {
    pub raw_path: String,
    pub query: Option<String>,
    pub accept_language_header: Option<String>,
    pub method: Method,
}

impl RequestFingerprint {
    /// A GET for `raw_path` with no Accept-Language header
    pub fn get(raw_path: impl Into<String>) -> Self {
        Self {
            raw_path: raw_path.into(),
            query: None,
            accept_language_header: None,
            method: Method::GET,
        }
    }

    pub fn with_accept_language(mut self, header: impl Into<String>) -> Self {
        self.accept_language_header = Some(header.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn from_request<B>(request: &Request<B>) -> Self {
        let uri = request.uri();
        Self {
            raw_path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            accept_language_header: request
                .headers()
                .get(ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            method: request.method().clone(),
        }
    }

    /// Header value, empty when absent
    pub fn accept_language(&self) -> &str {
        self.accept_language_header.as_deref().unwrap_or_default()
    }
}

//! HTTP caching middleware for ETag and Cache-Control headers.
//!
//! This module provides middleware for HTTP-level caching using:
//! - `Cache-Control` headers for controlling client/proxy caching
//! - `ETag` headers for conditional requests (If-None-Match)
//!
//! # Example
//!
//! ```ignore
//! use timetable_cache::middleware::{cache_control, etag_middleware, CacheControlConfig};
//! use axum::Router;
//!
//! let app = Router::new()
//!     .route("/api/groups", get(handler))
//!     .layer(cache_control(CacheControlConfig::public(300)))
//!     .layer(axum::middleware::from_fn(etag_middleware));
//! ```

use axum::{
    body::Body,
    extract::Request,
    http::{
        HeaderValue, Method, StatusCode,
        header::{CACHE_CONTROL, ETAG, IF_NONE_MATCH},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use sha2::{Digest, Sha256};
use tower_http::set_header::SetResponseHeaderLayer;

/// Configuration for Cache-Control header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheControlConfig {
    /// Whether the response can be cached by any cache (public) or only by browser (private).
    pub public: bool,
    /// Maximum age in seconds the response is considered fresh.
    pub max_age: u64,
    /// Whether the response should not be cached at all.
    pub no_cache: bool,
    /// Stale-while-revalidate directive.
    pub stale_while_revalidate: Option<u64>,
}

impl CacheControlConfig {
    /// Create a public cache configuration.
    pub fn public(max_age: u64) -> Self {
        Self {
            public: true,
            max_age,
            no_cache: false,
            stale_while_revalidate: None,
        }
    }

    /// Create a no-cache configuration (always revalidate).
    pub fn no_cache() -> Self {
        Self {
            public: false,
            max_age: 0,
            no_cache: true,
            stale_while_revalidate: None,
        }
    }

    /// Set stale-while-revalidate directive.
    pub fn with_stale_while_revalidate(mut self, seconds: u64) -> Self {
        self.stale_while_revalidate = Some(seconds);
        self
    }

    /// Build the Cache-Control header value.
    pub fn to_header_value(&self) -> HeaderValue {
        if self.no_cache {
            return HeaderValue::from_static("no-cache, must-revalidate");
        }

        let mut directives = vec![
            if self.public { "public" } else { "private" }.to_string(),
            format!("max-age={}", self.max_age),
        ];

        if let Some(swr) = self.stale_while_revalidate {
            directives.push(format!("stale-while-revalidate={}", swr));
        }

        HeaderValue::from_str(&directives.join(", "))
            .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
    }
}

impl Default for CacheControlConfig {
    fn default() -> Self {
        Self::no_cache()
    }
}

/// Helper struct to generate Cache-Control header values.
#[derive(Clone)]
pub struct CacheControlMakeHeader(HeaderValue);

impl<B> tower_http::set_header::MakeHeaderValue<Response<B>> for CacheControlMakeHeader {
    fn make_header_value(&mut self, message: &Response<B>) -> Option<HeaderValue> {
        // Errors must not be cached by clients or proxies.
        if message.status().is_success() || message.status() == StatusCode::NOT_MODIFIED {
            Some(self.0.clone())
        } else {
            Some(HeaderValue::from_static("no-store"))
        }
    }
}

/// Create a Cache-Control layer with the given configuration.
pub fn cache_control(config: CacheControlConfig) -> SetResponseHeaderLayer<CacheControlMakeHeader> {
    let header_value = config.to_header_value();
    SetResponseHeaderLayer::if_not_present(CACHE_CONTROL, CacheControlMakeHeader(header_value))
}

/// Generate an ETag from response body bytes.
fn generate_etag(body: &[u8]) -> String {
    let hash = Sha256::digest(body);
    format!("\"{}\"", hex::encode(&hash[..16]))
}

/// Weak ETag comparison (ignores the W/ prefix).
fn etags_match(client_etag: &str, server_etag: &str) -> bool {
    let client = client_etag.trim().trim_start_matches("W/");
    let server = server_etag.trim().trim_start_matches("W/");
    client == "*" || client == server
}

/// ETag middleware for conditional GET requests.
///
/// 1. Generates an ETag from the hash of a successful GET response body
/// 2. Compares it with the client's `If-None-Match` header (comma-separated list allowed)
/// 3. Returns 304 Not Modified when they match
///
/// The whole response body is buffered; schedule responses are small enough
/// for that to be fine.
pub async fn etag_middleware(request: Request, next: Next) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let if_none_match = request
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(request).await;

    if !response.status().is_success() {
        return response;
    }

    let (parts, body) = response.into_parts();

    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => return (parts, Body::empty()).into_response(),
    };

    let etag = generate_etag(&bytes);

    if let Some(client_etag) = if_none_match {
        let matches = client_etag
            .split(',')
            .any(|tag| etags_match(tag, &etag));

        if matches {
            let mut not_modified = StatusCode::NOT_MODIFIED.into_response();
            if let Ok(etag_value) = HeaderValue::from_str(&etag) {
                not_modified.headers_mut().insert(ETAG, etag_value);
            }
            return not_modified;
        }
    }

    let mut response = Response::from_parts(parts, Body::from(bytes));
    if let Ok(etag_value) = HeaderValue::from_str(&etag) {
        response.headers_mut().insert(ETAG, etag_value);
    }

    response
}

//! Cross-origin access for the browser forms.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::config::CorsConfig;

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, X-CSRFToken";

/// Which origins may call the gateway from a browser.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    origins: Vec<String>,
    any_origin: bool,
    supports_credentials: bool,
}

impl CorsPolicy {
    pub fn new(config: &CorsConfig) -> Self {
        let origins: Vec<String> = config
            .origins
            .iter()
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        Self {
            any_origin: origins.iter().any(|origin| origin == "*"),
            origins,
            supports_credentials: config.supports_credentials,
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.any_origin || self.origins.iter().any(|allowed| allowed == origin)
    }

    /// Value for `Access-Control-Allow-Origin`, or `None` for a foreign origin.
    ///
    /// A wildcard policy still echoes the origin when credentials are
    /// allowed, since browsers refuse `*` on credentialed requests.
    fn allow_origin(&self, origin: &HeaderValue) -> Option<HeaderValue> {
        let origin_str = origin.to_str().ok()?;
        if !self.allows(origin_str) {
            return None;
        }
        if self.any_origin && !self.supports_credentials {
            Some(HeaderValue::from_static("*"))
        } else {
            Some(origin.clone())
        }
    }

    fn apply(&self, allow_origin: HeaderValue, headers: &mut HeaderMap) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
        if self.supports_credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
    }
}

/// Middleware applying the policy: answers preflights with `204` and adds
/// the allow headers to responses for permitted origins.
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(header::ORIGIN).cloned();
    let allow_origin = origin.as_ref().and_then(|o| policy.allow_origin(o));

    let is_preflight = request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

    if is_preflight {
        let mut response = StatusCode::NO_CONTENT.into_response();
        match allow_origin {
            Some(allow_origin) => {
                let headers = response.headers_mut();
                policy.apply(allow_origin, headers);
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(ALLOWED_METHODS),
                );
                let requested = request
                    .headers()
                    .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
                    .cloned()
                    .unwrap_or_else(|| HeaderValue::from_static(ALLOWED_HEADERS));
                headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested);
            }
            None => {
                tracing::warn!(origin = ?origin, "rejected CORS preflight");
            }
        }
        return response;
    }

    let mut response = next.run(request).await;
    if let Some(allow_origin) = allow_origin {
        policy.apply(allow_origin, response.headers_mut());
    }
    response
}

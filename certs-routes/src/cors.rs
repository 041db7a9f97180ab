use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::http::{HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

pub const ALLOW_ANY_ORIGIN: &str = "*";
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

#[derive(Debug, thiserror::Error)]
#[error("'{0}' is not a valid Access-Control-Allow-Origin value")]
pub struct InvalidOrigin(String);

/// The cross-origin headers attached to every response this service produces.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsPolicy {
    /// Any web origin may call the service.
    pub fn permissive() -> Self {
        Self {
            allow_origin: HeaderValue::from_static(ALLOW_ANY_ORIGIN),
            allow_headers: HeaderValue::from_static(ALLOWED_HEADERS),
        }
    }

    pub fn with_origin(origin: &str) -> Result<Self, InvalidOrigin> {
        let allow_origin =
            HeaderValue::from_str(origin).map_err(|_| InvalidOrigin(origin.to_string()))?;

        Ok(Self {
            allow_origin,
            ..Self::permissive()
        })
    }

    fn apply(&self, response: &mut Response) {
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Answers every preflight with an empty body and stamps the policy's headers onto every
/// other response, whatever its status.
pub async fn handle_cors(State(policy): State<CorsPolicy>, req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        debug!("answering preflight for {}", req.uri().path());
        Response::new(Body::empty())
    } else {
        next.run(req).await
    };

    policy.apply(&mut response);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_policy_allows_any_origin() {
        let mut response = Response::new(Body::empty());
        CorsPolicy::permissive().apply(&mut response);

        assert_eq!("*", response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN]);
        assert_eq!(ALLOWED_HEADERS, response.headers()[ACCESS_CONTROL_ALLOW_HEADERS]);
    }

    #[test]
    fn restricted_origin_keeps_allowed_headers() {
        let mut response = Response::new(Body::empty());
        CorsPolicy::with_origin("https://verify.example.com")
            .expect("valid origin")
            .apply(&mut response);

        assert_eq!(
            "https://verify.example.com",
            response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN]
        );
        assert_eq!(ALLOWED_HEADERS, response.headers()[ACCESS_CONTROL_ALLOW_HEADERS]);
    }

    #[test]
    fn origin_with_newline_is_invalid() {
        assert!(CorsPolicy::with_origin("https://a.example\n").is_err());
    }
}

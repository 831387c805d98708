// ABOUTME: Shared-secret authentication middleware for the base64-gate API.
// ABOUTME: Compares the x_api_key header to the configured secret and short-circuits with 401 on mismatch.

use axum::body::Body;
use axum::http::{HeaderMap, Request, Response};
use axum::response::IntoResponse;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::api::error::{ApiError, INVALID_API_KEY, MISSING_API_KEY};

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x_api_key";

/// Decide whether a request may proceed.
///
/// Three outcomes: no header, a header that differs from the secret, or a
/// single value matching byte-for-byte. Repeated headers never match, and
/// with no secret configured nothing matches.
pub fn authorize(expected: Option<&str>, headers: &HeaderMap) -> Result<(), ApiError> {
    let mut values = headers.get_all(API_KEY_HEADER).iter();

    match (values.next(), values.next(), expected) {
        (None, _, _) => Err(ApiError::Unauthorized(MISSING_API_KEY.to_string())),
        (Some(value), None, Some(secret)) if value.as_bytes() == secret.as_bytes() => Ok(()),
        _ => Err(ApiError::Unauthorized(INVALID_API_KEY.to_string())),
    }
}

/// A tower Layer that applies API key authentication to the routes it wraps.
#[derive(Clone)]
pub struct AuthLayer {
    api_key: Arc<Option<String>>,
}

impl AuthLayer {
    /// Create a new AuthLayer with the expected secret. `None` rejects every request.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: Arc::new(api_key),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            api_key: Arc::clone(&self.api_key),
        }
    }
}

/// The middleware service that checks the API key before forwarding.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    api_key: Arc<Option<String>>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        match authorize(self.api_key.as_deref(), req.headers()) {
            Ok(()) => {
                // Call the service that was polled ready and leave a fresh clone behind.
                let clone = self.inner.clone();
                let mut inner = std::mem::replace(&mut self.inner, clone);
                Box::pin(async move { inner.call(req).await })
            }
            Err(err) => {
                tracing::debug!(path = %req.uri().path(), "rejected unauthenticated request");
                Box::pin(async move { Ok(err.into_response()) })
            }
        }
    }
}

use axum::http::{HeaderName, HeaderValue, Request, Response};
use std::{
    env,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};

const BASE_HEADERS: [(&str, &str); 5] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none'"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("permissions-policy", "geolocation=(), microphone=(), camera=()"),
];

const HSTS: (&str, &str) = ("strict-transport-security", "max-age=31536000; includeSubDomains");

type HeaderSet = Arc<Vec<(HeaderName, HeaderValue)>>;

/// Stamps a fixed set of hardening headers onto every response.
#[derive(Clone)]
pub struct SecurityHeadersLayer {
    headers: HeaderSet,
}

impl SecurityHeadersLayer {
    pub fn new(include_hsts: bool) -> Self {
        let mut headers: Vec<(HeaderName, HeaderValue)> = BASE_HEADERS
            .iter()
            .map(|&(name, value)| {
                (
                    HeaderName::from_static(name),
                    HeaderValue::from_static(value),
                )
            })
            .collect();

        if include_hsts {
            headers.push((HeaderName::from_static(HSTS.0), HeaderValue::from_static(HSTS.1)));
        }

        Self {
            headers: Arc::new(headers),
        }
    }

    pub fn from_env() -> Self {
        let is_production = env::var("RUST_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        tracing::info!(hsts = is_production, "Security headers configured");
        Self::new(is_production)
    }

    #[cfg(test)]
    fn has_hsts(&self) -> bool {
        self.headers.iter().any(|(name, _)| name.as_str() == HSTS.0)
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersService {
            inner,
            headers: self.headers.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SecurityHeadersService<S> {
    inner: S,
    headers: HeaderSet,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SecurityHeadersService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = SecurityHeadersFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        SecurityHeadersFuture {
            future: self.inner.call(request),
            headers: self.headers.clone(),
        }
    }
}

#[pin_project::pin_project]
pub struct SecurityHeadersFuture<F> {
    #[pin]
    future: F,
    headers: HeaderSet,
}

impl<F, ResBody, E> std::future::Future for SecurityHeadersFuture<F>
where
    F: std::future::Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: std::pin::Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        let mut response = match this.future.poll(cx) {
            Poll::Ready(Ok(response)) => response,
            Poll::Ready(Err(e)) => return Poll::Ready(Err(e)),
            Poll::Pending => return Poll::Pending,
        };

        let target = response.headers_mut();
        for (name, value) in this.headers.iter() {
            target.insert(name.clone(), value.clone());
        }

        Poll::Ready(Ok(response))
    }
}

pub fn create_security_headers_layer() -> SecurityHeadersLayer {
    SecurityHeadersLayer::from_env()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsts_only_when_requested() {
        assert!(!SecurityHeadersLayer::new(false).has_hsts());
        assert!(SecurityHeadersLayer::new(true).has_hsts());
        assert_eq!(SecurityHeadersLayer::new(false).headers.len(), BASE_HEADERS.len());
    }
}

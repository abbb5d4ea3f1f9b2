//! Exchange logging.
//!
//! One span per exchange, named after the method and target, with a summary
//! of what the builder produced (query pairs, content type, body size) and
//! an outcome event classified by status class or [`ErrorKind`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{Error, ErrorKind, Method, Request, Response, Result};

/// Failure bodies longer than this are cut in detailed logs.
const BODY_SNIPPET_LIMIT: usize = 256;

/// How much of each exchange gets logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Detail {
    /// Request summary and outcome, at info level.
    #[default]
    Summary,
    /// Also headers and the start of failure bodies, at debug level.
    Full,
}

/// Layer logging every exchange that goes through the client.
///
/// # Example
///
/// ```ignore
/// use slingshot::HyperClient;
/// use slingshot::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    detail: Detail,
}

impl LoggingLayer {
    /// Log summaries only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log headers and failure bodies as well.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            detail: Detail::Full,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logged<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logged {
            inner,
            detail: self.detail,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logged<S> {
    inner: S,
    detail: Detail,
}

/// What gets recorded about a request before it leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Exchange {
    method: Method,
    target: String,
    query_pairs: usize,
    content_type: Option<String>,
    body_len: usize,
}

impl Exchange {
    fn of(request: &Request<Bytes>) -> Self {
        let url = request.url();
        let target = match url.host_str() {
            Some(host) => format!("{host}{}", url.path()),
            None => url.path().to_string(),
        };

        Self {
            method: request.method(),
            target,
            query_pairs: url.query_pairs().count(),
            content_type: request.header("content-type").map(str::to_string),
            body_len: request.body().map_or(0, Bytes::len),
        }
    }

    fn started(&self) {
        info!(
            query_pairs = self.query_pairs,
            content_type = self.content_type.as_deref(),
            body_len = self.body_len,
            "sending"
        );
    }

    fn finished(&self, result: &Result<Response<Bytes>>, detail: Detail, elapsed_ms: u64) {
        match result {
            Ok(response) if response.is_success() => {
                info!(status = response.status(), elapsed_ms, "exchange succeeded");
            }
            Ok(response) => {
                let class = if response.is_server_error() {
                    "server error"
                } else if response.is_client_error() {
                    "client error"
                } else {
                    "unexpected status"
                };
                warn!(status = response.status(), class, elapsed_ms, "exchange answered with failure");
                if detail == Detail::Full {
                    debug!(body = %snippet(response.body()), "failure body");
                }
            }
            Err(err) => {
                let kind: ErrorKind = err.kind();
                warn!(%kind, error = %err, elapsed_ms, "exchange did not complete");
            }
        }
    }
}

/// Lossy text of at most [`BODY_SNIPPET_LIMIT`] bytes of `body`.
fn snippet(body: &Bytes) -> String {
    let cut = body.len().min(BODY_SNIPPET_LIMIT);
    let mut text = String::from_utf8_lossy(&body[..cut]).into_owned();
    if cut < body.len() {
        text.push_str("...");
    }
    text
}

impl<S> Service<Request<Bytes>> for Logged<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let exchange = Exchange::of(&request);
        let span = info_span!("exchange", method = %exchange.method, target = %exchange.target);
        let detail = self.detail;

        if detail == Detail::Full {
            span.in_scope(|| debug!(headers = ?request.headers(), "request headers"));
        }

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                exchange.started();
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                exchange.finished(&result, detail, elapsed_ms);
                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use http::{HeaderMap, HeaderValue};
    use tower::ServiceExt;
    use url::Url;

    use super::*;

    #[derive(Clone)]
    struct Status(u16);

    impl Service<Request<Bytes>> for Status {
        type Response = Response<Bytes>;
        type Error = Error;
        type Future = std::future::Ready<Result<Response<Bytes>>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _request: Request<Bytes>) -> Self::Future {
            std::future::ready(Ok(Response::new(
                self.0,
                HeaderMap::new(),
                Bytes::from_static(br#"{"msg":"nope"}"#),
            )))
        }
    }

    fn form_post() -> Request<Bytes> {
        let url = Url::parse("http://localhost/items?a=1&b=2&b=3").expect("url");
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        Request::from_parts(Method::Post, url, headers, Some(Bytes::from_static(b"c=4")))
    }

    #[test]
    fn exchange_summarizes_request() {
        let exchange = Exchange::of(&form_post());

        assert_eq!(exchange.method, Method::Post);
        assert_eq!(exchange.target, "localhost/items");
        assert_eq!(exchange.query_pairs, 3);
        assert_eq!(
            exchange.content_type.as_deref(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(exchange.body_len, 3);
    }

    #[test]
    fn snippet_cuts_long_bodies() {
        assert_eq!(snippet(&Bytes::from_static(b"short")), "short");

        let long = Bytes::from(vec![b'x'; BODY_SNIPPET_LIMIT + 10]);
        let text = snippet(&long);
        assert_eq!(text.len(), BODY_SNIPPET_LIMIT + 3);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn layer_detail() {
        assert_eq!(LoggingLayer::new().detail, Detail::Summary);
        assert_eq!(LoggingLayer::debug().detail, Detail::Full);
    }

    #[tokio::test]
    async fn failure_response_passes_through() {
        let service = LoggingLayer::debug().layer(Status(503));
        let response = service.oneshot(form_post()).await.expect("response");
        assert_eq!(response.status(), 503);
        assert_eq!(response.body().as_ref(), br#"{"msg":"nope"}"#);
    }
}

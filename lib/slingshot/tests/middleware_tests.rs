//! Integration tests for middleware functionality.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use bytes::Bytes;
use slingshot::middleware::{Layer, LoggingLayer};
use slingshot::tower::Service;
use slingshot::{BoxedService, Error, HyperClient, Request, Response, ServiceFuture};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

/// Test that logging middleware doesn't break request/response flow.
#[tokio::test]
async fn test_logging_middleware() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"logged": true})))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_logging().build();

    let logged: serde_json::Value = slingshot::with_client(client)
        .base(format!("{}/logged", mock_server.uri()))
        .receive()
        .await
        .expect("response");

    assert_eq!(logged, serde_json::json!({"logged": true}));
}

/// Test debug logging level.
#[tokio::test]
async fn test_debug_logging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/debug"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_debug_logging().build();

    let err = slingshot::with_client(client)
        .base(format!("{}/", mock_server.uri()))
        .post("debug")
        .param("a", 1_i32)
        .send()
        .await
        .expect_err("500");

    assert!(err.is_server_error());
}

/// Layer adding a header and counting calls.
#[derive(Clone, Default)]
struct Stamp {
    calls: Arc<AtomicUsize>,
}

impl Layer<BoxedService> for Stamp {
    type Service = Stamped;

    fn layer(&self, inner: BoxedService) -> Self::Service {
        Stamped {
            inner,
            calls: Arc::clone(&self.calls),
        }
    }
}

#[derive(Clone)]
struct Stamped {
    inner: BoxedService,
    calls: Arc<AtomicUsize>,
}

impl Service<Request<Bytes>> for Stamped {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (method, url, mut headers, body) = request.into_parts();
        headers.insert("x-stamp", http::HeaderValue::from_static("yes"));
        let mut inner = self.inner.clone();
        Box::pin(async move {
            inner
                .call(Request::from_parts(method, url, headers, body))
                .await
        })
    }
}

/// Test generic layer API with custom middleware.
#[tokio::test]
async fn test_generic_layer_api() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/custom-layer"))
        .and(header("x-stamp", "yes"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let stamp = Stamp::default();
    let client = HyperClient::builder()
        .layer(stamp.clone())
        .layer(LoggingLayer::new())
        .build();

    let api = slingshot::with_client(client).base(format!("{}/", mock_server.uri()));
    api.clone().get("custom-layer").send().await.expect("first");
    api.get("custom-layer").send().await.expect("second");

    assert_eq!(stamp.calls.load(Ordering::SeqCst), 2);
}

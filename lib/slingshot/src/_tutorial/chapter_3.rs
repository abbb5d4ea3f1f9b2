//! # Chapter 3: Executors & Middleware
//!
//! ## Configuring the Default Client
//!
//! ```ignore
//! use slingshot::HyperClient;
//! use std::time::Duration;
//!
//! let client = HyperClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .connect_timeout(Duration::from_secs(2))
//!     .with_logging()
//!     .build();
//!
//! let api = slingshot::with_client(client).base("https://api.example.com/");
//! ```
//!
//! ## Tower Layers
//!
//! Any `tower::Layer` over [`BoxedService`](crate::BoxedService) can wrap
//! the client:
//!
//! ```ignore
//! use slingshot::middleware::LoggingLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```
//!
//! Logs go through `tracing`; install a subscriber to see them.
//!
//! ## Custom Executors
//!
//! Implement [`HttpClient`](crate::HttpClient) to send requests another way,
//! or to test without a network:
//!
//! ```ignore
//! use bytes::Bytes;
//! use slingshot::{HttpClient, Request, Response, Result};
//!
//! struct Canned(&'static str);
//!
//! impl HttpClient for Canned {
//!     async fn execute(&self, _request: Request) -> Result<Response> {
//!         Ok(Response::new(200, Default::default(), Bytes::from_static(self.0.as_bytes())))
//!     }
//! }
//!
//! let id: serde_json::Value = slingshot::with_client(Canned(r#"{"id":5}"#))
//!     .base("http://test/")
//!     .receive()
//!     .await?;
//! ```
//!
//! `client()` swaps the executor of an existing builder.

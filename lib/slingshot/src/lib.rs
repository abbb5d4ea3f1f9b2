//! Fluent HTTP request builder for REST APIs.
//!
//! Configure a [`RequestBuilder`] once (base URL, headers, shared
//! parameters), clone it per endpoint, and send.
//!
//! # Example
//!
//! ```ignore
//! use slingshot::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Issue {
//!     id: u64,
//!     title: String,
//! }
//!
//! #[derive(Params)]
//! pub struct IssueFilter {
//!     state: &'static str,
//!     #[params(format = "csv")]
//!     labels: Vec<String>,
//! }
//!
//! let github = slingshot::new()
//!     .base("https://api.github.com/")
//!     .set("Accept", "application/vnd.github+json");
//!
//! let filter = IssueFilter { state: "open", labels: vec!["bug".into()] };
//! let issues: Vec<Issue> = github.clone()
//!     .get("repos/rust-lang/rust/issues")
//!     .params(filter)
//!     .receive()
//!     .await?;
//! ```
//!
//! See the [tutorial][_tutorial] for a complete guide.

pub mod _tutorial;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;

// Re-export client types
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use slingshot_core::{
    ContentType, Error, ErrorKind, HttpClient, Method, Mode, ParamMap, ParamSource, ParamValue,
    Request, RequestBuilder, Response, Result, ScalarKind, ToParamValue, ToParams, encode_form,
    encode_json, form_pairs, from_json, merge, to_form, to_json,
};

// Re-export http types for status codes and headers
pub use slingshot_core::{StatusCode, header};

pub use url;

// Re-export macros
pub use slingshot_macro::Params;

/// A new builder sending through a default [`HyperClient`].
///
/// Each call creates its own connection pool; to share one, build the
/// parent once and clone it.
#[must_use]
pub fn new() -> RequestBuilder<HyperClient> {
    with_client(HyperClient::new())
}

/// A new builder sending through `client`.
///
/// Any [`HttpClient`] works, including test doubles.
#[must_use]
pub fn with_client<C: HttpClient>(client: C) -> RequestBuilder<C> {
    RequestBuilder::new(client)
}

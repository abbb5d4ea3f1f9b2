//! Fluent request builder.
//!
//! [`RequestBuilder`] accumulates a method, a URL, headers and parameter
//! sources, then produces an immutable [`Request`] with [`build`] or sends it
//! through its [`HttpClient`] with [`send`] / [`receive`].
//!
//! Builders are cheap to clone: the executor is shared, headers and the
//! parameter list are copied. A common pattern is one configured parent and a
//! clone per endpoint:
//!
//! ```
//! # use slingshot_core::{HttpClient, Request, Response, RequestBuilder, Result};
//! # struct Noop;
//! # impl HttpClient for Noop {
//! #     async fn execute(&self, _: Request) -> Result<Response> { unreachable!() }
//! # }
//! let api = RequestBuilder::new(Noop)
//!     .base("https://api.example.com/v1/")
//!     .set("Accept", "application/json");
//!
//! let users = api.clone().get("users").param("page", 2_u32).build().expect("build");
//! let repos = api.clone().get("repos").build().expect("build");
//!
//! assert_eq!(users.url().as_str(), "https://api.example.com/v1/users?page=2");
//! assert_eq!(repos.url().as_str(), "https://api.example.com/v1/repos");
//! ```
//!
//! [`build`]: RequestBuilder::build
//! [`send`]: RequestBuilder::send
//! [`receive`]: RequestBuilder::receive

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use crate::body::append_query;
use crate::{
    ContentType, Error, HttpClient, Method, Mode, ParamSource, Request, Response, Result,
    ToParamValue, ToParams, encode_form, encode_json, merge,
};

/// Builder accumulating the description of one HTTP request.
///
/// Every configuration method takes the builder by value and returns it, so
/// calls chain. Configuration never fails: invalid headers or bodies are
/// recorded and reported by [`build`](Self::build).
pub struct RequestBuilder<C> {
    client: Arc<C>,
    method: Method,
    raw_url: String,
    headers: HeaderMap,
    sources: Vec<ParamSource>,
    mode: Mode,
    body: Option<Bytes>,
    invalid: Option<String>,
}

impl<C> Clone for RequestBuilder<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            method: self.method,
            raw_url: self.raw_url.clone(),
            headers: self.headers.clone(),
            sources: self.sources.clone(),
            mode: self.mode,
            body: self.body.clone(),
            invalid: self.invalid.clone(),
        }
    }
}

impl<C> fmt::Debug for RequestBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("url", &self.raw_url)
            .field("headers", &self.headers)
            .field("sources", &self.sources)
            .field("mode", &self.mode)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .finish_non_exhaustive()
    }
}

impl<C> RequestBuilder<C> {
    /// Creates a builder sending through `client`.
    ///
    /// The method defaults to `GET`, the mode to [`Mode::Form`], and the URL is empty.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_shared_client(Arc::new(client))
    }

    /// Creates a builder sending through an already shared client.
    #[must_use]
    pub fn with_shared_client(client: Arc<C>) -> Self {
        Self {
            client,
            method: Method::default(),
            raw_url: String::new(),
            headers: HeaderMap::new(),
            sources: Vec::new(),
            mode: Mode::default(),
            body: None,
            invalid: None,
        }
    }

    /// A child builder inheriting this builder's configuration.
    ///
    /// Same as [`Clone::clone`]: the executor is shared, headers and parameter
    /// sources are copied. Structured sources are shared through an `Arc`.
    #[must_use]
    pub fn new_child(&self) -> Self {
        self.clone()
    }

    /// Replace the executor, keeping the rest of the configuration.
    #[must_use]
    pub fn client<C2>(self, client: C2) -> RequestBuilder<C2> {
        RequestBuilder {
            client: Arc::new(client),
            method: self.method,
            raw_url: self.raw_url,
            headers: self.headers,
            sources: self.sources,
            mode: self.mode,
            body: self.body,
            invalid: self.invalid,
        }
    }

    /// The executor used by [`send`](Self::send).
    #[must_use]
    pub fn http_client(&self) -> &Arc<C> {
        &self.client
    }

    // ========================================================================
    // URL & Method
    // ========================================================================

    /// Set the URL, replacing any previous value.
    ///
    /// To extend it later with [`path`](Self::path), end it with a `/`.
    #[must_use]
    pub fn base(mut self, url: impl Into<String>) -> Self {
        self.raw_url = url.into();
        self
    }

    /// Resolve `reference` against the current URL.
    ///
    /// Standard reference resolution applies: `http://h/a/` + `b` gives
    /// `http://h/a/b`, `http://h/a` + `b` gives `http://h/b`, and an absolute
    /// reference replaces the URL, even when no base is set yet. If the
    /// reference cannot be resolved, the URL is left unchanged.
    #[must_use]
    pub fn path(mut self, reference: &str) -> Self {
        let resolved = match Url::parse(&self.raw_url) {
            Ok(base) => base.join(reference),
            // Empty or broken base: only an absolute reference can stand alone
            Err(_) => Url::parse(reference),
        };
        match resolved {
            Ok(resolved) => self.raw_url = resolved.into(),
            Err(err) => {
                debug!(url = %self.raw_url, reference, error = %err, "keeping URL, path did not resolve");
            }
        }
        self
    }

    /// Set the HTTP method without touching the URL.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the method to `HEAD` and resolve `reference`.
    #[must_use]
    pub fn head(self, reference: &str) -> Self {
        self.method(Method::Head).path(reference)
    }

    /// Set the method to `GET` and resolve `reference`.
    #[must_use]
    pub fn get(self, reference: &str) -> Self {
        self.method(Method::Get).path(reference)
    }

    /// Set the method to `POST` and resolve `reference`.
    #[must_use]
    pub fn post(self, reference: &str) -> Self {
        self.method(Method::Post).path(reference)
    }

    /// Set the method to `PUT` and resolve `reference`.
    #[must_use]
    pub fn put(self, reference: &str) -> Self {
        self.method(Method::Put).path(reference)
    }

    /// Set the method to `PATCH` and resolve `reference`.
    #[must_use]
    pub fn patch(self, reference: &str) -> Self {
        self.method(Method::Patch).path(reference)
    }

    /// Set the method to `DELETE` and resolve `reference`.
    #[must_use]
    pub fn delete(self, reference: &str) -> Self {
        self.method(Method::Delete).path(reference)
    }

    /// The current URL, as configured (no parameters applied).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.raw_url
    }

    /// The current HTTP method.
    #[must_use]
    pub const fn current_method(&self) -> Method {
        self.method
    }

    // ========================================================================
    // Headers
    // ========================================================================

    /// Append a header value, keeping existing values for that name.
    ///
    /// Names are case-insensitive.
    #[must_use]
    pub fn add(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let Some((name, value)) = self.header_entry(key.as_ref(), value.as_ref()) {
            self.headers.append(name, value);
        }
        self
    }

    /// Set a header value, replacing all existing values for that name.
    ///
    /// Names are case-insensitive.
    #[must_use]
    pub fn set(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let Some((name, value)) = self.header_entry(key.as_ref(), value.as_ref()) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set the `Authorization` header for HTTP Basic authentication.
    ///
    /// Credentials are only base64-encoded, not encrypted.
    #[must_use]
    pub fn set_basic_auth(self, username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        self.set(AUTHORIZATION, format!("Basic {encoded}"))
    }

    /// The configured headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn header_entry(&mut self, key: &str, value: &str) -> Option<(HeaderName, HeaderValue)> {
        let name = match HeaderName::from_bytes(key.as_bytes()) {
            Ok(name) => name,
            Err(err) => {
                self.record_invalid(format!("invalid header name {key:?}: {err}"));
                return None;
            }
        };
        match HeaderValue::from_str(value) {
            Ok(value) => Some((name, value)),
            Err(err) => {
                self.record_invalid(format!("invalid value for header {name}: {err}"));
                None
            }
        }
    }

    fn record_invalid(&mut self, message: String) {
        // Keep the first problem, later ones are usually consequences
        if self.invalid.is_none() {
            self.invalid = Some(message);
        }
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// Append a single key/value parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToParamValue) -> Self {
        self.sources.push(ParamSource::pair(key, value));
        self
    }

    /// Append a structured parameter source.
    ///
    /// Its pairs are read at build time; a later source overrides the keys of
    /// earlier ones. `None` contributes nothing.
    #[must_use]
    pub fn params(mut self, source: impl ToParams + Send + Sync + 'static) -> Self {
        self.sources.push(ParamSource::structured(source));
        self
    }

    /// The configured parameter sources, in order.
    #[must_use]
    pub fn sources(&self) -> &[ParamSource] {
        &self.sources
    }

    /// Encode body parameters as a JSON object.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.mode = Mode::Json;
        self
    }

    /// Encode body parameters as a URL-encoded form (the default).
    #[must_use]
    pub fn form(mut self) -> Self {
        self.mode = Mode::Form;
        self
    }

    /// The serialization mode applied at build time.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    // ========================================================================
    // Explicit body
    // ========================================================================

    /// Use `body` as the request payload.
    ///
    /// With an explicit body, parameters always go to the URL query.
    /// No `Content-Type` is set.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Use the JSON encoding of `value` as the payload and set `Content-Type`.
    #[must_use]
    pub fn body_json<T: serde::Serialize + ?Sized>(self, value: &T) -> Self {
        match crate::to_json(value) {
            Ok(bytes) => self.body(bytes).set(CONTENT_TYPE, ContentType::Json.as_str()),
            Err(err) => self.invalid_body(&err),
        }
    }

    /// Use the form encoding of `value` as the payload and set `Content-Type`.
    #[must_use]
    pub fn body_form<T: serde::Serialize + ?Sized>(self, value: &T) -> Self {
        match crate::to_form(value) {
            Ok(bytes) => self
                .body(bytes)
                .set(CONTENT_TYPE, ContentType::FormUrlEncoded.as_str()),
            Err(err) => self.invalid_body(&err),
        }
    }

    fn invalid_body(mut self, err: &Error) -> Self {
        self.record_invalid(format!("invalid body: {err}"));
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build an immutable [`Request`] from the current configuration.
    ///
    /// Parameters are merged, then encoded into the query for `GET`/`HEAD`
    /// (always as a form) or into the body for other methods (form or JSON
    /// per [`mode`](Self::mode)). The builder is left untouched, so building
    /// twice yields two identical, independent requests.
    ///
    /// # Errors
    ///
    /// Returns a build error if the URL does not parse, a header or body was
    /// invalid, or parameters cannot be serialized.
    pub fn build(&self) -> Result<Request> {
        if let Some(message) = &self.invalid {
            return Err(Error::invalid_request(message.clone()));
        }

        let mut url = Url::parse(&self.raw_url)?;
        let params = merge(&self.sources);

        let body = match &self.body {
            Some(body) => {
                append_query(&mut url, &params)?;
                Some(body.clone())
            }
            None if self.method.carries_body() && !params.is_empty() => Some(match self.mode {
                Mode::Form => Bytes::from(encode_form(&params)?),
                Mode::Json => encode_json(&params)?,
            }),
            None => {
                append_query(&mut url, &params)?;
                None
            }
        };

        debug!(
            method = %self.method,
            url = %url,
            body_len = body.as_ref().map(Bytes::len),
            "request built"
        );

        Ok(Request::from_parts(
            self.method,
            url,
            self.headers.clone(),
            body,
        ))
    }
}

// ============================================================================
// Execution
// ============================================================================

impl<C: HttpClient> RequestBuilder<C> {
    /// Build and execute the request, returning the response whatever its status.
    ///
    /// # Errors
    ///
    /// Returns build, transport, or read errors.
    pub async fn response(&self) -> Result<Response> {
        let request = self.build()?;
        self.client.execute(request).await
    }

    /// Build and execute the request, failing on non-success status.
    ///
    /// Any status in 200-299 is a success. Otherwise the result is
    /// [`Error::Api`] carrying the raw body; use
    /// [`Error::decode_body`] to read it into a failure type.
    ///
    /// # Errors
    ///
    /// Returns build, transport, read, or API errors.
    pub async fn send(&self) -> Result<Response> {
        let response = self.response().await?;
        if !response.is_success() {
            warn!(
                method = %self.method,
                status = response.status(),
                "request failed with API error"
            );
        }
        response.error_for_status()
    }

    /// Send the request and decode a success body as JSON into `T`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(Deserialize)]
    /// struct Created { id: u64 }
    ///
    /// let created: Created = slingshot::new()
    ///     .base("https://api.example.com/")
    ///     .post("items")
    ///     .json()
    ///     .param("name", "widget")
    ///     .receive()
    ///     .await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns build, transport, read, or API errors, or [`Error::Decode`]
    /// (carrying the body) when the success body is not a valid `T`.
    pub async fn receive<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        self.send().await?.json()
    }
}

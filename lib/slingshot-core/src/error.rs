//! Error types for slingshot.

use bytes::Bytes;
use derive_more::{Display, Error, From};

/// Broad category of an [`Error`], following the request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// The request could not be built (bad URL, header or serialization input).
    #[display("build")]
    Build,
    /// The executor failed to exchange the request.
    #[display("transport")]
    Transport,
    /// The response body could not be fully read.
    #[display("read")]
    Read,
    /// A success response carried a body that is not the expected JSON.
    #[display("decode")]
    Decode,
    /// The server answered with a non-success status.
    #[display("api")]
    Api,
}

/// Main error type for slingshot operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Invalid URL.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The response body stream failed before completion.
    #[display("failed to read response body: {_0}")]
    #[from(skip)]
    Read(#[error(not(source))] String),

    /// Malformed JSON in a success response.
    #[display("JSON decode error at '{path}': {message}")]
    #[from(skip)]
    Decode {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
        /// Raw response body, kept for diagnostics.
        #[error(not(source))]
        body: Bytes,
    },

    /// Non-success HTTP status.
    #[display("API error {status}: {message}")]
    #[from(skip)]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body as text.
        message: String,
        /// Raw response body.
        #[error(not(source))]
        body: Bytes,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an API error from a status code and the raw response body.
    ///
    /// The message is the body decoded as (lossy) UTF-8.
    #[must_use]
    pub fn api(status: u16, body: Bytes) -> Self {
        Self::Api {
            status,
            message: String::from_utf8_lossy(&body).into_owned(),
            body,
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create a body read error.
    #[must_use]
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a decode error with path context and the offending body.
    #[must_use]
    pub fn decode(path: impl Into<String>, message: impl Into<String>, body: Bytes) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
            body,
        }
    }

    /// The lifecycle stage this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_)
            | Self::InvalidRequest(_)
            | Self::JsonSerialization(_)
            | Self::FormSerialization(_) => ErrorKind::Build,
            Self::Connection(_) | Self::Tls(_) | Self::Timeout => ErrorKind::Transport,
            Self::Read(_) => ErrorKind::Read,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Api { .. } => ErrorKind::Api,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code if this is an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the raw response body carried by API and decode errors.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Api { body, .. } | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Try to decode the carried response body as JSON.
    ///
    /// This is how a caller reads a non-success response into its own failure type.
    /// Returns `None` if the error carries no body.
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(Debug, Deserialize)]
    /// struct ApiFailure {
    ///     msg: String,
    /// }
    ///
    /// match builder.receive::<User>().await {
    ///     Ok(user) => println!("User: {user:?}"),
    ///     Err(e) => match e.decode_body::<ApiFailure>() {
    ///         Some(Ok(failure)) => println!("API said: {}", failure.msg),
    ///         _ => println!("Error: {e}"),
    ///     },
    /// }
    /// ```
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}

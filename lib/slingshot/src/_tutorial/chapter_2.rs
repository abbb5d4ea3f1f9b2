//! # Chapter 2: Response Handling
//!
//! ## Three Ways to Send
//!
//! | method | status check | result |
//! |--------|--------------|--------|
//! | `response()` | none | raw [`Response`](crate::Response) |
//! | `send()` | 2xx required | [`Response`](crate::Response) |
//! | `receive::<T>()` | 2xx required | body decoded as JSON into `T` |
//!
//! ## Errors
//!
//! All failures are [`Error`](crate::Error) values; `kind()` groups them:
//!
//! | kind | variants |
//! |------|----------|
//! | `Build` | `InvalidUrl`, `InvalidRequest`, serialization errors |
//! | `Transport` | `Connection`, `Tls`, `Timeout` |
//! | `Read` | `Read` |
//! | `Decode` | `Decode { path, message, body }` |
//! | `Api` | `Api { status, message, body }` |
//!
//! ## Decoding API Failures
//!
//! A non-2xx response keeps its body. Decode it into your own error type:
//!
//! ```ignore
//! #[derive(Debug, Deserialize)]
//! struct GithubError {
//!     message: String,
//! }
//!
//! match api.clone().get("repos/nope/nope").receive::<Repo>().await {
//!     Ok(repo) => println!("{repo:?}"),
//!     Err(err) if err.is_not_found() => println!("no such repo"),
//!     Err(err) => match err.decode_body::<GithubError>() {
//!         Some(Ok(failure)) => println!("API said: {}", failure.message),
//!         _ => return Err(err),
//!     },
//! }
//! ```
//!
//! ## Next Steps
//!
//! - [Chapter 3: Executors & Middleware][super::chapter_3]

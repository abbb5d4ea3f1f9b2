//! # Chapter 0: Getting Started
//!
//! Your first slingshot request in 5 minutes.
//!
//! ## What You'll Learn
//!
//! - Create a builder with `slingshot::new()`
//! - Set a base URL and resolve paths against it
//! - Decode a JSON response with `receive()`
//!
//! ## Prerequisites
//!
//! Add to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! slingshot = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ## Your First Request
//!
//! ```ignore
//! use slingshot::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     pub id: u64,
//!     pub login: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> slingshot::Result<()> {
//!     let user: User = slingshot::new()
//!         .base("https://api.github.com/")
//!         .get("users/octocat")
//!         .receive()
//!         .await?;
//!     println!("User: {user:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Base and Path
//!
//! `base()` replaces the URL. `path()` (and `get()`, `post()`, ...) resolves
//! a reference against it, like a link in a web page:
//!
//! | base | reference | result |
//! |------|-----------|--------|
//! | `https://h/api/` | `users` | `https://h/api/users` |
//! | `https://h/api` | `users` | `https://h/users` |
//! | `https://h/api/` | `/users` | `https://h/users` |
//! | `https://h/api/` | `https://other/x` | `https://other/x` |
//!
//! End base URLs with `/` when you want to extend them.
//!
//! ## One Parent, Many Requests
//!
//! Builders are cheap to clone. Configure shared state once:
//!
//! ```ignore
//! let api = slingshot::new()
//!     .base("https://api.example.com/v1/")
//!     .set("Accept", "application/json")
//!     .set_basic_auth("user", "secret");
//!
//! let users = api.clone().get("users");
//! let orders = api.clone().get("orders");
//! ```
//!
//! Children never affect the parent, and all of them share one connection pool.
//!
//! ## Next Steps
//!
//! - [Chapter 1: Parameters & Bodies][super::chapter_1]

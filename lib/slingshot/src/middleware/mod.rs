//! Tower middleware layers for the default [`HyperClient`](crate::HyperClient).
//!
//! Layers wrap the raw hyper service through
//! [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer); any
//! `tower::Layer` over [`BoxedService`](crate::BoxedService) fits.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - one `tracing` span per exchange, outcome classified by status class or error kind
//!
//! # Example
//!
//! ```ignore
//! use slingshot::HyperClient;
//! use slingshot::middleware::LoggingLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{Detail, Logged, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};

//! Core types and traits for the slingshot request builder.
//!
//! This crate provides the foundational types used by slingshot:
//! - [`RequestBuilder`] - Fluent, cloneable request description
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`Response`] - Built request and fully read response
//! - [`ParamValue`] and [`ToParamValue`] - Parameter values
//! - [`ToParams`] and [`ParamSource`] - Parameter sources and their merge
//! - [`Mode`] - Form or JSON encoding for body parameters
//! - [`Error`] and [`Result`] - Error handling
//! - [`HttpClient`] - Core client trait for HTTP execution
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
mod builder;
mod client;
mod error;
mod method;
mod params;
pub mod prelude;
mod request;
mod response;
mod value;

pub use body::{
    ContentType, Mode, encode_form, encode_json, form_pairs, from_json, to_form, to_json,
};
pub use builder::RequestBuilder;
pub use client::HttpClient;
pub use error::{Error, ErrorKind, Result};
pub use method::Method;
pub use params::{ParamMap, ParamSource, ToParams, merge};
pub use request::Request;
pub use response::Response;
pub use value::{ParamValue, ScalarKind, ToParamValue};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};

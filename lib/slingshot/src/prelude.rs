//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, functions, and macros
//! for easy glob importing:
//!
//! ```ignore
//! use slingshot::prelude::*;
//! ```

pub use crate::{
    ClientConfig, Error, HttpClient, HyperClient, Method, Mode, ParamValue, Params, Request,
    RequestBuilder, Response, Result, StatusCode, ToParamValue, ToParams, header,
};
pub use serde::{Deserialize, Serialize};

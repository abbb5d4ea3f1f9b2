//! Prelude module for convenient imports.
//!
//! ```ignore
//! use slingshot_core::prelude::*;
//! ```

pub use crate::{
    Error, HttpClient, Method, Mode, ParamValue, Request, RequestBuilder, Response, Result,
    ToParamValue, ToParams,
};

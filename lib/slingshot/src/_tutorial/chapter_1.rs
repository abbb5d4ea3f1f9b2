//! # Chapter 1: Parameters & Bodies
//!
//! ## Single Parameters
//!
//! ```ignore
//! let request = api.clone()
//!     .get("search")
//!     .param("q", "rust http")
//!     .param("page", 2)
//!     .param("tags", vec!["web", "cli"])
//!     .build()?;
//!
//! // https://api.example.com/v1/search?page=2&q=rust+http&tags=web&tags=cli
//! ```
//!
//! Keys are sorted; lists repeat their key.
//!
//! ## Structured Parameters
//!
//! Derive `Params` on a struct and pass it with `params()`:
//!
//! ```ignore
//! #[derive(Params)]
//! #[params(rename_all = "camelCase")]
//! struct Paging {
//!     page_size: u32,                 // "pageSize"
//!     #[params(skip_none)]
//!     cursor: Option<String>,
//!     #[params(format = "csv")]
//!     fields: Vec<&'static str>,      // "fields=id,name"
//! }
//! ```
//!
//! Maps (`BTreeMap`, `HashMap`, `serde_json::Value` objects) and vectors of
//! pairs work too. `None` contributes nothing.
//!
//! Sources are merged in order at build time: a later source overrides the
//! keys of earlier ones.
//!
//! ## Where Parameters Go
//!
//! | method | parameters |
//! |--------|------------|
//! | `GET`, `HEAD` | URL query, always form-encoded |
//! | `POST`, `PUT`, `PATCH`, `DELETE` | body, form (default) or JSON |
//!
//! ```ignore
//! api.clone()
//!     .post("orders")
//!     .json()                     // {"item":"book","qty":1}
//!     .set("Content-Type", "application/json")
//!     .param("item", "book")
//!     .param("qty", 1)
//!     .send()
//!     .await?;
//! ```
//!
//! Parameter bodies do not get a `Content-Type` automatically.
//!
//! ## Explicit Bodies
//!
//! | method | payload | Content-Type |
//! |--------|---------|--------------|
//! | `body(bytes)` | raw bytes | - |
//! | `body_json(&value)` | serde JSON | `application/json` |
//! | `body_form(&value)` | serde form | `application/x-www-form-urlencoded` |
//!
//! With an explicit body, parameters go to the URL query whatever the method.
//!
//! ## Next Steps
//!
//! - [Chapter 2: Response Handling][super::chapter_2]

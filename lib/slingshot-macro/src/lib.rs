//! Procedural macros for the slingshot request builder.
//!
//! - `#[derive(Params)]` - Use a struct as a parameter source

mod params_derive;

use proc_macro::TokenStream;

/// Derive the `ToParams` trait for a struct.
///
/// Each named field becomes one parameter, converted with `ToParamValue`.
///
/// # Struct Attributes
///
/// - `#[params(rename_all = "camelCase")]` - Rename all fields using a case convention
///
/// Supported case conventions:
/// - `lowercase`, `UPPERCASE`
/// - `camelCase`, `PascalCase`
/// - `snake_case`, `SCREAMING_SNAKE_CASE`
/// - `kebab-case`, `SCREAMING-KEBAB-CASE`
///
/// # Field Attributes
///
/// - `#[params(rename = "name")]` - Use a different key (overrides `rename_all`)
/// - `#[params(skip)]` - Never emit the field
/// - `#[params(skip_none)]` - Omit the field when it is `None`
///   (otherwise `None` is sent as JSON `null` and dropped from forms)
/// - `#[params(format = "csv")]` - Collection format for lists (csv, ssv, pipes, multi)
///
/// # Example
///
/// ```ignore
/// use slingshot::Params;
///
/// #[derive(Params)]
/// #[params(rename_all = "camelCase")]
/// struct IssueFilter {
///     sort_order: String,          // becomes "sortOrder"
///     #[params(skip_none)]
///     since: Option<String>,
///     #[params(rename = "per_page")] // explicit rename overrides rename_all
///     limit: u32,
///     #[params(format = "csv")]
///     labels: Vec<String>,         // "labels=bug,ui"
///     #[params(skip)]
///     cache_key: String,
/// }
/// ```
#[proc_macro_derive(Params, attributes(params))]
pub fn derive_params(input: TokenStream) -> TokenStream {
    params_derive::expand_params_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

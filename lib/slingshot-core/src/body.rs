//! Serialization of parameters and bodies.
//!
//! Merged parameters ([`ParamMap`]) are encoded either as a form
//! (`key=value&...`, via [`encode_form`]) or as a JSON object (via
//! [`encode_json`]), depending on the builder's [`Mode`].

use bytes::Bytes;
use tracing::trace;

use crate::{ParamMap, Result};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialization mode for parameters carried in a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// URL-encoded `key=value` pairs.
    #[default]
    Form,
    /// A JSON object.
    Json,
}

impl Mode {
    /// The content type matching this mode.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        match self {
            Self::Form => ContentType::FormUrlEncoded,
            Self::Json => ContentType::Json,
        }
    }
}

/// Flatten merged parameters into form pairs, sorted by key.
///
/// Lists expand to one pair per element, in list order. Values with no form
/// representation are dropped.
#[must_use]
pub fn form_pairs(params: &ParamMap) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value.form_values() {
            Some(values) => {
                pairs.extend(
                    values
                        .into_iter()
                        .map(|text| (key.clone(), text.into_owned())),
                );
            }
            None => trace!(key = %key, ?value, "dropping parameter with no form encoding"),
        }
    }
    pairs
}

/// Encode merged parameters as `application/x-www-form-urlencoded`.
///
/// # Example
///
/// ```
/// use slingshot_core::{ParamMap, ToParamValue, encode_form};
///
/// let mut params = ParamMap::new();
/// params.insert("b".to_string(), "x".to_param_value());
/// params.insert("a".to_string(), 1_i32.to_param_value());
/// params.insert("tags".to_string(), vec!["x", "y"].to_param_value());
///
/// assert_eq!(encode_form(&params).expect("encode"), "a=1&b=x&tags=x&tags=y");
/// ```
pub fn encode_form(params: &ParamMap) -> Result<String> {
    encode_pairs(&form_pairs(params))
}

/// Encode merged parameters as a JSON object.
pub fn encode_json(params: &ParamMap) -> Result<Bytes> {
    to_json(params)
}

/// Encode already-flattened pairs, sorting them by key.
///
/// The sort is stable: pairs sharing a key keep their relative order.
pub(crate) fn encode_pairs(pairs: &[(String, String)]) -> Result<String> {
    let mut sorted = pairs.to_vec();
    sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
    serde_html_form::to_string(&sorted).map_err(Into::into)
}

/// Merge parameters into the query of `url`.
///
/// Pairs already present in the URL are kept ahead of new pairs with the
/// same key. The URL is left untouched when there is nothing to add.
pub(crate) fn append_query(url: &mut url::Url, params: &ParamMap) -> Result<()> {
    let added = form_pairs(params);
    if added.is_empty() {
        return Ok(());
    }

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.extend(added);

    let query = encode_pairs(&pairs)?;
    url.set_query(Some(&query));
    Ok(())
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use slingshot_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to form URL-encoded bytes.
///
/// Uses `serde_html_form` which supports `Vec<T>` for repeated form fields
/// (e.g., `tags=a&tags=b&tags=c`).
///
/// # Example
///
/// ```
/// use slingshot_core::to_form;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Login { username: String, password: String }
///
/// let login = Login { username: "alice".to_string(), password: "secret".to_string() };
/// let bytes = to_form(&login).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"username=alice&password=secret");
/// ```
pub fn to_form<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_html_form::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the field that failed
/// (e.g., "user.address.city"). The raw bytes are kept in the error.
///
/// # Example
///
/// ```
/// use slingshot_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let bytes = br#"{"name":"Alice"}"#;
/// let user: User = from_json(bytes).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::decode(
            e.path().to_string(),
            e.inner().to_string(),
            Bytes::copy_from_slice(bytes),
        )
    })
}

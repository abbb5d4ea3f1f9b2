//! Parameter sources and merging.
//!
//! A request collects an ordered list of [`ParamSource`]s. At build time they
//! are flattened with [`merge`] into one [`ParamMap`], later sources
//! overwriting earlier ones key by key.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

use crate::{ParamValue, ToParamValue};

/// Flattened parameters, keyed by name.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Types that can flatten themselves into parameter pairs.
///
/// Usually derived with `#[derive(Params)]`:
///
/// ```ignore
/// use slingshot::Params;
///
/// #[derive(Params)]
/// struct Search {
///     q: String,
///     #[params(rename = "per_page")]
///     limit: u32,
///     #[params(skip_none)]
///     page: Option<u32>,
/// }
/// ```
pub trait ToParams {
    /// Flatten into `(key, value)` pairs.
    fn to_params(&self) -> Vec<(String, ParamValue)>;
}

impl<T: ToParams + ?Sized> ToParams for &T {
    fn to_params(&self) -> Vec<(String, ParamValue)> {
        (**self).to_params()
    }
}

impl<T: ToParams + ?Sized> ToParams for Box<T> {
    fn to_params(&self) -> Vec<(String, ParamValue)> {
        (**self).to_params()
    }
}

impl<T: ToParams + ?Sized> ToParams for Arc<T> {
    fn to_params(&self) -> Vec<(String, ParamValue)> {
        (**self).to_params()
    }
}

/// `None` contributes no parameters.
impl<T: ToParams> ToParams for Option<T> {
    fn to_params(&self) -> Vec<(String, ParamValue)> {
        self.as_ref().map(ToParams::to_params).unwrap_or_default()
    }
}

impl<K: AsRef<str>, V: ToParamValue> ToParams for [(K, V)] {
    fn to_params(&self) -> Vec<(String, ParamValue)> {
        self.iter()
            .map(|(key, value)| (key.as_ref().to_owned(), value.to_param_value()))
            .collect()
    }
}

impl<K: AsRef<str>, V: ToParamValue> ToParams for Vec<(K, V)> {
    fn to_params(&self) -> Vec<(String, ParamValue)> {
        self.as_slice().to_params()
    }
}

impl<K: AsRef<str>, V: ToParamValue> ToParams for BTreeMap<K, V> {
    fn to_params(&self) -> Vec<(String, ParamValue)> {
        self.iter()
            .map(|(key, value)| (key.as_ref().to_owned(), value.to_param_value()))
            .collect()
    }
}

impl<K: AsRef<str>, V: ToParamValue, S: BuildHasher> ToParams for HashMap<K, V, S> {
    fn to_params(&self) -> Vec<(String, ParamValue)> {
        self.iter()
            .map(|(key, value)| (key.as_ref().to_owned(), value.to_param_value()))
            .collect()
    }
}

impl ToParams for serde_json::Map<String, serde_json::Value> {
    fn to_params(&self) -> Vec<(String, ParamValue)> {
        self.iter()
            .map(|(key, value)| (key.clone(), value.to_param_value()))
            .collect()
    }
}

/// Only JSON objects contribute parameters; other values contribute none.
impl ToParams for serde_json::Value {
    fn to_params(&self) -> Vec<(String, ParamValue)> {
        self.as_object().map(ToParams::to_params).unwrap_or_default()
    }
}

/// One entry in a request's parameter list.
#[derive(Clone)]
pub enum ParamSource {
    /// A single key/value pair.
    Pair(String, ParamValue),
    /// A structured source, shared between cloned builders.
    Struct(Arc<dyn ToParams + Send + Sync>),
}

impl ParamSource {
    /// Create a single-pair source.
    pub fn pair(key: impl Into<String>, value: impl ToParamValue) -> Self {
        Self::Pair(key.into(), value.to_param_value())
    }

    /// Create a structured source.
    pub fn structured(source: impl ToParams + Send + Sync + 'static) -> Self {
        Self::Struct(Arc::new(source))
    }

    /// Flatten this source into pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(String, ParamValue)> {
        match self {
            Self::Pair(key, value) => vec![(key.clone(), value.clone())],
            Self::Struct(source) => source.to_params(),
        }
    }
}

impl fmt::Debug for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair(key, value) => f.debug_tuple("Pair").field(key).field(value).finish(),
            Self::Struct(source) => f.debug_tuple("Struct").field(&source.to_params()).finish(),
        }
    }
}

/// Merge sources in order into one map.
///
/// A key produced by a later source replaces the value from any earlier
/// source. The union of all keys is kept.
#[must_use]
pub fn merge(sources: &[ParamSource]) -> ParamMap {
    let mut merged = ParamMap::new();
    for source in sources {
        merged.extend(source.pairs());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Paging {
        page: u32,
        per_page: u32,
    }

    impl ToParams for Paging {
        fn to_params(&self) -> Vec<(String, ParamValue)> {
            vec![
                ("page".to_string(), self.page.to_param_value()),
                ("per_page".to_string(), self.per_page.to_param_value()),
            ]
        }
    }

    #[test]
    fn later_source_overrides_earlier_key() {
        let sources = vec![
            ParamSource::structured(Paging {
                page: 1,
                per_page: 10,
            }),
            ParamSource::pair("page", 3u32),
            ParamSource::pair("q", "rust"),
        ];

        let merged = merge(&sources);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("page"), Some(&ParamValue::Integer(3)));
        assert_eq!(merged.get("per_page"), Some(&ParamValue::Integer(10)));
        assert_eq!(
            merged.get("q"),
            Some(&ParamValue::String("rust".to_string()))
        );
    }

    #[test]
    fn override_is_total_not_additive() {
        let sources = vec![
            ParamSource::pair("tags", vec!["a", "b"]),
            ParamSource::pair("tags", vec!["c"]),
        ];

        let merged = merge(&sources);
        assert_eq!(
            merged.get("tags"),
            Some(&ParamValue::List(vec![ParamValue::String("c".to_string())]))
        );
    }

    #[test]
    fn every_override_order_keeps_the_last_value() {
        let values = [1u8, 2, 3, 4];
        for last in 0..values.len() {
            let mut sources: Vec<ParamSource> = values
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != last)
                .map(|(_, v)| ParamSource::pair("k", *v))
                .collect();
            let expected = values.get(last).copied().unwrap_or_default();
            sources.push(ParamSource::pair("k", expected));

            let merged = merge(&sources);
            assert_eq!(merged.get("k"), Some(&ParamValue::Integer(expected.into())));
        }
    }

    #[test]
    fn none_source_contributes_nothing() {
        let sources = vec![ParamSource::structured(None::<Paging>)];
        assert!(merge(&sources).is_empty());
    }

    #[test]
    fn maps_and_json_objects_are_sources() {
        let mut map = HashMap::new();
        map.insert("a", 1i32);

        let json = serde_json::json!({"b": "x", "c": [1, 2]});
        let sources = vec![
            ParamSource::structured(map),
            ParamSource::structured(json),
            ParamSource::structured(serde_json::json!("not an object")),
        ];

        let merged = merge(&sources);
        assert_eq!(merged.get("a"), Some(&ParamValue::Integer(1)));
        assert_eq!(merged.get("b"), Some(&ParamValue::String("x".to_string())));
        assert_eq!(
            merged.get("c"),
            Some(&ParamValue::List(vec![
                ParamValue::Integer(1),
                ParamValue::Integer(2)
            ]))
        );
    }

    #[test]
    fn pair_slices_are_sources() {
        let pairs = vec![("x", "1"), ("y", "2")];
        let merged = merge(&[ParamSource::structured(pairs)]);
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }
}

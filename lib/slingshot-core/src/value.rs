//! Parameter values.
//!
//! [`ParamValue`] is the closed set of value shapes a parameter source can
//! contribute. The form encoder dispatches on it; the JSON encoder serializes
//! it as-is.

use std::borrow::Cow;

use serde::ser::{Error as _, Serialize, SerializeSeq, Serializer};

/// A dynamically-typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text, encoded literally.
    String(String),
    /// Boolean, encoded as `true` / `false`.
    Bool(bool),
    /// Integer of any width, encoded in decimal.
    Integer(i128),
    /// Floating point, encoded as the shortest round-trip decimal.
    Float(f64),
    /// A list of values; form-encoded as one pair per element.
    List(Vec<ParamValue>),
    /// A value with no form representation (null, nested object, ...).
    ///
    /// The form encoder drops it; the JSON encoder writes the carried value.
    Unsupported(serde_json::Value),
}

/// Scalar shape of a [`ParamValue`], used to check list homogeneity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// [`ParamValue::String`]
    String,
    /// [`ParamValue::Bool`]
    Bool,
    /// [`ParamValue::Integer`]
    Integer,
    /// [`ParamValue::Float`]
    Float,
}

impl ParamValue {
    /// The scalar kind, or `None` for lists and unsupported values.
    #[must_use]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::String(_) => Some(ScalarKind::String),
            Self::Bool(_) => Some(ScalarKind::Bool),
            Self::Integer(_) => Some(ScalarKind::Integer),
            Self::Float(_) => Some(ScalarKind::Float),
            Self::List(_) | Self::Unsupported(_) => None,
        }
    }

    /// Textual form of a scalar, or `None` for lists and unsupported values.
    #[must_use]
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::String(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Integer(i) => Some(Cow::Owned(i.to_string())),
            // `Display` for f64 is shortest round-trip and never uses an exponent
            Self::Float(f) => Some(Cow::Owned(f.to_string())),
            Self::List(_) | Self::Unsupported(_) => None,
        }
    }

    /// Values this parameter contributes to a form, in order.
    ///
    /// Returns `None` when the value cannot be form-encoded: unsupported values,
    /// lists mixing scalar kinds and lists containing non-scalars.
    /// An empty list contributes nothing.
    #[must_use]
    pub fn form_values(&self) -> Option<Vec<Cow<'_, str>>> {
        match self {
            Self::List(items) => {
                let mut kinds = items.iter().map(Self::scalar_kind);
                let first = match kinds.next() {
                    None => return Some(Vec::new()),
                    Some(kind) => kind?,
                };
                if !kinds.all(|kind| kind == Some(first)) {
                    return None;
                }
                items.iter().map(Self::scalar_text).collect()
            }
            scalar => scalar.scalar_text().map(|text| vec![text]),
        }
    }

    /// Returns `true` for [`ParamValue::Unsupported`].
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    /// Join a non-empty scalar list into a single string.
    ///
    /// Used for the `csv`, `ssv` and `pipes` collection formats. Other values
    /// (scalars, empty or non-encodable lists) are returned unchanged.
    #[must_use]
    pub fn joined(self, separator: &str) -> Self {
        let joined = match &self {
            Self::List(items) if !items.is_empty() => {
                self.form_values().map(|values| values.join(separator))
            }
            _ => None,
        };
        joined.map_or(self, Self::String)
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => {
                if let Ok(small) = i64::try_from(*i) {
                    serializer.serialize_i64(small)
                } else if let Ok(unsigned) = u64::try_from(*i) {
                    serializer.serialize_u64(unsigned)
                } else {
                    serializer.serialize_i128(*i)
                }
            }
            Self::Float(f) if !f.is_finite() => Err(S::Error::custom(format!(
                "{f} has no JSON representation"
            ))),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Unsupported(value) => value.serialize(serializer),
        }
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(s) => Self::String(s),
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Self::Integer(i128::from(u))
                } else {
                    n.as_f64()
                        .map_or(Self::Unsupported(Value::Number(n)), Self::Float)
                }
            }
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            other @ (Value::Null | Value::Object(_)) => Self::Unsupported(other),
        }
    }
}

// ============================================================================
// Conversion trait
// ============================================================================

/// Conversion of a Rust value into a [`ParamValue`].
///
/// Implemented for strings, booleans, every integer and float width,
/// `Option`, sequences and `serde_json::Value`. `#[derive(Params)]` calls it
/// on each field.
pub trait ToParamValue {
    /// Convert to a parameter value.
    fn to_param_value(&self) -> ParamValue;
}

impl ToParamValue for ParamValue {
    fn to_param_value(&self) -> ParamValue {
        self.clone()
    }
}

impl<T: ToParamValue + ?Sized> ToParamValue for &T {
    fn to_param_value(&self) -> ParamValue {
        (**self).to_param_value()
    }
}

impl<T: ToParamValue + ?Sized> ToParamValue for Box<T> {
    fn to_param_value(&self) -> ParamValue {
        (**self).to_param_value()
    }
}

impl ToParamValue for str {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::String(self.to_owned())
    }
}

impl ToParamValue for String {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::String(self.clone())
    }
}

impl ToParamValue for Cow<'_, str> {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::String(self.to_string())
    }
}

impl ToParamValue for char {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::String(self.to_string())
    }
}

impl ToParamValue for bool {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Bool(*self)
    }
}

macro_rules! integer_param_value {
    ($($ty:ty),*) => {
        $(
            impl ToParamValue for $ty {
                fn to_param_value(&self) -> ParamValue {
                    ParamValue::Integer(i128::from(*self))
                }
            }
        )*
    };
}

integer_param_value!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl ToParamValue for isize {
    fn to_param_value(&self) -> ParamValue {
        // isize is at most 64 bits on every supported target
        i64::try_from(*self).map_or_else(
            |_| ParamValue::String(self.to_string()),
            |i| ParamValue::Integer(i128::from(i)),
        )
    }
}

impl ToParamValue for usize {
    fn to_param_value(&self) -> ParamValue {
        u64::try_from(*self).map_or_else(
            |_| ParamValue::String(self.to_string()),
            |u| ParamValue::Integer(i128::from(u)),
        )
    }
}

impl ToParamValue for u128 {
    fn to_param_value(&self) -> ParamValue {
        i128::try_from(*self).map_or_else(
            |_| ParamValue::String(self.to_string()),
            ParamValue::Integer,
        )
    }
}

impl ToParamValue for f64 {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Float(*self)
    }
}

impl ToParamValue for f32 {
    fn to_param_value(&self) -> ParamValue {
        // Widening directly would print 0.1f32 as 0.10000000149011612,
        // so go through the f32 shortest representation instead.
        let widened = self.to_string().parse::<f64>().unwrap_or(f64::from(*self));
        ParamValue::Float(widened)
    }
}

impl<T: ToParamValue> ToParamValue for Option<T> {
    fn to_param_value(&self) -> ParamValue {
        self.as_ref().map_or(
            ParamValue::Unsupported(serde_json::Value::Null),
            ToParamValue::to_param_value,
        )
    }
}

impl<T: ToParamValue> ToParamValue for [T] {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::List(self.iter().map(ToParamValue::to_param_value).collect())
    }
}

impl<T: ToParamValue, const N: usize> ToParamValue for [T; N] {
    fn to_param_value(&self) -> ParamValue {
        self.as_slice().to_param_value()
    }
}

impl<T: ToParamValue> ToParamValue for Vec<T> {
    fn to_param_value(&self) -> ParamValue {
        self.as_slice().to_param_value()
    }
}

impl ToParamValue for serde_json::Value {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::from(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(value: &ParamValue) -> Option<Vec<String>> {
        value
            .form_values()
            .map(|values| values.into_iter().map(Cow::into_owned).collect())
    }

    #[test]
    fn scalar_text_policy() {
        assert_eq!(texts(&"x".to_param_value()), Some(vec!["x".to_string()]));
        assert_eq!(texts(&true.to_param_value()), Some(vec!["true".to_string()]));
        assert_eq!(texts(&false.to_param_value()), Some(vec!["false".to_string()]));
        assert_eq!(texts(&(-42i8).to_param_value()), Some(vec!["-42".to_string()]));
        assert_eq!(
            texts(&u64::MAX.to_param_value()),
            Some(vec!["18446744073709551615".to_string()])
        );
    }

    #[test]
    fn float_text_is_shortest_without_exponent() {
        assert_eq!(texts(&1.5f64.to_param_value()), Some(vec!["1.5".to_string()]));
        assert_eq!(texts(&2.0f64.to_param_value()), Some(vec!["2".to_string()]));
        assert_eq!(texts(&0.1f32.to_param_value()), Some(vec!["0.1".to_string()]));
        assert_eq!(
            texts(&1e21f64.to_param_value()),
            Some(vec!["1000000000000000000000".to_string()])
        );
    }

    #[test]
    fn homogeneous_list_yields_each_element() {
        let value = vec!["x", "y"].to_param_value();
        assert_eq!(texts(&value), Some(vec!["x".to_string(), "y".to_string()]));

        let value = [1u8, 2, 3].to_param_value();
        assert_eq!(
            texts(&value),
            Some(vec!["1".to_string(), "2".to_string(), "3".to_string()])
        );
    }

    #[test]
    fn empty_list_yields_nothing() {
        let value = Vec::<String>::new().to_param_value();
        assert_eq!(texts(&value), Some(Vec::new()));
    }

    #[test]
    fn unsupported_shapes_are_not_form_encodable() {
        let mixed = ParamValue::List(vec![
            ParamValue::Integer(1),
            ParamValue::String("a".to_string()),
        ]);
        assert_eq!(texts(&mixed), None);

        let nested = ParamValue::List(vec![ParamValue::List(vec![ParamValue::Integer(1)])]);
        assert_eq!(texts(&nested), None);

        let none: Option<u32> = None;
        let value = none.to_param_value();
        assert!(value.is_unsupported());
        assert_eq!(texts(&value), None);

        let object = serde_json::json!({"a": 1}).to_param_value();
        assert!(object.is_unsupported());
    }

    #[test]
    fn non_finite_float_does_not_serialize() {
        let err = serde_json::to_string(&ParamValue::Float(f64::NAN)).expect_err("NaN");
        assert!(err.to_string().contains("no JSON representation"));
        assert_eq!(
            serde_json::to_string(&ParamValue::Float(0.5)).expect("finite"),
            "0.5"
        );
    }

    #[test]
    fn joined_collapses_scalar_lists() {
        let value = vec!["a", "b", "c"].to_param_value().joined(",");
        assert_eq!(value, ParamValue::String("a,b,c".to_string()));

        let value = vec![1u8, 2].to_param_value().joined("|");
        assert_eq!(value, ParamValue::String("1|2".to_string()));

        let empty = Vec::<String>::new().to_param_value();
        assert_eq!(empty.clone().joined(","), empty);

        assert_eq!("x".to_param_value().joined(","), "x".to_param_value());
    }

    #[test]
    fn option_some_is_transparent() {
        assert_eq!(Some(7u16).to_param_value(), ParamValue::Integer(7));
    }

    #[test]
    fn from_json_value() {
        let value = ParamValue::from(serde_json::json!(["a", 1, 2.5, true, null]));
        assert_eq!(
            value,
            ParamValue::List(vec![
                ParamValue::String("a".to_string()),
                ParamValue::Integer(1),
                ParamValue::Float(2.5),
                ParamValue::Bool(true),
                ParamValue::Unsupported(serde_json::Value::Null),
            ])
        );
    }

    #[test]
    fn serialize_as_json() {
        let value = ParamValue::List(vec![
            ParamValue::Integer(i128::from(u64::MAX)),
            ParamValue::Float(0.5),
            ParamValue::Unsupported(serde_json::json!({"k": "v"})),
        ]);
        let json = serde_json::to_string(&value).expect("serialize");
        assert_eq!(json, r#"[18446744073709551615,0.5,{"k":"v"}]"#);
    }
}

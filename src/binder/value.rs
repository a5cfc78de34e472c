use serde::Serialize;
use std::fmt;
use std::ops::Deref;


/// A single value bound to a placeholder by position.
///
/// The binder never inspects or escapes these; the executor hands them to the
/// driver, which substitutes them at execution time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

/// Implement `From<$ty>` for a type mapping onto a `BindValue` variant.
macro_rules! impl_from_value {
    ($ty:ty => $variant:ident) => {
        impl From<$ty> for BindValue {
            fn from(value: $ty) -> Self {
                BindValue::$variant(value.into())
            }
        }
    };
}

impl_from_value!(bool => Bool);
impl_from_value!(i16 => Int);
impl_from_value!(i32 => Int);
impl_from_value!(i64 => Int);
impl_from_value!(f32 => Float);
impl_from_value!(f64 => Float);
impl_from_value!(String => Text);
impl_from_value!(&str => Text);

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(BindValue::Null, Into::into)
    }
}


/// Ordered array of bound values, in the left-to-right order of the
/// placeholders they belong to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoundParameters(Vec<BindValue>);

impl BoundParameters {
    pub fn new() -> Self {
        BoundParameters(vec![])
    }

    pub fn push(&mut self, value: impl Into<BindValue>) {
        self.0.push(value.into());
    }

    /// Appends `other` after every value already present.
    pub fn extend_from(&mut self, other: &BoundParameters) {
        self.0.extend(other.iter().cloned());
    }

    pub fn into_vec(self) -> Vec<BindValue> {
        self.0
    }
}

impl Deref for BoundParameters {
    type Target = [BindValue];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<V: Into<BindValue>> FromIterator<V> for BoundParameters {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        BoundParameters(iter.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<BindValue>> From<Vec<V>> for BoundParameters {
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}

impl IntoIterator for BoundParameters {
    type Item = BindValue;
    type IntoIter = std::vec::IntoIter<BindValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BoundParameters {
    type Item = &'a BindValue;
    type IntoIter = std::slice::Iter<'a, BindValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

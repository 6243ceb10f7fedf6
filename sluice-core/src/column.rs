use crate::{AsValue, Value};
use std::borrow::Cow;

/// Field wrapper for columns the database can fill on its own (sequences,
/// `DEFAULT` expressions, generated timestamps).
///
/// A `NotSet` field is left out of single-row inserts and becomes `DEFAULT` in
/// batch inserts.
#[derive(Debug)]
pub enum Passive<T: AsValue> {
    Set(T),
    NotSet,
}

impl<T: AsValue> Default for Passive<T> {
    fn default() -> Self {
        Passive::NotSet
    }
}

impl<T: AsValue> Passive<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Passive::Set(..))
    }
    pub fn get(&self) -> Option<&T> {
        match self {
            Passive::Set(v) => Some(v),
            Passive::NotSet => None,
        }
    }
}

impl<T: AsValue + Clone> Passive<T> {
    /// Reflect the current state as a column value.
    pub fn to_column_value(&self) -> ColumnValue {
        match self {
            Passive::Set(v) => ColumnValue::Set(v.clone().as_value()),
            Passive::NotSet => ColumnValue::Unset,
        }
    }
}

impl<T: AsValue + PartialEq> PartialEq for Passive<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Set(lhs), Self::Set(rhs)) => lhs == rhs,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl<T: AsValue + Clone> Clone for Passive<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Set(v) => Self::Set(v.clone()),
            Self::NotSet => Self::NotSet,
        }
    }
}

impl<T: AsValue> From<T> for Passive<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

/// Current state of a column on a model instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// A concrete value, SQL `NULL` included.
    Set(Value),
    /// No value: the database decides.
    Unset,
}

impl ColumnValue {
    pub fn is_set(&self) -> bool {
        matches!(self, ColumnValue::Set(..))
    }
    pub fn into_value(self) -> Option<Value> {
        match self {
            ColumnValue::Set(v) => Some(v),
            ColumnValue::Unset => None,
        }
    }
}

impl From<Value> for ColumnValue {
    fn from(value: Value) -> Self {
        ColumnValue::Set(value)
    }
}

impl<T: AsValue> From<Passive<T>> for ColumnValue {
    fn from(value: Passive<T>) -> Self {
        match value {
            Passive::Set(v) => ColumnValue::Set(v.as_value()),
            Passive::NotSet => ColumnValue::Unset,
        }
    }
}

/// A named column with the value it holds on one model instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: Cow<'static, str>,
    pub value: ColumnValue,
}

impl Column {
    /// Accepts a [`Value`], a [`Passive`] or a [`ColumnValue`]. Plain Rust values
    /// go through [`Value::from`] first.
    pub fn new(name: impl Into<Cow<'static, str>>, value: impl Into<ColumnValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
    pub fn unset(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            value: ColumnValue::Unset,
        }
    }
}

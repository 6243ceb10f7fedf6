use crate::{Error, Passive, Result, Value, truncate_long};
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use std::{any, borrow::Cow, sync::Arc};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::parse_borrowed,
    parsing::Parsed,
};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// Model fields become [`Value`]s when a statement is built, and result rows
/// come back as [`Value`]s that are converted into the fields of the decoded type.
///
/// # Examples
/// ```rust
/// use sluice_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i32 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The NULL of this type, used for absent optional data and as the element
    /// type of lists.
    fn as_empty_value() -> Value;
    /// Convert into the owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] into `Self`.
    ///
    /// Accepts the canonical variant and, where it is lossless, narrower numeric
    /// widths. Anything else is an error naming the value and the target type.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn out_of_range<T>(value: impl std::fmt::Display) -> Error {
    Error::msg(format!(
        "Value {value} is out of range for {}",
        any::type_name::<T>()
    ))
}

fn cannot_convert<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {value:?} to {}",
        any::type_name::<T>()
    ))
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v), ..) => Ok(v),
                    $($pat_rest => $expr_rest,)*
                    #[allow(unreachable_patterns)]
                    Value::Int64(Some(v), ..) => {
                        <$source>::try_from(v).map_err(|_| out_of_range::<Self>(v))
                    }
                    #[allow(unreachable_patterns)]
                    Value::Int32(Some(v), ..) => {
                        <$source>::try_from(v).map_err(|_| out_of_range::<Self>(v))
                    }
                    _ => Err(cannot_convert::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value!(
    i8,
    Value::Int8,
    Value::Int16(Some(v), ..) => i8::try_from(v).map_err(|_| out_of_range::<i8>(v)),
    Value::UInt8(Some(v), ..) => i8::try_from(v).map_err(|_| out_of_range::<i8>(v)),
);
impl_as_value!(
    i16,
    Value::Int16,
    Value::Int8(Some(v), ..) => Ok(v as _),
    Value::UInt8(Some(v), ..) => Ok(v as _),
    Value::UInt16(Some(v), ..) => i16::try_from(v).map_err(|_| out_of_range::<i16>(v)),
);
impl_as_value!(
    i32,
    Value::Int32,
    Value::Int16(Some(v), ..) => Ok(v as _),
    Value::Int8(Some(v), ..) => Ok(v as _),
    Value::UInt16(Some(v), ..) => Ok(v as _),
    Value::UInt8(Some(v), ..) => Ok(v as _),
    Value::UInt32(Some(v), ..) => i32::try_from(v).map_err(|_| out_of_range::<i32>(v)),
    Value::Decimal(Some(v), ..) => {
        let error = Error::msg(format!("Value {v}: Decimal does not fit into i32"));
        if !v.is_integer() {
            return Err(error.context("The value is not a integer"));
        }
        v.to_i32().ok_or(error)
    }
);
impl_as_value!(
    i64,
    Value::Int64,
    Value::Int32(Some(v), ..) => Ok(v as _),
    Value::Int16(Some(v), ..) => Ok(v as _),
    Value::Int8(Some(v), ..) => Ok(v as _),
    Value::UInt32(Some(v), ..) => Ok(v as _),
    Value::UInt16(Some(v), ..) => Ok(v as _),
    Value::UInt8(Some(v), ..) => Ok(v as _),
    Value::UInt64(Some(v), ..) => i64::try_from(v).map_err(|_| out_of_range::<i64>(v)),
    Value::Decimal(Some(v), ..) => {
        let error = Error::msg(format!("Value {v}: Decimal does not fit into i64"));
        if !v.is_integer() {
            return Err(error.context("The value is not a integer"));
        }
        v.to_i64().ok_or(error)
    }
);
impl_as_value!(
    u8,
    Value::UInt8,
    Value::Int8(Some(v), ..) => u8::try_from(v).map_err(|_| out_of_range::<u8>(v)),
    Value::Int16(Some(v), ..) => u8::try_from(v).map_err(|_| out_of_range::<u8>(v)),
);
impl_as_value!(
    u16,
    Value::UInt16,
    Value::UInt8(Some(v), ..) => Ok(v as _),
    Value::Int16(Some(v), ..) => u16::try_from(v).map_err(|_| out_of_range::<u16>(v)),
);
impl_as_value!(
    u32,
    Value::UInt32,
    Value::UInt16(Some(v), ..) => Ok(v as _),
    Value::UInt8(Some(v), ..) => Ok(v as _),
);
impl_as_value!(
    u64,
    Value::UInt64,
    Value::UInt32(Some(v), ..) => Ok(v as _),
    Value::UInt16(Some(v), ..) => Ok(v as _),
    Value::UInt8(Some(v), ..) => Ok(v as _),
    Value::Decimal(Some(v), ..) => {
        let error = Error::msg(format!("Value {v}: Decimal does not fit into u64"));
        if !v.is_integer() {
            return Err(error.context("The value is not a integer"));
        }
        v.to_u64().ok_or(error)
    }
);

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v), ..) => Ok(v.into()),
                    $($pat_rest => $expr_rest,)*
                    _ => Err(cannot_convert::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value!(
    bool,
    Value::Boolean,
    Value::Int8(Some(v), ..) => Ok(v != 0),
    Value::Int16(Some(v), ..) => Ok(v != 0),
    Value::Int32(Some(v), ..) => Ok(v != 0),
    Value::Int64(Some(v), ..) => Ok(v != 0),
    Value::UInt8(Some(v), ..) => Ok(v != 0),
    Value::UInt16(Some(v), ..) => Ok(v != 0),
    Value::UInt32(Some(v), ..) => Ok(v != 0),
    Value::UInt64(Some(v), ..) => Ok(v != 0),
);
impl_as_value!(
    f32,
    Value::Float32,
    Value::Float64(Some(v), ..) => Ok(v as _),
    Value::Decimal(Some(v), ..) => v
        .to_f32()
        .ok_or_else(|| Error::msg(format!("Value {v}: Decimal does not fit into f32"))),
);
impl_as_value!(
    f64,
    Value::Float64,
    Value::Float32(Some(v), ..) => Ok(v as _),
    Value::Decimal(Some(v), ..) => v
        .to_f64()
        .ok_or_else(|| Error::msg(format!("Value {v}: Decimal does not fit into f64"))),
);
impl_as_value!(
    char,
    Value::Char,
    Value::Varchar(Some(ref v), ..) => {
        let mut chars = v.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::msg(format!(
                "Cannot convert Value::Varchar `{}` into a char, it must contain exactly one character",
                truncate_long!(v)
            ))),
        }
    }
);
impl_as_value!(
    String,
    Value::Varchar,
    Value::Char(Some(v), ..) => Ok(v.into()),
);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(
    Uuid,
    Value::Uuid,
    Value::Varchar(Some(ref v), ..) => Ok(Uuid::parse_str(v)?),
);
impl_as_value!(
    Date,
    Value::Date,
    Value::Varchar(Some(ref v), ..) => parse_time(v, &["[year]-[month]-[day]"]),
);
impl_as_value!(
    Time,
    Value::Time,
    Value::Varchar(Some(ref v), ..) => parse_time(
        v,
        &[
            "[hour]:[minute]:[second].[subsecond]",
            "[hour]:[minute]:[second]",
            "[hour]:[minute]",
        ],
    ),
);
impl_as_value!(
    PrimitiveDateTime,
    Value::Timestamp,
    Value::Varchar(Some(ref v), ..) => parse_time(
        v,
        &[
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]",
            "[year]-[month]-[day]T[hour]:[minute]:[second]",
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]",
            "[year]-[month]-[day] [hour]:[minute]:[second]",
        ],
    ),
);
impl_as_value!(
    OffsetDateTime,
    Value::TimestampWithTimezone,
    Value::Timestamp(Some(v), ..) => Ok(v.assume_utc()),
    Value::Varchar(Some(ref v), ..) => parse_time(
        v,
        &[
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]",
            "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]",
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]",
            "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]",
            "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]",
        ],
    ),
);

/// Tries each format in turn, the first one consuming the whole input wins.
fn parse_time<T>(input: &str, formats: &[&str]) -> Result<T>
where
    T: TryFrom<Parsed, Error = time::error::TryFromParsed>,
{
    for format in formats {
        let items = parse_borrowed::<2>(format)?;
        let mut parsed = Parsed::new();
        if let Ok(remaining) = parsed.parse_items(input.as_bytes(), &items)
            && remaining.is_empty()
        {
            return Ok(parsed.try_into()?);
        }
    }
    Err(Error::msg(format!(
        "Cannot parse `{}` as {}",
        truncate_long!(input),
        any::type_name::<T>()
    )))
}

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None, 0, 0)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self), 0, self.scale() as _)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(Some(v), ..) => Ok(v),
            Value::Int8(Some(v), ..) => Ok(Decimal::new(v as i64, 0)),
            Value::Int16(Some(v), ..) => Ok(Decimal::new(v as i64, 0)),
            Value::Int32(Some(v), ..) => Ok(Decimal::new(v as i64, 0)),
            Value::Int64(Some(v), ..) => Ok(Decimal::new(v, 0)),
            Value::UInt8(Some(v), ..) => Ok(Decimal::new(v as i64, 0)),
            Value::UInt16(Some(v), ..) => Ok(Decimal::new(v as i64, 0)),
            Value::UInt32(Some(v), ..) => Ok(Decimal::new(v as i64, 0)),
            Value::UInt64(Some(v), ..) => Ok(Decimal::from(v)),
            Value::Float32(Some(v), ..) => {
                Decimal::from_f32(v).ok_or_else(|| cannot_convert::<Self>(&value))
            }
            Value::Float64(Some(v), ..) => {
                Decimal::from_f64(v).ok_or_else(|| cannot_convert::<Self>(&value))
            }
            Value::Varchar(Some(ref v), ..) => Ok(v.parse()?),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_empty_value() -> Value {
        Value::List(None, Box::new(T::as_empty_value()))
    }
    fn as_value(self) -> Value {
        Value::List(
            Some(self.into_iter().map(AsValue::as_value).collect()),
            Box::new(T::as_empty_value()),
        )
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(Some(v), ..) => v.into_iter().map(T::try_from_value).collect(),
            Value::List(None, ..) => Ok(Vec::new()),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl<'a> AsValue for Cow<'a, str> {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.into()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        String::try_from_value(value).map(Into::into)
    }
}

impl<T: AsValue> AsValue for Passive<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Passive::Set(v) => v.as_value(),
            Passive::NotSet => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(Passive::Set(<T as AsValue>::try_from_value(value)?))
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(if value.is_null() {
            None
        } else {
            Some(<T as AsValue>::try_from_value(value)?)
        })
    }
}

impl<T: AsValue> AsValue for Box<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        (*self).as_value()
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(Self::new(<T as AsValue>::try_from_value(value)?))
    }
}

impl<T: AsValue + Clone> AsValue for Arc<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        Arc::unwrap_or_clone(self).as_value()
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(Self::new(<T as AsValue>::try_from_value(value)?))
    }
}

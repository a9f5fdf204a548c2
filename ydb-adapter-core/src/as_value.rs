use crate::{Error, Result, Value};
use rust_decimal::Decimal;
use std::any;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`]
/// used for statement parameters and result rows.
///
/// Integer conversions accept narrower variants and the other signedness as
/// long as the value fits, out of range values are reported as errors.
///
/// # Examples
/// ```rust
/// use ydb_adapter_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int32(Some(42)));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The NULL of this type, keeps the type information.
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

fn mismatch<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert a value of type {} (`{}`) into {}",
        value.type_name(),
        value,
        any::type_name::<T>()
    ))
}

macro_rules! impl_as_value {
    ($source:ty, $variant:path $(, $accepted:path)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $variant(None)
            }
            fn as_value(self) -> Value {
                $variant(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $variant(Some(v)) => Ok(v.into()),
                    $($accepted(Some(v)) => <$source>::try_from(v).map_err(|e| {
                        Error::new(e).context(format!(
                            "Value `{}` does not fit into {}",
                            v,
                            any::type_name::<Self>()
                        ))
                    }),)*
                    _ => Err(mismatch::<Self>(&value)),
                }
            }
        }
    };
}

impl_as_value!(bool, Value::Bool);
impl_as_value!(i8, Value::Int8, Value::Int16, Value::Int32, Value::Int64, Value::Uint8);
impl_as_value!(
    i16,
    Value::Int16,
    Value::Int8,
    Value::Int32,
    Value::Int64,
    Value::Uint8,
    Value::Uint16,
);
impl_as_value!(
    i32,
    Value::Int32,
    Value::Int8,
    Value::Int16,
    Value::Int64,
    Value::Uint8,
    Value::Uint16,
    Value::Uint32,
);
impl_as_value!(
    i64,
    Value::Int64,
    Value::Int8,
    Value::Int16,
    Value::Int32,
    Value::Uint8,
    Value::Uint16,
    Value::Uint32,
    Value::Uint64,
);
impl_as_value!(u8, Value::Uint8, Value::Uint16, Value::Uint32, Value::Uint64, Value::Int8);
impl_as_value!(
    u16,
    Value::Uint16,
    Value::Uint8,
    Value::Uint32,
    Value::Uint64,
    Value::Int8,
    Value::Int16,
);
impl_as_value!(
    u32,
    Value::Uint32,
    Value::Uint8,
    Value::Uint16,
    Value::Uint64,
    Value::Int8,
    Value::Int16,
    Value::Int32,
);
impl_as_value!(
    u64,
    Value::Uint64,
    Value::Uint8,
    Value::Uint16,
    Value::Uint32,
    Value::Int8,
    Value::Int16,
    Value::Int32,
    Value::Int64,
);
impl_as_value!(f32, Value::Float);
impl_as_value!(f64, Value::Double, Value::Float);
impl_as_value!(Box<[u8]>, Value::Bytes);
impl_as_value!(Date, Value::Date);
impl_as_value!(PrimitiveDateTime, Value::Datetime);
impl_as_value!(OffsetDateTime, Value::Timestamp);
impl_as_value!(Duration, Value::Interval);
impl_as_value!(Uuid, Value::Uuid);

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None, 22, 9)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self), 22, 9)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(Some(v), ..) => Ok(v),
            Value::Int64(Some(v)) => Ok(v.into()),
            Value::Int32(Some(v)) => Ok(v.into()),
            Value::Uint64(Some(v)) => Ok(v.into()),
            Value::Uint32(Some(v)) => Ok(v.into()),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for &str {
    fn as_empty_value() -> Value {
        Value::Utf8(None)
    }
    fn as_value(self) -> Value {
        Value::Utf8(Some(self.into()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Err(Error::msg(format!(
            "Cannot borrow a &str out of the owned value `{}`, decode into String instead",
            value
        )))
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Utf8(None)
    }
    fn as_value(self) -> Value {
        Value::Utf8(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Utf8(Some(v)) | Value::Json(Some(v)) => Ok(v),
            Value::Bytes(Some(v)) => String::from_utf8(v.into()).map_err(|e| {
                Error::new(e).context("The binary string is not valid UTF-8")
            }),
            _ => Err(mismatch::<Self>(&value)),
        }
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
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
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
            Value::List(Some(values), ..) => values.into_iter().map(T::try_from_value).collect(),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

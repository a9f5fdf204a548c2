use rust_decimal::Decimal;
use std::fmt::{self, Display, Formatter};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

/// Dynamically typed YDB value.
///
/// Every typed variant wraps an `Option` so that a NULL still carries its
/// column type, `Value::Null` is the untyped NULL.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Uint8(Option<u8>),
    Uint16(Option<u16>),
    Uint32(Option<u32>),
    Uint64(Option<u64>),
    Float(Option<f32>),
    Double(Option<f64>),
    Decimal(Option<Decimal>, /* precision: */ u8, /* scale: */ u8),
    /// Binary string, the `String` type of YDB.
    Bytes(Option<Box<[u8]>>),
    Utf8(Option<String>),
    Json(Option<String>),
    Date(Option<Date>),
    Datetime(Option<PrimitiveDateTime>),
    Timestamp(Option<OffsetDateTime>),
    Interval(Option<Duration>),
    Uuid(Option<Uuid>),
    List(Option<Vec<Value>>, /* item type: */ Box<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null
            | Value::Bool(None)
            | Value::Int8(None)
            | Value::Int16(None)
            | Value::Int32(None)
            | Value::Int64(None)
            | Value::Uint8(None)
            | Value::Uint16(None)
            | Value::Uint32(None)
            | Value::Uint64(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::Decimal(None, ..)
            | Value::Bytes(None)
            | Value::Utf8(None)
            | Value::Json(None)
            | Value::Date(None)
            | Value::Datetime(None)
            | Value::Timestamp(None)
            | Value::Interval(None)
            | Value::Uuid(None)
            | Value::List(None, ..) => true,
            _ => false,
        }
    }

    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Decimal(.., l_prec, l_scale), Self::Decimal(.., r_prec, r_scale)) => {
                l_prec == r_prec && l_scale == r_scale
            }
            (Self::List(.., l), Self::List(.., r)) => l.same_type(r),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }

    /// Name of the YDB type this value belongs to.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "Null".into(),
            Value::Bool(..) => "Bool".into(),
            Value::Int8(..) => "Int8".into(),
            Value::Int16(..) => "Int16".into(),
            Value::Int32(..) => "Int32".into(),
            Value::Int64(..) => "Int64".into(),
            Value::Uint8(..) => "Uint8".into(),
            Value::Uint16(..) => "Uint16".into(),
            Value::Uint32(..) => "Uint32".into(),
            Value::Uint64(..) => "Uint64".into(),
            Value::Float(..) => "Float".into(),
            Value::Double(..) => "Double".into(),
            Value::Decimal(.., precision, scale) => format!("Decimal({},{})", precision, scale),
            Value::Bytes(..) => "String".into(),
            Value::Utf8(..) => "Utf8".into(),
            Value::Json(..) => "Json".into(),
            Value::Date(..) => "Date".into(),
            Value::Datetime(..) => "Datetime".into(),
            Value::Timestamp(..) => "Timestamp".into(),
            Value::Interval(..) => "Interval".into(),
            Value::Uuid(..) => "Uuid".into(),
            Value::List(.., item) => format!("List<{}>", item.type_name()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("NULL");
        }
        match self {
            Value::Bool(Some(v)) => write!(f, "{}", v),
            Value::Int8(Some(v)) => write!(f, "{}", v),
            Value::Int16(Some(v)) => write!(f, "{}", v),
            Value::Int32(Some(v)) => write!(f, "{}", v),
            Value::Int64(Some(v)) => write!(f, "{}", v),
            Value::Uint8(Some(v)) => write!(f, "{}", v),
            Value::Uint16(Some(v)) => write!(f, "{}", v),
            Value::Uint32(Some(v)) => write!(f, "{}", v),
            Value::Uint64(Some(v)) => write!(f, "{}", v),
            Value::Float(Some(v)) => write!(f, "{}", v),
            Value::Double(Some(v)) => write!(f, "{}", v),
            Value::Decimal(Some(v), ..) => write!(f, "{}", v),
            Value::Bytes(Some(v)) => write!(f, "{}", String::from_utf8_lossy(v)),
            Value::Utf8(Some(v)) => f.write_str(v),
            Value::Json(Some(v)) => f.write_str(v),
            Value::Date(Some(v)) => write!(f, "{}", v),
            Value::Datetime(Some(v)) => write!(f, "{}", v),
            Value::Timestamp(Some(v)) => write!(f, "{}", v),
            Value::Interval(Some(v)) => write!(f, "{}", v),
            Value::Uuid(Some(v)) => write!(f, "{}", v),
            Value::List(Some(values), ..) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            _ => f.write_str("NULL"),
        }
    }
}

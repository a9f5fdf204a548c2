/// Semantic kind of a column, as seen by an object mapper on top of the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    SmallInteger,
    Integer,
    BigInteger,
    Float,
    Char,
    DateTime,
    Date,
    Decimal,
    Uuid,
    Boolean,
    Json,
}

impl ColumnType {
    /// Looks up the kind of a driver type name.
    ///
    /// The lookup ignores case, optional wrappers (`Optional<T>`, `T?`) and type
    /// parameters (`Decimal(22,9)`). Unknown names return `None`.
    pub fn from_type_name(type_name: &str) -> Option<ColumnType> {
        let mut name = type_name.trim();
        loop {
            if name
                .get(..9)
                .is_some_and(|v| v.eq_ignore_ascii_case("optional<"))
                && let Some(inner) = name[9..].strip_suffix('>')
            {
                name = inner.trim();
            } else if let Some(inner) = name.strip_suffix('?') {
                name = inner.trim();
            } else {
                break;
            }
        }
        let name = match name.find('(') {
            Some(i) => &name[..i],
            None => name,
        };
        Some(match name.to_ascii_lowercase().as_str() {
            "uint8" => ColumnType::SmallInteger,
            "uint16" => ColumnType::Integer,
            "uint32" => ColumnType::BigInteger,
            "uint64" => ColumnType::BigInteger,
            "int8" => ColumnType::SmallInteger,
            "int16" => ColumnType::SmallInteger,
            "int32" => ColumnType::Integer,
            "int64" => ColumnType::BigInteger,
            "float" | "float32" => ColumnType::Float,
            "double" | "float64" => ColumnType::Float,
            "string" | "fixedstring" | "utf8" => ColumnType::Char,
            "datetime" | "timestamp" => ColumnType::DateTime,
            "date" => ColumnType::Date,
            "decimal" => ColumnType::Decimal,
            "uuid" => ColumnType::Uuid,
            "bool" | "boolean" => ColumnType::Boolean,
            "json" | "jsondocument" => ColumnType::Json,
            _ => return None,
        })
    }
}

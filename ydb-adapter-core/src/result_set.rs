use crate::{ColumnType, Value};
use std::{collections::VecDeque, sync::Arc};

/// Owned row values, aligned by index with the columns of the result set.
pub type Row = Box<[Value]>;

/// Column of a result set as reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Driver type name, for example `Int32` or `Optional<Utf8>`.
    pub type_name: String,
}

impl Column {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn column_type(&self) -> Option<ColumnType> {
        ColumnType::from_type_name(&self.type_name)
    }
}

/// Rows produced by one executed statement.
///
/// Rows are consumed destructively from the front, `remaining()` only ever
/// decreases once the set is built.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub columns: Arc<[Column]>,
    pub rows: VecDeque<Row>,
}

impl ResultSet {
    pub fn new(columns: impl Into<Arc<[Column]>>, rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            columns: columns.into(),
            rows: rows.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn take_one(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    /// Takes at most `count` rows, fewer when not enough remain.
    pub fn take(&mut self, count: usize) -> Vec<Row> {
        let count = count.min(self.rows.len());
        self.rows.drain(..count).collect()
    }

    pub fn take_all(&mut self) -> Vec<Row> {
        self.rows.drain(..).collect()
    }
}

/// Cursor column description in the classic seven items layout.
///
/// Only the name is filled from the result set, the remaining items are left
/// empty until the driver reports the corresponding metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDescription {
    pub name: String,
    pub type_code: Option<ColumnType>,
    pub display_size: Option<usize>,
    pub internal_size: Option<usize>,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
    pub null_ok: Option<bool>,
}

impl ColumnDescription {
    pub fn from_column(column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(count: i32) -> ResultSet {
        ResultSet::new(
            [Column::new("id", "Int32")],
            (0..count).map(|i| Box::new([Value::Int32(Some(i))]) as Row),
        )
    }

    #[test]
    fn take_never_pads() {
        let mut set = rows(5);
        assert_eq!(set.take(2).len(), 2);
        assert_eq!(set.remaining(), 3);
        assert_eq!(set.take(10).len(), 3);
        assert!(set.is_exhausted());
        assert!(set.take(4).is_empty());
        assert!(set.take_one().is_none());
    }

    #[test]
    fn fifo_order() {
        let mut set = rows(3);
        assert_eq!(
            set.take_one().as_deref(),
            Some(&[Value::Int32(Some(0))][..])
        );
        let rest = set.take_all();
        assert_eq!(rest[0][0], Value::Int32(Some(1)));
        assert_eq!(rest[1][0], Value::Int32(Some(2)));
        assert_eq!(set.remaining(), 0);
    }

    #[test]
    fn description_only_name() {
        let description = ColumnDescription::from_column(&Column::new("amount", "Decimal(22,9)"));
        assert_eq!(description.name, "amount");
        assert_eq!(description.type_code, None);
        assert_eq!(description.precision, None);
        assert_eq!(description.null_ok, None);
    }
}

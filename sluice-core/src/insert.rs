use crate::{Column, TableRef, Value};
use std::{borrow::Cow, collections::BTreeMap};

/// One entry of a `VALUES` row.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertValue {
    /// A literal, SQL `NULL` included.
    Value(Value),
    /// The `DEFAULT` keyword: the database applies the column default or sequence.
    Default,
}

impl From<Value> for InsertValue {
    fn from(value: Value) -> Self {
        InsertValue::Value(value)
    }
}

/// An `INSERT INTO .. VALUES ..` statement, not yet rendered for a dialect.
///
/// Each row holds exactly one entry per column, in column order. Build it with
/// [`Insert::single`], [`Insert::from_pairs`] or [`Insert::batch`] and render it
/// with [`SqlWriter::write_insert`](crate::SqlWriter::write_insert).
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: TableRef,
    pub columns: Vec<Cow<'static, str>>,
    pub rows: Vec<Vec<InsertValue>>,
    pub returning: bool,
}

impl Insert {
    /// Single row statement from `(column, value)` pairs, kept in the given order.
    ///
    /// An empty list produces a statement without columns, which most dialects reject.
    pub fn from_pairs(
        table: TableRef,
        pairs: impl IntoIterator<Item = (Cow<'static, str>, Value)>,
        returning: bool,
    ) -> Self {
        let (columns, row): (Vec<_>, Vec<_>) = pairs
            .into_iter()
            .map(|(name, value)| (name, InsertValue::Value(value)))
            .unzip();
        Self {
            table,
            columns,
            rows: vec![row],
            returning,
        }
    }

    /// Single row statement listing only the columns that are set, in reflection order.
    pub fn single(
        table: TableRef,
        columns: impl IntoIterator<Item = Column>,
        returning: bool,
    ) -> Self {
        Self::from_pairs(
            table,
            columns
                .into_iter()
                .filter_map(|c| Some((c.name, c.value.into_value()?))),
            returning,
        )
    }

    /// Multi row statement reconciling instances that expose different columns.
    ///
    /// The column list is the union of every name seen, sorted in descending
    /// order. Any position an instance does not fill (the column is missing or
    /// unset) holds [`InsertValue::Default`]. Rows keep the input order. A name
    /// repeated within the same instance keeps its last value.
    pub fn batch<I, C>(table: TableRef, instances: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = Column>,
    {
        let mut data = BTreeMap::<Cow<'static, str>, Vec<Option<Value>>>::new();
        let mut count = 0;
        for (i, columns) in instances.into_iter().enumerate() {
            for column in columns {
                let slots = data.entry(column.name).or_default();
                slots.resize(i + 1, None);
                slots[i] = column.value.into_value();
            }
            count = i + 1;
        }
        let (columns, slots): (Vec<_>, Vec<_>) = data.into_iter().rev().unzip();
        let mut rows = vec![Vec::with_capacity(columns.len()); count];
        for mut column in slots {
            column.resize(count, None);
            for (row, value) in rows.iter_mut().zip(column) {
                row.push(value.map_or(InsertValue::Default, InsertValue::Value));
            }
        }
        log::trace!(
            "Batch insert into {} reconciled {} rows over {} columns",
            table.full_name(),
            count,
            columns.len()
        );
        Self {
            table,
            columns,
            rows,
            returning: false,
        }
    }

    /// True when there is no row to insert.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

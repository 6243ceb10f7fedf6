use crate::{Fragment, Insert, InsertValue, TableRef, Value, separated_by, writer::WriteContext};
use std::fmt::Write;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($this:ident, $context:ident, $out:ident, $value:expr) => {{
        if $value.is_infinite() {
            $this.write_value_infinity($context, $out, $value.is_sign_negative());
        } else if $value.is_nan() {
            $this.write_value_nan($context, $out);
        } else {
            let mut buffer = ryu::Buffer::new();
            $out.push_str(buffer.format($value));
        }
    }};
}

/// Dialect printer converting statements into concrete SQL strings.
///
/// Every method has a default producing the PostgreSQL / DuckDB flavour, a
/// dialect overrides only what differs.
pub trait SqlWriter: Send + Sync {
    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(
        &self,
        _context: &mut WriteContext,
        out: &mut String,
        value: &str,
        search: char,
        replace: &str,
    ) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, context: &mut WriteContext, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(context, out, value, '"', "\"\"");
        out.push('"');
    }

    /// Render a table reference, schema qualified when the schema is not empty.
    fn write_table_ref(&self, context: &mut WriteContext, out: &mut String, value: &TableRef) {
        if !value.schema.is_empty() {
            self.write_identifier_quoted(context, out, &value.schema);
            out.push('.');
        }
        self.write_identifier_quoted(context, out, &value.name);
    }

    /// Render a concrete value (including proper quoting / escaping).
    fn write_value(&self, context: &mut WriteContext, out: &mut String, value: &Value) {
        match value {
            v if v.is_null() => self.write_value_none(context, out),
            Value::Boolean(Some(v)) => self.write_value_bool(context, out, *v),
            Value::Int8(Some(v)) => write_integer!(out, *v),
            Value::Int16(Some(v)) => write_integer!(out, *v),
            Value::Int32(Some(v)) => write_integer!(out, *v),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::UInt8(Some(v)) => write_integer!(out, *v),
            Value::UInt16(Some(v)) => write_integer!(out, *v),
            Value::UInt32(Some(v)) => write_integer!(out, *v),
            Value::UInt64(Some(v)) => write_integer!(out, *v),
            Value::Float32(Some(v)) => write_float!(self, context, out, *v),
            Value::Float64(Some(v)) => write_float!(self, context, out, *v),
            Value::Decimal(Some(v), ..) => drop(write!(out, "{}", v)),
            Value::Char(Some(v)) => {
                let mut buf = [0u8; 4];
                self.write_value_string(context, out, v.encode_utf8(&mut buf));
            }
            Value::Varchar(Some(v)) => self.write_value_string(context, out, v),
            Value::Blob(Some(v)) => self.write_value_blob(context, out, v.as_ref()),
            Value::Date(Some(v)) => self.write_value_date(context, out, v, false),
            Value::Time(Some(v)) => self.write_value_time(context, out, v, false),
            Value::Timestamp(Some(v)) => self.write_value_timestamp(context, out, v),
            Value::TimestampWithTimezone(Some(v)) => {
                self.write_value_timestamptz(context, out, v)
            }
            Value::Uuid(Some(v)) => self.write_value_uuid(context, out, v),
            Value::List(Some(v), ..) => self.write_value_list(context, out, v),
            _ => {
                log::error!("Cannot write {:?}", value);
            }
        };
    }

    /// Render NULL literal.
    fn write_value_none(&self, _context: &mut WriteContext, out: &mut String) {
        out.push_str("NULL");
    }

    /// Render the DEFAULT keyword of a VALUES row.
    fn write_value_default(&self, _context: &mut WriteContext, out: &mut String) {
        out.push_str("DEFAULT");
    }

    /// Render boolean literal.
    fn write_value_bool(&self, _context: &mut WriteContext, out: &mut String, value: bool) {
        out.push_str(["false", "true"][value as usize]);
    }

    /// Render +/- infinity as a cast string.
    fn write_value_infinity(&self, _context: &mut WriteContext, out: &mut String, negative: bool) {
        out.push_str(if negative {
            "CAST('-inf' AS DOUBLE PRECISION)"
        } else {
            "CAST('inf' AS DOUBLE PRECISION)"
        });
    }

    /// Render NaN as a cast string.
    fn write_value_nan(&self, _context: &mut WriteContext, out: &mut String) {
        out.push_str("CAST('nan' AS DOUBLE PRECISION)");
    }

    /// Render and escape a string literal using single quotes.
    fn write_value_string(&self, context: &mut WriteContext, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(context, out, value, '\'', "''");
        out.push('\'');
    }

    /// Render a blob literal using hex escapes.
    fn write_value_blob(&self, _context: &mut WriteContext, out: &mut String, value: &[u8]) {
        out.push_str("'\\x");
        for b in value {
            let _ = write!(out, "{:02X}", b);
        }
        out.push('\'');
    }

    /// Render a DATE literal (optionally as part of TIMESTAMP composition).
    fn write_value_date(
        &self,
        _context: &mut WriteContext,
        out: &mut String,
        value: &Date,
        timestamp: bool,
    ) {
        let b = if timestamp { "" } else { "'" };
        let _ = write!(
            out,
            "{b}{:04}-{:02}-{:02}{b}",
            value.year(),
            value.month() as u8,
            value.day()
        );
    }

    /// Render a TIME literal (optionally as part of TIMESTAMP composition).
    fn write_value_time(
        &self,
        _context: &mut WriteContext,
        out: &mut String,
        value: &Time,
        timestamp: bool,
    ) {
        let mut subsecond = value.nanosecond();
        let mut width = 9;
        while width > 1 && subsecond % 10 == 0 {
            subsecond /= 10;
            width -= 1;
        }
        let b = if timestamp { "" } else { "'" };
        let _ = write!(
            out,
            "{b}{:02}:{:02}:{:02}.{:0width$}{b}",
            value.hour(),
            value.minute(),
            value.second(),
            subsecond
        );
    }

    /// Render a TIMESTAMP literal.
    fn write_value_timestamp(
        &self,
        context: &mut WriteContext,
        out: &mut String,
        value: &PrimitiveDateTime,
    ) {
        out.push('\'');
        self.write_value_date(context, out, &value.date(), true);
        out.push('T');
        self.write_value_time(context, out, &value.time(), true);
        out.push('\'');
    }

    /// Render a TIMESTAMPTZ literal, normalized to UTC.
    fn write_value_timestamptz(
        &self,
        context: &mut WriteContext,
        out: &mut String,
        value: &OffsetDateTime,
    ) {
        let date_time = value.to_offset(time::UtcOffset::UTC);
        out.push('\'');
        self.write_value_date(context, out, &date_time.date(), true);
        out.push('T');
        self.write_value_time(context, out, &date_time.time(), true);
        out.push_str("+00:00'");
    }

    /// Render a UUID as a string literal.
    fn write_value_uuid(&self, _context: &mut WriteContext, out: &mut String, value: &Uuid) {
        let _ = write!(out, "'{}'", value);
    }

    /// Render list literal.
    fn write_value_list(&self, context: &mut WriteContext, out: &mut String, value: &[Value]) {
        let mut context = context.switch_fragment(Fragment::ListLiteral);
        out.push('[');
        separated_by(
            out,
            value,
            |out, v| {
                self.write_value(&mut context, out, v);
            },
            ",",
        );
        out.push(']');
    }

    /// Render one entry of a VALUES row.
    fn write_insert_value(
        &self,
        context: &mut WriteContext,
        out: &mut String,
        value: &InsertValue,
    ) {
        match value {
            InsertValue::Value(v) => self.write_value(context, out, v),
            InsertValue::Default => self.write_value_default(context, out),
        }
    }

    /// Emit the trailing RETURNING fragment.
    fn write_insert_returning(&self, _context: &mut WriteContext, out: &mut String) {
        out.push_str("\nRETURNING *");
    }

    /// Emit INSERT (single/multi-row) optionally returning the inserted rows.
    fn write_insert(&self, out: &mut String, insert: &Insert) {
        out.reserve(64 + insert.columns.len() * (16 + insert.rows.len() * 16));
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("INSERT INTO ");
        let mut context = WriteContext::new(Fragment::SqlInsertInto);
        self.write_table_ref(&mut context, out, &insert.table);
        out.push_str(" (");
        separated_by(
            out,
            &insert.columns,
            |out, v| {
                self.write_identifier_quoted(&mut context, out, v);
            },
            ", ",
        );
        out.push_str(") VALUES\n");
        let mut context = context.switch_fragment(Fragment::SqlInsertIntoValues);
        separated_by(
            out,
            &insert.rows,
            |out, row| {
                out.push('(');
                separated_by(
                    out,
                    row,
                    |out, v| self.write_insert_value(&mut context, out, v),
                    ", ",
                );
                out.push(')');
            },
            ",\n",
        );
        if insert.returning {
            let mut context = context.switch_fragment(Fragment::SqlInsertIntoReturning);
            self.write_insert_returning(&mut context, out);
        }
        out.push(';');
    }
}

/// Fallback generic SQL writer (closest to PostgreSQL / DuckDB conventions).
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;
impl GenericSqlWriter {
    /// Construct a new generic writer.
    pub const fn new() -> Self {
        Self
    }
}
impl SqlWriter for GenericSqlWriter {}

/// MySQL / MariaDB flavour: backtick identifiers, no `T` separator in timestamps.
#[derive(Default, Debug, Clone, Copy)]
pub struct MySqlSqlWriter;
impl MySqlSqlWriter {
    pub const fn new() -> Self {
        Self
    }
}
impl SqlWriter for MySqlSqlWriter {
    fn write_identifier_quoted(&self, context: &mut WriteContext, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(context, out, value, '`', "``");
        out.push('`');
    }

    fn write_value_bool(&self, _context: &mut WriteContext, out: &mut String, value: bool) {
        out.push(if value { '1' } else { '0' });
    }

    fn write_value_blob(&self, _context: &mut WriteContext, out: &mut String, value: &[u8]) {
        out.push_str("X'");
        for b in value {
            let _ = write!(out, "{:02X}", b);
        }
        out.push('\'');
    }

    fn write_value_timestamp(
        &self,
        context: &mut WriteContext,
        out: &mut String,
        value: &PrimitiveDateTime,
    ) {
        out.push('\'');
        self.write_value_date(context, out, &value.date(), true);
        out.push(' ');
        self.write_value_time(context, out, &value.time(), true);
        out.push('\'');
    }

    fn write_value_timestamptz(
        &self,
        context: &mut WriteContext,
        out: &mut String,
        value: &OffsetDateTime,
    ) {
        let date_time = value.to_offset(time::UtcOffset::UTC);
        self.write_value_timestamp(
            context,
            out,
            &PrimitiveDateTime::new(date_time.date(), date_time.time()),
        );
    }
}

#[cfg(test)]
mod tests {
    use sluice::{Column, ColumnValue, DecodeError, FromRow, Passive, RowLabeled, Table, Value};
    use std::sync::Arc;

    #[derive(Table, FromRow, Default, Debug, PartialEq)]
    struct OrderLine {
        #[sluice(name = "line_id")]
        _id: Passive<i64>,
        _product: String,
        quantity: u32,
        #[sluice(default)]
        note: Option<String>,
        #[sluice(ignore)]
        cache: Vec<u8>,
        r#type: char,
    }

    #[derive(Table)]
    #[sluice(name = "metrics", schema = "")]
    struct Metric {
        value: f64,
    }

    #[derive(Table)]
    #[sluice(schema = "inventory")]
    struct StockLevel {
        sku: String,
    }

    fn row(labels: &[&str], values: Vec<Value>) -> RowLabeled {
        RowLabeled::new(
            labels.iter().map(|v| v.to_string()).collect::<Arc<[String]>>(),
            values.into(),
        )
    }

    #[test]
    fn table_names() {
        assert_eq!(OrderLine::table_name(), "order_line");
        assert_eq!(OrderLine::schema_name(), None);
        assert_eq!(Metric::table_name(), "metrics");
        assert_eq!(Metric::schema_name(), None);
        assert_eq!(StockLevel::table_name(), "stock_level");
        assert_eq!(StockLevel::schema_name(), Some("inventory"));
        assert_eq!(StockLevel::table_ref(None).full_name(), "inventory.stock_level");
        assert_eq!(StockLevel::table_ref(Some("")).full_name(), "stock_level");
        assert_eq!(OrderLine::table_ref(Some("sales")).full_name(), "sales.order_line");
    }

    #[test]
    fn table_columns() {
        let line = OrderLine {
            _id: Passive::NotSet,
            _product: "bolt".into(),
            quantity: 12,
            note: None,
            cache: vec![1, 2, 3],
            r#type: 'A',
        };
        assert_eq!(
            line.columns(),
            [
                Column::unset("line_id"),
                Column::new("product", Value::Varchar(Some("bolt".into()))),
                Column::new("quantity", Value::UInt32(Some(12))),
                Column::new("note", Value::Varchar(None)),
                Column::new("type", Value::Char(Some('A'))),
            ]
        );
        let line = OrderLine {
            _id: Passive::Set(3),
            ..line
        };
        assert_eq!(line.columns()[0].value, ColumnValue::Set(Value::Int64(Some(3))));
        let metric = Metric { value: 0.25 };
        assert_eq!(metric.columns()[0].name, "value");
    }

    #[test]
    fn from_row_by_label() {
        let decoded = OrderLine::from_row(row(
            &["type", "quantity", "unknown", "product", "line_id"],
            vec![
                Value::Varchar(Some("B".into())),
                Value::UInt16(Some(4)),
                Value::Boolean(Some(true)),
                Value::Varchar(Some("nut".into())),
                Value::Int64(Some(41)),
            ],
        ))
        .expect("The row has every required column");
        assert_eq!(
            decoded,
            OrderLine {
                _id: Passive::Set(41),
                _product: "nut".into(),
                quantity: 4,
                note: None,
                cache: Vec::new(),
                r#type: 'B',
            }
        );
    }

    #[test]
    fn from_row_defaults() {
        let decoded = OrderLine::from_row(row(
            &["product", "quantity", "type", "note"],
            vec![
                Value::Varchar(Some("washer".into())),
                Value::UInt32(Some(100)),
                Value::Char(Some('C')),
                Value::Varchar(Some("fragile".into())),
            ],
        ))
        .expect("The passive column may be missing");
        assert_eq!(decoded._id, Passive::NotSet);
        assert_eq!(decoded.note.as_deref(), Some("fragile"));
    }

    #[test]
    fn from_row_missing_column() {
        let error = OrderLine::from_row(row(
            &["product", "type"],
            vec![Value::Varchar(Some("nut".into())), Value::Char(Some('A'))],
        ))
        .expect_err("The quantity is required");
        assert_eq!(
            error.downcast_ref::<DecodeError>(),
            Some(&DecodeError::MissingColumn {
                column: "quantity".into(),
                target: "OrderLine",
            })
        );
        assert_eq!(
            error.to_string(),
            "Column `quantity` does not exist in the row provided, cannot decode OrderLine"
        );
    }
}

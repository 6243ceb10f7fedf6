#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rust_decimal::Decimal;
    use sluice::{FromRow, Passive, Table, Value};
    use sluice_tests::{MockConnection, init_logs};
    use time::{
        Date, OffsetDateTime, PrimitiveDateTime,
        macros::{date, datetime},
    };
    use uuid::Uuid;

    #[derive(Table, FromRow, Debug, Clone, PartialEq)]
    #[sluice(name = "payments", schema = "billing")]
    struct Payment {
        id: Uuid,
        amount: Decimal,
        currency: String,
        booked_on: Date,
        settled_at: Option<OffsetDateTime>,
        created_at: Passive<PrimitiveDateTime>,
    }

    fn payment() -> Payment {
        Payment {
            id: Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
            amount: Decimal::new(1999, 2),
            currency: "EUR".into(),
            booked_on: date!(2025-06-01),
            settled_at: Some(datetime!(2025-06-01 10:30 +02:00)),
            created_at: Passive::NotSet,
        }
    }

    #[tokio::test]
    async fn insert_typed_literals() {
        init_logs();
        let mut connection = MockConnection::new();
        payment()
            .insert_non_returning(&mut connection, None)
            .await
            .expect("Insert should succeed");
        assert_eq!(
            connection.queries(),
            [indoc! {r#"
                INSERT INTO "billing"."payments" ("id", "amount", "currency", "booked_on", "settled_at") VALUES
                ('67e55044-10b1-426f-9247-bb680e5fe0c8', 19.99, 'EUR', '2025-06-01', '2025-06-01T08:30:00.0+00:00');
            "#}
            .trim()]
        );
    }

    #[tokio::test]
    async fn insert_returning_text_row() {
        init_logs();
        let mut connection = MockConnection::new();
        connection.respond_rows(
            &["id", "amount", "currency", "booked_on", "settled_at", "created_at"],
            [[
                Value::Varchar(Some("67e55044-10b1-426f-9247-bb680e5fe0c8".into())),
                Value::Varchar(Some("19.99".into())),
                Value::Varchar(Some("EUR".into())),
                Value::Varchar(Some("2025-06-01".into())),
                Value::Varchar(Some("2025-06-01 08:30:00+00:00".into())),
                Value::Varchar(Some("2025-06-01 08:30:01.25".into())),
            ]],
        );
        let stored = payment()
            .insert(&mut connection, None)
            .await
            .expect("Insert should return the stored row");
        assert_eq!(
            stored,
            Payment {
                created_at: Passive::Set(datetime!(2025-06-01 08:30:01.25)),
                ..payment()
            }
        );
    }

    #[tokio::test]
    async fn batch_insert_typed_values() {
        init_logs();
        let mut connection = MockConnection::new();
        let items = [
            payment(),
            Payment {
                id: Uuid::nil(),
                amount: Decimal::new(-5, 0),
                settled_at: None,
                created_at: Passive::Set(datetime!(2025-06-02 00:00)),
                ..payment()
            },
        ];
        Payment::batch_insert(&mut connection, &items, Some("ledger"))
            .await
            .expect("Batch insert should succeed");
        assert_eq!(
            connection.queries(),
            [indoc! {r#"
                INSERT INTO "ledger"."payments" ("settled_at", "id", "currency", "created_at", "booked_on", "amount") VALUES
                ('2025-06-01T08:30:00.0+00:00', '67e55044-10b1-426f-9247-bb680e5fe0c8', 'EUR', DEFAULT, '2025-06-01', 19.99),
                (NULL, '00000000-0000-0000-0000-000000000000', 'EUR', '2025-06-02T00:00:00.0', '2025-06-01', -5);
            "#}
            .trim()]
        );
    }
}

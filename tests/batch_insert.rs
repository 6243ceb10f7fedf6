#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sluice::{Column, Error, Passive, Table, Value};
    use sluice_tests::{MockConnection, init_logs};
    use std::iter;

    #[derive(Table)]
    #[sluice(name = "person", schema = "crm")]
    struct Person {
        id: Passive<i64>,
        name: String,
        age: Option<i32>,
    }

    /// Exposes `age` only when it is known.
    struct Sparse {
        name: &'static str,
        age: Option<i32>,
    }

    impl Table for Sparse {
        fn table_name() -> &'static str {
            "person"
        }

        fn columns(&self) -> Vec<Column> {
            let mut columns = vec![Column::new("name", Value::from(self.name))];
            if let Some(age) = self.age {
                columns.push(Column::new("age", Value::from(age)));
            }
            columns
        }
    }

    #[tokio::test]
    async fn batch_insert_reconciles_columns() {
        init_logs();
        let mut connection = MockConnection::new();
        connection.respond_affected(2);
        let items = [
            Sparse {
                name: "x",
                age: None,
            },
            Sparse {
                name: "y",
                age: Some(5),
            },
        ];
        Sparse::batch_insert(&mut connection, &items, None)
            .await
            .expect("Batch insert should succeed");
        assert_eq!(
            connection.queries(),
            [indoc! {r#"
                INSERT INTO "person" ("name", "age") VALUES
                ('x', DEFAULT),
                ('y', 5);
            "#}
            .trim()]
        );
    }

    #[tokio::test]
    async fn batch_insert_passive_and_schema() {
        init_logs();
        let mut connection = MockConnection::new();
        let items = vec![
            Person {
                id: Passive::NotSet,
                name: "x".into(),
                age: None,
            },
            Person {
                id: Passive::Set(7),
                name: "y".into(),
                age: Some(5),
            },
        ];
        Person::batch_insert(&mut connection, &items, Some("archive"))
            .await
            .expect("Batch insert should succeed");
        assert_eq!(
            connection.queries(),
            [indoc! {r#"
                INSERT INTO "archive"."person" ("name", "id", "age") VALUES
                ('x', DEFAULT, NULL),
                ('y', 7, 5);
            "#}
            .trim()]
        );
        Person::batch_insert(&mut connection, &items[..1], None)
            .await
            .expect("Batch insert should succeed");
        assert_eq!(
            connection.queries()[1],
            indoc! {r#"
                INSERT INTO "crm"."person" ("name", "id", "age") VALUES
                ('x', DEFAULT, NULL);
            "#}
            .trim()
        );
    }

    #[tokio::test]
    async fn batch_insert_empty() {
        init_logs();
        let mut connection = MockConnection::new();
        Person::batch_insert(&mut connection, iter::empty(), None)
            .await
            .expect("An empty batch does nothing");
        Person::batch_insert(&mut connection, &Vec::<Person>::new(), Some("archive"))
            .await
            .expect("An empty batch does nothing");
        assert!(connection.queries().is_empty());
    }

    #[tokio::test]
    async fn batch_insert_executor_error() {
        init_logs();
        let mut connection = MockConnection::new();
        connection.respond_error(Error::msg("value too long for type character varying(8)"));
        let items = [Sparse {
            name: "overflowing",
            age: Some(3),
        }];
        let error = Sparse::batch_insert(&mut connection, &items, None)
            .await
            .expect_err("The executor failure must surface");
        assert_eq!(
            error.to_string(),
            "value too long for type character varying(8)"
        );
        assert_eq!(error.chain().count(), 1);
        assert_eq!(connection.queries().len(), 1);
    }

    #[tokio::test]
    async fn batch_insert_is_repeatable() {
        init_logs();
        let mut connection = MockConnection::new();
        let items = [
            Sparse {
                name: "b",
                age: Some(1),
            },
            Sparse {
                name: "a",
                age: None,
            },
        ];
        for _ in 0..2 {
            Sparse::batch_insert(&mut connection, items.iter(), None)
                .await
                .expect("Batch insert should succeed");
        }
        let queries = connection.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0], queries[1]);
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sluice_core::{
        Column, GenericSqlWriter, Insert, InsertValue, MySqlSqlWriter, Passive, SqlWriter,
        TableRef, Value, resolve_schema,
    };
    use std::borrow::Cow;

    const WRITER: GenericSqlWriter = GenericSqlWriter::new();

    fn render(writer: &impl SqlWriter, insert: &Insert) -> String {
        let mut out = String::new();
        writer.write_insert(&mut out, insert);
        out
    }

    #[test]
    fn insert_from_pairs_keeps_order() {
        let insert = Insert::from_pairs(
            TableRef::new("person"),
            [
                (Cow::Borrowed("name"), Value::from("Alice")),
                (Cow::Borrowed("age"), Value::from(30i32)),
                (Cow::Borrowed("email"), Value::Varchar(None)),
            ],
            false,
        );
        assert_eq!(insert.columns, ["name", "age", "email"]);
        assert_eq!(insert.rows.len(), 1);
        assert_eq!(
            render(&WRITER, &insert),
            indoc! {r#"
                INSERT INTO "person" ("name", "age", "email") VALUES
                ('Alice', 30, NULL);
            "#}
            .trim()
        );
    }

    #[test]
    fn insert_returning() {
        let insert = Insert::from_pairs(
            TableRef::new("person").with_schema(Some("crm")),
            [(Cow::Borrowed("name"), Value::from("Bob"))],
            true,
        );
        assert_eq!(
            render(&WRITER, &insert),
            indoc! {r#"
                INSERT INTO "crm"."person" ("name") VALUES
                ('Bob')
                RETURNING *;
            "#}
            .trim()
        );
    }

    #[test]
    fn insert_single_skips_unset() {
        let insert = Insert::single(
            TableRef::new("person"),
            [
                Column::new("id", Passive::<i64>::NotSet),
                Column::new("name", Value::from("Carol")),
                Column::new("created_at", Passive::Set(7i64)),
                Column::unset("updated_at"),
            ],
            false,
        );
        assert_eq!(insert.columns, ["name", "created_at"]);
        assert_eq!(
            insert.rows,
            [[
                InsertValue::Value(Value::Varchar(Some("Carol".into()))),
                InsertValue::Value(Value::Int64(Some(7))),
            ]]
        );
    }

    #[test]
    fn batch_fills_missing_with_default() {
        let insert = Insert::batch(
            TableRef::new("person"),
            [
                vec![Column::new("name", Value::from("x"))],
                vec![
                    Column::new("name", Value::from("y")),
                    Column::new("age", Value::from(5i32)),
                ],
            ],
        );
        assert!(!insert.returning);
        assert_eq!(insert.columns, ["name", "age"]);
        assert_eq!(
            render(&WRITER, &insert),
            indoc! {r#"
                INSERT INTO "person" ("name", "age") VALUES
                ('x', DEFAULT),
                ('y', 5);
            "#}
            .trim()
        );
    }

    #[test]
    fn batch_columns_descending() {
        let insert = Insert::batch(
            TableRef::new("t"),
            [
                vec![
                    Column::new("b", Value::from(1i32)),
                    Column::new("d", Value::from(2i32)),
                ],
                vec![
                    Column::new("a", Value::from(3i32)),
                    Column::new("c", Value::from(4i32)),
                ],
                vec![],
            ],
        );
        assert_eq!(insert.columns, ["d", "c", "b", "a"]);
        assert_eq!(
            render(&WRITER, &insert),
            indoc! {r#"
                INSERT INTO "t" ("d", "c", "b", "a") VALUES
                (2, DEFAULT, 1, DEFAULT),
                (DEFAULT, 4, DEFAULT, 3),
                (DEFAULT, DEFAULT, DEFAULT, DEFAULT);
            "#}
            .trim()
        );
    }

    #[test]
    fn batch_unset_and_null() {
        let insert = Insert::batch(
            TableRef::new("t"),
            [
                vec![
                    Column::new("id", Passive::<i32>::NotSet),
                    Column::new("note", Value::Varchar(None)),
                ],
                vec![
                    Column::new("id", Passive::Set(10i32)),
                    Column::new("note", Value::from("ok")),
                ],
            ],
        );
        assert_eq!(insert.columns, ["note", "id"]);
        assert_eq!(
            insert.rows,
            [
                [
                    InsertValue::Value(Value::Varchar(None)),
                    InsertValue::Default,
                ],
                [
                    InsertValue::Value(Value::Varchar(Some("ok".into()))),
                    InsertValue::Value(Value::Int32(Some(10))),
                ],
            ]
        );
    }

    #[test]
    fn batch_repeated_name_keeps_last() {
        let insert = Insert::batch(
            TableRef::new("t"),
            [vec![
                Column::new("a", Value::from(1i32)),
                Column::new("a", Value::from(2i32)),
            ]],
        );
        assert_eq!(insert.columns, ["a"]);
        assert_eq!(insert.rows, [[InsertValue::Value(Value::Int32(Some(2)))]]);
    }

    #[test]
    fn batch_empty() {
        let insert = Insert::batch(TableRef::new("t"), Vec::<Vec<Column>>::new());
        assert!(insert.is_empty());
        assert!(insert.columns.is_empty());
    }

    #[test]
    fn batch_is_deterministic() {
        let rows = || {
            [
                vec![
                    Column::new("z", Value::from(1i32)),
                    Column::new("m", Value::from("a")),
                ],
                vec![Column::new("k", Value::from(true))],
            ]
        };
        let first = Insert::batch(TableRef::new("t"), rows());
        let second = Insert::batch(TableRef::new("t"), rows());
        assert_eq!(first, second);
        assert_eq!(render(&WRITER, &first), render(&WRITER, &second));
    }

    #[test]
    fn insert_mysql_dialect() {
        let insert = Insert::batch(
            TableRef::new("flags").with_schema(Some("app")),
            [
                vec![Column::new("enabled", Value::from(true))],
                vec![
                    Column::new("enabled", Value::from(false)),
                    Column::new("data", Value::from(Box::<[u8]>::from([0x0a, 0xff]))),
                ],
            ],
        );
        assert_eq!(
            render(&MySqlSqlWriter::new(), &insert),
            indoc! {"
                INSERT INTO `app`.`flags` (`enabled`, `data`) VALUES
                (1, DEFAULT),
                (0, X'0AFF');
            "}
            .trim()
        );
    }

    #[test]
    fn quoted_identifiers() {
        let insert = Insert::from_pairs(
            TableRef::new("we\"ird"),
            [(Cow::Borrowed("sel\"ect"), Value::from(1i8))],
            false,
        );
        assert_eq!(
            render(&WRITER, &insert),
            indoc! {r#"
                INSERT INTO "we""ird" ("sel""ect") VALUES
                (1);
            "#}
            .trim()
        );
    }

    #[test]
    fn schema_resolution() {
        assert_eq!(resolve_schema(Some("explicit"), Some("declared")), Some("explicit"));
        assert_eq!(resolve_schema(None, Some("declared")), Some("declared"));
        assert_eq!(resolve_schema(None, None), None);
        assert_eq!(resolve_schema(Some(""), Some("declared")), None);
        assert_eq!(TableRef::new("t").with_schema(Some("s")).full_name(), "s.t");
        assert_eq!(TableRef::new("t").with_schema(None::<&str>).full_name(), "t");
    }
}

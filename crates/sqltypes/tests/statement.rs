//! Statement building, dialect selection and options.

#[cfg(test)]
mod tests {
    use sqltypes::{
        BuildOutcome, Dialect, Error, Expression, JsonPath, Options, SkipReason, Statement, Value,
        expr::{self, Expr, raw_with},
        types::{Json, Uuid},
    };

    /// An expression that compares a column with a bound value, to exercise the trait from
    /// outside the crate.
    struct ColumnEquals(&'static str, Value);

    impl Expression for ColumnEquals {
        fn build(&self, stmt: &mut Statement) -> BuildOutcome {
            stmt.write_quoted(self.0);
            stmt.write_str(" = ");
            stmt.bind(self.1.clone());
            BuildOutcome::Written
        }
    }

    #[test]
    fn custom_expressions_compose_with_json_paths() -> anyhow::Result<()> {
        let mut stmt = Statement::new(Dialect::Postgres);
        stmt.write_str("SELECT * FROM users WHERE ");
        stmt.build(&ColumnEquals("name", Value::text("json-2")))
            .require_fragment()?;
        stmt.write_str(" AND ");
        stmt.build(&JsonPath::new("attributes").equals("admin", ["role"]))
            .require_fragment()?;
        assert_eq!(
            stmt.sql(),
            r#"SELECT * FROM users WHERE "name" = $1 AND json_extract_path_text("attributes"::json,$2) = $3"#
        );
        assert_eq!(
            stmt.explain(),
            r#"SELECT * FROM users WHERE "name" = 'json-2' AND json_extract_path_text("attributes"::json,'role') = 'admin'"#
        );
        Ok(())
    }

    #[test]
    fn push_bind_encodes_column_types() -> anyhow::Result<()> {
        let id = Uuid::parse("936da01f-9abd-4d9d-80c7-02af85c822a8")?;
        let mut stmt = Statement::new(Dialect::MySql);
        stmt.write_str("INSERT INTO t VALUES (");
        stmt.push_bind(id)?;
        stmt.write_char(',');
        stmt.push_bind(Json(vec![1, 2]))?;
        stmt.write_char(',');
        stmt.push_bind(None::<i32>)?;
        stmt.write_char(')');
        assert_eq!(
            stmt.explain(),
            "INSERT INTO t VALUES ('936da01f-9abd-4d9d-80c7-02af85c822a8','[1,2]',NULL)"
        );
        let (sql, args) = stmt.into_parts();
        assert_eq!(sql, "INSERT INTO t VALUES (?,?,?)");
        assert_eq!(args.len(), 3);
        Ok(())
    }

    #[test]
    fn value_expressions_follow_the_dialect() -> anyhow::Result<()> {
        for (dialect, expected) in [
            (Dialect::MySql, "CAST(? AS JSON)"),
            (Dialect::MariaDb, "?"),
            (Dialect::Postgres, "$1"),
        ] {
            let value: Expr = Json(["a"]).value_expr(&dialect)?;
            let mut stmt = Statement::new(dialect);
            stmt.build(&value).require_fragment()?;
            assert_eq!(stmt.sql(), expected);
            assert!(!stmt.tainted());
        }
        Ok(())
    }

    #[test]
    fn raw_sql_keeps_unbound_question_marks() {
        let mut stmt = Statement::new(Dialect::Postgres);
        stmt.push_expr(&raw_with("tags ? ?", ["admin"]));
        assert_eq!(stmt.sql(), "tags $1 ?");
        assert!(stmt.tainted());

        let mut stmt = Statement::new(Dialect::Sqlite);
        stmt.push_raw("deleted_at IS ");
        assert!(stmt.tainted());
        stmt.push_expr(&expr::null());
        assert_eq!(stmt.sql(), "deleted_at IS NULL");
    }

    #[test]
    fn identifiers_are_quoted_per_dialect() {
        assert_eq!(Dialect::MySql.quote_identifier("we`ird"), "`we``ird`");
        assert_eq!(Dialect::Postgres.quote_identifier(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(Dialect::Sqlite.quote_identifier("plain"), r#""plain""#);

        let stmt = Statement::new(Dialect::MariaDb);
        assert_eq!(stmt.dialect().name(), "mysql");
        assert_eq!(stmt.dialect().quote_identifier("t"), "`t`");
    }

    #[test]
    fn options_from_url_pick_the_dialect() -> anyhow::Result<()> {
        let opts = Options::from_url("postgresql://localhost/app")?;
        assert_eq!(opts.get_dialect(), &Dialect::Postgres);

        let opts = Options::from_url("mysql://localhost/app")?.server_version("10.11.2-MariaDB");
        assert_eq!(opts.get_dialect(), &Dialect::MariaDb);

        let opts = Options::from_url("oracle://localhost/app")?;
        assert!(!opts.get_dialect().is_supported());

        assert!(matches!(
            Options::from_url("::not a url::"),
            Err(Error::Config(_))
        ));
        Ok(())
    }

    #[test]
    fn statement_uses_its_options() {
        let opts = Options::default().dialect(Dialect::Postgres).disable_logging();
        let mut stmt = Statement::with_options(opts);
        let outcome = stmt.build(&JsonPath::new("attributes"));
        assert_eq!(outcome, BuildOutcome::Skipped(SkipReason::Unconfigured));
        assert!(matches!(outcome.require_fragment(), Err(Error::Unconfigured)));
        assert_eq!(stmt.dialect(), &Dialect::Postgres);
        assert!(!stmt.options().log_settings().is_enabled());
    }

    #[test]
    fn default_dialect_is_sqlite() {
        assert_eq!(Statement::default().dialect(), &Dialect::Sqlite);
        assert_eq!("SQLite3".parse::<Dialect>().ok(), Some(Dialect::Sqlite));
    }
}

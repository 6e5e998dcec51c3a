#[cfg(test)]
mod tests {
    use crate::condition::{Condition, ConditionValue, Operator, Prefix};
    use crate::engine::Engine;
    use crate::error::ConfigError;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    fn render(c: &Condition, engine: Engine, include_prefix: bool) -> (String, Vec<SqlValue>) {
        let mut binds = Vec::new();
        let sql = c.render(&mut binds, engine, include_prefix, false);
        (sql, binds)
    }

    #[test]
    fn operator_parse() {
        let cases = vec![
            ("<", Operator::LessThan),
            (">", Operator::GreaterThan),
            ("<>", Operator::NotEqual),
            ("!=", Operator::NotEqual),
            ("=", Operator::Equal),
            ("like", Operator::Like),
            (" In ", Operator::In),
            ("is", Operator::Is),
            ("is  not", Operator::IsNot),
            ("IS NOT", Operator::IsNot),
        ];
        for (s, expected) in cases {
            assert_eq!(s.parse::<Operator>(), Ok(expected));
        }
        assert_eq!(
            ">=".parse::<Operator>(),
            Err(ConfigError::InvalidOperator(">=".to_string()))
        );
    }

    #[test]
    fn prefix_parse() {
        assert_eq!("and".parse::<Prefix>(), Ok(Prefix::And));
        assert_eq!(" OR".parse::<Prefix>(), Ok(Prefix::Or));
        assert!("XOR".parse::<Prefix>().is_err());
    }

    #[test]
    fn prepared_scalar_condition() {
        let c = Condition::new("age", Operator::GreaterThan, 18).unwrap();
        let (sql, binds) = render(&c, Engine::PostgreSQL, false);
        assert_eq!(sql, " \"age\" > ?");
        assert_eq!(binds, vec![SqlValue::I64(18)]);
    }

    #[test]
    fn unsigned_values_bind_and_inline() {
        let id: u64 = 1 << 40;
        let mut c = Condition::new("id", Operator::Equal, id).unwrap();
        assert_eq!(render(&c, Engine::MySQL, false).1, vec![SqlValue::U64(id)]);
        c.set_prepared(false);
        assert_eq!(render(&c, Engine::MySQL, false).0, " `id` = 1099511627776");

        let c = Condition::new("id", Operator::In, 5_usize).unwrap();
        assert_eq!(c.value(), &ConditionValue::IntList(vec![5]));
    }

    #[test]
    fn prefix_only_when_requested() {
        let mut c = Condition::new("name", Operator::Like, "a%").unwrap();
        c.set_prefix(Prefix::Or);
        assert_eq!(render(&c, Engine::MySQL, true).0, " OR `name` LIKE ?");
        assert_eq!(render(&c, Engine::MySQL, false).0, " `name` LIKE ?");
    }

    #[test]
    fn dotted_column_quoted_per_segment() {
        let c = Condition::new("u.id", Operator::Equal, 1).unwrap();
        assert_eq!(render(&c, Engine::SQLite, false).0, " \"u\".\"id\" = ?");
        assert_eq!(render(&c, Engine::MySQL, false).0, " `u`.`id` = ?");
    }

    #[test]
    fn keyword_check_leaves_plain_columns_bare() {
        let c = Condition::new("t.order", Operator::Equal, 1).unwrap();
        let mut binds = Vec::new();
        assert_eq!(
            c.render(&mut binds, Engine::MySQL, false, true),
            " t.`order` = ?"
        );
    }

    #[test]
    fn inline_scalar_condition() {
        let mut c = Condition::new("deleted_at", Operator::Is, SqlValue::Null).unwrap();
        c.set_prepared(false);
        let (sql, binds) = render(&c, Engine::PostgreSQL, false);
        assert_eq!(sql, " \"deleted_at\" IS NULL");
        assert!(binds.is_empty());

        let mut c = Condition::new("active", Operator::Equal, true).unwrap();
        c.set_prepared(false);
        assert_eq!(render(&c, Engine::PostgreSQL, false).0, " \"active\" = TRUE");
        assert_eq!(render(&c, Engine::SQLite, false).0, " \"active\" = 1");
    }

    #[test]
    fn value_override_sql_replaces_placeholder() {
        let mut c = Condition::new("version", Operator::Equal, 3).unwrap();
        c.set_value_override_sql("(? + 1)");
        let (sql, binds) = render(&c, Engine::PostgreSQL, false);
        assert_eq!(sql, " \"version\" = (? + 1)");
        assert_eq!(binds, vec![SqlValue::I64(3)]);

        c.set_prepared(false);
        assert_eq!(render(&c, Engine::PostgreSQL, false).0, " \"version\" = 3");
    }

    #[test]
    fn in_prepared_emits_one_placeholder_per_value() {
        let c = Condition::new("id", Operator::In, vec![3_i64, 1, 2]).unwrap();
        let (sql, binds) = render(&c, Engine::PostgreSQL, false);
        assert_eq!(sql, " \"id\" IN ( ?, ?, ? )");
        assert_eq!(
            binds,
            vec![SqlValue::I64(3), SqlValue::I64(1), SqlValue::I64(2)]
        );
    }

    #[test]
    fn in_inline_emits_integers() {
        let values = ConditionValue::list([SqlValue::from("7"), 2.9.into(), true.into()]).unwrap();
        let mut c = Condition::new("id", Operator::In, values).unwrap();
        c.set_prepared(false);
        let (sql, binds) = render(&c, Engine::MySQL, false);
        assert_eq!(sql, " `id` IN ( 7, 2, 1 )");
        assert!(binds.is_empty());
    }

    #[test]
    fn in_scalar_becomes_single_element_list() {
        let c = Condition::new("id", Operator::In, "42").unwrap();
        assert_eq!(c.value(), &ConditionValue::IntList(vec![42]));
        assert_eq!(render(&c, Engine::SQLite, false).0, " \"id\" IN ( ? )");
    }

    #[test]
    fn in_empty_list_renders_null() {
        let c = Condition::new("id", Operator::In, Vec::<i64>::new()).unwrap();
        let (sql, binds) = render(&c, Engine::PostgreSQL, false);
        assert_eq!(sql, " \"id\" IN ( NULL )");
        assert!(binds.is_empty());
    }

    #[test]
    fn in_rejects_non_integer_values() {
        assert_eq!(
            Condition::new("id", Operator::In, "abc").unwrap_err(),
            ConfigError::InvalidListValue("abc".to_string())
        );
        assert!(ConditionValue::list(["1", "x"]).is_err());
    }

    #[test]
    fn list_value_requires_in() {
        assert_eq!(
            Condition::new("id", Operator::Equal, vec![1_i64, 2]).unwrap_err(),
            ConfigError::ListValueForOperator(Operator::Equal)
        );

        let mut c = Condition::new("id", Operator::In, [1_i64, 2]).unwrap();
        assert!(c.set_operator(Operator::Equal).is_err());
        assert_eq!(c.operator(), Some(Operator::In));
    }

    #[test]
    fn set_operator_to_in_coerces_value() {
        let mut c = Condition::new("id", Operator::Equal, 5.5).unwrap();
        c.set_operator(Operator::In).unwrap();
        assert_eq!(c.value(), &ConditionValue::IntList(vec![5]));
    }

    #[test]
    fn invalid_columns_rejected() {
        for bad in [
            "", "1abc", "a.b.c", "a b", "a;drop", "name--", "\"age", "age\"", "t.\"age", "\"t.col\"",
        ] {
            assert_eq!(
                Condition::new(bad, Operator::Equal, 1).unwrap_err(),
                ConfigError::InvalidColumn(bad.to_string())
            );
        }
        for good in ["a", "_a1", "t.col", "\"t\".\"col\"", "\"select\""] {
            assert!(Condition::new(good, Operator::Equal, 1).is_ok(), "{good}");
        }
    }

    #[test]
    fn half_quoted_column_cannot_be_set() {
        let mut c = Condition::new("\"age\"", Operator::Equal, 1).unwrap();
        assert_eq!(
            c.set_column("t.\"age").unwrap_err(),
            ConfigError::InvalidColumn("t.\"age".to_string())
        );
        assert_eq!(render(&c, Engine::PostgreSQL, false).0, " \"age\" = ?");
        assert_eq!(render(&c, Engine::MySQL, false).0, " `age` = ?");
    }

    #[test]
    fn parenthesis_counts_are_clamped() {
        let mut c = Condition::new("a", Operator::Equal, 1).unwrap();
        assert_eq!(
            c.set_paren_before(15).unwrap_err(),
            ConfigError::TooManyParentheses(15)
        );
        c.set_paren_before(-1).unwrap();
        assert_eq!(c.paren_before(), 0);
        c.set_paren_after(10).unwrap();
        assert_eq!(c.paren_after(), 10);
        assert!(c.set_paren_after(11).is_err());
        assert_eq!(c.paren_after(), 10);
    }

    #[test]
    fn parentheses_wrap_the_body() {
        let mut c = Condition::new("a", Operator::Equal, 1).unwrap();
        c.set_paren_before(2).unwrap().set_paren_after(1).unwrap();
        c.set_prefix(Prefix::Or);
        assert_eq!(
            render(&c, Engine::PostgreSQL, true).0,
            " OR ( ( \"a\" = ? )"
        );
    }

    #[test]
    fn raw_sql_condition() {
        let c = Condition::from_raw_sql("   created_at > NOW()");
        assert!(c.is_raw());
        assert_eq!(c.column(), "");
        assert_eq!(c.operator(), None);
        assert!(!c.is_prepared());

        let (sql, binds) = render(&c, Engine::PostgreSQL, true);
        assert_eq!(sql, " AND created_at > NOW()");
        assert!(binds.is_empty());
    }

    #[test]
    fn raw_sql_prepared_appends_value() {
        let mut c = Condition::from_raw_sql("score > (? * 2)");
        c.set_prepared(true).set_value(10).unwrap();
        let (sql, binds) = render(&c, Engine::MySQL, false);
        assert_eq!(sql, " score > (? * 2)");
        assert_eq!(binds, vec![SqlValue::I64(10)]);
    }

    #[test]
    fn raw_sql_overrides_predicate() {
        let mut c = Condition::new("a", Operator::Equal, 1).unwrap();
        c.set_raw_sql("a = b");
        let (sql, binds) = render(&c, Engine::MySQL, false);
        assert_eq!(sql, " a = b");
        assert_eq!(binds, vec![SqlValue::I64(1)]);
    }

    #[test]
    fn render_does_not_mutate_condition() {
        let c = Condition::new("id", Operator::In, [1_i64, 2]).unwrap();
        let before = c.clone();
        let mut binds = vec![SqlValue::from("existing")];
        c.render(&mut binds, Engine::PostgreSQL, false, false);
        c.render(&mut binds, Engine::PostgreSQL, false, false);
        assert_eq!(c, before);
        assert_eq!(binds.len(), 5);
        assert_eq!(binds[0], SqlValue::from("existing"));
    }
}

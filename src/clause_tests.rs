#[cfg(test)]
mod tests {
    use crate::clause::Clause;
    use crate::condition::{Condition, Operator, Prefix};
    use crate::engine::Engine;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_clause_renders_nothing() {
        let clause = Clause::new();
        let mut binds = vec![SqlValue::I64(1)];
        assert_eq!(clause.render(&mut binds, Engine::PostgreSQL, false), "");
        assert_eq!(binds, vec![SqlValue::I64(1)]);
        assert!(clause.is_empty());
    }

    #[test]
    fn single_condition_end_to_end() {
        let mut clause = Clause::new();
        clause
            .add_condition("age", Operator::GreaterThan, 18, Prefix::And)
            .unwrap();
        let (sql, binds) = clause.build(Engine::PostgreSQL, false);
        assert_eq!(sql, " WHERE \"age\" > ?");
        assert_eq!(binds, vec![SqlValue::I64(18)]);
    }

    #[test]
    fn first_prefix_is_never_emitted() {
        let mut clause = Clause::new();
        clause
            .add_condition("a", Operator::Equal, 1, Prefix::Or)
            .unwrap();
        clause
            .add_condition("b", Operator::Equal, 2, Prefix::Or)
            .unwrap();
        clause
            .add_condition("c", Operator::Equal, 3, Prefix::And)
            .unwrap();
        let (sql, binds) = clause.build(Engine::MySQL, false);
        assert_eq!(sql, " WHERE `a` = ? OR `b` = ? AND `c` = ?");
        assert_eq!(
            binds,
            vec![SqlValue::I64(1), SqlValue::I64(2), SqlValue::I64(3)]
        );
    }

    #[test]
    fn grouping_and_mixed_conditions() {
        let mut clause = Clause::new();
        clause
            .add_condition("status", Operator::In, [1_i64, 2], Prefix::And)
            .unwrap();
        clause
            .add_condition("name", Operator::Like, "a%", Prefix::And)
            .unwrap()
            .set_paren_before(1)
            .unwrap();
        clause
            .add_condition("name", Operator::Like, "b%", Prefix::Or)
            .unwrap()
            .set_paren_after(1)
            .unwrap();
        clause.add_raw_condition("deleted_at IS NULL", Prefix::And);

        let (sql, binds) = clause.build(Engine::PostgreSQL, false);
        assert_eq!(
            sql,
            " WHERE \"status\" IN ( ?, ? ) AND ( \"name\" LIKE ? OR \"name\" LIKE ? ) AND deleted_at IS NULL"
        );
        assert_eq!(
            binds,
            vec![
                SqlValue::I64(1),
                SqlValue::I64(2),
                SqlValue::from("a%"),
                SqlValue::from("b%"),
            ]
        );
    }

    #[test]
    fn raw_condition_is_not_prepared_by_default() {
        let mut clause = Clause::new();
        clause.add_raw_condition("1 = 1", Prefix::And);
        assert!(!clause[0].is_prepared());
        assert_eq!(
            clause.build(Engine::SQLite, false),
            (" WHERE 1 = 1".to_string(), Vec::<SqlValue>::new())
        );
    }

    #[test]
    fn binds_append_after_existing_values() {
        let mut clause = Clause::new();
        clause
            .add_condition("id", Operator::Equal, 9, Prefix::And)
            .unwrap();
        let mut binds = vec![SqlValue::from("x")];
        let sql = clause.render(&mut binds, Engine::PostgreSQL, false);
        assert_eq!(sql, " WHERE \"id\" = ?");
        assert_eq!(binds, vec![SqlValue::from("x"), SqlValue::I64(9)]);
    }

    #[test]
    fn keyword_checked_rendering() {
        let mut clause = Clause::new();
        clause
            .add_condition("user", Operator::Equal, "bob", Prefix::And)
            .unwrap();
        clause
            .add_condition("age", Operator::GreaterThan, 1, Prefix::And)
            .unwrap();
        assert_eq!(
            clause.build(Engine::PostgreSQL, true).0,
            " WHERE \"user\" = ? AND age > ?"
        );
    }

    #[test]
    fn collection_access() {
        let mut clause: Clause = [
            Condition::new("a", Operator::Equal, 1).unwrap(),
            Condition::new("b", Operator::Equal, 2).unwrap(),
        ]
        .into_iter()
        .collect();
        assert_eq!(clause.len(), 2);
        assert_eq!(clause[1].column(), "b");
        assert_eq!(clause.get(2), None);

        let old = clause
            .replace(0, Condition::new("z", Operator::Equal, 0).unwrap())
            .unwrap();
        assert_eq!(old.column(), "a");
        assert!(
            clause
                .replace(5, Condition::from_raw_sql("x"))
                .is_err()
        );

        clause[1].set_prefix(Prefix::Or);
        let columns: Vec<&str> = clause.iter().map(|c| c.column()).collect();
        assert_eq!(columns, vec!["z", "b"]);
        assert_eq!(clause.build(Engine::MySQL, false).0, " WHERE `z` = ? OR `b` = ?");

        clause.extend([Condition::from_raw_sql("c > 0")]);
        assert_eq!((&clause).into_iter().count(), 3);

        clause.clear();
        assert_eq!(clause.len(), 0);
        assert_eq!(clause.build(Engine::MySQL, false).0, "");
    }

    #[test]
    fn invalid_condition_is_not_appended() {
        let mut clause = Clause::new();
        assert!(
            clause
                .add_condition("bad column", Operator::Equal, 1, Prefix::And)
                .is_err()
        );
        assert!(clause.is_empty());
    }
}

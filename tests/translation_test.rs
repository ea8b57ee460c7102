//! End-to-end translation tests: GraphQL request text through intent
//! extraction into one compiled SELECT statement.

mod translation_tests {
    use async_graphql::parser::parse_query;
    use tablegate::query::{extract_intent, QueryIntent};
    use tablegate::sql::SelectBuilder;

    fn compile(table: &str, query: &str) -> String {
        let document = parse_query(query).expect("query should parse");
        let intent: QueryIntent = extract_intent(&document).expect("intent should extract");

        SelectBuilder::new(table)
            .with_filters(intent.filters)
            .with_projections(intent.projection)
            .with_sort_criteria(intent.sort)
            .with_pagination(intent.offset, intent.limit)
            .build()
            .expect("statement should compile")
    }

    #[test]
    fn test_filtered_paginated_projection() {
        let sql = compile(
            "payments",
            "{ payments(where: {amount: {_gt: 100}}, limit: 10, offset: 0) { id, amount } }",
        );

        assert_eq!(
            sql,
            "SELECT `id`, `amount` FROM `payments` WHERE `amount` > 100 LIMIT 10 OFFSET 0;"
        );
    }

    #[test]
    fn test_order_by_without_filter() {
        let sql = compile("payments", r#"{ payments(order_by: [{id: "desc"}]) { id } }"#);

        assert!(sql.contains("ORDER BY `id` desc"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_bare_query_uses_defaults() {
        let sql = compile("payments", "{ payments }");

        assert_eq!(sql, "SELECT * FROM `payments` LIMIT 100 OFFSET 0;");
    }

    #[test]
    fn test_scalar_condition_is_equality() {
        let sql = compile(
            "payments",
            r#"{ payments(where: {status: "settled"}) { id } }"#,
        );

        assert!(sql.contains("WHERE `status` = 'settled'"));
    }

    #[test]
    fn test_conjunction_in_source_order() {
        let sql = compile(
            "payments",
            r#"{ payments(where: {status: "settled", amount: {_gte: 10, _lte: 20}}) { id } }"#,
        );

        assert!(sql.contains(
            "WHERE `status` = 'settled' AND `amount` >= 10 AND `amount` <= 20"
        ));
    }

    #[test]
    fn test_in_operator_round_trip() {
        let sql = compile(
            "payments",
            "{ payments(where: {id: {_in: [1, 2, 3]}}) { id } }",
        );

        assert!(sql.contains("`id` IN (1, 2, 3)"));
    }

    #[test]
    fn test_multi_column_sort_precedence() {
        let sql = compile(
            "payments",
            r#"{ payments(order_by: [{id: "desc"}, {created_at: "asc"}]) { id } }"#,
        );

        assert!(sql.contains("ORDER BY `id` desc, `created_at` asc"));
    }

    #[test]
    fn test_unrecognized_operator_does_not_crash() {
        let sql = compile(
            "payments",
            "{ payments(where: {amount: {_like: 5, _gt: 1}}) { id } }",
        );

        assert!(sql.contains("`amount` > 1"));
        assert!(!sql.contains("_like"));
    }

    #[test]
    fn test_string_escaping_end_to_end() {
        let sql = compile(
            "payments",
            r#"{ payments(where: {memo: "O'Brien"}) { id } }"#,
        );

        assert!(sql.contains("`memo` = 'O''Brien'"));
    }

    #[test]
    fn test_statement_ends_with_single_separator() {
        let sql = compile("payments", "{ payments { id } }");

        assert!(sql.ends_with(';'));
        assert_eq!(sql.matches(';').count(), 1);
    }

    #[test]
    fn test_pagination_rendered_exactly_once() {
        let sql = compile("payments", "{ payments(limit: 7, offset: 3) { id } }");

        assert_eq!(sql.matches("LIMIT").count(), 1);
        assert_eq!(sql.matches("OFFSET").count(), 1);
        assert!(sql.contains("LIMIT 7 OFFSET 3"));
    }
}

//! Lexer and recursive-descent parser for the ParallaxSQL MySQL dialect.
//!
//! The lexer is pulled by the parser on demand; expression parsing uses
//! Pratt precedence climbing. Dialect extensions over stock MySQL: the
//! `HASH JOIN` and `PARALLEL ... JOIN` join kinds, and the `HASHFUNC`
//! builtin replacing the removed `HASH`.

pub mod expr;
pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::Lexer;
pub use parser::{
    parse_multi_with_options, parse_strict_with_options, parse_with_options, split, Parser,
};
pub use token::{Keyword, Token, TokenKind};

/// Per-parse configuration. No process-wide state: every parse carries its
/// own copy, so concurrent parses never interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treat `"..."` as quoted identifiers instead of string literals.
    pub ansi_quotes: bool,
    /// Version hints `/*!NNNNN ... */` with `NNNNN` at most this value are
    /// lexed inline; newer ones are skipped as comments.
    pub server_version: u32,
    /// Bound on statement and expression nesting.
    pub max_depth: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ansi_quotes: false,
            server_version: 999_999,
            max_depth: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxsql_ast::{
        BuiltinFunc, ComparisonOp, Expr, FunctionArgs, InsertSource, JoinCondition, JoinKind,
        ParallelJoinKind, Placeholder, QueryExpr, SelectExpr, SetOp, Statement, TableExpr,
        TableSource,
    };
    use pxsql_error::ErrorKind;
    use pxsql_types::Type;

    fn parse(sql: &str) -> Statement {
        parse_with_options(sql, &ParseOptions::default())
            .unwrap_or_else(|e| panic!("parse failed for {sql:?}: {e}"))
    }

    fn parse_err(sql: &str) -> pxsql_error::Error {
        parse_strict_with_options(sql, &ParseOptions::default())
            .err()
            .unwrap_or_else(|| panic!("expected error for {sql:?}"))
    }

    fn select(stmt: Statement) -> pxsql_ast::SelectStatement {
        match stmt {
            Statement::Select(s) => *s,
            other => panic!("expected SELECT, got {other:?}"),
        }
    }

    #[test]
    fn select_literal() {
        let sel = select(parse("SELECT 1"));
        assert!(sel.from.is_empty());
        assert_eq!(sel.exprs.len(), 1);
        match &sel.exprs[0] {
            SelectExpr::Aliased { expr: Expr::Literal(v, _), alias: None } => {
                assert_eq!(v.typ(), Type::Int64);
                assert_eq!(v.raw(), b"1");
            }
            other => panic!("unexpected select expr: {other:?}"),
        }
    }

    #[test]
    fn select_star_from() {
        let sel = select(parse("SELECT * FROM t"));
        assert_eq!(sel.exprs, vec![SelectExpr::Star(None)]);
        assert_eq!(sel.from.len(), 1);
    }

    #[test]
    fn select_qualified_star() {
        let sel = select(parse("SELECT t.*, db.t.* FROM t"));
        assert!(matches!(&sel.exprs[0], SelectExpr::Star(Some(t)) if t.name.as_str() == "t"));
        assert!(matches!(
            &sel.exprs[1],
            SelectExpr::Star(Some(t))
                if t.name.as_str() == "t"
                    && t.qualifier.as_ref().map(pxsql_ast::Ident::as_str) == Some("db")
        ));
    }

    #[test]
    fn hash_join_parses() {
        let sel = select(parse("SELECT * FROM x HASH JOIN y ON x.id = y.id"));
        let TableExpr::Join(join) = &sel.from[0] else {
            panic!("expected join, got {:?}", sel.from[0]);
        };
        assert_eq!(join.kind, JoinKind::Hash);
        assert!(matches!(&join.condition, JoinCondition::On(Expr::Comparison { op: ComparisonOp::Eq, .. })));
    }

    #[test]
    fn parallel_join_variants() {
        for (sql, expected) in [
            ("SELECT * FROM x PARALLEL JOIN y ON x.a = y.a", ParallelJoinKind::Inner),
            ("SELECT * FROM x PARALLEL INNER JOIN y ON x.a = y.a", ParallelJoinKind::Inner),
            ("SELECT * FROM x PARALLEL LEFT JOIN y ON x.a = y.a", ParallelJoinKind::Left),
            ("SELECT * FROM x PARALLEL LEFT OUTER JOIN y ON x.a = y.a", ParallelJoinKind::Left),
            ("SELECT * FROM x PARALLEL RIGHT JOIN y ON x.a = y.a", ParallelJoinKind::Right),
        ] {
            let sel = select(parse(sql));
            let TableExpr::Join(join) = &sel.from[0] else {
                panic!("expected join for {sql:?}");
            };
            assert_eq!(join.kind, JoinKind::Parallel(expected), "{sql}");
        }
    }

    #[test]
    fn parallel_does_not_compose_with_cross() {
        let err = parse_err("SELECT * FROM x PARALLEL CROSS JOIN y");
        assert_eq!(err.kind, ErrorKind::SyntaxError);
    }

    #[test]
    fn hash_and_parallel_still_work_as_identifiers() {
        let sel = select(parse("SELECT hash, parallel FROM t"));
        assert_eq!(sel.exprs.len(), 2);
        // And as aliases when no join follows.
        let sel = select(parse("SELECT * FROM t hash"));
        let TableExpr::Aliased(a) = &sel.from[0] else {
            panic!();
        };
        assert_eq!(a.alias.as_ref().unwrap().as_str(), "HASH");
    }

    #[test]
    fn hashfunc_is_builtin() {
        let sel = select(parse("SELECT HASHFUNC(a, b)"));
        let SelectExpr::Aliased { expr, .. } = &sel.exprs[0] else {
            panic!();
        };
        match expr {
            Expr::Builtin { func, args, .. } => {
                assert_eq!(*func, BuiltinFunc::Hashfunc);
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected builtin, got {other:?}"),
        }
    }

    #[test]
    fn bare_hash_call_is_unknown_function() {
        let err = parse_err("SELECT HASH(a)");
        assert_eq!(err.kind, ErrorKind::UnknownFunction);
        assert_eq!(err.pos.line, 1);
        assert_eq!(err.pos.col, 8);
    }

    #[test]
    fn select_semicolon_only_is_syntax_error() {
        let err = parse_err("SELECT ;");
        assert_eq!(err.kind, ErrorKind::SyntaxError);
        assert_eq!(err.pos.col, 8);
        assert!(err.expected.iter().any(|e| e == "identifier"));
        assert!(err.expected.iter().any(|e| e == "literal"));
        assert!(err.expected.iter().any(|e| e == "*"));
    }

    #[test]
    fn adjacent_strings_become_one_literal() {
        let sel = select(parse("SELECT 'a' 'b'"));
        let SelectExpr::Aliased { expr: Expr::Literal(v, _), alias } = &sel.exprs[0] else {
            panic!();
        };
        assert_eq!(v.typ(), Type::VarChar);
        assert_eq!(v.raw(), b"ab");
        assert!(alias.is_none());
    }

    #[test]
    fn version_hinted_statement_parses() {
        let sel = select(parse("/*!50000 SELECT 1 */"));
        assert_eq!(sel.exprs.len(), 1);
    }

    #[test]
    fn trailing_input_detected_in_strict_mode() {
        let err = parse_err("SELECT 1; SELECT 2");
        assert_eq!(err.kind, ErrorKind::TrailingInput);
        // Lenient mode ignores it.
        assert!(matches!(parse("SELECT 1; SELECT 2"), Statement::Select(_)));
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_err("").kind, ErrorKind::EmptyInput);
        assert_eq!(parse_err("   \n\t ").kind, ErrorKind::EmptyInput);
    }

    #[test]
    fn comment_only_statement() {
        let stmt = parse("/* just planning */");
        assert_eq!(stmt, Statement::CommentOnly("just planning".to_owned()));
        let stmt = parse("-- nothing here\n");
        assert_eq!(stmt, Statement::CommentOnly("nothing here".to_owned()));
    }

    #[test]
    fn cte_and_union() {
        let stmt = parse(
            "WITH RECURSIVE nums (n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM nums) \
             SELECT n FROM nums LIMIT 10",
        );
        let sel = select(stmt);
        let with = sel.with.unwrap();
        assert!(with.recursive);
        assert_eq!(with.ctes.len(), 1);
        assert_eq!(with.ctes[0].name.as_str(), "nums");
        assert!(matches!(with.ctes[0].query, QueryExpr::Union(_)));
        assert!(sel.limit.is_some());
    }

    #[test]
    fn union_order_limit_bind_to_whole() {
        let stmt = parse("SELECT a FROM t UNION SELECT b FROM u ORDER BY 1 LIMIT 5");
        let Statement::Union(u) = stmt else {
            panic!();
        };
        assert_eq!(u.op, SetOp::Union);
        assert_eq!(u.order_by.len(), 1);
        assert!(u.limit.is_some());
    }

    #[test]
    fn intersect_and_except() {
        let Statement::Union(u) = parse("SELECT a FROM t EXCEPT SELECT a FROM u") else {
            panic!();
        };
        assert_eq!(u.op, SetOp::Except);
        let Statement::Union(u) = parse("SELECT a FROM t INTERSECT ALL SELECT a FROM u") else {
            panic!();
        };
        assert_eq!(u.op, SetOp::IntersectAll);
    }

    #[test]
    fn window_function_with_frame() {
        let sel = select(parse(
            "SELECT SUM(x) OVER (PARTITION BY g ORDER BY ts ROWS BETWEEN 2 PRECEDING AND CURRENT ROW) FROM t",
        ));
        let SelectExpr::Aliased { expr: Expr::Function { over: Some(over), .. }, .. } =
            &sel.exprs[0]
        else {
            panic!("expected windowed function");
        };
        let pxsql_ast::Over::Spec(spec) = over else {
            panic!();
        };
        assert_eq!(spec.partition_by.len(), 1);
        assert_eq!(spec.order_by.len(), 1);
        assert!(spec.frame.is_some());
    }

    #[test]
    fn named_window_clause() {
        let sel = select(parse(
            "SELECT RANK() OVER w FROM t WINDOW w AS (ORDER BY score DESC)",
        ));
        assert_eq!(sel.windows.len(), 1);
        assert_eq!(sel.windows[0].name.as_str(), "w");
    }

    #[test]
    fn operator_precedence_shapes() {
        // a + b * c parses as a + (b * c).
        let sel = select(parse("SELECT a + b * c"));
        let SelectExpr::Aliased { expr, .. } = &sel.exprs[0] else {
            panic!();
        };
        let Expr::Binary { op: pxsql_ast::BinaryOp::Add, right, .. } = expr else {
            panic!("expected + at top, got {expr:?}");
        };
        assert!(matches!(**right, Expr::Binary { op: pxsql_ast::BinaryOp::Mul, .. }));

        // NOT a = b parses as NOT (a = b).
        let sel = select(parse("SELECT NOT a = b"));
        let SelectExpr::Aliased { expr, .. } = &sel.exprs[0] else {
            panic!();
        };
        assert!(matches!(expr, Expr::Not { .. }));

        // OR binds looser than AND.
        let sel = select(parse("SELECT a OR b AND c"));
        let SelectExpr::Aliased { expr, .. } = &sel.exprs[0] else {
            panic!();
        };
        let Expr::Or { right, .. } = expr else {
            panic!();
        };
        assert!(matches!(**right, Expr::And { .. }));
    }

    #[test]
    fn in_subquery_and_list() {
        let sel = select(parse("SELECT * FROM t WHERE a IN (1, 2, 3)"));
        let Expr::Comparison { op: ComparisonOp::In, right, .. } = sel.where_clause.unwrap()
        else {
            panic!();
        };
        assert!(matches!(*right, Expr::Tuple(ref items, _) if items.len() == 3));

        let sel = select(parse("SELECT * FROM t WHERE a NOT IN (SELECT b FROM u)"));
        let Expr::Comparison { op: ComparisonOp::NotIn, right, .. } = sel.where_clause.unwrap()
        else {
            panic!();
        };
        assert!(matches!(*right, Expr::Subquery(_, _)));
    }

    #[test]
    fn between_and_like_with_escape() {
        let sel = select(parse("SELECT * FROM t WHERE a BETWEEN 1 AND 10 AND b LIKE 'x%' ESCAPE '!'"));
        let Expr::And { left, right, .. } = sel.where_clause.unwrap() else {
            panic!();
        };
        assert!(matches!(*left, Expr::Between { not: false, .. }));
        assert!(
            matches!(*right, Expr::Comparison { op: ComparisonOp::Like, ref escape, .. } if escape.is_some())
        );
    }

    #[test]
    fn interval_arithmetic() {
        let sel = select(parse("SELECT created + INTERVAL 1 DAY FROM t"));
        let SelectExpr::Aliased { expr, .. } = &sel.exprs[0] else {
            panic!();
        };
        let Expr::Binary { right, .. } = expr else {
            panic!();
        };
        assert!(matches!(
            **right,
            Expr::Interval { unit: pxsql_types::IntervalUnit::Day, .. }
        ));
    }

    #[test]
    fn placeholders_are_numbered() {
        let sel = select(parse("SELECT * FROM t WHERE a = ? AND b = ? AND c = :named"));
        let where_clause = sel.where_clause.unwrap();
        let mut anons = Vec::new();
        collect_placeholders(&where_clause, &mut anons);
        assert_eq!(anons, vec![0, 1]);
    }

    fn collect_placeholders(e: &Expr, out: &mut Vec<u16>) {
        match e {
            Expr::Placeholder(Placeholder::Anonymous(n), _) => out.push(*n),
            Expr::And { left, right, .. } | Expr::Comparison { left, right, .. } => {
                collect_placeholders(left, out);
                collect_placeholders(right, out);
            }
            _ => {}
        }
    }

    #[test]
    fn insert_forms() {
        let Statement::Insert(ins) = parse("INSERT INTO t (a, b) VALUES (1, 2), (3, 4)") else {
            panic!();
        };
        assert_eq!(ins.columns.len(), 2);
        assert!(matches!(&ins.source, InsertSource::Values(rows) if rows.len() == 2));

        let Statement::Insert(ins) = parse("INSERT INTO t SELECT * FROM u") else {
            panic!();
        };
        assert!(matches!(ins.source, InsertSource::Select(_)));

        let Statement::Insert(ins) =
            parse("INSERT INTO t SET a = 1 ON DUPLICATE KEY UPDATE a = a + 1")
        else {
            panic!();
        };
        assert!(matches!(&ins.source, InsertSource::Set(assignments) if assignments.len() == 1));
        assert_eq!(ins.on_duplicate.len(), 1);

        let Statement::Insert(ins) = parse("REPLACE INTO t VALUES (1)") else {
            panic!();
        };
        assert_eq!(ins.action, pxsql_ast::InsertAction::Replace);
    }

    #[test]
    fn update_and_delete() {
        let Statement::Update(u) = parse("UPDATE t SET a = 1, b = b + 1 WHERE id = 3 LIMIT 10")
        else {
            panic!();
        };
        assert_eq!(u.assignments.len(), 2);
        assert!(u.where_clause.is_some());
        assert!(u.limit.is_some());

        let Statement::Delete(d) = parse("DELETE FROM t WHERE id = 3 ORDER BY id DESC LIMIT 1")
        else {
            panic!();
        };
        assert!(d.targets.is_empty());
        assert_eq!(d.order_by.len(), 1);

        let Statement::Delete(d) = parse("DELETE t1, t2 FROM t1 JOIN t2 ON t1.id = t2.id") else {
            panic!();
        };
        assert_eq!(d.targets.len(), 2);
    }

    #[test]
    fn create_table_with_constraints() {
        let Statement::CreateTable(ct) = parse(
            "CREATE TABLE IF NOT EXISTS users (\
               id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,\
               name VARCHAR(255) NOT NULL DEFAULT '',\
               role ENUM('admin', 'user') NOT NULL,\
               PRIMARY KEY (id),\
               UNIQUE KEY uniq_name (name),\
               CONSTRAINT fk_role FOREIGN KEY (role_id) REFERENCES roles (id) ON DELETE CASCADE\
             ) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4",
        ) else {
            panic!();
        };
        assert!(ct.if_not_exists);
        let pxsql_ast::CreateTableBody::Definition { columns, constraints, options } = &ct.body
        else {
            panic!();
        };
        assert_eq!(columns.len(), 3);
        assert_eq!(constraints.len(), 3);
        assert_eq!(options.len(), 2);
        assert_eq!(columns[2].typ.enum_values, vec!["admin", "user"]);
    }

    #[test]
    fn alter_table_actions() {
        let Statement::AlterTable(alter) = parse(
            "ALTER TABLE t ADD COLUMN c INT NOT NULL AFTER b, DROP COLUMN old, RENAME TO t2",
        ) else {
            panic!();
        };
        assert_eq!(alter.actions.len(), 3);
    }

    #[test]
    fn drop_statements() {
        assert!(matches!(parse("DROP TABLE IF EXISTS a, b"), Statement::DropTable(d) if d.if_exists && d.names.len() == 2));
        assert!(matches!(parse("DROP VIEW v"), Statement::DropView(_)));
        assert!(matches!(parse("DROP INDEX i ON t"), Statement::DropIndex(_)));
        assert!(matches!(parse("TRUNCATE TABLE t"), Statement::Truncate(_)));
    }

    #[test]
    fn create_index_and_view() {
        assert!(matches!(
            parse("CREATE UNIQUE INDEX idx ON t (a, b(10) DESC)"),
            Statement::CreateIndex(_)
        ));
        assert!(matches!(
            parse("CREATE OR REPLACE VIEW v (a) AS SELECT 1"),
            Statement::CreateView(v) if v.or_replace
        ));
    }

    #[test]
    fn transaction_statements() {
        assert_eq!(parse("BEGIN"), Statement::Begin);
        assert_eq!(parse("START TRANSACTION"), Statement::Begin);
        assert_eq!(parse("COMMIT"), Statement::Commit);
        assert!(matches!(parse("ROLLBACK"), Statement::Rollback(r) if r.to_savepoint.is_none()));
        assert!(matches!(
            parse("ROLLBACK TO SAVEPOINT sp"),
            Statement::Rollback(r) if r.to_savepoint.is_some()
        ));
        assert!(matches!(parse("SAVEPOINT sp"), Statement::Savepoint(_)));
        assert!(matches!(parse("RELEASE SAVEPOINT sp"), Statement::Release(_)));
    }

    #[test]
    fn prepared_statements() {
        assert!(matches!(
            parse("PREPARE s FROM 'SELECT ?'"),
            Statement::Prepare(p) if matches!(p.source, pxsql_ast::PrepareSource::Literal(_))
        ));
        assert!(matches!(
            parse("EXECUTE s USING @a, @b"),
            Statement::Execute(e) if e.vars.len() == 2
        ));
        assert!(matches!(parse("DEALLOCATE PREPARE s"), Statement::Deallocate(_)));
        assert!(matches!(parse("DROP PREPARE s"), Statement::Deallocate(_)));
    }

    #[test]
    fn admin_statements() {
        assert!(matches!(parse("SHOW DATABASES"), Statement::Show(_)));
        assert!(matches!(
            parse("SHOW FULL TABLES FROM db LIKE 't%'"),
            Statement::Show(s) if s.filter.is_some()
        ));
        assert!(matches!(parse("SHOW CREATE TABLE t"), Statement::Show(_)));
        assert!(matches!(parse("SHOW GLOBAL VARIABLES"), Statement::Show(_)));
        assert!(matches!(parse("USE db"), Statement::Use(_)));
        assert!(matches!(parse("FLUSH PRIVILEGES"), Statement::Flush(_)));
        assert!(matches!(parse("FLUSH TABLES t1, t2"), Statement::Flush(_)));
        assert!(matches!(parse("LOCK TABLES t READ, u WRITE"), Statement::Lock(_)));
        assert_eq!(parse("UNLOCK TABLES"), Statement::Unlock);
        assert!(matches!(parse("ANALYZE TABLE t"), Statement::Analyze(_)));
        assert!(matches!(parse("OPTIMIZE TABLE t"), Statement::Optimize(_)));
        assert!(matches!(parse("REPAIR TABLE t"), Statement::Repair(_)));
    }

    #[test]
    fn set_statements() {
        let Statement::Set(set) = parse("SET @x = 1, GLOBAL max_connections = 100") else {
            panic!();
        };
        assert_eq!(set.exprs.len(), 2);
        assert!(matches!(
            parse("SET NAMES utf8mb4 COLLATE utf8mb4_general_ci"),
            Statement::Set(_)
        ));
        assert!(matches!(parse("SET @@SESSION.sql_mode = 'ANSI'"), Statement::Set(_)));
        assert!(matches!(parse("SET CHARACTER SET utf8"), Statement::Set(_)));
    }

    #[test]
    fn explain_statements() {
        let Statement::Explain(e) = parse("EXPLAIN SELECT 1") else {
            panic!();
        };
        assert!(matches!(e.target, pxsql_ast::ExplainTarget::Statement(_)));
        let Statement::Explain(e) = parse("EXPLAIN FORMAT = JSON SELECT 1") else {
            panic!();
        };
        assert_eq!(e.format.as_deref(), Some("JSON"));
        let Statement::Explain(e) = parse("DESCRIBE t") else {
            panic!();
        };
        assert!(matches!(e.target, pxsql_ast::ExplainTarget::Table(_)));
    }

    #[test]
    fn call_and_load() {
        assert!(matches!(parse("CALL proc(1, 'x')"), Statement::Call(c) if c.args.len() == 2));
        let Statement::Load(l) = parse("LOAD DATA LOCAL INFILE '/tmp/x.csv' IGNORE INTO TABLE t (a, b)")
        else {
            panic!();
        };
        assert!(l.local);
        assert_eq!(l.columns.len(), 2);
    }

    #[test]
    fn subquery_sources() {
        let sel = select(parse("SELECT * FROM (SELECT a FROM t) AS sub"));
        let TableExpr::Aliased(a) = &sel.from[0] else {
            panic!();
        };
        assert!(matches!(a.source, TableSource::Subquery(_)));
        assert_eq!(a.alias.as_ref().unwrap().as_str(), "sub");
    }

    #[test]
    fn index_hints() {
        let sel = select(parse("SELECT * FROM t USE INDEX FOR ORDER BY (idx1, idx2) WHERE a = 1"));
        let TableExpr::Aliased(a) = &sel.from[0] else {
            panic!();
        };
        assert_eq!(a.hints.len(), 1);
        assert_eq!(a.hints[0].indexes.len(), 2);
    }

    #[test]
    fn deep_nesting_is_bounded() {
        let depth = 3000;
        let mut sql = String::from("SELECT ");
        for _ in 0..depth {
            sql.push('(');
        }
        sql.push('1');
        for _ in 0..depth {
            sql.push(')');
        }
        let err = parse_err(&sql);
        assert!(matches!(
            err.kind,
            ErrorKind::ExpressionTooDeep | ErrorKind::StatementTooNested
        ));
    }

    #[test]
    fn parse_multi_sequences() {
        let stmts =
            parse_multi_with_options("SELECT 1; SELECT 2;; COMMIT", &ParseOptions::default())
                .unwrap();
        assert_eq!(stmts.len(), 3);
        assert_eq!(stmts[2], Statement::Commit);
        assert!(
            parse_multi_with_options("", &ParseOptions::default())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn split_respects_quoting() {
        let pieces = split("SELECT 'a;b'; SELECT `x;y`; -- c;\nSELECT 2").unwrap();
        assert_eq!(
            pieces,
            vec!["SELECT 'a;b'", "SELECT `x;y`", "-- c;\nSELECT 2"]
        );
        assert!(split("'oops").is_err());
    }

    #[test]
    fn split_handles_block_comments() {
        let pieces = split("SELECT /* ; */ 1; SELECT 2").unwrap();
        assert_eq!(pieces, vec!["SELECT /* ; */ 1", "SELECT 2"]);
    }

    #[test]
    fn reserved_words_cannot_be_bare_identifiers() {
        assert!(parse_strict_with_options("SELECT select FROM t", &ParseOptions::default()).is_err());
        // But quoted they are fine.
        let sel = select(parse("SELECT `select` FROM `from`"));
        assert_eq!(sel.exprs.len(), 1);
    }

    #[test]
    fn nonreserved_words_are_identifiers() {
        let sel = select(parse("SELECT status, offset FROM warnings"));
        assert_eq!(sel.exprs.len(), 2);
    }

    #[test]
    fn count_star_and_distinct() {
        let sel = select(parse("SELECT COUNT(*), COUNT(DISTINCT a) FROM t"));
        let SelectExpr::Aliased { expr: Expr::Function { args, .. }, .. } = &sel.exprs[0] else {
            panic!();
        };
        assert!(matches!(args, FunctionArgs::Star));
        let SelectExpr::Aliased { expr: Expr::Function { distinct, .. }, .. } = &sel.exprs[1]
        else {
            panic!();
        };
        assert!(distinct);
    }

    #[test]
    fn case_cast_convert() {
        let sel = select(parse(
            "SELECT CASE a WHEN 1 THEN 'one' ELSE 'many' END, CAST(b AS CHAR(10)), CONVERT(c USING utf8mb4)",
        ));
        assert!(matches!(
            &sel.exprs[0],
            SelectExpr::Aliased { expr: Expr::Case { .. }, .. }
        ));
        assert!(matches!(
            &sel.exprs[1],
            SelectExpr::Aliased { expr: Expr::Cast { .. }, .. }
        ));
        assert!(matches!(
            &sel.exprs[2],
            SelectExpr::Aliased { expr: Expr::Convert { .. }, .. }
        ));
    }

    #[test]
    fn charset_introducer_expr() {
        let sel = select(parse("SELECT _utf8mb4'x'"));
        assert!(matches!(
            &sel.exprs[0],
            SelectExpr::Aliased { expr: Expr::Introduced { charset, .. }, .. } if charset == "utf8mb4"
        ));
    }

    #[test]
    fn select_for_update() {
        let sel = select(parse("SELECT * FROM t WHERE id = 1 FOR UPDATE"));
        assert_eq!(sel.lock, Some(pxsql_ast::LockMode::ForUpdate));
        let sel = select(parse("SELECT * FROM t LOCK IN SHARE MODE"));
        assert_eq!(sel.lock, Some(pxsql_ast::LockMode::ShareMode));
    }

    #[test]
    fn next_values_select() {
        let sel = select(parse("SELECT NEXT VALUE FROM seq"));
        assert!(matches!(&sel.exprs[0], SelectExpr::Next(_)));
        let sel = select(parse("SELECT NEXT 5 VALUES FROM seq"));
        assert!(matches!(&sel.exprs[0], SelectExpr::Next(_)));
    }
}

//! End-to-end scenarios: concrete inputs against their expected tree shapes,
//! plus the concurrency contract.

use pxsql::ast::{
    BuiltinFunc, Expr, JoinCondition, JoinKind, ParallelJoinKind, SelectExpr, Statement,
    TableExpr, TableSource,
};
use pxsql::types::Type;
use pxsql::ErrorKind;

fn select(stmt: Statement) -> pxsql::ast::SelectStatement {
    match stmt {
        Statement::Select(s) => *s,
        other => panic!("expected SELECT, got {other:?}"),
    }
}

#[test]
fn select_one() {
    let sel = select(pxsql::parse("SELECT 1").unwrap());
    assert!(sel.from.is_empty());
    let SelectExpr::Aliased { expr: Expr::Literal(v, _), alias: None } = &sel.exprs[0] else {
        panic!("unexpected shape: {:?}", sel.exprs);
    };
    assert_eq!(v.typ(), Type::Int64);
    assert_eq!(v.raw(), b"1");
}

#[test]
fn hash_join_shape() {
    let sel = select(pxsql::parse("SELECT * FROM X HASH JOIN Y ON X.id = Y.id").unwrap());
    assert_eq!(sel.exprs, vec![SelectExpr::Star(None)]);
    let TableExpr::Join(join) = &sel.from[0] else {
        panic!("expected join");
    };
    assert_eq!(join.kind, JoinKind::Hash);
    let TableExpr::Aliased(lhs) = &join.left else {
        panic!();
    };
    assert!(matches!(&lhs.source, TableSource::Table(t) if t.name.as_str() == "X"));
    let TableExpr::Aliased(rhs) = &join.right else {
        panic!();
    };
    assert!(matches!(&rhs.source, TableSource::Table(t) if t.name.as_str() == "Y"));
    assert!(matches!(&join.condition, JoinCondition::On(Expr::Comparison { .. })));
}

#[test]
fn parallel_inner_join_shape() {
    let sel =
        select(pxsql::parse("SELECT * FROM X PARALLEL INNER JOIN Y ON X.id = Y.id").unwrap());
    let TableExpr::Join(join) = &sel.from[0] else {
        panic!("expected join");
    };
    assert_eq!(join.kind, JoinKind::Parallel(ParallelJoinKind::Inner));
}

#[test]
fn hashfunc_call_shape() {
    let sel = select(pxsql::parse("SELECT HASHFUNC(a, b)").unwrap());
    let SelectExpr::Aliased { expr: Expr::Builtin { func, args, .. }, .. } = &sel.exprs[0] else {
        panic!("expected builtin call");
    };
    assert_eq!(*func, BuiltinFunc::Hashfunc);
    assert_eq!(args.len(), 2);
}

#[test]
fn bare_hash_is_unknown_function_at_col_8() {
    let err = pxsql::parse("SELECT HASH(a)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownFunction);
    assert_eq!(err.pos.line, 1);
    assert_eq!(err.pos.col, 8);
}

#[test]
fn adjacent_string_concatenation() {
    let sel = select(pxsql::parse("SELECT 'a' 'b'").unwrap());
    let SelectExpr::Aliased { expr: Expr::Literal(v, _), .. } = &sel.exprs[0] else {
        panic!();
    };
    assert_eq!(v.typ(), Type::VarChar);
    assert_eq!(v.raw(), b"ab");
}

#[test]
fn version_hint_is_lexed_inline() {
    let sel = select(pxsql::parse("/*!50000 SELECT 1 */").unwrap());
    assert_eq!(sel.exprs.len(), 1);
}

#[test]
fn version_hint_respects_server_version() {
    let opts = pxsql::ParseOptions {
        server_version: 40000,
        ..pxsql::ParseOptions::default()
    };
    // The hint body is skipped like a plain comment, leaving a comment-only
    // statement.
    let stmt = pxsql::parse_with_options("/*!50000 SELECT 1 */", &opts).unwrap();
    assert_eq!(stmt, Statement::CommentOnly("SELECT 1".to_owned()));
}

#[test]
fn select_semicolon_reports_expected_tokens() {
    let err = pxsql::parse("SELECT ;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.pos.col, 8);
    for want in ["identifier", "literal", "*", "("] {
        assert!(
            err.expected.iter().any(|e| e == want),
            "expected-token list {:?} missing {want:?}",
            err.expected
        );
    }
}

#[test]
fn lexical_errors_surface_with_positions() {
    let err = pxsql::parse("SELECT 'oops").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedString);
    assert_eq!(err.pos.col, 8);

    let err = pxsql::parse("SELECT /* forever").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedComment);

    let err = pxsql::parse("SELECT `broken").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedIdent);

    let err = pxsql::parse("SELECT X'ABC'").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidNumber);
}

#[test]
fn ansi_quotes_mode_changes_double_quotes() {
    let sel = select(pxsql::parse("SELECT \"x\"").unwrap());
    assert!(matches!(
        &sel.exprs[0],
        SelectExpr::Aliased { expr: Expr::Literal(v, _), .. } if v.typ() == Type::VarChar
    ));

    let opts = pxsql::ParseOptions {
        ansi_quotes: true,
        ..pxsql::ParseOptions::default()
    };
    let sel = select(pxsql::parse_with_options("SELECT \"x\"", &opts).unwrap());
    assert!(matches!(
        &sel.exprs[0],
        SelectExpr::Aliased { expr: Expr::Column(c, _), .. } if c.name.as_str() == "x"
    ));
}

#[test]
fn error_positions_track_lines() {
    let err = pxsql::parse("SELECT a,\n  b,\n  FROM t").unwrap_err();
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.pos.line, 3);
    assert_eq!(err.pos.col, 3);
}

#[test]
fn split_recovers_across_bad_statements() {
    // The splitter does not build ASTs, so a malformed piece still splits.
    let pieces = pxsql::split("SELECT 1; SELEC oops; SELECT 2").unwrap();
    assert_eq!(pieces.len(), 3);
    assert!(pxsql::parse(&pieces[0]).is_ok());
    assert!(pxsql::parse(&pieces[1]).is_err());
    assert!(pxsql::parse(&pieces[2]).is_ok());
}

#[test]
fn concurrent_parses_agree_with_reference() {
    let sql = "SELECT a, COUNT(*) FROM t HASH JOIN u ON t.id = u.id \
               WHERE a BETWEEN 1 AND 10 GROUP BY a ORDER BY 2 DESC LIMIT 5";
    let reference = pxsql::parse(sql).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(move || pxsql::parse(sql).unwrap())
        })
        .collect();
    for handle in handles {
        let parsed = handle.join().unwrap();
        assert_eq!(parsed, reference);
    }
}

#[test]
fn statement_owns_its_tree() {
    // The returned root owns every node; cloning and dropping the original
    // leaves the clone intact.
    let stmt = pxsql::parse("SELECT a FROM t WHERE b IN (SELECT c FROM u)").unwrap();
    let copy = stmt.clone();
    drop(stmt);
    assert_eq!(copy, pxsql::parse(&pxsql::format(&copy)).unwrap());
}

//! ParallaxSQL: a standalone MySQL-dialect SQL parser.
//!
//! The library takes a UTF-8 SQL string and yields either a typed AST root
//! describing one statement or a structured syntax error referencing a
//! position in the input. The accepted dialect is MySQL's, extended with the
//! `HASH JOIN` and `PARALLEL ... JOIN` join kinds and the `HASHFUNC` builtin
//! (the bare spelling `HASH(` is rejected).
//!
//! ```
//! let stmt = pxsql::parse("SELECT id FROM users WHERE age >= 21").unwrap();
//! let sql = pxsql::format(&stmt);
//! assert_eq!(pxsql::parse(&sql).unwrap(), stmt);
//! ```
//!
//! Parses are independent: each call carries its own [`ParseOptions`] and
//! owns its AST, so any number of parses may run concurrently. Dropping the
//! returned [`Statement`] releases every node of that parse.

pub use pxsql_ast as ast;
pub use pxsql_ast::Statement;
pub use pxsql_error::{Error, ErrorKind, Position, Result};
pub use pxsql_parser::ParseOptions;
pub use pxsql_types as types;

/// Parse exactly one statement. Leading and trailing whitespace and comments
/// are tolerated; additional statements after the first raise
/// [`ErrorKind::TrailingInput`].
pub fn parse(sql: &str) -> Result<Statement> {
    parse_with_options(sql, &ParseOptions::default())
}

/// [`parse`] with explicit per-parse configuration.
pub fn parse_with_options(sql: &str, opts: &ParseOptions) -> Result<Statement> {
    pxsql_parser::parse_strict_with_options(sql, opts)
}

/// Parse the first statement only, ignoring any trailing input.
pub fn parse_first(sql: &str) -> Result<Statement> {
    pxsql_parser::parse_with_options(sql, &ParseOptions::default())
}

/// Parse a `;`-separated sequence of statements.
pub fn parse_multi(sql: &str) -> Result<Vec<Statement>> {
    pxsql_parser::parse_multi_with_options(sql, &ParseOptions::default())
}

/// Split the input into statement texts on top-level `;`, respecting
/// quoting and comments. No AST is built.
pub fn split(sql: &str) -> Result<Vec<String>> {
    pxsql_parser::split(sql)
}

/// Canonical re-serialization: uppercase keywords, backtick-quoted
/// identifiers, minimum-escaped literals. Parsing the result yields a tree
/// structurally equal to `stmt`.
#[must_use]
pub fn format(stmt: &Statement) -> String {
    stmt.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_strict() {
        assert!(parse("SELECT 1").is_ok());
        assert!(parse("  SELECT 1 ; ").is_ok());
        let err = parse("SELECT 1; SELECT 2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingInput);
        assert!(parse_first("SELECT 1; SELECT 2").is_ok());
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(parse("").unwrap_err().kind, ErrorKind::EmptyInput);
        assert_eq!(parse(" \n ").unwrap_err().kind, ErrorKind::EmptyInput);
    }

    #[test]
    fn format_round_trips() {
        let stmt = parse("select a, b from t where a < 3").unwrap();
        let sql = format(&stmt);
        assert_eq!(sql, "SELECT `a`, `b` FROM `t` WHERE `a` < 3");
        assert_eq!(parse(&sql).unwrap(), stmt);
    }

    #[test]
    fn parse_multi_and_split_agree() {
        let input = "SELECT 1; SELECT 2; COMMIT";
        assert_eq!(parse_multi(input).unwrap().len(), 3);
        assert_eq!(split(input).unwrap().len(), 3);
    }
}

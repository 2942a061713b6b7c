//! Hand-written recursive descent parser for the MySQL dialect.
//!
//! Statement grammar lives here; expression parsing (Pratt precedence
//! climbing) lives in `expr.rs`. The parser pulls tokens from the lexer on
//! demand through a small lookahead buffer and never touches process-wide
//! mutable state, so any number of parses may run concurrently.

use std::collections::VecDeque;

use pxsql_ast::{
    AliasedTableExpr, AlterTableAction, AlterTableStatement, Assignment, CallStatement, ColumnDef,
    ColumnOption, ColumnPosition, ColumnRef, ColumnType, CreateIndexStatement, CreateTableBody,
    CreateTableStatement, CreateViewStatement, Cte, DeleteStatement, DropIndexStatement,
    DropStatement, ExecuteStatement, ExplainStatement, ExplainTarget, Expr, FlushKind,
    FlushStatement, GroupBy, Ident, IndexColumn, IndexHint, IndexHintFor, IndexHintKind,
    IndexKind, InsertAction, InsertSource, InsertStatement, JoinCondition, JoinExpr, JoinKind,
    Limit, LoadDuplicate, LoadStatement, LockMode, LockStatement, LockType, MaintenanceStatement,
    NaturalJoinKind, OrderDirection, OrderExpr, ParallelJoinKind, PrepareSource, PrepareStatement,
    QueryExpr, ReferenceAction, RollbackStatement, SelectExpr, SelectStatement, SetExpr, SetOp,
    SetScope, SetStatement, SetTarget, SetValue, ShowFilter, ShowKind, ShowStatement, Statement,
    TableConstraint, TableConstraintKind, TableExpr, TableLock, TableName, TableOption,
    TableOptionValue, TableSource, UnionStatement, UpdateStatement, WithClause,
};
use pxsql_error::{Error, ErrorKind, Position, Result};

use crate::lexer::Lexer;
use crate::token::{Keyword, Token, TokenKind};
use crate::ParseOptions;

/// Parse the first statement of `sql`, ignoring anything after it.
pub fn parse_with_options(sql: &str, opts: &ParseOptions) -> Result<Statement> {
    let mut parser = Parser::new(sql, opts);
    parser.parse_leading_statement()
}

/// Parse exactly one statement; trailing tokens raise `TrailingInput`.
pub fn parse_strict_with_options(sql: &str, opts: &ParseOptions) -> Result<Statement> {
    let mut parser = Parser::new(sql, opts);
    let stmt = parser.parse_leading_statement()?;
    while parser.eat(&TokenKind::Semicolon)? {}
    if !parser.peek_is(&TokenKind::Eof)? {
        let tok = parser.next()?;
        return Err(Error::new(
            ErrorKind::TrailingInput,
            token_pos(&tok),
            format!("unexpected '{}' after statement", tok.describe()),
        ));
    }
    Ok(stmt)
}

/// Parse a `;`-separated sequence of statements.
pub fn parse_multi_with_options(sql: &str, opts: &ParseOptions) -> Result<Vec<Statement>> {
    let span = tracing::debug_span!(
        target: "pxsql.parse",
        "parse_multi",
        statements = tracing::field::Empty,
    );
    let _guard = span.enter();

    let mut parser = Parser::new(sql, opts);
    let mut stmts = Vec::new();
    loop {
        while parser.eat(&TokenKind::Semicolon)? {}
        if parser.peek_is(&TokenKind::Eof)? {
            break;
        }
        stmts.push(parser.parse_statement()?);
        if !parser.peek_is(&TokenKind::Eof)? {
            parser.expect(&TokenKind::Semicolon)?;
        }
    }
    span.record("statements", stmts.len() as u64);
    Ok(stmts)
}

pub(crate) fn token_pos(tok: &Token) -> Position {
    Position::new(tok.line, tok.col, tok.span.start as usize)
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    buf: VecDeque<Token>,
    pub(crate) opts: ParseOptions,
    pub(crate) depth: u32,
    pub(crate) anon_params: u16,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(sql: &'a str, opts: &ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(sql, opts),
            buf: VecDeque::new(),
            opts: *opts,
            depth: 0,
            anon_params: 0,
        }
    }

    /// Parse the first statement of the input. Empty input (after comments)
    /// yields either a comment-only statement or `EmptyInput`.
    pub fn parse_leading_statement(&mut self) -> Result<Statement> {
        if self.peek_is(&TokenKind::Eof)? {
            if let Some(comment) = self.lexer.take_comment() {
                return Ok(Statement::CommentOnly(comment));
            }
            return Err(Error::empty_input());
        }
        let stmt = self.parse_statement()?;
        tracing::debug!(target: "pxsql.parse", "parsed statement");
        Ok(stmt)
    }

    // -----------------------------------------------------------------------
    // Token plumbing
    // -----------------------------------------------------------------------

    fn ensure(&mut self, n: usize) -> Result<()> {
        while self.buf.len() < n {
            let tok = self.lexer.next_token()?;
            let eof = tok.kind == TokenKind::Eof;
            self.buf.push_back(tok);
            if eof {
                break;
            }
        }
        Ok(())
    }

    pub(crate) fn peek_nth(&mut self, n: usize) -> Result<TokenKind> {
        self.ensure(n + 1)?;
        Ok(self
            .buf
            .get(n)
            .map_or(TokenKind::Eof, |t| t.kind.clone()))
    }

    pub(crate) fn peek(&mut self) -> Result<TokenKind> {
        self.peek_nth(0)
    }

    pub(crate) fn peek_token(&mut self) -> Result<Token> {
        self.ensure(1)?;
        Ok(self.buf.front().cloned().unwrap_or(Token {
            kind: TokenKind::Eof,
            span: pxsql_ast::Span::ZERO,
            line: 0,
            col: 0,
        }))
    }

    pub(crate) fn next(&mut self) -> Result<Token> {
        self.ensure(1)?;
        match self.buf.pop_front() {
            Some(tok) => {
                if tok.kind == TokenKind::Eof {
                    // Keep Eof around so repeated reads stay at the end.
                    self.buf.push_front(tok.clone());
                }
                Ok(tok)
            }
            None => unreachable!("ensure always buffers at least one token"),
        }
    }

    pub(crate) fn peek_is(&mut self, kind: &TokenKind) -> Result<bool> {
        Ok(std::mem::discriminant(&self.peek()?) == std::mem::discriminant(kind))
    }

    pub(crate) fn peek_kw(&mut self, kw: Keyword) -> Result<bool> {
        Ok(self.peek()? == TokenKind::Keyword(kw))
    }

    pub(crate) fn peek_kw_nth(&mut self, n: usize, kw: Keyword) -> Result<bool> {
        Ok(self.peek_nth(n)? == TokenKind::Keyword(kw))
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> Result<bool> {
        if self.peek_is(kind)? {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn eat_kw(&mut self, kw: Keyword) -> Result<bool> {
        if self.peek_kw(kw)? {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<Token> {
        if self.peek_is(kind)? {
            self.next()
        } else {
            Err(self.err_expected(&[kind.describe()]))
        }
    }

    pub(crate) fn expect_kw(&mut self, kw: Keyword) -> Result<Token> {
        if self.peek_kw(kw)? {
            self.next()
        } else {
            Err(self.err_expected(&[kw.as_str().to_owned()]))
        }
    }

    pub(crate) fn err_expected(&mut self, expected: &[String]) -> Error {
        let (pos, text) = match self.peek_token() {
            Ok(tok) => (token_pos(&tok), tok.describe()),
            Err(e) => return e,
        };
        Error::syntax(
            pos,
            format!("unexpected '{text}'"),
            expected.to_vec(),
        )
    }

    pub(crate) fn err_expected_strs(&mut self, expected: &[&str]) -> Error {
        let owned: Vec<String> = expected.iter().map(|s| (*s).to_owned()).collect();
        self.err_expected(&owned)
    }

    pub(crate) fn current_pos(&mut self) -> Result<Position> {
        Ok(token_pos(&self.peek_token()?))
    }

    pub(crate) fn enter_statement(&mut self) -> Result<()> {
        if self.depth >= self.opts.max_depth {
            let pos = self.current_pos()?;
            return Err(Error::new(
                ErrorKind::StatementTooNested,
                pos,
                format!("statement nesting exceeds {}", self.opts.max_depth),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn enter_expression(&mut self) -> Result<()> {
        if self.depth >= self.opts.max_depth {
            let pos = self.current_pos()?;
            return Err(Error::new(
                ErrorKind::ExpressionTooDeep,
                pos,
                format!("expression nesting exceeds {}", self.opts.max_depth),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Identifiers and names
    // -----------------------------------------------------------------------

    /// An identifier: plain, quoted, or a non-reserved keyword.
    pub(crate) fn parse_ident(&mut self) -> Result<Ident> {
        match self.peek()? {
            TokenKind::Ident(s) | TokenKind::QuotedIdent(s) => {
                self.next()?;
                Ok(Ident(s))
            }
            TokenKind::Keyword(k) if !k.is_reserved() => {
                self.next()?;
                Ok(Ident(k.as_str().to_owned()))
            }
            _ => Err(self.err_expected_strs(&["identifier"])),
        }
    }

    pub(crate) fn parse_table_name(&mut self) -> Result<TableName> {
        let first = self.parse_ident()?;
        if self.eat(&TokenKind::Dot)? {
            let name = self.parse_ident()?;
            Ok(TableName {
                qualifier: Some(first),
                name,
            })
        } else {
            Ok(TableName {
                qualifier: None,
                name: first,
            })
        }
    }

    fn parse_ident_list(&mut self) -> Result<Vec<Ident>> {
        let mut out = vec![self.parse_ident()?];
        while self.eat(&TokenKind::Comma)? {
            out.push(self.parse_ident()?);
        }
        Ok(out)
    }

    fn parse_paren_ident_list(&mut self) -> Result<Vec<Ident>> {
        self.expect(&TokenKind::LParen)?;
        let list = self.parse_ident_list()?;
        self.expect(&TokenKind::RParen)?;
        Ok(list)
    }

    /// A literal string payload (for SHOW LIKE, PREPARE FROM, options).
    fn parse_string(&mut self) -> Result<String> {
        match self.peek()? {
            TokenKind::Str { value, .. } => {
                self.next()?;
                Ok(value)
            }
            _ => Err(self.err_expected_strs(&["string literal"])),
        }
    }

    /// A charset name: identifier or string.
    fn parse_charset_name(&mut self) -> Result<String> {
        match self.peek()? {
            TokenKind::Str { value, .. } => {
                self.next()?;
                Ok(value)
            }
            TokenKind::Keyword(Keyword::Binary) => {
                self.next()?;
                Ok("binary".to_owned())
            }
            _ => Ok(self.parse_ident()?.0),
        }
    }

    // -----------------------------------------------------------------------
    // Statement dispatch
    // -----------------------------------------------------------------------

    pub fn parse_statement(&mut self) -> Result<Statement> {
        self.enter_statement()?;
        let result = self.parse_statement_inner();
        self.leave();
        result
    }

    fn parse_statement_inner(&mut self) -> Result<Statement> {
        match self.peek()? {
            TokenKind::Keyword(Keyword::Select) | TokenKind::LParen => {
                Ok(self.parse_query_expr()?.into_statement())
            }
            TokenKind::Keyword(Keyword::With) => {
                let with = self.parse_with_clause()?;
                match self.peek()? {
                    TokenKind::Keyword(Keyword::Update) => self.parse_update_with(Some(with)),
                    TokenKind::Keyword(Keyword::Delete) => self.parse_delete_with(Some(with)),
                    TokenKind::Keyword(Keyword::Select) => {
                        self.next()?;
                        let mut sel = self.parse_select_body()?;
                        sel.with = Some(with);
                        let query = self.parse_query_tail(QueryExpr::Select(Box::new(sel)))?;
                        Ok(query.into_statement())
                    }
                    _ => Err(self.err_expected_strs(&["SELECT", "UPDATE", "DELETE"])),
                }
            }
            TokenKind::Keyword(Keyword::Insert) => self.parse_insert(InsertAction::Insert),
            TokenKind::Keyword(Keyword::Replace) => self.parse_insert(InsertAction::Replace),
            TokenKind::Keyword(Keyword::Update) => self.parse_update(),
            TokenKind::Keyword(Keyword::Delete) => self.parse_delete(),
            TokenKind::Keyword(Keyword::Create) => self.parse_create(),
            TokenKind::Keyword(Keyword::Drop) => self.parse_drop(),
            TokenKind::Keyword(Keyword::Alter) => self.parse_alter(),
            TokenKind::Keyword(Keyword::Truncate) => {
                self.next()?;
                let _ = self.eat_kw(Keyword::Table)?;
                Ok(Statement::Truncate(self.parse_table_name()?))
            }
            TokenKind::Keyword(Keyword::Set) => self.parse_set(),
            TokenKind::Keyword(Keyword::Show) => self.parse_show(),
            TokenKind::Keyword(Keyword::Use) => {
                self.next()?;
                Ok(Statement::Use(self.parse_ident()?))
            }
            TokenKind::Keyword(Keyword::Begin) => {
                self.next()?;
                let _ = self.eat_kw(Keyword::Work)?;
                Ok(Statement::Begin)
            }
            TokenKind::Keyword(Keyword::Start) => {
                self.next()?;
                self.expect_kw(Keyword::Transaction)?;
                Ok(Statement::Begin)
            }
            TokenKind::Keyword(Keyword::Commit) => {
                self.next()?;
                let _ = self.eat_kw(Keyword::Work)?;
                Ok(Statement::Commit)
            }
            TokenKind::Keyword(Keyword::Rollback) => {
                self.next()?;
                let _ = self.eat_kw(Keyword::Work)?;
                let to_savepoint = if self.eat_kw(Keyword::To)? {
                    let _ = self.eat_kw(Keyword::Savepoint)?;
                    Some(self.parse_ident()?)
                } else {
                    None
                };
                Ok(Statement::Rollback(RollbackStatement { to_savepoint }))
            }
            TokenKind::Keyword(Keyword::Savepoint) => {
                self.next()?;
                Ok(Statement::Savepoint(self.parse_ident()?))
            }
            TokenKind::Keyword(Keyword::Release) => {
                self.next()?;
                self.expect_kw(Keyword::Savepoint)?;
                Ok(Statement::Release(self.parse_ident()?))
            }
            TokenKind::Keyword(Keyword::Prepare) => self.parse_prepare(),
            TokenKind::Keyword(Keyword::Execute) => self.parse_execute(),
            TokenKind::Keyword(Keyword::Deallocate) => {
                self.next()?;
                self.expect_kw(Keyword::Prepare)?;
                Ok(Statement::Deallocate(self.parse_ident()?))
            }
            TokenKind::Keyword(Keyword::Explain | Keyword::Describe) => self.parse_explain(),
            TokenKind::Keyword(Keyword::Call) => self.parse_call(),
            TokenKind::Keyword(Keyword::Load) => self.parse_load(),
            TokenKind::Keyword(Keyword::Lock) => self.parse_lock(),
            TokenKind::Keyword(Keyword::Unlock) => {
                self.next()?;
                self.expect_kw(Keyword::Tables)?;
                Ok(Statement::Unlock)
            }
            TokenKind::Keyword(Keyword::Flush) => self.parse_flush(),
            TokenKind::Keyword(Keyword::Analyze) => {
                self.next()?;
                Ok(Statement::Analyze(self.parse_maintenance()?))
            }
            TokenKind::Keyword(Keyword::Optimize) => {
                self.next()?;
                Ok(Statement::Optimize(self.parse_maintenance()?))
            }
            TokenKind::Keyword(Keyword::Repair) => {
                self.next()?;
                Ok(Statement::Repair(self.parse_maintenance()?))
            }
            _ => Err(self.err_expected_strs(&[
                "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER", "SET", "SHOW",
                "a statement keyword",
            ])),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// A query expression: SELECT or a UNION/EXCEPT/INTERSECT chain, with
    /// trailing ORDER BY / LIMIT attached to the outermost node.
    pub(crate) fn parse_query_expr(&mut self) -> Result<QueryExpr> {
        self.enter_statement()?;
        let result = self.parse_query_expr_inner();
        self.leave();
        result
    }

    fn parse_query_expr_inner(&mut self) -> Result<QueryExpr> {
        let query = self.parse_query_primary()?;
        self.parse_query_tail(query)
    }

    /// Continue a query with set operations and the trailing ORDER BY /
    /// LIMIT / lock clauses.
    fn parse_query_tail(&mut self, first: QueryExpr) -> Result<QueryExpr> {
        let mut query = first;

        loop {
            let op = if self.eat_kw(Keyword::Union)? {
                if self.eat_kw(Keyword::All)? {
                    SetOp::UnionAll
                } else {
                    let _ = self.eat_kw(Keyword::Distinct)?;
                    SetOp::Union
                }
            } else if self.eat_kw(Keyword::Except)? {
                if self.eat_kw(Keyword::All)? {
                    SetOp::ExceptAll
                } else {
                    let _ = self.eat_kw(Keyword::Distinct)?;
                    SetOp::Except
                }
            } else if self.eat_kw(Keyword::Intersect)? {
                if self.eat_kw(Keyword::All)? {
                    SetOp::IntersectAll
                } else {
                    let _ = self.eat_kw(Keyword::Distinct)?;
                    SetOp::Intersect
                }
            } else {
                break;
            };
            let right = self.parse_query_primary()?;
            query = QueryExpr::Union(Box::new(UnionStatement {
                left: query,
                op,
                right,
                order_by: Vec::new(),
                limit: None,
            }));
        }

        let order_by = self.parse_opt_order_by()?;
        let limit = self.parse_opt_limit()?;
        match &mut query {
            QueryExpr::Select(sel) => {
                sel.order_by = order_by;
                sel.limit = limit;
                sel.lock = self.parse_opt_lock()?;
            }
            QueryExpr::Union(u) => {
                u.order_by = order_by;
                u.limit = limit;
            }
        }
        Ok(query)
    }

    fn parse_query_primary(&mut self) -> Result<QueryExpr> {
        match self.peek()? {
            TokenKind::LParen => {
                self.next()?;
                let inner = self.parse_query_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Keyword(Keyword::With) => {
                let with = self.parse_with_clause()?;
                self.expect_kw(Keyword::Select)?;
                let mut sel = self.parse_select_body()?;
                sel.with = Some(with);
                Ok(QueryExpr::Select(Box::new(sel)))
            }
            TokenKind::Keyword(Keyword::Select) => {
                self.next()?;
                let sel = self.parse_select_body()?;
                Ok(QueryExpr::Select(Box::new(sel)))
            }
            _ => Err(self.err_expected_strs(&["SELECT", "WITH", "("])),
        }
    }

    fn parse_with_clause(&mut self) -> Result<WithClause> {
        self.expect_kw(Keyword::With)?;
        let recursive = self.eat_kw(Keyword::Recursive)?;
        let mut ctes = vec![self.parse_cte()?];
        while self.eat(&TokenKind::Comma)? {
            ctes.push(self.parse_cte()?);
        }
        Ok(WithClause { recursive, ctes })
    }

    fn parse_cte(&mut self) -> Result<Cte> {
        let name = self.parse_ident()?;
        let columns = if self.peek_is(&TokenKind::LParen)? {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        self.expect_kw(Keyword::As)?;
        self.expect(&TokenKind::LParen)?;
        let query = self.parse_query_expr()?;
        self.expect(&TokenKind::RParen)?;
        Ok(Cte {
            name,
            columns,
            query,
        })
    }

    /// The body of a SELECT after the keyword, without trailing ORDER BY /
    /// LIMIT / lock (those bind to the outermost set operation).
    fn parse_select_body(&mut self) -> Result<SelectStatement> {
        let mut sel = SelectStatement::default();

        loop {
            if self.eat_kw(Keyword::Distinct)? || self.eat_kw(Keyword::Distinctrow)? {
                sel.distinct = true;
            } else if self.eat_kw(Keyword::All)? || self.eat_kw(Keyword::HighPriority)? {
                // ALL is the default; HIGH_PRIORITY does not change shape.
            } else {
                break;
            }
        }

        sel.exprs.push(self.parse_select_expr()?);
        while self.eat(&TokenKind::Comma)? {
            sel.exprs.push(self.parse_select_expr()?);
        }

        if self.eat_kw(Keyword::From)? {
            sel.from.push(self.parse_table_expr()?);
            while self.eat(&TokenKind::Comma)? {
                sel.from.push(self.parse_table_expr()?);
            }
        }

        if self.eat_kw(Keyword::Where)? {
            sel.where_clause = Some(self.parse_expr()?);
        }

        if self.eat_kw(Keyword::Group)? {
            self.expect_kw(Keyword::By)?;
            let mut exprs = vec![self.parse_expr()?];
            while self.eat(&TokenKind::Comma)? {
                exprs.push(self.parse_expr()?);
            }
            let with_rollup = if self.peek_kw(Keyword::With)? && self.peek_kw_nth(1, Keyword::Rollup)? {
                self.next()?;
                self.next()?;
                true
            } else {
                false
            };
            sel.group_by = Some(GroupBy { exprs, with_rollup });
        }

        if self.eat_kw(Keyword::Having)? {
            sel.having = Some(self.parse_expr()?);
        }

        if self.eat_kw(Keyword::Window)? {
            loop {
                let name = self.parse_ident()?;
                self.expect_kw(Keyword::As)?;
                self.expect(&TokenKind::LParen)?;
                let spec = self.parse_window_spec()?;
                self.expect(&TokenKind::RParen)?;
                sel.windows.push(pxsql_ast::WindowDef { name, spec });
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
        }

        Ok(sel)
    }

    fn parse_select_expr(&mut self) -> Result<SelectExpr> {
        if self.eat(&TokenKind::Star)? {
            return Ok(SelectExpr::Star(None));
        }

        // `NEXT [n] VALUES` sequence advance.
        if self.peek_kw(Keyword::Next)?
            && (self.peek_kw_nth(1, Keyword::Value)?
                || matches!(self.peek_nth(1)?, TokenKind::Integral(_)))
        {
            self.next()?;
            let count = if self.eat_kw(Keyword::Value)? {
                Expr::Literal(pxsql_types::Value::new_int64(1), pxsql_ast::Span::ZERO)
            } else {
                let expr = self.parse_expr()?;
                self.expect_kw(Keyword::Values)?;
                expr
            };
            return Ok(SelectExpr::Next(count));
        }

        // Qualified stars: `t.*` and `db.t.*`.
        if self.is_ident_like(0)? && self.peek_nth(1)? == TokenKind::Dot {
            if self.peek_nth(2)? == TokenKind::Star {
                let table = self.parse_ident()?;
                self.expect(&TokenKind::Dot)?;
                self.expect(&TokenKind::Star)?;
                return Ok(SelectExpr::Star(Some(TableName {
                    qualifier: None,
                    name: table,
                })));
            }
            if self.is_ident_like(2)?
                && self.peek_nth(3)? == TokenKind::Dot
                && self.peek_nth(4)? == TokenKind::Star
            {
                let db = self.parse_ident()?;
                self.expect(&TokenKind::Dot)?;
                let table = self.parse_ident()?;
                self.expect(&TokenKind::Dot)?;
                self.expect(&TokenKind::Star)?;
                return Ok(SelectExpr::Star(Some(TableName {
                    qualifier: Some(db),
                    name: table,
                })));
            }
        }

        let expr = self.parse_expr()?;
        let alias = self.parse_opt_alias()?;
        Ok(SelectExpr::Aliased { expr, alias })
    }

    fn is_ident_like(&mut self, n: usize) -> Result<bool> {
        Ok(match self.peek_nth(n)? {
            TokenKind::Ident(_) | TokenKind::QuotedIdent(_) => true,
            TokenKind::Keyword(k) => !k.is_reserved(),
            _ => false,
        })
    }

    /// `[AS] alias`, where an implicit alias may be an identifier, quoted
    /// identifier, string, or non-reserved keyword.
    fn parse_opt_alias(&mut self) -> Result<Option<Ident>> {
        if self.eat_kw(Keyword::As)? {
            return Ok(Some(self.parse_ident()?));
        }
        match self.peek()? {
            TokenKind::Ident(s) | TokenKind::QuotedIdent(s) => {
                self.next()?;
                Ok(Some(Ident(s)))
            }
            TokenKind::Str { value, .. } => {
                self.next()?;
                Ok(Some(Ident(value)))
            }
            TokenKind::Keyword(k) if !k.is_reserved() && !self.starts_join_suffix(k)? => {
                self.next()?;
                Ok(Some(Ident(k.as_str().to_owned())))
            }
            _ => Ok(None),
        }
    }

    /// Whether a non-reserved keyword in alias position actually begins a
    /// join continuation (the dialect's HASH/PARALLEL prefixes, and FULL).
    fn starts_join_suffix(&mut self, kw: Keyword) -> Result<bool> {
        Ok(match kw {
            Keyword::Hash => self.peek_kw_nth(1, Keyword::Join)?,
            // PARALLEL followed by any join keyword is a join prefix, even
            // the combinations the grammar then rejects; claiming it as an
            // alias would mask the real error.
            Keyword::Parallel => matches!(
                self.peek_nth(1)?,
                TokenKind::Keyword(
                    Keyword::Join
                        | Keyword::Inner
                        | Keyword::Left
                        | Keyword::Right
                        | Keyword::Cross
                        | Keyword::Natural
                        | Keyword::StraightJoin
                        | Keyword::Full
                        | Keyword::Outer
                        | Keyword::Hash
                )
            ),
            Keyword::Full => {
                self.peek_kw_nth(1, Keyword::Join)? || self.peek_kw_nth(1, Keyword::Outer)?
            }
            _ => false,
        })
    }

    fn parse_opt_order_by(&mut self) -> Result<Vec<OrderExpr>> {
        if !self.eat_kw(Keyword::Order)? {
            return Ok(Vec::new());
        }
        self.expect_kw(Keyword::By)?;
        let mut out = vec![self.parse_order_expr()?];
        while self.eat(&TokenKind::Comma)? {
            out.push(self.parse_order_expr()?);
        }
        Ok(out)
    }

    pub(crate) fn parse_order_expr(&mut self) -> Result<OrderExpr> {
        let expr = self.parse_expr()?;
        let direction = if self.eat_kw(Keyword::Asc)? {
            Some(OrderDirection::Asc)
        } else if self.eat_kw(Keyword::Desc)? {
            Some(OrderDirection::Desc)
        } else {
            None
        };
        Ok(OrderExpr { expr, direction })
    }

    fn parse_opt_limit(&mut self) -> Result<Option<Limit>> {
        if !self.eat_kw(Keyword::Limit)? {
            return Ok(None);
        }
        let first = self.parse_expr()?;
        if self.eat(&TokenKind::Comma)? {
            let count = self.parse_expr()?;
            return Ok(Some(Limit {
                offset: Some(first),
                count,
            }));
        }
        if self.eat_kw(Keyword::Offset)? {
            let offset = self.parse_expr()?;
            return Ok(Some(Limit {
                offset: Some(offset),
                count: first,
            }));
        }
        Ok(Some(Limit {
            offset: None,
            count: first,
        }))
    }

    fn parse_opt_lock(&mut self) -> Result<Option<LockMode>> {
        if self.peek_kw(Keyword::For)? && self.peek_kw_nth(1, Keyword::Update)? {
            self.next()?;
            self.next()?;
            return Ok(Some(LockMode::ForUpdate));
        }
        if self.peek_kw(Keyword::Lock)? {
            self.next()?;
            self.expect_kw(Keyword::In)?;
            self.expect_kw(Keyword::Share)?;
            self.expect_kw(Keyword::Mode)?;
            return Ok(Some(LockMode::ShareMode));
        }
        Ok(None)
    }

    // -----------------------------------------------------------------------
    // Table references and joins
    // -----------------------------------------------------------------------

    pub(crate) fn parse_table_expr(&mut self) -> Result<TableExpr> {
        let mut left = self.parse_table_factor()?;
        loop {
            let Some(kind) = self.try_parse_join_kind()? else {
                return Ok(left);
            };
            let right = self.parse_table_factor()?;
            let condition = if matches!(kind, JoinKind::Natural(_)) {
                JoinCondition::None
            } else if self.eat_kw(Keyword::On)? {
                JoinCondition::On(self.parse_expr()?)
            } else if self.eat_kw(Keyword::Using)? {
                JoinCondition::Using(self.parse_paren_ident_list()?)
            } else {
                JoinCondition::None
            };
            left = TableExpr::Join(Box::new(JoinExpr {
                left,
                kind,
                right,
                condition,
            }));
        }
    }

    /// Recognize a join-kind prefix, consuming it. Returns `None` when the
    /// next tokens do not continue the current table reference.
    fn try_parse_join_kind(&mut self) -> Result<Option<JoinKind>> {
        match self.peek()? {
            TokenKind::Keyword(Keyword::Join) => {
                self.next()?;
                Ok(Some(JoinKind::Inner))
            }
            TokenKind::Keyword(Keyword::Inner) => {
                self.next()?;
                self.expect_kw(Keyword::Join)?;
                Ok(Some(JoinKind::Inner))
            }
            TokenKind::Keyword(Keyword::Cross) => {
                self.next()?;
                self.expect_kw(Keyword::Join)?;
                Ok(Some(JoinKind::Cross))
            }
            TokenKind::Keyword(Keyword::StraightJoin) => {
                self.next()?;
                Ok(Some(JoinKind::Straight))
            }
            TokenKind::Keyword(Keyword::Left) => {
                self.next()?;
                let _ = self.eat_kw(Keyword::Outer)?;
                self.expect_kw(Keyword::Join)?;
                Ok(Some(JoinKind::LeftOuter))
            }
            TokenKind::Keyword(Keyword::Right) => {
                self.next()?;
                let _ = self.eat_kw(Keyword::Outer)?;
                self.expect_kw(Keyword::Join)?;
                Ok(Some(JoinKind::RightOuter))
            }
            TokenKind::Keyword(Keyword::Full)
                if self.peek_kw_nth(1, Keyword::Join)? || self.peek_kw_nth(1, Keyword::Outer)? =>
            {
                self.next()?;
                let _ = self.eat_kw(Keyword::Outer)?;
                self.expect_kw(Keyword::Join)?;
                Ok(Some(JoinKind::FullOuter))
            }
            TokenKind::Keyword(Keyword::Natural) => {
                self.next()?;
                let kind = if self.eat_kw(Keyword::Left)? {
                    let _ = self.eat_kw(Keyword::Outer)?;
                    NaturalJoinKind::Left
                } else if self.eat_kw(Keyword::Right)? {
                    let _ = self.eat_kw(Keyword::Outer)?;
                    NaturalJoinKind::Right
                } else if self.peek_kw(Keyword::Full)? {
                    self.next()?;
                    let _ = self.eat_kw(Keyword::Outer)?;
                    NaturalJoinKind::Full
                } else {
                    let _ = self.eat_kw(Keyword::Inner)?;
                    NaturalJoinKind::Inner
                };
                self.expect_kw(Keyword::Join)?;
                Ok(Some(JoinKind::Natural(kind)))
            }
            // Dialect: `HASH JOIN` with inner semantics.
            TokenKind::Keyword(Keyword::Hash) if self.peek_kw_nth(1, Keyword::Join)? => {
                self.next()?;
                self.next()?;
                Ok(Some(JoinKind::Hash))
            }
            // Dialect: `PARALLEL` prefixing exactly one standard join. It
            // does not compose with CROSS, NATURAL, FULL, STRAIGHT_JOIN, or
            // HASH.
            TokenKind::Keyword(Keyword::Parallel)
                if matches!(
                    self.peek_nth(1)?,
                    TokenKind::Keyword(
                        Keyword::Join
                            | Keyword::Inner
                            | Keyword::Left
                            | Keyword::Right
                            | Keyword::Cross
                            | Keyword::Natural
                            | Keyword::StraightJoin
                            | Keyword::Full
                            | Keyword::Outer
                            | Keyword::Hash
                    )
                ) =>
            {
                self.next()?;
                let kind = if self.eat_kw(Keyword::Join)? {
                    ParallelJoinKind::Inner
                } else if self.eat_kw(Keyword::Inner)? {
                    self.expect_kw(Keyword::Join)?;
                    ParallelJoinKind::Inner
                } else if self.eat_kw(Keyword::Left)? {
                    let _ = self.eat_kw(Keyword::Outer)?;
                    self.expect_kw(Keyword::Join)?;
                    ParallelJoinKind::Left
                } else if self.eat_kw(Keyword::Right)? {
                    let _ = self.eat_kw(Keyword::Outer)?;
                    self.expect_kw(Keyword::Join)?;
                    ParallelJoinKind::Right
                } else {
                    return Err(self.err_expected_strs(&[
                        "JOIN",
                        "INNER JOIN",
                        "LEFT [OUTER] JOIN",
                        "RIGHT [OUTER] JOIN",
                    ]));
                };
                Ok(Some(JoinKind::Parallel(kind)))
            }
            _ => Ok(None),
        }
    }

    fn parse_table_factor(&mut self) -> Result<TableExpr> {
        if self.peek_is(&TokenKind::LParen)? {
            if self.peek_kw_nth(1, Keyword::Select)? || self.peek_kw_nth(1, Keyword::With)? {
                self.next()?;
                let query = self.parse_query_expr()?;
                self.expect(&TokenKind::RParen)?;
                let alias = self.parse_opt_alias()?;
                return Ok(TableExpr::Aliased(AliasedTableExpr {
                    source: TableSource::Subquery(Box::new(query)),
                    alias,
                    hints: Vec::new(),
                }));
            }
            self.next()?;
            let inner = self.parse_table_expr()?;
            self.expect(&TokenKind::RParen)?;
            return Ok(TableExpr::Paren(Box::new(inner)));
        }

        let name = self.parse_table_name()?;
        let alias = self.parse_opt_alias()?;
        let mut hints = Vec::new();
        loop {
            let kind = match self.peek()? {
                TokenKind::Keyword(Keyword::Use) => IndexHintKind::Use,
                TokenKind::Keyword(Keyword::Force) => IndexHintKind::Force,
                TokenKind::Keyword(Keyword::Ignore) => IndexHintKind::Ignore,
                _ => break,
            };
            if !(self.peek_kw_nth(1, Keyword::Index)? || self.peek_kw_nth(1, Keyword::Key)?) {
                break;
            }
            self.next()?;
            self.next()?;
            let for_clause = if self.eat_kw(Keyword::For)? {
                if self.eat_kw(Keyword::Join)? {
                    Some(IndexHintFor::Join)
                } else if self.eat_kw(Keyword::Order)? {
                    self.expect_kw(Keyword::By)?;
                    Some(IndexHintFor::OrderBy)
                } else {
                    self.expect_kw(Keyword::Group)?;
                    self.expect_kw(Keyword::By)?;
                    Some(IndexHintFor::GroupBy)
                }
            } else {
                None
            };
            self.expect(&TokenKind::LParen)?;
            let indexes = if self.peek_is(&TokenKind::RParen)? {
                Vec::new()
            } else {
                self.parse_ident_list()?
            };
            self.expect(&TokenKind::RParen)?;
            hints.push(IndexHint {
                kind,
                for_clause,
                indexes,
            });
        }
        Ok(TableExpr::Aliased(AliasedTableExpr {
            source: TableSource::Table(name),
            alias,
            hints,
        }))
    }

    // -----------------------------------------------------------------------
    // INSERT / UPDATE / DELETE
    // -----------------------------------------------------------------------

    fn parse_insert(&mut self, action: InsertAction) -> Result<Statement> {
        self.next()?;
        let _ = self.eat_kw(Keyword::LowPriority)? || self.eat_kw(Keyword::HighPriority)?;
        let ignore = self.eat_kw(Keyword::Ignore)?;
        let _ = self.eat_kw(Keyword::Into)?;
        let table = self.parse_table_name()?;

        let mut columns = Vec::new();
        let mut source = None;

        if self.peek_is(&TokenKind::LParen)? {
            // Either a column list or a SELECT source.
            if self.peek_kw_nth(1, Keyword::Select)? || self.peek_kw_nth(1, Keyword::With)? {
                source = Some(InsertSource::Select(Box::new(self.parse_query_expr()?)));
            } else {
                columns = self.parse_paren_ident_list()?;
            }
        }

        let source = if let Some(source) = source {
            source
        } else if self.eat_kw(Keyword::Values)? || self.eat_kw(Keyword::Value)? {
            let mut rows = vec![self.parse_value_row()?];
            while self.eat(&TokenKind::Comma)? {
                rows.push(self.parse_value_row()?);
            }
            InsertSource::Values(rows)
        } else if self.peek_kw(Keyword::Select)?
            || self.peek_kw(Keyword::With)?
            || self.peek_is(&TokenKind::LParen)?
        {
            InsertSource::Select(Box::new(self.parse_query_expr()?))
        } else if self.eat_kw(Keyword::Set)? {
            let mut assignments = vec![self.parse_assignment()?];
            while self.eat(&TokenKind::Comma)? {
                assignments.push(self.parse_assignment()?);
            }
            InsertSource::Set(assignments)
        } else {
            return Err(self.err_expected_strs(&["VALUES", "SELECT", "SET", "("]));
        };

        let on_duplicate = if self.eat_kw(Keyword::On)? {
            self.expect_kw(Keyword::Duplicate)?;
            self.expect_kw(Keyword::Key)?;
            self.expect_kw(Keyword::Update)?;
            let mut assignments = vec![self.parse_assignment()?];
            while self.eat(&TokenKind::Comma)? {
                assignments.push(self.parse_assignment()?);
            }
            assignments
        } else {
            Vec::new()
        };

        Ok(Statement::Insert(Box::new(InsertStatement {
            action,
            ignore,
            table,
            columns,
            source,
            on_duplicate,
        })))
    }

    fn parse_value_row(&mut self) -> Result<Vec<Expr>> {
        self.expect(&TokenKind::LParen)?;
        if self.eat(&TokenKind::RParen)? {
            return Ok(Vec::new());
        }
        let mut row = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma)? {
            row.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RParen)?;
        Ok(row)
    }

    /// A `column = expr` pair; the `=` is clause grammar, never parsed as a
    /// comparison.
    pub(crate) fn parse_assignment(&mut self) -> Result<Assignment> {
        let target = self.parse_column_ref()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(Assignment { target, value })
    }

    pub(crate) fn parse_column_ref(&mut self) -> Result<ColumnRef> {
        let first = self.parse_ident()?;
        if !self.eat(&TokenKind::Dot)? {
            return Ok(ColumnRef {
                qualifier: None,
                name: first,
            });
        }
        let second = self.parse_ident()?;
        if self.eat(&TokenKind::Dot)? {
            let third = self.parse_ident()?;
            Ok(ColumnRef {
                qualifier: Some(TableName {
                    qualifier: Some(first),
                    name: second,
                }),
                name: third,
            })
        } else {
            Ok(ColumnRef {
                qualifier: Some(TableName {
                    qualifier: None,
                    name: first,
                }),
                name: second,
            })
        }
    }

    fn parse_update(&mut self) -> Result<Statement> {
        self.parse_update_with(None)
    }

    fn parse_delete(&mut self) -> Result<Statement> {
        self.parse_delete_with(None)
    }

    fn parse_update_with(&mut self, with: Option<WithClause>) -> Result<Statement> {
        self.expect_kw(Keyword::Update)?;
        let _ = self.eat_kw(Keyword::LowPriority)?;
        let _ = self.eat_kw(Keyword::Ignore)?;
        let mut table_exprs = vec![self.parse_table_expr()?];
        while self.eat(&TokenKind::Comma)? {
            table_exprs.push(self.parse_table_expr()?);
        }
        self.expect_kw(Keyword::Set)?;
        let mut assignments = vec![self.parse_assignment()?];
        while self.eat(&TokenKind::Comma)? {
            assignments.push(self.parse_assignment()?);
        }
        let where_clause = if self.eat_kw(Keyword::Where)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let order_by = self.parse_opt_order_by()?;
        let limit = if self.eat_kw(Keyword::Limit)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Update(Box::new(UpdateStatement {
            with,
            table_exprs,
            assignments,
            where_clause,
            order_by,
            limit,
        })))
    }

    fn parse_delete_with(&mut self, with: Option<WithClause>) -> Result<Statement> {
        self.expect_kw(Keyword::Delete)?;
        let _ = self.eat_kw(Keyword::LowPriority)?;
        let _ = self.eat_kw(Keyword::Ignore)?;

        let mut targets = Vec::new();
        if !self.peek_kw(Keyword::From)? {
            targets.push(self.parse_table_name()?);
            while self.eat(&TokenKind::Comma)? {
                targets.push(self.parse_table_name()?);
            }
        }
        self.expect_kw(Keyword::From)?;
        let mut table_exprs = vec![self.parse_table_expr()?];
        while self.eat(&TokenKind::Comma)? {
            table_exprs.push(self.parse_table_expr()?);
        }
        let where_clause = if self.eat_kw(Keyword::Where)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let order_by = self.parse_opt_order_by()?;
        let limit = if self.eat_kw(Keyword::Limit)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Delete(Box::new(DeleteStatement {
            with,
            targets,
            table_exprs,
            where_clause,
            order_by,
            limit,
        })))
    }

    // -----------------------------------------------------------------------
    // DDL
    // -----------------------------------------------------------------------

    fn parse_create(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Create)?;

        if self.peek_kw(Keyword::Or)? {
            self.next()?;
            self.expect_kw(Keyword::Replace)?;
            self.expect_kw(Keyword::View)?;
            return self.parse_create_view(true);
        }
        if self.eat_kw(Keyword::View)? {
            return self.parse_create_view(false);
        }

        let temporary = self.eat_kw(Keyword::Temporary)?;
        if self.eat_kw(Keyword::Table)? {
            return self.parse_create_table(temporary);
        }
        if temporary {
            return Err(self.err_expected_strs(&["TABLE"]));
        }

        let kind = if self.eat_kw(Keyword::Unique)? {
            IndexKind::Unique
        } else if self.eat_kw(Keyword::Fulltext)? {
            IndexKind::FullText
        } else if self.eat_kw(Keyword::Spatial)? {
            IndexKind::Spatial
        } else {
            IndexKind::Plain
        };
        if self.eat_kw(Keyword::Index)? {
            let name = self.parse_ident()?;
            self.expect_kw(Keyword::On)?;
            let table = self.parse_table_name()?;
            self.expect(&TokenKind::LParen)?;
            let columns = self.parse_index_columns()?;
            self.expect(&TokenKind::RParen)?;
            return Ok(Statement::CreateIndex(Box::new(CreateIndexStatement {
                kind,
                name,
                table,
                columns,
            })));
        }

        Err(self.err_expected_strs(&["TABLE", "VIEW", "INDEX"]))
    }

    fn parse_create_view(&mut self, or_replace: bool) -> Result<Statement> {
        let name = self.parse_table_name()?;
        let columns = if self.peek_is(&TokenKind::LParen)? {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        self.expect_kw(Keyword::As)?;
        let query = self.parse_query_expr()?;
        Ok(Statement::CreateView(Box::new(CreateViewStatement {
            or_replace,
            name,
            columns,
            query,
        })))
    }

    fn parse_create_table(&mut self, temporary: bool) -> Result<Statement> {
        let if_not_exists = if self.eat_kw(Keyword::If)? {
            self.expect_kw(Keyword::Not)?;
            self.expect_kw(Keyword::Exists)?;
            true
        } else {
            false
        };
        let name = self.parse_table_name()?;

        let body = if self.eat_kw(Keyword::Like)? {
            CreateTableBody::Like(self.parse_table_name()?)
        } else if self.eat_kw(Keyword::As)? {
            CreateTableBody::AsQuery(Box::new(self.parse_query_expr()?))
        } else if self.peek_kw(Keyword::Select)? || self.peek_kw(Keyword::With)? {
            CreateTableBody::AsQuery(Box::new(self.parse_query_expr()?))
        } else {
            self.expect(&TokenKind::LParen)?;
            let mut columns = Vec::new();
            let mut constraints = Vec::new();
            loop {
                if self.peek_constraint_start()? {
                    constraints.push(self.parse_table_constraint()?);
                } else {
                    columns.push(self.parse_column_def()?);
                }
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(&TokenKind::RParen)?;
            let options = self.parse_table_options()?;
            CreateTableBody::Definition {
                columns,
                constraints,
                options,
            }
        };

        Ok(Statement::CreateTable(Box::new(CreateTableStatement {
            temporary,
            if_not_exists,
            name,
            body,
        })))
    }

    fn peek_constraint_start(&mut self) -> Result<bool> {
        Ok(matches!(
            self.peek()?,
            TokenKind::Keyword(
                Keyword::Primary
                    | Keyword::Unique
                    | Keyword::Key
                    | Keyword::Index
                    | Keyword::Foreign
                    | Keyword::Fulltext
                    | Keyword::Spatial
                    | Keyword::Constraint
            )
        ))
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint> {
        let name = if self.eat_kw(Keyword::Constraint)? {
            if self.is_ident_like(0)? {
                Some(self.parse_ident()?)
            } else {
                None
            }
        } else {
            None
        };

        let kind = if self.eat_kw(Keyword::Primary)? {
            self.expect_kw(Keyword::Key)?;
            self.expect(&TokenKind::LParen)?;
            let columns = self.parse_index_columns()?;
            self.expect(&TokenKind::RParen)?;
            TableConstraintKind::PrimaryKey(columns)
        } else if self.eat_kw(Keyword::Unique)? {
            let _ = self.eat_kw(Keyword::Key)? || self.eat_kw(Keyword::Index)?;
            let index_name = if self.is_ident_like(0)? {
                Some(self.parse_ident()?)
            } else {
                None
            };
            self.expect(&TokenKind::LParen)?;
            let columns = self.parse_index_columns()?;
            self.expect(&TokenKind::RParen)?;
            TableConstraintKind::Unique {
                index_name,
                columns,
            }
        } else if self.eat_kw(Keyword::Fulltext)? {
            let _ = self.eat_kw(Keyword::Key)? || self.eat_kw(Keyword::Index)?;
            let index_name = if self.is_ident_like(0)? {
                Some(self.parse_ident()?)
            } else {
                None
            };
            self.expect(&TokenKind::LParen)?;
            let columns = self.parse_index_columns()?;
            self.expect(&TokenKind::RParen)?;
            TableConstraintKind::FullText {
                index_name,
                columns,
            }
        } else if self.eat_kw(Keyword::Foreign)? {
            self.expect_kw(Keyword::Key)?;
            let index_name = if self.is_ident_like(0)? {
                Some(self.parse_ident()?)
            } else {
                None
            };
            let columns = self.parse_paren_ident_list()?;
            self.expect_kw(Keyword::References)?;
            let ref_table = self.parse_table_name()?;
            let ref_columns = self.parse_paren_ident_list()?;
            let mut on_delete = None;
            let mut on_update = None;
            while self.eat_kw(Keyword::On)? {
                if self.eat_kw(Keyword::Delete)? {
                    on_delete = Some(self.parse_reference_action()?);
                } else {
                    self.expect_kw(Keyword::Update)?;
                    on_update = Some(self.parse_reference_action()?);
                }
            }
            TableConstraintKind::ForeignKey {
                index_name,
                columns,
                ref_table,
                ref_columns,
                on_delete,
                on_update,
            }
        } else if self.eat_kw(Keyword::Key)? || self.eat_kw(Keyword::Index)? {
            let index_name = if self.is_ident_like(0)? {
                Some(self.parse_ident()?)
            } else {
                None
            };
            self.expect(&TokenKind::LParen)?;
            let columns = self.parse_index_columns()?;
            self.expect(&TokenKind::RParen)?;
            TableConstraintKind::Index {
                index_name,
                columns,
            }
        } else {
            return Err(self.err_expected_strs(&[
                "PRIMARY KEY",
                "UNIQUE",
                "KEY",
                "FOREIGN KEY",
                "FULLTEXT",
            ]));
        };

        Ok(TableConstraint { name, kind })
    }

    fn parse_reference_action(&mut self) -> Result<ReferenceAction> {
        if self.eat_kw(Keyword::Restrict)? {
            Ok(ReferenceAction::Restrict)
        } else if self.eat_kw(Keyword::Cascade)? {
            Ok(ReferenceAction::Cascade)
        } else if self.eat_kw(Keyword::Set)? {
            if self.eat_kw(Keyword::Null)? {
                Ok(ReferenceAction::SetNull)
            } else {
                self.expect_kw(Keyword::Default)?;
                Ok(ReferenceAction::SetDefault)
            }
        } else if self.eat_kw(Keyword::No)? {
            self.expect_kw(Keyword::Action)?;
            Ok(ReferenceAction::NoAction)
        } else {
            Err(self.err_expected_strs(&["RESTRICT", "CASCADE", "SET NULL", "NO ACTION"]))
        }
    }

    fn parse_index_columns(&mut self) -> Result<Vec<IndexColumn>> {
        let mut out = Vec::new();
        loop {
            let name = self.parse_ident()?;
            let length = if self.eat(&TokenKind::LParen)? {
                let n = self.parse_unsigned_number()?;
                self.expect(&TokenKind::RParen)?;
                Some(n)
            } else {
                None
            };
            let direction = if self.eat_kw(Keyword::Asc)? {
                Some(OrderDirection::Asc)
            } else if self.eat_kw(Keyword::Desc)? {
                Some(OrderDirection::Desc)
            } else {
                None
            };
            out.push(IndexColumn {
                name,
                length,
                direction,
            });
            if !self.eat(&TokenKind::Comma)? {
                return Ok(out);
            }
        }
    }

    fn parse_unsigned_number(&mut self) -> Result<u64> {
        match self.peek()? {
            TokenKind::Integral(text) => {
                let tok = self.next()?;
                text.parse().map_err(|_| {
                    Error::new(
                        ErrorKind::InvalidNumber,
                        token_pos(&tok),
                        format!("'{text}' does not fit an unsigned integer"),
                    )
                })
            }
            _ => Err(self.err_expected_strs(&["integer"])),
        }
    }

    pub(crate) fn parse_column_def(&mut self) -> Result<ColumnDef> {
        let name = self.parse_ident()?;
        let typ = self.parse_column_type()?;
        let mut options = Vec::new();
        loop {
            match self.peek()? {
                TokenKind::Keyword(Keyword::Not) => {
                    self.next()?;
                    self.expect_kw(Keyword::Null)?;
                    options.push(ColumnOption::NotNull);
                }
                TokenKind::Keyword(Keyword::Null) => {
                    self.next()?;
                    options.push(ColumnOption::Null);
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.next()?;
                    options.push(ColumnOption::Default(self.parse_expr()?));
                }
                TokenKind::Keyword(Keyword::On) => {
                    self.next()?;
                    self.expect_kw(Keyword::Update)?;
                    options.push(ColumnOption::OnUpdate(self.parse_expr()?));
                }
                TokenKind::Keyword(Keyword::AutoIncrement) => {
                    self.next()?;
                    options.push(ColumnOption::AutoIncrement);
                }
                TokenKind::Keyword(Keyword::Primary) => {
                    self.next()?;
                    self.expect_kw(Keyword::Key)?;
                    options.push(ColumnOption::PrimaryKey);
                }
                TokenKind::Keyword(Keyword::Unique) => {
                    self.next()?;
                    let _ = self.eat_kw(Keyword::Key)?;
                    options.push(ColumnOption::Unique);
                }
                TokenKind::Keyword(Keyword::Comment) => {
                    self.next()?;
                    options.push(ColumnOption::Comment(self.parse_string()?));
                }
                TokenKind::Keyword(Keyword::Collate) => {
                    self.next()?;
                    options.push(ColumnOption::Collate(self.parse_charset_name()?));
                }
                _ => break,
            }
        }
        Ok(ColumnDef { name, typ, options })
    }

    fn parse_column_type(&mut self) -> Result<ColumnType> {
        let name = match self.peek()? {
            TokenKind::Ident(s) => {
                self.next()?;
                s.to_ascii_uppercase()
            }
            TokenKind::Keyword(
                k @ (Keyword::Char
                | Keyword::Character
                | Keyword::Binary
                | Keyword::Enum
                | Keyword::Set
                | Keyword::Signed
                | Keyword::Unsigned
                | Keyword::Interval),
            ) => {
                self.next()?;
                k.as_str().to_owned()
            }
            _ => return Err(self.err_expected_strs(&["type name"])),
        };

        let mut typ = ColumnType {
            name,
            ..ColumnType::default()
        };
        if typ.name == "CHARACTER" {
            typ.name = "CHAR".to_owned();
        }

        if typ.name == "ENUM" || typ.name == "SET" {
            self.expect(&TokenKind::LParen)?;
            loop {
                typ.enum_values.push(self.parse_string()?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(&TokenKind::RParen)?;
        } else if self.eat(&TokenKind::LParen)? {
            typ.length = Some(self.parse_unsigned_number()?);
            if self.eat(&TokenKind::Comma)? {
                typ.scale = Some(self.parse_unsigned_number()?);
            }
            self.expect(&TokenKind::RParen)?;
        }

        loop {
            if self.eat_kw(Keyword::Unsigned)? {
                typ.unsigned = true;
            } else if self.eat_kw(Keyword::Zerofill)? {
                typ.zerofill = true;
            } else if self.peek_kw(Keyword::Character)? && self.peek_kw_nth(1, Keyword::Set)? {
                self.next()?;
                self.next()?;
                typ.charset = Some(self.parse_charset_name()?);
            } else if self.eat_kw(Keyword::Charset)? {
                typ.charset = Some(self.parse_charset_name()?);
            } else if self.eat_kw(Keyword::Collate)? {
                typ.collate = Some(self.parse_charset_name()?);
            } else {
                break;
            }
        }
        Ok(typ)
    }

    fn parse_table_options(&mut self) -> Result<Vec<TableOption>> {
        let mut out = Vec::new();
        loop {
            let name = match self.peek()? {
                TokenKind::Keyword(Keyword::Engine) => {
                    self.next()?;
                    "ENGINE".to_owned()
                }
                TokenKind::Keyword(Keyword::AutoIncrement) => {
                    self.next()?;
                    "AUTO_INCREMENT".to_owned()
                }
                TokenKind::Keyword(Keyword::Comment) => {
                    self.next()?;
                    "COMMENT".to_owned()
                }
                TokenKind::Keyword(Keyword::Collate) => {
                    self.next()?;
                    "COLLATE".to_owned()
                }
                TokenKind::Keyword(Keyword::Default | Keyword::Character | Keyword::Charset) => {
                    let _ = self.eat_kw(Keyword::Default)?;
                    if self.eat_kw(Keyword::Charset)? {
                        "CHARSET".to_owned()
                    } else if self.eat_kw(Keyword::Character)? {
                        self.expect_kw(Keyword::Set)?;
                        "CHARSET".to_owned()
                    } else {
                        self.expect_kw(Keyword::Collate)?;
                        "COLLATE".to_owned()
                    }
                }
                _ => return Ok(out),
            };
            let _ = self.eat(&TokenKind::Eq)?;
            let value = match self.peek()? {
                TokenKind::Str { value, .. } => {
                    self.next()?;
                    TableOptionValue::Str(value)
                }
                TokenKind::Integral(n) => {
                    self.next()?;
                    TableOptionValue::Number(n)
                }
                _ => TableOptionValue::Ident(self.parse_ident()?.0),
            };
            out.push(TableOption { name, value });
        }
    }

    fn parse_drop(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Drop)?;
        if self.eat_kw(Keyword::Prepare)? {
            return Ok(Statement::Deallocate(self.parse_ident()?));
        }
        if self.eat_kw(Keyword::Table)? {
            let if_exists = self.parse_if_exists()?;
            let mut names = vec![self.parse_table_name()?];
            while self.eat(&TokenKind::Comma)? {
                names.push(self.parse_table_name()?);
            }
            return Ok(Statement::DropTable(DropStatement { if_exists, names }));
        }
        if self.eat_kw(Keyword::View)? {
            let if_exists = self.parse_if_exists()?;
            let mut names = vec![self.parse_table_name()?];
            while self.eat(&TokenKind::Comma)? {
                names.push(self.parse_table_name()?);
            }
            return Ok(Statement::DropView(DropStatement { if_exists, names }));
        }
        if self.eat_kw(Keyword::Index)? {
            let name = self.parse_ident()?;
            self.expect_kw(Keyword::On)?;
            let table = self.parse_table_name()?;
            return Ok(Statement::DropIndex(DropIndexStatement { name, table }));
        }
        Err(self.err_expected_strs(&["TABLE", "VIEW", "INDEX", "PREPARE"]))
    }

    fn parse_if_exists(&mut self) -> Result<bool> {
        if self.eat_kw(Keyword::If)? {
            self.expect_kw(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_alter(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Alter)?;
        self.expect_kw(Keyword::Table)?;
        let table = self.parse_table_name()?;
        let mut actions = vec![self.parse_alter_action()?];
        while self.eat(&TokenKind::Comma)? {
            actions.push(self.parse_alter_action()?);
        }
        Ok(Statement::AlterTable(Box::new(AlterTableStatement {
            table,
            actions,
        })))
    }

    fn parse_alter_action(&mut self) -> Result<AlterTableAction> {
        if self.eat_kw(Keyword::Add)? {
            if self.peek_constraint_start()? {
                return Ok(AlterTableAction::AddConstraint(
                    self.parse_table_constraint()?,
                ));
            }
            let _ = self.eat_kw(Keyword::Column)?;
            let def = self.parse_column_def()?;
            let position = self.parse_opt_column_position()?;
            return Ok(AlterTableAction::AddColumn { def, position });
        }
        if self.eat_kw(Keyword::Drop)? {
            if self.eat_kw(Keyword::Primary)? {
                self.expect_kw(Keyword::Key)?;
                return Ok(AlterTableAction::DropPrimaryKey);
            }
            if self.eat_kw(Keyword::Foreign)? {
                self.expect_kw(Keyword::Key)?;
                return Ok(AlterTableAction::DropForeignKey(self.parse_ident()?));
            }
            if self.eat_kw(Keyword::Index)? || self.eat_kw(Keyword::Key)? {
                return Ok(AlterTableAction::DropIndex(self.parse_ident()?));
            }
            let _ = self.eat_kw(Keyword::Column)?;
            return Ok(AlterTableAction::DropColumn(self.parse_ident()?));
        }
        if self.eat_kw(Keyword::Modify)? {
            let _ = self.eat_kw(Keyword::Column)?;
            let def = self.parse_column_def()?;
            let position = self.parse_opt_column_position()?;
            return Ok(AlterTableAction::ModifyColumn { def, position });
        }
        if self.eat_kw(Keyword::Change)? {
            let _ = self.eat_kw(Keyword::Column)?;
            let old = self.parse_ident()?;
            let def = self.parse_column_def()?;
            let position = self.parse_opt_column_position()?;
            return Ok(AlterTableAction::ChangeColumn { old, def, position });
        }
        if self.eat_kw(Keyword::Rename)? {
            if self.eat_kw(Keyword::Column)? {
                let old = self.parse_ident()?;
                self.expect_kw(Keyword::To)?;
                let new = self.parse_ident()?;
                return Ok(AlterTableAction::RenameColumn { old, new });
            }
            let _ = self.eat_kw(Keyword::To)? || self.eat_kw(Keyword::As)?;
            return Ok(AlterTableAction::RenameTo(self.parse_table_name()?));
        }
        Err(self.err_expected_strs(&["ADD", "DROP", "MODIFY", "CHANGE", "RENAME"]))
    }

    fn parse_opt_column_position(&mut self) -> Result<Option<ColumnPosition>> {
        if self.eat_kw(Keyword::First)? {
            return Ok(Some(ColumnPosition::First));
        }
        if self.eat_kw(Keyword::After)? {
            return Ok(Some(ColumnPosition::After(self.parse_ident()?)));
        }
        Ok(None)
    }

    // -----------------------------------------------------------------------
    // SET / SHOW
    // -----------------------------------------------------------------------

    fn parse_set(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Set)?;
        let mut exprs = vec![self.parse_set_expr()?];
        while self.eat(&TokenKind::Comma)? {
            exprs.push(self.parse_set_expr()?);
        }
        Ok(Statement::Set(SetStatement { exprs }))
    }

    fn parse_set_expr(&mut self) -> Result<SetExpr> {
        if self.eat_kw(Keyword::Names)? {
            let charset = if self.eat_kw(Keyword::Default)? {
                None
            } else {
                Some(self.parse_charset_name()?)
            };
            let collate = if self.eat_kw(Keyword::Collate)? {
                Some(self.parse_charset_name()?)
            } else {
                None
            };
            return Ok(SetExpr::Names { charset, collate });
        }
        if self.peek_kw(Keyword::Character)? && self.peek_kw_nth(1, Keyword::Set)? {
            self.next()?;
            self.next()?;
            let charset = if self.eat_kw(Keyword::Default)? {
                None
            } else {
                Some(self.parse_charset_name()?)
            };
            return Ok(SetExpr::CharacterSet(charset));
        }
        if self.peek_kw(Keyword::Charset)? {
            self.next()?;
            let charset = if self.eat_kw(Keyword::Default)? {
                None
            } else {
                Some(self.parse_charset_name()?)
            };
            return Ok(SetExpr::CharacterSet(charset));
        }

        let scope = if self.eat_kw(Keyword::Global)? {
            Some(SetScope::Global)
        } else if self.eat_kw(Keyword::Session)? {
            Some(SetScope::Session)
        } else if self.eat_kw(Keyword::Local)? {
            Some(SetScope::Local)
        } else {
            None
        };

        let target = match self.peek()? {
            TokenKind::AtParam(name) => {
                self.next()?;
                SetTarget::UserVar(Ident(name))
            }
            TokenKind::AtAtParam(name) => {
                self.next()?;
                // `@@scope.var` carries its scope inline.
                if let Some(s) = scope_from_name(&name) {
                    if self.eat(&TokenKind::Dot)? {
                        let var = self.parse_ident()?;
                        return self.finish_set_assign(Some(s), SetTarget::SysVar(var));
                    }
                }
                SetTarget::SysVar(Ident(name))
            }
            _ => SetTarget::SysVar(self.parse_ident()?),
        };
        self.finish_set_assign(scope, target)
    }

    fn finish_set_assign(
        &mut self,
        scope: Option<SetScope>,
        target: SetTarget,
    ) -> Result<SetExpr> {
        if !self.eat(&TokenKind::Eq)? && !self.eat(&TokenKind::Assign)? {
            return Err(self.err_expected_strs(&["=", ":="]));
        }
        let value = if self.eat_kw(Keyword::Default)? {
            SetValue::Default
        } else {
            SetValue::Expr(self.parse_expr()?)
        };
        Ok(SetExpr::Assign {
            scope,
            target,
            value,
        })
    }

    fn parse_show(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Show)?;
        let full = self.eat_kw(Keyword::Full)?;

        let kind = match self.peek()? {
            TokenKind::Keyword(Keyword::Databases) => {
                self.next()?;
                ShowKind::Databases
            }
            TokenKind::Keyword(Keyword::Tables) => {
                self.next()?;
                let db = if self.eat_kw(Keyword::From)? || self.eat_kw(Keyword::In)? {
                    Some(self.parse_ident()?)
                } else {
                    None
                };
                ShowKind::Tables { full, db }
            }
            TokenKind::Keyword(Keyword::Table) => {
                self.next()?;
                self.expect_kw(Keyword::Status)?;
                let db = if self.eat_kw(Keyword::From)? || self.eat_kw(Keyword::In)? {
                    Some(self.parse_ident()?)
                } else {
                    None
                };
                ShowKind::TableStatus { db }
            }
            TokenKind::Keyword(Keyword::Columns | Keyword::Fields) => {
                self.next()?;
                if !self.eat_kw(Keyword::From)? {
                    self.expect_kw(Keyword::In)?;
                }
                ShowKind::Columns {
                    full,
                    table: self.parse_table_name()?,
                }
            }
            TokenKind::Keyword(Keyword::Create) => {
                self.next()?;
                if self.eat_kw(Keyword::Table)? {
                    ShowKind::CreateTable(self.parse_table_name()?)
                } else {
                    self.expect_kw(Keyword::View)?;
                    ShowKind::CreateView(self.parse_table_name()?)
                }
            }
            TokenKind::Keyword(Keyword::Index | Keyword::Keys) => {
                self.next()?;
                if !self.eat_kw(Keyword::From)? {
                    self.expect_kw(Keyword::In)?;
                }
                ShowKind::Index(self.parse_table_name()?)
            }
            TokenKind::Keyword(Keyword::Global | Keyword::Session) => {
                let scope = if self.eat_kw(Keyword::Global)? {
                    SetScope::Global
                } else {
                    self.next()?;
                    SetScope::Session
                };
                if self.eat_kw(Keyword::Variables)? {
                    ShowKind::Variables { scope: Some(scope) }
                } else {
                    self.expect_kw(Keyword::Status)?;
                    ShowKind::Status { scope: Some(scope) }
                }
            }
            TokenKind::Keyword(Keyword::Variables) => {
                self.next()?;
                ShowKind::Variables { scope: None }
            }
            TokenKind::Keyword(Keyword::Status) => {
                self.next()?;
                ShowKind::Status { scope: None }
            }
            TokenKind::Keyword(Keyword::Engines) => {
                self.next()?;
                ShowKind::Engines
            }
            TokenKind::Keyword(Keyword::Collation) => {
                self.next()?;
                ShowKind::Collation
            }
            TokenKind::Keyword(Keyword::Character) => {
                self.next()?;
                self.expect_kw(Keyword::Set)?;
                ShowKind::Charset
            }
            TokenKind::Keyword(Keyword::Charset) => {
                self.next()?;
                ShowKind::Charset
            }
            TokenKind::Keyword(Keyword::Grants) => {
                self.next()?;
                ShowKind::Grants
            }
            TokenKind::Keyword(Keyword::Processlist) => {
                self.next()?;
                ShowKind::ProcessList { full }
            }
            TokenKind::Keyword(Keyword::Warnings) => {
                self.next()?;
                ShowKind::Warnings
            }
            TokenKind::Keyword(Keyword::Errors) => {
                self.next()?;
                ShowKind::Errors
            }
            _ => {
                return Err(self.err_expected_strs(&[
                    "DATABASES",
                    "TABLES",
                    "COLUMNS",
                    "CREATE",
                    "INDEX",
                    "VARIABLES",
                    "STATUS",
                ]))
            }
        };

        let filter = if self.eat_kw(Keyword::Like)? {
            Some(ShowFilter::Like(self.parse_string()?))
        } else if self.eat_kw(Keyword::Where)? {
            Some(ShowFilter::Where(self.parse_expr()?))
        } else {
            None
        };

        Ok(Statement::Show(ShowStatement { kind, filter }))
    }

    // -----------------------------------------------------------------------
    // Prepared statements and utility statements
    // -----------------------------------------------------------------------

    fn parse_prepare(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Prepare)?;
        let name = self.parse_ident()?;
        self.expect_kw(Keyword::From)?;
        let source = match self.peek()? {
            TokenKind::Str { value, .. } => {
                self.next()?;
                PrepareSource::Literal(value)
            }
            TokenKind::AtParam(var) => {
                self.next()?;
                PrepareSource::Var(Ident(var))
            }
            _ => return Err(self.err_expected_strs(&["string literal", "@variable"])),
        };
        Ok(Statement::Prepare(PrepareStatement { name, source }))
    }

    fn parse_execute(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Execute)?;
        let name = self.parse_ident()?;
        let mut vars = Vec::new();
        if self.eat_kw(Keyword::Using)? {
            loop {
                match self.peek()? {
                    TokenKind::AtParam(var) => {
                        self.next()?;
                        vars.push(Ident(var));
                    }
                    _ => return Err(self.err_expected_strs(&["@variable"])),
                }
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        Ok(Statement::Execute(ExecuteStatement { name, vars }))
    }

    fn parse_explain(&mut self) -> Result<Statement> {
        self.next()?;
        let format = if self.eat_kw(Keyword::Format)? {
            self.expect(&TokenKind::Eq)?;
            Some(self.parse_ident()?.0.to_ascii_uppercase())
        } else {
            None
        };
        let target = if self.peek()?.is_statement_start() {
            ExplainTarget::Statement(self.parse_statement()?)
        } else {
            ExplainTarget::Table(self.parse_table_name()?)
        };
        Ok(Statement::Explain(Box::new(ExplainStatement {
            format,
            target,
        })))
    }

    fn parse_call(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Call)?;
        let name = self.parse_table_name()?;
        let mut args = Vec::new();
        if self.eat(&TokenKind::LParen)? {
            if !self.peek_is(&TokenKind::RParen)? {
                args.push(self.parse_expr()?);
                while self.eat(&TokenKind::Comma)? {
                    args.push(self.parse_expr()?);
                }
            }
            self.expect(&TokenKind::RParen)?;
        }
        Ok(Statement::Call(CallStatement { name, args }))
    }

    fn parse_load(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Load)?;
        self.expect_kw(Keyword::Data)?;
        let local = self.eat_kw(Keyword::Local)?;
        self.expect_kw(Keyword::Infile)?;
        let path = self.parse_string()?;
        let duplicate = if self.eat_kw(Keyword::Replace)? {
            Some(LoadDuplicate::Replace)
        } else if self.eat_kw(Keyword::Ignore)? {
            Some(LoadDuplicate::Ignore)
        } else {
            None
        };
        self.expect_kw(Keyword::Into)?;
        self.expect_kw(Keyword::Table)?;
        let table = self.parse_table_name()?;
        let columns = if self.peek_is(&TokenKind::LParen)? {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        Ok(Statement::Load(Box::new(LoadStatement {
            local,
            path,
            duplicate,
            table,
            columns,
        })))
    }

    fn parse_lock(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Lock)?;
        self.expect_kw(Keyword::Tables)?;
        let mut tables = Vec::new();
        loop {
            let table = self.parse_table_name()?;
            let alias = if self.eat_kw(Keyword::As)? {
                Some(self.parse_ident()?)
            } else {
                None
            };
            let lock = if self.eat_kw(Keyword::Read)? {
                if self.eat_kw(Keyword::Local)? {
                    LockType::ReadLocal
                } else {
                    LockType::Read
                }
            } else if self.eat_kw(Keyword::LowPriority)? {
                self.expect_kw(Keyword::Write)?;
                LockType::LowPriorityWrite
            } else {
                self.expect_kw(Keyword::Write)?;
                LockType::Write
            };
            tables.push(TableLock { table, alias, lock });
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        Ok(Statement::Lock(LockStatement { tables }))
    }

    fn parse_flush(&mut self) -> Result<Statement> {
        self.expect_kw(Keyword::Flush)?;
        let local = self.eat_kw(Keyword::Local)?;
        let kind = if self.eat_kw(Keyword::Tables)? {
            let mut tables = Vec::new();
            if self.is_ident_like(0)? {
                tables.push(self.parse_table_name()?);
                while self.eat(&TokenKind::Comma)? {
                    tables.push(self.parse_table_name()?);
                }
            }
            FlushKind::Tables(tables)
        } else if self.eat_kw(Keyword::Logs)? {
            FlushKind::Logs
        } else if self.eat_kw(Keyword::Privileges)? {
            FlushKind::Privileges
        } else if self.eat_kw(Keyword::Status)? {
            FlushKind::Status
        } else if self.eat_kw(Keyword::Hosts)? {
            FlushKind::Hosts
        } else {
            return Err(self.err_expected_strs(&[
                "TABLES",
                "LOGS",
                "PRIVILEGES",
                "STATUS",
                "HOSTS",
            ]));
        };
        Ok(Statement::Flush(FlushStatement { local, kind }))
    }

    fn parse_maintenance(&mut self) -> Result<MaintenanceStatement> {
        let local = self.eat_kw(Keyword::Local)?;
        self.expect_kw(Keyword::Table)?;
        let mut tables = vec![self.parse_table_name()?];
        while self.eat(&TokenKind::Comma)? {
            tables.push(self.parse_table_name()?);
        }
        Ok(MaintenanceStatement { local, tables })
    }
}

fn scope_from_name(name: &str) -> Option<SetScope> {
    match name.to_ascii_uppercase().as_str() {
        "GLOBAL" => Some(SetScope::Global),
        "SESSION" => Some(SetScope::Session),
        "LOCAL" => Some(SetScope::Local),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Statement splitting
// ---------------------------------------------------------------------------

/// Split the input on top-level `;`, respecting string literals, quoted
/// identifiers, and comments. No AST is built; pieces are returned trimmed
/// and non-empty.
pub fn split(sql: &str) -> Result<Vec<String>> {
    let bytes = sql.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    let err_pos = |offset: usize| {
        let mut line = 1;
        let mut col = 1;
        let mut prev_cr = false;
        for &b in &bytes[..offset] {
            match b {
                b'\n' if prev_cr => {
                    prev_cr = false;
                }
                b'\n' | b'\r' => {
                    line += 1;
                    col = 1;
                    prev_cr = b == b'\r';
                }
                _ => {
                    col += 1;
                    prev_cr = false;
                }
            }
        }
        Position::new(line, col, offset)
    };

    while i < bytes.len() {
        match bytes[i] {
            b';' => {
                let piece = sql[start..i].trim();
                if !piece.is_empty() {
                    out.push(piece.to_owned());
                }
                i += 1;
                start = i;
            }
            q @ (b'\'' | b'"' | b'`') => {
                let open = i;
                i += 1;
                loop {
                    if i >= bytes.len() {
                        let kind = if q == b'`' {
                            ErrorKind::UnterminatedIdent
                        } else {
                            ErrorKind::UnterminatedString
                        };
                        return Err(Error::new(kind, err_pos(open), "quote is never closed"));
                    }
                    if bytes[i] == b'\\' && q != b'`' {
                        i += 2;
                        continue;
                    }
                    if bytes[i] == q {
                        if bytes.get(i + 1) == Some(&q) {
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    i += 1;
                }
            }
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'-' if bytes.get(i + 1) == Some(&b'-')
                && bytes
                    .get(i + 2)
                    .copied()
                    .map_or(true, |c| matches!(c, b' ' | b'\t' | b'\r' | b'\n')) =>
            {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let open = i;
                i += 2;
                loop {
                    if i + 1 >= bytes.len() {
                        return Err(Error::new(
                            ErrorKind::UnterminatedComment,
                            err_pos(open),
                            "block comment is never closed",
                        ));
                    }
                    if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }

    let piece = sql[start..].trim();
    if !piece.is_empty() {
        out.push(piece.to_owned());
    }
    Ok(out)
}

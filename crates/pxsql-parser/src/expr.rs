//! Pratt expression parser with MySQL operator precedence.
//!
//! Precedence ladder, lowest to highest:
//!   OR / ||
//!   XOR
//!   AND / &&
//!   NOT (prefix)
//!   BETWEEN
//!   comparison (= <=> != <> < <= > >= IS LIKE REGEXP IN)
//!   |
//!   &
//!   << >>
//!   + -
//!   * / DIV MOD %
//!   ^
//!   unary - + ~ !
//!   COLLATE
//!   -> ->>
//!
//! `=` in assignment contexts (SET, ON DUPLICATE KEY UPDATE) never reaches
//! this module; those clauses use dedicated grammar.

use pxsql_ast::{
    BinaryOp, BuiltinFunc, ColumnRef, ComparisonOp, ConvertTarget, ConvertType, Expr, FrameBound,
    FrameExclusion, FrameSpec, FrameUnits, FunctionArgs, Ident, IsCheck, Over, Placeholder, Span,
    TableName, UnaryOp, VariableScope, WindowSpec,
};
use pxsql_error::{Error, Result};
use pxsql_types::{IntervalUnit, Type, Value};

use crate::parser::{token_pos, Parser};
use crate::token::{Keyword, Token, TokenKind};

// Binding powers: higher binds tighter. Left side is checked against the
// minimum; right side is passed to the recursive call.
mod bp {
    pub const OR: (u8, u8) = (1, 2);
    pub const XOR: (u8, u8) = (3, 4);
    pub const AND: (u8, u8) = (5, 6);
    pub const NOT_PREFIX: u8 = 7;
    pub const COMPARISON: (u8, u8) = (9, 10);
    pub const BETWEEN: (u8, u8) = (11, 12);
    pub const BIT_OR: (u8, u8) = (13, 14);
    pub const BIT_AND: (u8, u8) = (15, 16);
    pub const SHIFT: (u8, u8) = (17, 18);
    pub const ADD: (u8, u8) = (19, 20);
    pub const MUL: (u8, u8) = (21, 22);
    pub const BIT_XOR: (u8, u8) = (23, 24);
    pub const UNARY: u8 = 25;
    pub const COLLATE: u8 = 27;
    pub const JSON: (u8, u8) = (29, 30);
}

// Reserved words that are nevertheless ordinary function names when
// followed by a parenthesis.
const RESERVED_FUNCTION_NAMES: &[Keyword] = &[
    Keyword::If,
    Keyword::Replace,
    Keyword::Left,
    Keyword::Right,
    Keyword::Char,
];

impl Parser<'_> {
    /// Parse a single expression.
    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        self.enter_expression()?;
        let result = self.parse_expr_bp_inner(min_bp);
        self.leave();
        result
    }

    fn parse_expr_bp_inner(&mut self, min_bp: u8) -> Result<Expr> {
        let mut lhs = self.parse_prefix()?;

        loop {
            match self.peek()? {
                // Postfix COLLATE.
                TokenKind::Keyword(Keyword::Collate) => {
                    if bp::COLLATE < min_bp {
                        break;
                    }
                    self.next()?;
                    let collation = self.parse_ident()?;
                    let span = lhs.span();
                    lhs = Expr::Collate {
                        expr: Box::new(lhs),
                        collation,
                        span,
                    };
                }

                // IS [NOT] NULL / TRUE / FALSE.
                TokenKind::Keyword(Keyword::Is) => {
                    if bp::COMPARISON.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    let not = self.eat_kw(Keyword::Not)?;
                    let check = if self.eat_kw(Keyword::Null)? {
                        if not { IsCheck::NotNull } else { IsCheck::Null }
                    } else if self.eat_kw(Keyword::True)? {
                        if not { IsCheck::NotTrue } else { IsCheck::True }
                    } else if self.eat_kw(Keyword::False)? {
                        if not { IsCheck::NotFalse } else { IsCheck::False }
                    } else {
                        return Err(self.err_expected_strs(&["NULL", "TRUE", "FALSE"]));
                    };
                    let span = lhs.span();
                    lhs = Expr::Is {
                        expr: Box::new(lhs),
                        check,
                        span,
                    };
                }

                // Negated membership / pattern operators.
                TokenKind::Keyword(Keyword::Not) => {
                    if bp::COMPARISON.0 < min_bp {
                        break;
                    }
                    if !matches!(
                        self.peek_nth(1)?,
                        TokenKind::Keyword(
                            Keyword::Between | Keyword::Like | Keyword::In | Keyword::Regexp
                                | Keyword::Rlike
                        )
                    ) {
                        break;
                    }
                    self.next()?;
                    if self.eat_kw(Keyword::Between)? {
                        lhs = self.parse_between(lhs, true)?;
                    } else if self.eat_kw(Keyword::Like)? {
                        lhs = self.parse_like(lhs, ComparisonOp::NotLike)?;
                    } else if self.eat_kw(Keyword::In)? {
                        lhs = self.parse_in(lhs, ComparisonOp::NotIn)?;
                    } else {
                        let _ = self.eat_kw(Keyword::Regexp)? || self.eat_kw(Keyword::Rlike)?;
                        lhs = self.comparison_rhs(lhs, ComparisonOp::NotRegexp)?;
                    }
                }

                TokenKind::Keyword(Keyword::Between) => {
                    if bp::BETWEEN.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.parse_between(lhs, false)?;
                }

                TokenKind::Keyword(Keyword::Like) => {
                    if bp::COMPARISON.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.parse_like(lhs, ComparisonOp::Like)?;
                }

                TokenKind::Keyword(Keyword::Regexp | Keyword::Rlike) => {
                    if bp::COMPARISON.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.comparison_rhs(lhs, ComparisonOp::Regexp)?;
                }

                TokenKind::Keyword(Keyword::In) => {
                    if bp::COMPARISON.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.parse_in(lhs, ComparisonOp::In)?;
                }

                TokenKind::Eq
                | TokenKind::NullSafeEq
                | TokenKind::Ne
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge => {
                    if bp::COMPARISON.0 < min_bp {
                        break;
                    }
                    let op = match self.next()?.kind {
                        TokenKind::Eq => ComparisonOp::Eq,
                        TokenKind::NullSafeEq => ComparisonOp::NullSafeEq,
                        TokenKind::Ne => ComparisonOp::Ne,
                        TokenKind::Lt => ComparisonOp::Lt,
                        TokenKind::Le => ComparisonOp::Le,
                        TokenKind::Gt => ComparisonOp::Gt,
                        _ => ComparisonOp::Ge,
                    };
                    lhs = self.comparison_rhs(lhs, op)?;
                }

                TokenKind::Keyword(Keyword::And) | TokenKind::AndAnd => {
                    if bp::AND.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    let rhs = self.parse_expr_bp(bp::AND.1)?;
                    let span = lhs.span().merge(rhs.span());
                    lhs = Expr::And {
                        left: Box::new(lhs),
                        right: Box::new(rhs),
                        span,
                    };
                }

                TokenKind::Keyword(Keyword::Or) | TokenKind::OrOr => {
                    if bp::OR.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    let rhs = self.parse_expr_bp(bp::OR.1)?;
                    let span = lhs.span().merge(rhs.span());
                    lhs = Expr::Or {
                        left: Box::new(lhs),
                        right: Box::new(rhs),
                        span,
                    };
                }

                TokenKind::Keyword(Keyword::Xor) => {
                    if bp::XOR.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    let rhs = self.parse_expr_bp(bp::XOR.1)?;
                    let span = lhs.span().merge(rhs.span());
                    lhs = Expr::Xor {
                        left: Box::new(lhs),
                        right: Box::new(rhs),
                        span,
                    };
                }

                TokenKind::Pipe => {
                    if bp::BIT_OR.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.binary_rhs(lhs, BinaryOp::BitOr, bp::BIT_OR.1)?;
                }
                TokenKind::Ampersand => {
                    if bp::BIT_AND.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.binary_rhs(lhs, BinaryOp::BitAnd, bp::BIT_AND.1)?;
                }
                TokenKind::ShiftLeft | TokenKind::ShiftRight => {
                    if bp::SHIFT.0 < min_bp {
                        break;
                    }
                    let op = if self.next()?.kind == TokenKind::ShiftLeft {
                        BinaryOp::ShiftLeft
                    } else {
                        BinaryOp::ShiftRight
                    };
                    lhs = self.binary_rhs(lhs, op, bp::SHIFT.1)?;
                }
                TokenKind::Plus => {
                    if bp::ADD.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.binary_rhs(lhs, BinaryOp::Add, bp::ADD.1)?;
                }
                TokenKind::Minus => {
                    if bp::ADD.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.binary_rhs(lhs, BinaryOp::Sub, bp::ADD.1)?;
                }
                TokenKind::Star => {
                    if bp::MUL.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.binary_rhs(lhs, BinaryOp::Mul, bp::MUL.1)?;
                }
                TokenKind::Slash => {
                    if bp::MUL.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.binary_rhs(lhs, BinaryOp::Div, bp::MUL.1)?;
                }
                TokenKind::Percent => {
                    if bp::MUL.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.binary_rhs(lhs, BinaryOp::Mod, bp::MUL.1)?;
                }
                TokenKind::Keyword(Keyword::Div) => {
                    if bp::MUL.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.binary_rhs(lhs, BinaryOp::IntDiv, bp::MUL.1)?;
                }
                TokenKind::Keyword(Keyword::Mod) => {
                    if bp::MUL.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.binary_rhs(lhs, BinaryOp::Mod, bp::MUL.1)?;
                }
                TokenKind::Caret => {
                    if bp::BIT_XOR.0 < min_bp {
                        break;
                    }
                    self.next()?;
                    lhs = self.binary_rhs(lhs, BinaryOp::BitXor, bp::BIT_XOR.1)?;
                }
                TokenKind::Arrow | TokenKind::DoubleArrow => {
                    if bp::JSON.0 < min_bp {
                        break;
                    }
                    let op = if self.next()?.kind == TokenKind::Arrow {
                        BinaryOp::JsonExtract
                    } else {
                        BinaryOp::JsonUnquoteExtract
                    };
                    lhs = self.binary_rhs(lhs, op, bp::JSON.1)?;
                }

                _ => break,
            }
        }

        Ok(lhs)
    }

    fn binary_rhs(&mut self, lhs: Expr, op: BinaryOp, rbp: u8) -> Result<Expr> {
        let rhs = self.parse_expr_bp(rbp)?;
        let span = lhs.span().merge(rhs.span());
        Ok(Expr::Binary {
            op,
            left: Box::new(lhs),
            right: Box::new(rhs),
            span,
        })
    }

    fn comparison_rhs(&mut self, lhs: Expr, op: ComparisonOp) -> Result<Expr> {
        let rhs = self.parse_expr_bp(bp::COMPARISON.1)?;
        let span = lhs.span().merge(rhs.span());
        Ok(Expr::Comparison {
            op,
            left: Box::new(lhs),
            right: Box::new(rhs),
            escape: None,
            span,
        })
    }

    fn parse_between(&mut self, lhs: Expr, not: bool) -> Result<Expr> {
        let low = self.parse_expr_bp(bp::BETWEEN.1)?;
        self.expect_kw(Keyword::And)?;
        let high = self.parse_expr_bp(bp::BETWEEN.1)?;
        let span = lhs.span().merge(high.span());
        Ok(Expr::Between {
            expr: Box::new(lhs),
            low: Box::new(low),
            high: Box::new(high),
            not,
            span,
        })
    }

    fn parse_like(&mut self, lhs: Expr, op: ComparisonOp) -> Result<Expr> {
        let rhs = self.parse_expr_bp(bp::COMPARISON.1)?;
        let escape = if self.eat_kw(Keyword::Escape)? {
            Some(Box::new(self.parse_expr_bp(bp::COMPARISON.1)?))
        } else {
            None
        };
        let span = lhs.span().merge(rhs.span());
        Ok(Expr::Comparison {
            op,
            left: Box::new(lhs),
            right: Box::new(rhs),
            escape,
            span,
        })
    }

    /// `IN (list)` or `IN (subquery)`. The list keeps its tuple shape even
    /// for a single element.
    fn parse_in(&mut self, lhs: Expr, op: ComparisonOp) -> Result<Expr> {
        let open = self.expect(&TokenKind::LParen)?;
        let right = if self.peek_kw(Keyword::Select)? || self.peek_kw(Keyword::With)? {
            let query = self.parse_query_expr()?;
            let close = self.expect(&TokenKind::RParen)?;
            Expr::Subquery(Box::new(query), open.span.merge(close.span))
        } else {
            let mut items = vec![self.parse_expr()?];
            while self.eat(&TokenKind::Comma)? {
                items.push(self.parse_expr()?);
            }
            let close = self.expect(&TokenKind::RParen)?;
            Expr::Tuple(items, open.span.merge(close.span))
        };
        let span = lhs.span().merge(right.span());
        Ok(Expr::Comparison {
            op,
            left: Box::new(lhs),
            right: Box::new(right),
            escape: None,
            span,
        })
    }

    // -----------------------------------------------------------------------
    // Prefix
    // -----------------------------------------------------------------------

    #[allow(clippy::too_many_lines)]
    fn parse_prefix(&mut self) -> Result<Expr> {
        let tok = self.next()?;
        let span = tok.span;
        match tok.kind.clone() {
            TokenKind::Integral(text) => Ok(Expr::Literal(integral_value(&text), span)),
            TokenKind::DecimalNum(text) => Ok(Expr::Literal(
                Value::make_trusted(Type::Decimal, text.into_bytes()),
                span,
            )),
            TokenKind::FloatNum(text) => Ok(Expr::Literal(
                Value::make_trusted(Type::Float64, text.into_bytes()),
                span,
            )),
            TokenKind::Str { value, introducer } => {
                let lit = Expr::Literal(Value::new_varchar(value), span);
                match introducer {
                    Some(charset) => Ok(Expr::Introduced {
                        charset,
                        expr: Box::new(lit),
                        span,
                    }),
                    None => Ok(lit),
                }
            }
            TokenKind::HexNum(digits) => Ok(Expr::Literal(Value::new_hexnum(digits), span)),
            TokenKind::HexVal(digits) => Ok(Expr::Literal(Value::new_hexval(digits), span)),
            TokenKind::BitNum(digits) => Ok(Expr::Literal(Value::new_bitnum(digits), span)),
            TokenKind::Keyword(Keyword::Null) => Ok(Expr::Literal(Value::NULL, span)),
            TokenKind::Keyword(Keyword::True) => {
                Ok(Expr::Literal(Value::new_int64(1), span))
            }
            TokenKind::Keyword(Keyword::False) => {
                Ok(Expr::Literal(Value::new_int64(0), span))
            }

            TokenKind::Question => {
                let index = self.anon_params;
                self.anon_params += 1;
                Ok(Expr::Placeholder(Placeholder::Anonymous(index), span))
            }
            TokenKind::ColonParam(name) => {
                Ok(Expr::Placeholder(Placeholder::Named(name), span))
            }
            TokenKind::AtParam(name) => Ok(Expr::Variable {
                scope: VariableScope::User,
                name: Ident(name),
                span,
            }),
            TokenKind::AtAtParam(name) => self.parse_system_variable(name, span),

            TokenKind::Minus => self.parse_unary(UnaryOp::Neg, span),
            TokenKind::Plus => self.parse_unary(UnaryOp::Plus, span),
            TokenKind::Tilde => self.parse_unary(UnaryOp::BitNot, span),
            TokenKind::Bang => self.parse_unary(UnaryOp::Bang, span),

            TokenKind::Keyword(Keyword::Not) => {
                let inner = self.parse_expr_bp(bp::NOT_PREFIX)?;
                let span = span.merge(inner.span());
                Ok(Expr::Not {
                    expr: Box::new(inner),
                    span,
                })
            }

            TokenKind::Keyword(Keyword::Exists) => {
                self.expect(&TokenKind::LParen)?;
                let query = self.parse_query_expr()?;
                let close = self.expect(&TokenKind::RParen)?;
                Ok(Expr::Exists {
                    query: Box::new(query),
                    span: span.merge(close.span),
                })
            }

            TokenKind::Keyword(Keyword::Case) => self.parse_case(span),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast(span),
            TokenKind::Keyword(Keyword::Convert) => self.parse_convert(span),
            TokenKind::Keyword(Keyword::Interval) => self.parse_interval(span),
            TokenKind::Keyword(Keyword::Default) => Ok(Expr::Default(span)),

            TokenKind::Keyword(
                kw @ (Keyword::CurrentDate
                | Keyword::CurrentTime
                | Keyword::CurrentTimestamp
                | Keyword::CurrentUser),
            ) => {
                let func = match kw {
                    Keyword::CurrentDate => BuiltinFunc::CurrentDate,
                    Keyword::CurrentTime => BuiltinFunc::CurrentTime,
                    Keyword::CurrentTimestamp => BuiltinFunc::CurrentTimestamp,
                    _ => BuiltinFunc::CurrentUser,
                };
                let args = if self.peek_is(&TokenKind::LParen)? {
                    self.parse_paren_expr_list()?
                } else {
                    Vec::new()
                };
                Ok(Expr::Builtin { func, args, span })
            }
            TokenKind::Keyword(Keyword::Database) => {
                let args = self.parse_paren_expr_list()?;
                Ok(Expr::Builtin {
                    func: BuiltinFunc::Database,
                    args,
                    span,
                })
            }

            TokenKind::LParen => {
                if self.peek_kw(Keyword::Select)? || self.peek_kw(Keyword::With)? {
                    let query = self.parse_query_expr()?;
                    let close = self.expect(&TokenKind::RParen)?;
                    return Ok(Expr::Subquery(Box::new(query), span.merge(close.span)));
                }
                let first = self.parse_expr()?;
                if self.eat(&TokenKind::Comma)? {
                    let mut items = vec![first];
                    loop {
                        items.push(self.parse_expr()?);
                        if !self.eat(&TokenKind::Comma)? {
                            break;
                        }
                    }
                    let close = self.expect(&TokenKind::RParen)?;
                    Ok(Expr::Tuple(items, span.merge(close.span)))
                } else {
                    self.expect(&TokenKind::RParen)?;
                    Ok(first)
                }
            }

            TokenKind::Ident(name) => self.parse_ident_expr(Ident(name), &tok),
            TokenKind::QuotedIdent(name) => self.parse_column_tail(Ident(name), span),
            TokenKind::Keyword(kw)
                if RESERVED_FUNCTION_NAMES.contains(&kw) && self.peek_is(&TokenKind::LParen)? =>
            {
                self.parse_function_call(Ident(kw.as_str().to_owned()), &tok)
            }
            TokenKind::Keyword(kw) if !kw.is_reserved() => {
                self.parse_ident_expr(Ident(kw.as_str().to_owned()), &tok)
            }

            _ => Err(Error::syntax(
                token_pos(&tok),
                format!("unexpected '{}' in expression", tok.describe()),
                vec![
                    "identifier".to_owned(),
                    "literal".to_owned(),
                    "*".to_owned(),
                    "(".to_owned(),
                    "CASE".to_owned(),
                    "EXISTS".to_owned(),
                    "NOT".to_owned(),
                ],
            )),
        }
    }

    fn parse_unary(&mut self, op: UnaryOp, start: Span) -> Result<Expr> {
        let inner = self.parse_expr_bp(bp::UNARY)?;
        let span = start.merge(inner.span());
        Ok(Expr::Unary {
            op,
            expr: Box::new(inner),
            span,
        })
    }

    fn parse_system_variable(&mut self, name: String, span: Span) -> Result<Expr> {
        let scope = match name.to_ascii_uppercase().as_str() {
            "GLOBAL" if self.peek_is(&TokenKind::Dot)? => Some(VariableScope::Global),
            "SESSION" | "LOCAL" if self.peek_is(&TokenKind::Dot)? => Some(VariableScope::Session),
            _ => None,
        };
        match scope {
            Some(scope) => {
                self.expect(&TokenKind::Dot)?;
                let var = self.parse_ident()?;
                Ok(Expr::Variable {
                    scope,
                    name: var,
                    span,
                })
            }
            None => Ok(Expr::Variable {
                scope: VariableScope::SystemDefault,
                name: Ident(name),
                span,
            }),
        }
    }

    /// An identifier in expression position: a function call when followed
    /// by `(`, otherwise a (possibly qualified) column reference.
    fn parse_ident_expr(&mut self, name: Ident, tok: &Token) -> Result<Expr> {
        if self.peek_is(&TokenKind::LParen)? {
            return self.parse_function_call(name, tok);
        }
        self.parse_column_tail(name, tok.span)
    }

    fn parse_column_tail(&mut self, first: Ident, start: Span) -> Result<Expr> {
        if !self.peek_is(&TokenKind::Dot)? {
            return Ok(Expr::Column(
                ColumnRef {
                    qualifier: None,
                    name: first,
                },
                start,
            ));
        }
        self.next()?;
        let second = self.parse_ident()?;
        if self.peek_is(&TokenKind::Dot)? {
            self.next()?;
            let third = self.parse_ident()?;
            return Ok(Expr::Column(
                ColumnRef {
                    qualifier: Some(TableName {
                        qualifier: Some(first),
                        name: second,
                    }),
                    name: third,
                },
                start,
            ));
        }
        Ok(Expr::Column(
            ColumnRef {
                qualifier: Some(TableName {
                    qualifier: None,
                    name: first,
                }),
                name: second,
            },
            start,
        ))
    }

    fn parse_function_call(&mut self, name: Ident, tok: &Token) -> Result<Expr> {
        let upper = name.as_str().to_ascii_uppercase();

        // The dialect removed MySQL's HASH builtin; HASHFUNC replaced it.
        if upper == "HASH" {
            return Err(Error::unknown_function(token_pos(tok), name.as_str()));
        }

        if let Some(func) = BuiltinFunc::from_name(&upper) {
            let args = self.parse_paren_expr_list()?;
            return Ok(Expr::Builtin {
                func,
                args,
                span: tok.span,
            });
        }

        self.expect(&TokenKind::LParen)?;
        let mut distinct = false;
        let args = if self.eat(&TokenKind::Star)? {
            FunctionArgs::Star
        } else {
            distinct = self.eat_kw(Keyword::Distinct)?;
            let mut list = Vec::new();
            if !self.peek_is(&TokenKind::RParen)? {
                list.push(self.parse_expr()?);
                while self.eat(&TokenKind::Comma)? {
                    list.push(self.parse_expr()?);
                }
            }
            FunctionArgs::List(list)
        };
        let close = self.expect(&TokenKind::RParen)?;

        let over = if self.eat_kw(Keyword::Over)? {
            if self.eat(&TokenKind::LParen)? {
                let spec = self.parse_window_spec()?;
                self.expect(&TokenKind::RParen)?;
                Some(Over::Spec(spec))
            } else {
                Some(Over::Named(self.parse_ident()?))
            }
        } else {
            None
        };

        Ok(Expr::Function {
            name,
            args,
            distinct,
            over,
            span: tok.span.merge(close.span),
        })
    }

    fn parse_paren_expr_list(&mut self) -> Result<Vec<Expr>> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.peek_is(&TokenKind::RParen)? {
            args.push(self.parse_expr()?);
            while self.eat(&TokenKind::Comma)? {
                args.push(self.parse_expr()?);
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_case(&mut self, start: Span) -> Result<Expr> {
        let operand = if self.peek_kw(Keyword::When)? {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let mut whens = Vec::new();
        self.expect_kw(Keyword::When)?;
        loop {
            let when = self.parse_expr()?;
            self.expect_kw(Keyword::Then)?;
            let then = self.parse_expr()?;
            whens.push((when, then));
            if !self.eat_kw(Keyword::When)? {
                break;
            }
        }
        let else_expr = if self.eat_kw(Keyword::Else)? {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        let end = self.expect_kw(Keyword::End)?;
        Ok(Expr::Case {
            operand,
            whens,
            else_expr,
            span: start.merge(end.span),
        })
    }

    fn parse_cast(&mut self, start: Span) -> Result<Expr> {
        self.expect(&TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        self.expect_kw(Keyword::As)?;
        let to = self.parse_convert_type()?;
        let end = self.expect(&TokenKind::RParen)?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            to,
            span: start.merge(end.span),
        })
    }

    fn parse_convert(&mut self, start: Span) -> Result<Expr> {
        self.expect(&TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        let target = if self.eat_kw(Keyword::Using)? {
            let charset = self.parse_ident()?;
            ConvertTarget::Using(charset.0)
        } else {
            self.expect(&TokenKind::Comma)?;
            ConvertTarget::Type(self.parse_convert_type()?)
        };
        let end = self.expect(&TokenKind::RParen)?;
        Ok(Expr::Convert {
            expr: Box::new(expr),
            target,
            span: start.merge(end.span),
        })
    }

    fn parse_convert_type(&mut self) -> Result<ConvertType> {
        let mut name = match self.peek()? {
            TokenKind::Ident(s) => {
                self.next()?;
                s.to_ascii_uppercase()
            }
            TokenKind::Keyword(
                k @ (Keyword::Char
                | Keyword::Character
                | Keyword::Binary
                | Keyword::Signed
                | Keyword::Unsigned),
            ) => {
                self.next()?;
                k.as_str().to_owned()
            }
            _ => return Err(self.err_expected_strs(&["type name"])),
        };
        if name == "CHARACTER" {
            name = "CHAR".to_owned();
        }
        // `SIGNED INTEGER` / `UNSIGNED INTEGER` collapse to the bare form.
        if name == "SIGNED" || name == "UNSIGNED" {
            if let TokenKind::Ident(next) = self.peek()? {
                if next.eq_ignore_ascii_case("integer") {
                    self.next()?;
                }
            }
        }

        let mut to = ConvertType {
            name,
            ..ConvertType::default()
        };
        if self.eat(&TokenKind::LParen)? {
            to.length = Some(self.parse_convert_len()?);
            if self.eat(&TokenKind::Comma)? {
                to.scale = Some(self.parse_convert_len()?);
            }
            self.expect(&TokenKind::RParen)?;
        }
        if self.peek_kw(Keyword::Character)? && self.peek_kw_nth(1, Keyword::Set)? {
            self.next()?;
            self.next()?;
            to.charset = Some(self.parse_ident()?.0);
        }
        Ok(to)
    }

    fn parse_convert_len(&mut self) -> Result<u64> {
        match self.peek()? {
            TokenKind::Integral(text) => {
                let tok = self.next()?;
                text.parse().map_err(|_| {
                    Error::syntax(
                        token_pos(&tok),
                        format!("'{text}' is not a valid length"),
                        vec!["integer".to_owned()],
                    )
                })
            }
            _ => Err(self.err_expected_strs(&["integer"])),
        }
    }

    /// `INTERVAL expr unit` or the `INTERVAL(n, n1, n2, ...)` function.
    fn parse_interval(&mut self, start: Span) -> Result<Expr> {
        if self.peek_is(&TokenKind::LParen)? {
            self.next()?;
            let needle = self.parse_expr()?;
            let mut haystack = Vec::new();
            while self.eat(&TokenKind::Comma)? {
                haystack.push(self.parse_expr()?);
            }
            let end = self.expect(&TokenKind::RParen)?;
            return Ok(Expr::IntervalFunc {
                needle: Box::new(needle),
                haystack,
                span: start.merge(end.span),
            });
        }

        let expr = self.parse_expr()?;
        let unit_tok = self.next()?;
        let unit_text = match &unit_tok.kind {
            TokenKind::Ident(s) => s.clone(),
            TokenKind::Keyword(k) => k.as_str().to_owned(),
            _ => {
                return Err(Error::syntax(
                    token_pos(&unit_tok),
                    format!("'{}' is not an interval unit", unit_tok.describe()),
                    vec!["interval unit".to_owned()],
                ))
            }
        };
        let unit = IntervalUnit::from_keyword(&unit_text).ok_or_else(|| {
            Error::syntax(
                token_pos(&unit_tok),
                format!("'{unit_text}' is not an interval unit"),
                vec!["interval unit".to_owned()],
            )
        })?;
        let span = start.merge(unit_tok.span);
        Ok(Expr::Interval {
            expr: Box::new(expr),
            unit,
            span,
        })
    }

    /// The parenthesized body of a window specification.
    pub(crate) fn parse_window_spec(&mut self) -> Result<WindowSpec> {
        let mut spec = WindowSpec::default();

        // Optional base window name.
        if matches!(self.peek()?, TokenKind::Ident(_) | TokenKind::QuotedIdent(_)) {
            spec.base = Some(self.parse_ident()?);
        }

        if self.eat_kw(Keyword::Partition)? {
            self.expect_kw(Keyword::By)?;
            spec.partition_by.push(self.parse_expr()?);
            while self.eat(&TokenKind::Comma)? {
                spec.partition_by.push(self.parse_expr()?);
            }
        }
        if self.eat_kw(Keyword::Order)? {
            self.expect_kw(Keyword::By)?;
            spec.order_by.push(self.parse_order_expr()?);
            while self.eat(&TokenKind::Comma)? {
                spec.order_by.push(self.parse_order_expr()?);
            }
        }

        let units = match self.peek()? {
            TokenKind::Keyword(Keyword::Rows) => Some(FrameUnits::Rows),
            TokenKind::Keyword(Keyword::Range) => Some(FrameUnits::Range),
            TokenKind::Keyword(Keyword::Groups) => Some(FrameUnits::Groups),
            _ => None,
        };
        if let Some(units) = units {
            self.next()?;
            let (start, end) = if self.eat_kw(Keyword::Between)? {
                let start = self.parse_frame_bound()?;
                self.expect_kw(Keyword::And)?;
                let end = self.parse_frame_bound()?;
                (start, Some(end))
            } else {
                (self.parse_frame_bound()?, None)
            };
            let exclusion = if self.eat_kw(Keyword::Exclude)? {
                if self.eat_kw(Keyword::Ties)? {
                    Some(FrameExclusion::Ties)
                } else if self.eat_kw(Keyword::Group)? {
                    Some(FrameExclusion::Group)
                } else if self.eat_kw(Keyword::No)? {
                    self.expect_kw(Keyword::Others)?;
                    Some(FrameExclusion::NoOthers)
                } else {
                    self.expect_kw(Keyword::Current)?;
                    self.expect_kw(Keyword::Row)?;
                    Some(FrameExclusion::CurrentRow)
                }
            } else {
                None
            };
            spec.frame = Some(FrameSpec {
                units,
                start,
                end,
                exclusion,
            });
        }

        Ok(spec)
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound> {
        if self.eat_kw(Keyword::Unbounded)? {
            if self.eat_kw(Keyword::Preceding)? {
                return Ok(FrameBound::UnboundedPreceding);
            }
            self.expect_kw(Keyword::Following)?;
            return Ok(FrameBound::UnboundedFollowing);
        }
        if self.peek_kw(Keyword::Current)? {
            self.next()?;
            self.expect_kw(Keyword::Row)?;
            return Ok(FrameBound::CurrentRow);
        }
        let expr = self.parse_expr()?;
        if self.eat_kw(Keyword::Preceding)? {
            return Ok(FrameBound::Preceding(Box::new(expr)));
        }
        self.expect_kw(Keyword::Following)?;
        Ok(FrameBound::Following(Box::new(expr)))
    }
}

/// Classify an integral literal's payload the way MySQL does: i64 if it
/// fits, else u64, else DECIMAL.
fn integral_value(text: &str) -> Value {
    if text.parse::<i64>().is_ok() {
        Value::make_trusted(Type::Int64, text.as_bytes().to_vec())
    } else if text.parse::<u64>().is_ok() {
        Value::make_trusted(Type::Uint64, text.as_bytes().to_vec())
    } else {
        Value::make_trusted(Type::Decimal, text.as_bytes().to_vec())
    }
}

//! Canonical SQL rendering via `fmt::Display` for AST nodes.
//!
//! Every node renders to valid SQL with uppercase keywords, backtick-quoted
//! identifiers, and minimum-escaped literals. Re-parsing the rendered text
//! yields a structurally equal tree; compound operands are parenthesized so
//! the printed precedence matches the tree shape.

#[allow(clippy::wildcard_imports)]
use crate::*;
use std::fmt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn ident_list(f: &mut fmt::Formatter<'_>, items: &[Ident]) -> fmt::Result {
    comma_list(f, items)
}

/// Wrap compound operands in parentheses so the rendered text re-parses to
/// the same tree regardless of operator precedence.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    if matches!(
        expr,
        Expr::Binary { .. }
            | Expr::Comparison { .. }
            | Expr::And { .. }
            | Expr::Or { .. }
            | Expr::Xor { .. }
            | Expr::Not { .. }
            | Expr::Between { .. }
            | Expr::Is { .. }
            | Expr::Unary { .. }
            | Expr::Collate { .. }
            | Expr::Interval { .. }
    ) {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.0.replace('`', "``"))
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref q) = self.qualifier {
            write!(f, "{q}.")?;
        }
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref q) = self.qualifier {
            write!(f, "{q}.")?;
        }
        write!(f, "{}", self.name)
    }
}

fn quote_str(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
}

// ---------------------------------------------------------------------------
// Statement
// ---------------------------------------------------------------------------

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Union(u) => write!(f, "{u}"),
            Self::Insert(s) => write!(f, "{s}"),
            Self::Update(s) => write!(f, "{s}"),
            Self::Delete(s) => write!(f, "{s}"),
            Self::CreateTable(s) => write!(f, "{s}"),
            Self::CreateView(s) => write!(f, "{s}"),
            Self::CreateIndex(s) => write!(f, "{s}"),
            Self::AlterTable(s) => write!(f, "{s}"),
            Self::DropTable(s) => {
                f.write_str("DROP TABLE ")?;
                if s.if_exists {
                    f.write_str("IF EXISTS ")?;
                }
                comma_list(f, &s.names)
            }
            Self::DropView(s) => {
                f.write_str("DROP VIEW ")?;
                if s.if_exists {
                    f.write_str("IF EXISTS ")?;
                }
                comma_list(f, &s.names)
            }
            Self::DropIndex(s) => write!(f, "DROP INDEX {} ON {}", s.name, s.table),
            Self::Truncate(t) => write!(f, "TRUNCATE TABLE {t}"),
            Self::Set(s) => write!(f, "{s}"),
            Self::Show(s) => write!(f, "{s}"),
            Self::Use(db) => write!(f, "USE {db}"),
            Self::Begin => f.write_str("BEGIN"),
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback(r) => {
                f.write_str("ROLLBACK")?;
                if let Some(ref sp) = r.to_savepoint {
                    write!(f, " TO SAVEPOINT {sp}")?;
                }
                Ok(())
            }
            Self::Savepoint(name) => write!(f, "SAVEPOINT {name}"),
            Self::Release(name) => write!(f, "RELEASE SAVEPOINT {name}"),
            Self::Prepare(s) => write!(f, "{s}"),
            Self::Execute(s) => write!(f, "{s}"),
            Self::Deallocate(name) => write!(f, "DEALLOCATE PREPARE {name}"),
            Self::Explain(s) => write!(f, "{s}"),
            Self::Call(s) => write!(f, "{s}"),
            Self::Load(s) => write!(f, "{s}"),
            Self::Lock(s) => write!(f, "{s}"),
            Self::Unlock => f.write_str("UNLOCK TABLES"),
            Self::Flush(s) => write!(f, "{s}"),
            Self::Analyze(s) => maintenance(f, "ANALYZE", s),
            Self::Optimize(s) => maintenance(f, "OPTIMIZE", s),
            Self::Repair(s) => maintenance(f, "REPAIR", s),
            Self::CommentOnly(text) => write!(f, "/* {text} */"),
        }
    }
}

fn maintenance(f: &mut fmt::Formatter<'_>, verb: &str, s: &MaintenanceStatement) -> fmt::Result {
    f.write_str(verb)?;
    if s.local {
        f.write_str(" LOCAL")?;
    }
    f.write_str(" TABLE ")?;
    comma_list(f, &s.tables)
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Union(u) => write!(f, "{u}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SELECT and friends
// ---------------------------------------------------------------------------

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref with) = self.with {
            write!(f, "{with} ")?;
        }
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        comma_list(f, &self.exprs)?;
        if !self.from.is_empty() {
            f.write_str(" FROM ")?;
            comma_list(f, &self.from)?;
        }
        if let Some(ref w) = self.where_clause {
            write!(f, " WHERE {w}")?;
        }
        if let Some(ref g) = self.group_by {
            write!(f, " {g}")?;
        }
        if let Some(ref h) = self.having {
            write!(f, " HAVING {h}")?;
        }
        if !self.windows.is_empty() {
            f.write_str(" WINDOW ")?;
            comma_list(f, &self.windows)?;
        }
        write_order_limit(f, &self.order_by, self.limit.as_ref())?;
        if let Some(lock) = self.lock {
            write!(f, " {lock}")?;
        }
        Ok(())
    }
}

fn write_order_limit(
    f: &mut fmt::Formatter<'_>,
    order_by: &[OrderExpr],
    limit: Option<&Limit>,
) -> fmt::Result {
    if !order_by.is_empty() {
        f.write_str(" ORDER BY ")?;
        comma_list(f, order_by)?;
    }
    if let Some(l) = limit {
        write!(f, " {l}")?;
    }
    Ok(())
}

impl fmt::Display for SelectExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Star(None) => f.write_str("*"),
            Self::Star(Some(t)) => write!(f, "{t}.*"),
            Self::Aliased { expr, alias } => {
                write!(f, "{expr}")?;
                if let Some(a) = alias {
                    write!(f, " AS {a}")?;
                }
                Ok(())
            }
            Self::Next(count) => write!(f, "NEXT {count} VALUES"),
        }
    }
}

impl fmt::Display for WithClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        if self.recursive {
            f.write_str("RECURSIVE ")?;
        }
        comma_list(f, &self.ctes)
    }
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            ident_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        write!(f, " AS ({})", self.query)
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GROUP BY ")?;
        comma_list(f, &self.exprs)?;
        if self.with_rollup {
            f.write_str(" WITH ROLLUP")?;
        }
        Ok(())
    }
}

impl fmt::Display for OrderExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.direction {
            Some(OrderDirection::Asc) => f.write_str(" ASC"),
            Some(OrderDirection::Desc) => f.write_str(" DESC"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LIMIT ")?;
        if let Some(ref off) = self.offset {
            write!(f, "{off}, ")?;
        }
        write!(f, "{}", self.count)
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForUpdate => f.write_str("FOR UPDATE"),
            Self::ShareMode => f.write_str("LOCK IN SHARE MODE"),
        }
    }
}

impl fmt::Display for UnionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Operands with their own trailing clauses need parentheses, or the
        // clauses would rebind to the whole set operation on re-parse. A
        // union on the right needs them to keep the chain left-deep.
        write_union_operand(f, &self.left, false)?;
        write!(f, " {} ", self.op)?;
        write_union_operand(f, &self.right, true)?;
        write_order_limit(f, &self.order_by, self.limit.as_ref())
    }
}

fn write_union_operand(
    f: &mut fmt::Formatter<'_>,
    q: &QueryExpr,
    is_right: bool,
) -> fmt::Result {
    let needs_paren = match q {
        QueryExpr::Select(s) => {
            !s.order_by.is_empty() || s.limit.is_some() || s.lock.is_some()
        }
        QueryExpr::Union(u) => is_right || !u.order_by.is_empty() || u.limit.is_some(),
    };
    if needs_paren {
        write!(f, "({q})")
    } else {
        write!(f, "{q}")
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Except => "EXCEPT",
            Self::ExceptAll => "EXCEPT ALL",
            Self::Intersect => "INTERSECT",
            Self::IntersectAll => "INTERSECT ALL",
        })
    }
}

// ---------------------------------------------------------------------------
// Table expressions
// ---------------------------------------------------------------------------

impl fmt::Display for TableExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aliased(a) => write!(f, "{a}"),
            Self::Paren(inner) => write!(f, "({inner})"),
            Self::Join(j) => write!(f, "{j}"),
        }
    }
}

impl fmt::Display for AliasedTableExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            TableSource::Table(t) => write!(f, "{t}")?,
            TableSource::Subquery(q) => write!(f, "({q})")?,
        }
        if let Some(ref a) = self.alias {
            write!(f, " AS {a}")?;
        }
        for hint in &self.hints {
            write!(f, " {hint}")?;
        }
        Ok(())
    }
}

impl fmt::Display for JoinExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.kind, self.right)?;
        match &self.condition {
            JoinCondition::None => Ok(()),
            JoinCondition::On(e) => write!(f, " ON {e}"),
            JoinCondition::Using(cols) => {
                f.write_str(" USING (")?;
                ident_list(f, cols)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inner => "JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Straight => "STRAIGHT_JOIN",
            Self::LeftOuter => "LEFT JOIN",
            Self::RightOuter => "RIGHT JOIN",
            Self::FullOuter => "FULL JOIN",
            Self::Natural(NaturalJoinKind::Inner) => "NATURAL JOIN",
            Self::Natural(NaturalJoinKind::Left) => "NATURAL LEFT JOIN",
            Self::Natural(NaturalJoinKind::Right) => "NATURAL RIGHT JOIN",
            Self::Natural(NaturalJoinKind::Full) => "NATURAL FULL JOIN",
            Self::Hash => "HASH JOIN",
            Self::Parallel(ParallelJoinKind::Inner) => "PARALLEL INNER JOIN",
            Self::Parallel(ParallelJoinKind::Left) => "PARALLEL LEFT JOIN",
            Self::Parallel(ParallelJoinKind::Right) => "PARALLEL RIGHT JOIN",
        })
    }
}

impl fmt::Display for IndexHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.kind {
            IndexHintKind::Use => "USE INDEX",
            IndexHintKind::Force => "FORCE INDEX",
            IndexHintKind::Ignore => "IGNORE INDEX",
        })?;
        match self.for_clause {
            Some(IndexHintFor::Join) => f.write_str(" FOR JOIN")?,
            Some(IndexHintFor::OrderBy) => f.write_str(" FOR ORDER BY")?,
            Some(IndexHintFor::GroupBy) => f.write_str(" FOR GROUP BY")?,
            None => {}
        }
        f.write_str(" (")?;
        ident_list(f, &self.indexes)?;
        f.write_str(")")
    }
}

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

impl fmt::Display for WindowDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS ({})", self.name, self.spec)
    }
}

impl fmt::Display for Over {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "OVER {name}"),
            Self::Spec(spec) => write!(f, "OVER ({spec})"),
        }
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(ref base) = self.base {
            write!(f, "{base}")?;
            sep = " ";
        }
        if !self.partition_by.is_empty() {
            write!(f, "{sep}PARTITION BY ")?;
            comma_list(f, &self.partition_by)?;
            sep = " ";
        }
        if !self.order_by.is_empty() {
            write!(f, "{sep}ORDER BY ")?;
            comma_list(f, &self.order_by)?;
            sep = " ";
        }
        if let Some(ref frame) = self.frame {
            write!(f, "{sep}{frame}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FrameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.units {
            FrameUnits::Rows => "ROWS",
            FrameUnits::Range => "RANGE",
            FrameUnits::Groups => "GROUPS",
        })?;
        match &self.end {
            Some(end) => write!(f, " BETWEEN {} AND {end}", self.start)?,
            None => write!(f, " {}", self.start)?,
        }
        match self.exclusion {
            Some(FrameExclusion::CurrentRow) => f.write_str(" EXCLUDE CURRENT ROW")?,
            Some(FrameExclusion::Group) => f.write_str(" EXCLUDE GROUP")?,
            Some(FrameExclusion::Ties) => f.write_str(" EXCLUDE TIES")?,
            Some(FrameExclusion::NoOthers) => f.write_str(" EXCLUDE NO OTHERS")?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::Preceding(e) => write!(f, "{e} PRECEDING"),
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Following(e) => write!(f, "{e} FOLLOWING"),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous(_) => f.write_str("?"),
            Self::Named(name) => write!(f, ":{name}"),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::BitNot => "~",
            Self::Bang => "!",
        })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "%",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::JsonExtract => "->",
            Self::JsonUnquoteExtract => "->>",
        })
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::NullSafeEq => "<=>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Regexp => "REGEXP",
            Self::NotRegexp => "NOT REGEXP",
        })
    }
}

impl fmt::Display for IsCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "IS NULL",
            Self::NotNull => "IS NOT NULL",
            Self::True => "IS TRUE",
            Self::NotTrue => "IS NOT TRUE",
            Self::False => "IS FALSE",
            Self::NotFalse => "IS NOT FALSE",
        })
    }
}

impl fmt::Display for ConvertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match (self.length, self.scale) {
            (Some(l), Some(s)) => write!(f, "({l}, {s})")?,
            (Some(l), None) => write!(f, "({l})")?,
            _ => {}
        }
        if let Some(ref cs) = self.charset {
            write!(f, " CHARACTER SET {cs}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v, _) => write!(f, "{v}"),
            Self::Introduced { charset, expr, .. } => write!(f, "_{charset}{expr}"),
            Self::Column(c, _) => write!(f, "{c}"),
            Self::Placeholder(p, _) => write!(f, "{p}"),
            Self::Variable { scope, name, .. } => match scope {
                VariableScope::User => write!(f, "@{}", name.as_str()),
                VariableScope::SystemDefault => write!(f, "@@{}", name.as_str()),
                VariableScope::Session => write!(f, "@@SESSION.{}", name.as_str()),
                VariableScope::Global => write!(f, "@@GLOBAL.{}", name.as_str()),
            },
            Self::Unary { op, expr, .. } => {
                write!(f, "{op}")?;
                write_operand(f, expr)
            }
            Self::Binary {
                op, left, right, ..
            } => {
                write_operand(f, left)?;
                write!(f, " {op} ")?;
                write_operand(f, right)
            }
            Self::Comparison {
                op,
                left,
                right,
                escape,
                ..
            } => {
                write_operand(f, left)?;
                write!(f, " {op} ")?;
                write_operand(f, right)?;
                if let Some(esc) = escape {
                    write!(f, " ESCAPE ")?;
                    write_operand(f, esc)?;
                }
                Ok(())
            }
            Self::And { left, right, .. } => {
                write_operand(f, left)?;
                f.write_str(" AND ")?;
                write_operand(f, right)
            }
            Self::Or { left, right, .. } => {
                write_operand(f, left)?;
                f.write_str(" OR ")?;
                write_operand(f, right)
            }
            Self::Xor { left, right, .. } => {
                write_operand(f, left)?;
                f.write_str(" XOR ")?;
                write_operand(f, right)
            }
            Self::Not { expr, .. } => {
                f.write_str("NOT ")?;
                write_operand(f, expr)
            }
            Self::Is { expr, check, .. } => {
                write_operand(f, expr)?;
                write!(f, " {check}")
            }
            Self::Between {
                expr,
                low,
                high,
                not,
                ..
            } => {
                write_operand(f, expr)?;
                if *not {
                    f.write_str(" NOT")?;
                }
                f.write_str(" BETWEEN ")?;
                write_operand(f, low)?;
                f.write_str(" AND ")?;
                write_operand(f, high)
            }
            Self::Exists { query, .. } => write!(f, "EXISTS ({query})"),
            Self::Subquery(query, _) => write!(f, "({query})"),
            Self::Function {
                name,
                args,
                distinct,
                over,
                ..
            } => {
                write!(f, "{}(", name.as_str())?;
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                match args {
                    FunctionArgs::Star => f.write_str("*")?,
                    FunctionArgs::List(list) => comma_list(f, list)?,
                }
                f.write_str(")")?;
                if let Some(over) = over {
                    write!(f, " {over}")?;
                }
                Ok(())
            }
            Self::Builtin { func, args, .. } => {
                write!(f, "{}(", func.as_str())?;
                comma_list(f, args)?;
                f.write_str(")")
            }
            Self::Case {
                operand,
                whens,
                else_expr,
                ..
            } => {
                f.write_str("CASE")?;
                if let Some(op) = operand {
                    write!(f, " {op}")?;
                }
                for (when, then) in whens {
                    write!(f, " WHEN {when} THEN {then}")?;
                }
                if let Some(e) = else_expr {
                    write!(f, " ELSE {e}")?;
                }
                f.write_str(" END")
            }
            Self::Cast { expr, to, .. } => write!(f, "CAST({expr} AS {to})"),
            Self::Convert { expr, target, .. } => match target {
                ConvertTarget::Type(t) => write!(f, "CONVERT({expr}, {t})"),
                ConvertTarget::Using(cs) => write!(f, "CONVERT({expr} USING {cs})"),
            },
            Self::Collate {
                expr, collation, ..
            } => {
                write_operand(f, expr)?;
                write!(f, " COLLATE {}", collation.as_str())
            }
            Self::Interval { expr, unit, .. } => {
                f.write_str("INTERVAL ")?;
                write_operand(f, expr)?;
                write!(f, " {unit}")
            }
            Self::IntervalFunc {
                needle, haystack, ..
            } => {
                write!(f, "INTERVAL({needle}, ")?;
                comma_list(f, haystack)?;
                f.write_str(")")
            }
            Self::Tuple(items, _) => {
                f.write_str("(")?;
                comma_list(f, items)?;
                f.write_str(")")
            }
            Self::Default(_) => f.write_str("DEFAULT"),
        }
    }
}

// ---------------------------------------------------------------------------
// DML statements
// ---------------------------------------------------------------------------

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            InsertAction::Insert => f.write_str("INSERT ")?,
            InsertAction::Replace => f.write_str("REPLACE ")?,
        }
        if self.ignore {
            f.write_str("IGNORE ")?;
        }
        write!(f, "INTO {}", self.table)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            ident_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                f.write_str(" VALUES ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str("(")?;
                    comma_list(f, row)?;
                    f.write_str(")")?;
                }
            }
            InsertSource::Select(q) => write!(f, " {q}")?,
            InsertSource::Set(assignments) => {
                f.write_str(" SET ")?;
                comma_list(f, assignments)?;
            }
        }
        if !self.on_duplicate.is_empty() {
            f.write_str(" ON DUPLICATE KEY UPDATE ")?;
            comma_list(f, &self.on_duplicate)?;
        }
        Ok(())
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref with) = self.with {
            write!(f, "{with} ")?;
        }
        f.write_str("UPDATE ")?;
        comma_list(f, &self.table_exprs)?;
        f.write_str(" SET ")?;
        comma_list(f, &self.assignments)?;
        if let Some(ref w) = self.where_clause {
            write!(f, " WHERE {w}")?;
        }
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            comma_list(f, &self.order_by)?;
        }
        if let Some(ref l) = self.limit {
            write!(f, " LIMIT {l}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref with) = self.with {
            write!(f, "{with} ")?;
        }
        f.write_str("DELETE ")?;
        if !self.targets.is_empty() {
            comma_list(f, &self.targets)?;
            f.write_str(" ")?;
        }
        f.write_str("FROM ")?;
        comma_list(f, &self.table_exprs)?;
        if let Some(ref w) = self.where_clause {
            write!(f, " WHERE {w}")?;
        }
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            comma_list(f, &self.order_by)?;
        }
        if let Some(ref l) = self.limit {
            write!(f, " LIMIT {l}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DDL statements
// ---------------------------------------------------------------------------

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;
        match &self.body {
            CreateTableBody::Definition {
                columns,
                constraints,
                options,
            } => {
                f.write_str(" (")?;
                let mut first = true;
                for col in columns {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{col}")?;
                }
                for c in constraints {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{c}")?;
                }
                f.write_str(")")?;
                for opt in options {
                    write!(f, " {opt}")?;
                }
                Ok(())
            }
            CreateTableBody::Like(t) => write!(f, " LIKE {t}"),
            CreateTableBody::AsQuery(q) => write!(f, " AS {q}"),
        }
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.typ)?;
        for opt in &self.options {
            write!(f, " {opt}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.enum_values.is_empty() {
            f.write_str("(")?;
            for (i, v) in self.enum_values.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                quote_str(f, v)?;
            }
            f.write_str(")")?;
        } else {
            match (self.length, self.scale) {
                (Some(l), Some(s)) => write!(f, "({l}, {s})")?,
                (Some(l), None) => write!(f, "({l})")?,
                _ => {}
            }
        }
        if self.unsigned {
            f.write_str(" UNSIGNED")?;
        }
        if self.zerofill {
            f.write_str(" ZEROFILL")?;
        }
        if let Some(ref cs) = self.charset {
            write!(f, " CHARACTER SET {cs}")?;
        }
        if let Some(ref c) = self.collate {
            write!(f, " COLLATE {c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ColumnOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Null => f.write_str("NULL"),
            Self::Default(e) => write!(f, "DEFAULT {e}"),
            Self::OnUpdate(e) => write!(f, "ON UPDATE {e}"),
            Self::AutoIncrement => f.write_str("AUTO_INCREMENT"),
            Self::PrimaryKey => f.write_str("PRIMARY KEY"),
            Self::Unique => f.write_str("UNIQUE"),
            Self::Comment(c) => {
                f.write_str("COMMENT ")?;
                quote_str(f, c)
            }
            Self::Collate(c) => write!(f, "COLLATE {c}"),
        }
    }
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref name) = self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for TableConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey(cols) => {
                f.write_str("PRIMARY KEY (")?;
                comma_list(f, cols)?;
                f.write_str(")")
            }
            Self::Unique {
                index_name,
                columns,
            } => {
                f.write_str("UNIQUE KEY")?;
                if let Some(n) = index_name {
                    write!(f, " {n}")?;
                }
                f.write_str(" (")?;
                comma_list(f, columns)?;
                f.write_str(")")
            }
            Self::Index {
                index_name,
                columns,
            } => {
                f.write_str("KEY")?;
                if let Some(n) = index_name {
                    write!(f, " {n}")?;
                }
                f.write_str(" (")?;
                comma_list(f, columns)?;
                f.write_str(")")
            }
            Self::FullText {
                index_name,
                columns,
            } => {
                f.write_str("FULLTEXT KEY")?;
                if let Some(n) = index_name {
                    write!(f, " {n}")?;
                }
                f.write_str(" (")?;
                comma_list(f, columns)?;
                f.write_str(")")
            }
            Self::ForeignKey {
                index_name,
                columns,
                ref_table,
                ref_columns,
                on_delete,
                on_update,
            } => {
                f.write_str("FOREIGN KEY")?;
                if let Some(n) = index_name {
                    write!(f, " {n}")?;
                }
                f.write_str(" (")?;
                ident_list(f, columns)?;
                write!(f, ") REFERENCES {ref_table} (")?;
                ident_list(f, ref_columns)?;
                f.write_str(")")?;
                if let Some(a) = on_delete {
                    write!(f, " ON DELETE {a}")?;
                }
                if let Some(a) = on_update {
                    write!(f, " ON UPDATE {a}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ReferenceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
        })
    }
}

impl fmt::Display for IndexColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(l) = self.length {
            write!(f, "({l})")?;
        }
        match self.direction {
            Some(OrderDirection::Asc) => f.write_str(" ASC")?,
            Some(OrderDirection::Desc) => f.write_str(" DESC")?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for TableOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = ", self.name)?;
        match &self.value {
            TableOptionValue::Ident(s) => f.write_str(s),
            TableOptionValue::Str(s) => quote_str(f, s),
            TableOptionValue::Number(n) => f.write_str(n),
        }
    }
}

impl fmt::Display for CreateViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_replace {
            f.write_str("OR REPLACE ")?;
        }
        write!(f, "VIEW {}", self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            ident_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        write!(f, " AS {}", self.query)
    }
}

impl fmt::Display for CreateIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        match self.kind {
            IndexKind::Plain => {}
            IndexKind::Unique => f.write_str("UNIQUE ")?,
            IndexKind::FullText => f.write_str("FULLTEXT ")?,
            IndexKind::Spatial => f.write_str("SPATIAL ")?,
        }
        write!(f, "INDEX {} ON {} (", self.name, self.table)?;
        comma_list(f, &self.columns)?;
        f.write_str(")")
    }
}

impl fmt::Display for AlterTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} ", self.table)?;
        comma_list(f, &self.actions)
    }
}

impl fmt::Display for ColumnPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("FIRST"),
            Self::After(col) => write!(f, "AFTER {col}"),
        }
    }
}

impl fmt::Display for AlterTableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddColumn { def, position } => {
                write!(f, "ADD COLUMN {def}")?;
                if let Some(p) = position {
                    write!(f, " {p}")?;
                }
                Ok(())
            }
            Self::DropColumn(name) => write!(f, "DROP COLUMN {name}"),
            Self::ModifyColumn { def, position } => {
                write!(f, "MODIFY COLUMN {def}")?;
                if let Some(p) = position {
                    write!(f, " {p}")?;
                }
                Ok(())
            }
            Self::ChangeColumn { old, def, position } => {
                write!(f, "CHANGE COLUMN {old} {def}")?;
                if let Some(p) = position {
                    write!(f, " {p}")?;
                }
                Ok(())
            }
            Self::RenameColumn { old, new } => write!(f, "RENAME COLUMN {old} TO {new}"),
            Self::RenameTo(t) => write!(f, "RENAME TO {t}"),
            Self::AddConstraint(c) => write!(f, "ADD {c}"),
            Self::DropIndex(name) => write!(f, "DROP INDEX {name}"),
            Self::DropPrimaryKey => f.write_str("DROP PRIMARY KEY"),
            Self::DropForeignKey(name) => write!(f, "DROP FOREIGN KEY {name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Session / utility statements
// ---------------------------------------------------------------------------

impl fmt::Display for SetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SET ")?;
        comma_list(f, &self.exprs)
    }
}

impl fmt::Display for SetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Global => "GLOBAL",
            Self::Session => "SESSION",
            Self::Local => "LOCAL",
        })
    }
}

impl fmt::Display for SetExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign {
                scope,
                target,
                value,
            } => {
                if let Some(s) = scope {
                    write!(f, "{s} ")?;
                }
                match target {
                    SetTarget::SysVar(name) => f.write_str(name.as_str())?,
                    SetTarget::UserVar(name) => write!(f, "@{}", name.as_str())?,
                }
                f.write_str(" = ")?;
                match value {
                    SetValue::Expr(e) => write!(f, "{e}"),
                    SetValue::Default => f.write_str("DEFAULT"),
                }
            }
            Self::Names { charset, collate } => {
                f.write_str("NAMES ")?;
                match charset {
                    Some(cs) => quote_str(f, cs)?,
                    None => f.write_str("DEFAULT")?,
                }
                if let Some(c) = collate {
                    f.write_str(" COLLATE ")?;
                    quote_str(f, c)?;
                }
                Ok(())
            }
            Self::CharacterSet(charset) => {
                f.write_str("CHARACTER SET ")?;
                match charset {
                    Some(cs) => quote_str(f, cs),
                    None => f.write_str("DEFAULT"),
                }
            }
        }
    }
}

impl fmt::Display for ShowStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SHOW ")?;
        match &self.kind {
            ShowKind::Databases => f.write_str("DATABASES")?,
            ShowKind::Tables { full, db } => {
                if *full {
                    f.write_str("FULL ")?;
                }
                f.write_str("TABLES")?;
                if let Some(db) = db {
                    write!(f, " FROM {db}")?;
                }
            }
            ShowKind::TableStatus { db } => {
                f.write_str("TABLE STATUS")?;
                if let Some(db) = db {
                    write!(f, " FROM {db}")?;
                }
            }
            ShowKind::Columns { full, table } => {
                if *full {
                    f.write_str("FULL ")?;
                }
                write!(f, "COLUMNS FROM {table}")?;
            }
            ShowKind::CreateTable(t) => write!(f, "CREATE TABLE {t}")?,
            ShowKind::CreateView(t) => write!(f, "CREATE VIEW {t}")?,
            ShowKind::Index(t) => write!(f, "INDEX FROM {t}")?,
            ShowKind::Variables { scope } => {
                if let Some(s) = scope {
                    write!(f, "{s} ")?;
                }
                f.write_str("VARIABLES")?;
            }
            ShowKind::Status { scope } => {
                if let Some(s) = scope {
                    write!(f, "{s} ")?;
                }
                f.write_str("STATUS")?;
            }
            ShowKind::Engines => f.write_str("ENGINES")?,
            ShowKind::Collation => f.write_str("COLLATION")?,
            ShowKind::Charset => f.write_str("CHARACTER SET")?,
            ShowKind::Grants => f.write_str("GRANTS")?,
            ShowKind::ProcessList { full } => {
                if *full {
                    f.write_str("FULL ")?;
                }
                f.write_str("PROCESSLIST")?;
            }
            ShowKind::Warnings => f.write_str("WARNINGS")?,
            ShowKind::Errors => f.write_str("ERRORS")?,
        }
        match &self.filter {
            Some(ShowFilter::Like(pattern)) => {
                f.write_str(" LIKE ")?;
                quote_str(f, pattern)
            }
            Some(ShowFilter::Where(e)) => write!(f, " WHERE {e}"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for PrepareStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PREPARE {} FROM ", self.name)?;
        match &self.source {
            PrepareSource::Literal(sql) => quote_str(f, sql),
            PrepareSource::Var(v) => write!(f, "@{}", v.as_str()),
        }
    }
}

impl fmt::Display for ExecuteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EXECUTE {}", self.name)?;
        if !self.vars.is_empty() {
            f.write_str(" USING ")?;
            for (i, v) in self.vars.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "@{}", v.as_str())?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ExplainStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EXPLAIN ")?;
        if let Some(ref fmt_name) = self.format {
            write!(f, "FORMAT = {fmt_name} ")?;
        }
        match &self.target {
            ExplainTarget::Statement(s) => write!(f, "{s}"),
            ExplainTarget::Table(t) => write!(f, "{t}"),
        }
    }
}

impl fmt::Display for CallStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CALL {}(", self.name)?;
        comma_list(f, &self.args)?;
        f.write_str(")")
    }
}

impl fmt::Display for LoadStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LOAD DATA ")?;
        if self.local {
            f.write_str("LOCAL ")?;
        }
        f.write_str("INFILE ")?;
        quote_str(f, &self.path)?;
        match self.duplicate {
            Some(LoadDuplicate::Replace) => f.write_str(" REPLACE")?,
            Some(LoadDuplicate::Ignore) => f.write_str(" IGNORE")?,
            None => {}
        }
        write!(f, " INTO TABLE {}", self.table)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            ident_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for LockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LOCK TABLES ")?;
        comma_list(f, &self.tables)
    }
}

impl fmt::Display for TableLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)?;
        if let Some(ref a) = self.alias {
            write!(f, " AS {a}")?;
        }
        f.write_str(match self.lock {
            LockType::Read => " READ",
            LockType::ReadLocal => " READ LOCAL",
            LockType::Write => " WRITE",
            LockType::LowPriorityWrite => " LOW_PRIORITY WRITE",
        })
    }
}

impl fmt::Display for FlushStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FLUSH ")?;
        if self.local {
            f.write_str("LOCAL ")?;
        }
        match &self.kind {
            FlushKind::Tables(tables) => {
                f.write_str("TABLES")?;
                if !tables.is_empty() {
                    f.write_str(" ")?;
                    comma_list(f, tables)?;
                }
                Ok(())
            }
            FlushKind::Logs => f.write_str("LOGS"),
            FlushKind::Privileges => f.write_str("PRIVILEGES"),
            FlushKind::Status => f.write_str("STATUS"),
            FlushKind::Hosts => f.write_str("HOSTS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxsql_types::Value;

    fn lit_int(n: i64) -> Expr {
        Expr::Literal(Value::new_int64(n), Span::ZERO)
    }

    fn col(name: &str) -> Expr {
        Expr::Column(ColumnRef::bare(name), Span::ZERO)
    }

    #[test]
    fn ident_quoting() {
        assert_eq!(Ident::new("users").to_string(), "`users`");
        assert_eq!(Ident::new("we`ird").to_string(), "`we``ird`");
        assert_eq!(TableName::qualified("db", "t").to_string(), "`db`.`t`");
        assert_eq!(ColumnRef::qualified("t", "c").to_string(), "`t`.`c`");
    }

    #[test]
    fn select_display_minimal() {
        let sel = SelectStatement {
            exprs: vec![SelectExpr::Aliased {
                expr: lit_int(1),
                alias: None,
            }],
            ..Default::default()
        };
        assert_eq!(sel.to_string(), "SELECT 1");
    }

    #[test]
    fn binary_operands_get_parens() {
        // a + b * c as a left-leaning tree must print parens to survive
        // re-parsing with standard precedence.
        let e = Expr::Binary {
            op: BinaryOp::Mul,
            left: Box::new(Expr::Binary {
                op: BinaryOp::Add,
                left: Box::new(col("a")),
                right: Box::new(col("b")),
                span: Span::ZERO,
            }),
            right: Box::new(col("c")),
            span: Span::ZERO,
        };
        assert_eq!(e.to_string(), "(`a` + `b`) * `c`");
    }

    #[test]
    fn join_kind_spellings() {
        assert_eq!(JoinKind::Hash.to_string(), "HASH JOIN");
        assert_eq!(
            JoinKind::Parallel(ParallelJoinKind::Inner).to_string(),
            "PARALLEL INNER JOIN"
        );
        assert_eq!(
            JoinKind::Parallel(ParallelJoinKind::Left).to_string(),
            "PARALLEL LEFT JOIN"
        );
        assert_eq!(JoinKind::Straight.to_string(), "STRAIGHT_JOIN");
        assert_eq!(
            JoinKind::Natural(NaturalJoinKind::Right).to_string(),
            "NATURAL RIGHT JOIN"
        );
    }

    #[test]
    fn comparison_with_escape() {
        let e = Expr::Comparison {
            op: ComparisonOp::Like,
            left: Box::new(col("a")),
            right: Box::new(Expr::Literal(Value::new_varchar("x%"), Span::ZERO)),
            escape: Some(Box::new(Expr::Literal(Value::new_varchar("!"), Span::ZERO))),
            span: Span::ZERO,
        };
        assert_eq!(e.to_string(), "`a` LIKE 'x%' ESCAPE '!'");
    }

    #[test]
    fn case_display() {
        let e = Expr::Case {
            operand: Some(Box::new(col("x"))),
            whens: vec![(lit_int(1), lit_int(10))],
            else_expr: Some(Box::new(lit_int(0))),
            span: Span::ZERO,
        };
        assert_eq!(e.to_string(), "CASE `x` WHEN 1 THEN 10 ELSE 0 END");
    }

    #[test]
    fn frame_spec_display() {
        let spec = FrameSpec {
            units: FrameUnits::Rows,
            start: FrameBound::UnboundedPreceding,
            end: Some(FrameBound::CurrentRow),
            exclusion: None,
        };
        assert_eq!(
            spec.to_string(),
            "ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW"
        );
    }

    #[test]
    fn interval_display() {
        let e = Expr::Interval {
            expr: Box::new(lit_int(3)),
            unit: pxsql_types::IntervalUnit::DayHour,
            span: Span::ZERO,
        };
        assert_eq!(e.to_string(), "INTERVAL 3 DAY_HOUR");
    }

    #[test]
    fn builtin_display() {
        let e = Expr::Builtin {
            func: BuiltinFunc::Hashfunc,
            args: vec![col("a"), col("b")],
            span: Span::ZERO,
        };
        assert_eq!(e.to_string(), "HASHFUNC(`a`, `b`)");
    }

    #[test]
    fn introduced_string_display() {
        let e = Expr::Introduced {
            charset: "utf8mb4".to_owned(),
            expr: Box::new(Expr::Literal(Value::new_varchar("x"), Span::ZERO)),
            span: Span::ZERO,
        };
        assert_eq!(e.to_string(), "_utf8mb4'x'");
    }

    #[test]
    fn insert_display() {
        let ins = InsertStatement {
            action: InsertAction::Insert,
            ignore: false,
            table: TableName::bare("t"),
            columns: vec![Ident::new("a"), Ident::new("b")],
            source: InsertSource::Values(vec![vec![lit_int(1), lit_int(2)]]),
            on_duplicate: vec![Assignment {
                target: ColumnRef::bare("a"),
                value: lit_int(3),
            }],
        };
        assert_eq!(
            ins.to_string(),
            "INSERT INTO `t` (`a`, `b`) VALUES (1, 2) ON DUPLICATE KEY UPDATE `a` = 3"
        );
    }

    #[test]
    fn string_literal_escaping() {
        let e = Expr::Literal(Value::new_varchar("it's"), Span::ZERO);
        assert_eq!(e.to_string(), "'it''s'");
    }
}

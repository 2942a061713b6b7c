//! SQL Abstract Syntax Tree node types for ParallaxSQL.
//!
//! This crate defines the complete AST type hierarchy for the MySQL dialect
//! ParallaxSQL parses, including the dialect's `HASH JOIN` and
//! `PARALLEL ... JOIN` join kinds. Every expression node carries a [`Span`]
//! for error reporting. The tree is strictly parent-to-child: dropping a
//! [`Statement`] releases every node of its parse in one recursive drop, and
//! no node holds a pointer back to its parent.
//!
//! Canonical SQL rendering lives in the `display` module: every node
//! implements `Display`, and re-parsing the rendered text yields a
//! structurally equal tree.

mod display;

use std::fmt;

use pxsql_types::{IntervalUnit, Value};

// ---------------------------------------------------------------------------
// Span — source location tracking
// ---------------------------------------------------------------------------

/// A byte-offset range into the original SQL source text.
///
/// Spans are diagnostic metadata, not structure: they never participate in
/// node equality or hashing, so trees parsed from differently-formatted
/// renderings of the same statement compare equal.
#[derive(Clone, Copy, Default)]
pub struct Span {
    /// Byte offset of the first character (inclusive).
    pub start: u32,
    /// Byte offset one past the last character (exclusive).
    pub end: u32,
}

impl PartialEq for Span {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for Span {}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, _state: &mut H) {}
}

impl Span {
    /// A zero-length span at position 0, used as a placeholder.
    pub const ZERO: Self = Self { start: 0, end: 0 };

    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Merge two spans into one that covers both.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// An identifier as written, without quoting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(pub String);

impl Ident {
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ident {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A possibly database-qualified table name like `db.users` or `users`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    pub qualifier: Option<Ident>,
    pub name: Ident,
}

impl TableName {
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: Ident::new(name),
        }
    }

    #[must_use]
    pub fn qualified(db: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(Ident::new(db)),
            name: Ident::new(name),
        }
    }
}

/// A column reference, possibly qualified by a (possibly qualified) table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub qualifier: Option<TableName>,
    pub name: Ident,
}

impl ColumnRef {
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: Ident::new(name),
        }
    }

    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(TableName::bare(table)),
            name: Ident::new(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level statement
// ---------------------------------------------------------------------------

/// A single parsed SQL statement. The parser produces one `Statement` per
/// semicolon-delimited command.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    // Queries
    Select(Box<SelectStatement>),
    Union(Box<UnionStatement>),

    // DML
    Insert(Box<InsertStatement>),
    Update(Box<UpdateStatement>),
    Delete(Box<DeleteStatement>),

    // DDL
    CreateTable(Box<CreateTableStatement>),
    CreateView(Box<CreateViewStatement>),
    CreateIndex(Box<CreateIndexStatement>),
    AlterTable(Box<AlterTableStatement>),
    DropTable(DropStatement),
    DropView(DropStatement),
    DropIndex(DropIndexStatement),
    Truncate(TableName),

    // Session / administration
    Set(SetStatement),
    Show(ShowStatement),
    Use(Ident),

    // Transaction control
    Begin,
    Commit,
    Rollback(RollbackStatement),
    Savepoint(Ident),
    Release(Ident),

    // Prepared statements
    Prepare(PrepareStatement),
    Execute(ExecuteStatement),
    Deallocate(Ident),

    // Utility
    Explain(Box<ExplainStatement>),
    Call(CallStatement),
    Load(Box<LoadStatement>),
    Lock(LockStatement),
    Unlock,
    Flush(FlushStatement),
    Analyze(MaintenanceStatement),
    Optimize(MaintenanceStatement),
    Repair(MaintenanceStatement),

    /// A statement that consists only of a comment.
    CommentOnly(String),
}

/// A query producer: a single SELECT or a set-operation tree. Used wherever
/// a subquery or view/CTE body appears.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpr {
    Select(Box<SelectStatement>),
    Union(Box<UnionStatement>),
}

impl QueryExpr {
    /// Wrap into a top-level [`Statement`].
    #[must_use]
    pub fn into_statement(self) -> Statement {
        match self {
            Self::Select(s) => Statement::Select(s),
            Self::Union(u) => Statement::Union(u),
        }
    }
}

// ---------------------------------------------------------------------------
// SELECT
// ---------------------------------------------------------------------------

/// A single SELECT block with its trailing clauses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    pub with: Option<WithClause>,
    pub distinct: bool,
    pub exprs: Vec<SelectExpr>,
    /// Comma-separated table references. Empty for `SELECT 1`.
    pub from: Vec<TableExpr>,
    pub where_clause: Option<Expr>,
    pub group_by: Option<GroupBy>,
    pub having: Option<Expr>,
    pub windows: Vec<WindowDef>,
    pub order_by: Vec<OrderExpr>,
    pub limit: Option<Limit>,
    pub lock: Option<LockMode>,
}

/// One element of the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectExpr {
    /// `*` or `t.*`.
    Star(Option<TableName>),
    /// `expr [AS alias]`.
    Aliased { expr: Expr, alias: Option<Ident> },
    /// `NEXT n VALUES` — sequence advance; the sequence table is in FROM.
    Next(Expr),
}

/// `WITH [RECURSIVE] name [(cols)] AS (query), ...`
#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

/// A single common table expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    pub name: Ident,
    pub columns: Vec<Ident>,
    pub query: QueryExpr,
}

/// `GROUP BY exprs [WITH ROLLUP]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    pub exprs: Vec<Expr>,
    pub with_rollup: bool,
}

/// One ORDER BY term. MySQL has no NULLS FIRST/LAST.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderExpr {
    pub expr: Expr,
    pub direction: Option<OrderDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// `LIMIT [offset,] count` / `LIMIT count [OFFSET offset]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    pub offset: Option<Expr>,
    pub count: Expr,
}

/// Row-locking clause on SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockMode {
    ForUpdate,
    ShareMode,
}

// ---------------------------------------------------------------------------
// Set operations
// ---------------------------------------------------------------------------

/// A set operation over two queries. Chains are left-deep.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionStatement {
    pub left: QueryExpr,
    pub op: SetOp,
    pub right: QueryExpr,
    pub order_by: Vec<OrderExpr>,
    pub limit: Option<Limit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOp {
    Union,
    UnionAll,
    Except,
    ExceptAll,
    Intersect,
    IntersectAll,
}

// ---------------------------------------------------------------------------
// Table expressions and joins
// ---------------------------------------------------------------------------

/// A table reference in a FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableExpr {
    Aliased(AliasedTableExpr),
    /// `( table_refs )`.
    Paren(Box<TableExpr>),
    Join(Box<JoinExpr>),
}

/// A concrete source with optional alias and index hints.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedTableExpr {
    pub source: TableSource,
    pub alias: Option<Ident>,
    pub hints: Vec<IndexHint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    Table(TableName),
    Subquery(Box<QueryExpr>),
}

/// A binary join between two table expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinExpr {
    pub left: TableExpr,
    pub kind: JoinKind,
    pub right: TableExpr,
    pub condition: JoinCondition,
}

/// The algebraic label on a JOIN node.
///
/// `Hash` and `Parallel` are local dialect extensions: `HASH JOIN` has inner
/// semantics, and `PARALLEL` prefixes exactly one of the standard inner/left/
/// right joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Cross,
    Straight,
    LeftOuter,
    RightOuter,
    FullOuter,
    Natural(NaturalJoinKind),
    Hash,
    Parallel(ParallelJoinKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaturalJoinKind {
    Inner,
    Left,
    Right,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParallelJoinKind {
    Inner,
    Left,
    Right,
}

/// ON / USING constraint, or none (CROSS and NATURAL joins).
#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    None,
    On(Expr),
    Using(Vec<Ident>),
}

/// `USE/FORCE/IGNORE INDEX [FOR ...] (idx, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHint {
    pub kind: IndexHintKind,
    pub for_clause: Option<IndexHintFor>,
    pub indexes: Vec<Ident>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexHintKind {
    Use,
    Force,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexHintFor {
    Join,
    OrderBy,
    GroupBy,
}

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

/// A named window in the SELECT WINDOW clause.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDef {
    pub name: Ident,
    pub spec: WindowSpec,
}

/// `OVER` operand: a reference to a named window or an inline spec.
#[derive(Debug, Clone, PartialEq)]
pub enum Over {
    Named(Ident),
    Spec(WindowSpec),
}

/// `([base] [PARTITION BY ...] [ORDER BY ...] [frame])`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowSpec {
    pub base: Option<Ident>,
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderExpr>,
    pub frame: Option<FrameSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpec {
    pub units: FrameUnits,
    pub start: FrameBound,
    /// None for the single-bound `ROWS n PRECEDING` shorthand.
    pub end: Option<FrameBound>,
    pub exclusion: Option<FrameExclusion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameUnits {
    Rows,
    Range,
    Groups,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(Box<Expr>),
    CurrentRow,
    Following(Box<Expr>),
    UnboundedFollowing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameExclusion {
    CurrentRow,
    Group,
    Ties,
    NoOthers,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// An expression node. Every variant carries a [`Span`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal constant; the payload keeps the decoded bytes and type tag.
    Literal(Value, Span),

    /// `_charset'literal'` — a string literal with a charset introducer.
    Introduced {
        charset: String,
        expr: Box<Expr>,
        span: Span,
    },

    /// A column reference.
    Column(ColumnRef, Span),

    /// `?` or `:name` bind parameter.
    Placeholder(Placeholder, Span),

    /// `@name` user variable or `@@[scope.]name` system variable.
    Variable {
        scope: VariableScope,
        name: Ident,
        span: Span,
    },

    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
        span: Span,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },

    /// Comparison operators, including LIKE/REGEXP/IN and their negations.
    /// `escape` is only ever present for LIKE.
    Comparison {
        op: ComparisonOp,
        left: Box<Expr>,
        right: Box<Expr>,
        escape: Option<Box<Expr>>,
        span: Span,
    },

    And {
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Or {
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Xor {
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Not {
        expr: Box<Expr>,
        span: Span,
    },

    /// `expr IS [NOT] NULL/TRUE/FALSE`.
    Is {
        expr: Box<Expr>,
        check: IsCheck,
        span: Span,
    },

    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        not: bool,
        span: Span,
    },

    /// `EXISTS (query)`. `NOT EXISTS` is `Not(Exists)`.
    Exists {
        query: Box<QueryExpr>,
        span: Span,
    },

    /// A scalar subquery `(SELECT ...)`.
    Subquery(Box<QueryExpr>, Span),

    /// A generic function call.
    Function {
        name: Ident,
        args: FunctionArgs,
        distinct: bool,
        over: Option<Over>,
        span: Span,
    },

    /// A call to a function with catalog identity.
    Builtin {
        func: BuiltinFunc,
        args: Vec<Expr>,
        span: Span,
    },

    /// `CASE [operand] WHEN ... THEN ... [ELSE ...] END`.
    Case {
        operand: Option<Box<Expr>>,
        whens: Vec<(Expr, Expr)>,
        else_expr: Option<Box<Expr>>,
        span: Span,
    },

    /// `CAST(expr AS type)`.
    Cast {
        expr: Box<Expr>,
        to: ConvertType,
        span: Span,
    },

    /// `CONVERT(expr, type)` or `CONVERT(expr USING charset)`.
    Convert {
        expr: Box<Expr>,
        target: ConvertTarget,
        span: Span,
    },

    /// `expr COLLATE collation`.
    Collate {
        expr: Box<Expr>,
        collation: Ident,
        span: Span,
    },

    /// `INTERVAL expr unit` as used in temporal arithmetic.
    Interval {
        expr: Box<Expr>,
        unit: IntervalUnit,
        span: Span,
    },

    /// The `INTERVAL(needle, n1, n2, ...)` comparison function.
    IntervalFunc {
        needle: Box<Expr>,
        haystack: Vec<Expr>,
        span: Span,
    },

    /// A parenthesized expression list `(a, b, c)` (row value).
    Tuple(Vec<Expr>, Span),

    /// The `DEFAULT` keyword in value positions.
    Default(Span),
}

impl Expr {
    /// The source span of this node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Literal(_, s)
            | Self::Column(_, s)
            | Self::Placeholder(_, s)
            | Self::Subquery(_, s)
            | Self::Tuple(_, s)
            | Self::Default(s) => *s,
            Self::Introduced { span, .. }
            | Self::Variable { span, .. }
            | Self::Unary { span, .. }
            | Self::Binary { span, .. }
            | Self::Comparison { span, .. }
            | Self::And { span, .. }
            | Self::Or { span, .. }
            | Self::Xor { span, .. }
            | Self::Not { span, .. }
            | Self::Is { span, .. }
            | Self::Between { span, .. }
            | Self::Exists { span, .. }
            | Self::Function { span, .. }
            | Self::Builtin { span, .. }
            | Self::Case { span, .. }
            | Self::Cast { span, .. }
            | Self::Convert { span, .. }
            | Self::Collate { span, .. }
            | Self::Interval { span, .. }
            | Self::IntervalFunc { span, .. } => *span,
        }
    }
}

/// Bind parameter spellings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `?` — anonymous positional; the index is the 0-based occurrence.
    Anonymous(u16),
    /// `:name`.
    Named(String),
}

/// `@var` vs `@@var` scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableScope {
    User,
    Session,
    Global,
    /// `@@name` without an explicit scope.
    SystemDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-expr`.
    Neg,
    /// `+expr`.
    Plus,
    /// `~expr`.
    BitNot,
    /// `!expr`.
    Bang,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    /// `->` JSON path extraction.
    JsonExtract,
    /// `->>` JSON path extraction with unquoting.
    JsonUnquoteExtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Ne,
    /// `<=>`.
    NullSafeEq,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
    Like,
    NotLike,
    Regexp,
    NotRegexp,
}

impl ComparisonOp {
    /// The operator with its NOT flag toggled, where one exists.
    #[must_use]
    pub const fn negated(self) -> Option<Self> {
        match self {
            Self::In => Some(Self::NotIn),
            Self::NotIn => Some(Self::In),
            Self::Like => Some(Self::NotLike),
            Self::NotLike => Some(Self::Like),
            Self::Regexp => Some(Self::NotRegexp),
            Self::NotRegexp => Some(Self::Regexp),
            _ => None,
        }
    }
}

/// The truthiness checks of `IS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsCheck {
    Null,
    NotNull,
    True,
    NotTrue,
    False,
    NotFalse,
}

/// Function argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgs {
    /// `f(*)` — only `COUNT(*)` in practice.
    Star,
    List(Vec<Expr>),
}

/// Functions the parser knows by identity.
///
/// The dialect renames MySQL's `HASH` to `HASHFUNC`; the bare spelling
/// `HASH(` is rejected by the parser as an unknown function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFunc {
    Hashfunc,
    CurrentDate,
    CurrentTime,
    CurrentTimestamp,
    Now,
    Database,
    CurrentUser,
}

impl BuiltinFunc {
    /// Catalog lookup by (case-insensitive) spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_uppercase().as_str() {
            "HASHFUNC" => Self::Hashfunc,
            "CURRENT_DATE" | "CURDATE" => Self::CurrentDate,
            "CURRENT_TIME" | "CURTIME" => Self::CurrentTime,
            "CURRENT_TIMESTAMP" => Self::CurrentTimestamp,
            "NOW" => Self::Now,
            "DATABASE" => Self::Database,
            "CURRENT_USER" => Self::CurrentUser,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hashfunc => "HASHFUNC",
            Self::CurrentDate => "CURRENT_DATE",
            Self::CurrentTime => "CURRENT_TIME",
            Self::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Self::Now => "NOW",
            Self::Database => "DATABASE",
            Self::CurrentUser => "CURRENT_USER",
        }
    }
}

/// Target type of CAST/CONVERT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ConvertType {
    /// Upper-cased type name, e.g. `CHAR`, `SIGNED`, `DECIMAL`.
    pub name: String,
    pub length: Option<u64>,
    pub scale: Option<u64>,
    pub charset: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConvertTarget {
    Type(ConvertType),
    Using(String),
}

// ---------------------------------------------------------------------------
// INSERT / UPDATE / DELETE
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub action: InsertAction,
    pub ignore: bool,
    pub table: TableName,
    pub columns: Vec<Ident>,
    pub source: InsertSource,
    /// `ON DUPLICATE KEY UPDATE` assignments.
    pub on_duplicate: Vec<Assignment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertAction {
    Insert,
    Replace,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    Values(Vec<Vec<Expr>>),
    Select(Box<QueryExpr>),
    /// `INSERT ... SET col = expr, ...`.
    Set(Vec<Assignment>),
}

/// One `target = value` pair in SET-style clauses. The `=` here is grammar,
/// not the comparison operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: ColumnRef,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub with: Option<WithClause>,
    pub table_exprs: Vec<TableExpr>,
    pub assignments: Vec<Assignment>,
    pub where_clause: Option<Expr>,
    pub order_by: Vec<OrderExpr>,
    pub limit: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub with: Option<WithClause>,
    /// Target tables of a multi-table delete; empty for the single-table form.
    pub targets: Vec<TableName>,
    pub table_exprs: Vec<TableExpr>,
    pub where_clause: Option<Expr>,
    pub order_by: Vec<OrderExpr>,
    pub limit: Option<Expr>,
}

// ---------------------------------------------------------------------------
// DDL
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    pub temporary: bool,
    pub if_not_exists: bool,
    pub name: TableName,
    pub body: CreateTableBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateTableBody {
    Definition {
        columns: Vec<ColumnDef>,
        constraints: Vec<TableConstraint>,
        options: Vec<TableOption>,
    },
    Like(TableName),
    AsQuery(Box<QueryExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: Ident,
    pub typ: ColumnType,
    pub options: Vec<ColumnOption>,
}

/// A column type as written in DDL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnType {
    /// Upper-cased base name, e.g. `VARCHAR`, `BIGINT`.
    pub name: String,
    pub length: Option<u64>,
    pub scale: Option<u64>,
    pub unsigned: bool,
    pub zerofill: bool,
    pub charset: Option<String>,
    pub collate: Option<String>,
    /// Member list for ENUM/SET types.
    pub enum_values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOption {
    NotNull,
    Null,
    Default(Expr),
    OnUpdate(Expr),
    AutoIncrement,
    PrimaryKey,
    Unique,
    Comment(String),
    Collate(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    pub name: Option<Ident>,
    pub kind: TableConstraintKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintKind {
    PrimaryKey(Vec<IndexColumn>),
    Unique {
        index_name: Option<Ident>,
        columns: Vec<IndexColumn>,
    },
    Index {
        index_name: Option<Ident>,
        columns: Vec<IndexColumn>,
    },
    FullText {
        index_name: Option<Ident>,
        columns: Vec<IndexColumn>,
    },
    ForeignKey {
        index_name: Option<Ident>,
        columns: Vec<Ident>,
        ref_table: TableName,
        ref_columns: Vec<Ident>,
        on_delete: Option<ReferenceAction>,
        on_update: Option<ReferenceAction>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceAction {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
    SetDefault,
}

/// One column inside an index definition, with optional prefix length.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
    pub name: Ident,
    pub length: Option<u64>,
    pub direction: Option<OrderDirection>,
}

/// A `name = value` table option like `ENGINE=InnoDB`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOption {
    pub name: String,
    pub value: TableOptionValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableOptionValue {
    Ident(String),
    Str(String),
    Number(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewStatement {
    pub or_replace: bool,
    pub name: TableName,
    pub columns: Vec<Ident>,
    pub query: QueryExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexStatement {
    pub kind: IndexKind,
    pub name: Ident,
    pub table: TableName,
    pub columns: Vec<IndexColumn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Plain,
    Unique,
    FullText,
    Spatial,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableStatement {
    pub table: TableName,
    pub actions: Vec<AlterTableAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    AddColumn {
        def: ColumnDef,
        position: Option<ColumnPosition>,
    },
    DropColumn(Ident),
    ModifyColumn {
        def: ColumnDef,
        position: Option<ColumnPosition>,
    },
    ChangeColumn {
        old: Ident,
        def: ColumnDef,
        position: Option<ColumnPosition>,
    },
    RenameColumn {
        old: Ident,
        new: Ident,
    },
    RenameTo(TableName),
    AddConstraint(TableConstraint),
    DropIndex(Ident),
    DropPrimaryKey,
    DropForeignKey(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnPosition {
    First,
    After(Ident),
}

/// `DROP TABLE/VIEW [IF EXISTS] name, ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct DropStatement {
    pub if_exists: bool,
    pub names: Vec<TableName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropIndexStatement {
    pub name: Ident,
    pub table: TableName,
}

// ---------------------------------------------------------------------------
// Session statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SetStatement {
    pub exprs: Vec<SetExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetExpr {
    Assign {
        scope: Option<SetScope>,
        target: SetTarget,
        value: SetValue,
    },
    /// `SET NAMES charset [COLLATE collation]`.
    Names {
        charset: Option<String>,
        collate: Option<String>,
    },
    /// `SET CHARACTER SET charset`.
    CharacterSet(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetScope {
    Global,
    Session,
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetTarget {
    /// A plain or `@@`-prefixed system variable.
    SysVar(Ident),
    /// An `@`-prefixed user variable.
    UserVar(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    Expr(Expr),
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowStatement {
    pub kind: ShowKind,
    pub filter: Option<ShowFilter>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShowKind {
    Databases,
    Tables { full: bool, db: Option<Ident> },
    TableStatus { db: Option<Ident> },
    Columns { full: bool, table: TableName },
    CreateTable(TableName),
    CreateView(TableName),
    Index(TableName),
    Variables { scope: Option<SetScope> },
    Status { scope: Option<SetScope> },
    Engines,
    Collation,
    Charset,
    Grants,
    ProcessList { full: bool },
    Warnings,
    Errors,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShowFilter {
    Like(String),
    Where(Expr),
}

// ---------------------------------------------------------------------------
// Transactions and prepared statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RollbackStatement {
    /// `ROLLBACK TO [SAVEPOINT] name`.
    pub to_savepoint: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrepareStatement {
    pub name: Ident,
    pub source: PrepareSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrepareSource {
    /// `PREPARE s FROM 'SELECT ...'`.
    Literal(String),
    /// `PREPARE s FROM @text`.
    Var(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteStatement {
    pub name: Ident,
    /// `USING @a, @b`.
    pub vars: Vec<Ident>,
}

// ---------------------------------------------------------------------------
// Utility statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ExplainStatement {
    pub format: Option<String>,
    pub target: ExplainTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExplainTarget {
    Statement(Statement),
    Table(TableName),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallStatement {
    pub name: TableName,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadStatement {
    pub local: bool,
    pub path: String,
    pub duplicate: Option<LoadDuplicate>,
    pub table: TableName,
    pub columns: Vec<Ident>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadDuplicate {
    Replace,
    Ignore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LockStatement {
    pub tables: Vec<TableLock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLock {
    pub table: TableName,
    pub alias: Option<Ident>,
    pub lock: LockType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockType {
    Read,
    ReadLocal,
    Write,
    LowPriorityWrite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlushStatement {
    pub local: bool,
    pub kind: FlushKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlushKind {
    Tables(Vec<TableName>),
    Logs,
    Privileges,
    Status,
    Hosts,
}

/// Shared shape of ANALYZE / OPTIMIZE / REPAIR TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceStatement {
    pub local: bool,
    pub tables: Vec<TableName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_merge_covers_both() {
        let a = Span::new(3, 7);
        let b = Span::new(5, 12);
        let m = a.merge(b);
        assert_eq!((m.start, m.end), (3, 12));
        let m = b.merge(a);
        assert_eq!((m.start, m.end), (3, 12));
        assert_eq!(Span::ZERO.len(), 0);
        assert!(Span::ZERO.is_empty());
        assert_eq!(Span::new(2, 6).len(), 4);
    }

    #[test]
    fn expr_span_access() {
        let e = Expr::Not {
            expr: Box::new(Expr::Default(Span::new(4, 11))),
            span: Span::new(0, 11),
        };
        assert_eq!((e.span().start, e.span().end), (0, 11));
        if let Expr::Not { expr, .. } = &e {
            assert_eq!((expr.span().start, expr.span().end), (4, 11));
        }
    }

    #[test]
    fn span_is_equality_transparent() {
        assert_eq!(Span::new(1, 2), Span::new(7, 9));
        let a = Expr::Default(Span::new(0, 7));
        let b = Expr::Default(Span::new(3, 10));
        assert_eq!(a, b);
    }

    #[test]
    fn builtin_catalog_excludes_hash() {
        assert_eq!(BuiltinFunc::from_name("hashfunc"), Some(BuiltinFunc::Hashfunc));
        assert_eq!(BuiltinFunc::from_name("HASHFUNC"), Some(BuiltinFunc::Hashfunc));
        assert_eq!(BuiltinFunc::from_name("HASH"), None);
        assert_eq!(BuiltinFunc::from_name("now"), Some(BuiltinFunc::Now));
    }

    #[test]
    fn comparison_negation_pairs() {
        assert_eq!(ComparisonOp::In.negated(), Some(ComparisonOp::NotIn));
        assert_eq!(ComparisonOp::NotLike.negated(), Some(ComparisonOp::Like));
        assert_eq!(ComparisonOp::Eq.negated(), None);
    }

    #[test]
    fn query_expr_into_statement() {
        let q = QueryExpr::Select(Box::new(SelectStatement::default()));
        assert!(matches!(q.into_statement(), Statement::Select(_)));
    }
}

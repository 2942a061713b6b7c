//! SQL token model and keyword table.
//!
//! Every token carries a byte-offset span plus the line/column of its first
//! byte. Keywords are reclassified from identifiers by the lexer through the
//! static table below; the `reserved` flag decides whether the parser may
//! accept the spelling as a bare identifier.

use std::fmt;

use pxsql_ast::Span;

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte-offset span into the original source.
    pub span: Span,
    /// Line number (1-based) at the start of the token.
    pub line: u32,
    /// Column number (1-based) at the start of the token.
    pub col: u32,
}

impl Token {
    /// The token's text as the user would recognize it, for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        self.kind.describe()
    }
}

/// Token discriminant. Literal payloads are already unquoted/unescaped; the
/// numeric kinds keep their ASCII spelling.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Unquoted identifier (not found in the keyword table).
    Ident(String),
    /// Backtick-quoted (or, under ANSI_QUOTES, double-quoted) identifier.
    QuotedIdent(String),
    /// A keyword, reserved or not.
    Keyword(Keyword),

    /// Integer literal: `42`.
    Integral(String),
    /// Exact-numeric literal with a decimal point: `1.5`, `.5`, `1.`.
    DecimalNum(String),
    /// Approximate-numeric literal with an exponent: `1e10`, `1.5E-3`.
    FloatNum(String),
    /// String literal, with optional charset introducer (`_utf8mb4'x'`).
    Str {
        value: String,
        introducer: Option<String>,
    },
    /// `0x1F`-style hex literal (digits only, no prefix).
    HexNum(String),
    /// `X'1F'`-style hex literal (digits only).
    HexVal(String),
    /// `0b01` / `B'01'` bit literal (digits only).
    BitNum(String),

    /// `?` anonymous bind parameter.
    Question,
    /// `:name` named bind parameter.
    ColonParam(String),
    /// `@name` user variable.
    AtParam(String),
    /// `@@name` system variable (scope resolved by the parser).
    AtAtParam(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    Bang,
    Eq,
    /// `<=>`.
    NullSafeEq,
    /// `!=` or `<>`.
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// `:=`.
    Assign,
    ShiftLeft,
    ShiftRight,
    /// `||`.
    OrOr,
    /// `&&`.
    AndAnd,
    /// `->`.
    Arrow,
    /// `->>`.
    DoubleArrow,

    // Punctuation
    Dot,
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Human-readable rendering for diagnostics and expected-token lists.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Ident(s) | Self::QuotedIdent(s) => s.clone(),
            Self::Keyword(k) => k.as_str().to_owned(),
            Self::Integral(s) | Self::DecimalNum(s) | Self::FloatNum(s) => s.clone(),
            Self::Str { value, .. } => format!("'{value}'"),
            Self::HexNum(s) => format!("0x{s}"),
            Self::HexVal(s) => format!("X'{s}'"),
            Self::BitNum(s) => format!("0b{s}"),
            Self::Question => "?".to_owned(),
            Self::ColonParam(s) => format!(":{s}"),
            Self::AtParam(s) => format!("@{s}"),
            Self::AtAtParam(s) => format!("@@{s}"),
            Self::Plus => "+".to_owned(),
            Self::Minus => "-".to_owned(),
            Self::Star => "*".to_owned(),
            Self::Slash => "/".to_owned(),
            Self::Percent => "%".to_owned(),
            Self::Ampersand => "&".to_owned(),
            Self::Pipe => "|".to_owned(),
            Self::Caret => "^".to_owned(),
            Self::Tilde => "~".to_owned(),
            Self::Bang => "!".to_owned(),
            Self::Eq => "=".to_owned(),
            Self::NullSafeEq => "<=>".to_owned(),
            Self::Ne => "!=".to_owned(),
            Self::Lt => "<".to_owned(),
            Self::Le => "<=".to_owned(),
            Self::Gt => ">".to_owned(),
            Self::Ge => ">=".to_owned(),
            Self::Assign => ":=".to_owned(),
            Self::ShiftLeft => "<<".to_owned(),
            Self::ShiftRight => ">>".to_owned(),
            Self::OrOr => "||".to_owned(),
            Self::AndAnd => "&&".to_owned(),
            Self::Arrow => "->".to_owned(),
            Self::DoubleArrow => "->>".to_owned(),
            Self::Dot => ".".to_owned(),
            Self::Comma => ",".to_owned(),
            Self::Semicolon => ";".to_owned(),
            Self::LParen => "(".to_owned(),
            Self::RParen => ")".to_owned(),
            Self::LBrace => "{".to_owned(),
            Self::RBrace => "}".to_owned(),
            Self::Eof => "end of input".to_owned(),
        }
    }

    /// Whether this token can begin a statement; used by `split` and by
    /// multi-statement recovery.
    #[must_use]
    pub fn is_statement_start(&self) -> bool {
        matches!(
            self,
            Self::Keyword(
                Keyword::Select
                    | Keyword::Insert
                    | Keyword::Replace
                    | Keyword::Update
                    | Keyword::Delete
                    | Keyword::Create
                    | Keyword::Drop
                    | Keyword::Alter
                    | Keyword::Truncate
                    | Keyword::Set
                    | Keyword::Show
                    | Keyword::Use
                    | Keyword::Begin
                    | Keyword::Start
                    | Keyword::Commit
                    | Keyword::Rollback
                    | Keyword::Savepoint
                    | Keyword::Release
                    | Keyword::Prepare
                    | Keyword::Execute
                    | Keyword::Deallocate
                    | Keyword::Explain
                    | Keyword::Describe
                    | Keyword::Call
                    | Keyword::Load
                    | Keyword::Lock
                    | Keyword::Unlock
                    | Keyword::Flush
                    | Keyword::Analyze
                    | Keyword::Optimize
                    | Keyword::Repair
                    | Keyword::With
            )
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// One source of truth for spelling, variant, and reservation class.
macro_rules! keywords {
    ( $( $variant:ident => $text:literal, $reserved:literal; )* ) => {
        /// A SQL keyword. One variant per spelling.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $( $variant, )*
        }

        impl Keyword {
            /// Reclassify an identifier spelling. Case-insensitive.
            #[must_use]
            pub fn lookup(ident: &str) -> Option<Self> {
                match ident.to_ascii_uppercase().as_str() {
                    $( $text => Some(Self::$variant), )*
                    _ => None,
                }
            }

            /// The canonical (uppercase) spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )*
                }
            }

            /// Reserved spellings may never be used as bare identifiers.
            #[must_use]
            pub const fn is_reserved(self) -> bool {
                match self {
                    $( Self::$variant => $reserved, )*
                }
            }
        }
    };
}

keywords! {
    // Reserved words, per the MySQL 8 reservation list.
    Add => "ADD", true;
    All => "ALL", true;
    Alter => "ALTER", true;
    Analyze => "ANALYZE", true;
    And => "AND", true;
    As => "AS", true;
    Asc => "ASC", true;
    Between => "BETWEEN", true;
    Binary => "BINARY", true;
    By => "BY", true;
    Call => "CALL", true;
    Case => "CASE", true;
    Cast => "CAST", true;
    Change => "CHANGE", true;
    Char => "CHAR", true;
    Character => "CHARACTER", true;
    Collate => "COLLATE", true;
    Column => "COLUMN", true;
    Constraint => "CONSTRAINT", true;
    Convert => "CONVERT", true;
    Create => "CREATE", true;
    Cross => "CROSS", true;
    CurrentDate => "CURRENT_DATE", true;
    CurrentTime => "CURRENT_TIME", true;
    CurrentTimestamp => "CURRENT_TIMESTAMP", true;
    CurrentUser => "CURRENT_USER", true;
    Database => "DATABASE", true;
    Databases => "DATABASES", true;
    Default => "DEFAULT", true;
    Delete => "DELETE", true;
    Desc => "DESC", true;
    Describe => "DESCRIBE", true;
    Distinct => "DISTINCT", true;
    Distinctrow => "DISTINCTROW", true;
    Div => "DIV", true;
    Drop => "DROP", true;
    Else => "ELSE", true;
    Except => "EXCEPT", true;
    Exists => "EXISTS", true;
    Explain => "EXPLAIN", true;
    False => "FALSE", true;
    For => "FOR", true;
    Force => "FORCE", true;
    Foreign => "FOREIGN", true;
    From => "FROM", true;
    Fulltext => "FULLTEXT", true;
    Group => "GROUP", true;
    Groups => "GROUPS", true;
    Having => "HAVING", true;
    HighPriority => "HIGH_PRIORITY", true;
    If => "IF", true;
    Ignore => "IGNORE", true;
    In => "IN", true;
    Index => "INDEX", true;
    Infile => "INFILE", true;
    Inner => "INNER", true;
    Insert => "INSERT", true;
    Intersect => "INTERSECT", true;
    Interval => "INTERVAL", true;
    Into => "INTO", true;
    Is => "IS", true;
    Join => "JOIN", true;
    Key => "KEY", true;
    Keys => "KEYS", true;
    Kill => "KILL", true;
    Left => "LEFT", true;
    Like => "LIKE", true;
    Limit => "LIMIT", true;
    Load => "LOAD", true;
    Lock => "LOCK", true;
    Mod => "MOD", true;
    LowPriority => "LOW_PRIORITY", true;
    Natural => "NATURAL", true;
    Not => "NOT", true;
    Null => "NULL", true;
    On => "ON", true;
    Optimize => "OPTIMIZE", true;
    Or => "OR", true;
    Order => "ORDER", true;
    Outer => "OUTER", true;
    Over => "OVER", true;
    Partition => "PARTITION", true;
    Primary => "PRIMARY", true;
    Procedure => "PROCEDURE", true;
    Range => "RANGE", true;
    Read => "READ", true;
    Recursive => "RECURSIVE", true;
    References => "REFERENCES", true;
    Regexp => "REGEXP", true;
    Release => "RELEASE", true;
    Rename => "RENAME", true;
    Replace => "REPLACE", true;
    Restrict => "RESTRICT", true;
    Right => "RIGHT", true;
    Rlike => "RLIKE", true;
    Row => "ROW", true;
    Rows => "ROWS", true;
    Select => "SELECT", true;
    Set => "SET", true;
    Show => "SHOW", true;
    Spatial => "SPATIAL", true;
    StraightJoin => "STRAIGHT_JOIN", true;
    Table => "TABLE", true;
    Then => "THEN", true;
    To => "TO", true;
    True => "TRUE", true;
    Union => "UNION", true;
    Unique => "UNIQUE", true;
    Unlock => "UNLOCK", true;
    Unsigned => "UNSIGNED", true;
    Update => "UPDATE", true;
    Use => "USE", true;
    Using => "USING", true;
    Values => "VALUES", true;
    When => "WHEN", true;
    Where => "WHERE", true;
    Window => "WINDOW", true;
    With => "WITH", true;
    Write => "WRITE", true;
    Xor => "XOR", true;
    Zerofill => "ZEROFILL", true;

    // Non-reserved keywords: act as keywords in specific grammar positions
    // and as plain identifiers everywhere else.
    Action => "ACTION", false;
    After => "AFTER", false;
    AutoIncrement => "AUTO_INCREMENT", false;
    Begin => "BEGIN", false;
    Cascade => "CASCADE", false;
    Charset => "CHARSET", false;
    Collation => "COLLATION", false;
    Columns => "COLUMNS", false;
    Comment => "COMMENT", false;
    Commit => "COMMIT", false;
    Current => "CURRENT", false;
    Data => "DATA", false;
    Deallocate => "DEALLOCATE", false;
    Duplicate => "DUPLICATE", false;
    End => "END", false;
    Engine => "ENGINE", false;
    Engines => "ENGINES", false;
    Enum => "ENUM", false;
    Errors => "ERRORS", false;
    Escape => "ESCAPE", false;
    Exclude => "EXCLUDE", false;
    Execute => "EXECUTE", false;
    Fields => "FIELDS", false;
    First => "FIRST", false;
    Flush => "FLUSH", false;
    Following => "FOLLOWING", false;
    Format => "FORMAT", false;
    Full => "FULL", false;
    Global => "GLOBAL", false;
    Grants => "GRANTS", false;
    Hash => "HASH", false;
    Hosts => "HOSTS", false;
    Local => "LOCAL", false;
    Logs => "LOGS", false;
    Mode => "MODE", false;
    Modify => "MODIFY", false;
    Names => "NAMES", false;
    Next => "NEXT", false;
    No => "NO", false;
    Offset => "OFFSET", false;
    Others => "OTHERS", false;
    Parallel => "PARALLEL", false;
    Preceding => "PRECEDING", false;
    Prepare => "PREPARE", false;
    Privileges => "PRIVILEGES", false;
    Processlist => "PROCESSLIST", false;
    Repair => "REPAIR", false;
    Rollback => "ROLLBACK", false;
    Rollup => "ROLLUP", false;
    Savepoint => "SAVEPOINT", false;
    Session => "SESSION", false;
    Share => "SHARE", false;
    Signed => "SIGNED", false;
    Start => "START", false;
    Status => "STATUS", false;
    Tables => "TABLES", false;
    Temporary => "TEMPORARY", false;
    Ties => "TIES", false;
    Transaction => "TRANSACTION", false;
    Truncate => "TRUNCATE", false;
    Unbounded => "UNBOUNDED", false;
    Value => "VALUE", false;
    Variables => "VARIABLES", false;
    View => "VIEW", false;
    Warnings => "WARNINGS", false;
    Work => "WORK", false;
}

//! SQL lexer for the MySQL dialect.
//!
//! Converts UTF-8 source text into a stream of tokens on demand. Uses memchr
//! for accelerated terminator scans in quoted literals. Tracks line/column
//! for error reporting: CR and LF each advance a line, CR+LF counts as one.
//!
//! Version-hint comments `/*!NNNNN ... */` are lexed inline when `NNNNN` is
//! at most the configured server version; otherwise their body is skipped
//! like a plain comment.

use memchr::memchr;
use pxsql_ast::Span;
use pxsql_error::{Error, ErrorKind, Position};

use crate::token::{Keyword, Token, TokenKind};
use crate::ParseOptions;

/// SQL lexer. The parser drives it with [`Lexer::next_token`].
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
    prev_cr: bool,
    ansi_quotes: bool,
    server_version: u32,
    /// Open version-hint comments whose body is being lexed inline.
    hint_depth: u32,
    /// Body of the most recently skipped comment.
    last_comment: Option<String>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str, opts: &ParseOptions) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
            prev_cr: false,
            ansi_quotes: opts.ansi_quotes,
            server_version: opts.server_version,
            hint_depth: 0,
            last_comment: None,
        }
    }

    /// Tokenize an entire input with default options. Test helper.
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>, Error> {
        let opts = ParseOptions::default();
        let mut lexer = Self::new(source, &opts);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let done = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Current position of the cursor.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.col, self.pos)
    }

    /// The body of the most recent comment, consumed at most once. Used to
    /// recognize comment-only statements.
    pub fn take_comment(&mut self) -> Option<String> {
        self.last_comment.take()
    }

    /// Produce the next token, skipping whitespace and comments.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_whitespace_and_comments()?;

        let start = self.position();
        if self.pos >= self.src.len() {
            if self.hint_depth > 0 {
                return Err(Error::new(
                    ErrorKind::UnterminatedComment,
                    start,
                    "version-hint comment is never closed",
                ));
            }
            return Ok(self.token_at(start, TokenKind::Eof));
        }

        let ch = self.src[self.pos];
        let kind = match ch {
            b'\'' => self.lex_string_token(b'\'', None)?,
            b'"' => {
                if self.ansi_quotes {
                    self.lex_quoted_ident(b'"')?
                } else {
                    self.lex_string_token(b'"', None)?
                }
            }
            b'`' => self.lex_quoted_ident(b'`')?,

            b'X' | b'x' if self.peek_at(1) == Some(b'\'') => self.lex_quoted_radix(16)?,
            b'B' | b'b' if self.peek_at(1) == Some(b'\'') => self.lex_quoted_radix(2)?,
            b'N' | b'n' if self.peek_at(1) == Some(b'\'') => {
                self.advance();
                self.lex_string_token(b'\'', None)?
            }

            b'0'..=b'9' => self.lex_number()?,
            b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.lex_number()?,

            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.lex_identifier()?,

            b'?' => {
                self.advance();
                TokenKind::Question
            }
            b':' => {
                self.advance();
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::Assign
                } else {
                    let name = self.lex_name_chars();
                    if name.is_empty() {
                        return Err(Error::new(
                            ErrorKind::UnexpectedChar,
                            start,
                            "':' is not followed by a parameter name",
                        ));
                    }
                    TokenKind::ColonParam(name)
                }
            }
            b'@' => {
                self.advance();
                if self.peek() == Some(b'@') {
                    self.advance();
                    TokenKind::AtAtParam(self.lex_name_chars())
                } else {
                    TokenKind::AtParam(self.lex_name_chars())
                }
            }

            b'+' => {
                self.advance();
                TokenKind::Plus
            }
            b'-' => {
                // `--` comments were handled during skipping; what remains is
                // minus or the JSON arrows.
                self.advance();
                if self.peek() == Some(b'>') {
                    self.advance();
                    if self.peek() == Some(b'>') {
                        self.advance();
                        TokenKind::DoubleArrow
                    } else {
                        TokenKind::Arrow
                    }
                } else {
                    TokenKind::Minus
                }
            }
            b'*' => {
                self.advance();
                TokenKind::Star
            }
            b'/' => {
                self.advance();
                TokenKind::Slash
            }
            b'%' => {
                self.advance();
                TokenKind::Percent
            }
            b'&' => {
                self.advance();
                if self.peek() == Some(b'&') {
                    self.advance();
                    TokenKind::AndAnd
                } else {
                    TokenKind::Ampersand
                }
            }
            b'|' => {
                self.advance();
                if self.peek() == Some(b'|') {
                    self.advance();
                    TokenKind::OrOr
                } else {
                    TokenKind::Pipe
                }
            }
            b'^' => {
                self.advance();
                TokenKind::Caret
            }
            b'~' => {
                self.advance();
                TokenKind::Tilde
            }
            b'!' => {
                self.advance();
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::Ne
                } else {
                    TokenKind::Bang
                }
            }
            b'=' => {
                self.advance();
                TokenKind::Eq
            }
            b'<' => {
                self.advance();
                match self.peek() {
                    Some(b'=') => {
                        self.advance();
                        if self.peek() == Some(b'>') {
                            self.advance();
                            TokenKind::NullSafeEq
                        } else {
                            TokenKind::Le
                        }
                    }
                    Some(b'>') => {
                        self.advance();
                        TokenKind::Ne
                    }
                    Some(b'<') => {
                        self.advance();
                        TokenKind::ShiftLeft
                    }
                    _ => TokenKind::Lt,
                }
            }
            b'>' => {
                self.advance();
                match self.peek() {
                    Some(b'=') => {
                        self.advance();
                        TokenKind::Ge
                    }
                    Some(b'>') => {
                        self.advance();
                        TokenKind::ShiftRight
                    }
                    _ => TokenKind::Gt,
                }
            }

            b'(' => {
                self.advance();
                TokenKind::LParen
            }
            b')' => {
                self.advance();
                TokenKind::RParen
            }
            b',' => {
                self.advance();
                TokenKind::Comma
            }
            b';' => {
                self.advance();
                TokenKind::Semicolon
            }
            b'.' => {
                self.advance();
                TokenKind::Dot
            }
            b'{' => {
                self.advance();
                TokenKind::LBrace
            }
            b'}' => {
                self.advance();
                TokenKind::RBrace
            }

            other => {
                self.advance();
                return Err(Error::new(
                    ErrorKind::UnexpectedChar,
                    start,
                    format!("unexpected byte 0x{other:02X} in input"),
                ));
            }
        };

        // Adjacent string literals separated only by whitespace/comments
        // concatenate into a single literal.
        let kind = if let TokenKind::Str { value, introducer } = kind {
            self.concat_adjacent_strings(value, introducer)?
        } else {
            kind
        };

        Ok(self.token_at(start, kind))
    }

    fn token_at(&self, start: Position, kind: TokenKind) -> Token {
        Token {
            kind,
            span: Span::new(start.offset as u32, self.pos as u32),
            line: start.line,
            col: start.col,
        }
    }

    // -----------------------------------------------------------------------
    // Cursor helpers
    // -----------------------------------------------------------------------

    fn advance(&mut self) -> u8 {
        let b = self.src[self.pos];
        self.pos += 1;
        match b {
            b'\n' => {
                if self.prev_cr {
                    // CR+LF already counted at the CR.
                    self.col = 1;
                } else {
                    self.line += 1;
                    self.col = 1;
                }
                self.prev_cr = false;
            }
            b'\r' => {
                self.line += 1;
                self.col = 1;
                self.prev_cr = true;
            }
            _ => {
                self.col += 1;
                self.prev_cr = false;
            }
        }
        b
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    // -----------------------------------------------------------------------
    // Whitespace, comments, version hints
    // -----------------------------------------------------------------------

    fn skip_whitespace_and_comments(&mut self) -> Result<(), Error> {
        loop {
            while !self.at_end()
                && matches!(self.src[self.pos], b' ' | b'\t' | b'\r' | b'\n' | b'\x0c')
            {
                self.advance();
            }
            if self.at_end() {
                return Ok(());
            }

            let b = self.src[self.pos];

            // `-- comment` requires whitespace (or end of input) after the
            // dashes; `--1` is subtraction.
            if b == b'-'
                && self.peek_at(1) == Some(b'-')
                && self
                    .peek_at(2)
                    .map_or(true, |c| matches!(c, b' ' | b'\t' | b'\r' | b'\n' | b'\x0c'))
            {
                self.advance();
                self.advance();
                self.skip_to_line_end();
                continue;
            }

            // `# comment`
            if b == b'#' {
                self.advance();
                self.skip_to_line_end();
                continue;
            }

            // Closing of an inline version hint.
            if b == b'*' && self.peek_at(1) == Some(b'/') && self.hint_depth > 0 {
                self.advance();
                self.advance();
                self.hint_depth -= 1;
                continue;
            }

            // Block comment or version hint.
            if b == b'/' && self.peek_at(1) == Some(b'*') {
                let start = self.position();
                self.advance();
                self.advance();

                if self.peek() == Some(b'!') {
                    self.advance();
                    let mut version: u32 = 0;
                    let mut digits = 0;
                    while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        version = version
                            .saturating_mul(10)
                            .saturating_add(u32::from(self.advance() - b'0'));
                        digits += 1;
                    }
                    // A hint with no digits is unconditional.
                    if digits == 0 || version <= self.server_version {
                        self.hint_depth += 1;
                        continue;
                    }
                }

                // Plain comment (or a hint for a newer server): skip to `*/`.
                let body_start = self.pos;
                match self.find_comment_end() {
                    Some(body_end) => {
                        let body =
                            String::from_utf8_lossy(&self.src[body_start..body_end]).into_owned();
                        self.last_comment = Some(body.trim().to_owned());
                    }
                    None => {
                        return Err(Error::new(
                            ErrorKind::UnterminatedComment,
                            start,
                            "block comment is never closed",
                        ));
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    fn skip_to_line_end(&mut self) {
        let body_start = self.pos;
        while !self.at_end() && self.src[self.pos] != b'\n' && self.src[self.pos] != b'\r' {
            self.advance();
        }
        let body = String::from_utf8_lossy(&self.src[body_start..self.pos]).into_owned();
        self.last_comment = Some(body.trim().to_owned());
    }

    /// Advance past the closing `*/`, returning the body end offset.
    /// MySQL block comments do not nest.
    fn find_comment_end(&mut self) -> Option<usize> {
        loop {
            let remaining = &self.src[self.pos..];
            let star = memchr(b'*', remaining)?;
            for _ in 0..star {
                self.advance();
            }
            if self.peek_at(1) == Some(b'/') {
                let body_end = self.pos;
                self.advance();
                self.advance();
                return Some(body_end);
            }
            self.advance();
        }
    }

    // -----------------------------------------------------------------------
    // Literals
    // -----------------------------------------------------------------------

    fn lex_string_token(
        &mut self,
        quote: u8,
        introducer: Option<String>,
    ) -> Result<TokenKind, Error> {
        let value = self.lex_string_body(quote)?;
        Ok(TokenKind::Str { value, introducer })
    }

    /// Lex a quoted string with MySQL escape processing. The cursor is on
    /// the opening quote.
    fn lex_string_body(&mut self, quote: u8) -> Result<String, Error> {
        let start = self.position();
        self.advance(); // opening quote

        let mut out: Vec<u8> = Vec::new();
        loop {
            if self.at_end() {
                return Err(Error::new(
                    ErrorKind::UnterminatedString,
                    start,
                    "string literal is never closed",
                ));
            }
            let b = self.src[self.pos];
            if b == quote {
                self.advance();
                if self.peek() == Some(quote) {
                    out.push(quote);
                    self.advance();
                    continue;
                }
                return Ok(String::from_utf8_lossy(&out).into_owned());
            }
            if b == b'\\' {
                self.advance();
                if self.at_end() {
                    return Err(Error::new(
                        ErrorKind::InvalidEscape,
                        start,
                        "escape at end of input",
                    ));
                }
                let esc = self.advance();
                match esc {
                    b'0' => out.push(0),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'b' => out.push(0x08),
                    b'Z' => out.push(0x1a),
                    b'\'' => out.push(b'\''),
                    b'"' => out.push(b'"'),
                    b'\\' => out.push(b'\\'),
                    // MySQL keeps the backslash on \% and \_ so LIKE sees it.
                    b'%' => {
                        out.push(b'\\');
                        out.push(b'%');
                    }
                    b'_' => {
                        out.push(b'\\');
                        out.push(b'_');
                    }
                    other => out.push(other),
                }
                continue;
            }
            out.push(b);
            self.advance();
        }
    }

    /// Lex a backtick or (ANSI_QUOTES) double-quoted identifier. Doubling the
    /// quote embeds it; no backslash escapes. Never keyword-reclassified.
    fn lex_quoted_ident(&mut self, quote: u8) -> Result<TokenKind, Error> {
        let start = self.position();
        self.advance(); // opening quote

        let mut out: Vec<u8> = Vec::new();
        loop {
            let remaining = &self.src[self.pos..];
            match memchr(quote, remaining) {
                Some(offset) => {
                    out.extend_from_slice(&self.src[self.pos..self.pos + offset]);
                    for _ in 0..=offset {
                        self.advance();
                    }
                    if self.peek() == Some(quote) {
                        out.push(quote);
                        self.advance();
                    } else {
                        return Ok(TokenKind::QuotedIdent(
                            String::from_utf8_lossy(&out).into_owned(),
                        ));
                    }
                }
                None => {
                    return Err(Error::new(
                        ErrorKind::UnterminatedIdent,
                        start,
                        "quoted identifier is never closed",
                    ));
                }
            }
        }
    }

    /// Lex `X'1F'` / `B'01'` literals. The cursor is on the radix letter.
    fn lex_quoted_radix(&mut self, radix: u32) -> Result<TokenKind, Error> {
        let start = self.position();
        self.advance(); // X or B
        self.advance(); // opening quote

        let digit_start = self.pos;
        let ok = |c: u8| match radix {
            16 => c.is_ascii_hexdigit(),
            _ => c == b'0' || c == b'1',
        };
        while self.peek().is_some_and(ok) {
            self.advance();
        }
        let digits = String::from_utf8_lossy(&self.src[digit_start..self.pos]).into_owned();
        match self.peek() {
            Some(b'\'') => {
                self.advance();
            }
            Some(_) => {
                return Err(Error::new(
                    ErrorKind::InvalidNumber,
                    start,
                    format!(
                        "invalid digit in base-{radix} literal",
                    ),
                ));
            }
            None => {
                return Err(Error::new(
                    ErrorKind::UnterminatedString,
                    start,
                    "quoted literal is never closed",
                ));
            }
        }
        if radix == 16 {
            if digits.len() % 2 != 0 {
                return Err(Error::new(
                    ErrorKind::InvalidNumber,
                    start,
                    "hex literal has an odd number of digits",
                ));
            }
            Ok(TokenKind::HexVal(digits))
        } else {
            Ok(TokenKind::BitNum(digits))
        }
    }

    fn lex_number(&mut self) -> Result<TokenKind, Error> {
        let start = self.position();
        let text_start = self.pos;

        // 0x / 0b prefixes.
        if self.src[self.pos] == b'0' {
            if matches!(self.peek_at(1), Some(b'x' | b'X')) {
                self.advance();
                self.advance();
                let digits_start = self.pos;
                while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                    self.advance();
                }
                if self.pos == digits_start || self.peek().is_some_and(is_ident_char) {
                    return Err(Error::new(
                        ErrorKind::InvalidNumber,
                        start,
                        "malformed hexadecimal literal",
                    ));
                }
                return Ok(TokenKind::HexNum(
                    String::from_utf8_lossy(&self.src[digits_start..self.pos]).into_owned(),
                ));
            }
            if matches!(self.peek_at(1), Some(b'b' | b'B'))
                && self.peek_at(2).is_some_and(|c| c == b'0' || c == b'1')
            {
                self.advance();
                self.advance();
                let digits_start = self.pos;
                while self.peek().is_some_and(|c| c == b'0' || c == b'1') {
                    self.advance();
                }
                if self.peek().is_some_and(is_ident_char) {
                    return Err(Error::new(
                        ErrorKind::InvalidNumber,
                        start,
                        "malformed bit literal",
                    ));
                }
                return Ok(TokenKind::BitNum(
                    String::from_utf8_lossy(&self.src[digits_start..self.pos]).into_owned(),
                ));
            }
        }

        let mut has_dot = self.src[self.pos] == b'.';
        if has_dot {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // A dot continues the literal only when a digit follows; otherwise
        // the dot is punctuation (`t.1` style references aside).
        if !has_dot
            && self.peek() == Some(b'.')
            && self.peek_at(1).is_some_and(|c| c.is_ascii_digit())
        {
            has_dot = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent makes it a float.
        let mut has_exp = false;
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let after_e = self.peek_at(1);
            let after_sign = self.peek_at(2);
            let exp_ok = match after_e {
                Some(c) if c.is_ascii_digit() => true,
                Some(b'+' | b'-') => after_sign.is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exp_ok {
                has_exp = true;
                self.advance(); // e
                if matches!(self.peek(), Some(b'+' | b'-')) {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text = String::from_utf8_lossy(&self.src[text_start..self.pos]).into_owned();

        if self.peek().is_some_and(is_ident_char) {
            if has_dot || has_exp {
                return Err(Error::new(
                    ErrorKind::InvalidNumber,
                    start,
                    format!("malformed numeric literal near '{text}'"),
                ));
            }
            // `123abc` is a digit-leading identifier.
            while self.peek().is_some_and(is_ident_char) {
                self.advance();
            }
            let ident = String::from_utf8_lossy(&self.src[text_start..self.pos]).into_owned();
            return Ok(TokenKind::Ident(ident));
        }

        if has_exp {
            Ok(TokenKind::FloatNum(text))
        } else if has_dot {
            Ok(TokenKind::DecimalNum(text))
        } else {
            Ok(TokenKind::Integral(text))
        }
    }

    // -----------------------------------------------------------------------
    // Identifiers
    // -----------------------------------------------------------------------

    fn lex_identifier(&mut self) -> Result<TokenKind, Error> {
        let start = self.pos;
        self.advance();
        while self.peek().is_some_and(is_ident_char) {
            self.advance();
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();

        // Charset introducer: `_utf8mb4'...'`.
        if text.len() > 1 && text.starts_with('_') && self.peek() == Some(b'\'') {
            let charset = text[1..].to_owned();
            return self.lex_string_token(b'\'', Some(charset));
        }

        if let Some(kw) = Keyword::lookup(&text) {
            Ok(TokenKind::Keyword(kw))
        } else {
            Ok(TokenKind::Ident(text))
        }
    }

    fn lex_name_chars(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.advance();
        }
        String::from_utf8_lossy(&self.src[start..self.pos]).into_owned()
    }

    fn concat_adjacent_strings(
        &mut self,
        mut value: String,
        introducer: Option<String>,
    ) -> Result<TokenKind, Error> {
        loop {
            self.skip_whitespace_and_comments()?;
            let next_is_string = match self.peek() {
                Some(b'\'') => true,
                Some(b'"') => !self.ansi_quotes,
                _ => false,
            };
            if !next_is_string {
                return Ok(TokenKind::Str { value, introducer });
            }
            let quote = self.src[self.pos];
            let more = self.lex_string_body(quote)?;
            value.push_str(&more);
        }
    }
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

//! Unicode scanner for Kiwi source text.
//!
//! The scanner is a synchronous pull source: each call to
//! [`Scanner::next_token`] classifies one token, buffering its lexeme as it
//! consumes code points. The first code point of a token selects the scan
//! rule; everything else is one code point of lookahead.
//!
//! Comments are ordinary tokens at this level. The parser-facing view is
//! [`Scanner::next_significant_token`], which discards them.

use crate::token::{self, Token, TokenKind};
use unicode_ident::{is_xid_continue, is_xid_start};

/// Initial capacity of the lexeme buffer.
const LEXEME_CAPACITY: usize = 10;

/// A scan failure, positioned at the offending code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The current code point cannot begin or continue any token.
    UnexpectedLexeme {
        file: String,
        line: u32,
        column: u32,
    },
    /// Input ended inside a string literal, an unclosed multi-line comment,
    /// or a radix literal with no digits.
    UnexpectedEof {
        file: String,
        line: u32,
        column: u32,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::UnexpectedLexeme { file, line, column } => {
                write!(f, "scanner:{}:{}:{}: unexpected lexeme", file, line, column)
            }
            ScanError::UnexpectedEof { file, line, column } => {
                write!(
                    f,
                    "scanner:{}:{}:{}: unexpected end of input",
                    file, line, column
                )
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Pull scanner over an in-memory source.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    current: Option<char>,
    line: u32,
    column: u32,
    buf: String,
    file_name: String,
}

impl Scanner {
    /// Scan `source` with the default diagnostic name `stdin`.
    pub fn new(source: &str) -> Self {
        Scanner::with_file_name(source, "stdin")
    }

    /// Scan `source`, reporting errors against `file_name`.
    pub fn with_file_name(source: &str, file_name: impl Into<String>) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let current = chars.first().copied();
        Scanner {
            chars,
            pos: 0,
            current,
            line: 1,
            column: 1,
            buf: String::with_capacity(LEXEME_CAPACITY),
            file_name: file_name.into(),
        }
    }

    /// Diagnostic name of the input.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Line of the code point under the cursor (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Column of the code point under the cursor (1-based).
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Produce the next token. After the end of input this keeps returning
    /// `EOF` tokens.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        self.buf.clear();
        self.skip_whitespace();

        let Some(c) = self.current else {
            return Ok(Token::eof());
        };

        match c {
            ':' => Ok(self.maybe_double('=', TokenKind::Colon, TokenKind::Assign)),
            '.' => Ok(self.maybe_double('.', TokenKind::Dot, TokenKind::Concat)),
            '+' => Ok(self.maybe_double(':', TokenKind::Add, TokenKind::AddAssign)),
            '-' => Ok(self.maybe_double(':', TokenKind::Subtract, TokenKind::SubtractAssign)),
            '*' => Ok(self.maybe_double(':', TokenKind::Multiply, TokenKind::MultiplyAssign)),
            '%' => Ok(self.maybe_double(':', TokenKind::Modulo, TokenKind::ModuloAssign)),
            '/' => self.read_slash(),
            '=' => Ok(self.single(TokenKind::Equal)),
            '~' => Ok(self.maybe_double('=', TokenKind::Not, TokenKind::NotEqual)),
            '<' => Ok(self.maybe_double('=', TokenKind::Less, TokenKind::LessEqual)),
            '>' => Ok(self.maybe_double('=', TokenKind::Greater, TokenKind::GreaterEqual)),
            '&' => self.must_double('&', TokenKind::And),
            '|' => self.must_double('|', TokenKind::Or),
            '{' => Ok(self.single(TokenKind::LBrace)),
            '}' => Ok(self.single(TokenKind::RBrace)),
            '(' => Ok(self.single(TokenKind::LParen)),
            ')' => Ok(self.single(TokenKind::RParen)),
            ',' => Ok(self.single(TokenKind::Comma)),
            '"' => self.read_string(),
            c if c.is_ascii_digit() || c == '#' => self.read_number(),
            c if is_xid_start(c) || c == '_' || c == '`' => self.read_identifier(),
            _ => Err(self.unexpected()),
        }
    }

    /// The parser-facing view of the token stream: comments are discarded.
    pub fn next_significant_token(&mut self) -> Result<Token, ScanError> {
        loop {
            let tok = self.next_token()?;
            if tok.kind != TokenKind::Comment {
                return Ok(tok);
            }
        }
    }

    fn advance(&mut self) {
        if let Some(c) = self.current {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += 1;
        self.current = self.chars.get(self.pos).copied();
    }

    fn append_advance(&mut self) {
        if let Some(c) = self.current {
            self.buf.push(c);
        }
        self.advance();
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.buf.clone())
    }

    fn unexpected(&self) -> ScanError {
        ScanError::UnexpectedLexeme {
            file: self.file_name.clone(),
            line: self.line,
            column: self.column,
        }
    }

    fn unexpected_eof(&self) -> ScanError {
        ScanError::UnexpectedEof {
            file: self.file_name.clone(),
            line: self.line,
            column: self.column,
        }
    }

    fn require_current(&self) -> Result<char, ScanError> {
        self.current.ok_or_else(|| self.unexpected_eof())
    }

    /// Single-code-point token.
    fn single(&mut self, kind: TokenKind) -> Token {
        self.append_advance();
        self.token(kind)
    }

    /// `first` alone is `short`; `first` followed by `next` is `long`.
    fn maybe_double(&mut self, next: char, short: TokenKind, long: TokenKind) -> Token {
        self.append_advance();
        if self.current == Some(next) {
            self.append_advance();
            self.token(long)
        } else {
            self.token(short)
        }
    }

    /// The first code point must be doubled (`&&`, `||`).
    fn must_double(&mut self, next: char, kind: TokenKind) -> Result<Token, ScanError> {
        self.append_advance();
        if self.current == Some(next) {
            self.append_advance();
            Ok(self.token(kind))
        } else {
            Err(self.unexpected())
        }
    }

    /// `/` begins a comment, a compound assignment, or plain division.
    fn read_slash(&mut self) -> Result<Token, ScanError> {
        self.append_advance();
        match self.current {
            Some('/') => {
                while self.current.is_some() && self.current != Some('\n') {
                    self.append_advance();
                }
                Ok(self.token(TokenKind::Comment))
            }
            Some('*') => {
                self.append_advance();
                self.read_comment_multi_inner()?;
                Ok(self.token(TokenKind::Comment))
            }
            Some('=') => {
                self.append_advance();
                Ok(self.token(TokenKind::DivideAssign))
            }
            _ => Ok(self.token(TokenKind::Divide)),
        }
    }

    /// Body of a multi-line comment. Each `/*` seen inside opens another
    /// level that must close before the enclosing one can.
    fn read_comment_multi_inner(&mut self) -> Result<(), ScanError> {
        let mut prev = self.require_current()?;
        self.append_advance();
        loop {
            let c = self.require_current()?;
            if prev == '*' && c == '/' {
                break;
            }
            if prev == '/' && c == '*' {
                self.read_comment_multi_inner()?;
                prev = self.require_current()?;
            } else {
                prev = c;
            }
            self.append_advance();
        }
        self.append_advance();
        Ok(())
    }

    /// String literal. The quotes are consumed but not buffered; escape
    /// sequences are replaced by their values. An unrecognized escape keeps
    /// the backslash and the following code point as-is.
    fn read_string(&mut self) -> Result<Token, ScanError> {
        self.advance();
        loop {
            let c = self.require_current()?;
            if c == '"' {
                break;
            }
            if c == '\\' {
                self.advance();
                let escaped = self.require_current()?;
                match escaped {
                    '"' => self.buf.push('"'),
                    'r' => self.buf.push('\r'),
                    'n' => self.buf.push('\n'),
                    't' => self.buf.push('\t'),
                    '\\' => self.buf.push('\\'),
                    other => {
                        self.buf.push('\\');
                        self.buf.push(other);
                    }
                }
                self.advance();
            } else {
                self.append_advance();
            }
        }
        self.advance();
        Ok(self.token(TokenKind::String))
    }

    /// Numeric literal: decimal digits, optionally a radix prefix (`2#`,
    /// `8#`, `16#`, or a bare `#` meaning hexadecimal) followed by digits of
    /// that radix and an optional closing `#` delimiter. The closing
    /// delimiter is consumed but kept out of the lexeme.
    fn read_number(&mut self) -> Result<Token, ScanError> {
        while matches!(self.current, Some(c) if c.is_ascii_digit()) {
            self.append_advance();
        }

        if self.current == Some('#') {
            let radix: u32 = match self.buf.as_str() {
                "" | "16" => 16,
                "2" => 2,
                "8" => 8,
                _ => return Err(self.unexpected()),
            };
            self.append_advance();

            let mut digits = 0;
            while matches!(self.current, Some(c) if c.is_digit(radix)) {
                digits += 1;
                self.append_advance();
            }
            // a radix with no number part is invalid
            if digits == 0 {
                return match self.current {
                    Some(_) => Err(self.unexpected()),
                    None => Err(self.unexpected_eof()),
                };
            }
            if self.current == Some('#') {
                self.advance();
            }
        }

        Ok(self.token(TokenKind::Number))
    }

    /// Identifier or reserved word. A leading backtick lets a reserved word
    /// be used as an identifier; a lone backtick is invalid.
    fn read_identifier(&mut self) -> Result<Token, ScanError> {
        self.append_advance();
        while matches!(self.current, Some(c) if is_xid_continue(c)) {
            self.append_advance();
        }

        if self.buf == "`" {
            return Err(self.unexpected());
        }

        let kind = token::keyword(&self.buf).unwrap_or(TokenKind::Identifier);
        Ok(self.token(kind))
    }
}

//! Kiwi Front-End Library
//!
//! The front half of the Kiwi toolchain: a Unicode scanner producing
//! classified tokens, the abstract syntax tree with its surface-syntax
//! printer, and the scoped symbol table used by the semantic phases. The
//! grammar driver sits on top of these pieces; it consumes
//! [`Scanner::next_significant_token`] and builds [`ast`] nodes.
//!
//! ```rust
//! use kiwic::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new("x := 16#FF#.");
//! assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Identifier);
//! assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Assign);
//! assert_eq!(scanner.next_token().unwrap().lexeme, "16#FF");
//! ```

pub mod ast;
pub mod printer;
pub mod scanner;
pub mod symtab;
pub mod token;

pub use printer::{Printer, program_to_string};
pub use scanner::{ScanError, Scanner};
pub use symtab::{SYMTAB_SIZE, SymbolKind, SymbolTable};
pub use token::{Token, TokenKind, keyword};

use std::fs;
use std::path::Path;

/// Scan a whole source string into its token sequence, EOF included.
pub fn tokenize_source(source: &str, file_name: &str) -> Result<Vec<Token>, ScanError> {
    let mut scanner = Scanner::with_file_name(source, file_name);
    let mut tokens = Vec::new();
    loop {
        let tok = scanner.next_token()?;
        let done = tok.is_eof();
        tokens.push(tok);
        if done {
            return Ok(tokens);
        }
    }
}

/// Read and scan a source file.
pub fn tokenize_file(path: &Path) -> Result<Vec<Token>, String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read source file {}: {}", path.display(), e))?;
    tokenize_source(&source, &path.display().to_string()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_source_ends_with_eof() {
        let tokens = tokenize_source("x := 1.", "test").unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_tokenize_source_carries_file_name() {
        let err = tokenize_source("?", "broken.kw").unwrap_err();
        assert_eq!(err.to_string(), "scanner:broken.kw:1:1: unexpected lexeme");
    }

    #[test]
    fn test_tokenize_missing_file() {
        let err = tokenize_file(Path::new("/no/such/file.kw")).unwrap_err();
        assert!(err.contains("Failed to read source file"));
    }
}

/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * License:
 * This file is part of the PohLang programming language project.
 *
 * PohLang is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fmt;

use crate::span::Span;

/// Represents the **category of a lexical token** in a PohLang expression
/// fragment.
///
/// Statements are recognized from whole lines by the parser, so only the
/// expression part of a line is ever tokenized:
/// ```text
/// Write total plus 1   →   "total + 1"   →   Identifier, Symbol, Number
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal.
    ///
    /// Includes:
    /// - Integer values: `42`
    /// - Decimal values: `3.14`
    Number,

    /// A double-quoted text literal. The lexeme holds the unescaped content.
    String,

    /// A bare word: variable names, function names and the postfix `at`.
    Identifier,

    /// An operator or punctuation symbol.
    ///
    /// Includes:
    /// - Arithmetic: `+`, `-`, `*`, `/`
    /// - Comparison: `==`, `!=`, `>=`, `<=`, `>`, `<`
    /// - Logic: `&&`, `||`, `!`
    /// - Structure: `(`, `)`, `,`
    Symbol,

    /// A character the language has no use for.
    ///
    /// Kept in the stream so the parser can point at it.
    Unknown,

    /// End-of-fragment marker, always the final token.
    Eof,
}

/// A single classified token of an expression fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,

    /// Source text of the token (unescaped content for strings).
    pub lexeme: String,

    /// 1-based source line of the fragment.
    pub line: usize,

    /// 1-based column relative to the start of the fragment.
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    pub fn span(&self) -> Span {
        Span::at(self.line, self.column)
    }

    /// True for a symbol token with exactly this text.
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme == symbol
    }

    /// True for an identifier matching `word` case-insensitively.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.lexeme.eq_ignore_ascii_case(word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "\"{}\"", self.lexeme),
            TokenKind::Eof => write!(f, "end of expression"),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}

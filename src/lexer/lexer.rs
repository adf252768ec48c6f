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

use crate::lexer::token::{Token, TokenKind};

/// Tokenizes one expression fragment taken from a single source line.
///
/// Columns are 1-based and relative to the fragment. The returned stream
/// always ends with a `TokenKind::Eof` marker.
///
/// # Example
/// ```text
/// total + 1   →   [Identifier(total)@1, Symbol(+)@7, Number(1)@9, Eof@10]
/// ```
pub fn tokenize(source: &str, line: usize) -> Vec<Token> {
    let mut lexer = Lexer::new(source, line);
    lexer.scan_tokens();
    lexer.tokens
}

struct Lexer {
    chars: Vec<char>,
    current: usize,
    start: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str, line: usize) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            start: 0,
            line,
            tokens: Vec::new(),
        }
    }

    /// Scans the whole fragment, then appends the final `Eof` token.
    fn scan_tokens(&mut self) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        let column = self.chars.len() + 1;
        self.tokens
            .push(Token::new(TokenKind::Eof, "", self.line, column));
    }

    /// Scans and emits a single token.
    ///
    /// Whitespace is skipped. Two-character operators are matched before
    /// their one-character prefixes.
    fn scan_token(&mut self) {
        let ch = self.advance();

        match ch {
            c if c.is_whitespace() => {}

            '=' => {
                if self.match_char('=') {
                    self.push(TokenKind::Symbol, "==");
                } else {
                    self.push(TokenKind::Unknown, "=");
                }
            }

            '!' | '<' | '>' => {
                let mut lexeme = ch.to_string();
                if self.match_char('=') {
                    lexeme.push('=');
                }
                self.push(TokenKind::Symbol, lexeme);
            }

            '&' | '|' => {
                if self.match_char(ch) {
                    self.push(TokenKind::Symbol, format!("{ch}{ch}"));
                } else {
                    self.push(TokenKind::Unknown, ch.to_string());
                }
            }

            '+' | '-' | '*' | '/' | '(' | ')' | ',' => self.push(TokenKind::Symbol, ch.to_string()),

            '"' => self.string(),

            '0'..='9' => self.number(),

            'a'..='z' | 'A'..='Z' | '_' => self.identifier(),

            other => self.push(TokenKind::Unknown, other.to_string()),
        }
    }

    /// Scans a double-quoted literal, resolving `\"`, `\\`, `\n` and `\t`.
    ///
    /// An unterminated literal is emitted as an `Unknown` quote so the
    /// parser can report it at the opening column.
    fn string(&mut self) {
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != '"' {
            let ch = self.advance();
            if ch == '\\' && !self.is_at_end() {
                match self.advance() {
                    '"' => value.push('"'),
                    '\\' => value.push('\\'),
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    other => {
                        value.push('\\');
                        value.push(other);
                    }
                }
            } else {
                value.push(ch);
            }
        }

        if self.is_at_end() {
            self.current = self.start + 1;
            self.push(TokenKind::Unknown, "\"");
            return;
        }

        self.advance(); // closing quote
        self.push(TokenKind::String, value);
    }

    fn identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.chars[self.start..self.current].iter().collect();
        self.push(TokenKind::Identifier, text);
    }

    /// Integer or decimal literal (`42`, `3.14`).
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume '.'
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text: String = self.chars[self.start..self.current].iter().collect();
        self.push(TokenKind::Number, text);
    }

    fn push(&mut self, kind: TokenKind, lexeme: impl Into<String>) {
        let column = self.start + 1;
        self.tokens.push(Token::new(kind, lexeme, self.line, column));
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn peek(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

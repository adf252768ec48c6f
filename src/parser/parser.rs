/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * Line-Driven Parser Entry Point
 *
 * This file defines the `Parser` structure and the public `parse_program()`
 * driver used to turn PohLang source text into a `Program`.
 *
 * The parsing implementation itself is split across multiple modules:
 * - `statements.rs`   → Statement forms, block bodies and signatures
 * - `expressions.rs`  → Phrasal templates & operator precedence
 * - `helpers.rs`      → Token cursor, templates and text splitting
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

use crate::ast::Program;
use crate::error::PohError;
use crate::parser::helpers::strip_comment;
use crate::span::Span;

/// One cleaned, non-blank source line.
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// 1-based line number in the original source.
    pub number: usize,

    /// Comment-free text without surrounding whitespace.
    pub text: String,
}

/// The PohLang statement parser.
///
/// This structure maintains:
/// - The cleaned lines of the source
/// - The cursor into those lines
///
/// Statement forms are implemented in `statements.rs` through an
/// additional `impl Parser` block. Expressions are parsed per fragment by
/// `ExprParser`.
pub struct Parser {
    pub(crate) lines: Vec<SourceLine>,
    pub(crate) current: usize,
}

/// Public entry point for the parsing phase.
///
/// # PohLang Pipeline
/// ```text
/// Source → Lines → Statements (→ Fragments → Tokens → Expressions) → AST
/// ```
///
/// Errors are attributed to `file`.
///
/// # Example
/// ```rust
/// let program = pohlang::parse_program("Write 1 plus 2", "demo.poh").unwrap();
/// assert_eq!(program.statements.len(), 1);
/// ```
pub fn parse_program(source: &str, file: &str) -> Result<Program, PohError> {
    Parser::new(source)
        .and_then(|mut parser| parser.parse())
        .map_err(|err| err.in_file(file))
}

impl Parser {
    /// Splits the source into lines, dropping comments and blank lines.
    ///
    /// A string literal still open at the end of a line is reported here,
    /// before any statement is looked at.
    pub fn new(source: &str) -> Result<Self, PohError> {
        let mut lines = Vec::new();

        for (index, raw) in source.lines().enumerate() {
            let number = index + 1;
            let (code, open_quote) = strip_comment(raw);

            if let Some(column) = open_quote {
                let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
                return Err(PohError::parse_error(
                    "Unterminated string literal",
                    Span::at(number, column - indent),
                ));
            }

            let text = code.trim();
            if !text.is_empty() {
                lines.push(SourceLine {
                    number,
                    text: text.to_string(),
                });
            }
        }

        Ok(Self { lines, current: 0 })
    }

    /// Parses every line into top-level statements.
    pub fn parse(&mut self) -> Result<Program, PohError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.statement()?);
        }

        Ok(Program { statements })
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current >= self.lines.len()
    }

    pub(crate) fn peek_line(&self) -> Option<&SourceLine> {
        self.lines.get(self.current)
    }

    pub(crate) fn next_line(&mut self) -> Option<SourceLine> {
        let line = self.lines.get(self.current).cloned()?;
        self.current += 1;
        Some(line)
    }
}

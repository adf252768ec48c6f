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

use crate::diagnostics::location_prefix;
use crate::span::Span;

/// The two top-level failure families of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed statements, expressions or blocks.
    Parse,

    /// Failures raised while evaluating a parsed program.
    Runtime,
}

#[derive(Debug, Clone)]
pub struct PohError {
    /// Parse or runtime.
    pub kind: ErrorKind,

    /// Stable error code (E_PARSE, E_TYPE, …)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// File label the failure is attributed to (`<stdin>` for raw source).
    pub file: String,

    /// Innermost source location, when known.
    pub span: Option<Span>,

    /// Call-site frames added while the error unwinds through function
    /// calls and imports, innermost first.
    pub trace: Vec<String>,
}

impl PohError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            file: String::from("<stdin>"),
            span: None,
            trace: Vec::new(),
        }
    }

    /// Syntax error raised by the parser.
    pub fn parse_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Parse, "E_PARSE", message).at(span)
    }

    /// Runtime error (during evaluation)
    pub fn runtime_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, "E_RUNTIME", message)
    }

    /// Type error (invalid operation / operand types)
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, "E_TYPE", message)
    }

    /// Reference error (undefined variable or function)
    pub fn reference_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, "E_REFERENCE", message)
    }

    /// Wrong number of arguments for a call.
    pub fn arity_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, "E_ARITY", message)
    }

    /// Out-of-range index or missing key.
    pub fn index_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, "E_INDEX", message)
    }

    /// Mutation of a strict-immutable collection.
    pub fn immutable_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, "E_IMMUTABLE", message)
    }

    pub fn zero_division() -> Self {
        Self::new(
            ErrorKind::Runtime,
            "E_ZERO_DIVISION",
            "Oops! You tried to divide by zero. That's not allowed.",
        )
    }

    /// Missing file or circular import.
    pub fn import_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, "E_IMPORT", message)
    }

    /// Attach the source location (builder-style).
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a location only if none was recorded yet.
    pub fn or_at(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// Attribute the error to a file (builder-style).
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Records an outer call site while the error crosses a boundary.
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.trace.push(frame.into());
        self
    }

    pub fn is_parse(&self) -> bool {
        self.kind == ErrorKind::Parse
    }
}

/// One line for the failure, then one indented line per call-site frame.
impl fmt::Display for PohError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", location_prefix(&self.file, self.span), self.message)?;
        for frame in &self.trace {
            write!(f, "\n  {frame}")?;
        }
        Ok(())
    }
}

impl std::error::Error for PohError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_line_and_column_when_known() {
        let err = PohError::zero_division().at(Span::at(1, 7)).in_file("calc.poh");
        assert_eq!(
            err.to_string(),
            "[calc.poh: Line 1: Col 7] Oops! You tried to divide by zero. That's not allowed."
        );
    }

    #[test]
    fn display_falls_back_to_line_only_and_file_only() {
        let err = PohError::runtime_error("boom").at(Span::line(3));
        assert_eq!(err.to_string(), "[<stdin>: Line 3] boom");

        let err = PohError::import_error("missing").in_file("main.poh");
        assert_eq!(err.to_string(), "[main.poh] missing");
    }

    #[test]
    fn display_lists_call_frames_innermost_first() {
        let err = PohError::zero_division()
            .at(Span::line(2))
            .in_file("main.poh")
            .with_frame("in function 'half' called at [main.poh: Line 5]")
            .with_frame("in function 'run' called at [main.poh: Line 7]");
        assert_eq!(
            err.to_string(),
            "[main.poh: Line 2] Oops! You tried to divide by zero. That's not allowed.\n  \
             in function 'half' called at [main.poh: Line 5]\n  \
             in function 'run' called at [main.poh: Line 7]"
        );
    }

    #[test]
    fn or_at_keeps_the_innermost_location() {
        let err = PohError::type_error("bad")
            .at(Span::at(4, 2))
            .or_at(Span::line(9));
        assert_eq!(err.span, Some(Span::at(4, 2)));
    }
}

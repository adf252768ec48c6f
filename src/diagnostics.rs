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

use std::fmt::Write as _;

use serde::Serialize;

use crate::error::PohError;
use crate::span::Span;

/// Formats the `[file: Line N: Col M]` prefix shared by errors, warnings
/// and debug traces. Missing parts are left out.
pub fn location_prefix(file: &str, span: Option<Span>) -> String {
    let mut prefix = format!("[{file}");
    if let Some(span) = span {
        let _ = write!(prefix, ": Line {}", span.line);
        if let Some(column) = span.column {
            let _ = write!(prefix, ": Col {column}");
        }
    }
    prefix.push(']');
    prefix
}

/// A non-fatal diagnostic, recorded in the order it was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub file: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub message: String,
}

impl Warning {
    pub fn new(file: impl Into<String>, span: Option<Span>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: span.map(|s| s.line),
            column: span.and_then(|s| s.column),
            message: message.into(),
        }
    }

    /// The line as written to the output sink.
    pub fn render(&self) -> String {
        let span = self.line.map(|line| Span {
            line,
            column: self.column,
        });
        format!("{} Warning: {}", location_prefix(&self.file, span), self.message)
    }
}

/// Picks the candidate closest to `name` by edit distance, if it is close
/// enough to be a plausible typo.
pub fn closest_name<'a, I>(name: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let name = name.to_lowercase();
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let distance = edit_distance(&name, &candidate.to_lowercase());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    let (candidate, distance) = best?;
    let threshold = (name.chars().count() / 3).max(2);
    if distance <= threshold {
        Some(candidate.to_string())
    } else {
        None
    }
}

/// `" Did you mean 'x'?"`, or nothing.
pub fn suggestion_hint<'a, I>(name: &str, candidates: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    closest_name(name, candidates)
        .map(|s| format!(" Did you mean '{s}'?"))
        .unwrap_or_default()
}

fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.chars().collect::<Vec<_>>();
    let b = b.chars().collect::<Vec<_>>();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev = (0..=b.len()).collect::<Vec<_>>();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.copy_from_slice(&curr);
    }

    prev[b.len()]
}

/// Responsible for rendering human-friendly, compiler-style diagnostics
/// for PohLang errors.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the error column using a caret (`^`) when it is known
/// - Lists the call sites the error unwound through
///
/// # Output Example
/// ```text
/// error[E_ZERO_DIVISION]: Oops! You tried to divide by zero. That's not allowed.
///   --> main.poh:3:7
///    |
///  3 | Write 5 / 0
///    |       ^
///    = in function 'f' called at [main.poh: Line 9]
/// ```
pub struct DiagnosticPrinter {
    /// Full source code of the file the error was raised in.
    source: String,

    /// Name of the source file, used for display only.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Renders the diagnostic into a string for the host to print.
    pub fn render(&self, error: &PohError) -> String {
        let mut out = format!("error[{}]: {}\n", error.code, error.message);

        match error.span {
            Some(Span { line, column }) => {
                let src_line = self.source.lines().nth(line.saturating_sub(1)).unwrap_or("");

                let _ = match column {
                    Some(column) => writeln!(out, "  --> {}:{}:{}", self.file_name, line, column),
                    None => writeln!(out, "  --> {}:{}", self.file_name, line),
                };
                out.push_str("   |\n");
                let _ = writeln!(out, "{:>3} | {}", line, src_line);

                if let Some(column) = column {
                    // Columns are fragment-relative; anchor them at the
                    // first non-blank character of the line.
                    let indent = src_line.len() - src_line.trim_start().len();
                    let pad = " ".repeat(indent + column.saturating_sub(1));
                    let _ = writeln!(out, "   | {pad}^");
                }
            }
            None => {
                let _ = writeln!(out, "  --> {}", self.file_name);
            }
        }

        for frame in &error.trace {
            let _ = writeln!(out, "   = {frame}");
        }

        out
    }
}

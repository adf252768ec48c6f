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

/// Leading words of the statement vocabulary, in the order suggestions
/// are offered for a misspelled statement.
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "write", "ask", "set", "increase", "decrease", "if", "while", "repeat", "make", "use",
    "import", "stop", "skip", "debug",
];

/// Determines whether a word starts a statement.
///
/// Matching is case-insensitive, the way the parser reads statements.
///
/// # PohLang Examples
/// ```text
/// Write    -> statement keyword
/// repeat   -> statement keyword
/// total    -> identifier
/// ```
pub fn is_statement_keyword(word: &str) -> bool {
    let lower = word.to_lowercase();
    STATEMENT_KEYWORDS.contains(&lower.as_str())
}

/// Words that evaluate to literals instead of variable lookups.
pub fn is_literal_word(word: &str) -> bool {
    matches!(word.to_lowercase().as_str(), "true" | "false" | "nothing")
}

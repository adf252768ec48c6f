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

/*!
 * Shared parser helpers:
 *  - token cursor methods for `ExprParser`
 *  - phrasal templates (regex captures that never look inside strings)
 *  - top-level splitting on commas and connective words
 *  - comment stripping and ordinal words
 */

use std::cell::RefCell;
use std::collections::HashMap;

use regex::Regex;

use crate::ast::BinaryOp;
use crate::lexer::token::{Token, TokenKind};
use crate::parser::expressions::ExprParser;

/* ============================================================================
 * Token Cursor
 * ============================================================================
 */

impl ExprParser {
    /// Attempts to match a symbolic operator and consume it if present.
    pub(crate) fn match_operator(&mut self, op: &str) -> bool {
        if self.peek().is_symbol(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Matches the first of several binary operators.
    pub(crate) fn match_binary(&mut self, ops: &[&str]) -> Option<BinaryOp> {
        for op in ops {
            if self.match_operator(op) {
                return BinaryOp::from_symbol(&self.previous().lexeme);
            }
        }
        None
    }

    /// Checks for a bare word (such as `at`) without consuming it.
    pub(crate) fn check_word(&self, word: &str) -> bool {
        self.peek().is_word(word)
    }

    /// Advances one token forward. The `Eof` token is never passed.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.current + 1)
    }

    /// Returns the previously consumed token.
    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }
}

/* ============================================================================
 * Phrasal Templates
 * ============================================================================
 */

thread_local! {
    static PATTERNS: RefCell<HashMap<String, Regex>> = RefCell::new(HashMap::new());
}

fn with_pattern<T>(pattern: &str, f: impl FnOnce(&Regex) -> T) -> Option<T> {
    PATTERNS.with(|cache| {
        let mut cache = cache.borrow_mut();
        if !cache.contains_key(pattern) {
            let re = Regex::new(pattern).ok()?;
            cache.insert(pattern.to_string(), re);
        }
        cache.get(pattern).map(f)
    })
}

/// Capture groups of a matched template, sliced from the original text.
#[derive(Debug)]
pub(crate) struct Captures<'a> {
    groups: Vec<Option<&'a str>>,
}

impl<'a> Captures<'a> {
    /// Trimmed text of group `i`; empty when the group did not take part.
    pub(crate) fn get(&self, i: usize) -> &'a str {
        self.groups.get(i).copied().flatten().unwrap_or("").trim()
    }

    pub(crate) fn has(&self, i: usize) -> bool {
        matches!(self.groups.get(i), Some(Some(_)))
    }
}

/// Matches `pattern` against `text` with string literal contents hidden,
/// so keywords inside quotes never split a phrase.
pub(crate) fn template<'a>(pattern: &str, text: &'a str) -> Option<Captures<'a>> {
    let masked = mask_strings(text);
    with_pattern(pattern, |re| {
        let caps = re.captures(&masked)?;
        let mut groups = Vec::with_capacity(caps.len());
        for group in caps.iter() {
            match group {
                Some(m) => groups.push(Some(text.get(m.range())?)),
                None => groups.push(None),
            }
        }
        Some(Captures { groups })
    })
    .flatten()
}

/// Splits `text` once around the first standalone `keyword` outside
/// strings, e.g. `split_keyword("x to 5", "to") == Some(("x", "5"))`.
pub(crate) fn split_keyword<'a>(text: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    let pattern = format!(r"(?is)^(.*?)\s+{keyword}\s+(.*)$");
    let caps = template(&pattern, text)?;
    Some((caps.get(1), caps.get(2)))
}

/// Replaces every match of `pattern` that lies outside string literals.
pub(crate) fn replace_outside(text: &str, pattern: &str, replacement: &str) -> String {
    let masked = mask_strings(text);
    with_pattern(pattern, |re| {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in re.find_iter(&masked) {
            out.push_str(text.get(last..m.start()).unwrap_or(""));
            out.push_str(replacement);
            last = m.end();
        }
        out.push_str(text.get(last..).unwrap_or(""));
        out
    })
    .unwrap_or_else(|| text.to_string())
}

/// True when `pattern` matches somewhere outside string literals.
pub(crate) fn matches_outside(text: &str, pattern: &str) -> bool {
    let masked = mask_strings(text);
    with_pattern(pattern, |re| re.is_match(&masked)).unwrap_or(false)
}

/// Splits once at the first `ch` outside string literals.
pub(crate) fn split_char_outside(text: &str, ch: char) -> Option<(&str, &str)> {
    let pos = mask_strings(text).find(ch)?;
    Some((
        text.get(..pos)?.trim(),
        text.get(pos + ch.len_utf8()..)?.trim(),
    ))
}

/// Splits on commas that are outside strings and parentheses. Empty
/// pieces are dropped.
pub(crate) fn split_top_level(text: &str) -> Vec<&str> {
    let masked = mask_strings(text);
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, b) in masked.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                pieces.push(text.get(start..i).unwrap_or(""));
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(text.get(start..).unwrap_or(""));

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Splits on a connective word (`and`, `or`) outside strings and
/// parentheses.
pub(crate) fn split_connective<'a>(text: &'a str, word: &str) -> Vec<&'a str> {
    let masked = mask_strings(text);
    let pattern = format!(r"(?i)\s+{word}\s+");
    let bounds = with_pattern(&pattern, |re| {
        re.find_iter(&masked)
            .filter(|m| paren_depth(&masked[..m.start()]) == 0)
            .map(|m| (m.start(), m.end()))
            .collect::<Vec<_>>()
    })
    .unwrap_or_default();

    let mut pieces = Vec::new();
    let mut last = 0;
    for (start, end) in bounds {
        pieces.push(text.get(last..start).unwrap_or("").trim());
        last = end;
    }
    pieces.push(text.get(last..).unwrap_or("").trim());
    pieces
}

fn paren_depth(text: &str) -> i32 {
    text.bytes().fold(0, |depth, b| match b {
        b'(' => depth + 1,
        b')' => depth - 1,
        _ => depth,
    })
}

/// Replaces the contents of every string literal with filler of the same
/// byte length. Quotes stay in place, so byte offsets in the masked text
/// are valid in the original.
pub(crate) fn mask_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if !in_string {
            out.push(ch);
            if ch == '"' {
                in_string = true;
            }
            continue;
        }

        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            in_string = false;
            out.push('"');
            continue;
        }
        out.extend(std::iter::repeat('_').take(ch.len_utf8()));
    }
    out
}

/* ============================================================================
 * Lines
 * ============================================================================
 */

/// Strips a `#` comment that starts outside a string literal.
///
/// Returns the kept text and, if a literal is still open at the end of the
/// line, the 1-based column of its opening quote.
pub(crate) fn strip_comment(line: &str) -> (&str, Option<usize>) {
    let mut in_string = false;
    let mut escaped = false;
    let mut open_quote = 0;

    for (col, (i, ch)) in line.char_indices().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
            open_quote = col + 1;
        } else if ch == '#' {
            return (&line[..i], None);
        }
    }

    (line, in_string.then_some(open_quote))
}

/// Reads an ordinal index phrase: `2nd`, `3rd`, `first` ... `tenth`.
pub(crate) fn ordinal(phrase: &str) -> Option<i64> {
    const WORDS: [&str; 10] = [
        "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
        "tenth",
    ];

    let lower = phrase.trim().to_lowercase();
    if let Some(pos) = WORDS.iter().position(|w| *w == lower) {
        return Some(pos as i64 + 1);
    }

    let digits = lower
        .strip_suffix("st")
        .or_else(|| lower.strip_suffix("nd"))
        .or_else(|| lower.strip_suffix("rd"))
        .or_else(|| lower.strip_suffix("th"))?;
    digits.parse().ok()
}

pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

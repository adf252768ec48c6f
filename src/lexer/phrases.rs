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
 * Phrasal Normalizer
 * ------------------
 *
 * Rewrites English connectives into the symbolic operators the tokenizer
 * understands:
 *
 * ```text
 * x is greater than 3 and y is not 0   →   x  >  3  &&  y  !=  0
 * price times 2 plus tax              →   price  *  2  +  tax
 * ```
 *
 * Rewrites never touch the inside of string literals.
 */

use std::sync::OnceLock;

use regex::Regex;

/// Multi-word comparison phrases, longest first.
const COMPARISON_PHRASES: &[(&str, &str)] = &[
    (r"(?i)\bis not\b", " != "),
    (r"(?i)\bis at least\b", " >= "),
    (r"(?i)\bis at most\b", " <= "),
    (r"(?i)\bis greater than\b", " > "),
    (r"(?i)\bis less than\b", " < "),
];

/// Single-word connectives, applied after the predicate shorthand check.
const CONNECTIVES: &[(&str, &str)] = &[
    (r"(?i)\bis\b", " == "),
    (r"(?i)\band\b", " && "),
    (r"(?i)\bor\b", " || "),
    (r"(?i)\bnot\b", " ! "),
];

const ARITHMETIC_PHRASES: &[(&str, &str)] = &[
    (r"(?i)\bdivided by\b", " / "),
    (r"(?i)\btimes\b", " * "),
    (r"(?i)\bplus\b", " + "),
    (r"(?i)\bminus\b", " - "),
];

const PREDICATE_SUFFIX: &str = r"(?i)\bis\s+(even|odd|positive|negative)\s*$";

type Rules = Vec<(Regex, &'static str)>;

struct Phrasebook {
    comparisons: Rules,
    connectives: Rules,
    arithmetic: Rules,
    predicate: Option<Regex>,
}

fn compile(rules: &[(&str, &'static str)]) -> Rules {
    rules
        .iter()
        .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, *replacement)))
        .collect()
}

fn phrasebook() -> &'static Phrasebook {
    static BOOK: OnceLock<Phrasebook> = OnceLock::new();
    BOOK.get_or_init(|| Phrasebook {
        comparisons: compile(COMPARISON_PHRASES),
        connectives: compile(CONNECTIVES),
        arithmetic: compile(ARITHMETIC_PHRASES),
        predicate: Regex::new(PREDICATE_SUFFIX).ok(),
    })
}

/// The result of normalizing a boolean condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `<operand> is even|odd|positive|negative`. The operand is returned
    /// as written so phrasal expressions still apply to it.
    Predicate { operand: String, predicate: String },

    /// A symbolic expression ready for tokenizing.
    Expression(String),
}

/// Normalizes a condition fragment.
///
/// Order matters: multi-word comparisons first, then the trailing
/// `is <predicate>` shorthand, then the generic `is`/`and`/`or`/`not`
/// connectives, then the arithmetic phrases.
pub fn normalize_condition(src: &str) -> Condition {
    let book = phrasebook();
    let text = rewrite_outside_strings(src.trim(), &book.comparisons);

    if let Some((operand, predicate)) = predicate_suffix(&text, book) {
        return Condition::Predicate { operand, predicate };
    }

    let text = rewrite_outside_strings(&text, &book.connectives);
    Condition::Expression(rewrite_outside_strings(&text, &book.arithmetic))
}

/// Rewrites `divided by`, `times`, `plus` and `minus` into operators.
pub fn normalize_arithmetic(src: &str) -> String {
    rewrite_outside_strings(src.trim(), &phrasebook().arithmetic)
}

fn predicate_suffix(text: &str, book: &Phrasebook) -> Option<(String, String)> {
    let re = book.predicate.as_ref()?;
    let segments = split_segments(text);
    let (quoted, last) = segments.last()?;
    if *quoted {
        return None;
    }

    let caps = re.captures(last)?;
    let whole = caps.get(0)?;
    let predicate = caps.get(1)?.as_str().to_lowercase();

    let offset = text.len() - last.len() + whole.start();
    let operand = text[..offset].trim().to_string();
    if operand.is_empty() {
        return None;
    }
    Some((operand, predicate))
}

fn rewrite_outside_strings(src: &str, rules: &Rules) -> String {
    split_segments(src)
        .into_iter()
        .map(|(quoted, segment)| {
            if quoted {
                segment
            } else {
                rules.iter().fold(segment, |acc, (re, replacement)| {
                    re.replace_all(&acc, *replacement).into_owned()
                })
            }
        })
        .collect()
}

/// Splits text into alternating unquoted / quoted segments. Quoted
/// segments keep their delimiters and escapes.
fn split_segments(src: &str) -> Vec<(bool, String)> {
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut in_string = false;
    let mut escaped = false;

    for ch in src.chars() {
        if in_string {
            buf.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                segments.push((true, std::mem::take(&mut buf)));
                in_string = false;
            }
        } else if ch == '"' {
            if !buf.is_empty() {
                segments.push((false, std::mem::take(&mut buf)));
            }
            buf.push(ch);
            in_string = true;
        } else {
            buf.push(ch);
        }
    }

    if !buf.is_empty() {
        segments.push((in_string, buf));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squash(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn expression(src: &str) -> String {
        match normalize_condition(src) {
            Condition::Expression(text) => squash(&text),
            other => panic!("expected expression, got {other:?}"),
        }
    }

    #[test]
    fn multi_word_comparisons_win_over_plain_is() {
        assert_eq!(expression("x is not 3"), "x != 3");
        assert_eq!(expression("x is at least 3"), "x >= 3");
        assert_eq!(expression("x is at most 3"), "x <= 3");
        assert_eq!(expression("x is greater than 3"), "x > 3");
        assert_eq!(expression("x is less than 3"), "x < 3");
        assert_eq!(expression("x is 3"), "x == 3");
    }

    #[test]
    fn connectives_become_logic_operators() {
        assert_eq!(
            expression("a is 1 and not b or c"),
            "a == 1 && ! b || c"
        );
    }

    #[test]
    fn trailing_predicate_is_recognized() {
        match normalize_condition("n plus 1 is even") {
            Condition::Predicate { operand, predicate } => {
                assert_eq!(operand, "n plus 1");
                assert_eq!(predicate, "even");
            }
            other => panic!("expected predicate, got {other:?}"),
        }
    }

    #[test]
    fn rewrites_skip_string_literals() {
        assert_eq!(
            expression(r#"name is "Tom and Jerry""#),
            r#"name == "Tom and Jerry""#
        );
        assert_eq!(squash(&normalize_arithmetic(r#""one plus one" plus 1"#)), r#""one plus one" + 1"#);
    }

    #[test]
    fn predicate_inside_a_string_is_not_a_predicate() {
        assert_eq!(expression(r#"word is "is even""#), r#"word == "is even""#);
    }

    #[test]
    fn arithmetic_phrases() {
        assert_eq!(
            squash(&normalize_arithmetic("a times 2 plus b divided by 4 minus 1")),
            "a * 2 + b / 4 - 1"
        );
    }
}

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
 * Expression grammar.
 *
 * A fragment is first offered to the phrasal templates (`random between`,
 * `Take the 2nd item from`, `keys of`, ...). Anything else is rewritten
 * by the normalizer and parsed by precedence:
 *
 * ```text
 * or → and → comparison → term → factor → unary → primary (+ postfix `at`)
 * ```
 */

use crate::ast::{BinaryOp, Expr, ExprKind, Literal, Predicate, Provenance, UnaryOp};
use crate::error::PohError;
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::{normalize_arithmetic, normalize_condition, tokenize, Condition};
use crate::parser::helpers::{
    matches_outside, ordinal, split_char_outside, split_connective, split_top_level, template,
};
use crate::span::Span;

/// Precedence parser over the tokens of one fragment.
pub struct ExprParser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
}

/// Parses a value expression.
pub fn parse_expression(src: &str, line: usize) -> Result<Expr, PohError> {
    let src = src.trim();
    if src.is_empty() {
        return Err(PohError::parse_error("Expected expression", Span::at(line, 1)));
    }

    if let Some(expr) = phrasal_expression(src, line)? {
        return Ok(expr);
    }

    ExprParser::new(&normalize_arithmetic(src), line).parse()
}

/// Parses a boolean condition (`If`, `While`).
///
/// `x is even and y is odd` splits on the connective first, because the
/// predicate shorthand only applies to a whole operand.
pub fn parse_condition(src: &str, line: usize) -> Result<Expr, PohError> {
    let src = src.trim();
    if src.is_empty() {
        return Err(PohError::parse_error("Expected condition", Span::at(line, 1)));
    }

    if let Some(expr) = quantified(src, line)? {
        return Ok(expr);
    }

    if matches_outside(src, r"(?i)\bis\s+(even|odd|positive|negative)\s+(and|or)\b") {
        for (word, op) in [("or", BinaryOp::Or), ("and", BinaryOp::And)] {
            let parts = split_connective(src, word);
            if parts.len() > 1 {
                return fold_logic(&parts, op, line);
            }
        }
    }

    if !matches_outside(src, r"(?i)\b(is|and|or|not)\b") {
        if let Some(expr) = phrasal_expression(src, line)? {
            return Ok(expr);
        }
    }

    match normalize_condition(src) {
        Condition::Predicate { operand, predicate } => {
            let operand = parse_expression(&operand, line)?;
            let predicate = Predicate::from_word(&predicate).ok_or_else(|| {
                PohError::parse_error(format!("Unknown predicate '{predicate}'"), Span::line(line))
            })?;
            Ok(Expr::new(
                ExprKind::Predicate {
                    predicate,
                    operand: operand.boxed(),
                },
                Span::at(line, 1),
            ))
        }
        Condition::Expression(text) => ExprParser::new(&text, line).parse(),
    }
}

fn fold_logic(parts: &[&str], op: BinaryOp, line: usize) -> Result<Expr, PohError> {
    let mut iter = parts.iter();
    let first = iter
        .next()
        .ok_or_else(|| PohError::parse_error("Expected condition", Span::line(line)))?;
    let mut expr = parse_condition(first, line)?;

    for part in iter {
        let right = parse_condition(part, line)?;
        let span = expr.span;
        expr = Expr::new(
            ExprKind::Binary {
                left: expr.boxed(),
                op,
                right: right.boxed(),
            },
            span,
        );
    }
    Ok(expr)
}

/// The index of an Nth-item phrase: an ordinal word, or any expression.
pub(crate) fn nth_index(src: &str, line: usize) -> Result<Expr, PohError> {
    match ordinal(src) {
        Some(n) => Ok(Expr::new(
            ExprKind::Literal(Literal::Int(n)),
            Span::at(line, 1),
        )),
        None => parse_expression(src, line),
    }
}

/* ============================================================================
 * Phrasal Forms
 * ============================================================================
 */

fn quantified(src: &str, line: usize) -> Result<Option<Expr>, PohError> {
    let span = Span::at(line, 1);

    if let Some(c) = template(r"(?i)^all\s+(.+?)\s+are\s+(even|odd|positive|negative)$", src) {
        if let Some(predicate) = Predicate::from_word(c.get(2)) {
            let collection = parse_expression(c.get(1), line)?.boxed();
            return Ok(Some(Expr::new(
                ExprKind::AllPredicate {
                    collection,
                    predicate,
                },
                span,
            )));
        }
    }

    if let Some(c) = template(r"(?i)^any\s+(.+?)\s+is\s+(even|odd|positive|negative)$", src) {
        if let Some(predicate) = Predicate::from_word(c.get(2)) {
            let collection = parse_expression(c.get(1), line)?.boxed();
            return Ok(Some(Expr::new(
                ExprKind::AnyPredicate {
                    collection,
                    predicate,
                },
                span,
            )));
        }
    }

    Ok(None)
}

fn call(name: &str, arg: Expr, span: Span) -> Expr {
    Expr::new(
        ExprKind::Call {
            name: name.to_string(),
            args: vec![arg],
        },
        span,
    )
}

/// Whole-fragment English forms. `None` means the fragment is ordinary
/// symbolic syntax.
fn phrasal_expression(src: &str, line: usize) -> Result<Option<Expr>, PohError> {
    let span = Span::at(line, 1);
    let sub = |text: &str| parse_expression(text, line).map(Expr::boxed);

    if let Some(c) = template(r"(?i)^take\s+the\s+value\s+of\s+(.+?)\s+from\s+(.+)$", src) {
        let kind = ExprKind::At {
            container: sub(c.get(2))?,
            key: sub(c.get(1))?,
        };
        return Ok(Some(Expr::new(kind, span)));
    }

    if let Some(c) = template(r"(?i)^take\s+the\s+(.+?)\s+item\s+from\s+(.+)$", src) {
        let kind = ExprKind::NthItem {
            index: nth_index(c.get(1), line)?.boxed(),
            container: sub(c.get(2))?,
            phrase: format!("the {} item", c.get(1)),
        };
        return Ok(Some(Expr::new(kind, span)));
    }

    if let Some(c) = template(r"(?i)^random\s+decimal\s+between\s+(.+?)\s+(?:and|to)\s+(.+)$", src) {
        let kind = ExprKind::RandomFloat {
            low: sub(c.get(1))?,
            high: sub(c.get(2))?,
        };
        return Ok(Some(Expr::new(kind, span)));
    }

    if let Some(c) = template(r"(?i)^random\s+between\s+(.+?)\s+(?:and|to)\s+(.+)$", src) {
        let kind = ExprKind::RandomInt {
            low: sub(c.get(1))?,
            high: sub(c.get(2))?,
        };
        return Ok(Some(Expr::new(kind, span)));
    }

    if let Some(c) = template(r"(?i)^random\s+from\s+(.+)$", src) {
        return Ok(Some(Expr::new(ExprKind::RandomFrom(sub(c.get(1))?), span)));
    }

    if let Some(c) = template(r"(?i)^contains\s+(.+?)\s+in\s+(.+)$", src) {
        let kind = ExprKind::Contains {
            collection: sub(c.get(2))?,
            needle: sub(c.get(1))?,
        };
        return Ok(Some(Expr::new(kind, span)));
    }

    if let Some(expr) = quantified(src, line)? {
        return Ok(Some(expr));
    }

    if let Some(c) = template(r"(?i)^list\s+contains\b\s*(.*)$", src) {
        let items = split_top_level(c.get(1))
            .into_iter()
            .map(|item| parse_expression(item, line))
            .collect::<Result<Vec<_>, _>>()?;
        let kind = ExprKind::List {
            items,
            provenance: Provenance::Legacy,
        };
        return Ok(Some(Expr::new(kind, span)));
    }

    if let Some(c) = template(r"(?i)^dictionary\s+contains\b\s*(.*)$", src) {
        let mut entries = Vec::new();
        for entry in split_top_level(c.get(1)) {
            let (key, value) = split_char_outside(entry, ':').ok_or_else(|| {
                PohError::parse_error("dictionary entry must be 'key: value'", Span::line(line))
            })?;
            entries.push((parse_expression(key, line)?, parse_expression(value, line)?));
        }
        let kind = ExprKind::Dict {
            entries,
            provenance: Provenance::Legacy,
        };
        return Ok(Some(Expr::new(kind, span)));
    }

    if let Some(c) = template(r"(?i)^keys\s+of\s+(.+)$", src) {
        return Ok(Some(Expr::new(ExprKind::KeysOf(sub(c.get(1))?), span)));
    }

    if let Some(c) = template(r"(?i)^values\s+of\s+(.+)$", src) {
        return Ok(Some(Expr::new(ExprKind::ValuesOf(sub(c.get(1))?), span)));
    }

    if let Some(c) = template(r"(?i)^parse\s+json\s+from\s+(.+)$", src) {
        return Ok(Some(Expr::new(ExprKind::ParseJson(sub(c.get(1))?), span)));
    }

    if let Some(c) = template(r"(?i)^convert\s+to\s+(pretty\s+)?json\s+(.+)$", src) {
        let kind = ExprKind::ToJson {
            value: sub(c.get(2))?,
            pretty: c.has(1),
        };
        return Ok(Some(Expr::new(kind, span)));
    }

    const ALIASES: &[(&str, &str)] = &[
        (r"(?i)^total\s+of\s+(.+)$", "sum"),
        (r"(?i)^smallest\s+in\s+(.+)$", "min"),
        (r"(?i)^largest\s+in\s+(.+)$", "max"),
        (r"(?i)^(?:count|size)\s+of\s+(.+)$", "length"),
    ];
    for (pattern, builtin) in ALIASES {
        if let Some(c) = template(pattern, src) {
            let arg = parse_expression(c.get(1), line)?;
            return Ok(Some(call(builtin, arg, span)));
        }
    }

    Ok(None)
}

/* ============================================================================
 * Precedence Parser
 * ============================================================================
 */

impl ExprParser {
    pub fn new(src: &str, line: usize) -> Self {
        Self {
            tokens: tokenize(src, line),
            current: 0,
        }
    }

    /// Parses the whole fragment. Tokens left over after a complete
    /// expression are an error.
    pub fn parse(&mut self) -> Result<Expr, PohError> {
        let expr = self.expression()?;

        if !self.is_at_end() {
            let token = self.peek();
            if token.kind == TokenKind::Unknown {
                return Err(unknown_token(token));
            }
            return Err(PohError::parse_error(
                format!("Unexpected '{token}' in expression"),
                token.span(),
            ));
        }
        Ok(expr)
    }

    fn expression(&mut self) -> Result<Expr, PohError> {
        self.logical_or()
    }

    fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        let span = left.span;
        Expr::new(
            ExprKind::Binary {
                left: left.boxed(),
                op,
                right: right.boxed(),
            },
            span,
        )
    }

    /// `a || b`
    fn logical_or(&mut self) -> Result<Expr, PohError> {
        let mut expr = self.logical_and()?;

        while self.match_operator("||") {
            let right = self.logical_and()?;
            expr = Self::binary(expr, BinaryOp::Or, right);
        }

        Ok(expr)
    }

    /// `a && b`
    fn logical_and(&mut self) -> Result<Expr, PohError> {
        let mut expr = self.comparison()?;

        while self.match_operator("&&") {
            let right = self.comparison()?;
            expr = Self::binary(expr, BinaryOp::And, right);
        }

        Ok(expr)
    }

    /// Equality and ordering: `==`, `!=`, `>`, `>=`, `<`, `<=`
    fn comparison(&mut self) -> Result<Expr, PohError> {
        let mut expr = self.term()?;

        while let Some(op) = self.match_binary(&["==", "!=", ">=", "<=", ">", "<"]) {
            let right = self.term()?;
            expr = Self::binary(expr, op, right);
        }

        Ok(expr)
    }

    /// Addition and subtraction.
    fn term(&mut self) -> Result<Expr, PohError> {
        let mut expr = self.factor()?;

        while let Some(op) = self.match_binary(&["+", "-"]) {
            let right = self.factor()?;
            expr = Self::binary(expr, op, right);
        }

        Ok(expr)
    }

    /// Multiplication and division.
    fn factor(&mut self) -> Result<Expr, PohError> {
        let mut expr = self.unary()?;

        while let Some(op) = self.match_binary(&["*", "/"]) {
            let right = self.unary()?;
            expr = Self::binary(expr, op, right);
        }

        Ok(expr)
    }

    /// Prefix `+`, `-` and `!`.
    fn unary(&mut self) -> Result<Expr, PohError> {
        let op = match self.peek() {
            t if t.is_symbol("+") => Some(UnaryOp::Plus),
            t if t.is_symbol("-") => Some(UnaryOp::Minus),
            t if t.is_symbol("!") => Some(UnaryOp::Not),
            _ => None,
        };

        match op {
            Some(op) => {
                let span = self.advance().span();
                let operand = self.unary()?;
                Ok(Expr::new(
                    ExprKind::Unary {
                        op,
                        operand: operand.boxed(),
                    },
                    span,
                ))
            }
            None => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, PohError> {
        let token = self.advance();

        let expr = match token.kind {
            TokenKind::Number => Expr::new(ExprKind::Literal(number(&token.lexeme)), token.span()),

            TokenKind::String => Expr::new(
                ExprKind::Literal(Literal::Text(token.lexeme.clone())),
                token.span(),
            ),

            TokenKind::Identifier => {
                if self.match_operator("(") {
                    let args = self.arguments()?;
                    Expr::new(
                        ExprKind::Call {
                            name: token.lexeme.clone(),
                            args,
                        },
                        token.span(),
                    )
                } else {
                    Expr::new(ExprKind::Identifier(token.lexeme.clone()), token.span())
                }
            }

            TokenKind::Symbol if token.lexeme == "(" => {
                let inner = self.expression()?;
                if !self.match_operator(")") {
                    return Err(PohError::parse_error(
                        "Expected ')' to close group",
                        self.peek().span(),
                    ));
                }
                inner
            }

            TokenKind::Unknown => return Err(unknown_token(&token)),

            TokenKind::Eof => {
                return Err(PohError::parse_error("Expected expression", token.span()));
            }

            TokenKind::Symbol => {
                return Err(PohError::parse_error(
                    format!("Expected expression before '{}'", token.lexeme),
                    token.span(),
                ));
            }
        };

        self.postfix_at(expr)
    }

    /// Comma-separated call arguments; the `(` is already consumed.
    fn arguments(&mut self) -> Result<Vec<Expr>, PohError> {
        let mut args = Vec::new();
        if self.match_operator(")") {
            return Ok(args);
        }

        loop {
            args.push(self.expression()?);
            if self.match_operator(")") {
                return Ok(args);
            }
            if !self.match_operator(",") {
                return Err(PohError::parse_error(
                    "Expected ',' or ')' in call arguments",
                    self.peek().span(),
                ));
            }
        }
    }

    /// `expr at key at key ...`
    ///
    /// The key is a single literal, identifier or a parenthesized
    /// expression, so `d at "a" + 1` reads as `(d at "a") + 1`.
    fn postfix_at(&mut self, mut expr: Expr) -> Result<Expr, PohError> {
        while self.check_word("at") && self.peek_next().is_some_and(|t| t.kind != TokenKind::Eof) {
            self.advance();
            let token = self.advance();

            let key = match token.kind {
                TokenKind::Number => Expr::new(ExprKind::Literal(number(&token.lexeme)), token.span()),
                TokenKind::String => Expr::new(
                    ExprKind::Literal(Literal::Text(token.lexeme.clone())),
                    token.span(),
                ),
                TokenKind::Identifier => {
                    Expr::new(ExprKind::Identifier(token.lexeme.clone()), token.span())
                }
                TokenKind::Symbol if token.lexeme == "(" => {
                    let inner = self.expression()?;
                    if !self.match_operator(")") {
                        return Err(PohError::parse_error(
                            "Expected ')' to close key group",
                            self.peek().span(),
                        ));
                    }
                    inner
                }
                _ => {
                    return Err(PohError::parse_error("Invalid key after 'at'", token.span()));
                }
            };

            let span = expr.span;
            expr = Expr::new(
                ExprKind::At {
                    container: expr.boxed(),
                    key: key.boxed(),
                },
                span,
            );
        }

        Ok(expr)
    }
}

fn unknown_token(token: &Token) -> PohError {
    if token.lexeme == "\"" {
        PohError::parse_error("Unterminated string literal", token.span())
    } else {
        PohError::parse_error(
            format!("Unexpected character '{}'", token.lexeme),
            token.span(),
        )
    }
}

fn number(lexeme: &str) -> Literal {
    if !lexeme.contains('.') {
        if let Ok(n) = lexeme.parse::<i64>() {
            return Literal::Int(n);
        }
    }
    Literal::Float(lexeme.parse().unwrap_or(f64::INFINITY))
}

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

use std::rc::Rc;

use crate::ast::{
    AskKind, Expr, ExprKind, FunctionDecl, Literal, Param, Provenance, Stmt, StmtKind,
};
use crate::diagnostics::suggestion_hint;
use crate::error::PohError;
use crate::lexer::keywords::{is_statement_keyword, STATEMENT_KEYWORDS};
use crate::parser::expressions::{nth_index, parse_condition, parse_expression};
use crate::parser::helpers::{
    is_identifier, matches_outside, replace_outside, split_char_outside, split_keyword,
    split_top_level, template,
};
use crate::parser::parser::Parser;
use crate::span::Span;

impl Parser {
    /// Parses the statement starting at the current line, consuming the
    /// whole block for block forms.
    ///
    /// Forms are tried from the most specific to the most general:
    /// phrasal statements, block forms, single-line statements, inline
    /// blocks and finally the unknown-statement fallback.
    pub fn statement(&mut self) -> Result<Stmt, PohError> {
        let Some(source) = self.next_line() else {
            let line = self.lines.last().map_or(1, |l| l.number);
            return Err(PohError::parse_error("Expected statement", Span::line(line)));
        };
        let text = source.text.as_str();
        let line = source.number;

        // ------------------------------------------------------------
        // PHRASAL COLLECTION / INDEXING STATEMENTS
        // ------------------------------------------------------------
        if let Some(stmt) = phrasal_statement(text, line)? {
            return Ok(stmt);
        }

        // ------------------------------------------------------------
        // BLOCK FORMS (no inline `Write` on the opening line)
        // ------------------------------------------------------------
        if !matches_outside(text, r"(?i)\swrite\s") {
            if let Some(stmt) = self.block_statement(text, line)? {
                return Ok(stmt);
            }
        }

        // ------------------------------------------------------------
        // SINGLE-LINE STATEMENTS
        // ------------------------------------------------------------
        if let Some(kind) = single_line(text, line)? {
            return Ok(Stmt::new(kind, line));
        }

        // ------------------------------------------------------------
        // INLINE BLOCKS: If / While / Repeat / Make ... Write ...
        // ------------------------------------------------------------
        if let Some(kind) = inline_block(text, line)? {
            return Ok(Stmt::new(kind, line));
        }

        Err(unknown_statement(text, line))
    }

    fn block_statement(&mut self, text: &str, line: usize) -> Result<Option<Stmt>, PohError> {
        if let Some(c) = template(r"(?i)^if\s+(.+)$", text) {
            let condition = parse_condition(c.get(1), line)?;
            let unclosed = "If block not closed with End/End If";
            let (then_body, otherwise) = self.block_body(line, unclosed, Some("If"), true)?;
            let else_body = if otherwise {
                Some(self.block_body(line, unclosed, Some("If"), false)?.0)
            } else {
                None
            };
            let kind = StmtKind::If {
                condition,
                then_body,
                else_body,
            };
            return Ok(Some(Stmt::new(kind, line)));
        }

        if let Some(c) = template(r"(?i)^while\s+(.+)$", text) {
            let condition = parse_condition(c.get(1), line)?;
            let (body, _) = self.block_body(
                line,
                "While block not closed with End/End While",
                Some("While"),
                false,
            )?;
            return Ok(Some(Stmt::new(StmtKind::While { condition, body }, line)));
        }

        if let Some(c) = template(r"(?i)^repeat\s+(.+)$", text) {
            let count = repeat_count(c.get(1), line)?;
            let (body, _) = self.block_body(
                line,
                "Repeat block not closed with End/End Repeat",
                Some("Repeat"),
                false,
            )?;
            return Ok(Some(Stmt::new(StmtKind::Repeat { count, body }, line)));
        }

        if text.eq_ignore_ascii_case("begin") {
            let (body, _) =
                self.block_body(line, "Block starting at Begin not closed with End", None, false)?;
            return Ok(Some(Stmt::new(StmtKind::Block(body), line)));
        }

        if let Some(c) = template(r"(?i)^make\s+(?:function\s+)?(.+)$", text) {
            let (name, params) = function_signature(c.get(1), line)?;
            let (body, _) = self.block_body(line, "Function block not closed with End", None, false)?;
            let decl = FunctionDecl {
                name,
                params,
                body,
                line,
            };
            return Ok(Some(Stmt::new(StmtKind::Function(Rc::new(decl)), line)));
        }

        Ok(None)
    }

    /// Collects statements up to `End` or `End <closer>`.
    ///
    /// With `allow_otherwise`, a bare `Otherwise` line also ends the body;
    /// the returned flag tells which terminator was found.
    fn block_body(
        &mut self,
        open_line: usize,
        unclosed: &str,
        closer: Option<&str>,
        allow_otherwise: bool,
    ) -> Result<(Vec<Stmt>, bool), PohError> {
        let mut body = Vec::new();

        loop {
            let Some(next) = self.peek_line() else {
                return Err(PohError::parse_error(unclosed, Span::line(open_line)));
            };

            let words = next.text.split_whitespace().collect::<Vec<_>>().join(" ");
            let lower = words.to_lowercase();

            let closes = lower == "end"
                || closer.is_some_and(|c| lower == format!("end {}", c.to_lowercase()));
            if closes {
                self.current += 1;
                return Ok((body, false));
            }

            if allow_otherwise && lower == "otherwise" {
                self.current += 1;
                return Ok((body, true));
            }

            if lower.starts_with("end ") {
                let expected = match closer {
                    Some(c) => format!("'End' or 'End {c}'"),
                    None => "'End'".to_string(),
                };
                return Err(PohError::parse_error(
                    format!("Mismatched '{}'; expected {expected}", next.text),
                    Span::line(next.number),
                ));
            }

            body.push(self.statement()?);
        }
    }
}

/* ============================================================================
 * Phrasal Statements
 * ============================================================================
 */

fn phrasal_statement(text: &str, line: usize) -> Result<Option<Stmt>, PohError> {
    let expr = |src: &str| parse_expression(src, line);
    let span = Span::at(line, 1);

    // Make a [mutable] list of 1, 2, and 3
    if let Some(c) = template(r"(?i)^make\s+a\s+(mutable\s+)?list\s+of(?:\s+(.*))?$", text) {
        let items_src = replace_outside(c.get(2), r"(?i)\s+and\s+", ",");
        let items = split_top_level(&items_src)
            .into_iter()
            .map(expr)
            .collect::<Result<Vec<_>, _>>()?;
        let value = Expr::new(
            ExprKind::List {
                items,
                provenance: provenance(c.has(1)),
            },
            span,
        );
        return Ok(Some(set_it(value, line)));
    }

    // Make a [mutable] dictionary with "a" as 1 and "b" as 2
    if let Some(c) = template(
        r"(?i)^make\s+a\s+(mutable\s+)?dictionary(?:\s+with\s+(.+))?$",
        text,
    ) {
        let pairs_src = replace_outside(c.get(2), r"(?i)\s+and\s+", ",");
        let mut entries = Vec::new();
        for pair in split_top_level(&pairs_src) {
            let entry = template(r"(?i)^(.+?)\s+as\s+(.+)$", pair).ok_or_else(|| {
                PohError::parse_error("dictionary entry must be '<key> as <value>'", Span::line(line))
            })?;
            entries.push((expr(entry.get(1))?, expr(entry.get(2))?));
        }
        let value = Expr::new(
            ExprKind::Dict {
                entries,
                provenance: provenance(c.has(1)),
            },
            span,
        );
        return Ok(Some(set_it(value, line)));
    }

    // Set the 2nd item in xs to 5
    if let Some(c) = template(r"(?i)^set\s+the\s+(.+?)\s+item\s+in\s+(.+?)\s+to\s+(.+)$", text) {
        let kind = StmtKind::SetNthItem {
            index: nth_index(c.get(1), line)?,
            container: expr(c.get(2))?,
            value: expr(c.get(3))?,
            phrase: format!("the {} item", c.get(1)),
        };
        return Ok(Some(Stmt::new(kind, line)));
    }

    if let Some(c) = template(r"(?i)^remove\s+the\s+last\s+item\s+from\s+(.+)$", text) {
        return Ok(Some(Stmt::new(StmtKind::RemoveLastItem(expr(c.get(1))?), line)));
    }

    if let Some(c) = template(r"(?i)^tell\s+me\s+the\s+length\s+of\s+(.+)$", text) {
        let length = Expr::new(
            ExprKind::Call {
                name: "length".to_string(),
                args: vec![expr(c.get(1))?],
            },
            span,
        );
        return Ok(Some(Stmt::new(StmtKind::Write(length), line)));
    }

    if let Some(c) = template(r"(?i)^give\s+me\s+the\s+(keys|values)\s+of\s+(.+)$", text) {
        let target = expr(c.get(2))?.boxed();
        let kind = if c.get(1).eq_ignore_ascii_case("keys") {
            ExprKind::KeysOf(target)
        } else {
            ExprKind::ValuesOf(target)
        };
        return Ok(Some(Stmt::new(StmtKind::Write(Expr::new(kind, span)), line)));
    }

    if let Some(c) = template(r"(?i)^check\s+if\s+(.+?)\s+has\s+(.+)$", text) {
        let contains = Expr::new(
            ExprKind::Contains {
                collection: expr(c.get(1))?.boxed(),
                needle: expr(c.get(2))?.boxed(),
            },
            span,
        );
        return Ok(Some(Stmt::new(StmtKind::Write(contains), line)));
    }

    Ok(None)
}

fn provenance(mutable: bool) -> Provenance {
    if mutable {
        Provenance::Mutable
    } else {
        Provenance::Strict
    }
}

fn set_it(value: Expr, line: usize) -> Stmt {
    Stmt::new(
        StmtKind::Set {
            name: "it".to_string(),
            value,
        },
        line,
    )
}

/* ============================================================================
 * Single-Line Statements
 * ============================================================================
 */

fn single_line(text: &str, line: usize) -> Result<Option<StmtKind>, PohError> {
    let expr = |src: &str| parse_expression(src, line);

    // ------------------------------------------------------------
    // INPUT / OUTPUT
    // ------------------------------------------------------------
    if let Some(c) = template(r"(?i)^write\s+(.+)$", text) {
        return Ok(Some(StmtKind::Write(expr(c.get(1))?)));
    }

    if let Some(c) = template(r"(?i)^ask\s+for\s+(.+)$", text) {
        let words = c.get(1).split_whitespace().collect::<Vec<_>>();
        let (name, kind) = match words.split_last() {
            Some((last, rest)) if !rest.is_empty() && last.eq_ignore_ascii_case("number") => {
                (rest.join(" "), AskKind::Number)
            }
            Some((last, rest)) if !rest.is_empty() && last.eq_ignore_ascii_case("decimal") => {
                (rest.join(" "), AskKind::Decimal)
            }
            _ => (words.join(" "), AskKind::Text),
        };
        return Ok(Some(StmtKind::Ask {
            name: variable_name(&name, line)?,
            kind,
        }));
    }

    // ------------------------------------------------------------
    // VARIABLES
    // ------------------------------------------------------------
    if let Some(c) = template(r"(?i)^set\s+(.+)$", text) {
        let rest = c.get(1);
        let (name, value) = split_keyword(rest, "to")
            .or_else(|| rest.split_once(char::is_whitespace))
            .ok_or_else(|| PohError::parse_error("Malformed Set statement", Span::line(line)))?;
        return Ok(Some(StmtKind::Set {
            name: variable_name(name.trim(), line)?,
            value: expr(value)?,
        }));
    }

    if let Some(c) = template(r"(?i)^(increase|decrease)\s+(.+)$", text) {
        let rest = c.get(2);
        let (name, amount) = match split_keyword(rest, "by") {
            Some((name, amount)) => (name, expr(amount)?),
            None => (rest, Expr::new(ExprKind::Literal(Literal::Int(1)), Span::line(line))),
        };
        let name = variable_name(name, line)?;
        return Ok(Some(if c.get(1).eq_ignore_ascii_case("increase") {
            StmtKind::Increase { name, amount }
        } else {
            StmtKind::Decrease { name, amount }
        }));
    }

    // ------------------------------------------------------------
    // COLLECTIONS
    // ------------------------------------------------------------
    if let Some(c) = template(r"(?i)^add\s+(.+?)\s+to\s+(.+)$", text) {
        let target = expr(c.get(2))?;
        if let Some((key, value)) = split_char_outside(c.get(1), ':') {
            return Ok(Some(StmtKind::AddToDict {
                key: expr(key)?,
                value: expr(value)?,
                target,
            }));
        }
        return Ok(Some(StmtKind::AddToList {
            value: expr(c.get(1))?,
            target,
        }));
    }

    if let Some(c) = template(r"(?i)^remove\s+(.+?)\s+from\s+(.+)$", text) {
        let target = expr(c.get(2))?;
        let value = c.get(1);
        if value.starts_with('"') {
            return Ok(Some(StmtKind::RemoveFromDict {
                key: expr(value)?,
                target,
            }));
        }
        return Ok(Some(StmtKind::RemoveFromList {
            value: expr(value)?,
            target,
        }));
    }

    // ------------------------------------------------------------
    // FUNCTIONS
    // ------------------------------------------------------------
    if let Some(c) = template(r"(?i)^return(?:\s+(.+))?$", text) {
        let value = if c.has(1) { Some(expr(c.get(1))?) } else { None };
        return Ok(Some(StmtKind::Return(value)));
    }

    if let Some(c) = template(r"(?i)^use\s+(.+)$", text) {
        let (name, args) = call_signature(c.get(1), line)?;
        if !is_identifier(name) {
            return Err(PohError::parse_error(
                format!("Invalid function name '{name}'"),
                Span::line(line),
            ));
        }
        return Ok(Some(StmtKind::Use {
            name: name.to_string(),
            args,
        }));
    }

    if let Some(c) = template(r"(?i)^call\s+(.+)$", text) {
        let (target, args) = call_signature(c.get(1), line)?;
        let callee = if is_identifier(target) {
            Expr::new(ExprKind::Identifier(target.to_string()), Span::at(line, 1))
        } else {
            expr(target)?
        };
        return Ok(Some(StmtKind::CallValue { callee, args }));
    }

    // ------------------------------------------------------------
    // MODULES / FLOW
    // ------------------------------------------------------------
    if let Some(c) = template(r#"(?i)^import\s+system\s+"(.*)"$"#, text) {
        return Ok(Some(StmtKind::Import {
            path: c.get(1).to_string(),
            system: true,
        }));
    }

    if let Some(c) = template(r#"(?i)^import\s+"(.*)"$"#, text) {
        return Ok(Some(StmtKind::Import {
            path: c.get(1).to_string(),
            system: false,
        }));
    }

    if template(r"(?i)^import\b", text).is_some() {
        return Err(PohError::parse_error(
            "Import expects a quoted path",
            Span::line(line),
        ));
    }

    let kind = match text.to_lowercase().split_whitespace().collect::<Vec<_>>().as_slice() {
        ["stop"] => StmtKind::Stop,
        ["skip"] => StmtKind::Skip,
        ["debug", "on"] => StmtKind::Debug(true),
        ["debug", "off"] => StmtKind::Debug(false),
        _ => return Ok(None),
    };
    Ok(Some(kind))
}

/* ============================================================================
 * Inline Blocks
 * ============================================================================
 */

fn inline_block(text: &str, line: usize) -> Result<Option<StmtKind>, PohError> {
    let write = |src: &str| -> Result<Stmt, PohError> {
        Ok(Stmt::new(StmtKind::Write(parse_expression(src, line)?), line))
    };

    // If <cond> Write <expr> [Otherwise Write <expr>]
    if let Some(c) = template(r"(?i)^if\s+(.+?)\s+write\s+(.+)$", text) {
        let condition = parse_condition(c.get(1), line)?;
        let action = c.get(2);

        let (then_body, else_body) =
            match template(r"(?i)^(.+?)\s+otherwise\s+write\s+(.+)$", action) {
                Some(parts) => (vec![write(parts.get(1))?], Some(vec![write(parts.get(2))?])),
                None => (vec![write(action)?], None),
            };

        return Ok(Some(StmtKind::If {
            condition,
            then_body,
            else_body,
        }));
    }

    if let Some(c) = template(r"(?i)^while\s+(.+?)\s+write\s+(.+)$", text) {
        return Ok(Some(StmtKind::While {
            condition: parse_condition(c.get(1), line)?,
            body: vec![write(c.get(2))?],
        }));
    }

    if let Some(c) = template(r"(?i)^repeat\s+(.+?)\s+write\s+(.+)$", text) {
        return Ok(Some(StmtKind::Repeat {
            count: repeat_count(c.get(1), line)?,
            body: vec![write(c.get(2))?],
        }));
    }

    // Make name with a, b Write a plus b
    if let Some(c) = template(r"(?i)^make\s+(?:function\s+)?(.+?)\s+write\s+(.+)$", text) {
        let (name, params) = function_signature(c.get(1), line)?;
        let body = vec![Stmt::new(
            StmtKind::Return(Some(parse_expression(c.get(2), line)?)),
            line,
        )];
        let decl = FunctionDecl {
            name,
            params,
            body,
            line,
        };
        return Ok(Some(StmtKind::Function(Rc::new(decl))));
    }

    Ok(None)
}

/* ============================================================================
 * Signatures & Fallbacks
 * ============================================================================
 */

/// `Repeat 3 times` and `Repeat 3` read the same count.
fn repeat_count(src: &str, line: usize) -> Result<Expr, PohError> {
    match template(r"(?i)^(.+?)\s+times$", src) {
        Some(c) => parse_expression(c.get(1), line),
        None => parse_expression(src, line),
    }
}

/// `name [with a, b set to 2]`
fn function_signature(src: &str, line: usize) -> Result<(String, Vec<Param>), PohError> {
    let (name, tail) = split_keyword(src, "with").unwrap_or((src.trim(), ""));

    if !is_identifier(name) {
        return Err(PohError::parse_error(
            format!("Invalid function name '{name}'"),
            Span::line(line),
        ));
    }

    let mut params = Vec::new();
    for raw in split_top_level(tail) {
        let param = match template(r"(?i)^([A-Za-z_][A-Za-z0-9_]*)\s+set\s+to\s+(.+)$", raw) {
            Some(c) => Param {
                name: c.get(1).to_string(),
                default: Some(parse_expression(c.get(2), line)?),
            },
            None if is_identifier(raw) => Param::required(raw),
            None => {
                return Err(PohError::parse_error(
                    format!("Invalid parameter '{raw}' in function '{name}'"),
                    Span::line(line),
                ));
            }
        };

        if params.iter().any(|p: &Param| p.name == param.name) {
            return Err(PohError::parse_error(
                format!("Duplicate parameter '{}' in function '{name}'", param.name),
                Span::line(line),
            ));
        }
        params.push(param);
    }

    Ok((name.to_string(), params))
}

/// `target [with arg, arg]`
fn call_signature(src: &str, line: usize) -> Result<(&str, Vec<Expr>), PohError> {
    match split_keyword(src, "with") {
        Some((target, tail)) => {
            let args = split_top_level(tail)
                .into_iter()
                .map(|arg| parse_expression(arg, line))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((target, args))
        }
        None => Ok((src.trim(), Vec::new())),
    }
}

fn variable_name(name: &str, line: usize) -> Result<String, PohError> {
    if is_identifier(name) {
        Ok(name.to_string())
    } else {
        Err(PohError::parse_error(
            format!("Invalid variable name '{name}'"),
            Span::line(line),
        ))
    }
}

fn unknown_statement(text: &str, line: usize) -> PohError {
    let head = text.split_whitespace().next().unwrap_or(text).to_lowercase();
    let span = Span::at(line, 1);

    if is_statement_keyword(&head) {
        return PohError::parse_error(format!("Incomplete '{head}' statement"), span);
    }

    let hint = suggestion_hint(&head, STATEMENT_KEYWORDS.iter().copied());
    if hint.is_empty() {
        PohError::parse_error(format!("Unknown statement: {text}"), span)
    } else {
        PohError::parse_error(format!("Unknown statement '{text}'.{hint}"), span)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{AskKind, ExprKind, Provenance, StmtKind};
    use crate::parser::parse_program;
    use crate::span::Span;

    fn parse(src: &str) -> Vec<StmtKind> {
        parse_program(src, "test.poh")
            .unwrap()
            .statements
            .into_iter()
            .map(|s| s.kind)
            .collect()
    }

    fn parse_err(src: &str) -> crate::error::PohError {
        parse_program(src, "test.poh").unwrap_err()
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let stmts = parse("# header\n\nWrite \"a # not a comment\" # trailing\n");
        assert_eq!(stmts.len(), 1);
        match &stmts[0] {
            StmtKind::Write(expr) => assert!(matches!(expr.kind, ExprKind::Literal(_))),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn block_if_with_otherwise() {
        let stmts = parse("If x is greater than 1\n  Write 1\nOtherwise\n  Write 2\nEnd If");
        match &stmts[0] {
            StmtKind::If {
                then_body,
                else_body,
                ..
            } => {
                assert_eq!(then_body.len(), 1);
                assert_eq!(else_body.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nested_blocks_close_innermost_first() {
        let src = "While i is less than 3\n  Repeat 2 times\n    Write i\n  End Repeat\n  Increase i\nEnd";
        match &parse(src)[0] {
            StmtKind::While { body, .. } => {
                assert_eq!(body.len(), 2);
                assert!(matches!(body[0].kind, StmtKind::Repeat { .. }));
                assert!(matches!(body[1].kind, StmtKind::Increase { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unclosed_block_reports_the_opening_line() {
        let err = parse_err("Write 0\nRepeat 3\n  Write 1\n");
        assert_eq!(err.message, "Repeat block not closed with End/End Repeat");
        assert_eq!(err.span, Some(Span::line(2)));
        assert_eq!(err.file, "test.poh");
    }

    #[test]
    fn mismatched_terminator_reports_its_own_line() {
        let err = parse_err("While x\n  Write 1\nEnd If");
        assert_eq!(err.message, "Mismatched 'End If'; expected 'End' or 'End While'");
        assert_eq!(err.span, Some(Span::line(3)));
    }

    #[test]
    fn inline_if_with_otherwise() {
        match &parse("If x is 1 Write \"one\" Otherwise Write \"other\"")[0] {
            StmtKind::If { else_body, .. } => assert!(else_body.is_some()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn inline_write_inside_a_string_is_not_inline() {
        let stmts = parse("If x is 1\n  Write \"x\"\nEnd");
        assert_eq!(stmts.len(), 1);
        let stmts = parse("If name is \"please write me\"\n  Write 1\nEnd");
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn function_signatures_with_defaults() {
        match &parse("Make greet with name, greeting set to \"Hi\"\n  Return greeting plus name\nEnd")[0] {
            StmtKind::Function(decl) => {
                assert_eq!(decl.name, "greet");
                assert_eq!(decl.params.len(), 2);
                assert!(decl.params[0].default.is_none());
                assert!(decl.params[1].default.is_some());
                assert_eq!(decl.line, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn inline_make_returns_its_expression() {
        match &parse("Make double with x Write x times 2")[0] {
            StmtKind::Function(decl) => {
                assert!(matches!(decl.body[0].kind, StmtKind::Return(Some(_))));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn phrasal_collections_bind_it() {
        match &parse("Make a mutable list of 10, 20, and 30")[0] {
            StmtKind::Set { name, value } => {
                assert_eq!(name, "it");
                match &value.kind {
                    ExprKind::List { items, provenance } => {
                        assert_eq!(items.len(), 3);
                        assert_eq!(*provenance, Provenance::Mutable);
                    }
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }

        match &parse("Make a dictionary with \"a\" as 1 and \"b and c\" as 2")[0] {
            StmtKind::Set { value, .. } => match &value.kind {
                ExprKind::Dict {
                    entries,
                    provenance,
                } => {
                    assert_eq!(entries.len(), 2);
                    assert_eq!(*provenance, Provenance::Strict);
                }
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_dictionary_entry() {
        let err = parse_err("Make a dictionary with \"a\" 1");
        assert_eq!(err.message, "dictionary entry must be '<key> as <value>'");
    }

    #[test]
    fn collection_statements() {
        let stmts = parse(
            "Add 4 to xs\nAdd \"k\": 1 to d\nRemove 4 from xs\nRemove \"k\" from d\nSet the 2nd item in xs to 9\nRemove the last item from xs",
        );
        assert!(matches!(stmts[0], StmtKind::AddToList { .. }));
        assert!(matches!(stmts[1], StmtKind::AddToDict { .. }));
        assert!(matches!(stmts[2], StmtKind::RemoveFromList { .. }));
        assert!(matches!(stmts[3], StmtKind::RemoveFromDict { .. }));
        assert!(matches!(stmts[4], StmtKind::SetNthItem { .. }));
        assert!(matches!(stmts[5], StmtKind::RemoveLastItem(_)));
    }

    #[test]
    fn ask_set_and_counters() {
        let stmts = parse("Ask for age number\nSet msg to \"go to bed\"\nSet y 5\nIncrease y by 2\nDecrease y");
        assert!(matches!(
            &stmts[0],
            StmtKind::Ask { name, kind: AskKind::Number } if name == "age"
        ));
        match &stmts[1] {
            StmtKind::Set { name, value } => {
                assert_eq!(name, "msg");
                assert!(matches!(value.kind, ExprKind::Literal(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(&stmts[2], StmtKind::Set { name, .. } if name == "y"));
        assert!(matches!(stmts[3], StmtKind::Increase { .. }));
        assert!(matches!(stmts[4], StmtKind::Decrease { .. }));
    }

    #[test]
    fn imports_and_flow_words() {
        let stmts = parse("Import \"lib.poh\"\nImport system \"math\"\nDebug on\nStop\nSkip");
        assert!(matches!(&stmts[0], StmtKind::Import { path, system: false } if path == "lib.poh"));
        assert!(matches!(&stmts[1], StmtKind::Import { path, system: true } if path == "math"));
        assert!(matches!(stmts[2], StmtKind::Debug(true)));
        assert!(matches!(stmts[3], StmtKind::Stop));
        assert!(matches!(stmts[4], StmtKind::Skip));

        assert_eq!(parse_err("Import lib").message, "Import expects a quoted path");
    }

    #[test]
    fn unknown_statements_suggest_a_keyword() {
        let err = parse_err("  Wirte 5");
        assert_eq!(err.message, "Unknown statement 'Wirte 5'. Did you mean 'write'?");
        assert_eq!(err.span, Some(Span::at(1, 1)));

        let err = parse_err("Frobnicate everything");
        assert_eq!(err.message, "Unknown statement: Frobnicate everything");
    }

    #[test]
    fn unterminated_string_is_a_parse_error() {
        let err = parse_err("Write 1\n  Write \"oops");
        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!(err.span, Some(Span::at(2, 7)));
        assert_eq!(err.to_string(), "[test.poh: Line 2: Col 7] Unterminated string literal");
    }
}

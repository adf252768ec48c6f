/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     expressions.rs
 * Purpose:  Expression evaluation, arithmetic and comparison.
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

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::ast::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
use crate::error::PohError;
use crate::interpreter::display::{from_json, to_json, value_repr, value_to_string};
use crate::interpreter::environment::Env;
use crate::interpreter::helpers::{is_truthy, test_predicate};
use crate::interpreter::{Interpreter, STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::value::Value;

impl Interpreter {
    /// Evaluates an expression in `env`.
    ///
    /// Failures are pinned to the innermost node that raised them.
    pub(crate) fn eval_expr(&mut self, expr: &Expr, env: &Env) -> Result<Value, PohError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_located(expr, env))
    }

    fn eval_located(&mut self, expr: &Expr, env: &Env) -> Result<Value, PohError> {
        let value = self
            .eval_kind(expr, env)
            .map_err(|err| self.locate(err, expr.span))?;

        if self.debug {
            let line = format!("Evaluating: {} => {}", describe(&expr.kind), value_repr(&value));
            self.trace(expr.span, line);
        }

        Ok(value)
    }

    pub(crate) fn eval_args(&mut self, args: &[Expr], env: &Env) -> Result<Vec<Value>, PohError> {
        args.iter().map(|arg| self.eval_expr(arg, env)).collect()
    }

    fn eval_kind(&mut self, expr: &Expr, env: &Env) -> Result<Value, PohError> {
        match &expr.kind {
            // ------ LITERALS & NAMES ------
            ExprKind::Literal(literal) => Ok(match literal {
                Literal::Int(n) => Value::Int(*n),
                Literal::Float(f) => Value::Float(*f),
                Literal::Text(s) => Value::text(s.as_str()),
            }),

            ExprKind::Identifier(name) => self.lookup(name, env),

            // ------ OPERATORS ------
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand, env)?;
                unary(*op, &value)
            }

            ExprKind::Binary { left, op, right } => match op {
                BinaryOp::And => {
                    let left = self.eval_expr(left, env)?;
                    if !is_truthy(&left) {
                        return Ok(Value::Bool(false));
                    }
                    let right = self.eval_expr(right, env)?;
                    Ok(Value::Bool(is_truthy(&right)))
                }
                BinaryOp::Or => {
                    let left = self.eval_expr(left, env)?;
                    if is_truthy(&left) {
                        return Ok(Value::Bool(true));
                    }
                    let right = self.eval_expr(right, env)?;
                    Ok(Value::Bool(is_truthy(&right)))
                }
                _ => {
                    let left = self.eval_expr(left, env)?;
                    let right = self.eval_expr(right, env)?;
                    self.arithmetic(*op, &left, &right)
                }
            },

            ExprKind::Predicate { predicate, operand } => {
                let value = self.eval_expr(operand, env)?;
                test_predicate(*predicate, &value)
                    .map(Value::Bool)
                    .ok_or_else(|| PohError::type_error("Predicate expects a number"))
            }

            // ------ CALLS ------
            ExprKind::Call { name, args } => {
                let args = self.eval_args(args, env)?;
                self.call_named(name, args, env, expr)
            }

            // ------ COLLECTIONS ------
            ExprKind::List { items, provenance } => {
                let items = self.eval_args(items, env)?;
                Ok(Value::list(items, *provenance))
            }

            ExprKind::Dict { entries, provenance } => {
                let mut pairs = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = self.eval_expr(key, env)?;
                    let value = self.eval_expr(value, env)?;
                    pairs.push((key, value));
                }
                Ok(Value::dict(pairs, *provenance))
            }

            ExprKind::At { container, key } => {
                let container = self.eval_expr(container, env)?;
                let key = self.eval_expr(key, env)?;
                self.index_at(&container, &key)
            }

            ExprKind::NthItem {
                index,
                container,
                phrase,
            } => self.nth_item(index, container, phrase, env),

            ExprKind::KeysOf(container) => {
                let container = self.eval_expr(container, env)?;
                self.keys_of(&container)
            }

            ExprKind::ValuesOf(container) => {
                let container = self.eval_expr(container, env)?;
                self.values_of(&container)
            }

            ExprKind::Contains { collection, needle } => {
                let collection = self.eval_expr(collection, env)?;
                let needle = self.eval_expr(needle, env)?;
                self.contains(&collection, &needle)
            }

            ExprKind::AllPredicate {
                collection,
                predicate,
            } => {
                let items = self.eval_expr(collection, env)?;
                let Value::List(list) = &items else {
                    return Err(PohError::type_error(
                        "all <collection> are <predicate> expects a list",
                    ));
                };
                let all = list
                    .borrow()
                    .items
                    .iter()
                    .all(|v| test_predicate(*predicate, v).unwrap_or(false));
                Ok(Value::Bool(all))
            }

            ExprKind::AnyPredicate {
                collection,
                predicate,
            } => {
                let items = self.eval_expr(collection, env)?;
                let Value::List(list) = &items else {
                    return Err(PohError::type_error(
                        "any <collection> is <predicate> expects a list",
                    ));
                };
                let any = list
                    .borrow()
                    .items
                    .iter()
                    .any(|v| test_predicate(*predicate, v).unwrap_or(false));
                Ok(Value::Bool(any))
            }

            // ------ RANDOMNESS ------
            ExprKind::RandomInt { low, high } => {
                let low = self.eval_expr(low, env)?;
                let high = self.eval_expr(high, env)?;
                let (low, high) = match (low.as_number(), high.as_number()) {
                    (Some(low), Some(high)) => (low.trunc() as i64, high.trunc() as i64),
                    _ => return Err(PohError::type_error("random between expects numbers")),
                };
                let (low, high) = if low <= high { (low, high) } else { (high, low) };
                Ok(Value::Int(rand::thread_rng().gen_range(low..=high)))
            }

            ExprKind::RandomFloat { low, high } => {
                let low = self.eval_expr(low, env)?;
                let high = self.eval_expr(high, env)?;
                let (low, high) = match (low.as_number(), high.as_number()) {
                    (Some(low), Some(high)) if low.is_finite() && high.is_finite() => {
                        (low.min(high), low.max(high))
                    }
                    _ => {
                        return Err(PohError::type_error(
                            "random decimal between expects numbers",
                        ))
                    }
                };
                if low == high {
                    return Ok(Value::Float(low));
                }
                Ok(Value::Float(rand::thread_rng().gen_range(low..=high)))
            }

            ExprKind::RandomFrom(collection) => {
                let collection = self.eval_expr(collection, env)?;
                random_from(&collection)
            }

            // ------ JSON ------
            ExprKind::ParseJson(text) => {
                let text = self.eval_expr(text, env)?;
                let Value::Text(text) = text else {
                    return Err(PohError::type_error("parse json from expects text"));
                };
                serde_json::from_str(&text)
                    .map(|json| from_json(&json))
                    .map_err(|err| PohError::runtime_error(format!("Invalid JSON: {err}")))
            }

            ExprKind::ToJson { value, pretty } => {
                let value = self.eval_expr(value, env)?;
                let json = to_json(&value)?;
                let text = if *pretty {
                    serde_json::to_string_pretty(&json)
                } else {
                    serde_json::to_string(&json)
                };
                text.map(Value::Text)
                    .map_err(|err| PohError::runtime_error(format!("Invalid JSON: {err}")))
            }
        }
    }

    /// Identifier lookup: literal words, then the scope chain, then the
    /// function registry.
    fn lookup(&self, name: &str, env: &Env) -> Result<Value, PohError> {
        match name.to_lowercase().as_str() {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            "nothing" => return Ok(Value::Nothing),
            _ => {}
        }

        let found = env.borrow().get(name);
        match found {
            Ok(value) => Ok(value),
            Err(err) => self.functions.get(name).cloned().ok_or(err),
        }
    }

    /* ========================================================================
     * Arithmetic & Comparison
     * ======================================================================== */

    /// Applies a non-short-circuit binary operator.
    pub(crate) fn arithmetic(&self, op: BinaryOp, left: &Value, right: &Value) -> Result<Value, PohError> {
        match op {
            BinaryOp::Equal => Ok(Value::Bool(left == right)),
            BinaryOp::NotEqual => Ok(Value::Bool(left != right)),

            BinaryOp::Greater | BinaryOp::GreaterEqual | BinaryOp::Less | BinaryOp::LessEqual => {
                let ordering = compare(op, left, right)?;
                Ok(Value::Bool(match op {
                    BinaryOp::Greater => ordering == Ordering::Greater,
                    BinaryOp::GreaterEqual => ordering != Ordering::Less,
                    BinaryOp::Less => ordering == Ordering::Less,
                    _ => ordering != Ordering::Greater,
                }))
            }

            BinaryOp::Add if is_text(left) || is_text(right) => Ok(Value::Text(format!(
                "{}{}",
                value_to_string(left),
                value_to_string(right)
            ))),

            BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => {
                if is_text(left) || is_text(right) {
                    return Err(PohError::type_error(format!(
                        "Type mismatch: cannot apply '{}' to string operand(s)",
                        op.symbol()
                    )));
                }
                numeric(op, left, right)
            }

            BinaryOp::And => Ok(Value::Bool(is_truthy(left) && is_truthy(right))),
            BinaryOp::Or => Ok(Value::Bool(is_truthy(left) || is_truthy(right))),
        }
    }
}

fn is_text(value: &Value) -> bool {
    matches!(value, Value::Text(_))
}

fn integral(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn numeric(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, PohError> {
    let mismatch = || {
        PohError::type_error(format!(
            "Type mismatch: cannot apply '{}' to {} and {}",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ))
    };

    if op == BinaryOp::Divide {
        let (l, r) = match (left.as_number(), right.as_number()) {
            (Some(l), Some(r)) => (l, r),
            _ => return Err(mismatch()),
        };
        if r == 0.0 {
            return Err(PohError::zero_division());
        }
        return Ok(Value::Float(l / r));
    }

    if let (Some(l), Some(r)) = (integral(left), integral(right)) {
        let exact = match op {
            BinaryOp::Add => l.checked_add(r),
            BinaryOp::Subtract => l.checked_sub(r),
            _ => l.checked_mul(r),
        };
        if let Some(n) = exact {
            return Ok(Value::Int(n));
        }
    }

    let (l, r) = match (left.as_number(), right.as_number()) {
        (Some(l), Some(r)) => (l, r),
        _ => return Err(mismatch()),
    };
    Ok(Value::Float(match op {
        BinaryOp::Add => l + r,
        BinaryOp::Subtract => l - r,
        _ => l * r,
    }))
}

/// Orders numbers with numbers and text with text.
fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Ordering, PohError> {
    if let (Value::Text(l), Value::Text(r)) = (left, right) {
        return Ok(l.cmp(r));
    }

    match (left.as_number(), right.as_number()) {
        (Some(l), Some(r)) => l.partial_cmp(&r).ok_or_else(|| {
            PohError::type_error(format!("Type mismatch: cannot compare nan with '{}'", op.symbol()))
        }),
        _ => Err(PohError::type_error(format!(
            "Type mismatch: cannot apply '{}' to {} and {}",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn unary(op: UnaryOp, value: &Value) -> Result<Value, PohError> {
    match (op, value) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!is_truthy(value))),
        (UnaryOp::Plus, Value::Int(_) | Value::Float(_)) => Ok(value.clone()),
        (UnaryOp::Plus, Value::Bool(b)) => Ok(Value::Int(i64::from(*b))),
        (UnaryOp::Minus, Value::Int(n)) => Ok(n
            .checked_neg()
            .map(Value::Int)
            .unwrap_or(Value::Float(-(*n as f64)))),
        (UnaryOp::Minus, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Minus, Value::Bool(b)) => Ok(Value::Int(-i64::from(*b))),
        (op, value) => {
            let symbol = if op == UnaryOp::Plus { "+" } else { "-" };
            Err(PohError::type_error(format!(
                "Type mismatch: cannot apply unary '{symbol}' to {}",
                value.type_name()
            )))
        }
    }
}

fn random_from(collection: &Value) -> Result<Value, PohError> {
    let mut rng = rand::thread_rng();
    let picked = match collection {
        Value::List(list) => list.borrow().items.choose(&mut rng).cloned(),
        Value::Dict(dict) => dict.borrow().values().choose(&mut rng).cloned(),
        Value::Text(s) => {
            let chars = s.chars().collect::<Vec<_>>();
            chars.choose(&mut rng).map(|c| Value::Text(c.to_string()))
        }
        _ => {
            return Err(PohError::type_error(
                "random from expects a list, string, or dictionary",
            ))
        }
    };
    Ok(picked.unwrap_or(Value::Nothing))
}

/// Label used by `Evaluating:` traces.
fn describe(kind: &ExprKind) -> String {
    match kind {
        ExprKind::Literal(_) => "Literal".to_string(),
        ExprKind::Identifier(name) => format!("Identifier '{name}'"),
        ExprKind::Unary { op, .. } => {
            let symbol = match op {
                UnaryOp::Plus => "+",
                UnaryOp::Minus => "-",
                UnaryOp::Not => "!",
            };
            format!("Unary '{symbol}'")
        }
        ExprKind::Binary { op, .. } => {
            let family = match op {
                BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => "Binary",
                BinaryOp::And | BinaryOp::Or => "Logic",
                _ => "Compare",
            };
            format!("{family} '{}'", op.symbol())
        }
        ExprKind::Predicate { predicate, .. } => format!("Predicate {predicate}"),
        ExprKind::Call { name, .. } => format!("Call {name}"),
        ExprKind::List { .. } => "ListLiteral".to_string(),
        ExprKind::Dict { .. } => "DictLiteral".to_string(),
        ExprKind::At { .. } => "At".to_string(),
        ExprKind::NthItem { .. } => "NthItem".to_string(),
        ExprKind::KeysOf(_) => "KeysOf".to_string(),
        ExprKind::ValuesOf(_) => "ValuesOf".to_string(),
        ExprKind::Contains { .. } => "Contains".to_string(),
        ExprKind::AllPredicate { .. } => "AllPredicate".to_string(),
        ExprKind::AnyPredicate { .. } => "AnyPredicate".to_string(),
        ExprKind::RandomInt { .. } => "RandomIntBetween".to_string(),
        ExprKind::RandomFloat { .. } => "RandomFloatBetween".to_string(),
        ExprKind::RandomFrom(_) => "RandomFrom".to_string(),
        ExprKind::ParseJson(_) => "ParseJson".to_string(),
        ExprKind::ToJson { .. } => "ToJson".to_string(),
    }
}

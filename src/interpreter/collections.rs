/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     collections.rs
 * Purpose:  List and dictionary access, and the mutation rules for the
 *           three collection provenances.
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
 * Collections
 *
 * Every list and dictionary remembers how it was written:
 *
 *  - `Make a list of ...`          → strict, mutation is an error
 *  - `Make a mutable list of ...`  → mutable, mutation succeeds
 *  - `List contains ...`           → legacy, mutation succeeds with a
 *                                    deprecation warning
 *
 * Phrasal positions (`the 2nd item`) are 1-based; `at` is 0-based.
 */

use crate::ast::{Expr, Provenance};
use crate::error::PohError;
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::Env;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::Value;

/* ============================================================================
 * Mutation Guard
 * ============================================================================
 */

impl Interpreter {
    /// Lets a mutation through, warns about it, or refuses it.
    fn guard(&mut self, span: Span, provenance: Provenance, noun: &str) -> Result<(), PohError> {
        match provenance {
            Provenance::Mutable => Ok(()),
            Provenance::Legacy => {
                self.warn(
                    span,
                    &format!("Implicit mutable {noun} is deprecated. Use 'mutable {noun}' instead."),
                );
                Ok(())
            }
            Provenance::Strict => Err(PohError::immutable_error(format!(
                "Cannot modify immutable {noun}. Did you mean \"Make a mutable {noun} ...\"?"
            ))),
        }
    }

    /* ========================================================================
     * Mutation Statements
     * ======================================================================== */

    pub(crate) fn add_to_list(
        &mut self,
        span: Span,
        value: &Expr,
        target: &Expr,
        env: &Env,
    ) -> Result<(), PohError> {
        let target = self.eval_expr(target, env)?;
        let value = self.eval_expr(value, env)?;

        let Value::List(list) = &target else {
            return Err(PohError::type_error("Add to expects a list"));
        };

        let provenance = list.borrow().provenance;
        self.guard(span, provenance, "list")?;
        list.borrow_mut().items.push(value);
        Ok(())
    }

    /// Removes the first equal element. A missing element is not an error.
    /// On a dictionary the value is taken as a key.
    pub(crate) fn remove_from_list(
        &mut self,
        span: Span,
        value: &Expr,
        target: &Expr,
        env: &Env,
    ) -> Result<(), PohError> {
        let target = self.eval_expr(target, env)?;
        let value = self.eval_expr(value, env)?;

        match &target {
            Value::List(_) => self.remove_element(span, &target, &value),
            Value::Dict(_) => self.remove_key(span, &target, &value),
            _ => Err(PohError::type_error("Remove from expects a list")),
        }
    }

    pub(crate) fn add_to_dict(
        &mut self,
        span: Span,
        key: &Expr,
        value: &Expr,
        target: &Expr,
        env: &Env,
    ) -> Result<(), PohError> {
        let target = self.eval_expr(target, env)?;
        let key = self.eval_expr(key, env)?;
        let value = self.eval_expr(value, env)?;

        let Value::Dict(dict) = &target else {
            return Err(PohError::type_error(
                "Add to expects a dictionary when using key: value",
            ));
        };

        let provenance = dict.borrow().provenance;
        self.guard(span, provenance, "dictionary")?;
        dict.borrow_mut().insert(key, value);
        Ok(())
    }

    /// Removes a key. On a list the key is taken as an element.
    pub(crate) fn remove_from_dict(
        &mut self,
        span: Span,
        key: &Expr,
        target: &Expr,
        env: &Env,
    ) -> Result<(), PohError> {
        let target = self.eval_expr(target, env)?;
        let key = self.eval_expr(key, env)?;

        match &target {
            Value::Dict(_) => self.remove_key(span, &target, &key),
            Value::List(_) => self.remove_element(span, &target, &key),
            _ => Err(PohError::type_error(
                "Remove from expects a dictionary when key is provided",
            )),
        }
    }

    pub(crate) fn set_nth_item(
        &mut self,
        span: Span,
        index: &Expr,
        container: &Expr,
        value: &Expr,
        phrase: &str,
        env: &Env,
    ) -> Result<(), PohError> {
        let container = self.eval_expr(container, env)?;
        let Value::List(list) = &container else {
            return Err(PohError::type_error("Set Nth item expects a list"));
        };

        let position = self.position(index, env)?;
        let len = list.borrow().items.len();
        let slot = slot(position, len, phrase)?;

        let provenance = list.borrow().provenance;
        self.guard(span, provenance, "list")?;

        let value = self.eval_expr(value, env)?;
        list.borrow_mut().items[slot] = value;
        Ok(())
    }

    /// Drops the last element. An empty list is left alone.
    pub(crate) fn remove_last_item(
        &mut self,
        span: Span,
        container: &Expr,
        env: &Env,
    ) -> Result<(), PohError> {
        let container = self.eval_expr(container, env)?;
        let Value::List(list) = &container else {
            return Err(PohError::type_error("Remove last item expects a list"));
        };

        let provenance = list.borrow().provenance;
        self.guard(span, provenance, "list")?;
        list.borrow_mut().items.pop();
        Ok(())
    }

    fn remove_element(&mut self, span: Span, target: &Value, value: &Value) -> Result<(), PohError> {
        if let Value::List(list) = target {
            let provenance = list.borrow().provenance;
            self.guard(span, provenance, "list")?;

            let found = list.borrow().items.iter().position(|item| item == value);
            if let Some(pos) = found {
                list.borrow_mut().items.remove(pos);
            }
        }
        Ok(())
    }

    fn remove_key(&mut self, span: Span, target: &Value, key: &Value) -> Result<(), PohError> {
        if let Value::Dict(dict) = target {
            let provenance = dict.borrow().provenance;
            self.guard(span, provenance, "dictionary")?;
            dict.borrow_mut().remove(key);
        }
        Ok(())
    }

    /* ========================================================================
     * Access Expressions
     * ======================================================================== */

    /// `container at key`.
    pub(crate) fn index_at(&self, container: &Value, key: &Value) -> Result<Value, PohError> {
        match (container, key) {
            (Value::List(list), Value::Int(_) | Value::Bool(_)) => {
                let list = list.borrow();
                let index = key.as_int().unwrap_or_default();
                let len = list.items.len() as i64;
                let resolved = if index < 0 { index + len } else { index };

                if (0..len).contains(&resolved) {
                    Ok(list.items[resolved as usize].clone())
                } else {
                    Err(PohError::index_error(format!(
                        "Index {} is out of range for the list.",
                        value_to_string(key)
                    )))
                }
            }

            (Value::Dict(dict), _) => dict.borrow().get(key).cloned().ok_or_else(|| {
                PohError::index_error(format!(
                    "Key {} was not found in the dictionary.",
                    value_to_string(key)
                ))
            }),

            _ => Err(PohError::type_error(
                "'at' expects a list index or dictionary key",
            )),
        }
    }

    /// `Take the <phrase> item from container`.
    pub(crate) fn nth_item(
        &mut self,
        index: &Expr,
        container: &Expr,
        phrase: &str,
        env: &Env,
    ) -> Result<Value, PohError> {
        let container = self.eval_expr(container, env)?;
        let Value::List(list) = &container else {
            return Err(PohError::type_error("Nth item expects a list"));
        };

        let position = self.position(index, env)?;
        let list = list.borrow();
        let slot = slot(position, list.items.len(), phrase)?;
        Ok(list.items[slot].clone())
    }

    pub(crate) fn keys_of(&self, container: &Value) -> Result<Value, PohError> {
        match container {
            Value::Dict(dict) => Ok(Value::list(dict.borrow().keys(), Provenance::Mutable)),
            _ => Err(PohError::type_error("keys of expects a dictionary")),
        }
    }

    pub(crate) fn values_of(&self, container: &Value) -> Result<Value, PohError> {
        match container {
            Value::Dict(dict) => Ok(Value::list(dict.borrow().values(), Provenance::Mutable)),
            _ => Err(PohError::type_error("values of expects a dictionary")),
        }
    }

    /// Key membership for dictionaries, element membership for lists,
    /// substring for text. Anything else contains nothing.
    pub(crate) fn contains(&self, collection: &Value, needle: &Value) -> Result<Value, PohError> {
        let found = match (collection, needle) {
            (Value::Dict(dict), _) => dict.borrow().contains_key(needle),
            (Value::List(list), _) => list.borrow().items.contains(needle),
            (Value::Text(haystack), Value::Text(needle)) => haystack.contains(needle.as_str()),
            _ => false,
        };
        Ok(Value::Bool(found))
    }

    /// Evaluates a 1-based position. Anything that is not a number,
    /// including an unbound name, is reported as such.
    fn position(&mut self, index: &Expr, env: &Env) -> Result<i64, PohError> {
        let value = match self.eval_expr(index, env) {
            Ok(value) => value,
            Err(err) if err.message.starts_with("Undefined variable") => {
                return Err(PohError::type_error("Index must be a number"));
            }
            Err(err) => return Err(err),
        };

        value
            .as_int()
            .ok_or_else(|| PohError::type_error("Index must be a number"))
    }
}

/// Turns a 1-based position into a slot, or explains why it is out of
/// range.
fn slot(position: i64, len: usize, phrase: &str) -> Result<usize, PohError> {
    if position >= 1 && (position as usize) <= len {
        return Ok(position as usize - 1);
    }

    Err(PohError::index_error(format!(
        "Index {position} is out of range for the list. '{phrase}' must be between 1 and {len}."
    )))
}

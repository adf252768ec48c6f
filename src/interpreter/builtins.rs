/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     builtins.rs
 * Purpose:  Host functions installed in the function registry.
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

use std::collections::HashMap;

use chrono::Local;

use crate::ast::Provenance;
use crate::error::PohError;
use crate::interpreter::display::value_to_string;
use crate::value::{NativeFn, NativeFunction, Value};

/// Every builtin, by name.
const BUILTINS: &[(&str, NativeFn)] = &[
    ("length", length),
    ("sum", sum),
    ("min", min),
    ("max", max),
    ("range", range),
    ("join", join),
    ("split", split),
    ("now", now),
];

/// Registers the builtins so they can be called by name, with `Use`, or
/// passed around as values.
pub fn install(functions: &mut HashMap<String, Value>) {
    for &(name, func) in BUILTINS {
        functions.insert(
            name.to_string(),
            Value::Builtin(NativeFunction { name, func }),
        );
    }
}

/* ============================================================================
 * Collections & Text
 * ============================================================================
 */

/// `length(x)`: characters of text, elements of a list, entries of a
/// dictionary.
fn length(args: &[Value]) -> Result<Value, PohError> {
    let [subject] = args else {
        return Err(PohError::arity_error("length expects 1 argument"));
    };

    let len = match subject {
        Value::Text(s) => s.chars().count(),
        Value::List(list) => list.borrow().items.len(),
        Value::Dict(dict) => dict.borrow().entries.len(),
        _ => return Err(PohError::type_error("length expects a collection or string")),
    };
    Ok(Value::Int(len as i64))
}

fn join(args: &[Value]) -> Result<Value, PohError> {
    let (list, separator) = match args {
        [list] => (list, String::new()),
        [list, separator] => (list, value_to_string(separator)),
        _ => {
            return Err(PohError::arity_error(
                "join expects list and optional separator",
            ))
        }
    };

    let Value::List(list) = list else {
        return Err(PohError::type_error("join expects a list"));
    };

    let parts = list
        .borrow()
        .items
        .iter()
        .map(value_to_string)
        .collect::<Vec<_>>();
    Ok(Value::Text(parts.join(&separator)))
}

fn split(args: &[Value]) -> Result<Value, PohError> {
    let [text, separator] = args else {
        return Err(PohError::arity_error("split expects text and separator"));
    };

    let text = value_to_string(text);
    let separator = value_to_string(separator);
    if separator.is_empty() {
        return Err(PohError::runtime_error("split separator cannot be empty"));
    }

    let parts = text.split(separator.as_str()).map(Value::text).collect();
    Ok(Value::list(parts, Provenance::Mutable))
}

/* ============================================================================
 * Numbers
 * ============================================================================
 */

/// Numeric elements of a single list argument.
fn numbers(name: &str, args: &[Value], non_empty: bool) -> Result<Vec<Value>, PohError> {
    let [subject] = args else {
        return Err(PohError::arity_error(format!("{name} expects 1 argument")));
    };

    let Value::List(list) = subject else {
        return Err(PohError::type_error(if non_empty {
            format!("{name} expects a non-empty list")
        } else {
            format!("{name} expects a list")
        }));
    };

    let items = list.borrow().items.clone();
    if non_empty && items.is_empty() {
        return Err(PohError::type_error(format!("{name} expects a non-empty list")));
    }
    if items.iter().any(|v| !matches!(v, Value::Int(_) | Value::Float(_) | Value::Bool(_))) {
        return Err(PohError::type_error(format!("{name} expects numeric values")));
    }
    Ok(items)
}

fn sum(args: &[Value]) -> Result<Value, PohError> {
    let items = numbers("sum", args, false)?;

    let mut int_total: i64 = 0;
    let mut float_total = 0.0;
    let mut is_float = false;

    for item in &items {
        match item {
            Value::Float(f) => {
                is_float = true;
                float_total += f;
            }
            other => {
                let n = other.as_int().unwrap_or_default();
                match int_total.checked_add(n) {
                    Some(total) => int_total = total,
                    None => {
                        is_float = true;
                        float_total += n as f64;
                    }
                }
            }
        }
    }

    if is_float {
        Ok(Value::Float(float_total + int_total as f64))
    } else {
        Ok(Value::Int(int_total))
    }
}

fn min(args: &[Value]) -> Result<Value, PohError> {
    extreme("min", args, |candidate, best| candidate < best)
}

fn max(args: &[Value]) -> Result<Value, PohError> {
    extreme("max", args, |candidate, best| candidate > best)
}

/// Keeps the first element that `better` prefers, so ties resolve to the
/// earliest.
fn extreme(name: &str, args: &[Value], better: fn(f64, f64) -> bool) -> Result<Value, PohError> {
    let items = numbers(name, args, true)?;

    let mut best: Option<(&Value, f64)> = None;
    for item in &items {
        let n = item.as_number().unwrap_or(f64::NAN);
        match best {
            Some((_, current)) if !better(n, current) => {}
            _ => best = Some((item, n)),
        }
    }

    Ok(best.map(|(value, _)| value.clone()).unwrap_or(Value::Nothing))
}

/// `range(stop)`, `range(start, stop)` or `range(start, stop, step)`.
fn range(args: &[Value]) -> Result<Value, PohError> {
    if args.is_empty() || args.len() > 3 {
        return Err(PohError::arity_error("range expects 1 to 3 arguments"));
    }

    let nums = args
        .iter()
        .map(|arg| {
            arg.as_int()
                .ok_or_else(|| PohError::type_error("range expects whole numbers"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (start, stop, step) = match nums.as_slice() {
        [stop] => (0, *stop, 1),
        [start, stop] => (*start, *stop, 1),
        [start, stop, step] => (*start, *stop, *step),
        _ => return Err(PohError::arity_error("range expects 1 to 3 arguments")),
    };

    if step == 0 {
        return Err(PohError::runtime_error("range step cannot be zero"));
    }

    let mut items = Vec::new();
    let mut current = start;
    while (step > 0 && current < stop) || (step < 0 && current > stop) {
        items.push(Value::Int(current));
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(Value::list(items, Provenance::Mutable))
}

/* ============================================================================
 * Time
 * ============================================================================
 */

/// Local time as ISO-8601 to the second, e.g. `2024-05-01T09:30:00`.
fn now(args: &[Value]) -> Result<Value, PohError> {
    if !args.is_empty() {
        return Err(PohError::arity_error("now expects no arguments"));
    }
    Ok(Value::Text(Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Value {
        Value::list(values.iter().map(|n| Value::Int(*n)).collect(), Provenance::Strict)
    }

    #[test]
    fn length_counts_characters_and_entries() {
        assert_eq!(length(&[Value::text("héllo")]).unwrap(), Value::Int(5));
        assert_eq!(length(&[ints(&[1, 2, 3])]).unwrap(), Value::Int(3));

        let err = length(&[Value::Int(3)]).unwrap_err();
        assert_eq!(err.message, "length expects a collection or string");
        assert_eq!(length(&[]).unwrap_err().message, "length expects 1 argument");
    }

    #[test]
    fn sum_stays_integral_until_a_decimal_shows_up() {
        assert_eq!(sum(&[ints(&[1, 2, 3])]).unwrap(), Value::Int(6));

        let mixed = Value::list(vec![Value::Int(1), Value::Float(0.5)], Provenance::Mutable);
        assert_eq!(sum(&[mixed]).unwrap(), Value::Float(1.5));

        let bad = Value::list(vec![Value::text("x")], Provenance::Mutable);
        assert_eq!(sum(&[bad]).unwrap_err().message, "sum expects numeric values");
    }

    #[test]
    fn min_and_max_need_a_non_empty_list() {
        assert_eq!(min(&[ints(&[3, 1, 2])]).unwrap(), Value::Int(1));
        assert_eq!(max(&[ints(&[3, 1, 2])]).unwrap(), Value::Int(3));
        assert_eq!(
            min(&[ints(&[])]).unwrap_err().message,
            "min expects a non-empty list"
        );
    }

    #[test]
    fn range_follows_start_stop_step() {
        let rendered = |args: &[Value]| value_to_string(&range(args).unwrap());
        assert_eq!(rendered(&[Value::Int(3)]), "[0, 1, 2]");
        assert_eq!(rendered(&[Value::Int(2), Value::Int(5)]), "[2, 3, 4]");
        assert_eq!(rendered(&[Value::Int(5), Value::Int(0), Value::Int(-2)]), "[5, 3, 1]");
        assert!(range(&[Value::Int(1), Value::Int(2), Value::Int(0)]).is_err());
    }

    #[test]
    fn join_and_split_are_inverse_for_text() {
        let words = Value::list(vec![Value::text("a"), Value::text("b")], Provenance::Strict);
        assert_eq!(join(&[words, Value::text("-")]).unwrap(), Value::text("a-b"));

        let parts = split(&[Value::text("a,b,c"), Value::text(",")]).unwrap();
        assert_eq!(value_to_string(&parts), "['a', 'b', 'c']");
    }

    #[test]
    fn now_is_iso_seconds() {
        let Value::Text(stamp) = now(&[]).unwrap() else {
            panic!("now should return text");
        };
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[10..11], "T");
    }
}

/*
 * =============================================================================
 * PohLang - Phrasal Programming Language
 * =============================================================================
 *
 *  File:     display.rs
 *  Purpose:  Text and JSON renderings of runtime values.
 *
 * -----------------------------------------------------------------------------
 *  License:
 * -----------------------------------------------------------------------------
 *  This file is part of the PohLang programming language project.
 *
 *  PohLang is dual-licensed under the terms of:
 *    - The MIT license
 *    - The Apache License, Version 2.0
 *
 *  You may choose either license to govern your use of this software.
 *
 *  Unless required by applicable law or agreed to in writing, this software is
 *  distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 *  either express or implied.
 *
 * =============================================================================
 */

use std::rc::Rc;

use serde_json::{Map, Number, Value as Json};

use crate::ast::Provenance;
use crate::error::PohError;
use crate::value::Value;

/// ============================================================================
/// value_to_string
/// ============================================================================
/// Converts a PohLang runtime `Value` into the text `Write` prints.
///
/// Examples:
///   - Int(3)            → "3"
///   - Float(2.0)        → "2.0"
///   - Text("cat")       → "cat"
///   - Bool(true)        → "True"
///   - Nothing           → "None"
///   - List([1, "a"])    → "[1, 'a']"
///   - Dict({"a": 1})    → "{'a': 1}"
///   - Function add      → "<function add>"
///
/// A collection met again while it is still being rendered prints as
/// `[...]` or `{...}`.
/// ============================================================================
pub fn value_to_string(val: &Value) -> String {
    render(val, &mut Vec::new())
}

/// Like `value_to_string`, but text is quoted. Used inside collections and
/// by debug traces.
pub fn value_repr(val: &Value) -> String {
    repr(val, &mut Vec::new())
}

/// Addresses of the collections currently being rendered.
type Open = Vec<*const ()>;

fn repr(val: &Value, open: &mut Open) -> String {
    match val {
        Value::Text(s) => quote(s),
        other => render(other, open),
    }
}

fn render(val: &Value, open: &mut Open) -> String {
    match val {
        // ------------------------
        // Primitive Types
        // ------------------------
        Value::Int(n) => n.to_string(),
        Value::Float(f) => format_float(*f),
        Value::Text(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Nothing => "None".to_string(),

        // ------------------------
        // Collections
        // ------------------------
        Value::List(list) => {
            let id = Rc::as_ptr(list) as *const ();
            if open.contains(&id) {
                return "[...]".to_string();
            }

            open.push(id);
            let items = list
                .borrow()
                .items
                .iter()
                .map(|item| repr(item, open))
                .collect::<Vec<_>>();
            open.pop();
            format!("[{}]", items.join(", "))
        }

        Value::Dict(dict) => {
            let id = Rc::as_ptr(dict) as *const ();
            if open.contains(&id) {
                return "{...}".to_string();
            }

            open.push(id);
            let entries = dict
                .borrow()
                .entries
                .iter()
                .map(|(k, v)| format!("{}: {}", repr(k, open), repr(v, open)))
                .collect::<Vec<_>>();
            open.pop();
            format!("{{{}}}", entries.join(", "))
        }

        // ------------------------
        // Callables
        // ------------------------
        Value::Function(func) => format!("<function {}>", func.decl.name),
        Value::Builtin(native) => format!("<builtin {}>", native.name),
    }
}

fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if f.fract() == 0.0 && f.abs() < 1e16 {
        return format!("{f:.1}");
    }
    f.to_string()
}

/* ============================================================================
 * JSON
 * ============================================================================
 */

/// Converts a value to JSON. Dictionary keys that are not text use their
/// display form.
pub fn to_json(val: &Value) -> Result<Json, PohError> {
    json_of(val, &mut Vec::new())
}

fn json_of(val: &Value, open: &mut Open) -> Result<Json, PohError> {
    if let Some(id) = collection_id(val) {
        if open.contains(&id) {
            return Err(PohError::type_error(
                "Cannot convert a collection that contains itself to JSON",
            ));
        }
        open.push(id);
    }

    let json = match val {
        Value::Int(n) => Json::from(*n),
        Value::Float(f) => Number::from_f64(*f)
            .map(Json::Number)
            .ok_or_else(|| PohError::type_error(format!("Cannot convert {} to JSON", format_float(*f))))?,
        Value::Text(s) => Json::String(s.clone()),
        Value::Bool(b) => Json::Bool(*b),
        Value::Nothing => Json::Null,
        Value::List(list) => Json::Array(
            list.borrow()
                .items
                .iter()
                .map(|item| json_of(item, open))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Dict(dict) => {
            let mut map = Map::new();
            for (k, v) in dict.borrow().entries.iter() {
                map.insert(value_to_string(k), json_of(v, open)?);
            }
            Json::Object(map)
        }
        Value::Function(_) | Value::Builtin(_) => {
            return Err(PohError::type_error("Cannot convert a function to JSON"));
        }
    };

    if collection_id(val).is_some() {
        open.pop();
    }
    Ok(json)
}

fn collection_id(val: &Value) -> Option<*const ()> {
    match val {
        Value::List(list) => Some(Rc::as_ptr(list) as *const ()),
        Value::Dict(dict) => Some(Rc::as_ptr(dict) as *const ()),
        _ => None,
    }
}

/// Converts parsed JSON into values. Collections come back mutable.
pub fn from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Nothing,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::text(s.as_str()),
        Json::Array(items) => Value::list(items.iter().map(from_json).collect(), Provenance::Mutable),
        Json::Object(map) => Value::dict(
            map.iter()
                .map(|(k, v)| (Value::text(k.as_str()), from_json(v)))
                .collect(),
            Provenance::Mutable,
        ),
    }
}

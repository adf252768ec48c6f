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

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::ast::{FunctionDecl, Provenance};
use crate::error::PohError;
use crate::interpreter::environment::Env;

/// Signature of a builtin implemented in Rust.
pub type NativeFn = fn(&[Value]) -> Result<Value, PohError>;

/// PohLang runtime value representation.
///
/// This is the core type that flows through the interpreter.
/// Every expression ultimately evaluates to one of these.
#[derive(Clone)]
pub enum Value {
    // Primitive scalars
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Nothing,

    // Collections are shared: every binding of the same literal sees the
    // same storage, and the provenance travels with it.
    List(Rc<RefCell<ListValue>>),
    Dict(Rc<RefCell<DictValue>>),

    // User function together with the scope it was defined in
    Function(Rc<Function>),

    // Host function from the builtin table
    Builtin(NativeFunction),
}

/// Ordered sequence storage.
#[derive(Debug, Clone)]
pub struct ListValue {
    pub items: Vec<Value>,
    pub provenance: Provenance,
}

/// Insertion-ordered mapping storage.
///
/// Keys compare with language equality, so `1` and `1.0` are the same key.
#[derive(Debug, Clone)]
pub struct DictValue {
    pub entries: Vec<(Value, Value)>,
    pub provenance: Provenance,
}

impl DictValue {
    pub fn new(provenance: Provenance) -> Self {
        Self {
            entries: Vec::new(),
            provenance,
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Replaces the value in place when the key exists, otherwise appends.
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn keys(&self) -> Vec<Value> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }
}

/// A closure: the declaration plus the environment active where it was
/// defined.
pub struct Function {
    pub decl: Rc<FunctionDecl>,
    pub closure: Env,
}

#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub func: NativeFn,
}

impl Value {
    pub fn list(items: Vec<Value>, provenance: Provenance) -> Self {
        Value::List(Rc::new(RefCell::new(ListValue { items, provenance })))
    }

    pub fn dict(entries: Vec<(Value, Value)>, provenance: Provenance) -> Self {
        let mut dict = DictValue::new(provenance);
        for (k, v) in entries {
            dict.insert(k, v);
        }
        Value::Dict(Rc::new(RefCell::new(dict)))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Name used in type mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "decimal",
            Value::Text(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Nothing => "nothing",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
            Value::Function(_) | Value::Builtin(_) => "function",
        }
    }

    /// Numeric view used by arithmetic and comparisons. Booleans count as
    /// 0 / 1.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Integer view, truncating decimals and parsing numeric text.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            }
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Builtin(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Nothing, Value::Nothing) => true,
            (Value::List(a), Value::List(b)) => {
                Rc::ptr_eq(a, b) || a.borrow().items == b.borrow().items
            }
            (Value::Dict(a), Value::Dict(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.entries.len() == b.entries.len()
                    && a.entries.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Nothing => write!(f, "Nothing"),
            Value::List(list) => {
                let list = list.borrow();
                write!(f, "List({:?}, {:?})", list.provenance, list.items)
            }
            Value::Dict(dict) => {
                let dict = dict.borrow();
                write!(f, "Dict({:?}, {:?})", dict.provenance, dict.entries)
            }
            Value::Function(func) => write!(f, "[Function {}]", func.decl.name),
            Value::Builtin(native) => write!(f, "[Builtin {}]", native.name),
        }
    }
}

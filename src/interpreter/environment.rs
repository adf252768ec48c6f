/*
 * ============================================================================
 * PohLang - Phrasal Programming Language
 * ============================================================================
 *
 *  File:     environment.rs
 *  Purpose:  Parent-linked scope frames and the assignment rules that walk
 *            them.
 *
 * ----------------------------------------------------------------------------
 *  License:
 * ----------------------------------------------------------------------------
 *  This file is part of the PohLang programming language project.
 *
 *  PohLang is dual-licensed under the terms of:
 *    - The MIT license
 *    - The Apache License, Version 2.0
 *
 *  You may choose either license to govern your use of this software.
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under these licenses is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ============================================================================
 */

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::PohError;
use crate::value::Value;

/// Shared handle to a scope frame. Closures keep their defining frame alive
/// through this handle.
pub type Env = Rc<RefCell<Environment>>;

/// The role of a frame in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Global,
    Function,
    Block,
    Module,
}

#[derive(Debug, Clone)]
pub struct Environment {
    pub values: HashMap<String, Value>,
    parent: Option<Env>,
    kind: FrameKind,
}

impl Environment {
    pub fn new(parent: Option<Env>, kind: FrameKind) -> Self {
        Self {
            values: HashMap::new(),
            parent,
            kind,
        }
    }

    /// The single root frame of a running program.
    pub fn global() -> Env {
        Rc::new(RefCell::new(Self::new(None, FrameKind::Global)))
    }

    /// A fresh frame chained to `parent`.
    pub fn child(parent: &Env, kind: FrameKind) -> Env {
        Rc::new(RefCell::new(Self::new(Some(parent.clone()), kind)))
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Binds `name` in this frame, shadowing any outer binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Reads `name`, walking outward through the parents.
    pub fn get(&self, name: &str) -> Result<Value, PohError> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }

        match &self.parent {
            Some(parent) => parent.borrow().get(name),
            None => Err(PohError::reference_error(format!(
                "Undefined variable '{name}'"
            ))),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
            || self
                .parent
                .as_ref()
                .map_or(false, |parent| parent.borrow().has(name))
    }

    /// Assignment with shadow-avoiding update.
    ///
    /// A name bound in this frame is updated here. Otherwise the nearest
    /// ancestor that already binds it is updated. A brand-new name is bound
    /// in this frame, whatever its kind.
    pub fn assign(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return;
        }

        let value = match &self.parent {
            Some(parent) => match parent.borrow_mut().assign_existing(name, value) {
                None => return,
                Some(value) => value,
            },
            None => value,
        };

        self.values.insert(name.to_string(), value);
    }

    /// Updates the nearest frame that binds `name`. Hands the value back
    /// when no frame does.
    fn assign_existing(&mut self, name: &str, value: Value) -> Option<Value> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return None;
        }

        match &self.parent {
            Some(parent) => parent.borrow_mut().assign_existing(name, value),
            None => Some(value),
        }
    }
}

/*
 * ============================================================================
 * PohLang - Phrasal Programming Language
 * ============================================================================
 *
 *  File:     statements.rs
 *  Purpose:  Statement execution and control flow signals.
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

/*!
 * Statement Execution
 *
 * This module executes every PohLang statement form:
 *
 *  - Output and input (`Write`, `Ask for`)
 *  - Variables (`Set`, `Increase`, `Decrease`)
 *  - Control flow (`If`, `While`, `Repeat`, `Begin`, `Stop`, `Skip`)
 *  - Functions (`Make`, `Return`, `Use`, `Call`)
 *  - Imports and debug switches
 *
 * Collection mutation lives in `collections.rs`, imports in `modules.rs`.
 */

use std::rc::Rc;

use crate::ast::{AskKind, BinaryOp, Expr, Stmt, StmtKind};
use crate::diagnostics::suggestion_hint;
use crate::error::PohError;
use crate::interpreter::display::{value_repr, value_to_string};
use crate::interpreter::environment::{Env, Environment, FrameKind};
use crate::interpreter::helpers::is_truthy;
use crate::interpreter::{Interpreter, STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::value::{Function, Value};

/* ============================================================================
 * Execution Control Signals
 * ============================================================================
 */

/// How a statement or block finished.
#[derive(Debug)]
pub enum ExecSignal {
    /// Normal fall-through execution.
    Completed,

    /// `Return` unwinding to the nearest call.
    Returned(Value),

    /// `Stop` unwinding to the nearest loop.
    Broke,

    /// `Skip` unwinding to the nearest loop.
    Continued,
}

/* ============================================================================
 * Statement Execution Entry Point
 * ============================================================================
 */

impl Interpreter {
    /// Executes a single statement in `env`.
    ///
    /// Errors leaving this function carry a location: their own, or this
    /// statement's line.
    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt, env: &Env) -> Result<ExecSignal, PohError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.exec_located(stmt, env))
    }

    fn exec_located(&mut self, stmt: &Stmt, env: &Env) -> Result<ExecSignal, PohError> {
        self.trace(stmt.span, format_args!("Executing: {}", stmt.kind.name()));

        self.exec_kind(stmt, env)
            .map_err(|err| self.locate(err, stmt.span))
    }

    /// Runs statements in order until one of them unwinds.
    pub(crate) fn exec_block(&mut self, body: &[Stmt], env: &Env) -> Result<ExecSignal, PohError> {
        for stmt in body {
            match self.exec_stmt(stmt, env)? {
                ExecSignal::Completed => {}
                signal => return Ok(signal),
            }
        }
        Ok(ExecSignal::Completed)
    }

    fn exec_kind(&mut self, stmt: &Stmt, env: &Env) -> Result<ExecSignal, PohError> {
        match &stmt.kind {
            /* ------------------------------------------------------------------
             * Output / Input
             * ---------------------------------------------------------------- */
            StmtKind::Write(expr) => {
                let value = self.eval_expr(expr, env)?;
                self.emit(&value_to_string(&value));
            }

            StmtKind::Ask { name, kind } => {
                let raw = self.read_input(&format!("Enter {name}: "))?;
                let value = match kind {
                    AskKind::Text => Value::Text(raw),
                    AskKind::Number => match raw.trim().parse::<i64>() {
                        Ok(n) => Value::Int(n),
                        Err(_) => {
                            self.log(format_args!("Invalid number input for {name}, defaulting to 0"));
                            Value::Int(0)
                        }
                    },
                    AskKind::Decimal => match raw.trim().parse::<f64>() {
                        Ok(f) => Value::Float(f),
                        Err(_) => {
                            self.log(format_args!("Invalid decimal input for {name}, defaulting to 0.0"));
                            Value::Float(0.0)
                        }
                    },
                };
                self.bind(stmt, env, name, value);
            }

            /* ------------------------------------------------------------------
             * Variables
             * ---------------------------------------------------------------- */
            StmtKind::Set { name, value } => {
                let value = self.eval_expr(value, env)?;
                self.bind(stmt, env, name, value);
            }

            StmtKind::Increase { name, amount } => {
                let value = self.step(env, name, amount, BinaryOp::Add)?;
                self.bind(stmt, env, name, value);
            }

            StmtKind::Decrease { name, amount } => {
                let value = self.step(env, name, amount, BinaryOp::Subtract)?;
                self.bind(stmt, env, name, value);
            }

            /* ------------------------------------------------------------------
             * Control Flow
             * ---------------------------------------------------------------- */
            StmtKind::If {
                condition,
                then_body,
                else_body,
            } => {
                let test = self.eval_expr(condition, env)?;
                let branch = if is_truthy(&test) {
                    Some(then_body)
                } else {
                    else_body.as_ref()
                };

                if let Some(body) = branch {
                    let scope = Environment::child(env, FrameKind::Block);
                    let signal = self.exec_block(body, &scope)?;
                    return Ok(self.settle(signal));
                }
            }

            StmtKind::Block(body) => {
                let scope = Environment::child(env, FrameKind::Block);
                let signal = self.exec_block(body, &scope)?;
                return Ok(self.settle(signal));
            }

            StmtKind::While { condition, body } => loop {
                let test = self.eval_expr(condition, env)?;
                if !is_truthy(&test) {
                    break;
                }

                let scope = Environment::child(env, FrameKind::Block);
                match self.loop_body(body, &scope)? {
                    ExecSignal::Broke => break,
                    ExecSignal::Returned(value) => return Ok(ExecSignal::Returned(value)),
                    ExecSignal::Completed | ExecSignal::Continued => {}
                }
            },

            StmtKind::Repeat { count, body } => {
                let subject = self.eval_expr(count, env)?;
                return self.repeat(&subject, body, env);
            }

            StmtKind::Stop => return Ok(ExecSignal::Broke),
            StmtKind::Skip => return Ok(ExecSignal::Continued),

            /* ------------------------------------------------------------------
             * Functions
             * ---------------------------------------------------------------- */
            StmtKind::Function(decl) => {
                // Nested definitions are plain values in the current scope.
                let func = Value::Function(Rc::new(Function {
                    decl: decl.clone(),
                    closure: env.clone(),
                }));
                env.borrow_mut().define(decl.name.clone(), func);
            }

            StmtKind::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Nothing,
                };
                return Ok(ExecSignal::Returned(value));
            }

            StmtKind::Use { name, args } => {
                let callee = match self.functions.get(name) {
                    Some(callee) => callee.clone(),
                    None => {
                        let hint = suggestion_hint(name, self.functions.keys().map(String::as_str));
                        return Err(PohError::reference_error(format!(
                            "Unknown function '{name}'.{hint}"
                        )));
                    }
                };
                let args = self.eval_args(args, env)?;
                self.call_value(&callee, args, stmt.span)?;
            }

            StmtKind::CallValue { callee, args } => {
                let callee = self.eval_expr(callee, env)?;
                if !callee.is_callable() {
                    return Err(PohError::type_error("Target is not callable"));
                }
                let args = self.eval_args(args, env)?;
                self.call_value(&callee, args, stmt.span)?;
            }

            /* ------------------------------------------------------------------
             * Modules & Debugging
             * ---------------------------------------------------------------- */
            StmtKind::Import { path, system } => {
                self.import(path, *system, stmt.span, env)?;
            }

            StmtKind::Debug(enabled) => {
                if *enabled {
                    self.debug = true;
                    self.log(format_args!("Debug enabled at line {}", stmt.span.line));
                } else {
                    self.log(format_args!("Debug disabled at line {}", stmt.span.line));
                    self.debug = false;
                }
            }

            /* ------------------------------------------------------------------
             * Collections
             * ---------------------------------------------------------------- */
            StmtKind::AddToList { value, target } => {
                self.add_to_list(stmt.span, value, target, env)?;
            }

            StmtKind::RemoveFromList { value, target } => {
                self.remove_from_list(stmt.span, value, target, env)?;
            }

            StmtKind::AddToDict { key, value, target } => {
                self.add_to_dict(stmt.span, key, value, target, env)?;
            }

            StmtKind::RemoveFromDict { key, target } => {
                self.remove_from_dict(stmt.span, key, target, env)?;
            }

            StmtKind::SetNthItem {
                index,
                container,
                value,
                phrase,
            } => {
                self.set_nth_item(stmt.span, index, container, value, phrase, env)?;
            }

            StmtKind::RemoveLastItem(container) => {
                self.remove_last_item(stmt.span, container, env)?;
            }
        }

        Ok(ExecSignal::Completed)
    }

    /* ========================================================================
     * Helpers
     * ======================================================================== */

    /// Assigns and traces the new value.
    fn bind(&mut self, stmt: &Stmt, env: &Env, name: &str, value: Value) {
        if self.debug {
            self.trace(stmt.span, format_args!("Set variable '{name}' = {}", value_repr(&value)));
        }
        env.borrow_mut().assign(name, value);
    }

    /// `Increase` / `Decrease`: an unbound name starts from 0.
    fn step(
        &mut self,
        env: &Env,
        name: &str,
        amount: &Expr,
        op: BinaryOp,
    ) -> Result<Value, PohError> {
        let current = {
            let scope = env.borrow();
            if scope.has(name) {
                scope.get(name)?
            } else {
                Value::Int(0)
            }
        };
        let amount = self.eval_expr(amount, env)?;
        self.arithmetic(op, &current, &amount)
    }

    /// `Stop` / `Skip` outside every loop end the branch quietly.
    fn settle(&self, signal: ExecSignal) -> ExecSignal {
        match signal {
            ExecSignal::Broke | ExecSignal::Continued if self.loop_depth == 0 => ExecSignal::Completed,
            other => other,
        }
    }

    fn loop_body(&mut self, body: &[Stmt], scope: &Env) -> Result<ExecSignal, PohError> {
        self.loop_depth += 1;
        let signal = self.exec_block(body, scope);
        self.loop_depth -= 1;
        signal
    }

    /// `Repeat`: a count, the items of a list or the keys of a dictionary.
    /// Collections bind the current element as `it`.
    fn repeat(&mut self, subject: &Value, body: &[Stmt], env: &Env) -> Result<ExecSignal, PohError> {
        let items = match subject {
            Value::List(list) => Some(list.borrow().items.clone()),
            Value::Dict(dict) => Some(dict.borrow().keys()),
            _ => None,
        };

        let rounds = match &items {
            Some(items) => items.len(),
            None => subject.as_int().map_or(0, |n| n.max(0) as usize),
        };

        for round in 0..rounds {
            let scope = Environment::child(env, FrameKind::Block);
            if let Some(items) = &items {
                scope.borrow_mut().define("it", items[round].clone());
            }

            match self.loop_body(body, &scope)? {
                ExecSignal::Broke => break,
                ExecSignal::Returned(value) => return Ok(ExecSignal::Returned(value)),
                ExecSignal::Completed | ExecSignal::Continued => {}
            }
        }

        Ok(ExecSignal::Completed)
    }
}

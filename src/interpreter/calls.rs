/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     calls.rs
 * Purpose:  The function-call protocol for user functions and builtins.
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

use crate::ast::{Expr, Param};
use crate::diagnostics::{location_prefix, suggestion_hint};
use crate::error::PohError;
use crate::interpreter::display::value_repr;
use crate::interpreter::environment::{Env, Environment, FrameKind};
use crate::interpreter::ExecSignal;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{Function, Value};

impl Interpreter {
    /// `name(args)`: the function registry first, then a callable bound
    /// under that name.
    pub(crate) fn call_named(
        &mut self,
        name: &str,
        args: Vec<Value>,
        env: &Env,
        call: &Expr,
    ) -> Result<Value, PohError> {
        if let Some(callee) = self.functions.get(name).cloned() {
            return self.call_value(&callee, args, call.span);
        }

        let bound = env.borrow().get(name).ok();
        match bound {
            Some(callee) if callee.is_callable() => self.call_value(&callee, args, call.span),
            _ => {
                let hint = suggestion_hint(name, self.functions.keys().map(String::as_str));
                Err(PohError::reference_error(format!(
                    "Unknown function '{name}'.{hint}"
                )))
            }
        }
    }

    /// Calls any callable value with already-evaluated arguments.
    pub(crate) fn call_value(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
        site: Span,
    ) -> Result<Value, PohError> {
        match callee {
            Value::Builtin(native) => (native.func)(&args),
            Value::Function(func) => self.call_function(func.clone(), args, site),
            _ => Err(PohError::type_error("Target is not callable")),
        }
    }

    /// Invokes a user function.
    ///
    /// This function:
    /// 1. Checks the argument count against the declaration
    /// 2. Creates a function frame chained to the closure, not the caller
    /// 3. Binds arguments, evaluating defaults of omitted parameters in the
    ///    closure
    /// 4. Executes the body until it returns or falls off the end
    ///
    /// An error escaping the body gets this call site appended to its trace.
    fn call_function(
        &mut self,
        func: Rc<Function>,
        args: Vec<Value>,
        site: Span,
    ) -> Result<Value, PohError> {
        let decl = &func.decl;
        check_arity(&decl.name, decl.line, &decl.params, args.len())?;

        if self.call_depth >= self.config.max_call_depth {
            return Err(PohError::runtime_error(format!(
                "Maximum call depth of {} exceeded in function '{}'",
                self.config.max_call_depth, decl.name
            )));
        }

        if self.debug {
            let shown = decl
                .params
                .iter()
                .zip(&args)
                .map(|(param, arg)| format!("{}={}", param.name, value_repr(arg)))
                .collect::<Vec<_>>();
            self.trace(site, format!("Enter function {}({})", decl.name, shown.join(", ")));
        }

        let frame = Environment::child(&func.closure, FrameKind::Function);
        let mut args = args.into_iter();
        for param in &decl.params {
            let value = match (args.next(), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval_expr(default, &func.closure)?,
                (None, None) => Value::Nothing,
            };
            frame.borrow_mut().define(param.name.clone(), value);
        }

        self.call_depth += 1;
        let outer_loops = std::mem::replace(&mut self.loop_depth, 0);
        let outcome = self.exec_block(&decl.body, &frame);
        self.loop_depth = outer_loops;
        self.call_depth -= 1;

        let result = match outcome {
            Ok(ExecSignal::Returned(value)) => value,
            Ok(_) => Value::Nothing,
            Err(err) => {
                let frame = format!(
                    "in function '{}' called at {}",
                    decl.name,
                    location_prefix(&self.current_file(), Some(Span::line(site.line)))
                );
                return Err(err.with_frame(frame));
            }
        };

        if self.debug {
            self.trace(site, format!("Return {}", value_repr(&result)));
        }

        Ok(result)
    }
}

fn check_arity(
    name: &str,
    line: usize,
    params: &[Param],
    given: usize,
) -> Result<(), PohError> {
    let total = params.len();
    let required = params
        .iter()
        .rposition(|p| p.default.is_none())
        .map_or(0, |i| i + 1);

    if given >= required && given <= total {
        return Ok(());
    }

    let expected = if required == total {
        format!("{total}")
    } else if given < required {
        format!("at least {required}")
    } else {
        format!("at most {total}")
    };

    Err(PohError::arity_error(format!(
        "Function '{name}' defined at line {line} expects {expected} argument(s) but got {given}"
    )))
}

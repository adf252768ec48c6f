/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     interpreter/mod.rs
 * Purpose:  Runtime context, configuration and the two host entry points.
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

pub mod builtins;
pub mod calls;
pub mod collections;
pub mod display;
pub mod environment;
pub mod expressions;
pub mod helpers;
pub mod modules;
pub mod statements;

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::ast::{Program, StmtKind};
use crate::diagnostics::{location_prefix, Warning};
use crate::error::PohError;
use crate::parser::parse_program;
use crate::span::Span;
use crate::value::{Function, Value};

use environment::{Env, Environment};
pub use statements::ExecSignal;

/// Free stack below which evaluation switches to a fresh segment.
pub(crate) const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each additional stack segment.
pub(crate) const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Host hook answering `Ask for` prompts.
pub type InputFn = Box<dyn FnMut(&str) -> io::Result<String>>;

/// Host hook receiving every line the program writes.
pub type OutputFn = Box<dyn FnMut(&str)>;

/// Knobs a host sets before running anything.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Start with debug tracing on, as if the program began with `Debug on`.
    pub debug: bool,

    /// Where `Import system "name"` looks for `name.poh`.
    /// Defaults to `<base_dir>/stdlib`.
    pub system_dir: Option<PathBuf>,

    /// Base directory for relative imports of `execute` sources.
    /// Defaults to the process working directory.
    pub base_dir: Option<PathBuf>,

    /// Deepest allowed nesting of user function calls.
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            debug: false,
            system_dir: None,
            base_dir: None,
            max_call_depth: 400,
        }
    }
}

/// A PohLang runtime.
///
/// One instance owns the global scope, the function registry, the module
/// export registry and the import bookkeeping for everything it runs.
///
/// # Example
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let lines = Rc::new(RefCell::new(Vec::new()));
/// let sink = lines.clone();
///
/// let mut interp = pohlang::Interpreter::new()
///     .with_output(move |line| sink.borrow_mut().push(line.to_string()));
/// interp.execute("Write 2 plus 3", "demo.poh").unwrap();
///
/// assert_eq!(lines.borrow().as_slice(), ["5"]);
/// ```
pub struct Interpreter {
    pub(crate) config: InterpreterConfig,
    pub(crate) globals: Env,

    /// Top-level user functions and builtins, callable by name.
    pub(crate) functions: HashMap<String, Value>,

    /// Exported bindings per imported file stem.
    pub(crate) modules: HashMap<String, HashMap<String, Value>>,

    pub(crate) import_stack: Vec<PathBuf>,
    pub(crate) loaded_files: HashSet<PathBuf>,
    pub(crate) file_stack: Vec<String>,
    pub(crate) base_dirs: Vec<PathBuf>,

    pub(crate) call_depth: usize,
    pub(crate) loop_depth: usize,
    pub(crate) debug: bool,
    pub(crate) warnings: Vec<Warning>,

    input: InputFn,
    output: OutputFn,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        let mut interp = Self {
            debug: config.debug,
            config,
            globals: Environment::global(),
            functions: HashMap::new(),
            modules: HashMap::new(),
            import_stack: Vec::new(),
            loaded_files: HashSet::new(),
            file_stack: Vec::new(),
            base_dirs: Vec::new(),
            call_depth: 0,
            loop_depth: 0,
            warnings: Vec::new(),
            input: Box::new(read_stdin_line),
            output: Box::new(|line| println!("{line}")),
        };

        builtins::install(&mut interp.functions);
        interp
    }

    /// Replaces the input hook. It receives the prompt, e.g. `Enter name: `.
    pub fn with_input<F>(mut self, input: F) -> Self
    where
        F: FnMut(&str) -> io::Result<String> + 'static,
    {
        self.input = Box::new(input);
        self
    }

    /// Replaces the output hook.
    pub fn with_output<F>(mut self, output: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.output = Box::new(output);
        self
    }

    /// Parses and runs `source` in the global scope, attributing
    /// diagnostics to `filename`.
    pub fn execute(&mut self, source: &str, filename: &str) -> Result<(), PohError> {
        let program = parse_program(source, filename)?;

        self.file_stack.push(filename.to_string());
        let globals = self.globals.clone();
        let result = self
            .run_program(&program, &globals)
            .map_err(|err| self.attribute(err));
        self.file_stack.pop();

        result
    }

    /// Resolves, parses and runs a file as a module.
    pub fn execute_file(&mut self, path: impl AsRef<Path>) -> Result<(), PohError> {
        self.run_file(path.as_ref(), None)
            .map_err(|err| self.attribute(err))
    }

    /// Deprecation warnings raised so far, oldest first.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The warnings as a JSON array.
    pub fn warnings_json(&self) -> Result<String, PohError> {
        serde_json::to_string_pretty(&self.warnings)
            .map_err(|err| PohError::runtime_error(format!("Cannot encode warnings: {err}")))
    }

    /// Exported bindings of an imported file, keyed by its stem.
    pub fn module_exports(&self, name: &str) -> Option<&HashMap<String, Value>> {
        self.modules.get(name)
    }

    /// Reads a binding from the global scope.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().values.get(name).cloned()
    }

    /* ========================================================================
     * Program Execution
     * ======================================================================== */

    /// Runs a parsed program in `env`.
    ///
    /// Top-level functions are hoisted first: they are registered by name
    /// and bound in `env`, closing over it. Everything else then runs in
    /// order. A top-level `Return` ends the program.
    pub(crate) fn run_program(&mut self, program: &Program, env: &Env) -> Result<(), PohError> {
        for stmt in &program.statements {
            if let StmtKind::Function(decl) = &stmt.kind {
                let func = Value::Function(Rc::new(Function {
                    decl: decl.clone(),
                    closure: env.clone(),
                }));
                self.functions.insert(decl.name.clone(), func.clone());
                env.borrow_mut().define(decl.name.clone(), func);
            }
        }

        for stmt in &program.statements {
            if matches!(stmt.kind, StmtKind::Function(_)) {
                continue;
            }

            if let ExecSignal::Returned(_) = self.exec_stmt(stmt, env)? {
                break;
            }
        }

        Ok(())
    }

    /* ========================================================================
     * Output, Tracing & Warnings
     * ======================================================================== */

    pub(crate) fn emit(&mut self, line: &str) {
        (self.output)(line);
    }

    pub(crate) fn read_input(&mut self, prompt: &str) -> Result<String, PohError> {
        (self.input)(prompt)
            .map_err(|err| PohError::runtime_error(format!("Could not read input: {err}")))
    }

    pub(crate) fn current_file(&self) -> String {
        self.file_stack
            .last()
            .cloned()
            .unwrap_or_else(|| String::from("<stdin>"))
    }

    /// Emits `[file: Line N: Col M] message` when tracing is on.
    pub(crate) fn trace(&mut self, span: Span, message: impl Display) {
        if self.debug {
            let line = format!("{} {}", location_prefix(&self.current_file(), Some(span)), message);
            self.emit(&line);
        }
    }

    /// Emits `[debug] message` when tracing is on.
    pub(crate) fn log(&mut self, message: impl Display) {
        if self.debug {
            self.emit(&format!("[debug] {message}"));
        }
    }

    /// Records a deprecation warning and shows it right away.
    pub(crate) fn warn(&mut self, span: Span, message: &str) {
        let warning = Warning::new(self.current_file(), Some(span), message);
        self.emit(&warning.render());
        self.warnings.push(warning);
    }

    /// Pins an error to `span` in the current file, unless an inner
    /// location was already recorded.
    pub(crate) fn locate(&self, err: PohError, span: Span) -> PohError {
        if err.span.is_some() {
            return err;
        }
        err.at(span).in_file(self.current_file())
    }

    /// Gives an error that never met a location at least the current file.
    fn attribute(&self, err: PohError) -> PohError {
        if err.span.is_none() && err.file == "<stdin>" {
            return err.in_file(self.current_file());
        }
        err
    }

    /* ========================================================================
     * Resolution Base
     * ======================================================================== */

    /// Directory relative imports resolve against right now.
    pub(crate) fn base_dir(&self) -> PathBuf {
        if let Some(dir) = self.base_dirs.last() {
            return dir.clone();
        }
        self.config
            .base_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub(crate) fn system_dir(&self) -> PathBuf {
        match &self.config.system_dir {
            Some(dir) => dir.clone(),
            None => self.base_dir().join("stdlib"),
        }
    }
}

fn read_stdin_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

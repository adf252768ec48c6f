/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     lib.rs
 * Purpose:  Crate root for the PohLang runtime.
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

//! PohLang turns English-like sentences into running programs:
//!
//! ```text
//! Make greet with name set to "friend"
//!     Write "Hello " plus name
//! End
//! Use greet with "Ada"
//! ```
//!
//! # Pipeline
//! ```text
//! Source → Lines → Statements (→ Fragments → Tokens → Expressions) → AST → Interpreter
//! ```
//!
//! Hosts drive everything through [`Interpreter::execute`] and
//! [`Interpreter::execute_file`]; all program I/O goes through the hooks
//! given to [`Interpreter::with_input`] and [`Interpreter::with_output`].

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod value;

pub use diagnostics::{DiagnosticPrinter, Warning};
pub use error::{ErrorKind, PohError};
pub use interpreter::{Interpreter, InterpreterConfig};
pub use parser::parse_program;
pub use value::Value;

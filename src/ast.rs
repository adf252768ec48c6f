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

//! Abstract syntax tree produced by the parser and walked by the
//! interpreter.

pub mod expr;
pub mod param;
pub mod stmt;

pub use expr::{BinaryOp, Expr, ExprKind, Literal, Predicate, Provenance, UnaryOp};
pub use param::Param;
pub use stmt::{AskKind, FunctionDecl, Stmt, StmtKind};

/// Root of the tree: the top-level statements of one source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

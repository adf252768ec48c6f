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

use std::rc::Rc;

use crate::ast::{Expr, Param};
use crate::span::Span;

/// A statement node together with the line it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: usize) -> Self {
        Self {
            kind,
            span: Span::line(line),
        }
    }
}

/// What `Ask for` converts the typed answer into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskKind {
    Text,
    Number,
    Decimal,
}

/// A `Make` declaration. Shared between the AST and every closure built
/// from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,

    /// Line of the `Make` header.
    pub line: usize,
}

/// All executable PohLang statements.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /* ----------------------------- */
    /* INPUT / OUTPUT                */
    /* ----------------------------- */

    Write(Expr),

    Ask {
        name: String,
        kind: AskKind,
    },

    /* ----------------------------- */
    /* VARIABLES                     */
    /* ----------------------------- */

    Set {
        name: String,
        value: Expr,
    },

    Increase {
        name: String,
        amount: Expr,
    },

    Decrease {
        name: String,
        amount: Expr,
    },

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */

    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },

    While {
        condition: Expr,
        body: Vec<Stmt>,
    },

    /// Counted loop, or iteration over a list / dictionary keys.
    Repeat {
        count: Expr,
        body: Vec<Stmt>,
    },

    /// `Begin ... End`
    Block(Vec<Stmt>),

    Stop,
    Skip,

    /* ----------------------------- */
    /* FUNCTIONS                     */
    /* ----------------------------- */

    Function(Rc<FunctionDecl>),

    Return(Option<Expr>),

    /// `Use name with args`: looks the name up in the function registry.
    Use {
        name: String,
        args: Vec<Expr>,
    },

    /// `Call target with args`: calls whatever value `target` evaluates to.
    CallValue {
        callee: Expr,
        args: Vec<Expr>,
    },

    /* ----------------------------- */
    /* MODULES                       */
    /* ----------------------------- */

    Import {
        path: String,
        system: bool,
    },

    Debug(bool),

    /* ----------------------------- */
    /* COLLECTIONS                   */
    /* ----------------------------- */

    AddToList {
        value: Expr,
        target: Expr,
    },

    RemoveFromList {
        value: Expr,
        target: Expr,
    },

    AddToDict {
        key: Expr,
        value: Expr,
        target: Expr,
    },

    RemoveFromDict {
        key: Expr,
        target: Expr,
    },

    /// `Set the <phrase> item in container to value` (1-based).
    SetNthItem {
        index: Expr,
        container: Expr,
        value: Expr,
        phrase: String,
    },

    RemoveLastItem(Expr),
}

impl StmtKind {
    /// Name shown by `Executing:` debug traces.
    pub fn name(&self) -> &'static str {
        match self {
            StmtKind::Write(_) => "Write",
            StmtKind::Ask { .. } => "Ask",
            StmtKind::Set { .. } => "Set",
            StmtKind::Increase { .. } => "Increase",
            StmtKind::Decrease { .. } => "Decrease",
            StmtKind::If { .. } => "If",
            StmtKind::While { .. } => "While",
            StmtKind::Repeat { .. } => "Repeat",
            StmtKind::Block(_) => "Block",
            StmtKind::Stop => "Stop",
            StmtKind::Skip => "Skip",
            StmtKind::Function(_) => "FunctionDef",
            StmtKind::Return(_) => "Return",
            StmtKind::Use { .. } => "Use",
            StmtKind::CallValue { .. } => "CallValue",
            StmtKind::Import { .. } => "Import",
            StmtKind::Debug(_) => "Debug",
            StmtKind::AddToList { .. } => "AddToList",
            StmtKind::RemoveFromList { .. } => "RemoveFromList",
            StmtKind::AddToDict { .. } => "AddToDict",
            StmtKind::RemoveFromDict { .. } => "RemoveFromDict",
            StmtKind::SetNthItem { .. } => "SetNthItem",
            StmtKind::RemoveLastItem(_) => "RemoveLastItem",
        }
    }
}

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

use std::fmt;

use crate::span::Span;

/// An expression node together with the location of its first token.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn boxed(self) -> Box<Expr> {
        Box::new(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Subtract,
            "*" => BinaryOp::Multiply,
            "/" => BinaryOp::Divide,
            "==" => BinaryOp::Equal,
            "!=" => BinaryOp::NotEqual,
            ">" => BinaryOp::Greater,
            ">=" => BinaryOp::GreaterEqual,
            "<" => BinaryOp::Less,
            "<=" => BinaryOp::LessEqual,
            "&&" => BinaryOp::And,
            "||" => BinaryOp::Or,
            _ => return None,
        };
        Some(op)
    }
}

/// Numeric predicates usable as `x is even` or `all xs are positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Even,
    Odd,
    Positive,
    Negative,
}

impl Predicate {
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "even" => Some(Predicate::Even),
            "odd" => Some(Predicate::Odd),
            "positive" => Some(Predicate::Positive),
            "negative" => Some(Predicate::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Predicate::Even => "even",
            Predicate::Odd => "odd",
            Predicate::Positive => "positive",
            Predicate::Negative => "negative",
        };
        f.write_str(word)
    }
}

/// Where a list or dictionary literal came from; decides what happens when
/// the collection is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// `Make a list of ...`: every mutation is an error.
    Strict,

    /// `Make a mutable list of ...`: mutation always succeeds.
    Mutable,

    /// `List contains ...`: mutation succeeds with a deprecation warning.
    Legacy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// `name(args...)`, builtin aliases and `Tell me the length of`.
    Call {
        name: String,
        args: Vec<Expr>,
    },

    Predicate {
        predicate: Predicate,
        operand: Box<Expr>,
    },

    List {
        items: Vec<Expr>,
        provenance: Provenance,
    },

    Dict {
        entries: Vec<(Expr, Expr)>,
        provenance: Provenance,
    },

    /// `container at key`: 0-based position or dictionary key.
    At {
        container: Box<Expr>,
        key: Box<Expr>,
    },

    /// `Take the <phrase> item from container`: 1-based position.
    NthItem {
        index: Box<Expr>,
        container: Box<Expr>,
        phrase: String,
    },

    KeysOf(Box<Expr>),
    ValuesOf(Box<Expr>),

    Contains {
        collection: Box<Expr>,
        needle: Box<Expr>,
    },

    AllPredicate {
        collection: Box<Expr>,
        predicate: Predicate,
    },

    AnyPredicate {
        collection: Box<Expr>,
        predicate: Predicate,
    },

    RandomInt {
        low: Box<Expr>,
        high: Box<Expr>,
    },

    RandomFloat {
        low: Box<Expr>,
        high: Box<Expr>,
    },

    RandomFrom(Box<Expr>),

    ParseJson(Box<Expr>),

    ToJson {
        value: Box<Expr>,
        pretty: bool,
    },
}

/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     param.rs
 * Purpose:  Defines the AST structure for function parameters
 *
 * Parameters are declared in a `Make` header:
 *  - `Make greet with name, greeting set to "Hello"`
 *
 * A default expression is kept unevaluated and is only evaluated when a
 * call omits the argument.
 *
 * License:
 * This file is part of the PohLang programming language project.
 *
 * PohLang is dual-licensed under the terms of:
 *   - The MIT License
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

use crate::ast::Expr;

/// Represents **one declared parameter** of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name (identifier)
    pub name: String,

    /// Optional default value:
    /// `Make greet with greeting set to "Hello"`
    pub default: Option<Expr>,
}

impl Param {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }
}

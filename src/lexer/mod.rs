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

/// Token kinds and the `Token` record.
pub mod token;

/// Character-level tokenizer for expression fragments.
pub mod lexer;

/// English connective → operator rewriting.
pub mod phrases;

/// Statement vocabulary and literal words.
pub mod keywords;

pub use lexer::tokenize;
pub use phrases::{normalize_arithmetic, normalize_condition, Condition};
pub use token::{Token, TokenKind};

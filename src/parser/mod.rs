/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     parser/mod.rs
 * Purpose:  Root module for the PohLang line-driven parser.
 *
 * This module wires together all parser sub-modules, including:
 *   - Core parser control logic
 *   - Statement parsing
 *   - Expression parsing
 *   - Shared helper utilities
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

/// Core parser orchestration:
/// - Owns the `Parser` struct and the cleaned source lines
/// - Exposes the main `parse_program(source, file)` entry point
pub mod parser;

/// Statement-level parsing:
/// - phrasal collection statements
/// - If / While / Repeat / Begin / Make blocks and their inline forms
/// - single-line statements and the unknown-statement fallback
pub mod statements;

/// Expression-level parsing:
/// - phrasal templates
/// - or → and → comparison → term → factor → unary → primary
/// - conditions with predicate shorthand
pub mod expressions;

/// Shared parser helpers:
/// - token cursor
/// - string-aware templates and splitting
/// - comments and ordinals
pub mod helpers;

pub use expressions::{parse_condition, parse_expression};
pub use parser::{parse_program, Parser};

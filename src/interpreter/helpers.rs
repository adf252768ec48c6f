/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     helpers.rs
 * Purpose:  Small value predicates shared by statements and expressions.
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

use crate::ast::Predicate;
use crate::value::Value;

/// Determines whether a runtime `Value` is considered **truthy** in PohLang.
///
/// Used by `If`, `While` and the logical operators.
///
/// # Truthiness Rules
/// The following values are considered **false**:
/// - `False`
/// - `None`
/// - `0` and `0.0`
/// - empty text, lists and dictionaries
///
/// Everything else is true, functions included.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Nothing => false,
        Value::Int(n) => *n != 0,
        Value::Float(f) => *f != 0.0,
        Value::Text(s) => !s.is_empty(),
        Value::List(list) => !list.borrow().items.is_empty(),
        Value::Dict(dict) => !dict.borrow().entries.is_empty(),
        Value::Function(_) | Value::Builtin(_) => true,
    }
}

/// Applies a numeric predicate. `None` when the value is not a number.
///
/// `even` and `odd` look at the integer part.
pub fn test_predicate(predicate: Predicate, value: &Value) -> Option<bool> {
    let n = value.as_number()?;
    let result = match predicate {
        Predicate::Even => (n.trunc() as i64) % 2 == 0,
        Predicate::Odd => (n.trunc() as i64) % 2 != 0,
        Predicate::Positive => n > 0.0,
        Predicate::Negative => n < 0.0,
    };
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Provenance;

    #[test]
    fn empty_things_are_falsy() {
        assert!(!is_truthy(&Value::Int(0)));
        assert!(!is_truthy(&Value::text("")));
        assert!(!is_truthy(&Value::list(vec![], Provenance::Mutable)));
        assert!(!is_truthy(&Value::Nothing));
        assert!(is_truthy(&Value::Float(0.1)));
        assert!(is_truthy(&Value::text("0")));
    }

    #[test]
    fn predicates_need_numbers() {
        assert_eq!(test_predicate(Predicate::Even, &Value::Int(4)), Some(true));
        assert_eq!(test_predicate(Predicate::Odd, &Value::Int(-3)), Some(true));
        assert_eq!(test_predicate(Predicate::Positive, &Value::Float(-0.5)), Some(false));
        assert_eq!(test_predicate(Predicate::Negative, &Value::text("-1")), None);
    }
}

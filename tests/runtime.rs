/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     runtime.rs
 * Purpose:  Arithmetic, I/O hooks, debug tracing, builtins and JSON.
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

mod common;

use std::io;

use common::{run_err, run_ok, Session};
use pohlang::{DiagnosticPrinter, Interpreter, InterpreterConfig, Value};

/* ============================================================================
 * Arithmetic & Conditions
 * ============================================================================
 */

#[test]
fn phrasal_and_symbolic_arithmetic_agree() {
    let src = "\
Write 2 plus 3 times 4
Write (2 + 3) * 4
Write 10 minus 4 divided by 2
Write 7 / 2
Write 6 / 3";
    assert_eq!(run_ok(src), ["14", "20", "8.0", "3.5", "2.0"]);
}

#[test]
fn dividing_by_zero_is_located() {
    let mut session = Session::new();
    let err = session.interp.execute("Write 5 / 0", "calc.poh").unwrap_err();

    assert_eq!(err.code, "E_ZERO_DIVISION");
    assert!(err.message.contains("divide by zero"));
    assert!(err.to_string().starts_with("[calc.poh: Line 1"));
}

#[test]
fn text_plus_anything_concatenates() {
    let src = "\
Set n to 3
Write \"n = \" plus n
Write \"ok: \" plus true";
    assert_eq!(run_ok(src), ["n = 3", "ok: True"]);
}

#[test]
fn other_operators_reject_text() {
    let (_, err) = run_err("Write \"a\" minus 1");
    assert_eq!(
        err.message,
        "Type mismatch: cannot apply '-' to string operand(s)"
    );
}

#[test]
fn phrasal_comparisons_and_predicates() {
    let src = "\
Set n to 4
If n is greater than 2 Write \"big\" Otherwise Write \"small\"
If n is at most 3 Write \"low\" Otherwise Write \"high\"
If n is even Write \"even\"
If n is not 4 Write \"never\"
If n is 4 and not false Write \"both\"";
    assert_eq!(run_ok(src), ["big", "high", "even", "both"]);
}

#[test]
fn random_between_stays_in_bounds() {
    let src = "\
Repeat 20 times
    Set r to random between 1 and 3
    If r is less than 1 or r is greater than 3 Write \"out\"
End
Write \"checked\"";
    assert_eq!(run_ok(src), ["checked"]);
}

#[test]
fn undefined_variables_are_reported_with_a_column() {
    let mut session = Session::new();
    let err = session.interp.execute("Write 1 plus missing", "m.poh").unwrap_err();
    assert_eq!(err.message, "Undefined variable 'missing'");
    assert_eq!(err.file, "m.poh");
    assert!(err.span.and_then(|s| s.column).is_some());
}

/* ============================================================================
 * Input
 * ============================================================================
 */

#[test]
fn ask_reads_through_the_input_hook() {
    let mut session = Session::with_config(InterpreterConfig::default(), &["Ada", "41", "2.5"]);
    let src = "\
Ask for name
Ask for age number
Ask for ratio decimal
Write \"Hi \" plus name
Write age plus 1
Write ratio times 2";
    session.run(src).unwrap();

    assert_eq!(
        session.prompts(),
        ["Enter name: ", "Enter age: ", "Enter ratio: "]
    );
    assert_eq!(session.output(), ["Hi Ada", "42", "5.0"]);
}

#[test]
fn failing_input_is_a_runtime_error() {
    let mut interp = Interpreter::new()
        .with_output(|_| {})
        .with_input(|_| Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")));

    let err = interp.execute("Write 1\nAsk for name", "ask.poh").unwrap_err();
    assert_eq!(err.message, "Could not read input: stdin closed");
    assert_eq!(err.span.map(|s| s.line), Some(2));
    assert!(interp.global("name").is_none());
}

#[test]
fn bad_numeric_input_defaults_to_zero() {
    let config = InterpreterConfig {
        debug: true,
        ..InterpreterConfig::default()
    };
    let mut session = Session::with_config(config, &["lots"]);
    session.run("Ask for age number").unwrap();

    assert!(session
        .output()
        .contains(&"[debug] Invalid number input for age, defaulting to 0".to_string()));
    assert_eq!(session.interp.global("age"), Some(Value::Int(0)));
}

/* ============================================================================
 * Debug Tracing
 * ============================================================================
 */

#[test]
fn debug_switches_tracing_on_and_off() {
    let mut session = Session::new();
    let src = "\
Debug on
Set x to 2
Debug off
Write x";
    session.interp.execute(src, "dbg.poh").unwrap();

    let output = session.output();
    assert_eq!(output[0], "[debug] Debug enabled at line 1");
    assert!(output.contains(&"[dbg.poh: Line 2] Executing: Set".to_string()));
    assert!(output.contains(&"[dbg.poh: Line 2] Set variable 'x' = 2".to_string()));
    assert!(output.iter().any(|l| l.ends_with("Evaluating: Literal => 2")));

    let disabled = output
        .iter()
        .position(|l| l == "[debug] Debug disabled at line 3")
        .unwrap();
    assert_eq!(&output[disabled + 1..], ["2"]);
}

#[test]
fn debug_traces_function_entry_and_return() {
    let config = InterpreterConfig {
        debug: true,
        ..InterpreterConfig::default()
    };
    let mut session = Session::with_config(config, &[]);
    let src = "\
Make double with x
    Return x times 2
End
Write double(4)";
    session.run(src).unwrap();

    let output = session.output();
    assert!(output.iter().any(|l| l.ends_with("Enter function double(x=4)")));
    assert!(output.iter().any(|l| l.ends_with("Return 8")));
    assert_eq!(output.last().map(String::as_str), Some("8"));
}

/* ============================================================================
 * Builtins
 * ============================================================================
 */

#[test]
fn builtins_and_their_phrasal_aliases() {
    let src = "\
Write total of range(1, 5)
Write sum(range(5))
Write count of \"hello\"
Write largest in range(4)
Write smallest in range(2, 9)
Write join(split(\"a-b-c\", \"-\"), \"+\")";
    assert_eq!(run_ok(src), ["10", "10", "5", "3", "2", "a+b+c"]);
}

#[test]
fn builtins_are_first_class() {
    let src = "\
Set measure to length
Write measure(\"four\")
Use length with \"ignored\"";
    assert_eq!(run_ok(src), ["4"]);
}

#[test]
fn builtin_errors_carry_the_call_location() {
    let mut session = Session::new();
    let err = session.interp.execute("Write 1\nWrite length(3)", "b.poh").unwrap_err();
    assert_eq!(err.message, "length expects a collection or string");
    assert_eq!(err.span.map(|s| s.line), Some(2));
}

/* ============================================================================
 * JSON
 * ============================================================================
 */

#[test]
fn json_round_trips_through_text() {
    let mut session = Session::with_config(
        InterpreterConfig::default(),
        &[r#"{"b": [1, 2], "a": true, "c": null}"#],
    );
    let src = "\
Ask for raw
Set data to parse json from raw
Write data at \"b\"
Write keys of data
Add \"d\": 4 to data
Write convert to json data";
    session.run(src).unwrap();

    assert_eq!(
        session.output(),
        [
            "[1, 2]",
            "['b', 'a', 'c']",
            r#"{"b":[1,2],"a":true,"c":null,"d":4}"#,
        ]
    );
}

#[test]
fn dictionaries_convert_in_declaration_order() {
    let src = "\
Make a dictionary with \"name\" as \"Ada\" and \"age\" as 36
Set person to it
Write convert to json person";
    assert_eq!(run_ok(src), [r#"{"name":"Ada","age":36}"#]);
}

#[test]
fn malformed_json_is_a_runtime_error() {
    let mut session = Session::with_config(InterpreterConfig::default(), &["{oops"]);
    let err = session
        .run("Ask for raw\nSet data to parse json from raw")
        .unwrap_err();
    assert!(err.message.starts_with("Invalid JSON"));
}

/* ============================================================================
 * Diagnostics
 * ============================================================================
 */

#[test]
fn printer_points_at_the_failing_line() {
    let source = "Set x to 1\nWrite x divided by 0";
    let mut session = Session::new();
    let err = session.interp.execute(source, "div.poh").unwrap_err();

    let rendered = DiagnosticPrinter::new("div.poh", source).render(&err);
    assert!(rendered.contains("Write x divided by 0"));
    assert!(rendered.contains("divide by zero"));
}

/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     scoping.rs
 * Purpose:  Scope chain, function calls and control-flow signals.
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

use common::{run_err, run_ok, Session};
use pohlang::span::Span;
use pohlang::InterpreterConfig;

#[test]
fn function_locals_vanish_after_return() {
    let src = "\
Make f
    Set local to 7
    Write local
End
Use f
Write local";

    let (output, err) = run_err(src);
    assert_eq!(output, ["7"]);
    assert_eq!(err.message, "Undefined variable 'local'");
    assert_eq!(err.span.map(|s| s.line), Some(6));
}

#[test]
fn loop_bodies_update_outer_variables_but_keep_fresh_ones() {
    let src = "\
Set total to 0
Set i to 0
While i is less than 3
    Increase i
    Increase total by i
    Set fresh to 1
End
Write total
Write fresh";

    let (output, err) = run_err(src);
    assert_eq!(output, ["6"]);
    assert_eq!(err.message, "Undefined variable 'fresh'");
}

#[test]
fn begin_blocks_scope_new_names() {
    let src = "\
Set x to 1
Begin
    Set x to 2
    Set y to 3
End
Write x";
    assert_eq!(run_ok(src), ["2"]);

    let (_, err) = run_err("Begin\n    Set y to 3\nEnd\nWrite y");
    assert_eq!(err.message, "Undefined variable 'y'");
}

#[test]
fn arity_errors_name_the_definition() {
    let src = "\
Make add with a, b
    Return a plus b
End
Use add with 1";

    let (_, err) = run_err(src);
    assert!(err.message.contains("expects 2 argument(s) but got 1"));
    assert!(err.message.contains("defined at line 1"));
    assert_eq!(err.code, "E_ARITY");
    assert!(err.to_string().starts_with("[test.poh: Line 4]"));
}

#[test]
fn defaults_fill_omitted_parameters() {
    let src = "\
Make greet with name, greeting set to \"Hello\"
    Return greeting plus \" \" plus name
End
Write greet(\"Ada\")
Write greet(\"Bob\", \"Hi\")";
    assert_eq!(run_ok(src), ["Hello Ada", "Hi Bob"]);
}

#[test]
fn closures_keep_the_outer_parameter() {
    let src = "\
Make make_adder with n
    Make add_n with x
        Return x plus n
    End
    Return add_n
End
Set add_two to make_adder(2)
Write add_two(3)";
    assert_eq!(run_ok(src), ["5"]);
}

#[test]
fn calls_are_lexically_scoped() {
    let src = "\
Set label to \"global\"
Make show
    Return label
End
Make wrapper
    Set label to \"changed\"
    Return show()
End
Write wrapper()";
    // `wrapper` updates the existing global, so `show` sees the new value.
    assert_eq!(run_ok(src), ["changed"]);

    let src = "\
Make show
    Return hidden
End
Make wrapper
    Set hidden to 1
    Return show()
End
Write wrapper()";
    let (_, err) = run_err(src);
    assert_eq!(err.message, "Undefined variable 'hidden'");
}

#[test]
fn inline_functions_return_their_expression() {
    let src = "\
Make double with x Write x times 2
Write double(21)
Call double with 1";
    assert_eq!(run_ok(src), ["42"]);
}

#[test]
fn functions_can_be_called_before_their_definition() {
    let src = "\
Write square(4)
Make square with n
    Return n times n
End";
    assert_eq!(run_ok(src), ["16"]);
}

#[test]
fn unknown_functions_suggest_a_builtin() {
    let (_, err) = run_err("Write lenght(\"abc\")");
    assert_eq!(err.message, "Unknown function 'lenght'. Did you mean 'length'?");
}

#[test]
fn errors_crossing_a_call_record_the_call_site() {
    let src = "\
Make boom
    Write 1 divided by 0
End
Write \"before\"
Use boom";

    let (output, err) = run_err(src);
    assert_eq!(output, ["before"]);
    assert_eq!(err.span.map(|s| s.line), Some(2));
    assert_eq!(err.trace, ["in function 'boom' called at [test.poh: Line 5]"]);
    assert!(err
        .to_string()
        .ends_with("\n  in function 'boom' called at [test.poh: Line 5]"));
}

#[test]
fn runaway_recursion_hits_the_depth_limit() {
    let config = InterpreterConfig {
        max_call_depth: 50,
        ..InterpreterConfig::default()
    };
    let mut session = Session::with_config(config, &[]);

    let src = "\
Make spin with n
    Return spin(n plus 1)
End
Write spin(0)";

    let err = session.run(src).unwrap_err();
    assert_eq!(
        err.message,
        "Maximum call depth of 50 exceeded in function 'spin'"
    );
}

#[test]
fn deep_recursion_below_the_default_limit_succeeds() {
    let src = "\
Make down with n
    If n is 0
        Return 0
    End
    Return down(n minus 1)
End
Write down(390)";
    assert_eq!(run_ok(src), ["0"]);
}

#[test]
fn runaway_recursion_stops_at_the_default_limit() {
    let src = "\
Make spin with n
    Return spin(n plus 1)
End
Write spin(0)";

    let (output, err) = run_err(src);
    assert!(output.is_empty());
    assert_eq!(
        err.message,
        "Maximum call depth of 400 exceeded in function 'spin'"
    );
    assert_eq!(err.trace.len(), 400);
}

#[test]
fn stop_and_skip_steer_the_nearest_loop() {
    let src = "\
Set i to 0
While i is less than 10
    Increase i
    If i is 2
        Skip
    End
    If i is 4
        Stop
    End
    Write i
End
Write \"done\"";
    assert_eq!(run_ok(src), ["1", "3", "done"]);
}

#[test]
fn stop_outside_a_loop_only_ends_the_branch() {
    let src = "\
If 1 is 1
    Write \"a\"
    Stop
    Write \"b\"
End
Write \"c\"";
    assert_eq!(run_ok(src), ["a", "c"]);
}

#[test]
fn stop_does_not_leak_out_of_a_function() {
    let src = "\
Make early
    Write \"in\"
    Stop
    Write \"never\"
End
Repeat 2 times
    Use early
    Write \"after\"
End";
    assert_eq!(run_ok(src), ["in", "after", "in", "after"]);
}

#[test]
fn repeat_counts_or_walks_a_collection() {
    assert_eq!(run_ok("Repeat 3 times\n    Write \"hi\"\nEnd"), ["hi", "hi", "hi"]);
    assert_eq!(run_ok("Repeat 2 Write \"x\""), ["x", "x"]);

    let src = "\
Make a list of \"a\", \"b\"
Set letters to it
Repeat letters
    Write it
End";
    assert_eq!(run_ok(src), ["a", "b"]);
}

#[test]
fn top_level_return_ends_the_program() {
    assert_eq!(run_ok("Write 1\nReturn\nWrite 2"), ["1"]);
}

#[test]
fn parse_errors_stop_before_anything_runs() {
    let (output, err) = run_err("Write \"a\"\nRepeat 3\n    Write 1\n");
    assert!(output.is_empty());
    assert!(err.is_parse());
    assert_eq!(err.span, Some(Span::line(2)));
}

/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     collections.rs
 * Purpose:  Lists, dictionaries and their mutability rules.
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

#[test]
fn strict_lists_refuse_mutation() {
    let src = "\
Make a list of 1, 2
Set xs to it
Add 3 to xs";

    let (_, err) = run_err(src);
    assert!(err.message.contains("Cannot modify immutable list"));
    assert_eq!(err.code, "E_IMMUTABLE");
    assert_eq!(err.span.map(|s| s.line), Some(3));
}

#[test]
fn mutable_lists_grow() {
    let src = "\
Make a mutable list of 1, 2
Set xs to it
Add 3 to xs
Write length(xs)
Tell me the length of xs
Write xs";
    assert_eq!(run_ok(src), ["3", "3", "[1, 2, 3]"]);
}

#[test]
fn legacy_lists_mutate_with_a_warning() {
    let mut session = Session::new();
    let src = "\
Set xs to List contains 1, 2
Add 3 to xs
Write xs";
    session.run(src).unwrap();

    assert_eq!(
        session.output(),
        [
            "[test.poh: Line 2] Warning: Implicit mutable list is deprecated. Use 'mutable list' instead.",
            "[1, 2, 3]",
        ]
    );

    let warnings = session.interp.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].line, Some(2));

    let json = session.interp.warnings_json().unwrap();
    assert!(json.contains("Implicit mutable list is deprecated"));
}

#[test]
fn phrasal_list_edits() {
    let src = "\
Make a mutable list of 10, 20, and 30
Set xs to it
Set the 2nd item in xs to 99
Remove the last item from xs
Remove 10 from xs
Remove 12345 from xs
Write xs
Write take the 1st item from xs";
    assert_eq!(run_ok(src), ["[99]", "99"]);
}

#[test]
fn nth_item_out_of_range_explains_the_bounds() {
    let src = "\
Make a list of 10, 20, 30
Set xs to it
Write take the 2nd item from xs
Write take the 5th item from xs";

    let (output, err) = run_err(src);
    assert_eq!(output, ["20"]);
    assert_eq!(
        err.message,
        "Index 5 is out of range for the list. 'the 5th item' must be between 1 and 3."
    );
}

#[test]
fn at_indexes_from_zero() {
    let src = "\
Make a list of \"a\", \"b\", \"c\"
Set xs to it
Write xs at 0
Write xs at 2";
    assert_eq!(run_ok(src), ["a", "c"]);
}

#[test]
fn strict_dictionaries_refuse_mutation() {
    let src = "\
Make a dictionary with \"a\" as 1
Set d to it
Add \"b\": 2 to d";

    let (_, err) = run_err(src);
    assert!(err.message.contains("Cannot modify immutable dictionary"));
}

#[test]
fn mutable_dictionaries_add_and_remove_keys() {
    let src = "\
Make a mutable dictionary with \"a\" as 1
Set d to it
Add \"b\": 2 to d
Remove \"a\" from d
Write d
Write d at \"b\"
Write take the value of \"b\" from d
Check if d has \"b\"
Check if d has \"a\"";
    assert_eq!(run_ok(src), ["{'b': 2}", "2", "2", "True", "False"]);
}

#[test]
fn missing_keys_are_index_errors() {
    let src = "\
Make a dictionary with \"a\" as 1
Set d to it
Write d at \"zzz\"";

    let (_, err) = run_err(src);
    assert_eq!(err.message, "Key zzz was not found in the dictionary.");
    assert_eq!(err.code, "E_INDEX");
}

#[test]
fn keys_and_values_follow_insertion_order() {
    let src = "\
Make a dictionary with \"b\" as 2 and \"a\" as 1 and \"c\" as 3
Set d to it
Write keys of d
Write values of d
Give me the keys of d";
    assert_eq!(
        run_ok(src),
        ["['b', 'a', 'c']", "[2, 1, 3]", "['b', 'a', 'c']"]
    );
}

#[test]
fn keys_of_hands_back_a_mutable_list() {
    let src = "\
Make a dictionary with \"x\" as 1
Set d to it
Set ks to keys of d
Add \"y\" to ks
Write ks";
    assert_eq!(run_ok(src), ["['x', 'y']"]);
}

#[test]
fn collections_are_shared_between_bindings() {
    let src = "\
Make a mutable list of 1
Set a to it
Set b to a
Add 2 to b
Write a";
    assert_eq!(run_ok(src), ["[1, 2]"]);
}

#[test]
fn contains_checks_membership() {
    let src = "\
Make a list of 1, 2, 3
Set xs to it
Write contains 2 in xs
Write contains 9 in xs
Write contains \"ell\" in \"hello\"";
    assert_eq!(run_ok(src), ["True", "False", "True"]);
}

#[test]
fn repeat_walks_dictionary_keys() {
    let src = "\
Make a dictionary with \"one\" as 1 and \"two\" as 2
Set d to it
Repeat d
    Write it plus \"=\" plus (d at it)
End";
    assert_eq!(run_ok(src), ["one=1", "two=2"]);
}

#[test]
fn self_containing_collections_print_an_ellipsis() {
    let src = "\
Make a mutable list of 1, 2
Set xs to it
Add xs to xs
Write xs
Make a mutable dictionary with \"a\" as 1
Set d to it
Add \"me\": d to d
Write d
Write length(xs)";
    assert_eq!(run_ok(src), ["[1, 2, [...]]", "{'a': 1, 'me': {...}}", "3"]);
}

#[test]
fn self_containing_collections_refuse_json() {
    let src = "\
Make a mutable list of 1
Set xs to it
Add xs to xs
Write convert to json xs";

    let (_, err) = run_err(src);
    assert_eq!(
        err.message,
        "Cannot convert a collection that contains itself to JSON"
    );
    assert_eq!(err.code, "E_TYPE");
}

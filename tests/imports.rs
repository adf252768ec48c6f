/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     imports.rs
 * Purpose:  Module resolution, exports, system imports and cycles.
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

use std::fs;
use std::path::Path;

use common::Session;
use pohlang::{InterpreterConfig, Value};
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, source) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, source).unwrap();
    }
    dir
}

fn session_in(dir: &Path) -> Session {
    let config = InterpreterConfig {
        base_dir: Some(dir.to_path_buf()),
        ..InterpreterConfig::default()
    };
    Session::with_config(config, &[])
}

#[test]
fn a_file_is_loaded_only_once() {
    let dir = project(&[("lib.poh", "Write \"loaded\"")]);
    let mut session = session_in(dir.path());

    session
        .interp
        .execute("Import \"lib.poh\"\nImport \"lib.poh\"\nWrite \"main\"", "main.poh")
        .unwrap();
    assert_eq!(session.output(), ["loaded", "main"]);
}

#[test]
fn import_cycles_are_reported_with_the_chain() {
    let dir = project(&[
        ("a.poh", "Import \"b.poh\""),
        ("b.poh", "Import \"a.poh\""),
    ]);
    let mut session = session_in(dir.path());

    let err = session.interp.execute_file(dir.path().join("a.poh")).unwrap_err();
    assert!(err.message.contains("Circular import detected"));
    assert_eq!(
        err.message,
        "Circular import detected with a.poh. Chain: a.poh -> b.poh -> a.poh"
    );
    assert_eq!(err.code, "E_IMPORT");
}

#[test]
fn module_functions_are_callable_by_the_importer() {
    let dir = project(&[(
        "lib.poh",
        "Make shout with word\n    Return word plus \"!\"\nEnd",
    )]);
    let mut session = session_in(dir.path());

    session
        .interp
        .execute("Import \"lib.poh\"\nWrite shout(\"hey\")", "main.poh")
        .unwrap();
    assert_eq!(session.output(), ["hey!"]);
}

#[test]
fn module_bindings_stay_out_of_the_global_scope() {
    let dir = project(&[("lib.poh", "Set greeting to \"hi\"")]);
    let mut session = session_in(dir.path());

    let err = session
        .interp
        .execute("Import \"lib.poh\"\nWrite greeting", "main.poh")
        .unwrap_err();
    assert_eq!(err.message, "Undefined variable 'greeting'");

    let exports = session.interp.module_exports("lib").unwrap();
    assert_eq!(exports.get("greeting"), Some(&Value::text("hi")));
    assert!(session.interp.global("greeting").is_none());
}

#[test]
fn modules_receive_the_exports_of_what_they_import() {
    let dir = project(&[
        ("main.poh", "Set greeting to \"mine\"\nImport \"lib.poh\"\nWrite greeting\nWrite answer"),
        ("lib.poh", "Set greeting to \"hi\"\nSet answer to 42"),
    ]);
    let mut session = session_in(dir.path());

    session.interp.execute_file(dir.path().join("main.poh")).unwrap();
    assert_eq!(session.output(), ["mine", "42"]);
}

#[test]
fn nested_imports_resolve_against_the_importing_file() {
    let dir = project(&[
        ("main.poh", "Import \"pkg/outer.poh\"\nWrite \"main\""),
        ("pkg/outer.poh", "Import \"inner.poh\"\nWrite \"outer\""),
        ("pkg/inner.poh", "Write \"inner\""),
    ]);
    let mut session = session_in(dir.path());

    session.interp.execute_file(dir.path().join("main.poh")).unwrap();
    assert_eq!(session.output(), ["inner", "outer", "main"]);
}

#[test]
fn system_imports_run_in_the_global_scope() {
    let dir = project(&[("stdlib/helpers.poh", "Set pi to 3")]);
    let config = InterpreterConfig {
        system_dir: Some(dir.path().join("stdlib")),
        ..InterpreterConfig::default()
    };
    let mut session = Session::with_config(config, &[]);

    session
        .interp
        .execute("Import system \"helpers\"\nWrite pi", "main.poh")
        .unwrap();
    assert_eq!(session.output(), ["3"]);
    assert_eq!(session.interp.global("pi"), Some(Value::Int(3)));
}

#[test]
fn missing_files_suggest_a_neighbour() {
    let dir = project(&[("lib.poh", "Write 1")]);
    let mut session = session_in(dir.path());

    let err = session
        .interp
        .execute("Import \"lbi.poh\"", "main.poh")
        .unwrap_err();
    assert_eq!(
        err.message,
        "I couldn't find the file 'lbi.poh'. Did you mean 'lib.poh'?"
    );
    assert_eq!(err.span.map(|s| s.line), Some(1));

    let err = session
        .interp
        .execute("Import \"zzzzzzzz.poh\"", "main.poh")
        .unwrap_err();
    assert_eq!(err.message, "I couldn't find the file 'zzzzzzzz.poh'.");
}

#[test]
fn errors_inside_a_module_name_the_import_site() {
    let dir = project(&[("lib.poh", "Write \"start\"\nWrite 1 divided by 0")]);
    let mut session = session_in(dir.path());

    let err = session
        .interp
        .execute("Write \"main\"\nImport \"lib.poh\"", "main.poh")
        .unwrap_err();

    assert_eq!(session.output(), ["main", "start"]);
    assert!(err.file.ends_with("lib.poh"));
    assert_eq!(err.span.map(|s| s.line), Some(2));
    assert_eq!(err.trace, ["while importing 'lib.poh' at [main.poh: Line 2]"]);
}

#[test]
fn debug_announces_imports() {
    let dir = project(&[("lib.poh", "Set x to 1")]);
    let config = InterpreterConfig {
        debug: true,
        base_dir: Some(dir.path().to_path_buf()),
        ..InterpreterConfig::default()
    };
    let mut session = Session::with_config(config, &[]);

    session.interp.execute("Import \"lib.poh\"", "main.poh").unwrap();
    assert!(session.output().contains(&"[import: lib.poh]".to_string()));
}

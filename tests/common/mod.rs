/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     common/mod.rs
 * Purpose:  Shared harness for the integration tests.
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

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use pohlang::{Interpreter, InterpreterConfig, PohError};

/// An interpreter whose output and prompts are captured.
pub struct Session {
    pub interp: Interpreter,
    lines: Rc<RefCell<Vec<String>>>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default(), &[])
    }

    /// `answers` are handed out to `Ask for` in order; afterwards every
    /// prompt gets an empty line.
    pub fn with_config(config: InterpreterConfig, answers: &[&str]) -> Self {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let prompts = Rc::new(RefCell::new(Vec::new()));

        let sink = lines.clone();
        let asked = prompts.clone();
        let mut answers = answers
            .iter()
            .map(|a| a.to_string())
            .collect::<VecDeque<_>>();

        let interp = Interpreter::with_config(config)
            .with_output(move |line| sink.borrow_mut().push(line.to_string()))
            .with_input(move |prompt| {
                asked.borrow_mut().push(prompt.to_string());
                Ok(answers.pop_front().unwrap_or_default())
            });

        Self {
            interp,
            lines,
            prompts,
        }
    }

    pub fn run(&mut self, source: &str) -> Result<(), PohError> {
        self.interp.execute(source, "test.poh")
    }

    pub fn output(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

/// Runs a program that must succeed and returns what it wrote.
pub fn run_ok(source: &str) -> Vec<String> {
    let mut session = Session::new();
    if let Err(err) = session.run(source) {
        panic!("program failed: {err}\n--- source ---\n{source}");
    }
    session.output()
}

/// Runs a program that must fail; returns what it wrote before failing.
pub fn run_err(source: &str) -> (Vec<String>, PohError) {
    let mut session = Session::new();
    match session.run(source) {
        Ok(()) => panic!("program should have failed:\n{source}"),
        Err(err) => (session.output(), err),
    }
}

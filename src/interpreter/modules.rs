/*
 * ==========================================================================
 * PohLang - Phrasal Programming Language
 * ==========================================================================
 *
 * File:     modules.rs
 * Purpose:  File resolution, module scopes and the export registry.
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

/*!
 * Modules
 *
 * `Import "lib.poh"` runs the file once, in its own module scope chained to
 * the global scope, and records its top-level non-function bindings under
 * the file stem. `Import system "name"` runs `<system dir>/name.poh`
 * straight in the global scope.
 *
 * Relative paths resolve against the directory of the file doing the
 * import. The process working directory is never changed.
 */

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use walkdir::WalkDir;

use crate::diagnostics::{closest_name, location_prefix};
use crate::error::PohError;
use crate::interpreter::environment::{Env, Environment, FrameKind};
use crate::interpreter::Interpreter;
use crate::parser::parse_program;
use crate::span::Span;

impl Interpreter {
    /// Executes an `Import` statement found in `env`.
    pub(crate) fn import(&mut self, path: &str, system: bool, site: Span, env: &Env) -> Result<(), PohError> {
        if system {
            if self.debug {
                self.emit(&format!("[import system: {path}]"));
            }

            let full = self.system_dir().join(format!("{path}.poh"));
            let globals = self.globals.clone();
            return self
                .run_file(&full, Some(&globals))
                .map_err(|err| self.import_frame(err, &full, site));
        }

        let requested = Path::new(path);
        if self.debug {
            self.emit(&format!("[import: {}]", file_name(requested)));
        }

        self.run_file(requested, None)
            .map_err(|err| self.import_frame(err, requested, site))?;

        if env.borrow().kind() == FrameKind::Module {
            if let Some(exports) = self.modules.get(&file_stem(requested)) {
                let mut scope = env.borrow_mut();
                for (name, value) in exports {
                    if !scope.values.contains_key(name) {
                        scope.define(name.clone(), value.clone());
                    }
                }
            }
        }

        Ok(())
    }

    /// Loads and runs one file.
    ///
    /// With `into`, the file runs directly in that scope. Otherwise it gets
    /// a fresh module scope and its exports are registered.
    pub(crate) fn run_file(&mut self, path: &Path, into: Option<&Env>) -> Result<(), PohError> {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        };
        let full = fs::canonicalize(&joined).unwrap_or(joined);

        if self.import_stack.contains(&full) {
            let mut chain = self
                .import_stack
                .iter()
                .map(|p| file_name(p))
                .collect::<Vec<_>>();
            chain.push(file_name(&full));

            return Err(PohError::import_error(format!(
                "Circular import detected with {}. Chain: {}",
                file_name(&full),
                chain.join(" -> ")
            )));
        }

        if self.loaded_files.contains(&full) {
            return Ok(());
        }

        let source = match fs::read_to_string(&full) {
            Ok(source) => source,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(self.missing_file(path));
            }
            Err(err) => {
                return Err(PohError::import_error(format!(
                    "I couldn't read the file '{}': {err}",
                    path.display()
                )));
            }
        };

        let label = full.display().to_string();
        let base = full
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_dir());

        self.import_stack.push(full.clone());
        self.base_dirs.push(base);
        self.file_stack.push(label.clone());
        let outer_loops = std::mem::replace(&mut self.loop_depth, 0);

        let outcome = self.run_module(&source, &label, &full, into);

        self.loop_depth = outer_loops;
        self.file_stack.pop();
        self.base_dirs.pop();
        self.import_stack.pop();

        outcome?;
        self.loaded_files.insert(full);
        Ok(())
    }

    fn run_module(&mut self, source: &str, label: &str, full: &Path, into: Option<&Env>) -> Result<(), PohError> {
        let program = parse_program(source, label)?;

        if let Some(env) = into {
            return self.run_program(&program, env);
        }

        let module_env = Environment::child(&self.globals, FrameKind::Module);
        self.run_program(&program, &module_env)?;

        let exports = module_env
            .borrow()
            .values
            .iter()
            .filter(|(name, _)| !self.functions.contains_key(*name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect::<HashMap<_, _>>();
        self.modules.insert(file_stem(full), exports);

        Ok(())
    }

    /// Not-found error, with the closest `.poh` file under the base
    /// directory as a suggestion.
    fn missing_file(&self, requested: &Path) -> PohError {
        let candidates = WalkDir::new(self.base_dir())
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| name.to_lowercase().ends_with(".poh"))
            .collect::<Vec<_>>();

        let wanted = file_name(requested);
        let message = match closest_name(&wanted, candidates.iter().map(String::as_str)) {
            Some(suggestion) => format!(
                "I couldn't find the file '{}'. Did you mean '{suggestion}'?",
                requested.display()
            ),
            None => format!("I couldn't find the file '{}'.", requested.display()),
        };
        PohError::import_error(message)
    }

    /// Records the import site on errors raised inside the imported file.
    fn import_frame(&self, err: PohError, path: &Path, site: Span) -> PohError {
        if err.span.is_none() {
            return err;
        }
        let frame = format!(
            "while importing '{}' at {}",
            file_name(path),
            location_prefix(&self.current_file(), Some(Span::line(site.line)))
        );
        err.with_frame(frame)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn names_come_from_the_last_component() {
        let path = PathBuf::from("lib/math_utils.poh");
        assert_eq!(file_name(&path), "math_utils.poh");
        assert_eq!(file_stem(&path), "math_utils");
    }
}

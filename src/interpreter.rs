//! The programmatic surface consumed by the driver (§6): `Interpreter`
//! bundles an environment and a pool, and exposes one form at a time or a
//! whole program at once.

use crate::builtins::register_builtins;
use crate::env::Environment;
use crate::eval::eval;
use crate::parser::read_one;
use crate::pool::Pool;
use crate::printer::print_value;
use std::path::Path;
use std::rc::Rc;

pub struct Interpreter {
    env: Rc<Environment>,
    pool: Pool,
}

impl Interpreter {
    /// Allocates an interpreter and seeds it with the primitive library.
    pub fn new() -> Interpreter {
        let env = Rc::new(Environment::new());
        register_builtins(&env);
        Interpreter { env, pool: Pool::new() }
    }

    /// Reads one form from `text`, evaluates it, and returns the printed
    /// result. Collects the pool down to the environment plus the result
    /// before returning, per the pool-liveness invariant. Returns `None` on
    /// a parse or evaluation error, after printing a one-line diagnostic.
    pub fn interpret_expression(&mut self, text: &str) -> Option<String> {
        match crate::parser::read_one(text) {
            Ok((form, _)) => match eval(&form, &self.env, &mut self.pool) {
                Ok(result) => {
                    self.pool.collect(&self.env.as_value(), &result);
                    Some(print_value(&result))
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    self.pool.collect(&self.env.as_value(), &crate::value::Value::Nil);
                    None
                }
            },
            Err(e) => {
                eprintln!("Error: {e}");
                None
            }
        }
    }

    /// Reads every form from the file at `path` and evaluates them in
    /// sequence. A failing form's error is reported to standard error and
    /// evaluation continues with the next form; a failure to read the file
    /// itself is propagated so the driver can turn it into an exit code.
    pub fn interpret_program(&mut self, path: &Path) -> std::io::Result<()> {
        let contents = std::fs::read_to_string(path)?;
        self.run_source(&contents);
        Ok(())
    }

    /// Evaluates every form in `source` in sequence, silently, without
    /// printing results — used for bootstrap files (§6a) and to implement
    /// `interpret_program`. Forms are read and evaluated one at a time, the
    /// same as `interpret_expression`, rather than parsing the whole source
    /// up front: a later form's syntax error must not discard the forms
    /// already evaluated before it.
    pub fn run_source(&mut self, source: &str) {
        let mut remaining = source;
        loop {
            let trimmed = remaining.trim_start();
            if trimmed.is_empty() {
                return;
            }
            let (form, consumed) = match read_one(trimmed) {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return;
                }
            };
            remaining = &trimmed[consumed..];
            match eval(&form, &self.env, &mut self.pool) {
                Ok(result) => self.pool.collect(&self.env.as_value(), &result),
                Err(e) => {
                    eprintln!("Error: {e}");
                    self.pool.collect(&self.env.as_value(), &crate::value::Value::Nil);
                }
            }
        }
    }

    pub fn env(&self) -> &Rc<Environment> {
        &self.env
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpret_expression_evaluates_and_prints() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret_expression("(car '(a b c))"), Some("a".to_string()));
    }

    #[test]
    fn interpret_expression_returns_none_on_unbound_atom() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret_expression("nope"), None);
    }

    #[test]
    fn set_bindings_persist_across_separate_interpret_expression_calls() {
        let mut interp = Interpreter::new();
        interp.interpret_expression("(set 'x 5)");
        assert_eq!(interp.interpret_expression("x"), Some("5".to_string()));
    }

    #[test]
    fn run_source_continues_after_a_failing_form() {
        let mut interp = Interpreter::new();
        interp.run_source("(set 'x 1) nope (set 'y 2)");
        assert_eq!(interp.interpret_expression("x"), Some("1".to_string()));
        assert_eq!(interp.interpret_expression("y"), Some("2".to_string()));
    }

    #[test]
    fn run_source_keeps_forms_read_before_a_syntax_error() {
        let mut interp = Interpreter::new();
        interp.run_source("(set 'x 1) (set 'y 2) (");
        assert_eq!(interp.interpret_expression("x"), Some("1".to_string()));
        assert_eq!(interp.interpret_expression("y"), Some("2".to_string()));
    }
}

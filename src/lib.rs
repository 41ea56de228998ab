//! A minimal, tree-walking Lisp interpreter: reader, printer, evaluator,
//! environment, closures, and a short-lived allocation pool, wired together
//! behind the [`interpreter::Interpreter`] programmatic surface that the
//! `main` binary drives.

pub mod builtins;
pub mod closure;
pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod parser;
pub mod pool;
pub mod printer;
pub mod value;

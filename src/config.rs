//! Version and banner constants, and CLI defaults for the reference driver.

pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "Lisp Interpreter v1.0";
pub const WELCOME_SUBTITLE: &str = "A tree-walking Lisp interpreter in Rust";
pub const DEFAULT_HISTORY_FILE: &str = ".lisp_history";
pub const PROMPT: &str = "lisp> ";

//! The printer: value tree → text.
//!
//! Renders a `Value` back into the surface syntax the reader accepts,
//! preserving the round-trip law for anything the reader could have
//! produced (§8 invariant 1): atoms print as names, pairs as
//! space-separated lists, the empty list as `()`. Primitives and closures
//! print as opaque-ish forms that don't round-trip, which the law doesn't
//! claim for them.

use crate::value::Value;
use std::fmt;

pub fn print_value(value: &Value) -> String {
    format!("{value}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "()"),
            Value::Atom(name) => write!(f, "{name}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::Pair(_) => write_pair_chain(self, f),
            Value::Primitive(p) => write!(f, "#<primitive:{}>", p.name),
            Value::Closure(c) => {
                if c.is_macro {
                    write!(f, "(defmacro {} {})", c.params, c.body)
                } else {
                    write!(f, "(lambda {} {})", c.params, c.body)
                }
            }
        }
    }
}

/// Floats always carry a decimal point, even when the value is integral
/// (`3.0`, not `3`), so they're never textually confusable with an Integer.
fn format_float(x: f32) -> String {
    let formatted = format!("{x}");
    if formatted.contains('.') || formatted.contains(['e', 'E', 'n', 'i']) {
        // "n"/"i" catch NaN/inf, which print as-is.
        formatted
    } else {
        format!("{formatted}.0")
    }
}

fn write_pair_chain(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "(")?;
    let mut cur = value.clone();
    let mut first = true;
    loop {
        match cur {
            Value::Pair(p) => {
                if !first {
                    write!(f, " ")?;
                }
                first = false;
                write!(f, "{}", p.head)?;
                cur = p.tail.clone();
            }
            Value::Nil => break,
            other => {
                // An improper tail; never produced by `cons` (§4.F requires
                // a list tail) or by the reader, but the printer stays
                // total over the full value model.
                write!(f, " . {other}")?;
                break;
            }
        }
    }
    write!(f, ")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::read_one;

    fn read(src: &str) -> Value {
        read_one(src).unwrap().0
    }

    #[test]
    fn prints_atom_and_nil() {
        assert_eq!(print_value(&Value::atom("foo")), "foo");
        assert_eq!(print_value(&Value::Nil), "()");
    }

    #[test]
    fn prints_integer_and_float() {
        assert_eq!(print_value(&Value::Integer(42)), "42");
        assert_eq!(print_value(&Value::Float(3.0)), "3.0");
        assert_eq!(print_value(&Value::Float(3.5)), "3.5");
    }

    #[test]
    fn prints_proper_list_with_single_space_separators() {
        let list = Value::from_vec(vec![Value::atom("a"), Value::atom("b"), Value::atom("c")]);
        assert_eq!(print_value(&list), "(a b c)");
    }

    #[test]
    fn prints_improper_list_with_dot_notation() {
        let improper = Value::cons(Value::Integer(1), Value::Integer(2));
        assert_eq!(print_value(&improper), "(1 . 2)");
    }

    #[test]
    fn round_trip_for_reader_producible_values() {
        for src in ["a", "42", "3.5", "(a b c)", "(a (b c) d)", "()"] {
            let value = read(src);
            let printed = print_value(&value);
            let reparsed = read(&printed);
            assert!(
                value.structural_eq(&reparsed),
                "{src} -> {printed} did not round-trip"
            );
        }
    }
}

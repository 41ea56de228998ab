//! The reader: text → value tree.
//!
//! Grammar:
//!
//! ```text
//! expr  := atom | '(' list ')' | '\'' expr
//! list  := (expr)*
//! atom  := one or more of: any non-whitespace, non-paren, non-quote character
//! ```
//!
//! There are no strings, comments, or quasiquote sugar in this grammar —
//! deliberately smaller than a general-purpose Lisp reader. An atom token
//! that looks like a number is classified as `Integer` or `Float` rather
//! than `Atom` (see [`classify_atom`]); everything else stays a symbol.

use crate::error::EvalError;
use crate::value::Value;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, multispace0};
use nom::combinator::map;
use nom::sequence::preceded;
use nom::IResult;

/// Reads one form from the front of `input`, returning it along with the
/// number of bytes consumed (so the caller can feed the rest back in, e.g.
/// to read a whole program).
pub fn read_one(input: &str) -> Result<(Value, usize), EvalError> {
    match parse_expr(input) {
        Ok((rest, value)) => Ok((value, input.len() - rest.len())),
        Err(_) => Err(syntax_error(input)),
    }
}

/// Whether `input` has balanced parentheses — used by the REPL driver to
/// decide whether to keep reading more lines before attempting to parse.
pub fn is_balanced(input: &str) -> bool {
    let mut depth: i64 = 0;
    for c in input.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

fn syntax_error(remaining: &str) -> EvalError {
    if remaining.trim().is_empty() {
        EvalError::SyntaxError("premature end of input".to_string())
    } else if remaining.trim_start().starts_with(')') {
        EvalError::SyntaxError("unexpected `)`".to_string())
    } else {
        EvalError::SyntaxError(format!("could not parse `{}`", remaining.trim()))
    }
}

fn parse_expr(input: &str) -> IResult<&str, Value> {
    preceded(
        multispace0,
        nom::branch::alt((parse_quoted, parse_list, parse_atom)),
    )(input)
}

fn parse_quoted(input: &str) -> IResult<&str, Value> {
    map(preceded(char('\''), parse_expr), |expr| {
        Value::from_vec(vec![Value::atom("quote"), expr])
    })(input)
}

fn parse_list(input: &str) -> IResult<&str, Value> {
    let (mut rest, _) = char('(')(input)?;
    let mut items = Vec::new();
    loop {
        let (after_ws, _) = multispace0(rest)?;
        if let Ok((after_paren, _)) = char::<&str, nom::error::Error<&str>>(')')(after_ws) {
            rest = after_paren;
            break;
        }
        if after_ws.is_empty() {
            return Err(nom::Err::Error(nom::error::Error::new(
                after_ws,
                nom::error::ErrorKind::Eof,
            )));
        }
        let (after_expr, expr) = parse_expr(after_ws)?;
        items.push(expr);
        rest = after_expr;
    }
    Ok((rest, Value::from_vec(items)))
}

fn parse_atom(input: &str) -> IResult<&str, Value> {
    map(
        take_while1(|c: char| !c.is_whitespace() && c != '(' && c != ')' && c != '\''),
        classify_atom,
    )(input)
}

/// Classifies a raw atom token as `Integer`, `Float`, or `Atom` (or `Nil`
/// for the literal `()` token, which the tokenizer also matches since `(`
/// and `)` with nothing between them are otherwise just an empty list).
fn classify_atom(token: &str) -> Value {
    if token == "()" {
        return Value::Nil;
    }
    if looks_like_integer(token) {
        if let Ok(n) = token.parse::<i32>() {
            return Value::Integer(n);
        }
    }
    if looks_like_float(token) {
        if let Ok(f) = token.parse::<f32>() {
            return Value::Float(f);
        }
    }
    Value::atom(token)
}

fn looks_like_integer(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn looks_like_float(token: &str) -> bool {
    token.contains('.') || token.contains('e') || token.contains('E')
}

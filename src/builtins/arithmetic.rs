//! Numeric operators: `+ - * / %`.
//!
//! All five take at least two arguments, except `-`, which also accepts a
//! single argument (negation). Results are `Float` if any operand is
//! `Float`, else `Integer` — except `%`, which only accepts `Integer`
//! operands (§4.F: "Modulus is defined for Integer operands only").

use crate::env::Environment;
use crate::error::EvalError;
use crate::pool::Pool;
use crate::value::{Primitive, Value};
use std::rc::Rc;

#[derive(Clone, Copy)]
enum Num {
    Int(i32),
    Float(f32),
}

impl Num {
    fn as_f32(self) -> f32 {
        match self {
            Num::Int(n) => n as f32,
            Num::Float(f) => f,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(n) => Value::Integer(n),
            Num::Float(f) => Value::Float(f),
        }
    }
}

fn as_num(op: &str, v: &Value) -> Result<Num, EvalError> {
    match v {
        Value::Integer(n) => Ok(Num::Int(*n)),
        Value::Float(f) => Ok(Num::Float(*f)),
        other => Err(EvalError::type_error(op, "integer or float", &describe(other))),
    }
}

fn describe(v: &Value) -> String {
    match v {
        Value::Nil => "()".to_string(),
        Value::Atom(_) => "atom".to_string(),
        Value::Pair(_) => "pair".to_string(),
        Value::Primitive(_) => "primitive".to_string(),
        Value::Closure(_) => "closure".to_string(),
        Value::Integer(_) | Value::Float(_) => "number".to_string(),
    }
}

fn add2(a: Num, b: Num) -> Num {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Num::Int(x.wrapping_add(y)),
        _ => Num::Float(a.as_f32() + b.as_f32()),
    }
}

fn sub2(a: Num, b: Num) -> Num {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Num::Int(x.wrapping_sub(y)),
        _ => Num::Float(a.as_f32() - b.as_f32()),
    }
}

fn mul2(a: Num, b: Num) -> Num {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Num::Int(x.wrapping_mul(y)),
        _ => Num::Float(a.as_f32() * b.as_f32()),
    }
}

fn is_zero(n: Num) -> bool {
    match n {
        Num::Int(n) => n == 0,
        Num::Float(f) => f == 0.0,
    }
}

fn div2(op: &str, a: Num, b: Num) -> Result<Num, EvalError> {
    if is_zero(b) {
        return Err(EvalError::DomainError(format!("`{op}`: division by zero")));
    }
    Ok(match (a, b) {
        (Num::Int(x), Num::Int(y)) => Num::Int(x.wrapping_div(y)),
        _ => Num::Float(a.as_f32() / b.as_f32()),
    })
}

pub fn builtin_add(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("+", 2, None, args.len())?;
    let mut acc = as_num("+", &args[0])?;
    for a in &args[1..] {
        acc = add2(acc, as_num("+", a)?);
    }
    Ok(acc.into_value())
}

pub fn builtin_sub(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("-", 1, None, args.len())?;
    let first = as_num("-", &args[0])?;
    if args.len() == 1 {
        return Ok(sub2(Num::Int(0), first).into_value());
    }
    let mut acc = first;
    for a in &args[1..] {
        acc = sub2(acc, as_num("-", a)?);
    }
    Ok(acc.into_value())
}

pub fn builtin_mul(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("*", 2, None, args.len())?;
    let mut acc = as_num("*", &args[0])?;
    for a in &args[1..] {
        acc = mul2(acc, as_num("*", a)?);
    }
    Ok(acc.into_value())
}

pub fn builtin_div(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("/", 2, None, args.len())?;
    let mut acc = as_num("/", &args[0])?;
    for a in &args[1..] {
        acc = div2("/", acc, as_num("/", a)?)?;
    }
    Ok(acc.into_value())
}

pub fn builtin_mod(
    args: &[Value],
    _env: &Rc<Environment>,
    _pool: &mut Pool,
) -> Result<Value, EvalError> {
    EvalError::check_arity("%", 2, None, args.len())?;
    let mut acc = match &args[0] {
        Value::Integer(n) => *n,
        other => return Err(EvalError::type_error("%", "integer", &describe(other))),
    };
    for a in &args[1..] {
        let n = match a {
            Value::Integer(n) => *n,
            other => return Err(EvalError::type_error("%", "integer", &describe(other))),
        };
        if n == 0 {
            return Err(EvalError::DomainError("`%`: modulus by zero".to_string()));
        }
        acc %= n;
    }
    Ok(Value::Integer(acc))
}

static ADD: Primitive = Primitive { name: "+", special: false, min_arity: 2, max_arity: None, func: builtin_add };
static SUB: Primitive = Primitive { name: "-", special: false, min_arity: 1, max_arity: None, func: builtin_sub };
static MUL: Primitive = Primitive { name: "*", special: false, min_arity: 2, max_arity: None, func: builtin_mul };
static DIV: Primitive = Primitive { name: "/", special: false, min_arity: 2, max_arity: None, func: builtin_div };
static MOD: Primitive = Primitive { name: "%", special: false, min_arity: 2, max_arity: None, func: builtin_mod };

pub fn register(env: &Rc<Environment>) {
    env.define("+", Value::Primitive(&ADD));
    env.define("-", Value::Primitive(&SUB));
    env.define("*", Value::Primitive(&MUL));
    env.define("/", Value::Primitive(&DIV));
    env.define("%", Value::Primitive(&MOD));
}

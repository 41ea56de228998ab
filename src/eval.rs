//! The evaluator: dispatches on value shape, applies the apply rules for
//! primitives and closures, and integrates the value model, reader-produced
//! forms, environment, closures, and pool into one `eval` entry point.

use crate::closure::apply_closure;
use crate::env::Environment;
use crate::error::EvalError;
use crate::pool::Pool;
use crate::value::Value;
use std::rc::Rc;

/// `eval(value, env) -> value`, per §4.H. Every value this produces —
/// whether self-evaluating, looked up, or freshly constructed by a
/// primitive or closure application — is registered with `pool` before
/// being returned, so a top-level caller can `pool.collect` once the form
/// is fully evaluated.
pub fn eval(value: &Value, env: &Rc<Environment>, pool: &mut Pool) -> Result<Value, EvalError> {
    let result = eval_inner(value, env, pool)?;
    Ok(pool.add_recursive(result))
}

fn eval_inner(value: &Value, env: &Rc<Environment>, pool: &mut Pool) -> Result<Value, EvalError> {
    match value {
        Value::Nil
        | Value::Integer(_)
        | Value::Float(_)
        | Value::Primitive(_)
        | Value::Closure(_) => Ok(value.clone()),
        Value::Atom(name) => {
            if name.as_ref() == "t" {
                return Ok(Value::truth());
            }
            env.get(name)
                .ok_or_else(|| EvalError::UnboundError(name.to_string()))
        }
        Value::Pair(p) => eval_call(&p.head, &p.tail, env, pool),
    }
}

fn eval_call(
    head: &Value,
    tail: &Value,
    env: &Rc<Environment>,
    pool: &mut Pool,
) -> Result<Value, EvalError> {
    let head_val = eval(head, env, pool)?;

    let is_special_dispatch = match &head_val {
        Value::Primitive(p) => p.special,
        Value::Closure(c) => c.is_macro,
        _ => false,
    };

    let args = if is_special_dispatch {
        tail.to_vec()?
    } else {
        let mut evaluated = Vec::new();
        for expr in tail.to_vec()? {
            evaluated.push(eval(&expr, env, pool)?);
        }
        evaluated
    };

    match &head_val {
        Value::Primitive(p) => (p.func)(&args, env, pool),
        Value::Closure(c) => apply_closure(c, args, env, pool),
        other => Err(EvalError::type_error(
            "apply",
            "a primitive or closure",
            &format!("{other:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::parser::read_one;

    fn eval_src(src: &str, env: &Rc<Environment>, pool: &mut Pool) -> Result<Value, EvalError> {
        let (form, _) = read_one(src).unwrap();
        eval(&form, env, pool)
    }

    fn base_env() -> Rc<Environment> {
        let env = Rc::new(Environment::new());
        register_builtins(&env);
        env
    }

    #[test]
    fn integers_floats_t_and_nil_self_evaluate() {
        let env = base_env();
        let mut pool = Pool::new();
        assert!(eval_src("42", &env, &mut pool)
            .unwrap()
            .structural_eq(&Value::Integer(42)));
        assert!(eval_src("3.5", &env, &mut pool)
            .unwrap()
            .structural_eq(&Value::Float(3.5)));
        assert!(eval_src("t", &env, &mut pool)
            .unwrap()
            .structural_eq(&Value::truth()));
        assert!(eval_src("()", &env, &mut pool)
            .unwrap()
            .structural_eq(&Value::Nil));
    }

    #[test]
    fn unbound_atom_is_unbound_error() {
        let env = base_env();
        let mut pool = Pool::new();
        assert!(matches!(
            eval_src("nope", &env, &mut pool),
            Err(EvalError::UnboundError(_))
        ));
    }

    #[test]
    fn quote_fixpoint() {
        let env = base_env();
        let mut pool = Pool::new();
        let quoted = eval_src("'(a b c)", &env, &mut pool).unwrap();
        let (direct, _) = read_one("(a b c)").unwrap();
        assert!(quoted.structural_eq(&direct));
    }

    #[test]
    fn car_cdr_cons_and_cond_scenarios() {
        let env = base_env();
        let mut pool = Pool::new();

        let result = eval_src("(car '(a b c))", &env, &mut pool).unwrap();
        assert!(result.structural_eq(&Value::atom("a")));

        let result = eval_src("(cdr (cdr '(a b c d)))", &env, &mut pool).unwrap();
        let (expected, _) = read_one("(c d)").unwrap();
        assert!(result.structural_eq(&expected));

        let result = eval_src(
            "(cond ((eq 'a 'b) 'first) ((atom 'a) 'second))",
            &env,
            &mut pool,
        )
        .unwrap();
        assert!(result.structural_eq(&Value::atom("second")));
    }

    #[test]
    fn recursive_factorial_via_set_and_cond() {
        let env = base_env();
        let mut pool = Pool::new();
        eval_src(
            "(set 'factorial (lambda (x) (cond ((= x 0) 1) (t (* x (factorial (- x 1)))))))",
            &env,
            &mut pool,
        )
        .unwrap();
        let result = eval_src("(factorial 5)", &env, &mut pool).unwrap();
        assert!(result.structural_eq(&Value::Integer(120)));
    }

    #[test]
    fn closures_capture_by_value_and_partial_application_composes() {
        let env = base_env();
        let mut pool = Pool::new();
        eval_src(
            "(set 'make-adder (lambda (x) (lambda (y) (+ x y))))",
            &env,
            &mut pool,
        )
        .unwrap();
        eval_src("(set 'add-5 (make-adder 5))", &env, &mut pool).unwrap();
        let result = eval_src("(add-5 7)", &env, &mut pool).unwrap();
        assert!(result.structural_eq(&Value::Integer(12)));
    }

    #[test]
    fn eq_distinguishes_integer_and_float_end_to_end() {
        let env = base_env();
        let mut pool = Pool::new();
        assert!(!eval_src("(eq 3 3.0)", &env, &mut pool).unwrap().is_truthy());
        assert!(eval_src("(eq 3.0 3.0)", &env, &mut pool).unwrap().is_truthy());
    }

    #[test]
    fn set_bindings_are_frozen_into_closures_captured_at_construction() {
        let env = base_env();
        let mut pool = Pool::new();
        eval_src("(set 'y 'a)", &env, &mut pool).unwrap();
        eval_src("(set 'f (lambda (x) (cons x y)))", &env, &mut pool).unwrap();
        eval_src("(set 'y 'b)", &env, &mut pool).unwrap();
        let result = eval_src("(f 'z)", &env, &mut pool).unwrap();
        let (expected, _) = read_one("(z a)").unwrap();
        assert!(result.structural_eq(&expected));
    }

    #[test]
    fn calling_a_non_callable_is_a_type_error() {
        let env = base_env();
        let mut pool = Pool::new();
        assert!(matches!(
            eval_src("(5 1 2)", &env, &mut pool),
            Err(EvalError::TypeError { .. })
        ));
    }

    #[test]
    fn macro_skips_argument_evaluation_and_reevaluates_result_in_caller_env() {
        let env = base_env();
        let mut pool = Pool::new();
        eval_src(
            "(defmacro my-if (c then else) (cond (c then) (t else)))",
            &env,
            &mut pool,
        )
        .unwrap();
        let result = eval_src("(my-if t 'yes unbound-atom)", &env, &mut pool).unwrap();
        assert!(result.structural_eq(&Value::atom("yes")));
    }
}

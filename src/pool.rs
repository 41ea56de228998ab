//! The short-lived allocation pool.
//!
//! The evaluator registers every intermediate `Pair`/`Closure` it builds
//! with the pool as it goes, without worrying about exact lifetimes. At a
//! top-level form boundary the driver calls [`Pool::collect`], which walks
//! the environment and the form's result by pointer identity and drops
//! every tracked reference that isn't reachable from one of those two
//! roots. Because `Value`'s heap variants are reference-counted and the
//! value graph is acyclic (nodes are only ever built bottom-up, never
//! mutated in place), dropping an unreachable tracked reference frees the
//! node the moment nothing else holds it — no separate sweep phase needed.

use crate::value::Value;
use std::collections::HashSet;

use crate::value::Identity;

#[derive(Default)]
pub struct Pool {
    tracked: Vec<Value>,
}

impl Pool {
    pub fn new() -> Pool {
        Pool::default()
    }

    /// Takes ownership of `value` alone; children reachable through it are
    /// not separately registered (use [`Pool::add_recursive`] for that).
    pub fn add(&mut self, value: Value) -> Value {
        self.tracked.push(value.clone());
        value
    }

    /// Takes ownership of every `Pair`/`Closure` node in `root`'s subtree.
    pub fn add_recursive(&mut self, root: Value) -> Value {
        self.register_subtree(&root);
        root
    }

    fn register_subtree(&mut self, value: &Value) {
        if value.identity().is_some() {
            self.tracked.push(value.clone());
        }
        match value {
            Value::Pair(p) => {
                self.register_subtree(&p.head);
                self.register_subtree(&p.tail);
            }
            Value::Closure(c) => {
                self.register_subtree(&c.params);
                self.register_subtree(&c.body);
                self.register_subtree(&c.captured);
            }
            _ => {}
        }
    }

    /// Frees every tracked value not reachable from `env` or `keep`.
    /// Reachability is by pointer identity through `Pair` and `Closure`
    /// children.
    pub fn collect(&mut self, env: &Value, keep: &Value) {
        let mut reachable = HashSet::new();
        mark_reachable(env, &mut reachable);
        mark_reachable(keep, &mut reachable);

        self.tracked.retain(|v| match v.identity() {
            Some(id) => reachable.contains(&id),
            None => false,
        });
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}

fn mark_reachable(value: &Value, seen: &mut HashSet<Identity>) {
    if let Some(id) = value.identity() {
        if !seen.insert(id) {
            return;
        }
    }
    match value {
        Value::Pair(p) => {
            mark_reachable(&p.head, seen);
            mark_reachable(&p.tail, seen);
        }
        Value::Closure(c) => {
            mark_reachable(&c.params, seen);
            mark_reachable(&c.body, seen);
            mark_reachable(&c.captured, seen);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_frees_values_unreachable_from_env_or_result() {
        let mut pool = Pool::new();
        let garbage = pool.add_recursive(Value::cons(Value::Integer(1), Value::Nil));
        let kept = pool.add_recursive(Value::cons(Value::Integer(2), Value::Nil));

        assert_eq!(pool.len(), 2);
        pool.collect(&Value::Nil, &kept);
        assert_eq!(pool.len(), 1);

        drop(garbage);
    }

    #[test]
    fn collect_retains_values_reachable_from_env() {
        let mut pool = Pool::new();
        let binding = pool.add_recursive(Value::cons(Value::atom("x"), Value::Integer(42)));
        let env_value = Value::cons(binding.clone(), Value::Nil);

        pool.collect(&env_value, &Value::Nil);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn add_recursive_tracks_nested_pairs() {
        let mut pool = Pool::new();
        let nested = Value::cons(
            Value::Integer(1),
            Value::cons(Value::Integer(2), Value::Nil),
        );
        pool.add_recursive(nested);
        // Outer pair + inner pair = 2 tracked nodes.
        assert_eq!(pool.len(), 2);
    }
}

// ABOUTME: Array/string builtins: len, first, last, rest, push

use crate::env::Environment;
use crate::object::Object;
use std::rc::Rc;

/// Binds `len`, `first`, `last`, `rest`, `push` into `env`.
pub fn register(env: &Rc<Environment>) {
    env.set("len".to_string(), Object::Builtin(len));
    env.set("first".to_string(), Object::Builtin(first));
    env.set("last".to_string(), Object::Builtin(last));
    env.set("rest".to_string(), Object::Builtin(rest));
    env.set("push".to_string(), Object::Builtin(push));
}

fn arity_error(given: usize, expected: usize) -> Object {
    Object::Error(format!(
        "argument error: wrong number of arguments (given {given}, expected {expected})"
    ))
}

fn unsupported(name: &str, type_name: &str) -> Object {
    Object::Error(format!("argument to `{name}` not supported, got {type_name}"))
}

pub fn len(args: &[Object]) -> Object {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Object::String(s) => Object::Integer(s.len() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        other => unsupported("len", other.type_name()),
    }
}

pub fn first(args: &[Object]) -> Object {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => elements.first().cloned().unwrap_or(Object::Null),
        other => unsupported("first", other.type_name()),
    }
}

pub fn last(args: &[Object]) -> Object {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => elements.last().cloned().unwrap_or(Object::Null),
        other => unsupported("last", other.type_name()),
    }
}

pub fn rest(args: &[Object]) -> Object {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => {
            if elements.is_empty() {
                Object::Null
            } else {
                Object::Array(elements[1..].to_vec())
            }
        }
        other => unsupported("rest", other.type_name()),
    }
}

pub fn push(args: &[Object]) -> Object {
    if args.len() != 2 {
        return arity_error(args.len(), 2);
    }
    match &args[0] {
        Object::Array(elements) => {
            let mut result = elements.clone();
            result.push(args[1].clone());
            Object::Array(result)
        }
        other => Object::Error(format!(
            "first argument to `push` not supported, got {}",
            other.type_name()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_of_string_and_array() {
        assert!(matches!(len(&[Object::String("four".into())]), Object::Integer(4)));
        assert!(matches!(
            len(&[Object::Array(vec![Object::Integer(1), Object::Integer(2)])]),
            Object::Integer(2)
        ));
    }

    #[test]
    fn test_len_rejects_unsupported_type() {
        match len(&[Object::Integer(1)]) {
            Object::Error(msg) => assert_eq!(msg, "argument to `len` not supported, got INTEGER"),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_len_reports_arity_mismatch() {
        match len(&[]) {
            Object::Error(msg) => {
                assert_eq!(msg, "argument error: wrong number of arguments (given 0, expected 1)")
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_first_last_rest_of_array() {
        let arr = Object::Array(vec![Object::Integer(1), Object::Integer(2), Object::Integer(3)]);
        assert!(matches!(first(&[arr.clone()]), Object::Integer(1)));
        assert!(matches!(last(&[arr.clone()]), Object::Integer(3)));
        match rest(&[arr]) {
            Object::Array(elements) => assert_eq!(elements.len(), 2),
            other => panic!("expected Array, got {other:?}"),
        }
    }

    #[test]
    fn test_rest_of_empty_array_is_null() {
        assert!(matches!(rest(&[Object::Array(vec![])]), Object::Null));
    }

    #[test]
    fn test_push_returns_new_array_without_mutating_original() {
        let original = Object::Array(vec![Object::Integer(1)]);
        match push(&[original.clone(), Object::Integer(2)]) {
            Object::Array(elements) => assert_eq!(elements.len(), 2),
            other => panic!("expected Array, got {other:?}"),
        }
        match original {
            Object::Array(elements) => assert_eq!(elements.len(), 1),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_push_rejects_non_array_first_argument() {
        match push(&[Object::Integer(1), Object::Integer(2)]) {
            Object::Error(msg) => {
                assert_eq!(msg, "first argument to `push` not supported, got INTEGER")
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }
}

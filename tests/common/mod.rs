// ABOUTME: Shared helpers for the integration test binaries

use monkey_lang::builtins;
use monkey_lang::env::Environment;
use monkey_lang::object::Object;

pub fn run(source: &str) -> Object {
    let env = Environment::new();
    builtins::register_builtins(&env);
    monkey_lang::eval_source(source, env)
}

pub fn assert_integer(obj: &Object, expected: i64) {
    match obj {
        Object::Integer(n) => assert_eq!(*n, expected),
        other => panic!("expected Integer({expected}), got {other:?}"),
    }
}

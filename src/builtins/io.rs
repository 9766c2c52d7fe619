// ABOUTME: Console output builtin: puts

use crate::env::Environment;
use crate::object::Object;
use std::rc::Rc;

pub fn puts(args: &[Object]) -> Object {
    for arg in args {
        println!("{}", arg.inspect());
    }
    Object::Null
}

/// Binds `puts` into `env`.
pub fn register(env: &Rc<Environment>) {
    env.set("puts".to_string(), Object::Builtin(puts));
}

// ABOUTME: Integration tests covering parse failures through the full eval_source pipeline

mod common;

use common::run;
use monkey_lang::object::Object;

#[test]
fn test_parse_error_short_circuits_evaluation() {
    match run("let = 5;") {
        Object::Error(_) => {}
        other => panic!("expected Error, got {other:?}"),
    }
}

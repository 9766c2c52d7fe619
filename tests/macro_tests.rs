// ABOUTME: Integration tests driving macro expansion through the full eval_source pipeline

mod common;

use common::run;
use monkey_lang::object::Object;

#[test]
fn test_macro_unless_integrates_with_full_pipeline() {
    let source = r#"
        let unless = macro(condition, consequence, alternative) {
            quote(if (!(unquote(condition))) {
                unquote(consequence);
            } else {
                unquote(alternative);
            });
        };

        unless(10 > 5, "not greater", "greater");
    "#;
    match run(source) {
        Object::String(s) => assert_eq!(s, "greater"),
        other => panic!("expected String, got {other:?}"),
    }
}

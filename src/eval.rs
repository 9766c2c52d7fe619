// ABOUTME: Tree-walking evaluator: AST + Environment -> Object

use crate::ast::*;
use crate::env::Environment;
use crate::macros::quote;
use crate::object::Object;
use std::rc::Rc;

pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Object {
    let mut result = Object::Null;
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result {
            Object::ReturnValue(value) => return *value,
            Object::Error(_) => return result,
            _ => {}
        }
    }
    result
}

/// Like `eval_program` but does not unwrap RETURN_VALUE — propagating it lets
/// a `return` inside a nested `if` abort the enclosing function without
/// being absorbed by the inner block.
fn eval_block(block: &BlockStatement, env: &Rc<Environment>) -> Object {
    let mut result = Object::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Rc<Environment>) -> Object {
    match stmt {
        Statement::Expression(expr_stmt) => eval_expression(&expr_stmt.expression, env),
        Statement::Let(let_stmt) => {
            let value = eval_expression(&let_stmt.value, env);
            if value.is_error() {
                return value;
            }
            env.set(let_stmt.name.value.clone(), value);
            Object::Null
        }
        Statement::Return(ret_stmt) => {
            let value = eval_expression(&ret_stmt.return_value, env);
            if value.is_error() {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Block(block) => eval_block(block, env),
    }
}

pub fn eval_expression(expr: &Expression, env: &Rc<Environment>) -> Object {
    match expr {
        Expression::IntegerLiteral(n) => Object::Integer(*n),
        Expression::BooleanLiteral(b) => Object::Boolean(*b),
        Expression::StringLiteral(s) => Object::String(s.clone()),
        Expression::Identifier(ident) => eval_identifier(ident, env),
        Expression::Prefix(prefix) => {
            let right = eval_expression(&prefix.right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(&prefix.operator, right)
        }
        Expression::Infix(infix) => {
            let left = eval_expression(&infix.left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(&infix.right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(&infix.operator, left, right)
        }
        Expression::If(if_expr) => eval_if_expression(if_expr, env),
        Expression::ArrayLiteral(elements) => match eval_expressions(elements, env) {
            Ok(values) => Object::Array(values),
            Err(err) => err,
        },
        Expression::HashLiteral(pairs) => eval_hash_literal(pairs, env),
        Expression::Index(index_expr) => {
            let left = eval_expression(&index_expr.left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(&index_expr.index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::FunctionLiteral(func) => Object::Function {
            parameters: func.parameters.clone(),
            body: func.body.clone(),
            env: Rc::clone(env),
        },
        Expression::Call(call) => eval_call_expression(call, env),
        Expression::MacroLiteral(_) => Object::Null,
    }
}

/// Builtins are ordinary bindings placed in the global scope by
/// `builtins::register_builtins`, so a plain chain lookup finds them too.
fn eval_identifier(ident: &Identifier, env: &Rc<Environment>) -> Object {
    env.get(&ident.value)
        .unwrap_or_else(|| Object::Error(format!("identifier not found: {}", ident.value)))
}

fn eval_expressions(exprs: &[Expression], env: &Rc<Environment>) -> Result<Vec<Object>, Object> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => Object::Boolean(!right.is_truthy()),
        "-" => match right {
            Object::Integer(n) => Object::Integer(-n),
            other => Object::Error(format!("unknown operator: -{}", other.type_name())),
        },
        _ => Object::Error(format!("unknown operator: {operator}{}", right.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, l, r),
        _ if operator == "==" => Object::Boolean(objects_identical(&left, &right)),
        _ if operator == "!=" => Object::Boolean(!objects_identical(&left, &right)),
        _ if left.type_name() != right.type_name() => Object::Error(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
        _ => Object::Error(format!(
            "unknown operator: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
    }
}

/// TRUE/FALSE/NULL are singletons in spirit (a fixed boolean/unit value), so
/// cross-type `==`/`!=` compares by value here; the effect is identical to
/// pointer identity for these closed variants.
fn objects_identical(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Null, Object::Null) => true,
        (Object::Boolean(l), Object::Boolean(r)) => l == r,
        (Object::Integer(l), Object::Integer(r)) => l == r,
        (Object::String(l), Object::String(r)) => l == r,
        _ => false,
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => Object::Integer(left / right),
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: INTEGER {operator} INTEGER")),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Object {
    match operator {
        "+" => Object::String(format!("{left}{right}")),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: STRING {operator} STRING")),
    }
}

fn eval_if_expression(if_expr: &IfExpression, env: &Rc<Environment>) -> Object {
    let condition = eval_expression(&if_expr.condition, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        eval_block(&if_expr.consequence, env)
    } else if let Some(alt) = &if_expr.alternative {
        eval_block(alt, env)
    } else {
        Object::Null
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Rc<Environment>) -> Object {
    let mut hash = std::collections::HashMap::new();
    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }
        let Some(hash_key) = key.hash_key() else {
            return Object::Error(format!("unhashable type: {}", key.type_name()));
        };
        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }
        hash.insert(hash_key, (key, value));
    }
    Object::Hash(hash)
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Object::Null
            } else {
                elements[*i as usize].clone()
            }
        }
        (Object::Hash(pairs), _) => match index.hash_key() {
            Some(key) => pairs
                .get(&key)
                .map(|(_, v)| v.clone())
                .unwrap_or(Object::Null),
            None => Object::Error(format!("unhashable type: {}", index.type_name())),
        },
        _ => Object::Error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}

fn eval_call_expression(call: &CallExpression, env: &Rc<Environment>) -> Object {
    if let Expression::Identifier(ident) = call.function.as_ref() {
        if ident.value == "quote" {
            let Some(arg) = call.arguments.first() else {
                return Object::Error(
                    "argument error: wrong number of arguments (given 0, expected 1)".to_string(),
                );
            };
            return quote(arg, env);
        }
    }

    let function = eval_expression(&call.function, env);
    if function.is_error() {
        return function;
    }

    let args = match eval_expressions(&call.arguments, env) {
        Ok(values) => values,
        Err(err) => return err,
    };

    apply_function(function, &args)
}

fn apply_function(function: Object, args: &[Object]) -> Object {
    match function {
        Object::Function {
            parameters,
            body,
            env: captured_env,
        } => {
            if args.len() != parameters.len() {
                return Object::Error(format!(
                    "argument error: wrong number of arguments (given {}, expected {})",
                    args.len(),
                    parameters.len()
                ));
            }
            let call_env = Environment::with_parent(captured_env);
            for (param, arg) in parameters.iter().zip(args) {
                call_env.set(param.value.clone(), arg.clone());
            }
            match eval_block(&body, &call_env) {
                Object::ReturnValue(value) => *value,
                other => other,
            }
        }
        Object::Builtin(func) => func(args),
        other => Object::Error(format!("not a function: {}", other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn eval_source(source: &str) -> Object {
        let env = Environment::new();
        let (program, errors) = parse(source);
        assert!(errors.is_empty(), "parse errors: {errors:?}");
        eval_program(&program, &env)
    }

    fn assert_integer(obj: &Object, expected: i64) {
        match obj {
            Object::Integer(n) => assert_eq!(*n, expected),
            other => panic!("expected Integer({expected}), got {other:?}"),
        }
    }

    fn assert_bool(obj: &Object, expected: bool) {
        match obj {
            Object::Boolean(b) => assert_eq!(*b, expected),
            other => panic!("expected Boolean({expected}), got {other:?}"),
        }
    }

    fn assert_null(obj: &Object) {
        assert!(matches!(obj, Object::Null), "expected Null, got {obj:?}");
    }

    #[test]
    fn test_integer_arithmetic() {
        assert_integer(&eval_source("5 + 5 * 2"), 15);
        assert_integer(&eval_source("(5 + 10 * 2 + 15 / 3) * 2 + -10"), 50);
        assert_integer(&eval_source("5 - 3"), 2);
        assert_integer(&eval_source("10 / 2"), 5);
    }

    #[test]
    fn test_boolean_expressions() {
        assert_bool(&eval_source("1 < 2"), true);
        assert_bool(&eval_source("1 > 2"), false);
        assert_bool(&eval_source("1 == 1"), true);
        assert_bool(&eval_source("1 != 1"), false);
        assert_bool(&eval_source("true == true"), true);
        assert_bool(&eval_source("true != false"), true);
        assert_bool(&eval_source("(1 < 2) == true"), true);
    }

    #[test]
    fn test_bang_operator() {
        assert_bool(&eval_source("!true"), false);
        assert_bool(&eval_source("!false"), true);
        assert_bool(&eval_source("!5"), false);
        assert_bool(&eval_source("!!true"), true);
    }

    #[test]
    fn test_if_else_expressions() {
        assert_integer(&eval_source("if (1 < 2) { 10 } else { 20 }"), 10);
        assert_null(&eval_source("if (1 > 2) { 10 }"));
        assert_integer(&eval_source("if (false) { 10 } else { 20 }"), 20);
    }

    #[test]
    fn test_return_statements() {
        assert_integer(&eval_source("return 10;"), 10);
        assert_integer(&eval_source("9; return 2 * 5; 9;"), 10);
        assert_integer(
            &eval_source("if (10 > 1) { if (10 > 1) { return 10; } return 1; }"),
            10,
        );
    }

    #[test]
    fn test_error_handling() {
        let cases = [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { true + false; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "identifier not found: foobar"),
            (
                r#""Hello" - "World""#,
                "unknown operator: STRING - STRING",
            ),
        ];

        for (input, expected) in cases {
            match eval_source(input) {
                Object::Error(msg) => assert_eq!(msg, expected, "input: {input}"),
                other => panic!("expected Error, got {other:?} for input {input}"),
            }
        }
    }

    #[test]
    fn test_let_statements() {
        assert_integer(&eval_source("let a = 5; a;"), 5);
        assert_integer(&eval_source("let a = 5 * 5; a;"), 25);
        assert_integer(&eval_source("let a = 5; let b = a; b;"), 5);
    }

    #[test]
    fn test_function_application() {
        assert_integer(&eval_source("let identity = fn(x) { x; }; identity(5);"), 5);
        assert_integer(
            &eval_source("let identity = fn(x) { return x; }; identity(5);"),
            5,
        );
        assert_integer(
            &eval_source("let add = fn(x, y) { x + y; }; add(5, add(3, 2));"),
            10,
        );
    }

    #[test]
    fn test_closures_capture_defining_environment() {
        assert_integer(
            &eval_source(
                "let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(3);",
            ),
            5,
        );
    }

    #[test]
    fn test_rebinding_in_same_scope_shadows_prior_closure_reads() {
        // documents the spec's closure-capture design choice: `set` always
        // writes into the innermost scope, so the later `let a` wins.
        assert_integer(&eval_source("let a = 5; let f = fn(){a}; let a = 6; f()"), 6);
    }

    #[test]
    fn test_string_concatenation() {
        match eval_source(r#""Hello, " + "world!""#) {
            Object::String(s) => assert_eq!(s, "Hello, world!"),
            other => panic!("expected String, got {other:?}"),
        }
    }

    #[test]
    fn test_array_literals_and_indexing() {
        match eval_source("[1, 2 * 2, 3 + 3]") {
            Object::Array(elements) => {
                assert_integer(&elements[0], 1);
                assert_integer(&elements[1], 4);
                assert_integer(&elements[2], 6);
            }
            other => panic!("expected Array, got {other:?}"),
        }

        assert_integer(&eval_source("[1, 2, 3][0]"), 1);
        assert_null(&eval_source("[1, 2, 3][3]"));
        assert_null(&eval_source("let i = -1; [1, 2, 3][i]"));
    }

    #[test]
    fn test_hash_literals_and_indexing() {
        assert_integer(&eval_source(r#"{"a": 1}["a"]"#), 1);
        assert_null(&eval_source(r#"{"x": 5}["y"]"#));
        assert_null(&eval_source("{true: 5}[false]"));
    }

    #[test]
    fn test_hash_literal_with_non_hashable_key_is_an_error() {
        match eval_source(r#"{"name": "Monkey"}[fn(x) { x }]"#) {
            Object::Error(msg) => assert_eq!(msg, "unhashable type: FUNCTION"),
            other => panic!("expected Error, got {other:?}"),
        }
    }
}

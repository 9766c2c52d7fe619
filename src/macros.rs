// ABOUTME: quote/unquote and the two-phase macro expansion pass

use crate::ast::{CallExpression, Expression, Program, Statement};
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval_expression;
use crate::modify::{modify_expression, modify_program};
use crate::object::Object;
use std::rc::Rc;

/// `quote(expr)` never evaluates `expr`; it only resolves any `unquote(...)`
/// calls nested inside it and wraps the result.
pub fn quote(expr: &Expression, env: &Rc<Environment>) -> Object {
    Object::Quote(eval_unquote_calls(expr.clone(), env))
}

fn eval_unquote_calls(expr: Expression, env: &Rc<Environment>) -> Expression {
    let mut rewrite = |node: Expression| -> Expression {
        let Expression::Call(CallExpression {
            function,
            arguments,
        }) = &node
        else {
            return node;
        };
        let Expression::Identifier(ident) = function.as_ref() else {
            return node;
        };
        if ident.value != "unquote" || arguments.len() != 1 {
            return node;
        }
        let value = eval_expression(&arguments[0], env);
        object_to_ast(&value).unwrap_or(node)
    };

    modify_expression(expr, &mut rewrite)
}

/// Converts a runtime value back into the AST node it came from, so
/// `unquote` results can be spliced back into a quoted tree. Only INTEGER,
/// BOOLEAN, and QUOTE are supported; anything else leaves the original
/// `unquote(...)` call in place.
fn object_to_ast(obj: &Object) -> Option<Expression> {
    match obj {
        Object::Integer(n) => Some(Expression::IntegerLiteral(*n)),
        Object::Boolean(b) => Some(Expression::BooleanLiteral(*b)),
        Object::Quote(node) => Some(node.clone()),
        _ => None,
    }
}

/// Scans top-level `let <name> = macro(...) {...};` statements, binds a
/// MACRO value for each under its name in `env`, and removes the defining
/// statements from the program.
pub fn define_macros(program: &mut Program, env: &Rc<Environment>) {
    let mut macro_indices = Vec::new();

    for (idx, stmt) in program.statements.iter().enumerate() {
        let Statement::Let(let_stmt) = stmt else {
            continue;
        };
        let Expression::MacroLiteral(macro_lit) = &let_stmt.value else {
            continue;
        };

        env.set(
            let_stmt.name.value.clone(),
            Object::Macro {
                parameters: macro_lit.parameters.clone(),
                body: macro_lit.body.clone(),
                env: Rc::clone(env),
            },
        );
        macro_indices.push(idx);
    }

    for idx in macro_indices.into_iter().rev() {
        program.statements.remove(idx);
    }
}

/// Rewrites every macro call in the program with the AST its macro body
/// returns. Arity mismatches and macro bodies that don't return a QUOTE are
/// fatal (host-level) errors, not ordinary ERROR values.
pub fn expand_macros(program: Program, env: &Rc<Environment>) -> Result<Program, EvalError> {
    let mut result = Ok(());
    let expanded = modify_program(program, &mut |node| match expand_call(node, env) {
        Ok(expr) => expr,
        Err(err) => {
            result = Err(err);
            Expression::BooleanLiteral(false)
        }
    });
    result.map(|()| expanded)
}

fn expand_call(node: Expression, env: &Rc<Environment>) -> Result<Expression, EvalError> {
    let Expression::Call(call) = &node else {
        return Ok(node);
    };
    let Expression::Identifier(ident) = call.function.as_ref() else {
        return Ok(node);
    };
    let Some(Object::Macro {
        parameters,
        body,
        env: macro_env,
    }) = env.get(&ident.value)
    else {
        return Ok(node);
    };

    if call.arguments.len() != parameters.len() {
        return Err(EvalError::MacroArity {
            given: call.arguments.len(),
            expected: parameters.len(),
        });
    }

    let extended_env = Environment::with_parent(Rc::clone(&macro_env));
    for (param, arg) in parameters.iter().zip(&call.arguments) {
        extended_env.set(param.value.clone(), quote(arg, env));
    }

    match eval_expression(&body_as_expression(&body), &extended_env) {
        Object::Quote(quoted) => Ok(quoted),
        other => Err(EvalError::MacroDidNotReturnQuote {
            got: other.type_name().to_string(),
        }),
    }
}

/// A macro body is a `BlockStatement`; `quote`'s special-cased evaluation
/// only runs inside `CallExpression`, so macro bodies are expected to be a
/// single `quote(...)` expression statement — wrap it back into the shape
/// `eval_expression` understands.
fn body_as_expression(body: &crate::ast::BlockStatement) -> Expression {
    match body.statements.last() {
        Some(Statement::Expression(expr_stmt)) => expr_stmt.expression.clone(),
        _ => Expression::BooleanLiteral(false),
    }
}

// ABOUTME: Generic bottom-up AST rewriter used by macro expansion

use crate::ast::*;

/// Visits every expression/statement, recursively rewriting children first
/// (post-order), then applies `f` to the node itself. Unknown/leaf variants
/// that carry no children are passed through unchanged apart from the `f`
/// call at the end.
pub fn modify_program(mut program: Program, f: &mut dyn FnMut(Expression) -> Expression) -> Program {
    program.statements = program
        .statements
        .into_iter()
        .map(|stmt| modify_statement(stmt, f))
        .collect();
    program
}

pub fn modify_statement(stmt: Statement, f: &mut dyn FnMut(Expression) -> Expression) -> Statement {
    match stmt {
        Statement::Let(mut let_stmt) => {
            let_stmt.value = modify_expression(let_stmt.value, f);
            Statement::Let(let_stmt)
        }
        Statement::Return(mut ret_stmt) => {
            ret_stmt.return_value = modify_expression(ret_stmt.return_value, f);
            Statement::Return(ret_stmt)
        }
        Statement::Expression(mut expr_stmt) => {
            expr_stmt.expression = modify_expression(expr_stmt.expression, f);
            Statement::Expression(expr_stmt)
        }
        Statement::Block(block) => Statement::Block(modify_block(block, f)),
    }
}

fn modify_block(mut block: BlockStatement, f: &mut dyn FnMut(Expression) -> Expression) -> BlockStatement {
    block.statements = block
        .statements
        .into_iter()
        .map(|stmt| modify_statement(stmt, f))
        .collect();
    block
}

pub fn modify_expression(expr: Expression, f: &mut dyn FnMut(Expression) -> Expression) -> Expression {
    let rewritten = match expr {
        Expression::Infix(mut infix) => {
            infix.left = Box::new(modify_expression(*infix.left, f));
            infix.right = Box::new(modify_expression(*infix.right, f));
            Expression::Infix(infix)
        }
        Expression::Prefix(mut prefix) => {
            prefix.right = Box::new(modify_expression(*prefix.right, f));
            Expression::Prefix(prefix)
        }
        Expression::Index(mut index) => {
            index.left = Box::new(modify_expression(*index.left, f));
            index.index = Box::new(modify_expression(*index.index, f));
            Expression::Index(index)
        }
        Expression::If(mut if_expr) => {
            if_expr.condition = Box::new(modify_expression(*if_expr.condition, f));
            if_expr.consequence = modify_block(if_expr.consequence, f);
            if_expr.alternative = if_expr.alternative.map(|alt| modify_block(alt, f));
            Expression::If(if_expr)
        }
        Expression::FunctionLiteral(mut func) => {
            func.body = modify_block(func.body, f);
            Expression::FunctionLiteral(func)
        }
        Expression::ArrayLiteral(elements) => Expression::ArrayLiteral(
            elements
                .into_iter()
                .map(|e| modify_expression(e, f))
                .collect(),
        ),
        Expression::HashLiteral(pairs) => Expression::HashLiteral(
            pairs
                .into_iter()
                .map(|(k, v)| (modify_expression(k, f), modify_expression(v, f)))
                .collect(),
        ),
        Expression::Call(mut call) => {
            call.function = Box::new(modify_expression(*call.function, f));
            call.arguments = call
                .arguments
                .into_iter()
                .map(|a| modify_expression(a, f))
                .collect();
            Expression::Call(call)
        }
        // Identifier, literals, MacroLiteral carry no sub-expressions to rewrite.
        leaf => leaf,
    };

    f(rewritten)
}

// ABOUTME: AST node definitions and the canonical pretty-printer

use std::fmt;

/// The root node: an ordered sequence of top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => "",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

impl Statement {
    pub fn token_literal(&self) -> &str {
        match self {
            Statement::Let(s) => &s.token_literal,
            Statement::Return(s) => &s.token_literal,
            Statement::Expression(s) => s.expression.token_literal(),
            Statement::Block(s) => s
                .statements
                .first()
                .map(|s| s.token_literal())
                .unwrap_or(""),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(s) => write!(f, "{s}"),
            Statement::Return(s) => write!(f, "{s}"),
            Statement::Expression(s) => write!(f, "{}", s.expression),
            Statement::Block(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub token_literal: String,
    pub name: Identifier,
    pub value: Expression,
}

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token_literal: String,
    pub return_value: Expression,
}

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "return {};", self.return_value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(i64),
    BooleanLiteral(bool),
    StringLiteral(String),
    ArrayLiteral(Vec<Expression>),
    HashLiteral(Vec<(Expression, Expression)>),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Index(IndexExpression),
    If(IfExpression),
    FunctionLiteral(FunctionLiteral),
    Call(CallExpression),
    MacroLiteral(MacroLiteral),
}

impl Expression {
    pub fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(id) => &id.value,
            Expression::IntegerLiteral(_) => "int",
            Expression::BooleanLiteral(b) => {
                if *b {
                    "true"
                } else {
                    "false"
                }
            }
            Expression::StringLiteral(_) => "string",
            Expression::ArrayLiteral(_) => "[",
            Expression::HashLiteral(_) => "{",
            Expression::Prefix(p) => &p.operator,
            Expression::Infix(i) => &i.operator,
            Expression::Index(_) => "[",
            Expression::If(_) => "if",
            Expression::FunctionLiteral(_) => "fn",
            Expression::Call(_) => "(",
            Expression::MacroLiteral(_) => "macro",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(id) => write!(f, "{id}"),
            Expression::IntegerLiteral(n) => write!(f, "{n}"),
            Expression::BooleanLiteral(b) => write!(f, "{b}"),
            Expression::StringLiteral(s) => write!(f, "{s}"),
            Expression::ArrayLiteral(elements) => {
                let rendered: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Expression::HashLiteral(pairs) => {
                let rendered: Vec<String> =
                    pairs.iter().map(|(k, v)| format!("{k}:{v}")).collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Expression::Prefix(p) => write!(f, "({}{})", p.operator, p.right),
            Expression::Infix(i) => write!(f, "({} {} {})", i.left, i.operator, i.right),
            Expression::Index(ix) => write!(f, "({}[{}])", ix.left, ix.index),
            Expression::If(ifx) => {
                write!(f, "if{} {}", ifx.condition, ifx.consequence)?;
                if let Some(alt) = &ifx.alternative {
                    write!(f, "else {alt}")?;
                }
                Ok(())
            }
            Expression::FunctionLiteral(func) => {
                let params: Vec<String> = func.parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "fn({}) {{ {} }}", params.join(", "), func.body)
            }
            Expression::Call(call) => {
                let args: Vec<String> = call.arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", call.function, args.join(", "))
            }
            Expression::MacroLiteral(m) => {
                let params: Vec<String> = m.parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "macro({}) {{ {} }}", params.join(", "), m.body)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub operator: String,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacroLiteral {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

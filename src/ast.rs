//! The abstract syntax tree produced by the parser.
//!
//! Nodes are represented as two tagged enums — [`Statement`] and
//! [`Expression`] — rather than one struct per node behind a shared trait
//! object, so that every dispatch in the parser and evaluator is an
//! exhaustive `match` the compiler checks for us.

use std::fmt;
use std::rc::Rc;

/// An ordered list of top-level statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
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
    pub name: String,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
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
pub struct FunctionLiteral {
    pub params: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(|p| p.name.clone()).collect();
        write!(f, "fn({}) {}", params.join(", "), self.body)
    }
}

/// Statement-level AST nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let {
        name: Identifier,
        value: Expression,
    },
    Return {
        value: Expression,
    },
    Expression(Expression),
}

impl Statement {
    /// The literal of the token that began this statement, used for error context.
    pub fn token_literal(&self) -> String {
        match self {
            Statement::Let { .. } => "let".to_string(),
            Statement::Return { .. } => "return".to_string(),
            Statement::Expression(expr) => expr.token_literal(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {name} = {value};"),
            Statement::Return { value } => write!(f, "return {value};"),
            Statement::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

/// Expression-level AST nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(i64),
    BooleanLiteral(bool),
    StringLiteral(String),
    Prefix {
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral(FunctionLiteral),
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    /// The literal of the token that began this expression, used for error
    /// context. `IntegerLiteral`/`BooleanLiteral` don't retain the original
    /// token text separately from the parsed value, but both round-trip
    /// exactly through their `Display` forms (no sign, no leading zeros,
    /// `true`/`false` verbatim), so recomputing it here is faithful.
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(ident) => ident.name.clone(),
            Expression::IntegerLiteral(value) => value.to_string(),
            Expression::BooleanLiteral(value) => value.to_string(),
            Expression::StringLiteral(value) => value.clone(),
            Expression::Prefix { operator, .. } => operator.clone(),
            Expression::Infix { operator, .. } => operator.clone(),
            Expression::If { .. } => "if".to_string(),
            Expression::FunctionLiteral(_) => "fn".to_string(),
            Expression::Call { .. } => "(".to_string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{ident}"),
            Expression::IntegerLiteral(value) => write!(f, "{value}"),
            Expression::BooleanLiteral(value) => write!(f, "{value}"),
            Expression::StringLiteral(value) => write!(f, "{value}"),
            Expression::Prefix { operator, right } => write!(f, "({operator}{right})"),
            Expression::Infix {
                left,
                operator,
                right,
            } => write!(f, "({left} {operator} {right})"),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{condition} {consequence}")?;
                if let Some(alt) = alternative {
                    write!(f, "else{alt}")?;
                }
                Ok(())
            }
            Expression::FunctionLiteral(lit) => write!(f, "{lit}"),
            Expression::Call {
                function,
                arguments,
            } => {
                let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{function}({})", args.join(", "))
            }
        }
    }
}

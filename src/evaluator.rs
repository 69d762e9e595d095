//! Recursive tree-walking evaluator.
//!
//! `eval` is pure with respect to AST ownership: its only side effect is
//! mutating the supplied environment via `let`. Errors propagate as values
//! (§7): the first [`Object::Error`] produced by a subexpression becomes the
//! result of every enclosing expression, statement, block, program, or call.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::builtins;
use crate::environment::Environment;
use crate::object::{native_bool, null, Function, Object};

pub fn eval_program(program: &Program, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
    let mut result = null();
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result.as_ref() {
            Object::ReturnValue(inner) => return Rc::clone(inner),
            Object::Error(_) => return result,
            _ => {}
        }
    }
    result
}

fn eval_block_statement(block: &BlockStatement, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
    let mut result = null();
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result.as_ref(), Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
    match stmt {
        Statement::Expression(expr) => eval_expression(expr, env),
        Statement::Return { value } => {
            let evaluated = eval_expression(value, env);
            if evaluated.is_error() {
                return evaluated;
            }
            Rc::new(Object::ReturnValue(evaluated))
        }
        Statement::Let { name, value } => {
            let evaluated = eval_expression(value, env);
            if evaluated.is_error() {
                return evaluated;
            }
            env.borrow_mut().set(name.name.clone(), evaluated);
            null()
        }
    }
}

fn eval_expression(expr: &Expression, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
    match expr {
        Expression::IntegerLiteral(value) => Rc::new(Object::Integer(*value)),
        Expression::BooleanLiteral(value) => native_bool(*value),
        Expression::StringLiteral(value) => Rc::new(Object::String(value.clone())),
        Expression::Identifier(ident) => eval_identifier(&ident.name, env),
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(operator, &right)
        }
        Expression::Infix {
            left,
            operator,
            right,
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(operator, &left, &right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expression::FunctionLiteral(lit) => Rc::new(Object::Function(Function {
            params: lit.params.clone(),
            body: Rc::clone(&lit.body),
            env: Rc::clone(env),
        })),
        Expression::Call {
            function,
            arguments,
        } => eval_call_expression(function, arguments, env),
    }
}

fn eval_identifier(name: &str, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return Rc::new(Object::Builtin(builtin));
    }
    Rc::new(Object::Error(format!("identifier not found: {name}")))
}

/// `!` semantics: `!true` -> false, `!false`/`!null` -> true, anything else -> false.
fn eval_prefix_expression(operator: &str, right: &Object) -> Rc<Object> {
    match operator {
        "!" => native_bool(!right.is_truthy()),
        "-" => match right {
            Object::Integer(value) => Rc::new(Object::Integer(-value)),
            other => Rc::new(Object::Error(format!(
                "unknown operator: -{}",
                other.object_type()
            ))),
        },
        other => Rc::new(Object::Error(format!("unknown operator: {other}"))),
    }
}

fn eval_infix_expression(operator: &str, left: &Object, right: &Object) -> Rc<Object> {
    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Object::Boolean(l), Object::Boolean(r)) => eval_boolean_infix(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, l, r),
        (l, r) if l.object_type() != r.object_type() => Rc::new(Object::Error(format!(
            "type mismatch: {} {operator} {}",
            l.object_type(),
            r.object_type()
        ))),
        (l, r) => Rc::new(Object::Error(format!(
            "unknown operator: {} {operator} {}",
            l.object_type(),
            r.object_type()
        ))),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Rc<Object> {
    match operator {
        "+" => Rc::new(Object::Integer(left.wrapping_add(right))),
        "-" => Rc::new(Object::Integer(left.wrapping_sub(right))),
        "*" => Rc::new(Object::Integer(left.wrapping_mul(right))),
        "/" => {
            if right == 0 {
                Rc::new(Object::Error("division by zero".to_string()))
            } else {
                Rc::new(Object::Integer(left.wrapping_div(right)))
            }
        }
        "<" => native_bool(left < right),
        ">" => native_bool(left > right),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        other => Rc::new(Object::Error(format!(
            "unknown operator: INTEGER {other} INTEGER"
        ))),
    }
}

fn eval_boolean_infix(operator: &str, left: bool, right: bool) -> Rc<Object> {
    match operator {
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        other => Rc::new(Object::Error(format!(
            "Unsupported infix operator for booleans. Got {other} expected == or !="
        ))),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Rc<Object> {
    match operator {
        "+" => Rc::new(Object::String(format!("{left}{right}"))),
        other => Rc::new(Object::Error(format!(
            "unknown operator: STRING {other} STRING"
        ))),
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &BlockStatement,
    alternative: Option<&BlockStatement>,
    env: &Rc<RefCell<Environment>>,
) -> Rc<Object> {
    let condition = eval_expression(condition, env);
    if condition.is_error() {
        return condition;
    }

    if condition.is_truthy() {
        eval_block_statement(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block_statement(alternative, env)
    } else {
        null()
    }
}

fn eval_call_expression(
    function_expr: &Expression,
    argument_exprs: &[Expression],
    env: &Rc<RefCell<Environment>>,
) -> Rc<Object> {
    let function = eval_expression(function_expr, env);
    if function.is_error() {
        return function;
    }

    let mut arguments = Vec::with_capacity(argument_exprs.len());
    for arg in argument_exprs {
        let evaluated = eval_expression(arg, env);
        if evaluated.is_error() {
            return evaluated;
        }
        arguments.push(evaluated);
    }

    apply_function(&function, &arguments)
}

fn apply_function(function: &Object, arguments: &[Rc<Object>]) -> Rc<Object> {
    match function {
        Object::Function(func) => {
            let call_env = Environment::enclosed(Rc::clone(&func.env));
            {
                let mut call_env_mut = call_env.borrow_mut();
                for (param, arg) in func.params.iter().zip(arguments.iter()) {
                    call_env_mut.set(param.name.clone(), Rc::clone(arg));
                }
            }
            let result = eval_block_statement(&func.body, &call_env);
            match result.as_ref() {
                Object::ReturnValue(inner) => Rc::clone(inner),
                _ => result,
            }
        }
        Object::Builtin(builtin) => builtin(arguments),
        other => Rc::new(Object::Error(format!(
            "not a function: {}",
            other.object_type()
        ))),
    }
}

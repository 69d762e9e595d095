//! The runtime object model: the closed set of values the evaluator
//! produces, plus canonical singletons for `true`, `false`, and `null`.

use std::fmt;
use std::rc::Rc;

use crate::ast::{BlockStatement, Identifier};
use crate::environment::Environment;

/// The public type tag, whose string form appears verbatim in runtime error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    String,
    ReturnValue,
    Error,
    Function,
    Builtin,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::String => "STRING",
            ObjectType::ReturnValue => "RETURN",
            ObjectType::Error => "ERROR",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
        };
        write!(f, "{s}")
    }
}

pub type BuiltinFn = fn(&[Rc<Object>]) -> Rc<Object>;

#[derive(Clone)]
pub struct Function {
    pub params: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
    pub env: Rc<std::cell::RefCell<Environment>>,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("params", &self.params).finish()
    }
}

/// A runtime value. `Boolean` and `Null` are never constructed directly by
/// the evaluator outside of [`native_bool`] and [`null`] — see §3.3.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    ReturnValue(Rc<Object>),
    Error(String),
    Function(Function),
    Builtin(BuiltinFn),
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::String(_) => ObjectType::String,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(value) => value.to_string(),
            Object::Boolean(value) => value.to_string(),
            Object::Null => "null".to_string(),
            Object::String(value) => value.clone(),
            Object::ReturnValue(inner) => inner.inspect(),
            Object::Error(message) => format!("Error: {message}"),
            Object::Function(func) => {
                let params: Vec<String> = func.params.iter().map(|p| p.name.clone()).collect();
                format!("fn({}) {{\n{}\n}}", params.join(", "), func.body)
            }
            Object::Builtin(_) => "builtin function".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Truthiness per §4.3.3: only `null` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(|p| p.name.clone()).collect();
        write!(f, "fn({}) {{\n{}\n}}", params.join(", "), self.body)
    }
}

// `Rc` is neither `Send` nor `Sync`, so the canonical singletons live in
// thread-local storage rather than behind `once_cell::sync::Lazy` (which
// backs the process-wide tables in `token.rs`/`builtins.rs` that only hold
// `Sync` payloads). The interpreter is single-threaded throughout (§5), so
// a thread-local is exactly as global as it needs to be.
thread_local! {
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
    static NULL_SINGLETON: Rc<Object> = Rc::new(Object::Null);
}

/// Map a native bool to its canonical singleton.
pub fn native_bool(value: bool) -> Rc<Object> {
    if value {
        TRUE.with(Rc::clone)
    } else {
        FALSE.with(Rc::clone)
    }
}

/// The canonical `null` instance; every evaluation that produces null returns this.
pub fn null() -> Rc<Object> {
    NULL_SINGLETON.with(Rc::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_formats() {
        assert_eq!(Object::Integer(5).inspect(), "5");
        assert_eq!(Object::Boolean(true).inspect(), "true");
        assert_eq!(Object::Null.inspect(), "null");
        assert_eq!(Object::String("hi".into()).inspect(), "hi");
        assert_eq!(Object::Error("boom".into()).inspect(), "Error: boom");
    }

    #[test]
    fn truthiness() {
        assert!(!Object::Null.is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(Object::Boolean(true).is_truthy());
        assert!(Object::Integer(0).is_truthy());
    }

    #[test]
    fn canonical_singletons_share_identity() {
        assert!(Rc::ptr_eq(&native_bool(true), &native_bool(true)));
        assert!(Rc::ptr_eq(&native_bool(false), &native_bool(false)));
        assert!(Rc::ptr_eq(&null(), &null()));
        assert!(!Rc::ptr_eq(&native_bool(true), &native_bool(false)));
    }
}

//! The process-wide builtin function table, consulted when identifier
//! lookup in the environment chain fails.

use std::collections::HashMap;
use std::rc::Rc;

use once_cell::sync::Lazy;

use crate::object::{BuiltinFn, Object};

fn len(args: &[Rc<Object>]) -> Rc<Object> {
    if args.len() != 1 {
        return Rc::new(Object::Error(format!(
            "wrong number of arguments. got={}. want=1",
            args.len()
        )));
    }

    match args[0].as_ref() {
        Object::String(s) => Rc::new(Object::Integer(s.len() as i64)),
        other => Rc::new(Object::Error(format!(
            "argument to 'len' not supported, got {}",
            other.object_type()
        ))),
    }
}

static BUILTINS: Lazy<HashMap<&'static str, BuiltinFn>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, BuiltinFn> = HashMap::new();
    m.insert("len", len);
    m
});

/// Look up a builtin by name.
pub fn lookup(name: &str) -> Option<BuiltinFn> {
    BUILTINS.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_of_string() {
        let result = len(&[Rc::new(Object::String("hello world".into()))]);
        assert_eq!(result.inspect(), "11");
    }

    #[test]
    fn len_wrong_type() {
        let result = len(&[Rc::new(Object::Integer(1))]);
        match result.as_ref() {
            Object::Error(msg) => assert_eq!(msg, "argument to 'len' not supported, got INTEGER"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn len_wrong_arity() {
        let result = len(&[]);
        match result.as_ref() {
            Object::Error(msg) => assert_eq!(msg, "wrong number of arguments. got=0. want=1"),
            other => panic!("expected error, got {other:?}"),
        }
    }
}

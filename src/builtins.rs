use crate::object::*;
use crate::output;
use lazy_static::lazy_static;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

pub type BuiltinFn = fn(Vec<Value>) -> Result<Value>;

/// A native function. Builtins compare by name.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

fn check_arity(args: &[Value], want: usize) -> Result<()> {
    if args.len() == want {
        Ok(())
    } else {
        Err(EvalError::IncorrectArity {
            got: args.len(),
            want,
        })
    }
}

/// Same check as [`check_arity`], reported with the wording the array
/// builtins and `isMT` use.
fn check_arg_count(args: &[Value], want: usize) -> Result<()> {
    if args.len() == want {
        Ok(())
    } else {
        Err(EvalError::WrongArgCount {
            got: args.len(),
            want,
        })
    }
}

fn len(args: Vec<Value>) -> Result<Value> {
    check_arity(&args, 1)?;

    match &args[0] {
        Value::Str(s) => Ok(Value::Int(s.len() as i64)),
        Value::Array(a) => Ok(Value::Int(a.borrow().len() as i64)),
        v => Err(EvalError::UnsupportedArgType {
            fn_name: "len",
            type_name: v.type_name(),
        }),
    }
}

fn empty(args: Vec<Value>) -> Result<Value> {
    check_arity(&args, 1)?;

    match &args[0] {
        Value::Array(a) => a.borrow_mut().clear(),
        Value::HashMap(h) => h.borrow_mut().values.clear(),
        v => {
            return Err(EvalError::UnsupportedArgType {
                fn_name: "empty",
                type_name: v.type_name(),
            })
        }
    }

    Ok(args[0].clone())
}

fn peek(args: Vec<Value>) -> Result<Value> {
    check_arg_count(&args, 1)?;

    match &args[0] {
        Value::Array(a) => Ok(a.borrow().last().cloned().unwrap_or(Value::EMPTY)),
        v => Err(EvalError::arg_type("peek", "ARRAY", v.type_name())),
    }
}

fn pop(args: Vec<Value>) -> Result<Value> {
    check_arg_count(&args, 1)?;

    match &args[0] {
        Value::Array(a) => Ok(a.borrow_mut().pop().unwrap_or(Value::EMPTY)),
        v => Err(EvalError::arg_type("pop", "ARRAY", v.type_name())),
    }
}

fn push(args: Vec<Value>) -> Result<Value> {
    check_arg_count(&args, 2)?;

    match &args[0] {
        Value::Array(a) => {
            a.borrow_mut().push(args[1].clone());
            Ok(args[1].clone())
        }
        v => Err(EvalError::WrongArgType {
            ordinal: "first ",
            fn_name: "push",
            expected: "ARRAY",
            got: v.type_name(),
        }),
    }
}

/// The index must name an existing slot, so `insert` never appends.
fn insert(args: Vec<Value>) -> Result<Value> {
    check_arg_count(&args, 3)?;

    let elements = match &args[0] {
        Value::Array(a) => a,
        v => {
            return Err(EvalError::WrongArgType {
                ordinal: "first ",
                fn_name: "insert",
                expected: "ARRAY",
                got: v.type_name(),
            })
        }
    };
    let index = match &args[1] {
        Value::Int(i) => *i,
        v => {
            return Err(EvalError::WrongArgType {
                ordinal: "second ",
                fn_name: "insert",
                expected: "INT",
                got: v.type_name(),
            })
        }
    };

    let len = elements.borrow().len();
    if index < 0 || index >= len as i64 {
        return Err(EvalError::InsertOutOfBounds { index, len });
    }

    elements.borrow_mut().insert(index as usize, args[2].clone());
    Ok(args[2].clone())
}

fn is_mt(args: Vec<Value>) -> Result<Value> {
    check_arg_count(&args, 1)?;

    Ok(args[0].is_empty().into())
}

fn maybe(args: Vec<Value>) -> Result<Value> {
    check_arity(&args, 0)?;

    let mut rng = rand::thread_rng();
    Ok(rng.gen::<bool>().into())
}

fn ahoy(args: Vec<Value>) -> Result<Value> {
    for arg in args.iter() {
        output::write(&format!("{}\n", arg));
    }

    Ok(Value::EMPTY)
}

fn builtin(name: &'static str, func: BuiltinFn) -> (&'static str, Builtin) {
    (name, Builtin { name, func })
}

lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, Builtin> = vec![
        builtin("len", len),
        builtin("empty", empty),
        builtin("peek", peek),
        builtin("pop", pop),
        builtin("push", push),
        builtin("insert", insert),
        builtin("isMTValue", is_mt),
        builtin("isMT", is_mt),
        builtin("maybe", maybe),
        builtin("ahoy", ahoy),
    ]
    .into_iter()
    .collect();
}

pub fn lookup(name: &str) -> Option<Value> {
    BUILTINS.get(name).copied().map(Value::Builtin)
}

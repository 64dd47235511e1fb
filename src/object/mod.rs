use crate::ast;
use crate::builtins::Builtin;
use crate::namespace::Namespace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;
use std::rc::Rc;

mod eval_error;
pub use eval_error::EvalError;

mod hash;
pub use hash::{HashKey, HashKind};

pub type Result<T> = std::result::Result<T, EvalError>;

/// Arrays, hash maps and chest instances are shared: every clone of the value
/// sees mutations made through any other.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Empty,
    Break,
    Array(Rc<RefCell<Vec<Value>>>),
    HashMap(Rc<RefCell<HashValue>>),
    Function(FunctionValue),
    Builtin(Builtin),
    GivesValue(Box<Value>),
    Error(ErrorValue),
    ChestType(ChestType),
    Chest(Rc<RefCell<ChestValue>>),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Bool(true) => write!(f, "ay"),
            Self::Bool(false) => write!(f, "nay"),
            Self::Str(s) => write!(f, "{}", s),
            Self::Empty => write!(f, "MT"),
            Self::Break => write!(f, "break"),
            Self::Array(a) => fmt_shared(a, f, "[...]", |elements, f| {
                let elements: Vec<String> = elements.iter().map(Value::to_string).collect();

                write!(f, "[{}]", elements.join(", "))
            }),
            Self::HashMap(h) => fmt_shared(h, f, "{...}", |h, f| write!(f, "{}", h)),
            Self::Function(func) => write!(f, "{}", func),
            Self::Builtin(_) => write!(f, "builtin func"),
            Self::GivesValue(v) => write!(f, "{}", v),
            Self::Error(err) => write!(f, "{}", err),
            Self::ChestType(t) => write!(f, "{}", t),
            Self::Chest(c) => fmt_shared(c, f, "|...|", |c, f| write!(f, "{}", c)),
        }
    }
}

thread_local! {
    static DISPLAYING: RefCell<Vec<usize>> = RefCell::new(Vec::new());
}

/// Prints a shared container, or `placeholder` when the container is already
/// being printed further up, so self-containing values terminate.
fn fmt_shared<T>(
    shared: &Rc<RefCell<T>>,
    f: &mut Formatter,
    placeholder: &str,
    body: impl FnOnce(&T, &mut Formatter) -> fmt::Result,
) -> fmt::Result {
    let addr = Rc::as_ptr(shared) as *const () as usize;
    let entered = DISPLAYING.with(|displaying| {
        let mut displaying = displaying.borrow_mut();
        if displaying.contains(&addr) {
            false
        } else {
            displaying.push(addr);
            true
        }
    });
    if !entered {
        return write!(f, "{}", placeholder);
    }

    let result = body(&shared.borrow(), f);
    DISPLAYING.with(|displaying| displaying.borrow_mut().pop());
    result
}

impl Default for Value {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Self::Array(Rc::new(RefCell::new(a)))
    }
}

impl From<HashValue> for Value {
    fn from(h: HashValue) -> Self {
        Self::HashMap(Rc::new(RefCell::new(h)))
    }
}

impl From<ChestValue> for Value {
    fn from(c: ChestValue) -> Self {
        Self::Chest(Rc::new(RefCell::new(c)))
    }
}

impl Value {
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);
    pub const EMPTY: Value = Value::Empty;
    pub const BREAK: Value = Value::Break;

    pub fn is_gives_value(&self) -> bool {
        matches!(self, Self::GivesValue(_))
    }

    pub fn unwrap_gives(self) -> Self {
        match self {
            Self::GivesValue(v) => *v,
            v => v,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "INT",
            Self::Bool(_) => "BOOL",
            Self::Str(_) => "STRING",
            Self::Empty => "MT",
            Self::Break => "BREAK",
            Self::Array(_) => "ARRAY",
            Self::HashMap(_) => "HASHMAP",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
            Self::GivesValue(_) => "GIVES_VALUE",
            Self::Error(_) => "ERROR",
            Self::ChestType(_) => "CHEST_TYPE",
            Self::Chest(_) => "CHEST",
        }
    }

    /// Reference identity for shared values, plain equality for the rest.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::HashMap(a), Self::HashMap(b)) => Rc::ptr_eq(a, b),
            (Self::Chest(a), Self::Chest(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => a == b,
            (a, b) => a == b,
        }
    }
}

/// A runtime error that reached the top of a program, with the line of the
/// statement that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    pub error: EvalError,
    pub line: usize,
}

impl Display for ErrorValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "ERROR: {}", self.error)
    }
}

#[derive(Debug, Clone)]
pub struct FunctionValue {
    pub parameters: Vec<ast::Identifier>,
    pub body: Rc<ast::BlockStatement>,
    pub namespace: Namespace,
}

/// Two function values are equal when they come from the same literal
/// evaluated in the same namespace.
impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && self.namespace.ptr_eq(&other.namespace)
    }
}

impl Display for FunctionValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let identifier_names: Vec<String> = self
            .parameters
            .iter()
            .map(ast::Identifier::to_string)
            .collect();

        write!(f, "f({}) :\n{}\n.", identifier_names.join(", "), self.body)
    }
}

/// Entries keep the original key value next to the stored value so the map
/// can be printed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HashValue {
    pub values: HashMap<HashKey, (Value, Value)>,
}

impl FromIterator<(HashKey, (Value, Value))> for HashValue {
    fn from_iter<I: IntoIterator<Item = (HashKey, (Value, Value))>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Display for HashValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let pairs: Vec<String> = self
            .values
            .values()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();

        write!(f, "{{{}}}", pairs.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChestType {
    pub name: String,
    pub fields: Vec<String>,
}

impl Display for ChestType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "chest|{}|", self.fields.join(", "))
    }
}

/// Fields stay in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChestValue {
    pub fields: Vec<(String, Value)>,
}

impl ChestValue {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }
}

impl Display for ChestValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();

        write!(f, "|{}|", fields.join(", "))
    }
}

use super::{statement::BlockStatement, Identifier, Node};
use crate::token::{Token, TokenType};
use derive_more::Display;
use std::fmt::{self, Formatter};
use std::rc::Rc;

#[derive(Display, Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    StringLiteral(StringLiteral),
    Boolean(Boolean),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Array(ArrayLiteral),
    HashMap(HashMapLiteral),
    Index(IndexExpression),
    Call(CallExpression),
    Function(FunctionLiteral),
    ChestLiteral(ChestLiteral),
    ChestAccess(ChestAccess),
    ChestInstantiation(ChestInstantiation),
}

impl Node for Expression {
    fn token(&self) -> &Token {
        match self {
            Self::Identifier(expr) => &expr.token,
            Self::IntegerLiteral(expr) => &expr.token,
            Self::StringLiteral(expr) => &expr.token,
            Self::Boolean(expr) => &expr.token,
            Self::Prefix(expr) => &expr.token,
            Self::Infix(expr) => &expr.token,
            Self::Array(expr) => &expr.token,
            Self::HashMap(expr) => &expr.token,
            Self::Index(expr) => &expr.token,
            Self::Call(expr) => &expr.token,
            Self::Function(expr) => &expr.token,
            Self::ChestLiteral(expr) => &expr.token,
            Self::ChestAccess(expr) => &expr.token,
            Self::ChestInstantiation(expr) => &expr.token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Operator {
    #[strum(to_string = "!")]
    Bang,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "*")]
    Asterisk,
    #[strum(to_string = "/")]
    Slash,
    #[strum(to_string = "mod")]
    Mod,
    #[strum(to_string = "<")]
    LT,
    #[strum(to_string = ">")]
    GT,
    #[strum(to_string = "<=")]
    LTEq,
    #[strum(to_string = ">=")]
    GTEq,
    #[strum(to_string = "=")]
    Eq,
    #[strum(to_string = "<>")]
    NotEq,
    /// Older spelling of `<>`, kept so it prints back the way it was written.
    #[strum(to_string = "!=")]
    BangEq,
    #[strum(to_string = "and")]
    And,
    #[strum(to_string = "or")]
    Or,
}

impl Operator {
    pub fn from_token(token: &Token) -> Option<Self> {
        Some(match token.token_type {
            TokenType::Bang => Self::Bang,
            TokenType::Minus => Self::Minus,
            TokenType::Plus => Self::Plus,
            TokenType::Star => Self::Asterisk,
            TokenType::Slash => Self::Slash,
            TokenType::Mod => Self::Mod,
            TokenType::Less => Self::LT,
            TokenType::Greater => Self::GT,
            TokenType::LessEq => Self::LTEq,
            TokenType::GreaterEq => Self::GTEq,
            TokenType::Equal => Self::Eq,
            TokenType::NotEqual if token.literal == "!=" => Self::BangEq,
            TokenType::NotEqual => Self::NotEq,
            TokenType::And => Self::And,
            TokenType::Or => Self::Or,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.value.contains('"') {
            write!(f, "'{}'", self.value)
        } else {
            write!(f, "\"{}\"", self.value)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boolean {
    pub token: Token,
    pub value: bool,
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: Operator,
    pub right: Box<Expression>,
}

impl fmt::Display for PrefixExpression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: Operator,
    pub right: Box<Expression>,
}

impl fmt::Display for InfixExpression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let identifier_names: Vec<String> =
            self.parameters.iter().map(Identifier::to_string).collect();

        write!(f, "f({}): {}.", identifier_names.join(", "), self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let argument_names: Vec<String> =
            self.arguments.iter().map(Expression::to_string).collect();

        write!(f, "{}({})", self.function, argument_names.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

impl fmt::Display for ArrayLiteral {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let elements: Vec<String> = self.elements.iter().map(Expression::to_string).collect();

        write!(f, "[{}]", elements.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl fmt::Display for IndexExpression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

/// Pairs stay in source order so evaluation and printing follow the text.
#[derive(Debug, Clone, PartialEq)]
pub struct HashMapLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
}

impl fmt::Display for HashMapLiteral {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let pairs: Vec<String> = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{}:{}", key, value))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChestLiteral {
    pub token: Token,
    pub fields: Vec<(Identifier, Expression)>,
}

impl fmt::Display for ChestLiteral {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "|{}|", join_named(&self.fields))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChestAccess {
    pub token: Token,
    pub left: Box<Expression>,
    pub field: Identifier,
}

impl fmt::Display for ChestAccess {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}|{}", self.left, self.field)
    }
}

/// `Chest|a, b|` fills fields by position, `Chest|x: a|` by name. Only one of
/// `arguments` and `named` is ever populated.
#[derive(Debug, Clone, PartialEq)]
pub struct ChestInstantiation {
    pub token: Token,
    pub chest: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub named: Vec<(Identifier, Expression)>,
}

impl fmt::Display for ChestInstantiation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.named.is_empty() {
            let arguments: Vec<String> = self.arguments.iter().map(Expression::to_string).collect();
            write!(f, "{}|{}|", self.chest, arguments.join(", "))
        } else {
            write!(f, "{}|{}|", self.chest, join_named(&self.named))
        }
    }
}

fn join_named(fields: &[(Identifier, Expression)]) -> String {
    let fields: Vec<String> = fields
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect();
    fields.join(", ")
}

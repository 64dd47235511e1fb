use super::{Expression, Identifier, Node};
use crate::token::Token;
use derive_more::Display;
use std::fmt::{self, Formatter};

#[derive(Display, Debug, Clone, PartialEq)]
pub enum Statement {
    Yar(YarStatement),
    Gives(GivesStatement),
    Port(PortStatement),
    If(IfStatement),
    For(ForStatement),
    Break(BreakStatement),
    Chest(ChestStatement),
    IndexAssign(IndexAssignment),
    ChestFieldAssign(ChestFieldAssignment),
    Expr(ExpressionStatement),
    Block(BlockStatement),
}

impl Node for Statement {
    fn token(&self) -> &Token {
        match self {
            Self::Yar(stmt) => &stmt.token,
            Self::Gives(stmt) => &stmt.token,
            Self::Port(stmt) => &stmt.token,
            Self::If(stmt) => &stmt.token,
            Self::For(stmt) => &stmt.token,
            Self::Break(stmt) => &stmt.token,
            Self::Chest(stmt) => &stmt.token,
            Self::IndexAssign(stmt) => &stmt.token,
            Self::ChestFieldAssign(stmt) => &stmt.token,
            Self::Expr(stmt) => &stmt.token,
            Self::Block(stmt) => &stmt.token,
        }
    }
}

impl Statement {
    /// Writes the statement the way it appears inside a block, where every
    /// statement must end on its own terminator.
    fn fmt_terminated(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Expr(_) | Self::Break(_) => write!(f, "{}.", self),
            stmt => write!(f, "{}", stmt),
        }
    }
}

/// Literal carried by the `yar` token of a bare `name be value.` rebinding.
pub const IMPLICIT_YAR: &str = "FAKEYAR";

/// `yar name be value.`, or the bare `name be value.` rebinding whose token
/// literal is [`IMPLICIT_YAR`].
#[derive(Debug, Clone, PartialEq)]
pub struct YarStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

impl fmt::Display for YarStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.token.literal == IMPLICIT_YAR {
            write!(f, "{} be {}.", self.name, self.value)
        } else {
            write!(f, "{} {} be {}.", self.token.literal, self.name, self.value)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GivesStatement {
    pub token: Token,
    pub value: Option<Expression>,
}

impl fmt::Display for GivesStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {}.", self.token.literal, value),
            None => write!(f, "{}.", self.token.literal),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortStatement {
    pub token: Token,
    pub name: Identifier,
}

impl fmt::Display for PortStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {}.", self.token.literal, self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub token: Token,
    pub condition: Expression,
    pub consequence: BlockStatement,
}

impl fmt::Display for Conditional {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {}: {}", self.token.literal, self.condition, self.consequence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub token: Token,
    pub conditionals: Vec<Conditional>,
    pub alternate: Option<BlockStatement>,
}

impl fmt::Display for IfStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let conditionals: Vec<String> = self.conditionals.iter().map(Conditional::to_string).collect();
        write!(f, "{}", conditionals.join(" "))?;
        if let Some(alternate) = &self.alternate {
            write!(f, " ls: {}", alternate)?;
        }
        write!(f, ".")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub token: Token,
    pub condition: Expression,
    pub body: BlockStatement,
}

impl fmt::Display for ForStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "4 {}: {}.", self.condition, self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStatement {
    pub token: Token,
}

impl fmt::Display for BreakStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "break")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChestStatement {
    pub token: Token,
    pub name: Identifier,
    pub fields: Vec<Identifier>,
}

impl fmt::Display for ChestStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let fields: Vec<String> = self.fields.iter().map(Identifier::to_string).collect();
        write!(f, "chest {}|{}|.", self.name, fields.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexAssignment {
    pub token: Token,
    pub left: Expression,
    pub index: Expression,
    pub value: Expression,
}

impl fmt::Display for IndexAssignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}[{}] be {}.", self.left, self.index, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChestFieldAssignment {
    pub token: Token,
    pub left: Expression,
    pub field: Identifier,
    pub value: Expression,
}

impl fmt::Display for ChestFieldAssignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}|{} be {}.", self.left, self.field, self.value)
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

/// The token is only the first one of the expression, so `(-a)` and `-a`
/// are the same statement.
impl PartialEq for ExpressionStatement {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// Statements up to (not including) the `.`, `ls`, `lsif` or end of input
/// that closes them. The closing token is printed by the enclosing construct.
#[derive(Debug, Clone)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl PartialEq for BlockStatement {
    fn eq(&self, other: &Self) -> bool {
        self.statements == other.statements
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            stmt.fmt_terminated(f)?;
        }
        Ok(())
    }
}

use strum_macros::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    #[strum(serialize = "ILLICIT")]
    Illicit,
    #[strum(serialize = "EOF")]
    Eof,

    // Identifiers and literals
    #[strum(serialize = "IDENT")]
    Ident,
    #[strum(serialize = "INT")]
    Int,
    #[strum(serialize = "STRING")]
    String,

    // Operators
    #[strum(serialize = "BE")]
    Be,
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "*")]
    Star,
    #[strum(serialize = "/")]
    Slash,
    #[strum(serialize = "MOD")]
    Mod,
    #[strum(serialize = "!")]
    Bang,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = "<=")]
    LessEq,
    #[strum(serialize = ">=")]
    GreaterEq,
    #[strum(serialize = "=")]
    Equal,
    #[strum(serialize = "<>")]
    NotEqual,
    #[strum(serialize = "AND")]
    And,
    #[strum(serialize = "OR")]
    Or,

    // Delimiters
    #[strum(serialize = ",")]
    Comma,
    #[strum(serialize = ".")]
    Period,
    #[strum(serialize = ";")]
    Semicolon,
    #[strum(serialize = ":")]
    Colon,
    #[strum(serialize = "|")]
    Pipe,

    #[strum(serialize = "(")]
    LParen,
    #[strum(serialize = ")")]
    RParen,
    #[strum(serialize = "{")]
    LBrace,
    #[strum(serialize = "}")]
    RBrace,
    #[strum(serialize = "[")]
    LBracket,
    #[strum(serialize = "]")]
    RBracket,

    // Keywords
    #[strum(serialize = "F")]
    Function,
    #[strum(serialize = "YAR")]
    Yar,
    #[strum(serialize = "GIVES")]
    Gives,
    #[strum(serialize = "PORT")]
    Port,
    #[strum(serialize = "IF")]
    If,
    #[strum(serialize = "LSIF")]
    Lsif,
    #[strum(serialize = "LS")]
    Ls,
    #[strum(serialize = "FOR")]
    For,
    #[strum(serialize = "BREAK")]
    Break,
    #[strum(serialize = "CHEST")]
    Chest,
    #[strum(serialize = "TRUE")]
    True,
    #[strum(serialize = "FALSE")]
    False,
}

impl From<&str> for TokenType {
    fn from(text: &str) -> Self {
        match text {
            "f" => Self::Function,
            "yar" => Self::Yar,
            "gives" => Self::Gives,
            "port" => Self::Port,
            "be" => Self::Be,
            "if" => Self::If,
            "lsif" => Self::Lsif,
            "ls" => Self::Ls,
            "chest" => Self::Chest,
            "or" => Self::Or,
            "and" => Self::And,
            "ay" => Self::True,
            "nay" => Self::False,
            "for" => Self::For,
            "break" => Self::Break,
            "mod" => Self::Mod,
            _ => Self::Ident,
        }
    }
}

/// Binding power of infix operators, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    LogicOr,
    LogicAnd,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

/// Tokens compare by type and literal; the source position is diagnostic only.
#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
    pub line: usize,
    pub column: usize,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.token_type == other.token_type && self.literal == other.literal
    }
}

impl Eq for Token {}

impl Token {
    pub fn new(token_type: TokenType, literal: impl Into<String>) -> Self {
        Self {
            token_type,
            literal: literal.into(),
            line: 0,
            column: 0,
        }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }

    pub fn is_block_terminator(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Period | TokenType::Ls | TokenType::Lsif | TokenType::Eof
        )
    }

    pub fn is_expression_terminator(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Period | TokenType::Colon | TokenType::Be
        )
    }

    /// `|` is absent here: its binding power depends on the token after it.
    pub fn precedence(&self) -> Precedence {
        match self.token_type {
            TokenType::Or => Precedence::LogicOr,
            TokenType::And => Precedence::LogicAnd,
            TokenType::Equal | TokenType::NotEqual => Precedence::Equals,
            TokenType::Less | TokenType::Greater | TokenType::LessEq | TokenType::GreaterEq => {
                Precedence::LessGreater
            }
            TokenType::Plus | TokenType::Minus => Precedence::Sum,
            TokenType::Star | TokenType::Slash | TokenType::Mod => Precedence::Product,
            TokenType::LParen => Precedence::Call,
            TokenType::LBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

impl TokenType {
    /// Tokens that have a prefix parselet.
    pub fn starts_expression(self) -> bool {
        matches!(
            self,
            Self::Ident
                | Self::Int
                | Self::For
                | Self::String
                | Self::LParen
                | Self::LBracket
                | Self::LBrace
                | Self::True
                | Self::False
                | Self::Bang
                | Self::Minus
                | Self::Function
                | Self::Pipe
        )
    }

    /// Tokens that may follow `L|field` when the pipe is a field access.
    pub fn ends_chest_access(self) -> bool {
        matches!(
            self,
            Self::Period
                | Self::Be
                | Self::Plus
                | Self::Minus
                | Self::Slash
                | Self::Star
                | Self::Mod
                | Self::Equal
                | Self::NotEqual
                | Self::And
                | Self::Or
                | Self::Less
                | Self::Greater
                | Self::LessEq
                | Self::GreaterEq
                | Self::RParen
                | Self::RBracket
                | Self::RBrace
                | Self::Comma
                | Self::Eof
                | Self::LParen
                | Self::LBracket
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        let cases = vec![
            ("yar", TokenType::Yar),
            ("f", TokenType::Function),
            ("ay", TokenType::True),
            ("nay", TokenType::False),
            ("for", TokenType::For),
            ("mod", TokenType::Mod),
            ("lsif", TokenType::Lsif),
            ("chest", TokenType::Chest),
            ("treasure", TokenType::Ident),
        ];

        for (text, token_type) in cases.into_iter() {
            assert_eq!(TokenType::from(text), token_type);
        }
    }

    #[test]
    fn test_precedence_ladder() {
        let or = Token::new(TokenType::Or, "or");
        let and = Token::new(TokenType::And, "and");
        let eq = Token::new(TokenType::Equal, "=");
        let lt = Token::new(TokenType::LessEq, "<=");
        let plus = Token::new(TokenType::Plus, "+");
        let modulo = Token::new(TokenType::Mod, "mod");
        let call = Token::new(TokenType::LParen, "(");
        let index = Token::new(TokenType::LBracket, "[");

        assert!(or.precedence() < and.precedence());
        assert!(and.precedence() < eq.precedence());
        assert!(eq.precedence() < lt.precedence());
        assert!(lt.precedence() < plus.precedence());
        assert!(plus.precedence() < modulo.precedence());
        assert!(modulo.precedence() < call.precedence());
        assert!(call.precedence() < index.precedence());
        assert_eq!(Token::new(TokenType::Pipe, "|").precedence(), Precedence::Lowest);
    }

    #[test]
    fn test_terminators() {
        assert!(Token::new(TokenType::Ls, "ls").is_block_terminator());
        assert!(Token::new(TokenType::Eof, "").is_block_terminator());
        assert!(!Token::new(TokenType::Gives, "gives").is_block_terminator());
        assert!(Token::new(TokenType::Be, "be").is_expression_terminator());
        assert!(Token::new(TokenType::Colon, ":").is_expression_terminator());
        assert!(!Token::new(TokenType::Comma, ",").is_expression_terminator());
    }
}

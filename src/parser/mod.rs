use crate::ast::{self, Expression, Statement};
use crate::lexer::Lexer;
use crate::stack::ensure_sufficient_stack;
use crate::token::{Precedence, Token, TokenType};
use custom_error::custom_error;
use std::rc::Rc;
use tracing::debug;

#[cfg(test)]
mod tests;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedToken{expected: TokenType, got: TokenType} = "Next token expected: {expected}, got {got}",
    NoPrefixParselet{token_type: TokenType} = "no prefix parse function for {token_type} found",
    InvalidInteger{literal: String} = "could not parse \"{literal}\" as integer",
    UnknownToken{literal: String} = "Unknown token found: {literal}",
}

pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    peek2_token: Token,
    peek3_token: Token,
    errors: Vec<String>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();
        let peek2_token = lexer.next_token();
        let peek3_token = lexer.next_token();

        Self {
            lexer,
            cur_token,
            peek_token,
            peek2_token,
            peek3_token,
            errors: vec![],
        }
    }

    fn next_token(&mut self) {
        let incoming = self.lexer.next_token();
        let peek3 = std::mem::replace(&mut self.peek3_token, incoming);
        let peek2 = std::mem::replace(&mut self.peek2_token, peek3);
        let peek = std::mem::replace(&mut self.peek_token, peek2);
        self.cur_token = peek;
    }

    /// Parses the whole input, returning the program alongside every error
    /// recorded on the way. Statements that failed to parse are left out.
    pub fn parse(mut self) -> (ast::Program, Vec<String>) {
        let mut program = ast::Program::default();

        while !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt)
            }
            self.next_token();
        }

        (program, self.errors)
    }

    pub fn parse_program(self) -> Result<ast::Program, Vec<String>> {
        let (program, errors) = self.parse();

        if errors.is_empty() {
            Ok(program)
        } else {
            Err(errors)
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type {
            TokenType::Yar => self.parse_yar_statement().map(Statement::Yar),
            TokenType::Gives => self.parse_gives_statement().map(Statement::Gives),
            TokenType::Port => self.parse_port_statement().map(Statement::Port),
            TokenType::Chest => self.parse_chest_statement().map(Statement::Chest),
            TokenType::If => self.parse_if_statement().map(Statement::If),
            TokenType::For => self.parse_for_statement().map(Statement::For),
            TokenType::Break => Some(Statement::Break(self.parse_break_statement())),
            TokenType::Illicit => {
                let err = ParseError::UnknownToken {
                    literal: self.cur_token.literal.clone(),
                };
                self.error_at_cur(err);
                None
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_yar_statement(&mut self) -> Option<ast::YarStatement> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }

        self.parse_yar_tail(token)
    }

    /// Expects `cur` on the bound name.
    fn parse_yar_tail(&mut self, token: Token) -> Option<ast::YarStatement> {
        let name: ast::Identifier = self.cur_token.clone().into();

        if !self.expect_peek(TokenType::Be) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_period();

        Some(ast::YarStatement { token, name, value })
    }

    fn parse_gives_statement(&mut self) -> Option<ast::GivesStatement> {
        let token = self.cur_token.clone();

        if self.peek_token.is(TokenType::Period) {
            self.next_token();
            return Some(ast::GivesStatement { token, value: None });
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_period();

        Some(ast::GivesStatement {
            token,
            value: Some(value),
        })
    }

    fn parse_port_statement(&mut self) -> Option<ast::PortStatement> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        let name = self.cur_token.clone().into();
        self.skip_period();

        Some(ast::PortStatement { token, name })
    }

    fn parse_chest_statement(&mut self) -> Option<ast::ChestStatement> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        let name = self.cur_token.clone().into();

        if !self.expect_peek(TokenType::Pipe) {
            return None;
        }

        let mut fields = vec![];
        if self.peek_token.is(TokenType::Pipe) {
            self.next_token();
        } else {
            loop {
                if !self.expect_peek(TokenType::Ident) {
                    return None;
                }
                fields.push(self.cur_token.clone().into());

                if !self.peek_token.is(TokenType::Comma) {
                    break;
                }
                self.next_token();
            }

            if !self.expect_peek(TokenType::Pipe) {
                return None;
            }
        }
        self.skip_period();

        Some(ast::ChestStatement {
            token,
            name,
            fields,
        })
    }

    fn parse_if_statement(&mut self) -> Option<ast::IfStatement> {
        let token = self.cur_token.clone();
        let mut conditionals = vec![];

        while self.cur_token.is(TokenType::If) || self.cur_token.is(TokenType::Lsif) {
            let token = self.cur_token.clone();
            self.next_token();

            let condition = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek(TokenType::Colon) {
                return None;
            }
            self.next_token();

            let consequence = self.parse_block_statement();
            conditionals.push(ast::Conditional {
                token,
                condition,
                consequence,
            });
        }

        let alternate = if self.cur_token.is(TokenType::Ls) {
            if !self.expect_peek(TokenType::Colon) {
                return None;
            }
            self.next_token();
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(ast::IfStatement {
            token,
            conditionals,
            alternate,
        })
    }

    fn parse_for_statement(&mut self) -> Option<ast::ForStatement> {
        let token = self.cur_token.clone();
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenType::Colon) {
            return None;
        }
        self.next_token();

        let body = self.parse_block_statement();

        Some(ast::ForStatement {
            token,
            condition,
            body,
        })
    }

    fn parse_break_statement(&mut self) -> ast::BreakStatement {
        let token = self.cur_token.clone();
        self.skip_period();
        ast::BreakStatement { token }
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.peek_token.is(TokenType::Be) {
            self.skip_period();
            return Some(Statement::Expr(ast::ExpressionStatement { token, expression }));
        }

        match expression {
            Expression::Identifier(_) => {
                let yar = Token::new(TokenType::Yar, ast::IMPLICIT_YAR).at(token.line, token.column);
                self.parse_yar_tail(yar).map(Statement::Yar)
            }
            Expression::Index(index) => {
                let value = self.parse_assigned_value()?;

                Some(Statement::IndexAssign(ast::IndexAssignment {
                    token: index.token,
                    left: *index.left,
                    index: *index.index,
                    value,
                }))
            }
            Expression::ChestAccess(access) => {
                let value = self.parse_assigned_value()?;

                Some(Statement::ChestFieldAssign(ast::ChestFieldAssignment {
                    token: access.token,
                    left: *access.left,
                    field: access.field,
                    value,
                }))
            }
            expression => Some(Statement::Expr(ast::ExpressionStatement { token, expression })),
        }
    }

    /// Expects `peek` on `be`.
    fn parse_assigned_value(&mut self) -> Option<Expression> {
        self.next_token();
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_period();
        Some(value)
    }

    /// Starts on the first token of the body and stops on the `.`, `ls`,
    /// `lsif` or end of input that closes it.
    fn parse_block_statement(&mut self) -> ast::BlockStatement {
        let token = self.cur_token.clone();
        let mut statements = vec![];

        while !self.cur_token.is_block_terminator() {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        ast::BlockStatement { token, statements }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        ensure_sufficient_stack(|| self.parse_expression_inner(precedence))
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_token.is_expression_terminator() {
            let peek_precedence = if self.peek_token.is(TokenType::Pipe) {
                if !self.peek2_token.token_type.starts_expression() {
                    break;
                }
                Precedence::Index
            } else {
                self.peek_token.precedence()
            };

            if precedence >= peek_precedence {
                break;
            }

            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur_token.token_type {
            TokenType::Ident => Some(Expression::Identifier(self.cur_token.clone().into())),
            TokenType::Int | TokenType::For => self.parse_integer_literal(),
            TokenType::String => Some(Expression::StringLiteral(ast::StringLiteral {
                token: self.cur_token.clone(),
                value: self.cur_token.literal.clone(),
            })),
            TokenType::True | TokenType::False => Some(Expression::Boolean(ast::Boolean {
                token: self.cur_token.clone(),
                value: self.cur_token.is(TokenType::True),
            })),
            TokenType::Bang | TokenType::Minus => self.parse_prefix_expression(),
            TokenType::LParen => self.parse_grouped_expression(),
            TokenType::LBracket => self.parse_array_literal(),
            TokenType::LBrace => self.parse_hash_literal(),
            TokenType::Function => self.parse_function_literal(),
            TokenType::Pipe => self.parse_chest_literal(),
            token_type => {
                self.error_at_cur(ParseError::NoPrefixParselet { token_type });
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        match self.cur_token.token_type {
            TokenType::LParen => self.parse_call_expression(left),
            TokenType::LBracket => self.parse_index_expression(left),
            TokenType::Pipe => self.parse_pipe_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    /// A `4` splits the digits around it into separate tokens, so adjacent
    /// numeric tokens with no gap between them are joined back together.
    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let mut token = self.cur_token.clone();

        while (self.peek_token.is(TokenType::Int) || self.peek_token.is(TokenType::For))
            && self.peek_token.line == self.cur_token.line
            && self.peek_token.column == self.cur_token.column + self.cur_token.literal.len()
        {
            self.next_token();
            token.literal.push_str(&self.cur_token.literal);
        }

        match token.literal.parse() {
            Ok(value) => Some(Expression::IntegerLiteral(ast::IntegerLiteral { token, value })),
            Err(_) => {
                let err = ParseError::InvalidInteger {
                    literal: token.literal.clone(),
                };
                self.error_at(err, &token);
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = ast::Operator::from_token(&token)?;

        self.next_token();

        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(ast::PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = ast::Operator::from_token(&token)?;
        let precedence = token.precedence();

        self.next_token();

        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(ast::InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(expression)
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let elements = self.parse_expression_list(TokenType::RBracket)?;

        Some(Expression::Array(ast::ArrayLiteral { token, elements }))
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let mut pairs = vec![];

        while !self.peek_token.is(TokenType::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenType::Colon) {
                return None;
            }
            self.next_token();

            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.peek_token.is(TokenType::RBrace) && !self.expect_peek(TokenType::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenType::RBrace) {
            return None;
        }

        Some(Expression::HashMap(ast::HashMapLiteral { token, pairs }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::Colon) {
            return None;
        }
        self.next_token();

        let body = Rc::new(self.parse_block_statement());

        Some(Expression::Function(ast::FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<ast::Identifier>> {
        let mut identifiers = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(identifiers);
        }

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        identifiers.push(self.cur_token.clone().into());

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            identifiers.push(self.cur_token.clone().into());
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(identifiers)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_expression_list(TokenType::RParen)?;

        Some(Expression::Call(ast::CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.next_token();

        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RBracket) {
            return None;
        }

        Some(Expression::Index(ast::IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    /// `L|field` reads a field; `L|a, b|` and `L|x: a|` build a chest.
    fn parse_pipe_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();

        let is_access = self.peek_token.is(TokenType::Ident)
            && (self.peek2_token.token_type.ends_chest_access()
                || (self.peek2_token.is(TokenType::Pipe) && self.peek3_token.is(TokenType::Ident)));

        if is_access {
            self.next_token();
            return Some(Expression::ChestAccess(ast::ChestAccess {
                token,
                left: Box::new(left),
                field: self.cur_token.clone().into(),
            }));
        }

        let (arguments, named) =
            if self.peek_token.is(TokenType::Ident) && self.peek2_token.is(TokenType::Colon) {
                (vec![], self.parse_named_fields()?)
            } else {
                (self.parse_expression_list(TokenType::Pipe)?, vec![])
            };

        Some(Expression::ChestInstantiation(ast::ChestInstantiation {
            token,
            chest: Box::new(left),
            arguments,
            named,
        }))
    }

    fn parse_chest_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let fields = self.parse_named_fields()?;

        Some(Expression::ChestLiteral(ast::ChestLiteral { token, fields }))
    }

    /// Parses `name: value, ...|` with `cur` on the opening pipe.
    fn parse_named_fields(&mut self) -> Option<Vec<(ast::Identifier, Expression)>> {
        let mut fields = vec![];

        while !self.peek_token.is(TokenType::Pipe) {
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            let name = self.cur_token.clone().into();

            if !self.expect_peek(TokenType::Colon) {
                return None;
            }
            self.next_token();

            let value = self.parse_expression(Precedence::Lowest)?;
            fields.push((name, value));

            if !self.peek_token.is(TokenType::Pipe) && !self.expect_peek(TokenType::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenType::Pipe) {
            return None;
        }

        Some(fields)
    }

    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = vec![];

        if self.peek_token.is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn skip_period(&mut self) {
        if self.peek_token.is(TokenType::Period) {
            self.next_token();
        }
    }

    fn expect_peek(&mut self, expected: TokenType) -> bool {
        if self.peek_token.is(expected) {
            self.next_token();
            true
        } else {
            self.peek_error(expected);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenType) {
        let err = ParseError::UnexpectedToken {
            expected,
            got: self.peek_token.token_type,
        };
        let token = self.peek_token.clone();
        self.error_at(err, &token);
    }

    fn error_at_cur(&mut self, err: ParseError) {
        let token = self.cur_token.clone();
        self.error_at(err, &token);
    }

    fn error_at(&mut self, err: ParseError, token: &Token) {
        let message = format!("{}. Line: {} Char: {}", err, token.line, token.column);
        debug!(%message, "parse error");
        self.errors.push(message);
    }
}

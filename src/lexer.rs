use crate::token::{Token, TokenType};

pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
    line: usize,
    line_start: usize,
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_token())
    }
}

impl Lexer {
    pub fn new(input: impl Into<String>) -> Self {
        let mut lexer = Self {
            input: input.into(),
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
            line_start: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = *self.input.as_bytes().get(self.read_position).unwrap_or(&0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        *self.input.as_bytes().get(self.read_position).unwrap_or(&0)
    }

    fn column(&self, start: usize) -> usize {
        start - self.line_start + 1
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.position;
        let line = self.line;
        let column = self.column(start);

        let (token_type, literal) = match self.ch {
            b'+' => (TokenType::Plus, "+".to_owned()),
            b'-' => (TokenType::Minus, "-".to_owned()),
            b'*' => (TokenType::Star, "*".to_owned()),
            b'/' => (TokenType::Slash, "/".to_owned()),
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    (TokenType::NotEqual, "!=".to_owned())
                } else {
                    (TokenType::Bang, "!".to_owned())
                }
            }
            b'<' => match self.peek_char() {
                b'>' => {
                    self.read_char();
                    (TokenType::NotEqual, "<>".to_owned())
                }
                b'=' => {
                    self.read_char();
                    (TokenType::LessEq, "<=".to_owned())
                }
                _ => (TokenType::Less, "<".to_owned()),
            },
            b'>' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    (TokenType::GreaterEq, ">=".to_owned())
                } else {
                    (TokenType::Greater, ">".to_owned())
                }
            }
            b'=' => (TokenType::Equal, "=".to_owned()),
            b',' => (TokenType::Comma, ",".to_owned()),
            b'.' => (TokenType::Period, ".".to_owned()),
            b';' => (TokenType::Semicolon, ";".to_owned()),
            b':' => (TokenType::Colon, ":".to_owned()),
            b'|' => (TokenType::Pipe, "|".to_owned()),
            b'(' => (TokenType::LParen, "(".to_owned()),
            b')' => (TokenType::RParen, ")".to_owned()),
            b'{' => (TokenType::LBrace, "{".to_owned()),
            b'}' => (TokenType::RBrace, "}".to_owned()),
            b'[' => (TokenType::LBracket, "[".to_owned()),
            b']' => (TokenType::RBracket, "]".to_owned()),
            b'4' => (TokenType::For, "4".to_owned()),
            b'\'' | b'"' => (TokenType::String, self.read_string()),
            0 => {
                return Token::new(TokenType::Eof, "").at(line, column);
            }
            c => {
                if is_letter(c) {
                    let literal = self.read_identifier().to_owned();
                    return Token::new(TokenType::from(literal.as_str()), literal).at(line, column);
                } else if c.is_ascii_digit() {
                    let literal = self.read_number().to_owned();
                    return Token::new(TokenType::Int, literal).at(line, column);
                } else {
                    (TokenType::Illicit, (c as char).to_string())
                }
            }
        };
        self.read_char();
        Token::new(token_type, literal).at(line, column)
    }

    /// Leaves `ch` on the closing quote, or on the end of input when unterminated.
    fn read_string(&mut self) -> String {
        let quote = self.ch;
        self.read_char();
        let start = self.position;
        while self.ch != quote && self.ch != 0 {
            if self.ch == b'\n' {
                self.line += 1;
                self.line_start = self.read_position;
            }
            self.read_char();
        }
        self.input[start..self.position].to_owned()
    }

    fn read_identifier(&mut self) -> &str {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn read_number(&mut self) -> &str {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.ch {
                b'\n' => {
                    self.line += 1;
                    self.line_start = self.read_position;
                    self.read_char();
                }
                b' ' | b'\t' | b'\r' => self.read_char(),
                b'$' => {
                    while self.ch != b'\n' && self.ch != 0 {
                        self.read_char();
                    }
                }
                _ => return,
            }
        }
    }
}

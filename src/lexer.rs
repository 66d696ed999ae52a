use crate::error::LexError;
use crate::parser::scan_literal;
use crate::syntax::Literal;

pub const TERMINATOR: char = ';';

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TokenKind {
    Add,
    Multiply,
    StatementEnd,
    Number,
    EndOfInput,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub len: usize,
    /// Present only for `Number`.
    pub literal: Option<Literal>,
}

/// Lookahead-one tokenizer. Tokens are scanned lazily: the next token is
/// only produced when the current one is queried or consumed.
pub struct Lexer<'a> {
    text: &'a str,
    offset: usize,
    len: usize,
    lookahead: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Lexer {
            text,
            offset: 0,
            len: 0,
            lookahead: None,
        }
    }

    pub fn peek(&mut self) -> Result<&Token, LexError> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.lex()?,
        };
        Ok(self.lookahead.get_or_insert(token))
    }

    pub fn matches(&mut self, kind: TokenKind) -> Result<bool, LexError> {
        Ok(self.peek()?.kind == kind)
    }

    /// Consumes the current lookahead and scans the one after it.
    pub fn advance(&mut self) -> Result<(), LexError> {
        self.peek()?;
        let token = self.lex()?;
        self.lookahead = Some(token);
        Ok(())
    }

    /// Text of the current lookahead; empty at end of input.
    pub fn lexeme(&self) -> &'a str {
        &self.text[self.offset..self.offset + self.len]
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn lex(&mut self) -> Result<Token, LexError> {
        self.offset += self.len;
        self.len = 0;
        let rest = &self.text[self.offset..];
        let trimmed = rest.trim_start();
        self.offset += rest.len() - trimmed.len();

        let c = match trimmed.chars().next() {
            None => return Ok(self.token(TokenKind::EndOfInput, None)),
            Some(c) => c,
        };
        self.len = c.len_utf8();
        match c {
            '+' => Ok(self.token(TokenKind::Add, None)),
            '*' => Ok(self.token(TokenKind::Multiply, None)),
            TERMINATOR => Ok(self.token(TokenKind::StatementEnd, None)),
            _ => match scan_literal(trimmed) {
                Some(literal) => {
                    self.len = literal.text.len();
                    Ok(self.token(TokenKind::Number, Some(literal)))
                }
                None => Err(LexError::UnexpectedCharacter {
                    offset: self.offset,
                    found: c,
                }),
            },
        }
    }

    fn token(&self, kind: TokenKind, literal: Option<Literal>) -> Token {
        Token {
            kind,
            offset: self.offset,
            len: self.len,
            literal,
        }
    }
}

//! Recursive-descent code generator.
//!
//! ```text
//! statement ::= (sum ';')*
//! sum       ::= factor ('+' factor)*
//! factor    ::= number ('*' number)*
//! number    ::= [0-9]+ ('.' [0-9]+)?
//! ```
//!
//! Every operand lives in a register taken from the pool. A binary operation
//! folds its right operand into the left one and gives the right register
//! back, so registers are always released in reverse order of acquisition.

use crate::error::{Error, ParseError};
use crate::lexer::{Lexer, TokenKind};
use crate::regalloc::RegisterPool;
use crate::sink::Sink;
use crate::syntax::{Instr, Op2, Register};
use log::debug;

pub struct CodeGen<'a, S: Sink + ?Sized> {
    lexer: Lexer<'a>,
    pool: RegisterPool,
    sink: &'a mut S,
}

impl<'a, S: Sink + ?Sized> CodeGen<'a, S> {
    pub fn new(lexer: Lexer<'a>, pool: RegisterPool, sink: &'a mut S) -> Self {
        CodeGen { lexer, pool, sink }
    }

    pub fn pool(&self) -> &RegisterPool {
        &self.pool
    }

    /// Compiles statements until the end of input. Each statement leaves its
    /// value in the first register.
    pub fn statement(&mut self) -> Result<(), Error> {
        while !self.lexer.matches(TokenKind::EndOfInput)? {
            let result = self.sum()?;
            self.pool.release(result)?;
            if !self.lexer.matches(TokenKind::StatementEnd)? {
                return Err(ParseError::ExpectedTerminator {
                    lexeme: self.lexer.lexeme().to_string(),
                    offset: self.lexer.offset(),
                }
                .into());
            }
            self.lexer.advance()?;
        }
        debug!("statements compiled, {:?}", self.pool.stats());
        Ok(())
    }

    fn sum(&mut self) -> Result<Register, Error> {
        let r1 = self.factor()?;
        while self.lexer.matches(TokenKind::Add)? {
            self.lexer.advance()?;
            let r2 = self.factor()?;
            self.emit(Instr::Op2(r1, r1, Op2::Add, r2))?;
            self.pool.release(r2)?;
        }
        Ok(r1)
    }

    fn factor(&mut self) -> Result<Register, Error> {
        let r1 = self.number()?;
        while self.lexer.matches(TokenKind::Multiply)? {
            self.lexer.advance()?;
            let r2 = self.number()?;
            self.emit(Instr::Op2(r1, r1, Op2::Mul, r2))?;
            self.pool.release(r2)?;
        }
        Ok(r1)
    }

    fn number(&mut self) -> Result<Register, Error> {
        let token = self.lexer.peek()?.clone();
        let literal = match (token.kind, token.literal) {
            (TokenKind::Number, Some(literal)) => literal,
            (TokenKind::EndOfInput, _) => {
                return Err(ParseError::UnexpectedEnd {
                    offset: token.offset,
                }
                .into())
            }
            _ => {
                return Err(ParseError::ExpectedNumber {
                    lexeme: self.lexer.lexeme().to_string(),
                    offset: token.offset,
                }
                .into())
            }
        };
        let register = self.pool.acquire()?;
        self.emit(Instr::Load(register, literal))?;
        self.lexer.advance()?;
        Ok(register)
    }

    fn emit(&mut self, instr: Instr) -> Result<(), Error> {
        debug!("emit {}", instr);
        self.sink.emit(&instr)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::error::AllocatorError;
    use crate::sink::Buffer;

    fn generate(code: &str, registers: usize) -> Result<String, Error> {
        let mut buffer = Buffer::new();
        CodeGen::new(Lexer::new(code), RegisterPool::new(registers), &mut buffer).statement()?;
        Ok(buffer.into_string())
    }

    #[test]
    fn test_precedence() {
        let code = generate("1 + 2 * 3 + 4;", 10).unwrap();
        assert_eq!(
            code,
            "t0 = 1\nt1 = 2\nt2 = 3\nt1 = t1 * t2\nt0 = t0 + t1\nt1 = 4\nt0 = t0 + t1\n"
        );
    }

    #[test]
    fn test_each_statement_starts_at_t0() {
        let code = generate("2 * 3; 4.5;", 10).unwrap();
        assert_eq!(code, "t0 = 2\nt1 = 3\nt0 = t0 * t1\nt0 = 4.5\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(generate("", 10).unwrap(), "");
        assert_eq!(generate(" \n ", 10).unwrap(), "");
    }

    #[test]
    fn test_sum_leaves_one_register() {
        let mut listing: Vec<Instr> = Vec::new();
        let mut gen = CodeGen::new(Lexer::new("1 * 2 + 3 + 4 * 5 * 6;"), RegisterPool::new(10), &mut listing);
        let result = gen.sum().unwrap();
        let stats = gen.pool().stats();
        assert_eq!(result, Register(0));
        assert_eq!(stats.released, stats.acquired - 1);
        assert_eq!(gen.pool().in_use(), 1);
        assert_eq!(stats.peak, 3);
    }

    #[test]
    fn test_expected_number() {
        match generate("1 + ;", 10) {
            Err(Error::Parse(ParseError::ExpectedNumber { lexeme, offset })) => {
                assert_eq!(lexeme, ";");
                assert_eq!(offset, 4);
            }
            other => assert!(false, "expected a number error, got {:?}", other),
        }
    }

    #[test]
    fn test_expected_terminator() {
        match generate("1 + 2", 10) {
            Err(Error::Parse(ParseError::ExpectedTerminator { lexeme, offset })) => {
                assert_eq!(lexeme, "");
                assert_eq!(offset, 5);
            }
            other => assert!(false, "expected a terminator error, got {:?}", other),
        }
        assert!(matches!(
            generate("1 2;", 10),
            Err(Error::Parse(ParseError::ExpectedTerminator { .. }))
        ));
    }

    #[test]
    fn test_unexpected_end() {
        assert!(matches!(
            generate("1 *", 10),
            Err(Error::Parse(ParseError::UnexpectedEnd { offset: 3 }))
        ));
    }

    #[test]
    fn test_pool_exhausted() {
        assert!(matches!(
            generate("1 + 2 * 3;", 2),
            Err(Error::Allocator(AllocatorError::PoolExhausted { capacity: 2 }))
        ));
        assert!(generate("1 + 2 + 3 * 4;", 3).is_ok());
    }
}

use crate::syntax::Register;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    IO(io::Error),
    Usage(String),
    Lexical(LexError),
    Parse(ParseError),
    Allocator(AllocatorError),
    Runtime(RuntimeError),
}

#[derive(Debug, PartialEq)]
pub enum LexError {
    UnexpectedCharacter { offset: usize, found: char },
}

#[derive(Debug, PartialEq)]
pub enum ParseError {
    ExpectedNumber { lexeme: String, offset: usize },
    ExpectedTerminator { lexeme: String, offset: usize },
    UnexpectedEnd { offset: usize },
}

/// Raised only when the code generator breaks stack discipline or nests
/// deeper than the pool allows. Never a user-recoverable condition.
#[derive(Debug, PartialEq)]
pub enum AllocatorError {
    PoolExhausted { capacity: usize },
    Underflow { register: Register },
    AllocationOrderViolation { expected: Register, found: Register },
}

#[derive(Debug, PartialEq)]
pub enum RuntimeError {
    MalformedInstruction { line: String },
    UnsupportedOperator { op: String, line: String },
    RegisterOutOfRange { register: Register, line: String },
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::IO(error)
    }
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Error::Lexical(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Error::Parse(error)
    }
}

impl From<AllocatorError> for Error {
    fn from(error: AllocatorError) -> Self {
        Error::Allocator(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Error::Runtime(error)
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter { offset, found } => {
                write!(f, "unexpected character at {}: {}", offset, found)
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::ExpectedNumber { lexeme, offset } => {
                write!(f, "number expected at {}, found '{}'", offset, lexeme)
            }
            ParseError::ExpectedTerminator { lexeme, offset } => {
                write!(f, "';' expected at {}, found '{}'", offset, lexeme)
            }
            ParseError::UnexpectedEnd { offset } => {
                write!(f, "unexpected end of input at {}", offset)
            }
        }
    }
}

impl fmt::Display for AllocatorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AllocatorError::PoolExhausted { capacity } => write!(
                f,
                "[internal] register pool exhausted ({} registers)",
                capacity
            ),
            AllocatorError::Underflow { register } => {
                write!(f, "[internal] register stack underflow releasing {}", register)
            }
            AllocatorError::AllocationOrderViolation { expected, found } => write!(
                f,
                "[internal] unexpected register release: {} (expected {})",
                found, expected
            ),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::MalformedInstruction { line } => {
                write!(f, "malformed instruction: {}", line)
            }
            RuntimeError::UnsupportedOperator { op, line } => {
                write!(f, "unsupported operator {} in: {}", op, line)
            }
            RuntimeError::RegisterOutOfRange { register, line } => {
                write!(f, "register {} out of range in: {}", register, line)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IO(e) => e.fmt(f),
            Error::Usage(s) => f.write_str(s),
            Error::Lexical(e) => e.fmt(f),
            Error::Parse(e) => e.fmt(f),
            Error::Allocator(e) => e.fmt(f),
            Error::Runtime(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(e) => Some(e),
            _ => None,
        }
    }
}

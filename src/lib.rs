//! Compiles `+`/`*` arithmetic statements into three-address code over a
//! small pool of registers, and runs that code on a register machine.
//!
//! ```
//! let options = regcalc::Options::default();
//! assert_eq!(regcalc::compile("2 * 3;", &options).unwrap(), "t0 = 2\nt1 = 3\nt0 = t0 * t1\n");
//! assert_eq!(regcalc::compile_and_run("1 + 2 * 3 + 4;", &options).unwrap(), 11.0);
//! ```

pub mod codegen;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod regalloc;
pub mod sink;
pub mod syntax;

pub use error::Error;

use codegen::CodeGen;
use lexer::Lexer;
use regalloc::RegisterPool;
use sink::{Buffer, Sink};
use syntax::{DEFAULT_REGISTERS, MAX_REGISTERS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Size of both the allocator pool and the machine's register file.
    pub registers: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            registers: DEFAULT_REGISTERS,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<(), Error> {
        if self.registers == 0 || self.registers > MAX_REGISTERS {
            return Err(Error::Usage(format!(
                "number of registers must be between 1 and {}, got {}",
                MAX_REGISTERS, self.registers
            )));
        }
        Ok(())
    }
}

/// Compiles `source`, handing each instruction to `sink`.
pub fn compile_into<S: Sink + ?Sized>(
    source: &str,
    sink: &mut S,
    options: &Options,
) -> Result<(), Error> {
    options.validate()?;
    let pool = RegisterPool::new(options.registers);
    CodeGen::new(Lexer::new(source), pool, sink).statement()
}

/// Compiles `source` into the textual instruction buffer.
pub fn compile(source: &str, options: &Options) -> Result<String, Error> {
    let mut buffer = Buffer::new();
    compile_into(source, &mut buffer, options)?;
    Ok(buffer.into_string())
}

/// Executes an instruction buffer on a fresh register file.
pub fn run(buffer: &str, options: &Options) -> Result<f64, Error> {
    options.validate()?;
    eval::eval(buffer, options.registers)
}

pub fn compile_and_run(source: &str, options: &Options) -> Result<f64, Error> {
    let buffer = compile(source, options)?;
    run(&buffer, options)
}

#[cfg(test)]
mod tests {

    use super::error::{LexError, RuntimeError};
    use super::syntax::Instr;
    use super::*;

    fn compile_and_run(code: &str) -> Result<f64, Error> {
        super::compile_and_run(code, &Options::default())
    }

    #[test]
    fn test_product() {
        assert_eq!(compile_and_run("2 * 3 * 4;").unwrap(), 24.0);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(compile_and_run("1 + 2 * 3 + 4;").unwrap(), 11.0);
    }

    #[test]
    fn test_last_statement_wins() {
        assert_eq!(compile_and_run("1 + 1; 2.5 * 2;\n").unwrap(), 5.0);
    }

    #[test]
    fn test_empty_program() {
        let options = Options::default();
        assert_eq!(compile("", &options).unwrap(), "");
        assert_eq!(compile_and_run("").unwrap(), 0.0);
    }

    #[test]
    fn test_run_twice() {
        let options = Options::default();
        let buffer = compile("3 + 4 * 5;", &options).unwrap();
        assert_eq!(run(&buffer, &options).unwrap(), 23.0);
        assert_eq!(run(&buffer, &options).unwrap(), 23.0);
    }

    #[test]
    fn test_listing_matches_buffer() {
        let options = Options::default();
        let mut listing: Vec<Instr> = Vec::new();
        compile_into("1.25 * 4 + 2;", &mut listing, &options).unwrap();
        let text: String = listing.iter().map(|i| format!("{}\n", i)).collect();
        assert_eq!(text, compile("1.25 * 4 + 2;", &options).unwrap());
        let decoded: Vec<Instr> = text.lines().map(|l| parser::decode(l).unwrap()).collect();
        assert_eq!(decoded, listing);
    }

    #[test]
    fn test_lexical_error() {
        assert!(matches!(
            compile_and_run("1 + x;"),
            Err(Error::Lexical(LexError::UnexpectedCharacter {
                offset: 4,
                found: 'x'
            }))
        ));
    }

    #[test]
    fn test_malformed_buffer() {
        assert!(matches!(
            run("t0 = 1 2\n", &Options::default()),
            Err(Error::Runtime(RuntimeError::MalformedInstruction { .. }))
        ));
    }

    #[test]
    fn test_invalid_register_count() {
        assert!(matches!(
            compile("1;", &Options { registers: 0 }),
            Err(Error::Usage(_))
        ));
        assert!(matches!(
            compile("1;", &Options { registers: 11 }),
            Err(Error::Usage(_))
        ));
    }
}

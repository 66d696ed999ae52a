use crate::error::Error;
use crate::syntax::Instr;
use std::io::Write;

/// Receives each instruction as the code generator emits it.
pub trait Sink {
    fn emit(&mut self, instr: &Instr) -> Result<(), Error>;
}

/// Writes one instruction per line to a display surface such as stdout.
pub struct Printer<W: Write> {
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Printer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for Printer<W> {
    fn emit(&mut self, instr: &Instr) -> Result<(), Error> {
        writeln!(self.out, "{}", instr)?;
        Ok(())
    }
}

/// Accumulates the newline-separated instruction text for the interpreter.
#[derive(Debug, Default)]
pub struct Buffer {
    text: String,
}

impl Buffer {
    pub fn new() -> Self {
        Buffer::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Sink for Buffer {
    fn emit(&mut self, instr: &Instr) -> Result<(), Error> {
        self.text.push_str(&instr.to_string());
        self.text.push('\n');
        Ok(())
    }
}

impl Sink for Vec<Instr> {
    fn emit(&mut self, instr: &Instr) -> Result<(), Error> {
        self.push(instr.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::syntax::{Literal, Op2, Register};

    fn sample() -> Vec<Instr> {
        vec![
            Instr::Load(
                Register(0),
                Literal {
                    text: "2".to_string(),
                    value: 2.0,
                },
            ),
            Instr::Load(
                Register(1),
                Literal {
                    text: "3".to_string(),
                    value: 3.0,
                },
            ),
            Instr::Op2(Register(0), Register(0), Op2::Add, Register(1)),
        ]
    }

    #[test]
    fn test_buffer() {
        let mut buffer = Buffer::new();
        for instr in sample() {
            buffer.emit(&instr).unwrap();
        }
        assert_eq!(buffer.as_str(), "t0 = 2\nt1 = 3\nt0 = t0 + t1\n");
    }

    #[test]
    fn test_printer() {
        let mut printer = Printer::new(Vec::new());
        for instr in sample() {
            printer.emit(&instr).unwrap();
        }
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out, "t0 = 2\nt1 = 3\nt0 = t0 + t1\n");
    }
}

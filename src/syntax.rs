use std::fmt;

/// Register names are a single letter and a single digit.
pub const MAX_REGISTERS: usize = 10;
pub const DEFAULT_REGISTERS: usize = 10;
pub const RESULT_REGISTER: Register = Register(0);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Register(pub usize);

impl Register {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Op2 {
    Add,
    Mul,
}

impl Op2 {
    pub fn apply(self, m: f64, n: f64) -> f64 {
        match self {
            Op2::Add => m + n,
            Op2::Mul => m * n,
        }
    }
}

impl fmt::Display for Op2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Op2::Add => f.write_str("+"),
            Op2::Mul => f.write_str("*"),
        }
    }
}

/// A decimal literal. The source text is kept so that emitted code quotes
/// exactly what was written.
#[derive(Debug, PartialEq, Clone)]
pub struct Literal {
    pub text: String,
    pub value: f64,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Instr {
    Load(Register, Literal),
    Op2(Register, Register, Op2, Register),
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instr::Load(r, lit) => write!(f, "{} = {}", r, lit),
            Instr::Op2(r, r1, op, r2) => write!(f, "{} = {} {} {}", r, r1, op, r2),
        }
    }
}

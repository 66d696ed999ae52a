use crate::error::{Error, RuntimeError};
use crate::parser;
use crate::syntax::{Instr, Register, RESULT_REGISTER};
use log::trace;

/// A register file for a single run.
pub struct Machine {
    registers: Vec<f64>,
}

impl Machine {
    pub fn new(num_registers: usize) -> Self {
        Machine {
            registers: vec![0.0; num_registers],
        }
    }

    fn get(&self, r: Register, line: &str) -> Result<f64, RuntimeError> {
        self.registers
            .get(r.index())
            .cloned()
            .ok_or_else(|| out_of_range(r, line))
    }

    fn set(&mut self, r: Register, value: f64, line: &str) -> Result<(), RuntimeError> {
        match self.registers.get_mut(r.index()) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(out_of_range(r, line)),
        }
    }

    fn exec(&mut self, instr: &Instr, line: &str) -> Result<(), RuntimeError> {
        match instr {
            Instr::Load(r, lit) => self.set(*r, lit.value, line),
            Instr::Op2(r, r1, op, r2) => {
                let m = self.get(*r1, line)?;
                let n = self.get(*r2, line)?;
                self.set(*r, op.apply(m, n), line)
            }
        }
    }

    /// Executes every record of `buffer` in order and returns the result
    /// register.
    pub fn run(&mut self, buffer: &str) -> Result<f64, Error> {
        for line in buffer.lines() {
            let instr = parser::decode(line)?;
            self.exec(&instr, line)?;
            trace!("{:<16} {:?}", line, self.registers);
        }
        Ok(self.get(RESULT_REGISTER, "")?)
    }
}

fn out_of_range(register: Register, line: &str) -> RuntimeError {
    RuntimeError::RegisterOutOfRange {
        register,
        line: line.to_string(),
    }
}

/// Runs `buffer` on a fresh machine.
pub fn eval(buffer: &str, num_registers: usize) -> Result<f64, Error> {
    Machine::new(num_registers).run(buffer)
}

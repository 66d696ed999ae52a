use crate::error::AllocatorError;
use crate::syntax::Register;
use log::trace;

#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct PoolStats {
    pub acquired: usize,
    pub released: usize,
    pub peak: usize,
}

/// A fixed pool of temporaries handed out in stack order. Registers below
/// `cursor` are live; `release` must return them newest first.
#[derive(Debug)]
pub struct RegisterPool {
    capacity: usize,
    cursor: usize,
    stats: PoolStats,
}

impl RegisterPool {
    pub fn new(capacity: usize) -> Self {
        RegisterPool {
            capacity,
            cursor: 0,
            stats: PoolStats::default(),
        }
    }

    pub fn acquire(&mut self) -> Result<Register, AllocatorError> {
        if self.cursor + 1 > self.capacity {
            return Err(AllocatorError::PoolExhausted {
                capacity: self.capacity,
            });
        }
        let register = Register(self.cursor);
        self.cursor += 1;
        self.stats.acquired += 1;
        self.stats.peak = self.stats.peak.max(self.cursor);
        trace!("acquire {} ({} live)", register, self.cursor);
        Ok(register)
    }

    /// On failure the pool is left as it was.
    pub fn release(&mut self, register: Register) -> Result<(), AllocatorError> {
        if self.cursor == 0 {
            return Err(AllocatorError::Underflow { register });
        }
        let top = Register(self.cursor - 1);
        if top != register {
            return Err(AllocatorError::AllocationOrderViolation {
                expected: top,
                found: register,
            });
        }
        self.cursor -= 1;
        self.stats.released += 1;
        trace!("release {} ({} live)", register, self.cursor);
        Ok(())
    }

    pub fn in_use(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}

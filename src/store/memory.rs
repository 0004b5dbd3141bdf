use std::collections::HashMap;

use super::FuseStore;
use crate::{error::StoreError, targets::ocotp::Register};

/// An in-memory OTP array
///
/// Registers which were never written read as zero. Writes behave like real
/// fuses, bits are only ever set.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    registers: HashMap<u32, u32>,
    writes: Vec<(Register, u32)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset a register without recording a write
    pub fn with_register(mut self, register: Register, value: u32) -> Self {
        self.registers.insert(register.offset(), value);
        self
    }

    pub fn register(&self, register: &Register) -> u32 {
        self.registers
            .get(&register.offset())
            .copied()
            .unwrap_or_default()
    }

    /// Every write in the order it was issued
    pub fn writes(&self) -> &[(Register, u32)] {
        &self.writes
    }
}

impl FuseStore for MemoryStore {
    fn read_register(&mut self, register: &Register) -> Result<u32, StoreError> {
        Ok(self.register(register))
    }

    fn write_register(&mut self, register: &Register, value: u32) -> Result<(), StoreError> {
        *self.registers.entry(register.offset()).or_default() |= value;
        self.writes.push((*register, value));

        Ok(())
    }
}

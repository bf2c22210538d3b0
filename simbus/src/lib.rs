//! simbus implements a simulated board for the bus monitor to drive.
//! It's a 64k flat RAM and a very simple bus master standing in for the
//! processor. Each clocked cycle the processor reads the next sequential
//! address and every `cycles_per_instruction` cycles counts as an
//! instruction boundary. That's enough to exercise stepping, halting and
//! reads/writes from the monitor without a real CPU core.
use busmon::prelude::*;
use color_eyre::eyre::{eyre, Result};
use std::fs::read;
use std::path::Path;
use tracing::{debug, trace};

#[cfg(test)]
mod tests;

/// Size of the simulated address space.
pub const MAX_SIZE: usize = 65536;

/// Location of the little endian reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address bus value with nothing driving it (pulled up).
pub const FLOATING: u16 = 0xFFFF;

/// `SimBus` is a RAM backed board with a toy processor attached.
#[derive(Clone, Debug)]
pub struct SimBus {
    memory: Box<[u8; MAX_SIZE]>,
    pc: u16,
    cycles: usize,
    cycles_per_instruction: usize,
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SimBus {
    /// Create a board with zero'd RAM. Instructions take
    /// `cycles_per_instruction` cycles (minimum of 1).
    #[must_use]
    pub fn new(cycles_per_instruction: usize) -> Self {
        Self {
            memory: Box::new([0; MAX_SIZE]),
            pc: 0,
            cycles: 0,
            cycles_per_instruction: cycles_per_instruction.max(1),
        }
    }

    /// Read a location directly.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr)]
    }

    /// Write a location directly.
    pub fn write(&mut self, addr: u16, val: u8) {
        self.memory[usize::from(addr)] = val;
    }

    /// The processor's next fetch address.
    #[must_use]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Number of cycles the processor has run since reset.
    #[must_use]
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Copy an image into RAM starting at `offset`.
    ///
    /// # Errors
    /// If the image doesn't fit between `offset` and the end of RAM.
    pub fn load(&mut self, image: &[u8], offset: u16) -> Result<()> {
        let start = usize::from(offset);
        let end = start + image.len();
        if end > MAX_SIZE {
            return Err(eyre!(
                "invalid size {start} + {} exceeds {MAX_SIZE}",
                image.len()
            ));
        }
        self.memory[start..end].copy_from_slice(image);
        debug!(offset, len = image.len(), "image loaded");
        Ok(())
    }

    /// Load an image from a file. See `load`.
    ///
    /// # Errors
    /// Any failure reading `path` or a size error from `load`.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P, offset: u16) -> Result<()> {
        let image = read(path.as_ref())
            .map_err(|e| eyre!("can't read {}: {e}", path.as_ref().display()))?;
        self.load(&image, offset)
    }

    fn reset_vector(&self) -> u16 {
        u16::from_le_bytes([self.read(RESET_VECTOR), self.read(RESET_VECTOR + 1)])
    }
}

impl Clock for SimBus {
    fn tick(&mut self, s: &mut Signals) {
        let clocked = !s.halt || s.step != StepRequest::None;

        // Processor side of the bus.
        let mut address = s.address_bus;
        let mut ran = false;
        if s.pull_rst_low {
            // Held in reset the processor just sits on the vector.
            self.pc = self.reset_vector();
            self.cycles = 0;
        } else if s.pull_be_low {
            // Off the bus entirely.
            address = FLOATING;
        } else if clocked {
            address = self.pc;
            self.pc = self.pc.wrapping_add(1);
            self.cycles += 1;
            ran = true;
        }

        // Monitor side overrides whatever the processor did.
        if s.assert_address {
            address = s.out_address;
        }
        s.address_bus = address;

        if s.assert_data {
            s.data_bus = s.out_data;
            if s.pull_rwbar_low {
                self.write(address, s.out_data);
            }
        } else {
            s.data_bus = self.read(address);
        }
        trace!(address, data = s.data_bus, ran, "cycle");

        if ran {
            let done = match s.step {
                StepRequest::None => false,
                StepRequest::Cycle => true,
                StepRequest::Instruction => self.cycles % self.cycles_per_instruction == 0,
            };
            if done {
                s.step = StepRequest::None;
            }
        }
    }

    fn steppable(&self, s: &Signals) -> bool {
        s.halt && !s.pull_rst_low && !s.pull_be_low
    }
}

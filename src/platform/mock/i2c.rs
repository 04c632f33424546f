//! Mock I2C implementation for testing
//!
//! `MockI2c` behaves like a single register-mapped device: the first byte of
//! every write selects the register pointer, further bytes are stored with
//! auto-increment, and reads return bytes from the pointer onwards. Every
//! operation is recorded for later verification.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use std::vec::Vec;

/// Size of the simulated register file
pub const REGISTER_FILE_SIZE: usize = 64;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Read transaction
    Read { addr: u8, len: usize },
}

/// Mock I2C implementation
///
/// Records all transactions for test verification and simulates the
/// register file of the device at `address`.
#[derive(Debug)]
pub struct MockI2c {
    address: u8,
    registers: [u8; REGISTER_FILE_SIZE],
    pointer: usize,
    transactions: Vec<I2cTransaction>,
    injected_error: Option<ErrorKind>,
}

impl MockI2c {
    /// Create a new mock device answering at `address` with all registers zero
    pub fn new(address: u8) -> Self {
        Self {
            address,
            registers: [0; REGISTER_FILE_SIZE],
            pointer: 0,
            transactions: Vec::new(),
            injected_error: None,
        }
    }

    /// Builder: preset a register value
    pub fn with_register(mut self, reg: u8, value: u8) -> Self {
        self.set_register(reg, value);
        self
    }

    /// Preset a register value without recording a transaction
    pub fn set_register(&mut self, reg: u8, value: u8) {
        self.registers[reg as usize % REGISTER_FILE_SIZE] = value;
    }

    /// Current value of a simulated register
    pub fn register(&self, reg: u8) -> u8 {
        self.registers[reg as usize % REGISTER_FILE_SIZE]
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> &[I2cTransaction] {
        &self.transactions
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Register addresses targeted by every logged write, in order
    pub fn written_registers(&self) -> Vec<u8> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                I2cTransaction::Write { data, .. } if data.len() > 1 => Some(data[0]),
                _ => None,
            })
            .collect()
    }

    /// Values written to `reg` (single-byte writes only), in order
    pub fn writes_to(&self, reg: u8) -> Vec<u8> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                I2cTransaction::Write { data, .. } if data.len() == 2 && data[0] == reg => {
                    Some(data[1])
                }
                _ => None,
            })
            .collect()
    }

    /// Make every following transaction fail with `kind`
    pub fn inject_error(&mut self, kind: ErrorKind) {
        self.injected_error = Some(kind);
    }

    /// Stop failing transactions
    pub fn clear_error(&mut self) {
        self.injected_error = None;
    }

    fn write_bytes(&mut self, data: &[u8]) {
        let Some((&reg, payload)) = data.split_first() else {
            return;
        };
        self.pointer = reg as usize % REGISTER_FILE_SIZE;
        for &byte in payload {
            self.registers[self.pointer] = byte;
            self.pointer = (self.pointer + 1) % REGISTER_FILE_SIZE;
        }
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = self.registers[self.pointer];
            self.pointer = (self.pointer + 1) % REGISTER_FILE_SIZE;
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if let Some(kind) = self.injected_error {
            return Err(kind);
        }
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => {
                    self.transactions.push(I2cTransaction::Write {
                        addr: address,
                        data: data.to_vec(),
                    });
                    self.write_bytes(data);
                }
                Operation::Read(buffer) => {
                    self.transactions.push(I2cTransaction::Read {
                        addr: address,
                        len: buffer.len(),
                    });
                    self.read_bytes(buffer);
                }
            }
        }
        Ok(())
    }
}

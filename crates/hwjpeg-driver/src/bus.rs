//! Register bus abstraction.
//!
//! The driver never talks to the device memory map directly; it issues
//! single-word transactions through [`RegisterBus`]. Implementations wrap
//! whatever transport reaches the device (an OPB master in simulation, a
//! memory-mapped window on real hardware). A transaction either completes or
//! fails; there is no retry at this layer and none above it.

use thiserror::Error;

/// Direction of a failed bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "write"),
        }
    }
}

/// A register transaction the bus reported as failed.
///
/// Carries enough context to identify the offending access; the driver
/// treats every bus failure as fatal to the operation in progress.
#[derive(Debug, Clone, Error)]
#[error("bus {access} at 0x{addr:03X} failed: {detail}")]
pub struct BusError {
    /// Byte offset of the failed access.
    pub addr: u32,
    /// Whether the failure was on a read or a write.
    pub access: Access,
    /// Transport-specific failure description.
    pub detail: String,
}

impl BusError {
    /// Convenience constructor for a failed read.
    pub fn read(addr: u32, detail: impl Into<String>) -> Self {
        Self {
            addr,
            access: Access::Read,
            detail: detail.into(),
        }
    }

    /// Convenience constructor for a failed write.
    pub fn write(addr: u32, detail: impl Into<String>) -> Self {
        Self {
            addr,
            access: Access::Write,
            detail: detail.into(),
        }
    }
}

/// Single-word addressed register access.
///
/// Both calls are synchronous: they return only once the underlying
/// transaction has completed on the device.
pub trait RegisterBus {
    /// Read one 32-bit word from `addr`.
    fn read_reg(&mut self, addr: u32) -> Result<u32, BusError>;

    /// Write one 32-bit word to `addr`.
    fn write_reg(&mut self, addr: u32, value: u32) -> Result<(), BusError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_error_display() {
        let err = BusError::write(0x104, "timeout");
        assert_eq!(err.to_string(), "bus write at 0x104 failed: timeout");

        let err = BusError::read(0xC, "parity");
        assert_eq!(err.to_string(), "bus read at 0x00C failed: parity");
    }
}

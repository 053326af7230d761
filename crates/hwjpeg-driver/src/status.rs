//! Completion polling.
//!
//! The status register is polled with synchronous reads until it reads the
//! done value exactly. Bitwise equality matters: the done bit appearing
//! alongside other set bits is not completion, and treating it as such has
//! produced premature-read bugs against this device before.

use log::debug;

use crate::bus::RegisterBus;
use crate::registers::{ENC_LENGTH, ENC_STATUS, STATUS_DONE};
use crate::{DriverConfig, DriverError};

/// Block until the device reports the encode complete, then return the
/// output length in bytes.
///
/// Polls [`ENC_STATUS`](crate::registers::ENC_STATUS) until it equals
/// [`STATUS_DONE`](crate::registers::STATUS_DONE) exactly; any other value,
/// including values with the done bit set among others, keeps polling. With
/// `config.poll_limit` set, gives up after that many non-done polls with
/// [`DriverError::EncodeHung`] (carrying the last status observed); with
/// `None` the poll is unbounded and a hung device blocks the caller
/// indefinitely.
pub fn await_completion<B: RegisterBus>(
    bus: &mut B,
    config: &DriverConfig,
) -> Result<u32, DriverError> {
    debug!("waiting for encode completion");
    let mut polls: u64 = 0;
    loop {
        let status = bus.read_reg(ENC_STATUS)?;
        if status == STATUS_DONE {
            break;
        }
        polls += 1;
        if let Some(limit) = config.poll_limit {
            if polls >= limit {
                return Err(DriverError::EncodeHung {
                    polls,
                    last_status: status,
                });
            }
        }
    }

    let length = bus.read_reg(ENC_LENGTH)?;
    debug!("encode complete, {length} output bytes");
    Ok(length)
}

//! Device reset and quantizer table programming.
//!
//! [`initialise`] must run once per device instance before any encode pass:
//! the device discards table entries written after an encode has started, so
//! correct tables are a precondition for every frame that follows.

use log::{debug, info};

use crate::bus::RegisterBus;
use crate::clock::ClockReset;
use crate::quant::QuantTable;
use crate::registers::{ENC_START, QUANT_CHR, QUANT_LUM, QUANT_STRIDE};
use crate::{DriverConfig, DriverError, MIN_RESET_CYCLES};

/// Reset the device and program both quantizer tables.
///
/// Reset is held for `config.reset_cycles` rising edges (at least
/// [`MIN_RESET_CYCLES`]), deasserted, and followed by one more edge so the
/// device's state machine is fully out of reset before the first bus
/// transaction. The 64 luminance entries are then written in ascending index
/// order, followed by the 64 chrominance entries. Each write is synchronous;
/// the first failed transaction aborts the sequence.
pub fn initialise<B, C>(
    bus: &mut B,
    clock: &mut C,
    luma: &QuantTable,
    chroma: &QuantTable,
    config: &DriverConfig,
) -> Result<(), DriverError>
where
    B: RegisterBus,
    C: ClockReset,
{
    reset(clock, config);

    info!("programming luminance quantizer table");
    program_table(bus, QUANT_LUM, luma)?;

    info!("programming chrominance quantizer table");
    program_table(bus, QUANT_CHR, chroma)?;

    info!("encoder initialised");
    Ok(())
}

/// Register-file sanity check: reset, then read the control register, write
/// an all-ones pattern, and read it back. Returns the read-back value.
///
/// Useful when bringing up a new bus transport before committing to a full
/// encode pass.
pub fn probe<B, C>(bus: &mut B, clock: &mut C, config: &DriverConfig) -> Result<u32, DriverError>
where
    B: RegisterBus,
    C: ClockReset,
{
    reset(clock, config);
    debug!("out of reset");

    bus.read_reg(ENC_START)?;
    bus.write_reg(ENC_START, 0xFFFF_FFFF)?;
    let value = bus.read_reg(ENC_START)?;
    debug!("probe read back 0x{value:08X}");
    Ok(value)
}

fn reset<C: ClockReset>(clock: &mut C, config: &DriverConfig) {
    let cycles = config.reset_cycles.max(MIN_RESET_CYCLES);
    clock.set_reset(true);
    for _ in 0..cycles {
        clock.rising_edge();
    }
    clock.set_reset(false);
    clock.rising_edge();
}

fn program_table<B: RegisterBus>(
    bus: &mut B,
    base: u32,
    table: &QuantTable,
) -> Result<(), DriverError> {
    for (index, value) in table.iter().enumerate() {
        bus.write_reg(base + index as u32 * QUANT_STRIDE, u32::from(value))?;
    }
    Ok(())
}

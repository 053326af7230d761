//! Test-support fake for the encoder device.
//!
//! [`SimEncoder`] implements all three driver seams ([`RegisterBus`],
//! [`ClockReset`], [`PixelPort`]) over shared in-memory state, records every
//! transaction, and lets a test script the device's observable behavior:
//! the almost-full line per clock edge, the status-register read sequence,
//! and injected bus faults. Handles are cheap clones of the same device, so
//! one instance can serve as bus, clock, and port simultaneously.
//!
//! The fake models the hardware acceptance rule (a pixel word is consumed
//! on a rising edge where write-enable is high and the queue is not
//! almost-full), so flow-control discipline is checked mechanically by every
//! streaming test.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};

use crate::bus::{BusError, RegisterBus};
use crate::clock::ClockReset;
use crate::port::PixelPort;
use crate::registers::{ENC_STATUS, STATUS_DONE};

/// One recorded register transaction, in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusCall {
    /// A completed register read at the given offset.
    Read(u32),
    /// A completed register write: (offset, value).
    Write(u32, u32),
}

#[derive(Debug, Default)]
struct Inner {
    regs: BTreeMap<u32, u32>,
    failing: BTreeSet<u32>,
    status_script: VecDeque<u32>,
    afull_script: VecDeque<bool>,

    wdata: u32,
    wren: bool,
    afull_line: bool,
    reset_level: bool,

    calls: Vec<BusCall>,
    accepted: Vec<u32>,
    edges: u64,
    reset_edges_held: u64,
}

/// Scripted in-memory stand-in for the hardware encoder.
///
/// Cloning yields another handle to the same device state.
#[derive(Debug, Clone, Default)]
pub struct SimEncoder {
    inner: Arc<Mutex<Inner>>,
}

impl SimEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset a register value (e.g. the LENGTH register before a poll).
    pub fn set_reg(&self, addr: u32, value: u32) {
        self.inner.lock().unwrap().regs.insert(addr, value);
    }

    /// Script the values returned by successive STATUS reads. Once the
    /// script is drained, STATUS reads return [`STATUS_DONE`].
    pub fn script_status<I: IntoIterator<Item = u32>>(&self, values: I) {
        self.inner.lock().unwrap().status_script.extend(values);
    }

    /// Script the almost-full line level for successive clock edges. Once
    /// the script is drained, the line stays low.
    pub fn script_afull<I: IntoIterator<Item = bool>>(&self, levels: I) {
        self.inner.lock().unwrap().afull_script.extend(levels);
    }

    /// Make every access to `addr` fail with a bus error.
    pub fn fail_at(&self, addr: u32) {
        self.inner.lock().unwrap().failing.insert(addr);
    }

    /// Every completed bus transaction, in order.
    pub fn calls(&self) -> Vec<BusCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// The register writes among [`Self::calls`], in order.
    pub fn reg_writes(&self) -> Vec<(u32, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BusCall::Write(addr, value) => Some((addr, value)),
                BusCall::Read(_) => None,
            })
            .collect()
    }

    /// Number of STATUS reads issued so far.
    pub fn status_reads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, BusCall::Read(addr) if *addr == ENC_STATUS))
            .count()
    }

    /// Pixel words the device accepted, in acceptance order.
    pub fn accepted(&self) -> Vec<u32> {
        self.inner.lock().unwrap().accepted.clone()
    }

    /// Total rising edges observed.
    pub fn edges(&self) -> u64 {
        self.inner.lock().unwrap().edges
    }

    /// Rising edges observed with the reset line asserted.
    pub fn reset_edges_held(&self) -> u64 {
        self.inner.lock().unwrap().reset_edges_held
    }
}

impl RegisterBus for SimEncoder {
    fn read_reg(&mut self, addr: u32) -> Result<u32, BusError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing.contains(&addr) {
            return Err(BusError::read(addr, "injected fault"));
        }
        inner.calls.push(BusCall::Read(addr));
        if addr == ENC_STATUS {
            if let Some(value) = inner.status_script.pop_front() {
                return Ok(value);
            }
            return Ok(STATUS_DONE);
        }
        Ok(inner.regs.get(&addr).copied().unwrap_or(0))
    }

    fn write_reg(&mut self, addr: u32, value: u32) -> Result<(), BusError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing.contains(&addr) {
            return Err(BusError::write(addr, "injected fault"));
        }
        inner.calls.push(BusCall::Write(addr, value));
        inner.regs.insert(addr, value);
        Ok(())
    }
}

impl ClockReset for SimEncoder {
    fn rising_edge(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.edges += 1;
        if inner.reset_level {
            inner.reset_edges_held += 1;
        }
        // The almost-full line takes its scripted level for this edge; a
        // word is consumed only when write-enable is high and the queue has
        // space, mirroring the hardware acceptance rule.
        inner.afull_line = inner.afull_script.pop_front().unwrap_or(false);
        if inner.wren && !inner.afull_line && !inner.reset_level {
            let word = inner.wdata;
            inner.accepted.push(word);
        }
    }

    fn set_reset(&mut self, asserted: bool) {
        self.inner.lock().unwrap().reset_level = asserted;
    }
}

impl PixelPort for SimEncoder {
    fn set_data(&mut self, word: u32) {
        self.inner.lock().unwrap().wdata = word;
    }

    fn set_write_enable(&mut self, enabled: bool) {
        self.inner.lock().unwrap().wren = enabled;
    }

    fn almost_full(&mut self) -> bool {
        self.inner.lock().unwrap().afull_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_script_then_done() {
        let mut sim = SimEncoder::new();
        sim.script_status([0x00, 0x01]);
        assert_eq!(sim.read_reg(ENC_STATUS).unwrap(), 0x00);
        assert_eq!(sim.read_reg(ENC_STATUS).unwrap(), 0x01);
        assert_eq!(sim.read_reg(ENC_STATUS).unwrap(), STATUS_DONE);
        assert_eq!(sim.status_reads(), 3);
    }

    #[test]
    fn test_word_not_accepted_while_almost_full() {
        let mut sim = SimEncoder::new();
        sim.script_afull([true, false]);
        sim.set_data(0xAB_CDEF);
        sim.set_write_enable(true);

        sim.rising_edge();
        assert!(sim.almost_full());
        assert!(sim.accepted().is_empty());

        sim.rising_edge();
        assert!(!sim.almost_full());
        assert_eq!(sim.accepted(), vec![0xAB_CDEF]);
    }

    #[test]
    fn test_clones_share_state() {
        let mut sim = SimEncoder::new();
        let clock = sim.clone();
        sim.rising_edge();
        assert_eq!(clock.edges(), 1);
    }

    #[test]
    fn test_injected_fault_is_not_recorded() {
        let mut sim = SimEncoder::new();
        sim.fail_at(0x04);
        assert!(sim.write_reg(0x04, 1).is_err());
        assert!(sim.calls().is_empty());
    }
}

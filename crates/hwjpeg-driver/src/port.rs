//! Pixel input port.
//!
//! Pixel data bypasses the register map and enters the device through a
//! dedicated word-wide port with a write-enable line and an almost-full
//! status line, all sampled relative to the clock in [`crate::clock`].

/// The device's streaming pixel input.
pub trait PixelPort {
    /// Present a packed pixel word on the data lines.
    fn set_data(&mut self, word: u32);

    /// Drive the write-enable line. `true` offers the current data word to
    /// the device's input queue on each following clock edge.
    fn set_write_enable(&mut self, enabled: bool);

    /// Sample the queue's almost-full line as of the most recent clock edge.
    ///
    /// Callers must re-sample on every edge they wait out; the line is a live
    /// flow-control signal, not a latched flag.
    fn almost_full(&mut self) -> bool;
}

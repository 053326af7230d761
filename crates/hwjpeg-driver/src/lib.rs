//! hwjpeg driver core
//!
//! This crate drives a hardware JPEG encoder through its register/bus
//! interface: it programs the quantizer tables, streams RGB pixel data into
//! the device's input queue under flow control, and polls for completion.
//!
//! The three seams the driver suspends at (the register bus, the clock/reset
//! facility, and the pixel input port) are traits ([`RegisterBus`],
//! [`ClockReset`], [`PixelPort`]) so the same driver runs against a
//! simulator, a scripted fake, or real hardware. All driver procedures are
//! strictly sequential per device instance; nothing here is shared across
//! instances.
//!
//! A typical encode pass:
//!
//! ```ignore
//! use hwjpeg_driver::{initialise, encode_frame, DriverConfig, LUMA_QUANT, CHROMA_QUANT};
//!
//! let config = DriverConfig::default();
//! initialise(&mut bus, &mut clock, &LUMA_QUANT, &CHROMA_QUANT, &config)?;
//! let length = encode_frame(&mut bus, &mut clock, &mut port, &frame, &config)?;
//! ```

use thiserror::Error;

pub mod bus;
pub mod clock;
pub mod port;
pub mod program;
pub mod quant;
pub mod registers;
pub mod status;
pub mod stream;
pub mod testing;

pub use bus::{Access, BusError, RegisterBus};
pub use clock::ClockReset;
pub use port::PixelPort;
pub use program::{initialise, probe};
pub use quant::{QuantTable, CHROMA_QUANT, LUMA_QUANT};
pub use status::await_completion;
pub use stream::{encode_frame, pack_rgb, stream_frame};

/// Minimum number of rising edges reset must be held for the device's
/// internal state machine to fully clear.
pub const MIN_RESET_CYCLES: u32 = 10;

/// Driver configuration for one device instance.
///
/// The defaults reproduce the reference behavior: a 10-cycle reset and
/// unbounded waits on both backpressure and completion. Setting a limit
/// converts an indefinite hang into an explicit error.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DriverConfig {
    /// Rising edges to hold reset asserted during [`initialise`]. Values
    /// below [`MIN_RESET_CYCLES`] are raised to the minimum.
    pub reset_cycles: u32,
    /// Maximum consecutive edges the input queue may report almost-full
    /// while a pixel word is pending. `None` waits forever.
    pub stall_limit: Option<u64>,
    /// Maximum status polls before [`await_completion`] gives up.
    /// `None` polls forever.
    pub poll_limit: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            reset_cycles: MIN_RESET_CYCLES,
            stall_limit: None,
            poll_limit: None,
        }
    }
}

impl DriverConfig {
    /// Create a configuration with the reference defaults.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Errors surfaced by driver operations.
///
/// Every failure is fatal to the operation in progress; the driver performs
/// no retries and no local recovery (the caller owns abort/report policy).
#[derive(Debug, Error)]
pub enum DriverError {
    /// A register transaction the bus reported as failed.
    #[error(transparent)]
    Bus(#[from] BusError),

    /// Frame width or height is zero or does not fit the device's 16-bit
    /// size fields.
    #[error("invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length does not match width * height * 3.
    #[error("invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The input queue held almost-full past the configured stall limit.
    #[error("input queue still almost-full after {cycles} cycles at pixel ({x}, {y})")]
    QueueStalled { x: u32, y: u32, cycles: u64 },

    /// The status register never reached the done value within the
    /// configured poll limit.
    #[error("encoder not done after {polls} status polls (last status 0x{last_status:02X})")]
    EncodeHung { polls: u64, last_status: u32 },
}

/// An RGB frame queued for encoding.
///
/// Pixels are 3 bytes each (R, G, B) in row-major order, top row first,
/// matching the raster order the device expects on its pixel port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Create a new frame from dimensions and RGB pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid frame.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// The (r, g, b) triple at pixel position (x, y).
    ///
    /// # Panics
    /// Panics if (x, y) is outside the frame.
    pub fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        (self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_match_reference() {
        let config = DriverConfig::new();
        assert_eq!(config.reset_cycles, 10);
        assert_eq!(config.stall_limit, None);
        assert_eq!(config.poll_limit, None);
    }

    #[test]
    fn test_frame_accessors() {
        let frame = Frame::new(2, 2, vec![0u8; 12]);
        assert_eq!(frame.pixel_count(), 4);
        assert_eq!(frame.byte_size(), 12);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_frame_empty() {
        let frame = Frame::new(0, 0, vec![]);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_frame_rgb_at_row_major() {
        // 2x2: red, green / blue, white
        let pixels = vec![
            255, 0, 0, 0, 255, 0, //
            0, 0, 255, 255, 255, 255,
        ];
        let frame = Frame::new(2, 2, pixels);
        assert_eq!(frame.rgb_at(0, 0), (255, 0, 0));
        assert_eq!(frame.rgb_at(1, 0), (0, 255, 0));
        assert_eq!(frame.rgb_at(0, 1), (0, 0, 255));
        assert_eq!(frame.rgb_at(1, 1), (255, 255, 255));
    }

    #[test]
    #[should_panic(expected = "pixel out of bounds")]
    fn test_frame_rgb_at_out_of_bounds() {
        let frame = Frame::new(1, 1, vec![0, 0, 0]);
        frame.rgb_at(1, 0);
    }

    #[test]
    fn test_driver_error_display() {
        let err = DriverError::EncodeHung {
            polls: 5,
            last_status: 0x03,
        };
        assert_eq!(
            err.to_string(),
            "encoder not done after 5 status polls (last status 0x03)"
        );
    }
}

//! Register map for the hardware JPEG encoder.
//!
//! All offsets are byte addresses in the device's register/memory space and
//! must match the hardware bit-exactly. The quantizer tables occupy two RAM
//! windows of 64 word-aligned entries each; only the low byte of each entry
//! word is significant.

// ---------------------------------------------------------------------------
// Control and status registers
// ---------------------------------------------------------------------------

/// Encode control register. Bit 0 enables the encoder, bits 1-2 select the
/// input pixel mode.
pub const ENC_START: u32 = 0x00;

/// Frame geometry register: `(width << 16) | height`, written once per frame
/// after [`ENC_START`] and before any pixel data.
pub const IMAGE_SIZE: u32 = 0x04;

/// Status register. Completion is signalled by the register reading exactly
/// [`STATUS_DONE`], not merely by the done bit being set.
pub const ENC_STATUS: u32 = 0x0C;

/// Output byte length, valid once [`ENC_STATUS`] reads [`STATUS_DONE`].
pub const ENC_LENGTH: u32 = 0x14;

// ---------------------------------------------------------------------------
// Quantizer table RAM
// ---------------------------------------------------------------------------

/// Base of the 64-entry luminance quantizer RAM.
pub const QUANT_LUM: u32 = 0x100;

/// Base of the 64-entry chrominance quantizer RAM.
pub const QUANT_CHR: u32 = 0x200;

/// Byte stride between consecutive quantizer entries.
pub const QUANT_STRIDE: u32 = 4;

/// Entries per quantizer table (one 8x8 coefficient block).
pub const QUANT_LEN: usize = 64;

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// RGB input mode for the [`ENC_START`] mode field.
pub const MODE_RGB: u32 = 0x3 << 1;

/// Enable bit for [`ENC_START`].
pub const CTRL_ENABLE: u32 = 0x1;

/// Exact [`ENC_STATUS`] value signalling a completed encode.
pub const STATUS_DONE: u32 = 0x02;

//! hwjpeg verify - output-fidelity verification for the hardware encoder
//!
//! This crate provides the host-side half of an encode-and-check pass:
//! - Loading and decoding source/output images (JPEG, PNG) into driver
//!   [`Frame`](hwjpeg_driver::Frame)s or `image` types
//! - Computing the normalized byte-wise difference percentage between a
//!   source image and its re-decoded encoder output
//!
//! The comparison policy (what difference percentage counts as a pass)
//! belongs to the caller; [`DEFAULT_THRESHOLD`] is the value the hardware
//! was validated against.

pub mod compare;
pub mod load;

pub use compare::{compare, within_threshold, CompareError, DEFAULT_THRESHOLD};
pub use load::{
    decode_frame, decode_image, frame_from_image, frame_to_image, load_frame, load_image,
    LoadError,
};

/// Frame edge length the device's static JPEG header assumes.
///
/// The core does not enforce this; inputs of other sizes are a harness-level
/// configuration error, not a driver error.
pub const REFERENCE_FRAME_DIM: u32 = 96;

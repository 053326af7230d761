//! Flow-controlled pixel streaming.
//!
//! [`stream_frame`] pushes one frame into the device: a start/mode write, a
//! geometry write, then every pixel in raster order through the pixel port
//! under almost-full backpressure. The discipline per word is
//! assert-wait-sample-deassert: present the word with write-enable high,
//! wait out rising edges until the queue has space, then drop write-enable
//! before the next word so each enable pulse pushes exactly one word.

use log::debug;

use crate::bus::RegisterBus;
use crate::clock::ClockReset;
use crate::port::PixelPort;
use crate::registers::{CTRL_ENABLE, ENC_START, IMAGE_SIZE, MODE_RGB};
use crate::status::await_completion;
use crate::{DriverConfig, DriverError, Frame};

/// Pack one RGB pixel into the device's 24-bit input word.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(b) << 16) | (u32::from(g) << 8) | u32::from(r)
}

/// Stream one frame into the device's input queue.
///
/// Issues the start/mode write, then the `(width<<16)|height` geometry
/// write, then exactly `width * height` pixel words in row-major order. The
/// almost-full line is sampled fresh on every edge spent waiting; a word is
/// never advanced past while the queue reports near-capacity.
///
/// # Errors
///
/// Geometry violations are reported before any bus activity. Bus failures
/// abort immediately. With `config.stall_limit` set, a queue that holds
/// almost-full for that many consecutive edges aborts with
/// [`DriverError::QueueStalled`]; with `None` the wait is unbounded.
pub fn stream_frame<B, C, P>(
    bus: &mut B,
    clock: &mut C,
    port: &mut P,
    frame: &Frame,
    config: &DriverConfig,
) -> Result<(), DriverError>
where
    B: RegisterBus,
    C: ClockReset,
    P: PixelPort,
{
    check_geometry(frame)?;

    bus.write_reg(ENC_START, MODE_RGB | CTRL_ENABLE)?;
    bus.write_reg(IMAGE_SIZE, (frame.width << 16) | frame.height)?;
    debug!("streaming {}x{} frame", frame.width, frame.height);

    for y in 0..frame.height {
        for x in 0..frame.width {
            let (r, g, b) = frame.rgb_at(x, y);
            port.set_data(pack_rgb(r, g, b));
            port.set_write_enable(true);
            wait_for_space(clock, port, x, y, config)?;
            port.set_write_enable(false);
        }
    }

    debug!("frame streamed, {} pixels", frame.pixel_count());
    Ok(())
}

/// Stream a frame and block until the device signals completion.
///
/// Returns the encoded output length in bytes.
pub fn encode_frame<B, C, P>(
    bus: &mut B,
    clock: &mut C,
    port: &mut P,
    frame: &Frame,
    config: &DriverConfig,
) -> Result<u32, DriverError>
where
    B: RegisterBus,
    C: ClockReset,
    P: PixelPort,
{
    stream_frame(bus, clock, port, frame, config)?;
    await_completion(bus, config)
}

fn check_geometry(frame: &Frame) -> Result<(), DriverError> {
    if frame.width == 0 || frame.height == 0 || frame.width > 0xFFFF || frame.height > 0xFFFF {
        return Err(DriverError::InvalidDimensions {
            width: frame.width,
            height: frame.height,
        });
    }
    let expected = frame.width as usize * frame.height as usize * 3;
    if frame.pixels.len() != expected {
        return Err(DriverError::InvalidPixelData {
            expected,
            actual: frame.pixels.len(),
        });
    }
    Ok(())
}

fn wait_for_space<C, P>(
    clock: &mut C,
    port: &mut P,
    x: u32,
    y: u32,
    config: &DriverConfig,
) -> Result<(), DriverError>
where
    C: ClockReset,
    P: PixelPort,
{
    let mut held: u64 = 0;
    loop {
        clock.rising_edge();
        // Sampled fresh every cycle; caching this line risks writing into a
        // full queue.
        if !port.almost_full() {
            return Ok(());
        }
        held += 1;
        if let Some(limit) = config.stall_limit {
            if held >= limit {
                return Err(DriverError::QueueStalled { x, y, cycles: held });
            }
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::testing::SimEncoder;
    use proptest::prelude::*;

    /// Strategy for small frame dimensions (keep streaming cheap).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=8, 1u32..=8)
    }

    proptest! {
        /// Property: packing is exact for all byte values.
        #[test]
        fn prop_pack_rgb_exact(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let word = pack_rgb(r, g, b);
            prop_assert_eq!(word, (u32::from(b) << 16) | (u32::from(g) << 8) | u32::from(r));
            prop_assert_eq!(word & 0xFF, u32::from(r));
            prop_assert_eq!((word >> 8) & 0xFF, u32::from(g));
            prop_assert_eq!((word >> 16) & 0xFF, u32::from(b));
            prop_assert_eq!(word >> 24, 0);
        }

        /// Property: every pixel is written exactly once, in raster order,
        /// for arbitrary almost-full backpressure patterns.
        #[test]
        fn prop_each_pixel_written_once_under_backpressure(
            (width, height) in dimensions_strategy(),
            seed in any::<u64>(),
            stalls in prop::collection::vec(any::<bool>(), 0..64),
        ) {
            let size = width as usize * height as usize * 3;
            let pixels: Vec<u8> = (0..size)
                .map(|i| (i as u64).wrapping_mul(31).wrapping_add(seed) as u8)
                .collect();
            let frame = Frame::new(width, height, pixels);

            let mut expected = Vec::new();
            for y in 0..height {
                for x in 0..width {
                    let (r, g, b) = frame.rgb_at(x, y);
                    expected.push(pack_rgb(r, g, b));
                }
            }

            let mut sim = SimEncoder::new();
            let mut clock = sim.clone();
            let mut port = sim.clone();
            sim.script_afull(stalls);
            let config = DriverConfig::default();
            stream_frame(&mut sim, &mut clock, &mut port, &frame, &config).unwrap();

            prop_assert_eq!(sim.accepted(), expected);
        }
    }
}

//! Quantization coefficient tables.
//!
//! A [`QuantTable`] holds the 64 coefficients for one 8x8 block, in block
//! order, configuring the device's compression aggressiveness for either the
//! luminance or the chrominance channel. The reference tables the hardware
//! was validated against ship as constants; callers with different quality
//! targets can supply their own.

use crate::registers::QUANT_LEN;

/// A 64-entry quantizer coefficient table in 8x8 block order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantTable([u8; QUANT_LEN]);

impl QuantTable {
    /// Wrap a coefficient array. The array is used as-is, in block order.
    pub const fn new(coefficients: [u8; QUANT_LEN]) -> Self {
        Self(coefficients)
    }

    /// The coefficients in programming order.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Iterate coefficients in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl From<[u8; QUANT_LEN]> for QuantTable {
    fn from(coefficients: [u8; QUANT_LEN]) -> Self {
        Self(coefficients)
    }
}

/// Reference luminance quantizer table.
pub const LUMA_QUANT: QuantTable = QuantTable::new([
    0x10, 0x0B, 0x0C, 0x0E, 0x0C, 0x0A, 0x10, 0x0E, //
    0x0D, 0x0E, 0x12, 0x11, 0x10, 0x13, 0x18, 0x28, //
    0x1A, 0x18, 0x16, 0x16, 0x18, 0x31, 0x23, 0x25, //
    0x1D, 0x28, 0x3A, 0x33, 0x3D, 0x3C, 0x39, 0x33, //
    0x38, 0x37, 0x40, 0x48, 0x5C, 0x4E, 0x40, 0x44, //
    0x57, 0x45, 0x37, 0x38, 0x50, 0x6D, 0x51, 0x57, //
    0x5F, 0x62, 0x67, 0x68, 0x67, 0x3E, 0x4D, 0x71, //
    0x79, 0x70, 0x64, 0x78, 0x5C, 0x65, 0x67, 0x63,
]);

/// Reference chrominance quantizer table.
pub const CHROMA_QUANT: QuantTable = QuantTable::new([
    0x11, 0x12, 0x12, 0x18, 0x15, 0x18, 0x2F, 0x1A, //
    0x1A, 0x2F, 0x63, 0x42, 0x38, 0x42, 0x63, 0x63, //
    0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, //
    0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, //
    0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, //
    0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, //
    0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, //
    0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63, 0x63,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_length() {
        assert_eq!(LUMA_QUANT.as_slice().len(), QUANT_LEN);
        assert_eq!(CHROMA_QUANT.as_slice().len(), QUANT_LEN);
    }

    #[test]
    fn test_reference_table_corners() {
        assert_eq!(LUMA_QUANT.as_slice()[0], 0x10);
        assert_eq!(LUMA_QUANT.as_slice()[63], 0x63);
        assert_eq!(CHROMA_QUANT.as_slice()[0], 0x11);
        assert_eq!(CHROMA_QUANT.as_slice()[63], 0x63);
    }

    #[test]
    fn test_iter_matches_slice_order() {
        let collected: Vec<u8> = LUMA_QUANT.iter().collect();
        assert_eq!(collected.as_slice(), LUMA_QUANT.as_slice());
    }
}

//! Fixed-width bitvector literal.

use std::fmt;

/// A concrete bitvector of 1 to 64 bits.
///
/// The stored value is always masked to the width, so two bitvectors with
/// the same width and the same low bits compare equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitVec {
    value: u64,
    bits: u32,
}

impl BitVec {
    /// Widest supported bitvector.
    pub const MAX_BITS: u32 = 64;

    /// Create a bitvector, returning `None` for a width outside `1..=64`.
    pub fn new(value: u64, bits: u32) -> Option<Self> {
        if bits == 0 || bits > Self::MAX_BITS {
            return None;
        }
        Some(BitVec {
            value: value & Self::mask(bits),
            bits,
        })
    }

    /// Two's-complement encoding of `value` at the given width.
    #[allow(clippy::cast_sign_loss, reason = "reinterpreting the two's-complement bits")]
    pub fn from_i64(value: i64, bits: u32) -> Option<Self> {
        Self::new(value as u64, bits)
    }

    /// All-ones mask for a width. Widths of 64 and above yield `u64::MAX`.
    #[inline]
    pub const fn mask(bits: u32) -> u64 {
        if bits >= 64 {
            u64::MAX
        } else {
            (1u64 << bits) - 1
        }
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.value
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Value interpreted as a two's-complement signed integer.
    #[allow(clippy::cast_possible_wrap, reason = "reinterpreting the two's-complement bits")]
    pub const fn signed(self) -> i64 {
        let shift = 64 - self.bits;
        ((self.value << shift) as i64) >> shift
    }

    /// Bitvector of the same width holding `value`, masked.
    #[inline]
    pub const fn with_value(self, value: u64) -> Self {
        BitVec {
            value: value & Self::mask(self.bits),
            bits: self.bits,
        }
    }

    /// Bitvector of the same width holding the two's-complement encoding of
    /// `value`.
    #[allow(clippy::cast_sign_loss, reason = "reinterpreting the two's-complement bits")]
    #[inline]
    pub const fn with_signed(self, value: i64) -> Self {
        self.with_value(value as u64)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.value == 0
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}#{}", self.value, self.bits)
    }
}

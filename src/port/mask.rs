//! Bit masks over an 8-bit port register.

use core::ops::BitOr;

use super::level::Uniformity;

/// Set of bit positions within one port register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitMask(pub u8);

impl BitMask {
    /// No bits.
    pub const EMPTY: BitMask = BitMask(0);

    /// Mask for a single bit position (0-7).
    ///
    /// Positions past 7 panic in debug builds and wrap in release builds.
    #[inline]
    pub const fn bit(position: u8) -> Self {
        debug_assert!(position < 8, "bit position out of range");
        Self(1 << (position & 7))
    }

    /// Raw mask value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Complement of the mask.
    #[inline]
    pub const fn inverse(self) -> u8 {
        !self.0
    }

    /// Number of bits in the mask.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether the masked bits of `value` are all set, all clear, or mixed.
    ///
    /// An empty mask classifies as [`Uniformity::AllSet`].
    #[inline]
    pub const fn classify(self, value: u8) -> Uniformity {
        if value & self.0 == self.0 {
            Uniformity::AllSet
        } else if value & self.0 == 0 {
            Uniformity::AllClear
        } else {
            Uniformity::Mixed
        }
    }

    /// `value` with the masked bits set.
    #[inline]
    pub const fn set_in(self, value: u8) -> u8 {
        value | self.0
    }

    /// `value` with the masked bits cleared.
    #[inline]
    pub const fn clear_in(self, value: u8) -> u8 {
        value & self.inverse()
    }

    /// `value` with the masked bits flipped.
    #[inline]
    pub const fn toggle_in(self, value: u8) -> u8 {
        value ^ self.0
    }

    /// `value` with the masked bits forced to `high`.
    #[inline]
    pub const fn assign_in(self, value: u8, high: bool) -> u8 {
        if high {
            self.set_in(value)
        } else {
            self.clear_in(value)
        }
    }
}

impl BitOr for BitMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let mask = BitMask(0b0011_0000);

        assert_eq!(mask.classify(0b1111_0000), Uniformity::AllSet);
        assert_eq!(mask.classify(0b1100_1111), Uniformity::AllClear);
        assert_eq!(mask.classify(0b0001_0000), Uniformity::Mixed);
    }

    #[test]
    fn test_writes_leave_foreign_bits() {
        let mask = BitMask::bit(2) | BitMask::bit(5);
        assert_eq!(mask.bits(), 0b0010_0100);
        assert_eq!(mask.inverse(), 0b1101_1011);

        assert_eq!(mask.set_in(0b1000_0001), 0b1010_0101);
        assert_eq!(mask.clear_in(0b1111_1111), 0b1101_1011);
        assert_eq!(mask.toggle_in(0b0000_0100), 0b0010_0000);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bit position out of range")]
    fn test_bit_past_port_width() {
        let _ = BitMask::bit(9);
    }
}

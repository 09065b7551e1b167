use alloy::primitives::U256;

/// A contiguous window of bits `[start, end)` inside a `uint256`.
///
/// Maker and taker traits pack several independent fields into a single
/// word; a [`BitMask`] names one such field and reads or writes it without
/// disturbing its neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitMask {
    start: u32,
    end: u32,
}

impl BitMask {
    /// Create a mask over bits `[start, end)`. Panics if the window is
    /// empty or extends past bit 255.
    pub const fn new(start: u32, end: u32) -> Self {
        assert!(start < end && end <= 256, "invalid bit window");
        Self { start, end }
    }

    /// A single-bit mask at position `bit`.
    pub const fn bit(bit: u32) -> Self {
        Self::new(bit, bit + 1)
    }

    /// The width of the window in bits.
    pub const fn width(&self) -> u32 {
        self.end - self.start
    }

    /// The mask itself, as a word with the window bits set.
    pub fn mask(&self) -> U256 {
        if self.width() == 256 {
            U256::MAX
        } else {
            ((U256::from(1) << self.width()) - U256::from(1)) << self.start
        }
    }

    /// Read the window out of `word`, shifted down to bit zero.
    pub fn get(&self, word: U256) -> U256 {
        (word & self.mask()) >> self.start
    }

    /// Write `value` into the window of `word`. Bits of `value` above the
    /// window width are discarded.
    pub fn set(&self, word: U256, value: U256) -> U256 {
        (word & !self.mask()) | ((value << self.start) & self.mask())
    }

    /// Whether any bit in the window is set.
    pub fn any_set(&self, word: U256) -> bool {
        word & self.mask() != U256::ZERO
    }
}

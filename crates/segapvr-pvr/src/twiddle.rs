//! Twiddled (Morton order) index computation.
//!
//! Two mappings live here and they are not interchangeable:
//!
//! - [`TwiddleTable::swizzled_position`] interleaves the low 10 bits of a
//!   block coordinate pair. It locates codebook indices in VQ textures.
//! - [`untwiddle_index`] walks the bit planes of a scan position against the
//!   texture's own width and height. It places texels of raw twiddled
//!   textures, including non-square ones.
//!
//! The two agree only for square power-of-two shapes.

use std::sync::LazyLock;

/// Number of precomputed entries in a [`TwiddleTable`].
pub const TWIDDLE_TABLE_SIZE: usize = 1024;

/// Bits of the input that [`untwiddle`] spreads.
const UNTWIDDLE_BITS: u32 = 10;

static GLOBAL_TABLE: LazyLock<TwiddleTable> = LazyLock::new(TwiddleTable::build);

/// Spread the low 10 bits of `value` so that bit `i` lands on bit `2i`.
///
/// Higher bits are dropped.
pub const fn untwiddle(value: u32) -> u32 {
    let mut untwiddled = 0;
    let mut i = 0;
    while i < UNTWIDDLE_BITS {
        let bit = 1 << i;
        if value & bit != 0 {
            untwiddled |= bit << i;
        }
        i += 1;
    }
    untwiddled
}

/// Precomputed [`untwiddle`] values for `0..TWIDDLE_TABLE_SIZE`.
#[derive(Clone)]
pub struct TwiddleTable {
    entries: [u32; TWIDDLE_TABLE_SIZE],
}

impl TwiddleTable {
    /// Compute a fresh table.
    pub fn build() -> Self {
        let mut entries = [0; TWIDDLE_TABLE_SIZE];
        for (value, entry) in entries.iter_mut().enumerate() {
            *entry = untwiddle(value as u32);
        }
        Self { entries }
    }

    /// The process-wide table, built on first use.
    #[inline]
    pub fn global() -> &'static Self {
        &GLOBAL_TABLE
    }

    /// Untwiddled value of `value`, from the table when it is in range.
    #[inline]
    pub fn get(&self, value: u32) -> u32 {
        match self.entries.get(value as usize) {
            Some(&entry) => entry,
            None => untwiddle(value),
        }
    }

    /// Storage position of block `(x, y)` in a twiddled index map.
    ///
    /// `y` occupies the even bits and `x` the odd bits of the result.
    #[inline]
    pub fn swizzled_position(&self, x: u32, y: u32) -> usize {
        (self.get(y) | self.get(x) << 1) as usize
    }
}

impl std::fmt::Debug for TwiddleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwiddleTable")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// Build the process-wide [`TwiddleTable`] now rather than on first decode.
///
/// Calling this more than once is harmless.
pub fn build_twiddle_table() -> &'static TwiddleTable {
    LazyLock::force(&GLOBAL_TABLE)
}

/// Destination offset, in texels, of scan position `position` in a raw
/// twiddled texture of the given shape.
///
/// Each bit plane takes one bit from the height dimension and then one from
/// the width dimension, for as long as that dimension still has bits left.
pub fn untwiddle_index(width: u16, height: u16, position: u32) -> u32 {
    let (mut w, mut h) = (width, height);
    let mut p = position;
    let mut ddx: u32 = 1;
    let mut ddy: u32 = width as u32;
    let mut q = 0;

    for _ in 0..16 {
        h >>= 1;
        if h != 0 {
            if p & 1 != 0 {
                q |= ddy;
            }
            p >>= 1;
        }
        ddy <<= 1;

        w >>= 1;
        if w != 0 {
            if p & 1 != 0 {
                q |= ddx;
            }
            p >>= 1;
        }
        ddx <<= 1;
    }

    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untwiddle_known_values() {
        assert_eq!(untwiddle(0), 0);
        assert_eq!(untwiddle(1), 1);
        assert_eq!(untwiddle(2), 4);
        assert_eq!(untwiddle(3), 5);
        assert_eq!(untwiddle(0x3FF), 0x55555);
    }

    #[test]
    fn test_untwiddle_drops_high_bits() {
        assert_eq!(untwiddle(1024), 0);
        assert_eq!(untwiddle(1025), 1);
    }

    #[test]
    fn test_table_matches_formula() {
        let table = TwiddleTable::build();
        for value in 0..TWIDDLE_TABLE_SIZE as u32 {
            assert_eq!(table.get(value), untwiddle(value));
        }
        assert_eq!(table.get(5000), untwiddle(5000));
    }

    #[test]
    fn test_global_table_is_shared() {
        let a = build_twiddle_table() as *const TwiddleTable;
        let b = TwiddleTable::global() as *const TwiddleTable;
        assert_eq!(a, b);
    }

    #[test]
    fn test_swizzled_position() {
        let table = TwiddleTable::build();
        assert_eq!(table.swizzled_position(0, 0), 0);
        assert_eq!(table.swizzled_position(0, 1), 1);
        assert_eq!(table.swizzled_position(1, 0), 2);
        assert_eq!(table.swizzled_position(1, 1), 3);
        assert_eq!(table.swizzled_position(2, 0), 8);
        // Out-of-table coordinates fall back to the formula.
        assert_eq!(
            table.swizzled_position(1024, 1),
            (untwiddle(1) | untwiddle(1024) << 1) as usize
        );
    }

    #[test]
    fn test_untwiddle_index_square() {
        // 2x2: scan order is (0,0) (0,1) (1,0) (1,1).
        assert_eq!(untwiddle_index(2, 2, 0), 0);
        assert_eq!(untwiddle_index(2, 2, 1), 2);
        assert_eq!(untwiddle_index(2, 2, 2), 1);
        assert_eq!(untwiddle_index(2, 2, 3), 3);
    }

    #[test]
    fn test_untwiddle_index_matches_table_for_square_pow2() {
        let table = TwiddleTable::build();
        let size = 16u32;
        for y in 0..size {
            for x in 0..size {
                let scan = table.swizzled_position(x, y) as u32;
                assert_eq!(untwiddle_index(16, 16, scan), y * size + x);
            }
        }
    }

    #[test]
    fn test_untwiddle_index_non_square_stays_in_bounds() {
        for (w, h) in [(8u16, 2u16), (2, 8), (4, 1), (3, 5)] {
            let len = w as u32 * h as u32;
            for p in 0..len {
                assert!(untwiddle_index(w, h, p) < len, "{w}x{h} at {p}");
            }
        }
    }

    #[test]
    fn test_untwiddle_index_wide_is_bijective() {
        let (w, h) = (8u16, 2u16);
        let mut seen = vec![false; 16];
        for p in 0..16 {
            let q = untwiddle_index(w, h, p) as usize;
            assert!(!seen[q]);
            seen[q] = true;
        }
    }
}

//! Ring position implementation.

use std::fmt;
use std::num::NonZeroU64;

/// A position on the consistent hash ring.
///
/// Positions are 1-based: a ring of size `n` has positions `1..=n` and
/// position 0 never occurs. Ordering is plain integer ordering; wrap-around is
/// handled by the lookup, not by the type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Position(pub u64);

impl Position {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The modular integer space positions live in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RingSpace {
    size: NonZeroU64,
}

impl RingSpace {
    pub fn new(size: NonZeroU64) -> Self {
        Self { size }
    }

    /// Number of positions on the ring.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size.get()
    }

    /// Reduce a digest into `1..=size`.
    #[inline]
    pub fn reduce(&self, digest: u128) -> Position {
        let offset = digest % u128::from(self.size.get());
        // offset < size, so offset + 1 fits in u64.
        Position(offset as u64 + 1)
    }

    /// Smallest position on the ring.
    pub fn min_position(&self) -> Position {
        Position(1)
    }

    /// Largest position on the ring.
    pub fn max_position(&self) -> Position {
        Position(self.size.get())
    }

    /// Number of positions in the clockwise arc `(from, to]`.
    ///
    /// `from == to` is the full circle.
    pub fn arc_len(&self, from: Position, to: Position) -> u64 {
        if to > from {
            to.0 - from.0
        } else {
            self.size.get() - (from.0 - to.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(n: u64) -> RingSpace {
        RingSpace::new(NonZeroU64::new(n).unwrap())
    }

    #[test]
    fn test_reduce_is_one_based() {
        let ring = space(360);
        assert_eq!(ring.reduce(0), Position(1));
        assert_eq!(ring.reduce(359), Position(360));
        assert_eq!(ring.reduce(360), Position(1));
        assert_eq!(ring.reduce(u128::MAX), Position((u128::MAX % 360) as u64 + 1));
    }

    #[test]
    fn test_reduce_single_slot_ring() {
        let ring = space(1);
        assert_eq!(ring.reduce(12345), Position(1));
        assert_eq!(ring.min_position(), ring.max_position());
    }

    #[test]
    fn test_reduce_full_width_ring() {
        let ring = space(u64::MAX);
        assert_eq!(ring.reduce(u128::from(u64::MAX) - 1), Position(u64::MAX));
    }

    #[test]
    fn test_arc_len_wraps() {
        let ring = space(360);
        assert_eq!(ring.arc_len(Position(10), Position(20)), 10);
        assert_eq!(ring.arc_len(Position(350), Position(10)), 20);
        assert_eq!(ring.arc_len(Position(42), Position(42)), 360);
    }
}

//! Squared offset lookup table
//!
//! The sweeps evaluate `(a - b)^2` for row and column offsets on every
//! pixel. The table holds the squares `0, 1, 4, 9, ...` built by adding
//! successive odd numbers, so the hot loops only index.

use std::ops::Index;

/// Table of squares indexed by offset, `table[i] == i * i`.
#[derive(Debug, Clone)]
pub struct SquaredDistanceLookup {
    squares: Vec<i32>,
}

impl SquaredDistanceLookup {
    /// Build a table with `size` entries (at least one).
    ///
    /// Entry `i` is `table[i - 1] + (2i - 1)`.
    pub fn build(size: usize) -> Self {
        let size = size.max(1);
        let mut squares = Vec::with_capacity(size);
        squares.push(0);
        for i in 1..size as i32 {
            let prev = squares[(i - 1) as usize];
            squares.push(prev + (2 * i - 1));
        }
        Self { squares }
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Square of an offset that may be negative
    #[inline]
    pub fn offset(&self, delta: i32) -> i32 {
        self.squares[delta.unsigned_abs() as usize]
    }
}

impl Index<usize> for SquaredDistanceLookup {
    type Output = i32;

    #[inline]
    fn index(&self, i: usize) -> &i32 {
        &self.squares[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matches_squares() {
        let table = SquaredDistanceLookup::build(64);
        assert_eq!(table.len(), 64);
        for i in 0..64 {
            assert_eq!(table[i], (i * i) as i32);
        }
    }

    #[test]
    fn test_build_minimum_size() {
        let table = SquaredDistanceLookup::build(0);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
        assert_eq!(table[0], 0);
    }

    #[test]
    fn test_negative_offset() {
        let table = SquaredDistanceLookup::build(10);
        assert_eq!(table.offset(-7), 49);
        assert_eq!(table.offset(7), 49);
    }
}

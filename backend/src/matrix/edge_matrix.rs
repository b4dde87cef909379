//! Dense square 0/1 matrix

use serde::{Deserialize, Serialize};

/// Square 0/1 matrix stored row-major.
///
/// For compatibility matrices the row is the patient (receiving)
/// participant and the column the donor (giving) participant.
///
/// Serializes as `{"size": n, "cells": [...]}` with `n * n` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMatrix {
    size: usize,
    cells: Vec<u8>,
}

impl EdgeMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// # Panics
    /// Panics if `row` or `col` is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[self.index(row, col)]
    }

    /// # Panics
    /// Panics if `row` or `col` is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        // chunks() rejects a zero chunk size
        self.cells.chunks(self.size.max(1)).take(self.size)
    }

    /// Row-major cells.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub fn to_nested(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }

    /// `(row, col)` of every non-zero cell, row-major.
    pub fn iter_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(move |(idx, _)| (idx / size, idx % size))
    }

    pub fn count_edges(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    pub fn is_zero_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.get(i, i) == 0)
    }

    /// Set every cell of the block `rows × cols` to `value`.
    pub fn fill_block(
        &mut self,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        value: u8,
    ) {
        for row in rows {
            for col in cols.clone() {
                self.set(row, col, value);
            }
        }
    }

    /// Elementwise product with `other`, in place.
    ///
    /// # Panics
    /// Panics if the sizes differ.
    pub fn mask_with(&mut self, other: &EdgeMatrix) {
        assert_eq!(self.size, other.size, "matrix sizes differ");
        for (cell, &mask) in self.cells.iter_mut().zip(&other.cells) {
            *cell *= mask;
        }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({}, {}) outside {}x{} matrix",
            row,
            col,
            self.size,
            self.size
        );
        row * self.size + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sized_matrix() {
        let m = EdgeMatrix::zeros(0);
        assert_eq!(m.rows().count(), 0);
        assert_eq!(m.count_edges(), 0);
        assert!(m.is_zero_diagonal());
    }

    #[test]
    fn test_fill_block_and_iter_edges() {
        let mut m = EdgeMatrix::zeros(3);
        m.fill_block(1..3, 0..1, 1);
        assert_eq!(m.iter_edges().collect::<Vec<_>>(), vec![(1, 0), (2, 0)]);
        assert_eq!(m.to_nested(), vec![vec![0, 0, 0], vec![1, 0, 0], vec![1, 0, 0]]);
    }

    #[test]
    fn test_mask_with() {
        let mut a = EdgeMatrix::zeros(2);
        a.fill_block(0..2, 0..2, 1);
        let mut b = EdgeMatrix::zeros(2);
        b.set(0, 1, 1);
        a.mask_with(&b);
        assert_eq!(a.count_edges(), 1);
        assert_eq!(a.get(0, 1), 1);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 matrix")]
    fn test_out_of_bounds_panics() {
        EdgeMatrix::zeros(2).get(2, 0);
    }
}

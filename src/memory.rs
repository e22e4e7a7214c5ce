// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! The unified code and data space of a simulation

use itertools::Itertools;
use std::fmt;
use std::ops::{Index, IndexMut};

use super::InterpreterError;

/// A fixed-length memory image.
///
/// The length is set when the memory is created and never changes afterwards. Every access made
/// on behalf of a running program goes through [`Memory::get`] or [`Memory::set`], which report
/// addresses outside of `0..len` as [`InterpreterError::OutOfBounds`] rather than panicking.
///
/// [`Index`] and [`IndexMut`] are also implemented for `usize`, and panic like slice indexing.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Memory {
    cells: Box<[i64]>,
}

impl Memory {
    /// Number of addressable cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether there are no addressable cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert `address` into an index, if it lies within `0..len`
    pub fn address(&self, address: i64) -> Result<usize, InterpreterError> {
        usize::try_from(address)
            .ok()
            .filter(|&i| i < self.cells.len())
            .ok_or(InterpreterError::OutOfBounds {
                address,
                len: self.cells.len(),
            })
    }

    /// Read the cell at `address`
    #[doc(alias = "peek")]
    pub fn get(&self, address: i64) -> Result<i64, InterpreterError> {
        self.address(address).map(|i| self.cells[i])
    }

    /// Overwrite the cell at `address` with `value`
    #[doc(alias = "poke")]
    pub fn set(&mut self, address: i64, value: i64) -> Result<(), InterpreterError> {
        let i = self.address(address)?;
        self.cells[i] = value;
        Ok(())
    }

    /// View the whole image as a slice
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }
}

impl From<Vec<i64>> for Memory {
    fn from(cells: Vec<i64>) -> Self {
        Self {
            cells: cells.into_boxed_slice(),
        }
    }
}

impl From<&[i64]> for Memory {
    fn from(cells: &[i64]) -> Self {
        Self {
            cells: Box::from(cells),
        }
    }
}

impl<const N: usize> From<[i64; N]> for Memory {
    fn from(cells: [i64; N]) -> Self {
        Self {
            cells: Box::new(cells),
        }
    }
}

impl std::iter::FromIterator<i64> for Memory {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Memory {
    type Item = i64;
    type IntoIter = std::vec::IntoIter<i64>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Memory {
    type Item = &'a i64;
    type IntoIter = std::slice::Iter<'a, i64>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl Index<usize> for Memory {
    type Output = i64;
    fn index(&self, i: usize) -> &i64 {
        &self.cells[i]
    }
}

impl IndexMut<usize> for Memory {
    fn index_mut(&mut self, i: usize) -> &mut i64 {
        &mut self.cells[i]
    }
}

impl PartialEq<[i64]> for Memory {
    fn eq(&self, other: &[i64]) -> bool {
        self.as_slice() == other
    }
}

impl<const N: usize> PartialEq<[i64; N]> for Memory {
    fn eq(&self, other: &[i64; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.cells.iter()).finish()
    }
}

/// Renders the same comma-separated form that [`parse_program`](crate::parse::parse_program)
/// reads
impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cells.iter().format(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_cell_is_addressable() {
        let mut mem = Memory::from([1, 2, 3]);
        assert_eq!(mem.get(2), Ok(3));
        assert_eq!(mem.set(2, 30), Ok(()));
        assert_eq!(mem, [1, 2, 30]);
    }

    #[test]
    fn out_of_range_addresses() {
        let mut mem = Memory::from([1, 2, 3]);
        assert_eq!(
            mem.get(3),
            Err(InterpreterError::OutOfBounds { address: 3, len: 3 })
        );
        assert_eq!(
            mem.set(-1, 0),
            Err(InterpreterError::OutOfBounds {
                address: -1,
                len: 3
            })
        );
        // failed writes leave memory alone
        assert_eq!(mem, [1, 2, 3]);
    }

    #[test]
    fn display_is_program_text() {
        let mem: Memory = [1, -9, 10, 3, 99].into_iter().collect();
        assert_eq!(mem.to_string(), "1,-9,10,3,99");
        assert_eq!(Memory::default().to_string(), "");
    }
}

//! Cell index newtype.
//!
//! Keeps grid cell positions apart from plain counts and offsets
//! (interior positions, face numbers, sample indices in a time series).

use std::fmt;
use std::ops::{Index, IndexMut};

/// Cell index in a 1D grid, counted from the first halo cell.
///
/// # Example
///
/// ```
/// use advect1d::types::CellIndex;
///
/// let cell = CellIndex::new(42);
/// assert_eq!(cell.get(), 42);
/// assert_eq!(cell.to_string(), "C42");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct CellIndex(usize);

impl CellIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw position in the field.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Next cell downstream in storage order.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Previous cell, saturating at the first halo cell.
    #[inline]
    pub fn prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

impl From<usize> for CellIndex {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<CellIndex> for usize {
    #[inline]
    fn from(cell: CellIndex) -> usize {
        cell.0
    }
}

// Vectors reach these through auto-deref
impl<T> Index<CellIndex> for [T] {
    type Output = T;
    #[inline]
    fn index(&self, cell: CellIndex) -> &T {
        &self[cell.0]
    }
}

impl<T> IndexMut<CellIndex> for [T] {
    #[inline]
    fn index_mut(&mut self, cell: CellIndex) -> &mut T {
        &mut self[cell.0]
    }
}

impl<T> Index<CellIndex> for Vec<T> {
    type Output = T;
    #[inline]
    fn index(&self, cell: CellIndex) -> &T {
        &self.as_slice()[cell]
    }
}

impl<T> IndexMut<CellIndex> for Vec<T> {
    #[inline]
    fn index_mut(&mut self, cell: CellIndex) -> &mut T {
        &mut self.as_mut_slice()[cell]
    }
}

//! Strongly-typed index types.
//!
//! Cell positions are wrapped in a newtype so they cannot be confused with
//! face positions, step counters or plain offsets.
//!
//! ```
//! use advect1d::types::CellIndex;
//!
//! let cell = CellIndex::new(3);
//! let values = vec![0.0, 1.0, 2.0, 3.0];
//! assert_eq!(values[cell], 3.0);
//! assert_eq!(cell.prev(), CellIndex::new(2));
//! ```

mod indices;

pub use indices::CellIndex;

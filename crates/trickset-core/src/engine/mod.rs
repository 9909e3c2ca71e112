//! The allocation engine. Pure functions over card counts; no I/O.

pub mod allocate;
pub mod sets;

pub use allocate::{AllocationResult, Allocator, TrickResult, distribute, fair_baseline};
pub use sets::{MAX_DECKS, SetCalculator, SetCount, compute, total_cards};

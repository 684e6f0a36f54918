//! Layout-shift qualification and aggregation.
//!
//! This module turns a tab's frame-tree events into:
//! - Narrowed layout-shift events (or an old-trace failure)
//! - The cumulative all-frames layout shift score

pub mod cumulative_shift;
pub mod layout_shift;

// Re-export main types and functions
pub use cumulative_shift::{sum_layout_shifts, CumulativeLayoutShift, CumulativeLayoutShiftAllFrames};
pub use layout_shift::{is_layout_shift_event, qualify_layout_shift, Qualification};

//! Tagged memory accounting for the Kestrel engine core.
//!
//! Engine subsystems attribute their allocations to a [`MemoryTag`] so that
//! [`MemoryMetrics::usage_report`] can answer "where did the memory go" at any
//! point in the process lifetime. Blocks are handed out as [`TaggedBlock`]
//! handles that remember their own size and tag, so releasing a block can
//! never decrement the wrong counter.

mod metrics;

pub use metrics::{MemoryMetrics, MemoryTag, TaggedBlock};

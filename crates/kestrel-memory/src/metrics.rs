//! Per-tag byte counters and the self-describing allocation handle.

use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, warn};

/// Allocation categories tracked by the accountant.
///
/// A closed set: subsystems pick the closest category rather than inventing
/// new ones. [`MemoryTag::Unknown`] is legal but flagged in the log so the
/// allocation gets re-classed eventually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum MemoryTag {
    Unknown,
    DynamicArray,
    Dictionary,
    RingBuffer,
    Tree,
    String,
    Application,
    Job,
    Texture,
    MaterialInstance,
    Renderer,
    Game,
    Transform,
    Entity,
    EntityNode,
    Scene,
}

impl MemoryTag {
    /// Number of tags, sizing the per-tag counter table.
    pub const COUNT: usize = 16;

    /// All tags in counter-table order, for report rendering.
    const ALL: [MemoryTag; Self::COUNT] = [
        MemoryTag::Unknown,
        MemoryTag::DynamicArray,
        MemoryTag::Dictionary,
        MemoryTag::RingBuffer,
        MemoryTag::Tree,
        MemoryTag::String,
        MemoryTag::Application,
        MemoryTag::Job,
        MemoryTag::Texture,
        MemoryTag::MaterialInstance,
        MemoryTag::Renderer,
        MemoryTag::Game,
        MemoryTag::Transform,
        MemoryTag::Entity,
        MemoryTag::EntityNode,
        MemoryTag::Scene,
    ];

    /// Fixed-width label used in the usage report.
    fn label(self) -> &'static str {
        match self {
            MemoryTag::Unknown => "UNKNOWN    ",
            MemoryTag::DynamicArray => "DARRAY     ",
            MemoryTag::Dictionary => "DICT       ",
            MemoryTag::RingBuffer => "RING_QUEUE ",
            MemoryTag::Tree => "BST        ",
            MemoryTag::String => "STRING     ",
            MemoryTag::Application => "APPLICATION",
            MemoryTag::Job => "JOB        ",
            MemoryTag::Texture => "TEXTURE    ",
            MemoryTag::MaterialInstance => "MAT_INST   ",
            MemoryTag::Renderer => "RENDERER   ",
            MemoryTag::Game => "GAME       ",
            MemoryTag::Transform => "TRANSFORM  ",
            MemoryTag::Entity => "ENTITY     ",
            MemoryTag::EntityNode => "ENTITY_NODE",
            MemoryTag::Scene => "SCENE      ",
        }
    }
}

/// Process-wide allocation counters: a running total plus one counter per
/// [`MemoryTag`].
///
/// Counters are atomics so a shared [`Arc<MemoryMetrics>`] handle can be
/// sprinkled across subsystems without locking. Invariant: the total equals
/// the sum of the per-tag counters at every observation point; both sides are
/// only ever adjusted together.
#[derive(Debug, Default)]
pub struct MemoryMetrics {
    total_allocated: AtomicU64,
    tagged_allocations: [AtomicU64; MemoryTag::COUNT],
}

impl MemoryMetrics {
    /// Creates a zeroed counter set behind a shared handle.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Allocates a zero-filled block of `size` bytes attributed to `tag`.
    ///
    /// The returned [`TaggedBlock`] remembers its size and tag and gives the
    /// bytes back to the counters when released. Allocation failure is not
    /// modeled; running out of memory aborts the process.
    #[must_use]
    pub fn allocate(self: &Arc<Self>, size: u64, tag: MemoryTag) -> TaggedBlock {
        if tag == MemoryTag::Unknown {
            warn!("allocate called with MemoryTag::Unknown; re-class this allocation");
        }

        self.add(size, tag);

        TaggedBlock {
            bytes: vec![0u8; size as usize].into_boxed_slice(),
            tag,
            metrics: Arc::clone(self),
        }
    }

    /// Total bytes currently allocated across all tags.
    #[must_use]
    pub fn total_allocated(&self) -> u64 {
        self.total_allocated.load(Ordering::Relaxed)
    }

    /// Bytes currently allocated under `tag`.
    #[must_use]
    pub fn allocated_for(&self, tag: MemoryTag) -> u64 {
        self.tagged_allocations[tag as usize].load(Ordering::Relaxed)
    }

    /// Renders the per-tag usage table.
    ///
    /// Each tag's byte count is shown with the largest unit (B, KiB, MiB,
    /// GiB) whose threshold it meets, to two decimal places.
    #[must_use]
    pub fn usage_report(&self) -> String {
        const GIB: u64 = 1024 * 1024 * 1024;
        const MIB: u64 = 1024 * 1024;
        const KIB: u64 = 1024;

        let mut out = String::from("System memory use (tagged):\n");
        for tag in MemoryTag::ALL {
            let bytes = self.allocated_for(tag);
            let (amount, unit) = if bytes >= GIB {
                (bytes as f64 / GIB as f64, "GiB")
            } else if bytes >= MIB {
                (bytes as f64 / MIB as f64, "MiB")
            } else if bytes >= KIB {
                (bytes as f64 / KIB as f64, "KiB")
            } else {
                (bytes as f64, "B")
            };
            let _ = writeln!(out, "  {}: {:.2}{}", tag.label(), amount, unit);
        }
        out
    }

    fn add(&self, size: u64, tag: MemoryTag) {
        self.total_allocated.fetch_add(size, Ordering::Relaxed);
        self.tagged_allocations[tag as usize].fetch_add(size, Ordering::Relaxed);
    }

    fn sub(&self, size: u64, tag: MemoryTag) {
        let result = self
            .total_allocated
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                current.checked_sub(size)
            });
        if result.is_err() {
            error!("total allocation counter underflowed releasing {size} bytes");
        }
        let result = self.tagged_allocations[tag as usize].fetch_update(
            Ordering::Relaxed,
            Ordering::Relaxed,
            |current| current.checked_sub(size),
        );
        if result.is_err() {
            error!("tag counter underflowed releasing {size} bytes ({tag:?})");
        }
    }
}

/// A zero-filled allocation that knows its own size and tag.
///
/// The block gives its bytes back to the owning [`MemoryMetrics`] when
/// released, either via [`free`](Self::free) or on drop, so the release can
/// never be mis-sized or mis-tagged.
#[derive(Debug)]
pub struct TaggedBlock {
    bytes: Box<[u8]>,
    tag: MemoryTag,
    metrics: Arc<MemoryMetrics>,
}

impl TaggedBlock {
    /// Size of the block in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// The category this block was attributed to at allocation.
    #[must_use]
    pub fn tag(&self) -> MemoryTag {
        self.tag
    }

    /// Read access to the block's contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable access to the block's contents.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Releases the block, returning its bytes to the counters. Equivalent to
    /// dropping it; spelled out for call sites that mirror an explicit
    /// allocate/free pairing.
    pub fn free(self) {}
}

impl Drop for TaggedBlock {
    fn drop(&mut self) {
        self.metrics.sub(self.bytes.len() as u64, self.tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_counts_total_and_tag() {
        let metrics = MemoryMetrics::new();
        let block = metrics.allocate(512, MemoryTag::Texture);
        assert_eq!(metrics.total_allocated(), 512);
        assert_eq!(metrics.allocated_for(MemoryTag::Texture), 512);
        assert_eq!(metrics.allocated_for(MemoryTag::Game), 0);
        drop(block);
    }

    #[test]
    fn test_block_is_zero_filled() {
        let metrics = MemoryMetrics::new();
        let block = metrics.allocate(64, MemoryTag::Application);
        assert!(block.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_release_restores_counters() {
        let metrics = MemoryMetrics::new();
        let before_total = metrics.total_allocated();
        let before_tag = metrics.allocated_for(MemoryTag::Entity);

        let blocks: Vec<_> = (0..8)
            .map(|i| metrics.allocate(128 + i, MemoryTag::Entity))
            .collect();
        assert!(metrics.total_allocated() > before_total);

        for block in blocks {
            block.free();
        }
        assert_eq!(metrics.total_allocated(), before_total);
        assert_eq!(metrics.allocated_for(MemoryTag::Entity), before_tag);
    }

    #[test]
    fn test_total_equals_sum_of_tags() {
        let metrics = MemoryMetrics::new();
        let _a = metrics.allocate(100, MemoryTag::Renderer);
        let _b = metrics.allocate(200, MemoryTag::Game);
        let _c = metrics.allocate(300, MemoryTag::Scene);

        let sum: u64 = MemoryTag::ALL
            .iter()
            .map(|&t| metrics.allocated_for(t))
            .sum();
        assert_eq!(metrics.total_allocated(), sum);
    }

    #[test]
    fn test_block_remembers_size_and_tag() {
        let metrics = MemoryMetrics::new();
        let block = metrics.allocate(42, MemoryTag::Job);
        assert_eq!(block.size(), 42);
        assert_eq!(block.tag(), MemoryTag::Job);
    }

    #[test]
    fn test_unknown_tag_still_succeeds() {
        let metrics = MemoryMetrics::new();
        let block = metrics.allocate(16, MemoryTag::Unknown);
        assert_eq!(metrics.allocated_for(MemoryTag::Unknown), 16);
        drop(block);
        assert_eq!(metrics.allocated_for(MemoryTag::Unknown), 0);
    }

    #[test]
    fn test_usage_report_units() {
        let metrics = MemoryMetrics::new();
        let _b = metrics.allocate(512, MemoryTag::String);
        let _kib = metrics.allocate(2 * 1024, MemoryTag::Texture);
        let _mib = metrics.allocate(3 * 1024 * 1024, MemoryTag::Renderer);

        let report = metrics.usage_report();
        assert!(report.contains("STRING     : 512.00B"), "{report}");
        assert!(report.contains("TEXTURE    : 2.00KiB"), "{report}");
        assert!(report.contains("RENDERER   : 3.00MiB"), "{report}");
    }

    #[test]
    fn test_usage_report_lists_every_tag() {
        let metrics = MemoryMetrics::new();
        let report = metrics.usage_report();
        // Header plus one line per tag.
        assert_eq!(report.lines().count(), 1 + MemoryTag::COUNT);
    }

    #[test]
    fn test_writable_contents() {
        let metrics = MemoryMetrics::new();
        let mut block = metrics.allocate(4, MemoryTag::Game);
        block.bytes_mut().copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(block.bytes(), &[1, 2, 3, 4]);
    }
}

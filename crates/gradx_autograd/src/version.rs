use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

/// Mutation epoch of one storage. Every view of that storage holds a clone of
/// the same counter; `set_data` deliberately does not adopt the source's
/// counter, so a variable keeps its own lineage afterwards.
///
/// The atomic only makes sharing across threads sound; a single variable is
/// not expected to be mutated concurrently without external synchronization,
/// so relaxed ordering is enough.
#[derive(Clone, Debug)]
pub struct VersionCounter {
    epoch: Arc<AtomicU32>,
}

impl VersionCounter {
    pub fn new() -> Self {
        Self {
            epoch: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn current(&self) -> u32 {
        self.epoch.load(Ordering::Relaxed)
    }

    pub fn bump(&self) {
        self.epoch.fetch_add(1, Ordering::Relaxed);
    }

    pub fn shares_with(&self, other: &VersionCounter) -> bool {
        Arc::ptr_eq(&self.epoch, &other.epoch)
    }
}

impl Default for VersionCounter {
    fn default() -> Self {
        Self::new()
    }
}

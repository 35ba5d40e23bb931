//! Bounded cache of open per-topic file handles.

use std::fs::File;

/// Number of cache slots, and therefore the hard ceiling on
/// simultaneously open per-topic handles regardless of how many distinct
/// topics a process ever emits.
pub const CACHE_SLOTS: usize = 64;

/// One occupied cache slot.
#[derive(Debug)]
struct Slot {
    topic: String,
    file: File,
    uses: u64,
}

/// Fixed-capacity map from topic name to an open append handle.
///
/// Lookup is a linear scan over the slot array. When every slot is
/// occupied, inserting a new topic evicts the entry with the fewest
/// lookups (lowest index on ties) and closes its handle. Heavily used
/// topics stay resident; rare ones pay a reopen instead of a descriptor.
///
/// The cache owns every handle it stores: eviction, [`remove`] and
/// [`clear`] close by dropping the [`File`], and closing never reports an
/// error.
///
/// [`remove`]: Self::remove
/// [`clear`]: Self::clear
#[derive(Debug)]
pub struct HandleCache {
    slots: [Option<Slot>; CACHE_SLOTS],
}

impl HandleCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Look up the handle for `topic`, bumping its use counter on a hit.
    pub fn get(&mut self, topic: &str) -> Option<&File> {
        let slot = self
            .slots
            .iter_mut()
            .flatten()
            .find(|slot| slot.topic == topic)?;
        slot.uses += 1;
        Some(&slot.file)
    }

    /// Install `file` under `topic` and return the stored handle.
    ///
    /// A slot already holding `topic` has its handle replaced in place,
    /// keeping the use counter; the replaced handle is closed. Otherwise
    /// the first free slot is taken, or the least-used occupied slot is
    /// evicted. The counter of a new entry starts at zero.
    pub fn insert(&mut self, topic: &str, file: File) -> Option<&File> {
        let index = self.target_index(topic);
        let entry = self.slots.get_mut(index)?;
        match entry.take() {
            Some(mut slot) if slot.topic == topic => {
                slot.file = file;
                *entry = Some(slot);
            }
            evicted => {
                if let Some(old) = &evicted {
                    tracing::debug!(
                        closed = %old.topic,
                        opened = topic,
                        "handle cache full, evicting least-used entry"
                    );
                }
                drop(evicted);
                *entry = Some(Slot {
                    topic: topic.to_string(),
                    file,
                    uses: 0,
                });
            }
        }
        entry.as_ref().map(|slot| &slot.file)
    }

    /// Close and free the slot holding `topic`, if any.
    pub fn remove(&mut self, topic: &str) {
        for entry in &mut self.slots {
            if entry.as_ref().is_some_and(|slot| slot.topic == topic) {
                *entry = None;
                return;
            }
        }
    }

    /// Close and free every occupied slot.
    pub fn clear(&mut self) {
        for entry in &mut self.slots {
            *entry = None;
        }
    }

    /// Pick the slot `insert` should use: an existing entry for `topic`
    /// first, then the first free slot, then the least-used occupied slot
    /// (lowest index on ties).
    fn target_index(&self, topic: &str) -> usize {
        if let Some(index) = self
            .slots
            .iter()
            .position(|entry| entry.as_ref().is_some_and(|slot| slot.topic == topic))
        {
            return index;
        }
        if let Some(index) = self.slots.iter().position(Option::is_none) {
            return index;
        }
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.as_ref().map(|slot| (index, slot.uses)))
            .min_by_key(|&(_, uses)| uses)
            .map_or(0, |(index, _)| index)
    }

    /// Number of occupied slots (test instrumentation).
    #[cfg(test)]
    fn occupied(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Whether `topic` is resident, without bumping its counter.
    #[cfg(test)]
    fn contains(&self, topic: &str) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|slot| slot.topic == topic)
    }

    /// Use counter for `topic`, without bumping it.
    #[cfg(test)]
    fn uses(&self, topic: &str) -> Option<u64> {
        self.slots
            .iter()
            .flatten()
            .find(|slot| slot.topic == topic)
            .map(|slot| slot.uses)
    }
}

impl Default for HandleCache {
    fn default() -> Self {
        Self::new()
    }
}

//! Lap records and the split slot layout

use serde::{Deserialize, Serialize};

/// Number of split slots in a lap record (A, B, C, D, Final)
pub const SPLIT_SLOTS: usize = 5;

/// Slot a split time is written into
///
/// Checkpoints 1..=4 in traversal order fill A..D; the segment that ends on
/// the start/finish line fills `Final`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SplitSlot {
    A,
    B,
    C,
    D,
    Final,
}

impl SplitSlot {
    /// All slots in storage order
    pub const ALL: [SplitSlot; SPLIT_SLOTS] =
        [SplitSlot::A, SplitSlot::B, SplitSlot::C, SplitSlot::D, SplitSlot::Final];

    /// Storage index of this slot
    pub fn index(self) -> usize {
        match self {
            SplitSlot::A => 0,
            SplitSlot::B => 1,
            SplitSlot::C => 2,
            SplitSlot::D => 3,
            SplitSlot::Final => 4,
        }
    }

    /// Slot for a storage index, `None` when out of range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Slot recorded when the checkpoint at `registry_index` is crossed
    ///
    /// Index 0 is the start/finish line and closes the lap.
    pub fn for_checkpoint_index(registry_index: usize) -> Option<Self> {
        match registry_index {
            0 => Some(SplitSlot::Final),
            1..=4 => Self::from_index(registry_index - 1),
            _ => None,
        }
    }

    /// Display label used by split boards
    pub fn label(self) -> &'static str {
        match self {
            SplitSlot::A => "A",
            SplitSlot::B => "B",
            SplitSlot::C => "C",
            SplitSlot::D => "D",
            SplitSlot::Final => "E",
        }
    }
}

/// Split times of a single lap
///
/// The splits are the only stored data: [`LapRecord::total_ms`] is derived
/// from them, so a finalized record's total always equals the sum of its splits.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapRecord {
    splits: [u64; SPLIT_SLOTS],
}

impl LapRecord {
    /// Zeroed record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from explicit split values
    pub fn from_splits(splits: [u64; SPLIT_SLOTS]) -> Self {
        Self { splits }
    }

    /// Split time in `slot`, zero when unset
    pub fn split(&self, slot: SplitSlot) -> u64 {
        self.splits[slot.index()]
    }

    /// All split times in slot order
    pub fn splits(&self) -> &[u64; SPLIT_SLOTS] {
        &self.splits
    }

    /// Lap time: the sum of all splits, saturating like the lap timer
    pub fn total_ms(&self) -> u64 {
        self.splits.iter().fold(0, |acc, split| acc.saturating_add(*split))
    }

    pub(crate) fn set_split(&mut self, slot: SplitSlot, value_ms: u64) {
        self.splits[slot.index()] = value_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn checkpoint_index_maps_to_slots() {
        assert_eq!(SplitSlot::for_checkpoint_index(0), Some(SplitSlot::Final));
        assert_eq!(SplitSlot::for_checkpoint_index(1), Some(SplitSlot::A));
        assert_eq!(SplitSlot::for_checkpoint_index(4), Some(SplitSlot::D));
        assert_eq!(SplitSlot::for_checkpoint_index(5), None);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let record = LapRecord::from_splits([u64::MAX / 2, u64::MAX / 2, 0, 0, u64::MAX / 2]);
        assert_eq!(record.total_ms(), u64::MAX);
    }

    #[test]
    fn labels_follow_board_layout() {
        let labels: Vec<_> = SplitSlot::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["A", "B", "C", "D", "E"]);
    }

    proptest! {
        #[test]
        fn total_is_sum_of_splits(splits in prop::array::uniform5(0u64..600_000)) {
            let mut record = LapRecord::new();
            for (slot, value) in SplitSlot::ALL.iter().zip(splits) {
                record.set_split(*slot, value);
            }
            prop_assert_eq!(record.total_ms(), splits.iter().sum::<u64>());
            prop_assert_eq!(record, LapRecord::from_splits(splits));
        }

        #[test]
        fn slot_index_roundtrip(index in 0usize..16) {
            match SplitSlot::from_index(index) {
                Some(slot) => prop_assert_eq!(slot.index(), index),
                None => prop_assert!(index >= SPLIT_SLOTS),
            }
        }
    }
}

//! Ordered checkpoint registry
//!
//! The registry is the required traversal order of a lap. Index 0 is always
//! the start/finish line and the order is cyclic: after the last checkpoint
//! the next expected one is the start/finish line again.

use std::collections::HashSet;

use crate::types::{Checkpoint, CheckpointId, SPLIT_SLOTS, START_FINISH};
use crate::{RaceError, Result};

/// Validated, immutable traversal order of a track
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointRegistry {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointRegistry {
    /// Validate and build a registry
    ///
    /// # Errors
    ///
    /// - [`RaceError::EmptyRegistry`] for an empty list
    /// - [`RaceError::MissingStartFinish`] when the first entry is not id 0
    /// - [`RaceError::DuplicateCheckpoint`] when an id repeats
    /// - [`RaceError::TooManyCheckpoints`] when there are more checkpoints than split slots
    pub fn new(checkpoints: Vec<Checkpoint>) -> Result<Self> {
        let first = checkpoints.first().ok_or(RaceError::EmptyRegistry)?;
        if first.id != START_FINISH {
            return Err(RaceError::missing_start_finish(first.id));
        }
        if checkpoints.len() > SPLIT_SLOTS {
            return Err(RaceError::TooManyCheckpoints {
                count: checkpoints.len(),
                max: SPLIT_SLOTS,
            });
        }

        let mut seen = HashSet::with_capacity(checkpoints.len());
        for checkpoint in &checkpoints {
            if !seen.insert(checkpoint.id) {
                return Err(RaceError::DuplicateCheckpoint { id: checkpoint.id });
            }
        }

        Ok(Self { checkpoints })
    }

    /// Registry from bare ids, without respawn transforms
    pub fn from_ids(ids: impl IntoIterator<Item = CheckpointId>) -> Result<Self> {
        Self::new(ids.into_iter().map(Checkpoint::new).collect())
    }

    /// Number of checkpoints, start/finish included
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Always false for a validated registry
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Checkpoint at a traversal index
    pub fn get(&self, index: usize) -> Option<&Checkpoint> {
        self.checkpoints.get(index)
    }

    /// Id at a traversal index
    pub fn id_at(&self, index: usize) -> Option<CheckpointId> {
        self.get(index).map(|c| c.id)
    }

    /// Traversal index of a checkpoint id
    pub fn position(&self, id: CheckpointId) -> Option<usize> {
        self.checkpoints.iter().position(|c| c.id == id)
    }

    /// Checkpoint with the given id
    pub fn find(&self, id: CheckpointId) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.id == id)
    }

    /// Whether the id belongs to this track
    pub fn contains(&self, id: CheckpointId) -> bool {
        self.position(id).is_some()
    }

    /// Index following `index` in the cyclic order
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.checkpoints.len()
    }

    /// The start/finish checkpoint
    pub fn start_finish(&self) -> &Checkpoint {
        &self.checkpoints[0]
    }

    /// Checkpoints in traversal order
    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }
}

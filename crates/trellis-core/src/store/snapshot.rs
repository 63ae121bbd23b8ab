//! Snapshot - the immutable view of the store handed to listeners.

use std::rc::Rc;

use serde::{Serialize, Serializer};

use crate::domain::{ProjectId, ProjectRecord, ProjectStatus};

/// An owned copy of the record sequence at one instant.
///
/// Every listener in one notification round receives the same `Rc`, so the
/// copy is made once per round. Records inside cannot be mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    records: Rc<[ProjectRecord]>,
}

impl Snapshot {
    pub(crate) fn new(records: &[ProjectRecord]) -> Self {
        Self {
            records: Rc::from(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn get(&self, id: &ProjectId) -> Option<&ProjectRecord> {
        self.records.iter().find(|p| p.id == *id)
    }

    /// Records in the given partition, in insertion order.
    pub fn with_status(&self, status: ProjectStatus) -> Vec<ProjectRecord> {
        self.records
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> BoardCounts {
        let mut counts = BoardCounts::default();
        for p in self.records.iter() {
            match p.status {
                ProjectStatus::Active => counts.active += 1,
                ProjectStatus::Finished => counts.finished += 1,
            }
        }
        counts
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardCounts {
    pub active: usize,
    pub finished: usize,
}

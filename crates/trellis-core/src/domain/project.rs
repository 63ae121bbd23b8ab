//! Project record: the one entity the tracker stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProjectId, ProjectStatus};

/// A project card.
///
/// Identity is `id`. The store owns the canonical copy; everything else sees
/// records through a [`Snapshot`](crate::store::Snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub people: u32,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// New records always start out active.
    pub fn new(
        id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            people,
            status: ProjectStatus::Active,
            created_at,
        }
    }

    /// "1 person" / "{n} people".
    pub fn people_label(&self) -> String {
        people_label(self.people)
    }
}

pub fn people_label(count: u32) -> String {
    if count == 1 {
        "1 person".to_string()
    } else {
        format!("{count} people")
    }
}

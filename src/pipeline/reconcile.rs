//! Change detection between the current listing and the last snapshot.
//!
//! Classification is by id-set membership only. A directive whose title text
//! is edited while its URL stays the same is not new, and reordering the
//! listing never triggers a publish.

use crate::models::{DirectiveRecord, Snapshot};

/// Maximum number of items placed in a published feed.
pub const MAX_FEED_ITEMS: usize = 25;

/// Classification of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No known ids in the previous snapshot
    FirstRun,
    /// Every current id was already known
    Unchanged,
    /// Current records whose id is absent from the snapshot, in listing order
    Updated(Vec<DirectiveRecord>),
}

impl RunOutcome {
    /// Whether this outcome publishes a feed and replaces the snapshot.
    pub fn publishes(&self) -> bool {
        !matches!(self, RunOutcome::Unchanged)
    }

    /// Records to hand to the feed publisher, capped at `max_items`.
    ///
    /// Returns `None` when nothing should be published.
    pub fn publish_set<'a>(
        &'a self,
        current: &'a [DirectiveRecord],
        max_items: usize,
    ) -> Option<&'a [DirectiveRecord]> {
        let records = match self {
            RunOutcome::FirstRun => current,
            RunOutcome::Updated(delta) => delta.as_slice(),
            RunOutcome::Unchanged => return None,
        };
        Some(&records[..records.len().min(max_items)])
    }

    /// Short label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            RunOutcome::FirstRun => "first run",
            RunOutcome::Unchanged => "unchanged",
            RunOutcome::Updated(_) => "updated",
        }
    }
}

/// Compare the current listing against the previous snapshot.
pub fn reconcile(current: &[DirectiveRecord], previous: &Snapshot) -> RunOutcome {
    let previous_ids = previous.ids();
    if previous_ids.is_empty() {
        return RunOutcome::FirstRun;
    }

    let delta: Vec<DirectiveRecord> = current
        .iter()
        .filter(|r| !previous_ids.contains(r.id.as_str()))
        .cloned()
        .collect();

    if delta.is_empty() {
        RunOutcome::Unchanged
    } else {
        RunOutcome::Updated(delta)
    }
}

//! In-memory download queue state machine.
//!
//! The queue is an ordered list of [`DownloadItem`]s, newest first. All
//! mutation happens through [`DownloadQueue::tick`], which the runner calls
//! on a fixed cadence; the tick takes the current instant as an argument so
//! the state machine is testable without timers.
//!
//! Per tick: completed items past their retention window are evicted, the
//! active (Downloading) item if any is advanced to Completed - simulated,
//! progress jumps straight to 100 - and the download slot is refilled by
//! promoting the oldest Queued item. At most one item occupies the slot at
//! any time. Promotion of an item with no direct resource URL routes it to
//! Error instead; errored items stay in the list and are never evicted.

mod item;

pub use item::{DownloadItem, DownloadStatus};

use std::time::{Duration, Instant};

use tracing::debug;

/// Cadence at which the runner drives [`DownloadQueue::tick`].
pub const TICK_INTERVAL: Duration = Duration::from_millis(800);

/// How long a completed item stays visible in the active list.
pub const COMPLETED_RETENTION: Duration = Duration::from_secs(4);

/// Speed label shown while an item finishes in the active list. The copy
/// surfaced on completion carries an empty label instead.
const COMPLETE_SPEED_LABEL: &str = "Complete!";

/// Label stored on items that cannot be serviced.
const NO_RESOURCE_URL_LABEL: &str = "No direct download link";

/// Result of a single queue tick.
#[derive(Debug, Default, Clone)]
pub struct TickOutcome {
    /// The item that reached Completed on this tick, if any. Surfaced
    /// exactly once per item; the copy carries a cleared speed label.
    pub completed: Option<DownloadItem>,
    /// Ids evicted from the active list on this tick.
    pub evicted: Vec<String>,
}

/// Ordered in-memory list of download requests with a single active slot.
#[derive(Debug, Default)]
pub struct DownloadQueue {
    items: Vec<DownloadItem>,
    /// Completion instants for retention tracking, parallel to item ids.
    completed_at: Vec<(String, Instant)>,
    retention: Duration,
}

impl DownloadQueue {
    /// Creates an empty queue with the default completed-item retention.
    #[must_use]
    pub fn new() -> Self {
        Self::with_retention(COMPLETED_RETENTION)
    }

    /// Creates an empty queue with a custom retention window (test seam).
    #[must_use]
    pub fn with_retention(retention: Duration) -> Self {
        Self {
            items: Vec::new(),
            completed_at: Vec::new(),
            retention,
        }
    }

    /// Adds a new item at the front of the list (most-recent-first order).
    pub fn enqueue(&mut self, item: DownloadItem) {
        debug!(id = %item.id, "enqueued download item");
        self.items.insert(0, item);
    }

    /// Current active list, newest first.
    #[must_use]
    pub fn items(&self) -> &[DownloadItem] {
        &self.items
    }

    /// True when no item can make further progress: nothing Queued,
    /// Downloading, or awaiting eviction.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.items
            .iter()
            .all(|item| item.status == DownloadStatus::Error)
    }

    /// Advances the state machine by one step.
    ///
    /// Eviction runs first, then the active item (if any) completes, then
    /// the slot is refilled from the Queued set, oldest first.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let evicted = self.evict_expired(now);
        let completed = self.complete_active(now);
        self.promote_next();
        TickOutcome { completed, evicted }
    }

    /// Flips the active item to Completed and returns the copy surfaced to
    /// the caller (with the cleared speed label, as recorded downstream).
    fn complete_active(&mut self, now: Instant) -> Option<DownloadItem> {
        let active = self
            .items
            .iter_mut()
            .find(|item| item.status == DownloadStatus::Downloading)?;

        active.progress = 100;
        active.status = DownloadStatus::Completed;
        active.speed = COMPLETE_SPEED_LABEL.to_string();
        self.completed_at.push((active.id.clone(), now));
        debug!(id = %active.id, "download item completed");

        let mut copy = active.clone();
        copy.speed = String::new();
        Some(copy)
    }

    /// Promotes the oldest Queued item into the download slot, or routes it
    /// to Error when it has no direct resource URL. No-op while an item is
    /// Downloading.
    fn promote_next(&mut self) {
        if self
            .items
            .iter()
            .any(|item| item.status == DownloadStatus::Downloading)
        {
            return;
        }

        // The list is newest first; scanning from the back services the
        // oldest queued request first.
        let Some(next) = self
            .items
            .iter_mut()
            .rev()
            .find(|item| item.status == DownloadStatus::Queued)
        else {
            return;
        };

        if next.resource_url.is_none() {
            next.status = DownloadStatus::Error;
            next.speed = NO_RESOURCE_URL_LABEL.to_string();
            debug!(id = %next.id, "download item has no resource URL, routing to error");
        } else {
            next.status = DownloadStatus::Downloading;
            debug!(id = %next.id, "download item promoted to active slot");
        }
    }

    /// Removes completed items whose retention window has elapsed.
    /// Independent per item; does not block queue progress.
    fn evict_expired(&mut self, now: Instant) -> Vec<String> {
        let mut evicted = Vec::new();
        self.completed_at.retain(|(id, completed_at)| {
            if now.duration_since(*completed_at) >= self.retention {
                evicted.push(id.clone());
                false
            } else {
                true
            }
        });
        if !evicted.is_empty() {
            self.items.retain(|item| !evicted.contains(&item.id));
            debug!(count = evicted.len(), "evicted completed download items");
        }
        evicted
    }
}

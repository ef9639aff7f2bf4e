//! The sweep's priority queue of events.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::geom::Location;
use crate::segments::{compare_segments, EventIdx, EventVec, SegmentShape, Segments};

// The ordering data of an event, snapshotted when it was queued. Splitting
// can change a segment's right endpoint while its left event is queued, so
// the snapshot is what the set is actually sorted by.
#[derive(Clone, Copy, Debug)]
struct QueueKey {
    point: Location,
    is_left: bool,
    shape: SegmentShape,
    event: EventIdx,
}

impl QueueKey {
    fn new(segs: &Segments, event: EventIdx) -> Self {
        let ev = &segs[event];
        QueueKey {
            point: ev.point,
            is_left: ev.is_left,
            shape: segs.shape(ev.segment),
            event,
        }
    }
}

impl PartialEq for QueueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueKey {}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueKey {
    // By point, then right events before left events, then by the segments'
    // vertical order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.point
            .cmp(&other.point)
            .then(self.is_left.cmp(&other.is_left))
            .then_with(|| compare_segments(&self.shape, &other.shape))
            .then(self.event.cmp(&other.event))
    }
}

/// Pending sweep events, in processing order.
///
/// Each event is queued at most once. Pushing an event that is already
/// queued moves it to the position given by its current geometry.
#[derive(Debug, Default)]
pub struct EventQueue {
    set: BTreeSet<QueueKey>,
    keys: EventVec<Option<QueueKey>>,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of queued events.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Queues an event, or re-queues it if it was already there.
    pub fn push(&mut self, segs: &Segments, event: EventIdx) {
        if self.keys.len() < segs.num_events() {
            self.keys.resize(segs.num_events(), None);
        }
        if let Some(old) = self.keys[event].take() {
            self.remove_key(&old);
        }
        let key = QueueKey::new(segs, event);
        self.keys[event] = Some(key);
        self.set.insert(key);
    }

    /// Removes an event from the queue, returning whether it was queued.
    pub fn remove(&mut self, event: EventIdx) -> bool {
        if event.0 >= self.keys.len() {
            return false;
        }
        match self.keys[event].take() {
            Some(key) => {
                self.remove_key(&key);
                true
            }
            None => false,
        }
    }

    /// Is this event currently queued?
    #[cfg(test)]
    pub fn contains(&self, event: EventIdx) -> bool {
        event.0 < self.keys.len() && self.keys[event].is_some()
    }

    /// Takes the next event to process.
    pub fn pop(&mut self) -> Option<EventIdx> {
        let key = self.set.pop_first()?;
        self.keys[key.event] = None;
        Some(key.event)
    }

    fn remove_key(&mut self, key: &QueueKey) {
        if !self.set.remove(key) {
            // The segment comparison isn't perfectly transitive on
            // nearly-degenerate input, so the lookup can miss.
            let event = key.event;
            self.set.retain(|k| k.event != event);
        }
    }
}

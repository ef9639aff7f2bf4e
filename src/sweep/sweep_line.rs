//! The sweep loop: pops events, maintains the sweep status, and splits
//! segments at the intersections it finds between neighbors.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::config::Config;
use crate::geom::Location;
use crate::rounder::PtRounder;
use crate::segments::{compare_segments, EventIdx, SegIdx, SegVec, Segments, SweepEvent};
use crate::treevec::TreeVec;
use crate::Error;

use super::EventQueue;

/// What the sweep leaves behind for classification and output.
#[derive(Clone, Debug)]
pub struct SweepOutcome {
    /// All segments, split at every intersection, with coincident ones merged.
    pub segments: Segments,
    /// Every segment that made it into the sweep status, in the order it was
    /// first inserted there. This is the order output rings are traced in.
    pub processed: Vec<SegIdx>,
}

/// Runs the sweep over `segments`.
///
/// Intersection points get rounded with `rounder`, which must be the one the
/// input coordinates went through.
pub fn sweep(
    segments: Segments,
    rounder: &mut PtRounder,
    config: &Config,
) -> Result<SweepOutcome, Error> {
    let mut line = SweepLine::new(segments, rounder, config);
    line.run()?;
    Ok(SweepOutcome {
        segments: line.segs,
        processed: line.processed,
    })
}

struct SweepLine<'a> {
    segs: Segments,
    // The segments crossing the sweep line, bottom to top.
    status: TreeVec<SegIdx, 128>,
    queue: EventQueue,
    rounder: &'a mut PtRounder,
    config: &'a Config,
    processed: Vec<SegIdx>,
    was_processed: SegVec<bool>,
    splits: usize,
}

impl<'a> SweepLine<'a> {
    fn new(segs: Segments, rounder: &'a mut PtRounder, config: &'a Config) -> Self {
        SweepLine {
            segs,
            status: TreeVec::new(),
            queue: EventQueue::new(),
            rounder,
            config,
            processed: Vec::new(),
            was_processed: SegVec::default(),
            splits: 0,
        }
    }

    fn run(&mut self) -> Result<(), Error> {
        let initial: Vec<SegIdx> = self.segs.indices().collect();
        for seg in initial {
            if !self.segs.is_consumed(seg) {
                self.queue.push(&self.segs, self.segs[seg].left);
                self.queue.push(&self.segs, self.segs[seg].right);
            }
        }
        debug!(
            segments = self.segs.len(),
            events = self.queue.len(),
            "starting sweep"
        );
        self.check_queue_size()?;

        let mut steps = 0usize;
        while let Some(ev) = self.queue.pop() {
            steps += 1;
            let requeue = self.process(ev)?;
            for e in requeue {
                if !self.segs.is_consumed(self.segs[e].segment) {
                    self.queue.push(&self.segs, e);
                }
            }
            self.check_queue_size()?;
            if self.status.len() > self.config.max_sweep_line_segments {
                return Err(Error::LimitExceeded {
                    what: "sweep line segments",
                    limit: self.config.max_sweep_line_segments,
                });
            }
            self.check_invariants();
        }

        debug!(
            steps,
            splits = self.splits,
            segments = self.segs.len(),
            processed = self.processed.len(),
            "sweep finished"
        );
        Ok(())
    }

    fn check_queue_size(&self) -> Result<(), Error> {
        if self.queue.len() > self.config.max_queue_size {
            return Err(Error::LimitExceeded {
                what: "event queue",
                limit: self.config.max_queue_size,
            });
        }
        Ok(())
    }

    /// Handles one event, returning the events that need to be (re)queued.
    fn process(&mut self, ev: EventIdx) -> Result<Vec<EventIdx>, Error> {
        let SweepEvent {
            point,
            is_left,
            segment: seg,
        } = self.segs[ev];
        trace!(?ev, ?point, is_left, ?seg, "processing event");

        if self.segs.is_consumed(seg) {
            if is_left {
                self.queue.remove(self.segs[seg].right);
            } else {
                self.remove_from_status(seg);
            }
            return Ok(Vec::new());
        }

        let pos = if is_left {
            self.insert_into_status(seg)
        } else {
            let Some(pos) = self.status_position(seg) else {
                trace!(?seg, "right event for a segment not on the sweep line, discarding");
                return Ok(Vec::new());
            };
            pos
        };
        let prev = self.neighbor_below(pos);
        let next = self.neighbor_above(pos);

        let mut requeue = Vec::new();
        if is_left {
            // Points where `seg` itself has to be split. Only the first one in
            // sweep order matters; the rest get found again later.
            let mut splitters = Vec::new();
            for other in [prev, next].into_iter().flatten() {
                let Some(p) = self.segs.intersection(other, seg, self.rounder) else {
                    continue;
                };
                if !self.segs.is_endpoint(seg, p) {
                    splitters.push(p);
                }
                if !self.segs.is_endpoint(other, p) {
                    requeue.extend(self.split_in_status(other, p));
                }
            }

            if let Some(p) = splitters.into_iter().min() {
                if !self.segs.is_consumed(seg) && !self.segs.is_endpoint(seg, p) {
                    self.queue.remove(self.segs[seg].right);
                    requeue.extend(self.split(seg, p));
                }
            }

            if !requeue.is_empty() {
                // The geometry changed, so the insertion position might be
                // stale. Try again from scratch.
                self.remove_from_status(seg);
                requeue.push(ev);
            } else {
                self.segs.set_prev(seg, prev);
                if self.was_processed.len() < self.segs.len() {
                    self.was_processed.resize(self.segs.len(), false);
                }
                if !self.was_processed[seg] {
                    self.was_processed[seg] = true;
                    self.processed.push(seg);
                }
            }
        } else {
            if let (Some(prev), Some(next)) = (prev, next) {
                if let Some(p) = self.segs.intersection(prev, next, self.rounder) {
                    if !self.segs.is_endpoint(prev, p) {
                        requeue.extend(self.split_in_status(prev, p));
                    }
                    if !self.segs.is_endpoint(next, p) {
                        requeue.extend(self.split_in_status(next, p));
                    }
                }
            }
            self.remove_from_status(seg);
        }

        Ok(requeue)
    }

    fn split(&mut self, seg: SegIdx, p: Location) -> Vec<EventIdx> {
        trace!(?seg, ?p, "splitting");
        self.splits += 1;
        self.segs.split(seg, p)
    }

    // Splits a segment that is currently in the sweep status.
    fn split_in_status(&mut self, seg: SegIdx, p: Location) -> Vec<EventIdx> {
        self.remove_from_status(seg);
        self.queue.remove(self.segs[seg].right);
        let left_before = self.segs[seg].left;
        let requeue = self.split(seg, p);
        // If the left piece got flipped, its new left event is in `requeue`
        // and will put it back.
        if !self.segs.is_consumed(seg) && self.segs[seg].left == left_before {
            self.insert_into_status(seg);
        }
        requeue
    }

    fn insert_into_status(&mut self, seg: SegIdx) -> usize {
        let shape = self.segs.shape(seg);
        let segs = &self.segs;
        let pos = self
            .status
            .partition_point(|&s| compare_segments(&segs.shape(s), &shape) == Ordering::Less);
        self.status.insert(pos, seg);
        pos
    }

    fn status_position(&self, seg: SegIdx) -> Option<usize> {
        let shape = self.segs.shape(seg);
        let segs = &self.segs;
        let start = self
            .status
            .partition_point(|&s| compare_segments(&segs.shape(s), &shape) == Ordering::Less);
        for (i, &s) in self.status.range(start..).enumerate() {
            if s == seg {
                return Some(start + i);
            }
            if compare_segments(&segs.shape(s), &shape) == Ordering::Greater {
                break;
            }
        }
        // Splits elsewhere can leave the status slightly out of order.
        self.status.iter().position(|&s| s == seg)
    }

    fn remove_from_status(&mut self, seg: SegIdx) -> bool {
        match self.status_position(seg) {
            Some(pos) => {
                self.status.remove(pos);
                true
            }
            None => false,
        }
    }

    fn neighbor_below(&self, pos: usize) -> Option<SegIdx> {
        (0..pos)
            .rev()
            .map(|i| self.status[i])
            .find(|&s| !self.segs.is_consumed(s))
    }

    fn neighbor_above(&self, pos: usize) -> Option<SegIdx> {
        self.status
            .range(pos + 1..)
            .copied()
            .find(|&s| !self.segs.is_consumed(s))
    }

    #[cfg(feature = "slow-asserts")]
    fn check_invariants(&self) {
        self.status.check_invariants();
        for seg in self.status.iter() {
            assert!(
                self.segs.left_point(*seg) < self.segs.right_point(*seg),
                "{seg:?} has its endpoints in the wrong order"
            );
        }
    }

    #[cfg(not(feature = "slow-asserts"))]
    fn check_invariants(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::{Operand, Windings};

    fn loc(x: f64, y: f64) -> Location {
        Location::new(x, y)
    }

    fn add_ring(segs: &mut Segments, points: &[(f64, f64)], operand: Operand, ring: usize) {
        for (i, &(x0, y0)) in points.iter().enumerate() {
            let (x1, y1) = points[(i + 1) % points.len()];
            segs.add_segment(loc(x0, y0), loc(x1, y1), operand, ring, 1);
        }
    }

    fn live_edges(out: &SweepOutcome) -> Vec<(Location, Location)> {
        let mut edges: Vec<_> = out
            .processed
            .iter()
            .filter(|&&s| !out.segments.is_consumed(s))
            .map(|&s| (out.segments.left_point(s), out.segments.right_point(s)))
            .collect();
        edges.sort();
        edges
    }

    #[test]
    fn stray_right_event_is_discarded() {
        let mut segs = Segments::default();
        let seg = segs
            .add_segment(loc(0.0, 0.0), loc(1.0, 1.0), Operand::Subject, 0, 1)
            .unwrap();
        let config = Config::default();
        let mut rounder = PtRounder::new();
        let mut line = SweepLine::new(segs, &mut rounder, &config);

        let right = line.segs[seg].right;
        assert!(line.process(right).unwrap().is_empty());
        assert!(line.status.is_empty());
        assert!(line.processed.is_empty());
    }

    #[test]
    fn crossing_segments_get_split() {
        let mut segs = Segments::default();
        segs.add_segment(loc(0.0, 0.0), loc(4.0, 4.0), Operand::Subject, 0, 1);
        segs.add_segment(loc(0.0, 4.0), loc(4.0, 0.0), Operand::Clipping, 1, 1);
        let out = sweep(segs, &mut PtRounder::new(), &Config::default()).unwrap();

        assert_eq!(
            live_edges(&out),
            vec![
                (loc(0.0, 0.0), loc(2.0, 2.0)),
                (loc(0.0, 4.0), loc(2.0, 2.0)),
                (loc(2.0, 2.0), loc(4.0, 0.0)),
                (loc(2.0, 2.0), loc(4.0, 4.0)),
            ]
        );
    }

    #[test]
    fn overlapping_edges_merge() {
        let mut segs = Segments::default();
        add_ring(
            &mut segs,
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
            Operand::Subject,
            0,
        );
        add_ring(
            &mut segs,
            &[(2.0, 0.0), (6.0, 0.0), (6.0, 4.0), (2.0, 4.0)],
            Operand::Clipping,
            1,
        );
        let out = sweep(segs, &mut PtRounder::new(), &Config::default()).unwrap();
        let edges = live_edges(&out);

        // The bottom and top edges overlap on [2, 4] and end up split into
        // three pieces each, with the middle piece shared.
        let bottom: Vec<_> = edges
            .iter()
            .filter(|(a, b)| a.y == 0.0 && b.y == 0.0)
            .collect();
        assert_eq!(
            bottom,
            vec![
                &(loc(0.0, 0.0), loc(2.0, 0.0)),
                &(loc(2.0, 0.0), loc(4.0, 0.0)),
                &(loc(4.0, 0.0), loc(6.0, 0.0)),
            ]
        );
        let shared = out
            .processed
            .iter()
            .copied()
            .find(|&s| {
                !out.segments.is_consumed(s)
                    && out.segments.left_point(s) == loc(2.0, 0.0)
                    && out.segments.right_point(s) == loc(4.0, 0.0)
            })
            .unwrap();
        assert_eq!(
            out.segments[shared].windings,
            Windings {
                subject: 1,
                clipping: 1
            }
        );
    }

    #[test]
    fn prev_links_point_down() {
        let mut segs = Segments::default();
        add_ring(
            &mut segs,
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            Operand::Subject,
            0,
        );
        add_ring(
            &mut segs,
            &[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)],
            Operand::Clipping,
            1,
        );
        let out = sweep(segs, &mut PtRounder::new(), &Config::default()).unwrap();
        let find = |l: Location, r: Location| {
            out.processed
                .iter()
                .copied()
                .find(|&s| out.segments.left_point(s) == l && out.segments.right_point(s) == r)
                .unwrap()
        };
        let outer_bottom = find(loc(0.0, 0.0), loc(10.0, 0.0));
        let inner_bottom = find(loc(2.0, 2.0), loc(8.0, 2.0));
        let inner_top = find(loc(2.0, 8.0), loc(8.0, 8.0));
        assert_eq!(out.segments[outer_bottom].prev, None);
        assert_eq!(out.segments[inner_bottom].prev, Some(outer_bottom));
        assert_eq!(out.segments[inner_top].prev, Some(inner_bottom));
        assert_eq!(out.processed.len(), 8);
    }

    #[test]
    fn queue_limit() {
        let mut segs = Segments::default();
        add_ring(
            &mut segs,
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)],
            Operand::Subject,
            0,
        );
        let config = Config {
            max_queue_size: 2,
            ..Config::default()
        };
        let err = sweep(segs, &mut PtRounder::new(), &config).unwrap_err();
        assert!(matches!(
            err,
            Error::LimitExceeded {
                what: "event queue",
                limit: 2
            }
        ));
    }
}

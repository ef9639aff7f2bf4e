//! Segments and their endpoint events.
//!
//! Every ring edge becomes a [`Segment`] with two [`SweepEvent`]s: the left
//! one (first in sweep order) and the right one. The sweep splits segments
//! at intersection points and merges segments that end up covering exactly
//! the same pair of points, so all of this lives in arenas addressed by
//! [`SegIdx`] and [`EventIdx`] instead of behind pointers.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::geom::{line_intersection, Bbox, Location};
use crate::rounder::PtRounder;

/// A handle to a segment.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub struct SegIdx(pub usize);

/// A handle to a sweep event.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub struct EventIdx(pub usize);

/// A vector indexed by segments.
#[derive(Clone, serde::Serialize)]
pub struct SegVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(SegVec, SegIdx, "s");

/// A vector indexed by sweep events.
#[derive(Clone, serde::Serialize)]
pub struct EventVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(EventVec, EventIdx, "e");

/// Which of the two inputs of a boolean operation something came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Operand {
    /// The first operand (the one being subtracted from, for a difference).
    Subject,
    /// The second operand.
    Clipping,
}

/// Winding numbers, one per operand.
///
/// On a segment, this is the change in winding when crossing it from below
/// to above. On a region, it is the accumulated winding; the region is inside
/// an operand when that operand's winding is positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Windings {
    /// Winding of the subject.
    pub subject: i32,
    /// Winding of the clipping operand.
    pub clipping: i32,
}

impl Windings {
    /// A winding of `delta` for one operand and zero for the other.
    pub fn single(operand: Operand, delta: i32) -> Self {
        match operand {
            Operand::Subject => Windings {
                subject: delta,
                clipping: 0,
            },
            Operand::Clipping => Windings {
                subject: 0,
                clipping: delta,
            },
        }
    }

    /// Is the region with these windings inside the subject?
    pub fn inside_subject(&self) -> bool {
        self.subject > 0
    }

    /// Is the region with these windings inside the clipping operand?
    pub fn inside_clipping(&self) -> bool {
        self.clipping > 0
    }
}

impl std::ops::Add for Windings {
    type Output = Windings;

    fn add(self, rhs: Windings) -> Windings {
        Windings {
            subject: self.subject + rhs.subject,
            clipping: self.clipping + rhs.clipping,
        }
    }
}

impl std::ops::Neg for Windings {
    type Output = Windings;

    fn neg(self) -> Windings {
        Windings {
            subject: -self.subject,
            clipping: -self.clipping,
        }
    }
}

/// One endpoint of a segment.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct SweepEvent {
    /// Where the event happens.
    pub point: Location,
    /// Is this the endpoint that the sweep line reaches first?
    pub is_left: bool,
    /// The segment this is an endpoint of.
    pub segment: SegIdx,
}

/// A segment between two distinct points.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Segment {
    /// The endpoint with the smaller location.
    pub left: EventIdx,
    /// The endpoint with the larger location.
    pub right: EventIdx,
    /// The operand whose ring produced this segment.
    pub operand: Operand,
    /// The input ring that produced this segment, numbered across both operands.
    pub ring: usize,
    /// The change in winding when crossing this segment upwards.
    pub windings: Windings,
    /// The segment immediately below this one in the sweep status when it was
    /// inserted, if any.
    pub prev: Option<SegIdx>,
    /// Set when an identical segment absorbed this one.
    pub consumed_by: Option<SegIdx>,
}

/// The geometry of a segment, as used by the ordering functions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentShape {
    /// The left endpoint.
    pub left: Location,
    /// The right endpoint.
    pub right: Location,
    /// Breaks ties between identical shapes.
    pub id: SegIdx,
}

/// The arena of segments and sweep events for one operation.
#[derive(Clone, Debug, Default)]
pub struct Segments {
    events: EventVec<SweepEvent>,
    segs: SegVec<Segment>,
    // Live segments by endpoints, for detecting coincident segments.
    by_endpoints: HashMap<(Location, Location), SegIdx>,
}

impl std::ops::Index<SegIdx> for Segments {
    type Output = Segment;

    fn index(&self, index: SegIdx) -> &Segment {
        &self.segs[index]
    }
}

impl std::ops::Index<EventIdx> for Segments {
    type Output = SweepEvent;

    fn index(&self, index: EventIdx) -> &SweepEvent {
        &self.events[index]
    }
}

impl Segments {
    /// The number of segments ever allocated, including split-off and
    /// consumed ones.
    pub fn len(&self) -> usize {
        self.segs.len()
    }

    /// The number of events ever allocated.
    pub fn num_events(&self) -> usize {
        self.events.len()
    }

    /// Iterates over all segment handles.
    pub fn indices(&self) -> impl Iterator<Item = SegIdx> {
        self.segs.indices()
    }

    /// Adds the segment from `a` to `b` of a ring.
    ///
    /// `ring_sign` is +1 if the ring's covered area lies to the left of its
    /// direction of travel, and -1 otherwise. Returns `None` for zero-length
    /// segments, which are dropped.
    pub fn add_segment(
        &mut self,
        a: Location,
        b: Location,
        operand: Operand,
        ring: usize,
        ring_sign: i32,
    ) -> Option<SegIdx> {
        let (left, right, delta) = match a.cmp(&b) {
            Ordering::Equal => return None,
            Ordering::Less => (a, b, ring_sign),
            Ordering::Greater => (b, a, -ring_sign),
        };

        let idx = SegIdx(self.segs.len());
        let left = self.events.push(SweepEvent {
            point: left,
            is_left: true,
            segment: idx,
        });
        let right = self.events.push(SweepEvent {
            point: right,
            is_left: false,
            segment: idx,
        });
        let pushed = self.segs.push(Segment {
            left,
            right,
            operand,
            ring,
            windings: Windings::single(operand, delta),
            prev: None,
            consumed_by: None,
        });
        debug_assert_eq!(pushed, idx);
        self.register(idx);
        Some(idx)
    }

    /// The left endpoint of a segment.
    pub fn left_point(&self, seg: SegIdx) -> Location {
        self.events[self.segs[seg].left].point
    }

    /// The right endpoint of a segment.
    pub fn right_point(&self, seg: SegIdx) -> Location {
        self.events[self.segs[seg].right].point
    }

    /// The other endpoint of an event's segment.
    pub fn twin(&self, ev: EventIdx) -> EventIdx {
        let seg = &self.segs[self.events[ev].segment];
        if seg.left == ev {
            seg.right
        } else {
            seg.left
        }
    }

    /// The geometry of a segment.
    pub fn shape(&self, seg: SegIdx) -> SegmentShape {
        SegmentShape {
            left: self.left_point(seg),
            right: self.right_point(seg),
            id: seg,
        }
    }

    /// Has this segment been absorbed by an identical one?
    pub fn is_consumed(&self, seg: SegIdx) -> bool {
        self.segs[seg].consumed_by.is_some()
    }

    /// Follows the chain of consumers to the segment that survives.
    pub fn resolve(&self, mut seg: SegIdx) -> SegIdx {
        while let Some(next) = self.segs[seg].consumed_by {
            seg = next;
        }
        seg
    }

    /// Records the segment immediately below `seg` at its insertion.
    pub fn set_prev(&mut self, seg: SegIdx, prev: Option<SegIdx>) {
        self.segs[seg].prev = prev;
    }

    /// Is `p` one of the segment's endpoints?
    pub fn is_endpoint(&self, seg: SegIdx, p: Location) -> bool {
        self.left_point(seg) == p || self.right_point(seg) == p
    }

    /// Finds the point at which two segments should be split, if any.
    ///
    /// Endpoints of one segment lying on the other take precedence over a
    /// computed crossing point, which snaps near-endpoint crossings and covers
    /// collinear overlaps. Intersections that consist only of shared
    /// endpoints don't count. A computed crossing point is rounded.
    pub fn intersection(
        &self,
        this: SegIdx,
        other: SegIdx,
        rounder: &mut PtRounder,
    ) -> Option<Location> {
        let (tlp, trp) = (self.left_point(this), self.right_point(this));
        let (olp, orp) = (self.left_point(other), self.right_point(other));
        let t_bbox = Bbox::from_points(tlp, trp);
        let o_bbox = Bbox::from_points(olp, orp);
        let overlap = t_bbox.overlap(&o_bbox)?;

        let touches_other_left =
            t_bbox.contains_point(olp) && compare_point(tlp, trp, olp) == Ordering::Equal;
        let touches_this_left =
            o_bbox.contains_point(tlp) && compare_point(olp, orp, tlp) == Ordering::Equal;
        let touches_other_right =
            t_bbox.contains_point(orp) && compare_point(tlp, trp, orp) == Ordering::Equal;
        let touches_this_right =
            o_bbox.contains_point(trp) && compare_point(olp, orp, trp) == Ordering::Equal;

        if touches_this_left && touches_other_left {
            // Collinear with a shared left endpoint: split the longer one at
            // the end of the shorter one.
            if touches_this_right && !touches_other_right {
                return Some(trp);
            }
            if !touches_this_right && touches_other_right {
                return Some(orp);
            }
            return None;
        }

        if touches_this_left {
            if touches_other_right && tlp == orp {
                return None;
            }
            return Some(tlp);
        }

        if touches_other_left {
            if touches_this_right && trp == olp {
                return None;
            }
            return Some(olp);
        }

        if touches_this_right && touches_other_right {
            return None;
        }
        if touches_this_right {
            return Some(trp);
        }
        if touches_other_right {
            return Some(orp);
        }

        let (x, y) = line_intersection(tlp, tlp.vector_to(trp), olp, olp.vector_to(orp))?;
        let raw = Location { x, y };
        if !overlap.contains_point(raw) {
            return None;
        }
        Some(rounder.round(x, y))
    }

    /// Splits `seg` at `p`, which must lie strictly between its endpoints.
    ///
    /// `seg` keeps its left event and becomes the left piece; a new segment
    /// takes over the old right event. Returns the events that must be
    /// (re)inserted into the event queue: the two new events and the old
    /// right event, plus the old left event if the left piece had to be
    /// flipped because rounding moved `p` behind it.
    pub fn split(&mut self, seg: SegIdx, p: Location) -> Vec<EventIdx> {
        debug_assert!(!self.is_endpoint(seg, p));
        self.unregister(seg);

        let old = self.segs[seg].clone();
        let new_seg = SegIdx(self.segs.len());
        let new_right = self.events.push(SweepEvent {
            point: p,
            is_left: false,
            segment: seg,
        });
        let new_left = self.events.push(SweepEvent {
            point: p,
            is_left: true,
            segment: new_seg,
        });
        let pushed = self.segs.push(Segment {
            left: new_left,
            right: old.right,
            operand: old.operand,
            ring: old.ring,
            windings: old.windings,
            prev: None,
            consumed_by: None,
        });
        debug_assert_eq!(pushed, new_seg);
        self.events[old.right].segment = new_seg;
        self.segs[seg].right = new_right;

        let mut requeue = vec![new_right, new_left, old.right];

        // Rounding can put the split point behind one of the endpoints (think
        // of an almost-vertical segment), leaving a piece whose ends are in the
        // wrong order.
        if self.left_point(new_seg) > self.right_point(new_seg) {
            self.swap_events(new_seg);
        }
        if self.left_point(seg) > self.right_point(seg) {
            requeue.push(old.left);
            self.swap_events(seg);
        }

        self.register(seg);
        self.register(new_seg);
        requeue
    }

    fn swap_events(&mut self, seg: SegIdx) {
        let s = &mut self.segs[seg];
        std::mem::swap(&mut s.left, &mut s.right);
        s.windings = -s.windings;
        let (left, right) = (s.left, s.right);
        self.events[left].is_left = true;
        self.events[right].is_left = false;
    }

    fn unregister(&mut self, seg: SegIdx) {
        let key = (self.left_point(seg), self.right_point(seg));
        if self.by_endpoints.get(&key) == Some(&seg) {
            self.by_endpoints.remove(&key);
        }
    }

    fn register(&mut self, seg: SegIdx) {
        if self.is_consumed(seg) {
            return;
        }
        let key = (self.left_point(seg), self.right_point(seg));
        match self.by_endpoints.get(&key).copied() {
            Some(other) if other != seg && !self.is_consumed(other) => {
                let survivor = self.consume(other, seg);
                self.by_endpoints.insert(key, survivor);
            }
            _ => {
                self.by_endpoints.insert(key, seg);
            }
        }
    }

    /// Merges two segments with identical endpoints, returning the survivor.
    ///
    /// The survivor is the one that comes first in sweep-status order, unless
    /// that would make a segment absorb its own lower neighbor.
    fn consume(&mut self, a: SegIdx, b: SegIdx) -> SegIdx {
        let mut consumer = self.resolve(a);
        let mut consumee = self.resolve(b);
        if consumer == consumee {
            return consumer;
        }
        if compare_segments(&self.shape(consumer), &self.shape(consumee)) == Ordering::Greater {
            std::mem::swap(&mut consumer, &mut consumee);
        }
        if self.segs[consumer].prev == Some(consumee) {
            std::mem::swap(&mut consumer, &mut consumee);
        }

        tracing::trace!(?consumer, ?consumee, "merging coincident segments");
        let absorbed = self.segs[consumee].windings;
        self.segs[consumer].windings = self.segs[consumer].windings + absorbed;
        self.segs[consumee].consumed_by = Some(consumer);
        consumer
    }
}

/// Where `p` lies relative to the line through a segment.
///
/// `Less` means below (or, for vertical segments, to the right), `Greater`
/// means above (or to the left), and `Equal` means on the line, which
/// includes the segment's own endpoints.
pub fn compare_point(left: Location, right: Location, p: Location) -> Ordering {
    if p == left || p == right {
        return Ordering::Equal;
    }
    let v = left.vector_to(right);

    if left.x == right.x {
        if p.x == left.x {
            return Ordering::Equal;
        }
        return if p.x < left.x {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    // For nearly-vertical segments, look for a point on the line at the same
    // height. For horizontal ones this divides by zero and never matches.
    let y_dist = (p.y - left.y) / v.y;
    let x_from_y = left.x + y_dist * v.x;
    if p.x == x_from_y {
        return Ordering::Equal;
    }

    let x_dist = (p.x - left.x) / v.x;
    let y_from_x = left.y + x_dist * v.y;
    if p.y == y_from_x {
        return Ordering::Equal;
    }
    if p.y < y_from_x {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn reverse_point_cmp(ord: Ordering) -> Option<Ordering> {
    match ord {
        Ordering::Less => Some(Ordering::Greater),
        Ordering::Greater => Some(Ordering::Less),
        Ordering::Equal => None,
    }
}

/// The sweep-status order: `Less` means `a` is below `b`.
///
/// This is only meaningful for segments that are both crossed by the sweep
/// line, and it only looks at the part of the segments that overlap in `x`.
/// Identical segments are ordered by id.
pub fn compare_segments(a: &SegmentShape, b: &SegmentShape) -> Ordering {
    use Ordering::*;

    let (alx, aly) = (a.left.x, a.left.y);
    let (arx, ary) = (a.right.x, a.right.y);
    let (blx, bly) = (b.left.x, b.left.y);
    let (brx, bry) = (b.right.x, b.right.y);

    // Not even in the same vertical strip.
    if brx < alx {
        return Greater;
    }
    if arx < blx {
        return Less;
    }

    if alx < blx {
        // b starts further right; is its left end clearly above or below a?
        if bly < aly && bly < ary {
            return Greater;
        }
        if bly > aly && bly > ary {
            return Less;
        }
        if let Some(ord) = reverse_point_cmp(compare_point(a.left, a.right, b.left)) {
            return ord;
        }
        let ord = compare_point(b.left, b.right, a.right);
        if ord != Equal {
            return ord;
        }
        // Collinear: the one starting further left comes first.
        return Less;
    }

    if alx > blx {
        if aly < bly && aly < bry {
            return Less;
        }
        if aly > bly && aly > bry {
            return Greater;
        }
        let ord = compare_point(b.left, b.right, a.left);
        if ord != Equal {
            return ord;
        }
        if let Some(ord) = reverse_point_cmp(compare_point(a.left, a.right, b.right)) {
            return ord;
        }
        return Greater;
    }

    // Left endpoints on the same vertical line: the lower one comes first.
    if aly < bly {
        return Less;
    }
    if aly > bly {
        return Greater;
    }

    // Shared left endpoint. Compare using the right endpoint that is further
    // left, which lies within the other segment's x range.
    if arx < brx {
        let ord = compare_point(b.left, b.right, a.right);
        if ord != Equal {
            return ord;
        }
    }
    if arx > brx {
        if let Some(ord) = reverse_point_cmp(compare_point(a.left, a.right, b.right)) {
            return ord;
        }
    }

    if arx != brx {
        // Nearly vertical segments leaving in opposite directions.
        let (ay, ax) = (ary - aly, arx - alx);
        let (by, bx) = (bry - bly, brx - blx);
        if ay > ax && by < bx {
            return Greater;
        }
        if ay < ax && by > bx {
            return Less;
        }
    }

    // Collinear with the same orientation.
    if arx > brx {
        return Greater;
    }
    if arx < brx {
        return Less;
    }
    if ary < bry {
        return Less;
    }
    if ary > bry {
        return Greater;
    }

    a.id.cmp(&b.id)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn loc(x: f64, y: f64) -> Location {
        Location::new(x, y)
    }

    fn shape(l: (f64, f64), r: (f64, f64), id: usize) -> SegmentShape {
        SegmentShape {
            left: loc(l.0, l.1),
            right: loc(r.0, r.1),
            id: SegIdx(id),
        }
    }

    fn add(segs: &mut Segments, a: (f64, f64), b: (f64, f64), operand: Operand) -> SegIdx {
        segs.add_segment(loc(a.0, a.1), loc(b.0, b.1), operand, 0, 1)
            .unwrap()
    }

    #[test]
    fn point_side() {
        let (l, r) = (loc(0.0, 0.0), loc(4.0, 2.0));
        assert_eq!(compare_point(l, r, loc(2.0, 1.0)), Ordering::Equal);
        assert_eq!(compare_point(l, r, loc(2.0, 0.0)), Ordering::Less);
        assert_eq!(compare_point(l, r, loc(2.0, 3.0)), Ordering::Greater);
        assert_eq!(compare_point(l, r, l), Ordering::Equal);

        let (l, r) = (loc(1.0, 0.0), loc(1.0, 5.0));
        assert_eq!(compare_point(l, r, loc(0.0, 2.0)), Ordering::Greater);
        assert_eq!(compare_point(l, r, loc(2.0, 2.0)), Ordering::Less);
        assert_eq!(compare_point(l, r, loc(1.0, 9.0)), Ordering::Equal);

        let (l, r) = (loc(0.0, 1.0), loc(5.0, 1.0));
        assert_eq!(compare_point(l, r, loc(3.0, 1.0)), Ordering::Equal);
        assert_eq!(compare_point(l, r, loc(3.0, 0.0)), Ordering::Less);
    }

    #[test]
    fn status_order() {
        let low = shape((0.0, 0.0), (10.0, 0.0), 0);
        let high = shape((0.0, 5.0), (10.0, 5.0), 1);
        assert_eq!(compare_segments(&low, &high), Ordering::Less);
        assert_eq!(compare_segments(&high, &low), Ordering::Greater);

        // Starting further right, but above.
        let later = shape((3.0, 1.0), (8.0, 4.0), 2);
        assert_eq!(compare_segments(&low, &later), Ordering::Less);
        assert_eq!(compare_segments(&later, &low), Ordering::Greater);
        assert_eq!(compare_segments(&later, &high), Ordering::Less);

        // Shared left endpoint: the one turning upwards is above.
        let up = shape((0.0, 0.0), (0.0, 10.0), 3);
        assert_eq!(compare_segments(&low, &up), Ordering::Less);
        assert_eq!(compare_segments(&up, &low), Ordering::Greater);

        // Identical shapes are ordered by id.
        let twin = shape((0.0, 0.0), (10.0, 0.0), 7);
        assert_eq!(compare_segments(&low, &twin), Ordering::Less);
        assert_eq!(compare_segments(&low, &low), Ordering::Equal);
    }

    #[test]
    fn crossing() {
        let mut segs = Segments::default();
        let mut rounder = PtRounder::new();
        let a = add(&mut segs, (0.0, 0.0), (4.0, 4.0), Operand::Subject);
        let b = add(&mut segs, (0.0, 4.0), (4.0, 0.0), Operand::Clipping);
        assert_eq!(segs.intersection(a, b, &mut rounder), Some(loc(2.0, 2.0)));
        assert_eq!(segs.intersection(b, a, &mut rounder), Some(loc(2.0, 2.0)));
    }

    #[test]
    fn touching() {
        let mut segs = Segments::default();
        let mut rounder = PtRounder::new();
        let a = add(&mut segs, (0.0, 0.0), (4.0, 0.0), Operand::Subject);
        // T-junction on a's interior.
        let b = add(&mut segs, (2.0, 0.0), (2.0, 3.0), Operand::Clipping);
        // Only a shared endpoint.
        let c = add(&mut segs, (4.0, 0.0), (6.0, 2.0), Operand::Clipping);
        // Disjoint.
        let d = add(&mut segs, (5.0, 5.0), (6.0, 6.0), Operand::Clipping);
        assert_eq!(segs.intersection(a, b, &mut rounder), Some(loc(2.0, 0.0)));
        assert_eq!(segs.intersection(a, c, &mut rounder), None);
        assert_eq!(segs.intersection(a, d, &mut rounder), None);
    }

    #[test]
    fn collinear_overlap() {
        let mut segs = Segments::default();
        let mut rounder = PtRounder::new();
        let a = add(&mut segs, (0.0, 0.0), (10.0, 0.0), Operand::Subject);
        let b = add(&mut segs, (5.0, 0.0), (15.0, 0.0), Operand::Clipping);
        let c = add(&mut segs, (0.0, 0.0), (3.0, 0.0), Operand::Clipping);
        assert_eq!(segs.intersection(a, b, &mut rounder), Some(loc(5.0, 0.0)));
        assert_eq!(segs.intersection(a, c, &mut rounder), Some(loc(3.0, 0.0)));
    }

    #[test]
    fn split_keeps_left_piece() {
        let mut segs = Segments::default();
        let a = segs
            .add_segment(loc(4.0, 4.0), loc(0.0, 0.0), Operand::Subject, 0, 1)
            .unwrap();
        assert_eq!(segs[a].windings.subject, -1);

        let requeue = segs.split(a, loc(1.0, 1.0));
        assert_eq!(requeue.len(), 3);
        assert_eq!(segs.right_point(a), loc(1.0, 1.0));

        let new_seg = segs[requeue[1]].segment;
        assert_eq!(segs.left_point(new_seg), loc(1.0, 1.0));
        assert_eq!(segs.right_point(new_seg), loc(4.0, 4.0));
        assert_eq!(segs[new_seg].windings, segs[a].windings);
        assert_eq!(segs.twin(segs[a].left), segs[a].right);
        assert_eq!(segs.twin(segs[new_seg].right), segs[new_seg].left);
    }

    #[test]
    fn coincident_segments_merge() {
        let mut segs = Segments::default();
        let a = add(&mut segs, (0.0, 0.0), (2.0, 0.0), Operand::Subject);
        let b = segs
            .add_segment(loc(2.0, 0.0), loc(0.0, 0.0), Operand::Clipping, 1, 1)
            .unwrap();
        assert!(!segs.is_consumed(a));
        assert_matches!(segs[b].consumed_by, Some(s) if s == a);
        assert_eq!(
            segs[a].windings,
            Windings {
                subject: 1,
                clipping: -1
            }
        );
        assert_eq!(segs.resolve(b), a);
    }

    #[test]
    fn split_into_coincidence() {
        let mut segs = Segments::default();
        let a = add(&mut segs, (0.0, 0.0), (10.0, 0.0), Operand::Subject);
        let b = add(&mut segs, (5.0, 0.0), (10.0, 0.0), Operand::Clipping);
        let requeue = segs.split(a, loc(5.0, 0.0));
        let right_piece = segs[requeue[1]].segment;
        // The right piece of `a` and `b` cover the same points, so one of them
        // absorbed the other.
        assert_eq!(segs.resolve(right_piece), segs.resolve(b));
        let survivor = segs.resolve(b);
        assert_eq!(
            segs[survivor].windings,
            Windings {
                subject: 1,
                clipping: 1
            }
        );
    }
}

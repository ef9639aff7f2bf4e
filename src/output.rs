//! Assembling result edges into polygons.
//!
//! The selected segments form closed loops, but loops can touch each other at
//! vertices, so tracing has to decide at every vertex with more than one way
//! out which edge to follow. We always take the leftmost turn, and whenever a
//! walk comes back to a vertex it already went through, the loop in between
//! gets cut off as a ring of its own. This produces rings that touch at most
//! at isolated points and never cross.
//!
//! The traced rings are then cleaned up (collinear vertices removed, empty
//! rings dropped), nested by containment, and oriented: exteriors
//! counter-clockwise, holes clockwise.

use std::cmp::Ordering;
use std::collections::HashMap;

use kurbo::BezPath;

use crate::geom::{
    compare_vector_angles, point_in_ring, signed_area2, sine_and_cosine, Bbox, Containment,
    Location,
};
use crate::segments::{EventIdx, SegIdx, SegVec, Segments};
use crate::{Error, MultiPolygon, Polygon, Ring};

/// Turns the result edges into a normalized multipolygon.
///
/// `edges` must be in sweep processing order, which fixes the order of the
/// output.
pub fn assemble(segs: &Segments, edges: &[SegIdx]) -> Result<MultiPolygon, Error> {
    let traced = RingTracer::new(segs, edges).trace()?;
    let num_traced = traced.len();
    let rings: Vec<RingOut> = traced
        .iter()
        .filter_map(|points| simplify(points))
        .map(RingOut::new)
        .collect();
    let polygons = nest(rings);
    tracing::debug!(
        traced = num_traced,
        polygons = polygons.len(),
        "assembled rings"
    );
    Ok(polygons)
}

struct RingTracer<'a> {
    segs: &'a Segments,
    edges: &'a [SegIdx],
    used: SegVec<bool>,
    // The events of result edges, by location.
    at_point: HashMap<Location, Vec<EventIdx>>,
}

impl<'a> RingTracer<'a> {
    fn new(segs: &'a Segments, edges: &'a [SegIdx]) -> Self {
        let mut at_point: HashMap<Location, Vec<EventIdx>> = HashMap::new();
        for &seg in edges {
            for ev in [segs[seg].left, segs[seg].right] {
                at_point.entry(segs[ev].point).or_default().push(ev);
            }
        }
        let mut used = SegVec::with_capacity(segs.len());
        used.resize(segs.len(), false);
        RingTracer {
            segs,
            edges,
            used,
            at_point,
        }
    }

    // Events at the same point as `ev` whose edges haven't been put in a
    // ring yet.
    fn available(&self, ev: EventIdx) -> Vec<EventIdx> {
        let point = self.segs[ev].point;
        self.at_point
            .get(&point)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&e| e != ev && !self.used[self.segs[e].segment])
            .collect()
    }

    // Of the candidate edges leaving `ev`'s point, picks the one making the
    // sharpest left turn coming from `from`.
    fn leftmost(&self, from: EventIdx, ev: EventIdx, candidates: &[EventIdx]) -> EventIdx {
        let shared = self.segs[ev].point;
        let base = self.segs[from].point;
        let mut scored: Vec<(EventIdx, f64, f64)> = candidates
            .iter()
            .map(|&c| {
                let end = self.segs[self.segs.twin(c)].point;
                let (sin, cos) = sine_and_cosine(shared, base, end);
                (c, sin, cos)
            })
            .collect();
        scored.sort_by(|&(_, a_sin, a_cos), &(_, b_sin, b_cos)| {
            if a_sin >= 0.0 && b_sin >= 0.0 {
                b_cos.total_cmp(&a_cos)
            } else if a_sin < 0.0 && b_sin < 0.0 {
                a_cos.total_cmp(&b_cos)
            } else {
                b_sin.total_cmp(&a_sin)
            }
        });
        scored[0].0
    }

    fn close(&mut self, events: &[EventIdx]) -> Vec<Location> {
        for &ev in events {
            let seg = self.segs[ev].segment;
            self.used[seg] = true;
        }
        events.iter().map(|&ev| self.segs[ev].point).collect()
    }

    fn trace(mut self) -> Result<Vec<Vec<Location>>, Error> {
        let mut rings = Vec::new();
        for &seg in self.edges {
            if self.used[seg] {
                continue;
            }

            let start = self.segs[seg].left;
            let start_point = self.segs[start].point;
            let mut events = vec![start];
            let mut prev;
            let mut ev = start;
            let mut next = self.segs[seg].right;
            // Vertices with several ways out, and where in `events` the walk
            // continued from them.
            let mut branch_points: Vec<(Location, usize)> = Vec::new();

            loop {
                prev = ev;
                ev = next;
                events.push(ev);
                let point = self.segs[ev].point;
                if point == start_point {
                    break;
                }

                loop {
                    let available = self.available(ev);
                    if available.is_empty() {
                        return Err(Error::InternalConsistency(format!(
                            "ring tracing reached a dead end at {point:?}"
                        )));
                    }
                    if available.len() == 1 {
                        next = self.segs.twin(available[0]);
                        break;
                    }

                    if let Some(i) = branch_points.iter().position(|&(p, _)| p == point) {
                        // Back at a branch point: everything since we left it
                        // is a ring of its own.
                        let (_, idx) = branch_points.remove(i);
                        branch_points.truncate(i);
                        let mut ring_events = events.split_off(idx);
                        ring_events.insert(0, self.segs.twin(ring_events[0]));
                        ring_events.reverse();
                        rings.push(self.close(&ring_events));
                        continue;
                    }

                    branch_points.push((point, events.len()));
                    next = self.segs.twin(self.leftmost(prev, ev, &available));
                    break;
                }
            }
            rings.push(self.close(&events));
        }
        Ok(rings)
    }
}

/// Removes collinear vertices from a closed ring, returning `None` if it
/// has no area left.
fn simplify(closed: &[Location]) -> Option<Vec<Location>> {
    if closed.len() < 4 {
        return None;
    }
    let mut points = vec![closed[0]];
    let mut prev = closed[0];
    for w in closed[1..].windows(2) {
        let (pt, next) = (w[0], w[1]);
        if compare_vector_angles(pt, prev, next) == Ordering::Equal {
            continue;
        }
        points.push(pt);
        prev = pt;
    }
    if points.len() < 3 {
        return None;
    }
    if compare_vector_angles(points[0], prev, points[1]) == Ordering::Equal {
        points.remove(0);
    }
    if points.len() < 3 {
        return None;
    }
    points.push(points[0]);
    Some(points)
}

struct RingOut {
    // Closed.
    points: Vec<Location>,
    bbox: Bbox,
    area2: f64,
}

impl RingOut {
    fn new(points: Vec<Location>) -> Self {
        // unwrap: simplified rings have at least four points
        let bbox = Bbox::from_locations(points.iter().copied()).unwrap();
        let area2 = signed_area2(&points);
        RingOut {
            points,
            bbox,
            area2,
        }
    }

    fn vertices(&self) -> &[Location] {
        &self.points[..self.points.len() - 1]
    }

    fn encloses(&self, other: &RingOut) -> bool {
        if !self.bbox.contains(&other.bbox) {
            return false;
        }
        let vertices = other.vertices().iter().copied();
        let midpoints = other
            .points
            .windows(2)
            .map(|w| Location::new((w[0].x + w[1].x) / 2.0, (w[0].y + w[1].y) / 2.0));
        for p in vertices.chain(midpoints) {
            match point_in_ring(p, &self.points) {
                Containment::Inside => return true,
                Containment::Outside => return false,
                Containment::Boundary => {}
            }
        }
        false
    }
}

/// Sorts rings into polygons: a ring's parent is the smallest ring enclosing
/// it, rings at even depth are exteriors, and the others are holes of their
/// parent.
fn nest(rings: Vec<RingOut>) -> MultiPolygon {
    let mut by_size: Vec<usize> = (0..rings.len()).collect();
    by_size.sort_by(|&a, &b| {
        let (a, b) = (&rings[a], &rings[b]);
        a.bbox
            .area()
            .total_cmp(&b.bbox.area())
            .then(a.area2.abs().total_cmp(&b.area2.abs()))
    });

    let mut parent = vec![None; rings.len()];
    for (k, &i) in by_size.iter().enumerate() {
        parent[i] = by_size[k + 1..]
            .iter()
            .copied()
            .find(|&j| rings[j].encloses(&rings[i]));
    }

    // Parents come later in `by_size`, so walk it backwards.
    let mut depth = vec![0usize; rings.len()];
    for &i in by_size.iter().rev() {
        if let Some(p) = parent[i] {
            depth[i] = depth[p] + 1;
        }
    }

    let mut polygon_of = vec![None; rings.len()];
    let mut polygons: Vec<Polygon> = Vec::new();
    for (i, ring) in rings.iter().enumerate() {
        if depth[i] % 2 == 0 {
            polygon_of[i] = Some(polygons.len());
            polygons.push(vec![oriented(ring, true)]);
        }
    }
    for (i, ring) in rings.iter().enumerate() {
        if depth[i] % 2 == 1 {
            if let Some(poly) = parent[i].and_then(|p| polygon_of[p]) {
                polygons[poly].push(oriented(ring, false));
            }
        }
    }
    polygons
}

fn oriented(ring: &RingOut, ccw: bool) -> Ring {
    let mut out: Ring = ring.points.iter().map(|p| p.to_array()).collect();
    if (ring.area2 > 0.0) != ccw {
        out.reverse();
    }
    out
}

fn ring_area(ring: &[[f64; 2]]) -> f64 {
    let points: Vec<Location> = ring.iter().map(|&[x, y]| Location { x, y }).collect();
    signed_area2(&points).abs() / 2.0
}

/// The area covered by a multipolygon.
///
/// Each polygon contributes the area of its exterior minus the areas of its
/// holes, whatever the orientation of the rings.
pub fn area(polygons: &MultiPolygon) -> f64 {
    polygons
        .iter()
        .map(|polygon| {
            let mut rings = polygon.iter();
            let exterior = rings.next().map_or(0.0, |r| ring_area(r));
            exterior - rings.map(|r| ring_area(r)).sum::<f64>()
        })
        .sum()
}

/// Converts a multipolygon into a path, with one closed subpath per ring.
pub fn to_bez_path(polygons: &MultiPolygon) -> BezPath {
    let mut path = BezPath::new();
    for ring in polygons.iter().flatten() {
        let mut points = ring.iter().map(|&[x, y]| kurbo::Point::new(x, y));
        let Some(first) = points.next() else {
            continue;
        };
        path.move_to(first);
        let mut rest: Vec<kurbo::Point> = points.collect();
        if rest.last() == Some(&first) {
            rest.pop();
        }
        for p in rest {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(x: f64, y: f64) -> Location {
        Location::new(x, y)
    }

    fn closed(points: &[(f64, f64)]) -> Vec<Location> {
        let mut ret: Vec<_> = points.iter().map(|&(x, y)| loc(x, y)).collect();
        ret.push(ret[0]);
        ret
    }

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Location> {
        closed(&[
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
        ])
    }

    #[test]
    fn simplify_collinear() {
        // Collinear points in the middle and at the start.
        let ring = closed(&[
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (0.0, 2.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]);
        assert_eq!(
            simplify(&ring).unwrap(),
            closed(&[(2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)])
        );
    }

    #[test]
    fn simplify_tiny() {
        let ring = closed(&[(0.0, 0.0), (2e-9, 0.0), (2e-9, 2e-9), (1e-9, 2e-9), (0.0, 2e-9)]);
        assert_eq!(
            simplify(&ring).unwrap(),
            closed(&[(0.0, 0.0), (2e-9, 0.0), (2e-9, 2e-9), (0.0, 2e-9)])
        );
    }

    #[test]
    fn simplify_flat() {
        let ring = closed(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)]);
        assert_eq!(simplify(&ring), None);
    }

    #[test]
    fn nesting_and_orientation() {
        let rings = vec![
            RingOut::new(square(0.0, 0.0, 10.0)),
            RingOut::new(square(2.0, 2.0, 6.0)),
            RingOut::new(square(4.0, 4.0, 2.0)),
            RingOut::new(square(20.0, 0.0, 1.0)),
        ];
        let polys = nest(rings);
        assert_eq!(polys.len(), 3);
        assert_eq!(polys[0].len(), 2);
        assert_eq!(polys[1].len(), 1);
        assert_eq!(polys[2].len(), 1);

        // The hole got reversed.
        assert_eq!(
            polys[0][1],
            vec![[2.0, 2.0], [2.0, 8.0], [8.0, 8.0], [8.0, 2.0], [2.0, 2.0]]
        );
        assert_eq!(polys[1][0][1], [6.0, 4.0]);
        assert_eq!(area(&polys), 100.0 - 36.0 + 4.0 + 1.0);
    }

    #[test]
    fn touching_rings_are_not_nested() {
        // Two squares sharing a corner.
        let rings = vec![
            RingOut::new(square(0.0, 0.0, 2.0)),
            RingOut::new(square(2.0, 2.0, 2.0)),
        ];
        let polys = nest(rings);
        assert_eq!(polys.len(), 2);
    }

    #[test]
    fn paths() {
        let polys = vec![vec![
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]],
            vec![],
        ]];
        let path = to_bez_path(&polys);
        assert_eq!(path.elements().len(), 4);
        assert!((kurbo::Shape::area(&path) - 0.5).abs() < 1e-12);
    }
}

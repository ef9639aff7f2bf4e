//! Geometric primitives and predicates shared by the sweep and the tracer.

use std::cmp::Ordering;
use std::hash::Hash;

use kurbo::Vec2;

use crate::num::{float_cmp, CheapOrderedFloat};

/// A two-dimensional point, after rounding.
///
/// Locations are ordered by `x` and then by `y`, which is the order in which
/// the sweep line encounters them.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl std::fmt::Debug for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        CheapOrderedFloat::from(self.x)
            .cmp(&CheapOrderedFloat::from(other.x))
            .then_with(|| CheapOrderedFloat::from(self.y).cmp(&CheapOrderedFloat::from(other.y)))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Location {
    /// Creates a new location.
    ///
    /// Negative zero is normalized to zero, so that equal locations always
    /// hash equally.
    pub fn new(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite());
        debug_assert!(y.is_finite());
        Location {
            x: x + 0.0,
            y: y + 0.0,
        }
    }

    /// The vector pointing from `self` to `other`.
    pub fn vector_to(self, other: Location) -> Vec2 {
        Vec2::new(other.x - self.x, other.y - self.y)
    }

    /// The coordinates as a plain array, the output position format.
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// An axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Bbox {
    /// The lower-left corner.
    pub ll: Location,
    /// The upper-right corner.
    pub ur: Location,
}

impl Bbox {
    /// The degenerate box containing a single point.
    pub fn from_point(p: Location) -> Self {
        Bbox { ll: p, ur: p }
    }

    /// The smallest box containing both points.
    pub fn from_points(a: Location, b: Location) -> Self {
        let mut ret = Bbox::from_point(a);
        ret.expand(b);
        ret
    }

    /// The smallest box containing every point, or `None` if there are none.
    pub fn from_locations(points: impl IntoIterator<Item = Location>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut ret = Bbox::from_point(points.next()?);
        for p in points {
            ret.expand(p);
        }
        Some(ret)
    }

    /// Grows this box to contain `p`.
    pub fn expand(&mut self, p: Location) {
        self.ll.x = self.ll.x.min(p.x);
        self.ll.y = self.ll.y.min(p.y);
        self.ur.x = self.ur.x.max(p.x);
        self.ur.y = self.ur.y.max(p.y);
    }

    /// The smallest box containing both boxes.
    pub fn union(&self, other: &Bbox) -> Bbox {
        let mut ret = *self;
        ret.expand(other.ll);
        ret.expand(other.ur);
        ret
    }

    /// Is `p` in this box (boundary included)?
    pub fn contains_point(&self, p: Location) -> bool {
        self.ll.x <= p.x && p.x <= self.ur.x && self.ll.y <= p.y && p.y <= self.ur.y
    }

    /// Is `other` entirely inside this box (boundary included)?
    pub fn contains(&self, other: &Bbox) -> bool {
        self.contains_point(other.ll) && self.contains_point(other.ur)
    }

    /// The intersection of two boxes, if they touch at all.
    pub fn overlap(&self, other: &Bbox) -> Option<Bbox> {
        if other.ur.x < self.ll.x
            || self.ur.x < other.ll.x
            || other.ur.y < self.ll.y
            || self.ur.y < other.ll.y
        {
            return None;
        }
        Some(Bbox {
            ll: Location::new(self.ll.x.max(other.ll.x), self.ll.y.max(other.ll.y)),
            ur: Location::new(self.ur.x.min(other.ur.x), self.ur.y.min(other.ur.y)),
        })
    }

    /// The area of the box.
    pub fn area(&self) -> f64 {
        (self.ur.x - self.ll.x) * (self.ur.y - self.ll.y)
    }
}

/// Compares the angles of the vectors from `base` to `end1` and to `end2`.
///
/// Returns `Equal` when the three points are collinear, meaning that the
/// sine of the angle between the vectors is within the tolerance of
/// [`float_cmp`]. Returns `Greater` when `end2` is counter-clockwise of `end1`.
///
/// The test doesn't depend on the scale of the coordinates.
pub fn compare_vector_angles(base: Location, end1: Location, end2: Location) -> Ordering {
    let v1 = base.vector_to(end1);
    let v2 = base.vector_to(end2);
    let lengths = v1.hypot() * v2.hypot();
    if lengths == 0.0 {
        return Ordering::Equal;
    }
    float_cmp(v1.cross(v2) / lengths, 0.0)
}

/// The sine and cosine of the angle at `shared` between the rays towards
/// `base` and towards `angle`.
pub fn sine_and_cosine(shared: Location, base: Location, angle: Location) -> (f64, f64) {
    let v_base = shared.vector_to(base);
    let v_angle = shared.vector_to(angle);
    let lengths = v_angle.hypot() * v_base.hypot();
    (
        v_angle.cross(v_base) / lengths,
        v_angle.dot(v_base) / lengths,
    )
}

/// Intersects the infinite line through `p1` with direction `v1` with the
/// one through `p2` with direction `v2`.
///
/// Returns `None` for parallel lines. The result is not rounded.
pub fn line_intersection(p1: Location, v1: Vec2, p2: Location, v2: Vec2) -> Option<(f64, f64)> {
    // Shortcuts for axis-aligned lines; they also keep a coordinate exact.
    if v1.x == 0.0 {
        return vertical_intersection(p2, v2, p1.x);
    }
    if v2.x == 0.0 {
        return vertical_intersection(p1, v1, p2.x);
    }
    if v1.y == 0.0 {
        return horizontal_intersection(p2, v2, p1.y);
    }
    if v2.y == 0.0 {
        return horizontal_intersection(p1, v1, p2.y);
    }

    let kross = v1.cross(v2);
    if kross == 0.0 {
        return None;
    }
    let ve = p1.vector_to(p2);
    let d1 = ve.cross(v1) / kross;
    let d2 = ve.cross(v2) / kross;

    // Average the two parametrizations to even out the rounding error.
    let x1 = p1.x + d2 * v1.x;
    let x2 = p2.x + d1 * v2.x;
    let y1 = p1.y + d2 * v1.y;
    let y2 = p2.y + d1 * v2.y;
    Some(((x1 + x2) / 2.0, (y1 + y2) / 2.0))
}

fn vertical_intersection(p: Location, v: Vec2, x: f64) -> Option<(f64, f64)> {
    if v.x == 0.0 {
        return None;
    }
    Some((x, p.y + v.y / v.x * (x - p.x)))
}

fn horizontal_intersection(p: Location, v: Vec2, y: f64) -> Option<(f64, f64)> {
    if v.y == 0.0 {
        return None;
    }
    Some((p.x + v.x / v.y * (y - p.y), y))
}

/// Twice the signed area of a ring (shoelace formula); positive for
/// counter-clockwise rings.
///
/// The ring is treated as cyclic, so it doesn't matter whether the first
/// point is repeated at the end.
pub fn signed_area2(ring: &[Location]) -> f64 {
    let Some(&last) = ring.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut sum = 0.0;
    for &p in ring {
        sum += prev.x * p.y - p.x * prev.y;
        prev = p;
    }
    sum
}

/// Where a point lies relative to a ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    /// Strictly inside.
    Inside,
    /// Strictly outside.
    Outside,
    /// On one of the ring's edges.
    Boundary,
}

/// Locates `p` relative to a cyclic ring, by ray casting.
pub fn point_in_ring(p: Location, ring: &[Location]) -> Containment {
    let Some(&last) = ring.last() else {
        return Containment::Outside;
    };
    let mut inside = false;
    let mut a = last;
    for &b in ring {
        if on_segment(p, a, b) {
            return Containment::Boundary;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        a = b;
    }
    if inside {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

fn on_segment(p: Location, a: Location, b: Location) -> bool {
    Bbox::from_points(a, b).contains_point(p) && a.vector_to(b).cross(a.vector_to(p)) == 0.0
}

//! Turning user geometry into sweep segments.
//!
//! Input arrives as nested sequences of positions: a multipolygon is a list
//! of polygons, a polygon is a list of rings (the first one exterior, the
//! rest holes), and a ring is a list of positions. Rings may or may not
//! repeat their first point at the end, and may wind either way.

use std::collections::HashSet;

use crate::geom::{signed_area2, Bbox, Location};
use crate::rounder::PtRounder;
use crate::segments::{Operand, Segments};
use crate::Error;

/// Something that can be read as a 2D position.
///
/// Only the first two coordinates are used; anything after them (such as an
/// elevation) is ignored.
pub trait Position {
    /// The `x` and `y` coordinates.
    fn xy(&self) -> Result<(f64, f64), Error>;
}

impl Position for [f64; 2] {
    fn xy(&self) -> Result<(f64, f64), Error> {
        Ok((self[0], self[1]))
    }
}

impl Position for [f64; 3] {
    fn xy(&self) -> Result<(f64, f64), Error> {
        Ok((self[0], self[1]))
    }
}

impl Position for (f64, f64) {
    fn xy(&self) -> Result<(f64, f64), Error> {
        Ok(*self)
    }
}

impl Position for kurbo::Point {
    fn xy(&self) -> Result<(f64, f64), Error> {
        Ok((self.x, self.y))
    }
}

impl Position for Vec<f64> {
    fn xy(&self) -> Result<(f64, f64), Error> {
        self.as_slice().xy()
    }
}

impl Position for [f64] {
    fn xy(&self) -> Result<(f64, f64), Error> {
        match self {
            [x, y, ..] => Ok((*x, *y)),
            _ => Err(Error::MalformedPosition { len: self.len() }),
        }
    }
}

impl<P: Position + ?Sized> Position for &P {
    fn xy(&self) -> Result<(f64, f64), Error> {
        (**self).xy()
    }
}

/// A validated input ring.
#[derive(Clone, Debug)]
pub struct RingIn {
    /// Distinct consecutive points, without the closing repeat.
    pub points: Vec<Location>,
    /// Is this the exterior ring of its polygon?
    pub is_exterior: bool,
    /// The ring's bounding box.
    pub bbox: Bbox,
}

impl RingIn {
    fn new<P: Position>(
        raw: &[P],
        is_exterior: bool,
        polygon: usize,
        ring: usize,
        rounder: &mut PtRounder,
    ) -> Result<Self, Error> {
        let mut points: Vec<Location> = Vec::with_capacity(raw.len());
        for pos in raw {
            let (x, y) = pos.xy()?;
            if !x.is_finite() || !y.is_finite() {
                return Err(Error::InvalidCoordinate { x, y });
            }
            let p = rounder.round(x, y);
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        let distinct = points.iter().collect::<HashSet<_>>().len();
        let bbox = match Bbox::from_locations(points.iter().copied()) {
            Some(bbox) if distinct >= 3 => bbox,
            _ => {
                return Err(Error::DegenerateRing {
                    polygon,
                    ring,
                    distinct,
                })
            }
        };
        Ok(RingIn {
            points,
            is_exterior,
            bbox,
        })
    }

    /// +1 if the area this ring covers lies to the left of its direction of
    /// travel, -1 if it lies to the right.
    ///
    /// Exterior rings cover their inside and holes cover their outside, so
    /// this is the ring's orientation, flipped for holes.
    pub fn sign(&self) -> i32 {
        let ccw = if signed_area2(&self.points) >= 0.0 {
            1
        } else {
            -1
        };
        if self.is_exterior {
            ccw
        } else {
            -ccw
        }
    }

    fn add_segments(&self, segs: &mut Segments, operand: Operand, ring_id: usize) {
        let sign = self.sign();
        let n = self.points.len();
        for (i, &a) in self.points.iter().enumerate() {
            let b = self.points[(i + 1) % n];
            segs.add_segment(a, b, operand, ring_id, sign);
        }
    }
}

/// A validated input polygon.
#[derive(Clone, Debug)]
pub struct PolyIn {
    /// The exterior ring followed by the holes.
    pub rings: Vec<RingIn>,
}

/// A validated operand.
#[derive(Clone, Debug)]
pub struct MultiPolyIn {
    /// The operand's polygons.
    pub polys: Vec<PolyIn>,
    /// Which side of the operation this is.
    pub operand: Operand,
    /// The bounding box of all polygons, or `None` if there are none.
    pub bbox: Option<Bbox>,
}

impl MultiPolyIn {
    /// Validates and rounds one operand.
    pub fn new<P: Position>(
        polygons: &[Vec<Vec<P>>],
        operand: Operand,
        rounder: &mut PtRounder,
    ) -> Result<Self, Error> {
        let mut polys = Vec::with_capacity(polygons.len());
        let mut bbox: Option<Bbox> = None;
        for (polygon_idx, polygon) in polygons.iter().enumerate() {
            if polygon.is_empty() {
                return Err(Error::DegenerateRing {
                    polygon: polygon_idx,
                    ring: 0,
                    distinct: 0,
                });
            }
            let rings = polygon
                .iter()
                .enumerate()
                .map(|(ring_idx, ring)| {
                    RingIn::new(ring, ring_idx == 0, polygon_idx, ring_idx, rounder)
                })
                .collect::<Result<Vec<_>, _>>()?;
            let poly_bbox = rings[0].bbox;
            bbox = Some(match bbox {
                Some(b) => b.union(&poly_bbox),
                None => poly_bbox,
            });
            polys.push(PolyIn { rings });
        }
        Ok(MultiPolyIn {
            polys,
            operand,
            bbox,
        })
    }

    /// The total number of rings.
    pub fn ring_count(&self) -> usize {
        self.polys.iter().map(|p| p.rings.len()).sum()
    }

    /// Adds a segment for every ring edge, numbering rings from `first_ring`.
    pub fn add_segments(&self, segs: &mut Segments, first_ring: usize) {
        let rings = self.polys.iter().flat_map(|p| &p.rings);
        for (i, ring) in rings.enumerate() {
            ring.add_segments(segs, self.operand, first_ring + i);
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn ring(points: &[(f64, f64)]) -> Vec<[f64; 2]> {
        points.iter().map(|&(x, y)| [x, y]).collect()
    }

    fn load(polygons: &[Vec<Vec<[f64; 2]>>]) -> Result<MultiPolyIn, Error> {
        MultiPolyIn::new(polygons, Operand::Subject, &mut PtRounder::new())
    }

    #[test]
    fn positions() {
        assert_eq!([1.0_f64, 2.0].xy().unwrap(), (1.0, 2.0));
        assert_eq!([1.0_f64, 2.0, 3.0].xy().unwrap(), (1.0, 2.0));
        assert_eq!((1.0_f64, 2.0_f64).xy().unwrap(), (1.0, 2.0));
        assert_eq!(vec![1.0_f64, 2.0, 3.0].xy().unwrap(), (1.0, 2.0));
        assert_eq!(kurbo::Point::new(1.0, 2.0).xy().unwrap(), (1.0, 2.0));
        assert_matches!(
            vec![1.0_f64].xy(),
            Err(Error::MalformedPosition { len: 1 })
        );
    }

    #[test]
    fn closing_point_is_optional() {
        let open = load(&[vec![ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])]]).unwrap();
        let closed = load(&[vec![ring(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 0.0),
        ])]])
        .unwrap();
        assert_eq!(open.polys[0].rings[0].points, closed.polys[0].rings[0].points);
        assert_eq!(open.polys[0].rings[0].points.len(), 3);
    }

    #[test]
    fn repeated_points_collapse() {
        let m = load(&[vec![ring(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (2.0, 2.0),
        ])]])
        .unwrap();
        assert_eq!(m.polys[0].rings[0].points.len(), 3);
    }

    #[test]
    fn rejects_bad_input() {
        assert_matches!(
            load(&[vec![ring(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)])]]),
            Err(Error::InvalidCoordinate { .. })
        );
        assert_matches!(
            load(&[vec![ring(&[(0.0, 0.0), (f64::INFINITY, 0.0), (1.0, 1.0)])]]),
            Err(Error::InvalidCoordinate { .. })
        );
        assert_matches!(
            load(&[
                vec![ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])],
                vec![ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)])],
            ]),
            Err(Error::DegenerateRing {
                polygon: 1,
                ring: 0,
                distinct: 2
            })
        );
        assert_matches!(
            load(&[vec![]]),
            Err(Error::DegenerateRing { polygon: 0, .. })
        );
    }

    #[test]
    fn ring_signs() {
        let ccw = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        let hole_ccw = ring(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        let hole_cw: Vec<_> = hole_ccw.iter().rev().copied().collect();

        let m = load(&[vec![ccw, hole_ccw], vec![cw, hole_cw]]).unwrap();
        let signs: Vec<i32> = m
            .polys
            .iter()
            .flat_map(|p| p.rings.iter().map(RingIn::sign))
            .collect();
        assert_eq!(signs, vec![1, -1, -1, 1]);
        assert_eq!(m.ring_count(), 4);
        assert_eq!(m.bbox.unwrap().area(), 16.0);
    }

    #[test]
    fn segments_carry_windings() {
        // Both orientations of the same square give the same windings.
        for points in [
            ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            ring(&[(0.0, 4.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)]),
        ] {
            let m = load(&[vec![points]]).unwrap();
            let mut segs = Segments::default();
            m.add_segments(&mut segs, 0);
            assert_eq!(segs.len(), 4);
            for seg in segs.indices() {
                let (l, r) = (segs.left_point(seg), segs.right_point(seg));
                // Upwards across the bottom edge, or leftwards across the
                // right edge, enters the square.
                let enters = (l.y == 0.0 && r.y == 0.0) || (l.x == 4.0 && r.x == 4.0);
                let expected = if enters { 1 } else { -1 };
                assert_eq!(segs[seg].windings.subject, expected, "{l:?}-{r:?}");
            }
        }
    }
}

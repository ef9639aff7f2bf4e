//! Snap-rounding of coordinates.
//!
//! Intersection points computed during the sweep carry floating-point noise:
//! the "same" coordinate can come out a few ulps apart depending on which
//! pair of segments produced it. Every coordinate entering the engine goes
//! through a [`PtRounder`], which keeps a sorted table of the values it has
//! handed out per axis and snaps any new value lying within
//! [`SNAP_TOLERANCE`] of a known one onto it.
//!
//! The tables live in the operation context and die with it; nothing is
//! shared between invocations.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::Bound;

use crate::geom::Location;
use crate::num::{float_cmp_within, CheapOrderedFloat, EPSILON};

/// The relative distance within which values get snapped together.
///
/// A crossing computed from a vertex lying exactly on another edge can be
/// off by a few ulps, so this is wider than [`float_cmp`](crate::num::float_cmp).
pub const SNAP_TOLERANCE: f64 = 16.0 * EPSILON;

/// Rounds values along a single axis.
#[derive(Clone, Debug, Default)]
pub struct AxisRounder {
    seen: BTreeSet<CheapOrderedFloat>,
}

impl AxisRounder {
    /// Snaps `coord` onto a previously seen value if one is close enough,
    /// and remembers it otherwise.
    ///
    /// `coord` must be finite.
    pub fn round(&mut self, coord: f64) -> f64 {
        debug_assert!(coord.is_finite());
        // Also turns -0.0 into 0.0.
        if coord == 0.0 {
            self.seen.insert(CheapOrderedFloat::from(0.0));
            return 0.0;
        }

        let key = CheapOrderedFloat::from(coord);
        if self.seen.contains(&key) {
            return coord;
        }

        let below = self
            .seen
            .range((Bound::Unbounded, Bound::Excluded(key)))
            .next_back()
            .map(|v| v.into_inner());
        if let Some(below) = below {
            if float_cmp_within(coord, below, SNAP_TOLERANCE) == Ordering::Equal {
                return below;
            }
        }

        let above = self
            .seen
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .map(|v| v.into_inner());
        if let Some(above) = above {
            if float_cmp_within(coord, above, SNAP_TOLERANCE) == Ordering::Equal {
                return above;
            }
        }

        self.seen.insert(key);
        coord
    }

    /// The number of distinct values handed out so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }
}

/// Rounds points, one [`AxisRounder`] per coordinate.
#[derive(Clone, Debug, Default)]
pub struct PtRounder {
    x: AxisRounder,
    y: AxisRounder,
}

impl PtRounder {
    /// Creates a rounder with empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds both coordinates of a point.
    pub fn round(&mut self, x: f64, y: f64) -> Location {
        Location::new(self.x.round(x), self.y.round(y))
    }

    /// The number of distinct `x` and `y` values handed out so far.
    pub fn table_sizes(&self) -> (usize, usize) {
        (self.x.len(), self.y.len())
    }
}

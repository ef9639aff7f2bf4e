#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod typed_vec;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
mod config;
mod geom;
mod geometry;
mod input;
mod num;
mod operation;
mod output;
mod rounder;
mod segments;
mod select;
mod sweep;

#[cfg(feature = "generators")]
pub mod generators;

// pub so that we can use it in fuzz tests, but it's really private
#[doc(hidden)]
pub mod treevec;

pub use config::Config;
pub use geometry::{geometry_op, Geometry};
pub use input::Position;
pub use output::{area, to_bez_path};
pub use select::Coverage;

use operation::Operation;

/// A closed ring: the first position is repeated at the end.
pub type Ring = Vec<[f64; 2]>;

/// A polygon: an exterior ring followed by zero or more holes.
pub type Polygon = Vec<Ring>;

/// A collection of polygons.
pub type MultiPolygon = Vec<Polygon>;

/// Binary operations between sets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanOp {
    /// A point is in the union of two sets if it is in either one.
    Union,
    /// A point is in the intersection of two sets if it is in both.
    Intersection,
    /// A point is in the difference of two sets if it is in the first but not the second.
    Difference,
    /// A point is in the exclusive-or of two sets if it is in one or the other, but not both.
    Xor,
}

/// The ways a boolean operation can fail.
///
/// None of these leave partial results behind: an operation either
/// completes or returns one of these.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// An input coordinate was infinite or NaN.
    #[error("invalid coordinate ({x}, {y}): coordinates must be finite")]
    InvalidCoordinate {
        /// The x coordinate.
        x: f64,
        /// The y coordinate.
        y: f64,
    },
    /// A position had fewer than two coordinates.
    #[error("a position needs at least two coordinates, but this one has {len}")]
    MalformedPosition {
        /// The number of coordinates.
        len: usize,
    },
    /// A ring had fewer than three distinct points, or a polygon had no rings.
    #[error("ring {ring} of polygon {polygon} has only {distinct} distinct points")]
    DegenerateRing {
        /// The index of the polygon within its operand.
        polygon: usize,
        /// The index of the ring within its polygon.
        ring: usize,
        /// The number of distinct points after rounding.
        distinct: usize,
    },
    /// A geometry that doesn't cover any area was used as an operand.
    #[error("boolean operations need polygons, not {0}")]
    UnsupportedOperandType(&'static str),
    /// The engine got into a state that should be impossible.
    ///
    /// This is a bug, not a problem with the input.
    #[error("internal consistency error: {0}")]
    InternalConsistency(String),
    /// A [`Config`] limit was exceeded.
    #[error("the {what} exceeded its limit of {limit}")]
    LimitExceeded {
        /// The limited quantity.
        what: &'static str,
        /// The configured limit.
        limit: usize,
    },
}

/// Computes a boolean operation between two multipolygons, with resource
/// limits taken from `config`.
///
/// Input rings may wind either way and may or may not repeat their first
/// position at the end. The output is normalized: rings are closed,
/// exteriors are counter-clockwise, holes are clockwise, and no two rings
/// cross.
#[tracing::instrument(skip_all, fields(op = ?op))]
pub fn boolean_op_with_config<P: Position, Q: Position>(
    op: BooleanOp,
    subject: &[Vec<Vec<P>>],
    clipping: &[Vec<Vec<Q>>],
    config: &Config,
) -> Result<MultiPolygon, Error> {
    Operation::new(op, config).run(subject, clipping)
}

/// Computes a boolean operation between two multipolygons.
///
/// ```
/// use sweepclip::{boolean_op, BooleanOp};
///
/// let a = vec![vec![vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]]];
/// let b = vec![vec![vec![[2.0, 2.0], [6.0, 2.0], [6.0, 6.0], [2.0, 6.0]]]];
/// let out = boolean_op(BooleanOp::Intersection, &a, &b).unwrap();
/// assert_eq!(
///     out,
///     vec![vec![vec![[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 4.0], [2.0, 2.0]]]]
/// );
/// ```
pub fn boolean_op<P: Position>(
    op: BooleanOp,
    subject: &[Vec<Vec<P>>],
    clipping: &[Vec<Vec<P>>],
) -> Result<MultiPolygon, Error> {
    boolean_op_with_config(op, subject, clipping, &Config::default())
}

/// Applies an operation to a subject and a sequence of clipping operands,
/// from left to right: `((subject op c1) op c2) ...`.
///
/// Every step runs as a separate operation with its own rounding tables.
/// Without any clipping operands, this returns the normalized subject.
pub fn boolean_op_multi<P, C>(
    op: BooleanOp,
    subject: &[Vec<Vec<P>>],
    clippings: &[C],
) -> Result<MultiPolygon, Error>
where
    P: Position,
    C: AsRef<[Vec<Vec<P>>]>,
{
    boolean_op_multi_with_config(op, subject, clippings, &Config::default())
}

/// Like [`boolean_op_multi`], with resource limits taken from `config`.
///
/// The limits apply to each step separately.
pub fn boolean_op_multi_with_config<P, C>(
    op: BooleanOp,
    subject: &[Vec<Vec<P>>],
    clippings: &[C],
    config: &Config,
) -> Result<MultiPolygon, Error>
where
    P: Position,
    C: AsRef<[Vec<Vec<P>>]>,
{
    let Some((first, rest)) = clippings.split_first() else {
        let nothing: &[Polygon] = &[];
        return boolean_op_with_config(BooleanOp::Union, subject, nothing, config);
    };

    let mut acc = boolean_op_with_config(op, subject, first.as_ref(), config)?;
    for clipping in rest {
        // Intersecting with or subtracting from nothing leaves nothing.
        if acc.is_empty() && matches!(op, BooleanOp::Intersection | BooleanOp::Difference) {
            break;
        }
        acc = boolean_op_with_config(op, &acc, clipping.as_ref(), config)?;
    }
    Ok(acc)
}

/// The union of two multipolygons.
pub fn union<P: Position>(
    subject: &[Vec<Vec<P>>],
    clipping: &[Vec<Vec<P>>],
) -> Result<MultiPolygon, Error> {
    boolean_op(BooleanOp::Union, subject, clipping)
}

/// The intersection of two multipolygons.
pub fn intersection<P: Position>(
    subject: &[Vec<Vec<P>>],
    clipping: &[Vec<Vec<P>>],
) -> Result<MultiPolygon, Error> {
    boolean_op(BooleanOp::Intersection, subject, clipping)
}

/// The part of `subject` not covered by `clipping`.
pub fn difference<P: Position>(
    subject: &[Vec<Vec<P>>],
    clipping: &[Vec<Vec<P>>],
) -> Result<MultiPolygon, Error> {
    boolean_op(BooleanOp::Difference, subject, clipping)
}

/// The symmetric difference of two multipolygons.
pub fn xor<P: Position>(
    subject: &[Vec<Vec<P>>],
    clipping: &[Vec<Vec<P>>],
) -> Result<MultiPolygon, Error> {
    boolean_op(BooleanOp::Xor, subject, clipping)
}

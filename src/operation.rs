//! One invocation of a boolean operation.
//!
//! Everything mutable that an operation needs (the coordinate rounder and
//! the segment arena) lives in an [`Operation`] and is dropped with it, so
//! concurrent operations never share state.

use crate::config::Config;
use crate::input::{MultiPolyIn, Position};
use crate::output;
use crate::rounder::PtRounder;
use crate::segments::{Operand, Segments};
use crate::select;
use crate::sweep;
use crate::{BooleanOp, Error, MultiPolygon};

/// The state of a single two-operand boolean operation.
pub struct Operation<'a> {
    op: BooleanOp,
    config: &'a Config,
    rounder: PtRounder,
}

impl<'a> Operation<'a> {
    /// Prepares an operation with fresh rounding tables.
    pub fn new(op: BooleanOp, config: &'a Config) -> Self {
        Operation {
            op,
            config,
            rounder: PtRounder::new(),
        }
    }

    /// Computes `subject <op> clipping`.
    pub fn run<P: Position, Q: Position>(
        mut self,
        subject: &[Vec<Vec<P>>],
        clipping: &[Vec<Vec<Q>>],
    ) -> Result<MultiPolygon, Error> {
        let subject = MultiPolyIn::new(subject, Operand::Subject, &mut self.rounder)?;
        let clipping = MultiPolyIn::new(clipping, Operand::Clipping, &mut self.rounder)?;

        if self.op == BooleanOp::Intersection {
            let disjoint = match (subject.bbox, clipping.bbox) {
                (Some(a), Some(b)) => a.overlap(&b).is_none(),
                _ => true,
            };
            if disjoint {
                tracing::debug!("operands don't overlap, intersection is empty");
                return Ok(Vec::new());
            }
        }

        let mut segments = Segments::default();
        subject.add_segments(&mut segments, 0);
        clipping.add_segments(&mut segments, subject.ring_count());
        tracing::debug!(
            subject_rings = subject.ring_count(),
            clipping_rings = clipping.ring_count(),
            segments = segments.len(),
            "ingested operands"
        );

        let outcome = sweep::sweep(segments, &mut self.rounder, self.config)?;
        let (xs, ys) = self.rounder.table_sizes();
        tracing::trace!(xs, ys, "distinct rounded coordinates");
        let edges = select::select(self.op, &outcome)?;
        output::assemble(&outcome.segments, &edges)
    }
}

//! Deciding which segments bound the result.
//!
//! After the sweep, every live segment knows the winding change across it and
//! the segment directly below it at insertion time. Summing windings along
//! that chain gives the coverage of the regions on both sides of a segment;
//! the segment belongs to the result exactly when the operation's region
//! predicate differs between the two sides.

use crate::segments::{SegIdx, SegVec, Segments, Windings};
use crate::sweep::SweepOutcome;
use crate::{BooleanOp, Error};

/// Which operands cover a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coverage {
    /// Is the region inside the subject?
    pub subject: bool,
    /// Is the region inside the clipping operand?
    pub clipping: bool,
}

impl From<Windings> for Coverage {
    fn from(w: Windings) -> Self {
        Coverage {
            subject: w.inside_subject(),
            clipping: w.inside_clipping(),
        }
    }
}

impl BooleanOp {
    /// Does the result of this operation cover a region with the given
    /// coverage?
    pub fn contains(self, c: Coverage) -> bool {
        match self {
            BooleanOp::Union => c.subject || c.clipping,
            BooleanOp::Intersection => c.subject && c.clipping,
            BooleanOp::Difference => c.subject && !c.clipping,
            BooleanOp::Xor => c.subject != c.clipping,
        }
    }

    /// Is an edge between regions with coverage `below` and `above` part of
    /// the result's boundary?
    pub fn keeps_edge(self, below: Coverage, above: Coverage) -> bool {
        self.contains(below) != self.contains(above)
    }
}

/// Accumulated windings of the region just below each segment.
///
/// Values are computed on demand and cached, walking down the chain of
/// `prev` links iteratively so that tall stacks of segments don't overflow
/// the call stack.
pub struct Classifier<'a> {
    segs: &'a Segments,
    below: SegVec<Option<Windings>>,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier with an empty cache.
    pub fn new(segs: &'a Segments) -> Self {
        let mut below = SegVec::with_capacity(segs.len());
        below.resize(segs.len(), None);
        Classifier { segs, below }
    }

    /// The windings of the region immediately below `seg`.
    pub fn windings_below(&mut self, seg: SegIdx) -> Result<Windings, Error> {
        if let Some(w) = self.below[seg] {
            return Ok(w);
        }

        // The segments whose value is still missing, top to bottom.
        let mut chain = Vec::new();
        let mut cur = seg;
        let known = loop {
            if let Some(w) = self.below[cur] {
                break Some((cur, w));
            }
            chain.push(cur);
            if chain.len() > self.segs.len() {
                return Err(Error::InternalConsistency(format!(
                    "cycle in the segments below {seg:?}"
                )));
            }
            match self.segs[cur].prev {
                Some(prev) => cur = self.segs.resolve(prev),
                None => break None,
            }
        };

        // Windings of the region below the lowest segment of the chain.
        let mut acc = match known {
            Some((s, w)) => w + self.segs[s].windings,
            None => Windings::default(),
        };
        for &s in chain.iter().rev() {
            self.below[s] = Some(acc);
            acc = acc + self.segs[s].windings;
        }
        Ok(self.below[seg].unwrap_or_default())
    }

    /// The windings of the region immediately above `seg`.
    pub fn windings_above(&mut self, seg: SegIdx) -> Result<Windings, Error> {
        Ok(self.windings_below(seg)? + self.segs[seg].windings)
    }
}

/// Returns the segments that bound the result of `op`, in processing order.
pub fn select(op: BooleanOp, outcome: &SweepOutcome) -> Result<Vec<SegIdx>, Error> {
    let segs = &outcome.segments;
    let mut classifier = Classifier::new(segs);
    let mut ret = Vec::new();
    for &seg in &outcome.processed {
        if segs.is_consumed(seg) {
            continue;
        }
        let below = classifier.windings_below(seg)?;
        let above = classifier.windings_above(seg)?;
        if op.keeps_edge(below.into(), above.into()) {
            ret.push(seg);
        }
    }
    tracing::debug!(?op, kept = ret.len(), "selected result edges");
    Ok(ret)
}

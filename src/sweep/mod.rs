//! The sweep-line pass.
//!
//! A vertical line sweeps from left to right over all segments of both
//! operands. Events (segment endpoints) are processed in the order of
//! [`EventQueue`]; the segments crossing the line are kept bottom-to-top in
//! the sweep status. Whenever two segments become neighbors in the status,
//! they are checked for an intersection and split at it, so that by the end
//! of the sweep no two segments cross or overlap except at endpoints, and
//! identical segments have been merged.
//!
//! Every segment also remembers its lower neighbor at the moment it was
//! (last) inserted. That link is all the later classification needs to
//! compute winding numbers.

mod queue;
mod sweep_line;

pub use queue::EventQueue;
pub use sweep_line::{sweep, SweepOutcome};

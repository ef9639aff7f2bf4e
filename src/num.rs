//! Float ordering and tolerant comparison.

use std::cmp::Ordering;
use std::hash::Hash;

/// Machine epsilon, used as the relative tolerance of [`float_cmp`].
pub const EPSILON: f64 = f64::EPSILON;

/// A wrapper for `f64` that implements `Ord`.
///
/// It compares with `<` and `>` and treats everything else as equal, so it is
/// only a total order on non-NaN values. The engine rejects NaNs before any
/// value gets wrapped.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CheapOrderedFloat(f64);

impl CheapOrderedFloat {
    /// Retrieve the inner `f64`.
    pub fn into_inner(self) -> f64 {
        self.0
    }
}

impl Hash for CheapOrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state)
    }
}

impl Eq for CheapOrderedFloat {}

impl PartialOrd for CheapOrderedFloat {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CheapOrderedFloat {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 < other.0 {
            Ordering::Less
        } else if self.0 > other.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl From<f64> for CheapOrderedFloat {
    fn from(value: f64) -> Self {
        CheapOrderedFloat(value)
    }
}

/// Compares two floats, treating values within a relative epsilon of each
/// other as equal.
///
/// Two values that are both within `EPSILON` of zero are equal. Otherwise
/// `a` and `b` are equal if `(a - b)^2 < EPSILON^2 * a * b`, which in
/// particular never holds for values of opposite sign.
pub fn float_cmp(a: f64, b: f64) -> Ordering {
    float_cmp_within(a, b, EPSILON)
}

/// Like [`float_cmp`], but with `rel` as the relative tolerance.
///
/// The absolute tolerance around zero stays at `EPSILON`.
pub fn float_cmp_within(a: f64, b: f64, rel: f64) -> Ordering {
    if -EPSILON < a && a < EPSILON && -EPSILON < b && b < EPSILON {
        return Ordering::Equal;
    }

    let ab = a - b;
    if ab * ab < rel * rel * a * b {
        return Ordering::Equal;
    }

    if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmp_near_zero() {
        assert_eq!(float_cmp(0.0, 1e-17), Ordering::Equal);
        assert_eq!(float_cmp(-1e-17, 1e-17), Ordering::Equal);
        assert_eq!(float_cmp(0.0, 1e-10), Ordering::Less);
    }

    #[test]
    fn cmp_relative() {
        let a = 1.0e6_f64;
        let b = f64::from_bits(a.to_bits() + 1);
        assert_eq!(float_cmp(a, b), Ordering::Equal);
        assert_eq!(float_cmp(a, a + 1.0), Ordering::Less);
        assert_eq!(float_cmp(a + 1.0, a), Ordering::Greater);
        assert_eq!(float_cmp(-1.0, 1.0), Ordering::Less);
    }

    #[test]
    fn cmp_within() {
        let a = 0.9999999999999997_f64;
        assert_eq!(float_cmp(a, 1.0), Ordering::Less);
        assert_eq!(float_cmp_within(a, 1.0, 16.0 * EPSILON), Ordering::Equal);
        assert_eq!(float_cmp_within(1.0 + 1e-12, 1.0, 16.0 * EPSILON), Ordering::Greater);
        assert_eq!(float_cmp_within(-a, 1.0, 1.0), Ordering::Less);
    }

    #[test]
    fn ordered_float() {
        let mut v: Vec<CheapOrderedFloat> = [3.0, -1.0, 2.5, 0.0]
            .into_iter()
            .map(CheapOrderedFloat::from)
            .collect();
        v.sort();
        let v: Vec<f64> = v.into_iter().map(CheapOrderedFloat::into_inner).collect();
        assert_eq!(v, vec![-1.0, 0.0, 2.5, 3.0]);
    }
}

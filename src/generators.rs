//! Operand pairs for examples, benchmarks, and test cases.

use crate::MultiPolygon;

/// Generate a bunch of squares, arranged in a grid, as one multipolygon.
///
/// The bottom-left of the first square is at (x0, y0). Each square has size `size
/// x size`, and the distance between squares (both horizontally and vertically)
/// is `offset`.
///
/// If `slant` is non-zero, generates parallelograms instead of squares: the
/// right-hand side of each square gets translated up by `slant`.
fn squares((x0, y0): (f64, f64), size: f64, offset: f64, slant: f64, count: usize) -> MultiPolygon {
    let mut ret = Vec::new();
    for i in 0..count {
        let x = x0 + i as f64 * offset;
        for j in 0..count {
            let y = y0 + j as f64 * offset;
            ret.push(vec![vec![
                [x, y],
                [x + size, y + slant],
                [x + size, y + size + slant],
                [x, y + size],
                [x, y],
            ]]);
        }
    }

    ret
}

/// Generate an `n` by `n` checkerboard-like pattern with overlapping squares.
/// For `n = 3`, it looks like:
///
/// ```text
/// ┌────┐ ┌────┐ ┌────┐
/// │    │ │    │ │    │
/// │  ┌─┼─┼─┐┌─┼─┼─┐  │
/// └──┼─┘ └─┼┼─┘ └─┼──┘
/// ┌──┼─┐ ┌─┼┼─┐ ┌─┼──┐
/// │  └─┼─┼─┘└─┼─┼─┘  │
/// │  ┌─┼─┼─┐┌─┼─┼─┐  │
/// └──┼─┘ └─┼┼─┘ └─┼──┘
/// ┌──┼─┐ ┌─┼┼─┐ ┌─┼──┐
/// │  └─┼─┼─┘└─┼─┼─┘  │
/// │    │ │    │ │    │
/// └────┘ └────┘ └────┘
/// ```
///
/// We return the pattern as two operands: the outer collection of `n x n`
/// non-overlapping squares, and the inner collection of `(n - 1) x (n - 1)`
/// non-overlapping squares.
pub fn checkerboard(n: usize) -> (MultiPolygon, MultiPolygon) {
    (
        squares((0.0, 0.0), 30.0, 40.0, 0.0, n),
        squares((20.0, 20.0), 30.0, 40.0, 0.0, n.saturating_sub(1)),
    )
}

/// Like `checkerboard`, but with no exactly-horizontal lines.
///
/// Horizontal edges get ordered by their left endpoint like any other edge,
/// but they line up with many events at once, so their presence or absence
/// can affect performance.
pub fn slanted_checkerboard(n: usize) -> (MultiPolygon, MultiPolygon) {
    (
        squares((0.0, 0.0), 30.0, 40.0, 1.0, n),
        squares((20.0, 20.0), 30.0, 40.0, 1.0, n.saturating_sub(1)),
    )
}

/// The "evens" are a bunch of long, skinny parallelograms going from
/// bottom-left to top-right. The "odds" go from bottom-right to top-left, so
/// every even crosses every odd.
pub fn slanties(n: usize) -> (MultiPolygon, MultiPolygon) {
    let h = 20.0 * n as f64;

    let mut even = Vec::new();
    let mut odd = Vec::new();
    for i in 0..n {
        let x_off = 20.0 * i as f64;
        even.push(vec![vec![
            [x_off, 0.0],
            [x_off + 10.0, 0.0],
            [x_off + h + 10.0, h],
            [x_off + h, h],
        ]]);

        odd.push(vec![vec![
            [x_off + h, 0.0],
            [x_off + h + 10.0, 0.0],
            [x_off + 10.0, h],
            [x_off, h],
        ]]);
    }

    (even, odd)
}

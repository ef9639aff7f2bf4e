//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::{MultiPolygon, Polygon, Ring};

/// Generate a coordinate on a grid of quarter units.
///
/// Coarse coordinates make shared vertices, collinear edges, and exact
/// crossings common, which is where most of the interesting cases are.
fn coord(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    Ok(f64::from(u.int_in_range(-32i8..=32)?) / 4.0)
}

/// Generate an axis-aligned rectangle with positive area, as a closed ring.
pub fn rectangle(u: &mut Unstructured<'_>) -> Result<Ring, arbitrary::Error> {
    let x0 = f64::from(u.int_in_range(-8i8..=7)?);
    let y0 = f64::from(u.int_in_range(-8i8..=7)?);
    let w = f64::from(u.int_in_range(1u8..=8)?);
    let h = f64::from(u.int_in_range(1u8..=8)?);
    Ok(vec![[x0, y0], [x0 + w, y0], [x0 + w, y0 + h], [x0, y0 + h], [x0, y0]])
}

/// Generate a triangle, which might be very thin.
///
/// Collinear or repeated points are nudged apart, so the triangle always has
/// three distinct points.
pub fn triangle(u: &mut Unstructured<'_>) -> Result<Ring, arbitrary::Error> {
    let a = [coord(u)?, coord(u)?];
    let mut b = [coord(u)?, coord(u)?];
    let mut c = [coord(u)?, coord(u)?];
    if b == a {
        b[0] += 1.0;
    }
    let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
    if cross == 0.0 {
        c = [a[0] - (b[1] - a[1]), a[1] + (b[0] - a[0])];
    }
    Ok(vec![a, b, c])
}

/// Generate a polygon: an exterior rectangle or triangle, sometimes with a
/// rectangular hole strictly inside it.
pub fn polygon(u: &mut Unstructured<'_>) -> Result<Polygon, arbitrary::Error> {
    if u.arbitrary()? {
        return Ok(vec![triangle(u)?]);
    }
    let exterior = rectangle(u)?;
    let [x0, y0] = exterior[0];
    let [x1, y1] = exterior[2];
    if x1 - x0 >= 3.0 && y1 - y0 >= 3.0 && u.arbitrary()? {
        let hole = vec![
            [x0 + 1.0, y0 + 1.0],
            [x0 + 1.0, y1 - 1.0],
            [x1 - 1.0, y1 - 1.0],
            [x1 - 1.0, y0 + 1.0],
        ];
        Ok(vec![exterior, hole])
    } else {
        Ok(vec![exterior])
    }
}

/// Generate a multipolygon with up to `max_polys` polygons.
///
/// The polygons may overlap each other.
pub fn multi_polygon(
    max_polys: usize,
    u: &mut Unstructured<'_>,
) -> Result<MultiPolygon, arbitrary::Error> {
    let len = u.int_in_range(0..=max_polys)?;
    std::iter::repeat_with(|| polygon(u)).take(len).collect()
}

/// Generate a multipolygon made only of rectangles, with up to `max_polys`
/// of them.
pub fn rectangles(
    max_polys: usize,
    u: &mut Unstructured<'_>,
) -> Result<MultiPolygon, arbitrary::Error> {
    let len = u.int_in_range(0..=max_polys)?;
    std::iter::repeat_with(|| rectangle(u).map(|r| vec![r]))
        .take(len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{area, boolean_op, BooleanOp};

    #[test]
    fn generated_polygons_are_valid() {
        arbtest::arbtest(|u| {
            let p = polygon(u)?;
            let polys = vec![p];
            assert!(area(&polys) > 0.0);
            let out = boolean_op(BooleanOp::Union, &polys, &[]).unwrap();
            assert!(!out.is_empty());
            Ok(())
        });
    }

    #[test]
    fn inclusion_exclusion() {
        arbtest::arbtest(|u| {
            // Normalize first, so that self-overlapping operands are counted once.
            let a = boolean_op(BooleanOp::Union, &rectangles(3, u)?, &[]).unwrap();
            let b = boolean_op(BooleanOp::Union, &rectangles(3, u)?, &[]).unwrap();
            let uni = area(&boolean_op(BooleanOp::Union, &a, &b).unwrap());
            let inter = area(&boolean_op(BooleanOp::Intersection, &a, &b).unwrap());
            let scale = area(&a) + area(&b) + 1.0;
            assert!((uni + inter - area(&a) - area(&b)).abs() <= 1e-9 * scale);
            Ok(())
        });
    }

    #[test]
    fn triangles_and_holes_add_up() {
        arbtest::arbtest(|u| {
            let a = boolean_op(BooleanOp::Union, &multi_polygon(3, u)?, &[]).unwrap();
            let b = boolean_op(BooleanOp::Union, &multi_polygon(3, u)?, &[]).unwrap();
            let op_area = |op| area(&boolean_op(op, &a, &b).unwrap());
            let uni = op_area(BooleanOp::Union);
            let inter = op_area(BooleanOp::Intersection);
            let diff = op_area(BooleanOp::Difference);
            let xor = op_area(BooleanOp::Xor);

            let (area_a, area_b) = (area(&a), area(&b));
            let tol = 1e-9 * (area_a + area_b + 1.0);
            assert!((uni + inter - area_a - area_b).abs() <= tol);
            assert!((diff + inter - area_a).abs() <= tol);
            assert!((xor + inter - uni).abs() <= tol);
            Ok(())
        });
    }
}

//! Tagged geometries, for callers that don't know in advance whether they
//! hold polygons.

use crate::{boolean_op_multi, BooleanOp, Error, MultiPolygon};

/// A geometry in the usual nested-coordinates layout, with positions as
/// vectors of two or more numbers.
///
/// With serde, this reads and writes the `type`/`coordinates` shape used by
/// GeoJSON geometries.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// A single position.
    Point(Vec<f64>),
    /// Several positions.
    MultiPoint(Vec<Vec<f64>>),
    /// A polyline.
    LineString(Vec<Vec<f64>>),
    /// Several polylines.
    MultiLineString(Vec<Vec<Vec<f64>>>),
    /// An exterior ring and its holes.
    Polygon(Vec<Vec<Vec<f64>>>),
    /// Several polygons.
    MultiPolygon(Vec<Vec<Vec<Vec<f64>>>>),
}

impl Geometry {
    /// The name of this kind of geometry.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// The polygons of an areal geometry.
    pub fn polygons(&self) -> Result<&[Vec<Vec<Vec<f64>>>], Error> {
        match self {
            Geometry::Polygon(p) => Ok(std::slice::from_ref(p)),
            Geometry::MultiPolygon(m) => Ok(m),
            other => Err(Error::UnsupportedOperandType(other.type_name())),
        }
    }

    /// Wraps an operation result: `None` if it's empty, a `Polygon` if it
    /// has a single polygon, and a `MultiPolygon` otherwise.
    pub fn from_result(mut result: MultiPolygon) -> Option<Geometry> {
        let convert = |polygon: Vec<Vec<[f64; 2]>>| -> Vec<Vec<Vec<f64>>> {
            polygon
                .into_iter()
                .map(|ring| ring.into_iter().map(|p| p.to_vec()).collect())
                .collect()
        };
        match result.len() {
            0 => None,
            1 => result.pop().map(|p| Geometry::Polygon(convert(p))),
            _ => Some(Geometry::MultiPolygon(
                result.into_iter().map(convert).collect(),
            )),
        }
    }
}

/// Applies `op` to a subject geometry and any number of clipping geometries,
/// folding from the left.
///
/// Every operand must be a `Polygon` or a `MultiPolygon`.
pub fn geometry_op(
    op: BooleanOp,
    subject: &Geometry,
    clippings: &[Geometry],
) -> Result<Option<Geometry>, Error> {
    let subject = subject.polygons()?;
    let clippings = clippings
        .iter()
        .map(Geometry::polygons)
        .collect::<Result<Vec<_>, _>>()?;
    let result = boolean_op_multi(op, subject, &clippings)?;
    Ok(Geometry::from_result(result))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Vec<Vec<f64>>> {
        vec![vec![
            vec![x0, y0],
            vec![x0 + size, y0],
            vec![x0 + size, y0 + size],
            vec![x0, y0 + size],
            vec![x0, y0],
        ]]
    }

    #[test]
    fn wraps_results() {
        let a = Geometry::Polygon(square(0.0, 0.0, 2.0));
        let b = Geometry::MultiPolygon(vec![square(1.0, 1.0, 2.0), square(10.0, 10.0, 1.0)]);

        assert_matches!(
            geometry_op(BooleanOp::Intersection, &a, &[b.clone()]),
            Ok(Some(Geometry::Polygon(rings))) if rings.len() == 1
        );
        assert_matches!(
            geometry_op(BooleanOp::Union, &a, &[b]),
            Ok(Some(Geometry::MultiPolygon(polys))) if polys.len() == 2
        );
        let far = Geometry::Polygon(square(20.0, 20.0, 1.0));
        assert_eq!(geometry_op(BooleanOp::Intersection, &a, &[far]), Ok(None));
    }

    #[test]
    fn rejects_non_areal() {
        let a = Geometry::Polygon(square(0.0, 0.0, 2.0));
        let line = Geometry::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
        assert_eq!(
            geometry_op(BooleanOp::Union, &a, &[line]),
            Err(Error::UnsupportedOperandType("LineString"))
        );
        assert_eq!(
            geometry_op(BooleanOp::Union, &Geometry::Point(vec![0.0, 0.0]), &[a]),
            Err(Error::UnsupportedOperandType("Point"))
        );
    }

    #[test]
    fn serde_shape() {
        let g: Geometry = serde_yaml::from_str(
            "type: Polygon\ncoordinates: [[[0, 0], [1, 0], [1, 1], [0, 0]]]\n",
        )
        .unwrap();
        assert_eq!(g.type_name(), "Polygon");
        assert_eq!(g.polygons().unwrap()[0][0].len(), 4);
    }
}

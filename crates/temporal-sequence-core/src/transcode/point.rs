//! 2-D points, written as Well-Known-Text.
//!
//! Frames carry points in one of the two GeoArrow native layouts:
//!
//! - a `Struct{x, y}` column ("separated" coordinates), or
//! - a `FixedSizeList<_, 2>` column ("interleaved" coordinates).
//!
//! Child values may be any numeric type. Anything else, including a bare
//! number or a WKT string column, is not a point value. There is no bulk
//! precheck for points: the structure is inspected while values are
//! extracted.

use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, AsArray, Float64Array, StructArray},
    datatypes::{DataType, Field, Fields, Float64Type},
};
use geo::{Geometry, Point};
use snafu::prelude::*;
use wkt::{ToWkt, TryFromWkt};

use super::{InstantTranscoder, cast_exact};
use crate::{
    column_type::TemporalKind,
    error::{
        ArrowSnafu, CodecResult, InvalidValueSnafu, NonPointGeometrySnafu,
        UnsupportedValueTypeSnafu,
    },
    frame::ensure_no_nulls,
};

/// Planar or geographic points.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointTranscoder;

/// Child fields of a decoded point column.
pub fn point_fields() -> Fields {
    Fields::from(vec![
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
    ])
}

impl InstantTranscoder for PointTranscoder {
    type Value = Point<f64>;

    const NAME: &'static str = "point";

    fn values(array: &ArrayRef, column: &str, kind: TemporalKind) -> CodecResult<Vec<Point<f64>>> {
        let not_a_point = || UnsupportedValueTypeSnafu {
            kind,
            column,
            expected: "point (Struct{x, y} or FixedSizeList[2])",
            datatype: array.data_type().clone(),
        };

        match array.data_type() {
            DataType::Struct(_) => {
                let points = array.as_struct_opt().with_context(not_a_point)?;
                ensure_no_nulls(points, column)?;
                let (Some(x), Some(y)) = (points.column_by_name("x"), points.column_by_name("y"))
                else {
                    return not_a_point().fail();
                };
                ensure!(is_numeric(x) && is_numeric(y), not_a_point());
                let x = float_coordinates(x, column, kind)?;
                let y = float_coordinates(y, column, kind)?;
                Ok(x.iter().zip(y.iter()).map(|(&x, &y)| Point::new(x, y)).collect())
            }
            DataType::FixedSizeList(_, 2) => {
                let points = array.as_fixed_size_list_opt().with_context(not_a_point)?;
                ensure_no_nulls(points, column)?;
                ensure!(is_numeric(points.values()), not_a_point());
                let coords = float_coordinates(points.values(), column, kind)?;
                Ok(coords
                    .chunks_exact(2)
                    .map(|xy| Point::new(xy[0], xy[1]))
                    .collect())
            }
            _ => not_a_point().fail(),
        }
    }

    fn write_instant(value: &Point<f64>) -> String {
        value.wkt_string()
    }

    /// Parse WKT, tolerating an EWKT `SRID=<n>;` prefix.
    fn read_instant(text: &str) -> CodecResult<Point<f64>> {
        let wkt_text = strip_srid(text);
        let geometry = Geometry::<f64>::try_from_wkt_str(wkt_text).map_err(|e| {
            InvalidValueSnafu {
                kind: Self::NAME,
                text,
                details: e.to_string(),
            }
            .build()
        })?;

        match geometry {
            Geometry::Point(point) => Ok(point),
            other => NonPointGeometrySnafu {
                geometry: geometry_name(&other),
            }
            .fail(),
        }
    }

    fn value_field(name: &str) -> Field {
        Field::new(name, DataType::Struct(point_fields()), false)
    }

    fn to_array(values: Vec<Point<f64>>) -> CodecResult<ArrayRef> {
        let x: ArrayRef = Arc::new(Float64Array::from_iter_values(values.iter().map(|p| p.x())));
        let y: ArrayRef = Arc::new(Float64Array::from_iter_values(values.iter().map(|p| p.y())));
        let points = StructArray::try_new(point_fields(), vec![x, y], None).context(ArrowSnafu)?;
        Ok(Arc::new(points))
    }
}

fn is_numeric(child: &ArrayRef) -> bool {
    let datatype = child.data_type();
    datatype.is_integer() || datatype.is_floating()
}

fn float_coordinates(child: &ArrayRef, column: &str, kind: TemporalKind) -> CodecResult<Vec<f64>> {
    let floats = cast_exact(child, &DataType::Float64, column, kind)?;
    Ok(floats.as_primitive::<Float64Type>().values().to_vec())
}

fn strip_srid(text: &str) -> &str {
    match text.split_once(';') {
        Some((prefix, rest)) if prefix.trim().to_ascii_uppercase().starts_with("SRID=") => {
            rest.trim()
        }
        _ => text,
    }
}

fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        _ => "Geometry",
    }
}

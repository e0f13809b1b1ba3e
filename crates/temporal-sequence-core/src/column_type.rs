//! Column type tags understood by the backing store.
//!
//! The ORM glue that registers column types is an external collaborator; it
//! only needs the tag string (`TBOOL`, `STBOX`, ...) and to know whether a
//! tag is a temporal sequence or an opaque scalar.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

/// Every column type tag the crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    /// Temporal boolean sequence.
    TBool,
    /// Temporal integer sequence.
    TInt,
    /// Temporal float sequence.
    TFloat,
    /// Temporal planar point sequence.
    TGeomPoint,
    /// Temporal geographic point sequence.
    TGeogPoint,
    /// Opaque time period.
    Period,
    /// Opaque set of time periods.
    PeriodSet,
    /// Opaque set of timestamps.
    TimestampSet,
    /// Opaque integer range.
    IntRange,
    /// Opaque float range.
    FloatRange,
    /// Opaque spatio-temporal bounding box.
    StBox,
    /// Opaque value/time bounding box.
    TBox,
}

impl ColumnType {
    /// All tags, temporal kinds first.
    pub const ALL: [ColumnType; 12] = [
        ColumnType::TBool,
        ColumnType::TInt,
        ColumnType::TFloat,
        ColumnType::TGeomPoint,
        ColumnType::TGeogPoint,
        ColumnType::Period,
        ColumnType::PeriodSet,
        ColumnType::TimestampSet,
        ColumnType::IntRange,
        ColumnType::FloatRange,
        ColumnType::StBox,
        ColumnType::TBox,
    ];

    /// The SQL column spec emitted for this type.
    pub const fn col_spec(&self) -> &'static str {
        match self {
            ColumnType::TBool => "TBOOL",
            ColumnType::TInt => "TINT",
            ColumnType::TFloat => "TFLOAT",
            ColumnType::TGeomPoint => "TGEOMPOINT",
            ColumnType::TGeogPoint => "TGEOGPOINT",
            ColumnType::Period => "PERIOD",
            ColumnType::PeriodSet => "PERIODSET",
            ColumnType::TimestampSet => "TIMESTAMPSET",
            ColumnType::IntRange => "INTRANGE",
            ColumnType::FloatRange => "FLOATRANGE",
            ColumnType::StBox => "STBOX",
            ColumnType::TBox => "TBOX",
        }
    }

    /// The sequence kind for temporal tags, `None` for opaque scalars.
    pub const fn temporal_kind(&self) -> Option<TemporalKind> {
        match self {
            ColumnType::TBool => Some(TemporalKind::Bool),
            ColumnType::TInt => Some(TemporalKind::Int),
            ColumnType::TFloat => Some(TemporalKind::Float),
            ColumnType::TGeomPoint => Some(TemporalKind::GeomPoint),
            ColumnType::TGeogPoint => Some(TemporalKind::GeogPoint),
            _ => None,
        }
    }

    /// `true` for the validated pass-through kinds with no sequence structure.
    pub const fn is_opaque_scalar(&self) -> bool {
        self.temporal_kind().is_none()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.col_spec())
    }
}

/// Error produced when a column type tag is not recognized.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(display("unknown column type tag '{tag}'"))]
pub struct ParseColumnTypeError {
    /// The tag as given by the caller.
    tag: String,
}

impl FromStr for ColumnType {
    type Err = ParseColumnTypeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let tag = input.trim();
        ColumnType::ALL
            .into_iter()
            .find(|ty| ty.col_spec().eq_ignore_ascii_case(tag))
            .context(ParseColumnTypeSnafu { tag })
    }
}

/// Value domain of a temporal sequence, fixed per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporalKind {
    /// Booleans written as `t`/`f`.
    Bool,
    /// 64-bit signed integers.
    Int,
    /// 64-bit floats.
    Float,
    /// Planar 2-D points.
    GeomPoint,
    /// Geographic 2-D points (longitude, latitude).
    GeogPoint,
}

impl TemporalKind {
    /// Column type tag for this kind.
    pub const fn column_type(&self) -> ColumnType {
        match self {
            TemporalKind::Bool => ColumnType::TBool,
            TemporalKind::Int => ColumnType::TInt,
            TemporalKind::Float => ColumnType::TFloat,
            TemporalKind::GeomPoint => ColumnType::TGeomPoint,
            TemporalKind::GeogPoint => ColumnType::TGeogPoint,
        }
    }

    /// Name of the frame column holding values when none is configured.
    ///
    /// Point kinds use `geometry` so frames line up with trajectory tooling.
    pub const fn default_value_column(&self) -> &'static str {
        if self.is_point() { "geometry" } else { "value" }
    }

    /// `true` for the two point kinds.
    pub const fn is_point(&self) -> bool {
        matches!(self, TemporalKind::GeomPoint | TemporalKind::GeogPoint)
    }
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_type().col_spec())
    }
}

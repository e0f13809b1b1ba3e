//! Error types and SNAFU context selectors for the codec layer.
//!
//! Every encode/decode failure surfaces as a [`CodecError`]. Callers that need
//! to react differently to "the data does not match the column kind", "the
//! wire text is malformed" and "an optional capability is not installed" can
//! branch on [`CodecError::class`] instead of matching every variant.

use arrow::{datatypes::DataType, error::ArrowError};
use snafu::prelude::*;

use crate::column_type::{ColumnType, TemporalKind};

/// Coarse classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The input values do not match the declared kind.
    Type,
    /// The wire text violates the sequence grammar.
    Parse,
    /// An optional collaborator was requested but is not available.
    CapabilityUnavailable,
}

/// Errors from encoding frames into wire text and decoding them back.
///
/// No variant is ever partially applied: an encode that fails produces no
/// string and a decode that fails produces no frame.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CodecError {
    /// The frame does not contain a column the codec needs.
    #[snafu(display("Frame is missing required {role} column {column}"))]
    MissingColumn {
        /// Name of the missing column.
        column: String,
        /// Either `"time"` or `"value"`.
        role: &'static str,
    },

    /// The value column's Arrow type is not acceptable for the kind.
    #[snafu(display("{kind} needs {expected} values in column {column}, got {datatype}"))]
    UnsupportedValueType {
        /// Kind the codec was configured for.
        kind: TemporalKind,
        /// Name of the offending column.
        column: String,
        /// Human-readable description of what the kind accepts.
        expected: &'static str,
        /// Arrow type actually found.
        datatype: DataType,
    },

    /// The time column is not an Arrow timestamp.
    #[snafu(display("Unsupported time column {column} with type {datatype}"))]
    UnsupportedTimeType {
        /// Name of the time column.
        column: String,
        /// Arrow type actually found.
        datatype: DataType,
    },

    /// A null was found where every row must carry a value.
    #[snafu(display("Null entry in column {column} at row {row}"))]
    NullValue {
        /// Name of the column holding the null.
        column: String,
        /// Row index of the first null.
        row: usize,
    },

    /// A value could not be represented in the kind's canonical type.
    #[snafu(display("Value in column {column} at row {row} is out of range for {kind}"))]
    ValueOutOfRange {
        /// Kind the codec was configured for.
        kind: TemporalKind,
        /// Name of the offending column.
        column: String,
        /// Row index of the offending value.
        row: usize,
    },

    /// A stored timestamp does not fit in the supported calendar range.
    #[snafu(display("Timestamp {raw} in column {column} is outside the representable range"))]
    TimestampOutOfRange {
        /// Name of the time column.
        column: String,
        /// Raw integer value in the column's unit.
        raw: i64,
    },

    /// WKT parsed fine but described something other than a point.
    #[snafu(display("Expected Point, got {geometry}"))]
    NonPointGeometry {
        /// Geometry type name that was parsed instead.
        geometry: &'static str,
    },

    /// A sequence needs at least one instant.
    #[snafu(display("Cannot encode an empty temporal sequence"))]
    EmptySequence,

    /// An opaque scalar was bound to a column of a different type.
    #[snafu(display("{column_type} column cannot store a {value_type} value"))]
    ScalarKindMismatch {
        /// Type of the column being written.
        column_type: ColumnType,
        /// Type tag carried by the value.
        value_type: ColumnType,
    },

    /// A column type that is not an opaque scalar was used as one.
    #[snafu(display("{column_type} is not an opaque scalar column type"))]
    NotScalarColumn {
        /// The offending column type.
        column_type: ColumnType,
    },

    /// Trajectory mode expects a trajectory and got a bare frame, or the reverse.
    #[snafu(display("Column expects a {expected} value, got a {actual}"))]
    ColumnValueMismatch {
        /// Shape the column is configured for.
        expected: &'static str,
        /// Shape that was supplied.
        actual: &'static str,
    },

    /// The wire text is not wrapped in `[`/`(` and `]`/`)`.
    #[snafu(display("Sequence {text:?} is not wrapped in bound brackets"))]
    MissingBounds {
        /// The (possibly truncated) offending text.
        text: String,
    },

    /// Brackets were present but nothing was between them.
    #[snafu(display("Sequence {text:?} contains no instants"))]
    EmptyWireSequence {
        /// The offending text.
        text: String,
    },

    /// An instant lacks the `@` separating value from timestamp.
    #[snafu(display("Instant {instant:?} is missing the '@' separator"))]
    MissingInstantSeparator {
        /// The offending instant text.
        instant: String,
    },

    /// The timestamp half of an instant could not be parsed.
    #[snafu(display("Invalid timestamp {text:?}"))]
    InvalidTimestamp {
        /// The offending timestamp text.
        text: String,
    },

    /// The value half of an instant could not be parsed for the kind.
    #[snafu(display("Invalid {kind} instant value {text:?}: {details}"))]
    InvalidValue {
        /// Short name of the value kind (`bool`, `int`, `float`, `point`).
        kind: &'static str,
        /// The offending value text.
        text: String,
        /// Parser diagnostics.
        details: String,
    },

    /// Restored scalar text was blank.
    #[snafu(display("Empty {column_type} value"))]
    EmptyScalar {
        /// Type of the column being read.
        column_type: ColumnType,
    },

    /// Arrow failed while assembling the decoded frame.
    #[snafu(display("Arrow error while building decoded frame: {source}"))]
    Arrow {
        /// Underlying Arrow error.
        source: ArrowError,
    },

    /// The trajectory adapter reported a problem with the frame it was given.
    #[snafu(display("Trajectory conversion failed: {details}"))]
    Trajectory {
        /// Adapter diagnostics.
        details: String,
    },

    /// An optional collaborator is not installed in this build.
    #[snafu(display(
        "{capability} is an optional feature and is not available; \
         enable the `{feature}` cargo feature or inject an adapter"
    ))]
    CapabilityUnavailable {
        /// Human-readable name of the missing capability.
        capability: &'static str,
        /// Cargo feature that provides it.
        feature: &'static str,
    },
}

impl CodecError {
    /// Classify this error as bad data, bad wire text, or a missing capability.
    pub fn class(&self) -> ErrorClass {
        match self {
            CodecError::MissingColumn { .. }
            | CodecError::UnsupportedValueType { .. }
            | CodecError::UnsupportedTimeType { .. }
            | CodecError::NullValue { .. }
            | CodecError::ValueOutOfRange { .. }
            | CodecError::TimestampOutOfRange { .. }
            | CodecError::NonPointGeometry { .. }
            | CodecError::EmptySequence
            | CodecError::ScalarKindMismatch { .. }
            | CodecError::NotScalarColumn { .. }
            | CodecError::ColumnValueMismatch { .. }
            | CodecError::Trajectory { .. } => ErrorClass::Type,

            CodecError::MissingBounds { .. }
            | CodecError::EmptyWireSequence { .. }
            | CodecError::MissingInstantSeparator { .. }
            | CodecError::InvalidTimestamp { .. }
            | CodecError::InvalidValue { .. }
            | CodecError::EmptyScalar { .. }
            | CodecError::Arrow { .. } => ErrorClass::Parse,

            CodecError::CapabilityUnavailable { .. } => ErrorClass::CapabilityUnavailable,
        }
    }

    /// Shorthand for `self.class() == ErrorClass::Type`.
    pub fn is_type_error(&self) -> bool {
        self.class() == ErrorClass::Type
    }

    /// Shorthand for `self.class() == ErrorClass::Parse`.
    pub fn is_parse_error(&self) -> bool {
        self.class() == ErrorClass::Parse
    }
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;

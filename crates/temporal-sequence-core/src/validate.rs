//! Whole-column type checks run before any instant is written.
//!
//! A single offending row rejects the entire frame. Arrow columns are
//! homogeneous, so "every value is of kind K" reduces to a check of the
//! column's `DataType`; null entries are caught separately when values are
//! extracted.

use arrow::datatypes::DataType;
use snafu::prelude::*;

use crate::{
    column_type::TemporalKind,
    error::{CodecResult, UnsupportedValueTypeSnafu},
};

/// Per-kind predicate over the value column's Arrow type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeValidator {
    /// Only `Boolean`.
    Boolean,
    /// Any signed or unsigned integer type.
    Integer,
    /// Any integer or floating point type.
    Numeric,
    /// No bulk check; points are checked while extracting each instant.
    Deferred,
}

impl TypeValidator {
    /// The validator that guards `kind`.
    pub const fn for_kind(kind: TemporalKind) -> Self {
        match kind {
            TemporalKind::Bool => TypeValidator::Boolean,
            TemporalKind::Int => TypeValidator::Integer,
            TemporalKind::Float => TypeValidator::Numeric,
            TemporalKind::GeomPoint | TemporalKind::GeogPoint => TypeValidator::Deferred,
        }
    }

    /// What the validator accepts, for error messages.
    pub const fn expected(&self) -> &'static str {
        match self {
            TypeValidator::Boolean => "bool",
            TypeValidator::Integer => "int",
            TypeValidator::Numeric => "numeric",
            TypeValidator::Deferred => "point",
        }
    }

    /// `true` if a column of `datatype` passes this validator.
    pub fn accepts(&self, datatype: &DataType) -> bool {
        match self {
            TypeValidator::Boolean => matches!(datatype, DataType::Boolean),
            TypeValidator::Integer => datatype.is_integer(),
            TypeValidator::Numeric => datatype.is_integer() || datatype.is_floating(),
            TypeValidator::Deferred => true,
        }
    }

    /// Check the value column of a frame destined for a `kind` column.
    pub fn validate(&self, kind: TemporalKind, column: &str, datatype: &DataType) -> CodecResult<()> {
        ensure!(
            self.accepts(datatype),
            UnsupportedValueTypeSnafu {
                kind,
                column,
                expected: self.expected(),
                datatype: datatype.clone(),
            }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn boolean_accepts_only_boolean() {
        let v = TypeValidator::for_kind(TemporalKind::Bool);
        assert!(v.accepts(&DataType::Boolean));
        for dt in [DataType::Int64, DataType::UInt8, DataType::Float64, DataType::Utf8] {
            assert!(!v.accepts(&dt), "{dt}");
        }
    }

    #[test]
    fn integer_rejects_floats_and_booleans() {
        let v = TypeValidator::for_kind(TemporalKind::Int);
        for dt in [DataType::Int8, DataType::Int32, DataType::Int64, DataType::UInt64] {
            assert!(v.accepts(&dt), "{dt}");
        }
        for dt in [DataType::Float64, DataType::Boolean, DataType::Utf8] {
            assert!(!v.accepts(&dt), "{dt}");
        }
    }

    #[test]
    fn numeric_accepts_ints_and_floats() {
        let v = TypeValidator::for_kind(TemporalKind::Float);
        for dt in [DataType::Int64, DataType::Float32, DataType::Float64, DataType::Float16] {
            assert!(v.accepts(&dt), "{dt}");
        }
        for dt in [DataType::Boolean, DataType::Utf8, DataType::LargeUtf8] {
            assert!(!v.accepts(&dt), "{dt}");
        }
    }

    #[test]
    fn points_are_deferred() {
        assert_eq!(
            TypeValidator::for_kind(TemporalKind::GeomPoint),
            TypeValidator::Deferred
        );
        assert!(TypeValidator::Deferred.accepts(&DataType::Float64));
    }

    #[test]
    fn validate_reports_kind_and_type() {
        let err = TypeValidator::Boolean
            .validate(TemporalKind::Bool, "value", &DataType::Int64)
            .unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedValueType { .. }));
        assert_eq!(
            err.to_string(),
            "TBOOL needs bool values in column value, got Int64"
        );
    }
}

//! Pass-through handling for opaque scalar columns.
//!
//! Period, range and box columns are stored as text the store already knows
//! how to parse. The only thing checked on the way in is that a value tagged
//! for one column type is not written into a column of another; on the way
//! out the text is wrapped again with the column's tag.

use std::fmt;

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::{
    column_type::ColumnType,
    error::{CodecResult, EmptyScalarSnafu, NotScalarColumnSnafu, ScalarKindMismatchSnafu},
};

/// Text of a period, range or box value, tagged with its column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpaqueScalar {
    kind: ColumnType,
    text: String,
}

impl OpaqueScalar {
    /// Tag `text` as a value of `kind`.
    ///
    /// Fails if `kind` is a temporal sequence type.
    pub fn new(kind: ColumnType, text: impl Into<String>) -> CodecResult<Self> {
        ensure!(kind.is_opaque_scalar(), NotScalarColumnSnafu { column_type: kind });
        Ok(OpaqueScalar {
            kind,
            text: text.into(),
        })
    }

    /// Column type this value belongs to.
    pub fn kind(&self) -> ColumnType {
        self.kind
    }

    /// Stored text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for OpaqueScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Binder for one opaque scalar column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarColumn {
    column_type: ColumnType,
}

impl ScalarColumn {
    /// Binder for `column_type`, which must be an opaque scalar type.
    pub fn new(column_type: ColumnType) -> CodecResult<Self> {
        ensure!(column_type.is_opaque_scalar(), NotScalarColumnSnafu { column_type });
        Ok(ScalarColumn { column_type })
    }

    /// The column's type tag.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Text to store for `value`.
    pub fn bind(&self, value: &OpaqueScalar) -> CodecResult<String> {
        ensure!(
            value.kind == self.column_type,
            ScalarKindMismatchSnafu {
                column_type: self.column_type,
                value_type: value.kind,
            }
        );
        Ok(value.text.clone())
    }

    /// Wrap text read back from the store.
    pub fn restore(&self, text: &str) -> CodecResult<OpaqueScalar> {
        let text = text.trim();
        ensure!(
            !text.is_empty(),
            EmptyScalarSnafu {
                column_type: self.column_type
            }
        );
        Ok(OpaqueScalar {
            kind: self.column_type,
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn bind_and_restore_pass_text_through() -> CodecResult<()> {
        let column = ScalarColumn::new(ColumnType::Period)?;
        let period = OpaqueScalar::new(
            ColumnType::Period,
            "[2019-09-08 00:00:00+00, 2019-09-10 00:00:00+00]",
        )?;
        let text = column.bind(&period)?;
        assert_eq!(text, period.text());
        assert_eq!(column.restore(&text)?, period);
        Ok(())
    }

    #[test]
    fn bind_rejects_other_scalar_kinds() -> CodecResult<()> {
        let column = ScalarColumn::new(ColumnType::IntRange)?;
        let value = OpaqueScalar::new(ColumnType::FloatRange, "[1.5, 2.5)")?;
        let err = column.bind(&value).unwrap_err();
        assert!(matches!(err, CodecError::ScalarKindMismatch { .. }));
        assert!(err.is_type_error());
        assert_eq!(err.to_string(), "INTRANGE column cannot store a FLOATRANGE value");
        Ok(())
    }

    #[test]
    fn temporal_types_are_not_scalars() {
        for column_type in [ColumnType::TBool, ColumnType::TGeomPoint] {
            let err = ScalarColumn::new(column_type).unwrap_err();
            assert!(matches!(err, CodecError::NotScalarColumn { .. }));
            assert!(OpaqueScalar::new(column_type, "x").is_err());
        }
    }

    #[test]
    fn every_opaque_type_has_a_binder() {
        let binders = ColumnType::ALL
            .iter()
            .filter_map(|t| ScalarColumn::new(*t).ok())
            .count();
        assert_eq!(binders, 7);
    }

    #[test]
    fn restore_rejects_blank_text() {
        let column = ScalarColumn::new(ColumnType::StBox).expect("scalar");
        let err = column.restore("  ").unwrap_err();
        assert!(matches!(err, CodecError::EmptyScalar { .. }));
        assert!(err.is_parse_error());
    }
}

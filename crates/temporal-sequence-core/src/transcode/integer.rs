//! 64-bit integers, written as plain decimal digits.

use std::sync::Arc;

use arrow::{
    array::{ArrayRef, AsArray, Int64Array},
    datatypes::{DataType, Field, Int64Type},
};
use snafu::prelude::*;

use super::{InstantTranscoder, cast_exact};
use crate::{
    column_type::TemporalKind,
    error::{CodecResult, InvalidValueSnafu, UnsupportedValueTypeSnafu},
};

/// 64-bit signed integers, written as plain decimal digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntTranscoder;

impl InstantTranscoder for IntTranscoder {
    type Value = i64;

    const NAME: &'static str = "int";

    fn values(array: &ArrayRef, column: &str, kind: TemporalKind) -> CodecResult<Vec<i64>> {
        ensure!(
            array.data_type().is_integer(),
            UnsupportedValueTypeSnafu {
                kind,
                column,
                expected: "int",
                datatype: array.data_type().clone(),
            }
        );
        let ints = cast_exact(array, &DataType::Int64, column, kind)?;
        Ok(ints.as_primitive::<Int64Type>().values().to_vec())
    }

    fn write_instant(value: &i64) -> String {
        value.to_string()
    }

    fn read_instant(text: &str) -> CodecResult<i64> {
        text.parse::<i64>().map_err(|e| {
            InvalidValueSnafu {
                kind: Self::NAME,
                text,
                details: e.to_string(),
            }
            .build()
        })
    }

    fn value_field(name: &str) -> Field {
        Field::new(name, DataType::Int64, false)
    }

    fn to_array(values: Vec<i64>) -> CodecResult<ArrayRef> {
        Ok(Arc::new(Int64Array::from(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use arrow::array::{Float64Array, Int16Array, UInt32Array};

    #[test]
    fn write_read_plain_digits() {
        assert_eq!(IntTranscoder::write_instant(&-42), "-42");
        assert_eq!(IntTranscoder::write_instant(&1_000_000), "1000000");
        assert_eq!(IntTranscoder::read_instant("9").expect("int"), 9);
        assert_eq!(IntTranscoder::read_instant("-17").expect("int"), -17);
    }

    #[test]
    fn read_rejects_non_integers() {
        for text in ["8.1", "eight", "", "1e3"] {
            let err = IntTranscoder::read_instant(text).unwrap_err();
            assert!(matches!(err, CodecError::InvalidValue { .. }), "{text:?}");
        }
    }

    #[test]
    fn narrower_and_unsigned_integers_widen() {
        let array: ArrayRef = Arc::new(Int16Array::from(vec![1, 2]));
        assert_eq!(
            IntTranscoder::values(&array, "value", TemporalKind::Int).expect("values"),
            vec![1, 2]
        );

        let array: ArrayRef = Arc::new(UInt32Array::from(vec![u32::MAX]));
        assert_eq!(
            IntTranscoder::values(&array, "value", TemporalKind::Int).expect("values"),
            vec![i64::from(u32::MAX)]
        );
    }

    #[test]
    fn floats_are_not_integers() {
        let array: ArrayRef = Arc::new(Float64Array::from(vec![8.0]));
        let err = IntTranscoder::values(&array, "value", TemporalKind::Int).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedValueType { .. }));
    }
}

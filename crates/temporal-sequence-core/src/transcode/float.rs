//! 64-bit floats, written as the shortest decimal that reads back exactly.

use std::sync::Arc;

use arrow::{
    array::{ArrayRef, AsArray, Float64Array},
    datatypes::{DataType, Field, Float64Type},
};
use snafu::prelude::*;

use super::{InstantTranscoder, cast_exact};
use crate::{
    column_type::TemporalKind,
    error::{CodecResult, InvalidValueSnafu, UnsupportedValueTypeSnafu},
};

/// 64-bit floats. Integer columns are accepted and widened.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatTranscoder;

impl InstantTranscoder for FloatTranscoder {
    type Value = f64;

    const NAME: &'static str = "float";

    fn values(array: &ArrayRef, column: &str, kind: TemporalKind) -> CodecResult<Vec<f64>> {
        let datatype = array.data_type();
        ensure!(
            datatype.is_integer() || datatype.is_floating(),
            UnsupportedValueTypeSnafu {
                kind,
                column,
                expected: "numeric",
                datatype: datatype.clone(),
            }
        );
        let floats = cast_exact(array, &DataType::Float64, column, kind)?;
        Ok(floats.as_primitive::<Float64Type>().values().to_vec())
    }

    /// Shortest decimal that parses back to the same `f64`.
    fn write_instant(value: &f64) -> String {
        value.to_string()
    }

    fn read_instant(text: &str) -> CodecResult<f64> {
        text.parse::<f64>().map_err(|e| {
            InvalidValueSnafu {
                kind: Self::NAME,
                text,
                details: e.to_string(),
            }
            .build()
        })
    }

    fn value_field(name: &str) -> Field {
        Field::new(name, DataType::Float64, false)
    }

    fn to_array(values: Vec<f64>) -> CodecResult<ArrayRef> {
        Ok(Arc::new(Float64Array::from(values)))
    }
}

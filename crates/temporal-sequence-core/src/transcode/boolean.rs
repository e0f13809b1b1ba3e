//! Booleans, written as `t` / `f`.

use std::sync::Arc;

use arrow::{
    array::{ArrayRef, AsArray, BooleanArray},
    datatypes::{DataType, Field},
};
use snafu::prelude::*;

use super::InstantTranscoder;
use crate::{
    column_type::TemporalKind,
    error::{CodecResult, InvalidValueSnafu, UnsupportedValueTypeSnafu},
    frame::ensure_no_nulls,
};

/// Booleans, written as `t` / `f`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolTranscoder;

impl InstantTranscoder for BoolTranscoder {
    type Value = bool;

    const NAME: &'static str = "bool";

    fn values(array: &ArrayRef, column: &str, kind: TemporalKind) -> CodecResult<Vec<bool>> {
        let bools = array.as_boolean_opt().context(UnsupportedValueTypeSnafu {
            kind,
            column,
            expected: "bool",
            datatype: array.data_type().clone(),
        })?;
        ensure_no_nulls(bools, column)?;
        Ok(bools.values().iter().collect())
    }

    fn write_instant(value: &bool) -> String {
        let text = if *value { "t" } else { "f" };
        text.to_string()
    }

    fn read_instant(text: &str) -> CodecResult<bool> {
        match text {
            "t" => Ok(true),
            "f" => Ok(false),
            other => InvalidValueSnafu {
                kind: Self::NAME,
                text: other,
                details: "expected 't' or 'f'",
            }
            .fail(),
        }
    }

    fn value_field(name: &str) -> Field {
        Field::new(name, DataType::Boolean, false)
    }

    fn to_array(values: Vec<bool>) -> CodecResult<ArrayRef> {
        Ok(Arc::new(BooleanArray::from(values)))
    }
}

//! Arrow frame plumbing shared by every kind.
//!
//! A frame is a `RecordBatch` with one time column and one value column.
//! Input frames may use any Arrow timestamp unit, with or without timezone
//! metadata; Arrow stores timestamps as offsets from the Unix epoch either
//! way, so naive timestamps are read as UTC. Decoded frames always use
//! microsecond timestamps tagged `UTC`, matching the store's resolution.

use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, AsArray, RecordBatch, TimestampMicrosecondArray},
    datatypes::{
        DataType, Field, Schema, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType,
        TimestampNanosecondType, TimestampSecondType,
    },
};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::{
    column_type::TemporalKind,
    error::{
        ArrowSnafu, CodecResult, MissingColumnSnafu, NullValueSnafu, TimestampOutOfRangeSnafu,
        UnsupportedTimeTypeSnafu,
    },
};

/// Default name of the time column.
pub const DEFAULT_TIME_COLUMN: &str = "t";

/// Timezone tag attached to decoded time columns.
pub const UTC_TZ: &str = "UTC";

/// Names of the two columns a codec reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameLayout {
    /// Column holding the timestamps.
    pub time_column: String,
    /// Column holding the values.
    pub value_column: String,
}

impl FrameLayout {
    /// Default layout for `kind`: `t` plus `value` (or `geometry` for points).
    pub fn for_kind(kind: TemporalKind) -> Self {
        FrameLayout {
            time_column: DEFAULT_TIME_COLUMN.to_string(),
            value_column: kind.default_value_column().to_string(),
        }
    }

    pub(crate) fn value_array<'a>(&self, batch: &'a RecordBatch) -> CodecResult<&'a ArrayRef> {
        column(batch, &self.value_column, "value")
    }

    pub(crate) fn time_array<'a>(&self, batch: &'a RecordBatch) -> CodecResult<&'a ArrayRef> {
        column(batch, &self.time_column, "time")
    }

    /// Assemble a decoded frame from already-sorted timestamps and values.
    pub(crate) fn build(
        &self,
        timestamps: &[DateTime<Utc>],
        value_field: Field,
        values: ArrayRef,
    ) -> CodecResult<RecordBatch> {
        let micros: Vec<i64> = timestamps.iter().map(|ts| ts.timestamp_micros()).collect();
        let times: ArrayRef =
            Arc::new(TimestampMicrosecondArray::from(micros).with_timezone(UTC_TZ));

        let schema = Schema::new(vec![
            Field::new(
                self.time_column.as_str(),
                DataType::Timestamp(TimeUnit::Microsecond, Some(UTC_TZ.into())),
                false,
            ),
            value_field,
        ]);

        RecordBatch::try_new(Arc::new(schema), vec![times, values]).context(ArrowSnafu)
    }
}

fn column<'a>(
    batch: &'a RecordBatch,
    name: &str,
    role: &'static str,
) -> CodecResult<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .context(MissingColumnSnafu { column: name, role })
}

/// Fail with `NullValue` on the first null in `array`.
pub(crate) fn ensure_no_nulls(array: &dyn Array, column: &str) -> CodecResult<()> {
    if array.null_count() == 0 {
        return Ok(());
    }
    let row = (0..array.len()).find(|&i| array.is_null(i)).unwrap_or(0);
    NullValueSnafu { column, row }.fail()
}

/// Years the wire format can spell with four digits.
pub(crate) const WIRE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Convert a raw epoch offset in `unit` to a UTC timestamp at the store's
/// microsecond resolution.
///
/// Nanosecond values are floored to the microsecond, so rows that differ
/// only below a microsecond become the same instant. Timestamps outside
/// [`WIRE_YEARS`] yield `None`.
fn from_epoch(raw: i64, unit: TimeUnit) -> Option<DateTime<Utc>> {
    let micros = match unit {
        TimeUnit::Second => raw.checked_mul(1_000_000)?,
        TimeUnit::Millisecond => raw.checked_mul(1_000)?,
        TimeUnit::Microsecond => raw,
        TimeUnit::Nanosecond => raw.div_euclid(1_000),
    };
    DateTime::from_timestamp_micros(micros).filter(|ts| WIRE_YEARS.contains(&ts.year()))
}

/// Downcast a timestamp column to its concrete array type and convert every
/// value to `DateTime<Utc>`.
macro_rules! read_ts_column {
    ($arrow_ty:ty, $array:expr, $unit:expr, $column:expr) => {{
        let arr = $array
            .as_primitive_opt::<$arrow_ty>()
            .context(UnsupportedTimeTypeSnafu {
                column: $column,
                datatype: $array.data_type().clone(),
            })?;
        arr.values()
            .iter()
            .map(|&raw| {
                from_epoch(raw, $unit).context(TimestampOutOfRangeSnafu {
                    column: $column,
                    raw,
                })
            })
            .collect::<CodecResult<Vec<_>>>()
    }};
}

/// Read every timestamp of `array`, rejecting nulls and non-timestamp types.
pub(crate) fn read_timestamps(array: &ArrayRef, column: &str) -> CodecResult<Vec<DateTime<Utc>>> {
    let unit = match array.data_type() {
        DataType::Timestamp(unit, _) => *unit,
        other => {
            return UnsupportedTimeTypeSnafu {
                column,
                datatype: other.clone(),
            }
            .fail();
        }
    };

    ensure_no_nulls(array.as_ref(), column)?;

    match unit {
        TimeUnit::Second => read_ts_column!(TimestampSecondType, array, unit, column),
        TimeUnit::Millisecond => read_ts_column!(TimestampMillisecondType, array, unit, column),
        TimeUnit::Microsecond => read_ts_column!(TimestampMicrosecondType, array, unit, column),
        TimeUnit::Nanosecond => read_ts_column!(TimestampNanosecondType, array, unit, column),
    }
}

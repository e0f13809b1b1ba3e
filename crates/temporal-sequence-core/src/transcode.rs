//! Per-kind conversion between frame values and instant value text.
//!
//! Each kind implements [`InstantTranscoder`], the small capability set the
//! generic codec needs: pull typed values out of an Arrow column, write one
//! value as wire text, read it back, and rebuild an Arrow column.
//!
//! | kind  | frame column            | wire text      |
//! |-------|-------------------------|----------------|
//! | bool  | `Boolean`               | `t` / `f`      |
//! | int   | any integer             | decimal digits |
//! | float | any integer or float    | shortest round-trip decimal |
//! | point | `Struct{x, y}` or `FixedSizeList[2]` | `POINT(x y)` |

use std::fmt;

use arrow::{
    array::{Array, ArrayRef},
    compute::cast,
    datatypes::{DataType, Field},
};

use crate::{
    column_type::TemporalKind,
    error::{CodecResult, ValueOutOfRangeSnafu},
    frame::ensure_no_nulls,
};

pub mod boolean;
pub mod float;
pub mod integer;
pub mod point;

pub use boolean::BoolTranscoder;
pub use float::FloatTranscoder;
pub use integer::IntTranscoder;
pub use point::PointTranscoder;

/// Conversion capability for one value kind.
///
/// Implementations are stateless; every method is an associated function.
pub trait InstantTranscoder {
    /// In-memory value type of an instant.
    type Value: Clone + PartialEq + fmt::Debug + Send + Sync;

    /// Short kind name used in parse diagnostics.
    const NAME: &'static str;

    /// Extract every value of `array`.
    ///
    /// Runs after the bulk type check; fails on nulls, on values that do not
    /// fit the canonical type and, for deferred kinds, on structural problems.
    fn values(array: &ArrayRef, column: &str, kind: TemporalKind) -> CodecResult<Vec<Self::Value>>;

    /// Render one value as instant text.
    fn write_instant(value: &Self::Value) -> String;

    /// Parse one instant's value text.
    fn read_instant(text: &str) -> CodecResult<Self::Value>;

    /// Field describing a decoded value column named `name`.
    fn value_field(name: &str) -> Field;

    /// Build a decoded value column.
    fn to_array(values: Vec<Self::Value>) -> CodecResult<ArrayRef>;
}

/// Cast `array` to `target`, treating anything the cast turns into a null as
/// out of range for `kind`.
///
/// Callers must have rejected input nulls first so every null in the output
/// can be attributed to the cast.
pub(crate) fn cast_exact(
    array: &ArrayRef,
    target: &DataType,
    column: &str,
    kind: TemporalKind,
) -> CodecResult<ArrayRef> {
    ensure_no_nulls(array.as_ref(), column)?;

    if array.data_type() == target {
        return Ok(array.clone());
    }

    let casted = match cast(array, target) {
        Ok(casted) => casted,
        Err(_) => return ValueOutOfRangeSnafu { kind, column, row: 0usize }.fail(),
    };

    if let Some(row) = (0..casted.len()).find(|&i| casted.is_null(i)) {
        return ValueOutOfRangeSnafu { kind, column, row }.fail();
    }

    Ok(casted)
}

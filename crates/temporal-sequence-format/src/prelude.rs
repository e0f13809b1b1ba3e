//! Wrapper prelude.
//!
//! The `temporal-sequence-format` crate is the supported public entry point.
//! Downstream code should prefer importing from this prelude instead of
//! depending on internal core module paths.

pub use crate::operators::{self, OperatorToken, Predicate, ResultKind};
pub use crate::trajectory::{ReferenceSystem, Trajectory, TrajectoryAdapter};
pub use crate::{
    BoundSpec, CodecError, CodecResult, ColumnConfig, ColumnType, ColumnValue, ConfigError,
    ErrorClass, FrameLayout, Instant, OpaqueScalar, ScalarColumn, SequenceCodec, TemporalKind,
    TemporalSequence,
};

//! Core codec for temporal sequence columns.
//!
//! This crate provides the foundational pieces for `temporal-sequence-format`:
//!
//! - A bracketed wire format for temporal sequences
//!   (`[v@ts, v@ts, ...]`), with per-kind value text for booleans,
//!   integers, floats and WKT points (`wire` and `transcode` modules).
//! - Codecs that turn an Arrow `RecordBatch` with a time column and a value
//!   column into that text and back, validating the whole column before
//!   anything is written (`codec` and `validate` modules).
//! - An optional trajectory adapter for point columns, injected into the
//!   codec and gated by the `trajectory` cargo feature (`trajectory` module).
//! - The closed table of comparison and distance operator tokens used to
//!   build query expressions over temporal columns (`operators` module).
//! - Pass-through binders for opaque period, range and box columns
//!   (`scalar` module) and serde-based per-column configuration (`config`
//!   module).
//!
//! Everything here is pure and stateless: codecs hold immutable
//! configuration only and can be shared across threads. Integration crates
//! (ORM glue, query builders) are expected to depend on this crate rather
//! than re-implementing the wire format.
#![deny(missing_docs)]
pub mod bounds;
pub mod codec;
pub mod column_type;
pub mod config;
pub mod error;
pub mod frame;
pub mod operators;
pub mod scalar;
pub mod sequence;
pub mod trajectory;
pub mod transcode;
pub mod validate;
pub mod wire;

pub use bounds::BoundSpec;
pub use codec::{
    BoolCodec, ColumnValue, FloatCodec, IntCodec, PointCodec, PointFrameCodec, SequenceCodec,
    TemporalCodec,
};
pub use column_type::{ColumnType, TemporalKind};
pub use config::{ColumnConfig, ConfigError, ConfigResult};
pub use error::{CodecError, CodecResult, ErrorClass};
pub use frame::FrameLayout;
pub use operators::{OperatorToken, Predicate, ResultKind, UnknownOperatorError};
pub use scalar::{OpaqueScalar, ScalarColumn};
pub use sequence::{Instant, TemporalSequence};
pub use trajectory::{ReferenceSystem, Trajectory, TrajectoryAdapter};

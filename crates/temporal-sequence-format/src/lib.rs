//! # temporal-sequence-format
//!
//! Wire codecs for temporal sequence columns: Arrow frames in, bracketed
//! `[v@ts, v@ts]` text out, and back again.
//!
//! This crate is the supported public entry point and provides a small, stable surface.
//!
//! ## Features
//!
//! - `trajectory` (default): Builds the frame-backed trajectory adapter used
//!   by point columns in trajectory mode.
//!
//! ## Example
//!
//! ```rust,ignore
//! use temporal_sequence_format::prelude::*;
//!
//! let codec = ColumnConfig::from_json(r#"{"column_type": "TFLOAT"}"#)?.build_codec()?;
//! let text = codec.encode(&frame)?;
//! ```

/// Convenience prelude with the stable, supported surface.
pub mod prelude;

/// Operator token namespace (wrapper-only).
pub mod operators {
    pub use temporal_sequence_core::operators::{
        LSHIFT, OperatorToken, Predicate, RSHIFT, ResultKind, UnknownOperatorError, lookup,
    };
}

/// Trajectory namespace (wrapper-only).
pub mod trajectory {
    pub use temporal_sequence_core::trajectory::{
        DEFAULT_TRAJECTORY_ID, ReferenceSystem, Trajectory, TrajectoryAdapter,
        default_trajectory_adapter, trajectory_adapter_for,
    };

    #[cfg(feature = "trajectory")]
    pub use temporal_sequence_core::trajectory::FrameTrajectoryAdapter;
}

pub use temporal_sequence_core::bounds::BoundSpec;
pub use temporal_sequence_core::codec::{
    BoolCodec, ColumnValue, FloatCodec, IntCodec, PointCodec, PointFrameCodec, SequenceCodec,
    TemporalCodec,
};
pub use temporal_sequence_core::column_type::{ColumnType, ParseColumnTypeError, TemporalKind};
pub use temporal_sequence_core::config::{ColumnConfig, ConfigError, ConfigResult};
pub use temporal_sequence_core::error::{CodecError, CodecResult, ErrorClass};
pub use temporal_sequence_core::frame::FrameLayout;
pub use temporal_sequence_core::scalar::{OpaqueScalar, ScalarColumn};
pub use temporal_sequence_core::sequence::{Instant, TemporalSequence};

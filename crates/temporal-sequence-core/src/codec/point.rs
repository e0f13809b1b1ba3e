//! Point columns, with optional trajectory mode.

use std::sync::Arc;

use arrow::array::RecordBatch;
use log::debug;
use snafu::prelude::*;

use super::PointFrameCodec;
use crate::{
    bounds::BoundSpec,
    column_type::TemporalKind,
    error::{CapabilityUnavailableSnafu, CodecResult, ColumnValueMismatchSnafu},
    frame::FrameLayout,
    trajectory::{ReferenceSystem, Trajectory, TrajectoryAdapter},
};

/// What a column hands to, and receives from, the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// A bare time/value frame.
    Frame(RecordBatch),
    /// A point trajectory (trajectory mode only).
    Trajectory(Trajectory),
}

impl ColumnValue {
    /// Short name of the shape, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            ColumnValue::Frame(_) => "frame",
            ColumnValue::Trajectory(_) => "trajectory",
        }
    }

    pub(crate) fn mismatch<T>(&self, expected: &'static str) -> CodecResult<T> {
        ColumnValueMismatchSnafu {
            expected,
            actual: self.shape(),
        }
        .fail()
    }
}

/// Codec for `TGEOMPOINT` / `TGEOGPOINT` columns.
///
/// With trajectory mode off it behaves exactly like its inner
/// [`PointFrameCodec`]. With trajectory mode on, [`PointCodec::write`] expects
/// a [`Trajectory`] and [`PointCodec::read`] produces one, using the injected
/// adapter. The adapter is only consulted at call time, so a codec can be
/// configured for trajectory mode in a build that lacks one.
#[derive(Debug, Clone)]
pub struct PointCodec {
    inner: PointFrameCodec,
    trajectory_mode: bool,
    adapter: Option<Arc<dyn TrajectoryAdapter>>,
    crs: ReferenceSystem,
}

impl PointCodec {
    /// Wrap a frame codec; trajectory mode off, default CRS, no adapter.
    pub fn new(inner: PointFrameCodec) -> Self {
        PointCodec {
            inner,
            trajectory_mode: false,
            adapter: None,
            crs: ReferenceSystem::default(),
        }
    }

    /// Turn trajectory mode on or off.
    pub fn with_trajectory_mode(mut self, enabled: bool) -> Self {
        self.trajectory_mode = enabled;
        self
    }

    /// Install (or remove) the trajectory adapter.
    pub fn with_adapter(mut self, adapter: Option<Arc<dyn TrajectoryAdapter>>) -> Self {
        self.adapter = adapter;
        self
    }

    /// Reference system given to decoded trajectories.
    pub fn with_crs(mut self, crs: ReferenceSystem) -> Self {
        self.crs = crs;
        self
    }

    /// Replace the frame column names.
    pub fn with_layout(mut self, layout: FrameLayout) -> Self {
        self.inner = self.inner.with_layout(layout);
        self
    }

    /// The frame-only codec.
    pub fn frame_codec(&self) -> &PointFrameCodec {
        &self.inner
    }

    /// `TemporalKind::GeomPoint` or `TemporalKind::GeogPoint`.
    pub fn kind(&self) -> TemporalKind {
        self.inner.kind()
    }

    /// Bounds written on encode.
    pub fn bounds(&self) -> BoundSpec {
        self.inner.bounds()
    }

    /// Frame column names.
    pub fn layout(&self) -> &FrameLayout {
        self.inner.layout()
    }

    /// `true` if reads produce trajectories.
    pub fn trajectory_mode(&self) -> bool {
        self.trajectory_mode
    }

    /// Reference system given to decoded trajectories.
    pub fn crs(&self) -> ReferenceSystem {
        self.crs
    }

    /// Encode a point frame.
    pub fn encode(&self, frame: &RecordBatch) -> CodecResult<String> {
        self.inner.encode(frame)
    }

    /// Decode wire text into a point frame.
    pub fn decode(&self, text: &str) -> CodecResult<RecordBatch> {
        self.inner.decode(text)
    }

    /// Encode a trajectory through the adapter.
    pub fn encode_trajectory(&self, trajectory: &Trajectory) -> CodecResult<String> {
        let frame = self.adapter()?.to_tabular(trajectory)?;
        debug!(
            "encoding trajectory {} ({}) with {} observations",
            trajectory.id,
            trajectory.crs,
            frame.num_rows()
        );
        self.inner.encode(&frame)
    }

    /// Decode wire text into a trajectory tagged with this codec's CRS.
    pub fn decode_trajectory(&self, text: &str) -> CodecResult<Trajectory> {
        let adapter = self.adapter()?;
        let frame = self.inner.decode(text)?;
        adapter.from_tabular(frame, self.crs)
    }

    /// Encode whichever shape the column is configured for.
    pub fn write(&self, value: &ColumnValue) -> CodecResult<String> {
        match (self.trajectory_mode, value) {
            (false, ColumnValue::Frame(frame)) => self.encode(frame),
            (true, ColumnValue::Trajectory(trajectory)) => self.encode_trajectory(trajectory),
            (false, other) => other.mismatch("frame"),
            (true, other) => other.mismatch("trajectory"),
        }
    }

    /// Decode into whichever shape the column is configured for.
    pub fn read(&self, text: &str) -> CodecResult<ColumnValue> {
        if self.trajectory_mode {
            self.decode_trajectory(text).map(ColumnValue::Trajectory)
        } else {
            self.decode(text).map(ColumnValue::Frame)
        }
    }

    fn adapter(&self) -> CodecResult<&Arc<dyn TrajectoryAdapter>> {
        self.adapter.as_ref().context(CapabilityUnavailableSnafu {
            capability: "trajectory conversion",
            feature: "trajectory",
        })
    }
}

//! Optional conversion between point frames and trajectory objects.
//!
//! A point codec in trajectory mode hands callers a [`Trajectory`] instead of
//! a bare frame. The conversion itself is delegated to a
//! [`TrajectoryAdapter`], which is injected into the codec. When no adapter
//! is available, trajectory-mode calls fail with
//! [`CodecError::CapabilityUnavailable`](crate::error::CodecError::CapabilityUnavailable)
//! instead of panicking or silently returning a frame.
//!
//! The built-in [`FrameTrajectoryAdapter`] is compiled in with the
//! `trajectory` cargo feature (on by default).

use std::{fmt, sync::Arc};

use arrow::array::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::{column_type::TemporalKind, error::CodecResult, frame::FrameLayout};

/// Id given to trajectories built from decoded frames.
pub const DEFAULT_TRAJECTORY_ID: u64 = 1;

/// Coordinate reference system, identified by its EPSG code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceSystem {
    /// EPSG registry code.
    pub epsg: u32,
}

impl ReferenceSystem {
    /// MGI / Austria GK East, the metric system trajectories default to.
    pub const METRIC: ReferenceSystem = ReferenceSystem::epsg(31256);

    /// WGS 84 longitude/latitude.
    pub const WGS84: ReferenceSystem = ReferenceSystem::epsg(4326);

    /// Reference system for an EPSG code.
    pub const fn epsg(code: u32) -> Self {
        ReferenceSystem { epsg: code }
    }
}

impl Default for ReferenceSystem {
    fn default() -> Self {
        ReferenceSystem::METRIC
    }
}

impl fmt::Display for ReferenceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

/// An identified, CRS-tagged sequence of timestamped points.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Trajectory identifier.
    pub id: u64,
    /// Reference system the coordinates are expressed in.
    pub crs: ReferenceSystem,
    frame: RecordBatch,
}

impl Trajectory {
    /// Wrap a point frame.
    ///
    /// The frame is not inspected here; adapters validate it.
    pub fn new(id: u64, crs: ReferenceSystem, frame: RecordBatch) -> Self {
        Trajectory { id, crs, frame }
    }

    /// The underlying point frame.
    pub fn frame(&self) -> &RecordBatch {
        &self.frame
    }

    /// Consume the trajectory, returning its frame.
    pub fn into_frame(self) -> RecordBatch {
        self.frame
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.frame.num_rows()
    }

    /// `true` if the trajectory has no observations.
    pub fn is_empty(&self) -> bool {
        self.frame.num_rows() == 0
    }
}

/// Converts between point frames and trajectories.
///
/// Implementations must be shareable across threads; codecs hold them as
/// `Arc<dyn TrajectoryAdapter>`.
pub trait TrajectoryAdapter: fmt::Debug + Send + Sync {
    /// Extract the point frame to encode.
    fn to_tabular(&self, trajectory: &Trajectory) -> CodecResult<RecordBatch>;

    /// Wrap a decoded point frame.
    fn from_tabular(&self, frame: RecordBatch, crs: ReferenceSystem) -> CodecResult<Trajectory>;
}

/// The adapter compiled into this build, if any, for the default point
/// layout (`t` / `geometry`).
///
/// Returns `None` when the `trajectory` feature is disabled.
pub fn default_trajectory_adapter() -> Option<Arc<dyn TrajectoryAdapter>> {
    trajectory_adapter_for(FrameLayout::for_kind(TemporalKind::GeomPoint))
}

/// The adapter compiled into this build, if any, for frames using `layout`.
///
/// Returns `None` when the `trajectory` feature is disabled.
pub fn trajectory_adapter_for(layout: FrameLayout) -> Option<Arc<dyn TrajectoryAdapter>> {
    #[cfg(feature = "trajectory")]
    {
        Some(Arc::new(FrameTrajectoryAdapter::new(layout)))
    }
    #[cfg(not(feature = "trajectory"))]
    {
        let _ = layout;
        None
    }
}

#[cfg(feature = "trajectory")]
pub use frame_adapter::FrameTrajectoryAdapter;

#[cfg(feature = "trajectory")]
mod frame_adapter {
    use arrow::{array::RecordBatch, datatypes::DataType};
    use snafu::prelude::*;

    use super::{DEFAULT_TRAJECTORY_ID, ReferenceSystem, Trajectory, TrajectoryAdapter};
    use crate::{
        column_type::TemporalKind,
        error::{CodecResult, TrajectorySnafu},
        frame::FrameLayout,
    };

    /// Minimum number of observations a trajectory is made of.
    pub const MIN_OBSERVATIONS: usize = 2;

    /// Adapter that keeps the point frame as-is and checks its shape.
    ///
    /// A trajectory needs a timestamp column, a geometry column and at least
    /// two observations.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FrameTrajectoryAdapter {
        layout: FrameLayout,
    }

    impl Default for FrameTrajectoryAdapter {
        fn default() -> Self {
            FrameTrajectoryAdapter::new(FrameLayout::for_kind(TemporalKind::GeomPoint))
        }
    }

    impl FrameTrajectoryAdapter {
        /// Adapter for frames that use `layout`'s column names.
        pub fn new(layout: FrameLayout) -> Self {
            FrameTrajectoryAdapter { layout }
        }

        fn check(&self, frame: &RecordBatch) -> CodecResult<()> {
            let schema = frame.schema();
            let time = schema.field_with_name(&self.layout.time_column).ok();
            ensure!(
                time.is_some_and(|f| matches!(f.data_type(), DataType::Timestamp(_, _))),
                TrajectorySnafu {
                    details: format!("no timestamp column named {}", self.layout.time_column),
                }
            );
            ensure!(
                schema.field_with_name(&self.layout.value_column).is_ok(),
                TrajectorySnafu {
                    details: format!("no geometry column named {}", self.layout.value_column),
                }
            );
            ensure!(
                frame.num_rows() >= MIN_OBSERVATIONS,
                TrajectorySnafu {
                    details: format!(
                        "a trajectory needs at least {MIN_OBSERVATIONS} observations, got {}",
                        frame.num_rows()
                    ),
                }
            );
            Ok(())
        }
    }

    impl TrajectoryAdapter for FrameTrajectoryAdapter {
        fn to_tabular(&self, trajectory: &Trajectory) -> CodecResult<RecordBatch> {
            self.check(trajectory.frame())?;
            Ok(trajectory.frame().clone())
        }

        fn from_tabular(&self, frame: RecordBatch, crs: ReferenceSystem) -> CodecResult<Trajectory> {
            self.check(&frame)?;
            Ok(Trajectory::new(DEFAULT_TRAJECTORY_ID, crs, frame))
        }
    }
}

//! Per-column configuration.
//!
//! A [`ColumnConfig`] is the serialized description of one column: its type
//! tag, the bounds written on encode, the frame column names and, for point
//! columns, trajectory mode and reference system. It is usually read from
//! JSON:
//!
//! ```json
//! { "column_type": "TGEOMPOINT", "right_closed": false, "trajectory": true }
//! ```
//!
//! Every field except `column_type` has a default.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::{
    bounds::BoundSpec,
    codec::SequenceCodec,
    column_type::{ColumnType, TemporalKind},
    frame::{DEFAULT_TIME_COLUMN, FrameLayout},
    scalar::ScalarColumn,
    trajectory::{ReferenceSystem, TrajectoryAdapter, trajectory_adapter_for},
};

/// Errors from reading or applying a column configuration.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    /// The configuration text is not valid JSON for a [`ColumnConfig`].
    #[snafu(display("Invalid column configuration: {source}"))]
    Json {
        /// Underlying serde_json error.
        source: serde_json::Error,
    },

    /// A sequence codec was requested for a non-temporal column type.
    #[snafu(display("{column_type} is not a temporal sequence column type"))]
    NotTemporal {
        /// The configured type.
        column_type: ColumnType,
    },

    /// A scalar binder was requested for a temporal column type.
    #[snafu(display("{column_type} is not an opaque scalar column type"))]
    NotScalar {
        /// The configured type.
        column_type: ColumnType,
    },

    /// Trajectory mode was enabled on a column that does not hold points.
    #[snafu(display("Trajectory mode requires a point column, got {column_type}"))]
    TrajectoryNeedsPoints {
        /// The configured type.
        column_type: ColumnType,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_true() -> bool {
    true
}

fn default_time_column() -> String {
    DEFAULT_TIME_COLUMN.to_string()
}

fn default_crs_epsg() -> u32 {
    ReferenceSystem::METRIC.epsg
}

/// Serialized description of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Column type tag, e.g. `"TFLOAT"`.
    pub column_type: ColumnType,
    /// Whether the first instant is included.
    #[serde(default = "default_true")]
    pub left_closed: bool,
    /// Whether the last instant is included.
    #[serde(default = "default_true")]
    pub right_closed: bool,
    /// Name of the frame's time column.
    #[serde(default = "default_time_column")]
    pub time_column: String,
    /// Name of the frame's value column; `value` or `geometry` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_column: Option<String>,
    /// Point columns only: read and write trajectories instead of frames.
    #[serde(default)]
    pub trajectory: bool,
    /// Point columns only: EPSG code given to decoded trajectories.
    #[serde(default = "default_crs_epsg")]
    pub crs_epsg: u32,
}

impl ColumnConfig {
    /// Defaults for `column_type`.
    pub fn new(column_type: ColumnType) -> Self {
        ColumnConfig {
            column_type,
            left_closed: true,
            right_closed: true,
            time_column: default_time_column(),
            value_column: None,
            trajectory: false,
            crs_epsg: default_crs_epsg(),
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        serde_json::from_str(text).context(JsonSnafu)
    }

    /// Serialize this configuration as JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string(self).context(JsonSnafu)
    }

    /// Configured bounds.
    pub fn bounds(&self) -> BoundSpec {
        BoundSpec::new(self.left_closed, self.right_closed)
    }

    /// Configured reference system.
    pub fn crs(&self) -> ReferenceSystem {
        ReferenceSystem::epsg(self.crs_epsg)
    }

    /// Frame column names for a temporal column.
    pub fn layout(&self) -> ConfigResult<FrameLayout> {
        let kind = self.temporal_kind()?;
        Ok(FrameLayout {
            time_column: self.time_column.clone(),
            value_column: self
                .value_column
                .clone()
                .unwrap_or_else(|| kind.default_value_column().to_string()),
        })
    }

    /// Build the codec, using this build's trajectory adapter for the
    /// configured column names.
    pub fn build_codec(&self) -> ConfigResult<SequenceCodec> {
        let adapter = match self.column_type.temporal_kind() {
            Some(kind) if kind.is_point() => trajectory_adapter_for(self.layout()?),
            _ => None,
        };
        self.build_codec_with(adapter)
    }

    /// Build the codec with an explicit trajectory adapter (or none).
    ///
    /// The adapter is ignored for non-point columns. A point column in
    /// trajectory mode with no adapter still builds; using it fails at call
    /// time.
    pub fn build_codec_with(
        &self,
        adapter: Option<Arc<dyn TrajectoryAdapter>>,
    ) -> ConfigResult<SequenceCodec> {
        let kind = self.temporal_kind()?;
        ensure!(
            !self.trajectory || kind.is_point(),
            TrajectoryNeedsPointsSnafu {
                column_type: self.column_type
            }
        );

        let codec = SequenceCodec::new(kind, self.bounds()).with_layout(self.layout()?);
        let codec = match codec {
            SequenceCodec::Point(point) => SequenceCodec::Point(
                point
                    .with_trajectory_mode(self.trajectory)
                    .with_adapter(adapter)
                    .with_crs(self.crs()),
            ),
            other => other,
        };

        debug!(
            "built {} codec (bounds {:?}, trajectory {})",
            self.column_type,
            codec.bounds().glyphs(),
            self.trajectory
        );
        Ok(codec)
    }

    /// Build the binder for an opaque scalar column.
    pub fn scalar_column(&self) -> ConfigResult<ScalarColumn> {
        ScalarColumn::new(self.column_type).map_err(|_| {
            NotScalarSnafu {
                column_type: self.column_type,
            }
            .build()
        })
    }

    fn temporal_kind(&self) -> ConfigResult<TemporalKind> {
        self.column_type.temporal_kind().context(NotTemporalSnafu {
            column_type: self.column_type,
        })
    }
}

//! Frame <-> wire text conversion for temporal sequence columns.
//!
//! [`TemporalCodec`] is generic over an [`InstantTranscoder`] and holds only
//! immutable configuration: the column kind, the [`BoundSpec`] written on
//! encode, and the [`FrameLayout`] naming the time and value columns.
//! [`SequenceCodec`] selects the right instantiation for a runtime
//! [`TemporalKind`].
//!
//! Encoding runs the whole-column type check first, then extracts every
//! value, then sorts and de-duplicates. Nothing is written until all rows
//! have been accepted, so a single bad row yields an error and no text.
//!
//! Decoding discards the bound glyphs. Re-encoding a decoded frame uses the
//! codec's configured bounds, not the ones that were read.

use std::{fmt, marker::PhantomData};

use arrow::array::RecordBatch;
use log::debug;

use crate::{
    bounds::BoundSpec,
    column_type::TemporalKind,
    error::CodecResult,
    frame::{FrameLayout, read_timestamps},
    sequence::{Instant, TemporalSequence},
    transcode::{BoolTranscoder, FloatTranscoder, InstantTranscoder, IntTranscoder, PointTranscoder},
    validate::TypeValidator,
    wire,
};

pub mod point;

pub use point::{ColumnValue, PointCodec};

/// Codec for `TBOOL` columns.
pub type BoolCodec = TemporalCodec<BoolTranscoder>;
/// Codec for `TINT` columns.
pub type IntCodec = TemporalCodec<IntTranscoder>;
/// Codec for `TFLOAT` columns.
pub type FloatCodec = TemporalCodec<FloatTranscoder>;
/// Frame-only codec for `TGEOMPOINT` / `TGEOGPOINT` columns.
pub type PointFrameCodec = TemporalCodec<PointTranscoder>;

/// Encoder/decoder for one temporal column kind.
pub struct TemporalCodec<T> {
    kind: TemporalKind,
    bounds: BoundSpec,
    layout: FrameLayout,
    _transcoder: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for TemporalCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporalCodec")
            .field("kind", &self.kind)
            .field("bounds", &self.bounds)
            .field("layout", &self.layout)
            .finish()
    }
}

impl<T> Clone for TemporalCodec<T> {
    fn clone(&self) -> Self {
        TemporalCodec {
            kind: self.kind,
            bounds: self.bounds,
            layout: self.layout.clone(),
            _transcoder: PhantomData,
        }
    }
}

impl BoolCodec {
    /// Codec for `TBOOL` with the default `t` / `value` layout.
    pub fn new(bounds: BoundSpec) -> Self {
        TemporalCodec::for_kind(TemporalKind::Bool, bounds)
    }
}

impl IntCodec {
    /// Codec for `TINT` with the default `t` / `value` layout.
    pub fn new(bounds: BoundSpec) -> Self {
        TemporalCodec::for_kind(TemporalKind::Int, bounds)
    }
}

impl FloatCodec {
    /// Codec for `TFLOAT` with the default `t` / `value` layout.
    pub fn new(bounds: BoundSpec) -> Self {
        TemporalCodec::for_kind(TemporalKind::Float, bounds)
    }
}

impl PointFrameCodec {
    /// Codec for planar points (`TGEOMPOINT`).
    pub fn geometric(bounds: BoundSpec) -> Self {
        TemporalCodec::for_kind(TemporalKind::GeomPoint, bounds)
    }

    /// Codec for geographic points (`TGEOGPOINT`).
    pub fn geographic(bounds: BoundSpec) -> Self {
        TemporalCodec::for_kind(TemporalKind::GeogPoint, bounds)
    }
}

impl<T> TemporalCodec<T> {
    fn for_kind(kind: TemporalKind, bounds: BoundSpec) -> Self {
        TemporalCodec {
            kind,
            bounds,
            layout: FrameLayout::for_kind(kind),
            _transcoder: PhantomData,
        }
    }

    /// Replace the frame column names.
    pub fn with_layout(mut self, layout: FrameLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Kind of column this codec serves.
    pub fn kind(&self) -> TemporalKind {
        self.kind
    }

    /// Bounds written on encode.
    pub fn bounds(&self) -> BoundSpec {
        self.bounds
    }

    /// Frame column names.
    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }
}

impl<T: InstantTranscoder> TemporalCodec<T> {
    /// Encode a frame as a bracketed sequence.
    ///
    /// Fails with a type-class error if a column is missing, the value column
    /// has the wrong type, any entry is null, or the frame has no rows.
    pub fn encode(&self, frame: &RecordBatch) -> CodecResult<String> {
        let sequence = self.sequence_from_frame(frame)?;
        Ok(self.encode_sequence(&sequence))
    }

    /// Validate a frame and turn it into a sorted, de-duplicated sequence
    /// carrying this codec's bounds.
    pub fn sequence_from_frame(&self, frame: &RecordBatch) -> CodecResult<TemporalSequence<T::Value>> {
        let value_column = self.layout.value_column.as_str();
        let values = self.layout.value_array(frame)?;
        let times = self.layout.time_array(frame)?;

        TypeValidator::for_kind(self.kind).validate(self.kind, value_column, values.data_type())?;

        let timestamps = read_timestamps(times, &self.layout.time_column)?;
        let values = T::values(values, value_column, self.kind)?;

        debug!(
            "encoding {} frame with {} rows from columns {}/{}",
            self.kind,
            frame.num_rows(),
            self.layout.time_column,
            value_column
        );

        let rows = timestamps
            .into_iter()
            .zip(values)
            .map(|(timestamp, value)| Instant::new(timestamp, value));
        TemporalSequence::from_rows(rows, self.bounds)
    }

    /// Render an already-built sequence with its own bounds.
    pub fn encode_sequence(&self, sequence: &TemporalSequence<T::Value>) -> String {
        wire::write_sequence(
            sequence.bounds(),
            sequence
                .instants()
                .iter()
                .map(|instant| (T::write_instant(&instant.value), instant.timestamp)),
        )
    }

    /// Parse wire text into instants, ascending by timestamp.
    ///
    /// Instants sharing a timestamp keep their textual order.
    pub fn decode_instants(&self, text: &str) -> CodecResult<Vec<Instant<T::Value>>> {
        let mut instants = wire::split_sequence(text)?
            .into_iter()
            .map(|raw| Ok(Instant::new(raw.timestamp, T::read_instant(raw.value)?)))
            .collect::<CodecResult<Vec<_>>>()?;
        instants.sort_by_key(|instant| instant.timestamp);
        Ok(instants)
    }

    /// Parse wire text into a frame sorted ascending by time.
    pub fn decode(&self, text: &str) -> CodecResult<RecordBatch> {
        let instants = self.decode_instants(text)?;
        debug!("decoded {} {} instants", instants.len(), self.kind);
        self.frame_from_instants(instants)
    }

    /// Build a decoded-shape frame from instants in the given order.
    pub fn frame_from_instants(&self, instants: Vec<Instant<T::Value>>) -> CodecResult<RecordBatch> {
        let (timestamps, values): (Vec<_>, Vec<_>) = instants
            .into_iter()
            .map(|instant| (instant.timestamp, instant.value))
            .unzip();
        let field = T::value_field(&self.layout.value_column);
        let array = T::to_array(values)?;
        self.layout.build(&timestamps, field, array)
    }
}

/// A codec for any temporal column kind, chosen at runtime.
#[derive(Debug, Clone)]
pub enum SequenceCodec {
    /// `TBOOL`.
    Bool(BoolCodec),
    /// `TINT`.
    Int(IntCodec),
    /// `TFLOAT`.
    Float(FloatCodec),
    /// `TGEOMPOINT` or `TGEOGPOINT`.
    Point(PointCodec),
}

impl SequenceCodec {
    /// Codec for `kind` with default column names and trajectory mode off.
    pub fn new(kind: TemporalKind, bounds: BoundSpec) -> Self {
        match kind {
            TemporalKind::Bool => SequenceCodec::Bool(BoolCodec::new(bounds)),
            TemporalKind::Int => SequenceCodec::Int(IntCodec::new(bounds)),
            TemporalKind::Float => SequenceCodec::Float(FloatCodec::new(bounds)),
            TemporalKind::GeomPoint => {
                SequenceCodec::Point(PointCodec::new(PointFrameCodec::geometric(bounds)))
            }
            TemporalKind::GeogPoint => {
                SequenceCodec::Point(PointCodec::new(PointFrameCodec::geographic(bounds)))
            }
        }
    }

    /// Replace the frame column names.
    pub fn with_layout(self, layout: FrameLayout) -> Self {
        match self {
            SequenceCodec::Bool(c) => SequenceCodec::Bool(c.with_layout(layout)),
            SequenceCodec::Int(c) => SequenceCodec::Int(c.with_layout(layout)),
            SequenceCodec::Float(c) => SequenceCodec::Float(c.with_layout(layout)),
            SequenceCodec::Point(c) => SequenceCodec::Point(c.with_layout(layout)),
        }
    }

    /// Kind of column this codec serves.
    pub fn kind(&self) -> TemporalKind {
        match self {
            SequenceCodec::Bool(c) => c.kind(),
            SequenceCodec::Int(c) => c.kind(),
            SequenceCodec::Float(c) => c.kind(),
            SequenceCodec::Point(c) => c.kind(),
        }
    }

    /// Bounds written on encode.
    pub fn bounds(&self) -> BoundSpec {
        match self {
            SequenceCodec::Bool(c) => c.bounds(),
            SequenceCodec::Int(c) => c.bounds(),
            SequenceCodec::Float(c) => c.bounds(),
            SequenceCodec::Point(c) => c.bounds(),
        }
    }

    /// Frame column names.
    pub fn layout(&self) -> &FrameLayout {
        match self {
            SequenceCodec::Bool(c) => c.layout(),
            SequenceCodec::Int(c) => c.layout(),
            SequenceCodec::Float(c) => c.layout(),
            SequenceCodec::Point(c) => c.layout(),
        }
    }

    /// Encode a frame. See [`TemporalCodec::encode`].
    pub fn encode(&self, frame: &RecordBatch) -> CodecResult<String> {
        match self {
            SequenceCodec::Bool(c) => c.encode(frame),
            SequenceCodec::Int(c) => c.encode(frame),
            SequenceCodec::Float(c) => c.encode(frame),
            SequenceCodec::Point(c) => c.encode(frame),
        }
    }

    /// Decode wire text into a frame. See [`TemporalCodec::decode`].
    pub fn decode(&self, text: &str) -> CodecResult<RecordBatch> {
        match self {
            SequenceCodec::Bool(c) => c.decode(text),
            SequenceCodec::Int(c) => c.decode(text),
            SequenceCodec::Float(c) => c.decode(text),
            SequenceCodec::Point(c) => c.decode(text),
        }
    }

    /// Encode a column value, honouring trajectory mode for point columns.
    ///
    /// Non-point codecs only accept [`ColumnValue::Frame`].
    pub fn write(&self, value: &ColumnValue) -> CodecResult<String> {
        match (self, value) {
            (SequenceCodec::Point(c), value) => c.write(value),
            (codec, ColumnValue::Frame(frame)) => codec.encode(frame),
            (_, other) => other.mismatch("frame"),
        }
    }

    /// Decode wire text into the column value shape this codec produces.
    pub fn read(&self, text: &str) -> CodecResult<ColumnValue> {
        match self {
            SequenceCodec::Point(c) => c.read(text),
            codec => codec.decode(text).map(ColumnValue::Frame),
        }
    }
}

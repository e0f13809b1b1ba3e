//! In-memory temporal sequences.
//!
//! A [`TemporalSequence`] is a time-ascending set of [`Instant`]s plus the
//! [`BoundSpec`] used when rendering it. Construction is where ordering and
//! set semantics are enforced:
//!
//! - rows are stable-sorted by timestamp,
//! - rows that repeat an earlier row exactly (same timestamp *and* same
//!   value) are dropped,
//! - rows that share a timestamp but carry different values are kept, in
//!   their original relative order.
//!
//! The last rule is a pass-through: whether the store treats such input as
//! an error, last-write-wins, or a multi-valued instant is decided there.

use chrono::{DateTime, Utc};
use log::warn;
use snafu::prelude::*;

use crate::{
    bounds::BoundSpec,
    error::{CodecResult, EmptySequenceSnafu},
};

/// A single (timestamp, value) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Instant<V> {
    /// Point in time, normalized to UTC.
    pub timestamp: DateTime<Utc>,
    /// Value held at `timestamp`.
    pub value: V,
}

impl<V> Instant<V> {
    /// Pair a value with its timestamp.
    pub fn new(timestamp: DateTime<Utc>, value: V) -> Self {
        Instant { timestamp, value }
    }
}

/// A non-empty, time-ordered set of instants of one value kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalSequence<V> {
    instants: Vec<Instant<V>>,
    bounds: BoundSpec,
}

impl<V: PartialEq> TemporalSequence<V> {
    /// Build a sequence from rows in any order.
    ///
    /// Returns [`CodecError::EmptySequence`](crate::error::CodecError::EmptySequence)
    /// if `rows` is empty.
    pub fn from_rows<I>(rows: I, bounds: BoundSpec) -> CodecResult<Self>
    where
        I: IntoIterator<Item = Instant<V>>,
    {
        let mut rows: Vec<Instant<V>> = rows.into_iter().collect();
        ensure!(!rows.is_empty(), EmptySequenceSnafu);

        // Stable: rows sharing a timestamp keep their input order.
        rows.sort_by_key(|row| row.timestamp);

        let mut instants: Vec<Instant<V>> = Vec::with_capacity(rows.len());
        let mut group_start = 0;
        let mut ambiguous = 0usize;

        for row in rows {
            let same_ts = instants
                .last()
                .is_some_and(|prev| prev.timestamp == row.timestamp);

            if !same_ts {
                group_start = instants.len();
                instants.push(row);
                continue;
            }

            if instants[group_start..].iter().any(|i| i.value == row.value) {
                continue;
            }

            ambiguous += 1;
            instants.push(row);
        }

        if ambiguous > 0 {
            warn!(
                "temporal sequence has {ambiguous} instant(s) sharing a timestamp with a \
                 different value; passing them through in input order"
            );
        }

        Ok(TemporalSequence { instants, bounds })
    }

    /// `true` if at least two instants share a timestamp.
    pub fn has_duplicate_timestamps(&self) -> bool {
        self.instants
            .windows(2)
            .any(|pair| pair[0].timestamp == pair[1].timestamp)
    }
}

impl<V> TemporalSequence<V> {
    /// Instants in ascending timestamp order.
    pub fn instants(&self) -> &[Instant<V>] {
        &self.instants
    }

    /// Bounds used when this sequence is rendered.
    pub fn bounds(&self) -> BoundSpec {
        self.bounds
    }

    /// Number of instants (always at least one).
    pub fn len(&self) -> usize {
        self.instants.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// Timestamp of the first instant.
    pub fn start_timestamp(&self) -> Option<DateTime<Utc>> {
        self.instants.first().map(|i| i.timestamp)
    }

    /// Timestamp of the last instant.
    pub fn end_timestamp(&self) -> Option<DateTime<Utc>> {
        self.instants.last().map(|i| i.timestamp)
    }

    /// Consume the sequence, returning its instants.
    pub fn into_instants(self) -> Vec<Instant<V>> {
        self.instants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 1, 1, 12, minute, 0)
            .single()
            .expect("valid UTC timestamp")
    }

    fn values<V: Clone>(seq: &TemporalSequence<V>) -> Vec<(u32, V)> {
        use chrono::Timelike;
        seq.instants()
            .iter()
            .map(|i| (i.timestamp.minute(), i.value.clone()))
            .collect()
    }

    #[test]
    fn sorts_rows_by_timestamp() {
        let seq = TemporalSequence::from_rows(
            vec![
                Instant::new(at(10), 3),
                Instant::new(at(0), 1),
                Instant::new(at(5), 2),
            ],
            BoundSpec::CLOSED,
        )
        .expect("non-empty");

        assert_eq!(values(&seq), vec![(0, 1), (5, 2), (10, 3)]);
        assert_eq!(seq.start_timestamp(), Some(at(0)));
        assert_eq!(seq.end_timestamp(), Some(at(10)));
    }

    #[test]
    fn exact_duplicates_collapse() {
        let seq = TemporalSequence::from_rows(
            vec![
                Instant::new(at(1), true),
                Instant::new(at(1), true),
                Instant::new(at(2), false),
            ],
            BoundSpec::CLOSED,
        )
        .expect("non-empty");

        assert_eq!(values(&seq), vec![(1, true), (2, false)]);
        assert!(!seq.has_duplicate_timestamps());
    }

    #[test]
    fn non_adjacent_duplicates_in_a_timestamp_group_collapse() {
        let seq = TemporalSequence::from_rows(
            vec![
                Instant::new(at(1), 7),
                Instant::new(at(1), 8),
                Instant::new(at(1), 7),
            ],
            BoundSpec::CLOSED,
        )
        .expect("non-empty");

        assert_eq!(values(&seq), vec![(1, 7), (1, 8)]);
    }

    #[test]
    fn same_timestamp_different_values_pass_through_in_input_order() {
        let seq = TemporalSequence::from_rows(
            vec![
                Instant::new(at(3), 9),
                Instant::new(at(1), 5),
                Instant::new(at(1), 4),
            ],
            BoundSpec::CLOSED,
        )
        .expect("non-empty");

        assert_eq!(values(&seq), vec![(1, 5), (1, 4), (3, 9)]);
        assert!(seq.has_duplicate_timestamps());
    }

    #[test]
    fn equal_values_at_different_timestamps_are_kept() {
        let seq = TemporalSequence::from_rows(
            vec![Instant::new(at(6), true), Instant::new(at(10), true)],
            BoundSpec::CLOSED,
        )
        .expect("non-empty");
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = TemporalSequence::<i64>::from_rows(Vec::new(), BoundSpec::CLOSED).unwrap_err();
        assert!(matches!(err, CodecError::EmptySequence));
        assert!(err.is_type_error());
    }

    #[test]
    fn bounds_are_kept() {
        let seq = TemporalSequence::from_rows(vec![Instant::new(at(0), 1.5)], BoundSpec::OPEN)
            .expect("non-empty");
        assert_eq!(seq.bounds(), BoundSpec::OPEN);
        assert!(!seq.is_empty());
    }
}

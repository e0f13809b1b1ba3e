//! The bracketed textual wire format.
//!
//! ```text
//! sequence   := bound_open instant (", " instant)* bound_close
//! instant    := value "@" timestamp
//! timestamp  := "YYYY-MM-DD HH:MM:SS[.ffffff]" UTC-offset
//! ```
//!
//! This module only knows about framing and timestamps; value text is handed
//! to the per-kind transcoders untouched.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SubsecRound, Utc};
use log::trace;
use snafu::prelude::*;

use crate::{
    bounds::{BoundSpec, is_close_glyph, is_open_glyph},
    error::{
        CodecResult, EmptyWireSequenceSnafu, InvalidTimestampSnafu, MissingBoundsSnafu,
        MissingInstantSeparatorSnafu,
    },
};

/// Separator between instants.
pub const INSTANT_SEPARATOR: &str = ", ";

/// Separator between an instant's value and its timestamp.
pub const VALUE_TIME_SEPARATOR: char = '@';

/// Longest prefix of offending text echoed back in errors.
const ERROR_SNIPPET_LEN: usize = 64;

/// Render a timestamp as the store expects it: UTC wall clock plus `+00`.
///
/// Sub-second precision is kept (3 or 6 digits, whichever is shortest
/// without losing information) and omitted entirely for whole seconds.
/// Anything below a microsecond is dropped. Years must lie in `0..=9999`;
/// frame input outside that range is rejected before it gets here.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    let ts = ts.trunc_subsecs(6);
    format!("{}+00", ts.format("%Y-%m-%d %H:%M:%S%.f"))
}

/// Parse a wire timestamp into UTC.
///
/// Accepts a space or `T` between date and time, optional fractional
/// seconds, and an offset written as `+HH`, `+HH:MM`, `+HHMM` or `Z`. A
/// timestamp with no offset is taken to already be UTC. Fractions finer
/// than a microsecond are truncated.
pub fn parse_timestamp(text: &str) -> CodecResult<DateTime<Utc>> {
    parse_timestamp_exact(text.trim()).map(|ts| ts.trunc_subsecs(6))
}

fn parse_timestamp_exact(text: &str) -> CodecResult<DateTime<Utc>> {
    const WITH_OFFSET: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];
    const NAIVE: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    for fmt in WITH_OFFSET {
        if let Ok(ts) = DateTime::<FixedOffset>::parse_from_str(text, fmt) {
            return Ok(ts.with_timezone(&Utc));
        }
    }

    if let Some(naive) = text.strip_suffix('Z') {
        for fmt in NAIVE {
            if let Ok(ts) = NaiveDateTime::parse_from_str(naive, fmt) {
                return Ok(ts.and_utc());
            }
        }
    }

    for fmt in NAIVE {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(ts.and_utc());
        }
    }

    InvalidTimestampSnafu { text }.fail()
}

/// Join already-written instants into a bracketed sequence.
pub(crate) fn write_sequence<I>(bounds: BoundSpec, instants: I) -> String
where
    I: IntoIterator<Item = (String, DateTime<Utc>)>,
{
    let (open, close) = bounds.glyphs();
    let mut out = String::new();
    out.push(open);
    for (i, (value, ts)) in instants.into_iter().enumerate() {
        if i > 0 {
            out.push_str(INSTANT_SEPARATOR);
        }
        out.push_str(&value);
        out.push(VALUE_TIME_SEPARATOR);
        out.push_str(&format_timestamp(&ts));
    }
    out.push(close);
    out
}

/// One instant split into its raw value text and parsed timestamp.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawInstant<'a> {
    pub(crate) value: &'a str,
    pub(crate) timestamp: DateTime<Utc>,
}

/// Split a bracketed sequence into raw instants.
///
/// The bound glyphs are checked for shape and then dropped; which glyphs
/// were used is not reported back.
pub(crate) fn split_sequence(text: &str) -> CodecResult<Vec<RawInstant<'_>>> {
    let trimmed = text.trim();

    let mut chars = trimmed.chars();
    let (Some(open), Some(close)) = (chars.next(), chars.next_back()) else {
        return MissingBoundsSnafu {
            text: snippet(trimmed),
        }
        .fail();
    };
    ensure!(
        is_open_glyph(open) && is_close_glyph(close),
        MissingBoundsSnafu {
            text: snippet(trimmed)
        }
    );

    let interior = chars.as_str();
    ensure!(
        !interior.trim().is_empty(),
        EmptyWireSequenceSnafu {
            text: snippet(trimmed)
        }
    );

    let raw = interior
        .split(INSTANT_SEPARATOR)
        .map(split_instant)
        .collect::<CodecResult<Vec<_>>>()?;

    trace!("split wire sequence into {} instants", raw.len());
    Ok(raw)
}

fn split_instant(instant: &str) -> CodecResult<RawInstant<'_>> {
    let (value, timestamp) =
        instant
            .rsplit_once(VALUE_TIME_SEPARATOR)
            .context(MissingInstantSeparatorSnafu {
                instant: snippet(instant),
            })?;

    Ok(RawInstant {
        value: value.trim(),
        timestamp: parse_timestamp(timestamp)?,
    })
}

fn snippet(text: &str) -> String {
    match text.char_indices().nth(ERROR_SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

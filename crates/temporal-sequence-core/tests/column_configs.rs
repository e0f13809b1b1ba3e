#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::thread;

use arrow::array::{ArrayRef, Float64Builder, TimestampMicrosecondBuilder};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{TimeZone, Utc};
use temporal_sequence_core::{
    ColumnConfig, ColumnType, ConfigError, OpaqueScalar, Predicate, ResultKind, SequenceCodec,
    operators::{self, lookup},
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn ts_from_secs(secs: i64) -> Result<chrono::DateTime<Utc>, &'static str> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or("invalid timestamp")
}

/// `ts` / `speed` frame built with Arrow builders.
fn speed_frame(rows: &[(i64, f64)]) -> Result<RecordBatch, Box<dyn std::error::Error>> {
    let mut ts = TimestampMicrosecondBuilder::with_capacity(rows.len()).with_timezone("UTC");
    let mut speed = Float64Builder::with_capacity(rows.len());
    for &(secs, v) in rows {
        ts.append_value(ts_from_secs(secs)?.timestamp_micros());
        speed.append_value(v);
    }

    let schema = Schema::new(vec![
        Field::new(
            "ts",
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
            false,
        ),
        Field::new("speed", DataType::Float64, false),
    ]);
    let columns: Vec<ArrayRef> = vec![Arc::new(ts.finish()), Arc::new(speed.finish())];
    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}

fn speed_codec() -> Result<SequenceCodec, ConfigError> {
    ColumnConfig::from_json(
        r#"{
            "column_type": "TFLOAT",
            "right_closed": false,
            "time_column": "ts",
            "value_column": "speed"
        }"#,
    )?
    .build_codec()
}

#[test]
fn configured_codec_uses_configured_columns_and_bounds() -> TestResult {
    let codec = speed_codec()?;
    let text = codec.encode(&speed_frame(&[(60, 6.6), (0, 8.2)])?)?;
    assert_eq!(
        text,
        "[8.2@1970-01-01 00:00:00+00, 6.6@1970-01-01 00:01:00+00)"
    );

    let decoded = codec.decode(&text)?;
    assert_eq!(decoded, speed_frame(&[(0, 8.2), (60, 6.6)])?);
    Ok(())
}

#[test]
fn scalar_types_do_not_build_codecs() -> TestResult {
    let config = ColumnConfig::from_json(r#"{"column_type": "PERIODSET"}"#)?;
    let err = config.build_codec().unwrap_err();
    assert_eq!(err.to_string(), "PERIODSET is not a temporal sequence column type");

    let binder = config.scalar_column()?;
    let value = OpaqueScalar::new(
        ColumnType::PeriodSet,
        "{[2019-09-08 00:00:00+00, 2019-09-10 00:00:00+00]}",
    )?;
    let stored = binder.bind(&value)?;
    assert_eq!(binder.restore(&stored)?, value);
    Ok(())
}

#[test]
fn one_codec_shared_across_threads() -> TestResult {
    let codec = Arc::new(speed_codec()?);
    let expected = codec.encode(&speed_frame(&[(0, 1.5), (1, 2.5)])?)?;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let codec = Arc::clone(&codec);
            thread::spawn(move || -> Result<String, String> {
                let frame = speed_frame(&[(1, 2.5), (0, 1.5)]).map_err(|e| e.to_string())?;
                let text = codec.encode(&frame).map_err(|e| e.to_string())?;
                let back = codec.decode(&text).map_err(|e| e.to_string())?;
                codec.encode(&back).map_err(|e| e.to_string())
            })
        })
        .collect();

    for handle in handles {
        let text = handle.join().expect("thread panicked")?;
        assert_eq!(text, expected);
    }
    Ok(())
}

#[test]
fn operator_table_is_total_and_closed() {
    assert_eq!(Predicate::ALL.len(), 44);
    for predicate in Predicate::ALL {
        let token = lookup(predicate.name()).expect("every listed name resolves");
        assert_eq!(token.symbol, predicate.symbol());
        assert!(!token.symbol.is_empty());
    }

    let err = lookup("bbox_sideways").unwrap_err();
    assert_eq!(err.name(), "bbox_sideways");
}

#[test]
fn operator_result_kinds_partition_the_table() {
    let count = |kind: ResultKind| {
        Predicate::ALL
            .iter()
            .filter(|p| p.result_kind() == kind)
            .count()
    };
    assert_eq!(count(ResultKind::Boolean), 36);
    assert_eq!(count(ResultKind::TemporalBoolean), 6);
    assert_eq!(count(ResultKind::Float), 1);
    assert_eq!(count(ResultKind::TemporalFloat), 1);

    assert_eq!(operators::LSHIFT, Predicate::BboxStrictlyToLeft);
    assert_eq!(operators::RSHIFT.token().symbol, ">>");
}

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, TimestampSecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{TimeZone, Utc};
use temporal_sequence_format::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn prelude_covers_config_to_wire() -> TestResult {
    let codec = ColumnConfig::from_json(r#"{"column_type": "TBOOL", "left_closed": false}"#)?
        .build_codec()?;
    assert_eq!(codec.kind(), TemporalKind::Bool);

    let t = Utc
        .with_ymd_and_hms(2018, 1, 1, 12, 0, 0)
        .single()
        .expect("valid datetime");
    let schema = Schema::new(vec![
        Field::new("t", DataType::Timestamp(TimeUnit::Second, None), false),
        Field::new("value", DataType::Boolean, false),
    ]);
    let columns: Vec<ArrayRef> = vec![
        Arc::new(TimestampSecondArray::from(vec![t.timestamp()])),
        Arc::new(BooleanArray::from(vec![false])),
    ];
    let frame = RecordBatch::try_new(Arc::new(schema), columns)?;

    let text = codec.write(&ColumnValue::Frame(frame))?;
    assert_eq!(text, "(f@2018-01-01 12:00:00+00]");
    Ok(())
}

#[test]
fn prelude_exposes_operator_tokens() {
    let token = operators::lookup("bboxes_overlap").expect("known predicate");
    assert_eq!(token.symbol, "&&");
    assert_eq!(token.result, ResultKind::Boolean);
    assert!("nope".parse::<Predicate>().is_err());
}

#[test]
fn codec_errors_carry_a_class() {
    let codec = SequenceCodec::new(TemporalKind::Int, BoundSpec::CLOSED);
    let err = codec.decode("1@2018-01-01 00:00:00+00").unwrap_err();
    assert_eq!(err.class(), ErrorClass::Parse);
}

/*!
 * Tests for the transcript schema, boundary validation and timestamp policy
 */

use serde_json::json;
use tosrt::errors::TranscriptError;
use tosrt::transcript::{Chunk, TimestampPolicy, Transcript};
use crate::common;

#[test]
fn test_from_json_str_withValidTranscript_shouldKeepChunkOrder() {
    let transcript = Transcript::from_json_str(&common::two_chunk_json()).unwrap();

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.chunks[0].timestamp, (0.0, 5.5));
    assert_eq!(transcript.chunks[1].text, "And this is the second one.");
    assert_eq!(transcript, common::two_chunk_transcript());
}

#[test]
fn test_from_value_withoutSpeakers_shouldDefaultToEmpty() {
    let transcript = Transcript::from_value(&json!({
        "chunks": [{ "timestamp": [1.0, 2.0], "text": "hi" }]
    })).unwrap();

    assert!(transcript.speakers.is_empty());
}

#[test]
fn test_from_value_withOpaqueSpeakers_shouldKeepThemUntouched() {
    let transcript = Transcript::from_value(&json!({
        "speakers": [{ "id": "SPEAKER_00", "label": "Ann" }, 42],
        "chunks": []
    })).unwrap();

    assert_eq!(transcript.speakers.len(), 2);
    assert_eq!(transcript.speakers[1], json!(42));
}

#[test]
fn test_from_value_withExtraFields_shouldIgnoreThem() {
    let transcript = Transcript::from_value(&json!({
        "text": "full transcript text",
        "chunks": [{ "timestamp": [0, 1], "text": "a", "speaker": "x" }]
    })).unwrap();

    assert_eq!(transcript.len(), 1);
}

#[test]
fn test_from_value_withoutChunks_shouldReportMissingField() {
    let err = Transcript::from_value(&json!({ "speakers": [] })).unwrap_err();

    assert_eq!(err, TranscriptError::MissingField {
        field: "chunks",
        location: "transcript".to_string(),
    });
}

#[test]
fn test_from_value_withChunkMissingTimestamp_shouldNameTheChunk() {
    let err = Transcript::from_value(&json!({
        "chunks": [
            { "timestamp": [0, 1], "text": "ok" },
            { "text": "no timing" }
        ]
    })).unwrap_err();

    assert_eq!(err, TranscriptError::MissingField {
        field: "timestamp",
        location: "chunks[1]".to_string(),
    });
}

#[test]
fn test_from_value_withChunkMissingText_shouldFail() {
    let err = Transcript::from_value(&json!({
        "chunks": [{ "timestamp": [0, 1] }]
    })).unwrap_err();

    assert!(matches!(err, TranscriptError::MissingField { field: "text", .. }));
}

#[test]
fn test_from_value_withBadTimestampShapes_shouldRejectEach() {
    let shapes = [
        json!([1.0]),
        json!([1.0, 2.0, 3.0]),
        json!(["0", "1"]),
        json!({ "start": 0, "end": 1 }),
        json!(4.2),
    ];

    for shape in shapes {
        let err = Transcript::from_value(&json!({
            "chunks": [{ "timestamp": shape, "text": "x" }]
        })).unwrap_err();
        assert!(
            matches!(err, TranscriptError::InvalidShape { .. }),
            "expected shape error for {:?}",
            err
        );
    }
}

#[test]
fn test_from_value_withNonStringText_shouldFail() {
    let err = Transcript::from_value(&json!({
        "chunks": [{ "timestamp": [0, 1], "text": 7 }]
    })).unwrap_err();

    assert!(matches!(err, TranscriptError::InvalidShape { ref location, .. } if location == "chunks[0].text"));
}

#[test]
fn test_from_value_withNonObjectRoot_shouldFail() {
    assert!(Transcript::from_value(&json!([1, 2, 3])).is_err());
    assert!(Transcript::from_value(&json!({ "chunks": "nope" })).is_err());
}

#[test]
fn test_from_json_str_withInvalidJson_shouldReturnJsonError() {
    let err = Transcript::from_json_str("{ chunks: ").unwrap_err();
    assert!(matches!(err, TranscriptError::Json(_)));
}

#[test]
fn test_serde_roundtrip_shouldMatchWireShape() {
    let transcript = common::two_chunk_transcript();
    let value = serde_json::to_value(&transcript).unwrap();

    assert_eq!(value["chunks"][0]["timestamp"], json!([0.0, 5.5]));
    assert_eq!(Transcript::from_value(&value).unwrap(), transcript);
}

#[test]
fn test_resolve_range_strict_withNegativeStart_shouldReject() {
    let chunk = Chunk::new(-0.5, 1.0, "early");
    let err = chunk.resolve_range(3, TimestampPolicy::Strict).unwrap_err();

    assert!(matches!(err, TranscriptError::InvalidTimestamp { chunk: 3, .. }));
}

#[test]
fn test_resolve_range_strict_withReversedRange_shouldReject() {
    let chunk = Chunk::new(5.0, 4.0, "backwards");
    assert!(chunk.resolve_range(0, TimestampPolicy::Strict).is_err());
}

#[test]
fn test_resolve_range_strict_withZeroLength_shouldAccept() {
    let chunk = Chunk::new(2.0, 2.0, "blink");
    let (start, end) = chunk.resolve_range(0, TimestampPolicy::Strict).unwrap();
    assert_eq!(start, end);
}

#[test]
fn test_resolve_range_clamp_withNegativeStart_shouldClampToZero() {
    let chunk = Chunk::new(-0.5, 1.25, "early");
    let (start, end) = chunk.resolve_range(0, TimestampPolicy::Clamp).unwrap();

    assert_eq!(start.as_millis(), 0);
    assert_eq!(end.as_millis(), 1_250);
}

#[test]
fn test_resolve_range_clamp_withReversedRange_shouldCollapseToStart() {
    let chunk = Chunk::new(5.0, 4.0, "backwards");
    let (start, end) = chunk.resolve_range(0, TimestampPolicy::Clamp).unwrap();

    assert_eq!(start.as_millis(), 5_000);
    assert_eq!(end.as_millis(), 5_000);
}

#[test]
fn test_resolve_range_anyPolicy_withNonFinite_shouldReject() {
    for policy in [TimestampPolicy::Strict, TimestampPolicy::Clamp] {
        assert!(Chunk::new(f64::NAN, 1.0, "x").resolve_range(0, policy).is_err());
        assert!(Chunk::new(0.0, f64::INFINITY, "x").resolve_range(0, policy).is_err());
    }
}

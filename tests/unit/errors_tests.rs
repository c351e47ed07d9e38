/*!
 * Tests for error types and conversions
 */

use tosrt::errors::{AppError, TranscriptError};

#[test]
fn test_transcriptError_missingField_shouldDisplayFieldAndLocation() {
    let error = TranscriptError::MissingField {
        field: "timestamp",
        location: "chunks[4]".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("timestamp"));
    assert!(display.contains("chunks[4]"));
}

#[test]
fn test_transcriptError_invalidTimestamp_shouldDisplayChunkAndReason() {
    let error = TranscriptError::InvalidTimestamp {
        chunk: 2,
        reason: "end 1 is before start 2".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("chunks[2]"));
    assert!(display.contains("before start"));
}

#[test]
fn test_transcriptError_fromSerdeJson_shouldWrapAsJson() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: TranscriptError = serde_error.into();
    assert!(matches!(error, TranscriptError::Json(_)));
}

#[test]
fn test_appError_fromTranscriptError_shouldBeStructural() {
    let error: AppError = TranscriptError::Json("bad".to_string()).into();
    assert!(error.is_structural());
    assert!(format!("{}", error).starts_with("Transcript error"));
}

#[test]
fn test_appError_fromIoError_shouldMapToFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(_)));
    assert!(!error.is_structural());
}

#[test]
fn test_appError_fromAnyhow_shouldMapToUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref msg) if msg == "something odd"));
}

/*!
 * Integration tests for single file conversion
 */

use std::fs;
use anyhow::Result;
use tosrt::app_config::Config;
use tosrt::app_controller::{Controller, FileStatus};
use tosrt::transcript::TimestampPolicy;
use crate::common;

/// Test the full load, convert and save workflow for one transcript
#[test]
fn test_conversion_workflow_withSampleTranscript_shouldWriteSrtNextToInput() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "talk.json", &common::two_chunk_json())?;

    let controller = Controller::with_config(Config::default())?;
    let status = controller.run(input, temp_dir.path().to_path_buf(), false)?;

    let expected_path = temp_dir.path().join("talk.srt");
    assert_eq!(status, FileStatus::Converted {
        output_path: expected_path.clone(),
        block_count: 2,
    });
    assert_eq!(fs::read_to_string(expected_path)?, common::TWO_CHUNK_SRT);
    Ok(())
}

#[test]
fn test_conversion_workflow_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "talk.json", &common::two_chunk_json())?;
    let existing = common::create_test_file(temp_dir.path(), "talk.srt", "keep me")?;
    let controller = Controller::with_config(Config::default())?;

    let status = controller.run(input.clone(), temp_dir.path().to_path_buf(), false)?;
    assert!(matches!(status, FileStatus::Skipped { .. }));
    assert_eq!(fs::read_to_string(&existing)?, "keep me");

    let status = controller.run(input, temp_dir.path().to_path_buf(), true)?;
    assert!(matches!(status, FileStatus::Converted { .. }));
    assert_eq!(fs::read_to_string(&existing)?, common::TWO_CHUNK_SRT);
    Ok(())
}

#[test]
fn test_conversion_workflow_withMissingTimestamp_shouldFailAndWriteNothing() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "broken.json",
        r#"{"speakers": [], "chunks": [{"timestamp": [0, 1], "text": "a"}, {"text": "b"}]}"#,
    )?;
    let controller = Controller::with_config(Config::default())?;

    let result = controller.run(input, temp_dir.path().to_path_buf(), false);

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("timestamp"));
    assert!(!temp_dir.path().join("broken.srt").exists());
    Ok(())
}

#[test]
fn test_conversion_workflow_withClampConfig_shouldApplyPolicy() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "raw.json",
        r#"{"chunks": [{"timestamp": [-0.2, 1.5], "text": " intro "}]}"#,
    )?;

    let strict = Controller::with_config(Config::default())?;
    assert!(strict.run(input.clone(), temp_dir.path().to_path_buf(), false).is_err());

    let config = Config {
        timestamp_policy: TimestampPolicy::Clamp,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;
    controller.run(input, temp_dir.path().to_path_buf(), false)?;

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("raw.srt"))?,
        "1\n00:00:00,000 --> 00:00:01,500\nintro\n"
    );
    Ok(())
}

#[test]
fn test_conversion_workflow_withExplicitOutputPath_shouldUseIt() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::test_resource_path("sample_transcript.json");
    let output_path = temp_dir.path().join("subs").join("custom.srt");

    let controller = Controller::with_config(Config::default())?;
    let status = controller.run_to_path(&input, output_path.clone(), false)?;

    assert!(matches!(status, FileStatus::Converted { block_count: 3, .. }));
    let content = fs::read_to_string(&output_path)?;
    assert!(content.ends_with("3\n00:00:11,000 --> 00:00:15,800\nFinally, the third subtitle.\n"));
    Ok(())
}

#[test]
fn test_conversion_workflow_withMissingInput_shouldFail() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    let result = controller.run(temp_dir.path().join("absent.json"), temp_dir.path().to_path_buf(), false);
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_controller_withInvalidConfig_shouldRefuseToStart() {
    let mut config = Config::default();
    config.output.extension = "json".to_string();

    assert!(Controller::with_config(config).is_err());
}

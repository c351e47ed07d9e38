use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::srt_writer::{SrtWriter, WriteOutcome};

// @module: Application controller for transcript conversion

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq)]
pub enum FileStatus {
    /// Written to the path with this many subtitle blocks
    Converted { output_path: PathBuf, block_count: usize },
    /// Output already existed and overwriting was not requested
    Skipped { output_path: PathBuf },
}

/// Totals for a folder run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FolderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: Vec<(PathBuf, String)>,
}

impl FolderSummary {
    pub fn total(&self) -> usize {
        self.converted + self.skipped + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Main application controller for transcript conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Canonical paths never treated as transcripts in folder mode
    excluded: Vec<PathBuf>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            excluded: Vec::new(),
        })
    }

    /// Leave `path` out of folder runs, e.g. the active config file sharing the transcript extension
    pub fn exclude_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.excluded.push(Self::canonical(path.as_ref()));
        self
    }

    fn canonical(path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    fn is_excluded(&self, path: &Path) -> bool {
        !self.excluded.is_empty() && self.excluded.contains(&Self::canonical(path))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn writer(&self) -> SrtWriter {
        SrtWriter::with_policy(self.config.timestamp_policy)
    }

    /// Output path the controller would use for `input_file` inside `output_dir`
    pub fn output_path_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        FileManager::generate_output_path(input_file, output_dir, &self.config.output.extension)
    }

    /// Convert one transcript file into `output_dir`
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<FileStatus> {
        let output_path = self.output_path_for(&input_file, &output_dir);
        self.run_to_path(&input_file, output_path, force_overwrite)
    }

    /// Convert one transcript file to an explicit output path
    pub fn run_to_path(&self, input_file: &Path, output_path: PathBuf, force_overwrite: bool) -> Result<FileStatus> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        if output_path.exists() && !force_overwrite {
            warn!("Skipping {}, output already exists (use -f to force overwrite)", output_path.display());
            return Ok(FileStatus::Skipped { output_path });
        }

        let transcript = FileManager::load_transcript(input_file)?;
        debug!("Loaded {} chunks from {}", transcript.len(), input_file.display());

        let outcome = self.writer().write(&transcript, &output_path);
        if let WriteOutcome::Saved { block_count, .. } = outcome {
            return Ok(FileStatus::Converted {
                output_path: outcome.path().to_path_buf(),
                block_count,
            });
        }

        Err(anyhow!("{}", outcome.message()).context(format!("Failed to convert {}", input_file.display())))
    }

    /// Convert every transcript under `input_dir`, writing each SRT next to its source.
    /// A failing file is recorded and the batch continues.
    pub fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let mut transcript_files = FileManager::find_files(&input_dir, &self.config.output.input_extension)?;
        transcript_files.retain(|file| {
            let excluded = self.is_excluded(file);
            if excluded {
                debug!("Ignoring {} (excluded from folder runs)", file.display());
            }
            !excluded
        });
        if transcript_files.is_empty() {
            return Err(anyhow!(
                "No .{} transcript files found in directory: {:?}",
                self.config.output.input_extension,
                input_dir
            ));
        }

        let folder_pb = ProgressBar::new(transcript_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for transcript_file in &transcript_files {
            let file_name = transcript_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = transcript_file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| input_dir.clone());

            match self.run(transcript_file.clone(), output_dir, force_overwrite) {
                Ok(FileStatus::Converted { .. }) => summary.converted += 1,
                Ok(FileStatus::Skipped { .. }) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed.push((transcript_file.clone(), format!("{:#}", e)));
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed in {}: {} converted, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.converted,
            summary.skipped,
            summary.failed.len()
        );

        Ok(summary)
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

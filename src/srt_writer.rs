use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use log::{error, info};
use crate::errors::AppError;
use crate::srt_converter::SrtConverter;
use crate::transcript::{TimestampPolicy, Transcript};

// @module: Persisting converted subtitles

/// Result of a single write attempt
#[derive(Debug)]
pub enum WriteOutcome {
    /// The SRT file was written
    Saved {
        path: PathBuf,
        block_count: usize,
    },
    /// Conversion or I/O failed; nothing usable was written
    Failed {
        path: PathBuf,
        error: AppError,
    },
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Saved { path, .. } | Self::Failed { path, .. } => path,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            Self::Saved { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    /// Human readable diagnostic for either outcome
    pub fn message(&self) -> String {
        match self {
            Self::Saved { path, block_count } => {
                format!("SRT file saved to {} ({} subtitles)", path.display(), block_count)
            }
            Self::Failed { path, error } => {
                format!("Failed to write SRT file {}: {}", path.display(), error)
            }
        }
    }
}

/// Writes transcripts as SRT files; the recovery boundary for conversion errors
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtWriter {
    converter: SrtConverter,
}

impl SrtWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: TimestampPolicy) -> Self {
        SrtWriter {
            converter: SrtConverter::with_policy(policy),
        }
    }

    /// Convert and write. Never returns an error; failures are logged and reported in the outcome.
    pub fn write<P: AsRef<Path>>(&self, transcript: &Transcript, path: P) -> WriteOutcome {
        let path = path.as_ref();
        let outcome = match self.try_write(transcript, path) {
            Ok(block_count) => WriteOutcome::Saved {
                path: path.to_path_buf(),
                block_count,
            },
            Err(error) => WriteOutcome::Failed {
                path: path.to_path_buf(),
                error,
            },
        };

        if outcome.is_success() {
            info!("{}", outcome.message());
        } else {
            error!("{}", outcome.message());
        }

        outcome
    }

    fn try_write(&self, transcript: &Transcript, path: &Path) -> Result<usize, AppError> {
        // Convert before touching the filesystem so a bad transcript leaves no file behind
        let document = self.converter.to_document(transcript)?;
        let content = document.to_string();

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .map_err(|e| AppError::File(format!("Failed to create directory {}: {}", parent.display(), e)))?;

        // Stage next to the target so the final rename stays on one filesystem
        let mut staged = tempfile::Builder::new()
            .prefix(".tosrt-")
            .suffix(".tmp")
            .tempfile_in(parent)
            .map_err(|e| AppError::File(format!("Failed to create subtitle file {}: {}", path.display(), e)))?;
        staged
            .write_all(content.as_bytes())
            .and_then(|_| staged.flush())
            .map_err(|e| AppError::File(format!("Failed to write subtitle file {}: {}", path.display(), e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
        }

        staged
            .persist(path)
            .map_err(|e| AppError::File(format!("Failed to replace subtitle file {}: {}", path.display(), e.error)))?;

        Ok(document.len())
    }
}

/// Convert `transcript` and write it to `output_path` using the default policy
pub fn write_srt<P: AsRef<Path>>(transcript: &Transcript, output_path: P) -> WriteOutcome {
    SrtWriter::new().write(transcript, output_path)
}

// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{debug, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use tosrt::app_config::{self, Config};
use tosrt::app_controller::{Controller, FileStatus};
use tosrt::file_utils::FileManager;
use tosrt::{SrtConverter, TimestampPolicy, Transcript};

/// Transcript converted by `tosrt demo`
const DEMO_TRANSCRIPT: &str = r#"{
    "speakers": [],
    "chunks": [
        {"timestamp": [0, 5.5], "text": "Hello, this is the first subtitle."},
        {"timestamp": [6, 10.2], "text": "And this is the second one."},
        {"timestamp": [11, 15.8], "text": "Finally, the third subtitle."}
    ]
}"#;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for TimestampPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTimestampPolicy {
    Strict,
    Clamp,
}

impl From<CliTimestampPolicy> for TimestampPolicy {
    fn from(cli_policy: CliTimestampPolicy) -> Self {
        match cli_policy {
            CliTimestampPolicy::Strict => TimestampPolicy::Strict,
            CliTimestampPolicy::Clamp => TimestampPolicy::Clamp,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert transcript JSON files to SRT (default command)
    Convert(ConvertArgs),

    /// Print the SRT rendering of a built-in sample transcript
    Demo,

    /// Generate shell completions for tosrt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Transcript JSON file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output SRT path for a single input file ('-' writes to stdout)
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// How negative or reversed timestamps are handled
    #[arg(long, value_enum)]
    timestamp_policy: Option<CliTimestampPolicy>,

    /// Configuration file path
    #[arg(short, long, default_value = "tosrt.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// tosrt - transcript to SubRip converter
///
/// Converts speech-recognition transcripts (JSON with timestamped chunks)
/// into SRT subtitle files.
#[derive(Parser, Debug)]
#[command(name = "tosrt")]
#[command(version)]
#[command(about = "Convert timestamped transcripts to SRT subtitles")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "tosrt converts transcript JSON files into SRT subtitles.

EXAMPLES:
    tosrt talk.json                        # Writes talk.srt next to the input
    tosrt talk.json -o subs/talk.srt       # Explicit output path
    tosrt talk.json -o -                   # Print SRT to stdout
    tosrt -f /transcripts/                 # Convert a whole directory, overwriting
    tosrt --timestamp-policy clamp raw.json
    tosrt demo                             # Show the output for a sample transcript
    tosrt completions bash > tosrt.bash    # Generate bash completions

INPUT FORMAT:
    {\"speakers\": [], \"chunks\": [{\"timestamp\": [0, 5.5], \"text\": \"Hello\"}]}

CONFIGURATION:
    Configuration is stored in tosrt.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and marker for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "✗"),
            Level::Warn => ("\x1B[1;33m", "!"),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "·"),
            Level::Trace => ("\x1B[1;35m", "…"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Max level is lowered or raised once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tosrt", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Demo) => run_demo(),
        Some(Commands::Convert(args)) => run_convert(args),
        None => run_convert(cli.convert),
    }
}

fn run_demo() -> Result<()> {
    let srt = SrtConverter::new()
        .convert_json_str(DEMO_TRANSCRIPT)
        .context("Built-in demo transcript is invalid")?;
    print!("{}", srt);
    Ok(())
}

fn run_convert(options: ConvertArgs) -> Result<()> {
    let input_path = options.input_path.clone().ok_or_else(|| {
        anyhow!("INPUT_PATH is required when no subcommand is specified")
    })?;

    if let Some(cli_level) = &options.log_level {
        let level: app_config::LogLevel = cli_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(policy) = &options.timestamp_policy {
        config.timestamp_policy = policy.clone().into();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?.exclude_path(&options.config_path);

    if input_path.is_dir() {
        if options.output.is_some() {
            return Err(anyhow!("--output can only be used with a single input file"));
        }
        let summary = controller.run_folder(input_path, options.force_overwrite)?;
        if summary.has_failures() {
            return Err(anyhow!("{} of {} files failed to convert", summary.failed.len(), summary.total()));
        }
        return Ok(());
    }

    if !input_path.is_file() {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    match options.output.as_deref() {
        Some(path) if path == Path::new("-") => {
            let transcript: Transcript = FileManager::load_transcript(&input_path)?;
            let srt = SrtConverter::with_policy(controller.config().timestamp_policy)
                .convert(&transcript)
                .with_context(|| format!("Failed to convert {}", input_path.display()))?;
            print!("{}", srt);
        }
        Some(path) => {
            report(controller.run_to_path(&input_path, path.to_path_buf(), options.force_overwrite)?);
        }
        None => {
            let output_dir = input_path.parent().unwrap_or(Path::new(".")).to_path_buf();
            report(controller.run(input_path, output_dir, options.force_overwrite)?);
        }
    }

    Ok(())
}

fn report(status: FileStatus) {
    match status {
        FileStatus::Converted { output_path, block_count } => {
            debug!("Converted {} subtitles into {}", block_count, output_path.display());
        }
        FileStatus::Skipped { output_path } => {
            info!("Nothing to do, {} already exists", output_path.display());
        }
    }
}

/// batchframe command-line tool: decode, inspect, validate, analyse and
/// encode length-prefixed frame batches.
///
/// # Command overview
///
/// ```text
/// batchframe <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Print every frame of a batch file, one per line
///   inspect    Print offsets and lengths of each frame
///   validate   Check a batch file for structural correctness
///   stats      Print frame count and size statistics
///   encode     Create a batch file from text lines or a JSON manifest
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Enable debug logging on stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details and logs are written to stderr so stdout can be
/// piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Length-prefixed frame batch tool.
#[derive(Parser)]
#[command(name = "batchframe", version, about = "Length-prefixed frame batch CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by `RUST_LOG` when set).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print every frame of a batch file, one per line.
    Decode(DecodeArgs),
    /// Print offsets and lengths of each frame.
    Inspect(InspectArgs),
    /// Check a batch file for structural correctness.
    Validate(ValidateArgs),
    /// Print frame count and size statistics.
    Stats(StatsArgs),
    /// Create a batch file from text lines or a JSON manifest.
    Encode(EncodeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `batchframe decode`.
///
/// Reads the file with repeated fixed-size reads until EOF, decodes the
/// assembled buffer, and prints each frame on its own line.
///
/// ```text
/// ┌─────────────────────┬─────────────────────────────────────────────┐
/// │ Flag                │ Effect                                      │
/// ├─────────────────────┼─────────────────────────────────────────────┤
/// │ --hex               │ Print frames as lowercase hex               │
/// │ --stream            │ Decode incrementally with StreamingDecoder  │
/// │ --chunk-size N      │ Bytes per read() call (default 65536)       │
/// │ --max-frame-len N   │ Reject frames declaring more than N bytes   │
/// └─────────────────────┴─────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the batch file to decode.
    pub file: PathBuf,

    /// Print each frame as hex instead of lossy UTF-8.
    #[arg(long)]
    pub hex: bool,

    /// Decode frames as they are read instead of buffering the whole file.
    #[arg(long)]
    pub stream: bool,

    /// Size of each read from the file, in bytes.
    #[arg(long, default_value_t = input::DEFAULT_CHUNK_SIZE, value_parser = input::parse_chunk_size)]
    pub chunk_size: usize,

    /// Reject any frame whose prefix declares more than this many bytes.
    #[arg(long)]
    pub max_frame_len: Option<u32>,
}

/// Arguments for `batchframe inspect`.
///
/// ```text
/// ┌─────────────┬──────────────────────────────────────────────────────┐
/// │ Flag        │ Effect                                               │
/// ├─────────────┼──────────────────────────────────────────────────────┤
/// │ --show-body │ Include first 80 chars of the frame (UTF-8 lossy)    │
/// │ --show-hex  │ Include 16-byte-per-line hex dump of the payload     │
/// │ --frame N   │ Show only the frame at index N                       │
/// └─────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the batch file to inspect.
    pub file: PathBuf,

    /// Show frame content (first 80 characters, UTF-8 lossy).
    #[arg(long)]
    pub show_body: bool,

    /// Show raw hex dump of frame payloads (16 bytes per line).
    #[arg(long)]
    pub show_hex: bool,

    /// Inspect only the frame at this zero-based index.
    #[arg(long)]
    pub frame: Option<usize>,
}

/// Arguments for `batchframe validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the batch file to validate.
    pub file: PathBuf,

    /// Reject any frame whose prefix declares more than this many bytes.
    #[arg(long)]
    pub max_frame_len: Option<u32>,
}

/// Arguments for `batchframe stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the batch file to analyse.
    pub file: PathBuf,
}

/// Input format for `batchframe encode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One frame per line of a UTF-8 text file (line endings stripped).
    #[default]
    Lines,
    /// A JSON manifest: `{"frames": [{"text": "..."}, {"hex": "..."}]}`.
    Json,
}

/// Arguments for `batchframe encode`.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Path to the input file.
    pub input: PathBuf,

    /// Output batch file path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// How to interpret the input file.
    #[arg(long, value_enum, default_value_t = InputFormat::Lines)]
    pub format: InputFormat,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args),
        Commands::Encode(args) => cmd_encode::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

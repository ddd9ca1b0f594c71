// Idiomatic Rust CLI for qpcodec.
//
// Subcommands encode, decode and check files (or stdin/stdout) with the
// same single-shot engines the library exposes.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::codec::{MAX_LINE_LENGTH, tables};
use crate::engine::CodecOptions;
use crate::io::{decode_stream, encode_stream};
use crate::validate::validate_encoding;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024;

/// Exit code for a `check` that found a malformed encoding.
const EXIT_INVALID: i32 = 2;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Quoted-Printable (RFC 2045) and Q-encoding (RFC 2047) codec.
#[derive(Parser, Debug)]
#[command(
    name = "qpcodec",
    version,
    about = "Quoted-Printable encoder/decoder",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encode an input stream as Quoted-Printable.
    Encode(TransformArgs),
    /// Decode a Quoted-Printable input stream.
    Decode(TransformArgs),
    /// Check that an input stream is a well-formed encoding.
    Check(CheckArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct TransformArgs {
    /// Use RFC 2047 Q-encoding (header words).
    #[arg(long = "q-encoding", short = 'Q')]
    q_encoding: bool,

    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Validate against Q-encoding rules.
    #[arg(long = "q-encoding", short = 'Q')]
    q_encoding: bool,

    /// Encoded input file (default: stdin).
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Encode,
    Decode,
    Check,
    Config,
}

#[derive(Debug)]
struct Options {
    command: Command,
    q_encoding: bool,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    json_output: bool,
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Config,
        q_encoding: false,
        use_stdout: false,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        input_file: None,
        output_file: None,
        json_output: cli.json_output,
    };

    match cli.command {
        Cmd::Encode(args) => {
            opts.command = Command::Encode;
            apply_transform_args(&mut opts, args);
        }
        Cmd::Decode(args) => {
            opts.command = Command::Decode;
            apply_transform_args(&mut opts, args);
        }
        Cmd::Check(args) => {
            opts.command = Command::Check;
            opts.q_encoding = args.q_encoding;
            opts.input_file = args.input;
        }
        Cmd::Config => {}
    }
    opts
}

fn apply_transform_args(opts: &mut Options, args: TransformArgs) {
    opts.q_encoding = args.q_encoding;
    opts.use_stdout = args.stdout;
    opts.input_file = args.input.or(args.input_pos);
    opts.output_file = args.output.or(args.output_pos);
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("qpcodec".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("qpcodec version {version} (Rust)");

    let parallel = cfg!(feature = "parallel") as u8;
    let ptr_size = std::mem::size_of::<*const ()>();

    eprintln!("PARALLEL={parallel}");
    eprintln!("MAX_LINE_LENGTH={MAX_LINE_LENGTH}");
    eprintln!("TABLE_SIZE={}", tables::TABLE_SIZE);
    eprintln!("ENCODING_TABLE_SIZE={}", tables::ENCODING_TABLE_SIZE);
    eprintln!(
        "LITERALS={} LITERALS_RESTRICTED={}",
        count_marked(&tables::TABLE_LITERALS),
        count_marked(&tables::TABLE_LITERALS_RESTRICTED)
    );
    eprintln!("sizeof(usize)={ptr_size}");

    0
}

fn count_marked(table: &[u8]) -> usize {
    table.iter().filter(|&&v| v != 0).count()
}

// ---------------------------------------------------------------------------
// Input / output helpers
// ---------------------------------------------------------------------------

fn open_input(opts: &Options) -> Result<Box<dyn Read>, i32> {
    match &opts.input_file {
        Some(path) => match File::open(path) {
            Ok(f) => Ok(Box::new(BufReader::with_capacity(BUF_SIZE, f))),
            Err(e) => {
                eprintln!("qpcodec: input file: {}: {e}", path.display());
                Err(1)
            }
        },
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(opts: &Options) -> Result<Box<dyn Write>, i32> {
    match (opts.use_stdout, &opts.output_file) {
        (true, _) | (_, None) => Ok(Box::new(io::stdout().lock())),
        (false, Some(path)) => {
            if path.exists() && !opts.force {
                eprintln!(
                    "qpcodec: output file exists, use -f to overwrite: {}",
                    path.display()
                );
                return Err(1);
            }
            match File::create(path) {
                Ok(f) => Ok(Box::new(f)),
                Err(e) => {
                    eprintln!("qpcodec: output file: {}: {e}", path.display());
                    Err(1)
                }
            }
        }
    }
}

fn print_json(json: &serde_json::Value) {
    match serde_json::to_string_pretty(json) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => log::warn!("failed to render JSON stats: {e}"),
    }
}

fn codec_options(opts: &Options) -> CodecOptions {
    CodecOptions {
        q_encoding: opts.q_encoding,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Encode / decode commands
// ---------------------------------------------------------------------------

fn cmd_encode(opts: &Options) -> i32 {
    let (reader, writer) = match open_input(opts).and_then(|r| Ok((r, open_output(opts)?))) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    let stats = match encode_stream(reader, writer, &codec_options(opts)) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("qpcodec: encode error: {e}");
            return 1;
        }
    };

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "qpcodec: encoder: input size: {}, output size: {}, soft breaks: {}",
            stats.input_size, stats.output_size, stats.soft_breaks
        );
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "encode",
            "q_encoding": opts.q_encoding,
            "input_size": stats.input_size,
            "output_size": stats.output_size,
            "soft_breaks": stats.soft_breaks,
        }));
    }

    0
}

fn cmd_decode(opts: &Options) -> i32 {
    let (reader, writer) = match open_input(opts).and_then(|r| Ok((r, open_output(opts)?))) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    let stats = match decode_stream(reader, writer, &codec_options(opts)) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("qpcodec: decode error: {e}");
            return 1;
        }
    };

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "qpcodec: decoder: input size: {}, output size: {}",
            stats.input_size, stats.output_size
        );
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "decode",
            "q_encoding": opts.q_encoding,
            "input_size": stats.input_size,
            "output_size": stats.output_size,
        }));
    }

    0
}

// ---------------------------------------------------------------------------
// Check command
// ---------------------------------------------------------------------------

fn cmd_check(opts: &Options) -> i32 {
    let mut reader = match open_input(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let mut data = Vec::new();
    if let Err(e) = reader.read_to_end(&mut data) {
        eprintln!("qpcodec: read error: {e}");
        return 1;
    }

    let result = validate_encoding(&data, opts.q_encoding);

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "check",
            "q_encoding": opts.q_encoding,
            "input_size": data.len(),
            "valid": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
        }));
    }

    match result {
        Ok(()) => {
            if !opts.quiet {
                eprintln!("qpcodec: valid ({} bytes)", data.len());
            }
            0
        }
        Err(e) => {
            eprintln!("qpcodec: invalid: {e}");
            EXIT_INVALID
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    let default_filter = match (opts.quiet, opts.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Warn if -c overrides output filename.
    if opts.use_stdout
        && let Some(path) = opts.output_file.take()
        && !opts.quiet
    {
        eprintln!(
            "qpcodec: warning: -c option overrides output filename: {}",
            path.display()
        );
    }

    let exit_code = match opts.command {
        Command::Encode => cmd_encode(&opts),
        Command::Decode => cmd_decode(&opts),
        Command::Check => cmd_check(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

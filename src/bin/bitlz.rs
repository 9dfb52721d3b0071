//! bitlz - decode and explore LZ77 bitstreams.
//!
//! ## Usage
//!
//! ```bash
//! # Text to plain 8-bit bitstream
//! bitlz encode "the rain in spain"
//!
//! # Decode a bitstream file (or `-` for stdin)
//! bitlz decode --offset-bits 9 --length-bits 3 stream.bits
//!
//! # Try a grid of field widths and keep the lowest-entropy decoding
//! bitlz sweep stream.bits
//! bitlz sweep --config grid.toml --text "the rain in spain"
//!
//! # Built-in demonstration
//! bitlz demo
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bitlz::sweep::{Candidate, Outcome};
use bitlz::{
    decode, generate_bitstream, parse_bitstream, shannon_entropy, sweep, LocalBitstreamSource,
    SweepConfig, SweepReport,
};

const DEMO_TEXT: &str =
    "the rain in spain falls mainly on the plain the rain in spain falls mainly";

/// Output samples longer than this are cut in the sweep table.
const SAMPLE_CHARS: usize = 20;

#[derive(Parser, Debug)]
#[command(name = "bitlz")]
#[command(version)]
#[command(about = "Bit-oriented LZ77 bitstream decoder", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the 8-bit MSB-first bitstream of TEXT
    Encode {
        text: String,
    },
    /// Decode a bitstream
    Decode {
        /// Offset field width; the window holds 2^N bytes
        #[arg(short, long, default_value = "9")]
        offset_bits: u32,

        /// Length field width
        #[arg(short, long, default_value = "3")]
        length_bits: u32,

        /// Bitstream file, `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Decode under a grid of field widths and rank by entropy
    Sweep {
        /// TOML file with `offset_bits` / `length_bits` lists
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Generate the bitstream from this text instead of reading one
        #[arg(short, long, conflicts_with = "input")]
        text: Option<String>,

        /// Bitstream file, `-` for stdin
        input: Option<PathBuf>,
    },
    /// Sweep the built-in demonstration text
    Demo,
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(parse_bitstream(&text)?);
    }

    let source = LocalBitstreamSource::new(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    Ok(source.load()?)
}

fn sample(output: &[u8]) -> String {
    let text = String::from_utf8_lossy(output);
    if text.chars().count() > SAMPLE_CHARS {
        let cut: String = text.chars().take(SAMPLE_CHARS).collect();
        format!("{cut}...")
    } else {
        text.into_owned()
    }
}

fn print_row(candidate: &Candidate) {
    let p = candidate.params;
    match &candidate.outcome {
        Outcome::Scored { entropy, output } => println!(
            "{:9} | {:10} | {:7.4} | {}",
            p.offset_bits,
            p.length_bits,
            entropy,
            sample(output)
        ),
        Outcome::Failed { error, .. } => println!(
            "{:9} | {:10} | {:>8} | Error: {}",
            p.offset_bits, p.length_bits, "N/A", error
        ),
    }
}

fn print_report(report: &SweepReport, bits: &str, original: Option<&str>) {
    println!("Testing LZ77 parameters:");
    println!("OffsetBits | LengthBits | Entropy | Output Sample");
    println!("-----------|------------|---------|---------------");
    for candidate in &report.candidates {
        print_row(candidate);
    }

    let Some(best) = report.best() else {
        println!("\nNo parameters decoded the bitstream cleanly.");
        return;
    };
    let entropy = best.entropy().unwrap_or_default();
    let output = best.output();

    println!("\nBest parameters: {}", best.params);
    println!("Lowest entropy: {:.4} bits/character", entropy);
    println!(
        "Decompressed result ({} characters):\n{}",
        output.len(),
        String::from_utf8_lossy(output)
    );

    println!("\nEntropy comparison:");
    if let Some(text) = original {
        println!(
            "Original text:  {:.4} bits/character",
            shannon_entropy(text.as_bytes())
        );
    }
    println!("Decompressed:   {:.4} bits/character", entropy);
    println!(
        "Bitstream:      {:.4} bits/character",
        shannon_entropy(bits.as_bytes())
    );
}

fn run_sweep(bits: &str, config: &SweepConfig, original: Option<&str>) {
    info!(bits = bits.len(), candidates = config.candidates().len(), "starting sweep");
    let report = sweep(bits.as_bytes(), config);
    print_report(&report, bits, original);
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    match args.command {
        Command::Encode { text } => {
            println!("{}", generate_bitstream(text.as_bytes()));
        }
        Command::Decode {
            offset_bits,
            length_bits,
            input,
        } => {
            let bits = read_input(&input)?;
            let decoded = decode(bits.as_bytes(), offset_bits, length_bits);
            println!("{}", decoded.text());
            if let Some(e) = decoded.error {
                eprintln!("error: {e}");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Sweep {
            config,
            text,
            input,
        } => {
            let config = match config {
                Some(path) => SweepConfig::from_file(&path)
                    .with_context(|| format!("failed to load {}", path.display()))?,
                None => SweepConfig::default(),
            };
            match (text, input) {
                (Some(text), _) => {
                    let bits = generate_bitstream(text.as_bytes());
                    run_sweep(&bits, &config, Some(&text));
                }
                (None, Some(input)) => run_sweep(&read_input(&input)?, &config, None),
                (None, None) => bail!("sweep needs a bitstream file or --text"),
            }
        }
        Command::Demo => {
            let bits = generate_bitstream(DEMO_TEXT.as_bytes());
            println!("Original text: {DEMO_TEXT}\n");
            println!("Generated bitstream ({} bits):\n{}\n", bits.len(), bits);
            run_sweep(&bits, &SweepConfig::default(), Some(DEMO_TEXT));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args.log_level)?;
    run(args)
}

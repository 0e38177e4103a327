use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};

use crc16sum::checksum::{self, parse_hex, parse_value, ByteOrder, OutputFormat};
use crc16sum::{AppConfig, ChecksumError};

#[derive(Parser)]
#[command(name = "crc16sum", about = "CRC-16 (0xA001 reflected, init 0xFFFF) checksums")]
struct Cli {
    /// Files to checksum ("-" reads stdin)
    files: Vec<PathBuf>,

    /// Checksum a string, one byte per character (Latin-1)
    #[arg(short, long = "string", value_name = "TEXT")]
    strings: Vec<String>,

    /// Checksum hex-encoded bytes
    #[arg(short = 'x', long = "hex", value_name = "HEX")]
    hex: Vec<String>,

    /// Print the checksums of "hello" and "world"
    #[arg(long)]
    demo: bool,

    /// Verify the single input against this checksum (decimal or 0x hex)
    #[arg(long, value_name = "VALUE")]
    check: Option<String>,

    /// Output format: decimal, hex or bytes
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Byte order for the bytes format: big or little
    #[arg(long)]
    byte_order: Option<ByteOrder>,

    /// Emit one JSON object per input
    #[arg(long)]
    json: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective format settings to the default config file
    #[arg(long)]
    save_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// One thing to checksum, with the label it is reported under.
struct Input {
    label: String,
    bytes: Vec<u8>,
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    len: usize,
    crc16: u16,
    formatted: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "crc16sum=debug" } else { "crc16sum=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("crc16sum: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(order) = cli.byte_order {
        config.byte_order = order;
    }
    debug!(?config, "effective config");

    if cli.save_config {
        let path = config.save()?;
        info!("Saved settings to {}", path.display());
    }

    let inputs = collect_inputs(&cli)?;
    if inputs.is_empty() {
        if cli.save_config {
            return Ok(ExitCode::SUCCESS);
        }
        bail!("nothing to checksum; pass FILE, --string, --hex or --demo");
    }

    if let Some(expected) = &cli.check {
        ensure!(
            inputs.len() == 1,
            "--check needs exactly one input, got {}",
            inputs.len()
        );
        let expected = parse_value(expected)?;
        let input = &inputs[0];
        return match checksum::verify(&input.bytes, expected) {
            Ok(()) => {
                println!("{}: OK", input.label);
                Ok(ExitCode::SUCCESS)
            }
            Err(e @ ChecksumError::Mismatch { .. }) => {
                warn!("{}: {}", input.label, e);
                println!("{}: FAILED", input.label);
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e.into()),
        };
    }

    for input in &inputs {
        let sum = checksum::crc16(&input.bytes);
        let formatted = config.render(sum);
        if cli.json {
            let report = Report {
                input: &input.label,
                len: input.bytes.len(),
                crc16: sum,
                formatted,
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}  {}", formatted, input.label);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn collect_inputs(cli: &Cli) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();

    if cli.demo {
        for word in ["hello", "world"] {
            inputs.push(Input {
                label: word.to_string(),
                bytes: word.as_bytes().to_vec(),
            });
        }
    }

    for path in &cli.files {
        let bytes = read_all(path)?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        inputs.push(Input {
            label: path.display().to_string(),
            bytes,
        });
    }

    for text in &cli.strings {
        let bytes = checksum::bytes_from_codes(text.chars().map(u32::from))
            .with_context(|| format!("--string {text:?}"))?;
        inputs.push(Input {
            label: format!("{text:?}"),
            bytes,
        });
    }

    for hex in &cli.hex {
        let bytes = parse_hex(hex).with_context(|| format!("decoding --hex {hex:?}"))?;
        inputs.push(Input {
            label: format!("0x{}", hex.trim().trim_start_matches("0x")),
            bytes,
        });
    }

    Ok(inputs)
}

fn read_all(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

mod config;
mod stream;

use anyhow::{Context, Result};
use clap::Parser;
use config::{CliOverrides, Config, FileConfig};
use log::info;
use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

/// Command line argument parser
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Encode or decode basE91 text", long_about = None)]
pub struct MyArgs {
    /// Decode basE91 input instead of encoding
    #[arg(short, long, action, conflicts_with = "encode")]
    pub(crate) decode: bool,

    /// Encode, even if the config file says to decode
    #[arg(short, long, action)]
    pub(crate) encode: bool,

    /// Input file path (stdin if omitted)
    #[arg(short, long)]
    pub(crate) input: Option<PathBuf>,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Break encoded output into lines of this many symbols (0 = no line breaks)
    #[arg(short, long)]
    pub(crate) wrap: Option<usize>,

    /// Path to TOML config
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Bytes read from the input per chunk
    #[arg(long)]
    pub(crate) buffer_size: Option<usize>,

    /// Log level (error|warn|info|debug|trace)
    #[arg(long)]
    pub(crate) log_level: Option<String>,
}

fn init_logger(level: &str) {
    env_logger::Builder::new().parse_filters(level).init();
}

fn main() -> Result<()> {
    let args: MyArgs = MyArgs::parse();

    let file_cfg = match &args.config {
        Some(p) => Some(FileConfig::read(p)?),
        None => None,
    };
    let overrides = CliOverrides {
        decode: match (args.decode, args.encode) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
        wrap: args.wrap,
        buffer_size: args.buffer_size,
        log_level: args.log_level,
        input: args.input,
        output: args.output,
    };
    let cfg = Config::merge(file_cfg, overrides)?;
    init_logger(&cfg.log_level);

    run(&cfg)
}

fn run(cfg: &Config) -> Result<()> {
    let reader: Box<dyn Read> = match &cfg.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open input {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match &cfg.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("create output {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if cfg.decode {
        let totals = stream::decode_stream(reader, writer, cfg.buffer_size)?;
        info!(
            "decoded {} symbols into {} bytes",
            totals.bytes_in, totals.bytes_out
        );
    } else {
        let totals = stream::encode_stream(reader, writer, cfg.buffer_size, cfg.wrap)?;
        info!(
            "encoded {} bytes into {} symbols",
            totals.bytes_in, totals.bytes_out
        );
    }
    Ok(())
}

/*!
Main binary for jsondrip.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::io::stdout;
use std::io::{self};
use std::{
    fs::{self},
    io::{IsTerminal, Read},
    path::PathBuf,
};

use jsondrip::decode::StreamDecoder;
use jsondrip::utils;

/// Decode every complete JSON document out of a fragmented stream.
#[derive(Parser)]
#[command(name = "jd", version, about, long_about = None, disable_help_subcommand = true)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to the stream. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Feed the decoder in slices of this many bytes, the way a fixed-size
    /// transport would deliver them
    #[arg(long, value_name = "BYTES")]
    chunk_size: Option<usize>,
    /// Do not pretty-print the JSON output, instead use compact
    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,
    /// Display count of decoded documents
    #[arg(long, action = ArgAction::SetTrue)]
    count: bool,
    /// Prefix every document with its ordinal in the stream
    #[arg(long, action = ArgAction::SetTrue)]
    ordinals: bool,
    /// Do not display decoded documents
    #[arg(short, long, action = ArgAction::SetTrue)]
    no_display: bool,
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

/// Available subcommands for `jd`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man pages
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate man pages for jd to the output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Entry point for main binary.
///
/// Reads the stream (file argument or piped STDIN), feeds it to the
/// incremental decoder — in slices when `--chunk-size` is given — and
/// prints every complete document to STDOUT. Trailing bytes that never
/// complete a document are reported through the logger, not treated as an
/// error: incompleteness is an expected state of a fragmented stream.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    match args.command {
        Some(Commands::Generate(cmd)) => match cmd {
            GenerateCommand::Shell { shell } => {
                let mut cmd = Args::command();
                generate(shell, &mut cmd, "jd", &mut stdout().lock());
            }
            GenerateCommand::Man { output_dir } => {
                jsondrip::commands::generate::man_pages(
                    &Args::command(),
                    output_dir,
                )?;
            }
        },
        None => run_decode(&args)?,
    }

    Ok(())
}

/// Decode the whole input and render the results per the display flags.
fn run_decode(args: &Args) -> Result<()> {
    let input = if let Some(path) = &args.input {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {path:?}"))?
    } else {
        if io::stdin().is_terminal() {
            // No piped input and no file specified
            let mut cmd = Args::command();
            return Ok(cmd.print_help()?);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let mut decoder = StreamDecoder::new();
    let mut documents = Vec::new();
    match args.chunk_size {
        Some(size) => {
            for chunk in chunked(&input, size.max(1)) {
                log::trace!("feeding {} byte chunk", chunk.len());
                documents.extend(decoder.push(chunk));
            }
        }
        None => documents.extend(decoder.push(&input)),
    }

    if !decoder.pending().trim().is_empty() {
        log::warn!(
            "{} trailing bytes did not complete a document",
            decoder.pending().len()
        );
    }

    if args.count {
        println!("Decoded documents: {}", documents.len());
    }

    if !args.no_display {
        let mut out = stdout().lock();
        for (i, document) in documents.iter().enumerate() {
            utils::write_colored_doc(
                &mut out,
                document,
                i + 1,
                !args.compact,
                args.ordinals,
            )?;
        }
    }

    Ok(())
}

/// Split `input` into slices of roughly `size` bytes, every cut on a char
/// boundary so each slice is valid UTF-8.
fn chunked(input: &str, size: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for (i, _) in input.char_indices() {
        if i - start >= size {
            chunks.push(&input[start..i]);
            start = i;
        }
    }
    chunks.push(&input[start..]);
    chunks
}

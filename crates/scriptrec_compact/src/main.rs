//! scriptrec_compact - rewrites a scriptrec XML document, merging runs
//! of whitespace-only timesteps into the next busy one.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

mod coalesce;
mod tree;

use tree::TreeError;

#[derive(Parser, Debug)]
#[command(version, about = "Coalesces whitespace-only timesteps in scriptrec XML documents", long_about = None)]
struct Args {
    /// Enable debug trace output on stderr
    #[arg(long)]
    debug: bool,

    /// Input XML document; stdin when omitted
    #[arg(value_name = "INPUT_XML")]
    input: Option<PathBuf>,

    /// Output XML document; stdout when omitted
    #[arg(value_name = "OUTPUT_XML")]
    output: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CompactError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("unexpected root element \"{name}\", expected \"script\"")]
    BadRoot { name: String },

    #[error("cannot open input file: {0}")]
    InputOpen(io::Error),

    #[error("cannot open output file: {0}")]
    OutputOpen(io::Error),

    #[error("error while writing XML output: {0}")]
    Write(io::Error),
}

impl CompactError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Tree(TreeError::Parse(_)) => 1,
            Self::Tree(TreeError::NoRoot) | Self::BadRoot { .. } => 4,
            Self::InputOpen(_) => 2,
            Self::OutputOpen(_) | Self::Write(_) => 3,
        }
    }
}

fn run(args: &Args) -> Result<(), CompactError> {
    let input: Box<dyn Read> = match &args.input {
        Some(path) => {
            log::debug!("reading XML from file {}", path.display());
            Box::new(BufReader::new(File::open(path).map_err(CompactError::InputOpen)?))
        }
        None => {
            log::debug!("reading XML from stdin");
            Box::new(io::stdin().lock())
        }
    };

    let mut root = tree::parse_tree(input)?;
    if root.name != "script" {
        return Err(CompactError::BadRoot { name: root.name });
    }

    coalesce::coalesce(&mut root);

    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => {
            log::debug!("writing XML to file {}", path.display());
            Box::new(BufWriter::new(File::create(path).map_err(CompactError::OutputOpen)?))
        }
        None => {
            log::debug!("writing XML to stdout");
            Box::new(BufWriter::new(io::stdout().lock()))
        }
    };

    tree::write_document(&mut output, &root).map_err(CompactError::Write)?;
    output.flush().map_err(CompactError::Write)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _logger = flexi_logger::Logger::try_with_env_or_str(if args.debug { "debug" } else { "warn" })
        .unwrap()
        .start();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::from(error.exit_code())
        }
    }
}

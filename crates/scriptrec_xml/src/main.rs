//! scriptrec_xml - converts a `script(1)` session recording (timing file
//! plus typescript file) into a structured XML document.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod driver;
mod xml;

#[derive(Parser, Debug)]
#[command(version, about = "Converts a script(1) timing/typescript recording into structured XML", long_about = None)]
struct Args {
    /// Enable debug trace output on stderr
    #[arg(long)]
    debug: bool,

    /// Timing file produced by `script -t` (delay and byte count per step)
    #[arg(value_name = "TIMINGFILE")]
    timing: PathBuf,

    /// Typescript file produced by `script(1)`
    #[arg(value_name = "TYPESCRIPTFILE")]
    typescript: PathBuf,

    /// Output file; `-` writes the document to stdout
    #[arg(value_name = "XMLOUT")]
    output: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _logger = flexi_logger::Logger::try_with_env_or_str(if args.debug { "debug" } else { "warn" })
        .unwrap()
        .start();

    let timing = match File::open(&args.timing) {
        Ok(file) => BufReader::new(file),
        Err(error) => {
            eprintln!("Cannot open timing file \"{}\": {error}", args.timing.display());
            return ExitCode::from(1);
        }
    };

    let typescript = match File::open(&args.typescript) {
        Ok(file) => BufReader::new(file),
        Err(error) => {
            eprintln!("Cannot open typescript file \"{}\": {error}", args.typescript.display());
            return ExitCode::from(1);
        }
    };

    let result = if args.output == "-" {
        driver::convert(timing, typescript, BufWriter::new(io::stdout().lock()))
    } else {
        match File::create(&args.output) {
            Ok(file) => driver::convert(timing, typescript, BufWriter::new(file)),
            Err(error) => {
                eprintln!("Cannot open output file \"{}\": {error}", args.output);
                return ExitCode::from(1);
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::from(error.exit_code())
        }
    }
}

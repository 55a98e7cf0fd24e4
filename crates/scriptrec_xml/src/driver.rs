//! Timing-driven conversion loop.
//!
//! Reads the timing file line by line; each record tells how long the
//! step lasted and how many typescript bytes belong to it. Those bytes
//! are decoded into one `<timestep>` element.

use std::io::{self, BufRead, Read, Write};

use scriptrec_parser_core::TypescriptParser;
use thiserror::Error;

use crate::xml::XmlEventSink;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("error while reading timing file: unexpected format in line {line}")]
    TimingFormat { line: usize },

    #[error("error while reading timing file: {0}")]
    TimingIo(io::Error),

    #[error("expected to read {expected} bytes from typescript file, got only {got}")]
    ShortRead { expected: usize, got: usize },

    #[error("error while reading typescript file: {0}")]
    TypescriptIo(io::Error),

    #[error("error while writing XML output: {0}")]
    Write(io::Error),
}

impl DriverError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::TimingFormat { .. } => 2,
            _ => 1,
        }
    }
}

/// One timing record: `<delay in seconds> <byte count>`.
fn parse_timing_line(line: &str) -> Option<(f64, usize)> {
    let mut fields = line.split_whitespace();
    let delay = fields.next()?.parse().ok()?;
    let byte_count = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((delay, byte_count))
}

/// Discard input up to and including the next line break.
fn skip_line<R: BufRead>(input: &mut R) -> io::Result<()> {
    let mut discarded = Vec::new();
    input.read_until(b'\n', &mut discarded)?;
    Ok(())
}

/// Fill `buffer` completely; anything less is a hard failure because the
/// byte accounting between the two input files would be broken.
fn read_chunk<R: Read>(typescript: &mut R, buffer: &mut [u8]) -> Result<(), DriverError> {
    let mut filled = 0;
    while filled < buffer.len() {
        match typescript.read(&mut buffer[filled..]) {
            Ok(0) => {
                return Err(DriverError::ShortRead {
                    expected: buffer.len(),
                    got: filled,
                })
            }
            Ok(read) => filled += read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(DriverError::TypescriptIo(error)),
        }
    }
    Ok(())
}

/// Convert one timing/typescript pair into a complete XML document.
pub fn convert<T: BufRead, S: BufRead, W: Write>(timing: T, mut typescript: S, output: W) -> Result<(), DriverError> {
    let mut parser = TypescriptParser::new();
    let mut sink = XmlEventSink::new(output);

    // The first typescript line is the comment header script(1) writes.
    skip_line(&mut typescript).map_err(DriverError::TypescriptIo)?;

    sink.document_start();

    let mut chunk = vec![0u8; 16];
    for (index, line) in timing.lines().enumerate() {
        let line = line.map_err(DriverError::TimingIo)?;
        let (delay, byte_count) = parse_timing_line(&line).ok_or(DriverError::TimingFormat { line: index + 1 })?;

        sink.timestep_start(delay);

        if byte_count > chunk.len() {
            chunk.resize(byte_count.next_power_of_two(), 0);
        }
        read_chunk(&mut typescript, &mut chunk[..byte_count])?;
        parser.parse(&chunk[..byte_count], &mut sink);

        sink.timestep_end();
        sink.take_error().map_err(DriverError::Write)?;
    }

    sink.document_end();
    sink.finish().map_err(DriverError::Write)
}

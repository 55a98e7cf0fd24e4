//! Decoder error types.

use thiserror::Error;

/// Problems found while decoding a typescript chunk.
///
/// All of these are recoverable: the offending sequence is dropped and
/// the scan resumes, so a sink only ever sees well-formed events. They
/// are reported through [`crate::EventSink::report_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A CSI sequence ended without a final byte in 0x40..=0x7F.
    #[error("final byte expected at offset {offset}, found {found:#04x}")]
    MissingFinalByte { offset: usize, found: u8 },

    /// An OSC or DCS command string was not followed by a string
    /// terminator (ST, ESC \ or BEL).
    #[error("string terminator expected at offset {offset}, found {found:#04x}")]
    MissingStringTerminator { offset: usize, found: u8 },

    /// A parameter, intermediate or command-string collection exceeded
    /// its size limit; the sequence was truncated and dropped.
    #[error("control sequence longer than {limit} bytes")]
    SequenceTooLong { limit: usize },

    /// ESC followed by a byte that introduces no known structure.
    #[error("unknown escape sequence introducer {introducer:#04x}")]
    UnknownEscape { introducer: u8 },
}

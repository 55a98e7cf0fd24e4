//! Typescript stream decoder
//!
//! Scans one timing-driven chunk of a typescript byte stream and emits
//! typed terminal events. Control sequences never span chunk boundaries:
//! `script(1)` flushes its buffer per timestep, and a sequence cut off at
//! the end of a chunk is simply dropped.

mod csi;
mod sgr;
#[cfg(test)]
mod tests;

use crate::{EventSink, ParseError, TerminalEvent};

/// Collection limit for parameter, intermediate and command-string runs.
const MAX_SEQUENCE: usize = 1024;

/// Bytes allowed inside OSC and DCS command strings
/// (00/08..00/13 and 02/00..07/14 in ECMA-48 notation).
fn is_command_string_byte(byte: u8) -> bool {
    matches!(byte, 0x08..=0x0D | 0x20..=0x7E)
}

/// What to do with a collected command string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringKind {
    /// OSC - may carry a window title (ECMA-48 8.3.89)
    Osc,
    /// DCS - collected and discarded (ECMA-48 8.3.27)
    Dcs,
}

/// Decoder for the byte stream recorded by `script(1)`.
///
/// Feed it one timestep chunk at a time via [`TypescriptParser::parse`];
/// the decoded events arrive at the supplied [`EventSink`].
#[derive(Debug, Default)]
pub struct TypescriptParser {}

impl TypescriptParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one timestep chunk.
    ///
    /// Any text run still open when the chunk ends is flushed, so sinks
    /// can close their containers before the surrounding timestep does.
    pub fn parse(&mut self, chunk: &[u8], sink: &mut dyn EventSink) {
        let mut i = 0;
        while i < chunk.len() {
            match chunk[i] {
                0x0A => {
                    sink.event(TerminalEvent::Newline);
                    i += 1;
                }
                0x0D => {
                    sink.flush_text();
                    // A CR immediately followed by LF stays silent; the
                    // LF emits the newline. A lone CR, including one at
                    // the very end of the chunk, emits it itself.
                    if chunk.get(i + 1) != Some(&0x0A) {
                        sink.event(TerminalEvent::Newline);
                    }
                    i += 1;
                }
                0x1B if i + 1 < chunk.len() => {
                    sink.flush_text();
                    i = self.escape(chunk, i, sink);
                }
                0x20..=0x7F => {
                    let start = i;
                    while i < chunk.len() && matches!(chunk[i], 0x20..=0x7F) {
                        i += 1;
                    }
                    sink.text(&chunk[start..i]);
                }
                byte => {
                    // Unhandled C0 control, 8-bit byte, or ESC at the end
                    // of the chunk. Ends any text run, produces nothing.
                    sink.flush_text();
                    log::trace!("discarding byte {byte:#04x} at offset {i}");
                    i += 1;
                }
            }
        }
        sink.flush_text();
    }

    /// Dispatch on the byte after ESC. `index` points at the ESC itself
    /// and at least one more byte is present. Returns the offset at
    /// which scanning resumes.
    fn escape(&mut self, chunk: &[u8], index: usize, sink: &mut dyn EventSink) -> usize {
        match chunk[index + 1] {
            0x5B => self.control_sequence(chunk, index + 2, sink),
            0x5D => self.command_string(chunk, index + 2, StringKind::Osc, sink),
            0x50 => self.command_string(chunk, index + 2, StringKind::Dcs, sink),
            byte @ 0x3C..=0x3F => {
                // Private parameter string, assumed to be a two-byte
                // sequence like the original recordings contain.
                log::debug!("private parameter string {byte:#04x}, skipping");
                index + 2
            }
            byte => {
                sink.report_error(ParseError::UnknownEscape { introducer: byte });
                index + 2
            }
        }
    }

    /// CSI - Control Sequence Introducer (ECMA-48 5.4). `start` points
    /// just past the `ESC [`.
    fn control_sequence(&mut self, chunk: &[u8], start: usize, sink: &mut dyn EventSink) -> usize {
        let mut i = start;
        while i < chunk.len() && i - start < MAX_SEQUENCE && matches!(chunk[i], 0x30..=0x3F) {
            i += 1;
        }
        let parameters = &chunk[start..i];
        if parameters.len() == MAX_SEQUENCE {
            sink.report_error(ParseError::SequenceTooLong { limit: MAX_SEQUENCE });
            return i;
        }

        let intermediate_start = i;
        while i < chunk.len() && i - intermediate_start < MAX_SEQUENCE && matches!(chunk[i], 0x20..=0x2F) {
            i += 1;
        }
        let intermediates = &chunk[intermediate_start..i];
        if intermediates.len() == MAX_SEQUENCE {
            sink.report_error(ParseError::SequenceTooLong { limit: MAX_SEQUENCE });
            return i;
        }

        match chunk.get(i) {
            Some(&final_byte @ 0x40..=0x7F) => {
                csi::interpret(final_byte, intermediates, parameters, sink);
                i + 1
            }
            Some(&found) => {
                // Abort and resume at the offending byte.
                sink.report_error(ParseError::MissingFinalByte { offset: i, found });
                i
            }
            None => i,
        }
    }

    /// Shared collector for OSC and DCS command strings, both delimited
    /// by a string terminator (0x9C, `ESC \` or BEL).
    fn command_string(&mut self, chunk: &[u8], start: usize, kind: StringKind, sink: &mut dyn EventSink) -> usize {
        let mut i = start;
        while i < chunk.len() && i - start < MAX_SEQUENCE && is_command_string_byte(chunk[i]) {
            i += 1;
        }
        let body = &chunk[start..i];

        match kind {
            StringKind::Osc => {
                if body.len() > 3 && body.starts_with(b"0;") {
                    // OSC 0 sets the window title.
                    sink.event(TerminalEvent::WindowTitle(&body[2..]));
                } else {
                    log::debug!("ignoring operating system command {:?}", String::from_utf8_lossy(body));
                }
            }
            StringKind::Dcs => {
                log::debug!("ignoring device control string {:?}", String::from_utf8_lossy(body));
            }
        }

        match chunk.get(i) {
            Some(&0x9C) | Some(&0x07) => i + 1,
            Some(&0x1B) if chunk.get(i + 1) == Some(&0x5C) => i + 2,
            Some(&found) => {
                // No terminator; the stray byte is dropped with the string.
                sink.report_error(ParseError::MissingStringTerminator { offset: i, found });
                i + 1
            }
            None => i,
        }
    }
}

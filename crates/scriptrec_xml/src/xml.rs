//! XML emission for decoded typescript events.
//!
//! `XmlEventSink` is the adapter between the decoder and the output
//! document: it owns the "inside `<text>`" state and writes one element
//! per line, matching the format the coalescer consumes.

use std::io::{self, Write};

use scriptrec_parser_core::{EventSink, ParseError, TerminalEvent};

/// Write one character-data byte, escaping the XML markup characters.
fn write_xmlized<W: Write>(out: &mut W, byte: u8) -> io::Result<()> {
    match byte {
        b'<' => out.write_all(b"&lt;"),
        b'>' => out.write_all(b"&gt;"),
        b'&' => out.write_all(b"&amp;"),
        _ => out.write_all(&[byte]),
    }
}

pub struct XmlEventSink<W: Write> {
    out: W,
    inside_text: bool,
    error: Option<io::Error>,
}

impl<W: Write> XmlEventSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            inside_text: false,
            error: None,
        }
    }

    /// Run one write, remembering the first failure. Output stops after
    /// a failed write; the driver picks the error up via [`Self::take_error`].
    fn put<F: FnOnce(&mut W) -> io::Result<()>>(&mut self, write: F) {
        if self.error.is_none() {
            if let Err(error) = write(&mut self.out) {
                self.error = Some(error);
            }
        }
    }

    /// The first write error, if any occurred since the last call.
    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub fn document_start(&mut self) {
        self.put(|out| writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>"));
        self.put(|out| writeln!(out, "<script>"));
    }

    pub fn document_end(&mut self) {
        self.put(|out| writeln!(out, "</script>"));
    }

    pub fn timestep_start(&mut self, delay: f64) {
        self.put(move |out| writeln!(out, "<timestep delay=\"{delay:.3}\">"));
    }

    pub fn timestep_end(&mut self) {
        self.close_text();
        self.put(|out| writeln!(out, "</timestep>"));
    }

    /// Flush the underlying writer and surface any pending error.
    pub fn finish(mut self) -> io::Result<()> {
        self.take_error()?;
        self.out.flush()
    }

    fn open_text(&mut self) {
        if !self.inside_text {
            self.put(|out| write!(out, "<text>"));
            self.inside_text = true;
        }
    }

    fn close_text(&mut self) {
        if self.inside_text {
            self.put(|out| writeln!(out, "</text>"));
            self.inside_text = false;
        }
    }
}

impl<W: Write> EventSink for XmlEventSink<W> {
    fn text(&mut self, bytes: &[u8]) {
        self.open_text();
        for &byte in bytes {
            self.put(|out| write_xmlized(out, byte));
        }
    }

    fn flush_text(&mut self) {
        self.close_text();
    }

    fn event(&mut self, event: TerminalEvent<'_>) {
        self.close_text();
        match event {
            TerminalEvent::Newline => self.put(|out| writeln!(out, "<newline />")),
            TerminalEvent::CursorPosition { row, column } => {
                self.put(move |out| writeln!(out, "<cursor absoluterow=\"{row}\" absolutecolumn=\"{column}\" />"));
            }
            TerminalEvent::Erase { scope, range } => {
                self.put(move |out| writeln!(out, "<erase scope=\"{}\" range=\"{}\" />", scope.as_str(), range.as_str()));
            }
            TerminalEvent::CursorKeys(control) => {
                self.put(move |out| writeln!(out, "<cursor key-control=\"{}\" />", control.as_str()));
            }
            TerminalEvent::CursorBlinking(blinking) => {
                self.put(move |out| writeln!(out, "<cursor blinking=\"{blinking}\" />"));
            }
            TerminalEvent::CursorVisible(show) => {
                self.put(move |out| writeln!(out, "<cursor show=\"{show}\" />"));
            }
            TerminalEvent::CursorMemory(memory) => {
                self.put(move |out| writeln!(out, "<cursor state=\"{}\" />", memory.as_str()));
            }
            TerminalEvent::ScreenSwitch(screen) => {
                self.put(move |out| writeln!(out, "<screen switchto=\"{screen}\" />"));
            }
            TerminalEvent::EightBitMeta => self.put(|out| writeln!(out, "<special state=\"8bit\" />")),
            TerminalEvent::ColorReset => self.put(|out| writeln!(out, "<color operation=\"reset\" />")),
            TerminalEvent::SetColor { layer, weight, name } => {
                self.put(move |out| {
                    writeln!(out, "<color {}=\"{}-{}\" />", layer.as_str(), weight.as_str(), name.as_str())
                });
            }
            TerminalEvent::WindowTitle(title) => {
                self.put(|out| write!(out, "<osc type=\"windowtitle\">"));
                for &byte in title {
                    // Only the printable part of the title survives.
                    if matches!(byte, 0x20..=0x7E) {
                        self.put(|out| write_xmlized(out, byte));
                    }
                }
                self.put(|out| writeln!(out, "</osc>"));
            }
        }
    }

    fn report_error(&mut self, error: ParseError) {
        log::debug!("typescript anomaly: {error}");
    }
}

//! Core decoder infrastructure: terminal event types, sink traits and the
//! typescript stream decoder.
//!
//! A [`TypescriptParser`] scans one timing-driven chunk of the raw byte
//! stream recorded by `script(1)` and reports everything it finds to an
//! [`EventSink`]: runs of printable text, line breaks and the decoded
//! meaning of ECMA-48 control structures (CSI, OSC, DCS and bare two-byte
//! escape sequences).

mod decimal;
pub use decimal::{ascii_to_dec, parse_parameter_list, Decoded};

mod decoder;
pub use decoder::TypescriptParser;

mod errors;
pub use errors::ParseError;

/// Erase scope for the ED/EL commands (ESC[nJ / ESC[nK)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseScope {
    /// ED - Erase in Page (ECMA-48 8.3.39)
    InPage,
    /// EL - Erase in Line (ECMA-48 8.3.41)
    InLine,
}

impl EraseScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InPage => "in_page",
            Self::InLine => "in_line",
        }
    }
}

/// Erase range selected by the ED/EL parameter
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseRange {
    /// Erase from the cursor to the end (parameter 0, the default)
    CurToEnd,
    /// Erase from the beginning up to the cursor (parameter 1)
    BeginToCur,
    /// Erase everything (parameter 2 and above)
    All,
}

impl EraseRange {
    pub fn from_parameter(parameter: i32) -> Self {
        match parameter {
            0 => Self::CurToEnd,
            1 => Self::BeginToCur,
            _ => Self::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurToEnd => "cur_to_end",
            Self::BeginToCur => "begin_to_cur",
            Self::All => "all",
        }
    }
}

/// Who interprets cursor key presses (DECCKM, mode 1)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyControl {
    /// The running application handles cursor keys
    Application,
    /// The terminal handles cursor keys
    Terminal,
}

impl KeyControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Terminal => "terminal",
        }
    }
}

/// Saved-cursor operations (DECSET/DECRST 1048 and 1049)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMemory {
    Save,
    Restore,
}

impl CursorMemory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Restore => "restore",
        }
    }
}

/// Which side of the cell an SGR color change applies to
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorLayer {
    Foreground,
    Background,
}

impl ColorLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foreground => "foreground",
            Self::Background => "background",
        }
    }
}

/// Rendering weight of an SGR color, tracked across one SGR run
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWeight {
    Normal,
    Faint,
    Intense,
}

impl ColorWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Faint => "faint",
            Self::Intense => "intense",
        }
    }
}

/// The eight base palette colors plus the terminal default
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorName {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// Parameter 39/49 - the terminal's configured default
    Default,
    /// Reserved palette slot (`code % 10 == 8`)
    Unknown,
}

impl ColorName {
    /// Map an SGR color code (30..=37, 39, 40..=47, 49) to its palette
    /// name via `code % 10`.
    pub fn from_code(code: i32) -> Self {
        match code % 10 {
            0 => Self::Black,
            1 => Self::Red,
            2 => Self::Green,
            3 => Self::Yellow,
            4 => Self::Blue,
            5 => Self::Magenta,
            6 => Self::Cyan,
            7 => Self::White,
            9 => Self::Default,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Default => "default",
            Self::Unknown => "unknown",
        }
    }
}

/// One decoded terminal event.
///
/// Printable text is not an event; it is delivered separately through
/// [`EventSink::text`] so sinks can batch runs into a single container.
#[derive(Debug, PartialEq, Eq)]
pub enum TerminalEvent<'a> {
    /// LF, or a CR that is not immediately followed by LF
    Newline,

    /// CUP - Cursor Position: ESC[{row};{col}H (ECMA-48 8.3.21).
    /// Values are reported as parsed; an unparsable segment yields the
    /// `-1` sentinel, an empty one yields 0.
    CursorPosition { row: i32, column: i32 },

    /// ED/EL - Erase in Page / Erase in Line
    Erase { scope: EraseScope, range: EraseRange },

    /// SM/RM mode 1 - cursor key handling (DECCKM)
    CursorKeys(KeyControl),
    /// SM/RM mode 12 - cursor blinking
    CursorBlinking(bool),
    /// SM/RM mode 25 - cursor visibility (DECTCEM)
    CursorVisible(bool),
    /// DECSET/DECRST 1048 (and the save/restore half of 1049)
    CursorMemory(CursorMemory),

    /// Switch to the alternate (1) or normal (0) screen (modes 47, 1047, 1049)
    ScreenSwitch(u8),

    /// SM mode 1034 - the meta key sets the eighth bit
    EightBitMeta,

    /// SGR 0 or an unrecognized SGR code
    ColorReset,
    /// SGR 30..=49 - one palette color change
    SetColor {
        layer: ColorLayer,
        weight: ColorWeight,
        name: ColorName,
    },

    /// OSC 0 - window title; the raw command-string remainder after `0;`
    WindowTitle(&'a [u8]),
}

/// Receiver for everything a [`TypescriptParser`] decodes.
pub trait EventSink {
    /// A run of printable bytes (0x20..=0x7F). Consecutive runs belong to
    /// the same text container until one of the other callbacks arrives.
    fn text(&mut self, bytes: &[u8]);

    /// A structured event. Ends any open text run.
    fn event(&mut self, event: TerminalEvent<'_>);

    /// The current text run ended without producing an event (unhandled
    /// control byte, escape sequence, end of chunk). Default
    /// implementation does nothing.
    fn flush_text(&mut self) {}

    /// Report a decoding problem. Default implementation does nothing.
    fn report_error(&mut self, _error: ParseError) {}
}

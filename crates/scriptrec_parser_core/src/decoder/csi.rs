//! Control sequence interpretation (CSI final-byte dispatch).

use super::sgr;
use crate::{
    ascii_to_dec, parse_parameter_list, CursorMemory, Decoded, EraseRange, EraseScope, EventSink, KeyControl,
    TerminalEvent,
};

/// Interpret one complete control sequence.
pub(super) fn interpret(final_byte: u8, intermediates: &[u8], parameters: &[u8], sink: &mut dyn EventSink) {
    match final_byte {
        // CUP - Cursor Position (ECMA-48 8.3.21)
        0x48 => cursor_position(parameters, sink),
        // ED - Erase in Page (ECMA-48 8.3.39)
        0x4A => erase(EraseScope::InPage, parameters, sink),
        // EL - Erase in Line (ECMA-48 8.3.41)
        0x4B => erase(EraseScope::InLine, parameters, sink),
        // SM - Set Mode (ECMA-48 8.3.125); ignored with intermediates
        0x68 => {
            if intermediates.is_empty() {
                mode_change(parameters, true, sink);
            } else {
                log::debug!("unsupported control sequence ending in 0x68 with intermediate bytes");
            }
        }
        // RM - Reset Mode (ECMA-48 8.3.106)
        0x6C => mode_change(parameters, false, sink),
        // SGR - Select Graphic Rendition (ECMA-48 8.3.117)
        0x6D => sgr::select_graphic_rendition(parameters, sink),
        // DSR - Device Status Report (ECMA-48 8.3.35); nothing to convert
        0x6E => device_status_report(parameters),
        _ => {
            log::debug!(
                "unsupported final byte {final_byte:#04x} (parameter length={}, intermediate length={})",
                parameters.len(),
                intermediates.len()
            );
        }
    }
}

/// Decode one CUP parameter segment, passing the failure sentinel
/// through to the output.
fn decoded_or_sentinel(segment: &[u8]) -> i32 {
    match ascii_to_dec(segment, segment.len()) {
        Decoded::Value { value, .. } => value,
        Decoded::Invalid => -1,
    }
}

fn cursor_position(parameters: &[u8], sink: &mut dyn EventSink) {
    let mut row = 1;
    let mut column = 1;
    if !parameters.is_empty() {
        let end = parameters.iter().position(|&byte| byte == b';').unwrap_or(parameters.len());
        row = decoded_or_sentinel(&parameters[..end]);
        if end < parameters.len() {
            column = decoded_or_sentinel(&parameters[end + 1..]);
        }
    }
    log::debug!("moving cursor to row={row}, column={column}");
    sink.event(TerminalEvent::CursorPosition { row, column });
}

fn erase(scope: EraseScope, parameters: &[u8], sink: &mut dyn EventSink) {
    // A single digit selects the range; no digits means the default 0.
    let parameter = match ascii_to_dec(parameters, 1) {
        Decoded::Value { digits: 0, .. } | Decoded::Invalid => 0,
        Decoded::Value { value, .. } => value,
    };
    sink.event(TerminalEvent::Erase {
        scope,
        range: EraseRange::from_parameter(parameter),
    });
}

fn mode_change(parameters: &[u8], set: bool, sink: &mut dyn EventSink) {
    // A leading `?` marks a DEC private mode (DECSET/DECRST). The
    // conversion below treats private and ANSI modes alike.
    let (dec_mode, parameters) = match parameters.first() {
        Some(&0x3F) => (true, &parameters[1..]),
        _ => (false, parameters),
    };

    let Some(values) = parse_parameter_list(parameters) else {
        log::debug!("mode change with unparsable parameters (set={set}, dec_mode={dec_mode})");
        return;
    };
    if values.len() != 1 {
        log::debug!("mode change with {} parameters ignored (set={set}, dec_mode={dec_mode})", values.len());
        return;
    }

    match (values[0], set) {
        (1, true) => sink.event(TerminalEvent::CursorKeys(KeyControl::Application)),
        (1, false) => sink.event(TerminalEvent::CursorKeys(KeyControl::Terminal)),
        (12, _) => sink.event(TerminalEvent::CursorBlinking(set)),
        (25, _) => sink.event(TerminalEvent::CursorVisible(!set)),
        (47 | 1047, _) => sink.event(TerminalEvent::ScreenSwitch(u8::from(set))),
        (1049, true) => {
            sink.event(TerminalEvent::CursorMemory(CursorMemory::Save));
            sink.event(TerminalEvent::ScreenSwitch(1));
        }
        (1049, false) => {
            sink.event(TerminalEvent::CursorMemory(CursorMemory::Restore));
            sink.event(TerminalEvent::ScreenSwitch(0));
        }
        (1034, true) => sink.event(TerminalEvent::EightBitMeta),
        (1048, true) => sink.event(TerminalEvent::CursorMemory(CursorMemory::Save)),
        (1048, false) => sink.event(TerminalEvent::CursorMemory(CursorMemory::Restore)),
        (mode, _) => log::debug!("unhandled mode {mode} (set={set}, dec_mode={dec_mode})"),
    }
}

fn device_status_report(parameters: &[u8]) {
    let parameter = match ascii_to_dec(parameters, 1) {
        Decoded::Value { digits: 0, .. } | Decoded::Invalid => 0,
        Decoded::Value { value, .. } => value,
    };
    log::debug!("device status report (parameter={parameter})");
}

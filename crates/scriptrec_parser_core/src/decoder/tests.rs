use crate::{EventSink, ParseError, TerminalEvent, TypescriptParser};
use pretty_assertions::assert_eq;

/// Records every sink callback as a readable string.
#[derive(Default)]
struct Collector {
    items: Vec<String>,
}

impl EventSink for Collector {
    fn text(&mut self, bytes: &[u8]) {
        self.items.push(format!("Text({:?})", String::from_utf8_lossy(bytes)));
    }

    fn event(&mut self, event: TerminalEvent<'_>) {
        self.items.push(format!("{event:?}"));
    }

    fn report_error(&mut self, error: ParseError) {
        self.items.push(format!("Error({error})"));
    }
}

fn decode(bytes: &[u8]) -> Vec<String> {
    let mut parser = TypescriptParser::new();
    let mut collector = Collector::default();
    parser.parse(bytes, &mut collector);
    collector.items
}

#[test]
fn printable_run_and_newline() {
    assert_eq!(decode(b"hello\n"), ["Text(\"hello\")", "Newline"]);
}

#[test]
fn markup_characters_pass_through_raw() {
    // Escaping is the sink's job; the decoder reports the raw run.
    assert_eq!(decode(b"a<b&c>\n"), ["Text(\"a<b&c>\")", "Newline"]);
}

#[test]
fn control_byte_splits_text_runs() {
    assert_eq!(decode(b"ab\x01cd"), ["Text(\"ab\")", "Text(\"cd\")"]);
}

#[test]
fn eight_bit_bytes_are_discarded() {
    assert_eq!(decode(b"ab\x80cd"), ["Text(\"ab\")", "Text(\"cd\")"]);
}

#[test]
fn delete_byte_counts_as_text() {
    assert_eq!(decode(b"a\x7fb"), ["Text(\"a\\u{7f}b\")"]);
}

#[test]
fn lone_carriage_return_is_a_newline() {
    assert_eq!(decode(b"ab\rcd"), ["Text(\"ab\")", "Newline", "Text(\"cd\")"]);
}

#[test]
fn carriage_return_before_line_feed_stays_silent() {
    assert_eq!(decode(b"ab\r\ncd"), ["Text(\"ab\")", "Newline", "Text(\"cd\")"]);
}

#[test]
fn trailing_carriage_return_is_a_newline() {
    assert_eq!(decode(b"ab\r"), ["Text(\"ab\")", "Newline"]);
}

#[test]
fn trailing_escape_is_discarded() {
    assert_eq!(decode(b"ab\x1b"), ["Text(\"ab\")"]);
}

#[test]
fn cursor_position_with_two_parameters() {
    assert_eq!(decode(b"\x1b[12;34H"), ["CursorPosition { row: 12, column: 34 }"]);
}

#[test]
fn cursor_position_defaults() {
    assert_eq!(decode(b"\x1b[H"), ["CursorPosition { row: 1, column: 1 }"]);
    assert_eq!(decode(b"\x1b[5H"), ["CursorPosition { row: 5, column: 1 }"]);
}

#[test]
fn cursor_position_empty_segments_decode_to_zero() {
    assert_eq!(decode(b"\x1b[;5H"), ["CursorPosition { row: 0, column: 5 }"]);
    assert_eq!(decode(b"\x1b[7;H"), ["CursorPosition { row: 7, column: 0 }"]);
}

#[test]
fn cursor_position_invalid_segment_keeps_the_sentinel() {
    assert_eq!(decode(b"\x1b[<5;6H"), ["CursorPosition { row: -1, column: 6 }"]);
}

#[test]
fn erase_in_page() {
    assert_eq!(decode(b"\x1b[J"), ["Erase { scope: InPage, range: CurToEnd }"]);
    assert_eq!(decode(b"\x1b[1J"), ["Erase { scope: InPage, range: BeginToCur }"]);
    assert_eq!(decode(b"\x1b[2J"), ["Erase { scope: InPage, range: All }"]);
}

#[test]
fn erase_in_line() {
    assert_eq!(decode(b"\x1b[K"), ["Erase { scope: InLine, range: CurToEnd }"]);
    assert_eq!(decode(b"\x1b[2K"), ["Erase { scope: InLine, range: All }"]);
}

#[test]
fn cursor_key_modes() {
    assert_eq!(decode(b"\x1b[?1h"), ["CursorKeys(Application)"]);
    assert_eq!(decode(b"\x1b[?1l"), ["CursorKeys(Terminal)"]);
}

#[test]
fn cursor_blinking_modes() {
    assert_eq!(decode(b"\x1b[?12h"), ["CursorBlinking(true)"]);
    assert_eq!(decode(b"\x1b[?12l"), ["CursorBlinking(false)"]);
}

#[test]
fn cursor_visibility_modes() {
    assert_eq!(decode(b"\x1b[?25h"), ["CursorVisible(false)"]);
    assert_eq!(decode(b"\x1b[?25l"), ["CursorVisible(true)"]);
}

#[test]
fn screen_switch_modes() {
    assert_eq!(decode(b"\x1b[47h"), ["ScreenSwitch(1)"]);
    assert_eq!(decode(b"\x1b[?1047l"), ["ScreenSwitch(0)"]);
}

#[test]
fn alternate_screen_with_cursor_save() {
    assert_eq!(decode(b"\x1b[?1049h"), ["CursorMemory(Save)", "ScreenSwitch(1)"]);
    assert_eq!(decode(b"\x1b[?1049l"), ["CursorMemory(Restore)", "ScreenSwitch(0)"]);
}

#[test]
fn cursor_save_and_restore() {
    assert_eq!(decode(b"\x1b[?1048h"), ["CursorMemory(Save)"]);
    assert_eq!(decode(b"\x1b[?1048l"), ["CursorMemory(Restore)"]);
}

#[test]
fn eight_bit_meta_mode() {
    assert_eq!(decode(b"\x1b[?1034h"), ["EightBitMeta"]);
    // There is no reset counterpart.
    assert_eq!(decode(b"\x1b[?1034l"), Vec::<String>::new());
}

#[test]
fn mode_change_with_several_parameters_is_ignored() {
    assert_eq!(decode(b"\x1b[?25;1h"), Vec::<String>::new());
}

#[test]
fn set_mode_with_intermediate_bytes_is_ignored() {
    assert_eq!(decode(b"\x1b[30 h"), Vec::<String>::new());
}

#[test]
fn device_status_report_converts_to_nothing() {
    assert_eq!(decode(b"\x1b[6n"), Vec::<String>::new());
}

#[test]
fn sgr_needs_two_digit_codes() {
    assert_eq!(decode(b"\x1b[0m"), Vec::<String>::new());
    assert_eq!(decode(b"\x1b[1;31m"), Vec::<String>::new());
}

#[test]
fn sgr_reset() {
    assert_eq!(decode(b"\x1b[00m"), ["ColorReset"]);
}

#[test]
fn sgr_intense_foreground() {
    assert_eq!(
        decode(b"\x1b[01;31mX"),
        ["SetColor { layer: Foreground, weight: Intense, name: Red }", "Text(\"X\")"]
    );
}

#[test]
fn sgr_faint_foreground() {
    assert_eq!(decode(b"\x1b[02;34m"), ["SetColor { layer: Foreground, weight: Faint, name: Blue }"]);
}

#[test]
fn sgr_reset_clears_the_run_state() {
    assert_eq!(
        decode(b"\x1b[01;00;37m"),
        ["ColorReset", "SetColor { layer: Foreground, weight: Normal, name: White }"]
    );
}

#[test]
fn sgr_background_color() {
    assert_eq!(decode(b"\x1b[40m"), ["SetColor { layer: Background, weight: Normal, name: Black }"]);
}

#[test]
fn sgr_default_colors() {
    assert_eq!(decode(b"\x1b[39m"), ["SetColor { layer: Foreground, weight: Normal, name: Default }"]);
    assert_eq!(decode(b"\x1b[49m"), ["SetColor { layer: Background, weight: Normal, name: Default }"]);
}

#[test]
fn sgr_inversion_swaps_layers() {
    assert_eq!(decode(b"\x1b[07;31m"), ["SetColor { layer: Background, weight: Normal, name: Red }"]);
    assert_eq!(
        decode(b"\x1b[07;27;31m"),
        ["SetColor { layer: Foreground, weight: Normal, name: Red }"]
    );
    assert_eq!(decode(b"\x1b[07;41m"), ["SetColor { layer: Foreground, weight: Normal, name: Red }"]);
}

#[test]
fn sgr_38_emits_default_and_ends_the_run() {
    assert_eq!(
        decode(b"\x1b[38;41m"),
        ["SetColor { layer: Foreground, weight: Normal, name: Default }"]
    );
}

#[test]
fn sgr_48_emits_default_and_continues() {
    assert_eq!(
        decode(b"\x1b[48;31m"),
        [
            "SetColor { layer: Background, weight: Normal, name: Default }",
            "SetColor { layer: Foreground, weight: Normal, name: Red }"
        ]
    );
}

#[test]
fn sgr_aixterm_colors_normalize_to_intense() {
    assert_eq!(decode(b"\x1b[91m"), ["SetColor { layer: Foreground, weight: Intense, name: Red }"]);
}

#[test]
fn sgr_unknown_code_degrades_to_reset() {
    assert_eq!(decode(b"\x1b[21m"), ["ColorReset"]);
}

#[test]
fn osc_window_title_with_bel_terminator() {
    assert_eq!(decode(b"\x1b]0;hi\x07"), ["WindowTitle([104, 105])"]);
}

#[test]
fn osc_window_title_with_two_byte_terminator() {
    assert_eq!(decode(b"\x1b]0;hi\x1b\\X"), ["WindowTitle([104, 105])", "Text(\"X\")"]);
}

#[test]
fn osc_window_title_shorter_than_two_characters_is_dropped() {
    assert_eq!(decode(b"\x1b]0;h\x07"), Vec::<String>::new());
}

#[test]
fn osc_other_commands_are_dropped() {
    assert_eq!(decode(b"\x1b]2;xyz\x07"), Vec::<String>::new());
}

#[test]
fn osc_without_terminator_at_chunk_end_still_emits() {
    assert_eq!(decode(b"\x1b]0;title"), ["WindowTitle([116, 105, 116, 108, 101])"]);
}

#[test]
fn osc_with_stray_byte_drops_it() {
    assert_eq!(
        decode(b"\x1b]2;x\x00Z"),
        ["Error(string terminator expected at offset 5, found 0x00)", "Text(\"Z\")"]
    );
}

#[test]
fn dcs_is_collected_and_discarded() {
    assert_eq!(decode(b"\x1bPdata\x1b\\X"), ["Text(\"X\")"]);
}

#[test]
fn missing_final_byte_resumes_at_the_offending_byte() {
    assert_eq!(
        decode(b"\x1b[12\x80abc"),
        ["Error(final byte expected at offset 4, found 0x80)", "Text(\"abc\")"]
    );
}

#[test]
fn private_two_byte_escape_is_skipped() {
    assert_eq!(decode(b"\x1b=AB"), ["Text(\"AB\")"]);
}

#[test]
fn unknown_escape_is_reported_and_skipped() {
    assert_eq!(
        decode(b"\x1b(B"),
        ["Error(unknown escape sequence introducer 0x28)", "Text(\"B\")"]
    );
}

#[test]
fn unknown_csi_final_byte_converts_to_nothing() {
    assert_eq!(decode(b"\x1b[3A"), Vec::<String>::new());
}

#[test]
fn sequence_cut_off_at_chunk_end_is_dropped() {
    assert_eq!(decode(b"ab\x1b[12;3"), ["Text(\"ab\")"]);
}

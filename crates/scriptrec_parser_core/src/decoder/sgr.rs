//! SGR (Select Graphic Rendition) handling
//!
//! The recordings this decoder targets carry SGR parameters as
//! two-digit codes (`ESC[01;31m`); the run stops at the first parameter
//! that is not exactly two digits or not followed by `;`.

use crate::{ascii_to_dec, ColorLayer, ColorName, ColorWeight, Decoded, EventSink, TerminalEvent};

/// Rendering state local to a single SGR run.
#[derive(Debug, Default)]
struct SgrRun {
    intense: bool,
    faint: bool,
    inverted: bool,
}

impl SgrRun {
    fn weight(&self) -> ColorWeight {
        if self.intense {
            ColorWeight::Intense
        } else if self.faint {
            ColorWeight::Faint
        } else {
            ColorWeight::Normal
        }
    }

    /// Layer a foreground color lands on; inversion swaps it.
    fn foreground(&self) -> ColorLayer {
        if self.inverted {
            ColorLayer::Background
        } else {
            ColorLayer::Foreground
        }
    }

    /// Layer a background color lands on; inversion swaps it.
    fn background(&self) -> ColorLayer {
        if self.inverted {
            ColorLayer::Foreground
        } else {
            ColorLayer::Background
        }
    }
}

pub(super) fn select_graphic_rendition(parameters: &[u8], sink: &mut dyn EventSink) {
    let mut run = SgrRun::default();
    let mut rest = parameters;

    while rest.len() >= 2 {
        let mut code = match ascii_to_dec(rest, 2) {
            Decoded::Value { value, digits: 2 } => value,
            _ => break,
        };

        // Normalize non-standard aixterm high-intensity colors.
        if (90..=97).contains(&code) || (100..=107).contains(&code) {
            run.intense = true;
            code -= 60;
        }

        match code {
            0 => {
                sink.event(TerminalEvent::ColorReset);
                run = SgrRun::default();
            }
            1 => {
                run.intense = true;
                run.faint = false;
            }
            2 => {
                run.intense = false;
                run.faint = true;
            }
            3 | 4 => log::debug!("italic/underlined text not supported"),
            5 | 6 => log::debug!("blinking text not supported"),
            7 => run.inverted = true,
            27 => run.inverted = false,
            30..=37 | 39 => sink.event(TerminalEvent::SetColor {
                layer: run.foreground(),
                weight: run.weight(),
                name: ColorName::from_code(code),
            }),
            38 => {
                // Extended foreground colors are unsupported and end the run.
                sink.event(TerminalEvent::SetColor {
                    layer: run.foreground(),
                    weight: ColorWeight::Normal,
                    name: ColorName::Default,
                });
                break;
            }
            40..=47 | 49 => sink.event(TerminalEvent::SetColor {
                layer: run.background(),
                weight: run.weight(),
                name: ColorName::from_code(code),
            }),
            48 => sink.event(TerminalEvent::SetColor {
                layer: run.background(),
                weight: ColorWeight::Normal,
                name: ColorName::Default,
            }),
            unknown => {
                log::debug!("unknown SGR code {unknown}");
                sink.event(TerminalEvent::ColorReset);
            }
        }

        if rest.get(2) == Some(&b';') {
            rest = &rest[3..];
        } else {
            break;
        }
    }
}

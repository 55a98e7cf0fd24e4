//! Empty-timestep coalescing pass.
//!
//! Recordings spend most of their lines on timesteps that carry nothing
//! but whitespace (cursor parked, no output). This pass removes them and
//! adds their delays onto the next timestep that actually shows
//! something, keeping total playback time intact.

use crate::tree::{Element, Node};

/// A timestep is empty when it has no child elements and at most
/// whitespace-only character data (bytes <= 0x20).
fn is_empty_timestep(element: &Element) -> bool {
    element.children.iter().all(|child| match child {
        Node::Element(_) => false,
        Node::Text(text) => text.bytes().all(|byte| byte <= 0x20),
    })
}

/// Rewrite the children of the `script` root element in place.
pub fn coalesce(root: &mut Element) {
    let mut accumulated = 0.0;
    let mut pending = false;
    let mut absorb_whitespace = false;

    let children = std::mem::take(&mut root.children);
    let mut result = Vec::with_capacity(children.len());

    for child in children {
        match child {
            Node::Element(mut element) if element.name == "timestep" => {
                absorb_whitespace = false;
                if is_empty_timestep(&element) {
                    if let Some(delay) = element.delay() {
                        log::debug!("empty timestep, delay was {delay:.3}");
                        accumulated += delay;
                        pending = true;
                        absorb_whitespace = true;
                        continue;
                    }
                    // No delay attribute to carry over; leave it alone.
                    result.push(Node::Element(element));
                } else {
                    if pending {
                        if let Some(delay) = element.delay() {
                            element.set_delay(accumulated + delay);
                            accumulated = 0.0;
                            pending = false;
                        }
                    }
                    result.push(Node::Element(element));
                }
            }
            Node::Text(text) if absorb_whitespace && text.bytes().all(|byte| byte <= 0x20) => {
                // The whitespace that followed a removed timestep goes
                // with it.
                absorb_whitespace = false;
            }
            other => {
                absorb_whitespace = false;
                result.push(other);
            }
        }
    }

    root.children = result;
}

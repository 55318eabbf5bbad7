//! Styling for ANSI terminals.
//!
//! Only available on unix, where the escape sequences come from `termion`.

use termion::color::{self, Bg, Fg};
use termion::style;

use crate::render::text_renderer::TextDecorator;

/// A decorator which uses ANSI escape sequences to style text on a terminal.
///
/// Every end marker is the generic reset sequence rather than an undo of the
/// matching start, so closing an inner style also clears any outer one.  A
/// reset is also written at the end of every node.
#[derive(Clone, Debug, Default)]
pub struct AnsiDecorator {}

impl AnsiDecorator {
    /// Create a new `AnsiDecorator`.
    pub fn new() -> AnsiDecorator {
        AnsiDecorator {}
    }
}

fn reset() -> String {
    style::Reset.to_string()
}

impl TextDecorator for AnsiDecorator {
    fn decorate_header_start(&self, _level: usize) -> String {
        format!("{}{}{}", Bg(color::Blue), Fg(color::White), style::Bold)
    }

    fn decorate_italic_start(&self) -> String {
        style::Underline.to_string()
    }

    fn decorate_italic_end(&self) -> String {
        reset()
    }

    fn decorate_bold_start(&self) -> String {
        style::Bold.to_string()
    }

    fn decorate_bold_end(&self) -> String {
        reset()
    }

    fn decorate_code_start(&self) -> String {
        format!("{}{}", Bg(color::LightWhite), Fg(color::Red))
    }

    fn decorate_code_end(&self) -> String {
        reset()
    }

    fn decorate_link_start(&self) -> String {
        style::Underline.to_string()
    }

    fn decorate_link_end(&self) -> String {
        reset()
    }

    fn decorate_node_end(&self) -> String {
        reset()
    }
}

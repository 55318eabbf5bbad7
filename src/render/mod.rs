//! Module containing the element rules which drive rendering, and the
//! `TextRenderer` which applies them.
//!
//! Every element the renderer knows about maps to one `ElementRule`: whether
//! it is a block (surrounded by newlines), whether it is ignored along with
//! everything inside it, and what to emit when entering and leaving it.
//! Adding support for another element is a new table entry.

pub mod text_renderer;

use crate::markup5ever_rcdom::Node;

/// A style applied to the text inside an element.  The decorator decides
/// what text or escape sequence marks its start and end.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Style {
    /// A heading, level 1 to 5.
    Header(usize),
    /// Italic text (`<i>`, `<cite>`).
    Italic,
    /// Bold text (`<b>`, `<em>`).
    Bold,
    /// Inline code (`<code>`, `<tt>`).
    Code,
    /// A hyperlink (`<a>`).
    Link,
}

/// What to emit on entering an element, before its content.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpenEffect {
    /// Emit nothing.
    Nothing,
    /// Emit fixed text.
    Text(&'static str),
    /// Emit the decorator's start marker for a style.
    Styled(Style),
    /// Emit an image placeholder, including the `alt` text if any.
    Image,
    /// Open a fenced preformatted block.
    Pre,
}

/// What to emit on leaving an element, after its content.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CloseEffect {
    /// Emit nothing.
    Nothing,
    /// Emit fixed text.
    Text(&'static str),
    /// Emit the decorator's end marker for a style.
    Styled(Style),
    /// End a link, annotated with its target where appropriate.
    Link,
    /// Close a fenced preformatted block.
    Pre,
}

/// How one kind of element is rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ElementRule {
    /// Block elements get a newline before and after.
    pub block: bool,
    /// Ignored elements produce no output, nor do any of their descendants.
    pub ignored: bool,
    /// Effect on entering the element.
    pub open: OpenEffect,
    /// Effect on leaving the element.
    pub close: CloseEffect,
}

impl ElementRule {
    const fn inline(open: OpenEffect, close: CloseEffect) -> ElementRule {
        ElementRule {
            block: false,
            ignored: false,
            open,
            close,
        }
    }

    const fn block(open: OpenEffect, close: CloseEffect) -> ElementRule {
        ElementRule {
            block: true,
            ignored: false,
            open,
            close,
        }
    }

    const fn styled(style: Style) -> ElementRule {
        ElementRule::inline(OpenEffect::Styled(style), CloseEffect::Styled(style))
    }

    const fn header(level: usize) -> ElementRule {
        ElementRule::block(OpenEffect::Styled(Style::Header(level)), CloseEffect::Nothing)
    }
}

/// The rule for anything without special handling: text, comments, the
/// document itself and unknown elements.
pub const DEFAULT_RULE: ElementRule = ElementRule::inline(OpenEffect::Nothing, CloseEffect::Nothing);

const IGNORED: ElementRule = ElementRule {
    block: false,
    ignored: true,
    open: OpenEffect::Nothing,
    close: CloseEffect::Nothing,
};
const PLAIN_BLOCK: ElementRule = ElementRule::block(OpenEffect::Nothing, CloseEffect::Nothing);
const H1: ElementRule = ElementRule::header(1);
const H2: ElementRule = ElementRule::header(2);
const H3: ElementRule = ElementRule::header(3);
const H4: ElementRule = ElementRule::header(4);
const H5: ElementRule = ElementRule::header(5);
const IMG: ElementRule = ElementRule::inline(OpenEffect::Image, CloseEffect::Nothing);
const BR: ElementRule = ElementRule::inline(OpenEffect::Text("\n"), CloseEffect::Nothing);
const HR: ElementRule = ElementRule::block(OpenEffect::Text("------\n"), CloseEffect::Nothing);
const FIGCAPTION: ElementRule = ElementRule::block(OpenEffect::Text("["), CloseEffect::Text("]"));
const ITALIC: ElementRule = ElementRule::styled(Style::Italic);
const BOLD: ElementRule = ElementRule::styled(Style::Bold);
const CODE: ElementRule = ElementRule::styled(Style::Code);
const PRE: ElementRule = ElementRule::block(OpenEffect::Pre, CloseEffect::Pre);
const LINK: ElementRule = ElementRule::inline(OpenEffect::Styled(Style::Link), CloseEffect::Link);

/// Look up the rule for an element by its local name.
///
/// `title` is both a block and ignored; being ignored wins, so it never
/// produces any output.
pub fn rule_for_tag(tag: &str) -> &'static ElementRule {
    match tag {
        "meta" | "script" | "style" | "title" => &IGNORED,
        "h1" => &H1,
        "h2" => &H2,
        "h3" => &H3,
        "h4" => &H4,
        "h5" => &H5,
        "p" | "header" | "footer" | "nav" => &PLAIN_BLOCK,
        "img" => &IMG,
        "br" => &BR,
        "hr" => &HR,
        "figcaption" => &FIGCAPTION,
        "i" | "cite" => &ITALIC,
        "b" | "em" => &BOLD,
        "code" | "tt" => &CODE,
        "pre" => &PRE,
        "a" => &LINK,
        _ => &DEFAULT_RULE,
    }
}

/// Look up the rule for any DOM node.  Only elements have special rules.
pub fn rule_for(node: &Node) -> &'static ElementRule {
    match node.element_name() {
        Some(tag) => rule_for_tag(tag),
        None => &DEFAULT_RULE,
    }
}

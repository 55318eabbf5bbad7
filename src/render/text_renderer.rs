//! The text renderer and its decorators.
//!
//! `TextRenderer` walks a DOM tree and streams text to a writer as it goes.
//! How styled regions are marked is up to the `TextDecorator`: punctuation
//! for plain text, escape sequences for a terminal, or nothing at all.

use std::io::Write;

use super::{rule_for, CloseEffect, ElementRule, OpenEffect, Style};
use crate::markup5ever_rcdom::{Handle, Node, NodeData};
use crate::{Error, Result};

/// Allow decorating text with markers for styled regions.
pub trait TextDecorator {
    /// Return the marker which starts a heading of the given level (1-5).
    /// Headings have no end marker.
    fn decorate_header_start(&self, level: usize) -> String;

    /// Start an italic region.
    fn decorate_italic_start(&self) -> String;

    /// Finish an italic region.
    fn decorate_italic_end(&self) -> String;

    /// Start a bold region.
    fn decorate_bold_start(&self) -> String;

    /// Finish a bold region.
    fn decorate_bold_end(&self) -> String;

    /// Start an inline code region.
    fn decorate_code_start(&self) -> String;

    /// Finish an inline code region.
    fn decorate_code_end(&self) -> String;

    /// Start a link.  The link target is added after the end marker by
    /// the renderer.
    fn decorate_link_start(&self) -> String;

    /// Finish a link.
    fn decorate_link_end(&self) -> String;

    /// Text written after every node has been fully processed.
    fn decorate_node_end(&self) -> String {
        String::new()
    }
}

/// A decorator which marks styles with Markdown-like punctuation.
#[derive(Clone, Debug, Default)]
pub struct PlainDecorator {}

impl PlainDecorator {
    /// Create a new `PlainDecorator`.
    pub fn new() -> PlainDecorator {
        PlainDecorator {}
    }
}

impl TextDecorator for PlainDecorator {
    fn decorate_header_start(&self, level: usize) -> String {
        format!("{} ", "#".repeat(level))
    }

    fn decorate_italic_start(&self) -> String {
        "_".to_string()
    }

    fn decorate_italic_end(&self) -> String {
        "_".to_string()
    }

    fn decorate_bold_start(&self) -> String {
        "*".to_string()
    }

    fn decorate_bold_end(&self) -> String {
        "*".to_string()
    }

    fn decorate_code_start(&self) -> String {
        "`".to_string()
    }

    fn decorate_code_end(&self) -> String {
        "`".to_string()
    }

    fn decorate_link_start(&self) -> String {
        String::new()
    }

    fn decorate_link_end(&self) -> String {
        String::new()
    }
}

/// A decorator which adds no style markers at all.  Image placeholders,
/// rules, fences, captions and link targets are still written.
#[derive(Clone, Debug, Default)]
pub struct TrivialDecorator {}

impl TrivialDecorator {
    /// Create a new `TrivialDecorator`.
    pub fn new() -> TrivialDecorator {
        TrivialDecorator {}
    }
}

impl TextDecorator for TrivialDecorator {
    fn decorate_header_start(&self, _level: usize) -> String {
        String::new()
    }

    fn decorate_italic_start(&self) -> String {
        String::new()
    }

    fn decorate_italic_end(&self) -> String {
        String::new()
    }

    fn decorate_bold_start(&self) -> String {
        String::new()
    }

    fn decorate_bold_end(&self) -> String {
        String::new()
    }

    fn decorate_code_start(&self) -> String {
        String::new()
    }

    fn decorate_code_end(&self) -> String {
        String::new()
    }

    fn decorate_link_start(&self) -> String {
        String::new()
    }

    fn decorate_link_end(&self) -> String {
        String::new()
    }
}

/// Replace every run of ASCII whitespace with a single space.
///
/// Non-ASCII whitespace such as `&nbsp;` is left alone.
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_whitespace {
                result.push(' ');
            }
            in_whitespace = true;
        } else {
            result.push(c);
            in_whitespace = false;
        }
    }
    result
}

/// Return true if any ancestor of `node` is an element called `tag`.
fn has_ancestor(node: &Node, tag: &str) -> bool {
    let mut next = node.parent();
    while let Some(parent) = next {
        if parent.element_name() == Some(tag) {
            return true;
        }
        next = parent.parent();
    }
    false
}

/// Pending work for the traversal.
enum Step {
    /// Visit a node: opening effects, text and then its children.
    Enter {
        node: Handle,
        parent: Handle,
        depth: usize,
        in_pre: bool,
    },
    /// All children are done; apply the closing effects.
    Leave {
        node: Handle,
        rule: &'static ElementRule,
    },
}

/// Streams a text rendition of a DOM tree to a writer.
///
/// The tree is walked with an explicit stack, so arbitrarily deep documents
/// don't exhaust the call stack.  Each piece of output is written to the
/// writer as soon as it is produced.
pub struct TextRenderer<'d, W: Write, D: TextDecorator> {
    out: W,
    decorator: &'d D,
    max_depth: Option<usize>,
}

impl<'d, W: Write, D: TextDecorator> TextRenderer<'d, W, D> {
    /// Create a renderer writing to `out`, marking styles with `decorator`.
    pub fn new(out: W, decorator: &'d D) -> TextRenderer<'d, W, D> {
        TextRenderer {
            out,
            decorator,
            max_depth: None,
        }
    }

    /// Fail with `Error::TooDeep` rather than visit nodes more than
    /// `max_depth` levels below the starting node.  `None` means no limit.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Render `node` and all of its descendants.
    ///
    /// `parent` is the parent of `node`; when `node` is the root of the
    /// tree, pass it as its own parent.
    pub fn render(&mut self, node: &Handle, parent: &Handle) -> Result<()> {
        let mut stack = vec![Step::Enter {
            node: node.clone(),
            parent: parent.clone(),
            depth: 0,
            in_pre: has_ancestor(node, "pre"),
        }];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter {
                    node,
                    parent,
                    depth,
                    in_pre,
                } => {
                    let rule = rule_for(&node);
                    if rule.ignored {
                        html_trace!("render: ignoring <{}>", node.element_name().unwrap_or(""));
                        continue;
                    }
                    if let Some(max_depth) = self.max_depth {
                        if depth > max_depth {
                            html_trace_quiet!("render: depth {} exceeds {}", depth, max_depth);
                            return Err(Error::TooDeep(max_depth));
                        }
                    }
                    if rule.block {
                        self.write("\n")?;
                    }
                    self.open(&node, rule.open)?;
                    self.text(&node, &parent, in_pre)?;

                    stack.push(Step::Leave {
                        node: node.clone(),
                        rule,
                    });
                    let children_in_pre = in_pre || rule.open == OpenEffect::Pre;
                    // Pushed in reverse so they're popped in document order.
                    for child in node.children.borrow().iter().rev() {
                        stack.push(Step::Enter {
                            node: child.clone(),
                            parent: node.clone(),
                            depth: depth + 1,
                            in_pre: children_in_pre,
                        });
                    }
                }
                Step::Leave { node, rule } => {
                    self.close(&node, rule.close)?;
                    if rule.block {
                        self.write("\n")?;
                    }
                    let end = self.decorator.decorate_node_end();
                    self.write(&end)?;
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn write(&mut self, s: &str) -> Result<()> {
        if !s.is_empty() {
            self.out.write_all(s.as_bytes())?;
        }
        Ok(())
    }

    fn style_start(&self, style: Style) -> String {
        match style {
            Style::Header(level) => self.decorator.decorate_header_start(level),
            Style::Italic => self.decorator.decorate_italic_start(),
            Style::Bold => self.decorator.decorate_bold_start(),
            Style::Code => self.decorator.decorate_code_start(),
            Style::Link => self.decorator.decorate_link_start(),
        }
    }

    fn style_end(&self, style: Style) -> String {
        match style {
            Style::Header(_) => String::new(),
            Style::Italic => self.decorator.decorate_italic_end(),
            Style::Bold => self.decorator.decorate_bold_end(),
            Style::Code => self.decorator.decorate_code_end(),
            Style::Link => self.decorator.decorate_link_end(),
        }
    }

    fn open(&mut self, node: &Node, effect: OpenEffect) -> Result<()> {
        match effect {
            OpenEffect::Nothing => Ok(()),
            OpenEffect::Text(text) => self.write(text),
            OpenEffect::Styled(style) => {
                let marker = self.style_start(style);
                self.write(&marker)
            }
            OpenEffect::Image => {
                let alt = node.attr("alt");
                if alt.is_empty() {
                    self.write("(image) ")
                } else {
                    self.write(&format!("(image: {}) ", alt))
                }
            }
            OpenEffect::Pre => self.write("```\n"),
        }
    }

    fn close(&mut self, node: &Node, effect: CloseEffect) -> Result<()> {
        match effect {
            CloseEffect::Nothing => Ok(()),
            CloseEffect::Text(text) => self.write(text),
            CloseEffect::Styled(style) => {
                let marker = self.style_end(style);
                self.write(&marker)
            }
            CloseEffect::Link => {
                let href = node.attr("href");
                // Any rel (stylesheet, footnote, nofollow...) suppresses the target.
                if !href.is_empty() && node.attr("rel").is_empty() {
                    let marker = self.style_end(Style::Link);
                    self.write(&marker)?;
                    self.write(&format!(" ({})", href))?;
                }
                Ok(())
            }
            CloseEffect::Pre => self.write("\n```"),
        }
    }

    /// Write a text node's contents.  `in_pre` says whether it is inside a
    /// `<pre>`, where whitespace is kept as is.
    fn text(&mut self, node: &Node, parent: &Node, in_pre: bool) -> Result<()> {
        let contents = match node.data {
            NodeData::Text { ref contents } => contents,
            _ => return Ok(()),
        };
        // Text directly inside <html> or <body> is only inter-element
        // whitespace as far as we're concerned.
        match parent.element_name() {
            Some("html") | Some("body") | None => return Ok(()),
            Some(_) => {}
        }
        let text = contents.borrow();
        if in_pre {
            self.write(&text)
        } else {
            let collapsed = collapse_whitespace(&text);
            self.write(&collapsed)
        }
    }
}

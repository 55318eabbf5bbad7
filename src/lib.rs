//! Convert HTML to readable text.
//!
//! This crate renders an HTML document as a flattened text approximation
//! which keeps some structural cues: headings, emphasis, links, images,
//! rules and code blocks.  The cues are either ANSI terminal escapes, or
//! Markdown-like punctuation for plain text.  Output is streamed to a
//! writer as the document tree is walked.
//!
//! # Examples
//!
//! ```rust
//! # use html2text_stream::from_read;
//! let html = b"<h1>Title</h1><p>Some <b>bold</b>   text.</p>";
//! assert_eq!(from_read(&html[..]).unwrap(), "\n# Title\n\nSome *bold* text.\n");
//! ```
//!
//! Finer control is available through [`config`]:
//!
//! ```rust
//! # use html2text_stream::config;
//! let html = br#"<p>See <a href="https://example.com/">here</a></p>"#;
//! let mut out = Vec::new();
//! config::plain().write_from_read(&html[..], &mut out).unwrap();
//! assert_eq!(out, b"\nSee here (https://example.com/)\n");
//! ```
//!
//! The `html2text` binary converts files (or standard input) to standard
//! output, in colour unless `NO_COLOR` is set (colour needs a unix
//! terminal):
//!
//! ```sh
//! $ html2text page.html
//! [...]
//! ```

#![deny(missing_docs)]

#[macro_use]
mod macros;

#[cfg(unix)]
pub mod ansi_colours;
pub mod markup5ever_rcdom;
pub mod render;

pub use markup5ever_rcdom::{Handle, RcDom};
pub use render::text_renderer::{TextDecorator, TextRenderer};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use std::io;

/// Errors from reading or rendering HTML
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The document is nested more deeply than the configured limit.
    #[error("Document nested more than {0} levels deep")]
    TooDeep(usize),
    /// The input could not be read.
    #[error("Error reading input: {0}")]
    ReadError(io::Error),
    /// Writing the output failed.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        use Error::*;
        match (self, other) {
            (TooDeep(a), TooDeep(b)) => a == b,
            (ReadError(a), ReadError(b)) | (IoError(a), IoError(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

impl Eq for Error {}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

pub mod config {
    //! Configure the HTML to text translation using the `Config` type, which can be
    //! constructed using one of the functions in this module.
    use std::io;

    #[cfg(unix)]
    use crate::ansi_colours::AnsiDecorator;
    use crate::render::text_renderer::{PlainDecorator, TextDecorator, TextRenderer, TrivialDecorator};
    use crate::{parse, Handle, RcDom, Result};

    /// Configure the HTML processing.
    ///
    /// A `Config` is immutable once built, so the same one can be used for
    /// any number of renders.
    #[derive(Clone, Debug)]
    pub struct Config<D: TextDecorator> {
        decorator: D,
        max_depth: Option<usize>,
    }

    impl<D: TextDecorator> Config<D> {
        /// Refuse to render documents nested more than `depth` levels
        /// below the node rendering starts from.
        pub fn max_depth(mut self, depth: usize) -> Self {
            self.max_depth = Some(depth);
            self
        }

        /// Render `node` and its descendants to `out`.  When `node` is the
        /// root of its tree, pass it as `parent` too.
        pub fn render_node<W: io::Write>(&self, out: W, node: &Handle, parent: &Handle) -> Result<()> {
            TextRenderer::new(out, &self.decorator)
                .with_max_depth(self.max_depth)
                .render(node, parent)
        }

        /// Render a whole parsed document to `out`.
        pub fn render_dom<W: io::Write>(&self, out: W, dom: &RcDom) -> Result<()> {
            self.render_node(out, &dom.document, &dom.document)
        }

        /// Read HTML from `input` and write the rendered text to `out`.
        pub fn write_from_read<R: io::Read, W: io::Write>(&self, input: R, out: W) -> Result<()> {
            let dom = parse(input)?;
            self.render_dom(out, &dom)
        }

        /// Read HTML from `input` and return the rendered text.
        pub fn string_from_read<R: io::Read>(&self, input: R) -> Result<String> {
            let mut out = Vec::new();
            self.write_from_read(input, &mut out)?;
            // Every piece written is a `&str`.
            String::from_utf8(out).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
        }
    }

    /// Return a Config which marks styles with Markdown-like punctuation.
    pub fn plain() -> Config<PlainDecorator> {
        with_decorator(PlainDecorator::new())
    }

    /// Return a Config which marks styles with ANSI terminal escapes.
    #[cfg(unix)]
    pub fn coloured() -> Config<AnsiDecorator> {
        with_decorator(AnsiDecorator::new())
    }

    /// Return a Config which doesn't mark styles at all.
    pub fn trivial() -> Config<TrivialDecorator> {
        with_decorator(TrivialDecorator::new())
    }

    /// Return a Config initialized with a custom decorator.
    pub fn with_decorator<D: TextDecorator>(decorator: D) -> Config<D> {
        Config {
            decorator,
            max_depth: None,
        }
    }
}

/// Reads and parses HTML from `input`.
///
/// The HTML parser recovers from any malformed markup, so the only failure
/// is being unable to read the input.  Recovered problems are recorded in
/// `RcDom::errors`.
pub fn parse(mut input: impl io::Read) -> Result<RcDom> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut input)
        .map_err(Error::ReadError)?;
    html_trace!("parse: {} recoverable errors", dom.errors.borrow().len());
    Ok(dom)
}

/// Reads HTML from `input`, and returns it rendered as plain text.
pub fn from_read<R>(input: R) -> Result<String>
where
    R: io::Read,
{
    config::plain().string_from_read(input)
}

/// Reads HTML from `input`, and returns it rendered with ANSI terminal
/// colours.
#[cfg(unix)]
pub fn from_read_coloured<R>(input: R) -> Result<String>
where
    R: io::Read,
{
    config::coloured().string_from_read(input)
}

#[cfg(test)]
mod tests;

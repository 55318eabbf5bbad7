//! Convert HTML files to text.
//!
//! Usage: `html2text [pathname ...]`
//!
//! With no pathnames the standard input is converted; otherwise each file is
//! converted in turn.  Output always goes to standard output.  A file which
//! can't be opened or read is reported on standard error and skipped.
//!
//! On unix, output uses ANSI colours unless the `NO_COLOR` environment
//! variable is set to a non-empty value.  Otherwise styles are shown with
//! Markdown-like punctuation.
use argparse::{ArgumentParser, List, StoreOption, StoreTrue};
use std::env;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use html2text_stream::config::{self, Config};
use html2text_stream::{Error, TextDecorator};

/// Render one input, reporting recoverable failures on stderr.  Only a
/// failure to write the output is returned.
fn convert<D, R, W>(conf: &Config<D>, name: &str, input: R, out: W) -> html2text_stream::Result<()>
where
    D: TextDecorator,
    R: Read,
    W: Write,
{
    log::debug!("converting {}", name);
    match conf.write_from_read(input, out) {
        Ok(()) => Ok(()),
        Err(err @ Error::IoError(_)) => Err(err),
        Err(err) => {
            log::warn!("skipping {}: {}", name, err);
            eprintln!("{}: {}", name, err);
            Ok(())
        }
    }
}

fn translate<D: TextDecorator>(conf: Config<D>, paths: &[String]) -> html2text_stream::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if paths.is_empty() {
        let stdin = io::stdin();
        return convert(&conf, "<stdin>", stdin.lock(), &mut out);
    }
    for path in paths {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("skipping {}: {}", path, err);
                eprintln!("{}: {}", path, err);
                continue;
            }
        };
        convert(&conf, path, file, &mut out)?;
    }
    Ok(())
}

fn with_depth<D: TextDecorator>(conf: Config<D>, max_depth: Option<usize>) -> Config<D> {
    match max_depth {
        Some(depth) => conf.max_depth(depth),
        None => conf,
    }
}

#[cfg(unix)]
fn coloured(max_depth: Option<usize>, paths: &[String]) -> html2text_stream::Result<()> {
    translate(with_depth(config::coloured(), max_depth), paths)
}

#[cfg(not(unix))]
fn coloured(max_depth: Option<usize>, paths: &[String]) -> html2text_stream::Result<()> {
    translate(with_depth(config::plain(), max_depth), paths)
}

fn main() -> ExitCode {
    env_logger::init();

    let mut paths: Vec<String> = Vec::new();
    let mut literal = false;
    let mut max_depth: Option<usize> = None;

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Convert HTML to text, in colour unless NO_COLOR is set.");
        ap.refer(&mut paths).add_argument(
            "pathname",
            List,
            "Input HTML files (default is standard input)",
        );
        ap.refer(&mut literal).add_option(
            &["-L", "--literal"],
            StoreTrue,
            "Output only literal text (no style markers)",
        );
        ap.refer(&mut max_depth).add_option(
            &["--max-depth"],
            StoreOption,
            "Skip documents nested more deeply than this",
        );
        ap.parse_args_or_exit();
    }

    let no_colour = env::var_os("NO_COLOR").map_or(false, |value| !value.is_empty());

    let result = if literal {
        translate(with_depth(config::trivial(), max_depth), &paths)
    } else if no_colour {
        translate(with_depth(config::plain(), max_depth), &paths)
    } else {
        coloured(max_depth, &paths)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("html2text: {}", err);
            ExitCode::FAILURE
        }
    }
}

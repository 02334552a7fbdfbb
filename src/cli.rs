//! Command-line driver.

use std::ffi::OsString;
use std::io::{Read, Write};

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use crate::{NormalizationForm, Result};

#[derive(Parser, Debug)]
#[command(name = "unitext")]
#[command(about = "Unicode-aware length, case mapping, reversal and normalization.", long_about = None)]
pub struct Cli {
    /// Raise log verbosity (repeatable). RUST_LOG overrides it.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the number of codepoints.
    Size(Texts),
    /// Uppercase.
    Upcase(Texts),
    /// Lowercase.
    Downcase(Texts),
    /// Reverse codepoint order.
    Reverse(Texts),
    /// Title-case every word.
    Titleize(Texts),
    /// Normalize to NFC, NFD, NFKC or NFKD.
    Normalize {
        /// One of c, d, kc, kd.
        #[arg(short, long, value_parser = parse_form)]
        form: NormalizationForm,

        /// Print whether each text is already normalized instead of normalizing it.
        #[arg(long)]
        check: bool,

        #[command(flatten)]
        texts: Texts,
    },
}

#[derive(clap::Args, Debug)]
pub struct Texts {
    /// Texts to process; standard input when none are given.
    #[arg(value_parser = clap::value_parser!(OsString))]
    pub texts: Vec<OsString>,
}

fn parse_form(tag: &str) -> std::result::Result<NormalizationForm, String> {
    tag.parse().map_err(|error: crate::Error| error.to_string())
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

impl Command {
    fn texts(&self) -> &[OsString] {
        match self {
            Command::Size(texts)
            | Command::Upcase(texts)
            | Command::Downcase(texts)
            | Command::Reverse(texts)
            | Command::Titleize(texts)
            | Command::Normalize { texts, .. } => &texts.texts,
        }
    }

    fn apply(&self, text: &[u8]) -> Result<String> {
        match self {
            Command::Size(_) => crate::codepoint_count(text).map(|count| count.to_string()),
            Command::Upcase(_) => crate::upcase(text),
            Command::Downcase(_) => crate::downcase(text),
            Command::Reverse(_) => crate::reverse(text),
            Command::Titleize(_) => crate::titleize(text),
            Command::Normalize {
                form, check: true, ..
            } => crate::decode(text)
                .map(|codepoints| crate::normalize::is_normalized(&codepoints, *form).to_string()),
            Command::Normalize { form, .. } => crate::normalize(text, *form),
        }
    }
}

/// Runs `command` over each text argument, or over `stdin` when there are
/// none. Returns `false` if any text failed.
pub fn run(
    command: &Command,
    stdin: &mut impl Read,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> std::io::Result<bool> {
    let texts = command.texts();
    if texts.is_empty() {
        let mut input = Vec::new();
        stdin.read_to_end(&mut input)?;
        let input = strip_newline(&input);
        log::info!("processing {} bytes from standard input", input.len());
        return match command.apply(input) {
            Ok(output) => {
                writeln!(stdout, "{output}")?;
                Ok(true)
            }
            Err(error) => {
                writeln!(stderr, "<stdin>: {error}")?;
                Ok(false)
            }
        };
    }
    let mut succeeded = true;
    for text in texts {
        match command.apply(text.as_encoded_bytes()) {
            Ok(output) => writeln!(stdout, "{output}")?,
            Err(error) => {
                succeeded = false;
                writeln!(stderr, "{}: {error}", text.to_string_lossy())?;
            }
        }
    }
    Ok(succeeded)
}

fn strip_newline(input: &[u8]) -> &[u8] {
    let input = input.strip_suffix(b"\n").unwrap_or(input);
    input.strip_suffix(b"\r").unwrap_or(input)
}

//! Command-line front end for `chatcomp`.
//!
//! Reads a chat component document (a file, or stdin), renders it, and
//! prints the result:
//!
//! ```text
//! chatcomp message.json --lang en_us.json --mode term
//! echo '{"color":"red","text":"hi"}' | chatcomp --mode plain
//! ```

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chatcomp::{
    Component, Renderer, StyleTransform, TermWriter, TranslationProvider, Translations,
};
use clap::{Parser, ValueEnum};
use tracing::debug;

/// Render game chat components to text.
#[derive(Parser, Debug)]
#[command(name = "chatcomp")]
#[command(version)]
#[command(about = "Render game chat components to styled or plain text")]
pub struct Cli {
    /// Component JSON file; reads stdin when omitted or "-"
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Language file with translation rules (flat JSON object)
    #[arg(short, long, value_name = "FILE")]
    pub lang: Option<PathBuf>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Mode::Term)]
    pub mode: Mode,

    /// When to emit ANSI styling in term mode
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Maximum component nesting depth, applied while decoding and rendering
    #[arg(long, default_value_t = chatcomp::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Text with `$<code>` style escapes
    Styled,
    /// Text without styling
    Plain,
    /// Text styled for the terminal
    Term,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl From<Mode> for StyleTransform {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Styled => StyleTransform::Keep,
            Mode::Plain => StyleTransform::Remove,
            Mode::Term => StyleTransform::Apply,
        }
    }
}

impl Cli {
    /// Log filter directive implied by `--verbose`.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    fn writer(&self) -> TermWriter {
        let writer = TermWriter::new(self.mode.into());
        match self.color {
            ColorChoice::Auto => writer,
            ColorChoice::Always => writer.force_styling(true),
            ColorChoice::Never => writer.force_styling(false),
        }
    }
}

/// Runs the command, reading stdin from `stdin` when no file is given.
pub fn run(cli: &Cli, stdin: &mut dyn Read, out: &mut dyn Write) -> Result<()> {
    let source = match cli.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read component from stdin")?;
            buf
        }
    };

    let translations = cli
        .lang
        .as_deref()
        .map(Translations::from_path)
        .transpose()
        .context("failed to load language file")?;
    if let Some(t) = &translations {
        debug!(rules = t.len(), "loaded translations");
    }

    let component = Component::from_json_str_with_depth(&source, cli.max_depth)
        .context("failed to decode component")?;
    let rendered = Renderer::new()
        .maybe_translations(translations.as_ref().map(|t| t as &dyn TranslationProvider))
        .max_depth(cli.max_depth)
        .render(&component)
        .context("failed to render component")?;

    writeln!(out, "{}", cli.writer().write(&rendered))?;
    Ok(())
}

//! Everything the CLI prints to stdout goes through [`OutputManager`].

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Kind of status line. Decides the marker glyph and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Failure,
    Warning,
    Note,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Failure => "\u{2717}",
            Self::Warning => "\u{26a0}",
            Self::Note => "\u{2139}",
        }
    }

    fn style(self) -> Style {
        let base = Style::new();
        match self {
            Self::Success => base.green(),
            Self::Failure => base.red(),
            Self::Warning => base.yellow(),
            Self::Note => base.blue(),
        }
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format` wins when given; `auto` defers to `output.format`,
    /// and anything still `auto` becomes human on a terminal and plain
    /// otherwise. Only human output is ever coloured.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        let format = match format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            resolved => resolved,
        };

        Self {
            format,
            quiet: args.quiet,
            no_color: format != OutputFormat::Human || args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    /// Shown even with `--quiet`.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Failure, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Note, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.cyan().bold().to_string())
        }
    }

    /// Pretty-printed JSON document. Not affected by `--quiet`.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet && tone != Tone::Failure {
            return Ok(());
        }
        self.term.write_line(&self.status_line(tone, msg))
    }

    fn status_line(&self, tone: Tone, msg: &str) -> String {
        if self.no_color {
            return format!("{} {msg}", tone.marker());
        }
        let style = tone.style();
        format!(
            "{} {}",
            tone.marker().style(style.bold()),
            msg.style(style)
        )
    }
}

//! Output formatting and writing utilities
//!
//! Status lines (info/success/error) are human-format only so that machine
//! formats on stdout stay parseable; data and failures render in whichever
//! format was selected.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use conforma_core::ValidationFailure;
use serde::Serialize;
use std::io::{self, Write};

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            quiet,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// An informational status line.
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        writeln!(io::stdout(), "{message}")?;
        Ok(())
    }

    /// A success status line.
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            writeln!(io::stdout(), "{}", message.green())?;
        } else {
            writeln!(io::stdout(), "{message}")?;
        }
        Ok(())
    }

    /// An error status line (always shown, even under --quiet).
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            writeln!(io::stderr(), "{}", message.red())?;
        } else {
            writeln!(io::stderr(), "{message}")?;
        }
        Ok(())
    }

    /// A section header.
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            writeln!(io::stdout(), "\n{}", title.bold())?;
        } else {
            writeln!(io::stdout(), "\n{title}")?;
        }
        Ok(())
    }

    /// A serializable payload in the selected format.
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::JsonPretty | OutputFormat::Human => {
                serde_json::to_string_pretty(value)?
            }
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        };
        writeln!(io::stdout(), "{}", rendered.trim_end())?;
        Ok(())
    }

    /// A validation failure: the combined headline, plus the numbered
    /// auto-generated chain when `detailed` is set. Machine formats emit the
    /// failure's full serialized form instead.
    pub fn failure(&mut self, failure: &ValidationFailure, detailed: bool) -> Result<()> {
        if self.format != OutputFormat::Human {
            return self.data(failure);
        }
        for line in failure.message().lines() {
            self.error(&format!("  {line}"))?;
        }
        if detailed {
            let autos: Vec<_> = failure.autos().iter().flatten().collect();
            if !autos.is_empty() {
                self.error("  diagnostic chain:")?;
                for (depth, auto) in autos.iter().enumerate() {
                    self.error(&format!("    {}. {auto}", depth + 1))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_formats_suppress_status_lines() {
        let mut writer = OutputWriter::new(OutputFormat::Json, false, false);
        // no panic, no stdout noise for status lines
        writer.info("ignored").unwrap();
        writer.success("ignored").unwrap();
        writer.section("ignored").unwrap();
    }

    #[test]
    fn test_quiet_suppresses_info_but_not_errors() {
        let mut writer = OutputWriter::new(OutputFormat::Human, false, true);
        writer.info("ignored").unwrap();
        writer.error("still shown").unwrap();
    }
}

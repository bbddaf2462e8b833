use std::ffi::OsStr;
use std::io::Write;
use std::str::FromStr;

use crossterm::style::Stylize;
use strum::EnumString;

use crate::errors::{Handle, Result};
use crate::table::CommandTable;

/// Tokens which ask for a command's usage text instead of running it
/// Matching is exact and case-sensitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum HelpFlag {
    #[strum(serialize = "-h")]
    Short,
    #[strum(serialize = "--h")]
    DoubleDashShort,
    #[strum(serialize = "-help")]
    SingleDashLong,
    #[strum(serialize = "--help")]
    Long,
}

impl HelpFlag {
    pub fn is_help_flag(argument: &str) -> bool {
        Self::from_str(argument).is_ok()
    }

    /// Same as `is_help_flag` for a raw argument, which is never a flag unless it is UTF-8
    pub fn is_help_argument(argument: &OsStr) -> bool {
        argument.to_str().is_some_and(Self::is_help_flag)
    }
}

/// Renders usage text for commands in a table
pub struct HelpRenderer<'a> {
    table: &'a CommandTable,
    program_name: &'a str,
    styled: bool,
}

impl<'a> HelpRenderer<'a> {
    pub fn new(table: &'a CommandTable, program_name: &'a str, styled: bool) -> Self {
        Self {
            table,
            program_name,
            styled,
        }
    }

    /// Prints the usage line for the record with exactly this name pair
    pub fn command_help<W: Write>(
        &self,
        out: &mut W,
        primary: &str,
        secondary: Option<&str>,
    ) -> Result<()> {
        let written = match self.table.find(primary, secondary) {
            Some(record) => writeln!(
                out,
                "Usage: {} {} - {}",
                self.program_name,
                self.highlight(record.to_string()),
                record.help
            ),
            None => writeln!(
                out,
                "No help available for '{}'",
                command_name(primary, secondary)
            ),
        };

        written.replace_err(|e| output_err!(FailedToWrite(e)))
    }

    /// Prints every command in table order
    pub fn list_commands<W: Write>(&self, out: &mut W) -> Result<()> {
        self.write_listing(out)
            .replace_err(|e| output_err!(FailedToWrite(e)))
    }

    pub fn unknown_command<W: Write>(
        &self,
        out: &mut W,
        primary: &str,
        secondary: Option<&str>,
    ) -> Result<()> {
        writeln!(out, "Unknown command: {}", command_name(primary, secondary))
            .replace_err(|e| output_err!(FailedToWrite(e)))
    }

    fn write_listing<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "Usage: {} <command> [subcommand] [args...]",
            self.program_name
        )?;
        writeln!(out, "Available commands:")?;

        for record in self.table.iter().filter(|r| !r.primary.is_empty()) {
            writeln!(
                out,
                "  {} - {}",
                self.highlight(record.to_string()),
                record.help
            )?;
        }

        Ok(())
    }

    fn highlight(&self, name: String) -> String {
        match self.styled {
            true => name.as_str().cyan().bold().to_string(),
            false => name,
        }
    }
}

fn command_name(primary: &str, secondary: Option<&str>) -> String {
    match secondary {
        Some(secondary) => format!("{} {}", primary, secondary),
        None => primary.to_owned(),
    }
}

use std::io::{BufRead, BufReader};
use std::path::Path;

use fs_err::File;

use super::{CommandRecord, CommandSource, CommandTable, NO_DESCRIPTION};
use crate::errors::{Handle, Result};

/// Builds the command table from the configured source
pub fn load(source: &CommandSource) -> Result<CommandTable> {
    match source {
        CommandSource::Embedded => {
            tracing::debug!("using embedded command table");
            Ok(CommandTable::default())
        }
        CommandSource::File(path) => {
            let file =
                File::open(path).replace_err(|e| table_err!(FailedToOpen(path.clone(), e)))?;
            let table = parse_table(BufReader::new(file), path)?;
            tracing::debug!(path = %path.display(), records = table.len(), "loaded command table");
            Ok(table)
        }
    }
}

/// Reads one record per line in the form `primary,secondary,target,help`
/// The path is only used to describe read failures
pub fn parse_table<R: BufRead>(reader: R, path: &Path) -> Result<CommandTable> {
    let mut table = CommandTable::new();

    for line in reader.lines() {
        let line = line.replace_err(|e| table_err!(FailedToRead(path.to_path_buf(), e)))?;
        if let Some(record) = parse_line(&line) {
            table.add(record);
        }
    }

    Ok(table)
}

/// Splits a line into a record, or `None` if the line has no primary command
fn parse_line(line: &str) -> Option<CommandRecord> {
    if line.trim_start().starts_with('#') {
        return None;
    }

    // * The help text is the last field and keeps any commas it contains
    let mut fields = line.splitn(4, ',').map(str::trim);
    let primary = fields.next().filter(|primary| !primary.is_empty())?;
    let secondary = fields.next().unwrap_or_default();
    let target = fields.next().unwrap_or_default();
    let help = fields.next().unwrap_or(NO_DESCRIPTION);

    Some(CommandRecord::new(primary, secondary, target, help))
}

mod loader;
mod record;

use std::path::PathBuf;

pub use loader::load;
pub use record::{CommandRecord, NO_DESCRIPTION};

/// Where the command table comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommandSource {
    /// The table compiled into the binary
    #[default]
    Embedded,
    /// A comma-separated file with one record per line
    File(PathBuf),
}

/// Ordered collection of command records
/// Built once at startup and only read afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    records: Vec<CommandRecord>,
}

impl Default for CommandTable {
    /// Initializes the `CommandTable` with the embedded commands
    #[rustfmt::skip]
    fn default() -> Self {
        let mut table = Self::new();

        table.add(CommandRecord::new("route", "", "", "this is to route stuff"));
        table.add(CommandRecord::new("route", "add", "route_add.sh", "this is to add a route"));
        table.add(CommandRecord::new("route", "del", "route_delete.sh -d", "this is to delete a route"));
        table.add(CommandRecord::new("status", "", "status.sh", "this is to get server status"));

        table
    }
}

impl FromIterator<CommandRecord> for CommandTable {
    fn from_iter<I: IntoIterator<Item = CommandRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            table.add(record);
        }

        table
    }
}

impl CommandTable {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record to the end of the table
    fn add(&mut self, record: CommandRecord) {
        // Lookup stops at the first match, so a later record with the same name pair can never be reached
        if self.find(&record.primary, optional(&record.secondary)).is_some() {
            tracing::warn!(command = %record, "duplicate command record is unreachable");
        }

        self.records.push(record)
    }

    /// Attempts to locate the first record answering to the given name pair
    pub fn find(&self, primary: &str, secondary: Option<&str>) -> Option<&CommandRecord> {
        self.records
            .iter()
            .find(|record| record.matches(primary, secondary))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

fn optional(secondary: &str) -> Option<&str> {
    match secondary.is_empty() {
        true => None,
        false => Some(secondary),
    }
}

use std::path::PathBuf;

use crate::args::Cli;
use crate::table::CommandSource;

/// Name the dispatcher calls itself in usage lines
pub const PROGRAM_NAME: &str = "darkflows";

// Represents the runtime settings of the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    // Where the command table is read from
    pub source: CommandSource,
    // Directory searched for scripts before PATH
    pub script_dir: Option<PathBuf>,
    // Largest argument vector handed to a script, or no limit
    pub max_args: Option<usize>,
    pub program_name: String,
    // Whether help output may contain terminal styling
    pub styled: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            source: CommandSource::Embedded,
            script_dir: None,
            max_args: None,
            program_name: PROGRAM_NAME.to_owned(),
            styled: false,
        }
    }
}

impl From<&Cli> for Configuration {
    fn from(cli: &Cli) -> Self {
        let source = match &cli.commands_file {
            Some(path) => CommandSource::File(path.clone()),
            None => CommandSource::Embedded,
        };

        Self {
            source,
            script_dir: cli.script_dir.clone(),
            // A limit of zero could not even hold the script name
            max_args: cli.max_args.filter(|&limit| limit > 0),
            ..Self::default()
        }
    }
}

impl Configuration {
    pub fn with_styling(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }
}

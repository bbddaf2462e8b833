use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Options are only recognized before the primary command
/// Everything from the primary command on is passed through untouched
#[derive(Parser, Debug)]
#[command(
    name = "darkflows",
    about = "Runs the script registered for a command",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    #[arg(
        long = "commands-file",
        env = "DARKFLOWS_COMMANDS_FILE",
        help = "Read the command table from this file instead of the embedded one"
    )]
    pub commands_file: Option<PathBuf>,
    #[arg(
        long = "script-dir",
        env = "DARKFLOWS_SCRIPT_DIR",
        help = "Directory searched for command scripts before PATH"
    )]
    pub script_dir: Option<PathBuf>,
    #[arg(
        long = "max-args",
        env = "DARKFLOWS_MAX_ARGS",
        help = "Largest argument vector handed to a script, including its name"
    )]
    pub max_args: Option<usize>,
    // * Forwarded arguments reach the script byte for byte, so they are not required to be UTF-8
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString),
        help = "The command, its subcommand and the arguments to forward"
    )]
    pub command: Vec<OsString>,
}

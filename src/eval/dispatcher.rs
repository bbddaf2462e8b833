use std::ffi::{OsStr, OsString};
use std::io::Write;

use super::help::{HelpFlag, HelpRenderer};
use crate::errors::Result;
use crate::exec::{Invocation, Runnable};
use crate::state::Configuration;
use crate::table::{CommandRecord, CommandTable};

/// What an argument vector asks the dispatcher to do
/// Command names are kept as text, lossily converted if they were not UTF-8
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No command was given, list every command
    List,
    /// Show the usage line of a command instead of running it
    Help {
        primary: String,
        secondary: Option<String>,
    },
    /// No record answers to the given names
    Unknown {
        primary: String,
        secondary: Option<String>,
    },
    /// Replace the dispatcher with the command's script
    Execute(Invocation),
}

/// How an invocation of the dispatcher ended, if it ended at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Listed,
    Helped,
    Unknown,
    /// The script ran as a child and finished with this status
    Exited(i32),
}

/// Resolves two-level command names against a command table
/// and either prints help or hands the matching script to a runner
pub struct Dispatcher {
    table: CommandTable,
    max_args: Option<usize>,
    program_name: String,
    styled: bool,
}

impl Default for Dispatcher {
    /// Initializes the `Dispatcher` with the embedded commands
    fn default() -> Self {
        Self::new(CommandTable::default(), &Configuration::default())
    }
}

impl Dispatcher {
    pub fn new(table: CommandTable, config: &Configuration) -> Self {
        Self {
            table,
            max_args: config.max_args,
            program_name: config.program_name.clone(),
            styled: config.styled,
        }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Works out what the full argument vector (program name first) asks for
    pub fn resolve(&self, args: &[OsString]) -> Resolution {
        let Some(primary) = args.get(1) else {
            return Resolution::List;
        };

        // The second argument names a subcommand unless it is asking for help
        let (secondary, consumed) = match args.get(2) {
            Some(argument) if !HelpFlag::is_help_argument(argument) => {
                (Some(argument.as_os_str()), 3)
            }
            _ => (None, 2),
        };
        let trailing = args.get(consumed..).unwrap_or(&[]);
        let help_requested = trailing.iter().any(|a| HelpFlag::is_help_argument(a));

        let primary_name = primary.to_string_lossy().into_owned();
        let secondary_name = secondary.map(|s| s.to_string_lossy().into_owned());

        let Some(record) = self.lookup(primary, secondary) else {
            tracing::debug!(
                primary = %primary_name,
                secondary = ?secondary_name,
                "no command record matches"
            );
            return Resolution::Unknown {
                primary: primary_name,
                secondary: secondary_name,
            };
        };

        let help = Resolution::Help {
            primary: primary_name,
            secondary: secondary_name,
        };

        // A record without a target only exists to describe its command
        if help_requested || !record.is_runnable() {
            tracing::debug!(command = %record, help_requested, "showing help");
            return help;
        }

        // Help flags never reach the script
        let forwarded = trailing
            .iter()
            .filter(|a| !HelpFlag::is_help_argument(a))
            .cloned();

        let Some(mut invocation) = Invocation::from_target(&record.target, forwarded) else {
            return help;
        };

        if let Some(limit) = self.max_args {
            let dropped = invocation.truncate(limit);
            if !dropped.is_empty() {
                tracing::warn!(limit, ?dropped, "too many arguments, dropping the rest");
            }
        }

        Resolution::Execute(invocation)
    }

    // Table names are text, so a name that is not UTF-8 never matches anything
    fn lookup(&self, primary: &OsStr, secondary: Option<&OsStr>) -> Option<&CommandRecord> {
        let primary = primary.to_str()?;
        match secondary {
            Some(secondary) => self.table.find(primary, Some(secondary.to_str()?)),
            None => self.table.find(primary, None),
        }
    }

    /// Resolves the argument vector and carries out the result
    /// Help text, listings and unknown-command messages are written to `out`
    pub fn dispatch<W: Write>(
        &self,
        args: &[OsString],
        runner: &dyn Runnable,
        out: &mut W,
    ) -> Result<Outcome> {
        let renderer = HelpRenderer::new(&self.table, &self.program_name, self.styled);

        match self.resolve(args) {
            Resolution::List => {
                renderer.list_commands(out)?;
                Ok(Outcome::Listed)
            }
            Resolution::Help { primary, secondary } => {
                renderer.command_help(out, &primary, secondary.as_deref())?;
                Ok(Outcome::Helped)
            }
            Resolution::Unknown { primary, secondary } => {
                renderer.unknown_command(out, &primary, secondary.as_deref())?;
                Ok(Outcome::Unknown)
            }
            Resolution::Execute(invocation) => runner.run(&invocation).map(Outcome::Exited),
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use super::*;

    /// Records every invocation instead of running it
    #[derive(Default)]
    struct Recorder {
        invocations: RefCell<Vec<Vec<OsString>>>,
    }

    impl Runnable for Recorder {
        fn run(&self, invocation: &Invocation) -> Result<i32> {
            let argv = invocation.argv().iter().map(|a| a.to_os_string()).collect();
            self.invocations.borrow_mut().push(argv);
            Ok(0)
        }
    }

    struct Failing;

    impl Runnable for Failing {
        fn run(&self, invocation: &Invocation) -> Result<i32> {
            Err(executable_err!(NotFound(invocation.program().to_owned())))
        }
    }

    macro_rules! args {
        ($($arg:expr),*) => {
            vec![OsString::from("darkflows") $(, OsString::from($arg))*]
        };
    }

    fn run(dispatcher: &Dispatcher, args: Vec<OsString>) -> (Outcome, String, Vec<Vec<OsString>>) {
        let recorder = Recorder::default();
        let mut out = Vec::new();
        let outcome = dispatcher.dispatch(&args, &recorder, &mut out).unwrap();

        (
            outcome,
            String::from_utf8(out).unwrap(),
            recorder.invocations.into_inner(),
        )
    }

    fn table(records: Vec<CommandRecord>) -> Dispatcher {
        Dispatcher::new(records.into_iter().collect(), &Configuration::default())
    }

    #[test]
    fn unique_pair_resolves_to_its_target() {
        let dispatcher = Dispatcher::default();

        match dispatcher.resolve(&args!("route", "del", "10.0.0.0/8")) {
            Resolution::Execute(invocation) => {
                assert_eq!(invocation.argv(), vec!["route_delete.sh", "-d", "10.0.0.0/8"])
            }
            other => panic!("unexpected resolution: {:?}", other),
        }

        let (outcome, output, _) = run(&dispatcher, args!("route", "del", "-h"));
        assert_eq!(outcome, Outcome::Helped);
        assert_eq!(output, "Usage: darkflows route del - this is to delete a route\n");
    }

    #[test]
    fn no_arguments_lists_without_running() {
        let (outcome, output, invocations) = run(&Dispatcher::default(), args!());

        assert_eq!(outcome, Outcome::Listed);
        assert!(output.starts_with("Usage: darkflows <command> [subcommand] [args...]\n"));
        assert!(output.contains("  route add - this is to add a route\n"));
        assert!(output.contains("  status - this is to get server status\n"));
        assert!(invocations.is_empty());
    }

    #[test]
    fn empty_argument_vector_lists() {
        assert_eq!(Dispatcher::default().resolve(&[]), Resolution::List);
    }

    #[test]
    fn help_flag_after_runnable_primary() {
        for flag in ["-h", "--h", "-help", "--help"] {
            let (outcome, output, invocations) = run(&Dispatcher::default(), args!("status", flag));

            assert_eq!(outcome, Outcome::Helped);
            assert_eq!(output, "Usage: darkflows status - this is to get server status\n");
            assert!(invocations.is_empty());
        }
    }

    #[test]
    fn help_flag_anywhere_after_subcommand() {
        let (outcome, output, invocations) =
            run(&Dispatcher::default(), args!("route", "add", "10.0.0.0/8", "via", "--help"));

        assert_eq!(outcome, Outcome::Helped);
        assert_eq!(output, "Usage: darkflows route add - this is to add a route\n");
        assert!(invocations.is_empty());
    }

    #[test]
    fn help_flags_are_case_sensitive() {
        let (outcome, _, invocations) = run(&Dispatcher::default(), args!("route", "add", "--HELP"));

        assert_eq!(outcome, Outcome::Exited(0));
        assert_eq!(invocations, vec![vec!["route_add.sh", "--HELP"]]);
    }

    #[test]
    fn fixed_arguments_precede_forwarded_ones() {
        let dispatcher = table(vec![CommandRecord::new(
            "primary",
            "subcmd",
            "script.sh flag",
            "does things",
        )]);
        let (outcome, output, invocations) =
            run(&dispatcher, args!("primary", "subcmd", "extra-args"));

        assert_eq!(outcome, Outcome::Exited(0));
        assert!(output.is_empty());
        assert_eq!(invocations, vec![vec!["script.sh", "flag", "extra-args"]]);
    }

    #[test]
    fn primary_without_subcommand_runs() {
        let (outcome, _, invocations) = run(&Dispatcher::default(), args!("status"));

        assert_eq!(outcome, Outcome::Exited(0));
        assert_eq!(invocations, vec![vec!["status.sh"]]);
    }

    #[test]
    fn category_entry_always_shows_help() {
        let (outcome, output, invocations) = run(&Dispatcher::default(), args!("route"));
        assert_eq!(outcome, Outcome::Helped);
        assert_eq!(output, "Usage: darkflows route - this is to route stuff\n");
        assert!(invocations.is_empty());

        let (_, output, _) = run(&Dispatcher::default(), args!("route", "-h"));
        assert_eq!(output, "Usage: darkflows route - this is to route stuff\n");
    }

    #[test]
    fn subcommand_without_target_shows_help() {
        let dispatcher = table(vec![CommandRecord::new("vlan", "list", "", "lists vlans")]);
        let (outcome, output, invocations) = run(&dispatcher, args!("vlan", "list", "extra"));

        assert_eq!(outcome, Outcome::Helped);
        assert_eq!(output, "Usage: darkflows vlan list - lists vlans\n");
        assert!(invocations.is_empty());
    }

    #[test]
    fn unregistered_primary_is_unknown() {
        let (outcome, output, invocations) = run(&Dispatcher::default(), args!("reboot"));

        assert_eq!(outcome, Outcome::Unknown);
        assert_eq!(output, "Unknown command: reboot\n");
        assert!(invocations.is_empty());
    }

    #[test]
    fn unregistered_subcommand_is_unknown() {
        let (outcome, output, invocations) = run(&Dispatcher::default(), args!("route", "flush"));
        assert_eq!(outcome, Outcome::Unknown);
        assert_eq!(output, "Unknown command: route flush\n");
        assert!(invocations.is_empty());

        // The second argument is always a subcommand, even for commands that have none
        let (outcome, output, _) = run(&Dispatcher::default(), args!("status", "verbose"));
        assert_eq!(outcome, Outcome::Unknown);
        assert_eq!(output, "Unknown command: status verbose\n");
    }

    #[test]
    fn first_duplicate_wins() {
        let dispatcher = table(vec![
            CommandRecord::new("status", "", "status.sh", "first"),
            CommandRecord::new("status", "", "status_v2.sh", "second"),
        ]);
        let (_, _, invocations) = run(&dispatcher, args!("status"));

        assert_eq!(invocations, vec![vec!["status.sh"]]);
    }

    #[test]
    fn argument_limit_includes_program() {
        let config = Configuration {
            max_args: Some(10),
            ..Configuration::default()
        };
        let dispatcher = Dispatcher::new(CommandTable::default(), &config);
        let args = args!("route", "del", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10");

        let (_, _, invocations) = run(&dispatcher, args);
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].len(), 10);
        assert_eq!(invocations[0][..3], ["route_delete.sh", "-d", "1"]);
        assert_eq!(invocations[0].last().unwrap(), "8");
    }

    #[test]
    fn no_limit_by_default() {
        let forwarded = (0..50).map(|n| OsString::from(n.to_string()));
        let mut args = args!("status");
        args.extend(forwarded);

        let (_, _, invocations) = run(&Dispatcher::default(), args);
        assert_eq!(invocations[0].len(), 51);
    }

    #[test]
    fn runner_errors_propagate() {
        let dispatcher = Dispatcher::default();
        let mut out = Vec::new();
        let error = dispatcher
            .dispatch(&args!("status"), &Failing, &mut out)
            .unwrap_err();

        assert_eq!(error.to_string(), "Command script not found: status.sh");
        assert_eq!(error.exit_code(), 127);
        assert!(out.is_empty());
    }

    #[test]
    fn program_name_is_configurable() {
        let config = Configuration {
            program_name: "df".to_owned(),
            ..Configuration::default()
        };
        let dispatcher = Dispatcher::new(CommandTable::default(), &config);
        let (_, output, _) = run(&dispatcher, args!("status", "--help"));

        assert_eq!(output, "Usage: df status - this is to get server status\n");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_arguments_are_forwarded_unchanged() {
        use std::os::unix::ffi::OsStringExt;

        let file = OsString::from_vec(b"file\xff.txt".to_vec());
        let mut args = args!("route", "add");
        args.push(file.clone());

        let (outcome, _, invocations) = run(&Dispatcher::default(), args);
        assert_eq!(outcome, Outcome::Exited(0));
        assert_eq!(
            invocations,
            vec![vec![OsString::from("route_add.sh"), file]]
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_command_name_is_unknown() {
        use std::os::unix::ffi::OsStringExt;

        let mut args = args!();
        args.push(OsString::from_vec(b"stat\xffus".to_vec()));

        let (outcome, output, invocations) = run(&Dispatcher::default(), args);
        assert_eq!(outcome, Outcome::Unknown);
        assert_eq!(output, "Unknown command: stat\u{FFFD}us\n");
        assert!(invocations.is_empty());
    }
}

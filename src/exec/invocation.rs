use std::ffi::{OsStr, OsString};
use std::fmt::{Display, Formatter};

/// The argument vector a resolved command hands to its script
/// The program comes first, then the arguments baked into the table, then the user's
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    // * Forwarded arguments are passed on as raw OS strings
    arguments: Vec<OsString>,
}

impl Display for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let argv: Vec<_> = self.argv().iter().map(|a| a.to_string_lossy()).collect();
        write!(f, "{}", argv.join(" "))
    }
}

impl Invocation {
    /// Splits a target into its program and fixed arguments and appends the forwarded ones
    /// Returns `None` if the target has nothing to run
    pub fn from_target<I>(target: &str, forwarded: I) -> Option<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut tokens = target.split_whitespace();
        let program = tokens.next()?.to_owned();
        let mut arguments: Vec<OsString> = tokens.map(OsString::from).collect();
        arguments.extend(forwarded);

        Some(Self { program, arguments })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.arguments
    }

    /// The full argument vector, program included
    pub fn argv(&self) -> Vec<&OsStr> {
        std::iter::once(OsStr::new(&self.program))
            .chain(self.arguments.iter().map(OsString::as_os_str))
            .collect()
    }

    /// Caps the argument vector, program included, at `limit` entries and returns whatever was cut
    pub fn truncate(&mut self, limit: usize) -> Vec<OsString> {
        let keep = limit.saturating_sub(1);
        if self.arguments.len() > keep {
            self.arguments.split_off(keep)
        } else {
            Vec::new()
        }
    }
}

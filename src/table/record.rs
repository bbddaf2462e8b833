use std::fmt::{Display, Formatter};

/// Help text given to records whose source line has no fourth field
pub const NO_DESCRIPTION: &str = "No description";

/// One row of the command table: a command name pair, the script it runs and its help text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub primary: String,
    // * An empty secondary means the record answers to the primary name on its own
    pub secondary: String,
    // * Executable followed by any baked-in leading arguments, separated by whitespace
    pub target: String,
    pub help: String,
}

impl CommandRecord {
    pub fn new(primary: &str, secondary: &str, target: &str, help: &str) -> Self {
        Self {
            primary: primary.to_owned(),
            secondary: secondary.to_owned(),
            target: target.to_owned(),
            help: help.to_owned(),
        }
    }

    /// Whether this record answers to the given name pair
    pub fn matches(&self, primary: &str, secondary: Option<&str>) -> bool {
        self.primary == primary
            && match secondary {
                Some(secondary) => self.secondary == secondary,
                None => self.secondary.is_empty(),
            }
    }

    /// A record with nothing to run only contributes help text
    pub fn is_runnable(&self) -> bool {
        !self.target.trim().is_empty()
    }
}

impl Display for CommandRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.secondary.is_empty() {
            true => write!(f, "{}", self.primary),
            false => write!(f, "{} {}", self.primary, self.secondary),
        }
    }
}

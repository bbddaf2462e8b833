use std::path::PathBuf;
use std::process::Command as Process;

use super::{Invocation, Runnable};
use crate::errors::Result;
use crate::state::{search_dirs, Path};

/// Runs a command's script in place of the dispatcher
pub struct ProcessImage {
    script_dir: Option<PathBuf>,
}

impl ProcessImage {
    pub fn new(script_dir: Option<PathBuf>) -> Self {
        Self { script_dir }
    }

    /// Finds the first script on disk that can be run
    fn locate(&self, program: &str) -> Result<Path> {
        Path::try_resolve_executable(program, &search_dirs(self.script_dir.as_deref()))
    }
}

impl Runnable for ProcessImage {
    #[cfg(unix)]
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        use std::os::unix::process::CommandExt;

        let path = self.locate(invocation.program())?;
        tracing::info!(path = %path, "executing {}", invocation);

        // * exec only returns if the process image could not be replaced
        // * Standard descriptors and the environment are inherited as-is
        let error = Process::new(path.path())
            .arg0(invocation.program())
            .args(invocation.arguments())
            .exec();

        Err(executable_err!(FailedToReplace(path.into(), error.to_string())))
    }

    #[cfg(not(unix))]
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        use crate::errors::Handle;

        let path = self.locate(invocation.program())?;
        tracing::info!(path = %path, "executing {}", invocation);

        let mut process = Process::new(path.path())
            .args(invocation.arguments())
            .spawn()
            .replace_err(|e| executable_err!(FailedToReplace(path.clone().into(), e)))?;

        let status = process
            .wait()
            .replace_err(|e| executable_err!(CouldNotWait(path.clone().into(), e)))?;

        // * A child without an exit code was terminated externally, which is reported like a failed exec
        Ok(status.code().unwrap_or(126))
    }
}

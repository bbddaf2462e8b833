use std::fmt::{Display, Formatter};
use std::path::{Path as StdPath, PathBuf};

use crate::errors::{Handle, Result};

/// Wrapper class for a `PathBuf` pointing at a command script
/// Only constructed once the file has been located on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    absolute_path: PathBuf,
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.absolute_path.display())
    }
}

impl From<Path> for PathBuf {
    fn from(value: Path) -> Self {
        value.absolute_path
    }
}

impl Path {
    /// Attempts to locate an executable file
    /// A name containing a slash is taken as a path, otherwise each directory is searched in order
    /// Candidates that cannot be executed are passed over the way `execvp` does
    pub fn try_resolve_executable(name: &str, search_dirs: &[PathBuf]) -> Result<Self> {
        if name.contains('/') {
            let path = Self {
                absolute_path: PathBuf::from(name),
            };
            if !path.absolute_path.exists() {
                return Err(executable_err!(NotFound(name.to_owned())));
            }

            path.ensure_executable()?;
            return Ok(path);
        }

        if name.is_empty() {
            return Err(executable_err!(NotFound(name.to_owned())));
        }

        // The first file found but rejected is what gets reported if the search comes up empty
        let mut rejected = None;
        for dir in search_dirs {
            let path = Self {
                absolute_path: dir.join(name),
            };
            if !path.absolute_path.is_file() {
                continue;
            }

            match path.ensure_executable() {
                Ok(()) => return Ok(path),
                Err(error) => {
                    tracing::debug!(path = %path, "skipping script that cannot be executed");
                    if rejected.is_none() {
                        rejected = Some(error);
                    }
                }
            }
        }

        Err(rejected.unwrap_or_else(|| executable_err!(NotFound(name.to_owned()))))
    }

    /// Returns the resolved path
    pub fn path(&self) -> &StdPath {
        &self.absolute_path
    }

    /// Fails unless some executable permission bit is set on the file
    #[cfg(unix)]
    fn ensure_executable(&self) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs_err::metadata(&self.absolute_path)
            .replace_err(|e| executable_err!(FailedToReadMetadata(self.absolute_path.clone(), e)))?;
        let permission_code = metadata.permissions().mode();
        // 0o111 covers the owner, group and other executable bits
        if permission_code & 0o111 == 0 {
            Err(executable_err!(NotExecutable(
                self.absolute_path.clone(),
                permission_code & 0o7777
            )))
        } else {
            Ok(())
        }
    }

    /// Permission bits do not exist off Unix, the spawn itself reports what cannot run
    #[cfg(not(unix))]
    fn ensure_executable(&self) -> Result<()> {
        Ok(())
    }
}

/// Directories a bare script name is looked up in: the script directory, then every `PATH` entry
pub fn search_dirs(script_dir: Option<&StdPath>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = script_dir.map(StdPath::to_path_buf).into_iter().collect();
    if let Some(path) = std::env::var_os("PATH") {
        dirs.extend(std::env::split_paths(&path));
    }

    dirs
}

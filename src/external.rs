use crate::command::{ExitCode, Stdout};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// Command that is not a builtin, run as a child process.
#[derive(Debug)]
pub struct ExternalCommand {
    name: String,
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalCommand {
    /// Resolve `argv[0]` against the `PATH` of `env`, see [`locate_program`].
    ///
    /// Fails with [`ShellError::CommandNotFound`] if there is no such program, including
    /// when `argv` is empty or its first word is empty.
    pub fn resolve(env: &Environment, argv: &[String]) -> Result<Self> {
        let (name, args) = argv
            .split_first()
            .ok_or_else(|| ShellError::CommandNotFound(String::new()))?;
        let search_path = env.get_var("PATH").unwrap_or_default();
        let program = locate_program(search_path, name)
            .ok_or_else(|| ShellError::CommandNotFound(name.clone()))?;
        Ok(Self {
            name: name.clone(),
            program,
            args: args.to_vec(),
        })
    }

    /// Spawn the program and block until it terminates.
    ///
    /// The child sees exactly the variables of `env`. When `stdout` is given it replaces
    /// the child's standard output; otherwise the interpreter's own output is inherited.
    /// The parent's handle to `stdout` is closed before waiting.
    pub fn spawn_and_wait(
        self,
        stdout: Option<Box<dyn Stdout>>,
        env: &Environment,
    ) -> Result<ExitCode> {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.args)
            .env_clear()
            .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(&self.name);
        }
        match stdout {
            Some(out) => cmd.stdout(out.stdio()),
            None => cmd.stdout(Stdio::inherit()),
        };

        log::debug!("spawning {} as {:?} {:?}", self.program.display(), self.name, self.args);
        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                ShellError::CommandNotFound(self.name.clone())
            }
            _ => ShellError::Spawn(e),
        })?;
        // drop the parent's copy of the redirection target
        drop(cmd);

        let exit_status = child.wait().map_err(ShellError::Wait)?;
        let code = match exit_status.code() {
            Some(x) => x,
            None => terminated_by_signal(exit_status),
        };
        log::debug!("{} exited with {}", self.name, code);
        Ok(code)
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Find the executable file that `name` refers to.
///
/// A name containing `/` is taken as a path, relative to the current directory unless
/// absolute. Any other name is looked up in the directories of `search_path`, in order;
/// empty entries are skipped. Only regular files with an execute bit count, so a
/// non-executable file earlier in `search_path` does not hide a later program.
pub fn locate_program(search_path: &str, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if name.contains('/') {
        let path = Path::new(name);
        return is_executable(path).then(|| path.to_path_buf());
    }
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file())
}

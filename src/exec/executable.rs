use std::io::ErrorKind as IoErrorKind;
use std::os::fd::OwnedFd;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, Command as Process, ExitStatus, Stdio};

use fs_err::OpenOptions;

use crate::errors::{Handle, Result};

/// Where a command reads its standard input from
#[derive(Debug, Default)]
pub enum Source {
    #[default]
    Inherit,
    Pipe(OwnedFd),
}

/// Where a command writes its standard output to
#[derive(Debug)]
pub enum Sink {
    Inherit,
    Pipe(OwnedFd),
    File(OwnedFd),
}

impl Sink {
    /// Opens a redirection target in append mode, creating it if needed
    pub fn append_to(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .replace_err(|| redirect_err!(FailedToOpen: path))?;
        let (file, _) = file.into_parts();

        Ok(Self::File(OwnedFd::from(file)))
    }

    /// Whether output goes to the interpreter's own standard output
    pub fn is_inherit(&self) -> bool {
        matches!(self, Sink::Inherit)
    }
}

impl From<Source> for Stdio {
    fn from(source: Source) -> Self {
        match source {
            Source::Inherit => Stdio::inherit(),
            Source::Pipe(fd) => Stdio::from(fd),
        }
    }
}

impl From<Sink> for Stdio {
    fn from(sink: Sink) -> Self {
        match sink {
            Sink::Inherit => Stdio::inherit(),
            Sink::Pipe(fd) | Sink::File(fd) => Stdio::from(fd),
        }
    }
}

/// Creates a pipe, returning its read and write ends
/// Both ends are close-on-exec, so only the child they are handed to ever holds them
pub fn pipe() -> Result<(OwnedFd, OwnedFd)> {
    let (read_end, write_end) =
        std::io::pipe().replace_err(|| executable_err!(FailedToCreatePipe))?;

    Ok((OwnedFd::from(read_end), OwnedFd::from(write_end)))
}

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The command exited normally with the given code
    Exited(i32),
    /// The command was terminated by the given signal
    Signaled(i32),
}

impl Status {
    pub const SUCCESS: Status = Status::Exited(0);
    pub const FAILURE: Status = Status::Exited(1);

    pub fn success(&self) -> bool {
        *self == Self::SUCCESS
    }

    /// The status as a single exit code, using the usual 128 + signal convention
    pub fn code(&self) -> i32 {
        match *self {
            Status::Exited(code) => code,
            Status::Signaled(signal) => 128 + signal,
        }
    }
}

impl From<ExitStatus> for Status {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Status::Exited(code),
            (None, Some(signal)) => Status::Signaled(signal),
            // * A child that is neither exited nor signaled cannot be returned by wait()
            (None, None) => Status::FAILURE,
        }
    }
}

/// An external command started by the interpreter
pub struct Executable {
    name: String,
    child: Child,
}

impl Executable {
    /// Spawns `argv[0]`, searched for in the PATH, with the remaining arguments
    /// The descriptors in `stdin` and `stdout` are handed to the child and the parent's copies
    /// are closed before this returns
    pub fn spawn(argv: &[&str], stdin: Source, stdout: Sink) -> Result<Self> {
        let (name, arguments) = argv
            .split_first()
            .replace_err(|| executable_err!(NotFound: ""))?;

        let mut process = Process::new(name);
        process.args(arguments).stdin(stdin).stdout(stdout);

        let child = process.spawn().map_err(|e| match e.kind() {
            IoErrorKind::NotFound => executable_err!(NotFound: *name),
            IoErrorKind::PermissionDenied => executable_err!(PermissionDenied: *name),
            _ => executable_err!(FailedToSpawn: e.to_string()),
        })?;
        log::debug!("Spawned {} as pid {}", name, child.id());

        Ok(Self {
            name: name.to_string(),
            child,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blocks until the child has exited or been killed by a signal
    pub fn wait(mut self) -> Result<Status> {
        let status = self
            .child
            .wait()
            .map_err(|e| executable_err!(CouldNotWait: e.to_string()))?;
        let status = Status::from(status);
        log::debug!("{} (pid {}) finished: {:?}", self.name, self.child.id(), status);

        Ok(status)
    }
}

impl std::fmt::Debug for Executable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executable")
            .field("name", &self.name)
            .field("pid", &self.child.id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn runs_command_and_reports_exit_code() {
        let status = Executable::spawn(&["sh", "-c", "exit 3"], Source::Inherit, Sink::Inherit)
            .and_then(Executable::wait)
            .unwrap();

        assert_eq!(status, Status::Exited(3));
        assert!(!status.success());
    }

    #[test]
    fn reports_signal_termination() {
        let status = Executable::spawn(
            &["sh", "-c", "kill -9 $$"],
            Source::Inherit,
            Sink::Inherit,
        )
        .and_then(Executable::wait)
        .unwrap();

        assert_eq!(status, Status::Signaled(9));
        assert_eq!(status.code(), 137);
    }

    #[test]
    fn missing_program_is_not_found() {
        let error = Executable::spawn(
            &["definitely-not-a-real-program-name"],
            Source::Inherit,
            Sink::Inherit,
        )
        .unwrap_err();

        assert_eq!(error.exit_code(), 127);
    }

    #[test]
    fn output_goes_through_pipe() {
        //given
        let (read_end, write_end) = pipe().unwrap();

        //when
        let child = Executable::spawn(&["echo", "piped"], Source::Inherit, Sink::Pipe(write_end))
            .unwrap();
        let mut reader = std::fs::File::from(read_end);
        let mut output = String::new();
        // * This only reaches EOF if the parent's copy of the write end was closed by spawn
        reader.read_to_string(&mut output).unwrap();

        //then
        assert_eq!(child.wait().unwrap(), Status::SUCCESS);
        assert_eq!(output, "piped\n");
    }

    #[test]
    fn input_comes_from_pipe() {
        //given
        let (read_end, write_end) = pipe().unwrap();
        let (result_read, result_write) = pipe().unwrap();
        drop(write_end);

        //when
        let child = Executable::spawn(
            &["wc", "-c"],
            Source::Pipe(read_end),
            Sink::Pipe(result_write),
        )
        .unwrap();
        let mut output = String::new();
        std::fs::File::from(result_read)
            .read_to_string(&mut output)
            .unwrap();

        //then
        assert!(child.wait().unwrap().success());
        assert_eq!(output.trim(), "0");
    }
}

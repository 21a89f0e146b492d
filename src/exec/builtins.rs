/*
Builtins are commands that run inside the interpreter's own process instead of a child.
They exist because a child cannot change its parent's state: a `cd` run as a separate process
would only move the child. For the same reason a builtin is only honored when its output goes
to the interpreter's own standard output, since anything else would require a child process.
 */

pub mod args;
pub mod command;

use clap::Parser;

use self::args::{ChangeDirectoryArgs, ExitArgs};
pub use self::command::{Builtin, BuiltinAction};
use crate::errors::{Handle, Result};

static BUILTINS: [Builtin; 2] = [
    Builtin::new("cd", change_directory),
    Builtin::new("exit", exit),
];

/// Attempts to locate a builtin command by name
pub fn resolve(command_name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == command_name)
}

pub fn change_directory(argv: &[&str]) -> Result<BuiltinAction> {
    let arguments = parse_args::<ChangeDirectoryArgs>(argv)?;
    std::env::set_current_dir(&arguments.path)
        .replace_err(|| builtin_err!(FailedToChangeDirectory: arguments.path.as_path()))?;
    log::info!("Changed directory to {}", arguments.path.display());

    Ok(BuiltinAction::Continue)
}

pub fn exit(argv: &[&str]) -> Result<BuiltinAction> {
    parse_args::<ExitArgs>(argv)?;
    Ok(BuiltinAction::Exit)
}

// Parses builtin arguments with clap, keeping its usage message as the error text
fn parse_args<T: Parser>(argv: &[&str]) -> Result<T> {
    T::try_parse_from(argv).map_err(|e| {
        let name = argv.first().copied().unwrap_or_default();
        builtin_err!(InvalidArguments: name).set_context(e.render().to_string().trim_end())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{BuiltinError, ErrorKind};

    #[test]
    fn resolves_known_builtins() {
        assert_eq!(resolve("cd").map(|b| b.name), Some("cd"));
        assert_eq!(resolve("exit").map(|b| b.name), Some("exit"));
        assert!(resolve("ls").is_none());
    }

    #[test]
    fn exit_requests_exit() {
        assert_eq!(exit(&["exit"]).unwrap(), BuiltinAction::Exit);
    }

    #[test]
    fn exit_ignores_trailing_arguments() {
        assert_eq!(exit(&["exit", "0"]).unwrap(), BuiltinAction::Exit);
        assert_eq!(exit(&["exit", "now", "--force"]).unwrap(), BuiltinAction::Exit);
    }

    #[test]
    fn cd_takes_first_argument_and_ignores_the_rest() {
        let arguments = parse_args::<ChangeDirectoryArgs>(&["cd", "/", "extra"]).unwrap();

        assert_eq!(arguments.path, std::path::PathBuf::from("/"));
    }

    #[test]
    fn cd_accepts_paths_starting_with_a_hyphen() {
        let dashed = parse_args::<ChangeDirectoryArgs>(&["cd", "-x"]).unwrap();
        let help = parse_args::<ChangeDirectoryArgs>(&["cd", "--help"]).unwrap();

        assert_eq!(dashed.path, std::path::PathBuf::from("-x"));
        assert_eq!(help.path, std::path::PathBuf::from("--help"));
    }

    #[test]
    fn cd_without_argument_fails() {
        let error = change_directory(&["cd"]).unwrap_err();

        assert!(matches!(
            error.kind(),
            ErrorKind::Builtin(BuiltinError::InvalidArguments(name)) if name == "cd"
        ));
        assert!(error.to_string().contains("Usage: cd"));
    }

    #[test]
    fn cd_to_missing_directory_fails() {
        let before = std::env::current_dir().unwrap();

        let error = change_directory(&["cd", "/definitely/not/a/directory"]).unwrap_err();

        assert!(matches!(
            error.kind(),
            ErrorKind::Builtin(BuiltinError::FailedToChangeDirectory(_))
        ));
        assert_eq!(std::env::current_dir().unwrap(), before);
    }
}

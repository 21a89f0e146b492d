use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cd", disable_help_flag = true)]
pub struct ChangeDirectoryArgs {
    #[arg(
        allow_hyphen_values = true,
        help = "The path of the directory to switch to"
    )]
    pub path: PathBuf,
    // * Anything after the path is accepted and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _ignored: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(name = "exit", disable_help_flag = true)]
pub struct ExitArgs {
    // * `exit` leaves with success whatever follows it
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _ignored: Vec<String>,
}

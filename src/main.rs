use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use tsh::eval::{tokenize, LineEditor};
use tsh::exec::{Executor, Outcome};
use tsh::state::{Configuration, ShellState};

#[derive(Parser, Debug)]
#[command(name = "tsh", version, about = "A small line-oriented command interpreter")]
struct Cli {
    /// Configuration file to read instead of ~/.config/tsh/config.tsh
    #[arg(long)]
    config: Option<PathBuf>,
    /// File to append log records to; nothing is logged without one
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Most verbose level of log record to write
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
    /// Run a single line and exit with the status of its last command
    #[arg(short = 'c', value_name = "LINE")]
    command: Option<String>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    // The ShellState type stores the state that survives between lines: the configuration
    // and whether the last line succeeded
    let mut shell = ShellState::new(load_config(cli.config.as_deref())?);
    // The Executor type turns a line's tokens into running processes
    let executor = Executor::new(&shell.config);

    if let Some(line) = cli.command {
        return Ok(match executor.run(&tokenize(&line)) {
            Outcome::Continue(status) => exit_code(status.code()),
            Outcome::Exit => ExitCode::SUCCESS,
        });
    }

    // The LineEditor type is responsible for reading lines of input from the user and storing history
    let mut line_editor = LineEditor::new(&shell.config)?;
    log::info!("Interactive session started");

    while let Some(line) = line_editor.prompt_and_read_line(&shell) {
        match executor.run(&tokenize(&line)) {
            Outcome::Continue(status) => shell.last_command_succeeded = status.success(),
            Outcome::Exit => break,
        }
    }

    log::info!("Interactive session ended");
    Ok(ExitCode::SUCCESS)
}

fn load_config(path: Option<&std::path::Path>) -> Result<Configuration> {
    match path {
        Some(path) => Configuration::from_file(path)
            .with_context(|| format!("Could not load configuration from {}", path.display())),
        None => match Configuration::default_path() {
            Some(path) => Ok(Configuration::from_file(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring configuration file {}: {}", path.display(), e);
                Configuration::default()
            })),
            None => Ok(Configuration::default()),
        },
    }
}

// Log records go to a file, since the terminal belongs to the commands being run
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(cli.log_level, config, file).context("Could not initialize logging")?;

    Ok(())
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

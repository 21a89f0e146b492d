mod config;
mod shell;

pub use config::Configuration;
pub use shell::ShellState;

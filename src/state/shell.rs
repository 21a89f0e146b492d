use crossterm::style::Stylize;

use super::config::Configuration;

/// Represents the shell state and provides methods for interacting with it
pub struct ShellState {
    pub config: Configuration,
    pub last_command_succeeded: bool,
}

impl ShellState {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            last_command_succeeded: true,
        }
    }

    /// Generates the prompt string used by the `LineEditor`
    pub fn generate_prompt(&self) -> String {
        let user = std::env::var("USER").unwrap_or_else(|_| String::from("?"));
        let host = nix::unistd::gethostname()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| String::from("localhost"));
        let cwd = std::env::current_dir()
            .map(|cwd| collapse(&cwd))
            .unwrap_or_else(|_| String::from("?"));

        let prompt_tick = match self.last_command_succeeded {
            true => ":".green(),
            false => ":".red(),
        }
        .bold();

        format!("{}@{} {}{} ", user.dark_blue(), host, cwd, prompt_tick)
    }
}

// Shortens a directory to its final component, keeping the leading slash
fn collapse(path: &std::path::Path) -> String {
    match path.file_name() {
        Some(name) => format!("/{}", name.to_string_lossy()),
        None => String::from("/"),
    }
}

use std::path::PathBuf;

use anyhow::Result;
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

use crate::state::{Configuration, ShellState};

/// Reads lines of input from the user, with history and line-editing provided by `rustyline`
pub struct LineEditor {
    editor: DefaultEditor,
    history_file: Option<PathBuf>,
}

impl LineEditor {
    /// Creates a `LineEditor`, loading the history file named by the configuration if there is one
    pub fn new(config: &Configuration) -> Result<Self> {
        let mut builder = Config::builder().history_ignore_space(true);
        if let Some(limit) = config.history_limit {
            builder = builder.max_history_size(limit)?;
        }

        let mut editor = DefaultEditor::with_config(builder.build())?;
        if let Some(path) = &config.history_file {
            if editor.load_history(path).is_err() {
                log::info!("No existing history file at {}, starting fresh", path.display());
            }
        }

        Ok(Self {
            editor,
            history_file: config.history_file.clone(),
        })
    }

    /// Prompts the user and reads a line of input
    /// Returns `None` once the user signals end-of-input
    pub fn prompt_and_read_line(&mut self, shell: &ShellState) -> Option<String> {
        loop {
            match self.editor.readline(&shell.generate_prompt()) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    // * This fails in the case of a line that is already in the history,
                    // * or if the history is full, neither of which need handling
                    let _ = self.editor.add_history_entry(line.as_str());
                    self.save_history();

                    return Some(line);
                }
                // Ctrl-C abandons the current line and reprompts
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return None,
                Err(e) => {
                    log::error!("Line editor failed: {}", e);
                    eprintln!("{}", format!("Unhandled error while line-editing: {}", e).red());
                    return None;
                }
            }
        }
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                log::warn!("Failed to save history to {}: {}", path.display(), e);
            }
        }
    }
}

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use fs_err::File;

use crate::errors::{Handle, Result};

/// Represents any settings for the shell, all of which can be configured by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Whether or not to print error messages when a command fails
    pub show_errors: bool,
    /// Whether `&&` skips the next command when the previous one failed
    pub short_circuit: bool,
    /// Where to persist line-editor history, if anywhere
    pub history_file: Option<PathBuf>,
    /// How many lines of history to keep
    pub history_limit: Option<usize>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            show_errors: true,
            short_circuit: true,
            history_file: None,
            history_limit: None,
        }
    }
}

impl Configuration {
    /// Scans a configuration file for settings and updates the configuration accordingly
    pub fn from_file(filename: &Path) -> Result<Self> {
        let file = File::open(filename)
            .replace_err(|| state_err!(FailedToOpenConfigFile: filename))?;

        Self::from_reader(BufReader::new(file), filename)
    }

    /// The configuration file used when none is given explicitly, if it exists
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        let path = PathBuf::from(home).join(".config/tsh/config.tsh");
        path.exists().then_some(path)
    }

    fn from_reader<R: BufRead>(reader: R, filename: &Path) -> Result<Self> {
        // Relative paths in the file are resolved against the file's own directory
        let dirname = filename.parent().unwrap_or(Path::new("."));
        let mut config = Self::default();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line
                .replace_err(|| state_err!(FailedToReadConfigFile: filename, line_number))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line
                .split_once(": ")
                .replace_err(|| state_err!(FailedToReadConfigFile: filename, line_number))?;
            let (key, value) = (key.trim(), value.trim());

            match key {
                "show-errors" => config.show_errors = parse_bool(key, value)?,
                "short-circuit" => config.short_circuit = parse_bool(key, value)?,
                "history-file" => config.history_file = Some(dirname.join(value)),
                "history-limit" => {
                    if value == "false" {
                        config.history_limit = None;
                    } else {
                        let limit = value
                            .parse::<usize>()
                            .replace_err(|| state_err!(InvalidConfigValue: key, value))?;
                        config.history_limit = Some(limit);
                    }
                }
                _ => return Err(state_err!(UnknownConfigKey: key)),
            }
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse::<bool>()
        .replace_err(|| state_err!(InvalidConfigValue: key, value))
}

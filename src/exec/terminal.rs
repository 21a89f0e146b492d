use std::io::{stdin, IsTerminal};

use nix::sys::termios::{self, OutputFlags, SetArg, Termios};

use crate::errors::{Handle, Result};

/// Turns off the terminal driver's output post-processing (`OPOST`) while it is alive
/// The attributes saved on construction are written back when the guard is dropped,
/// so every way out of a pipeline run restores the terminal
pub struct OutputProcessing {
    saved: Option<Termios>,
}

impl OutputProcessing {
    /// Suspends output post-processing on the controlling terminal
    /// When standard input is not a terminal nothing is changed and the guard does nothing
    pub fn suspend() -> Self {
        match disable_post_processing() {
            Ok(saved) => Self { saved: Some(saved) },
            Err(e) => {
                log::debug!("Output post-processing left as-is: {}", e);
                Self { saved: None }
            }
        }
    }
}

impl Drop for OutputProcessing {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            if let Err(e) = termios::tcsetattr(stdin(), SetArg::TCSAFLUSH, &saved) {
                log::warn!("Failed to restore terminal attributes: {}", e);
            }
        }
    }
}

fn disable_post_processing() -> Result<Termios> {
    let stdin = stdin();
    if !stdin.is_terminal() {
        return Err(terminal_err!(NotATerminal));
    }

    let saved = termios::tcgetattr(&stdin).replace_err(|| terminal_err!(FailedToReadAttributes))?;
    let mut attributes = saved.clone();
    attributes.output_flags.remove(OutputFlags::OPOST);
    termios::tcsetattr(&stdin, SetArg::TCSAFLUSH, &attributes)
        .replace_err(|| terminal_err!(FailedToWriteAttributes))?;

    Ok(saved)
}

mod builtins;
mod executable;
mod pipeline;
mod terminal;

pub use executable::Status;
pub use pipeline::{Executor, Outcome};
pub use terminal::OutputProcessing;

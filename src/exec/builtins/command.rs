use crate::errors::Result;

/// What the interpreter should do after a builtin has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinAction {
    Continue,
    Exit,
}

/// Represents a builtin function and its name
pub struct Builtin {
    pub name: &'static str,
    function: fn(&[&str]) -> Result<BuiltinAction>,
}

impl Builtin {
    pub const fn new(name: &'static str, function: fn(&[&str]) -> Result<BuiltinAction>) -> Self {
        Self { name, function }
    }

    /// Runs the builtin with the full argument vector, command name included
    pub fn run(&self, argv: &[&str]) -> Result<BuiltinAction> {
        (self.function)(argv)
    }
}

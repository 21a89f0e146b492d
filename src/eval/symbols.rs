use strum::{Display, EnumString};

// Characters with special meaning to the tokenizer
pub const WHITESPACE: char = ' ';
pub const DOUBLE_QUOTE: char = '"';
pub const BACKSLASH: char = '\\';

/// A token whose text has special meaning to the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Operator {
    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "|")]
    Pipe,
    #[strum(serialize = ">")]
    RedirectOut,
    #[strum(serialize = "<")]
    RedirectIn,
}

impl Operator {
    /// Classifies a token, returning `None` for ordinary command words
    pub fn parse(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

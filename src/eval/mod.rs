pub mod readline;
mod symbols;
mod tokenizer;

pub use readline::LineEditor;
pub use symbols::Operator;
pub use tokenizer::{tokenize, Tokens};

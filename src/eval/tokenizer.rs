use super::symbols::{BACKSLASH, DOUBLE_QUOTE, WHITESPACE};

/// The ordered tokens of one input line
/// Reading past the last token yields `None`, which marks the end of the sequence,
/// so an empty-string argument is never mistaken for the end of input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    tokens: Vec<String>,
}

impl Tokens {
    /// Returns the token at `index`, or `None` once the end of the sequence is reached
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|t| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.as_str())
    }
}

impl From<Vec<String>> for Tokens {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

impl From<Vec<&str>> for Tokens {
    fn from(tokens: Vec<&str>) -> Self {
        Self {
            tokens: tokens.into_iter().map(String::from).collect(),
        }
    }
}

impl PartialEq<Vec<&str>> for Tokens {
    fn eq(&self, other: &Vec<&str>) -> bool {
        self.tokens.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == *b)
    }
}

/// Splits a line of input into tokens
/// Spaces separate tokens unless they appear between double quotes, which are themselves dropped
/// Backslash escapes are honored both inside and outside of quotes
pub fn tokenize(input: &str) -> Tokens {
    let mut curr_token = String::new();
    let mut tokens: Vec<String> = Vec::new();

    let mut characters = input.chars();
    let mut in_quotes = false;

    while let Some(character) = characters.next() {
        match character {
            DOUBLE_QUOTE => in_quotes = !in_quotes,
            BACKSLASH => {
                // * A trailing backslash has nothing to escape and is dropped
                if let Some(escaped) = characters.next() {
                    push_escaped(&mut curr_token, escaped);
                }
            }
            WHITESPACE if !in_quotes => delimit_token(&mut tokens, &mut curr_token),
            _ => curr_token.push(character),
        }
    }

    delimit_token(&mut tokens, &mut curr_token);

    Tokens { tokens }
}

// Appends the character sequence represented by an escaped character
fn push_escaped(curr_token: &mut String, escaped: char) {
    match escaped {
        'n' => curr_token.push_str("\r\n"),
        'r' => curr_token.push('\r'),
        // * Quotes and backslashes lose their special meaning; any other escaped character,
        // * including a space, is passed through as-is and never splits the token
        _ => curr_token.push(escaped),
    }
}

fn delimit_token(tokens: &mut Vec<String>, curr_token: &mut String) {
    if !curr_token.is_empty() {
        tokens.push(std::mem::take(curr_token));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_correct_tokens_for_plain_words() {
        //given
        let input = "echo hello world";

        //when
        let tokens = tokenize(input);

        //then
        assert_eq!(tokens, vec!["echo", "hello", "world"]);
        assert_eq!(tokens.get(3), None);
    }

    #[test]
    fn return_correct_token_with_quoted_space() {
        //given
        let input = "echo \"a b\" c";

        //when
        let tokens = tokenize(input);

        //then
        assert_eq!(tokens, vec!["echo", "a b", "c"]);
    }

    #[test]
    fn return_correct_token_with_escaped_backslash() {
        //given
        let input = "echo a\\\\b";

        //when
        let tokens = tokenize(input);

        //then
        assert_eq!(tokens, vec!["echo", "a\\b"]);
    }

    #[test]
    fn return_correct_token_with_escaped_newline_and_return() {
        let tokens = tokenize("printf a\\nb\\r");

        assert_eq!(tokens, vec!["printf", "a\r\nb\r"]);
    }

    #[test]
    fn return_correct_token_with_escaped_quotes() {
        let tokens = tokenize("echo \\\"hi\\' \"x\\\"y\"");

        assert_eq!(tokens, vec!["echo", "\"hi'", "x\"y"]);
    }

    #[test]
    fn escaped_space_does_not_split() {
        let tokens = tokenize("touch my\\ file");

        assert_eq!(tokens, vec!["touch", "my file"]);
    }

    #[test]
    fn unknown_escape_passes_character_through() {
        let tokens = tokenize("echo \\q\\$");

        assert_eq!(tokens, vec!["echo", "q$"]);
    }

    #[test]
    fn trailing_backslash_is_dropped() {
        let tokens = tokenize("echo a\\");

        assert_eq!(tokens, vec!["echo", "a"]);
    }

    #[test]
    fn consecutive_spaces_are_skipped() {
        let tokens = tokenize("   ls    -l   ");

        assert_eq!(tokens, vec!["ls", "-l"]);
    }

    #[test]
    fn empty_and_blank_lines_yield_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("     ").is_empty());
        assert_eq!(tokenize("  ").get(0), None);
    }

    #[test]
    fn empty_quotes_yield_no_token() {
        let tokens = tokenize("echo \"\" done");

        assert_eq!(tokens, vec!["echo", "done"]);
    }

    #[test]
    fn operators_are_separate_tokens_only_when_spaced() {
        let tokens = tokenize("ls | wc -l && echo ok > out.txt");

        assert_eq!(
            tokens,
            vec!["ls", "|", "wc", "-l", "&&", "echo", "ok", ">", "out.txt"]
        );
        assert_eq!(tokenize("a|b"), vec!["a|b"]);
    }

    #[test]
    fn quoted_operator_keeps_its_text() {
        let tokens = tokenize("echo \"a | b\"");

        assert_eq!(tokens, vec!["echo", "a | b"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        let tokens = tokenize("echo \"a  b");

        assert_eq!(tokens, vec!["echo", "a  b"]);
    }

    #[test]
    fn long_tokens_grow_without_corruption() {
        //given
        let long_word = "x".repeat(10_000);
        let input = format!("first {long_word} last");

        //when
        let tokens = tokenize(&input);

        //then
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens.get(0), Some("first"));
        assert_eq!(tokens.get(1), Some(long_word.as_str()));
        assert_eq!(tokens.get(2), Some("last"));
    }

    #[test]
    fn rejoining_plain_tokens_collapses_whitespace() {
        let lines = ["ls -la /tmp", "  cat   a.txt b.txt ", "x", "one  two   three"];

        for line in lines {
            let rejoined = tokenize(line).iter().collect::<Vec<_>>().join(" ");
            let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
            assert_eq!(rejoined, collapsed, "line: {line:?}");
        }
    }
}

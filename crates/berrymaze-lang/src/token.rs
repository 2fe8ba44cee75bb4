//! Program text tokenization.

/// One lowercased token and its index in the token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Position in the token stream, used for error reporting.
    pub index: usize,
    /// Lowercased token text.
    pub text: String,
}

impl Token {
    /// Whether the token text equals `s`.
    pub fn is(&self, s: &str) -> bool {
        self.text == s
    }
}

/// Split program text into tokens.
///
/// - Input is lowercased
/// - Whitespace separates tokens
/// - `{`, `}` and `;` are always tokens of their own
/// - Empty tokens are dropped
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in input.chars() {
        match ch {
            '{' | '}' | ';' => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                words.push(ch.to_string());
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            c => current.extend(c.to_lowercase()),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .into_iter()
        .enumerate()
        .map(|(index, text)| Token { index, text })
        .collect()
}

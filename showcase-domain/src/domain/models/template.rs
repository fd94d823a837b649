use std::{collections::HashMap, fmt};

use strum::{Display, EnumString};

const TOKEN_DELIMITER: char = '%';

/// Names of the templates served by the template repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum TemplateName {
    #[strum(serialize = "bio")]
    Bio,
    #[strum(serialize = "bio-link")]
    BioLink,
}

/// Template text containing `%key%` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichTextTemplate {
    source: String,
}

impl RichTextTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Substitutes every `%key%` token whose key is present in `values`.
    ///
    /// Substitution is a single pass: inserted values are never scanned for
    /// further tokens. Tokens without a value are left in place verbatim, and
    /// a `%` that does not open a well-formed token is copied through.
    pub fn evaluate(&self, values: &HashMap<String, String>) -> RichText {
        let mut rendered = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find(TOKEN_DELIMITER) {
            rendered.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            match after.find(TOKEN_DELIMITER) {
                Some(end) if is_token_key(&after[..end]) => {
                    let key = &after[..end];
                    match values.get(key) {
                        Some(value) => {
                            rendered.push_str(value);
                            rest = &after[end + 1..];
                        }
                        None => {
                            tracing::debug!(key, "unresolved template token");
                            rendered.push(TOKEN_DELIMITER);
                            rendered.push_str(key);
                            // The closing `%` may open the next token.
                            rest = &after[end..];
                        }
                    }
                }
                _ => {
                    rendered.push(TOKEN_DELIMITER);
                    rest = after;
                }
            }
        }

        rendered.push_str(rest);
        RichText(rendered)
    }
}

fn is_token_key(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Text produced by evaluating a [`RichTextTemplate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RichText(String);

impl RichText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

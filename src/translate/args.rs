//! Ordered argument list handed to the downtime executable

use serde::Serialize;
use shell_escape::escape;
use std::borrow::Cow;
use std::fmt;

/// Command-line tokens in emission order.
///
/// Flags with a value are followed directly by that value; boolean flags are
/// a single bare token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArgumentList {
    tokens: Vec<String>,
}

impl ArgumentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bare boolean flag
    pub fn push_flag(&mut self, flag: &str) {
        self.tokens.push(flag.to_string());
    }

    /// Append a flag followed by its value
    pub fn push_option(&mut self, flag: &str, value: impl Into<String>) {
        self.tokens.push(flag.to_string());
        self.tokens.push(value.into());
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }

    /// True if `flag` appears as a token
    pub fn contains(&self, flag: &str) -> bool {
        self.tokens.iter().any(|t| t == flag)
    }

    /// Value following the first occurrence of `flag`
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.tokens
            .iter()
            .position(|t| t == flag)
            .and_then(|i| self.tokens.get(i + 1))
            .map(String::as_str)
    }

    /// All values following occurrences of `flag`, in order
    pub fn values_of<'a>(&'a self, flag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tokens
            .windows(2)
            .filter(move |pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
    }

    /// Join the tokens into one shell-quoted string.
    ///
    /// Macro placeholders are quoted like any other token; the monitoring core
    /// substitutes them textually before the shell sees the line.
    pub fn to_command_line(&self) -> String {
        self.tokens
            .iter()
            .map(|t| escape(Cow::Borrowed(t.as_str())).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_line())
    }
}

//! Access token handling and interactive input.
//!
//! The token is an opaque bearer credential. It is taken from the command
//! line, the environment, or a prompt, and is never embedded in the binary.

use std::fmt;

use rustyline::DefaultEditor;

use crate::error::{DropboxError, Result};

/// Environment variable consulted for the access token.
pub const TOKEN_ENV_VAR: &str = "DROPBOX_ACCESS_TOKEN";

/// Shown when no token was configured. The prompt echoes what is typed.
pub const TOKEN_PROMPT: &str =
    "Enter Dropbox access token (input is shown; set DROPBOX_ACCESS_TOKEN to skip): ";

/// A Dropbox OAuth2 access token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token, rejecting blank input.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(DropboxError::MissingToken);
        }
        Ok(Self(token))
    }

    /// Use `provided` if present, otherwise ask on the terminal.
    pub fn resolve(provided: Option<String>) -> Result<Self> {
        match provided {
            Some(token) => Self::new(token),
            None => Self::new(prompt_line(TOKEN_PROMPT)?),
        }
    }

    /// The raw token, for the `Authorization` header only.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Read one line from the terminal (or stdin when it is not a TTY).
pub fn prompt_line(prompt: &str) -> Result<String> {
    let mut editor = DefaultEditor::new()?;
    let line = editor.readline(prompt)?;
    Ok(line.trim().to_string())
}

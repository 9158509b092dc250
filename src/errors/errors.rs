use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.internal_error, .position))]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Only scan errors carry a meaningful byte offset.
fn describe(error: &ErrorImpl, position: &Position) -> String {
    match error {
        ErrorImpl::UnrecognisedToken { .. } => format!("{} at position {}", error, position.0),
        _ => error.to_string(),
    }
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InvalidPattern { .. } => "InvalidPattern",
            ErrorImpl::ShadowedPattern { .. } => "ShadowedPattern",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { token } if token.starts_with('"') => ErrorTip::Suggestion(
                String::from("Unterminated string literal, is the closing `\"` missing?"),
            ),
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::InvalidPattern { message, .. } => {
                ErrorTip::Suggestion(format!("Pattern failed to compile: {}", message))
            }
            ErrorImpl::ShadowedPattern { spelling, shadowed_by, .. } => ErrorTip::Suggestion(format!(
                "Move the rule for `{}` above rule #{} or use longest-match dispatch",
                spelling, shadowed_by
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    /// No rule matches at the cursor. `token` is the offending character.
    #[error("unrecognized token")]
    UnrecognisedToken { token: String },
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
    /// `rule` and `shadowed_by` are indices into the pattern table.
    #[error("rule #{rule} for {spelling:?} is unreachable, shadowed by rule #{shadowed_by}")]
    ShadowedPattern { spelling: String, rule: usize, shadowed_by: usize },
}

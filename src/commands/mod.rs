//! Hierarchical command organization and routing
//!
//! Commands live in a tree: leaves wrap a handler type, groups hold an ordered list of
//! children. The tree is stored in an arena ([`tree::Tree`]) where every node keeps a
//! non-owning index to its parent, which is only used to rebuild the node's path for
//! usage text.
//!
//! Routing consumes one token per group level. Whatever is left when a leaf is reached is
//! handed to the leaf's handler untouched.

use thiserror::Error;

pub mod group;
pub mod handler;
pub mod tree;

/// Error produced by a handler or by the argument parser in front of it
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Tokens that request usage text instead of running anything
pub const HELP_TOKENS: [&str; 3] = ["help", "-h", "--help"];

/// Errors that can occur while dispatching or validating a command tree
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No child of the group at `path` is named `token`
    #[error("command not found")]
    NotFound { token: String, path: String },
    /// Failure raised by a handler, passed through unchanged
    #[error(transparent)]
    Handler(HandlerError),
    #[error("Duplicate command name `{name}` in `{path}`")]
    DuplicateName { path: String, name: String },
    #[error("Command with an empty name under `{path}`")]
    EmptyName { path: String },
}

impl DispatchError {
    /// The failure returned by the handler, if this error came from one.
    #[must_use]
    pub fn handler_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            DispatchError::Handler(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// `true` when `tokens` is exactly one help token
#[must_use]
pub fn is_help_request<S: AsRef<str>>(tokens: &[S]) -> bool {
    matches!(tokens, [only] if HELP_TOKENS.contains(&only.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_request_detection() {
        assert!(is_help_request(&["help"]));
        assert!(is_help_request(&["-h"]));
        assert!(is_help_request(&["--help"]));
        assert!(!is_help_request::<&str>(&[]));
        assert!(!is_help_request(&["add"]));
        assert!(!is_help_request(&["add", "--help"]));
        assert!(!is_help_request(&["--help", "extra"]));
    }

    #[test]
    fn test_not_found_message_is_flat() {
        let err = DispatchError::NotFound {
            token: "xxx".to_string(),
            path: "test".to_string(),
        };
        assert_eq!(err.to_string(), "command not found");
    }

    #[test]
    fn test_handler_error_is_transparent() {
        let err = DispatchError::Handler("disk full".into());
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(err.handler_error().unwrap().to_string(), "disk full");
    }
}

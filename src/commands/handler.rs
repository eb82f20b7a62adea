use clap::{CommandFactory, FromArgMatches, Parser};

use crate::commands::HandlerError;

/// A unit of behavior attached to a leaf of the command tree.
///
/// A fresh value is built with [`Default`] for every dispatch, so handlers never see state
/// left behind by an earlier invocation.
pub trait Handler: Default + 'static {
    /// Run with the tokens left over after routing.
    ///
    /// `path` is the space-joined chain of names from the root down to this command.
    ///
    /// # Errors
    ///
    /// Any error is returned to the caller of `Dispatcher::run` unchanged.
    fn run(&mut self, path: &str, tokens: &[String]) -> Result<(), HandlerError>;

    /// Usage text shown for `<path> --help`.
    #[must_use]
    fn usage(path: &str) -> String {
        format!("Usage: {path} [arguments]")
    }
}

/// A handler that wants its tokens bound to a typed structure first.
///
/// Every `ArgsHandler` is also a [`Handler`]: the adapter parses the tokens into
/// [`ArgsHandler::Args`] and then calls [`ArgsHandler::run`].
pub trait ArgsHandler: Default + 'static {
    type Args: Arguments;

    /// # Errors
    ///
    /// Any error is returned to the caller of `Dispatcher::run` unchanged.
    fn run(&mut self, args: Self::Args) -> Result<(), HandlerError>;
}

impl<T: ArgsHandler> Handler for T {
    fn run(&mut self, path: &str, tokens: &[String]) -> Result<(), HandlerError> {
        let args = <T::Args as Arguments>::parse(path, tokens)?;
        ArgsHandler::run(self, args)
    }

    fn usage(path: &str) -> String {
        <T::Args as Arguments>::usage(path)
    }
}

/// Binding of raw tokens to a typed argument structure.
///
/// Implemented for every [`clap::Parser`]; the command path stands in for the binary name so
/// clap's messages read `Usage: <root> <group> <command> ...`.
pub trait Arguments: Sized {
    /// # Errors
    ///
    /// Returns the parser's error for unknown flags, missing operands and the like.
    fn parse(path: &str, tokens: &[String]) -> Result<Self, clap::Error>;

    fn usage(path: &str) -> String;
}

impl<T: Parser> Arguments for T {
    fn parse(path: &str, tokens: &[String]) -> Result<Self, clap::Error> {
        let mut command = T::command().bin_name(path.to_string());
        let matches = command.try_get_matches_from_mut(
            std::iter::once(path.to_string()).chain(tokens.iter().cloned()),
        )?;
        T::from_arg_matches(&matches).map_err(|e| e.format(&mut command))
    }

    fn usage(path: &str) -> String {
        let mut command = T::command().bin_name(path.to_string());
        command.render_help().to_string().trim_end().to_string()
    }
}

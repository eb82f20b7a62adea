mod handlers;

use std::process::ExitCode;

use clap::Parser;
use log::debug;

use cmdtree::{DispatchError, Dispatcher};

use crate::handlers::{Clean, Create, PlatformAdd, PluginAdd, PluginReset};

#[derive(Parser, Debug)]
#[command(
    name = "cmdtree",
    about = "Demo project tool built on a command tree",
    disable_help_flag = true
)]
struct Cli {
    /// Log file path (enables file logging in addition to stderr)
    #[arg(long)]
    log_file: Option<String>,

    /// Print the command tree as JSON and exit
    #[arg(long)]
    describe: bool,

    /// Command path and its arguments, e.g. `plugin add files --save`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn build() -> Dispatcher {
    let mut dispatcher = Dispatcher::new("cmdtree", Some("Demo project tool"));
    dispatcher
        .add::<Clean>("clean", Some("Remove build output"))
        .add::<Create>("create", Some("Create a new project"))
        .add_group("platform", Some("Manage target platforms"), |platform| {
            platform.add::<PlatformAdd>("add", None);
        })
        .add_group("plugin", Some("Manage plugins"), |plugin| {
            plugin
                .add::<PluginAdd>("add", None)
                .add::<PluginReset>("reset", Some("Reset all plugins"));
        });
    dispatcher
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .as_ref()
        .map(std::fs::File::create)
        .transpose()?;
    cmdtree::logger::init(log_file)?;

    let dispatcher = build();
    dispatcher.validate()?;

    if cli.describe {
        println!("{}", dispatcher.describe().to_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    debug!("Running with tokens {:?}", cli.tokens);
    match dispatcher.run(&cli.tokens) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(DispatchError::Handler(err)) => match err.downcast::<clap::Error>() {
            Ok(clap_err) => {
                let _ = clap_err.print();
                Ok(ExitCode::from(u8::try_from(clap_err.exit_code()).unwrap_or(2)))
            }
            Err(other) => Err(other as Box<dyn std::error::Error>),
        },
        Err(e) => Err(e.into()),
    }
}

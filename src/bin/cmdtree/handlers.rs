use clap::Parser;

use cmdtree::{ArgsHandler, Handler, HandlerError};

#[derive(Default)]
pub struct Clean;

impl Handler for Clean {
    fn run(&mut self, path: &str, tokens: &[String]) -> Result<(), HandlerError> {
        if let Some(extra) = tokens.first() {
            return Err(format!("`{path}` takes no arguments, got `{extra}`").into());
        }
        println!("Cleaning build output");
        Ok(())
    }

    fn usage(path: &str) -> String {
        format!("Remove build output\n\nUsage: {path}")
    }
}

#[derive(Parser, Debug)]
#[command(about = "Create a new project")]
pub struct CreateArgs {
    /// Project name
    pub name: String,
}

#[derive(Default)]
pub struct Create;

impl ArgsHandler for Create {
    type Args = CreateArgs;

    fn run(&mut self, args: CreateArgs) -> Result<(), HandlerError> {
        println!("Creating project {}", args.name);
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Name of the platform or plugin
    pub name: String,

    /// Record the addition in the project file
    #[arg(long)]
    pub save: bool,
}

#[derive(Default)]
pub struct PlatformAdd;

impl ArgsHandler for PlatformAdd {
    type Args = AddArgs;

    fn run(&mut self, args: AddArgs) -> Result<(), HandlerError> {
        println!("Adding platform {}{}", args.name, saved_suffix(args.save));
        Ok(())
    }
}

#[derive(Default)]
pub struct PluginAdd;

impl ArgsHandler for PluginAdd {
    type Args = AddArgs;

    fn run(&mut self, args: AddArgs) -> Result<(), HandlerError> {
        println!("Adding plugin {}{}", args.name, saved_suffix(args.save));
        Ok(())
    }
}

#[derive(Default)]
pub struct PluginReset;

impl Handler for PluginReset {
    fn run(&mut self, _path: &str, _tokens: &[String]) -> Result<(), HandlerError> {
        println!("Resetting all plugins");
        Ok(())
    }
}

fn saved_suffix(save: bool) -> &'static str {
    if save { " (saved)" } else { "" }
}

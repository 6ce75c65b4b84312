//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`show`], or [`health`]. Each handler
//! lives in its own submodule.

pub mod health;
pub mod run;
pub mod show;

use crate::cli::{Cli, Commands};
use crate::error::EchoError;

pub async fn dispatch(cli: Cli) -> Result<(), EchoError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(args).await,
        Some(Commands::Show(ref args)) => show::execute(args),
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  config-echo v{version} \u{2014} reports deployment configuration over HTTP\n\n  \
         No command provided. To get started:\n\n    \
         config-echo run                   Serve GET /config on 0.0.0.0:8000\n    \
         config-echo show                  Print the current snapshot\n    \
         config-echo --help                See all commands and options\n"
    );
}

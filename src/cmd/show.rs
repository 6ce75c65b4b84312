//! `config-echo show` — print the snapshot `GET /config` would return.

use crate::cli::ShowArgs;
use crate::env::{EnvLookup, ProcessEnv};
use crate::error::EchoError;
use crate::snapshot::ConfigSnapshot;

pub fn execute(args: &ShowArgs) -> Result<(), EchoError> {
    println!("{}", render(&ProcessEnv, args.pretty)?);
    Ok(())
}

fn render(env: &dyn EnvLookup, pretty: bool) -> Result<String, EchoError> {
    let snapshot = ConfigSnapshot::capture(env);
    let out = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    Ok(out)
}

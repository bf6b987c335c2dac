// `quire register` — create an account on the remote store.

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use quire_common::protocol::RegisterRequest;
use quire_editor::config::GlobalConfig;
use quire_editor::remote::RemoteStore;

use crate::commands::{block_on, remote_store};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Display name; falls back to `display_name` from the config file.
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RegisterResult {
    name: String,
    email: String,
}

pub fn run(args: RegisterArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let name = args
        .name
        .or_else(|| GlobalConfig::load().display_name)
        .context("no display name: pass --name or set `display_name` in the config")?;

    let request =
        RegisterRequest { name: name.clone(), email: args.email.clone(), password: args.password };

    let result = block_on(async {
        let store = remote_store()?;
        store.register(&request).await?;
        anyhow::Ok(())
    });

    match result {
        Ok(()) => {
            let value = RegisterResult { name, email: args.email };
            output::print_output(format, &value, |v| {
                format!("Registered {} <{}>; you are now signed in.", v.name, v.email)
            })?;
            Ok(())
        }
        Err(e) => {
            output::print_error(format, "REGISTER_FAILED", &format!("{e:#}"));
            Err(e)
        }
    }
}

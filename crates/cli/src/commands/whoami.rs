// `quire whoami` — show the signed-in account.

use clap::Args;
use serde::Serialize;

use quire_editor::remote::{RemoteError, RemoteStore};

use crate::commands::{block_on, remote_store};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct WhoamiArgs {
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct WhoamiResult {
    signed_in: bool,
    name: Option<String>,
    email: Option<String>,
}

pub fn run(args: WhoamiArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);

    let result = block_on(async {
        let store = remote_store()?;
        anyhow::Ok(store.me().await)
    });

    match result {
        Ok(Ok(user)) => {
            let value = WhoamiResult {
                signed_in: true,
                name: Some(user.name),
                email: Some(user.email),
            };
            output::print_output(format, &value, |v| {
                format!(
                    "{} <{}>",
                    v.name.as_deref().unwrap_or("?"),
                    v.email.as_deref().unwrap_or("?")
                )
            })?;
            Ok(())
        }
        // Not being signed in is an answer, not a failure.
        Ok(Err(RemoteError::Unauthorized)) => {
            let value = WhoamiResult { signed_in: false, name: None, email: None };
            output::print_output(format, &value, |_| "Not signed in.".to_string())?;
            Ok(())
        }
        Ok(Err(e)) => {
            output::print_error(format, "WHOAMI_FAILED", &format!("{e:#}"));
            Err(e.into())
        }
        Err(e) => {
            output::print_error(format, "WHOAMI_FAILED", &format!("{e:#}"));
            Err(e)
        }
    }
}

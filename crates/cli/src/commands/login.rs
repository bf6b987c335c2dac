// `quire login` — sign in and persist the bearer token.

use clap::Args;
use serde::Serialize;

use quire_common::protocol::LoginRequest;
use quire_editor::remote::RemoteStore;

use crate::commands::{block_on, remote_store};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct LoginResult {
    email: String,
    name: Option<String>,
}

pub fn run(args: LoginArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let request = LoginRequest { email: args.email.clone(), password: args.password };

    let result = block_on(async {
        let store = remote_store()?;
        let auth = store.login(&request).await?;
        anyhow::Ok(auth)
    });

    match result {
        Ok(auth) => {
            let value = LoginResult {
                email: args.email,
                name: auth.user.map(|user| user.name),
            };
            output::print_output(format, &value, |v| match &v.name {
                Some(name) => format!("Signed in as {} <{}>.", name, v.email),
                None => format!("Signed in as {}.", v.email),
            })?;
            Ok(())
        }
        Err(e) => {
            output::print_error(format, "LOGIN_FAILED", &format!("{e:#}"));
            Err(e)
        }
    }
}

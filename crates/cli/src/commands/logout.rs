// `quire logout` — best-effort remote logout, unconditional local clear.

use clap::Args;
use serde::Serialize;
use tracing::warn;

use quire_editor::credentials::{CredentialStore, KeyringCredentials};
use quire_editor::remote::RemoteStore;

use crate::commands::{block_on, remote_store};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct LogoutArgs {
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct LogoutResult {
    signed_out: bool,
}

pub fn run(args: LogoutArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);

    // The remote call may fail (network down, token already dead); the
    // local token goes away regardless.
    block_on(async {
        match remote_store() {
            Ok(store) => {
                if let Err(error) = store.logout().await {
                    warn!(%error, "remote logout failed; clearing local token anyway");
                }
            }
            Err(error) => warn!(%error, "could not build remote client; clearing local token"),
        }
    });
    KeyringCredentials.clear()?;

    output::print_output(format, &LogoutResult { signed_out: true }, |_| {
        "Signed out.".to_string()
    })?;
    Ok(())
}

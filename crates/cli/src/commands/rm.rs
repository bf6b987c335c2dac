// `quire rm` — delete a remote document.

use clap::Args;
use serde::Serialize;

use quire_editor::remote::RemoteStore;

use crate::commands::{block_on, remote_store};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct RmArgs {
    /// Remote document id (see `quire ls`).
    pub id: String,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RmResult {
    id: String,
    deleted: bool,
}

pub fn run(args: RmArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);

    let result = block_on(async {
        let store = remote_store()?;
        store.delete_file(&args.id).await?;
        anyhow::Ok(())
    });

    match result {
        Ok(()) => {
            let value = RmResult { id: args.id, deleted: true };
            output::print_output(format, &value, |v| format!("Deleted {}.", v.id))?;
            Ok(())
        }
        Err(e) => {
            output::print_error(format, "RM_FAILED", &format!("{e:#}"));
            Err(e)
        }
    }
}

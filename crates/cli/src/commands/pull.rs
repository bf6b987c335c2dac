// `quire pull` — download a remote document to a local file.
//
// The store has no fetch-by-id endpoint; like the original client, we pull
// the listing and pick the record out of it.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use quire_editor::remote::RemoteStore;

use crate::commands::{block_on, remote_store};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct PullArgs {
    /// Remote document id (see `quire ls`).
    pub id: String,

    /// Destination path; defaults to `<title>.txt` in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct PullResult {
    id: String,
    title: String,
    path: PathBuf,
}

pub fn run(args: PullArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);

    let result = block_on(async {
        let store = remote_store()?;
        let files = store.list_files().await?;
        let file = files
            .into_iter()
            .find(|file| file.id == args.id)
            .with_context(|| format!("no remote document with id `{}`", args.id))?;

        let path = args.out.clone().unwrap_or_else(|| PathBuf::from(format!("{}.txt", file.title)));
        std::fs::write(&path, &file.content)
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        anyhow::Ok(PullResult { id: file.id, title: file.title, path })
    });

    match result {
        Ok(value) => {
            output::print_output(format, &value, |v| {
                format!("Saved `{}` to `{}`.", v.title, v.path.display())
            })?;
            Ok(())
        }
        Err(e) => {
            output::print_error(format, "PULL_FAILED", &format!("{e:#}"));
            Err(e)
        }
    }
}

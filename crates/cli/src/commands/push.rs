// `quire push` — upload a local text file as a remote document.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use quire_common::protocol::SaveFileRequest;
use quire_editor::remote::RemoteStore;

use crate::commands::{block_on, remote_store};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct PushArgs {
    /// Local file to upload.
    pub path: PathBuf,

    /// Remote title; defaults to the file name without extension.
    #[arg(long)]
    title: Option<String>,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct PushResult {
    id: String,
    title: String,
}

pub fn run(args: PushArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);

    let result = block_on(async {
        let content = std::fs::read_to_string(&args.path)
            .with_context(|| format!("failed to read `{}`", args.path.display()))?;
        let title = args.title.clone().unwrap_or_else(|| {
            args.path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Untitled".to_string())
        });

        let store = remote_store()?;
        let saved = store.save_file(&SaveFileRequest { title, content }).await?;
        anyhow::Ok(PushResult { id: saved.id, title: saved.title })
    });

    match result {
        Ok(value) => {
            output::print_output(format, &value, |v| {
                format!("Uploaded `{}` as {}.", v.title, v.id)
            })?;
            Ok(())
        }
        Err(e) => {
            output::print_error(format, "PUSH_FAILED", &format!("{e:#}"));
            Err(e)
        }
    }
}

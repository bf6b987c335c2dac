// `quire ls` — list documents stored remotely.

use clap::Args;
use serde::Serialize;

use quire_common::types::RemoteFile;
use quire_editor::remote::RemoteStore;

use crate::commands::{block_on, remote_store};
use crate::output::{self, OutputFormat};

const PREVIEW_LEN: usize = 60;

#[derive(Debug, Args)]
pub struct LsArgs {
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct LsResult {
    pub files: Vec<RemoteFile>,
}

pub fn run(args: LsArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);

    let result = block_on(async {
        let store = remote_store()?;
        anyhow::Ok(LsResult { files: store.list_files().await? })
    });

    match result {
        Ok(value) => {
            output::print_output(format, &value, format_human)?;
            Ok(())
        }
        Err(e) => {
            output::print_error(format, "LS_FAILED", &format!("{e:#}"));
            Err(e)
        }
    }
}

fn format_human(result: &LsResult) -> String {
    if result.files.is_empty() {
        return "No documents in the remote store.".into();
    }

    let mut lines = Vec::new();
    lines.push(format!("{} document(s)", result.files.len()));
    for file in &result.files {
        lines.push(format!(
            "  {}  {} — updated {} — {}",
            file.id,
            file.title,
            file.updated_at.format("%Y-%m-%d %H:%M"),
            preview(&file.content)
        ));
    }
    lines.join("\n")
}

fn preview(content: &str) -> String {
    let flat: String = content.chars().map(|c| if c == '\n' { ' ' } else { c }).collect();
    if flat.chars().count() <= PREVIEW_LEN {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_LEN).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str, title: &str, content: &str) -> RemoteFile {
        RemoteFile {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn empty_listing_has_a_friendly_message() {
        let rendered = format_human(&LsResult { files: vec![] });
        assert_eq!(rendered, "No documents in the remote store.");
    }

    #[test]
    fn listing_shows_id_title_and_preview() {
        let rendered =
            format_human(&LsResult { files: vec![file("f1", "Notes", "line one\nline two")] });
        assert!(rendered.contains("1 document(s)"));
        assert!(rendered.contains("f1"));
        assert!(rendered.contains("Notes"));
        assert!(rendered.contains("line one line two"));
    }

    #[test]
    fn long_previews_are_truncated() {
        let long = "x".repeat(200);
        let rendered = format_human(&LsResult { files: vec![file("f1", "Big", &long)] });
        assert!(rendered.contains('…'));
        assert!(!rendered.contains(&long));
    }
}

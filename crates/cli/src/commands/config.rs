// `quire config` — show or change CLI configuration.

use clap::Args;
use serde::Serialize;

use quire_editor::config::GlobalConfig;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Set the remote store base URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Set the default display name used by `register`.
    #[arg(long)]
    display_name: Option<String>,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ConfigResult {
    api_url: String,
    display_name: Option<String>,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let mut config = GlobalConfig::load();

    let changed = args.api_url.is_some() || args.display_name.is_some();
    if let Some(api_url) = args.api_url {
        config.api_url = Some(api_url);
    }
    if let Some(display_name) = args.display_name {
        config.display_name = Some(display_name);
    }
    if changed {
        config.save()?;
    }

    let value = ConfigResult {
        api_url: config.api_url().to_string(),
        display_name: config.display_name.clone(),
    };
    output::print_output(format, &value, |v| {
        let mut lines = vec![format!("api_url = {}", v.api_url)];
        if let Some(name) = &v.display_name {
            lines.push(format!("display_name = {name}"));
        }
        lines.join("\n")
    })?;
    Ok(())
}

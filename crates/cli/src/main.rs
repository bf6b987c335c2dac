// quire CLI entry point.

use clap::Parser;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "quire", about = "Tabbed text documents, local and cloud")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::run(cli.command)
}

// CLI subcommand dispatch.

use std::future::Future;

use clap::Subcommand;

use quire_editor::config::GlobalConfig;
use quire_editor::credentials::KeyringCredentials;
use quire_editor::remote::HttpRemoteStore;

pub mod config;
pub mod login;
pub mod logout;
pub mod ls;
pub mod pull;
pub mod push;
pub mod register;
pub mod rm;
pub mod whoami;

#[derive(Subcommand)]
pub enum Command {
    /// Create an account on the remote store
    Register(register::RegisterArgs),
    /// Sign in and persist the bearer token
    Login(login::LoginArgs),
    /// Sign out and discard the bearer token
    Logout(logout::LogoutArgs),
    /// Show the signed-in account
    Whoami(whoami::WhoamiArgs),
    /// List documents stored remotely
    Ls(ls::LsArgs),
    /// Upload a local text file as a remote document
    Push(push::PushArgs),
    /// Download a remote document to a local file
    Pull(pull::PullArgs),
    /// Delete a remote document
    Rm(rm::RmArgs),
    /// Show or change CLI configuration
    Config(config::ConfigArgs),
}

pub fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Register(args) => register::run(args),
        Command::Login(args) => login::run(args),
        Command::Logout(args) => logout::run(args),
        Command::Whoami(args) => whoami::run(args),
        Command::Ls(args) => ls::run(args),
        Command::Push(args) => push::run(args),
        Command::Pull(args) => pull::run(args),
        Command::Rm(args) => rm::run(args),
        Command::Config(args) => config::run(args),
    }
}

/// Remote store client for the configured API, backed by the OS keychain.
pub(crate) fn remote_store() -> anyhow::Result<HttpRemoteStore<KeyringCredentials>> {
    let config = GlobalConfig::load();
    Ok(HttpRemoteStore::new(config.api_url(), KeyringCredentials)?)
}

/// Run a future to completion, reusing an ambient runtime when one exists.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle.block_on(future),
        Err(_) => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime should build")
            .block_on(future),
    }
}

use std::sync::Arc;

use clap::Parser;

mod cli_args;
mod cli_command;
mod modules;
#[cfg(test)]
mod tests;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::auth::{
    handle_login_command, handle_logout, load_id_token, KeyringStorage, MemoryStorage,
    SessionStorage,
};
use crate::modules::gateway::{GatewayClient, HttpTransport};
use crate::modules::system::{
    handle_config_command, load_config, resolve_context_name, save_config, CommandContext,
};
use tracing_subscriber::EnvFilter;

pub(crate) const DEFAULT_ADDR: &str = "https://127.0.0.1:5000";
pub(crate) const DEFAULT_CONTEXT: &str = "default";
pub(crate) const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
pub(crate) const DEFAULT_TENANT: &str = "common";
pub(crate) const EXPIRY_SKEW_SECONDS: i64 = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(cli.insecure)
        .build()?;
    let mut config = load_config()?;
    let context_arg = cli.context.clone();

    match cli.command {
        Command::Config(args) => {
            handle_config_command(args, &mut config)?;
            save_config(&config)?;
        }
        Command::Login(args) => {
            handle_login_command(args, context_arg, &mut config, keyring_storage)?;
            save_config(&config)?;
        }
        Command::Logout(args) => {
            handle_logout(args, context_arg, &config, keyring_storage)?;
        }
        command => {
            let context_name = resolve_context_name(context_arg, &config);
            let addr = cli
                .addr
                .or_else(|| {
                    config
                        .contexts
                        .get(&context_name)
                        .map(|ctx| ctx.addr.clone())
                })
                .unwrap_or_else(|| DEFAULT_ADDR.to_string());

            let transport = HttpTransport::new(client, addr, cli.insecure)?;

            let storage: Arc<dyn SessionStorage> = match cli.token {
                Some(token) => Arc::new(MemoryStorage::with_id_token(token)),
                None => keyring_storage(&context_name),
            };
            let access_token = load_id_token(storage.as_ref())?;
            if access_token.is_none() {
                tracing::info!(context = %context_name, "no identity token; sending anonymous requests");
            }
            let transport = transport.with_access_token(access_token);
            let ctx = CommandContext {
                gateway: GatewayClient::new(transport, storage),
            };

            handle_command(command, &ctx).await?;
        }
    }

    Ok(())
}

fn keyring_storage(context_name: &str) -> Arc<dyn SessionStorage> {
    Arc::new(KeyringStorage::new(context_name))
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .init();
    Ok(())
}

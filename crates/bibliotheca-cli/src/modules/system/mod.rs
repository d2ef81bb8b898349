mod actions;
pub(crate) mod args;
pub(crate) mod config;
pub(crate) mod http;
pub(crate) mod types;

pub(crate) use actions::{handle_graphql, handle_service};
pub(crate) use config::{
    ensure_secure_addr, handle_config_command, load_config, resolve_context_name, save_config,
};
pub(crate) use types::{AuthConfig, CliConfig, CommandContext};

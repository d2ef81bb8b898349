use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Create or update a context")]
    SetContext(SetContextArgs),
    #[command(about = "Set the active context")]
    UseContext(UseContextArgs),
    #[command(about = "Print the active context name")]
    CurrentContext,
    #[command(about = "List known context names")]
    GetContexts,
}

#[derive(Args)]
pub struct SetContextArgs {
    #[arg(help = "Context name")]
    pub name: String,
    #[arg(long, help = "Gateway base URL")]
    pub addr: Option<String>,
    #[arg(long, help = "Identity provider authority (e.g. https://login.microsoftonline.com)")]
    pub authority: Option<String>,
    #[arg(long, help = "Directory tenant")]
    pub tenant: Option<String>,
    #[arg(long, help = "Application (client) ID registered with the identity provider")]
    pub client_id: Option<String>,
    #[arg(long, help = "Redirect URI registered for the application")]
    pub redirect_uri: Option<String>,
    #[arg(long, help = "Resource the identity token is requested for")]
    pub resource: Option<String>,
}

#[derive(Args)]
pub struct UseContextArgs {
    #[arg(help = "Context name")]
    pub name: String,
}

#[derive(Args)]
pub struct ServiceArgs {
    #[command(subcommand)]
    pub command: ServiceCommand,
}

#[derive(Subcommand)]
pub enum ServiceCommand {
    #[command(about = "List services registered with the gateway")]
    List,
    #[command(about = "Show the current health of a service")]
    Health(ServiceHealthArgs),
}

#[derive(Args)]
pub struct ServiceHealthArgs {
    pub id: String,
}

#[derive(Args)]
pub struct GraphqlArgs {
    #[arg(help = "Query document", conflicts_with = "file")]
    pub query: Option<String>,
    #[arg(long, help = "Read the query document from a file")]
    pub file: Option<PathBuf>,
}

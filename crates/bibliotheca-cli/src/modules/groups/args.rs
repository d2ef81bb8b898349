use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Subcommand)]
pub enum GroupCommand {
    List,
    Get(GroupNameArgs),
    Create(GroupCreateArgs),
    Update(GroupUpdateArgs),
    Delete(GroupNameArgs),
}

#[derive(Args)]
pub struct GroupNameArgs {
    pub name: String,
}

#[derive(Args)]
pub struct GroupCreateArgs {
    #[arg(long, help = "JSON file with the group payload", required_unless_present = "name")]
    pub file: Option<PathBuf>,
    #[arg(long, conflicts_with = "file")]
    pub name: Option<String>,
    #[arg(long, conflicts_with = "file")]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct GroupUpdateArgs {
    pub name: String,
    #[arg(long, help = "JSON file with the group payload")]
    pub file: PathBuf,
}

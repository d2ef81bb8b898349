use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    #[command(about = "List projects, optionally filtered by group, tags or keywords")]
    List(ProjectListArgs),
    Get(ProjectIdArgs),
    Create(ProjectCreateArgs),
    Update(ProjectUpdateArgs),
    Delete(ProjectIdArgs),
    #[command(about = "Print the access token the gateway uses for the project repository")]
    AccessToken(ProjectIdArgs),
    #[command(about = "Show processing logs of a project")]
    Logs(ProjectIdArgs),
}

#[derive(Args)]
pub struct ProjectListArgs {
    #[arg(long)]
    pub group: Option<String>,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long, conflicts_with_all = ["group", "tags"], help = "Keywords to search project names and descriptions")]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct ProjectIdArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ProjectCreateArgs {
    #[arg(long, help = "JSON file with the project payload")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ProjectUpdateArgs {
    pub id: String,
    #[arg(long, help = "JSON file with the project payload")]
    pub file: PathBuf,
}

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand)]
pub enum UserCommand {
    List,
    Get(UserIdArgs),
    Create(UserCreateArgs),
    Update(UserUpdateArgs),
    Delete(UserIdArgs),
    #[command(about = "Replace the access token a user authenticates with")]
    RefreshToken(UserRefreshTokenArgs),
}

#[derive(Args)]
pub struct UserIdArgs {
    pub id: String,
}

#[derive(Args)]
pub struct UserCreateArgs {
    #[arg(long, help = "JSON file with the user payload")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct UserUpdateArgs {
    pub id: String,
    #[arg(long, help = "JSON file with the user payload")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct UserRefreshTokenArgs {
    pub id: String,
    #[arg(long)]
    pub access_token: String,
}

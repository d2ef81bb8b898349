use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::auth::args::*;
pub use crate::modules::branches::args::*;
pub use crate::modules::groups::args::*;
pub use crate::modules::projects::args::*;
pub use crate::modules::search::args::*;
pub use crate::modules::system::args::*;
pub use crate::modules::users::args::*;

#[derive(Parser)]
#[command(name = "bibliotheca")]
#[command(about = "Bibliotheca documentation gateway CLI")]
pub struct Cli {
    #[arg(long, env = "BIBLIOTHECA_ADDR")]
    pub addr: Option<String>,
    #[arg(long, env = "BIBLIOTHECA_TOKEN", help = "Identity token to use instead of the stored session")]
    pub token: Option<String>,
    #[arg(long)]
    pub context: Option<String>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[arg(long, help = "Allow http:// and invalid TLS certificates")]
    pub insecure: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Sign in through the configured identity provider")]
    Login(LoginArgs),
    Logout(LogoutArgs),
    Config(ConfigArgs),
    Project(ProjectArgs),
    Branch(BranchArgs),
    Document(DocumentArgs),
    User(UserArgs),
    Group(GroupArgs),
    #[command(about = "List project tags known to the gateway")]
    Tags,
    Service(ServiceArgs),
    Search(SearchArgs),
    #[command(about = "Check whether full-text search is available")]
    SearchEnabled,
    #[command(about = "Run a GraphQL query against the gateway")]
    Graphql(GraphqlArgs),
}

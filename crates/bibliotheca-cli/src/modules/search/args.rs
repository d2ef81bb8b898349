use clap::Args;

#[derive(Args)]
pub struct SearchArgs {
    pub query: String,
    #[arg(long, requires = "branch", help = "Search inside one project branch")]
    pub project: Option<String>,
    #[arg(long, requires = "project")]
    pub branch: Option<String>,
}

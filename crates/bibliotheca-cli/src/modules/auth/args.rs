use clap::Args;

#[derive(Args)]
pub struct LoginArgs {
    #[arg(
        long,
        help = "URL the identity provider redirected to, including its #fragment"
    )]
    pub redirect_url: Option<String>,
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Args)]
pub struct LogoutArgs {
    #[arg(long)]
    pub context: Option<String>,
}

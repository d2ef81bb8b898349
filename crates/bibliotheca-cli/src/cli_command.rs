use crate::cli_args::*;
use crate::modules::system::CommandContext;

use crate::modules::branches::{handle_branch, handle_document};
use crate::modules::groups::handle_group;
use crate::modules::projects::handle_project;
use crate::modules::search::handle_search;
use crate::modules::system::http::print_json_response;
use crate::modules::system::{handle_graphql, handle_service};
use crate::modules::users::handle_user;

pub(crate) async fn handle_command(command: Command, ctx: &CommandContext) -> anyhow::Result<()> {
    match command {
        Command::Project(args) => handle_project(args, ctx).await?,
        Command::Branch(args) => handle_branch(args, ctx).await?,
        Command::Document(args) => handle_document(args, ctx).await?,
        Command::User(args) => handle_user(args, ctx).await?,
        Command::Group(args) => handle_group(args, ctx).await?,
        Command::Tags => {
            let response = ctx.gateway.tags().await?;
            print_json_response(response).await?;
        }
        Command::Service(args) => handle_service(args, ctx).await?,
        Command::Search(args) => handle_search(args, ctx).await?,
        Command::SearchEnabled => {
            let response = ctx.gateway.search_is_enabled().await?;
            print_json_response(response).await?;
        }
        Command::Graphql(args) => handle_graphql(args, ctx).await?,
        Command::Config(_) | Command::Login(_) | Command::Logout(_) => {
            anyhow::bail!("command does not talk to the gateway")
        }
    }

    Ok(())
}

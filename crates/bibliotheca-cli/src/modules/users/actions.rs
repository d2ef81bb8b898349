use serde_json::Value;

use crate::cli_args::*;
use crate::modules::system::http::{print_empty_response, print_json_response, read_payload};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_user(args: UserArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    match args.command {
        UserCommand::List => {
            let response = ctx.gateway.users().await?;
            print_json_response(response).await?;
        }
        UserCommand::Get(args) => {
            let response = ctx.gateway.user(&args.id).await?;
            print_json_response(response).await?;
        }
        UserCommand::Create(args) => {
            let payload: Value = read_payload(&args.file)?;
            let response = ctx.gateway.create_user(&payload).await?;
            print_json_response(response).await?;
        }
        UserCommand::Update(args) => {
            let payload: Value = read_payload(&args.file)?;
            let response = ctx.gateway.update_user(&args.id, &payload).await?;
            print_json_response(response).await?;
        }
        UserCommand::Delete(args) => {
            let response = ctx.gateway.delete_user(&args.id).await?;
            print_empty_response(response, "User deleted").await?;
        }
        UserCommand::RefreshToken(args) => {
            let response = ctx
                .gateway
                .refresh_user_token(&args.id, &args.access_token)
                .await?;
            print_empty_response(response, "Access token updated").await?;
        }
    }
    Ok(())
}

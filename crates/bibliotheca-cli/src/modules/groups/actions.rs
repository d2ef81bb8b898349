use bibliotheca_core::Group;
use serde_json::Value;

use crate::cli_args::*;
use crate::modules::system::http::{print_empty_response, print_json_response, read_payload};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_group(args: GroupArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    match args.command {
        GroupCommand::List => {
            let response = ctx.gateway.groups().await?;
            print_json_response(response).await?;
        }
        GroupCommand::Get(args) => {
            let response = ctx.gateway.group(&args.name).await?;
            print_json_response(response).await?;
        }
        GroupCommand::Create(args) => {
            let payload: Value = match args.file {
                Some(path) => read_payload(&path)?,
                None => serde_json::to_value(Group {
                    name: args.name,
                    description: args.description,
                    ..Group::default()
                })?,
            };
            let response = ctx.gateway.create_group(&payload).await?;
            print_json_response(response).await?;
        }
        GroupCommand::Update(args) => {
            let payload: Value = read_payload(&args.file)?;
            let response = ctx.gateway.update_group(&args.name, &payload).await?;
            print_json_response(response).await?;
        }
        GroupCommand::Delete(args) => {
            let response = ctx.gateway.delete_group(&args.name).await?;
            print_empty_response(response, "Group deleted").await?;
        }
    }
    Ok(())
}

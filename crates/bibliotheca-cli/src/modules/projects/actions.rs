use serde_json::Value;

use crate::cli_args::*;
use crate::modules::system::http::{print_empty_response, print_json_response, read_payload};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_project(args: ProjectArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    match args.command {
        ProjectCommand::List(args) => {
            let response = if let Some(query) = args.query.as_deref() {
                ctx.gateway.projects_with_keywords(query).await?
            } else if args.group.is_none() && args.tags.is_empty() {
                ctx.gateway.projects().await?
            } else {
                ctx.gateway
                    .filtered_projects(args.group.as_deref(), &args.tags)
                    .await?
            };
            print_json_response(response).await?;
        }
        ProjectCommand::Get(args) => {
            let response = ctx.gateway.project(&args.id).await?;
            print_json_response(response).await?;
        }
        ProjectCommand::Create(args) => {
            let payload: Value = read_payload(&args.file)?;
            let response = ctx.gateway.create_project(&payload).await?;
            print_json_response(response).await?;
        }
        ProjectCommand::Update(args) => {
            let payload: Value = read_payload(&args.file)?;
            let response = ctx.gateway.update_project(&args.id, &payload).await?;
            print_json_response(response).await?;
        }
        ProjectCommand::Delete(args) => {
            let response = ctx.gateway.delete_project(&args.id).await?;
            print_empty_response(response, "Project deleted").await?;
        }
        ProjectCommand::AccessToken(args) => {
            let response = ctx.gateway.project_access_token(&args.id).await?;
            print_json_response(response).await?;
        }
        ProjectCommand::Logs(args) => {
            let response = ctx.gateway.logs(&args.id).await?;
            print_json_response(response).await?;
        }
    }
    Ok(())
}

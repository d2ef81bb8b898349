use crate::cli_args::*;
use crate::modules::system::http::print_json_response;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_service(args: ServiceArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let response = match args.command {
        ServiceCommand::List => ctx.gateway.services().await?,
        ServiceCommand::Health(args) => ctx.gateway.service_health(&args.id).await?,
    };
    print_json_response(response).await
}

pub(crate) async fn handle_graphql(args: GraphqlArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let query = match (args.query, args.file) {
        (Some(query), _) => query,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map_err(|err| anyhow::anyhow!("failed to read {}: {err}", path.display()))?,
        (None, None) => anyhow::bail!("query is required (argument or --file)"),
    };
    let response = ctx.gateway.graphql_results(&query).await?;
    print_json_response(response).await
}

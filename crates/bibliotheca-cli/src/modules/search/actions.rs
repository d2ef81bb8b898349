use crate::cli_args::*;
use crate::modules::system::http::print_json_response;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_search(args: SearchArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let response = match (args.project.as_deref(), args.branch.as_deref()) {
        (Some(project), Some(branch)) => {
            ctx.gateway
                .search_in_branch(project, branch, &args.query)
                .await?
        }
        _ => ctx.gateway.search(&args.query).await?,
    };
    print_json_response(response).await
}

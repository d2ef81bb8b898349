use crate::cli_args::*;
use crate::modules::system::http::{
    print_empty_response, print_json_response, save_response_body,
};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_branch(args: BranchArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    match args.command {
        BranchCommand::List(args) => {
            let response = ctx.gateway.branches(&args.project).await?;
            print_json_response(response).await?;
        }
        BranchCommand::Get(args) => {
            let response = ctx.gateway.branch(&args.project, &args.branch).await?;
            print_json_response(response).await?;
        }
        BranchCommand::Delete(args) => {
            let response = ctx
                .gateway
                .delete_branch(&args.project, &args.branch)
                .await?;
            print_empty_response(response, "Branch deleted").await?;
        }
        BranchCommand::Toc(args) => {
            let response = ctx
                .gateway
                .table_of_contents(&args.project, &args.branch)
                .await?;
            print_json_response(response).await?;
        }
        BranchCommand::ExportPdf(args) => {
            let response = ctx.gateway.pdf_file(&args.project, &args.branch).await?;
            save_response_body(response, &args.output).await?;
        }
        BranchCommand::Reindex(args) => {
            let response = ctx
                .gateway
                .reindex_branch(&args.project, &args.branch)
                .await?;
            print_empty_response(response, "Reindex requested").await?;
        }
        BranchCommand::ReindexStatus(args) => {
            let response = ctx
                .gateway
                .reindex_status(&args.project, &args.branch)
                .await?;
            print_json_response(response).await?;
        }
    }
    Ok(())
}

pub(crate) async fn handle_document(
    args: DocumentArgs,
    ctx: &CommandContext,
) -> anyhow::Result<()> {
    match args.command {
        DocumentCommand::Get(args) => {
            let response = ctx
                .gateway
                .document_content(&args.project, &args.branch, &args.path)
                .await?;
            print_json_response(response).await?;
        }
        DocumentCommand::Image(args) => {
            let src = ctx
                .gateway
                .path_to_image(&args.project, &args.branch, &args.path)?;
            println!("{src}");
        }
    }
    Ok(())
}

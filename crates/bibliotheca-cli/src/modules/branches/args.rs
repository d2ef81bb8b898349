use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct BranchArgs {
    #[command(subcommand)]
    pub command: BranchCommand,
}

#[derive(Subcommand)]
pub enum BranchCommand {
    List(BranchListArgs),
    Get(BranchRefArgs),
    Delete(BranchRefArgs),
    #[command(about = "Show the table of contents of a branch")]
    Toc(BranchRefArgs),
    #[command(about = "Download the branch documentation as PDF")]
    ExportPdf(BranchExportArgs),
    #[command(about = "Rebuild the search index of a branch")]
    Reindex(BranchRefArgs),
    #[command(about = "Show search indexing status of a branch")]
    ReindexStatus(BranchRefArgs),
}

#[derive(Args)]
pub struct BranchListArgs {
    pub project: String,
}

#[derive(Args)]
pub struct BranchRefArgs {
    pub project: String,
    pub branch: String,
}

#[derive(Args)]
pub struct BranchExportArgs {
    pub project: String,
    pub branch: String,
    #[arg(long, short)]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct DocumentArgs {
    #[command(subcommand)]
    pub command: DocumentCommand,
}

#[derive(Subcommand)]
pub enum DocumentCommand {
    #[command(about = "Fetch document content")]
    Get(DocumentRefArgs),
    #[command(about = "Print an authorized image src attribute for a file in a branch")]
    Image(DocumentRefArgs),
}

#[derive(Args)]
pub struct DocumentRefArgs {
    pub project: String,
    pub branch: String,
    #[arg(help = "Path of the file inside the branch (e.g. docs/index.md)")]
    pub path: String,
}

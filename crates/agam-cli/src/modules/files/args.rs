use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Args)]
pub struct FileArgs {
    #[command(subcommand)]
    pub command: FileCommand,
}

#[derive(Subcommand)]
pub enum FileCommand {
    Upload(FileUploadArgs),
    Delete(FileDeleteArgs),
}

#[derive(Args)]
pub struct FileUploadArgs {
    #[arg(long)]
    pub vault: String,
    pub path: PathBuf,
    #[arg(long, help = "Content type sent with the file")]
    pub mime: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FileDeleteArgs {
    #[arg(long)]
    pub vault: String,
    pub file_id: String,
    #[arg(long)]
    pub json: bool,
}

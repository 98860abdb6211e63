use agam_core::VaultType;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct VaultArgs {
    #[command(subcommand)]
    pub command: VaultCommand,
}

#[derive(Subcommand)]
pub enum VaultCommand {
    List(VaultListArgs),
    Create(VaultCreateArgs),
    Delete(VaultDeleteArgs),
    #[command(about = "List the files of a vault, grouped by date")]
    Files(VaultFilesArgs),
}

#[derive(Args)]
pub struct VaultListArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct VaultCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long = "type", value_parser = parse_vault_type)]
    pub kind: VaultType,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct VaultDeleteArgs {
    pub vault_id: String,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct VaultFilesArgs {
    pub vault_id: String,
    #[arg(long, help = "Drop the date grouping")]
    pub flat: bool,
    #[arg(long)]
    pub json: bool,
}

fn parse_vault_type(value: &str) -> Result<VaultType, String> {
    value.parse::<VaultType>().map_err(|err| {
        let allowed = VaultType::ALL
            .iter()
            .map(VaultType::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{err} (expected one of: {allowed})")
    })
}

use crate::cli_args::*;
use crate::modules::auth::{
    handle_login, handle_logout, handle_register, handle_verify_otp, handle_verify_registration,
    handle_whoami,
};
use crate::modules::files::handle_file;
use crate::modules::system::CommandContext;
use crate::modules::vaults::handle_vault;

pub(crate) async fn handle_command(
    command: Command,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    match command {
        Command::Register(args) => handle_register(args, ctx).await?,
        Command::VerifyRegistration(args) => handle_verify_registration(args, ctx).await?,
        Command::Login(args) => handle_login(args, ctx).await?,
        Command::VerifyOtp(args) => handle_verify_otp(args, ctx).await?,
        Command::Logout => handle_logout()?,
        Command::Whoami => handle_whoami().await?,
        Command::Vault(args) => handle_vault(args, ctx).await?,
        Command::File(args) => handle_file(args, ctx).await?,
        Command::Config(_) => anyhow::bail!("config is handled before the session starts"),
    }

    Ok(())
}

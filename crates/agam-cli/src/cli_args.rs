use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::auth::args::*;
pub use crate::modules::files::args::*;
pub use crate::modules::system::args::*;
pub use crate::modules::system::types::SessionBackend;
pub use crate::modules::vaults::args::*;

#[derive(Parser)]
#[command(name = "agam")]
#[command(about = "Agam cloud storage CLI")]
pub struct Cli {
    #[arg(long, env = "AGAM_API_URL", help = "Backend base URL")]
    pub api_url: Option<String>,
    #[arg(long, env = "AGAM_SESSION_STORE", value_enum)]
    pub session_store: Option<SessionBackend>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Create an account; a passcode is sent by email")]
    Register(RegisterArgs),
    VerifyRegistration(VerifyRegistrationArgs),
    Login(LoginArgs),
    #[command(about = "Finish a login with the emailed passcode")]
    VerifyOtp(VerifyOtpArgs),
    Logout,
    Whoami,
    Vault(VaultArgs),
    File(FileArgs),
    Config(ConfigArgs),
}

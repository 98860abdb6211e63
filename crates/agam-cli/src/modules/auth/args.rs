use clap::Args;

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: i64,
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct VerifyRegistrationArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub otp: String,
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long, help = "One-time passcode; prompted for when omitted")]
    pub otp: Option<String>,
}

#[derive(Args)]
pub struct VerifyOtpArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub otp: String,
}

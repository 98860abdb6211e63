use agam_core::{
    LoginRequest, UserInput, VerifyOtpRequest, VerifyOtpResponse, VerifyRegistrationRequest,
};
use serde_json::json;
use tracing::info;

use super::http::{login, register, verify_otp, verify_registration};
use crate::cli_args::*;
use crate::modules::gateway::ApiClient;
use crate::modules::session::{use_session, Route, SessionContext};
use crate::modules::system::CommandContext;
use crate::{prompt_line, prompt_password};

pub(crate) async fn handle_register(
    args: RegisterArgs,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };
    let input = UserInput {
        name: args.name,
        email: args.email,
        phone: args.phone,
        password,
    };
    let response = register(ctx.api, &input).await?;
    if response.message.is_empty() {
        println!("Registration started; check your email for a one-time passcode");
    } else {
        println!("{}", response.message);
    }
    Ok(())
}

pub(crate) async fn handle_verify_registration(
    args: VerifyRegistrationArgs,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    let request = VerifyRegistrationRequest {
        email: args.email,
        otp: args.otp,
    };
    let user = verify_registration(ctx.api, &request).await?;
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

pub(crate) async fn handle_login(args: LoginArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let session = use_session()?;
    let current = session.wait_bootstrapped().await;
    if current.is_authenticated() && args.email.is_none() {
        println!("Already signed in");
        session.navigator().navigate(Route::Dashboard);
        return Ok(());
    }

    let email = match args.email {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };
    let response = login(
        ctx.api,
        &LoginRequest {
            email: email.clone(),
            password,
        },
    )
    .await?;
    info!(user_id = response.user_id, "login accepted; awaiting otp");
    if !response.message.is_empty() {
        println!("{}", response.message);
    }

    let otp = match args.otp {
        Some(otp) => otp,
        None => prompt_line("One-time passcode: ")?,
    };
    let verified = complete_login(ctx.api, &session, email, otp).await?;
    println!("Logged in as {}", display_name(&verified));
    session.navigator().navigate(Route::Dashboard);
    Ok(())
}

pub(crate) async fn handle_verify_otp(
    args: VerifyOtpArgs,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    let session = use_session()?;
    let verified = complete_login(ctx.api, &session, args.email, args.otp).await?;
    println!("Logged in as {}", display_name(&verified));
    session.navigator().navigate(Route::Dashboard);
    Ok(())
}

/// Confirms the login OTP and, on success, stores the issued session.
/// A rejected OTP leaves the session untouched.
pub(crate) async fn complete_login(
    api: &ApiClient,
    session: &SessionContext,
    email: String,
    otp: String,
) -> anyhow::Result<VerifyOtpResponse> {
    let request = VerifyOtpRequest {
        email,
        otp: otp.trim().to_string(),
    };
    let verified = verify_otp(api, &request).await?;
    session.login(verified.token.clone(), verified.user_id)?;
    Ok(verified)
}

fn display_name(verified: &VerifyOtpResponse) -> String {
    match (verified.name.is_empty(), verified.email.is_empty()) {
        (false, false) => format!("{} <{}>", verified.name, verified.email),
        (false, true) => verified.name.clone(),
        (true, false) => verified.email.clone(),
        (true, true) => format!("user {}", verified.user_id),
    }
}

pub(crate) fn handle_logout() -> anyhow::Result<()> {
    let session = use_session()?;
    session.logout()?;
    println!("Logged out");
    Ok(())
}

pub(crate) async fn handle_whoami() -> anyhow::Result<()> {
    let session = use_session()?.wait_bootstrapped().await;
    let output = json!({
        "authenticated": session.is_authenticated(),
        "user_id": session.user_id,
        "token_present": session.token.is_some(),
        "bootstrapped": session.bootstrapped,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

use agam_core::endpoints;
use agam_core::{
    LoginRequest, LoginResponse, MessageResponse, RegisteredUser, UserInput,
    VerifyOtpRequest, VerifyOtpResponse, VerifyRegistrationRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::modules::gateway::{ApiClient, ApiError, RequestOptions};

async fn post_required<B: Serialize, T: DeserializeOwned>(
    client: &ApiClient,
    endpoint: &str,
    payload: &B,
) -> Result<T, ApiError> {
    client
        .request(endpoint, RequestOptions::post(payload)?)
        .await?
        .ok_or_else(|| ApiError::new(format!("empty response from {endpoint}")))
}

pub(crate) async fn register(
    client: &ApiClient,
    input: &UserInput,
) -> Result<MessageResponse, ApiError> {
    let response = client
        .request(endpoints::REGISTER, RequestOptions::post(input)?)
        .await?;
    Ok(response.unwrap_or_default())
}

pub(crate) async fn verify_registration(
    client: &ApiClient,
    request: &VerifyRegistrationRequest,
) -> Result<RegisteredUser, ApiError> {
    post_required(client, endpoints::VERIFY_REGISTRATION, request).await
}

pub(crate) async fn login(
    client: &ApiClient,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    post_required(client, endpoints::LOGIN, request).await
}

pub(crate) async fn verify_otp(
    client: &ApiClient,
    request: &VerifyOtpRequest,
) -> Result<VerifyOtpResponse, ApiError> {
    post_required(client, endpoints::VERIFY_LOGIN_OTP, request).await
}

mod error;
pub(crate) mod http;

pub(crate) use error::ApiError;
pub(crate) use http::{append_params, ApiClient, RequestOptions};

mod actions;
pub(crate) mod args;
pub(crate) mod http;

pub(crate) use actions::{
    complete_login, handle_login, handle_logout, handle_register, handle_verify_otp,
    handle_verify_registration, handle_whoami,
};

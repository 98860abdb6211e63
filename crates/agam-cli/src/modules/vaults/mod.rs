mod actions;
pub(crate) mod args;
pub(crate) mod http;
mod render;

pub(crate) use actions::{create_and_refresh, delete_and_refresh, handle_vault, print_files};

mod actions;
pub(crate) mod args;
mod format;
pub(crate) mod http;

pub(crate) use actions::{delete_file_and_refresh, handle_file, upload_and_refresh};
pub(crate) use format::format_file_size;

pub mod auth;
pub mod files;
pub mod vaults;

pub use auth::*;
pub use files::*;
pub use vaults::*;

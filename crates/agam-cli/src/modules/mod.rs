pub(crate) mod auth;
pub(crate) mod files;
pub(crate) mod gateway;
pub(crate) mod session;
pub(crate) mod system;
pub(crate) mod vaults;

pub(crate) mod auth;
pub(crate) mod jwt;
pub(crate) mod password;

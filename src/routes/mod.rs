pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod products;
pub(crate) mod router;
pub(crate) mod user;

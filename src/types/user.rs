use chrono::{DateTime, Utc};

/// Account as stored by the identity store.
///
/// `is_superuser` is persisted but no guard reads it.
#[derive(Clone, Debug)]
pub(crate) struct User {
    pub(crate) id: i32,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) is_active: bool,
    pub(crate) is_superuser: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

/// Insert payload; the password is already hashed.
#[derive(Clone, Debug)]
pub(crate) struct NewUser {
    pub(crate) email: String,
    pub(crate) password_hash: String,
}

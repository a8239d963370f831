use std::sync::Arc;

use sqlx::PgPool;

use crate::controllers::catalog::CatalogController;
use crate::controllers::user::UserController;
use crate::core::config::Args;
use crate::core::error::ConfigError;
use crate::store::postgres::{PgCatalogStore, PgIdentityStore};
use crate::utils::jwt::TokenCodec;
use crate::utils::password::PasswordHasher;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) user_controller: UserController,
    pub(crate) catalog_controller: CatalogController,
}

impl AppState {
    pub(crate) fn new(
        user_controller: UserController,
        catalog_controller: CatalogController,
    ) -> Self {
        Self {
            user_controller,
            catalog_controller,
        }
    }

    pub(crate) fn from_args(pool: PgPool, args: &Args) -> Result<Self, ConfigError> {
        let codec = TokenCodec::new(&args.secret, &args.algorithm)?;

        let user_controller = UserController::new(
            Arc::new(PgIdentityStore::new(pool.clone())),
            PasswordHasher::new(args.bcrypt_cost),
            codec,
            args.access_token_expire_minutes,
        )?;

        let catalog_controller = CatalogController::new(Arc::new(PgCatalogStore::new(pool)));

        Ok(Self::new(user_controller, catalog_controller))
    }
}

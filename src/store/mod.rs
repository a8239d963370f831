pub(crate) mod postgres;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;

use crate::core::error::Error;
use crate::types::catalog::{Category, Product};
use crate::types::request::{EditCategory, EditProduct, NewCategory, NewProduct};
use crate::types::user::{NewUser, User};

/// Account lookup and creation.
///
/// Implementations must reject a second account with the same email with
/// `Error::UserAlreadyExists` and report infrastructure failures as
/// `Error::StoreUnavailable`.
#[async_trait]
pub(crate) trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    async fn insert(&self, user: NewUser) -> Result<User, Error>;
}

/// Category and product rows. Business rules live in the catalog controller.
#[async_trait]
pub(crate) trait CatalogStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, Error>;

    async fn find_category(&self, id: i32) -> Result<Option<Category>, Error>;

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, Error>;

    async fn insert_category(&self, category: NewCategory) -> Result<Category, Error>;

    async fn update_category(&self, id: i32, edit: EditCategory) -> Result<Option<Category>, Error>;

    async fn delete_category(&self, id: i32) -> Result<bool, Error>;

    async fn list_products(&self, category_id: Option<i32>) -> Result<Vec<Product>, Error>;

    async fn find_product(&self, id: i32) -> Result<Option<Product>, Error>;

    async fn insert_product(&self, product: NewProduct) -> Result<Product, Error>;

    async fn update_product(&self, id: i32, edit: EditProduct) -> Result<Option<Product>, Error>;

    async fn delete_product(&self, id: i32) -> Result<bool, Error>;
}

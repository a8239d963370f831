use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::error::Error;
use crate::store::{CatalogStore, IdentityStore};
use crate::types::catalog::{Category, Product};
use crate::types::request::{EditCategory, EditProduct, NewCategory, NewProduct};
use crate::types::user::{NewUser, User};

/// Identity store kept in process memory, for tests.
#[derive(Debug, Default)]
pub(crate) struct MemoryIdentityStore {
    users: RwLock<BTreeMap<i32, User>>,
    last_id: AtomicI32,
    unavailable: AtomicBool,
}

impl MemoryIdentityStore {
    pub(crate) async fn set_active(&self, id: i32, is_active: bool) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.is_active = is_active;
            user.updated_at = Some(Utc::now());
        }
    }

    pub(crate) async fn remove(&self, id: i32) {
        self.users.write().await.remove(&id);
    }

    /// Makes every later call fail as if the database were down.
    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, Error> {
        self.check_available()?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.check_available()?;
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, Error> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(Error::UserAlreadyExists);
        }

        // Ids are never reused, like a SERIAL column.
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            is_active: true,
            is_superuser: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        users.insert(id, user.clone());

        Ok(user)
    }
}

#[derive(Debug, Default)]
struct Catalog {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    next_category_id: i32,
    next_product_id: i32,
}

/// Catalog store kept in process memory, for tests.
#[derive(Debug, Default)]
pub(crate) struct MemoryCatalogStore {
    catalog: RwLock<Catalog>,
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.catalog.read().await.categories.values().cloned().collect())
    }

    async fn find_category(&self, id: i32) -> Result<Option<Category>, Error> {
        Ok(self.catalog.read().await.categories.get(&id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, Error> {
        Ok(self
            .catalog
            .read()
            .await
            .categories
            .values()
            .find(|category| category.name == name)
            .cloned())
    }

    async fn insert_category(&self, category: NewCategory) -> Result<Category, Error> {
        let mut catalog = self.catalog.write().await;

        if catalog.categories.values().any(|c| c.name == category.name) {
            return Err(Error::CategoryAlreadyExists);
        }

        catalog.next_category_id += 1;
        let category = Category {
            id: catalog.next_category_id,
            name: category.name,
            description: category.description,
            created_at: Utc::now(),
            updated_at: None,
        };
        catalog.categories.insert(category.id, category.clone());

        Ok(category)
    }

    async fn update_category(&self, id: i32, edit: EditCategory) -> Result<Option<Category>, Error> {
        let mut catalog = self.catalog.write().await;

        if let Some(name) = &edit.name {
            if catalog
                .categories
                .values()
                .any(|c| c.id != id && &c.name == name)
            {
                return Err(Error::CategoryAlreadyExists);
            }
        }

        let Some(category) = catalog.categories.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = edit.name {
            category.name = name;
        }
        if let Some(description) = edit.description {
            category.description = Some(description);
        }
        category.updated_at = Some(Utc::now());

        Ok(Some(category.clone()))
    }

    async fn delete_category(&self, id: i32) -> Result<bool, Error> {
        let mut catalog = self.catalog.write().await;

        if catalog.products.values().any(|p| p.category_id == id) {
            return Err(Error::CategoryInUse);
        }

        Ok(catalog.categories.remove(&id).is_some())
    }

    async fn list_products(&self, category_id: Option<i32>) -> Result<Vec<Product>, Error> {
        Ok(self
            .catalog
            .read()
            .await
            .products
            .values()
            .filter(|p| category_id.is_none_or(|id| p.category_id == id))
            .cloned()
            .collect())
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>, Error> {
        Ok(self.catalog.read().await.products.get(&id).cloned())
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, Error> {
        let mut catalog = self.catalog.write().await;

        if !catalog.categories.contains_key(&product.category_id) {
            return Err(Error::CategoryNotFound);
        }

        catalog.next_product_id += 1;
        let product = Product {
            id: catalog.next_product_id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            category_id: product.category_id,
            created_at: Utc::now(),
            updated_at: None,
        };
        catalog.products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn update_product(&self, id: i32, edit: EditProduct) -> Result<Option<Product>, Error> {
        let mut catalog = self.catalog.write().await;

        if let Some(category_id) = edit.category_id {
            if !catalog.categories.contains_key(&category_id) {
                return Err(Error::CategoryNotFound);
            }
        }

        let Some(product) = catalog.products.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = edit.name {
            product.name = name;
        }
        if let Some(description) = edit.description {
            product.description = Some(description);
        }
        if let Some(price) = edit.price {
            product.price = price;
        }
        if let Some(quantity) = edit.quantity {
            product.quantity = quantity;
        }
        if let Some(category_id) = edit.category_id {
            product.category_id = category_id;
        }
        product.updated_at = Some(Utc::now());

        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: i32) -> Result<bool, Error> {
        Ok(self.catalog.write().await.products.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_owned(),
            password_hash: "hash".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_not_reused() {
        let store = MemoryIdentityStore::default();
        let first = store.insert(new_user("a@example.com")).await.unwrap();
        let second = store.insert(new_user("b@example.com")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        store.remove(second.id).await;
        let third = store.insert(new_user("c@example.com")).await.unwrap();

        assert_eq!(third.id, 3);
        assert!(store.find_by_id(second.id).await.unwrap().is_none());
    }
}

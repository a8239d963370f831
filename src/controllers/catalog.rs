use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::instrument;

use crate::core::error::Error;
use crate::store::CatalogStore;
use crate::types::catalog::{Category, Product};
use crate::types::request::{EditCategory, EditProduct, NewCategory, NewProduct};

// Column widths in the catalog tables.
const MAX_CATEGORY_NAME_LENGTH: usize = 100;
const MAX_CATEGORY_DESCRIPTION_LENGTH: usize = 500;
const MAX_PRODUCT_NAME_LENGTH: usize = 200;
const MAX_PRODUCT_DESCRIPTION_LENGTH: usize = 1000;

#[derive(Clone)]
pub(crate) struct CatalogController {
    store: Arc<dyn CatalogStore>,
}

impl std::fmt::Debug for CatalogController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogController").finish()
    }
}

impl CatalogController {
    pub(crate) fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub(crate) async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.store.list_categories().await
    }

    pub(crate) async fn get_category(&self, id: i32) -> Result<Category, Error> {
        self.store
            .find_category(id)
            .await?
            .ok_or(Error::CategoryNotFound)
    }

    #[instrument(skip(self))]
    pub(crate) async fn create_category(&self, category: NewCategory) -> Result<Category, Error> {
        validate_category(Some(&category.name), category.description.as_deref())?;

        if self
            .store
            .find_category_by_name(&category.name)
            .await?
            .is_some()
        {
            return Err(Error::CategoryAlreadyExists);
        }

        self.store.insert_category(category).await
    }

    #[instrument(skip(self))]
    pub(crate) async fn update_category(
        &self,
        id: i32,
        edit: EditCategory,
    ) -> Result<Category, Error> {
        validate_category(edit.name.as_deref(), edit.description.as_deref())?;

        if let Some(name) = &edit.name {
            if let Some(existing) = self.store.find_category_by_name(name).await? {
                if existing.id != id {
                    return Err(Error::CategoryAlreadyExists);
                }
            }
        }

        self.store
            .update_category(id, edit)
            .await?
            .ok_or(Error::CategoryNotFound)
    }

    #[instrument(skip(self))]
    pub(crate) async fn delete_category(&self, id: i32) -> Result<(), Error> {
        self.get_category(id).await?;

        if !self.store.list_products(Some(id)).await?.is_empty() {
            return Err(Error::CategoryInUse);
        }

        match self.store.delete_category(id).await? {
            true => Ok(()),
            false => Err(Error::CategoryNotFound),
        }
    }

    pub(crate) async fn list_products(&self, category_id: Option<i32>) -> Result<Vec<Product>, Error> {
        self.store.list_products(category_id).await
    }

    pub(crate) async fn get_product(&self, id: i32) -> Result<Product, Error> {
        self.store
            .find_product(id)
            .await?
            .ok_or(Error::ProductNotFound)
    }

    #[instrument(skip(self))]
    pub(crate) async fn create_product(&self, product: NewProduct) -> Result<Product, Error> {
        validate_product_text(Some(&product.name), product.description.as_deref())?;
        validate_price(product.price)?;
        validate_quantity(product.quantity)?;

        self.get_category(product.category_id).await?;

        self.store.insert_product(product).await
    }

    #[instrument(skip(self))]
    pub(crate) async fn update_product(&self, id: i32, edit: EditProduct) -> Result<Product, Error> {
        validate_product_text(edit.name.as_deref(), edit.description.as_deref())?;
        if let Some(price) = edit.price {
            validate_price(price)?;
        }
        if let Some(quantity) = edit.quantity {
            validate_quantity(quantity)?;
        }

        self.get_product(id).await?;

        if let Some(category_id) = edit.category_id {
            self.get_category(category_id).await?;
        }

        self.store
            .update_product(id, edit)
            .await?
            .ok_or(Error::ProductNotFound)
    }

    #[instrument(skip(self))]
    pub(crate) async fn delete_product(&self, id: i32) -> Result<(), Error> {
        match self.store.delete_product(id).await? {
            true => Ok(()),
            false => Err(Error::ProductNotFound),
        }
    }
}

fn too_long(value: Option<&str>, max: usize) -> bool {
    value.is_some_and(|value| value.chars().count() > max)
}

fn validate_category(name: Option<&str>, description: Option<&str>) -> Result<(), Error> {
    if too_long(name, MAX_CATEGORY_NAME_LENGTH) {
        return Err(Error::InvalidCategory(format!(
            "Name must be at most {MAX_CATEGORY_NAME_LENGTH} characters"
        )));
    }
    if too_long(description, MAX_CATEGORY_DESCRIPTION_LENGTH) {
        return Err(Error::InvalidCategory(format!(
            "Description must be at most {MAX_CATEGORY_DESCRIPTION_LENGTH} characters"
        )));
    }

    Ok(())
}

fn validate_product_text(name: Option<&str>, description: Option<&str>) -> Result<(), Error> {
    if too_long(name, MAX_PRODUCT_NAME_LENGTH) {
        return Err(Error::InvalidProduct(format!(
            "Name must be at most {MAX_PRODUCT_NAME_LENGTH} characters"
        )));
    }
    if too_long(description, MAX_PRODUCT_DESCRIPTION_LENGTH) {
        return Err(Error::InvalidProduct(format!(
            "Description must be at most {MAX_PRODUCT_DESCRIPTION_LENGTH} characters"
        )));
    }

    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), Error> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(Error::InvalidProduct("Price must not be negative".to_owned()));
    }
    if price.scale() > 2 && price != price.round_dp(2) {
        return Err(Error::InvalidProduct(
            "Price must have at most two decimal places".to_owned(),
        ));
    }
    // NUMERIC(10, 2)
    if price.abs() >= Decimal::new(100_000_000, 0) {
        return Err(Error::InvalidProduct("Price is too large".to_owned()));
    }

    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), Error> {
    if quantity < 0 {
        return Err(Error::InvalidProduct("Quantity must not be negative".to_owned()));
    }

    Ok(())
}

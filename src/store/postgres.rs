use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::core::error::Error;
use crate::store::{CatalogStore, IdentityStore};
use crate::types::catalog::{Category, Product};
use crate::types::request::{EditCategory, EditProduct, NewCategory, NewProduct};
use crate::types::user::{NewUser, User};

const USER_COLUMNS: &str =
    "id, email, password_hash, is_active, is_superuser, created_at, updated_at";
const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";
const PRODUCT_COLUMNS: &str =
    "id, name, description, price, quantity, category_id, created_at, updated_at";

#[derive(Clone, Debug)]
pub(crate) struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, Error> {
        Ok(
            sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1;"))
                .bind(id)
                .map(map_user)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        Ok(
            sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1;"))
                .bind(email)
                .map(map_user)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert(&self, user: NewUser) -> Result<User, Error> {
        match sqlx::query(&format!(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING {USER_COLUMNS};"
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::UserAlreadyExists)
            }
            Err(e) => Err(Error::StoreUnavailable(e)),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        Ok(sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id;"
        ))
        .map(map_category)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_category(&self, id: i32) -> Result<Option<Category>, Error> {
        Ok(sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1;"
        ))
        .bind(id)
        .map(map_category)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, Error> {
        Ok(sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = $1;"
        ))
        .bind(name)
        .map(map_category)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_category(&self, category: NewCategory) -> Result<Category, Error> {
        match sqlx::query(&format!(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING {CATEGORY_COLUMNS};"
        ))
        .bind(&category.name)
        .bind(&category.description)
        .map(map_category)
        .fetch_one(&self.pool)
        .await
        {
            Ok(category) => Ok(category),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::CategoryAlreadyExists)
            }
            Err(e) => Err(Error::StoreUnavailable(e)),
        }
    }

    async fn update_category(&self, id: i32, edit: EditCategory) -> Result<Option<Category>, Error> {
        match sqlx::query(&format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS};"
        ))
        .bind(id)
        .bind(&edit.name)
        .bind(&edit.description)
        .map(map_category)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(category) => Ok(category),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::CategoryAlreadyExists)
            }
            Err(e) => Err(Error::StoreUnavailable(e)),
        }
    }

    async fn delete_category(&self, id: i32) -> Result<bool, Error> {
        match sqlx::query("DELETE FROM categories WHERE id = $1;")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(result) => Ok(result.rows_affected() > 0),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(Error::CategoryInUse)
            }
            Err(e) => Err(Error::StoreUnavailable(e)),
        }
    }

    async fn list_products(&self, category_id: Option<i32>) -> Result<Vec<Product>, Error> {
        Ok(sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
            WHERE $1::INTEGER IS NULL OR category_id = $1
            ORDER BY id;"
        ))
        .bind(category_id)
        .map(map_product)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>, Error> {
        Ok(sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1;"
        ))
        .bind(id)
        .map(map_product)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, Error> {
        sqlx::query(&format!(
            "INSERT INTO products (name, description, price, quantity, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS};"
        ))
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.category_id)
        .map(map_product)
        .fetch_one(&self.pool)
        .await
        .map_err(map_product_error)
    }

    async fn update_product(&self, id: i32, edit: EditProduct) -> Result<Option<Product>, Error> {
        sqlx::query(&format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                quantity = COALESCE($5, quantity),
                category_id = COALESCE($6, category_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS};"
        ))
        .bind(id)
        .bind(&edit.name)
        .bind(&edit.description)
        .bind(edit.price)
        .bind(edit.quantity)
        .bind(edit.category_id)
        .map(map_product)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_product_error)
    }

    async fn delete_product(&self, id: i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1;")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_product_error(e: sqlx::Error) -> Error {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            Error::CategoryNotFound
        }
        e => Error::StoreUnavailable(e),
    }
}

fn map_user(row: PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        is_active: row.get("is_active"),
        is_superuser: row.get("is_superuser"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_category(row: PgRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_product(row: PgRow) -> Product {
    Product {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
        quantity: row.get("quantity"),
        category_id: row.get("category_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

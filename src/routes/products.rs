use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::user::User;
use crate::types::catalog::Product;
use crate::types::request::{EditProduct, NewProduct, ProductFilter};

#[instrument(skip(state))]
pub(crate) async fn get_all(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, Error> {
    Ok(Json(
        state
            .catalog_controller
            .list_products(filter.category_id)
            .await?,
    ))
}

#[instrument(skip(state))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, Error> {
    Ok(Json(state.catalog_controller.get_product(id).await?))
}

#[instrument(skip(state, user))]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(params): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), Error> {
    let product = state.catalog_controller.create_product(params).await?;

    tracing::info!(user_id = user.id, product_id = product.id, "Created product");

    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state, user))]
pub(crate) async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i32>,
    Json(params): Json<EditProduct>,
) -> Result<Json<Product>, Error> {
    let product = state.catalog_controller.update_product(id, params).await?;

    tracing::info!(user_id = user.id, product_id = id, "Updated product");

    Ok(Json(product))
}

#[instrument(skip(state, user))]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Error> {
    state.catalog_controller.delete_product(id).await?;

    tracing::info!(user_id = user.id, product_id = id, "Deleted product");

    Ok(StatusCode::NO_CONTENT)
}

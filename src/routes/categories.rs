use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::user::User;
use crate::types::catalog::Category;
use crate::types::request::{EditCategory, NewCategory};

#[instrument(skip(state))]
pub(crate) async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Category>>, Error> {
    Ok(Json(state.catalog_controller.list_categories().await?))
}

#[instrument(skip(state))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Category>, Error> {
    Ok(Json(state.catalog_controller.get_category(id).await?))
}

#[instrument(skip(state, user))]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(params): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), Error> {
    let category = state.catalog_controller.create_category(params).await?;

    tracing::info!(user_id = user.id, category_id = category.id, "Created category");

    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(state, user))]
pub(crate) async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i32>,
    Json(params): Json<EditCategory>,
) -> Result<Json<Category>, Error> {
    let category = state.catalog_controller.update_category(id, params).await?;

    tracing::info!(user_id = user.id, category_id = id, "Updated category");

    Ok(Json(category))
}

#[instrument(skip(state, user))]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Error> {
    state.catalog_controller.delete_category(id).await?;

    tracing::info!(user_id = user.id, category_id = id, "Deleted category");

    Ok(StatusCode::NO_CONTENT)
}

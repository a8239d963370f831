use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::RegisterData;
use crate::types::{response, user::User};

#[instrument(skip_all)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(user_data): Json<RegisterData>,
) -> Result<(StatusCode, Json<response::User>), Error> {
    let user = state
        .user_controller
        .register(&user_data.email, &user_data.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub(crate) async fn me(Extension(user): Extension<User>) -> Json<response::User> {
    Json(user.into())
}

#[instrument(skip(state))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<response::User>, Error> {
    let user = state.user_controller.get_user(id).await?;

    Ok(Json(user.into()))
}

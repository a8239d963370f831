use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::LoginData;
use crate::types::response;

#[instrument(skip_all)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(login_data): Json<LoginData>,
) -> Result<Json<response::Token>, Error> {
    let token = state
        .user_controller
        .login(&login_data.email, &login_data.password)
        .await?;

    Ok(Json(response::Token::bearer(token)))
}

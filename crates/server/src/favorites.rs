use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::ServerError;
use crate::server::{CurrentUser, ServerState};
use api_types::recipe::RecipeMini;

pub async fn add(
    CurrentUser(user): CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<RecipeMini>), ServerError> {
    state.engine.favorite(&user.username, id).await?;
    let recipe = state.engine.recipe(id, Some(&user.username)).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeMini {
            id: recipe.id,
            name: recipe.name,
            cooking_time: recipe.cooking_time,
        }),
    ))
}

pub async fn remove(
    CurrentUser(user): CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.unfavorite(&user.username, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

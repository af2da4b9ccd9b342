use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::ServerError;
use crate::server::{CurrentUser, ServerState};
use api_types::recipe::RecipeMini;
use engine::render_shopping_list;

pub async fn add(
    CurrentUser(user): CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<RecipeMini>), ServerError> {
    state.engine.add_to_cart(&user.username, id).await?;
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
    state.engine.remove_from_cart(&user.username, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Renders the viewer's aggregated shopping list as a plain-text download.
pub async fn download_shopping_cart(
    CurrentUser(user): CurrentUser,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let lines = state.engine.shopping_list(&user.username).await?;
    let document = render_shopping_list(&lines);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=shopping_cart.txt",
            ),
        ],
        document,
    ))
}

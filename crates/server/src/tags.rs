use axum::{Json, extract::State};

use crate::ServerError;
use crate::server::ServerState;
use api_types::tag::TagView;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TagView>>, ServerError> {
    let tags = state.engine.tags().await?;

    Ok(Json(
        tags.into_iter()
            .map(|tag| TagView {
                id: tag.id,
                name: tag.name,
                color: tag.color,
                slug: tag.slug,
            })
            .collect(),
    ))
}

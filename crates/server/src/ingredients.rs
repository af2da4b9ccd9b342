use axum::{
    Json,
    extract::{Query, State},
};

use crate::ServerError;
use crate::server::ServerState;
use api_types::ingredient::{IngredientQuery, IngredientView};

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<IngredientQuery>,
) -> Result<Json<Vec<IngredientView>>, ServerError> {
    let ingredients = state.engine.ingredients(query.name.as_deref()).await?;

    Ok(Json(
        ingredients
            .into_iter()
            .map(|ingredient| IngredientView {
                id: ingredient.id,
                name: ingredient.name,
                measurement_unit: ingredient.measurement_unit,
            })
            .collect(),
    ))
}

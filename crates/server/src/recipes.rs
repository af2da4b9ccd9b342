use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::ServerError;
use crate::server::{CurrentUser, ServerState};
use api_types::recipe::{
    IngredientLineView, RecipeListQuery, RecipeListResponse, RecipeNew, RecipeView,
};
use api_types::tag::TagView;
use api_types::user::UserView;
use engine::{LineDraft, Recipe, RecipeDraft, RecipeListFilter};

pub(crate) fn recipe_view(recipe: Recipe) -> RecipeView {
    RecipeView {
        id: recipe.id,
        author: UserView {
            username: recipe.author.username,
            email: recipe.author.email,
            first_name: recipe.author.first_name,
            last_name: recipe.author.last_name,
            is_subscribed: recipe.is_author_subscribed,
        },
        name: recipe.name,
        text: recipe.text,
        cooking_time: recipe.cooking_time,
        published_at: recipe.published_at,
        ingredients: recipe
            .ingredients
            .into_iter()
            .map(|line| IngredientLineView {
                id: line.ingredient_id,
                name: line.name,
                measurement_unit: line.measurement_unit,
                amount: line.amount,
            })
            .collect(),
        tags: recipe
            .tags
            .into_iter()
            .map(|tag| TagView {
                id: tag.id,
                name: tag.name,
                color: tag.color,
                slug: tag.slug,
            })
            .collect(),
        is_favorited: recipe.is_favorited,
        is_in_shopping_cart: recipe.is_in_cart,
    }
}

fn draft_from(payload: RecipeNew) -> RecipeDraft {
    RecipeDraft {
        name: payload.name,
        text: payload.text,
        cooking_time: payload.cooking_time,
        lines: payload
            .ingredients
            .into_iter()
            .map(|line| LineDraft {
                ingredient_id: line.id,
                amount: line.amount,
            })
            .collect(),
        tag_ids: payload.tags,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    viewer: Option<CurrentUser>,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<RecipeListResponse>, ServerError> {
    let viewer = viewer.map(|CurrentUser(user)| user.username);

    // Viewer-relative filters are silently dropped for anonymous requests.
    let filter = RecipeListFilter {
        author: query.author,
        tag_slugs: query
            .tags
            .map(|tags| tags.split(',').map(str::to_string).collect())
            .unwrap_or_default(),
        favorited_by: (query.is_favorited == Some(true))
            .then(|| viewer.clone())
            .flatten(),
        in_cart_of: (query.is_in_shopping_cart == Some(true))
            .then(|| viewer.clone())
            .flatten(),
        limit: Some(query.limit.unwrap_or(10)),
        offset: query.offset,
    };

    let recipes = state.engine.list_recipes(&filter, viewer.as_deref()).await?;

    Ok(Json(RecipeListResponse {
        recipes: recipes.into_iter().map(recipe_view).collect(),
    }))
}

pub async fn get_one(
    State(state): State<ServerState>,
    viewer: Option<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeView>, ServerError> {
    let viewer = viewer.map(|CurrentUser(user)| user.username);
    let recipe = state.engine.recipe(id, viewer.as_deref()).await?;

    Ok(Json(recipe_view(recipe)))
}

pub async fn create(
    CurrentUser(user): CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<RecipeNew>,
) -> Result<(StatusCode, Json<RecipeView>), ServerError> {
    let draft = draft_from(payload);
    let id = state.engine.new_recipe(&user.username, &draft).await?;
    let recipe = state.engine.recipe(id, Some(&user.username)).await?;

    tracing::info!("user {} published recipe {id}", user.username);

    Ok((StatusCode::CREATED, Json(recipe_view(recipe))))
}

pub async fn update(
    CurrentUser(user): CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecipeNew>,
) -> Result<Json<RecipeView>, ServerError> {
    let draft = draft_from(payload);
    state.engine.update_recipe(id, &user.username, &draft).await?;
    let recipe = state.engine.recipe(id, Some(&user.username)).await?;

    Ok(Json(recipe_view(recipe)))
}

pub async fn remove(
    CurrentUser(user): CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_recipe(id, &user.username).await?;

    Ok(StatusCode::NO_CONTENT)
}

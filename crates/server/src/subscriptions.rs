use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::ServerError;
use crate::server::{CurrentUser, ServerState};
use api_types::subscription::{SubscriptionView, SubscriptionsResponse};

pub async fn add(
    CurrentUser(user): CurrentUser,
    State(state): State<ServerState>,
    Path(author): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.subscribe(&user.username, &author).await?;

    Ok(StatusCode::CREATED)
}

pub async fn remove(
    CurrentUser(user): CurrentUser,
    State(state): State<ServerState>,
    Path(author): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.unsubscribe(&user.username, &author).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list(
    CurrentUser(user): CurrentUser,
    State(state): State<ServerState>,
) -> Result<Json<SubscriptionsResponse>, ServerError> {
    let subscriptions = state.engine.subscriptions(&user.username).await?;

    Ok(Json(SubscriptionsResponse {
        subscriptions: subscriptions
            .into_iter()
            .map(|(author, recipes_count)| SubscriptionView {
                username: author.username,
                first_name: author.first_name,
                last_name: author.last_name,
                recipes_count,
            })
            .collect(),
    }))
}

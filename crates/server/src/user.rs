use axum::{Json, extract::State, http::StatusCode};

use crate::ServerError;
use crate::server::{CurrentUser, ServerState};
use api_types::user::{UserNew, UserView};

pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    state
        .engine
        .new_user(
            &payload.username,
            &payload.email,
            &payload.password,
            &payload.first_name,
            &payload.last_name,
        )
        .await?;

    tracing::info!("registered user {}", payload.username);

    Ok((
        StatusCode::CREATED,
        Json(UserView {
            username: payload.username,
            email: payload.email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            is_subscribed: false,
        }),
    ))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserView> {
    Json(UserView {
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        is_subscribed: false,
    })
}

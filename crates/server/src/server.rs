use axum::{
    Router,
    extract::{FromRequestParts, OptionalFromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{cart, favorites, ingredients, recipes, subscriptions, tags, user};
use engine::{Engine, users};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

/// The authenticated user, resolved by the auth middleware.
///
/// Extracting this from a request without valid credentials rejects with
/// `401 Unauthorized`; handlers that also serve anonymous viewers take
/// `Option<CurrentUser>` instead.
pub struct CurrentUser(pub users::Model);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<users::Model>()
            .cloned()
            .map(CurrentUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<users::Model>()
            .cloned()
            .map(CurrentUser))
    }
}

/// Resolves Basic credentials into a user extension.
///
/// Requests without credentials pass through anonymously; requests with
/// bad credentials are rejected here so handlers never see them.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(header) = auth_header {
        if header.username().is_empty() || header.password().is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let user: Option<users::Model> = users::Entity::find()
            .filter(users::Column::Username.eq(header.username()))
            .filter(users::Column::Password.eq(header.password()))
            .one(&state.db)
            .await
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let Some(user) = user else {
            return Err(StatusCode::UNAUTHORIZED);
        };
        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/users", post(user::signup))
        .route("/users/me", get(user::me))
        .route("/users/subscriptions", get(subscriptions::list))
        .route(
            "/users/{username}/subscribe",
            post(subscriptions::add).delete(subscriptions::remove),
        )
        .route("/tags", get(tags::list))
        .route("/ingredients", get(ingredients::list))
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/recipes/download_shopping_cart",
            get(cart::download_shopping_cart),
        )
        .route(
            "/recipes/{id}",
            get(recipes::get_one)
                .patch(recipes::update)
                .delete(recipes::remove),
        )
        .route(
            "/recipes/{id}/favorite",
            post(favorites::add).delete(favorites::remove),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(cart::add).delete(cart::remove),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(engine: Engine, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request as HttpRequest, header};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::Database;
    use tower::ServiceExt;

    async fn test_router() -> (Router, Arc<Engine>) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        migration::Migrator::up(&db, None).await.expect("migrate");

        let engine = Arc::new(Engine::builder().database(db.clone()).build());
        engine
            .new_user("alice", "alice@example.com", "password", "Alice", "A")
            .await
            .expect("create alice");

        let state = ServerState {
            engine: engine.clone(),
            db,
        };
        (router(state), engine)
    }

    fn basic_auth(username: &str, password: &str) -> String {
        format!("Basic {}", BASE64.encode(format!("{username}:{password}")))
    }

    async fn body_string(response: Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn download_requires_authentication() {
        let (router, _engine) = test_router().await;

        let response = router
            .oneshot(
                HttpRequest::get("/recipes/download_shopping_cart")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn download_rejects_bad_credentials() {
        let (router, _engine) = test_router().await;

        let response = router
            .oneshot(
                HttpRequest::get("/recipes/download_shopping_cart")
                    .header(header::AUTHORIZATION, basic_auth("alice", "wrong"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn empty_cart_downloads_header_only_document() {
        let (router, _engine) = test_router().await;

        let response = router
            .oneshot(
                HttpRequest::get("/recipes/download_shopping_cart")
                    .header(header::AUTHORIZATION, basic_auth("alice", "password"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .and_then(|value| value.to_str().ok()),
            Some("attachment; filename=shopping_cart.txt")
        );
        assert_eq!(body_string(response).await, "Your shopping list:\n\n");
    }

    #[tokio::test]
    async fn download_aggregates_cart_recipes() {
        let (router, engine) = test_router().await;

        let flour = engine.new_ingredient("Flour", "g").await.expect("flour");
        let egg = engine.new_ingredient("Egg", "pcs").await.expect("egg");
        let milk = engine.new_ingredient("Milk", "ml").await.expect("milk");

        let pancakes = engine
            .new_recipe(
                "alice",
                &engine::RecipeDraft {
                    name: "Pancakes".to_string(),
                    text: "Mix and fry.".to_string(),
                    cooking_time: 20,
                    lines: vec![
                        engine::LineDraft {
                            ingredient_id: flour,
                            amount: 200,
                        },
                        engine::LineDraft {
                            ingredient_id: egg,
                            amount: 2,
                        },
                    ],
                    tag_ids: Vec::new(),
                },
            )
            .await
            .expect("pancakes");
        let porridge = engine
            .new_recipe(
                "alice",
                &engine::RecipeDraft {
                    name: "Porridge".to_string(),
                    text: "Boil.".to_string(),
                    cooking_time: 10,
                    lines: vec![
                        engine::LineDraft {
                            ingredient_id: flour,
                            amount: 100,
                        },
                        engine::LineDraft {
                            ingredient_id: milk,
                            amount: 50,
                        },
                    ],
                    tag_ids: Vec::new(),
                },
            )
            .await
            .expect("porridge");

        engine.add_to_cart("alice", pancakes).await.expect("cart");
        engine.add_to_cart("alice", porridge).await.expect("cart");

        let response = router
            .oneshot(
                HttpRequest::get("/recipes/download_shopping_cart")
                    .header(header::AUTHORIZATION, basic_auth("alice", "password"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            "Your shopping list:\n\nEgg, pcs, 2\nFlour, g, 300\nMilk, ml, 50"
        );
    }

    #[tokio::test]
    async fn signup_then_publish_and_favorite_recipe() {
        let (router, engine) = test_router().await;

        let response = router
            .clone()
            .oneshot(
                HttpRequest::post("/users")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "username": "bob",
                            "email": "bob@example.com",
                            "password": "secret",
                            "first_name": "Bob",
                            "last_name": "B",
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);

        let sugar = engine.new_ingredient("Sugar", "g").await.expect("sugar");
        let response = router
            .clone()
            .oneshot(
                HttpRequest::post("/recipes")
                    .header(header::AUTHORIZATION, basic_auth("bob", "secret"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "name": "Caramel",
                            "text": "Melt the sugar.",
                            "cooking_time": 15,
                            "ingredients": [{ "id": sugar, "amount": 100 }],
                            "tags": [],
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);

        let recipe: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("recipe json");
        let recipe_id = recipe["id"].as_str().expect("recipe id");

        let response = router
            .oneshot(
                HttpRequest::post(format!("/recipes/{recipe_id}/favorite"))
                    .header(header::AUTHORIZATION, basic_auth("alice", "password"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn tags_are_public() {
        let (router, _engine) = test_router().await;

        let response = router
            .oneshot(HttpRequest::get("/tags").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }
}

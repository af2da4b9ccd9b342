use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    /// Request body for signing up a new user.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub username: String,
        pub email: String,
        pub password: String,
        pub first_name: String,
        pub last_name: String,
    }

    /// Public view of a user.
    ///
    /// `is_subscribed` is relative to the authenticated viewer and is
    /// `false` for anonymous requests.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub username: String,
        pub email: String,
        pub first_name: String,
        pub last_name: String,
        pub is_subscribed: bool,
    }
}

pub mod ingredient {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientView {
        pub id: Uuid,
        pub name: String,
        pub measurement_unit: String,
    }

    /// Query parameters for ingredient search.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct IngredientQuery {
        /// Case-insensitive name prefix.
        pub name: Option<String>,
    }
}

pub mod tag {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TagView {
        pub id: Uuid,
        pub name: String,
        pub color: String,
        pub slug: String,
    }
}

pub mod recipe {
    use super::*;

    /// One ingredient line in a create/update request.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientLineNew {
        pub id: Uuid,
        pub amount: i64,
    }

    /// Request body for creating a recipe. Updates reuse the same shape:
    /// ingredient lines and tags are replaced wholesale.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeNew {
        pub name: String,
        pub text: String,
        pub cooking_time: i64,
        pub ingredients: Vec<IngredientLineNew>,
        pub tags: Vec<Uuid>,
    }

    /// One ingredient line in a recipe response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientLineView {
        pub id: Uuid,
        pub name: String,
        pub measurement_unit: String,
        pub amount: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeView {
        pub id: Uuid,
        pub author: super::user::UserView,
        pub name: String,
        pub text: String,
        pub cooking_time: i64,
        pub published_at: DateTime<Utc>,
        pub ingredients: Vec<IngredientLineView>,
        pub tags: Vec<super::tag::TagView>,
        pub is_favorited: bool,
        pub is_in_shopping_cart: bool,
    }

    /// Compact view returned by favorite/cart endpoints.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeMini {
        pub id: Uuid,
        pub name: String,
        pub cooking_time: i64,
    }

    /// Query parameters for listing recipes.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RecipeListQuery {
        pub author: Option<String>,
        /// Comma-separated tag slugs.
        pub tags: Option<String>,
        pub is_favorited: Option<bool>,
        pub is_in_shopping_cart: Option<bool>,
        pub limit: Option<u64>,
        pub offset: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeListResponse {
        pub recipes: Vec<RecipeView>,
    }
}

pub mod subscription {
    use super::*;

    /// An author the user is subscribed to.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubscriptionView {
        pub username: String,
        pub first_name: String,
        pub last_name: String,
        pub recipes_count: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubscriptionsResponse {
        pub subscriptions: Vec<SubscriptionView>,
    }
}

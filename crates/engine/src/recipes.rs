//! Recipe primitives.
//!
//! A recipe belongs to its author and owns its ingredient lines and tag
//! links; edits replace both wholesale.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, recipe_ingredients::IngredientLine, tags::Tag, users};

/// A fully hydrated recipe, as returned by read operations.
///
/// `is_favorited` and `is_in_cart` are relative to the viewer passed to the
/// read operation and are `false` for anonymous reads.
#[derive(Clone, Debug)]
pub struct Recipe {
    pub id: Uuid,
    pub author: users::Model,
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
    pub published_at: DateTime<Utc>,
    pub ingredients: Vec<IngredientLine>,
    pub tags: Vec<Tag>,
    pub is_favorited: bool,
    pub is_in_cart: bool,
    /// Whether the viewer subscribes to the recipe's author.
    pub is_author_subscribed: bool,
}

/// One ingredient line in a [`RecipeDraft`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDraft {
    pub ingredient_id: Uuid,
    pub amount: i64,
}

/// Payload for creating or updating a recipe.
#[derive(Clone, Debug)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
    pub lines: Vec<LineDraft>,
    pub tag_ids: Vec<Uuid>,
}

/// Filter for listing recipes. Empty filter lists everything, newest first.
#[derive(Clone, Debug, Default)]
pub struct RecipeListFilter {
    pub author: Option<String>,
    pub tag_slugs: Vec<String>,
    /// Restrict to recipes favorited by this user.
    pub favorited_by: Option<String>,
    /// Restrict to recipes in this user's shopping cart.
    pub in_cart_of: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub author: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
    pub published_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Author",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::recipe_ingredients::Entity")]
    RecipeIngredients,
    #[sea_orm(has_many = "super::recipe_tags::Entity")]
    RecipeTags,
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
    #[sea_orm(has_many = "super::cart_entries::Entity")]
    CartEntries,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::recipe_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeIngredients.def()
    }
}

impl Related<super::recipe_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn parsed_id(&self) -> Result<Uuid, EngineError> {
        Uuid::parse_str(&self.id)
            .map_err(|_| EngineError::KeyNotFound("recipe not exists".to_string()))
    }
}

pub(crate) fn active_model(
    id: Uuid,
    author: &str,
    draft: &RecipeDraft,
    published_at: DateTime<Utc>,
) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::Set(id.to_string()),
        author: ActiveValue::Set(author.to_string()),
        name: ActiveValue::Set(draft.name.clone()),
        text: ActiveValue::Set(draft.text.clone()),
        cooking_time: ActiveValue::Set(draft.cooking_time),
        published_at: ActiveValue::Set(published_at),
    }
}

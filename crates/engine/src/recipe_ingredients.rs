//! Ingredient lines.
//!
//! One row links a recipe to an ingredient with a positive amount. The
//! `(recipe_id, ingredient_id)` pair is unique; `amount > 0` is enforced at
//! recipe-write time, reads trust stored data.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::EngineError;

/// An ingredient line joined with its ingredient, as seen in a hydrated
/// recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngredientLine {
    pub ingredient_id: Uuid,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipe_ingredients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub recipe_id: String,
    pub ingredient_id: String,
    pub amount: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recipes::Entity",
        from = "Column::RecipeId",
        to = "super::recipes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Recipes,
    #[sea_orm(
        belongs_to = "super::ingredients::Entity",
        from = "Column::IngredientId",
        to = "super::ingredients::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Ingredients,
}

impl Related<super::recipes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipes.def()
    }
}

impl Related<super::ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn parsed_ingredient_id(&self) -> Result<Uuid, EngineError> {
        Uuid::parse_str(&self.ingredient_id)
            .map_err(|_| EngineError::KeyNotFound("ingredient not exists".to_string()))
    }
}

pub(crate) fn active_model(recipe_id: Uuid, ingredient_id: Uuid, amount: i64) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        recipe_id: ActiveValue::Set(recipe_id.to_string()),
        ingredient_id: ActiveValue::Set(ingredient_id.to_string()),
        amount: ActiveValue::Set(amount),
    }
}

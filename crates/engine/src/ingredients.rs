//! Ingredient reference data.
//!
//! An ingredient is identified by its `(name, measurement_unit)` pair, not
//! by name alone; the pair carries a unique index. Rows are immutable once
//! loaded and recipes reference them by id.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

/// An ingredient as the rest of the engine sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub measurement_unit: String,
}

impl Ingredient {
    pub fn new(name: String, measurement_unit: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            measurement_unit,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recipe_ingredients::Entity")]
    RecipeIngredients,
}

impl Related<super::recipe_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeIngredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Ingredient> for ActiveModel {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ActiveValue::Set(ingredient.id.to_string()),
            name: ActiveValue::Set(ingredient.name.clone()),
            measurement_unit: ActiveValue::Set(ingredient.measurement_unit.clone()),
        }
    }
}

impl TryFrom<Model> for Ingredient {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("ingredient not exists".to_string()))?,
            name: model.name,
            measurement_unit: model.measurement_unit,
        })
    }
}

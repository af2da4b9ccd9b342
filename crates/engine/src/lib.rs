use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait, prelude::*,
};
use uuid::Uuid;

pub use error::EngineError;
pub use ingredients::Ingredient;
pub use recipe_ingredients::IngredientLine;
pub use recipes::{LineDraft, Recipe, RecipeDraft, RecipeListFilter};
pub use shopping_list::{AggregatedLine, render_shopping_list};
pub use tags::Tag;

pub mod cart_entries;
mod error;
pub mod favorites;
pub mod ingredients;
pub mod recipe_ingredients;
pub mod recipe_tags;
pub mod recipes;
mod shopping_list;
pub mod subscriptions;
pub mod tags;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;

/// The domain engine: every operation is a stateless read or a single
/// database transaction over the connection pool.
#[derive(Clone, Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn require_recipe(&self, recipe_id: Uuid) -> ResultEngine<recipes::Model> {
        recipes::Entity::find_by_id(recipe_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("recipe not exists".to_string()))
    }

    async fn require_user(&self, username: &str) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(username)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    // ── Users ───────────────────────────────────────────────────────────

    /// Register a new user. Username and email must both be unused.
    pub async fn new_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> ResultEngine<()> {
        let taken = users::Entity::find()
            .filter(
                users::Column::Username
                    .eq(username)
                    .or(users::Column::Email.eq(email)),
            )
            .count(&self.database)
            .await?;
        if taken > 0 {
            return Err(EngineError::ExistingKey(username.to_string()));
        }

        let user = users::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            password: ActiveValue::Set(password.to_string()),
            email: ActiveValue::Set(email.to_string()),
            first_name: ActiveValue::Set(first_name.to_string()),
            last_name: ActiveValue::Set(last_name.to_string()),
        };
        user.insert(&self.database).await?;
        Ok(())
    }

    /// Return a user by username.
    pub async fn user(&self, username: &str) -> ResultEngine<users::Model> {
        self.require_user(username).await
    }

    // ── Reference data ──────────────────────────────────────────────────

    /// Add a new ingredient. Identity is the `(name, measurement_unit)`
    /// pair; inserting the same pair twice is a conflict.
    pub async fn new_ingredient(&self, name: &str, measurement_unit: &str) -> ResultEngine<Uuid> {
        let existing = ingredients::Entity::find()
            .filter(ingredients::Column::Name.eq(name))
            .filter(ingredients::Column::MeasurementUnit.eq(measurement_unit))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(name.to_string()));
        }

        let ingredient = Ingredient::new(name.to_string(), measurement_unit.to_string());
        let id = ingredient.id;
        ingredients::ActiveModel::from(&ingredient)
            .insert(&self.database)
            .await?;
        Ok(id)
    }

    /// List ingredients, optionally restricted to a name prefix, ordered
    /// by name.
    pub async fn ingredients(&self, name_prefix: Option<&str>) -> ResultEngine<Vec<Ingredient>> {
        let mut query = ingredients::Entity::find().order_by_asc(ingredients::Column::Name);
        if let Some(prefix) = name_prefix {
            query = query.filter(ingredients::Column::Name.starts_with(prefix));
        }

        let models = query.all(&self.database).await?;
        models.into_iter().map(Ingredient::try_from).collect()
    }

    /// Add a new tag. Name and slug are both unique.
    pub async fn new_tag(&self, name: &str, color: &str, slug: &str) -> ResultEngine<Uuid> {
        let existing = tags::Entity::find()
            .filter(tags::Column::Name.eq(name).or(tags::Column::Slug.eq(slug)))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(name.to_string()));
        }

        let tag = Tag::new(name.to_string(), color.to_string(), slug.to_string());
        let id = tag.id;
        tags::ActiveModel::from(&tag).insert(&self.database).await?;
        Ok(id)
    }

    /// List every tag, ordered by name.
    pub async fn tags(&self) -> ResultEngine<Vec<Tag>> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Tag::try_from).collect()
    }

    // ── Recipes ─────────────────────────────────────────────────────────

    /// Create a recipe with its ingredient lines and tag links in one
    /// database transaction.
    pub async fn new_recipe(&self, author: &str, draft: &RecipeDraft) -> ResultEngine<Uuid> {
        validate_draft(draft)?;
        self.require_user(author).await?;

        let recipe_id = Uuid::new_v4();
        let db_tx = self.database.begin().await?;

        self.require_draft_references(&db_tx, draft).await?;

        recipes::active_model(recipe_id, author, draft, Utc::now())
            .insert(&db_tx)
            .await?;
        insert_lines_and_tags(&db_tx, recipe_id, draft).await?;

        db_tx.commit().await?;
        Ok(recipe_id)
    }

    /// Update a recipe. Author-only; ingredient lines and tag links are
    /// replaced wholesale.
    pub async fn update_recipe(
        &self,
        recipe_id: Uuid,
        user_id: &str,
        draft: &RecipeDraft,
    ) -> ResultEngine<()> {
        validate_draft(draft)?;

        let model = self.require_recipe(recipe_id).await?;
        if model.author != user_id {
            return Err(EngineError::Forbidden(
                "only the author can edit a recipe".to_string(),
            ));
        }

        let db_tx = self.database.begin().await?;

        self.require_draft_references(&db_tx, draft).await?;

        let mut active: recipes::ActiveModel = model.into();
        active.name = ActiveValue::Set(draft.name.clone());
        active.text = ActiveValue::Set(draft.text.clone());
        active.cooking_time = ActiveValue::Set(draft.cooking_time);
        active.update(&db_tx).await?;

        recipe_ingredients::Entity::delete_many()
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id.to_string()))
            .exec(&db_tx)
            .await?;
        recipe_tags::Entity::delete_many()
            .filter(recipe_tags::Column::RecipeId.eq(recipe_id.to_string()))
            .exec(&db_tx)
            .await?;
        insert_lines_and_tags(&db_tx, recipe_id, draft).await?;

        db_tx.commit().await?;
        Ok(())
    }

    /// Delete a recipe together with its lines, tag links, favorites and
    /// cart entries. Author-only.
    pub async fn delete_recipe(&self, recipe_id: Uuid, user_id: &str) -> ResultEngine<()> {
        let model = self.require_recipe(recipe_id).await?;
        if model.author != user_id {
            return Err(EngineError::Forbidden(
                "only the author can delete a recipe".to_string(),
            ));
        }

        let db_tx = self.database.begin().await?;
        let id = recipe_id.to_string();

        recipe_ingredients::Entity::delete_many()
            .filter(recipe_ingredients::Column::RecipeId.eq(id.clone()))
            .exec(&db_tx)
            .await?;
        recipe_tags::Entity::delete_many()
            .filter(recipe_tags::Column::RecipeId.eq(id.clone()))
            .exec(&db_tx)
            .await?;
        favorites::Entity::delete_many()
            .filter(favorites::Column::RecipeId.eq(id.clone()))
            .exec(&db_tx)
            .await?;
        cart_entries::Entity::delete_many()
            .filter(cart_entries::Column::RecipeId.eq(id.clone()))
            .exec(&db_tx)
            .await?;
        recipes::Entity::delete_by_id(id).exec(&db_tx).await?;

        db_tx.commit().await?;
        Ok(())
    }

    /// Return a single hydrated recipe.
    pub async fn recipe(&self, recipe_id: Uuid, viewer: Option<&str>) -> ResultEngine<Recipe> {
        let pair = recipes::Entity::find_by_id(recipe_id.to_string())
            .find_also_related(users::Entity)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("recipe not exists".to_string()))?;

        let mut hydrated = self.hydrate(vec![pair], viewer).await?;
        hydrated
            .pop()
            .ok_or_else(|| EngineError::KeyNotFound("recipe not exists".to_string()))
    }

    /// List recipes, newest first, applying the filter.
    pub async fn list_recipes(
        &self,
        filter: &RecipeListFilter,
        viewer: Option<&str>,
    ) -> ResultEngine<Vec<Recipe>> {
        let mut query = recipes::Entity::find();

        if let Some(author) = &filter.author {
            query = query.filter(recipes::Column::Author.eq(author));
        }
        if !filter.tag_slugs.is_empty() {
            query = query
                .join(JoinType::InnerJoin, recipes::Relation::RecipeTags.def())
                .join(JoinType::InnerJoin, recipe_tags::Relation::Tags.def())
                .filter(tags::Column::Slug.is_in(filter.tag_slugs.clone()))
                .distinct();
        }
        if let Some(user) = &filter.favorited_by {
            query = query
                .join(JoinType::InnerJoin, recipes::Relation::Favorites.def())
                .filter(favorites::Column::Username.eq(user));
        }
        if let Some(user) = &filter.in_cart_of {
            query = query
                .join(JoinType::InnerJoin, recipes::Relation::CartEntries.def())
                .filter(cart_entries::Column::Username.eq(user));
        }

        query = query.order_by_desc(recipes::Column::PublishedAt);
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }
        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }

        let pairs = query
            .find_also_related(users::Entity)
            .all(&self.database)
            .await?;
        self.hydrate(pairs, viewer).await
    }

    // ── Favorites and shopping cart ─────────────────────────────────────

    /// Add a recipe to the user's favorites.
    pub async fn favorite(&self, user_id: &str, recipe_id: Uuid) -> ResultEngine<()> {
        self.require_recipe(recipe_id).await?;

        let existing = favorites::Entity::find_by_id((user_id.to_string(), recipe_id.to_string()))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(
                "recipe already in favorites".to_string(),
            ));
        }

        let entry = favorites::ActiveModel {
            username: ActiveValue::Set(user_id.to_string()),
            recipe_id: ActiveValue::Set(recipe_id.to_string()),
        };
        entry.insert(&self.database).await?;
        Ok(())
    }

    /// Remove a recipe from the user's favorites.
    pub async fn unfavorite(&self, user_id: &str, recipe_id: Uuid) -> ResultEngine<()> {
        self.require_recipe(recipe_id).await?;

        let result =
            favorites::Entity::delete_by_id((user_id.to_string(), recipe_id.to_string()))
                .exec(&self.database)
                .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "recipe not in favorites".to_string(),
            ));
        }
        Ok(())
    }

    /// Add a recipe to the user's shopping cart.
    pub async fn add_to_cart(&self, user_id: &str, recipe_id: Uuid) -> ResultEngine<()> {
        self.require_recipe(recipe_id).await?;

        let existing =
            cart_entries::Entity::find_by_id((user_id.to_string(), recipe_id.to_string()))
                .one(&self.database)
                .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(
                "recipe already in shopping cart".to_string(),
            ));
        }

        let entry = cart_entries::ActiveModel {
            username: ActiveValue::Set(user_id.to_string()),
            recipe_id: ActiveValue::Set(recipe_id.to_string()),
        };
        entry.insert(&self.database).await?;
        Ok(())
    }

    /// Remove a recipe from the user's shopping cart.
    pub async fn remove_from_cart(&self, user_id: &str, recipe_id: Uuid) -> ResultEngine<()> {
        self.require_recipe(recipe_id).await?;

        let result =
            cart_entries::Entity::delete_by_id((user_id.to_string(), recipe_id.to_string()))
                .exec(&self.database)
                .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "recipe not in shopping cart".to_string(),
            ));
        }
        Ok(())
    }

    // ── Subscriptions ───────────────────────────────────────────────────

    /// Subscribe to an author.
    pub async fn subscribe(&self, subscriber: &str, author: &str) -> ResultEngine<()> {
        if subscriber == author {
            return Err(EngineError::InvalidSubscription(
                "cannot subscribe to yourself".to_string(),
            ));
        }
        self.require_user(author).await?;

        let existing =
            subscriptions::Entity::find_by_id((subscriber.to_string(), author.to_string()))
                .one(&self.database)
                .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(
                "already subscribed".to_string(),
            ));
        }

        let entry = subscriptions::ActiveModel {
            subscriber: ActiveValue::Set(subscriber.to_string()),
            author: ActiveValue::Set(author.to_string()),
        };
        entry.insert(&self.database).await?;
        Ok(())
    }

    /// Unsubscribe from an author.
    pub async fn unsubscribe(&self, subscriber: &str, author: &str) -> ResultEngine<()> {
        self.require_user(author).await?;

        let result =
            subscriptions::Entity::delete_by_id((subscriber.to_string(), author.to_string()))
                .exec(&self.database)
                .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("not subscribed".to_string()));
        }
        Ok(())
    }

    /// List the authors the user subscribes to, with their recipe counts.
    pub async fn subscriptions(&self, user_id: &str) -> ResultEngine<Vec<(users::Model, u64)>> {
        let entries = subscriptions::Entity::find()
            .filter(subscriptions::Column::Subscriber.eq(user_id))
            .order_by_asc(subscriptions::Column::Author)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(author) = users::Entity::find_by_id(entry.author.clone())
                .one(&self.database)
                .await?
            else {
                continue;
            };
            let recipes_count = recipes::Entity::find()
                .filter(recipes::Column::Author.eq(entry.author))
                .count(&self.database)
                .await?;
            out.push((author, recipes_count));
        }
        Ok(out)
    }

    /// Whether `subscriber` subscribes to `author`.
    pub async fn is_subscribed(&self, subscriber: &str, author: &str) -> ResultEngine<bool> {
        let existing =
            subscriptions::Entity::find_by_id((subscriber.to_string(), author.to_string()))
                .one(&self.database)
                .await?;
        Ok(existing.is_some())
    }

    // ── Shopping list ───────────────────────────────────────────────────

    /// Consolidate the ingredient lines of every recipe in the user's cart
    /// into one ordered list, summing amounts per `(name, unit)` pair.
    ///
    /// An empty cart yields an empty list, not an error. The operation is
    /// a pure read; storage faults propagate as [`EngineError::Database`].
    pub async fn shopping_list(&self, user_id: &str) -> ResultEngine<Vec<AggregatedLine>> {
        let recipe_ids: Vec<String> = cart_entries::Entity::find()
            .filter(cart_entries::Column::Username.eq(user_id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(|entry| entry.recipe_id)
            .collect();

        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(recipe_ingredients::Model, Option<ingredients::Model>)> =
            recipe_ingredients::Entity::find()
                .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids))
                .find_also_related(ingredients::Entity)
                .all(&self.database)
                .await?;

        let mut triples = Vec::with_capacity(rows.len());
        for (line, ingredient) in rows {
            let Some(ingredient) = ingredient else { continue };
            triples.push((ingredient.name, ingredient.measurement_unit, line.amount));
        }

        Ok(shopping_list::aggregate(triples))
    }

    // ── Hydration ───────────────────────────────────────────────────────

    /// Attach ingredient lines, tags and viewer flags to recipe rows,
    /// preserving input order.
    async fn hydrate(
        &self,
        pairs: Vec<(recipes::Model, Option<users::Model>)>,
        viewer: Option<&str>,
    ) -> ResultEngine<Vec<Recipe>> {
        let recipe_ids: Vec<String> = pairs.iter().map(|(model, _)| model.id.clone()).collect();

        let mut lines_by_recipe: HashMap<String, Vec<IngredientLine>> = HashMap::new();
        let line_rows: Vec<(recipe_ingredients::Model, Option<ingredients::Model>)> =
            recipe_ingredients::Entity::find()
                .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.clone()))
                .find_also_related(ingredients::Entity)
                .all(&self.database)
                .await?;
        for (line, ingredient) in line_rows {
            let Some(ingredient) = ingredient else { continue };
            lines_by_recipe
                .entry(line.recipe_id.clone())
                .or_default()
                .push(IngredientLine {
                    ingredient_id: line.parsed_ingredient_id()?,
                    name: ingredient.name,
                    measurement_unit: ingredient.measurement_unit,
                    amount: line.amount,
                });
        }

        let mut tags_by_recipe: HashMap<String, Vec<Tag>> = HashMap::new();
        let tag_rows: Vec<(recipe_tags::Model, Option<tags::Model>)> = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.clone()))
            .find_also_related(tags::Entity)
            .all(&self.database)
            .await?;
        for (link, tag) in tag_rows {
            let Some(tag) = tag else { continue };
            tags_by_recipe
                .entry(link.recipe_id)
                .or_default()
                .push(Tag::try_from(tag)?);
        }

        let (favorited, in_cart, subscribed) = match viewer {
            Some(viewer) => {
                let favorited: HashSet<String> = favorites::Entity::find()
                    .filter(favorites::Column::Username.eq(viewer))
                    .filter(favorites::Column::RecipeId.is_in(recipe_ids.clone()))
                    .all(&self.database)
                    .await?
                    .into_iter()
                    .map(|entry| entry.recipe_id)
                    .collect();
                let in_cart: HashSet<String> = cart_entries::Entity::find()
                    .filter(cart_entries::Column::Username.eq(viewer))
                    .filter(cart_entries::Column::RecipeId.is_in(recipe_ids))
                    .all(&self.database)
                    .await?
                    .into_iter()
                    .map(|entry| entry.recipe_id)
                    .collect();
                let subscribed: HashSet<String> = subscriptions::Entity::find()
                    .filter(subscriptions::Column::Subscriber.eq(viewer))
                    .all(&self.database)
                    .await?
                    .into_iter()
                    .map(|entry| entry.author)
                    .collect();
                (favorited, in_cart, subscribed)
            }
            None => (HashSet::new(), HashSet::new(), HashSet::new()),
        };

        let mut recipes_out = Vec::with_capacity(pairs.len());
        for (model, author) in pairs {
            let Some(author) = author else { continue };
            recipes_out.push(Recipe {
                id: model.parsed_id()?,
                is_favorited: favorited.contains(&model.id),
                is_in_cart: in_cart.contains(&model.id),
                is_author_subscribed: subscribed.contains(&model.author),
                ingredients: lines_by_recipe.remove(&model.id).unwrap_or_default(),
                tags: tags_by_recipe.remove(&model.id).unwrap_or_default(),
                author,
                name: model.name,
                text: model.text,
                cooking_time: model.cooking_time,
                published_at: model.published_at,
            });
        }
        Ok(recipes_out)
    }

    async fn require_draft_references(
        &self,
        db_tx: &DatabaseTransaction,
        draft: &RecipeDraft,
    ) -> ResultEngine<()> {
        let ingredient_ids: Vec<String> = draft
            .lines
            .iter()
            .map(|line| line.ingredient_id.to_string())
            .collect();
        let found = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ingredient_ids))
            .count(db_tx)
            .await?;
        if found != draft.lines.len() as u64 {
            return Err(EngineError::KeyNotFound("ingredient not exists".to_string()));
        }

        if !draft.tag_ids.is_empty() {
            let tag_ids: Vec<String> = draft.tag_ids.iter().map(|id| id.to_string()).collect();
            let found = tags::Entity::find()
                .filter(tags::Column::Id.is_in(tag_ids))
                .count(db_tx)
                .await?;
            if found != draft.tag_ids.len() as u64 {
                return Err(EngineError::KeyNotFound("tag not exists".to_string()));
            }
        }
        Ok(())
    }
}

fn validate_draft(draft: &RecipeDraft) -> ResultEngine<()> {
    if draft.cooking_time < 1 {
        return Err(EngineError::InvalidAmount(
            "cooking_time must be at least 1 minute".to_string(),
        ));
    }
    if draft.lines.is_empty() {
        return Err(EngineError::InvalidAmount(
            "at least one ingredient line is required".to_string(),
        ));
    }

    let mut seen_ingredients = HashSet::new();
    for line in &draft.lines {
        if line.amount < 1 {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        if !seen_ingredients.insert(line.ingredient_id) {
            return Err(EngineError::InvalidAmount(
                "duplicate ingredient in recipe".to_string(),
            ));
        }
    }

    let mut seen_tags = HashSet::new();
    for tag_id in &draft.tag_ids {
        if !seen_tags.insert(*tag_id) {
            return Err(EngineError::InvalidAmount(
                "duplicate tag in recipe".to_string(),
            ));
        }
    }
    Ok(())
}

async fn insert_lines_and_tags(
    db_tx: &DatabaseTransaction,
    recipe_id: Uuid,
    draft: &RecipeDraft,
) -> ResultEngine<()> {
    for line in &draft.lines {
        recipe_ingredients::active_model(recipe_id, line.ingredient_id, line.amount)
            .insert(db_tx)
            .await?;
    }
    for tag_id in &draft.tag_ids {
        let link = recipe_tags::ActiveModel {
            recipe_id: ActiveValue::Set(recipe_id.to_string()),
            tag_id: ActiveValue::Set(tag_id.to_string()),
        };
        link.insert(db_tx).await?;
    }
    Ok(())
}

/// The builder for `Engine`.
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database.
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`.
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with(lines: Vec<LineDraft>) -> RecipeDraft {
        RecipeDraft {
            name: "Pancakes".to_string(),
            text: "Mix and fry.".to_string(),
            cooking_time: 20,
            lines,
            tag_ids: Vec::new(),
        }
    }

    #[test]
    fn draft_rejects_non_positive_amount() {
        let draft = draft_with(vec![LineDraft {
            ingredient_id: Uuid::new_v4(),
            amount: 0,
        }]);
        assert_eq!(
            validate_draft(&draft),
            Err(EngineError::InvalidAmount("amount must be > 0".to_string()))
        );
    }

    #[test]
    fn draft_rejects_duplicate_ingredient() {
        let ingredient_id = Uuid::new_v4();
        let draft = draft_with(vec![
            LineDraft {
                ingredient_id,
                amount: 1,
            },
            LineDraft {
                ingredient_id,
                amount: 2,
            },
        ]);
        assert_eq!(
            validate_draft(&draft),
            Err(EngineError::InvalidAmount(
                "duplicate ingredient in recipe".to_string()
            ))
        );
    }

    #[test]
    fn draft_rejects_empty_lines() {
        let draft = draft_with(Vec::new());
        assert!(matches!(
            validate_draft(&draft),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn draft_rejects_zero_cooking_time() {
        let mut draft = draft_with(vec![LineDraft {
            ingredient_id: Uuid::new_v4(),
            amount: 1,
        }]);
        draft.cooking_time = 0;
        assert!(matches!(
            validate_draft(&draft),
            Err(EngineError::InvalidAmount(_))
        ));
    }
}

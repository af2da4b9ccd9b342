use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, Database, DatabaseConnection};
use uuid::Uuid;

use engine::{Engine, LineDraft, RecipeDraft, recipes, render_shopping_list};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let engine = Engine::builder().database(db.clone()).build();
    engine
        .new_user("alice", "alice@example.com", "password", "Alice", "A")
        .await
        .unwrap();
    (engine, db)
}

fn draft(name: &str, lines: Vec<LineDraft>) -> RecipeDraft {
    RecipeDraft {
        name: name.to_string(),
        text: format!("How to make {name}."),
        cooking_time: 10,
        lines,
        tag_ids: Vec::new(),
    }
}

fn line(ingredient_id: Uuid, amount: i64) -> LineDraft {
    LineDraft {
        ingredient_id,
        amount,
    }
}

/// Seeds the two-recipe pantry used by most scenarios: Pancakes
/// (Flour 200, Egg 2) and Porridge (Flour 100, Milk 50).
async fn seed_pancakes_and_porridge(engine: &Engine) -> (Uuid, Uuid) {
    let flour = engine.new_ingredient("Flour", "g").await.unwrap();
    let egg = engine.new_ingredient("Egg", "pcs").await.unwrap();
    let milk = engine.new_ingredient("Milk", "ml").await.unwrap();

    let pancakes = engine
        .new_recipe(
            "alice",
            &draft("Pancakes", vec![line(flour, 200), line(egg, 2)]),
        )
        .await
        .unwrap();
    let porridge = engine
        .new_recipe(
            "alice",
            &draft("Porridge", vec![line(flour, 100), line(milk, 50)]),
        )
        .await
        .unwrap();

    (pancakes, porridge)
}

#[tokio::test]
async fn empty_cart_yields_header_only_document() {
    let (engine, _db) = engine_with_db().await;

    let lines = engine.shopping_list("alice").await.unwrap();

    assert!(lines.is_empty());
    assert_eq!(render_shopping_list(&lines), "Your shopping list:\n\n");
}

#[tokio::test]
async fn cart_merges_shared_ingredients_across_recipes() {
    let (engine, _db) = engine_with_db().await;
    let (pancakes, porridge) = seed_pancakes_and_porridge(&engine).await;

    engine.add_to_cart("alice", pancakes).await.unwrap();
    engine.add_to_cart("alice", porridge).await.unwrap();

    let lines = engine.shopping_list("alice").await.unwrap();
    let rendered: Vec<(String, String, i64)> = lines
        .iter()
        .map(|l| (l.name.clone(), l.measurement_unit.clone(), l.total_amount))
        .collect();

    assert_eq!(
        rendered,
        vec![
            ("Egg".to_string(), "pcs".to_string(), 2),
            ("Flour".to_string(), "g".to_string(), 300),
            ("Milk".to_string(), "ml".to_string(), 50),
        ]
    );
    assert_eq!(
        render_shopping_list(&lines),
        "Your shopping list:\n\nEgg, pcs, 2\nFlour, g, 300\nMilk, ml, 50"
    );
}

#[tokio::test]
async fn removing_cart_entry_drops_its_contribution() {
    let (engine, _db) = engine_with_db().await;
    let (pancakes, porridge) = seed_pancakes_and_porridge(&engine).await;

    engine.add_to_cart("alice", pancakes).await.unwrap();
    engine.add_to_cart("alice", porridge).await.unwrap();
    engine.remove_from_cart("alice", porridge).await.unwrap();

    let lines = engine.shopping_list("alice").await.unwrap();
    let rendered: Vec<(String, i64)> = lines
        .iter()
        .map(|l| (l.name.clone(), l.total_amount))
        .collect();

    assert_eq!(
        rendered,
        vec![("Egg".to_string(), 2), ("Flour".to_string(), 200)]
    );
}

#[tokio::test]
async fn favorites_do_not_enter_the_shopping_list() {
    let (engine, _db) = engine_with_db().await;
    let (pancakes, _porridge) = seed_pancakes_and_porridge(&engine).await;

    engine.favorite("alice", pancakes).await.unwrap();

    let lines = engine.shopping_list("alice").await.unwrap();
    assert!(lines.is_empty());
}

#[tokio::test]
async fn deleting_a_recipe_removes_it_from_carts() {
    let (engine, _db) = engine_with_db().await;
    let (pancakes, porridge) = seed_pancakes_and_porridge(&engine).await;

    engine.add_to_cart("alice", pancakes).await.unwrap();
    engine.add_to_cart("alice", porridge).await.unwrap();
    engine.delete_recipe(porridge, "alice").await.unwrap();

    let lines = engine.shopping_list("alice").await.unwrap();
    let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();

    assert_eq!(names, vec!["Egg", "Flour"]);
}

#[tokio::test]
async fn carts_are_per_user() {
    let (engine, _db) = engine_with_db().await;
    engine
        .new_user("bob", "bob@example.com", "password", "Bob", "B")
        .await
        .unwrap();
    let (pancakes, porridge) = seed_pancakes_and_porridge(&engine).await;

    engine.add_to_cart("alice", pancakes).await.unwrap();
    engine.add_to_cart("bob", porridge).await.unwrap();

    let alice_lines = engine.shopping_list("alice").await.unwrap();
    let bob_lines = engine.shopping_list("bob").await.unwrap();

    let alice_names: Vec<&str> = alice_lines.iter().map(|l| l.name.as_str()).collect();
    let bob_names: Vec<&str> = bob_lines.iter().map(|l| l.name.as_str()).collect();

    assert_eq!(alice_names, vec!["Egg", "Flour"]);
    assert_eq!(bob_names, vec!["Flour", "Milk"]);
}

#[tokio::test]
async fn shopping_list_is_stable_across_calls() {
    let (engine, _db) = engine_with_db().await;
    let (pancakes, porridge) = seed_pancakes_and_porridge(&engine).await;

    engine.add_to_cart("alice", pancakes).await.unwrap();
    engine.add_to_cart("alice", porridge).await.unwrap();

    let first = engine.shopping_list("alice").await.unwrap();
    let second = engine.shopping_list("alice").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn line_less_recipe_in_cart_yields_empty_list() {
    let (engine, db) = engine_with_db().await;

    // A recipe without ingredient lines cannot be created through the
    // engine, but old rows may lose their lines to manual cleanup.
    let recipe_id = Uuid::new_v4();
    recipes::ActiveModel {
        id: ActiveValue::Set(recipe_id.to_string()),
        author: ActiveValue::Set("alice".to_string()),
        name: ActiveValue::Set("Boiled water".to_string()),
        text: ActiveValue::Set("Boil.".to_string()),
        cooking_time: ActiveValue::Set(5),
        published_at: ActiveValue::Set(Utc::now()),
    }
    .insert(&db)
    .await
    .unwrap();

    engine.add_to_cart("alice", recipe_id).await.unwrap();

    let lines = engine.shopping_list("alice").await.unwrap();
    assert!(lines.is_empty());
    assert_eq!(render_shopping_list(&lines), "Your shopping list:\n\n");
}

#[tokio::test]
async fn same_name_different_unit_stays_split() {
    let (engine, _db) = engine_with_db().await;

    let sugar_g = engine.new_ingredient("Sugar", "g").await.unwrap();
    let sugar_tbsp = engine.new_ingredient("Sugar", "tbsp").await.unwrap();

    let recipe = engine
        .new_recipe(
            "alice",
            &draft("Syrup", vec![line(sugar_g, 100), line(sugar_tbsp, 2)]),
        )
        .await
        .unwrap();
    engine.add_to_cart("alice", recipe).await.unwrap();

    let lines = engine.shopping_list("alice").await.unwrap();
    let rendered: Vec<(String, String, i64)> = lines
        .iter()
        .map(|l| (l.name.clone(), l.measurement_unit.clone(), l.total_amount))
        .collect();

    assert_eq!(
        rendered,
        vec![
            ("Sugar".to_string(), "g".to_string(), 100),
            ("Sugar".to_string(), "tbsp".to_string(), 2),
        ]
    );
}

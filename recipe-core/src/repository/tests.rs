//! Repository Layer Tests

use super::*;
use crate::domain::{Recipe, RecipeDraft};
use crate::reducer::{Commit, CommitOutcome};
use chrono::Utc;

const SEED: &str = r#"{"site":{"categories":[
    {"_id":"","category":"Soups","priority":2},
    {"category":"Mains","priority":1,"itemPages":[
        {"title":"Stew","preparation":"simmer"},
        {"title":"Roast","preparation":"bake"}
    ]}
]}}"#;

fn seeded() -> MemoryRecipeStore {
    MemoryRecipeStore::from_json(SEED).unwrap()
}

#[tokio::test]
async fn test_memory_store_assigns_canonical_ids_on_seed() {
    let store = seeded();
    let catalog = store.load().await.unwrap();
    let names: Vec<_> = catalog.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Mains", "Soups"]);
    assert!(catalog.categories.iter().all(|c| c.id.starts_with("cat-")));

    let mains = &catalog.categories[0];
    assert!(mains.recipes.iter().all(|r| r.id.starts_with("rec-")));
    assert_eq!(mains.recipes[1].category_id.as_deref(), Some(mains.id.as_str()));
}

#[tokio::test]
async fn test_memory_store_add_category_appends() {
    let store = seeded();
    let added = store.commit_category_add("Desserts").await.unwrap();
    assert_eq!(added.display_order, 3);
    assert!(added.created_at.is_some());

    let catalog = store.snapshot();
    assert_eq!(catalog.categories.last().unwrap().id, added.id);
}

#[tokio::test]
async fn test_memory_store_delete_compacts_order() {
    let store = seeded();
    let first = store.snapshot().categories[0].id.clone();
    store.commit_category_delete(&first).await.unwrap();

    let catalog = store.snapshot();
    assert_eq!(catalog.categories.len(), 1);
    assert_eq!(catalog.categories[0].display_order, 1);
}

#[tokio::test]
async fn test_memory_store_unknown_ids_are_not_found() {
    let store = seeded();
    let err = store.commit_recipe_delete("missing").await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 404, .. }));

    let err = store
        .commit_recipe_reorder("missing", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_memory_store_update_keeps_order() {
    let store = seeded();
    let mut roast = store.snapshot().categories[0].recipes[1].clone();
    roast.title = "Sunday Roast".into();
    roast.display_order = 9;
    store.commit_recipe_update(&roast).await.unwrap();

    let stored = store.snapshot().categories[0].recipes[1].clone();
    assert_eq!(stored.title, "Sunday Roast");
    assert_eq!(stored.display_order, 2);
    assert!(stored.updated_at.is_some());
}

#[tokio::test]
async fn test_injected_failure_hits_only_next_write() {
    let store = seeded();
    store.fail_next(StoreError::Unreachable("offline".into()));
    assert!(store.commit_category_add("A").await.is_err());
    assert!(store.commit_category_add("A").await.is_ok());
    // loads are unaffected by queued write failures
    assert!(store.load().await.is_ok());
}

#[tokio::test]
async fn test_execute_routes_each_commit() {
    let store = seeded();
    let mains = store.snapshot().categories[0].clone();

    let recipe = Recipe::from_draft(
        "tmp-1".into(),
        &mains.id,
        3,
        RecipeDraft::titled("Curry"),
        Utc::now(),
    );
    let outcome = execute(
        &store,
        &Commit::AddRecipe {
            provisional_id: "tmp-1".into(),
            category_id: mains.id.clone(),
            recipe,
        },
    )
    .await
    .unwrap();
    let CommitOutcome::RecipeAdded(stored) = outcome else {
        panic!("expected the stored recipe");
    };
    assert!(stored.id.starts_with("rec-"));
    assert_eq!(stored.title, "Curry");

    let mut ids: Vec<String> = store.snapshot().categories[0]
        .recipes
        .iter()
        .map(|r| r.id.clone())
        .collect();
    ids.reverse();
    let outcome = execute(
        &store,
        &Commit::ReorderRecipes {
            category_id: mains.id.clone(),
            ordered_ids: ids.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(outcome, CommitOutcome::Applied);
    assert_eq!(store.snapshot().categories[0].recipes[0].id, ids[0]);
    assert_eq!(store.snapshot().categories[0].recipes[0].title, "Curry");
}

#[tokio::test]
async fn test_demo_fixture_loads_in_order() {
    let store = MemoryRecipeStore::demo().unwrap();
    let catalog = store.load().await.unwrap();
    let names: Vec<_> = catalog.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Soups", "Mains", "Salads", "Desserts"]);
    assert_eq!(catalog.recipe_count(), 5);

    let (soups, borscht) = catalog.find_recipe("r-borscht").unwrap();
    assert_eq!(soups.id, "c-soups");
    assert_eq!(borscht.ingredients.lines().len(), 6);
    assert!(borscht.created_at.is_some());
}

//! Pure catalog transitions.

use tracing::debug;

use super::intent::{Commit, CommitOutcome, Intent, Undo};
use crate::domain::{Catalog, Category, DomainError, DomainResult, Missing, Recipe};
use crate::ordering;
use crate::provision::Provisioner;

/// A commit together with the way to take it back
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub commit: Commit,
    pub undo: Undo,
}

/// Next snapshot; `change` is `None` when the intent was a no-op
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: Catalog,
    pub change: Option<Change>,
}

fn missing_category(id: &str) -> DomainError {
    DomainError::NotFound(Missing::Category(id.to_string()))
}

fn missing_recipe(id: &str) -> DomainError {
    DomainError::NotFound(Missing::Recipe(id.to_string()))
}

/// Compute the next catalog for `intent` without touching `catalog`
pub fn apply(
    catalog: &Catalog,
    intent: &Intent,
    provisioner: &mut dyn Provisioner,
) -> DomainResult<Transition> {
    let mut next = catalog.clone();

    let change = match intent {
        Intent::AddCategory { name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::Validation("category name is required".to_string()));
            }
            let id = provisioner.provisional_id();
            let order = ordering::next_order(&next.categories);
            next.categories.push(Category::new(
                id.clone(),
                name.to_string(),
                order,
                provisioner.now(),
            ));
            Some(Change {
                commit: Commit::AddCategory {
                    provisional_id: id.clone(),
                    name: name.to_string(),
                },
                undo: Undo::RemoveCategory { id },
            })
        }

        Intent::DeleteCategory { id } => {
            let index = next.category_index(id).ok_or_else(|| missing_category(id))?;
            let category = next.categories.remove(index);
            ordering::reindex(&mut next.categories);
            Some(Change {
                commit: Commit::DeleteCategory { id: id.clone() },
                undo: Undo::RestoreCategory { index, category },
            })
        }

        Intent::ReorderCategories { from, to } => {
            let previous = ordering::ordered_ids(&next.categories);
            if ordering::reorder(&mut next.categories, *from, *to)? {
                Some(Change {
                    commit: Commit::ReorderCategories {
                        ordered_ids: ordering::ordered_ids(&next.categories),
                    },
                    undo: Undo::RestoreCategoryOrder { ordered_ids: previous },
                })
            } else {
                None
            }
        }

        Intent::AddRecipe { category_id, draft } => {
            draft.validate()?;
            let now = provisioner.now();
            let category = next
                .category_mut(category_id)
                .ok_or_else(|| missing_category(category_id))?;
            let id = provisioner.provisional_id();
            let recipe = Recipe::from_draft(
                id.clone(),
                category_id,
                ordering::next_order(&category.recipes),
                draft.clone(),
                now,
            );
            category.recipes.push(recipe.clone());
            Some(Change {
                commit: Commit::AddRecipe {
                    provisional_id: id.clone(),
                    category_id: category_id.clone(),
                    recipe,
                },
                undo: Undo::RemoveRecipe { id },
            })
        }

        Intent::UpdateRecipe { recipe_id, draft } => {
            draft.validate()?;
            let (ci, ri) = next
                .locate_recipe(recipe_id)
                .ok_or_else(|| missing_recipe(recipe_id))?;
            let recipe = &mut next.categories[ci].recipes[ri];
            let previous = recipe.clone();
            recipe.apply_draft(draft.clone(), provisioner.now());
            Some(Change {
                commit: Commit::UpdateRecipe {
                    recipe: recipe.clone(),
                },
                undo: Undo::RestoreRecipe { recipe: previous },
            })
        }

        Intent::DeleteRecipe { recipe_id } => {
            let (ci, ri) = next
                .locate_recipe(recipe_id)
                .ok_or_else(|| missing_recipe(recipe_id))?;
            let category = &mut next.categories[ci];
            let recipe = category.recipes.remove(ri);
            ordering::reindex(&mut category.recipes);
            Some(Change {
                commit: Commit::DeleteRecipe {
                    id: recipe_id.clone(),
                },
                undo: Undo::ReinsertRecipe {
                    category_id: category.id.clone(),
                    index: ri,
                    recipe,
                },
            })
        }

        Intent::ReorderRecipes {
            category_id,
            from,
            to,
        } => {
            let category = next
                .category_mut(category_id)
                .ok_or_else(|| missing_category(category_id))?;
            let previous = ordering::ordered_ids(&category.recipes);
            if ordering::reorder(&mut category.recipes, *from, *to)? {
                Some(Change {
                    commit: Commit::ReorderRecipes {
                        category_id: category_id.clone(),
                        ordered_ids: ordering::ordered_ids(&category.recipes),
                    },
                    undo: Undo::RestoreRecipeOrder {
                        category_id: category_id.clone(),
                        ordered_ids: previous,
                    },
                })
            } else {
                None
            }
        }
    };

    debug!(?intent, changed = change.is_some(), "applied intent");
    Ok(Transition { next, change })
}

/// Take back an optimistic change. Entities touched by other commits in
/// the meantime are left alone.
pub fn revert(catalog: &mut Catalog, undo: &Undo) {
    match undo {
        Undo::RemoveCategory { id } => {
            catalog.categories.retain(|c| &c.id != id);
            ordering::reindex(&mut catalog.categories);
        }
        Undo::RestoreCategory { index, category } => {
            if catalog.category(&category.id).is_none() {
                let at = (*index).min(catalog.categories.len());
                catalog.categories.insert(at, category.clone());
                ordering::reindex(&mut catalog.categories);
            }
        }
        Undo::RestoreCategoryOrder { ordered_ids } => {
            ordering::restore_order(&mut catalog.categories, ordered_ids);
        }
        Undo::RemoveRecipe { id } => {
            if let Some((ci, ri)) = catalog.locate_recipe(id) {
                let recipes = &mut catalog.categories[ci].recipes;
                recipes.remove(ri);
                ordering::reindex(recipes);
            }
        }
        Undo::RestoreRecipe { recipe } => {
            if let Some((ci, ri)) = catalog.locate_recipe(&recipe.id) {
                let slot = &mut catalog.categories[ci].recipes[ri];
                let order = slot.display_order;
                *slot = recipe.clone();
                slot.display_order = order;
            }
        }
        Undo::ReinsertRecipe {
            category_id,
            index,
            recipe,
        } => {
            if catalog.locate_recipe(&recipe.id).is_some() {
                return;
            }
            if let Some(category) = catalog.category_mut(category_id) {
                let at = (*index).min(category.recipes.len());
                category.recipes.insert(at, recipe.clone());
                ordering::reindex(&mut category.recipes);
            }
        }
        Undo::RestoreRecipeOrder {
            category_id,
            ordered_ids,
        } => {
            if let Some(category) = catalog.category_mut(category_id) {
                ordering::restore_order(&mut category.recipes, ordered_ids);
            }
        }
    }
}

/// Swap provisional ids for the canonical ones the store assigned
pub fn reconcile(catalog: &mut Catalog, commit: &Commit, outcome: &CommitOutcome) {
    match (commit, outcome) {
        (Commit::AddCategory { provisional_id, .. }, CommitOutcome::CategoryAdded(stored)) => {
            let Some(category) = catalog.category_mut(provisional_id) else {
                return;
            };
            if !stored.id.is_empty() {
                category.id = stored.id.clone();
                for recipe in &mut category.recipes {
                    recipe.category_id = Some(stored.id.clone());
                }
            }
            category.created_at = stored.created_at.or(category.created_at);
            category.updated_at = stored.updated_at.or(category.updated_at);
            if stored.image_url.is_some() {
                category.image_url = stored.image_url.clone();
            }
        }
        (Commit::AddRecipe { provisional_id, .. }, CommitOutcome::RecipeAdded(stored)) => {
            let Some((ci, ri)) = catalog.locate_recipe(provisional_id) else {
                return;
            };
            let recipe = &mut catalog.categories[ci].recipes[ri];
            if !stored.id.is_empty() {
                recipe.id = stored.id.clone();
            }
            recipe.created_at = stored.created_at.or(recipe.created_at);
            recipe.updated_at = stored.updated_at.or(recipe.updated_at);
            if stored.image_url.is_some() {
                recipe.image_url = stored.image_url.clone();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecipeDraft;
    use crate::provision::StepProvisioner;

    fn sample() -> Catalog {
        let raw = r#"{"categories":[
            {"id":"soups","name":"Soups","displayOrder":1,"recipes":[
                {"id":"r1","title":"Borscht","ingredients":"beet","preparationSteps":"boil"},
                {"id":"r2","title":"Minestrone","ingredients":"beans","preparationSteps":"simmer"}
            ]},
            {"id":"salads","name":"Salads","displayOrder":2},
            {"id":"mains","name":"Mains","displayOrder":3}
        ]}"#;
        Catalog::from_json(raw).unwrap()
    }

    fn category_orders(catalog: &Catalog) -> Vec<(&str, u32)> {
        catalog
            .categories
            .iter()
            .map(|c| (c.name.as_str(), c.display_order))
            .collect()
    }

    #[test]
    fn test_reorder_categories_scenario() {
        let catalog = sample();
        let mut ids = StepProvisioner::new();
        let t = apply(&catalog, &Intent::ReorderCategories { from: 2, to: 0 }, &mut ids).unwrap();
        assert_eq!(
            category_orders(&t.next),
            vec![("Mains", 1), ("Soups", 2), ("Salads", 3)]
        );
        let change = t.change.unwrap();
        assert_eq!(
            change.commit,
            Commit::ReorderCategories {
                ordered_ids: vec!["mains".into(), "soups".into(), "salads".into()]
            }
        );
        // the input snapshot is untouched
        assert_eq!(catalog.categories[0].name, "Soups");
    }

    #[test]
    fn test_noop_reorder_has_no_commit() {
        let mut ids = StepProvisioner::new();
        let t = apply(&sample(), &Intent::ReorderCategories { from: 1, to: 1 }, &mut ids).unwrap();
        assert!(t.change.is_none());
    }

    #[test]
    fn test_add_recipe_appends_with_trailing_order() {
        let mut ids = StepProvisioner::new();
        let intent = Intent::AddRecipe {
            category_id: "soups".into(),
            draft: RecipeDraft::titled("Tea"),
        };
        let t = apply(&sample(), &intent, &mut ids).unwrap();
        let soups = t.next.category("soups").unwrap();
        assert_eq!(soups.recipes.len(), 3);
        let tea = &soups.recipes[2];
        assert_eq!((tea.title.as_str(), tea.display_order), ("Tea", 3));
        assert_eq!(tea.id, "tmp-1");
        assert!(matches!(t.change.unwrap().undo, Undo::RemoveRecipe { ref id } if id == "tmp-1"));
    }

    #[test]
    fn test_add_category_appends_and_validates() {
        let mut ids = StepProvisioner::new();
        let t = apply(&sample(), &Intent::AddCategory { name: "  Drinks ".into() }, &mut ids)
            .unwrap();
        let last = t.next.categories.last().unwrap();
        assert_eq!((last.name.as_str(), last.display_order), ("Drinks", 4));

        let err = apply(&sample(), &Intent::AddCategory { name: " ".into() }, &mut ids);
        assert!(matches!(err, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_delete_recipe_removes_exactly_one() {
        let mut catalog = sample();
        let mut ids = StepProvisioner::new();
        for title in ["A", "B", "C"] {
            let intent = Intent::AddRecipe {
                category_id: "soups".into(),
                draft: RecipeDraft::titled(title),
            };
            catalog = apply(&catalog, &intent, &mut ids).unwrap().next;
        }
        let t = apply(&catalog, &Intent::DeleteRecipe { recipe_id: "tmp-2".into() }, &mut ids)
            .unwrap();
        let titles: Vec<_> = t.next.category("soups").unwrap().recipes.iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Borscht", "Minestrone", "A", "C"]);
        assert!(crate::ordering::is_contiguous(&t.next.category("soups").unwrap().recipes));
    }

    #[test]
    fn test_update_replaces_editable_fields_only() {
        let catalog = sample();
        let mut ids = StepProvisioner::new();
        let mut draft = RecipeDraft::titled("Cold Borscht");
        draft.preparation_steps = "chill".into();
        let t = apply(
            &catalog,
            &Intent::UpdateRecipe { recipe_id: "r1".into(), draft },
            &mut ids,
        )
        .unwrap();
        let (_, recipe) = t.next.find_recipe("r1").unwrap();
        assert_eq!(recipe.title, "Cold Borscht");
        assert_eq!(recipe.preparation_steps, "chill");
        assert_eq!(recipe.ingredients, Default::default());
        assert_eq!(recipe.display_order, 1);
        assert_eq!(recipe.updated_at, Some(ids.at));
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let mut ids = StepProvisioner::new();
        let err = apply(&sample(), &Intent::DeleteCategory { id: "nope".into() }, &mut ids);
        assert!(matches!(err, Err(DomainError::NotFound(Missing::Category(_)))));
        let err = apply(&sample(), &Intent::DeleteRecipe { recipe_id: "nope".into() }, &mut ids);
        assert!(matches!(err, Err(DomainError::NotFound(Missing::Recipe(_)))));
    }

    #[test]
    fn test_revert_undoes_each_change() {
        let intents = vec![
            Intent::AddCategory { name: "Drinks".into() },
            Intent::DeleteCategory { id: "salads".into() },
            Intent::ReorderCategories { from: 0, to: 2 },
            Intent::AddRecipe { category_id: "soups".into(), draft: RecipeDraft::titled("Tea") },
            Intent::UpdateRecipe { recipe_id: "r2".into(), draft: RecipeDraft::titled("X") },
            Intent::DeleteRecipe { recipe_id: "r1".into() },
            Intent::ReorderRecipes { category_id: "soups".into(), from: 1, to: 0 },
        ];
        for intent in intents {
            let catalog = sample();
            let mut ids = StepProvisioner::new();
            let t = apply(&catalog, &intent, &mut ids).unwrap();
            let mut next = t.next;
            revert(&mut next, &t.change.unwrap().undo);
            assert_eq!(next, catalog, "revert of {:?}", intent);
        }
    }

    #[test]
    fn test_reconcile_swaps_provisional_ids() {
        let mut ids = StepProvisioner::new();
        let t = apply(&sample(), &Intent::AddCategory { name: "Drinks".into() }, &mut ids)
            .unwrap();
        let mut next = t.next;
        let commit = t.change.unwrap().commit;
        let stored = Category::new("cat-9".into(), "Drinks".into(), 4, ids.at);
        reconcile(&mut next, &commit, &CommitOutcome::CategoryAdded(stored));
        assert!(next.category("tmp-1").is_none());
        assert_eq!(next.category("cat-9").unwrap().display_order, 4);
    }
}

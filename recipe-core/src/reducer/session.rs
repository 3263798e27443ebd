//! Optimistic Session
//!
//! Applies transitions locally before the store confirms them. A failed
//! commit is reverted and reported with the intent needed to retry it.

use std::collections::BTreeSet;

use tracing::{info, warn};

use super::apply::{apply, reconcile, revert};
use super::intent::{Commit, CommitOutcome, FlightKey, Intent, Undo};
use crate::domain::{Catalog, DomainError, DomainResult};
use crate::provision::Provisioner;
use crate::repository::{execute, RecipeStore, StoreResult};

/// A commit that has been applied locally but not yet confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit {
    pub intent: Intent,
    pub commit: Commit,
    undo: Undo,
    keys: Vec<FlightKey>,
}

/// Local catalog plus the set of entities with a commit in flight
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSession {
    catalog: Catalog,
    in_flight: BTreeSet<FlightKey>,
}

impl CatalogSession {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: catalog.normalized(),
            in_flight: BTreeSet::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the local graph with a freshly loaded one
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog.normalized();
    }

    pub fn is_busy(&self, key: &FlightKey) -> bool {
        self.in_flight.contains(key)
    }

    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Load the whole graph. On failure the current graph is kept as is.
    pub async fn load(&mut self, store: &dyn RecipeStore) -> DomainResult<()> {
        match store.load().await {
            Ok(catalog) => {
                info!(categories = catalog.categories.len(), "catalog loaded");
                self.replace_catalog(catalog);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "catalog load failed");
                Err(DomainError::StoreUnavailable(err.to_string()))
            }
        }
    }

    /// Apply `intent` locally and claim its flight keys.
    /// Returns `None` when the intent changes nothing.
    pub fn begin(
        &mut self,
        intent: Intent,
        provisioner: &mut dyn Provisioner,
    ) -> DomainResult<Option<PendingCommit>> {
        let transition = apply(&self.catalog, &intent, provisioner)?;
        let Some(change) = transition.change else {
            return Ok(None);
        };

        let keys = change.commit.flight_keys();
        if let Some(busy) = keys.iter().find(|key| self.in_flight.contains(*key)) {
            warn!(key = %busy, "rejected intent while a commit is in flight");
            return Err(DomainError::InFlight(busy.clone()));
        }

        self.in_flight.extend(keys.iter().cloned());
        self.catalog = transition.next;
        info!(commit = %change.commit, "optimistic update applied");

        Ok(Some(PendingCommit {
            intent,
            commit: change.commit,
            undo: change.undo,
            keys,
        }))
    }

    /// Settle a pending commit: reconcile on success, revert on failure
    pub fn finish(
        &mut self,
        pending: PendingCommit,
        result: StoreResult<CommitOutcome>,
    ) -> DomainResult<CommitOutcome> {
        for key in &pending.keys {
            self.in_flight.remove(key);
        }

        match result {
            Ok(outcome) => {
                reconcile(&mut self.catalog, &pending.commit, &outcome);
                info!(commit = %pending.commit, "commit confirmed");
                Ok(outcome)
            }
            Err(err) => {
                warn!(commit = %pending.commit, error = %err, "commit failed, reverting");
                revert(&mut self.catalog, &pending.undo);
                Err(DomainError::Persistence {
                    commit: pending.commit,
                    retry: pending.intent,
                    reason: err.to_string(),
                })
            }
        }
    }

    /// begin, commit through `store`, finish
    pub async fn dispatch(
        &mut self,
        store: &dyn RecipeStore,
        intent: Intent,
        provisioner: &mut dyn Provisioner,
    ) -> DomainResult<CommitOutcome> {
        let Some(pending) = self.begin(intent, provisioner)? else {
            return Ok(CommitOutcome::Applied);
        };
        let result = execute(store, &pending.commit).await;
        self.finish(pending, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecipeDraft;
    use crate::provision::StepProvisioner;
    use crate::repository::{MemoryRecipeStore, StoreError};

    const SEED: &str = r#"{"categories":[
        {"id":"soups","name":"Soups","displayOrder":1,"recipes":[
            {"id":"r1","title":"Borscht","ingredients":"beet","preparationSteps":"boil"}
        ]},
        {"id":"salads","name":"Salads","displayOrder":2}
    ]}"#;

    async fn loaded() -> (CatalogSession, MemoryRecipeStore) {
        let store = MemoryRecipeStore::from_json(SEED).unwrap();
        let mut session = CatalogSession::default();
        session.load(&store).await.unwrap();
        (session, store)
    }

    #[tokio::test]
    async fn test_add_category_gets_canonical_id() {
        let (mut session, store) = loaded().await;
        let mut ids = StepProvisioner::new();
        let outcome = session
            .dispatch(&store, Intent::AddCategory { name: "Mains".into() }, &mut ids)
            .await
            .unwrap();
        let CommitOutcome::CategoryAdded(stored) = outcome else {
            panic!("expected a stored category");
        };
        let local = session.catalog().categories.last().unwrap();
        assert_eq!(local.id, stored.id);
        assert_ne!(local.id, "tmp-1");
        assert_eq!(local.display_order, 3);
        assert_eq!(session.pending_count(), 0);
        assert_eq!(store.snapshot().categories.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_commit_reverts_and_offers_retry() {
        let (mut session, store) = loaded().await;
        let before = session.catalog().clone();
        let mut ids = StepProvisioner::new();
        store.fail_next(StoreError::Status {
            status: 500,
            message: "boom".into(),
        });

        let intent = Intent::ReorderCategories { from: 1, to: 0 };
        let err = session
            .dispatch(&store, intent.clone(), &mut ids)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence { .. }));
        assert_eq!(err.retry_intent(), Some(&intent));
        assert_eq!(session.catalog(), &before);
        assert!(!session.is_busy(&FlightKey::CategoryOrder));

        // retry goes through once the store recovers
        session.dispatch(&store, intent, &mut ids).await.unwrap();
        assert_eq!(session.catalog().categories[0].name, "Salads");
        assert_eq!(store.snapshot().categories[0].name, "Salads");
    }

    #[tokio::test]
    async fn test_second_submission_for_same_entity_is_rejected() {
        let (mut session, _store) = loaded().await;
        let mut ids = StepProvisioner::new();
        let update = |title: &str| Intent::UpdateRecipe {
            recipe_id: "r1".into(),
            draft: RecipeDraft::titled(title),
        };

        let first = session.begin(update("One"), &mut ids).unwrap().unwrap();
        assert!(session.is_busy(&FlightKey::Recipe("r1".into())));
        let second = session.begin(update("Two"), &mut ids);
        assert!(matches!(second, Err(DomainError::InFlight(FlightKey::Recipe(_)))));

        // other entities proceed independently
        let other = session
            .begin(Intent::AddCategory { name: "Mains".into() }, &mut ids)
            .unwrap();
        assert!(other.is_some());

        session.finish(first, Ok(CommitOutcome::Applied)).unwrap();
        assert!(session.begin(update("Two"), &mut ids).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reorder_waits_for_pending_add() {
        let (mut session, store) = loaded().await;
        let mut ids = StepProvisioner::new();
        let add = session
            .begin(
                Intent::AddRecipe {
                    category_id: "soups".into(),
                    draft: RecipeDraft::titled("Tea"),
                },
                &mut ids,
            )
            .unwrap()
            .unwrap();

        let reorder = Intent::ReorderRecipes {
            category_id: "soups".into(),
            from: 1,
            to: 0,
        };
        assert!(matches!(
            session.begin(reorder.clone(), &mut ids),
            Err(DomainError::InFlight(FlightKey::RecipeOrder(_)))
        ));

        let result = execute(&store, &add.commit).await;
        session.finish(add, result).unwrap();
        session.dispatch(&store, reorder, &mut ids).await.unwrap();

        let titles = |catalog: &Catalog| -> Vec<String> {
            catalog.category("soups").unwrap().recipes.iter().map(|r| r.title.clone()).collect()
        };
        assert_eq!(titles(session.catalog()), vec!["Tea", "Borscht"]);
        assert_eq!(titles(&store.snapshot()), titles(session.catalog()));
    }

    #[tokio::test]
    async fn test_category_reorder_waits_for_pending_add() {
        let (mut session, store) = loaded().await;
        let mut ids = StepProvisioner::new();
        let add = session
            .begin(Intent::AddCategory { name: "Mains".into() }, &mut ids)
            .unwrap()
            .unwrap();
        let reorder = Intent::ReorderCategories { from: 2, to: 0 };
        assert!(matches!(
            session.begin(reorder.clone(), &mut ids),
            Err(DomainError::InFlight(FlightKey::CategoryOrder))
        ));

        let result = execute(&store, &add.commit).await;
        session.finish(add, result).unwrap();
        session.dispatch(&store, reorder, &mut ids).await.unwrap();

        let names = |catalog: &Catalog| -> Vec<String> {
            catalog.categories.iter().map(|c| c.name.clone()).collect()
        };
        assert_eq!(names(session.catalog()), vec!["Mains", "Soups", "Salads"]);
        assert_eq!(names(&store.snapshot()), names(session.catalog()));
    }

    #[tokio::test]
    async fn test_recipe_form_key_is_held_while_saving() {
        let (mut session, _store) = loaded().await;
        let mut ids = StepProvisioner::new();
        let adding = FlightKey::recipe_form("soups", None);
        let editing = FlightKey::recipe_form("soups", Some("r1"));
        assert!(!session.is_busy(&adding) && !session.is_busy(&editing));

        let add = session
            .begin(
                Intent::AddRecipe {
                    category_id: "soups".into(),
                    draft: RecipeDraft::titled("Tea"),
                },
                &mut ids,
            )
            .unwrap()
            .unwrap();
        assert!(session.is_busy(&adding));
        assert!(!session.is_busy(&editing));

        let edit = session
            .begin(
                Intent::UpdateRecipe {
                    recipe_id: "r1".into(),
                    draft: RecipeDraft::titled("Beet soup"),
                },
                &mut ids,
            )
            .unwrap()
            .unwrap();
        assert!(session.is_busy(&editing));

        session.finish(add, Ok(CommitOutcome::Applied)).unwrap();
        session.finish(edit, Ok(CommitOutcome::Applied)).unwrap();
        assert!(!session.is_busy(&adding) && !session.is_busy(&editing));
    }

    #[tokio::test]
    async fn test_recipe_in_unsaved_category_waits() {
        let (mut session, _store) = loaded().await;
        let mut ids = StepProvisioner::new();
        let pending = session
            .begin(Intent::AddCategory { name: "Mains".into() }, &mut ids)
            .unwrap()
            .unwrap();
        let add = Intent::AddRecipe {
            category_id: "tmp-1".into(),
            draft: RecipeDraft::titled("Stew"),
        };
        assert!(matches!(
            session.begin(add, &mut ids),
            Err(DomainError::InFlight(FlightKey::NewRecipe(_)))
        ));
        session.finish(pending, Err(StoreError::Unreachable("offline".into()))).unwrap_err();
        assert!(session.catalog().category("tmp-1").is_none());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_current_graph() {
        let (mut session, store) = loaded().await;
        store.set_unavailable(true);
        let err = session.load(&store).await.unwrap_err();
        assert!(matches!(err, DomainError::StoreUnavailable(_)));
        assert_eq!(session.catalog().categories.len(), 2);
    }
}

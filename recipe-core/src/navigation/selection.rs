//! Selection state
//!
//! The selection is derived from the route by name, then held by id so it
//! survives reorders. After the catalog changes, [`Navigator::sync`] brings
//! route and selection back in line (renames, deletes, id swaps).

use tracing::debug;

use super::route::{Route, Tool};
use crate::domain::{Catalog, Missing};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing to show (empty catalog)
    #[default]
    None,
    Category {
        category_id: String,
    },
    Recipe {
        category_id: String,
        recipe_id: String,
    },
    /// Add-recipe dialog open over a category
    Adding {
        category_id: String,
    },
    /// One of the AI pages; the catalog selection is left behind
    Tool(Tool),
    NotFound(Missing),
}

impl Selection {
    /// Match the route against the catalog by name (case-insensitive,
    /// first in display order wins). Home selects the first category.
    pub fn resolve(catalog: &Catalog, route: &Route) -> Self {
        let named = |name: &str| {
            catalog
                .category_named(name)
                .ok_or_else(|| Missing::CategoryNamed(name.to_string()))
        };

        let resolved = match route {
            Route::Home => Ok(catalog
                .first_category()
                .map(|c| Selection::Category {
                    category_id: c.id.clone(),
                })
                .unwrap_or_default()),
            Route::Category { category } => named(category).map(|c| Selection::Category {
                category_id: c.id.clone(),
            }),
            Route::AddRecipe { category } => named(category).map(|c| Selection::Adding {
                category_id: c.id.clone(),
            }),
            Route::Recipe { category, title } => named(category).and_then(|c| {
                c.recipe_titled(title)
                    .map(|r| Selection::Recipe {
                        category_id: c.id.clone(),
                        recipe_id: r.id.clone(),
                    })
                    .ok_or_else(|| Missing::RecipeTitled {
                        category: c.name.clone(),
                        title: title.clone(),
                    })
            }),
            Route::Tool(tool) => Ok(Selection::Tool(*tool)),
            Route::Unknown(path) => Err(Missing::Path(path.clone())),
        };

        resolved.unwrap_or_else(Selection::NotFound)
    }

    pub fn category_id(&self) -> Option<&str> {
        match self {
            Selection::Category { category_id }
            | Selection::Recipe { category_id, .. }
            | Selection::Adding { category_id } => Some(category_id),
            Selection::None | Selection::Tool(_) | Selection::NotFound(_) => None,
        }
    }

    pub fn recipe_id(&self) -> Option<&str> {
        match self {
            Selection::Recipe { recipe_id, .. } => Some(recipe_id),
            _ => None,
        }
    }

    pub fn is_adding(&self) -> bool {
        matches!(self, Selection::Adding { .. })
    }

    /// Route naming this selection in `catalog`, if its ids still exist
    pub fn route_in(&self, catalog: &Catalog) -> Option<Route> {
        match self {
            Selection::None => Some(Route::Home),
            Selection::Category { category_id } => catalog.category(category_id).map(|c| {
                Route::Category {
                    category: c.name.clone(),
                }
            }),
            Selection::Adding { category_id } => catalog.category(category_id).map(|c| {
                Route::AddRecipe {
                    category: c.name.clone(),
                }
            }),
            Selection::Recipe {
                category_id,
                recipe_id,
            } => catalog.category(category_id).and_then(|c| {
                c.recipe(recipe_id).map(|r| Route::Recipe {
                    category: c.name.clone(),
                    title: r.title.clone(),
                })
            }),
            Selection::Tool(tool) => Some(Route::Tool(*tool)),
            Selection::NotFound(_) => None,
        }
    }
}

/// Current route plus the selection derived from it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Navigator {
    route: Route,
    selection: Selection,
}

impl Navigator {
    pub fn new(catalog: &Catalog, path: &str) -> Self {
        let mut nav = Self::default();
        nav.navigate(catalog, path);
        nav
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Follow a path (initial load, back/forward)
    pub fn navigate(&mut self, catalog: &Catalog, path: &str) -> &Selection {
        self.route = Route::parse(path);
        self.selection = Selection::resolve(catalog, &self.route);
        debug!(route = %self.route, selection = ?self.selection, "navigated");
        &self.selection
    }

    fn go(&mut self, route: Route, selection: Selection) -> String {
        self.route = route;
        self.selection = selection;
        self.route.to_path()
    }

    /// Select a category; returns the path to push
    pub fn select_category(&mut self, catalog: &Catalog, category_id: &str) -> Option<String> {
        let category = catalog.category(category_id)?;
        Some(self.go(
            Route::Category {
                category: category.name.clone(),
            },
            Selection::Category {
                category_id: category.id.clone(),
            },
        ))
    }

    pub fn select_recipe(&mut self, catalog: &Catalog, recipe_id: &str) -> Option<String> {
        let (category, recipe) = catalog.find_recipe(recipe_id)?;
        Some(self.go(
            Route::Recipe {
                category: category.name.clone(),
                title: recipe.title.clone(),
            },
            Selection::Recipe {
                category_id: category.id.clone(),
                recipe_id: recipe.id.clone(),
            },
        ))
    }

    pub fn start_adding(&mut self, catalog: &Catalog, category_id: &str) -> Option<String> {
        let category = catalog.category(category_id)?;
        Some(self.go(
            Route::AddRecipe {
                category: category.name.clone(),
            },
            Selection::Adding {
                category_id: category.id.clone(),
            },
        ))
    }

    pub fn open_tool(&mut self, tool: Tool) -> String {
        self.go(Route::Tool(tool), Selection::Tool(tool))
    }

    /// Close the recipe or add dialog, back to its category
    pub fn close_recipe(&mut self, catalog: &Catalog) -> Option<String> {
        let category_id = self.selection.category_id()?.to_string();
        self.select_category(catalog, &category_id)
    }

    /// Re-align after the catalog changed. Returns the path to replace the
    /// current one with when it no longer names the selection.
    pub fn sync(&mut self, catalog: &Catalog) -> Option<String> {
        if let Some(route) = self.selection.route_in(catalog) {
            if matches!(self.selection, Selection::None) {
                // empty catalog may have gained its first category
                self.selection = Selection::resolve(catalog, &self.route);
                return None;
            }
            if route == self.route {
                return None;
            }
            debug!(from = %self.route, to = %route, "selection renamed");
            self.route = route;
            return Some(self.route.to_path());
        }

        // ids gone: provisional ids swapped for canonical ones resolve by name
        let by_name = Selection::resolve(catalog, &self.route);
        if !matches!(by_name, Selection::NotFound(_)) {
            self.selection = by_name;
            return None;
        }

        // deleted: fall back to the owning category, then home
        let fallback = self
            .selection
            .category_id()
            .and_then(|id| catalog.category(id))
            .map(|c| c.id.clone());
        match fallback {
            Some(category_id) => self.select_category(catalog, &category_id),
            None if matches!(self.selection, Selection::NotFound(_)) => None,
            None => {
                self.route = Route::Home;
                self.selection = Selection::resolve(catalog, &self.route);
                Some(self.route.to_path())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"categories":[
        {"id":"c1","name":"Soups","displayOrder":1,"recipes":[
            {"id":"r1","title":"Borscht","displayOrder":1},
            {"id":"r2","title":"Minestrone","displayOrder":2}
        ]},
        {"id":"c2","name":"Salads","displayOrder":2}
    ]}"#;

    fn sample() -> Catalog {
        Catalog::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn test_resolve_by_name_case_insensitively() {
        let catalog = sample();
        let route = Route::parse("/recipes/soups/BORSCHT");
        assert_eq!(
            Selection::resolve(&catalog, &route),
            Selection::Recipe {
                category_id: "c1".into(),
                recipe_id: "r1".into()
            }
        );
    }

    #[test]
    fn test_encoded_path_resolves_to_recipe() {
        let catalog = Catalog::from_json(
            r#"{"categories":[{"id":"d","name":"Desserts","displayOrder":1,"recipes":[
                {"id":"cake","title":"Chocolate Cake","displayOrder":1}
            ]}]}"#,
        )
        .unwrap();
        let expected = Selection::Recipe {
            category_id: "d".into(),
            recipe_id: "cake".into(),
        };
        let route = Route::parse("/recipes/Desserts/Chocolate%20Cake");
        assert_eq!(
            route,
            Route::Recipe {
                category: "Desserts".into(),
                title: "Chocolate Cake".into()
            }
        );
        assert_eq!(Selection::resolve(&catalog, &route), expected);

        let shouted = Route::parse("/recipes/desserts/CHOCOLATE%20cake/");
        assert_eq!(Selection::resolve(&catalog, &shouted), expected);
    }

    #[test]
    fn test_home_selects_first_category() {
        assert_eq!(
            Selection::resolve(&sample(), &Route::Home).category_id(),
            Some("c1")
        );
        assert_eq!(
            Selection::resolve(&Catalog::default(), &Route::Home),
            Selection::None
        );
    }

    #[test]
    fn test_unresolvable_routes_are_not_found() {
        let catalog = sample();
        assert_eq!(
            Selection::resolve(&catalog, &Route::parse("/recipes/Desserts")),
            Selection::NotFound(Missing::CategoryNamed("Desserts".into()))
        );
        assert!(matches!(
            Selection::resolve(&catalog, &Route::parse("/recipes/Soups/Gazpacho")),
            Selection::NotFound(Missing::RecipeTitled { .. })
        ));
        assert!(matches!(
            Selection::resolve(&catalog, &Route::parse("/nowhere")),
            Selection::NotFound(Missing::Path(_))
        ));
    }

    #[test]
    fn test_navigator_returns_paths_to_push() {
        let catalog = sample();
        let mut nav = Navigator::new(&catalog, "/");
        assert_eq!(
            nav.select_recipe(&catalog, "r2").as_deref(),
            Some("/recipes/Soups/Minestrone")
        );
        assert_eq!(nav.close_recipe(&catalog).as_deref(), Some("/recipes/Soups"));
        assert_eq!(
            nav.start_adding(&catalog, "c2").as_deref(),
            Some("/recipes/Salads/add")
        );
        assert!(nav.selection().is_adding());
        assert_eq!(nav.select_category(&catalog, "missing"), None);
    }

    #[test]
    fn test_tool_pages_survive_catalog_changes() {
        let mut catalog = sample();
        let mut nav = Navigator::new(&catalog, "/questions");
        assert_eq!(nav.selection(), &Selection::Tool(Tool::Quiz));
        assert_eq!(nav.selection().category_id(), None);

        catalog.categories.clear();
        assert_eq!(nav.sync(&catalog), None);
        assert_eq!(nav.selection(), &Selection::Tool(Tool::Quiz));

        let catalog = sample();
        nav.select_category(&catalog, "c2");
        assert_eq!(nav.open_tool(Tool::Sql), "/sql");
        assert_eq!(nav.close_recipe(&catalog), None);
    }

    #[test]
    fn test_sync_follows_rename() {
        let mut catalog = sample();
        let mut nav = Navigator::new(&catalog, "/recipes/Soups/Borscht");
        assert_eq!(nav.sync(&catalog), None);

        catalog.categories[0].recipes[0].title = "Red Borscht".into();
        assert_eq!(
            nav.sync(&catalog).as_deref(),
            Some("/recipes/Soups/Red%20Borscht")
        );
        assert_eq!(nav.selection().recipe_id(), Some("r1"));
    }

    #[test]
    fn test_sync_after_delete_falls_back() {
        let mut catalog = sample();
        let mut nav = Navigator::new(&catalog, "/recipes/Soups/Borscht");
        catalog.categories[0].recipes.remove(0);
        assert_eq!(nav.sync(&catalog).as_deref(), Some("/recipes/Soups"));

        catalog.categories.remove(0);
        assert_eq!(nav.sync(&catalog).as_deref(), Some("/"));
        assert_eq!(nav.selection().category_id(), Some("c2"));
    }

    #[test]
    fn test_sync_after_id_swap_keeps_selection() {
        let mut catalog = sample();
        let mut nav = Navigator::new(&catalog, "/recipes/Salads");
        catalog.categories[1].id = "cat-9".into();
        assert_eq!(nav.sync(&catalog), None);
        assert_eq!(nav.selection().category_id(), Some("cat-9"));
    }
}

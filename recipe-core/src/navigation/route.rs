//! Path scheme
//!
//! `/recipes/{category}`, `/recipes/{category}/{title}` and
//! `/recipes/{category}/add`, with names percent-encoded the way
//! `encodeURIComponent` does it. The AI tools live at `/questions`,
//! `/sql` and `/project-ai`.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped by JavaScript's `encodeURIComponent`
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const ROOT: &str = "recipes";
const ADD: &str = "add";

/// Standalone AI pages outside the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Quiz,
    Sql,
    ProjectBrief,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Quiz, Tool::Sql, Tool::ProjectBrief];

    pub fn segment(self) -> &'static str {
        match self {
            Tool::Quiz => "questions",
            Tool::Sql => "sql",
            Tool::ProjectBrief => "project-ai",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Quiz => "Quiz",
            Tool::Sql => "SQL helper",
            Tool::ProjectBrief => "Project brief",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.segment() == segment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Category {
        category: String,
    },
    Recipe {
        category: String,
        title: String,
    },
    AddRecipe {
        category: String,
    },
    Tool(Tool),
    /// Anything outside the scheme, kept verbatim
    Unknown(String),
}

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

fn encode(name: &str) -> String {
    utf8_percent_encode(name, COMPONENT).to_string()
}

impl Route {
    /// Parse a location path. Query and fragment are ignored, as is a
    /// trailing slash.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Route::Home;
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        if let [segment] = segments.as_slice() {
            if let Some(tool) = Tool::from_segment(segment) {
                return Route::Tool(tool);
            }
        }
        match segments.as_slice() {
            [ROOT, category] if !category.is_empty() => Route::Category {
                category: decode(category),
            },
            [ROOT, category, ADD] if !category.is_empty() => Route::AddRecipe {
                category: decode(category),
            },
            [ROOT, category, title] if !category.is_empty() && !title.is_empty() => {
                Route::Recipe {
                    category: decode(category),
                    title: decode(title),
                }
            }
            _ => Route::Unknown(path.to_string()),
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Category { category } => format!("/{}/{}", ROOT, encode(category)),
            Route::Recipe { category, title } => {
                format!("/{}/{}/{}", ROOT, encode(category), encode(title))
            }
            Route::AddRecipe { category } => format!("/{}/{}/{}", ROOT, encode(category), ADD),
            Route::Tool(tool) => format!("/{}", tool.segment()),
            Route::Unknown(path) => path.clone(),
        }
    }

    /// Category name carried by the route, if any
    pub fn category(&self) -> Option<&str> {
        match self {
            Route::Category { category }
            | Route::Recipe { category, .. }
            | Route::AddRecipe { category } => Some(category),
            Route::Home | Route::Tool(_) | Route::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scheme() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(
            Route::parse("/recipes/Soups/"),
            Route::Category {
                category: "Soups".into()
            }
        );
        assert_eq!(
            Route::parse("/recipes/Soups/add"),
            Route::AddRecipe {
                category: "Soups".into()
            }
        );
        assert_eq!(
            Route::parse("/recipes/Soups/Borscht?x=1"),
            Route::Recipe {
                category: "Soups".into(),
                title: "Borscht".into()
            }
        );
        assert_eq!(
            Route::parse("/about"),
            Route::Unknown("/about".into())
        );
        assert!(matches!(
            Route::parse("/recipes/a/b/c"),
            Route::Unknown(_)
        ));
    }

    #[test]
    fn test_tool_pages() {
        assert_eq!(Route::parse("/questions"), Route::Tool(Tool::Quiz));
        assert_eq!(Route::parse("/sql/"), Route::Tool(Tool::Sql));
        assert_eq!(Route::parse("/project-ai"), Route::Tool(Tool::ProjectBrief));
        for tool in Tool::ALL {
            assert_eq!(Route::parse(&Route::Tool(tool).to_path()), Route::Tool(tool));
        }
        assert_eq!(Route::Tool(Tool::Quiz).category(), None);
        assert!(matches!(Route::parse("/questions/1"), Route::Unknown(_)));
    }

    #[test]
    fn test_names_are_encoded_like_encode_uri_component() {
        let route = Route::Recipe {
            category: "Soups & Stews".into(),
            title: "Mom's (best) soup/v2".into(),
        };
        assert_eq!(
            route.to_path(),
            "/recipes/Soups%20%26%20Stews/Mom's%20(best)%20soup%2Fv2"
        );
        assert_eq!(Route::parse(&route.to_path()), route);
    }

    #[test]
    fn test_hebrew_names_round_trip() {
        let route = Route::Category {
            category: "מרקים".into(),
        };
        let path = route.to_path();
        assert!(path.is_ascii());
        assert_eq!(Route::parse(&path), route);
    }
}

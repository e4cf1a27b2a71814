//! Page titles and meta descriptions for titled entities.

use uuid::Uuid;

/// An entity whose name can title a page.
pub trait HasDisplayName {
    /// Name shown as the page title.
    fn display_name(&self) -> &str;

    /// Text for `<meta name="description">`, if the entity has one.
    fn meta_description(&self) -> Option<&str> {
        None
    }
}

/// A forum category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl HasDisplayName for Category {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn meta_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// A discussion topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category_id: Uuid,
}

impl HasDisplayName for Topic {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Page title for `entity`, or `fallback` when the page has no titled entity.
pub fn page_title<E: HasDisplayName + ?Sized>(entity: Option<&E>, fallback: &str) -> String {
    entity.map_or(fallback, HasDisplayName::display_name).to_owned()
}

/// Meta description for `entity`; empty when there is none.
pub fn meta_description<E: HasDisplayName + ?Sized>(entity: Option<&E>) -> String {
    entity
        .and_then(HasDisplayName::meta_description)
        .unwrap_or_default()
        .to_owned()
}

use std::fmt;

use uuid::Uuid;

use crate::color::Color;

/// A tag that can be applied to a task.
///
/// Identity (`id`) and `name` are read-only here: the id never changes
/// after creation and the name must stay in sync with the store's lookup
/// table, so renames go through [`TagStore::rename`](crate::TagStore::rename).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: Uuid,
    name: String,
    /// Icon reference from the desktop theme, if the user picked one
    pub icon: Option<String>,
    /// Label color shown next to the tag name
    pub color: Option<Color>,
    /// Whether tasks under this tag appear in actionable views
    pub actionable: bool,
}

impl Tag {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: None,
            color: None,
            actionable: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag \"{}\" with id \"{}\"", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tag_defaults() {
        let tag = Tag::new(Uuid::new_v4(), "work");
        assert_eq!(tag.name(), "work");
        assert!(tag.icon.is_none());
        assert!(tag.color.is_none());
        assert!(tag.actionable);
    }

    #[test]
    fn test_display_embeds_name_and_id() {
        let id = Uuid::new_v4();
        let tag = Tag::new(id, "home");
        assert_eq!(tag.to_string(), format!("Tag \"home\" with id \"{}\"", id));
    }
}

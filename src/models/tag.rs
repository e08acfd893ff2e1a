//! Tag model
//!
//! Tags are category labels attached to expenses. A fresh document is seeded
//! with a default set; user-created tags are flagged `is_custom`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TagId;

/// Maximum length of a tag name
const MAX_NAME_LEN: usize = 50;

/// An expense category tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Unique identifier
    pub id: TagId,

    /// Short name
    pub name: String,

    /// Display name (may differ from `name`)
    #[serde(default)]
    pub label: String,

    /// Display colour hint, e.g. "#FF6B6B"
    #[serde(default)]
    pub color: String,

    /// Display icon hint
    #[serde(default)]
    pub icon: String,

    /// False for the seeded defaults
    #[serde(default)]
    pub is_custom: bool,

    /// When the tag was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Create a user tag
    pub fn new(name: impl Into<String>, color: impl Into<String>, icon: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        Self {
            id: TagId::new(),
            label: name.clone(),
            name,
            color: color.into(),
            icon: icon.into(),
            is_custom: true,
            created_at: Utc::now(),
        }
    }

    /// The name shown to users
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Merge a patch over this tag
    pub fn apply(&mut self, patch: &TagPatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(label) = &patch.label {
            self.label = label.trim().to_string();
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
    }

    /// Validate the tag
    pub fn validate(&self) -> Result<(), TagValidationError> {
        if self.name.trim().is_empty() {
            return Err(TagValidationError::EmptyName);
        }

        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(TagValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Partial update of a tag; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagPatch {
    pub name: Option<String>,
    pub label: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// The tag set a new document starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultTag {
    Food,
    Transport,
    Shopping,
    Groceries,
    Entertainment,
    Health,
    Utilities,
    Other,
}

impl DefaultTag {
    /// All default tags in presentation order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Transport,
            Self::Shopping,
            Self::Groceries,
            Self::Entertainment,
            Self::Health,
            Self::Utilities,
            Self::Other,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Shopping => "shopping",
            Self::Groceries => "groceries",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Utilities => "utilities",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food & Dining",
            Self::Transport => "Transportation",
            Self::Shopping => "Shopping",
            Self::Groceries => "Groceries",
            Self::Entertainment => "Entertainment",
            Self::Health => "Healthcare",
            Self::Utilities => "Utilities",
            Self::Other => "Other",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Food => "#FF6B6B",
            Self::Transport => "#4ECDC4",
            Self::Shopping => "#45B7D1",
            Self::Groceries => "#A7D1AB",
            Self::Entertainment => "#96CEB4",
            Self::Health => "#FF8CC6",
            Self::Utilities => "#FFD93D",
            Self::Other => "#6C5CE7",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Transport => "🚗",
            Self::Shopping => "🛍️",
            Self::Groceries => "🛒",
            Self::Entertainment => "🎮",
            Self::Health => "💊",
            Self::Utilities => "💡",
            Self::Other => "📝",
        }
    }

    /// Create the stored Tag for this default
    pub fn to_tag(&self) -> Tag {
        Tag {
            id: TagId::new(),
            name: self.name().to_string(),
            label: self.label().to_string(),
            color: self.color().to_string(),
            icon: self.icon().to_string(),
            is_custom: false,
            created_at: Utc::now(),
        }
    }
}

/// Validation errors for tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Tag name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Tag name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for TagValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tag_is_custom() {
        let tag = Tag::new(" Pets ", "#123456", "🐶");
        assert_eq!(tag.name, "Pets");
        assert_eq!(tag.label, "Pets");
        assert!(tag.is_custom);
        assert!(tag.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let empty = Tag::new("   ", "", "");
        assert_eq!(empty.validate(), Err(TagValidationError::EmptyName));

        let long = Tag::new("x".repeat(51), "", "");
        assert_eq!(long.validate(), Err(TagValidationError::NameTooLong(51)));
    }

    #[test]
    fn test_default_tags() {
        let tags: Vec<Tag> = DefaultTag::all().iter().map(|d| d.to_tag()).collect();
        assert_eq!(tags.len(), 8);
        assert!(tags.iter().all(|t| !t.is_custom));
        assert_eq!(tags[0].name, "food");
        assert_eq!(tags[0].display_name(), "Food & Dining");
        assert_eq!(tags[5].label, "Healthcare");
    }

    #[test]
    fn test_apply_patch() {
        let mut tag = Tag::new("Pets", "#123456", "🐶");
        let id = tag.id.clone();
        tag.apply(&TagPatch {
            label: Some("Pet care".into()),
            ..Default::default()
        });
        assert_eq!(tag.id, id);
        assert_eq!(tag.name, "Pets");
        assert_eq!(tag.display_name(), "Pet care");
    }

    #[test]
    fn test_deserialize_minimal_tag() {
        let tag: Tag = serde_json::from_str(r#"{"id":"t1","name":"Fun"}"#).unwrap();
        assert_eq!(tag.display_name(), "Fun");
        assert!(!tag.is_custom);
    }
}

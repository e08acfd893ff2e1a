//! Tag operations on the store

use tracing::debug;

use crate::error::{RunoraError, RunoraResult};
use crate::models::{Tag, TagId, TagPatch};
use crate::storage::DocumentStorage;

use super::Store;

/// Result of deleting a tag
#[derive(Debug, Clone, PartialEq)]
pub struct TagDeletion {
    pub tag: Tag,
    /// Number of expenses the tag was removed from
    pub references_removed: usize,
}

impl<S: DocumentStorage> Store<S> {
    /// Create a custom tag
    pub fn add_tag(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> RunoraResult<Tag> {
        let tag = Tag::new(name, color, icon);
        if let Err(e) = tag.validate() {
            return self.reject(RunoraError::Validation(e.to_string()));
        }
        if self.name_taken(&tag.name, None) {
            return self.reject(RunoraError::Duplicate {
                entity_type: "Tag",
                identifier: tag.name,
            });
        }

        self.doc.tags.push(tag.clone());
        debug!(id = %tag.id, name = %tag.name, "Tag added");
        self.persist();
        Ok(tag)
    }

    /// Merge a patch over an existing tag
    pub fn update_tag(&mut self, id: &TagId, patch: &TagPatch) -> RunoraResult<Tag> {
        let Some(index) = self.doc.tags.iter().position(|t| &t.id == id) else {
            return self.reject(RunoraError::tag_not_found(id.as_str()));
        };

        let mut updated = self.doc.tags[index].clone();
        updated.apply(patch);
        if let Err(e) = updated.validate() {
            return self.reject(RunoraError::Validation(e.to_string()));
        }
        if self.name_taken(&updated.name, Some(id)) {
            return self.reject(RunoraError::Duplicate {
                entity_type: "Tag",
                identifier: updated.name,
            });
        }

        self.doc.tags[index] = updated.clone();
        debug!(id = %id, "Tag updated");
        self.persist();
        Ok(updated)
    }

    /// Delete a tag and strip it from every expense that references it
    pub fn delete_tag(&mut self, id: &TagId) -> RunoraResult<TagDeletion> {
        let Some(index) = self.doc.tags.iter().position(|t| &t.id == id) else {
            return self.reject(RunoraError::tag_not_found(id.as_str()));
        };

        let tag = self.doc.tags.remove(index);
        let mut references_removed = 0;
        for expense in self.doc.expenses.values_mut().flatten() {
            if expense.remove_tag(id) {
                references_removed += 1;
            }
        }

        debug!(id = %id, references_removed, "Tag deleted");
        self.persist();
        Ok(TagDeletion {
            tag,
            references_removed,
        })
    }

    /// All tags in creation order
    pub fn list_tags(&self) -> &[Tag] {
        &self.doc.tags
    }

    pub fn get_tag(&self, id: &TagId) -> Option<&Tag> {
        self.doc.find_tag(id)
    }

    /// Find a tag by id, unique id prefix, or name
    pub fn resolve_tag(&self, identifier: &str) -> RunoraResult<&Tag> {
        self.doc.resolve_tag(identifier)
    }

    fn name_taken(&self, name: &str, exclude: Option<&TagId>) -> bool {
        let lower = name.to_lowercase();
        self.doc
            .tags
            .iter()
            .filter(|t| Some(&t.id) != exclude)
            .any(|t| t.name.to_lowercase() == lower)
    }
}

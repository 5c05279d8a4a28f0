// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Note types.
//!
//! [`Note`] is the persisted entity. [`NoteDraft`] carries the full field set
//! of a note that has not been created yet, and [`NotePatch`] carries the
//! subset of fields changed by an edit.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single user note.
///
/// The JSON shape matches the notes API: `imageUri` in camel case, and the
/// server's `_id` / `image` spellings are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Server-issued id, or a temporary id for notes not yet acknowledged.
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// Opaque reference to an attached image.
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl Note {
    /// Builds a note with the given id from a draft.
    pub fn from_draft(id: String, draft: NoteDraft) -> Self {
        Note {
            id,
            title: draft.title,
            description: draft.description,
            image_uri: draft.image_uri,
        }
    }

    /// Merges the fields present in `patch` into this note.
    pub fn merge(&mut self, patch: &NotePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(image_uri) = &patch.image_uri {
            self.image_uri = Some(image_uri.clone());
        }
    }
}

/// Fields of a note about to be created.
///
/// This is also the body of `POST /posts`, sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl NoteDraft {
    /// Creates a draft without an image.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        NoteDraft {
            title: title.into(),
            description: description.into(),
            image_uri: None,
        }
    }

    /// Attaches an image reference.
    pub fn with_image(mut self, image_uri: impl Into<String>) -> Self {
        self.image_uri = Some(image_uri.into());
        self
    }

    /// Rejects drafts the server would refuse.
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)
    }
}

/// Partial note fields for an edit. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl NotePatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.image_uri.is_none()
    }

    /// Rejects empty patches and patches that blank out a required field.
    ///
    /// The server refuses edits that carry neither a title nor a
    /// description, so an image-only patch is rejected here as well.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::Validation("nothing to update".to_string()));
        }
        if self.title.is_none() && self.description.is_none() {
            return Err(Error::Validation(
                "title or description is required".to_string(),
            ));
        }
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::Validation(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[path = "note_tests.rs"]
mod tests;

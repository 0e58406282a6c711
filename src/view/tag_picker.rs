//! `#`-prefixed tag input of the news editor.

use std::time::{Duration, Instant};

use crate::domain::tag::Tag;
use crate::domain::types::TagId;
use crate::forms::tags::TAG_PREFIX;
use crate::services::ServiceResult;
use crate::view::debounce::{Debouncer, TAG_DEBOUNCE};

/// What the dropdown under the input shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Suggestions {
    #[default]
    Hidden,
    Tags(Vec<Tag>),
    /// Nothing matched (or the lookup failed): offer to create this name.
    OfferCreate(String),
}

#[derive(Debug, Clone)]
pub struct TagPicker {
    input: String,
    selected: Vec<Tag>,
    suggestions: Suggestions,
    debouncer: Debouncer,
}

impl Default for TagPicker {
    fn default() -> Self {
        Self {
            input: String::new(),
            selected: Vec::new(),
            suggestions: Suggestions::Hidden,
            debouncer: Debouncer::new(TAG_DEBOUNCE),
        }
    }
}

impl TagPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debouncer = Debouncer::new(window);
        self
    }

    /// Starts from the tags of the article being edited.
    pub fn with_selected(mut self, tags: Vec<Tag>) -> Self {
        for tag in tags {
            self.push(tag);
        }
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected(&self) -> &[Tag] {
        &self.selected
    }

    pub fn tag_ids(&self) -> Vec<TagId> {
        self.selected.iter().map(|tag| tag.id).collect()
    }

    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    /// Tag name typed after the `#`, if any.
    pub fn term(&self) -> Option<&str> {
        let term = self.input.strip_prefix(TAG_PREFIX)?.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Focusing an empty input puts the `#` in.
    pub fn focus(&mut self) {
        if self.input.is_empty() {
            self.input.push(TAG_PREFIX);
        }
    }

    /// Takes the new input text, keeping the `#` in front of it, and
    /// restarts the lookup delay.
    pub fn set_input(&mut self, value: impl Into<String>, now: Instant) {
        let value = value.into();
        self.input = if value.is_empty() || value.starts_with(TAG_PREFIX) {
            value
        } else {
            format!("{TAG_PREFIX}{value}")
        };

        if self.term().is_some() {
            self.debouncer.schedule(now);
        } else {
            self.debouncer.cancel();
            self.suggestions = Suggestions::Hidden;
        }
    }

    /// Runs the pending lookup once the input has been quiet long enough.
    ///
    /// `lookup` gets the name without the `#`. Tags already selected are
    /// left out of the suggestions.
    pub fn tick<F>(&mut self, now: Instant, lookup: F) -> bool
    where
        F: FnOnce(&str) -> ServiceResult<Vec<Tag>>,
    {
        if !self.debouncer.poll(now) {
            return false;
        }
        let Some(term) = self.term().map(str::to_string) else {
            return false;
        };

        let found = match lookup(&term) {
            Ok(tags) => tags,
            Err(err) => {
                log::error!("Failed to look up tags: {err}");
                Vec::new()
            }
        };

        let fresh: Vec<Tag> = found
            .into_iter()
            .filter(|tag| !self.is_selected(tag.id))
            .collect();

        self.suggestions = if fresh.is_empty() {
            Suggestions::OfferCreate(term)
        } else {
            Suggestions::Tags(fresh)
        };
        true
    }

    /// Adds a suggested or freshly created tag and clears the input.
    pub fn select(&mut self, tag: Tag) {
        self.push(tag);
        self.input.clear();
        self.suggestions = Suggestions::Hidden;
        self.debouncer.cancel();
    }

    pub fn remove(&mut self, id: TagId) {
        self.selected.retain(|tag| tag.id != id);
    }

    /// Backspace in the input. Removes the last tag when the input is
    /// already empty.
    pub fn backspace(&mut self) -> Option<Tag> {
        if self.input.is_empty() {
            self.selected.pop()
        } else {
            None
        }
    }

    pub fn dismiss(&mut self) {
        self.suggestions = Suggestions::Hidden;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn is_selected(&self, id: TagId) -> bool {
        self.selected.iter().any(|tag| tag.id == id)
    }

    fn push(&mut self, tag: Tag) {
        if !self.is_selected(tag.id) {
            self.selected.push(tag);
        }
    }
}

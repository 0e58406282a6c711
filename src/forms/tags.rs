//! Inline tag creation from the news editor.

use crate::domain::tag::NewTag;
use crate::domain::types::NonEmptyString;
use crate::forms::FormError;

/// Prefix that switches the tag input into lookup mode.
pub const TAG_PREFIX: char = '#';

#[derive(Debug, Clone, Default)]
pub struct TagForm {
    /// Raw input, with or without the leading `#`.
    pub input: String,
}

impl TryFrom<TagForm> for NewTag {
    type Error = FormError;

    fn try_from(form: TagForm) -> Result<Self, Self::Error> {
        let raw = form.input.strip_prefix(TAG_PREFIX).unwrap_or(&form.input);
        let tag_name = NonEmptyString::new(raw).map_err(|_| FormError::Required("Tag name"))?;

        Ok(NewTag {
            tag_name,
            note: None,
        })
    }
}

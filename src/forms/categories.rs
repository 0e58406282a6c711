//! Create/edit category form.

use serde::Deserialize;

use crate::domain::category::CategoryPayload;
use crate::domain::types::{CategoryId, NonEmptyString};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Selected parent; `None` or a non-positive id places the category at
    /// the root.
    #[serde(default)]
    pub parent_id: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            parent_id: None,
            is_active: true,
        }
    }
}

impl TryFrom<CategoryForm> for CategoryPayload {
    type Error = FormError;

    fn try_from(form: CategoryForm) -> Result<Self, Self::Error> {
        let category_name =
            NonEmptyString::new(&form.name).map_err(|_| FormError::Required("Category name"))?;

        let parent_category_id = form.parent_id.and_then(|id| CategoryId::new(id).ok());

        Ok(CategoryPayload {
            category_name,
            category_description: form.description.trim().to_string(),
            parent_category_id,
            is_active: form.is_active,
        })
    }
}

//! Screen state that outlives a single request: paginated lists, the
//! category dropdown and the tag input.

pub mod category_tree;
pub mod debounce;
pub mod list;
pub mod tag_picker;

pub use category_tree::{CategoryPicker, FlatCategory};
pub use debounce::Debouncer;
pub use list::{Completion, ListSource, ListViewModel, ReloadTicket};
pub use tag_picker::{Suggestions, TagPicker};

//! Flat, searchable rendering of the category tree for parent and category
//! dropdowns.

use crate::domain::category::CategoryNode;
use crate::domain::types::CategoryId;

/// Marker repeated once per level in front of a nested entry.
pub const INDENT_MARKER: &str = "—";

/// One dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatCategory {
    pub id: CategoryId,
    pub name: String,
    /// Depth from the forest roots, roots being level 0.
    pub level: usize,
}

impl FlatCategory {
    pub fn label(&self) -> String {
        if self.level == 0 {
            self.name.clone()
        } else {
            format!("{} {}", INDENT_MARKER.repeat(self.level), self.name)
        }
    }
}

/// Pre-order flattening of `tree`.
///
/// When `exclude` is set, that node and its whole subtree are left out, so
/// a category being edited cannot become its own ancestor.
pub fn flatten(tree: &[CategoryNode], exclude: Option<CategoryId>) -> Vec<FlatCategory> {
    let mut out = Vec::new();
    walk(tree, exclude, 0, &mut out);
    out
}

fn walk(nodes: &[CategoryNode], exclude: Option<CategoryId>, level: usize, out: &mut Vec<FlatCategory>) {
    for node in nodes {
        if Some(node.id) == exclude {
            continue;
        }
        out.push(FlatCategory {
            id: node.id,
            name: node.name.clone(),
            level,
        });
        walk(&node.children, exclude, level + 1, out);
    }
}

/// Rows whose name contains `term`, ignoring case. Levels and order are
/// kept as they are.
pub fn filter<'a>(list: &'a [FlatCategory], term: &str) -> Vec<&'a FlatCategory> {
    if term.is_empty() {
        return list.iter().collect();
    }
    let needle = term.to_lowercase();
    list.iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .collect()
}

/// State of a category dropdown with a search box.
#[derive(Debug, Clone, Default)]
pub struct CategoryPicker {
    entries: Vec<FlatCategory>,
    search: String,
    open: bool,
    selected: Option<CategoryId>,
}

impl CategoryPicker {
    pub fn new(tree: &[CategoryNode], exclude: Option<CategoryId>) -> Self {
        Self {
            entries: flatten(tree, exclude),
            ..Self::default()
        }
    }

    /// Preselects a category, e.g. the current parent on an edit form.
    pub fn with_selected(mut self, selected: Option<CategoryId>) -> Self {
        self.selected = selected;
        self
    }

    /// Replaces the tree after a fresh fetch. A selection that disappeared
    /// is dropped.
    pub fn set_tree(&mut self, tree: &[CategoryNode], exclude: Option<CategoryId>) {
        self.entries = flatten(tree, exclude);
        if let Some(id) = self.selected
            && !self.entries.iter().any(|entry| entry.id == id)
        {
            self.selected = None;
        }
    }

    pub fn entries(&self) -> &[FlatCategory] {
        &self.entries
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn visible(&self) -> Vec<&FlatCategory> {
        filter(&self.entries, &self.search)
    }

    pub fn selected(&self) -> Option<CategoryId> {
        self.selected
    }

    /// Picks a category; `None` is the root ("no parent"). Closes the
    /// dropdown and clears the search.
    pub fn select(&mut self, id: Option<CategoryId>) {
        self.selected = id;
        self.open = false;
        self.search.clear();
    }

    /// Text of the closed dropdown.
    pub fn selected_label(&self, placeholder: &str) -> String {
        self.selected
            .and_then(|id| self.entries.iter().find(|entry| entry.id == id))
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| placeholder.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: i32) -> CategoryId {
        CategoryId::new(value).unwrap()
    }

    fn tree() -> Vec<CategoryNode> {
        vec![
            CategoryNode::leaf(id(1), "Politics").with_children(vec![
                CategoryNode::leaf(id(2), "Elections")
                    .with_children(vec![CategoryNode::leaf(id(3), "Local elections")]),
                CategoryNode::leaf(id(4), "Policy"),
            ]),
            CategoryNode::leaf(id(5), "Sport"),
        ]
    }

    #[test]
    fn flatten_is_pre_order_with_depth() {
        let flat = flatten(&tree(), None);
        let rows: Vec<_> = flat.iter().map(|e| (e.id.get(), e.level)).collect();
        assert_eq!(rows, vec![(1, 0), (2, 1), (3, 2), (4, 1), (5, 0)]);
        assert_eq!(flat[2].label(), "—— Local elections");
        assert_eq!(flat[0].label(), "Politics");
    }

    #[test]
    fn excluded_subtree_disappears() {
        let flat = flatten(&tree(), Some(id(2)));
        let ids: Vec<_> = flat.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![1, 4, 5]);
    }

    #[test]
    fn select_closes_and_clears_search() {
        let mut picker = CategoryPicker::new(&tree(), None);
        picker.open();
        picker.set_search("ELECT");
        assert_eq!(picker.visible().len(), 2);

        picker.select(Some(id(3)));
        assert!(!picker.is_open());
        assert_eq!(picker.search(), "");
        assert_eq!(picker.selected_label("None"), "Local elections");

        picker.select(None);
        assert_eq!(picker.selected_label("None (root category)"), "None (root category)");
    }

    #[test]
    fn refreshed_tree_drops_vanished_selection() {
        let mut picker = CategoryPicker::new(&tree(), None).with_selected(Some(id(5)));
        picker.set_tree(&tree()[..1], None);
        assert_eq!(picker.selected(), None);
    }
}

//! Multi-select filter pickers.
//!
//! Each [`LookupFieldViewModel`] edits one filter dimension. Three of them
//! (platform, type, sort) together produce a [`GiveawayFilter`] through
//! [`build_filter`].

use crate::domain::{GiveawayFilter, LookupItem, LookupType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFieldState {
    pub lookup_type: LookupType,
    pub items: Vec<LookupItem>,
    /// Entries matching `search_text`, or every entry when it is empty.
    pub filtered_items: Vec<LookupItem>,
    /// Selected entries in selection order.
    pub selected: Vec<LookupItem>,
    pub show_list: bool,
    pub search_text: String,
}

impl LookupFieldState {
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        self.selected.len() == self.items.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupEvent {
    ToggleList,
    ToggleItem(LookupItem),
    ToggleSelectAll,
    SearchChanged(String),
}

/// State manager of one filter picker.
///
/// # Examples
///
/// ```
/// use giveaway::app::LookupFieldViewModel;
/// use giveaway::domain::{LookupItem, LookupType};
///
/// let mut field = LookupFieldViewModel::new(LookupType::Type);
/// field.toggle_item(&LookupItem::new("Loot", "loot"));
/// assert_eq!(field.selected_values(), vec!["loot"]);
/// ```
#[derive(Debug, Clone)]
pub struct LookupFieldViewModel {
    pub state: LookupFieldState,
}

impl LookupFieldViewModel {
    #[must_use]
    pub fn new(lookup_type: LookupType) -> Self {
        let items = lookup_type.items();
        Self {
            state: LookupFieldState {
                lookup_type,
                filtered_items: items.clone(),
                items,
                selected: Vec::new(),
                show_list: false,
                search_text: String::new(),
            },
        }
    }

    pub fn toggle_list(&mut self) {
        self.state.show_list = !self.state.show_list;
    }

    /// Selects `item`, or deselects it when already selected.
    pub fn toggle_item(&mut self, item: &LookupItem) {
        if let Some(position) = self.state.selected.iter().position(|s| s == item) {
            self.state.selected.remove(position);
        } else {
            self.state.selected.push(item.clone());
        }
    }

    /// Selects every entry, or clears the selection when all are selected.
    pub fn toggle_select_all(&mut self) {
        if self.state.is_all_selected() {
            self.state.selected.clear();
        } else {
            self.state.selected.clone_from(&self.state.items);
        }
    }

    /// Narrows the visible entries by case-insensitive name match.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();

        if self.state.search_text.is_empty() {
            self.state.filtered_items.clone_from(&self.state.items);
            return;
        }

        let query = self.state.search_text.to_lowercase();
        self.state.filtered_items = self
            .state
            .items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&query))
            .cloned()
            .collect();
    }

    #[must_use]
    pub fn is_selected(&self, item: &LookupItem) -> bool {
        self.state.selected.contains(item)
    }

    /// Machine values of the selection, in selection order.
    #[must_use]
    pub fn selected_values(&self) -> Vec<&str> {
        self.state
            .selected
            .iter()
            .map(|item| item.value.as_str())
            .collect()
    }

    pub fn handle_event(&mut self, event: LookupEvent) -> bool {
        match event {
            LookupEvent::ToggleList => self.toggle_list(),
            LookupEvent::ToggleItem(item) => self.toggle_item(&item),
            LookupEvent::ToggleSelectAll => self.toggle_select_all(),
            LookupEvent::SearchChanged(text) => self.set_search_text(text),
        }
        true
    }
}

/// Combines the three pickers into a request filter.
///
/// Returns `None` when nothing is selected in any picker.
#[must_use]
pub fn build_filter(
    platform: &LookupFieldViewModel,
    kind: &LookupFieldViewModel,
    sort_by: &LookupFieldViewModel,
) -> Option<GiveawayFilter> {
    GiveawayFilter::from_selections(
        &platform.selected_values(),
        &kind.selected_values(),
        &sort_by.selected_values(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_full_unselected_list() {
        let field = LookupFieldViewModel::new(LookupType::Platform);
        assert_eq!(field.state.items.len(), 18);
        assert_eq!(field.state.filtered_items, field.state.items);
        assert!(field.state.selected.is_empty());
        assert!(!field.state.show_list);
    }

    #[test]
    fn toggle_item_selects_then_deselects() {
        let mut field = LookupFieldViewModel::new(LookupType::SortBy);
        let item = field.state.items[1].clone();

        field.handle_event(LookupEvent::ToggleItem(item.clone()));
        assert!(field.is_selected(&item));

        field.handle_event(LookupEvent::ToggleItem(item.clone()));
        assert!(!field.is_selected(&item));
    }

    #[test]
    fn select_all_then_clear() {
        let mut field = LookupFieldViewModel::new(LookupType::Type);
        field.toggle_item(&field.state.items[0].clone());

        field.toggle_select_all();
        assert!(field.state.is_all_selected());
        assert_eq!(field.state.selected.len(), 3);

        field.toggle_select_all();
        assert!(field.state.selected.is_empty());
    }

    #[test]
    fn search_filters_names_ignoring_case() {
        let mut field = LookupFieldViewModel::new(LookupType::Platform);
        field.set_search_text("xbox");
        let names: Vec<&str> = field
            .state
            .filtered_items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Xbox One", "Xbox Series XS", "Xbox 360"]);

        field.set_search_text("");
        assert_eq!(field.state.filtered_items.len(), 18);
    }

    #[test]
    fn toggle_list_flips_visibility() {
        let mut field = LookupFieldViewModel::new(LookupType::Type);
        field.handle_event(LookupEvent::ToggleList);
        assert!(field.state.show_list);
        field.handle_event(LookupEvent::ToggleList);
        assert!(!field.state.show_list);
    }

    #[test]
    fn build_filter_joins_selected_values() {
        let mut platform = LookupFieldViewModel::new(LookupType::Platform);
        let kind = LookupFieldViewModel::new(LookupType::Type);
        let mut sort = LookupFieldViewModel::new(LookupType::SortBy);

        assert_eq!(build_filter(&platform, &kind, &sort), None);

        platform.toggle_item(&LookupItem::new("PC", "pc"));
        platform.toggle_item(&LookupItem::new("Steam", "steam"));
        sort.toggle_item(&LookupItem::new("Popularity", "popularity"));

        let filter = build_filter(&platform, &kind, &sort).unwrap();
        assert_eq!(filter.platform.as_deref(), Some("pc.steam"));
        assert_eq!(filter.kind, None);
        assert_eq!(filter.sort_by.as_deref(), Some("popularity"));
    }
}

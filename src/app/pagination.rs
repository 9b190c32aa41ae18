//! Client-side paging of a fully fetched list.

use crate::domain::GiveawayItem;
use std::collections::HashSet;

/// Splits `items` into consecutive chunks of `size`. The last chunk may be
/// shorter. A `size` of zero is treated as one.
///
/// # Examples
///
/// ```
/// use giveaway::app::pagination::chunk;
///
/// let pages = chunk((1..=25).collect::<Vec<_>>(), 10);
/// let sizes: Vec<usize> = pages.iter().map(Vec::len).collect();
/// assert_eq!(sizes, vec![10, 10, 5]);
/// ```
#[must_use]
pub fn chunk<T: Clone>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    items.chunks(size.max(1)).map(<[T]>::to_vec).collect()
}

/// Total number of items across all pages.
#[must_use]
pub fn total_len<T>(pages: &[Vec<T>]) -> usize {
    pages.iter().map(Vec::len).sum()
}

/// Appends the items of `page` whose id is not yet in `visible`.
///
/// Returns the number of items appended.
pub fn append_unique(visible: &mut Vec<GiveawayItem>, page: &[GiveawayItem]) -> usize {
    let mut seen: HashSet<i64> = visible.iter().map(|item| item.id).collect();
    let before = visible.len();
    for item in page {
        if seen.insert(item.id) {
            visible.push(item.clone());
        }
    }
    visible.len() - before
}

/// Replaces the item with `item.id` in place. Returns whether one was found.
pub fn replace_by_id(items: &mut [GiveawayItem], item: &GiveawayItem) -> bool {
    let mut found = false;
    for existing in items.iter_mut().filter(|existing| existing.id == item.id) {
        existing.clone_from(item);
        found = true;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_has_no_short_tail() {
        let pages = chunk(GiveawayItem::mock_list(20), 10);
        assert_eq!(pages.len(), 2);
        assert_eq!(total_len(&pages), 20);
    }

    #[test]
    fn empty_input_has_no_pages() {
        assert!(chunk(Vec::<GiveawayItem>::new(), 10).is_empty());
    }

    #[test]
    fn append_skips_present_ids() {
        let mut visible = GiveawayItem::mock_list(2);
        let appended = append_unique(&mut visible, &GiveawayItem::mock_list(4));
        assert_eq!(appended, 2);
        let ids: Vec<i64> = visible.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut items = GiveawayItem::mock_list(3);
        let mut updated = GiveawayItem::mock(2);
        updated.is_favorite = true;

        assert!(replace_by_id(&mut items, &updated));
        assert!(items[1].is_favorite);
        assert!(!replace_by_id(&mut items, &GiveawayItem::mock(9)));
    }
}

//! Display Order Operations
//!
//! Ordering is always a total rewrite: after any change every member of the
//! affected list gets its 1-based position as `display_order`.

use crate::domain::{DomainError, DomainResult, Entity, Ordered};

/// Order assigned to an item appended to `items`
pub fn next_order<T>(items: &[T]) -> u32 {
    items.len() as u32 + 1
}

/// Rewrite every item's order to its 1-based position
pub fn reindex<T: Ordered>(items: &mut [T]) {
    for (idx, item) in items.iter_mut().enumerate() {
        item.set_display_order(idx as u32 + 1);
    }
}

/// Remove at `from`, insert at `to`. Returns false when nothing moved.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> DomainResult<bool> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(DomainError::Validation(format!(
            "cannot move position {} to {} in a list of {}",
            from, to, len
        )));
    }
    if from == to {
        return Ok(false);
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(true)
}

/// Splice and reindex
pub fn reorder<T: Ordered>(items: &mut Vec<T>, from: usize, to: usize) -> DomainResult<bool> {
    let moved = move_item(items, from, to)?;
    if moved {
        reindex(items);
    }
    Ok(moved)
}

/// Fill missing orders from list position, stable-sort, then reindex
pub fn normalize<T: Ordered>(items: &mut Vec<T>) {
    for (idx, item) in items.iter_mut().enumerate() {
        if item.display_order() == 0 {
            item.set_display_order(idx as u32 + 1);
        }
    }
    items.sort_by_key(|item| item.display_order());
    reindex(items);
}

pub fn ordered_ids<T: Entity>(items: &[T]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

/// Arrange `items` to follow `ids`; items not listed keep their relative
/// order after the listed ones.
pub fn restore_order<T: Ordered>(items: &mut Vec<T>, ids: &[String]) {
    let rank = |item: &T| {
        ids.iter()
            .position(|id| id == item.id())
            .unwrap_or(ids.len())
    };
    items.sort_by_key(|item| rank(item));
    reindex(items);
}

/// Orders are exactly 1..N
pub fn is_contiguous<T: Ordered>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(idx, item)| item.display_order() == idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::Utc;

    fn categories(names: &[&str]) -> Vec<Category> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                Category::new(format!("c{}", idx), name.to_string(), idx as u32 + 1, Utc::now())
            })
            .collect()
    }

    fn names(items: &[Category]) -> Vec<(&str, u32)> {
        items.iter().map(|c| (c.name.as_str(), c.display_order)).collect()
    }

    #[test]
    fn test_move_to_front_rewrites_orders() {
        let mut items = categories(&["Soups", "Salads", "Mains"]);
        assert!(reorder(&mut items, 2, 0).unwrap());
        assert_eq!(names(&items), vec![("Mains", 1), ("Soups", 2), ("Salads", 3)]);
    }

    #[test]
    fn test_paired_moves_restore_order() {
        let original = categories(&["a", "b", "c", "d", "e"]);
        for i in 0..5 {
            for j in 0..5 {
                let mut items = original.clone();
                reorder(&mut items, i, j).unwrap();
                reorder(&mut items, j, i).unwrap();
                assert_eq!(items, original, "move {} -> {} and back", i, j);
            }
        }
    }

    #[test]
    fn test_orders_stay_contiguous_over_move_sequences() {
        let mut items = categories(&["a", "b", "c", "d", "e", "f", "g"]);
        // Deterministic pseudo-random walk over (from, to) pairs
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for _ in 0..200 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let from = (seed % 7) as usize;
            let to = ((seed >> 8) % 7) as usize;
            reorder(&mut items, from, to).unwrap();
            assert!(is_contiguous(&items));
            let mut orders: Vec<_> = items.iter().map(|c| c.display_order).collect();
            orders.dedup();
            assert_eq!(orders.len(), 7);
        }
    }

    #[test]
    fn test_same_index_is_noop() {
        let mut items = categories(&["a", "b"]);
        assert!(!reorder(&mut items, 1, 1).unwrap());
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut items = categories(&["a", "b"]);
        assert!(matches!(reorder(&mut items, 0, 2), Err(DomainError::Validation(_))));
        assert!(matches!(reorder(&mut items, 5, 0), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_restore_order_and_next_order() {
        let mut items = categories(&["a", "b", "c"]);
        let ids = ordered_ids(&items);
        reorder(&mut items, 0, 2).unwrap();
        restore_order(&mut items, &ids);
        assert_eq!(names(&items), vec![("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(next_order(&items), 4);
    }

    #[test]
    fn test_normalize_fills_gaps() {
        let mut items = categories(&["a", "b", "c"]);
        items[0].display_order = 9;
        items[1].display_order = 0;
        items[2].display_order = 4;
        normalize(&mut items);
        assert_eq!(names(&items), vec![("b", 1), ("c", 2), ("a", 3)]);
    }
}

/// One page of the recipe grid. Pages are 1-based; `start..end` indexes
/// the category's recipe list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub count: usize,
    pub start: usize,
    pub end: usize,
}

impl Page {
    /// Clamp `page` into range for `total` items. Zero items still yield
    /// one (empty) page.
    pub fn of(total: usize, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let count = total.div_ceil(per_page).max(1);
        let number = page.clamp(1, count);
        let start = ((number - 1) * per_page).min(total);
        let end = (start + per_page).min(total);
        Self {
            number,
            count,
            start,
            end,
        }
    }

    /// Page holding the item at `index`
    pub fn containing(index: usize, per_page: usize) -> usize {
        index / per_page.max(1) + 1
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.count
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

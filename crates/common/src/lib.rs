pub mod error;
pub mod utils;

use patternfly_yew::prelude::*;
use std::rc::Rc;
use yew::prelude::*;

/// The `(offset, limit)` of the page window, with the offset clamped to `total`.
pub fn pagination_window(total: usize, page: usize, per_page: usize) -> (usize, usize) {
    let offset = per_page * page;
    (offset.min(total), per_page)
}

#[hook]
pub fn use_apply_pagination<T>(entries: Rc<Vec<T>>, control: PaginationControl) -> Rc<Vec<T>>
where
    T: Clone + PartialEq + 'static,
{
    use_memo((entries, control), |(entries, control)| {
        let (offset, limit) = pagination_window(entries.len(), control.page, control.per_page);
        entries
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect::<Vec<_>>()
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(pagination_window(35, 0, 10), (0, 10));
    }

    #[test]
    fn window_advances_by_per_page() {
        assert_eq!(pagination_window(35, 2, 10), (20, 10));
    }

    #[test]
    fn offset_is_clamped_to_total() {
        assert_eq!(pagination_window(5, 3, 10), (5, 10));
    }
}

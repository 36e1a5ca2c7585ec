// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Sentinel entry in a page window: render an ellipsis, not a page link.
pub const ELLIPSIS: i64 = -1;

/// Windows with at most this many pages are rendered in full.
pub const MAX_FULL_PAGES: i64 = 4;

pub fn total_pages(total_elements: i64, size: i64) -> i64 {
    if total_elements <= 0 {
        return 0;
    }
    (total_elements + size - 1) / size
}

/// Compact pager window for `total_pages` pages with `current` active.
///
/// Small page counts come back as the full `0..total_pages` range. Larger
/// ones always anchor the first and last page, keep a three-wide block
/// around `current` (clamped inward at either edge), and mark the gaps
/// with [`ELLIPSIS`].
pub fn page_window(current: i64, total_pages: i64, max_full: i64) -> Vec<i64> {
    if total_pages <= max_full {
        return (0..total_pages).collect();
    }

    let last = total_pages - 1;
    let mut window = vec![0];

    if current > 2 {
        window.push(ELLIPSIS);
    }

    let start = (current - 1).min(last - 2).max(1);
    let end = (current + 1).max(2).min(last - 1);
    for page in start..=end {
        window.push(page);
    }

    if current < last - 2 {
        window.push(ELLIPSIS);
    }

    window.push(last);
    window
}

#[cfg(test)]
mod tests {
    use super::{ELLIPSIS, MAX_FULL_PAGES, page_window, total_pages};

    fn window(current: i64, pages: i64) -> Vec<i64> {
        page_window(current, pages, MAX_FULL_PAGES)
    }

    #[test]
    fn small_page_counts_render_in_full() {
        assert_eq!(window(0, 0), Vec::<i64>::new());
        assert_eq!(window(0, 1), vec![0]);
        assert_eq!(window(1, 3), vec![0, 1, 2]);
        assert_eq!(window(3, 4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn first_page_of_ten() {
        assert_eq!(window(0, 10), vec![0, 1, 2, ELLIPSIS, 9]);
    }

    #[test]
    fn middle_page_of_ten() {
        assert_eq!(window(5, 10), vec![0, ELLIPSIS, 4, 5, 6, ELLIPSIS, 9]);
    }

    #[test]
    fn last_page_of_ten() {
        assert_eq!(window(9, 10), vec![0, ELLIPSIS, 7, 8, 9]);
    }

    #[test]
    fn window_keeps_anchors_and_strict_order() {
        for pages in 5..40 {
            for current in 0..pages {
                let result = window(current, pages);
                assert_eq!(result.first(), Some(&0));
                assert_eq!(result.last(), Some(&(pages - 1)));
                assert!(result.contains(&current));
                let indices: Vec<i64> = result
                    .iter()
                    .copied()
                    .filter(|entry| *entry != ELLIPSIS)
                    .collect();
                let mut sorted = indices.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(indices, sorted, "window for {current}/{pages}");
            }
        }
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0, 15), 0);
        assert_eq!(total_pages(1, 15), 1);
        assert_eq!(total_pages(15, 15), 1);
        assert_eq!(total_pages(16, 15), 2);
        assert_eq!(total_pages(150, 15), 10);
    }
}

use core::ops::Range;

/// Move selection cursor one item up, wrapping to the last item.
pub fn wrap_prev(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        0
    } else if selected > 0 && selected < item_count {
        selected - 1
    } else {
        item_count - 1
    }
}

/// Move selection cursor one item down, wrapping to the first item.
pub fn wrap_next(selected: usize, item_count: usize) -> usize {
    if selected + 1 < item_count {
        selected + 1
    } else {
        0
    }
}

/// Rows of a list to draw so that `selected` stays on screen.
pub fn visible_window(selected: usize, item_count: usize, rows: usize) -> Range<usize> {
    if rows == 0 || item_count == 0 {
        return 0..0;
    }
    let start = if selected < rows {
        0
    } else {
        (selected + 1 - rows).min(item_count.saturating_sub(rows))
    };
    start..(start + rows).min(item_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_prev_boundaries() {
        assert_eq!(wrap_prev(0, 3), 2);
        assert_eq!(wrap_prev(2, 3), 1);
        assert_eq!(wrap_prev(0, 1), 0);
        assert_eq!(wrap_prev(0, 0), 0);
    }

    #[test]
    fn wrap_next_boundaries() {
        assert_eq!(wrap_next(2, 3), 0);
        assert_eq!(wrap_next(0, 3), 1);
        assert_eq!(wrap_next(0, 1), 0);
        assert_eq!(wrap_next(0, 0), 0);
    }

    #[test]
    fn wrap_cycles_return_to_start() {
        for count in 1..=8 {
            let mut up = 0;
            let mut down = 0;
            for step in 1..=count {
                up = wrap_prev(up, count);
                down = wrap_next(down, count);
                if step < count {
                    assert_ne!(up, 0);
                    assert_ne!(down, 0);
                }
            }
            assert_eq!((up, down), (0, 0));
        }
    }

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(0, 3, 5), 0..3);
        assert_eq!(visible_window(4, 8, 5), 0..5);
        assert_eq!(visible_window(5, 8, 5), 1..6);
        assert_eq!(visible_window(7, 8, 5), 3..8);
        assert_eq!(visible_window(0, 0, 5), 0..0);
    }
}
